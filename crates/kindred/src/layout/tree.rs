//! Family units: the tree the layout engine positions.
//!
//! A [`FamilyUnit`] is a member, their spouse when there is one, and one unit
//! per child. Units are claimed from the roots of a [`Directory`] by a
//! [`UnitBuilder`], which owns the visited set for a single layout pass.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{trace, warn};

use kindred_core::{identifier::Id, member::FamilyMember};

use crate::config::LayoutConfig;

/// Id lookup over a member collection, preserving input order.
#[derive(Debug)]
pub(crate) struct Directory<'a> {
    members: IndexMap<Id, &'a FamilyMember>,
}

impl<'a> Directory<'a> {
    /// Index `members` by id. The first record wins when an id repeats.
    pub(crate) fn new(members: &'a [FamilyMember]) -> Self {
        let mut index = IndexMap::with_capacity(members.len());
        for member in members {
            if index.contains_key(&member.id()) {
                warn!(id:% = member.id(); "Duplicate member id, keeping the first record");
                continue;
            }
            index.insert(member.id(), member);
        }
        Self { members: index }
    }

    pub(crate) fn get(&self, id: Id) -> Option<&'a FamilyMember> {
        self.members.get(&id).copied()
    }

    /// Members in input order, duplicates removed.
    pub(crate) fn members(&self) -> impl Iterator<Item = &'a FamilyMember> + '_ {
        self.members.values().copied()
    }

    /// Members without parents, in input order.
    pub(crate) fn roots(&self) -> impl Iterator<Item = &'a FamilyMember> + '_ {
        self.members().filter(|member| member.is_root())
    }
}

/// A couple (or single member) together with the families of their children.
///
/// Units live in the [`UnitBuilder`] arena and refer to their child units by
/// index. All offsets are relative to the left edge of the unit's span.
#[derive(Debug)]
pub(super) struct FamilyUnit<'a> {
    primary: &'a FamilyMember,
    spouse: Option<&'a FamilyMember>,
    children: Vec<usize>,
    couple_width: f32,
    couple_left: f32,
    children_left: f32,
    width: f32,
}

impl<'a> FamilyUnit<'a> {
    fn open(primary: &'a FamilyMember, spouse: Option<&'a FamilyMember>) -> Self {
        Self {
            primary,
            spouse,
            children: Vec::new(),
            couple_width: 0.0,
            couple_left: 0.0,
            children_left: 0.0,
            width: 0.0,
        }
    }

    pub(super) fn primary(&self) -> &'a FamilyMember {
        self.primary
    }

    pub(super) fn spouse(&self) -> Option<&'a FamilyMember> {
        self.spouse
    }

    /// Arena indices of the child units, in claim order.
    pub(super) fn children(&self) -> &[usize] {
        &self.children
    }

    /// Width taken by the member cards of the couple itself.
    pub(super) fn couple_width(&self) -> f32 {
        self.couple_width
    }

    /// Offset of the primary member's card.
    pub(super) fn couple_left(&self) -> f32 {
        self.couple_left
    }

    /// Offset of the first child unit.
    pub(super) fn children_left(&self) -> f32 {
        self.children_left
    }

    /// Width of the whole subtree.
    pub(super) fn width(&self) -> f32 {
        self.width
    }
}

/// A unit whose children are still being claimed.
struct Frame {
    unit: usize,
    child_ids: Vec<Id>,
    next: usize,
}

/// Claims family units for one layout pass.
///
/// Claiming walks the tree with an explicit stack, so input depth is bounded
/// by memory rather than by the thread stack.
pub(super) struct UnitBuilder<'d, 'a> {
    directory: &'d Directory<'a>,
    config: &'d LayoutConfig,
    visited: HashSet<Id>,
    units: Vec<FamilyUnit<'a>>,
}

impl<'d, 'a> UnitBuilder<'d, 'a> {
    pub(super) fn new(directory: &'d Directory<'a>, config: &'d LayoutConfig) -> Self {
        Self {
            directory,
            config,
            visited: HashSet::new(),
            units: Vec::new(),
        }
    }

    /// Returns true if the member already belongs to a unit.
    pub(super) fn is_claimed(&self, id: Id) -> bool {
        self.visited.contains(&id)
    }

    pub(super) fn unit(&self, idx: usize) -> &FamilyUnit<'a> {
        &self.units[idx]
    }

    /// Claim the unit rooted at `root` and return its arena index, unless an
    /// earlier unit already took it (typically as someone's spouse).
    ///
    /// Descendants are claimed depth-first in `children` order, the primary's
    /// list before the spouse's. Each unit is measured once all of its
    /// children are.
    pub(super) fn claim_root(&mut self, root: &'a FamilyMember) -> Option<usize> {
        if self.is_claimed(root.id()) {
            trace!(id:% = root.id(); "Root already claimed");
            return None;
        }

        let root_idx = self.open(root);
        let mut stack = vec![self.frame(root_idx)];

        while let Some(frame) = stack.last_mut() {
            let Some(&child_id) = frame.child_ids.get(frame.next) else {
                let unit = frame.unit;
                stack.pop();
                self.measure(unit);
                continue;
            };
            frame.next += 1;
            let parent = frame.unit;

            let Some(child) = self.directory.get(child_id) else {
                let parent_id = self.units[parent].primary.id();
                trace!(parent:% = parent_id, child:% = child_id; "Unknown child id");
                continue;
            };
            if self.is_claimed(child.id()) {
                continue;
            }

            let child_idx = self.open(child);
            self.units[parent].children.push(child_idx);
            stack.push(self.frame(child_idx));
        }

        Some(root_idx)
    }

    /// Mark `primary` and their unclaimed spouse as visited and start a unit.
    fn open(&mut self, primary: &'a FamilyMember) -> usize {
        self.visited.insert(primary.id());

        let spouse = primary
            .spouse()
            .and_then(|id| self.directory.get(id))
            .filter(|spouse| !self.is_claimed(spouse.id()));
        if let Some(spouse) = spouse {
            self.visited.insert(spouse.id());
        }

        self.units.push(FamilyUnit::open(primary, spouse));
        self.units.len() - 1
    }

    fn frame(&self, unit: usize) -> Frame {
        let unit_ref = &self.units[unit];
        // The spouse's own children list may name children the primary's
        // list does not.
        let child_ids = unit_ref
            .primary
            .children()
            .iter()
            .chain(unit_ref.spouse.map(FamilyMember::children).unwrap_or_default())
            .copied()
            .collect();
        Frame {
            unit,
            child_ids,
            next: 0,
        }
    }

    /// Size a unit from its already measured children.
    ///
    /// The couple is centered over the midpoint of its first and last child
    /// cards. When that would push the couple past the left edge of the span,
    /// the children move right instead.
    fn measure(&mut self, idx: usize) {
        let card_width = self.config.card_size().width();
        let unit = &self.units[idx];

        let couple_width = match unit.spouse {
            Some(_) => card_width + self.config.spouse_offset(),
            None => card_width,
        };

        let mut children_width = 0.0;
        let mut outer_centers: Option<(f32, f32)> = None;
        for (pos, &child_idx) in unit.children.iter().enumerate() {
            let child = &self.units[child_idx];
            if pos > 0 {
                children_width += self.config.sibling_gap();
            }
            let center = children_width + child.couple_left + card_width / 2.0;
            let first = outer_centers.map_or(center, |(first, _)| first);
            outer_centers = Some((first, center));
            children_width += child.width;
        }

        let (couple_left, children_left) = match outer_centers {
            None => (0.0, 0.0),
            Some((first, last)) => {
                let couple_left = (first + last) / 2.0 - couple_width / 2.0;
                if couple_left >= 0.0 {
                    (couple_left, 0.0)
                } else {
                    (0.0, -couple_left)
                }
            }
        };

        let unit = &mut self.units[idx];
        unit.couple_width = couple_width;
        unit.couple_left = couple_left;
        unit.children_left = children_left;
        unit.width = (couple_left + couple_width).max(children_left + children_width);
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn claim_all<'a>(builder: &mut UnitBuilder<'_, 'a>, directory: &Directory<'a>) -> Vec<usize> {
        directory
            .roots()
            .filter_map(|root| builder.claim_root(root))
            .collect()
    }

    fn child_ids(builder: &UnitBuilder, idx: usize) -> Vec<Id> {
        builder
            .unit(idx)
            .children()
            .iter()
            .map(|&child| builder.unit(child).primary().id())
            .collect()
    }

    #[test]
    fn test_directory_keeps_first_duplicate() {
        let members = vec![
            FamilyMember::new("dup", "First"),
            FamilyMember::new("dup", "Second"),
        ];
        let directory = Directory::new(&members);

        assert_eq!(directory.members().count(), 1);
        assert_eq!(directory.get(Id::new("dup")).unwrap().name(), "First");
    }

    #[test]
    fn test_roots_in_input_order() {
        let members = vec![
            FamilyMember::new("b", "B"),
            FamilyMember::new("child", "Child").with_parents(["b"]),
            FamilyMember::new("a", "A"),
        ];
        let directory = Directory::new(&members);

        let roots: Vec<Id> = directory.roots().map(FamilyMember::id).collect();
        assert_eq!(roots, vec![Id::new("b"), Id::new("a")]);
    }

    #[test]
    fn test_spouse_root_is_claimed_once() {
        let members = vec![
            FamilyMember::new("a", "A").with_spouse("b"),
            FamilyMember::new("b", "B").with_spouse("a"),
        ];
        let directory = Directory::new(&members);
        let config = LayoutConfig::default();
        let mut builder = UnitBuilder::new(&directory, &config);
        let roots = claim_all(&mut builder, &directory);

        assert_eq!(roots.len(), 1);
        let spouse = builder.unit(roots[0]).spouse().map(FamilyMember::id);
        assert_eq!(spouse, Some(Id::new("b")));
    }

    #[test]
    fn test_spouse_children_are_merged() {
        let members = vec![
            FamilyMember::new("a", "A").with_spouse("b").with_children(["x"]),
            FamilyMember::new("b", "B")
                .with_spouse("a")
                .with_children(["x", "y"]),
            FamilyMember::new("x", "X").with_parents(["a", "b"]),
            FamilyMember::new("y", "Y").with_parents(["b"]),
        ];
        let directory = Directory::new(&members);
        let config = LayoutConfig::default();
        let mut builder = UnitBuilder::new(&directory, &config);
        let roots = claim_all(&mut builder, &directory);

        assert_eq!(child_ids(&builder, roots[0]), vec![Id::new("x"), Id::new("y")]);
    }

    #[test]
    fn test_widths_are_measured_bottom_up() {
        let members = vec![
            FamilyMember::new("a", "A").with_children(["b", "c"]),
            FamilyMember::new("b", "B")
                .with_parents(["a"])
                .with_spouse("s"),
            FamilyMember::new("s", "S"),
            FamilyMember::new("c", "C").with_parents(["a"]),
        ];
        let directory = Directory::new(&members);
        let config = LayoutConfig::default();
        let mut builder = UnitBuilder::new(&directory, &config);
        let roots = claim_all(&mut builder, &directory);

        // "s" is parentless but already claimed as b's spouse.
        assert_eq!(roots.len(), 1);
        let root = builder.unit(roots[0]);
        let (b, c) = (builder.unit(root.children()[0]), builder.unit(root.children()[1]));
        assert_approx_eq!(f32, b.width(), 250.0);
        assert_approx_eq!(f32, c.width(), 100.0);
        assert_approx_eq!(f32, root.couple_width(), 100.0);
        assert_approx_eq!(f32, root.width(), 250.0 + 50.0 + 100.0);
        // Centered between b's card center (50) and c's (350).
        assert_approx_eq!(f32, root.couple_left(), 150.0);
        assert_approx_eq!(f32, root.children_left(), 0.0);
    }

    #[test]
    fn test_wide_couple_shifts_children() {
        let members = vec![
            FamilyMember::new("a", "A").with_spouse("s").with_children(["c"]),
            FamilyMember::new("s", "S").with_spouse("a"),
            FamilyMember::new("c", "C").with_parents(["a", "s"]),
        ];
        let directory = Directory::new(&members);
        let config = LayoutConfig::default();
        let mut builder = UnitBuilder::new(&directory, &config);
        let roots = claim_all(&mut builder, &directory);

        let root = builder.unit(roots[0]);
        assert_approx_eq!(f32, root.couple_left(), 0.0);
        assert_approx_eq!(f32, root.children_left(), 75.0);
        assert_approx_eq!(f32, root.width(), 250.0);
    }

    #[test]
    fn test_cycle_terminates() {
        let members = vec![
            FamilyMember::new("root", "Root").with_children(["a"]),
            FamilyMember::new("a", "A")
                .with_parents(["root"])
                .with_children(["root", "a"]),
        ];
        let directory = Directory::new(&members);
        let config = LayoutConfig::default();
        let mut builder = UnitBuilder::new(&directory, &config);
        let roots = claim_all(&mut builder, &directory);

        assert_eq!(roots.len(), 1);
        assert_eq!(child_ids(&builder, roots[0]), vec![Id::new("a")]);
        let a = builder.unit(roots[0]).children()[0];
        assert!(builder.unit(a).children().is_empty());
    }
}

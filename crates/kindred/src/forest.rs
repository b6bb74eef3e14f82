//! Expand/collapse view of a family as nested lists.
//!
//! Unlike [`crate::layout`], this view computes no coordinates. It builds a
//! rooted forest from parent-less members, where every node lists its known
//! children, and tracks which nodes are expanded. A nested-container renderer
//! draws the rest.
//!
//! A member with two recorded parents appears under both of them. A child id
//! that already occurs on the path from the root is cut, so cyclic input still
//! produces a finite forest. Both the build and the [`FamilyForest::visible`]
//! walk use explicit stacks.

use std::collections::HashSet;

use log::{debug, trace};

use kindred_core::{identifier::Id, member::FamilyMember};

use crate::layout::Directory;

/// The set of expanded member ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<Id>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: Id) -> bool {
        self.expanded.contains(&id)
    }

    pub fn expand(&mut self, id: Id) {
        self.expanded.insert(id);
    }

    pub fn collapse(&mut self, id: Id) {
        self.expanded.remove(&id);
    }

    /// Flip the state of `id`; returns true if it is now expanded.
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }
}

impl FromIterator<Id> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        Self {
            expanded: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone)]
struct Node<'a> {
    member: &'a FamilyMember,
    level: usize,
    expanded: bool,
    children: Vec<usize>,
}

/// A member in the forest, borrowed from its [`FamilyForest`].
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'f, 'a> {
    forest: &'f FamilyForest<'a>,
    idx: usize,
}

impl<'f, 'a> TreeNode<'f, 'a> {
    fn node(&self) -> &'f Node<'a> {
        &self.forest.nodes[self.idx]
    }

    pub fn member(&self) -> &'a FamilyMember {
        self.node().member
    }

    pub fn id(&self) -> Id {
        self.member().id()
    }

    /// Depth below the root; roots are level 0.
    pub fn level(&self) -> usize {
        self.node().level
    }

    pub fn is_expanded(&self) -> bool {
        self.node().expanded
    }

    pub fn children(&self) -> impl Iterator<Item = TreeNode<'f, 'a>> + 'f {
        self.forest.handles(&self.node().children)
    }

    pub fn has_children(&self) -> bool {
        !self.node().children.is_empty()
    }
}

/// Rooted forest of a member collection.
///
/// Nodes are stored flat and linked by index; building and dropping the
/// forest never recurses, however deep the family goes.
#[derive(Debug, Clone, Default)]
pub struct FamilyForest<'a> {
    nodes: Vec<Node<'a>>,
    roots: Vec<usize>,
}

impl<'a> FamilyForest<'a> {
    /// Build the forest from `members`, reading expansion flags from `expansion`.
    pub fn build(members: &'a [FamilyMember], expansion: &ExpansionState) -> Self {
        let directory = Directory::new(members);
        let mut forest = Self::default();

        for root in directory.roots() {
            let root_idx = forest.push_node(root, 0, expansion);
            forest.roots.push(root_idx);
            forest.attach_descendants(&directory, root_idx, expansion);
        }

        debug!(
            roots_count = forest.roots.len(),
            nodes_count = forest.nodes.len();
            "Family forest built"
        );
        forest
    }

    pub fn roots(&self) -> impl Iterator<Item = TreeNode<'_, 'a>> + '_ {
        self.handles(&self.roots)
    }

    /// Total number of nodes, counting members shown under several parents
    /// once per appearance.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes a nested-list renderer shows, in display order: every root, and
    /// the children of every expanded node.
    pub fn visible(&self) -> Vec<TreeNode<'_, 'a>> {
        let mut visible = Vec::new();
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            visible.push(TreeNode { forest: self, idx });
            let node = &self.nodes[idx];
            if node.expanded {
                stack.extend(node.children.iter().rev());
            }
        }
        visible
    }

    fn handles<'f>(&'f self, indices: &'f [usize]) -> impl Iterator<Item = TreeNode<'f, 'a>> + 'f {
        indices.iter().map(move |&idx| TreeNode { forest: self, idx })
    }

    fn push_node(
        &mut self,
        member: &'a FamilyMember,
        level: usize,
        expansion: &ExpansionState,
    ) -> usize {
        self.nodes.push(Node {
            member,
            level,
            expanded: expansion.is_expanded(member.id()),
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// Depth-first walk below `root_idx` with an explicit stack of
    /// `(node, next child position)` frames. The ids on the stack form the
    /// ancestor path used to cut cycles.
    fn attach_descendants(
        &mut self,
        directory: &Directory<'a>,
        root_idx: usize,
        expansion: &ExpansionState,
    ) {
        let mut path = HashSet::from([self.nodes[root_idx].member.id()]);
        let mut stack = vec![(root_idx, 0)];

        while let Some(frame) = stack.last_mut() {
            let (idx, next) = *frame;
            let member = self.nodes[idx].member;
            let Some(&child_id) = member.children().get(next) else {
                path.remove(&member.id());
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if path.contains(&child_id) {
                trace!(parent:% = member.id(), child:% = child_id; "Cyclic child link cut");
                continue;
            }
            let Some(child) = directory.get(child_id) else {
                continue;
            };

            let level = self.nodes[idx].level + 1;
            let child_idx = self.push_node(child, level, expansion);
            self.nodes[idx].children.push(child_idx);
            path.insert(child_id);
            stack.push((child_idx, 0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<FamilyMember> {
        vec![
            FamilyMember::new("john", "John").with_children(["robert", "linda"]),
            FamilyMember::new("mary", "Mary").with_children(["robert", "linda"]),
            FamilyMember::new("robert", "Robert")
                .with_parents(["john", "mary"])
                .with_children(["emma", "missing"]),
            FamilyMember::new("linda", "Linda").with_parents(["john", "mary"]),
            FamilyMember::new("emma", "Emma").with_parents(["robert"]),
        ]
    }

    #[test]
    fn test_roots_and_levels() {
        let members = sample();
        let forest = FamilyForest::build(&members, &ExpansionState::new());

        let roots: Vec<TreeNode> = forest.roots().collect();
        let ids: Vec<Id> = roots.iter().map(TreeNode::id).collect();
        assert_eq!(ids, vec![Id::new("john"), Id::new("mary")]);

        let robert = roots[0].children().next().unwrap();
        assert_eq!(robert.id(), Id::new("robert"));
        assert_eq!(robert.level(), 1);
        // The unknown child id is filtered out.
        let grandchildren: Vec<TreeNode> = robert.children().collect();
        assert_eq!(grandchildren.len(), 1);
        assert_eq!(grandchildren[0].level(), 2);
    }

    #[test]
    fn test_shared_children_appear_under_each_parent() {
        let members = sample();
        let forest = FamilyForest::build(&members, &ExpansionState::new());

        for root in forest.roots() {
            assert_eq!(root.children().count(), 2);
        }
        // john, mary, and robert, linda and emma under each of them
        assert_eq!(forest.len(), 8);
    }

    #[test]
    fn test_visible_follows_expansion() {
        let members = sample();
        let mut expansion = ExpansionState::new();

        let forest = FamilyForest::build(&members, &expansion);
        assert_eq!(forest.visible().len(), 2);

        assert!(expansion.toggle(Id::new("john")));
        expansion.expand(Id::new("robert"));
        let forest = FamilyForest::build(&members, &expansion);
        let visible: Vec<Id> = forest.visible().iter().map(TreeNode::id).collect();
        assert_eq!(
            visible,
            vec![
                Id::new("john"),
                Id::new("robert"),
                Id::new("emma"),
                Id::new("linda"),
                Id::new("mary"),
            ]
        );

        assert!(!expansion.toggle(Id::new("john")));
        expansion.collapse(Id::new("robert"));
        assert_eq!(expansion, ExpansionState::new());
    }

    #[test]
    fn test_cycle_is_cut() {
        let members = vec![
            FamilyMember::new("a", "A").with_children(["b"]),
            FamilyMember::new("b", "B")
                .with_parents(["a"])
                .with_children(["a", "b"]),
        ];
        let expansion: ExpansionState = [Id::new("a"), Id::new("b")].into_iter().collect();
        let forest = FamilyForest::build(&members, &expansion);

        let b = forest.roots().next().unwrap().children().next().unwrap();
        assert!(!b.has_children());
        assert_eq!(forest.visible().len(), 2);
    }

    #[test]
    fn test_long_chain_builds_iteratively() {
        const DEPTH: usize = 10_000;
        let ids: Vec<String> = (0..DEPTH).map(|n| format!("m{n}")).collect();
        let members: Vec<FamilyMember> = ids
            .iter()
            .enumerate()
            .map(|(n, id)| {
                let mut member = FamilyMember::new(id.as_str(), id.as_str());
                if n > 0 {
                    member = member.with_parents([ids[n - 1].as_str()]);
                }
                if let Some(child) = ids.get(n + 1) {
                    member = member.with_children([child.as_str()]);
                }
                member
            })
            .collect();
        let expansion: ExpansionState = ids.iter().map(|id| Id::new(id)).collect();

        let forest = FamilyForest::build(&members, &expansion);

        assert_eq!(forest.len(), DEPTH);
        let visible = forest.visible();
        assert_eq!(visible.len(), DEPTH);
        assert_eq!(visible[DEPTH - 1].level(), DEPTH - 1);
        assert_eq!(visible[DEPTH - 1].id(), Id::new("m9999"));
    }
}

//! Tree layout for family members.
//!
//! The [`Engine`] turns a flat member collection into a [`FamilyLayout`]:
//! one [`Placement`] per reachable member, the [`Connector`]s between them and
//! the size of the surface needed to draw everything.
//!
//! # Algorithm
//!
//! 1. Index members by id, keeping input order.
//! 2. Walk every root (member without parents) in input order and claim a
//!    family unit: the member, their spouse, and recursively one unit per
//!    child. A visited set owned by the call makes sure nobody is claimed
//!    twice, which also stops cyclic input.
//! 3. Unit widths are measured bottom-up while claiming; positions are then
//!    assigned top-down. Each couple sits centered over the midpoint of its
//!    first and last child cards.
//!
//! Both walks use explicit stacks, so deep input cannot overflow the thread
//! stack.
//! 4. Connectors are derived from the finished placements.
//!
//! Members that no root reaches are left out and reported through
//! [`FamilyLayout::skipped`].

mod connector;
mod tree;

pub use connector::{Connector, ConnectorKind};

pub(crate) use tree::Directory;

use std::collections::HashMap;

use log::{debug, info, trace, warn};

use kindred_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    member::FamilyMember,
};

use crate::config::LayoutConfig;
use tree::UnitBuilder;

/// A member card positioned on the drawing surface.
#[derive(Debug, Clone)]
pub struct Placement<'a> {
    member: &'a FamilyMember,
    bounds: Bounds,
    generation: usize,
}

impl<'a> Placement<'a> {
    pub fn member(&self) -> &'a FamilyMember {
        self.member
    }

    pub fn id(&self) -> Id {
        self.member.id()
    }

    /// Top-left corner of the member card.
    pub fn position(&self) -> Point {
        Point::new(self.bounds.min_x(), self.bounds.min_y())
    }

    pub fn x(&self) -> f32 {
        self.bounds.min_x()
    }

    pub fn y(&self) -> f32 {
        self.bounds.min_y()
    }

    /// Bounds of the member card.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Depth below the member's root; roots are generation 0.
    pub fn generation(&self) -> usize {
        self.generation
    }
}

/// The positioned render model of a family tree.
#[derive(Debug, Clone, Default)]
pub struct FamilyLayout<'a> {
    placements: Vec<Placement<'a>>,
    index: HashMap<Id, usize>,
    connectors: Vec<Connector>,
    size: Size,
    skipped: Vec<Id>,
}

impl<'a> FamilyLayout<'a> {
    /// Placements in claim order: each root, then their spouse, then their
    /// descendants depth-first.
    pub fn placements(&self) -> &[Placement<'a>] {
        &self.placements
    }

    /// Looks up the placement of a member.
    pub fn placement(&self, id: Id) -> Option<&Placement<'a>> {
        self.index.get(&id).map(|&idx| &self.placements[idx])
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// Size of the surface needed to draw the layout, margin included.
    ///
    /// Zero for an empty layout.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Members that were not placed because no root reaches them, in input order.
    pub fn skipped(&self) -> &[Id] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Family tree layout engine.
///
/// The engine holds configuration only; every call to [`Engine::calculate`]
/// starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: LayoutConfig,
}

impl Engine {
    /// Create a new layout engine with the given card metrics and spacing.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Calculate the layout for a member collection.
    ///
    /// Dangling parent, child and spouse ids are ignored. The result borrows
    /// `members`, so the collection cannot change while the layout is in use.
    pub fn calculate<'a>(&self, members: &'a [FamilyMember]) -> FamilyLayout<'a> {
        info!(members_count = members.len(); "Calculating family layout");

        let directory = Directory::new(members);
        let mut builder = UnitBuilder::new(&directory, &self.config);

        let roots: Vec<usize> = directory
            .roots()
            .filter_map(|root| builder.claim_root(root))
            .collect();
        debug!(roots_count = roots.len(); "Family units claimed");

        let mut layout = FamilyLayout::default();
        let mut left = self.config.origin().x();
        for &root in &roots {
            self.place_unit(&builder, root, left, &mut layout);
            left += builder.unit(root).width() + self.config.root_gap();
        }

        layout.skipped = directory
            .members()
            .map(FamilyMember::id)
            .filter(|id| !builder.is_claimed(*id))
            .collect();
        if !layout.skipped.is_empty() {
            warn!(
                skipped_count = layout.skipped.len();
                "Some members are not reachable from any root and were left out"
            );
            for id in &layout.skipped {
                debug!(id:% = id; "Member skipped");
            }
        }

        layout.connectors = connector::connect(&layout.placements, &layout.index, &self.config);
        layout.size = self.surface_size(&layout.placements);

        info!(
            placements_count = layout.placements.len(),
            connectors_count = layout.connectors.len();
            "Layout calculated"
        );

        layout
    }

    /// Assign positions to a root unit whose horizontal span starts at `left`,
    /// then to its descendants in pre-order.
    fn place_unit<'a>(
        &self,
        builder: &UnitBuilder<'_, 'a>,
        root: usize,
        left: f32,
        layout: &mut FamilyLayout<'a>,
    ) {
        let mut stack = vec![(root, left, 0)];
        while let Some((idx, left, generation)) = stack.pop() {
            let unit = builder.unit(idx);
            let y = self.config.origin().y() + generation as f32 * self.config.level_step();
            let couple_left = left + unit.couple_left();

            self.push_placement(unit.primary(), Point::new(couple_left, y), generation, layout);
            if let Some(spouse) = unit.spouse() {
                let spouse_left = couple_left + self.config.spouse_offset();
                self.push_placement(spouse, Point::new(spouse_left, y), generation, layout);
            }

            let mut child_left = left + unit.children_left();
            let mut children = Vec::with_capacity(unit.children().len());
            for &child in unit.children() {
                children.push((child, child_left, generation + 1));
                child_left += builder.unit(child).width() + self.config.sibling_gap();
            }
            // Reversed so the first child is placed next.
            stack.extend(children.into_iter().rev());
        }
    }

    fn push_placement<'a>(
        &self,
        member: &'a FamilyMember,
        position: Point,
        generation: usize,
        layout: &mut FamilyLayout<'a>,
    ) {
        trace!(id:% = member.id(), x = position.x(), y = position.y(), generation; "Member placed");
        layout.index.insert(member.id(), layout.placements.len());
        layout.placements.push(Placement {
            member,
            bounds: Bounds::new_from_top_left(position, self.config.card_size()),
            generation,
        });
    }

    /// Furthest placement corner plus the configured margin.
    fn surface_size(&self, placements: &[Placement]) -> Size {
        if placements.is_empty() {
            return Size::default();
        }

        let margin = self.config.margin();
        let (max_x, max_y) = placements.iter().fold(
            (f32::MIN, f32::MIN),
            |(max_x, max_y), placement| (max_x.max(placement.x()), max_y.max(placement.y())),
        );
        Size::new(max_x + margin.width(), max_y + margin.height())
    }
}

//! Connector lines between placed members.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use kindred_core::{
    geometry::{Bounds, Point},
    identifier::Id,
};

use super::Placement;
use crate::config::LayoutConfig;

/// What a connector links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorKind {
    /// A straight line between two spouses.
    Spouse,
    /// An elbow from a parent (or parent pair) down to a child.
    ParentChild,
}

/// A drawable line between two placements.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    kind: ConnectorKind,
    from: Id,
    to: Id,
    path: Vec<Point>,
}

impl Connector {
    pub fn kind(&self) -> ConnectorKind {
        self.kind
    }

    /// The left spouse, or the parent.
    pub fn from(&self) -> Id {
        self.from
    }

    /// The right spouse, or the child.
    pub fn to(&self) -> Id {
        self.to
    }

    /// Polyline to draw: two points for spouses, four for parent-child elbows.
    pub fn path(&self) -> &[Point] {
        &self.path
    }
}

/// Derive all connectors for a set of placements.
///
/// `index` maps each placed id to its position in `placements`.
pub(super) fn connect(
    placements: &[Placement],
    index: &HashMap<Id, usize>,
    config: &LayoutConfig,
) -> Vec<Connector> {
    let mut connectors = spouse_connectors(placements, index);
    connectors.extend(parent_child_connectors(placements, index, config));
    connectors
}

/// Index of a placement's spouse, if the spouse is placed and is someone else.
fn placed_spouse(
    placements: &[Placement],
    index: &HashMap<Id, usize>,
    idx: usize,
) -> Option<usize> {
    let spouse_idx = *index.get(&placements[idx].member().spouse()?)?;
    (spouse_idx != idx).then_some(spouse_idx)
}

fn spouse_connectors(placements: &[Placement], index: &HashMap<Id, usize>) -> Vec<Connector> {
    let mut seen = HashSet::new();
    let mut connectors = Vec::new();

    for idx in 0..placements.len() {
        let Some(spouse_idx) = placed_spouse(placements, index, idx) else {
            continue;
        };
        if !seen.insert((idx.min(spouse_idx), idx.max(spouse_idx))) {
            continue;
        }

        // Smaller x is the left end; placement order breaks ties.
        let (left, right) = if (placements[spouse_idx].x(), spouse_idx) < (placements[idx].x(), idx)
        {
            (&placements[spouse_idx], &placements[idx])
        } else {
            (&placements[idx], &placements[spouse_idx])
        };

        let (left_bounds, right_bounds) = (left.bounds(), right.bounds());
        connectors.push(Connector {
            kind: ConnectorKind::Spouse,
            from: left.id(),
            to: right.id(),
            path: vec![
                Point::new(left_bounds.max_x(), left_bounds.center().y()),
                Point::new(right_bounds.min_x(), right_bounds.center().y()),
            ],
        });
    }

    connectors
}

fn parent_child_connectors(
    placements: &[Placement],
    index: &HashMap<Id, usize>,
    config: &LayoutConfig,
) -> Vec<Connector> {
    let mut seen = HashSet::new();
    let mut connectors = Vec::new();

    for (idx, parent) in placements.iter().enumerate() {
        let spouse_idx = placed_spouse(placements, index, idx);
        let couple = spouse_idx.map_or((idx, idx), |spouse_idx| {
            (idx.min(spouse_idx), idx.max(spouse_idx))
        });
        let anchor = match spouse_idx {
            Some(spouse_idx) => parent
                .bounds()
                .center()
                .midpoint(placements[spouse_idx].bounds().center())
                .with_y(parent.bounds().max_y()),
            None => parent.bounds().center().with_y(parent.bounds().max_y()),
        };

        for child_id in parent.member().children() {
            let Some(&child_idx) = index.get(child_id) else {
                continue;
            };
            if child_idx == idx || !seen.insert((couple, child_idx)) {
                continue;
            }

            let child = &placements[child_idx];
            connectors.push(Connector {
                kind: ConnectorKind::ParentChild,
                from: parent.id(),
                to: child.id(),
                path: elbow(anchor, child.bounds(), config.rail_offset()),
            });
        }
    }

    connectors
}

/// Down from `anchor` to a rail above the child, across, then down into the
/// child's top edge.
fn elbow(anchor: Point, child: Bounds, rail_offset: f32) -> Vec<Point> {
    let rail_y = child.min_y() - rail_offset;
    let child_top = Point::new(child.center().x(), child.min_y());
    vec![
        anchor,
        anchor.with_y(rail_y),
        child_top.with_y(rail_y),
        child_top,
    ]
}

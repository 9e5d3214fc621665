//! Radial placement around an expansion anchor
//!
//! Root mode spreads the root's new neighbors over a full circle. Child mode
//! fans a node's new children out in a forward-facing sector centred on the
//! direction the node itself was placed in, so subtrees grow away from the
//! graph's centre instead of back over their ancestors.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::{debug, trace};

use crate::store::GraphStore;
use crate::value_objects::{CompanyId, Position2D};

/// Radii and sector width of the radial layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance of the root's neighbors from the origin
    pub root_radius: f64,
    /// Distance of a child from its owning parent
    pub child_radius: f64,
    /// Width of the child-mode sector, in degrees
    pub sector_degrees: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_radius: 400.0,
            child_radius: 350.0,
            sector_degrees: 140.0,
        }
    }
}

impl LayoutConfig {
    pub fn sector_radians(&self) -> f64 {
        self.sector_degrees.to_radians()
    }
}

/// A position assigned to a newly introduced node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: CompanyId,
    pub position: Position2D,
    /// Direction from the anchor; becomes the node's branch angle
    pub angle: f64,
}

/// `n` angles evenly spaced over a full turn, starting at 0
pub fn circle_angles(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let step = TAU / n as f64;
    (0..n).map(|i| i as f64 * step).collect()
}

/// `n` angles spread across a sector of `width` radians centred on `center`.
/// A single angle sits exactly on the centre; otherwise both sector edges are
/// used.
pub fn sector_angles(center: f64, width: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![center],
        _ => {
            let start = center - width / 2.0;
            let step = width / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// Incremental radial layout engine
#[derive(Debug, Clone, Default)]
pub struct RadialLayout {
    config: LayoutConfig,
}

impl RadialLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Place the unplaced nodes among `new_ids` around `anchor` and write the
    /// positions into `store`. Nodes that already have a position are left
    /// alone, so calling this again with the same ids is a no-op.
    pub fn place(
        &self,
        store: &mut GraphStore,
        anchor: &CompanyId,
        root: Option<&CompanyId>,
        new_ids: &[CompanyId],
    ) -> Vec<Placement> {
        let Some(anchor_node) = store.node(anchor) else {
            debug!(anchor = %anchor, "layout anchor not in store");
            return Vec::new();
        };

        let anchor_pos = anchor_node.position;
        let anchor_angle = anchor_node.branch_angle;
        let is_root = root.map_or(anchor_node.is_root(), |r| r == anchor);
        let root_mode = is_root && anchor_pos.map_or(true, |p| p.is_origin());

        let pending: Vec<CompanyId> = new_ids
            .iter()
            .filter(|id| *id != anchor)
            .filter(|id| store.node(id).is_some_and(|n| !n.is_placed()))
            .cloned()
            .collect();

        if root_mode && anchor_pos.is_none() {
            store.set_position(anchor, Position2D::ORIGIN, 0.0);
        }

        if pending.is_empty() {
            return Vec::new();
        }

        let (center, radius, angles) = if root_mode {
            (
                Position2D::ORIGIN,
                self.config.root_radius,
                circle_angles(pending.len()),
            )
        } else {
            let center = anchor_pos.unwrap_or(Position2D::ORIGIN);
            let heading = match anchor_angle {
                Some(angle) => angle,
                None if is_root || center.is_origin() => 0.0,
                None => center.angle_from(&Position2D::ORIGIN),
            };
            (
                center,
                self.config.child_radius,
                sector_angles(heading, self.config.sector_radians(), pending.len()),
            )
        };

        let placements: Vec<Placement> = pending
            .into_iter()
            .zip(angles)
            .map(|(id, angle)| Placement {
                position: Position2D::polar(center, radius, angle),
                id,
                angle,
            })
            .collect();

        for placement in &placements {
            trace!(
                node = %placement.id,
                x = placement.position.x,
                y = placement.position.y,
                "placed"
            );
            store.set_position(&placement.id, placement.position, placement.angle);
        }

        debug!(
            anchor = %anchor,
            root_mode,
            placed = placements.len(),
            "radial layout applied"
        );
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::CompanyNode;
    use crate::value_objects::DisplayType;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn id(s: &str) -> CompanyId {
        CompanyId::from(s)
    }

    fn store_with(ids: &[&str]) -> GraphStore {
        let mut store = GraphStore::new();
        store.merge_nodes(ids.iter().map(|s| CompanyNode::new(*s, *s)));
        store
    }

    #[test]
    fn test_circle_angles_even() {
        let angles = circle_angles(3);
        assert!((angles[1] - 2.0 * PI / 3.0).abs() < EPS);
        assert!((angles[2] - 4.0 * PI / 3.0).abs() < EPS);
        assert!(circle_angles(0).is_empty());
    }

    #[test]
    fn test_single_child_sits_on_centre() {
        assert_eq!(sector_angles(1.25, 2.0, 1), vec![1.25]);
    }

    #[test]
    fn test_sector_spans_full_width() {
        let width = 140f64.to_radians();
        let angles = sector_angles(0.5, width, 5);
        assert!((angles[0] - (0.5 - width / 2.0)).abs() < EPS);
        assert!((angles[4] - (0.5 + width / 2.0)).abs() < EPS);
        for pair in angles.windows(2) {
            assert!((pair[1] - pair[0] - width / 4.0).abs() < EPS);
        }
    }

    #[test]
    fn test_root_mode_places_around_origin() {
        let mut store = store_with(&["A", "B", "C", "D"]);
        store.node_mut(&id("A")).unwrap().display_type = DisplayType::Root;
        let layout = RadialLayout::default();

        let new_ids = [id("B"), id("C"), id("D")];
        let placed = layout.place(&mut store, &id("A"), Some(&id("A")), &new_ids);

        assert_eq!(placed.len(), 3);
        assert_eq!(store.node(&id("A")).unwrap().position, Some(Position2D::ORIGIN));
        let b = store.node(&id("B")).unwrap().position.unwrap();
        assert!((b.x - 400.0).abs() < EPS && b.y.abs() < EPS);
        assert!((placed[2].angle - 4.0 * PI / 3.0).abs() < EPS);
    }

    #[test]
    fn test_child_mode_uses_parent_branch_angle() {
        let mut store = store_with(&["A", "B", "E"]);
        store.set_position(&id("A"), Position2D::ORIGIN, 0.0);
        let b_angle = 2.0 * PI / 3.0;
        let b_pos = Position2D::polar(Position2D::ORIGIN, 400.0, b_angle);
        store.set_position(&id("B"), b_pos, b_angle);

        let placed =
            RadialLayout::default().place(&mut store, &id("B"), Some(&id("A")), &[id("E")]);

        assert_eq!(placed.len(), 1);
        assert!((placed[0].angle - b_angle).abs() < EPS);
        let e = store.node(&id("E")).unwrap().position.unwrap();
        assert!((e.distance_to(&b_pos) - 350.0).abs() < 1e-6);
    }

    #[test]
    fn test_placed_nodes_are_not_moved() {
        let mut store = store_with(&["A", "B", "C"]);
        store.set_position(&id("B"), Position2D::new(5.0, 5.0), 0.3);

        let new_ids = [id("B"), id("C")];
        let placed = RadialLayout::default().place(&mut store, &id("A"), Some(&id("A")), &new_ids);

        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].id, id("C"));
        assert_eq!(store.node(&id("B")).unwrap().position, Some(Position2D::new(5.0, 5.0)));
    }

    #[test]
    fn test_zero_new_children_is_noop() {
        let mut store = store_with(&["A"]);
        assert!(RadialLayout::default().place(&mut store, &id("A"), None, &[]).is_empty());
    }
}

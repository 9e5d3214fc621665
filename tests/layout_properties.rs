//! Property tests for layout, merging and filtering

use bizray_graph::{
    layout::{circle_angles, sector_angles},
    CompanyEdge, CompanyId, CompanyNode, DisplayType, EdgeFilter, FilteredView, GraphStore,
    RadialLayout, RelationType,
};
use proptest::prelude::*;
use std::f64::consts::TAU;

const EPS: f64 = 1e-9;

fn label() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["Person", "Location", "Other"])
}

/// Node ids "n0".."n{size}" with random edges between them, n0 being the root
fn graph(size: usize) -> impl Strategy<Value = (Vec<CompanyNode>, Vec<CompanyEdge>)> {
    prop::collection::vec((0..size, 0..size, label()), 0..size * 2).prop_map(move |raw| {
        let nodes = (0..size)
            .map(|i| CompanyNode::new(format!("n{i}"), format!("Company {i}")))
            .collect();
        let edges = raw
            .into_iter()
            .filter(|(a, b, _)| a != b)
            .map(|(a, b, l)| CompanyEdge::new(format!("n{a}"), format!("n{b}"), l))
            .collect();
        (nodes, edges)
    })
}

proptest! {
    #[test]
    fn circle_angles_are_evenly_spaced(n in 1usize..40) {
        let angles = circle_angles(n);
        prop_assert_eq!(angles.len(), n);
        prop_assert_eq!(angles[0], 0.0);
        for pair in angles.windows(2) {
            prop_assert!((pair[1] - pair[0] - TAU / n as f64).abs() < EPS);
        }
    }

    #[test]
    fn sector_angles_span_the_sector(
        center in -TAU..TAU,
        degrees in 10.0f64..180.0,
        n in 2usize..30,
    ) {
        let width = degrees.to_radians();
        let angles = sector_angles(center, width, n);
        prop_assert_eq!(angles.len(), n);
        prop_assert!((angles[0] - (center - width / 2.0)).abs() < EPS);
        prop_assert!((angles[n - 1] - (center + width / 2.0)).abs() < EPS);
        let step = width / (n - 1) as f64;
        for pair in angles.windows(2) {
            prop_assert!((pair[1] - pair[0] - step).abs() < EPS);
        }
    }

    #[test]
    fn merging_twice_equals_merging_once((nodes, edges) in graph(8)) {
        let mut once = GraphStore::new();
        once.merge_nodes(nodes.clone());
        once.merge_edges(edges.clone());

        let mut twice = once.clone();
        prop_assert!(twice.merge_nodes(nodes).is_empty());
        prop_assert_eq!(twice.merge_edges(edges), 0);

        prop_assert_eq!(once.nodes().collect::<Vec<_>>(), twice.nodes().collect::<Vec<_>>());
        prop_assert_eq!(once.edges().collect::<Vec<_>>(), twice.edges().collect::<Vec<_>>());
        prop_assert!(twice.is_consistent());
    }

    #[test]
    fn placed_nodes_never_move(first in 1usize..6, second in 1usize..6) {
        let layout = RadialLayout::default();
        let root = CompanyId::from("root");
        let mut store = GraphStore::new();
        store.merge_nodes([CompanyNode::new("root", "Root").with_display_type(DisplayType::Root)]);

        let wave = |prefix: &str, n: usize| -> Vec<CompanyId> {
            (0..n).map(|i| CompanyId::from(format!("{prefix}{i}"))).collect()
        };
        let children = wave("c", first);
        store.merge_nodes(children.iter().map(|id| CompanyNode::new(id.clone(), "")));
        layout.place(&mut store, &root, Some(&root), &children);
        let before: Vec<_> = store.nodes().map(|n| n.position).collect();

        let grandchildren = wave("g", second);
        store.merge_nodes(grandchildren.iter().map(|id| CompanyNode::new(id.clone(), "")));
        let mut mixed = children.clone();
        mixed.extend(grandchildren.iter().cloned());
        let placed = layout.place(&mut store, &children[0], Some(&root), &mixed);

        prop_assert_eq!(placed.len(), second);
        let after: Vec<_> = store.nodes().take(before.len()).map(|n| n.position).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn filtered_edges_touch_root_and_keep_it(
        (nodes, edges) in graph(6),
        filter in prop::sample::select(vec![EdgeFilter::Person, EdgeFilter::Location]),
    ) {
        let root = CompanyId::from("n0");
        let mut store = GraphStore::new();
        store.merge_nodes(nodes);
        store.merge_edges(edges);

        let all = FilteredView::compute(&store, Some(&root), EdgeFilter::All);
        let view = FilteredView::compute(&store, Some(&root), filter);
        let wanted = match filter {
            EdgeFilter::Person => RelationType::Person,
            _ => RelationType::Location,
        };

        prop_assert_eq!(all.edges.len(), store.edge_count());
        prop_assert!(view.contains_node(&root));
        for edge in &view.edges {
            prop_assert!(all.edges.contains(edge));
            prop_assert!(edge.touches(&root));
            prop_assert_eq!(edge.relation_type, wanted);
            prop_assert!(view.contains_node(&edge.source) && view.contains_node(&edge.target));
        }
    }
}

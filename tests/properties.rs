use std::collections::{HashMap, HashSet};

use course_graph_layout::ir::{Career, CourseRef, Profile, ProfileRef};
use course_graph_layout::{
    Catalog, Course, Filters, Layout, LayoutConfig, Theme, Viewport, compute_layout,
};
use proptest::prelude::*;

/// Course `i` may only require courses with a smaller index, so every
/// generated catalog is acyclic.
fn dag_catalog() -> impl Strategy<Value = Catalog> {
    (1usize..24)
        .prop_flat_map(|n| {
            (
                proptest::collection::vec(1u32..4, n),
                proptest::collection::vec(proptest::collection::vec(any::<prop::sample::Index>(), 0..3), n),
                proptest::collection::vec(any::<bool>(), n),
                proptest::collection::vec(any::<bool>(), n),
            )
        })
        .prop_map(|(departments, prerequisites, in_career, in_profile)| {
            let courses: Vec<Course> = departments
                .iter()
                .enumerate()
                .map(|(idx, dept)| {
                    let id = idx as u32 + 1;
                    let prevs: Vec<u32> = if idx == 0 {
                        Vec::new()
                    } else {
                        prerequisites[idx]
                            .iter()
                            .map(|pick| pick.index(idx) as u32 + 1)
                            .collect()
                    };
                    Course::new(id, &format!("Curso {id}"), *dept).with_prerequisites(&prevs)
                })
                .collect();
            let pick = |mask: &[bool]| -> Vec<CourseRef> {
                mask.iter()
                    .enumerate()
                    .filter(|(_, keep)| **keep)
                    .map(|(idx, _)| CourseRef::new(idx as u32 + 1))
                    .collect()
            };
            let mut catalog = Catalog::from_courses(courses);
            catalog.careers.push(Career {
                id: 1,
                name: "Carrera".to_string(),
                mandatory: pick(&in_career),
                optional: Vec::new(),
                profiles: vec![ProfileRef {
                    id: 1,
                    name: "Perfil".to_string(),
                }],
            });
            catalog.profiles.push(Profile {
                id: 1,
                name: "Perfil".to_string(),
                career_id: 1,
                mandatory: pick(&in_profile),
            });
            catalog
        })
}

fn build(catalog: &Catalog, filters: Filters, capacity: usize) -> Layout {
    let config = LayoutConfig {
        row_capacity: capacity,
        ..Default::default()
    };
    compute_layout(catalog, &filters, &Theme::light(), &config, Viewport::default())
        .expect("acyclic catalogs always lay out")
}

proptest! {
    #[test]
    fn edges_point_strictly_downward(catalog in dag_catalog(), capacity in 1usize..5) {
        let layout = build(&catalog, Filters::default(), capacity);
        for edge in &layout.edges {
            prop_assert!(layout.nodes[&edge.target].row > layout.nodes[&edge.source].row);
        }
    }

    #[test]
    fn rows_respect_capacity(catalog in dag_catalog(), capacity in 1usize..5) {
        let layout = build(&catalog, Filters::default(), capacity);
        let mut buckets: HashMap<(u32, usize), usize> = HashMap::new();
        for node in layout.nodes.values() {
            *buckets.entry((node.department_id, node.row)).or_default() += 1;
        }
        prop_assert!(buckets.values().all(|count| *count <= capacity));
    }

    #[test]
    fn identical_input_gives_identical_layout(catalog in dag_catalog()) {
        let filters = Filters { career: Some(1), profile: Some(1), show_baseline: false };
        prop_assert_eq!(build(&catalog, filters, 4), build(&catalog, filters, 4));
    }

    #[test]
    fn filtered_nodes_are_a_subset(catalog in dag_catalog()) {
        let all: HashSet<u32> = build(&catalog, Filters::default(), 4).nodes.keys().copied().collect();
        let filters = Filters { career: Some(1), profile: Some(1), show_baseline: false };
        let filtered = build(&catalog, filters, 4);
        prop_assert!(filtered.nodes.keys().all(|id| all.contains(id)));
        for edge in &filtered.edges {
            prop_assert!(filtered.nodes.contains_key(&edge.source));
            prop_assert!(filtered.nodes.contains_key(&edge.target));
        }
    }

    #[test]
    fn no_edge_references_a_missing_node(catalog in dag_catalog()) {
        let filters = Filters { career: Some(1), profile: None, show_baseline: false };
        let layout = build(&catalog, filters, 4);
        for edge in &layout.edges {
            prop_assert!(layout.node(edge.source).is_some());
            prop_assert!(layout.node(edge.target).is_some());
        }
        for node in layout.nodes.values() {
            let incoming = layout.edges.iter().any(|edge| edge.target == node.id);
            prop_assert_eq!(node.has_prerequisite, incoming);
        }
    }
}

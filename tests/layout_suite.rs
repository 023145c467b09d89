use std::collections::{HashMap, HashSet};
use std::path::Path;

use course_graph_layout::layout::{CourseEdge, assign_group_rows, resolve_conflicts};
use course_graph_layout::{
    Catalog, Config, EdgeState, Filters, Layout, LayoutConfig, LayoutError, Period, Theme,
    Transform, Viewport, clear_highlight, compute_layout, highlight_for, layout_to_json,
    render_svg,
};

fn fixture(name: &str) -> Catalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    Catalog::from_json(&input).expect("fixture parse failed")
}

fn build(catalog: &Catalog, filters: Filters) -> Result<Layout, LayoutError> {
    compute_layout(
        catalog,
        &filters,
        &Theme::light(),
        &LayoutConfig::default(),
        Viewport::default(),
    )
}

fn ids(layout: &Layout) -> Vec<u32> {
    layout.nodes.keys().copied().collect()
}

fn assert_well_formed(layout: &Layout, capacity: usize, fixture: &str) {
    let mut buckets: HashMap<(u32, usize), usize> = HashMap::new();
    for node in layout.nodes.values() {
        *buckets.entry((node.department_id, node.row)).or_default() += 1;
    }
    assert!(
        buckets.values().all(|count| *count <= capacity),
        "{fixture}: row over capacity"
    );
    for edge in &layout.edges {
        let source = layout.node(edge.source).expect("dangling source");
        let target = layout.node(edge.target).expect("dangling target");
        assert!(target.row > source.row, "{fixture}: edge {edge:?} points upward");
    }
}

#[test]
fn render_all_fixtures() {
    let theme = Theme::light();
    let config = LayoutConfig::default();
    // Keep this list explicit so new fixtures must be added intentionally.
    for name in ["curriculum.json", "wide_department.json"] {
        let catalog = fixture(name);
        let layout = build(&catalog, Filters::default()).unwrap();
        assert_well_formed(&layout, config.row_capacity, name);

        let states = clear_highlight(&layout.edges);
        let svg = render_svg(&layout, &states, Transform::IDENTITY, &theme, &config);
        assert!(svg.contains("<svg"), "{name}: missing <svg tag");
        assert!(svg.contains("</svg>"), "{name}: missing </svg tag");

        let json = layout_to_json(&layout, &states, Transform::IDENTITY).unwrap();
        let dump: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            dump["nodes"].as_array().map(Vec::len),
            Some(layout.nodes.len()),
            "{name}: dump node count"
        );
    }
}

#[test]
fn two_course_chain_lays_out_in_two_rows() {
    let catalog = Catalog::from_json(
        r#"[{"id": 1, "name": "Calculo I", "previas_aprobado": []},
            {"id": 2, "name": "Calculo II", "previas_aprobado": [{"id": 1}]}]"#,
    )
    .unwrap();
    let layout = build(&catalog, Filters::default()).unwrap();
    assert_eq!(layout.nodes[&1].row, 0);
    assert_eq!(layout.nodes[&2].row, 1);
    assert_eq!(layout.edges.len(), 1);
    assert_eq!((layout.edges[0].source, layout.edges[0].target), (1, 2));
}

#[test]
fn overfull_depth_group_wraps_onto_next_row() {
    let catalog = fixture("wide_department.json");
    let layout = build(&catalog, Filters::default()).unwrap();
    let first_row: Vec<u32> = layout
        .nodes
        .values()
        .filter(|node| node.row == 0)
        .map(|node| node.id)
        .collect();
    assert_eq!(first_row, vec![1, 2, 3, 4]);
    assert_eq!(layout.nodes[&5].row, 1);
    assert_eq!(layout.nodes[&5].department_id, 5);
    // The wrapped row pushes the next depth group down.
    assert_eq!(layout.nodes[&6].row, 2);
    assert_eq!(layout.row_count, 3);
}

#[test]
fn conflict_resolution_lifts_dependent_below_both_prerequisites() {
    let edges = vec![CourseEdge::new(1, 2), CourseEdge::new(2, 3), CourseEdge::new(1, 3)];
    let node_ids = [1, 2, 3];
    let departments: HashMap<u32, u32> = node_ids.iter().map(|id| (*id, 1)).collect();
    let mut rows: HashMap<u32, usize> = HashMap::from([(1, 0), (2, 1), (3, 1)]);
    resolve_conflicts(&node_ids, &departments, &mut rows, &edges, 4, None).unwrap();
    assert_eq!(rows[&3], 2);
    assert_eq!((rows[&1], rows[&2]), (0, 1));
}

#[test]
fn group_rows_then_resolution_on_mixed_departments() {
    let node_ids = [1, 2, 3];
    let departments = HashMap::from([(1, 1), (2, 2), (3, 1)]);
    let depths = HashMap::from([(1, 0), (2, 1), (3, 1)]);
    let mut rows = assign_group_rows(&node_ids, &departments, &depths, 4);
    let edges = vec![CourseEdge::new(1, 2), CourseEdge::new(2, 3)];
    resolve_conflicts(&node_ids, &departments, &mut rows, &edges, 4, None).unwrap();
    assert!(rows[&3] > rows[&2] && rows[&2] > rows[&1]);
}

#[test]
fn hiding_baseline_strips_course_and_references() {
    let catalog = fixture("curriculum.json");
    let hidden = build(&catalog, Filters::default()).unwrap();
    assert!(hidden.node(10).is_none());
    assert!(hidden.edges.iter().all(|e| e.source != 10 && e.target != 10));
    assert!(!hidden.nodes[&11].has_prerequisite);
    assert!(!hidden.nodes[&13].has_prerequisite);

    let shown = build(
        &catalog,
        Filters {
            show_baseline: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(shown.node(10).is_some());
    assert!(shown.nodes[&11].has_prerequisite);
    assert_eq!(shown.nodes[&11].row, 1);
    assert_eq!(shown.edges.len(), hidden.edges.len() + 2);
}

#[test]
fn highlight_marks_both_directions_around_a_course() {
    let catalog = Catalog::from_json(
        r#"[{"id": 1, "name": "A"},
            {"id": 2, "name": "B", "previas_aprobado": [{"id": 1}]},
            {"id": 3, "name": "C", "previas_aprobado": [{"id": 2}]}]"#,
    )
    .unwrap();
    let layout = build(&catalog, Filters::default()).unwrap();
    let states = highlight_for(&layout.edges, 2);
    for (edge, state) in layout.edges.iter().zip(&states) {
        match (edge.source, edge.target) {
            (1, 2) => assert_eq!(*state, EdgeState::RequiredByThis),
            (2, 3) => assert_eq!(*state, EdgeState::PrerequisiteForThis),
            other => panic!("unexpected edge {other:?}"),
        }
    }
    assert!(!states.contains(&EdgeState::Default));
}

#[test]
fn curriculum_rows_follow_prerequisite_depth() {
    let catalog = fixture("curriculum.json");
    let layout = build(&catalog, Filters::default()).unwrap();
    assert_eq!(ids(&layout), vec![11, 12, 13, 14, 20, 21, 30, 31, 32, 33]);
    let rows: Vec<(u32, usize)> = layout.nodes.values().map(|n| (n.id, n.row)).collect();
    assert_eq!(
        rows,
        vec![
            (11, 0),
            (12, 1),
            (13, 0),
            (14, 1),
            (20, 1),
            (21, 2),
            (30, 0),
            (31, 1),
            (32, 2),
            (33, 2),
        ]
    );
    // Taller lists 31 under both approval modes; only one edge survives.
    assert_eq!(layout.edges.iter().filter(|e| e.target == 33).count(), 1);
    assert_eq!(layout.edges.len(), 9);
    assert_eq!(layout.nodes[&33].period, Period::Unknown);
    assert_eq!(layout.nodes[&32].min_credits, Some(50));
    assert_eq!(layout.row_count, 3);

    let names: Vec<&str> = layout.departments.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Instituto de Matemática y Estadística",
            "Instituto de Física",
            "Instituto de Computación"
        ]
    );
    let columns: Vec<f32> = layout.departments.iter().map(|d| d.x).collect();
    assert!(columns.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn career_and_profile_filters_narrow_the_graph() {
    let catalog = fixture("curriculum.json");
    let all: HashSet<u32> = ids(&build(&catalog, Filters::default()).unwrap())
        .into_iter()
        .collect();

    let career = build(
        &catalog,
        Filters {
            career: Some(1),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(ids(&career), vec![11, 12, 13, 14, 20, 30, 31, 32]);

    let with_profile = build(
        &catalog,
        Filters {
            career: Some(1),
            profile: Some(1),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(ids(&with_profile), vec![11, 12, 13, 14, 20, 30, 31, 32, 33]);
    assert!(ids(&with_profile).iter().all(|id| all.contains(id)));

    let electrical = build(
        &catalog,
        Filters {
            career: Some(2),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(ids(&electrical), vec![11, 13, 20, 21]);
    // Física 2 keeps its Física 1 edge; the Cálculo prerequisite is outside the career.
    assert_eq!(electrical.edges.len(), 2);
    assert!(electrical.edges.iter().all(|e| e.source != 12));
    assert!(!electrical.nodes[&13].has_prerequisite);
}

#[test]
fn profile_from_another_career_is_rejected() {
    let catalog = fixture("curriculum.json");
    let err = build(
        &catalog,
        Filters {
            career: Some(2),
            profile: Some(1),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        LayoutError::ProfileOutsideCareer {
            profile: 1,
            career: 2
        }
    );
}

#[test]
fn cyclic_catalog_reports_the_cycle() {
    let catalog = fixture("cyclic.json");
    let err = build(&catalog, Filters::default()).unwrap_err();
    assert_eq!(err, LayoutError::CyclicGraph { cycle: vec![2, 3, 2] });
    assert!(err.to_string().contains("2 -> 3 -> 2"));
}

#[test]
fn self_prerequisite_is_a_cycle_of_one() {
    let catalog =
        Catalog::from_json(r#"[{"id": 7, "name": "Tesis", "previas_aprobado": [{"id": 7}]}]"#)
            .unwrap();
    let err = build(&catalog, Filters::default()).unwrap_err();
    assert_eq!(err, LayoutError::CyclicGraph { cycle: vec![7, 7] });
}

#[test]
fn duplicate_course_ids_are_rejected_at_load() {
    let err = Catalog::from_json(r#"[{"id": 1, "name": "A"}, {"id": 1, "name": "B"}]"#).unwrap_err();
    assert!(err.to_string().contains("duplicate course id 1"));
}

#[test]
fn layout_is_deterministic() {
    let catalog = fixture("curriculum.json");
    let filters = Filters {
        career: Some(1),
        profile: Some(1),
        show_baseline: true,
    };
    let first = build(&catalog, filters).unwrap();
    let second = build(&catalog, filters).unwrap();
    assert_eq!(first, second);
}

#[test]
fn dark_theme_config_renders() {
    let config: Config = course_graph_layout::parse_config(
        r#"{ theme: "dark", layout: { rowCapacity: 2, focusMode: true } }"#,
    )
    .unwrap();
    let catalog = fixture("wide_department.json");
    let layout = compute_layout(
        &catalog,
        &Filters::default(),
        &config.theme,
        &config.layout,
        config.viewport,
    )
    .unwrap();
    assert_well_formed(&layout, 2, "wide_department.json");
    assert_eq!(layout.nodes[&1].width, 180.0);
    let svg = render_svg(
        &layout,
        &highlight_for(&layout.edges, 6),
        Transform::IDENTITY,
        &config.theme,
        &config.layout,
    );
    assert!(svg.contains(&config.theme.background));
}

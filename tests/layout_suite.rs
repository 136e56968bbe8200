use std::path::{Path, PathBuf};

use kintree::layout_dump::LayoutDump;
use kintree::{Dataset, Layout, LayoutConfig, ViewState, compute_layout, couple_key, parse_dataset};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> Dataset {
    let input = std::fs::read_to_string(fixture_path(name)).expect("fixture read failed");
    parse_dataset(&input).expect("fixture parse failed")
}

fn layout_fixture(name: &str) -> Layout {
    let dataset = load_fixture(name);
    compute_layout(&dataset, &ViewState::default(), &LayoutConfig::default())
}

#[test]
fn layout_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "midpoint.json",
        "three_generations.json",
        "mixed_generations.json",
        "cyclic.json",
        "empty.json",
    ];
    let config = LayoutConfig::default();

    for name in candidates {
        assert!(fixture_path(name).exists(), "fixture missing: {name}");
        let layout = layout_fixture(name);

        for node in layout.nodes() {
            assert!(node.x.is_finite(), "{name}: non-finite x for {}", node.id);
            assert!(node.y.is_finite(), "{name}: non-finite y for {}", node.id);
        }

        // No two cards in one row may overlap: partner spacing exceeds the
        // card width and blocks are separated by the margin on top of it.
        let mut rows: std::collections::BTreeMap<i64, Vec<f32>> = std::collections::BTreeMap::new();
        for node in layout.nodes() {
            rows.entry(node.depth).or_default().push(node.x);
        }
        for (depth, mut xs) in rows {
            xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in xs.windows(2) {
                assert!(
                    pair[1] - pair[0] >= config.card_width,
                    "{name}: overlapping cards in generation {depth}"
                );
            }
        }
    }
}

#[test]
fn married_parents_emit_a_single_midpoint_edge() {
    let config = LayoutConfig::default();
    let layout = layout_fixture("midpoint.json");

    let a = layout.position("a").expect("a positioned");
    let b = layout.position("b").expect("b positioned");
    let c = layout.position("c").expect("c positioned");

    // Partners adjacent, exactly one partner gap apart, on one row.
    assert_eq!((b.x - a.x).abs(), config.partner_gap);
    assert_eq!(a.y, b.y);
    // Child one level below, centered under the pair.
    assert_eq!(c.y - a.y, config.level_gap);
    assert_eq!(c.depth, 1);

    assert_eq!(layout.parent_edges.len(), 1);
    let edge = &layout.parent_edges[0];
    assert_eq!(edge.x1, (a.x + b.x) / 2.0);
    assert_eq!(edge.y1, a.y + config.card_height / 2.0);
    assert_eq!(edge.x2, c.x);
    assert_eq!(edge.y2, c.y - config.card_height / 2.0);

    assert_eq!(layout.marriage_edges.len(), 1);
}

#[test]
fn collapsing_a_couple_hides_its_branch() {
    let dataset = load_fixture("three_generations.json");
    let mut view = ViewState::default();
    view.collapsed_couples.insert(couple_key("c1", "c1-w"));
    let layout = compute_layout(&dataset, &view, &LayoutConfig::default());

    assert!(layout.position("c1").is_some());
    assert!(layout.position("c1-w").is_some());
    assert!(layout.position("g1").is_none());
    assert!(layout.position("g2").is_none());
    // The sibling branch is untouched.
    assert!(layout.position("g3").is_some());
    assert!(layout.hidden.contains("g1"));
    assert!(layout.hidden.contains("g2"));
    assert!(!layout.hidden.contains("g3"));

    // No edge may target a hidden child.
    for edge in &layout.parent_edges {
        assert!(!edge.key.contains("g1") && !edge.key.contains("g2"));
    }
}

#[test]
fn dangling_records_never_reach_the_graph() {
    // three_generations carries a marriage and a parent-child row pointing at
    // ids that are not in the people table.
    let layout = layout_fixture("three_generations.json");
    assert!(layout.position("nobody").is_none());
    assert!(layout.position("ghost").is_none());
    let solo = layout.node_by_id.get("solo").expect("solo in graph");
    assert!(solo.children.is_empty());
    let c1 = layout.node_by_id.get("c1").expect("c1 in graph");
    assert_eq!(c1.partners, vec!["c1-w"]);
}

#[test]
fn siblings_order_by_birth_and_land_under_their_parents() {
    let layout = layout_fixture("three_generations.json");

    // g2 (1978) draws left of g1 (1980).
    let g1 = layout.position("g1").unwrap();
    let g2 = layout.position("g2").unwrap();
    assert!(g2.x < g1.x);

    // g3's sibling group follows its parents' side of the row above.
    let g3 = layout.position("g3").unwrap();
    let c2 = layout.position("c2").unwrap();
    let c1 = layout.position("c1").unwrap();
    let c1_w = layout.position("c1-w").unwrap();
    let own_parents = c2.x;
    let other_parents = (c1.x + c1_w.x) / 2.0;
    assert!(
        (g3.x - own_parents).abs() < (g3.x - other_parents).abs(),
        "g3 should sit closer to its own parents"
    );
    if own_parents < other_parents {
        assert!(g3.x < g2.x && g3.x < g1.x);
    }
}

#[test]
fn marriage_components_share_one_row() {
    // Recorded generations 0/2/1 across one marriage chain all resolve to 0.
    let layout = layout_fixture("mixed_generations.json");
    let a = layout.position("a").unwrap();
    let b = layout.position("b").unwrap();
    let c = layout.position("c").unwrap();
    assert_eq!(a.y, 0.0);
    assert_eq!(b.y, 0.0);
    assert_eq!(c.y, 0.0);
    // d is not part of the chain and keeps its recorded row.
    assert_eq!(layout.position("d").unwrap().depth, 1);
}

#[test]
fn cyclic_records_still_terminate_and_place() {
    let layout = layout_fixture("cyclic.json");
    assert!(layout.position("a").is_some());
    assert!(layout.position("b").is_some());
    // One edge per parent-child record, both directions of the cycle.
    assert_eq!(layout.parent_edges.len(), 2);
}

#[test]
fn empty_dataset_produces_an_empty_frame() {
    let layout = layout_fixture("empty.json");
    assert_eq!(layout.nodes().count(), 0);
    assert!(layout.guides.is_empty());
    assert_eq!(layout.width, 1.0);
    assert_eq!(layout.height, 1.0);
}

#[test]
fn layout_is_deterministic_across_runs() {
    let dataset = load_fixture("three_generations.json");
    let view = ViewState::default();
    let config = LayoutConfig::default();
    let first = serde_json::to_string(&LayoutDump::from_layout(&compute_layout(
        &dataset, &view, &config,
    )))
    .unwrap();
    let second = serde_json::to_string(&LayoutDump::from_layout(&compute_layout(
        &dataset, &view, &config,
    )))
    .unwrap();
    assert_eq!(first, second);
}

#[test]
fn guides_cover_every_generation_present() {
    let layout = layout_fixture("three_generations.json");
    let generations: Vec<i64> = layout.guides.iter().map(|g| g.generation).collect();
    assert_eq!(generations, vec![0, 1, 2]);
    for guide in &layout.guides {
        assert!(guide.x1 < guide.x2);
    }
}

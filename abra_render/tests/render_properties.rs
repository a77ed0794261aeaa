// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-kind rendering properties.
//!
//! Every chart kind is a pure function of its input: these tests hold that
//! contract across the whole family rather than per renderer.

use abra_core::{NodeId, Primitive, Scene, Table};
use abra_render::{ChartKind, RenderInput, ViewState, render};
use abra_style::StyleState;
use peniko::Brush;

const ALL_KINDS: [ChartKind; 10] = [
    ChartKind::Bar,
    ChartKind::Pie,
    ChartKind::Line,
    ChartKind::Area,
    ChartKind::Scatter,
    ChartKind::BubbleMap,
    ChartKind::FilterMap,
    ChartKind::ElectionDonut,
    ChartKind::ElectionResults,
    ChartKind::Race,
];

fn model_id(kind: ChartKind) -> u32 {
    kind.id()
}

fn sample_table(kind: ChartKind) -> Table {
    match kind {
        ChartKind::Bar | ChartKind::Line | ChartKind::Area => Table::from_strings([
            ["Category", "A", "B"],
            ["x", "2", "5"],
            ["y", "0", "0"],
            ["z", "", "3"],
        ]),
        ChartKind::Pie => Table::from_strings([
            ["Label", "Value"],
            ["Alma", "3"],
            ["Korte", "1"],
            ["Szilva", "2"],
        ]),
        ChartKind::Scatter => Table::from_strings([
            ["Name", "X", "Y", "Group"],
            ["p1", "1", "2", "g1"],
            ["p2", "4", "8", "g2"],
        ]),
        ChartKind::BubbleMap => Table::from_strings([
            ["Country", "Value"],
            ["Hungary", "10"],
            ["Germany", "40"],
        ]),
        ChartKind::FilterMap => Table::from_strings([
            ["Country", "Tag"],
            ["Hungary", "member"],
            ["Norway", "observer"],
        ]),
        ChartKind::ElectionDonut | ChartKind::ElectionResults => Table::from_strings([
            ["Region", "Party A", "Party B"],
            ["Pest", "60", "40"],
            ["Buda", "30", "70"],
        ]),
        ChartKind::Race => Table::from_strings([
            ["Name", "Tag", "2000", "2001"],
            ["Alma", "fruit", "5", "2"],
            ["Korte", "fruit", "1", "8"],
        ]),
    }
}

fn render_at(kind: ChartKind, table: &Table, view: &ViewState, w: f64, h: f64) -> Scene {
    let style = StyleState::studio_default();
    let input = RenderInput {
        table,
        historical: None,
        style: &style,
        width: w,
        height: h,
        view,
        model_id: model_id(kind),
    };
    render(kind, &input)
}

fn scene_signature(scene: &Scene) -> Vec<(NodeId, i32)> {
    scene
        .paint_order()
        .iter()
        .map(|n| (n.id, n.z_index))
        .collect()
}

#[test]
fn rendering_is_idempotent_for_every_kind() {
    for kind in ALL_KINDS {
        let table = sample_table(kind);
        let view = ViewState::new();
        let a = render_at(kind, &table, &view, 600.0, 400.0);
        let b = render_at(kind, &table, &view, 600.0, 400.0);
        assert_eq!(
            scene_signature(&a),
            scene_signature(&b),
            "kind {kind:?} is not idempotent"
        );
    }
}

#[test]
fn empty_tables_never_panic() {
    for kind in ALL_KINDS {
        let table = Table::default();
        let scene = render_at(kind, &table, &ViewState::new(), 600.0, 400.0);
        // Chrome (at least the background) always renders.
        assert!(!scene.is_empty(), "kind {kind:?} rendered nothing");
    }
}

#[test]
fn wholly_invalid_tables_never_panic() {
    for kind in ALL_KINDS {
        let table = Table::from_strings([
            ["H1", "H2", "H3", "H4"],
            ["", "abc", "", "x"],
            ["", "", "", ""],
        ]);
        let _ = render_at(kind, &table, &ViewState::new(), 600.0, 400.0);
    }
}

#[test]
fn tiny_containers_never_panic() {
    for kind in ALL_KINDS {
        let table = sample_table(kind);
        let _ = render_at(kind, &table, &ViewState::new(), 3.0, 2.0);
        let _ = render_at(kind, &table, &ViewState::new(), 0.0, 0.0);
    }
}

#[test]
fn legend_toggle_round_trips() {
    for kind in [ChartKind::Bar, ChartKind::Line, ChartKind::Area, ChartKind::Pie] {
        let table = sample_table(kind);
        let before = render_at(kind, &table, &ViewState::new(), 600.0, 400.0);

        let mut view = ViewState::new();
        let label = if kind == ChartKind::Pie { "Alma" } else { "B" };
        view.toggle_series(label);
        view.toggle_series(label);
        let after = render_at(kind, &table, &view, 600.0, 400.0);

        assert_eq!(
            scene_signature(&before),
            scene_signature(&after),
            "kind {kind:?} did not round-trip a legend toggle"
        );
    }
}

#[test]
fn resize_preserves_identity_and_colors() {
    for kind in ALL_KINDS {
        let table = sample_table(kind);
        let view = ViewState::new();
        let small = render_at(kind, &table, &view, 600.0, 400.0);
        let large = render_at(kind, &table, &view, 1200.0, 800.0);

        assert_eq!(
            scene_signature(&small),
            scene_signature(&large),
            "kind {kind:?} changed structure on resize"
        );

        for (a, b) in small.paint_order().iter().zip(large.paint_order()) {
            let fill = |p: &Primitive| match p {
                Primitive::Rect { fill, .. }
                | Primitive::Circle { fill, .. }
                | Primitive::Text { fill, .. }
                | Primitive::RichText { fill, .. } => Some(fill.clone()),
                Primitive::Path { fill, .. } => fill.clone(),
            };
            if let (Some(Brush::Solid(ca)), Some(Brush::Solid(cb))) =
                (fill(&a.primitive), fill(&b.primitive))
            {
                assert_eq!(ca, cb, "kind {kind:?} changed a color on resize");
            }
        }
    }
}

#[test]
fn zero_value_rows_survive_as_nodes() {
    let table = sample_table(ChartKind::Bar);
    let scene = render_at(ChartKind::Bar, &table, &ViewState::new(), 600.0, 400.0);
    // Row "y" is all zeros; its bars exist with zero height.
    let node = scene.find(NodeId::from_key("bar/A/y")).unwrap();
    let Primitive::Rect { rect, .. } = node.primitive else {
        panic!("expected rect");
    };
    assert!(rect.height().abs() < 1e-9);
}

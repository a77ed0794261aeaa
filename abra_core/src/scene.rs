// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene graph produced by renderers.
//!
//! A [`Scene`] is a flat list of positioned, styled primitives. Paint order
//! is `(z_index, NodeId)` so repeated renders of identical input paint
//! identically. Interaction is carried as data on each node (a tooltip
//! string, a click action) — the embedding shell decides how to wire it.

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;

/// Stable identity for a scene node.
///
/// Ids derived from the same key are equal across renders, which is what
/// keyed transitions and deterministic paint order rely on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Creates an id from a raw value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives a stable id from a string key (FNV-1a).
    pub fn from_key(key: &str) -> Self {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for b in key.as_bytes() {
            hash ^= u64::from(*b);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        Self(hash)
    }

    /// Derives a sibling id offset from this one.
    pub fn offset(self, n: u64) -> Self {
        Self(self.0.wrapping_add(n))
    }
}

/// A stroke paint + width pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub width: f64,
}

impl Stroke {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            brush: brush.into(),
            width,
        }
    }
}

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Anchor at the start (left for LTR text).
    #[default]
    Start,
    /// Anchor at the horizontal center.
    Middle,
    /// Anchor at the end.
    End,
}

/// Vertical text baseline placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// The alphabetic baseline.
    #[default]
    Alphabetic,
    /// Centered on the glyph box.
    Middle,
    /// Hanging from the given y.
    Hanging,
}

/// A positioned drawing primitive.
#[derive(Clone, Debug)]
pub enum Primitive {
    /// An axis-aligned rectangle.
    Rect {
        /// Geometry in scene coordinates.
        rect: Rect,
        /// Fill paint.
        fill: Brush,
        /// Optional outline.
        stroke: Option<Stroke>,
    },
    /// A filled and/or stroked path.
    Path {
        /// Path geometry.
        path: BezPath,
        /// Optional fill paint.
        fill: Option<Brush>,
        /// Optional stroke.
        stroke: Option<Stroke>,
    },
    /// A circle.
    Circle {
        /// Center point.
        center: Point,
        /// Radius in scene coordinates.
        radius: f64,
        /// Fill paint.
        fill: Brush,
        /// Optional outline.
        stroke: Option<Stroke>,
    },
    /// A single line of text (unshaped).
    Text {
        /// Anchor position.
        pos: Point,
        /// Text content.
        text: String,
        /// Font size in scene coordinates.
        font_size: f64,
        /// Optional font family override.
        font_family: Option<String>,
        /// Fill paint.
        fill: Brush,
        /// Horizontal anchor.
        anchor: TextAnchor,
        /// Vertical baseline.
        baseline: TextBaseline,
    },
    /// A rich-text block (stored as markup, painted via a foreign object).
    RichText {
        /// Block rectangle.
        rect: Rect,
        /// Markup content.
        markup: String,
        /// Base font size.
        font_size: f64,
        /// Text color.
        fill: Brush,
    },
}

/// A click behavior attached to a scene node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickAction {
    /// Toggle a series/category in the legend filter.
    ToggleSeries(String),
    /// Zoom the map viewport to fit the named feature.
    ZoomToFeature(String),
    /// Reset the map viewport.
    ResetZoom,
    /// Select an election region row.
    SelectRegion(String),
}

/// Interaction metadata for one node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Interaction {
    /// Tooltip text shown while hovering this node.
    pub hover: Option<String>,
    /// Action dispatched when the node is clicked.
    pub click: Option<ClickAction>,
}

impl Interaction {
    /// No interaction.
    pub fn none() -> Self {
        Self::default()
    }

    /// Hover-only interaction with the given tooltip text.
    pub fn hover(text: impl Into<String>) -> Self {
        Self {
            hover: Some(text.into()),
            click: None,
        }
    }

    /// Click-only interaction.
    pub fn click(action: ClickAction) -> Self {
        Self {
            hover: None,
            click: Some(action),
        }
    }

    /// Adds a click action to this interaction.
    pub fn with_click(mut self, action: ClickAction) -> Self {
        self.click = Some(action);
        self
    }
}

/// One node of the scene graph.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Stable identity.
    pub id: NodeId,
    /// Paint order; higher paints later (on top).
    pub z_index: i32,
    /// The drawing primitive.
    pub primitive: Primitive,
    /// Interaction metadata.
    pub interaction: Interaction,
}

impl SceneNode {
    /// Creates a node without interaction.
    pub fn new(id: NodeId, z_index: i32, primitive: Primitive) -> Self {
        Self {
            id,
            z_index,
            primitive,
            interaction: Interaction::none(),
        }
    }

    /// Sets the interaction metadata.
    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interaction = interaction;
        self
    }
}

/// A complete rendered scene.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node.
    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    /// Appends all nodes from an iterator.
    pub fn extend(&mut self, nodes: impl IntoIterator<Item = SceneNode>) {
        self.nodes.extend(nodes);
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Nodes in paint order: sorted by `(z_index, id)`.
    pub fn paint_order(&self) -> Vec<&SceneNode> {
        let mut out: Vec<&SceneNode> = self.nodes.iter().collect();
        out.sort_by_key(|n| (n.z_index, n.id));
        out
    }

    /// Finds a node by id.
    pub fn find(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;

    use super::*;

    fn rect_node(id: u64, z: i32) -> SceneNode {
        SceneNode::new(
            NodeId::from_raw(id),
            z,
            Primitive::Rect {
                rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                fill: css::BLACK.into(),
                stroke: None,
            },
        )
    }

    #[test]
    fn node_ids_from_keys_are_stable() {
        assert_eq!(NodeId::from_key("Alma"), NodeId::from_key("Alma"));
        assert_ne!(NodeId::from_key("Alma"), NodeId::from_key("Korte"));
    }

    #[test]
    fn paint_order_sorts_by_z_then_id() {
        let mut scene = Scene::new();
        scene.push(rect_node(2, 10));
        scene.push(rect_node(1, 10));
        scene.push(rect_node(3, -5));

        let order: Vec<u64> = scene.paint_order().iter().map(|n| n.id.0).collect();
        assert_eq!(order, [3, 1, 2]);
    }
}

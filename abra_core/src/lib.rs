// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Foundation types for the Abra rendering pipeline.
//!
//! This crate holds the pieces every renderer consumes:
//! - **Tables** carry imported tabular rows (strings, numbers, blanks).
//! - **Scenes** are the output: z-ordered, styled drawing primitives with
//!   optional interaction metadata, ready for a thin painting layer.
//! - **Keyed transitions** diff two keyed element sets so renderers can
//!   animate additions/removals/updates instead of replacing wholesale.
//!
//! Nothing in here touches a drawing surface; scenes are plain data.

mod scene;
mod table;
mod transition;

pub use scene::{
    ClickAction, Interaction, NodeId, Primitive, Scene, SceneNode, Stroke, TextAnchor,
    TextBaseline,
};
pub use table::{Cell, Table};
pub use transition::{Interpolate, KeyedOp, diff_keyed, ease_cubic_in_out};

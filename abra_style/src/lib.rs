// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declarative style-state model.
//!
//! One [`StyleState`] record is the single source of truth for a
//! visualization's presentation: every renderer reads it, and the editing
//! sidebar mutates it exclusively through [`Action`]s dispatched into the
//! pure [`reduce`] function. The record round-trips through the backend's
//! style JSON via [`persist`], which supplies defaults for absent keys.

mod reducer;
mod state;

pub mod persist;

pub use reducer::{Action, can_save, reduce};
pub use state::{StyleState, TRANSPARENT};

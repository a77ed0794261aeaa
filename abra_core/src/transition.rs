// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed enter/update/exit transitions.
//!
//! Renderers that animate (pie slices, race bars) compute a diff between the
//! previous and next keyed element sets. Added keys enter from an initial
//! state, surviving keys interpolate between their old and new states, and
//! removed keys interpolate toward a terminal state before disappearing.
//! This is the general helper behind that pattern; easing is visual-only and
//! never a source of logical state.

use std::hash::Hash;

use hashbrown::{HashMap, HashSet};

/// One operation of a keyed diff.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyedOp<K, T> {
    /// The key is new; it enters from a renderer-chosen initial state.
    Enter {
        /// Element key.
        key: K,
        /// The target state.
        next: T,
    },
    /// The key survives; interpolate `prev` toward `next`.
    Update {
        /// Element key.
        key: K,
        /// The previous state.
        prev: T,
        /// The target state.
        next: T,
    },
    /// The key was removed; interpolate `prev` toward a terminal state.
    Exit {
        /// Element key.
        key: K,
        /// The previous state.
        prev: T,
    },
}

/// Diffs two keyed sets.
///
/// Enters and updates are emitted in `next` order, exits afterward in `prev`
/// order, so the result is deterministic for identical inputs. Duplicate
/// keys keep their first occurrence.
pub fn diff_keyed<K, T>(prev: &[(K, T)], next: &[(K, T)]) -> Vec<KeyedOp<K, T>>
where
    K: Eq + Hash + Clone,
    T: Clone,
{
    let mut prev_by_key: HashMap<&K, &T> = HashMap::with_capacity(prev.len());
    for (k, v) in prev {
        prev_by_key.entry(k).or_insert(v);
    }

    let mut seen: HashSet<&K> = HashSet::with_capacity(next.len());
    let mut out = Vec::with_capacity(prev.len() + next.len());

    for (k, v) in next {
        if !seen.insert(k) {
            continue;
        }
        match prev_by_key.get(k) {
            Some(old) => out.push(KeyedOp::Update {
                key: k.clone(),
                prev: (*old).clone(),
                next: v.clone(),
            }),
            None => out.push(KeyedOp::Enter {
                key: k.clone(),
                next: v.clone(),
            }),
        }
    }

    for (k, v) in prev {
        if seen.insert(k) {
            out.push(KeyedOp::Exit {
                key: k.clone(),
                prev: v.clone(),
            });
        }
    }

    out
}

/// Linear interpolation between two states.
pub trait Interpolate {
    /// Returns the state at fraction `t` (0 = self, 1 = `other`).
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for (f64, f64) {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        (self.0.lerp(&other.0, t), self.1.lerp(&other.1, t))
    }
}

/// Cubic ease-in-out, clamped to `0..=1`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

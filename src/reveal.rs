//! One-shot scroll reveal bookkeeping.
//!
//! Cards start hidden and are revealed the first time they intersect the
//! viewport. After that they are no longer tracked, so scrolling back and
//! forth never replays the animation.

use std::collections::HashSet;
use std::hash::Hash;

use crate::constants::{REVEAL_ANIMATION, REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};

/// Observer settings for the reveal.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealOptions {
    /// Visible ratio that counts as intersecting
    pub threshold: f64,
    /// CSS margin applied to the viewport
    pub root_margin: String,
    /// Animation applied on reveal
    pub animation: String,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            root_margin: REVEAL_ROOT_MARGIN.to_string(),
            animation: REVEAL_ANIMATION.to_string(),
        }
    }
}

/// Tracks which elements are still waiting to be revealed.
#[derive(Debug)]
pub struct RevealTracker<K> {
    pending: HashSet<K>,
}

impl<K: Eq + Hash> RevealTracker<K> {
    /// An empty tracker.
    pub fn new() -> Self {
        Self {
            pending: HashSet::new(),
        }
    }

    /// Start tracking an element.
    pub fn observe(&mut self, key: K) {
        self.pending.insert(key);
    }

    /// Report a visibility change. Returns `true` exactly once per observed
    /// element: the first time it intersects. The element is then dropped.
    pub fn on_visibility(&mut self, key: &K, is_intersecting: bool) -> bool {
        is_intersecting && self.pending.remove(key)
    }

    /// Elements not revealed yet.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl<K: Eq + Hash> Default for RevealTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

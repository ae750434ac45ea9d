// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floating-header height bookkeeping.
//!
//! The floating header's height varies per route (large titles, search
//! bars) and is only known after the host measures real content. The ledger
//! keeps the last-known height per route key so a route without its own
//! measurement sits next to measured neighbors without a layout jump, and
//! fills gaps with a platform default until a measurement arrives.
//!
//! Updates are strictly targeted: reporting one route's measured height
//! touches exactly that entry. Only a container layout change (which
//! invalidates every prior measurement) resets the map wholesale.

use alloc::rc::Rc;

use hashbrown::HashMap;

use crate::capabilities::PlatformCapabilities;
use crate::geometry::{Insets, Layout};
use crate::route::{Route, RouteKey};

/// Platform-default header heights in logical pixels, before insets.
///
/// These are presentation conventions of common host platforms, carried as
/// configurable defaults rather than invariants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderMetrics {
    /// Compact landscape height on rotation-capable phones.
    pub compact_landscape: f64,
    /// Standard portrait height on phones.
    pub standard: f64,
    /// Height on platforms with native screen containers.
    pub material: f64,
    /// Height everywhere else (desktop-class hosts).
    pub desktop: f64,
}

impl Default for HeaderMetrics {
    fn default() -> Self {
        Self {
            compact_landscape: 32.0,
            standard: 44.0,
            material: 56.0,
            desktop: 64.0,
        }
    }
}

/// Computes the default header height for the current layout.
///
/// The top safe-area inset is always added on top of the platform constant.
#[must_use]
pub fn default_header_height(
    layout: Layout,
    insets: Insets,
    capabilities: &PlatformCapabilities,
    metrics: &HeaderMetrics,
) -> f64 {
    let base = if capabilities.supports_native_screen_optimization {
        metrics.material
    } else if capabilities.is_landscape_capable {
        if layout.is_landscape() {
            metrics.compact_landscape
        } else {
            metrics.standard
        }
    } else {
        metrics.desktop
    };
    base + insets.top
}

/// Last-known floating-header height per route key.
#[derive(Clone, Debug, Default)]
pub struct HeaderLedger {
    heights: HashMap<RouteKey, f64>,
}

impl HeaderLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heights: HashMap::new(),
        }
    }

    /// Derives the ledger for a new route list.
    ///
    /// Keys already present keep their previous height (measured or not);
    /// new keys get the platform default for the current layout. Keys
    /// absent from `routes` are dropped.
    #[must_use]
    pub fn update(
        &self,
        routes: &[Rc<Route>],
        layout: Layout,
        insets: Insets,
        capabilities: &PlatformCapabilities,
        metrics: &HeaderMetrics,
    ) -> Self {
        let fallback = default_header_height(layout, insets, capabilities, metrics);
        let mut heights = HashMap::with_capacity(routes.len());
        for route in routes {
            let height = self.heights.get(&route.key).copied().unwrap_or(fallback);
            heights.insert(route.key.clone(), height);
        }
        Self { heights }
    }

    /// Rebuilds the ledger with defaults for every route, discarding all
    /// prior measurements. Used when the container layout changes.
    #[must_use]
    pub fn reset(
        routes: &[Rc<Route>],
        layout: Layout,
        insets: Insets,
        capabilities: &PlatformCapabilities,
        metrics: &HeaderMetrics,
    ) -> Self {
        let fallback = default_header_height(layout, insets, capabilities, metrics);
        Self {
            heights: routes
                .iter()
                .map(|route| (route.key.clone(), fallback))
                .collect(),
        }
    }

    /// Records a measured height for one route, touching no other entry.
    ///
    /// Returns whether the entry changed. Reports for keys the ledger does
    /// not track (e.g. a route removed since measurement was scheduled) are
    /// ignored.
    pub fn report(&mut self, key: &RouteKey, height: f64) -> bool {
        match self.heights.get_mut(key) {
            Some(entry) if *entry != height => {
                *entry = height;
                true
            }
            _ => false,
        }
    }

    /// Returns the tracked height for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &RouteKey) -> Option<f64> {
        self.heights.get(key).copied()
    }

    /// Number of tracked routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Returns whether the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

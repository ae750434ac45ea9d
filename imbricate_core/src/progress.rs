// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-route animated progress values and the store that keys them.
//!
//! A [`ProgressValue`] is a continuous scalar in `[0, 1]` describing how far
//! a route's screen is presented (0 = fully off-screen, 1 = settled on
//! screen). The engine creates one value per live route key and then only
//! ever *reads* it; an external animation/gesture driver holds clones of the
//! same value and mutates it between derivations.
//!
//! The overriding invariant is continuity: as long as a key stays in the
//! route list, [`ProgressStore::ensure`] hands back the *same* value (same
//! allocation), never a replacement. Recreating a live value would discard
//! in-flight animation state mid-gesture and tear the presented frame.

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use hashbrown::HashMap;

use crate::descriptor::DescriptorMap;
use crate::route::{KeySet, Route, RouteKey};

/// A shared animated scalar in `[0, 1]` for one route.
///
/// Cloning shares the underlying value; [`same`](Self::same) compares that
/// sharing identity. The engine seeds the value once at creation and never
/// writes it again — [`set`](Self::set) exists for the external driver.
#[derive(Clone)]
pub struct ProgressValue(Rc<Cell<f64>>);

impl ProgressValue {
    /// Creates a value seeded at `initial`.
    #[must_use]
    pub fn new(initial: f64) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    /// Reads the current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        self.0.get()
    }

    /// Writes the current value.
    ///
    /// Reserved for the external animation/gesture driver; the engine never
    /// calls this after seeding.
    pub fn set(&self, value: f64) {
        self.0.set(value);
    }

    /// Returns whether `self` and `other` share one underlying value.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ProgressValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProgressValue({})", self.get())
    }
}

/// Owns one [`ProgressValue`] per live route key.
#[derive(Clone, Debug, Default)]
pub struct ProgressStore {
    values: HashMap<RouteKey, ProgressValue>,
}

impl ProgressStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Derives the store for a new route list from this one.
    ///
    /// Every key already present keeps its existing value unchanged. A key
    /// seen for the first time seeds at 0 when it is in `opening` and its
    /// descriptor does not set `animation_enabled: Some(false)` (the screen
    /// will animate in), otherwise at 1 (already settled). Keys absent from
    /// `routes` are dropped.
    #[must_use]
    pub fn ensure(&self, routes: &[Rc<Route>], opening: &KeySet, descriptors: &DescriptorMap) -> Self {
        let mut values = HashMap::with_capacity(routes.len());
        for route in routes {
            let value = match self.values.get(&route.key) {
                Some(existing) => existing.clone(),
                None => {
                    let animated = descriptors
                        .get(&route.key)
                        .is_none_or(|d| d.options.animation_enabled != Some(false));
                    let seed = if opening.contains(&route.key) && animated {
                        0.0
                    } else {
                        1.0
                    };
                    ProgressValue::new(seed)
                }
            };
            values.insert(route.key.clone(), value);
        }
        Self { values }
    }

    /// Returns the value for `key`, if the key is live.
    #[must_use]
    pub fn get(&self, key: &RouteKey) -> Option<&ProgressValue> {
        self.values.get(key)
    }

    /// Number of live keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

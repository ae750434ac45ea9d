// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Route and surface identity types.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

/// The set of route keys currently opening or closing.
pub type KeySet = hashbrown::HashSet<RouteKey>;

/// A unique, cheap-to-clone key identifying one route in the stack.
///
/// Keys are assigned by the external navigation state; the engine treats
/// them as opaque. Equality and hashing compare key content, so two
/// `RouteKey` clones of the same key always collide in maps regardless of
/// which allocation they share.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteKey(Rc<str>);

impl RouteKey {
    /// Creates a key from its string form.
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self(Rc::from(key))
    }

    /// Returns the key's string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Debug for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteKey({:?})", &*self.0)
    }
}

/// One navigable screen's identity and position metadata.
///
/// Routes are created and ordered by the caller (the external navigation
/// state); the engine never creates or destroys them, it only reacts to
/// list changes. Routes are passed around as `Rc<Route>` so derived state
/// can compare identity without inspecting content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Unique key for this route.
    pub key: RouteKey,
    /// Human-readable screen name (for diagnostics and header titles).
    pub name: String,
}

impl Route {
    /// Creates a route with the given key and name.
    #[must_use]
    pub fn new(key: &str, name: &str) -> Self {
        Self {
            key: RouteKey::new(key),
            name: String::from(name),
        }
    }
}

/// An opaque reference to externally-rendered content.
///
/// Screen content and header widgets are created and managed by the host
/// (the engine never renders). A [`SurfaceId`] names one such piece of
/// content so render instructions can route references to it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

impl fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceId({})", self.0)
    }
}

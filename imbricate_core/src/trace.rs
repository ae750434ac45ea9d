// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and development diagnostics for the derivation loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the stack orchestrator calls as it derives state. All method bodies
//! default to no-ops, so implementing only the events you care about is
//! fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! Option-validation warnings are emitted as [`WarningEvent`]s in
//! development builds only (`debug_assertions`); production derivation
//! emits no warnings and is never fatal.

use crate::route::RouteKey;

/// Which external trigger caused a derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeriveTrigger {
    /// Route list, focus, opening/closing sets, or descriptors changed.
    Navigation,
    /// The container was (re-)measured.
    Layout,
    /// One route's header content was measured.
    HeaderMeasurement,
}

/// Emitted after each derivation run.
#[derive(Clone, Copy, Debug)]
pub struct DeriveEvent {
    /// What triggered the derivation.
    pub trigger: DeriveTrigger,
    /// Number of live routes after the derivation.
    pub routes: usize,
    /// Scenes rebuilt this run.
    pub scenes_rebuilt: usize,
    /// Scenes reused by identity this run.
    pub scenes_reused: usize,
}

/// Emitted when a route's transition starts.
#[derive(Clone, Debug)]
pub struct TransitionStartEvent {
    /// The transitioning route.
    pub key: RouteKey,
    /// Whether the route is closing rather than opening.
    pub closing: bool,
}

/// Emitted when a route's transition settles.
#[derive(Clone, Debug)]
pub struct TransitionEndEvent {
    /// The transitioning route.
    pub key: RouteKey,
    /// Whether the route was closing.
    pub closing: bool,
}

/// A development-build diagnostic about unsupported configuration.
#[derive(Clone, Debug)]
pub struct WarningEvent {
    /// The route whose options were flagged, if attributable.
    pub key: Option<RouteKey>,
    /// What was flagged and how it degrades.
    pub message: &'static str,
}

/// Receives trace events from the derivation loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after each derivation run.
    fn on_derive(&mut self, e: &DeriveEvent) {
        _ = e;
    }

    /// Called when a route's transition starts.
    fn on_transition_start(&mut self, e: &TransitionStartEvent) {
        _ = e;
    }

    /// Called when a route's transition settles.
    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        _ = e;
    }

    /// Called with development-build configuration warnings.
    fn on_warning(&mut self, e: &WarningEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`DeriveEvent`].
    #[inline]
    pub fn derive(&mut self, e: &DeriveEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_derive(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionStartEvent`].
    #[inline]
    pub fn transition_start(&mut self, e: &TransitionStartEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition_start(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionEndEvent`].
    #[inline]
    pub fn transition_end(&mut self, e: &TransitionEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`WarningEvent`].
    #[inline]
    pub fn warning(&mut self, e: &WarningEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_warning(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

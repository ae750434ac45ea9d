// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene and progress synchronization core for card-stack navigation
//! transitions.
//!
//! `imbricate_core` turns an externally-owned navigation state — an ordered
//! route list plus sets of opening and closing route keys — into a
//! consistent derived view: one animated progress value per route, an
//! ordered scene list with resolved transition configuration, screen
//! activation state, and floating-header height bookkeeping. It is `no_std`
//! compatible (with `alloc`), performs no I/O, and runs no animations of
//! its own: an external gesture/animation driver mutates the shared
//! progress values between derivations, and a host renderer consumes the
//! emitted frame instructions.
//!
//! # Architecture
//!
//! Derivation runs synchronously on each external trigger and flows one
//! direction:
//!
//! ```text
//!   Navigation state (routes, opening/closing, descriptors)
//!       │
//!       ▼
//!   ProgressStore::ensure() ──► scene::build_scenes() ──► Vec<Rc<Scene>>
//!                                        │
//!               ┌────────────────────────┘
//!               ▼
//!   StackState::frame() ──► StackFrame ──► host renderer
//!       │           │
//!       │           ├─ per scene: transition::resolve() + activation()
//!       │           └─ floating header from the focused scene
//!       └─ HeaderLedger supplies per-route header heights
//! ```
//!
//! **[`route`]** — Route identity (`RouteKey`, `Route`) and the opaque
//! `SurfaceId` handle for externally-rendered content.
//!
//! **[`progress`]** — One shared animated scalar per live route key.
//! Values are reused by identity for as long as a key persists; recreating
//! one mid-gesture would discard in-flight animation state.
//!
//! **[`scene`]** — Derives the ordered scene list (route + descriptor +
//! neighbor progress triple) with reference-identity memoization for
//! downstream render skipping.
//!
//! **[`transition`]** — Animation specs, easing curves, style
//! interpolators, gesture parameters, mode presets, and per-scene
//! resolution with the look-ahead rule (an outgoing scene animates with the
//! incoming scene's preset).
//!
//! **[`activation`]** — Which screens stay mounted versus suspended, as a
//! capability-dependent policy over live progress.
//!
//! **[`header`]** — Last-known floating-header height per route, with
//! platform-default metrics.
//!
//! **[`stack`]** — The orchestrator tying the above to the three external
//! triggers (navigation change, layout measurement, header measurement).
//!
//! **[`capabilities`]** — The platform capability descriptor policy code
//! branches on instead of platform identity.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for derivation instrumentation, with the zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod activation;
pub mod capabilities;
pub mod descriptor;
pub mod geometry;
pub mod header;
pub mod progress;
pub mod route;
pub mod scene;
pub mod stack;
pub mod trace;
pub mod transition;

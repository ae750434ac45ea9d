// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON export for imbricate diagnostics.
//!
//! This crate provides [`TraceSink`](imbricate_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event
//!   output.
//! - [`json::JsonLinesSink`] — one JSON object per event, for ingestion
//!   by log tooling.

pub mod json;
pub mod pretty;

// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines trace export.
//!
//! [`JsonLinesSink`] writes one JSON object per event, suitable for log
//! collection or offline analysis with standard JSON tooling.

use std::io::Write;

use imbricate_core::trace::{
    DeriveEvent, DeriveTrigger, TraceSink, TransitionEndEvent, TransitionStartEvent, WarningEvent,
};
use serde_json::json;

/// Writes one JSON object per event to a [`Write`](std::io::Write)
/// destination.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink").finish_non_exhaustive()
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn emit(&mut self, value: &serde_json::Value) {
        if serde_json::to_writer(&mut self.writer, value).is_ok() {
            let _ = self.writer.write_all(b"\n");
        }
    }
}

fn trigger_name(trigger: DeriveTrigger) -> &'static str {
    match trigger {
        DeriveTrigger::Navigation => "navigation",
        DeriveTrigger::Layout => "layout",
        DeriveTrigger::HeaderMeasurement => "header",
    }
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn on_derive(&mut self, e: &DeriveEvent) {
        self.emit(&json!({
            "event": "derive",
            "trigger": trigger_name(e.trigger),
            "routes": e.routes,
            "rebuilt": e.scenes_rebuilt,
            "reused": e.scenes_reused,
        }));
    }

    fn on_transition_start(&mut self, e: &TransitionStartEvent) {
        self.emit(&json!({
            "event": "transition_start",
            "route": e.key.as_str(),
            "closing": e.closing,
        }));
    }

    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        self.emit(&json!({
            "event": "transition_end",
            "route": e.key.as_str(),
            "closing": e.closing,
        }));
    }

    fn on_warning(&mut self, e: &WarningEvent) {
        self.emit(&json!({
            "event": "warning",
            "route": e.key.as_ref().map(|k| k.as_str().to_owned()),
            "message": e.message,
        }));
    }
}

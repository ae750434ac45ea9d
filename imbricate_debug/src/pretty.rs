// Copyright 2026 the Imbricate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use imbricate_core::trace::{
    DeriveEvent, DeriveTrigger, TraceSink, TransitionEndEvent, TransitionStartEvent, WarningEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn trigger_name(trigger: DeriveTrigger) -> &'static str {
    match trigger {
        DeriveTrigger::Navigation => "navigation",
        DeriveTrigger::Layout => "layout",
        DeriveTrigger::HeaderMeasurement => "header",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_derive(&mut self, e: &DeriveEvent) {
        let _ = writeln!(
            self.writer,
            "[derive] trigger={} routes={} rebuilt={} reused={}",
            trigger_name(e.trigger),
            e.routes,
            e.scenes_rebuilt,
            e.scenes_reused,
        );
    }

    fn on_transition_start(&mut self, e: &TransitionStartEvent) {
        let _ = writeln!(
            self.writer,
            "[transition:start] route={} closing={}",
            e.key.as_str(),
            e.closing,
        );
    }

    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        let _ = writeln!(
            self.writer,
            "[transition:end] route={} closing={}",
            e.key.as_str(),
            e.closing,
        );
    }

    fn on_warning(&mut self, e: &WarningEvent) {
        match &e.key {
            Some(key) => {
                let _ = writeln!(self.writer, "[warn] route={}: {}", key.as_str(), e.message);
            }
            None => {
                let _ = writeln!(self.writer, "[warn] {}", e.message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use imbricate_core::route::RouteKey;

    use super::*;

    fn lines_for(events: impl FnOnce(&mut PrettyPrintSink<&mut Vec<u8>>)) -> Vec<String> {
        let mut buffer = Vec::new();
        let mut sink = PrettyPrintSink::with_writer(&mut buffer);
        events(&mut sink);
        String::from_utf8(buffer)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn derive_line_carries_counts() {
        let lines = lines_for(|sink| {
            sink.on_derive(&DeriveEvent {
                trigger: DeriveTrigger::Navigation,
                routes: 3,
                scenes_rebuilt: 1,
                scenes_reused: 2,
            });
        });
        assert_eq!(
            lines,
            ["[derive] trigger=navigation routes=3 rebuilt=1 reused=2"]
        );
    }

    #[test]
    fn transition_lines_name_the_route() {
        let lines = lines_for(|sink| {
            sink.on_transition_start(&TransitionStartEvent {
                key: RouteKey::new("details"),
                closing: false,
            });
            sink.on_transition_end(&TransitionEndEvent {
                key: RouteKey::new("details"),
                closing: true,
            });
        });
        assert_eq!(lines[0], "[transition:start] route=details closing=false");
        assert_eq!(lines[1], "[transition:end] route=details closing=true");
    }

    #[test]
    fn warning_lines_include_the_route_when_known() {
        let lines = lines_for(|sink| {
            sink.on_warning(&WarningEvent {
                key: Some(RouteKey::new("modal")),
                message: "flagged option",
            });
            sink.on_warning(&WarningEvent {
                key: None,
                message: "global issue",
            });
        });
        assert_eq!(lines[0], "[warn] route=modal: flagged option");
        assert_eq!(lines[1], "[warn] global issue");
    }
}

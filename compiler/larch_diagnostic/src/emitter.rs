//! Text rendering of diagnostics.
//!
//! Renders diagnostics into an owned string buffer so callers can collect a
//! whole report and hand it to a log, a test assertion, or a tool protocol
//! in one piece.

use std::fmt::Write;

use crate::{Diagnostic, Diagnostics};

/// Returns `"s"` when `count` requires a plural.
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Renders diagnostics to an internal text buffer.
#[derive(Debug, Default)]
pub struct TextEmitter {
    buffer: String,
}

impl TextEmitter {
    /// Create an emitter with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a single diagnostic into the buffer.
    pub fn emit(&mut self, diagnostic: &Diagnostic) {
        // Writing to a String cannot fail.
        let _ = writeln!(self.buffer, "{diagnostic}");
    }

    /// Render every diagnostic in a collection, in order.
    pub fn emit_all(&mut self, diagnostics: &Diagnostics) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Render a closing summary line.
    pub fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }

        if error_count > 0 {
            let error_part = if error_count == 1 {
                "previous error".to_owned()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    self.buffer,
                    "error: aborting due to {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.buffer, "error: aborting due to {error_part}");
            }
        } else {
            let _ = writeln!(
                self.buffer,
                "warning: {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }

    /// Get the rendered text so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Discard everything rendered so far.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Consume the emitter, returning the rendered text.
    pub fn into_string(self) -> String {
        self.buffer
    }
}

//! Diagnostic system for the Larch compiler.
//!
//! Diagnostics carry:
//! - an error code for searchability
//! - a clear message (what went wrong)
//! - a primary span (where it went wrong)
//! - context labels and notes (why it's wrong)
//!
//! Phases collect diagnostics into a [`Diagnostics`] sink in the order they
//! are produced and hand the whole sink upward once the phase finishes.
//! Constant evaluation relies on this protocol to discard the diagnostics of
//! a speculative evaluation wholesale.

mod diagnostic;
mod emitter;
mod error_code;
mod sink;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use emitter::TextEmitter;
pub use error_code::ErrorCode;
pub use sink::Diagnostics;

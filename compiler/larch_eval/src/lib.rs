//! Larch Eval - the constant-evaluation substrate for the Larch compiler.
//!
//! Whenever the front end must fold an expression or statement to a value
//! at elaboration time (parameter values, `generate` conditions, constant
//! function calls, interactive scripting), the AST walker drives an
//! [`EvalContext`]. The context is the bookkeeping layer underneath that
//! walker:
//!
//! - a call stack of [`Frame`]s with isolated, stable local storage
//! - an lvalue stack resolving by-reference argument bindings
//! - a statement-step quota and recursion-depth limit bounding runaway
//!   constant code ([`EvalLimits`])
//! - the pending `disable` signal and queue target for `$`
//! - an ordered diagnostic sink reported upward once per evaluation
//!
//! The walker itself stays stateless: all mutable evaluation state lives
//! here. Semantic decisions (operator meaning, lookup, typing, diagnostic
//! wording) belong to the walker; this crate only signals success or
//! failure and keeps the books.

mod context;
mod flags;
mod frame;
mod limits;
mod lvalue;

pub use context::{Disable, EvalContext};
pub use flags::EvalFlags;
pub use frame::{Frame, LocalSlot};
pub use limits::EvalLimits;
pub use lvalue::LValue;

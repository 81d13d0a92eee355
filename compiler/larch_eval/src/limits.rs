//! Budget limits for a constant evaluation.

/// Limits bounding how much work one constant evaluation may perform.
///
/// Both limits exist to stop pathological constant code: `max_depth` catches
/// runaway recursion, `max_steps` catches infinite loops (and recursion
/// rewritten to stay under the depth limit). The defaults are generous for
/// real designs; lower them for embedding contexts that need tighter
/// bounds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct EvalLimits {
    /// Maximum number of call frames on the evaluation stack.
    pub max_depth: u32,
    /// Maximum number of statements executed per evaluation.
    pub max_steps: u32,
}

impl EvalLimits {
    /// Default call-depth limit.
    pub const DEFAULT_MAX_DEPTH: u32 = 128;

    /// Default statement-step limit.
    pub const DEFAULT_MAX_STEPS: u32 = 100_000;
}

impl Default for EvalLimits {
    fn default() -> Self {
        EvalLimits {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }
}

//! Flags controlling a constant evaluation.

use bitflags::bitflags;

bitflags! {
    /// Various flags that can be applied to a constant evaluation.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct EvalFlags: u8 {
        /// The evaluation is happening inside an interactive script, so
        /// some language rules are relaxed.
        const IS_SCRIPT = 1 << 0;

        /// The results of the evaluation may be memoized into the
        /// originating expression nodes. Only honored at the top level;
        /// see `EvalContext::cache_results`.
        const CACHE_RESULTS = 1 << 1;

        /// Specparams may be referenced as constants.
        const SPECPARAMS_ALLOWED = 1 << 2;

        /// The evaluation is for a covergroup expression, which allows
        /// some forms of non-constant variables to be referenced.
        const COVERGROUP_EXPR = 1 << 3;

        /// An unbounded `$` literal with no queue target in scope
        /// evaluates to the placeholder value instead of failing.
        const ALLOW_UNBOUNDED_PLACEHOLDER = 1 << 4;
    }
}

//! The constant-evaluation context.

use std::fmt::Write;

use larch_diagnostic::{Diagnostic, Diagnostics, ErrorCode};
use larch_ir::{CompilationUnit, ConstantValue, LookupLocation, Span, SymbolId};
use smallvec::SmallVec;

use crate::frame::FrameId;
use crate::{EvalFlags, EvalLimits, Frame, LValue, LocalSlot};

/// A pending `disable` signal.
///
/// Evaluating a `disable` statement produces one of these; statement
/// executors up the call chain observe it after each nested execution and
/// unwind until the executor owning the named block clears it. One tagged
/// value carries both the block to disable and where the request came from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Disable {
    /// The named block to terminate, presumed to be executing somewhere up
    /// the call chain.
    pub target: SymbolId,
    /// Source range of the `disable` statement itself.
    pub range: Span,
}

/// A container for all context required to evaluate a statement or
/// expression at elaboration time. Mostly this involves tracking the call
/// stack and maintaining storage for local variables.
///
/// A context is exclusive to one logical evaluation; it is driven
/// synchronously through `&mut self` and holds no locks. Reuse across
/// evaluations (an interactive session, a worker draining a fold queue)
/// goes through [`EvalContext::reset`].
#[derive(Debug)]
pub struct EvalContext<'a> {
    unit: &'a CompilationUnit,
    /// Flags controlling which language rules apply to this evaluation.
    pub flags: EvalFlags,
    limits: EvalLimits,
    steps: u32,
    step_limit_span: Option<Span>,
    disable: Option<Disable>,
    queue_target: Option<ConstantValue>,
    stack: SmallVec<[Frame; 2]>,
    lvalues: SmallVec<[LValue; 2]>,
    diags: Diagnostics,
    next_frame_id: u32,
}

impl<'a> EvalContext<'a> {
    /// Create a context evaluating against `unit` with default limits.
    pub fn new(unit: &'a CompilationUnit, flags: EvalFlags) -> Self {
        Self::with_limits(unit, flags, EvalLimits::default())
    }

    /// Create a context with explicit evaluation limits.
    pub fn with_limits(unit: &'a CompilationUnit, flags: EvalFlags, limits: EvalLimits) -> Self {
        let mut context = EvalContext {
            unit,
            flags,
            limits,
            steps: 0,
            step_limit_span: None,
            disable: None,
            queue_target: None,
            stack: SmallVec::new(),
            lvalues: SmallVec::new(),
            diags: Diagnostics::new(),
            next_frame_id: 0,
        };
        context.push_root_frame();
        context
    }

    /// The compilation unit this context evaluates against.
    pub fn unit(&self) -> &'a CompilationUnit {
        self.unit
    }

    /// Reset the context back to its initial constructed state so it can be
    /// reused without reallocation. Every outstanding [`LocalSlot`] handle
    /// is invalidated.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.push_root_frame();
        self.lvalues.clear();
        self.diags.clear();
        self.steps = 0;
        self.step_limit_span = None;
        self.disable = None;
        self.queue_target = None;
    }

    fn push_root_frame(&mut self) {
        // The root frame gets a fresh id even across resets, so handles
        // into pre-reset root storage die with everything else.
        let id = self.alloc_frame_id();
        self.stack
            .push(Frame::new(id, None, Span::DUMMY, LookupLocation::MAX));
    }

    fn alloc_frame_id(&mut self) -> FrameId {
        let id = FrameId::new(self.next_frame_id);
        self.next_frame_id += 1;
        id
    }

    // === Call stack ===

    /// Push a new frame onto the call stack.
    ///
    /// Returns false without pushing once the configured depth limit is
    /// reached. The caller surfaces [`ErrorCode::E3001`] and treats the
    /// evaluation as aborted; no diagnostic is recorded here.
    #[must_use]
    pub fn push_frame(
        &mut self,
        subroutine: SymbolId,
        call_span: Span,
        lookup: LookupLocation,
    ) -> bool {
        if self.call_depth() >= self.limits.max_depth as usize {
            return false;
        }
        let id = self.alloc_frame_id();
        self.stack
            .push(Frame::new(id, Some(subroutine), call_span, lookup));
        true
    }

    /// Push a frame with no bound subroutine.
    ///
    /// Used for scripting contexts and scoped caching suppression. Not
    /// subject to the depth limit: an empty frame represents no real user
    /// recursion.
    pub fn push_empty_frame(&mut self) {
        let id = self.alloc_frame_id();
        self.stack
            .push(Frame::new(id, None, Span::DUMMY, LookupLocation::MAX));
    }

    /// Pop the active frame from the call stack.
    ///
    /// # Panics
    ///
    /// Panics if no frame is active; that is a caller bug, not an
    /// evaluation failure.
    pub fn pop_frame(&mut self) {
        assert!(self.in_function(), "pop_frame called with no active frame");
        self.stack.pop();
    }

    /// Check if evaluation is currently inside a function call, rather than
    /// a top-level expression.
    #[inline]
    pub fn in_function(&self) -> bool {
        self.stack.len() > 1
    }

    /// Number of active call frames.
    #[inline]
    pub fn call_depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Get the top of the call stack.
    ///
    /// # Panics
    ///
    /// Panics if no frame is active.
    pub fn top_frame(&self) -> &Frame {
        assert!(self.in_function(), "top_frame called with no active frame");
        &self.stack[self.stack.len() - 1]
    }

    // === Local storage ===

    /// Create storage for a local variable in the current frame, or in the
    /// outermost evaluation scope if no frame is active. Overwrites any
    /// existing binding in place; pass [`ConstantValue::Invalid`] for a
    /// declared-but-unassigned local.
    pub fn create_local(&mut self, symbol: SymbolId, value: ConstantValue) -> LocalSlot {
        self.current_frame_mut().create_local(symbol, value)
    }

    /// Get a handle to the given local in the current frame.
    ///
    /// Lookup does not chain into caller frames: a callee cannot see its
    /// caller's locals.
    pub fn find_local(&self, symbol: SymbolId) -> Option<LocalSlot> {
        self.current_frame().find_local(symbol)
    }

    /// Remove a previously created local. Handles to its storage stop
    /// resolving. No-op if the symbol is not bound in the current frame.
    pub fn delete_local(&mut self, symbol: SymbolId) {
        self.current_frame_mut().delete_local(symbol);
    }

    /// Resolve a handle to the referenced value.
    pub fn local(&self, slot: LocalSlot) -> Option<&ConstantValue> {
        self.stack
            .iter()
            .rev()
            .find(|f| f.id() == slot.frame)?
            .get(slot)
    }

    /// Resolve a handle to the referenced value, mutably.
    pub fn local_mut(&mut self, slot: LocalSlot) -> Option<&mut ConstantValue> {
        self.stack
            .iter_mut()
            .rev()
            .find(|f| f.id() == slot.frame)?
            .get_mut(slot)
    }

    fn current_frame(&self) -> &Frame {
        // The stack always holds at least the root frame.
        &self.stack[self.stack.len() - 1]
    }

    fn current_frame_mut(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    // === LValue stack ===

    /// Push an lvalue for later reference while binding `ref`/`output`
    /// arguments.
    pub fn push_lvalue(&mut self, lvalue: LValue) {
        self.lvalues.push(lvalue);
    }

    /// Pop the top of the lvalue stack.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty; that is a caller bug.
    pub fn pop_lvalue(&mut self) -> LValue {
        match self.lvalues.pop() {
            Some(lvalue) => lvalue,
            None => panic!("pop_lvalue called with empty lvalue stack"),
        }
    }

    /// Peek the top of the lvalue stack, or `None` if it is empty.
    pub fn top_lvalue(&self) -> Option<&LValue> {
        self.lvalues.last()
    }

    // === Runaway guard ===

    /// Record the execution of one statement.
    ///
    /// Returns false once the statement budget is exhausted; the counter
    /// does not advance further. The caller surfaces [`ErrorCode::E3002`]
    /// at the span it passed; [`EvalContext::step_limit_span`] keeps the
    /// span of the first crossing for callers that unwind before
    /// reporting.
    #[must_use]
    pub fn step(&mut self, span: Span) -> bool {
        if self.steps >= self.limits.max_steps {
            self.step_limit_span.get_or_insert(span);
            return false;
        }
        self.steps += 1;
        true
    }

    /// Where the statement budget was first exceeded, if it was.
    pub fn step_limit_span(&self) -> Option<Span> {
        self.step_limit_span
    }

    // === Result caching ===

    /// Whether evaluation results may currently be memoized into expression
    /// nodes: only when [`EvalFlags::CACHE_RESULTS`] is set and evaluation
    /// is at the top level. Function-local results depend on call-specific
    /// bindings and are never cached.
    pub fn cache_results(&self) -> bool {
        !self.in_function() && self.flags.contains(EvalFlags::CACHE_RESULTS)
    }

    /// Run `f` with result caching suppressed.
    ///
    /// Clears [`EvalFlags::CACHE_RESULTS`] and, if evaluation was at the
    /// top level, pushes an empty frame so reentrant caching checks see a
    /// nested evaluation. Both are restored on exit, so
    /// [`EvalContext::cache_results`] and the call depth read exactly as
    /// before the scope.
    pub fn without_caching<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.flags.contains(EvalFlags::CACHE_RESULTS);
        let pushed = !self.in_function();

        self.flags.remove(EvalFlags::CACHE_RESULTS);
        if pushed {
            self.push_empty_frame();
        }

        let result = f(self);

        if pushed {
            self.pop_frame();
        }
        self.flags.set(EvalFlags::CACHE_RESULTS, saved);
        result
    }

    // === Disable signal ===

    /// Record that a `disable` statement targeting `target` was executed.
    /// Overwrites any previous signal; only one is pending at a time.
    pub fn set_disable_target(&mut self, target: SymbolId, range: Span) {
        self.disable = Some(Disable { target, range });
    }

    /// Clear the pending disable signal once the owning block has performed
    /// its early exit.
    pub fn clear_disable_target(&mut self) {
        self.disable = None;
    }

    /// The block a pending `disable` should terminate, if any.
    pub fn disable_target(&self) -> Option<SymbolId> {
        self.disable.map(|d| d.target)
    }

    /// Source range of the pending `disable` statement, or
    /// [`Span::DUMMY`] when none is pending.
    pub fn disable_range(&self) -> Span {
        self.disable.map_or(Span::DUMMY, |d| d.range)
    }

    /// The pending disable signal as one tagged value, for statement
    /// executors that propagate it through their own return values.
    pub fn disable_signal(&self) -> Option<Disable> {
        self.disable
    }

    // === Queue target ===

    /// Set the value an unbounded `$` literal resolves against.
    pub fn set_queue_target(&mut self, value: ConstantValue) {
        self.queue_target = Some(value);
    }

    /// Clear the queue target. With the target clear, `$` evaluates to the
    /// placeholder under [`EvalFlags::ALLOW_UNBOUNDED_PLACEHOLDER`] and is
    /// otherwise an evaluation error ([`ErrorCode::E3003`]).
    pub fn clear_queue_target(&mut self) {
        self.queue_target = None;
    }

    /// The active queue target, if any.
    pub fn queue_target(&self) -> Option<&ConstantValue> {
        self.queue_target.as_ref()
    }

    // === Diagnostics ===

    /// Record a diagnostic under the current evaluation. Returns the stored
    /// diagnostic so the call site can keep attaching labels and notes.
    /// Pass a point span for a single location.
    pub fn add_diag(&mut self, code: ErrorCode, span: Span) -> &mut Diagnostic {
        let diag = Diagnostic::error(code)
            .with_message(code.description())
            .with_label(span, "");
        self.diags.add(diag)
    }

    /// Merge another collection of diagnostics wholesale, preserving order.
    pub fn add_diags(&mut self, other: Diagnostics) {
        self.diags.merge(other);
    }

    /// The diagnostics produced so far by this evaluation.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diags
    }

    /// Flush all recorded diagnostics into the surrounding analysis
    /// context's bag, in the order they were recorded. Intended to be
    /// called once, when the evaluation concludes; speculative evaluations
    /// skip it and their diagnostics vanish with the context.
    pub fn report_diags(&mut self, dest: &mut Diagnostics) {
        self.diags.drain_into(dest);
    }

    /// Attach the current call stack to a diagnostic as one note per frame
    /// with a bound subroutine, innermost first.
    pub fn report_stack(&self, diag: &mut Diagnostic) {
        for frame in self.stack.iter().rev() {
            if let Some(subroutine) = frame.subroutine() {
                diag.add_note(format!(
                    "in call to `{}` from {}",
                    self.unit.symbol_name(subroutine),
                    frame.call_span()
                ));
            }
        }
    }

    /// Render the call stack and every frame's live locals as plain text,
    /// outermost first, for debugging.
    pub fn dump_stack(&self) -> String {
        let mut out = String::new();
        for (depth, frame) in self.stack.iter().enumerate() {
            let name = frame
                .subroutine()
                .map_or("<top>", |s| self.unit.symbol_name(s));
            let _ = writeln!(out, "frame {depth}: {name}");
            for (symbol, value) in frame.locals() {
                let _ = writeln!(out, "  {} = {}", self.unit.symbol_name(symbol), value);
            }
        }
        out
    }
}

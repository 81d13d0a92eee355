//! Call frames and frame-local value storage.
//!
//! Each function invocation gets an isolated storage table for its locals;
//! a callee never sees its caller's locals, so lookup is frame-local with
//! no chaining. Storage hands out [`LocalSlot`] handles instead of
//! references: a handle survives unrelated inserts into the same frame and
//! resolves to `None` once the local is deleted, the frame is popped, or
//! the context is reset.

use larch_ir::{ConstantValue, LookupLocation, Span, SymbolId};
use rustc_hash::FxHashMap;

/// Identity of one frame within one context, never reused after the frame
/// is popped.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub(crate) struct FrameId(u32);

impl FrameId {
    pub(crate) const fn new(raw: u32) -> Self {
        FrameId(raw)
    }
}

/// Checked handle to a local variable's storage.
///
/// Obtained from `EvalContext::create_local` / `find_local` and resolved
/// with `EvalContext::local` / `local_mut`. A stale handle (deleted local,
/// popped frame, reset context) resolves to `None`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LocalSlot {
    pub(crate) frame: FrameId,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// One storage cell. Deleted cells become tombstones so later cells keep
/// their indices.
#[derive(Debug)]
struct Slot {
    symbol: SymbolId,
    value: ConstantValue,
    generation: u32,
    live: bool,
}

/// A single frame in the evaluation call stack.
///
/// Holds the locals materialized while the frame executes plus the
/// call-site metadata used for stack traces and call-relative name
/// resolution. The bottom frame of every context is the outermost
/// evaluation scope: it has no subroutine and exists so that top-level
/// constant expressions also have local storage.
#[derive(Debug)]
pub struct Frame {
    id: FrameId,
    slots: Vec<Slot>,
    index: FxHashMap<SymbolId, u32>,
    subroutine: Option<SymbolId>,
    call_span: Span,
    lookup: LookupLocation,
}

impl Frame {
    pub(crate) fn new(
        id: FrameId,
        subroutine: Option<SymbolId>,
        call_span: Span,
        lookup: LookupLocation,
    ) -> Self {
        Frame {
            id,
            slots: Vec::new(),
            index: FxHashMap::default(),
            subroutine,
            call_span,
            lookup,
        }
    }

    /// The subroutine executing in this frame, absent for empty frames and
    /// the outermost scope.
    #[inline]
    pub fn subroutine(&self) -> Option<SymbolId> {
        self.subroutine
    }

    /// Source location of the call site.
    #[inline]
    pub fn call_span(&self) -> Span {
        self.call_span
    }

    /// Name-resolution position of the call site.
    #[inline]
    pub fn lookup_location(&self) -> LookupLocation {
        self.lookup
    }

    /// Live locals in creation order.
    pub fn locals(&self) -> impl Iterator<Item = (SymbolId, &ConstantValue)> {
        self.slots
            .iter()
            .filter(|s| s.live)
            .map(|s| (s.symbol, &s.value))
    }

    pub(crate) fn id(&self) -> FrameId {
        self.id
    }

    /// Insert or overwrite the binding for `symbol`.
    ///
    /// Overwriting keeps the slot: handles issued earlier observe the new
    /// value. Re-creating a deleted binding allocates a fresh slot, so
    /// handles from before the delete stay invalid.
    pub(crate) fn create_local(&mut self, symbol: SymbolId, value: ConstantValue) -> LocalSlot {
        if let Some(&idx) = self.index.get(&symbol) {
            let slot = &mut self.slots[idx as usize];
            slot.value = value;
            return LocalSlot {
                frame: self.id,
                index: idx,
                generation: slot.generation,
            };
        }

        let idx = u32::try_from(self.slots.len())
            .unwrap_or_else(|_| panic!("frame exceeded u32::MAX locals"));
        self.slots.push(Slot {
            symbol,
            value,
            generation: 0,
            live: true,
        });
        self.index.insert(symbol, idx);
        LocalSlot {
            frame: self.id,
            index: idx,
            generation: 0,
        }
    }

    pub(crate) fn find_local(&self, symbol: SymbolId) -> Option<LocalSlot> {
        let &idx = self.index.get(&symbol)?;
        let slot = &self.slots[idx as usize];
        Some(LocalSlot {
            frame: self.id,
            index: idx,
            generation: slot.generation,
        })
    }

    /// Remove a binding. No-op if `symbol` is not bound in this frame.
    pub(crate) fn delete_local(&mut self, symbol: SymbolId) {
        if let Some(idx) = self.index.remove(&symbol) {
            let slot = &mut self.slots[idx as usize];
            slot.live = false;
            slot.generation = slot.generation.wrapping_add(1);
        }
    }

    pub(crate) fn get(&self, handle: LocalSlot) -> Option<&ConstantValue> {
        debug_assert_eq!(handle.frame, self.id);
        let slot = self.slots.get(handle.index as usize)?;
        if slot.live && slot.generation == handle.generation {
            Some(&slot.value)
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, handle: LocalSlot) -> Option<&mut ConstantValue> {
        debug_assert_eq!(handle.frame, self.id);
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.live && slot.generation == handle.generation {
            Some(&mut slot.value)
        } else {
            None
        }
    }
}

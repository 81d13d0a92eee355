//! Assignable references for by-reference argument passing.
//!
//! When a call binds a `ref` or `output` argument, the caller builds an
//! [`LValue`] naming its own storage and pushes it on the context's lvalue
//! stack; evaluation inside the callee then loads and stores through the
//! handle, so writes land in the caller's frame without aliasing raw
//! memory. A stale lvalue (its local deleted, its frame popped) simply
//! stops resolving.

use larch_ir::ConstantValue;
use smallvec::SmallVec;

use crate::{EvalContext, LocalSlot};

/// A reference to mutable evaluation storage: a frame-local slot plus an
/// optional element path into nested queue values.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LValue {
    slot: LocalSlot,
    path: SmallVec<[u32; 2]>,
}

impl LValue {
    /// Reference a whole local.
    pub fn local(slot: LocalSlot) -> Self {
        LValue {
            slot,
            path: SmallVec::new(),
        }
    }

    /// Narrow the reference to one element of the referenced queue.
    #[must_use]
    pub fn element(mut self, index: u32) -> Self {
        self.path.push(index);
        self
    }

    /// The base storage slot this lvalue refers to.
    pub fn slot(&self) -> LocalSlot {
        self.slot
    }

    /// Read the referenced value.
    ///
    /// Returns `None` if the base slot is stale or the element path does
    /// not resolve in the current value.
    pub fn load<'v>(&self, context: &'v EvalContext<'_>) -> Option<&'v ConstantValue> {
        let mut value = context.local(self.slot)?;
        for &idx in &self.path {
            value = value.as_queue()?.get(idx as usize)?;
        }
        Some(value)
    }

    /// Write through the reference.
    ///
    /// Returns false without writing if the base slot is stale or the
    /// element path does not resolve.
    #[must_use]
    pub fn store(&self, context: &mut EvalContext<'_>, value: ConstantValue) -> bool {
        let Some(mut target) = context.local_mut(self.slot) else {
            return false;
        };
        for &idx in &self.path {
            let ConstantValue::Queue(elems) = target else {
                return false;
            };
            let Some(elem) = elems.get_mut(idx as usize) else {
                return false;
            };
            target = elem;
        }
        *target = value;
        true
    }
}

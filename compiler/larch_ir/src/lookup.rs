//! Name-resolution position metadata.

use crate::SymbolId;

/// The position within a scope that a name lookup should be performed
/// relative to.
///
/// Recorded on each call frame so that names referenced inside a constant
/// function resolve the way they would have at the call site. The default,
/// [`LookupLocation::MAX`], means "after everything in the scope" and is
/// what elaboration uses once declaration order no longer matters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct LookupLocation {
    /// The scope the lookup is relative to, if any.
    pub scope: Option<SymbolId>,
    /// Ordering index within that scope.
    pub index: u32,
}

impl LookupLocation {
    /// A location after everything in the scope.
    pub const MAX: LookupLocation = LookupLocation {
        scope: None,
        index: u32::MAX,
    };

    /// Create a lookup location before the item with the given index in a scope.
    pub const fn new(scope: SymbolId, index: u32) -> Self {
        LookupLocation {
            scope: Some(scope),
            index,
        }
    }
}

impl Default for LookupLocation {
    fn default() -> Self {
        Self::MAX
    }
}

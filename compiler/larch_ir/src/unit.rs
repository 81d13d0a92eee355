//! The per-design-unit container.

use crate::{Name, Span, StringInterner, Symbol, SymbolId, SymbolKind};

/// One compilation unit: the interner and symbol arena the rest of the
/// front end resolves against.
///
/// Built mutably during elaboration, then treated as read-only by every
/// consumer. Evaluation contexts hold a shared borrow, so a unit outlives
/// all evaluation performed against it.
#[derive(Debug, Default)]
pub struct CompilationUnit {
    interner: StringInterner,
    symbols: Vec<Symbol>,
}

impl CompilationUnit {
    /// Create an empty unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string in this unit's interner.
    pub fn intern(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// Look up the text of an interned name.
    pub fn lookup(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    /// Add a symbol to the arena.
    pub fn add_symbol(&mut self, kind: SymbolKind, name: &str, decl_span: Span) -> SymbolId {
        let name = self.interner.intern(name);
        let id = u32::try_from(self.symbols.len())
            .unwrap_or_else(|_| panic!("symbol arena exceeded u32::MAX entries"));
        self.symbols.push(Symbol::new(name, kind, decl_span));
        SymbolId::from_raw(id)
    }

    /// Add a variable symbol.
    pub fn add_variable(&mut self, name: &str, decl_span: Span) -> SymbolId {
        self.add_symbol(SymbolKind::Variable, name, decl_span)
    }

    /// Add a subroutine symbol.
    pub fn add_subroutine(&mut self, name: &str, decl_span: Span) -> SymbolId {
        self.add_symbol(SymbolKind::Subroutine, name, decl_span)
    }

    /// Add a named-block symbol.
    pub fn add_block(&mut self, name: &str, decl_span: Span) -> SymbolId {
        self.add_symbol(SymbolKind::Block, name, decl_span)
    }

    /// Get a symbol by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this unit.
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.raw() as usize]
    }

    /// Get the declared name of a symbol as text.
    pub fn symbol_name(&self, id: SymbolId) -> &str {
        self.lookup(self.symbol(id).name)
    }

    /// Number of symbols in the arena.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }
}

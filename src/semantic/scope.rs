/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     semantic/scope.rs
 * Purpose:  Scoped symbol tables and the scope tree that links them
 * 
 * Author:   Sam Wilcox
 * 
 * License:
 * This file is part of the SPI project.
 * 
 * SPI is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

use std::collections::HashMap;
use std::fmt;

use crate::semantic::symbol::Symbol;

/// Index of a scope inside a [`ScopeTree`].
pub type ScopeId = usize;

/// One lexical scope: the symbols a program or procedure declares.
///
/// Symbols are kept in insertion order for dumps, with a name index for
/// lookups.
#[derive(Debug, Clone)]
pub struct ScopedSymbolTable {
    pub name: String,

    /// 1 for the program scope, +1 per nested procedure.
    pub level: usize,

    pub enclosing: Option<ScopeId>,

    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl ScopedSymbolTable {
    pub fn new(name: impl Into<String>, level: usize, enclosing: Option<ScopeId>) -> Self {
        Self {
            name: name.into(),
            level,
            enclosing,
            symbols: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds a symbol to this scope.
    ///
    /// # Returns
    /// `false`, leaving the table untouched, if the name is already
    /// declared in this scope. Enclosing scopes are not consulted.
    pub fn insert(&mut self, symbol: Symbol) -> bool {
        if self.index.contains_key(symbol.name()) {
            return false;
        }

        self.index.insert(symbol.name().to_string(), self.symbols.len());
        self.symbols.push(symbol);
        true
    }

    /// Looks a name up in this scope only.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&i| &self.symbols[i])
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Every scope opened during one analysis, linked through `enclosing`.
///
/// Scopes are never removed, so a [`ScopeId`] stays valid for the whole
/// analysis and afterwards.
#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    scopes: Vec<ScopedSymbolTable>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new scope nested in `enclosing` and returns its id.
    pub fn open(&mut self, name: impl Into<String>, enclosing: Option<ScopeId>) -> ScopeId {
        let level = enclosing.map(|id| self.scopes[id].level + 1).unwrap_or(1);
        self.scopes.push(ScopedSymbolTable::new(name, level, enclosing));
        self.scopes.len() - 1
    }

    pub fn get(&self, id: ScopeId) -> &ScopedSymbolTable {
        &self.scopes[id]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut ScopedSymbolTable {
        &mut self.scopes[id]
    }

    /// Resolves a name starting at `from` and walking outwards.
    ///
    /// # Returns
    /// The symbol together with the scope that declared it.
    pub fn lookup(&self, from: ScopeId, name: &str) -> Option<(&Symbol, &ScopedSymbolTable)> {
        let mut current = Some(from);

        while let Some(id) = current {
            let scope = &self.scopes[id];
            if let Some(symbol) = scope.lookup_local(name) {
                return Some((symbol, scope));
            }
            current = scope.enclosing;
        }

        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScopedSymbolTable> {
        self.scopes.iter()
    }

    /// Renders one scope for the symbol-table dump.
    pub fn render(&self, id: ScopeId) -> String {
        let scope = &self.scopes[id];
        let enclosing = scope.enclosing.map(|e| self.scopes[e].name.as_str());
        ScopeDump { scope, enclosing }.to_string()
    }
}

struct ScopeDump<'a> {
    scope: &'a ScopedSymbolTable,
    enclosing: Option<&'a str>,
}

impl fmt::Display for ScopeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-----SCOPED SYMBOL TABLE-----")?;
        writeln!(f, "Scope name     : {}", self.scope.name)?;
        writeln!(f, "Scope level    : {}", self.scope.level)?;
        if let Some(enclosing) = self.enclosing {
            writeln!(f, "Enclosing Scope: {}", enclosing)?;
        }
        for symbol in self.scope.symbols() {
            writeln!(f, "{:>15}:{}", symbol.name(), symbol)?;
        }
        write!(f, "-----(SCOPED SYMBOL TABLE)-----")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::symbol::{BuiltinType, VarSymbol};

    fn var(name: &str) -> Symbol {
        Symbol::Variable(VarSymbol {
            name: name.to_string(),
            ty: BuiltinType::Integer,
        })
    }

    #[test]
    fn insert_rejects_duplicates_in_the_same_scope() {
        let mut table = ScopedSymbolTable::new("global", 1, None);
        assert!(table.insert(var("X")));
        assert!(!table.insert(var("X")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn inner_scopes_see_outer_names_but_not_siblings() {
        let mut tree = ScopeTree::new();
        let global = tree.open("global", None);
        let a = tree.open("A", Some(global));
        let b = tree.open("B", Some(global));

        tree.get_mut(global).insert(var("G"));
        tree.get_mut(a).insert(var("LOCAL_A"));

        assert_eq!(tree.get(a).level, 2);
        let (_, owner) = tree.lookup(b, "G").expect("global is visible");
        assert_eq!(owner.name, "global");
        assert!(tree.lookup(b, "LOCAL_A").is_none());
        assert!(tree.lookup(global, "LOCAL_A").is_none());
    }

    #[test]
    fn inner_declarations_shadow_outer_ones() {
        let mut tree = ScopeTree::new();
        let global = tree.open("global", None);
        let inner = tree.open("P", Some(global));
        tree.get_mut(global).insert(var("X"));
        tree.get_mut(inner).insert(var("X"));

        let (_, owner) = tree.lookup(inner, "X").unwrap();
        assert_eq!(owner.level, 2);
    }

    #[test]
    fn dump_lists_symbols_in_declaration_order() {
        let mut tree = ScopeTree::new();
        let global = tree.open("global", None);
        let inner = tree.open("P", Some(global));
        tree.get_mut(inner).insert(var("B"));
        tree.get_mut(inner).insert(var("A"));

        let dump = tree.render(inner);
        assert!(dump.contains("Enclosing Scope: global"));
        let b = dump.find("name='B'").unwrap();
        let a = dump.find("name='A'").unwrap();
        assert!(b < a);
    }
}

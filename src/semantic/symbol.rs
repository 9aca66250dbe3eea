/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     semantic/symbol.rs
 * Purpose:  Symbols stored in scoped symbol tables
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

use std::fmt;
use std::rc::Rc;

use crate::ast::Block;

/// The three built-in types every program can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Integer,
    Real,
    String,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 3] = [BuiltinType::Integer, BuiltinType::Real, BuiltinType::String];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinType::Integer => "INTEGER",
            BuiltinType::Real => "REAL",
            BuiltinType::String => "STRING",
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A declared variable or formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct VarSymbol {
    pub name: String,
    pub ty: BuiltinType,
}

/// A declared procedure.
///
/// Everything needed to call it lives here: the interpreter never has to
/// search the tree for the declaration.
#[derive(Debug, PartialEq)]
pub struct ProcedureSymbol {
    pub name: String,

    /// Formal parameters in declaration order.
    pub params: Vec<VarSymbol>,

    pub block: Rc<Block>,

    /// Level of the scope the procedure was declared in. Its body runs one
    /// level deeper.
    pub scope_level: usize,
}

/// An entry in a scoped symbol table.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Builtin(BuiltinType),
    Variable(VarSymbol),
    Procedure(Rc<ProcedureSymbol>),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Builtin(ty) => ty.name(),
            Symbol::Variable(var) => &var.name,
            Symbol::Procedure(proc) => &proc.name,
        }
    }

    /// What kind of symbol this is, as shown in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Symbol::Builtin(_) => "type",
            Symbol::Variable(_) => "variable",
            Symbol::Procedure(_) => "procedure",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Builtin(ty) => write!(f, "<BuiltinTypeSymbol(name='{}')>", ty.name()),
            Symbol::Variable(var) => {
                write!(f, "<VarSymbol(name='{}', type='{}')>", var.name, var.ty)
            }
            Symbol::Procedure(proc) => {
                let params: Vec<String> = proc
                    .params
                    .iter()
                    .map(|p| format!("{}:{}", p.name, p.ty))
                    .collect();
                write!(
                    f,
                    "<ProcedureSymbol(name={}, parameters=[{}])>",
                    proc.name,
                    params.join(", ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_render_for_table_dumps() {
        let var = Symbol::Variable(VarSymbol {
            name: "X".to_string(),
            ty: BuiltinType::Real,
        });
        assert_eq!(var.to_string(), "<VarSymbol(name='X', type='REAL')>");
        assert_eq!(var.kind(), "variable");
    }
}

/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     semantic/mod.rs
 * Purpose:  Root module for scoped semantic analysis
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

//! Scoped name resolution.
//!
//! Builds one [`ScopedSymbolTable`](scope::ScopedSymbolTable) per program
//! and procedure, checks every declaration and reference against them, and
//! hands the interpreter an [`Analysis`] keyed by node id.

pub mod analyzer;
pub mod scope;
pub mod symbol;

pub use analyzer::{Analysis, SemanticAnalyzer, VarBinding};
pub use scope::{ScopeId, ScopeTree, ScopedSymbolTable};
pub use symbol::{BuiltinType, ProcedureSymbol, Symbol, VarSymbol};

use crate::ast::Program;
use crate::config::Config;
use crate::error::SemanticError;

/// Analyzes a parsed program with a fresh analyzer.
pub fn analyze(program: &Program, config: &Config) -> Result<Analysis, Vec<SemanticError>> {
    SemanticAnalyzer::new(config).analyze(program)
}

/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     ast/mod.rs
 * Purpose:  Root module for the SPI abstract syntax tree
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

//! The abstract syntax tree.
//!
//! A closed set of node types built once by the parser and never mutated
//! afterwards. Later passes dispatch over these enums with exhaustive
//! `match`es, so adding a variant is a compile error in every pass that
//! forgot to handle it.
//!
//! Nodes that later passes need to attach facts to (`Variable` and
//! `ProcedureCall`) carry a parser-assigned [`NodeId`]; semantic analysis
//! keys its resolution tables on that id instead of writing into the tree.

/// Program, block and declaration nodes.
pub mod decl;

/// Statement nodes.
pub mod stmt;

/// Expression nodes and operators.
pub mod expr;

/// Indented tree rendering used by the AST dump.
pub mod display;

pub use decl::{Block, Declaration, Param, ProcedureDecl, Program, TypeSpec, VarDecl};
pub use expr::{BinOp, Expr, UnaryOp, Variable};
pub use stmt::{Assign, Compound, ProcedureCall, Stmt, WriteStatement};

/// Identity of a node that semantic analysis resolves.
///
/// Unique within one parsed program.
pub type NodeId = usize;

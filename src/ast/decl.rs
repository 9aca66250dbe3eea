/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     ast/decl.rs
 * Purpose:  Program, block and declaration nodes
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

use std::rc::Rc;

use crate::ast::stmt::Compound;
use crate::span::Span;

/// Root of every parse: `program NAME; block .`
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    pub block: Block,
    pub span: Span,
}

/// Declarations followed by the compound statement that uses them.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub declarations: Vec<Declaration>,
    pub compound: Compound,
}

/// Anything that may appear in a block's declaration section.
///
/// `var a, b : integer;` is split by the parser into one `VarDecl` per
/// name, so every declaration introduces exactly one symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Var(VarDecl),
    Procedure(ProcedureDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub type_spec: TypeSpec,
    pub span: Span,
}

/// A type name as written: `INTEGER`, `REAL` or `STRING`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: String,
    pub span: Span,
}

/// One formal parameter of a procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub type_spec: TypeSpec,
    pub span: Span,
}

/// `procedure NAME (params); block;`
///
/// The body is reference counted so the resolved procedure symbol can hold
/// on to it for the interpreter without borrowing the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub block: Rc<Block>,
    pub span: Span,
}

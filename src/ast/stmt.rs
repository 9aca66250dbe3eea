/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     ast/stmt.rs
 * Purpose:  Statement nodes
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

use crate::ast::expr::{Expr, Variable};
use crate::ast::NodeId;
use crate::span::Span;

/// All executable statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /* ----------------------------- */
    /* BLOCKS                        */
    /* ----------------------------- */

    Compound(Compound),

    /* ----------------------------- */
    /* SIDE EFFECTS                  */
    /* ----------------------------- */

    Assign(Assign),

    Call(ProcedureCall),

    Write(WriteStatement),

    /* ----------------------------- */
    /* EMPTY                         */
    /* ----------------------------- */

    /// The empty statement, e.g. before the `end` in `begin x := 1; end`.
    NoOp,
}

/// `begin stmt; stmt; ... end`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    pub children: Vec<Stmt>,
}

/// `target := value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: Variable,
    pub value: Expr,
}

/// `NAME` or `NAME(arg, ...)` in statement position.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    pub id: NodeId,
    pub name: String,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// `write(...)` or `writeln(...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteStatement {
    pub args: Vec<Expr>,
    pub newline: bool,
    pub span: Span,
}

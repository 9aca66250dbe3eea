/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     ast/expr.rs
 * Purpose:  Expression nodes and operators
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

use crate::ast::NodeId;
use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    IntegerDiv,
    FloatDiv,
}

impl BinOp {
    /// Source spelling of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::IntegerDiv => "DIV",
            BinOp::FloatDiv => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

/// A reference to a declared variable or parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub id: NodeId,
    pub name: String,
    pub span: Span,
}

/// Everything that evaluates to a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Variable(Variable),
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Integer(i64),
    Real(f64),
    Str(String),
}

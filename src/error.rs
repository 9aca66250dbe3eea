/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     error.rs
 * Purpose:  Error taxonomy for every pipeline stage and the stable error codes
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

use crate::lexer::token::Token;
use crate::span::Span;
use serde::Serialize;
use std::fmt;
use std::io;
use thiserror::Error;

/// Stable error codes shared by every stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    LexerError,
    UnexpectedToken,
    IdNotFound,
    DuplicateId,
    WrongParamsNum,
    WrongSymbolKind,
    NestingTooDeep,
    RuntimeFault,
}

impl ErrorCode {
    /// The code as it appears in diagnostics, e.g. `DUPLICATE_ID`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::LexerError => "LEXER_ERROR",
            ErrorCode::UnexpectedToken => "UNEXPECTED_TOKEN",
            ErrorCode::IdNotFound => "ID_NOT_FOUND",
            ErrorCode::DuplicateId => "DUPLICATE_ID",
            ErrorCode::WrongParamsNum => "WRONG_PARAMS_NUM",
            ErrorCode::WrongSymbolKind => "WRONG_SYMBOL_KIND",
            ErrorCode::NestingTooDeep => "NESTING_TOO_DEEP",
            ErrorCode::RuntimeFault => "RUNTIME_FAULT",
        }
    }

    /// Short human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::LexerError => "Invalid character in source",
            ErrorCode::UnexpectedToken => "Unexpected token",
            ErrorCode::IdNotFound => "Identifier not found",
            ErrorCode::DuplicateId => "Duplicate id found",
            ErrorCode::WrongParamsNum => "Wrong number of arguments",
            ErrorCode::WrongSymbolKind => "Wrong kind of symbol",
            ErrorCode::NestingTooDeep => "Nesting too deep",
            ErrorCode::RuntimeFault => "Runtime fault",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to turn source text into tokens. Fatal for the current parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unrecognized character '{ch}' at line {} column {}", .span.line, .span.column)]
    UnrecognizedCharacter { ch: char, span: Span },

    #[error("unterminated string literal starting at {span}")]
    UnterminatedString { span: Span },

    #[error("unterminated comment starting at {span}")]
    UnterminatedComment { span: Span },

    #[error("integer literal '{lexeme}' does not fit in 64 bits")]
    IntegerOutOfRange { lexeme: String, span: Span },

    #[error("real literal '{lexeme}' is too large to represent")]
    RealOutOfRange { lexeme: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnrecognizedCharacter { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::UnterminatedComment { span }
            | LexError::IntegerOutOfRange { span, .. }
            | LexError::RealOutOfRange { span, .. } => *span,
        }
    }
}

fn expected_suffix(expected: &Option<String>) -> String {
    match expected {
        Some(what) => format!(", expected {}", what),
        None => String::new(),
    }
}

/// The parser met a token it has no rule for. Fatal for the current parse.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} -> {token}{}", .code.description(), expected_suffix(.expected))]
pub struct SyntaxError {
    pub code: ErrorCode,

    /// The offending token.
    pub token: Token,

    /// What the parser was looking for, if a single thing.
    pub expected: Option<String>,
}

impl SyntaxError {
    pub fn unexpected(token: Token, expected: Option<String>) -> Self {
        Self {
            code: ErrorCode::UnexpectedToken,
            token,
            expected,
        }
    }

    /// `token` opens one more nested construct than `limit` allows.
    pub fn too_deep(token: Token, limit: usize) -> Self {
        Self {
            code: ErrorCode::NestingTooDeep,
            token,
            expected: Some(format!("at most {} nested levels", limit)),
        }
    }
}

/// Name-resolution failures. These are collected, not fatal one by one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("Identifier not found: '{name}' at {span}")]
    IdNotFound { name: String, span: Span },

    #[error("Duplicate id found: '{name}' at {span}")]
    DuplicateId { name: String, span: Span },

    #[error("procedure '{name}' expects {expected} argument(s) but {found} given at {span}")]
    WrongParamsNum {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("'{name}' is a {actual}, expected a {expected} at {span}")]
    WrongSymbolKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
        span: Span,
    },
}

impl SemanticError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SemanticError::IdNotFound { .. } => ErrorCode::IdNotFound,
            SemanticError::DuplicateId { .. } => ErrorCode::DuplicateId,
            SemanticError::WrongParamsNum { .. } => ErrorCode::WrongParamsNum,
            SemanticError::WrongSymbolKind { .. } => ErrorCode::WrongSymbolKind,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SemanticError::IdNotFound { span, .. }
            | SemanticError::DuplicateId { span, .. }
            | SemanticError::WrongParamsNum { span, .. }
            | SemanticError::WrongSymbolKind { span, .. } => *span,
        }
    }

    /// The identifier the error is about.
    pub fn name(&self) -> &str {
        match self {
            SemanticError::IdNotFound { name, .. }
            | SemanticError::DuplicateId { name, .. }
            | SemanticError::WrongParamsNum { name, .. }
            | SemanticError::WrongSymbolKind { name, .. } => name,
        }
    }
}

/// Faults raised while evaluating a program that passed analysis.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("division by zero at {span}")]
    DivisionByZero { span: Span },

    #[error("integer overflow at {span}")]
    IntegerOverflow { span: Span },

    #[error("real result of '{operator}' is out of range at {span}")]
    RealOverflow { operator: &'static str, span: Span },

    #[error("operator '{operator}' cannot be applied to {operands} at {span}")]
    InvalidOperands {
        operator: &'static str,
        operands: String,
        span: Span,
    },

    #[error("cannot store a {actual} value in {declared} variable '{name}' at {span}")]
    IncompatibleAssignment {
        name: String,
        declared: &'static str,
        actual: &'static str,
        span: Span,
    },

    #[error("variable '{name}' used before it was assigned at {span}")]
    Uninitialized { name: String, span: Span },

    #[error("procedure '{name}' expects {expected} argument(s) but received {found} at {span}")]
    ArgumentCount {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("'{name}' at {span} was never resolved by semantic analysis")]
    Unresolved { name: String, span: Span },

    #[error("no live frame at nesting level {level} for '{name}' at {span}")]
    MissingFrame {
        name: String,
        level: usize,
        span: Span,
    },

    #[error("call depth limit of {limit} exceeded calling '{name}' at {span}")]
    CallDepthExceeded {
        name: String,
        limit: usize,
        span: Span,
    },

    #[error("failed to write program output: {0}")]
    Output(#[from] io::Error),
}

impl RuntimeError {
    pub fn span(&self) -> Option<Span> {
        match self {
            RuntimeError::DivisionByZero { span }
            | RuntimeError::IntegerOverflow { span }
            | RuntimeError::RealOverflow { span, .. }
            | RuntimeError::InvalidOperands { span, .. }
            | RuntimeError::IncompatibleAssignment { span, .. }
            | RuntimeError::Uninitialized { span, .. }
            | RuntimeError::ArgumentCount { span, .. }
            | RuntimeError::Unresolved { span, .. }
            | RuntimeError::MissingFrame { span, .. }
            | RuntimeError::CallDepthExceeded { span, .. } => Some(*span),
            RuntimeError::Output(_) => None,
        }
    }
}

/// Everything the pipeline can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("semantic analysis failed with {} error(s)", .0.len())]
    Semantic(Vec<SemanticError>),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::{TokenKind, TokenValue};

    #[test]
    fn syntax_error_quotes_the_token() {
        let token = Token::new(
            TokenKind::Semi,
            Some(TokenValue::Text(";".to_string())),
            Span::new(3, 14),
        );
        let err = SyntaxError::unexpected(token, Some("END".to_string()));
        assert_eq!(
            err.to_string(),
            "Unexpected token -> Token(SEMI, value=;, position=3:14), expected END"
        );
    }

    #[test]
    fn lex_error_reports_line_and_column() {
        let err = LexError::UnrecognizedCharacter {
            ch: '#',
            span: Span::new(2, 7),
        };
        assert_eq!(err.to_string(), "unrecognized character '#' at line 2 column 7");
        assert_eq!(err.span(), Span::new(2, 7));
    }

    #[test]
    fn semantic_errors_know_their_code() {
        let err = SemanticError::DuplicateId {
            name: "Y".to_string(),
            span: Span::new(1, 1),
        };
        assert_eq!(err.code(), ErrorCode::DuplicateId);
        assert_eq!(err.code().as_str(), "DUPLICATE_ID");
        assert_eq!(err.name(), "Y");
    }
}

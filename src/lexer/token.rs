/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     lexer/token.rs
 * Purpose:  Token kinds, token payloads and their rendering
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

use crate::span::Span;
use serde::Serialize;
use std::fmt;

/// Represents the **category of a lexical token** in SPI source.
///
/// `TokenKind` identifies how a sequence of characters from the source
/// code should be interpreted by the parser.
///
/// # Compiler Pipeline Role
/// ```text
/// Source Code → Lexer → TokenKind → Parser → AST
/// ```
///
/// The reserved-word block (`Program` through `End`) is kept contiguous so
/// the keyword table in `keywords.rs` reads like the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Single-character operators and punctuation.
    Plus,
    Minus,
    Mul,
    FloatDiv,
    LParen,
    RParen,
    Semi,
    Dot,
    Colon,
    Comma,

    // Reserved words.
    Program,
    Integer,
    Real,
    String,
    IntegerDiv,
    Var,
    Procedure,
    Begin,
    Write,
    Writeln,
    End,

    // Identifiers, literals and the two-character assignment operator.
    Id,
    IntegerConst,
    RealConst,
    StringConst,
    Assign,

    /// End-of-input marker.
    ///
    /// Always the **final token** of a stream; the parser uses it to
    /// verify the whole program was consumed.
    Eof,
}

impl TokenKind {
    /// Upper-case diagnostic name, e.g. `INTEGER_CONST`.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mul => "MUL",
            TokenKind::FloatDiv => "FLOAT_DIV",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Semi => "SEMI",
            TokenKind::Dot => "DOT",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Program => "PROGRAM",
            TokenKind::Integer => "INTEGER",
            TokenKind::Real => "REAL",
            TokenKind::String => "STRING",
            TokenKind::IntegerDiv => "INTEGER_DIV",
            TokenKind::Var => "VAR",
            TokenKind::Procedure => "PROCEDURE",
            TokenKind::Begin => "BEGIN",
            TokenKind::Write => "WRITE",
            TokenKind::Writeln => "WRITELN",
            TokenKind::End => "END",
            TokenKind::Id => "ID",
            TokenKind::IntegerConst => "INTEGER_CONST",
            TokenKind::RealConst => "REAL_CONST",
            TokenKind::StringConst => "STRING_CONST",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Eof => "EOF",
        }
    }

    /// Maps a single source character onto its punctuation kind.
    pub fn from_char(ch: char) -> Option<TokenKind> {
        Some(match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Mul,
            '/' => TokenKind::FloatDiv,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semi,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Literal payload carried by a token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Integer(n) => write!(f, "{}", n),
            TokenValue::Real(r) => write!(f, "{}", r),
            TokenValue::Text(s) => f.write_str(s),
        }
    }
}

/// Represents a **single lexical token** produced by the lexer.
///
/// # Example Tokens
/// ```text
/// program  →  Token(PROGRAM, value=PROGRAM, position=1:1)
/// x        →  Token(ID, value=X, position=2:5)
/// 42       →  Token(INTEGER_CONST, value=42, position=3:10)
/// ```
///
/// Tokens are immutable once produced; the parser only clones them into
/// AST nodes and error values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The classified category of the token.
    pub kind: TokenKind,

    /// Literal payload.
    ///
    /// - Identifiers and keywords carry their canonical (upper-case) name
    /// - Numbers carry their parsed value
    /// - Strings carry their verbatim contents
    /// - Punctuation carries its spelling
    /// - `Eof` carries nothing
    pub value: Option<TokenValue>,

    /// Where the first character of the token appeared.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: Option<TokenValue>, span: Span) -> Self {
        Self { kind, value, span }
    }

    /// Returns the textual payload of identifier, keyword, string and
    /// punctuation tokens.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::Text(s)) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    /// Formats a token the way diagnostics quote it:
    /// `Token(SEMI, value=;, position=3:14)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}", self.kind)?;
        if let Some(value) = &self.value {
            write!(f, ", value={}", value)?;
        }
        write!(f, ", position={})", self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_diagnostic_form() {
        let token = Token::new(
            TokenKind::Id,
            Some(TokenValue::Text("ALPHA".to_string())),
            Span::new(4, 13),
        );
        assert_eq!(token.to_string(), "Token(ID, value=ALPHA, position=4:13)");

        let eof = Token::new(TokenKind::Eof, None, Span::new(9, 1));
        assert_eq!(eof.to_string(), "Token(EOF, position=9:1)");
    }

    #[test]
    fn tokens_serialize_to_flat_json() {
        let token = Token::new(
            TokenKind::IntegerConst,
            Some(TokenValue::Integer(42)),
            Span::new(1, 7),
        );
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"INTEGER_CONST","value":42,"span":{"line":1,"column":7}}"#
        );
    }
}

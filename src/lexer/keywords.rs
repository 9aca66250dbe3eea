/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     lexer/keywords.rs
 * Purpose:  Reserved-word lookup for canonical (upper-case) identifiers
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

use crate::lexer::token::TokenKind;

/// Looks up a **case-folded** word in the reserved-word table.
///
/// The lexer upper-cases every identifier before calling this, so the
/// table only needs the canonical spelling of each keyword.
///
/// # Returns
/// - `Some(kind)` if the word is reserved
/// - `None` if the word should be treated as a normal identifier
///
/// # Examples
/// ```text
/// BEGIN   -> Some(TokenKind::Begin)
/// DIV     -> Some(TokenKind::IntegerDiv)
/// ALPHA   -> None
/// ```
pub fn keyword(word: &str) -> Option<TokenKind> {
    Some(match word {
        "PROGRAM" => TokenKind::Program,
        "INTEGER" => TokenKind::Integer,
        "REAL" => TokenKind::Real,
        "STRING" => TokenKind::String,
        "DIV" => TokenKind::IntegerDiv,
        "VAR" => TokenKind::Var,
        "PROCEDURE" => TokenKind::Procedure,
        "BEGIN" => TokenKind::Begin,
        "WRITE" => TokenKind::Write,
        "WRITELN" => TokenKind::Writeln,
        "END" => TokenKind::End,
        _ => return None,
    })
}

/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     lexer/mod.rs
 * Purpose:  Root module for the SPI lexer
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

/// Cursor-based scanner: source text to tokens.
pub mod lexer;

/// Token kinds, payloads and their diagnostic rendering.
pub mod token;

/// Reserved-word table.
pub mod keywords;

pub use lexer::Lexer;
pub use token::{Token, TokenKind, TokenValue};

use crate::config::Config;
use crate::error::LexError;

/// Lexes a whole program text into a token vector ending in `Eof`.
///
/// # Example
/// ```rust
/// use spi::config::Config;
/// use spi::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("begin end", &Config::default()).unwrap();
/// assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
/// ```
pub fn tokenize(source: &str, config: &Config) -> Result<Vec<Token>, LexError> {
    Lexer::new(source, config).tokenize()
}

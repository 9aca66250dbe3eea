/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     parser/parser.rs
 * Purpose:  Core parser structure and the public parse() entry point
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

use crate::ast::{NodeId, Program};
use crate::config::{Config, Trace};
use crate::error::SyntaxError;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// The recursive-descent parser.
///
/// This structure maintains:
/// - The full token stream produced by the lexer (always ending in `Eof`)
/// - The current cursor position into that stream
/// - The counter used to hand out [`NodeId`]s
///
/// The grammar rules are implemented through additional `impl Parser`
/// blocks in the sibling modules.
pub struct Parser<'a> {
    /// Complete list of tokens to be parsed.
    pub(crate) tokens: Vec<Token>,

    /// Current cursor position within the token stream.
    pub(crate) current: usize,

    next_id: NodeId,

    /// Constructs currently open around the cursor.
    depth: usize,

    pub(crate) config: &'a Config,
}

/// Public entry point for the parsing phase.
///
/// # SPI Pipeline
/// ```text
/// Source → Lexer → Tokens → Parser → AST → SemanticAnalyzer → Interpreter
/// ```
///
/// # Errors
/// The first token that fits no rule ends the parse with a
/// [`SyntaxError`]; there is no recovery.
pub fn parse(tokens: Vec<Token>, config: &Config) -> Result<Program, SyntaxError> {
    let mut parser = Parser::new(tokens, config);
    parser.parse()
}

impl<'a> Parser<'a> {
    pub fn new(mut tokens: Vec<Token>, config: &'a Config) -> Self {
        // The helpers rely on a trailing Eof to stop at.
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let span = tokens.last().map(|t| t.span).unwrap_or(Span::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, None, span));
        }

        Self {
            tokens,
            current: 0,
            next_id: 0,
            depth: 0,
            config,
        }
    }

    /// Parses the entire token stream into a program.
    ///
    /// # Behavior
    /// - Guarantees full token consumption: anything after the final `.`
    ///   is reported as an unexpected token
    pub fn parse(&mut self) -> Result<Program, SyntaxError> {
        self.config.trace(Trace::Parser, || "parse()".to_string());

        let program = self.program()?;
        self.eat(TokenKind::Eof)?;
        Ok(program)
    }

    /// Hands out the next node identity.
    pub(crate) fn next_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Runs `rule` one nesting level deeper.
    ///
    /// # Errors
    /// A [`SyntaxError`] with code `NESTING_TOO_DEEP` at the token that
    /// would open level `Config::max_nesting + 1`.
    pub(crate) fn nested<T, F>(&mut self, rule: F) -> Result<T, SyntaxError>
    where
        F: FnOnce(&mut Self) -> Result<T, SyntaxError>,
    {
        if self.depth >= self.config.max_nesting {
            return Err(SyntaxError::too_deep(
                self.current_token().clone(),
                self.config.max_nesting,
            ));
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }
}

/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     parser/helpers.rs
 * Purpose:  Token matching, consumption and lookahead helpers for the parser
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

use crate::config::Trace;
use crate::error::SyntaxError;
use crate::lexer::token::{Token, TokenKind};
use crate::parser::parser::Parser;
use crate::span::Span;

impl<'a> Parser<'a> {
    /// Returns the token under the cursor.
    pub fn current_token(&self) -> &Token {
        // `new` guarantees a trailing Eof and `advance` never moves past it.
        &self.tokens[self.current]
    }

    /// Checks the current token's kind without consuming it.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_token().kind == kind
    }

    /// Kind of the token after the current one, or `Eof` past the end.
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.current + 1)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// Advances one token forward and returns the consumed token.
    ///
    /// The cursor sticks on the final `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::Eof {
            self.current += 1;
        }
        token
    }

    /// Consumes the current token if it is of `kind`.
    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Compares the current token's kind to the expectation and consumes it.
    ///
    /// # Errors
    /// An `UNEXPECTED_TOKEN` [`SyntaxError`] carrying the offending token.
    pub fn eat(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        self.config.trace(Trace::Parser, || {
            format!("eat({}) at {}", kind, self.current_token())
        });

        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.name()))
        }
    }

    /// Consumes an identifier and returns its canonical name and position.
    pub fn eat_identifier(&mut self) -> Result<(String, Span), SyntaxError> {
        let token = self.eat(TokenKind::Id)?;
        let name = token.text().unwrap_or_default().to_string();
        Ok((name, token.span))
    }

    /// Builds an unexpected-token error at the cursor.
    pub fn unexpected(&self, expected: &str) -> SyntaxError {
        SyntaxError::unexpected(self.current_token().clone(), Some(expected.to_string()))
    }
}

/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     lexer/lexer.rs
 * Purpose:  Cursor-based scanner turning program text into tokens
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

use crate::config::{Config, Trace};
use crate::error::LexError;
use crate::lexer::keywords::keyword;
use crate::lexer::token::{Token, TokenKind, TokenValue};
use crate::span::Span;

/// Cursor-based scanner over a program text.
///
/// The lexer is a pure function of the input and its cursor: lexing the same
/// text twice always yields the same token sequence.
pub struct Lexer<'a> {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
    config: &'a Config,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer positioned at line 1, column 1 of `source`.
    pub fn new(source: &str, config: &'a Config) -> Self {
        config.trace(Trace::Lexer, || format!("Lexer::new() over {} chars", source.len()));
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            config,
        }
    }

    /// Scans the whole input, returning every token up to and including the
    /// terminating `Eof`.
    ///
    /// The first lexical error aborts the scan; no partial stream is
    /// returned.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Advances the cursor past the next token and returns it.
    ///
    /// # Behavior
    /// - Skips whitespace and `{ ... }` comments (no nesting)
    /// - Folds identifiers to upper case, then checks the reserved words
    /// - Distinguishes `:=` from `:` with one character of lookahead
    /// - Returns an `Eof` token once the input is exhausted, and keeps
    ///   returning it on further calls
    ///
    /// # Errors
    /// - [`LexError::UnrecognizedCharacter`] when no rule matches
    /// - [`LexError::UnterminatedString`] / [`LexError::UnterminatedComment`]
    ///   when a delimiter is never closed
    /// - [`LexError::IntegerOutOfRange`] / [`LexError::RealOutOfRange`]
    ///   for numeric literals the value types cannot hold
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.config.trace(Trace::Lexer, || format!("next_token() at {}", self.span()));

        let token = loop {
            let Some(ch) = self.peek() else {
                break Token::new(TokenKind::Eof, None, self.span());
            };

            if ch.is_whitespace() {
                self.advance();
                continue;
            }

            if ch == '{' {
                self.skip_comment()?;
                continue;
            }

            if ch.is_alphabetic() {
                break self.identifier();
            }

            if ch.is_ascii_digit() {
                break self.number()?;
            }

            if ch == '\'' {
                break self.string()?;
            }

            if ch == ':' && self.peek_next() == Some('=') {
                let span = self.span();
                self.advance();
                self.advance();
                break Token::new(TokenKind::Assign, Some(TokenValue::Text(":=".into())), span);
            }

            if let Some(kind) = TokenKind::from_char(ch) {
                let span = self.span();
                self.advance();
                break Token::new(kind, Some(TokenValue::Text(ch.to_string())), span);
            }

            return Err(LexError::UnrecognizedCharacter {
                ch,
                span: self.span(),
            });
        };

        self.config.trace(Trace::Token, || token.to_string());
        Ok(token)
    }

    /// Skips a comment delimited by `{ ... }`.
    ///
    /// # Errors
    /// If the comment is not closed before end of input; the error points
    /// at the opening brace.
    fn skip_comment(&mut self) -> Result<(), LexError> {
        let span = self.span();
        self.advance(); // opening brace

        while let Some(ch) = self.advance() {
            if ch == '}' {
                return Ok(());
            }
        }

        Err(LexError::UnterminatedComment { span })
    }

    /// Scans an identifier or reserved word.
    ///
    /// Identifiers are a run of letters and digits starting with a letter;
    /// the canonical form is upper case.
    fn identifier(&mut self) -> Token {
        let span = self.span();
        let mut word = String::new();

        while let Some(ch) = self.peek().filter(|c| c.is_alphanumeric()) {
            word.extend(ch.to_uppercase());
            self.advance();
        }

        let kind = keyword(&word).unwrap_or(TokenKind::Id);
        Token::new(kind, Some(TokenValue::Text(word)), span)
    }

    /// Scans an integer literal, or a real literal when the digits are
    /// followed by `.` and at least one more digit.
    fn number(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        let mut lexeme = self.digits();

        let is_real = self.peek() == Some('.')
            && self.peek_next().is_some_and(|c| c.is_ascii_digit());

        if is_real {
            self.advance(); // consume '.'
            lexeme.push('.');
            lexeme.push_str(&self.digits());

            return match lexeme.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Token::new(
                    TokenKind::RealConst,
                    Some(TokenValue::Real(value)),
                    span,
                )),
                _ => Err(LexError::RealOutOfRange { lexeme, span }),
            };
        }

        match lexeme.parse::<i64>() {
            Ok(value) => Ok(Token::new(
                TokenKind::IntegerConst,
                Some(TokenValue::Integer(value)),
                span,
            )),
            Err(_) => Err(LexError::IntegerOutOfRange { lexeme, span }),
        }
    }

    fn digits(&mut self) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek().filter(|c| c.is_ascii_digit()) {
            out.push(ch);
            self.advance();
        }
        out
    }

    /// Scans a single-quoted string literal. Contents are taken verbatim;
    /// there are no escapes.
    fn string(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        self.advance(); // opening quote

        let mut text = String::new();
        loop {
            match self.advance() {
                Some('\'') => break,
                Some(ch) => text.push(ch),
                None => return Err(LexError::UnterminatedString { span }),
            }
        }

        Ok(Token::new(TokenKind::StringConst, Some(TokenValue::Text(text)), span))
    }

    /// Consumes one character, keeping line and column in step.
    fn advance(&mut self) -> Option<char> {
        let ch = *self.chars.get(self.current)?;
        self.current += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let config = Config::default();
        Lexer::new(source, &config)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            kinds("Program pRoGrAm BEGIN end Div writeLn"),
            vec![
                TokenKind::Program,
                TokenKind::Program,
                TokenKind::Begin,
                TokenKind::End,
                TokenKind::IntegerDiv,
                TokenKind::Writeln,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn identifiers_are_folded_to_upper_case() {
        let config = Config::default();
        let tokens = Lexer::new("alpha Beta2", &config).tokenize().unwrap();
        assert_eq!(tokens[0].text(), Some("ALPHA"));
        assert_eq!(tokens[1].text(), Some("BETA2"));
        assert_eq!(tokens[1].kind, TokenKind::Id);
    }

    #[test]
    fn numbers_split_into_integer_and_real() {
        let config = Config::default();
        let tokens = Lexer::new("42 3.14 7.", &config).tokenize().unwrap();

        assert_eq!(tokens[0].value, Some(TokenValue::Integer(42)));
        assert_eq!(tokens[1].kind, TokenKind::RealConst);
        assert_eq!(tokens[1].value, Some(TokenValue::Real(3.14)));
        // a trailing dot without digits stays punctuation
        assert_eq!(tokens[2].kind, TokenKind::IntegerConst);
        assert_eq!(tokens[3].kind, TokenKind::Dot);
    }

    #[test]
    fn assign_needs_lookahead() {
        assert_eq!(
            kinds("x := y : integer"),
            vec![
                TokenKind::Id,
                TokenKind::Assign,
                TokenKind::Id,
                TokenKind::Colon,
                TokenKind::Integer,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        assert_eq!(
            kinds("{ a comment\n spanning lines } begin {x} end"),
            vec![TokenKind::Begin, TokenKind::End, TokenKind::Eof]
        );
    }

    #[test]
    fn strings_are_verbatim() {
        let config = Config::default();
        let tokens = Lexer::new("'Hello, World {not a comment}'", &config)
            .tokenize()
            .unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringConst);
        assert_eq!(tokens[0].text(), Some("Hello, World {not a comment}"));
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let config = Config::default();
        let tokens = Lexer::new("program P;\n  var x", &config).tokenize().unwrap();

        assert_eq!(tokens[0].span, Span::new(1, 1));
        assert_eq!(tokens[1].span, Span::new(1, 9));
        assert_eq!(tokens[2].span, Span::new(1, 10));
        assert_eq!(tokens[3].span, Span::new(2, 3));
        assert_eq!(tokens[4].span, Span::new(2, 7));
    }

    #[test]
    fn unrecognized_character_is_reported_where_it_stands() {
        let config = Config::default();
        let err = Lexer::new("program P;\nbegin\n   x := 1 # 2\nend.", &config)
            .tokenize()
            .unwrap_err();
        assert_eq!(
            err,
            LexError::UnrecognizedCharacter {
                ch: '#',
                span: Span::new(3, 11),
            }
        );
    }

    #[test]
    fn unterminated_delimiters_fail() {
        let config = Config::default();
        assert_eq!(
            Lexer::new("  'abc", &config).tokenize().unwrap_err(),
            LexError::UnterminatedString { span: Span::new(1, 3) }
        );
        assert_eq!(
            Lexer::new("begin { never closed", &config).tokenize().unwrap_err(),
            LexError::UnterminatedComment { span: Span::new(1, 7) }
        );
    }

    #[test]
    fn oversized_integer_literal_fails() {
        let config = Config::default();
        let err = Lexer::new("99999999999999999999", &config).tokenize().unwrap_err();
        assert!(matches!(err, LexError::IntegerOutOfRange { .. }));
    }

    #[test]
    fn oversized_real_literal_fails() {
        let config = Config::default();
        let source = format!("x := {}.5", "9".repeat(400));
        let err = Lexer::new(&source, &config).tokenize().unwrap_err();
        assert!(matches!(err, LexError::RealOutOfRange { .. }));
        assert_eq!(err.span(), Span::new(1, 6));
    }

    #[test]
    fn relexing_is_deterministic() {
        let config = Config::default();
        let source = "program P; var a, b : real; begin a := 1.5 / (b - 2) end.";
        let first = Lexer::new(source, &config).tokenize().unwrap();
        let second = Lexer::new(source, &config).tokenize().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn eof_repeats_after_exhaustion() {
        let config = Config::default();
        let mut lexer = Lexer::new("end", &config);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::End);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }
}

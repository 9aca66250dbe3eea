/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     parser/expressions.rs
 * Purpose:  Expression grammar: expr / term / factor with left associativity
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

use crate::ast::{BinOp, Expr, UnaryOp};
use crate::config::Trace;
use crate::error::SyntaxError;
use crate::lexer::token::{TokenKind, TokenValue};
use crate::parser::parser::Parser;

impl<'a> Parser<'a> {
    /// Entry point for all expression parsing.
    ///
    /// Precedence, lowest first:
    ///
    /// ```text
    /// expr   : term ((PLUS | MINUS) term)*
    /// term   : factor ((MUL | INTEGER_DIV | FLOAT_DIV) factor)*
    /// factor : (PLUS | MINUS) factor
    ///        | INTEGER_CONST | REAL_CONST | STRING_CONST
    ///        | LPAREN expr RPAREN
    ///        | variable
    /// ```
    ///
    /// Binary operators at the same level associate to the left.
    pub fn expr(&mut self) -> Result<Expr, SyntaxError> {
        self.config.trace(Trace::Parser, || "expr()".to_string());

        let mut expr = self.term()?;

        loop {
            let op = match self.current_token().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let span = self.advance().span;
            let right = self.term()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
                span,
            };
        }

        Ok(expr)
    }

    /// Multiplicative level: `*`, `DIV` and `/`.
    pub fn term(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.factor()?;

        loop {
            let op = match self.current_token().kind {
                TokenKind::Mul => BinOp::Mul,
                TokenKind::IntegerDiv => BinOp::IntegerDiv,
                TokenKind::FloatDiv => BinOp::FloatDiv,
                _ => break,
            };
            let span = self.advance().span;
            let right = self.factor()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right: Box::new(right),
                span,
            };
        }

        Ok(expr)
    }

    /// Unary signs, literals, parenthesized expressions and variables.
    pub fn factor(&mut self) -> Result<Expr, SyntaxError> {
        let kind = self.current_token().kind;

        match kind {
            TokenKind::Plus | TokenKind::Minus => self.nested(|p| {
                let span = p.advance().span;
                let op = if kind == TokenKind::Plus {
                    UnaryOp::Plus
                } else {
                    UnaryOp::Minus
                };
                let operand = p.factor()?;

                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                    span,
                })
            }),

            TokenKind::IntegerConst | TokenKind::RealConst | TokenKind::StringConst => {
                let token = self.advance();
                match token.value {
                    Some(TokenValue::Integer(n)) => Ok(Expr::Integer(n)),
                    Some(TokenValue::Real(r)) => Ok(Expr::Real(r)),
                    Some(TokenValue::Text(s)) => Ok(Expr::Str(s)),
                    None => Err(SyntaxError::unexpected(token, Some("literal".to_string()))),
                }
            }

            TokenKind::LParen => self.nested(|p| {
                p.advance();
                let inner = p.expr()?;
                p.eat(TokenKind::RParen)?;
                Ok(inner)
            }),

            TokenKind::Id => Ok(Expr::Variable(self.variable()?)),

            _ => Err(self.unexpected("expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, Stmt};
    use crate::config::Config;
    use crate::error::ErrorCode;
    use crate::lexer::token::TokenKind;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    /// Parses `x := <source>` and returns the right-hand side.
    fn rhs(source: &str) -> Expr {
        let program = format!("program P; var x : real; begin x := {} end.", source);
        let config = Config::default();
        let tokens = tokenize(&program, &config).expect("source should lex");
        let program = parse(tokens, &config).expect("source should parse");

        match program.block.compound.children.into_iter().next() {
            Some(Stmt::Assign(assign)) => assign.value,
            other => panic!("expected an assignment, got {:?}", other),
        }
    }

    /// Fully parenthesized rendering, for comparing tree shapes.
    fn sexpr(expr: &Expr) -> String {
        match expr {
            Expr::Variable(v) => v.name.clone(),
            Expr::Binary {
                left, op, right, ..
            } => format!("({} {} {})", op.symbol(), sexpr(left), sexpr(right)),
            Expr::Unary { op, operand, .. } => format!("({} {})", op.symbol(), sexpr(operand)),
            Expr::Integer(n) => n.to_string(),
            Expr::Real(r) => r.to_string(),
            Expr::Str(s) => format!("'{}'", s),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(sexpr(&rhs("2 + 3 * 4")), "(+ 2 (* 3 4))");
    }

    #[test]
    fn same_level_operators_associate_left() {
        assert_eq!(sexpr(&rhs("10 - 4 - 3")), "(- (- 10 4) 3)");
        assert_eq!(sexpr(&rhs("20 div 3 / 2")), "(/ (DIV 20 3) 2)");
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(sexpr(&rhs("(2 + 3) * 4")), "(* (+ 2 3) 4)");
    }

    #[test]
    fn unary_signs_nest() {
        assert_eq!(sexpr(&rhs("- - + 5")), "(- (- (+ 5)))");
        assert_eq!(sexpr(&rhs("-a * 2")), "(* (- A) 2)");
    }

    #[test]
    fn literals_keep_their_kind() {
        assert_eq!(rhs("3.14"), Expr::Real(3.14));
        assert_eq!(rhs("'Hello'"), Expr::Str("Hello".to_string()));
        assert_eq!(rhs("7"), Expr::Integer(7));
    }

    #[test]
    fn nesting_past_the_limit_is_a_syntax_error() {
        let config = Config::default().with_max_nesting(16);

        // Program block and compound take two levels.
        let within = format!("program P; begin x := {}1{} end.", "(".repeat(14), ")".repeat(14));
        let tokens = tokenize(&within, &config).unwrap();
        assert!(parse(tokens, &config).is_ok());

        let parens = format!("program P; begin x := {}1{} end.", "(".repeat(15), ")".repeat(15));
        let tokens = tokenize(&parens, &config).unwrap();
        let err = parse(tokens, &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::NestingTooDeep);
        assert_eq!(err.token.kind, TokenKind::LParen);
        assert_eq!(err.token.span.column, 23 + 14);

        let signs = format!("program P; begin x := {}1 end.", "-".repeat(5000));
        let tokens = tokenize(&signs, &Config::default()).unwrap();
        let err = parse(tokens, &Config::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NestingTooDeep);
        assert_eq!(err.token.kind, TokenKind::Minus);
    }

    #[test]
    fn dangling_operator_is_a_syntax_error() {
        let config = Config::default();
        let tokens = tokenize("program P; begin x := 1 + end.", &config).unwrap();
        let err = parse(tokens, &config).unwrap_err();

        assert_eq!(err.token.kind, TokenKind::End);
        assert_eq!(err.expected.as_deref(), Some("expression"));
    }
}

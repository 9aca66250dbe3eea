/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     parser/statements.rs
 * Purpose:  Statement-level grammar: compound, assignment, call and write
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

use crate::ast::{Assign, Compound, Expr, ProcedureCall, Stmt, Variable, WriteStatement};
use crate::config::Trace;
use crate::error::SyntaxError;
use crate::lexer::token::TokenKind;
use crate::parser::parser::Parser;

impl<'a> Parser<'a> {
    /// ```text
    /// compound_statement : BEGIN statement_list END
    /// ```
    pub fn compound_statement(&mut self) -> Result<Compound, SyntaxError> {
        self.config
            .trace(Trace::Parser, || "compound_statement()".to_string());

        self.nested(|p| {
            p.eat(TokenKind::Begin)?;
            let children = p.statement_list()?;
            p.eat(TokenKind::End)?;

            Ok(Compound { children })
        })
    }

    /// ```text
    /// statement_list : statement (SEMI statement)*
    /// ```
    ///
    /// Empty statements are kept as `NoOp`, so `begin end` has one child.
    pub fn statement_list(&mut self) -> Result<Vec<Stmt>, SyntaxError> {
        let mut statements = vec![self.statement()?];

        while self.match_kind(TokenKind::Semi) {
            statements.push(self.statement()?);
        }

        Ok(statements)
    }

    /// Parses a single statement.
    ///
    /// This is the **dispatcher** for all statement forms. It inspects the
    /// leading token and routes to the matching rule:
    ///
    /// ```text
    /// statement : compound_statement
    ///           | proccall_statement
    ///           | assignment_statement
    ///           | write_statement
    ///           | empty
    /// ```
    ///
    /// An identifier starts an assignment only when `:=` follows it;
    /// otherwise it names a procedure to call.
    pub fn statement(&mut self) -> Result<Stmt, SyntaxError> {
        match self.current_token().kind {
            TokenKind::Begin => Ok(Stmt::Compound(self.compound_statement()?)),
            TokenKind::Id if self.peek_kind() == TokenKind::Assign => {
                Ok(Stmt::Assign(self.assignment_statement()?))
            }
            TokenKind::Id => Ok(Stmt::Call(self.proccall_statement()?)),
            TokenKind::Write | TokenKind::Writeln => Ok(Stmt::Write(self.write_statement()?)),
            _ => Ok(Stmt::NoOp),
        }
    }

    /// ```text
    /// assignment_statement : variable ASSIGN expr
    /// ```
    pub fn assignment_statement(&mut self) -> Result<Assign, SyntaxError> {
        self.config
            .trace(Trace::Parser, || "assignment_statement()".to_string());

        let target = self.variable()?;
        self.eat(TokenKind::Assign)?;
        let value = self.expr()?;

        Ok(Assign { target, value })
    }

    /// ```text
    /// proccall_statement : ID (LPAREN (expr (COMMA expr)*)? RPAREN)?
    /// ```
    pub fn proccall_statement(&mut self) -> Result<ProcedureCall, SyntaxError> {
        self.config
            .trace(Trace::Parser, || "proccall_statement()".to_string());

        let (name, span) = self.eat_identifier()?;
        let args = self.argument_list()?;

        Ok(ProcedureCall {
            id: self.next_id(),
            name,
            args,
            span,
        })
    }

    /// ```text
    /// write_statement : (WRITE | WRITELN) (LPAREN (expr (COMMA expr)*)? RPAREN)?
    /// ```
    pub fn write_statement(&mut self) -> Result<WriteStatement, SyntaxError> {
        let keyword = self.advance();
        let args = self.argument_list()?;

        Ok(WriteStatement {
            args,
            newline: keyword.kind == TokenKind::Writeln,
            span: keyword.span,
        })
    }

    /// ```text
    /// variable : ID
    /// ```
    pub fn variable(&mut self) -> Result<Variable, SyntaxError> {
        let (name, span) = self.eat_identifier()?;
        Ok(Variable {
            id: self.next_id(),
            name,
            span,
        })
    }

    /// Optional parenthesized, comma separated expressions.
    fn argument_list(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        let mut args = Vec::new();

        if !self.match_kind(TokenKind::LParen) {
            return Ok(args);
        }

        if !self.check(TokenKind::RParen) {
            args.push(self.expr()?);
            while self.match_kind(TokenKind::Comma) {
                args.push(self.expr()?);
            }
        }

        self.eat(TokenKind::RParen)?;
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, Program, Stmt};
    use crate::config::Config;
    use crate::error::SyntaxError;
    use crate::lexer::token::TokenKind;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn try_parse(source: &str) -> Result<Program, SyntaxError> {
        let config = Config::default();
        let tokens = tokenize(source, &config).expect("source should lex");
        parse(tokens, &config)
    }

    fn body(source: &str) -> Vec<Stmt> {
        try_parse(source)
            .expect("source should parse")
            .block
            .compound
            .children
    }

    #[test]
    fn empty_compound_holds_one_noop() {
        assert_eq!(body("program P; begin end."), vec![Stmt::NoOp]);
    }

    #[test]
    fn trailing_semicolon_yields_noop() {
        let stmts = body("program P; var x : integer; begin x := 1; end.");
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[0], Stmt::Assign(_)));
        assert_eq!(stmts[1], Stmt::NoOp);
    }

    #[test]
    fn identifier_without_assign_is_a_call() {
        let stmts = body("program P; begin q; r(1, 2); s() end.");

        let calls: Vec<(&str, usize)> = stmts
            .iter()
            .map(|s| match s {
                Stmt::Call(call) => (call.name.as_str(), call.args.len()),
                other => panic!("expected a call, got {:?}", other),
            })
            .collect();
        assert_eq!(calls, [("Q", 0), ("R", 2), ("S", 0)]);
    }

    #[test]
    fn write_and_writeln_take_optional_arguments() {
        let stmts = body("program P; begin write('a', 1); writeln; writeln() end.");

        let shapes: Vec<(bool, usize)> = stmts
            .iter()
            .map(|s| match s {
                Stmt::Write(w) => (w.newline, w.args.len()),
                other => panic!("expected a write, got {:?}", other),
            })
            .collect();
        assert_eq!(shapes, [(false, 2), (true, 0), (true, 0)]);
    }

    #[test]
    fn nested_compounds_are_preserved() {
        let stmts = body("program P; var x : integer; begin begin x := 'hi' end end.");
        let Stmt::Compound(inner) = &stmts[0] else {
            panic!("expected a nested compound");
        };
        let Stmt::Assign(assign) = &inner.children[0] else {
            panic!("expected an assignment");
        };
        assert_eq!(assign.target.name, "X");
        assert_eq!(assign.value, Expr::Str("hi".to_string()));
    }

    #[test]
    fn resolvable_nodes_get_distinct_ids() {
        let stmts = body("program P; var a, b : integer; begin a := b; q(a) end.");

        let mut ids = Vec::new();
        for stmt in &stmts {
            match stmt {
                Stmt::Assign(assign) => {
                    ids.push(assign.target.id);
                    if let Expr::Variable(v) = &assign.value {
                        ids.push(v.id);
                    }
                }
                Stmt::Call(call) => {
                    ids.push(call.id);
                    if let Expr::Variable(v) = &call.args[0] {
                        ids.push(v.id);
                    }
                }
                _ => {}
            }
        }

        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(ids.len(), 4);
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn missing_semicolon_between_statements_is_reported() {
        let err = try_parse("program P; var x : integer; begin x := 1 x := 2 end.").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Id);
        assert_eq!(err.expected.as_deref(), Some("END"));
    }

    #[test]
    fn tokens_after_final_dot_are_rejected() {
        let err = try_parse("program P; begin end. begin").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Begin);
        assert_eq!(err.expected.as_deref(), Some("EOF"));
    }

    #[test]
    fn missing_dot_points_at_eof() {
        let err = try_parse("program P; begin end").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Eof);
    }
}

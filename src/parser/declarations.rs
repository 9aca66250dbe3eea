/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     parser/declarations.rs
 * Purpose:  Program, block, variable and procedure declaration grammar
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

use std::rc::Rc;

use crate::ast::{Block, Declaration, Param, ProcedureDecl, Program, TypeSpec, VarDecl};
use crate::config::Trace;
use crate::error::SyntaxError;
use crate::lexer::token::TokenKind;
use crate::parser::parser::Parser;
use crate::span::Span;

impl<'a> Parser<'a> {
    /// ```text
    /// program : PROGRAM variable SEMI block DOT
    /// ```
    pub fn program(&mut self) -> Result<Program, SyntaxError> {
        self.config.trace(Trace::Parser, || "program()".to_string());

        let keyword = self.eat(TokenKind::Program)?;
        let (name, _) = self.eat_identifier()?;
        self.eat(TokenKind::Semi)?;
        let block = self.block()?;
        self.eat(TokenKind::Dot)?;

        Ok(Program {
            name,
            block,
            span: keyword.span,
        })
    }

    /// ```text
    /// block : declarations compound_statement
    /// ```
    pub fn block(&mut self) -> Result<Block, SyntaxError> {
        self.nested(|p| {
            let declarations = p.declarations()?;
            let compound = p.compound_statement()?;
            Ok(Block {
                declarations,
                compound,
            })
        })
    }

    /// Parses every declaration section of a block.
    ///
    /// ```text
    /// declarations : (VAR (variable_declaration SEMI)+)*
    ///                procedure_declaration*
    /// ```
    ///
    /// # Returns
    /// Declarations in source order, one `VarDecl` per declared name.
    pub fn declarations(&mut self) -> Result<Vec<Declaration>, SyntaxError> {
        self.config.trace(Trace::Parser, || "declarations()".to_string());

        let mut declarations = Vec::new();

        while self.match_kind(TokenKind::Var) {
            // At least one declaration must follow each VAR.
            loop {
                for decl in self.variable_declaration()? {
                    declarations.push(Declaration::Var(decl));
                }
                self.eat(TokenKind::Semi)?;

                if !self.check(TokenKind::Id) {
                    break;
                }
            }
        }

        while self.check(TokenKind::Procedure) {
            let procedure = self.procedure_declaration()?;
            declarations.push(Declaration::Procedure(procedure));
        }

        Ok(declarations)
    }

    /// ```text
    /// variable_declaration : ID (COMMA ID)* COLON type_spec
    /// ```
    pub fn variable_declaration(&mut self) -> Result<Vec<VarDecl>, SyntaxError> {
        let names = self.identifier_list()?;
        self.eat(TokenKind::Colon)?;
        let type_spec = self.type_spec()?;

        Ok(names
            .into_iter()
            .map(|(name, span)| VarDecl {
                name,
                type_spec: type_spec.clone(),
                span,
            })
            .collect())
    }

    /// ```text
    /// procedure_declaration :
    ///     PROCEDURE ID (LPAREN formal_parameter_list? RPAREN)? SEMI block SEMI
    /// ```
    pub fn procedure_declaration(&mut self) -> Result<ProcedureDecl, SyntaxError> {
        self.config
            .trace(Trace::Parser, || "procedure_declaration()".to_string());

        self.eat(TokenKind::Procedure)?;
        let (name, span) = self.eat_identifier()?;

        let mut params = Vec::new();
        if self.match_kind(TokenKind::LParen) {
            if self.check(TokenKind::Id) {
                params = self.formal_parameter_list()?;
            }
            self.eat(TokenKind::RParen)?;
        }

        self.eat(TokenKind::Semi)?;
        let block = self.block()?;
        self.eat(TokenKind::Semi)?;

        Ok(ProcedureDecl {
            name,
            params,
            block: Rc::new(block),
            span,
        })
    }

    /// ```text
    /// formal_parameter_list : formal_parameters (SEMI formal_parameters)*
    /// formal_parameters     : ID (COMMA ID)* COLON type_spec
    /// ```
    pub fn formal_parameter_list(&mut self) -> Result<Vec<Param>, SyntaxError> {
        let mut params = Vec::new();

        loop {
            let names = self.identifier_list()?;
            self.eat(TokenKind::Colon)?;
            let type_spec = self.type_spec()?;

            params.extend(names.into_iter().map(|(name, span)| Param {
                name,
                type_spec: type_spec.clone(),
                span,
            }));

            if !self.match_kind(TokenKind::Semi) {
                break;
            }
        }

        Ok(params)
    }

    /// ```text
    /// type_spec : INTEGER | REAL | STRING
    /// ```
    pub fn type_spec(&mut self) -> Result<TypeSpec, SyntaxError> {
        match self.current_token().kind {
            TokenKind::Integer | TokenKind::Real | TokenKind::String => {
                let token = self.advance();
                Ok(TypeSpec {
                    name: token.kind.name().to_string(),
                    span: token.span,
                })
            }
            _ => Err(self.unexpected("INTEGER, REAL or STRING")),
        }
    }

    /// `ID (COMMA ID)*`
    fn identifier_list(&mut self) -> Result<Vec<(String, Span)>, SyntaxError> {
        let mut names = vec![self.eat_identifier()?];
        while self.match_kind(TokenKind::Comma) {
            names.push(self.eat_identifier()?);
        }
        Ok(names)
    }
}

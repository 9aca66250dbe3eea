/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     semantic/analyzer.rs
 * Purpose:  Semantic analyzer: scope construction and name resolution
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

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{
    Block, Compound, Declaration, Expr, NodeId, ProcedureCall, ProcedureDecl, Program, Stmt,
    TypeSpec, VarDecl, Variable,
};
use crate::config::{Config, Dump, Trace};
use crate::error::SemanticError;
use crate::semantic::scope::{ScopeId, ScopeTree};
use crate::semantic::symbol::{BuiltinType, ProcedureSymbol, Symbol, VarSymbol};
use crate::span::Span;

/// Where a variable reference lives: the level of the scope that declared
/// it, and its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarBinding {
    pub level: usize,
    pub ty: BuiltinType,
}

/// Everything semantic analysis learned about a program.
///
/// The tree itself is left untouched; facts are keyed by [`NodeId`].
#[derive(Debug, Default)]
pub struct Analysis {
    /// Every scope opened during the walk. Id 0 is the global scope.
    pub scopes: ScopeTree,

    /// Call site → resolved callee.
    pub calls: HashMap<NodeId, Rc<ProcedureSymbol>>,

    /// Variable reference → declaring level and type.
    pub variables: HashMap<NodeId, VarBinding>,
}

impl Analysis {
    pub fn procedure(&self, id: NodeId) -> Option<&Rc<ProcedureSymbol>> {
        self.calls.get(&id)
    }

    pub fn variable(&self, id: NodeId) -> Option<VarBinding> {
        self.variables.get(&id).copied()
    }
}

/// Walks a program once, building scopes and resolving every name.
///
/// Errors are collected rather than returned on first sight, so one run
/// reports every undeclared or duplicated name in the program.
pub struct SemanticAnalyzer<'a> {
    config: &'a Config,
    scopes: ScopeTree,
    current: ScopeId,
    calls: HashMap<NodeId, Rc<ProcedureSymbol>>,
    variables: HashMap<NodeId, VarBinding>,
    errors: Vec<SemanticError>,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(config: &'a Config) -> Self {
        let mut scopes = ScopeTree::new();
        let global = scopes.open("global", None);

        for ty in BuiltinType::ALL {
            scopes.get_mut(global).insert(Symbol::Builtin(ty));
        }

        Self {
            config,
            scopes,
            current: global,
            calls: HashMap::new(),
            variables: HashMap::new(),
            errors: Vec::new(),
        }
    }

    /// Analyzes `program`.
    ///
    /// # Returns
    /// - `Ok(Analysis)` when every name resolved
    /// - `Err(errors)` with every problem found, in source order
    pub fn analyze(mut self, program: &Program) -> Result<Analysis, Vec<SemanticError>> {
        self.config.trace(Trace::Analyzer, || {
            format!("ENTER scope: global (program {})", program.name)
        });

        self.visit_block(&program.block);
        self.close_scope();

        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        Ok(Analysis {
            scopes: self.scopes,
            calls: self.calls,
            variables: self.variables,
        })
    }

    /* ----------------------------- */
    /* DECLARATIONS                  */
    /* ----------------------------- */

    fn visit_block(&mut self, block: &Block) {
        for declaration in &block.declarations {
            match declaration {
                Declaration::Var(decl) => self.visit_var_decl(decl),
                Declaration::Procedure(decl) => self.visit_procedure_decl(decl),
            }
        }
        self.visit_compound(&block.compound);
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) {
        self.config
            .trace(Trace::Analyzer, || format!("visit VarDecl {}", decl.name));

        if let Some(ty) = self.resolve_type(&decl.type_spec) {
            self.declare(
                Symbol::Variable(VarSymbol {
                    name: decl.name.clone(),
                    ty,
                }),
                decl.span,
            );
        }
    }

    /// Declares the procedure in the current scope, then analyzes its body
    /// in a fresh child scope holding the parameters.
    ///
    /// The symbol goes in before the body is visited, so the procedure can
    /// call itself.
    fn visit_procedure_decl(&mut self, decl: &ProcedureDecl) {
        self.config
            .trace(Trace::Analyzer, || format!("visit ProcedureDecl {}", decl.name));

        let params: Vec<(VarSymbol, Span)> = decl
            .params
            .iter()
            .filter_map(|param| {
                let ty = self.resolve_type(&param.type_spec)?;
                let symbol = VarSymbol {
                    name: param.name.clone(),
                    ty,
                };
                Some((symbol, param.span))
            })
            .collect();

        let procedure = Rc::new(ProcedureSymbol {
            name: decl.name.clone(),
            params: params.iter().map(|(symbol, _)| symbol.clone()).collect(),
            block: Rc::clone(&decl.block),
            scope_level: self.scopes.get(self.current).level,
        });
        self.declare(Symbol::Procedure(procedure), decl.span);

        let enclosing = self.current;
        self.current = self.scopes.open(decl.name.clone(), Some(enclosing));
        self.config.trace(Trace::Analyzer, || {
            format!(
                "ENTER scope: {} (level {})",
                decl.name,
                self.scopes.get(self.current).level
            )
        });

        for (symbol, span) in params {
            self.declare(Symbol::Variable(symbol), span);
        }

        self.visit_block(&decl.block);
        self.close_scope();
    }

    /// Resolves a type name through the scope chain.
    fn resolve_type(&mut self, type_spec: &TypeSpec) -> Option<BuiltinType> {
        match self.lookup(&type_spec.name) {
            Some((Symbol::Builtin(ty), _)) => Some(ty),
            Some((other, _)) => {
                self.errors.push(SemanticError::WrongSymbolKind {
                    name: type_spec.name.clone(),
                    expected: "type",
                    actual: other.kind(),
                    span: type_spec.span,
                });
                None
            }
            None => {
                self.errors.push(SemanticError::IdNotFound {
                    name: type_spec.name.clone(),
                    span: type_spec.span,
                });
                None
            }
        }
    }

    /* ----------------------------- */
    /* STATEMENTS                    */
    /* ----------------------------- */

    fn visit_compound(&mut self, compound: &Compound) {
        for stmt in &compound.children {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Compound(compound) => self.visit_compound(compound),
            Stmt::Assign(assign) => {
                self.visit_expr(&assign.value);
                self.visit_variable(&assign.target);
            }
            Stmt::Call(call) => self.visit_call(call),
            Stmt::Write(write) => {
                for arg in &write.args {
                    self.visit_expr(arg);
                }
            }
            Stmt::NoOp => {}
        }
    }

    fn visit_call(&mut self, call: &ProcedureCall) {
        for arg in &call.args {
            self.visit_expr(arg);
        }

        match self.lookup(&call.name) {
            Some((Symbol::Procedure(procedure), _)) => {
                if procedure.params.len() != call.args.len() {
                    self.errors.push(SemanticError::WrongParamsNum {
                        name: call.name.clone(),
                        expected: procedure.params.len(),
                        found: call.args.len(),
                        span: call.span,
                    });
                }
                self.calls.insert(call.id, procedure);
            }
            Some((other, _)) => self.errors.push(SemanticError::WrongSymbolKind {
                name: call.name.clone(),
                expected: "procedure",
                actual: other.kind(),
                span: call.span,
            }),
            None => self.errors.push(SemanticError::IdNotFound {
                name: call.name.clone(),
                span: call.span,
            }),
        }
    }

    /* ----------------------------- */
    /* EXPRESSIONS                   */
    /* ----------------------------- */

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Variable(var) => self.visit_variable(var),
            Expr::Binary { left, right, .. } => {
                self.visit_expr(left);
                self.visit_expr(right);
            }
            Expr::Unary { operand, .. } => self.visit_expr(operand),
            Expr::Integer(_) | Expr::Real(_) | Expr::Str(_) => {}
        }
    }

    fn visit_variable(&mut self, var: &Variable) {
        match self.lookup(&var.name) {
            Some((Symbol::Variable(symbol), level)) => {
                self.variables.insert(
                    var.id,
                    VarBinding {
                        level,
                        ty: symbol.ty,
                    },
                );
            }
            Some((other, _)) => self.errors.push(SemanticError::WrongSymbolKind {
                name: var.name.clone(),
                expected: "variable",
                actual: other.kind(),
                span: var.span,
            }),
            None => self.errors.push(SemanticError::IdNotFound {
                name: var.name.clone(),
                span: var.span,
            }),
        }
    }

    /* ----------------------------- */
    /* SCOPE HELPERS                 */
    /* ----------------------------- */

    /// Inserts into the current scope, recording `DUPLICATE_ID` on a clash.
    fn declare(&mut self, symbol: Symbol, span: Span) {
        self.config
            .trace(Trace::SymbolTable, || format!("Insert({})", symbol));

        let name = symbol.name().to_string();
        if !self.scopes.get_mut(self.current).insert(symbol) {
            self.errors.push(SemanticError::DuplicateId { name, span });
        }
    }

    /// Looks `name` up from the current scope outwards.
    ///
    /// # Returns
    /// The symbol and the level of the scope that declared it.
    fn lookup(&self, name: &str) -> Option<(Symbol, usize)> {
        self.config.trace(Trace::SymbolTable, || {
            format!(
                "Lookup: {}. (Scope name: {})",
                name,
                self.scopes.get(self.current).name
            )
        });

        self.scopes
            .lookup(self.current, name)
            .map(|(symbol, owner)| (symbol.clone(), owner.level))
    }

    fn close_scope(&mut self) {
        let closing = self.current;

        self.config
            .dump(Dump::Symbols, || self.scopes.render(closing));
        self.config.trace(Trace::Analyzer, || {
            format!("LEAVE scope: {}", self.scopes.get(closing).name)
        });

        if let Some(enclosing) = self.scopes.get(closing).enclosing {
            self.current = enclosing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn analyze_source(source: &str) -> Result<Analysis, Vec<SemanticError>> {
        let config = Config::default();
        let tokens = tokenize(source, &config).expect("source should lex");
        let program = parse(tokens, &config).expect("source should parse");
        SemanticAnalyzer::new(&config).analyze(&program)
    }

    fn codes(errors: &[SemanticError]) -> Vec<(ErrorCode, String)> {
        errors
            .iter()
            .map(|e| (e.code(), e.name().to_string()))
            .collect()
    }

    #[test]
    fn global_scope_starts_with_builtins_only() {
        let analysis = analyze_source("program P; begin end.").unwrap();
        let global = analysis.scopes.get(0);

        assert_eq!(global.level, 1);
        let names: Vec<&str> = global.symbols().map(|s| s.name()).collect();
        assert_eq!(names, ["INTEGER", "REAL", "STRING"]);
    }

    #[test]
    fn duplicate_in_same_block_is_reported_once() {
        let errors = analyze_source(
            "program P; var y : integer; var y : integer; begin end.",
        )
        .unwrap_err();

        assert_eq!(codes(&errors), [(ErrorCode::DuplicateId, "Y".to_string())]);
    }

    #[test]
    fn shadowing_an_outer_name_is_allowed() {
        let analysis = analyze_source(
            "program P; var x : integer; \
             procedure Q; var x : real; begin x := 1.5 end; \
             begin x := 1 end.",
        )
        .unwrap();

        let levels: Vec<usize> = {
            let mut levels: Vec<usize> = analysis.variables.values().map(|b| b.level).collect();
            levels.sort_unstable();
            levels
        };
        assert_eq!(levels, [1, 2]);
    }

    #[test]
    fn procedure_locals_are_invisible_to_siblings_and_globals() {
        let errors = analyze_source(
            "program P; \
             procedure A; var secret : integer; begin secret := 1 end; \
             procedure B; begin secret := 2 end; \
             begin secret := 3 end.",
        )
        .unwrap_err();

        assert_eq!(
            codes(&errors),
            [
                (ErrorCode::IdNotFound, "SECRET".to_string()),
                (ErrorCode::IdNotFound, "SECRET".to_string()),
            ]
        );
    }

    #[test]
    fn nested_procedures_see_enclosing_locals() {
        let analysis = analyze_source(
            "program P; \
             procedure A; var v : integer; \
               procedure B; begin v := 7 end; \
             begin B end; \
             begin A end.",
        )
        .unwrap();

        let binding = analysis.variables.values().next().copied().unwrap();
        assert_eq!(binding, VarBinding { level: 2, ty: BuiltinType::Integer });
    }

    #[test]
    fn procedures_run_one_level_below_their_declaration() {
        let analysis = analyze_source(
            "program P; procedure Q(a : integer; b : real); begin end; begin Q(1, 2) end.",
        )
        .unwrap();

        let q = analysis.calls.values().next().unwrap();
        assert_eq!(q.scope_level, 1);
        let params: Vec<(&str, BuiltinType)> =
            q.params.iter().map(|p| (p.name.as_str(), p.ty)).collect();
        assert_eq!(params, [("A", BuiltinType::Integer), ("B", BuiltinType::Real)]);

        let scope = analysis.scopes.iter().find(|s| s.name == "Q").unwrap();
        assert_eq!(scope.level, 2);
    }

    #[test]
    fn recursive_calls_resolve() {
        let analysis =
            analyze_source("program P; procedure R; begin R end; begin R end.").unwrap();
        assert_eq!(analysis.calls.len(), 2);
    }

    #[test]
    fn collects_every_error_in_source_order() {
        let errors = analyze_source(
            "program P; var a : integer; var a : real; \
             begin b := c; Q end.",
        )
        .unwrap_err();

        // The right-hand side is visited before the target.
        assert_eq!(
            codes(&errors),
            [
                (ErrorCode::DuplicateId, "A".to_string()),
                (ErrorCode::IdNotFound, "C".to_string()),
                (ErrorCode::IdNotFound, "B".to_string()),
                (ErrorCode::IdNotFound, "Q".to_string()),
            ]
        );
    }

    #[test]
    fn argument_count_must_match() {
        let errors = analyze_source(
            "program P; procedure Q(a : integer); begin end; begin Q(1, 2) end.",
        )
        .unwrap_err();

        assert!(matches!(
            errors.as_slice(),
            [SemanticError::WrongParamsNum { expected: 1, found: 2, .. }]
        ));
    }

    #[test]
    fn variables_and_procedures_are_not_interchangeable() {
        let errors = analyze_source(
            "program P; var x : integer; procedure Q; begin end; begin x; x := Q end.",
        )
        .unwrap_err();

        assert_eq!(
            codes(&errors),
            [
                (ErrorCode::WrongSymbolKind, "X".to_string()),
                (ErrorCode::WrongSymbolKind, "Q".to_string()),
            ]
        );
    }

    #[test]
    fn duplicate_parameters_are_rejected() {
        let errors = analyze_source(
            "program P; procedure Q(a, a : integer); begin end; begin end.",
        )
        .unwrap_err();
        assert_eq!(codes(&errors), [(ErrorCode::DuplicateId, "A".to_string())]);
    }
}

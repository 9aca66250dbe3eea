/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     source_to_source.rs
 * Purpose:  Scope-annotated source re-emitter
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

//! Re-emits an analyzed program as source text with its scoping made
//! visible.
//!
//! Every declared name carries the level of the scope it was declared in
//! and every variable reference is shown with the level and type it
//! resolved to:
//!
//! ```text
//! program P0;
//!    var X1 : INTEGER;
//!    procedure Q1(A2 : INTEGER);
//!
//!    begin
//!       <X1:INTEGER> := <A2:INTEGER>;
//!    end; {END OF Q}
//!
//! begin
//!    Q1(5);
//! end. {END OF P}
//! ```

use crate::ast::{Block, Compound, Declaration, Expr, ProcedureDecl, Program, Stmt};
use crate::semantic::Analysis;

const INDENT: &str = "   ";

/// Renders `program` using the resolutions in `analysis`.
pub fn compile(program: &Program, analysis: &Analysis) -> String {
    let mut emitter = Emitter {
        analysis,
        out: String::new(),
    };

    emitter.line(0, &format!("program {}0;", program.name));
    emitter.block(&program.block, 1);
    emitter.line(0, &format!("end. {{END OF {}}}", program.name));
    emitter.out
}

struct Emitter<'a> {
    analysis: &'a Analysis,
    out: String,
}

impl Emitter<'_> {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Emits declarations at `level`, then the body up to (not including)
    /// its closing `end`.
    fn block(&mut self, block: &Block, level: usize) {
        for declaration in &block.declarations {
            match declaration {
                Declaration::Var(decl) => self.line(
                    level,
                    &format!("var {}{} : {};", decl.name, level, decl.type_spec.name),
                ),
                Declaration::Procedure(decl) => self.procedure(decl, level),
            }
        }

        self.out.push('\n');
        self.line(level - 1, "begin");
        self.statements(&block.compound, level);
    }

    fn procedure(&mut self, decl: &ProcedureDecl, level: usize) {
        let inner = level + 1;
        let params: Vec<String> = decl
            .params
            .iter()
            .map(|p| format!("{}{} : {}", p.name, inner, p.type_spec.name))
            .collect();

        let header = if params.is_empty() {
            format!("procedure {}{};", decl.name, level)
        } else {
            format!("procedure {}{}({});", decl.name, level, params.join("; "))
        };
        self.line(level, &header);

        self.block(&decl.block, inner);
        self.line(level, &format!("end; {{END OF {}}}", decl.name));
    }

    fn statements(&mut self, compound: &Compound, depth: usize) {
        for stmt in &compound.children {
            self.statement(stmt, depth);
        }
    }

    fn statement(&mut self, stmt: &Stmt, depth: usize) {
        match stmt {
            Stmt::Compound(compound) => {
                self.line(depth, "begin");
                self.statements(compound, depth + 1);
                self.line(depth, "end;");
            }
            Stmt::Assign(assign) => {
                let value = self.expr(&assign.value);
                let target = self.expr(&Expr::Variable(assign.target.clone()));
                self.line(depth, &format!("{} := {};", target, value));
            }
            Stmt::Call(call) => {
                let level = self
                    .analysis
                    .procedure(call.id)
                    .map(|p| p.scope_level.to_string())
                    .unwrap_or_default();
                let args = self.args(&call.args);
                self.line(depth, &format!("{}{}({});", call.name, level, args));
            }
            Stmt::Write(write) => {
                let keyword = if write.newline { "writeln" } else { "write" };
                let args = self.args(&write.args);
                self.line(depth, &format!("{}({});", keyword, args));
            }
            Stmt::NoOp => {}
        }
    }

    fn args(&self, args: &[Expr]) -> String {
        args.iter()
            .map(|arg| self.expr(arg))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Variable(var) => match self.analysis.variable(var.id) {
                Some(binding) => format!("<{}{}:{}>", var.name, binding.level, binding.ty),
                None => format!("<{}?>", var.name),
            },
            Expr::Binary {
                left, op, right, ..
            } => format!(
                "{} {} {}",
                self.operand(left),
                op.symbol(),
                self.operand(right)
            ),
            Expr::Unary { op, operand, .. } => format!("{}{}", op.symbol(), self.operand(operand)),
            Expr::Integer(n) => n.to_string(),
            Expr::Real(r) => real_literal(*r),
            Expr::Str(s) => format!("'{}'", s),
        }
    }

    /// Nested binary operations are parenthesized so the tree shape
    /// survives re-parsing.
    fn operand(&self, expr: &Expr) -> String {
        match expr {
            Expr::Binary { .. } => format!("({})", self.expr(expr)),
            _ => self.expr(expr),
        }
    }
}

/// `digits '.' digits`, the only real form the lexer reads.
fn real_literal(r: f64) -> String {
    let text = r.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use crate::semantic::analyze;

    fn emit(source: &str) -> String {
        let config = Config::default();
        let tokens = tokenize(source, &config).unwrap();
        let program = parse(tokens, &config).unwrap();
        let analysis = analyze(&program, &config).unwrap();
        compile(&program, &analysis)
    }

    #[test]
    fn annotates_levels_and_types() {
        let text = emit(
            "program Main;
               var x, y : real;
               procedure Alpha(a : integer);
                 var y : integer;
               begin
                 x := a + x + y;
               end;
             begin
               Alpha(2 * 3);
               writeln('done', -x)
             end.",
        );

        let expected = "\
program MAIN0;
   var X1 : REAL;
   var Y1 : REAL;
   procedure ALPHA1(A2 : INTEGER);
      var Y2 : INTEGER;

   begin
      <X1:REAL> := (<A2:INTEGER> + <X1:REAL>) + <Y2:INTEGER>;
   end; {END OF ALPHA}

begin
   ALPHA1(2 * 3);
   writeln('done', -<X1:REAL>);
end. {END OF MAIN}
";
        assert_eq!(text, expected);
    }

    #[test]
    fn keeps_grouping_and_nested_compounds() {
        let text = emit(
            "program P; var a : integer; begin begin a := (1 + 2) * 3 end end.",
        );
        assert!(text.contains("<A1:INTEGER> := (1 + 2) * 3;"));
        assert!(text.contains("   begin\n"));
    }

    #[test]
    fn reals_are_written_in_lexable_form() {
        assert_eq!(real_literal(1e20), "100000000000000000000.0");
        assert_eq!(real_literal(0.0000001), "0.0000001");
        assert_eq!(real_literal(2.5), "2.5");

        let text = emit("program P; var r : real; begin r := 10000000000000000.0 * 0.5 end.");
        assert!(text.contains("<R1:REAL> := 10000000000000000.0 * 0.5;"));
    }
}

/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     ast/display.rs
 * Purpose:  Indented tree rendering of a parsed program
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

use std::fmt;

use crate::ast::{Block, Compound, Declaration, Expr, Program, Stmt};

/// Renders a program as an indented node tree, two spaces per level:
///
/// ```text
/// Program(P)
///   Block
///     VarDecl(X : INTEGER)
///     Compound
///       Assign(X)
///         Integer(1)
/// ```
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program({})", self.name)?;
        write_block(f, &self.block, 1)
    }
}

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("  ")?;
    }
    Ok(())
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    writeln!(f, "Block")?;

    for declaration in &block.declarations {
        match declaration {
            Declaration::Var(decl) => {
                indent(f, depth + 1)?;
                writeln!(f, "VarDecl({} : {})", decl.name, decl.type_spec.name)?;
            }
            Declaration::Procedure(decl) => {
                indent(f, depth + 1)?;
                writeln!(f, "ProcedureDecl({})", decl.name)?;
                for param in &decl.params {
                    indent(f, depth + 2)?;
                    writeln!(f, "Param({} : {})", param.name, param.type_spec.name)?;
                }
                write_block(f, &decl.block, depth + 2)?;
            }
        }
    }

    write_compound(f, &block.compound, depth + 1)
}

fn write_compound(f: &mut fmt::Formatter<'_>, compound: &Compound, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    writeln!(f, "Compound")?;
    for stmt in &compound.children {
        write_stmt(f, stmt, depth + 1)?;
    }
    Ok(())
}

fn write_stmt(f: &mut fmt::Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    match stmt {
        Stmt::Compound(compound) => write_compound(f, compound, depth),
        Stmt::Assign(assign) => {
            indent(f, depth)?;
            writeln!(f, "Assign({})", assign.target.name)?;
            write_expr(f, &assign.value, depth + 1)
        }
        Stmt::Call(call) => {
            indent(f, depth)?;
            writeln!(f, "ProcedureCall({})", call.name)?;
            for arg in &call.args {
                write_expr(f, arg, depth + 1)?;
            }
            Ok(())
        }
        Stmt::Write(write) => {
            indent(f, depth)?;
            let name = if write.newline { "Writeln" } else { "Write" };
            writeln!(f, "{}", name)?;
            for arg in &write.args {
                write_expr(f, arg, depth + 1)?;
            }
            Ok(())
        }
        Stmt::NoOp => {
            indent(f, depth)?;
            writeln!(f, "NoOp")
        }
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    match expr {
        Expr::Variable(var) => writeln!(f, "Var({})", var.name),
        Expr::Binary { left, op, right, .. } => {
            writeln!(f, "BinOp({})", op.symbol())?;
            write_expr(f, left, depth + 1)?;
            write_expr(f, right, depth + 1)
        }
        Expr::Unary { op, operand, .. } => {
            writeln!(f, "UnaryOp({})", op.symbol())?;
            write_expr(f, operand, depth + 1)
        }
        Expr::Integer(n) => writeln!(f, "Integer({})", n),
        Expr::Real(r) => writeln!(f, "Real({})", r),
        Expr::Str(s) => writeln!(f, "Str('{}')", s),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    #[test]
    fn renders_an_indented_tree() {
        let config = Config::default();
        let source = "program P; var x : integer; procedure Q(a : real); begin end; \
                      begin x := -(1 + 2); Q(x); writeln('hi') end.";
        let program = parse(tokenize(source, &config).unwrap(), &config).unwrap();

        let expected = "\
Program(P)
  Block
    VarDecl(X : INTEGER)
    ProcedureDecl(Q)
      Param(A : REAL)
      Block
        Compound
          NoOp
    Compound
      Assign(X)
        UnaryOp(-)
          BinOp(+)
            Integer(1)
            Integer(2)
      ProcedureCall(Q)
        Var(X)
      Writeln
        Str('hi')
";
        assert_eq!(program.to_string(), expected);
    }
}

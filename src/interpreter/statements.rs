/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     interpreter/statements.rs
 * Purpose:  Statement execution: blocks, assignment and write/writeln
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

use std::io::Write;

use crate::ast::{Assign, Block, Compound, Stmt, Variable, WriteStatement};
use crate::config::Trace;
use crate::error::RuntimeError;
use crate::interpreter::value::Value;
use crate::interpreter::Interpreter;

impl<'a, W: Write> Interpreter<'a, W> {
    /// Runs a block's statements.
    ///
    /// Declarations were consumed by semantic analysis and have nothing to
    /// do at runtime.
    pub fn exec_block(&mut self, block: &Block) -> Result<(), RuntimeError> {
        self.exec_compound(&block.compound)
    }

    pub fn exec_compound(&mut self, compound: &Compound) -> Result<(), RuntimeError> {
        for stmt in &compound.children {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    /// Executes a single statement.
    pub fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Compound(compound) => self.exec_compound(compound),
            Stmt::Assign(assign) => self.exec_assign(assign),
            Stmt::Call(call) => self.call_procedure(call),
            Stmt::Write(write) => self.exec_write(write),
            Stmt::NoOp => Ok(()),
        }
    }

    /// Evaluates the right-hand side, then stores it in the frame that owns
    /// the target variable.
    fn exec_assign(&mut self, assign: &Assign) -> Result<(), RuntimeError> {
        let value = self.eval_expr(&assign.value)?;

        self.config.trace(Trace::Interpreter, || {
            format!("{} := {}", assign.target.name, value)
        });

        self.store(&assign.target, value)
    }

    /// Coerces `value` to the variable's declared type and writes it.
    pub(crate) fn store(&mut self, target: &Variable, value: Value) -> Result<(), RuntimeError> {
        let binding = self.binding(target)?;
        let actual = value.type_name();

        let value = value
            .coerce(binding.ty)
            .ok_or_else(|| RuntimeError::IncompatibleAssignment {
                name: target.name.clone(),
                declared: binding.ty.name(),
                actual,
                span: target.span,
            })?;

        let index = self.frame_index(&target.name, binding.level, target.span)?;
        let frame = self
            .call_stack
            .get_mut(index)
            .ok_or_else(|| RuntimeError::MissingFrame {
                name: target.name.clone(),
                level: binding.level,
                span: target.span,
            })?;

        frame.set(target.name.clone(), value);
        Ok(())
    }

    /// Renders every argument, then emits the line in one write.
    fn exec_write(&mut self, write: &WriteStatement) -> Result<(), RuntimeError> {
        let mut line = String::new();

        for arg in &write.args {
            let value = self.eval_expr(arg)?;
            line.push_str(&value.to_string());
        }

        if write.newline {
            line.push('\n');
        }

        self.out.write_all(line.as_bytes())?;
        Ok(())
    }
}

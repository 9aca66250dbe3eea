/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     interpreter/calls.rs
 * Purpose:  Procedure invocation: argument binding and frame management
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

use crate::ast::ProcedureCall;
use crate::config::Trace;
use crate::error::RuntimeError;
use crate::interpreter::call_stack::{ARKind, ActivationRecord};
use crate::interpreter::Interpreter;

impl<'a, W: Write> Interpreter<'a, W> {
    /// Invokes a user procedure.
    ///
    /// This function:
    /// 1. Looks up the callee semantic analysis resolved for this call site
    /// 2. Evaluates every argument in the caller's frame, left to right
    /// 3. Pushes a frame one level below the callee's declaring scope,
    ///    linked to the frame of that scope
    /// 4. Binds arguments to parameters by position
    /// 5. Runs the body and pops the frame, even if the body faulted
    ///
    /// # Errors
    /// - `Unresolved` if analysis never resolved the call site
    /// - `ArgumentCount` if the arity does not match the declaration
    /// - `CallDepthExceeded` past `Config::max_call_depth` live calls
    pub fn call_procedure(&mut self, call: &ProcedureCall) -> Result<(), RuntimeError> {
        let analysis = self.analysis;
        let procedure = analysis
            .procedure(call.id)
            .ok_or_else(|| RuntimeError::Unresolved {
                name: call.name.clone(),
                span: call.span,
            })?;

        if procedure.params.len() != call.args.len() {
            return Err(RuntimeError::ArgumentCount {
                name: procedure.name.clone(),
                expected: procedure.params.len(),
                found: call.args.len(),
                span: call.span,
            });
        }

        // The program frame does not count towards the limit.
        let limit = self.config.max_call_depth;
        if self.call_stack.len() > limit {
            return Err(RuntimeError::CallDepthExceeded {
                name: procedure.name.clone(),
                limit,
                span: call.span,
            });
        }

        let mut record = ActivationRecord::new(
            procedure.name.clone(),
            ARKind::Procedure,
            procedure.scope_level + 1,
            None,
        );

        for (param, arg) in procedure.params.iter().zip(&call.args) {
            let value = self.eval_expr(arg)?;
            let actual = value.type_name();
            let value = value
                .coerce(param.ty)
                .ok_or_else(|| RuntimeError::IncompatibleAssignment {
                    name: param.name.clone(),
                    declared: param.ty.name(),
                    actual,
                    span: call.span,
                })?;
            record.set(param.name.clone(), value);
        }

        record.access_link =
            Some(self.frame_index(&procedure.name, procedure.scope_level, call.span)?);

        self.config.trace(Trace::Interpreter, || {
            format!("ENTER: PROCEDURE {}", procedure.name)
        });
        self.call_stack.push(record);
        self.dump_stack("ENTER", &procedure.name);

        let result = self.exec_block(&procedure.block);

        self.dump_stack("LEAVE", &procedure.name);
        self.call_stack.pop();
        self.config.trace(Trace::Interpreter, || {
            format!("LEAVE: PROCEDURE {}", procedure.name)
        });

        result
    }
}

/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     interpreter/mod.rs
 * Purpose:  Root module for the SPI tree-walking interpreter
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

pub mod call_stack;
pub mod calls;
pub mod expressions;
pub mod statements;
pub mod value;

use std::io::Write;

use crate::ast::Program;
use crate::config::{Config, Dump, Trace};
use crate::error::RuntimeError;
use crate::semantic::Analysis;

pub use call_stack::{ARKind, ActivationRecord, CallStack};
pub use value::Value;

/// Tree-walking evaluator over an analyzed program.
///
/// Every name was resolved ahead of time; at runtime a variable is found by
/// its declaring scope level, walking the access links of the call stack.
///
/// Output from `write`/`writeln` goes to `out`.
pub struct Interpreter<'a, W: Write> {
    pub(crate) analysis: &'a Analysis,
    pub(crate) config: &'a Config,
    pub(crate) out: W,
    pub(crate) call_stack: CallStack,
}

impl<'a, W: Write> Interpreter<'a, W> {
    pub fn new(analysis: &'a Analysis, config: &'a Config, out: W) -> Self {
        Self {
            analysis,
            config,
            out,
            call_stack: CallStack::new(),
        }
    }

    /// Runs `program` to completion.
    ///
    /// # Returns
    /// The program's activation record as it stood when the program
    /// finished, holding the final values of the global variables.
    ///
    /// # Errors
    /// The first runtime fault. Every frame pushed so far is popped before
    /// the error is returned.
    pub fn interpret(&mut self, program: &Program) -> Result<ActivationRecord, RuntimeError> {
        self.config
            .trace(Trace::Interpreter, || format!("ENTER: PROGRAM {}", program.name));

        self.call_stack.push(ActivationRecord::new(
            program.name.clone(),
            ARKind::Program,
            1,
            None,
        ));
        self.dump_stack("ENTER", &program.name);

        let result = self.exec_block(&program.block);

        self.dump_stack("LEAVE", &program.name);
        let record = self.call_stack.pop();
        result?;

        record.ok_or_else(|| RuntimeError::MissingFrame {
            name: program.name.clone(),
            level: 1,
            span: program.span,
        })
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    pub(crate) fn dump_stack(&self, event: &str, name: &str) {
        self.config.dump(Dump::Stack, || {
            format!("{}: {}\n{}", event, name, self.call_stack)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use crate::semantic::analyze;

    /// Runs `source` and returns the final program frame plus its output.
    fn run(source: &str) -> (Result<ActivationRecord, RuntimeError>, String) {
        run_with(source, &Config::default())
    }

    fn run_with(source: &str, config: &Config) -> (Result<ActivationRecord, RuntimeError>, String) {
        let tokens = tokenize(source, config).expect("source should lex");
        let program = parse(tokens, config).expect("source should parse");
        let analysis = analyze(&program, config).expect("source should analyze");

        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&analysis, config, &mut out);
        let result = interpreter.interpret(&program);
        assert!(interpreter.call_stack().is_empty());

        (result, String::from_utf8(out).expect("output is utf-8"))
    }

    #[test]
    fn evaluates_with_precedence() {
        let (result, _) = run("program P; var x : integer; begin x := 2 + 3 * 4; end.");
        let frame = result.unwrap();

        assert_eq!(frame.name, "P");
        assert_eq!(frame.get("X"), Some(&Value::Integer(14)));
    }

    #[test]
    fn float_and_integer_division_differ() {
        let (real, _) = run("program P; var x : real; begin x := 10 / 4 end.");
        assert_eq!(real.unwrap().get("X"), Some(&Value::Real(2.5)));

        let (int, _) = run("program P; var x : integer; begin x := 10 div 4 end.");
        assert_eq!(int.unwrap().get("X"), Some(&Value::Integer(2)));
    }

    #[test]
    fn procedure_parameters_bind_by_position() {
        let (result, out) = run(
            "program P; procedure Q(a : integer); begin writeln(a); end; begin Q(5); end.",
        );
        result.unwrap();
        assert_eq!(out, "5\n");
    }

    #[test]
    fn nested_procedures_reach_enclosing_frames() {
        let (result, _) = run(
            "program P; var x : integer; procedure Q; begin x := 1; end; begin Q; end.",
        );
        assert_eq!(result.unwrap().get("X"), Some(&Value::Integer(1)));
    }

    #[test]
    fn static_chain_skips_the_dynamic_caller() {
        // B is declared in P, so its N is P's N even when A (which has its
        // own N) is the caller.
        let (result, out) = run(
            "program P; var n : integer; \
             procedure B; begin writeln(n) end; \
             procedure A; var n : integer; begin n := 2; B end; \
             begin n := 1; A end.",
        );
        result.unwrap();
        assert_eq!(out, "1\n");
    }

    #[test]
    fn arguments_are_evaluated_in_the_caller() {
        let (result, out) = run(
            "program P; var a : integer; \
             procedure Q(a : integer); begin writeln(a * 10) end; \
             begin a := 4; Q(a + 1) end.",
        );
        result.unwrap();
        assert_eq!(out, "50\n");
    }

    #[test]
    fn write_has_no_separators() {
        let (result, out) = run(
            "program P; var s : string; \
             begin s := 'ab' + 'cd'; write(s, 1, ' ', 2.5); writeln; writeln('x') end.",
        );
        result.unwrap();
        assert_eq!(out, "abcd1 2.5\nx\n");
    }

    #[test]
    fn globals_persist_across_calls() {
        let (result, out) = run(
            "program P; var n : integer; \
             procedure Down(k : integer); begin write(k); n := n - 1; end; \
             begin n := 3; Down(n); Down(n); Down(n) end.",
        );
        assert_eq!(result.unwrap().get("N"), Some(&Value::Integer(0)));
        assert_eq!(out, "321");
    }

    #[test]
    fn division_by_zero_faults_and_unwinds() {
        let (result, _) = run(
            "program P; var x : integer; \
             procedure Q(d : integer); begin x := 1 div d end; \
             begin Q(0) end.",
        );
        assert!(matches!(result, Err(RuntimeError::DivisionByZero { .. })));
    }

    #[test]
    fn reading_unassigned_variable_faults() {
        let (result, _) = run("program P; var x, y : integer; begin y := x end.");
        assert!(matches!(
            result,
            Err(RuntimeError::Uninitialized { ref name, .. }) if name == "X"
        ));
    }

    #[test]
    fn assignment_respects_declared_types() {
        let (widened, _) = run("program P; var r : real; begin r := 3 end.");
        assert_eq!(widened.unwrap().get("R"), Some(&Value::Real(3.0)));

        let (narrowed, _) = run("program P; var i : integer; begin i := 1.5 end.");
        assert!(matches!(
            narrowed,
            Err(RuntimeError::IncompatibleAssignment { declared: "INTEGER", actual: "REAL", .. })
        ));
    }

    #[test]
    fn unbounded_recursion_hits_the_depth_limit() {
        let config = Config::default().with_max_call_depth(16);
        let (result, _) = run_with("program P; procedure R; begin R end; begin R end.", &config);

        assert!(matches!(
            result,
            Err(RuntimeError::CallDepthExceeded { limit: 16, .. })
        ));
    }
}

/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     lib.rs
 * Purpose:  Library root: module wiring and the tokenize / parse / analyze / run
 *           pipeline entry points
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

//! SPI - a simple Pascal interpreter.
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → SemanticAnalyzer → Interpreter
//! ```
//!
//! Each stage is usable on its own; [`run`] chains them, stopping early
//! according to [`Config::run_level`](config::Config::run_level).
//!
//! ```
//! use spi::config::Config;
//!
//! let mut out = Vec::new();
//! let outcome = spi::run(
//!     "program Hello; var x : integer; begin x := 6 * 7; writeln('x = ', x) end.",
//!     &Config::default(),
//!     &mut out,
//! )
//! .unwrap();
//!
//! assert_eq!(String::from_utf8(out).unwrap(), "x = 42\n");
//! let globals = outcome.globals.unwrap();
//! assert_eq!(globals.get("X"), Some(&spi::interpreter::Value::Integer(42)));
//! ```

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod source_to_source;
pub mod span;

use std::io::Write;

use crate::ast::Program;
use crate::config::{Config, Dump, RunLevel};
use crate::interpreter::{ActivationRecord, Interpreter};
use crate::lexer::Token;
use crate::semantic::Analysis;

pub use crate::error::{Error, Result};

/// What a pipeline run produced, up to the stage it stopped at.
#[derive(Debug)]
pub struct Outcome {
    pub program: Program,

    /// Present from [`RunLevel::Analyze`] on.
    pub analysis: Option<Analysis>,

    /// The program's frame after the last statement ran. Present only for
    /// [`RunLevel::Interpret`].
    pub globals: Option<ActivationRecord>,
}

/// Splits `source` into tokens, ending with `EOF`.
pub fn tokenize(source: &str, config: &Config) -> Result<Vec<Token>> {
    config.dump(Dump::Text, || source.to_string());
    Ok(lexer::tokenize(source, config)?)
}

/// Lexes and parses `source`.
pub fn parse(source: &str, config: &Config) -> Result<Program> {
    let tokens = tokenize(source, config)?;
    let program = parser::parse(tokens, config)?;

    config.dump(Dump::Ast, || program.to_string());
    Ok(program)
}

/// Resolves every name in `program`.
///
/// # Errors
/// [`Error::Semantic`] carrying every problem found, never an empty list.
pub fn analyze(program: &Program, config: &Config) -> Result<Analysis> {
    semantic::analyze(program, config).map_err(Error::Semantic)
}

/// Runs the pipeline over `source`, writing program output to `out`.
///
/// Interpretation is refused if semantic analysis reported anything.
pub fn run<W: Write + ?Sized>(source: &str, config: &Config, out: &mut W) -> Result<Outcome> {
    let program = parse(source, config)?;
    if config.run_level == RunLevel::Parse {
        return Ok(Outcome {
            program,
            analysis: None,
            globals: None,
        });
    }

    let analysis = analyze(&program, config)?;
    if config.run_level == RunLevel::Analyze {
        return Ok(Outcome {
            program,
            analysis: Some(analysis),
            globals: None,
        });
    }

    let globals = Interpreter::new(&analysis, config, out).interpret(&program)?;

    Ok(Outcome {
        program,
        analysis: Some(analysis),
        globals: Some(globals),
    })
}

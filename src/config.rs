/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     config.rs
 * Purpose:  Explicit pipeline configuration: trace categories, dumps, run level
 *           and the call depth limit
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

//! Explicit pipeline configuration.
//!
//! Tracing and dump switches live in a plain value that the caller hands to
//! every stage. Nothing in here changes what a program computes; it only
//! decides what gets reported through the `log` facade while it runs.

use clap::ValueEnum;

/// Log target used for all dump output.
pub const DUMP_TARGET: &str = "spi::dump";

/// Default ceiling on live procedure activations.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Default ceiling on nested blocks, compound statements, parentheses and
/// unary signs in the source.
pub const DEFAULT_MAX_NESTING: usize = 200;

/// Trace categories, one per pipeline component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Trace {
    /// Every token as it is produced.
    Token,
    /// Lexer cursor movement and token classification.
    Lexer,
    /// Parser rule entry and token consumption.
    Parser,
    /// Scope entry/exit and name resolution.
    Analyzer,
    /// Symbol insertion and lookup.
    SymbolTable,
    /// Node evaluation and frame traffic.
    Interpreter,
}

impl Trace {
    /// The `log` target this category is reported under.
    pub fn target(self) -> &'static str {
        match self {
            Trace::Token => "spi::token",
            Trace::Lexer => "spi::lexer",
            Trace::Parser => "spi::parser",
            Trace::Analyzer => "spi::analyzer",
            Trace::SymbolTable => "spi::symtab",
            Trace::Interpreter => "spi::interpreter",
        }
    }
}

/// Structured dumps emitted at `info` level on [`DUMP_TARGET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Dump {
    /// The program text before lexing.
    Text,
    /// The parsed tree.
    Ast,
    /// Each symbol table as its scope closes.
    Symbols,
    /// The call stack on every frame entry and exit.
    Stack,
}

/// How far the pipeline runs before stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, ValueEnum)]
pub enum RunLevel {
    /// Lex and parse only.
    Parse,
    /// Lex, parse and run semantic analysis.
    Analyze,
    /// Run the whole pipeline.
    #[default]
    Interpret,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub trace: Vec<Trace>,
    pub dump: Vec<Dump>,
    pub run_level: RunLevel,
    pub max_call_depth: usize,
    pub max_nesting: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace: Vec::new(),
            dump: Vec::new(),
            run_level: RunLevel::default(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

impl Config {
    pub fn with_trace(mut self, category: Trace) -> Self {
        if !self.trace.contains(&category) {
            self.trace.push(category);
        }
        self
    }

    pub fn with_dump(mut self, kind: Dump) -> Self {
        if !self.dump.contains(&kind) {
            self.dump.push(kind);
        }
        self
    }

    pub fn with_run_level(mut self, run_level: RunLevel) -> Self {
        self.run_level = run_level;
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_max_nesting(mut self, depth: usize) -> Self {
        self.max_nesting = depth;
        self
    }

    pub fn traces(&self, category: Trace) -> bool {
        self.trace.contains(&category)
    }

    pub fn dumps(&self, kind: Dump) -> bool {
        self.dump.contains(&kind)
    }

    /// Reports `message` under `category` if that category is switched on.
    ///
    /// The message is built lazily so disabled categories cost nothing.
    pub fn trace<F>(&self, category: Trace, message: F)
    where
        F: FnOnce() -> String,
    {
        if self.traces(category) {
            log::trace!(target: category.target(), "{}", message());
        }
    }

    /// Emits a dump block if `kind` is switched on.
    pub fn dump<F>(&self, kind: Dump, render: F)
    where
        F: FnOnce() -> String,
    {
        if self.dumps(kind) {
            log::info!(target: DUMP_TARGET, "{}", render());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_do_not_duplicate_categories() {
        let config = Config::default()
            .with_trace(Trace::Lexer)
            .with_trace(Trace::Lexer)
            .with_dump(Dump::Stack);

        assert_eq!(config.trace, vec![Trace::Lexer]);
        assert!(config.dumps(Dump::Stack));
        assert!(!config.traces(Trace::Parser));
    }

    #[test]
    fn disabled_category_never_builds_its_message() {
        let config = Config::default();
        config.trace(Trace::Interpreter, || panic!("message built for a disabled category"));
    }

    #[test]
    fn default_runs_the_whole_pipeline() {
        let config = Config::default();
        assert_eq!(config.run_level, RunLevel::Interpret);
        assert_eq!(config.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
    }
}

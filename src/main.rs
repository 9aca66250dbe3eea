/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     main.rs
 * Purpose:  Command-line driver and line-buffered REPL for SPI programs
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

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use log::LevelFilter;

use spi::config::{Config, Dump, RunLevel, Trace, DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_NESTING, DUMP_TARGET};
use spi::diagnostics::DiagnosticPrinter;
use spi::error::Error;
use spi::source_to_source;

/// Bad input: lexical, syntax or semantic errors.
const EXIT_DATA_ERR: u8 = 65;
/// The input file could not be read.
const EXIT_NO_INPUT: u8 = 66;
/// The program faulted while running.
const EXIT_SOFTWARE: u8 = 70;
/// Reading the REPL's stdin failed.
const EXIT_IO_ERR: u8 = 74;

/// SPI - Simple Pascal Interpreter.
///
/// Runs FILE, or starts a REPL when no file is given. In the REPL, enter a
/// program over several lines and finish it with an empty line; an empty
/// program quits.
#[derive(Parser, Debug)]
#[command(name = "spi", version, about, long_about = None)]
struct Args {
    /// Program to run.
    file: Option<PathBuf>,

    /// Trace categories to log at `trace` level.
    #[arg(long, value_enum, value_delimiter = ',')]
    trace: Vec<Trace>,

    /// Dumps to log at `info` level.
    #[arg(long, value_enum, value_delimiter = ',')]
    dump: Vec<Dump>,

    /// Stop after this stage.
    #[arg(long, value_enum)]
    run_level: Option<RunLevel>,

    /// Maximum number of live procedure calls.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Maximum nesting of blocks, statements and expressions.
    #[arg(long, default_value_t = DEFAULT_MAX_NESTING)]
    max_nesting: usize,

    /// Report diagnostics as JSON lines on stderr.
    #[arg(long)]
    json: bool,

    /// Print the token stream as JSON lines and stop.
    #[arg(long)]
    tokens: bool,

    /// Print the scope-annotated source after analysis and stop.
    #[arg(long)]
    emit_source: bool,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::default()
            .with_run_level(self.run_level.unwrap_or_default())
            .with_max_call_depth(self.max_depth)
            .with_max_nesting(self.max_nesting);

        for category in &self.trace {
            config = config.with_trace(*category);
        }
        for kind in &self.dump {
            config = config.with_dump(*kind);
        }

        config
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = args.config();

    init_logging(&config);

    match &args.file {
        Some(path) => run_file(path, &args, &config),
        None => repl(&args, &config),
    }
}

/// Routes trace and dump output to stderr for the enabled categories only.
///
/// `SPI_LOG` may widen the filter further using the usual `env_logger`
/// syntax.
fn init_logging(config: &Config) {
    let mut builder = env_logger::Builder::new();

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Warn)
        .target(env_logger::Target::Stderr);

    for category in &config.trace {
        builder.filter_module(category.target(), LevelFilter::Trace);
    }
    if !config.dump.is_empty() {
        builder.filter_module(DUMP_TARGET, LevelFilter::Info);
    }

    builder.parse_env("SPI_LOG");
    let _ = builder.try_init();
}

fn run_file(path: &PathBuf, args: &Args, config: &Config) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("spi: cannot read '{}': {}", path.display(), err);
            return ExitCode::from(EXIT_NO_INPUT);
        }
    };

    let name = path.display().to_string();
    match execute(&source, args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error, &name, &source, args.json);
            exit_code(&error)
        }
    }
}

/// Runs one program text in the mode the flags select.
fn execute(source: &str, args: &Args, config: &Config) -> Result<(), Error> {
    if args.tokens {
        for token in spi::tokenize(source, config)? {
            match serde_json::to_string(&token) {
                Ok(line) => println!("{}", line),
                Err(err) => log::warn!("cannot serialize {}: {}", token, err),
            }
        }
        return Ok(());
    }

    if args.emit_source {
        let program = spi::parse(source, config)?;
        let analysis = spi::analyze(&program, config)?;
        print!("{}", source_to_source::compile(&program, &analysis));
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = spi::run(source, config, &mut out);
    out.flush().map_err(spi::error::RuntimeError::from)?;
    result.map(|_| ())
}

fn report(error: &Error, name: &str, source: &str, json: bool) {
    if !json {
        DiagnosticPrinter::new(name, source).print(error);
        return;
    }

    for diagnostic in error.diagnostics() {
        match serde_json::to_string(&diagnostic) {
            Ok(line) => eprintln!("{}", line),
            Err(err) => eprintln!("spi: cannot serialize diagnostic: {}", err),
        }
    }
}

fn exit_code(error: &Error) -> ExitCode {
    match error {
        Error::Runtime(_) => ExitCode::from(EXIT_SOFTWARE),
        Error::Lex(_) | Error::Syntax(_) | Error::Semantic(_) => ExitCode::from(EXIT_DATA_ERR),
    }
}

/// Reads programs line by line until an empty line, runs each, and quits
/// on an empty program or end of input.
fn repl(args: &Args, config: &Config) -> ExitCode {
    println!("SPI - Simple Pascal Interpreter");
    println!("Finish a program with an empty line. An empty program quits.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let mut buffer = String::new();
        let mut at_eof = false;
        prompt("spi> ");

        loop {
            match lines.next() {
                Some(Ok(line)) if line.trim().is_empty() => break,
                Some(Ok(line)) => {
                    buffer.push_str(&line);
                    buffer.push('\n');
                    prompt("...> ");
                }
                Some(Err(err)) => {
                    eprintln!("spi: cannot read input: {}", err);
                    return ExitCode::from(EXIT_IO_ERR);
                }
                None => {
                    at_eof = true;
                    break;
                }
            }
        }

        if buffer.trim().is_empty() {
            println!();
            return ExitCode::SUCCESS;
        }

        if let Err(error) = execute(&buffer, args, config) {
            report(&error, "<repl>", &buffer, args.json);
        }

        if at_eof {
            return ExitCode::SUCCESS;
        }
    }
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}

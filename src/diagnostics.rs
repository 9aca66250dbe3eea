/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     diagnostics.rs
 * Purpose:  Structured diagnostics and the compiler-style diagnostic printer
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

use crate::error::{Error, ErrorCode, LexError, RuntimeError, SemanticError, SyntaxError};
use crate::span::Span;
use serde::Serialize;
use std::fmt::Write as _;

/// Which stage produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Semantic,
    Runtime,
}

/// One structured error report: `{kind, code, message, span, token}`.
///
/// This is the stable, serializable face of [`Error`]; the CLI prints it
/// either through [`DiagnosticPrinter`] or as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    /// Stable error code (`UNEXPECTED_TOKEN`, `DUPLICATE_ID`, …)
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Primary source location, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,

    /// The offending token, rendered, for syntax errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl From<&LexError> for Diagnostic {
    fn from(err: &LexError) -> Self {
        Self {
            kind: DiagnosticKind::Lexical,
            code: ErrorCode::LexerError,
            message: err.to_string(),
            span: Some(err.span()),
            token: None,
        }
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(err: &SyntaxError) -> Self {
        Self {
            kind: DiagnosticKind::Syntax,
            code: err.code,
            message: err.to_string(),
            span: Some(err.token.span),
            token: Some(err.token.to_string()),
        }
    }
}

impl From<&SemanticError> for Diagnostic {
    fn from(err: &SemanticError) -> Self {
        Self {
            kind: DiagnosticKind::Semantic,
            code: err.code(),
            message: err.to_string(),
            span: Some(err.span()),
            token: None,
        }
    }
}

impl From<&RuntimeError> for Diagnostic {
    fn from(err: &RuntimeError) -> Self {
        Self {
            kind: DiagnosticKind::Runtime,
            code: ErrorCode::RuntimeFault,
            message: err.to_string(),
            span: err.span(),
            token: None,
        }
    }
}

impl Error {
    /// Flattens an error into the diagnostics a caller should show.
    ///
    /// Lexical, syntax and runtime failures yield exactly one entry;
    /// a semantic failure yields one entry per recorded problem.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Lex(err) => vec![err.into()],
            Error::Syntax(err) => vec![err.into()],
            Error::Semantic(errors) => errors.iter().map(Diagnostic::from).collect(),
            Error::Runtime(err) => vec![err.into()],
        }
    }
}

/// Renders compiler-style diagnostics for a single source text.
///
/// This printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the exact error position using a caret (`^`)
///
/// # Output Example
/// ```text
/// error[DUPLICATE_ID]: Duplicate id found: 'Y' at 3:9
///   --> demo.pas:3:9
///    |
///   3 |     y : integer;
///    |         ^
/// ```
pub struct DiagnosticPrinter {
    /// Full source code of the program being reported on.
    source: String,

    /// Name of the source (a path, or `<repl>`); display only.
    file_name: String,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Renders one diagnostic into a string.
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "error[{}]: {}", diagnostic.code, diagnostic.message);

        let Some(Span { line, column }) = diagnostic.span else {
            let _ = writeln!(out, "  --> {}", self.file_name);
            return out;
        };

        let _ = writeln!(out, "  --> {}:{}:{}", self.file_name, line, column);

        // Lines are 1-indexed in diagnostics, but vectors are 0-indexed.
        let src_line = self
            .source
            .lines()
            .nth(line.saturating_sub(1))
            .unwrap_or("");

        let _ = writeln!(out, "   |");
        let _ = writeln!(out, "{:>3} | {}", line, src_line);

        let mut underline = " ".repeat(column.saturating_sub(1));
        underline.push('^');
        let _ = writeln!(out, "   | {}", underline);

        out
    }

    /// Prints every diagnostic of `error` to stderr.
    pub fn print(&self, error: &Error) {
        for diagnostic in error.diagnostics() {
            eprint!("{}", self.render(&diagnostic));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_points_at_the_column() {
        let printer = DiagnosticPrinter::new("demo.pas", "program P;\nbegin # end.\n");
        let err = LexError::UnrecognizedCharacter {
            ch: '#',
            span: Span::new(2, 7),
        };
        let rendered = printer.render(&Diagnostic::from(&err));

        assert!(rendered.starts_with("error[LEXER_ERROR]: unrecognized character '#'"));
        assert!(rendered.contains("  --> demo.pas:2:7\n"));
        assert!(rendered.contains("  2 | begin # end.\n"));
        assert!(rendered.contains("   |       ^\n"));
    }

    #[test]
    fn semantic_failure_expands_to_one_diagnostic_per_error() {
        let err = Error::Semantic(vec![
            SemanticError::IdNotFound {
                name: "A".to_string(),
                span: Span::new(1, 1),
            },
            SemanticError::DuplicateId {
                name: "B".to_string(),
                span: Span::new(2, 1),
            },
        ]);
        let codes: Vec<ErrorCode> = err.diagnostics().iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![ErrorCode::IdNotFound, ErrorCode::DuplicateId]);
    }

    #[test]
    fn json_shape_is_stable() {
        let diagnostic = Diagnostic::from(&SemanticError::IdNotFound {
            name: "Z".to_string(),
            span: Span::new(4, 2),
        });
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "semantic");
        assert_eq!(json["code"], "ID_NOT_FOUND");
        assert_eq!(json["span"]["line"], 4);
        assert!(json.get("token").is_none());
    }
}

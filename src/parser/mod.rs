/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     parser/mod.rs
 * Purpose:  Root module for the SPI recursive-descent parser.
 *           
 *           This module wires together all parser sub-modules, including:
 *             - Core parser control logic
 *             - Declaration parsing
 *             - Statement parsing
 *             - Expression parsing
 *             - Shared helper utilities
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

/// Core parser orchestration:
/// - Owns the `Parser` struct
/// - Exposes the main `parse(tokens, config)` entry point
pub mod parser;

/// Program, block, variable and procedure declarations.
pub mod declarations;

/// Statement-level parsing:
/// - compound statements and statement lists
/// - assignment vs. procedure call disambiguation
/// - write / writeln
pub mod statements;

/// Expression-level parsing:
/// - expr → term → factor
pub mod expressions;

/// Shared parser helpers:
/// - token matching
/// - lookahead checks
/// - identifier consumption
pub mod helpers;

/// Re-export the public parse entry point so callers can use:
/// `crate::parser::parse(...)`
pub use parser::{parse, Parser};

/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     interpreter/value.rs
 * Purpose:  Runtime values and their output rendering
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

use crate::semantic::BuiltinType;

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Str(String),
}

impl Value {
    /// The declared type this value naturally belongs to.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => BuiltinType::Integer.name(),
            Value::Real(_) => BuiltinType::Real.name(),
            Value::Str(_) => BuiltinType::String.name(),
        }
    }

    /// Numeric view of the value, widening integers.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Real(r) => Some(*r),
            Value::Str(_) => None,
        }
    }

    /// Converts the value for storage in a variable of type `ty`.
    ///
    /// Integers widen into reals. Every other mismatch yields `None`.
    pub fn coerce(self, ty: BuiltinType) -> Option<Value> {
        match (ty, self) {
            (BuiltinType::Integer, value @ Value::Integer(_)) => Some(value),
            (BuiltinType::Real, Value::Integer(n)) => Some(Value::Real(n as f64)),
            (BuiltinType::Real, value @ Value::Real(_)) => Some(value),
            (BuiltinType::String, value @ Value::Str(_)) => Some(value),
            _ => None,
        }
    }
}

/// Text as produced by `write`/`writeln`.
///
/// Reals use the shortest form that reads back to the same number, so
/// `2.5` prints as `2.5` and `3.0` as `3`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Real(r) => write!(f, "{}", r),
            Value::Str(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_for_output() {
        assert_eq!(Value::Integer(-14).to_string(), "-14");
        assert_eq!(Value::Real(2.5).to_string(), "2.5");
        assert_eq!(Value::Real(3.0).to_string(), "3");
        assert_eq!(Value::Str("it's".to_string()).to_string(), "it's");
    }

    #[test]
    fn integers_widen_into_reals_only() {
        assert_eq!(Value::Integer(2).coerce(BuiltinType::Real), Some(Value::Real(2.0)));
        assert_eq!(Value::Real(2.5).coerce(BuiltinType::Integer), None);
        assert_eq!(Value::Integer(1).coerce(BuiltinType::String), None);
        assert_eq!(
            Value::Str("a".to_string()).coerce(BuiltinType::String),
            Some(Value::Str("a".to_string()))
        );
    }
}

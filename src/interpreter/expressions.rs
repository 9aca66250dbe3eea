/*
 * ==========================================================================
 * SPI - Simple Pascal Interpreter
 * ==========================================================================
 * 
 * File:     interpreter/expressions.rs
 * Purpose:  Expression evaluation and operator semantics
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

use crate::ast::{BinOp, Expr, UnaryOp, Variable};
use crate::error::RuntimeError;
use crate::interpreter::value::Value;
use crate::interpreter::Interpreter;
use crate::semantic::VarBinding;
use crate::span::Span;

impl<'a, W: Write> Interpreter<'a, W> {
    /// Evaluates an expression to a value.
    ///
    /// Operands are evaluated left before right.
    pub fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Integer(n) => Ok(Value::Integer(*n)),
            Expr::Real(r) => Ok(Value::Real(*r)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),

            Expr::Variable(var) => self.load(var),

            Expr::Binary {
                left,
                op,
                right,
                span,
            } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                apply_binary(*op, left, right, *span)
            }

            Expr::Unary { op, operand, span } => {
                let operand = self.eval_expr(operand)?;
                apply_unary(*op, operand, *span)
            }
        }
    }

    fn load(&self, var: &Variable) -> Result<Value, RuntimeError> {
        let binding = self.binding(var)?;
        let index = self.frame_index(&var.name, binding.level, var.span)?;

        self.call_stack
            .get(index)
            .and_then(|frame| frame.get(&var.name))
            .cloned()
            .ok_or_else(|| RuntimeError::Uninitialized {
                name: var.name.clone(),
                span: var.span,
            })
    }

    /// The resolution semantic analysis recorded for `var`.
    pub(crate) fn binding(&self, var: &Variable) -> Result<VarBinding, RuntimeError> {
        self.analysis
            .variable(var.id)
            .ok_or_else(|| RuntimeError::Unresolved {
                name: var.name.clone(),
                span: var.span,
            })
    }

    /// Stack index of the frame for scope `level`, reached through the
    /// static chain of the current frame.
    pub(crate) fn frame_index(
        &self,
        name: &str,
        level: usize,
        span: Span,
    ) -> Result<usize, RuntimeError> {
        self.call_stack
            .find_level(level)
            .ok_or_else(|| RuntimeError::MissingFrame {
                name: name.to_string(),
                level,
                span,
            })
    }
}

fn invalid(operator: &'static str, left: &Value, right: &Value, span: Span) -> RuntimeError {
    RuntimeError::InvalidOperands {
        operator,
        operands: format!("{} and {}", left.type_name(), right.type_name()),
        span,
    }
}

/// Applies a binary operator.
///
/// # Behavior
/// - `+ - *` stay integer for two integers (overflow is a fault) and
///   produce a real otherwise; `+` also concatenates two strings
/// - `/` always produces a real
/// - `DIV` truncates toward zero and always produces an integer
/// - dividing by zero is a fault for both divisions
/// - a real result outside the finite range is a fault
pub fn apply_binary(op: BinOp, left: Value, right: Value, span: Span) -> Result<Value, RuntimeError> {
    use Value::{Integer, Real, Str};

    let overflow = || RuntimeError::IntegerOverflow { span };

    match (op, &left, &right) {
        (BinOp::Add, Str(a), Str(b)) => Ok(Str(format!("{}{}", a, b))),

        (BinOp::Add, Integer(a), Integer(b)) => a.checked_add(*b).map(Integer).ok_or_else(overflow),
        (BinOp::Sub, Integer(a), Integer(b)) => a.checked_sub(*b).map(Integer).ok_or_else(overflow),
        (BinOp::Mul, Integer(a), Integer(b)) => a.checked_mul(*b).map(Integer).ok_or_else(overflow),

        (BinOp::IntegerDiv, Integer(_), Integer(0)) => Err(RuntimeError::DivisionByZero { span }),
        (BinOp::IntegerDiv, Integer(a), Integer(b)) => {
            a.checked_div(*b).map(Integer).ok_or_else(overflow)
        }

        _ => {
            let (Some(a), Some(b)) = (left.as_real(), right.as_real()) else {
                return Err(invalid(op.symbol(), &left, &right, span));
            };

            let finite = |r: f64| {
                if r.is_finite() {
                    Ok(Real(r))
                } else {
                    Err(RuntimeError::RealOverflow {
                        operator: op.symbol(),
                        span,
                    })
                }
            };

            match op {
                BinOp::Add => finite(a + b),
                BinOp::Sub => finite(a - b),
                BinOp::Mul => finite(a * b),
                BinOp::FloatDiv if b == 0.0 => Err(RuntimeError::DivisionByZero { span }),
                BinOp::FloatDiv => finite(a / b),
                BinOp::IntegerDiv if b == 0.0 => Err(RuntimeError::DivisionByZero { span }),
                BinOp::IntegerDiv => {
                    let quotient = (a / b).trunc();
                    if quotient.is_finite()
                        && quotient >= i64::MIN as f64
                        && quotient < i64::MAX as f64
                    {
                        Ok(Integer(quotient as i64))
                    } else {
                        Err(overflow())
                    }
                }
            }
        }
    }
}

/// Applies a unary sign to a number.
pub fn apply_unary(op: UnaryOp, operand: Value, span: Span) -> Result<Value, RuntimeError> {
    match (op, operand) {
        (UnaryOp::Plus, value @ (Value::Integer(_) | Value::Real(_))) => Ok(value),
        (UnaryOp::Minus, Value::Integer(n)) => n
            .checked_neg()
            .map(Value::Integer)
            .ok_or(RuntimeError::IntegerOverflow { span }),
        (UnaryOp::Minus, Value::Real(r)) => Ok(Value::Real(-r)),
        (op, operand) => Err(RuntimeError::InvalidOperands {
            operator: op.symbol(),
            operands: operand.type_name().to_string(),
            span,
        }),
    }
}

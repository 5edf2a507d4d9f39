//! Post-order evaluation of expression trees

use crate::value::Value;
use crate::{Interpreter, Outcome};
use termish_ast::{BinaryOperator, Command, Expression, ShellError, UnaryOperator};

/// Nested command calls deeper than this are rejected
pub const MAX_CALL_DEPTH: usize = 64;

impl Interpreter {
    /// Evaluate an expression to a value
    ///
    /// Reads and writes the variable store (`++`/`--`) and runs nested
    /// commands in piping mode.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::Execution` if a nested command fails, asks for
    /// confirmation, or nests too deeply, or if `++`/`--` is applied to
    /// something other than a variable.
    pub fn evaluate(&mut self, expression: &Expression) -> Result<Value, ShellError> {
        match expression {
            Expression::Binary {
                operator,
                left,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(apply_binary(*operator, &left, &right))
            }
            Expression::Unary {
                operator,
                operand,
                prefix,
            } => self.evaluate_unary(*operator, operand, *prefix),
            Expression::Call(command) => self.evaluate_call(command),
            Expression::Number(number) => Ok(Value::Number(*number)),
            Expression::Variable(name) => Ok(self.store.get(name)),
            Expression::Array(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.evaluate(element)?);
                }
                Ok(Value::Array(values))
            }
            Expression::String(text) | Expression::Word(text) => Ok(Value::Str(text.clone())),
            Expression::Boolean(flag) => Ok(Value::Bool(*flag)),
        }
    }

    fn evaluate_unary(
        &mut self,
        operator: UnaryOperator,
        operand: &Expression,
        prefix: bool,
    ) -> Result<Value, ShellError> {
        let delta = match operator {
            UnaryOperator::Increment => 1.0,
            UnaryOperator::Decrement => -1.0,
            UnaryOperator::Negate => return Ok(Value::Number(-self.evaluate(operand)?.to_number())),
            UnaryOperator::BitNot => {
                return Ok(Value::Number(f64::from(!self.evaluate(operand)?.to_int32())));
            }
            UnaryOperator::Not => return Ok(Value::Bool(!self.evaluate(operand)?.is_truthy())),
        };

        let Expression::Variable(name) = operand else {
            return Err(ShellError::execution(format!(
                "`{operator}` can only be applied to a variable"
            )));
        };
        let old = self.store.get(name).to_number();
        let new = old + delta;
        self.store.set(name.clone(), Value::Number(new));
        Ok(Value::Number(if prefix { new } else { old }))
    }

    fn evaluate_call(&mut self, command: &Command) -> Result<Value, ShellError> {
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(ShellError::execution("Nested commands are too deep"));
        }
        self.call_depth += 1;
        let outcome = self.execute(command, true);
        self.call_depth -= 1;

        match outcome? {
            Outcome::Value(value) => Ok(value),
            Outcome::Confirm(_) => Err(ShellError::execution(format!(
                "`{}` asks for confirmation and cannot be used inside an expression",
                command.name
            ))),
        }
    }
}

/// Apply a binary operator to two evaluated operands
#[must_use]
pub fn apply_binary(operator: BinaryOperator, left: &Value, right: &Value) -> Value {
    match operator {
        BinaryOperator::Add if left.is_textual() || right.is_textual() => {
            Value::Str(format!("{left}{right}"))
        }
        BinaryOperator::Add => Value::Number(left.to_number() + right.to_number()),
        BinaryOperator::Subtract => Value::Number(left.to_number() - right.to_number()),
        BinaryOperator::Multiply => Value::Number(left.to_number() * right.to_number()),
        BinaryOperator::Divide => Value::Number(left.to_number() / right.to_number()),
        BinaryOperator::BitOr => int32(left.to_int32() | right.to_int32()),
        BinaryOperator::BitAnd => int32(left.to_int32() & right.to_int32()),
        BinaryOperator::BitXor => int32(left.to_int32() ^ right.to_int32()),
        BinaryOperator::ShiftLeft => int32(left.to_int32().wrapping_shl(shift_amount(right))),
        BinaryOperator::ShiftRight => int32(left.to_int32().wrapping_shr(shift_amount(right))),
    }
}

fn int32(value: i32) -> Value {
    Value::Number(f64::from(value))
}

/// Shift counts use the low five bits, as with 32-bit shifts
fn shift_amount(value: &Value) -> u32 {
    u32::try_from(value.to_int32() & 31).unwrap_or_default()
}

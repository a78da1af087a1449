//! Lowering of `for <var> in range(...)` headers into three-clause C loops.
//!
//! Loop direction is chosen at translation time. When both bounds fold to
//! constants, `start > stop` counts down and anything else counts up. When a
//! bound is not constant the sign of a constant step decides; failing that the
//! loop counts up and a warning is logged.

use log::{debug, warn};

use super::Transpiler;
use super::error::TranslateResult;
use crate::ast::{BinaryOperator, Expression, Precedence, RangeCall, Statement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// What settled the direction of a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionBasis {
    ConstantBounds,
    ConstantStep(i64),
    /// Nothing was constant; the loop is assumed to count up.
    Assumed,
}

/// Arguments of a range call with the defaults filled in.
struct Bounds<'a> {
    start: &'a Expression,
    stop: &'a Expression,
    step: Option<&'a Expression>,
}

static ZERO: Expression = Expression::Integer(0);

impl<'a> From<&'a RangeCall> for Bounds<'a> {
    fn from(range: &'a RangeCall) -> Self {
        match range {
            RangeCall::Stop(stop) => Self {
                start: &ZERO,
                stop,
                step: None,
            },
            RangeCall::StartStop(start, stop) => Self {
                start,
                stop,
                step: None,
            },
            RangeCall::StartStopStep(start, stop, step) => Self {
                start,
                stop,
                step: Some(step),
            },
        }
    }
}

impl Transpiler {
    pub(super) fn emit_for_header(
        &self,
        target: &str,
        range: &RangeCall,
        at: &Statement,
    ) -> TranslateResult<String> {
        let bounds = Bounds::from(range);
        let (direction, basis) = direction(&bounds);
        match basis {
            DirectionBasis::ConstantBounds => {}
            DirectionBasis::ConstantStep(step) => debug!(
                "line {}: range over '{target}' has non-constant bounds, direction taken from step {step}",
                at.span.line
            ),
            DirectionBasis::Assumed => warn!(
                "line {}: cannot decide the direction of the range loop over '{target}' at translation time, counting up",
                at.span.line
            ),
        }

        let start = self.emit_expression(bounds.start, at)?;
        let stop = self.emit_operand(bounds.stop, Precedence::Additive, at)?;
        let step = match (direction, bounds.step) {
            (_, None) => "1".to_string(),
            (Direction::Ascending, Some(step)) => self.emit_expression(step, at)?,
            (Direction::Descending, Some(step)) => match constant_value(step) {
                Some(value) => value.unsigned_abs().to_string(),
                None => match step {
                    Expression::Negate(magnitude) => {
                        self.emit_operand(magnitude, Precedence::Unary, at)?
                    }
                    _ => self.emit_expression(step, at)?,
                },
            },
        };

        let (compare, update) = match direction {
            Direction::Ascending => ("<", "+="),
            Direction::Descending => (">", "-="),
        };
        Ok(format!(
            "for ({target} = {start}; {target} {compare} {stop}; {target} {update} {step})"
        ))
    }
}

fn direction(bounds: &Bounds<'_>) -> (Direction, DirectionBasis) {
    let start = constant_value(bounds.start);
    let stop = constant_value(bounds.stop);
    if let (Some(start), Some(stop)) = (start, stop) {
        let direction = if start > stop {
            Direction::Descending
        } else {
            Direction::Ascending
        };
        return (direction, DirectionBasis::ConstantBounds);
    }

    let step = match bounds.step {
        Some(step) => constant_value(step),
        None => Some(1),
    };
    match step {
        Some(step) if step < 0 => (Direction::Descending, DirectionBasis::ConstantStep(step)),
        Some(step) => (Direction::Ascending, DirectionBasis::ConstantStep(step)),
        None => (Direction::Ascending, DirectionBasis::Assumed),
    }
}

/// Folds integer literals, unary minus and arithmetic over constants.
pub fn constant_value(expr: &Expression) -> Option<i64> {
    match expr {
        Expression::Integer(value) => Some(*value),
        Expression::Negate(operand) => constant_value(operand)?.checked_neg(),
        Expression::BinaryOp { left, op, right } => {
            let left = constant_value(left)?;
            let right = constant_value(right)?;
            match op {
                BinaryOperator::Add => left.checked_add(right),
                BinaryOperator::Sub => left.checked_sub(right),
                BinaryOperator::Mul => left.checked_mul(right),
                BinaryOperator::Div => left.checked_div(right),
                BinaryOperator::Mod => left.checked_rem(right),
            }
        }
        _ => None,
    }
}

//! Tree-walking emitter that renders a [`Program`] as C source.
//!
//! Every node is rendered by a pure function of the node and its children;
//! nothing is shared between siblings. Blocks become `<header>\n{\n<body>\n}`
//! with braces synthesized from the indentation-derived nesting.

use log::debug;

use self::error::TranslateError;
use crate::ast::{
    ComparisonOperator, Expression, Precedence, Program, Statement, StatementKind,
};

pub mod error;
pub mod printf;
pub mod range;

pub use self::error::TranslateResult;
pub use self::printf::C_HEADERS;

pub struct Transpiler;

impl Transpiler {
    pub fn transpile(&self, program: &Program) -> TranslateResult<String> {
        let mut output = String::from(C_HEADERS);
        let body = self.emit_statements(&program.statements)?;
        if !body.is_empty() {
            output.push('\n');
            output.push_str(&body);
            output.push('\n');
        }
        debug!(
            "emitted {} bytes of C for {} top-level statements",
            output.len(),
            program.statements.len()
        );
        Ok(output)
    }

    fn emit_statements(&self, statements: &[Statement]) -> TranslateResult<String> {
        let mut rendered = Vec::with_capacity(statements.len());
        let mut follows_main_guard = false;
        for statement in statements {
            // `int main()` cannot be continued by an `else`.
            if follows_main_guard
                && matches!(
                    statement.kind,
                    StatementKind::Elif { .. } | StatementKind::Else { .. }
                )
            {
                return Err(unsupported(
                    format!("{} branch of the main guard", statement.kind.name()),
                    statement,
                ));
            }
            follows_main_guard = matches!(
                &statement.kind,
                StatementKind::If { condition, .. } if is_main_guard(condition)
            );
            rendered.push(self.emit_statement(statement)?);
        }
        Ok(rendered.join("\n"))
    }

    fn emit_statement(&self, statement: &Statement) -> TranslateResult<String> {
        let at = statement;
        match &statement.kind {
            StatementKind::Assign {
                target,
                value: Expression::Integer(0),
            } => Ok(format!("int {target};")),
            StatementKind::Assign { target, value } => {
                let value = self.emit_expression(value, at)?;
                Ok(format!("{target} = {value};"))
            }
            StatementKind::Declare { names } => Ok(format!("int {};", names.join(", "))),
            StatementKind::Return(None) => Ok("return;".to_string()),
            StatementKind::Return(Some(value)) => {
                let value = self.emit_expression(value, at)?;
                Ok(format!("return {value};"))
            }
            StatementKind::Break => Ok("break;".to_string()),
            StatementKind::If { condition, body } if is_main_guard(condition) => {
                self.emit_block("int main()", body)
            }
            StatementKind::If { condition, body } => {
                let condition = self.emit_expression(condition, at)?;
                self.emit_block(&format!("if ({condition})"), body)
            }
            StatementKind::Elif { condition, body } => {
                let condition = self.emit_expression(condition, at)?;
                self.emit_block(&format!("else if ({condition})"), body)
            }
            StatementKind::Else { body } => self.emit_block("else", body),
            StatementKind::While { condition, body } => {
                let condition = self.emit_expression(condition, at)?;
                self.emit_block(&format!("while ({condition})"), body)
            }
            StatementKind::For {
                target,
                range,
                body,
            } => {
                let header = self.emit_for_header(target, range, at)?;
                self.emit_block(&header, body)
            }
            StatementKind::FunctionDef { name, params, body } => {
                let params = self.emit_list(params, at)?;
                self.emit_block(&format!("{name}({params})"), body)
            }
            StatementKind::Print(print) => self.emit_print(print, at),
            StatementKind::Expr(expr) => {
                let expr = self.emit_expression(expr, at)?;
                Ok(format!("{expr};"))
            }
        }
    }

    fn emit_block(&self, header: &str, body: &[Statement]) -> TranslateResult<String> {
        let body = self.emit_statements(body)?;
        Ok(format!("{header}\n{{\n{body}\n}}"))
    }

    fn emit_expression(&self, expr: &Expression, at: &Statement) -> TranslateResult<String> {
        match expr {
            Expression::Integer(value) => Ok(value.to_string()),
            Expression::Variable(name) => Ok(name.clone()),
            Expression::String(value) => Err(unsupported(
                format!("string literal \"{value}\" outside print"),
                at,
            )),
            Expression::BinaryOp { left, op, right } => {
                self.emit_binary(left, op.symbol(), right, expr.precedence(), at)
            }
            Expression::Logical { left, op, right } => {
                self.emit_binary(left, op.symbol(), right, expr.precedence(), at)
            }
            Expression::Comparison { left, op, right } => {
                // C ranks relational above equality; Python does not, so nested
                // comparisons are always grouped explicitly.
                let left = self.emit_operand(left, Precedence::Additive, at)?;
                let right = self.emit_operand(right, Precedence::Additive, at)?;
                Ok(format!("{left} {} {right}", op.symbol()))
            }
            Expression::Not(operand) => {
                let operand = self.emit_operand(operand, Precedence::Unary, at)?;
                Ok(format!("!{operand}"))
            }
            Expression::Negate(operand) => {
                let operand = match operand.as_ref() {
                    Expression::Negate(_) => format!("({})", self.emit_expression(operand, at)?),
                    _ => self.emit_operand(operand, Precedence::Unary, at)?,
                };
                Ok(format!("-{operand}"))
            }
            Expression::Call { callee, .. } if callee == "print" => Err(unsupported(
                "print(...) with an argument other than a string literal or a .format(...) call"
                    .to_string(),
                at,
            )),
            Expression::Call { callee, .. } if callee == "range" => Err(unsupported(
                "range(...) outside a for header".to_string(),
                at,
            )),
            Expression::Call { callee, args } => {
                let args = self.emit_list(args, at)?;
                Ok(format!("{callee}({args})"))
            }
        }
    }

    fn emit_binary(
        &self,
        left: &Expression,
        symbol: &str,
        right: &Expression,
        precedence: Precedence,
        at: &Statement,
    ) -> TranslateResult<String> {
        let left = self.emit_operand(left, precedence, at)?;
        let right = self.emit_operand(right, precedence.tighter(), at)?;
        Ok(format!("{left} {symbol} {right}"))
    }

    /// Renders `expr`, parenthesized when it binds more loosely than `min`.
    fn emit_operand(
        &self,
        expr: &Expression,
        min: Precedence,
        at: &Statement,
    ) -> TranslateResult<String> {
        let rendered = self.emit_expression(expr, at)?;
        if expr.precedence() < min {
            Ok(format!("({rendered})"))
        } else {
            Ok(rendered)
        }
    }

    fn emit_list(&self, exprs: &[Expression], at: &Statement) -> TranslateResult<String> {
        let mut rendered = Vec::with_capacity(exprs.len());
        for expr in exprs {
            rendered.push(self.emit_expression(expr, at)?);
        }
        Ok(rendered.join(", "))
    }
}

/// `__name__ == "__main__"`, the module entry guard.
fn is_main_guard(condition: &Expression) -> bool {
    match condition {
        Expression::Comparison {
            left,
            op: ComparisonOperator::Equal,
            right,
        } => {
            matches!(left.as_ref(), Expression::Variable(name) if name == "__name__")
                && matches!(right.as_ref(), Expression::String(value) if value == "__main__")
        }
        _ => false,
    }
}

fn unsupported(construct: String, at: &Statement) -> TranslateError {
    TranslateError::UnsupportedConstruct {
        construct,
        statement: at.kind.name(),
        line: at.span.line,
        column: at.span.column,
    }
}

//! Lowering of the two `print` forms onto `printf`.

use log::warn;

use super::Transpiler;
use super::error::TranslateResult;
use crate::ast::{PrintCall, Statement};

pub const C_HEADERS: &str = "#include <stdio.h>\n";

impl Transpiler {
    pub(super) fn emit_print(&self, print: &PrintCall, at: &Statement) -> TranslateResult<String> {
        match print {
            PrintCall::String(text) => Ok(format!("printf(\"{}\\n\");", escape_percent(text))),
            PrintCall::Format { template, args } => {
                let (format, placeholders) = rewrite_placeholders(template);
                if let Some(message) = format_mismatch(template, placeholders, args.len()) {
                    warn!("line {}: {message}", at.span.line);
                }
                let mut rendered = Vec::with_capacity(args.len() + 1);
                rendered.push(format!("\"{format}\\n\""));
                for arg in args {
                    rendered.push(self.emit_expression(arg, at)?);
                }
                Ok(format!("printf({});", rendered.join(", ")))
            }
        }
    }
}

/// Describes a placeholder count that differs from the argument count. The
/// call is still emitted as written.
fn format_mismatch(template: &str, placeholders: usize, arguments: usize) -> Option<String> {
    (placeholders != arguments).then(|| {
        format!(
            "format string \"{template}\" has {placeholders} placeholder(s) but {arguments} argument(s) were given"
        )
    })
}

/// The literal becomes a printf format string, so a bare `%` must be doubled.
fn escape_percent(text: &str) -> String {
    text.replace('%', "%%")
}

/// Replaces each `{}` with `%d`, left to right, and returns the rewritten
/// format together with the number of placeholders. `{{` and `}}` collapse to
/// literal braces.
pub fn rewrite_placeholders(template: &str) -> (String, usize) {
    let mut output = String::with_capacity(template.len());
    let mut placeholders = 0;
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        match (c, next) {
            ('{', Some('}')) => {
                chars.next();
                placeholders += 1;
                output.push_str("%d");
            }
            ('{', Some('{')) | ('}', Some('}')) => {
                chars.next();
                output.push(c);
            }
            ('%', _) => output.push_str("%%"),
            _ => output.push(c),
        }
    }
    (output, placeholders)
}

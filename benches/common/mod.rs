#![allow(dead_code)]
use std::fs;

use py2c::ast::Program;
use py2c::{lexer, parser};

pub const WORKLOADS: [(&str, &str); 2] = [
    ("branches", "tests/programs/while_branches/program.py"),
    ("functions", "tests/programs/functions/program.py"),
];

pub fn load_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {path}: {err}"))
}

pub fn load_program(path: &str) -> Program {
    let source = load_source(path);
    let tokens = lexer::tokenize(&source).unwrap_or_else(|err| panic!("tokenize {path}: {err}"));
    parser::parse_tokens(tokens).unwrap_or_else(|err| panic!("parse {path}: {err}"))
}

/// Repeats a workload so the timings are not dominated by setup.
pub fn scaled_source(path: &str, copies: usize) -> String {
    let source = load_source(path);
    let mut scaled = String::with_capacity(source.len() * copies);
    for _ in 0..copies {
        scaled.push_str(&source);
        scaled.push('\n');
    }
    scaled
}

use log::{debug, trace};

use crate::ast::{
    BinaryOperator, ComparisonOperator, Expression, LogicalOperator, PrintCall, Program,
    RangeCall, Statement, StatementKind, StatementList,
};
use crate::token::{Span, Token, TokenKind};

pub mod error;

pub use self::error::{ParseError, ParseResult};

/// Recursive-descent parser over a fully materialized token stream.
///
/// Most rules commit after one token of lookahead. Rules whose prefixes overlap
/// with the general expression grammar (`print(...)` forms and `a = b = 0`) are
/// tried speculatively through [`Parser::attempt`], which rewinds to the saved
/// position when the rule fails.
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokens: Vec<Token<'a>>) -> Self {
        if !matches!(tokens.last(), Some(token) if token.kind == TokenKind::EOF) {
            let span = tokens.last().map(Token::span).unwrap_or_default();
            tokens.push(Token::new(TokenKind::EOF, span));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn parse_program(mut self) -> ParseResult<Program> {
        let statements = self.parse_statements()?;
        if !matches!(self.current_kind(), TokenKind::EOF) {
            return Err(self.error("statement"));
        }
        debug!("parsed {} top-level statements", statements.len());
        Ok(Program { statements })
    }

    fn parse_statements(&mut self) -> ParseResult<StatementList> {
        let mut statements: StatementList = Vec::new();
        loop {
            self.consume_newlines();
            if matches!(self.current_kind(), TokenKind::Dedent | TokenKind::EOF) {
                break;
            }
            let statement = self.parse_statement()?;
            check_branch_order(statements.last(), &statement)?;
            statements.push(statement);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        let span = self.current().span;
        let current = *self.current_kind();
        let kind = match current {
            TokenKind::If => {
                self.advance();
                let condition = self.parse_expression()?;
                let body = self.parse_block()?;
                StatementKind::If { condition, body }
            }
            TokenKind::Elif => {
                self.advance();
                let condition = self.parse_expression()?;
                let body = self.parse_block()?;
                StatementKind::Elif { condition, body }
            }
            TokenKind::Else => {
                self.advance();
                let body = self.parse_block()?;
                StatementKind::Else { body }
            }
            TokenKind::While => {
                self.advance();
                let condition = self.parse_expression()?;
                let body = self.parse_block()?;
                StatementKind::While { condition, body }
            }
            TokenKind::For => self.parse_for()?,
            TokenKind::Def => self.parse_function_def()?,
            TokenKind::Return => {
                self.advance();
                let value = if self.at_statement_end() {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.expect_statement_end()?;
                StatementKind::Return(value)
            }
            TokenKind::Break => {
                self.advance();
                self.expect_statement_end()?;
                StatementKind::Break
            }
            TokenKind::Identifier("print") => match self.attempt(Self::parse_print) {
                Ok(print) => StatementKind::Print(print),
                Err(print_error) => self
                    .parse_expression_statement()
                    .map_err(|error| furthest(error, print_error))?,
            },
            TokenKind::Identifier(_) if matches!(self.peek_kind(), TokenKind::Equal) => {
                match self.attempt(Self::parse_declaration) {
                    Ok(names) => StatementKind::Declare { names },
                    Err(_) => self.parse_assignment()?,
                }
            }
            _ => self.parse_expression_statement()?,
        };
        Ok(Statement::new(kind, span))
    }

    /// `: NEWLINE INDENT statement+ DEDENT`
    fn parse_block(&mut self) -> ParseResult<StatementList> {
        self.expect(TokenKind::Colon, "':'")?;
        self.expect(TokenKind::Newline, "newline after ':'")?;
        self.expect(TokenKind::Indent, "indented block")?;
        let body = self.parse_statements()?;
        if body.is_empty() {
            return Err(self.error("statement"));
        }
        self.expect(TokenKind::Dedent, "end of indented block")?;
        Ok(body)
    }

    fn parse_for(&mut self) -> ParseResult<StatementKind> {
        self.expect(TokenKind::For, "'for'")?;
        let target = self.expect_identifier()?;
        self.expect(TokenKind::In, "'in'")?;
        let range = self.parse_range()?;
        let body = self.parse_block()?;
        Ok(StatementKind::For {
            target,
            range,
            body,
        })
    }

    fn parse_range(&mut self) -> ParseResult<RangeCall> {
        self.expect_identifier_named("range")?;
        self.expect(TokenKind::LParen, "'('")?;
        let mut args = self.parse_arguments()?.into_iter();
        let range = match (args.next(), args.next(), args.next(), args.next()) {
            (Some(stop), None, None, None) => RangeCall::Stop(stop),
            (Some(start), Some(stop), None, None) => RangeCall::StartStop(start, stop),
            (Some(start), Some(stop), Some(step), None) => {
                RangeCall::StartStopStep(start, stop, step)
            }
            _ => return Err(self.error_before("1 to 3 range arguments")),
        };
        Ok(range)
    }

    fn parse_function_def(&mut self) -> ParseResult<StatementKind> {
        self.expect(TokenKind::Def, "'def'")?;
        let name = self.expect_identifier()?;
        self.expect(TokenKind::LParen, "'('")?;
        let params = self.parse_arguments()?;
        let body = self.parse_block()?;
        Ok(StatementKind::FunctionDef { name, params, body })
    }

    /// `print(STRING)` or `print(STRING.format(args))`.
    fn parse_print(&mut self) -> ParseResult<PrintCall> {
        self.expect_identifier_named("print")?;
        self.expect(TokenKind::LParen, "'('")?;
        let template = self.expect_string()?;
        if matches!(self.current_kind(), TokenKind::RParen) {
            self.advance();
            self.expect_statement_end()?;
            return Ok(PrintCall::String(template));
        }
        self.expect(TokenKind::Dot, "')' or '.format('")?;
        self.expect_identifier_named("format")?;
        self.expect(TokenKind::LParen, "'('")?;
        let args = self.parse_arguments()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect_statement_end()?;
        Ok(PrintCall::Format { template, args })
    }

    /// `a = b = ... = 0` with at least two targets.
    fn parse_declaration(&mut self) -> ParseResult<Vec<String>> {
        let mut names = vec![self.expect_identifier()?];
        self.expect(TokenKind::Equal, "'='")?;
        while matches!(self.current_kind(), TokenKind::Identifier(_))
            && matches!(self.peek_kind(), TokenKind::Equal)
        {
            names.push(self.expect_identifier()?);
            self.advance();
        }
        if names.len() < 2 {
            return Err(self.error("another assignment target"));
        }
        self.expect(TokenKind::Integer(0), "0")?;
        self.expect_statement_end()?;
        Ok(names)
    }

    fn parse_assignment(&mut self) -> ParseResult<StatementKind> {
        let target = self.expect_identifier()?;
        self.expect(TokenKind::Equal, "'='")?;
        let value = self.parse_expression()?;
        self.expect_statement_end()?;
        Ok(StatementKind::Assign { target, value })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<StatementKind> {
        let expr = self.parse_expression()?;
        self.expect_statement_end()?;
        Ok(StatementKind::Expr(expr))
    }

    /// Comma separated expressions up to and including the closing `)`.
    /// A trailing comma is accepted.
    fn parse_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        let mut args = Vec::new();
        loop {
            if matches!(self.current_kind(), TokenKind::RParen) {
                self.advance();
                return Ok(args);
            }
            args.push(self.parse_expression()?);
            match self.current_kind() {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RParen => {}
                _ => return Err(self.error("',' or ')'")),
            }
        }
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_and()?;
        while matches!(self.current_kind(), TokenKind::Or) {
            self.advance();
            let right = self.parse_and()?;
            expr = Expression::Logical {
                left: Box::new(expr),
                op: LogicalOperator::Or,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_not()?;
        while matches!(self.current_kind(), TokenKind::And) {
            self.advance();
            let right = self.parse_not()?;
            expr = Expression::Logical {
                left: Box::new(expr),
                op: LogicalOperator::And,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_not(&mut self) -> ParseResult<Expression> {
        if matches!(self.current_kind(), TokenKind::Not) {
            self.advance();
            let operand = self.parse_not()?;
            return Ok(Expression::Not(Box::new(operand)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_additive()?;
        while let Some(op) = comparison_operator(self.current_kind()) {
            self.advance();
            let right = self.parse_additive()?;
            expr = Expression::Comparison {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_additive(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_multiplicative()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            expr = Expression::BinaryOp {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_unary()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinaryOperator::Mul,
                TokenKind::Slash => BinaryOperator::Div,
                TokenKind::Percent => BinaryOperator::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            expr = Expression::BinaryOp {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> ParseResult<Expression> {
        if matches!(self.current_kind(), TokenKind::Minus) {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::Negate(Box::new(operand)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let current = *self.current_kind();
        match current {
            TokenKind::Integer(value) => {
                self.advance();
                Ok(Expression::Integer(value))
            }
            TokenKind::String(value) => {
                self.advance();
                Ok(Expression::String(value.to_string()))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if matches!(self.current_kind(), TokenKind::LParen) {
                    self.advance();
                    let args = self.parse_arguments()?;
                    return Ok(Expression::Call {
                        callee: name.to_string(),
                        args,
                    });
                }
                Ok(Expression::Variable(name.to_string()))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(expr)
            }
            _ => Err(self.error("expression")),
        }
    }

    /// Runs `rule` speculatively, rewinding to the current position if it fails.
    fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let checkpoint = self.position;
        let result = rule(self);
        if let Err(error) = &result {
            trace!("backtracking to token {checkpoint}: {error}");
            self.position = checkpoint;
        }
        result
    }

    fn consume_newlines(&mut self) {
        while matches!(self.current_kind(), TokenKind::Newline) {
            self.advance();
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Dedent | TokenKind::EOF
        )
    }

    /// A statement ends at a newline, or right before a block end or end of input.
    fn expect_statement_end(&mut self) -> ParseResult<()> {
        match self.current_kind() {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Dedent | TokenKind::EOF => Ok(()),
            _ => Err(self.error("newline")),
        }
    }

    fn expect(&mut self, kind: TokenKind<'a>, expected: &str) -> ParseResult<()> {
        if *self.current_kind() == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        let current = *self.current_kind();
        if let TokenKind::Identifier(name) = current {
            self.advance();
            Ok(name.to_string())
        } else {
            Err(self.error("identifier"))
        }
    }

    fn expect_identifier_named(&mut self, expected: &str) -> ParseResult<()> {
        let current = *self.current_kind();
        match current {
            TokenKind::Identifier(name) if name == expected => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error(&format!("'{expected}'"))),
        }
    }

    fn expect_string(&mut self) -> ParseResult<String> {
        let current = *self.current_kind();
        if let TokenKind::String(value) = current {
            self.advance();
            Ok(value.to_string())
        } else {
            Err(self.error("string literal"))
        }
    }

    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    fn current(&self) -> &Token<'a> {
        &self.tokens[self.position]
    }

    fn current_kind(&self) -> &TokenKind<'a> {
        self.current().kind()
    }

    fn peek_kind(&self) -> &TokenKind<'a> {
        let index = (self.position + 1).min(self.tokens.len() - 1);
        &self.tokens[index].kind
    }

    fn error(&self, expected: &str) -> ParseError {
        self.error_at(self.current(), expected)
    }

    /// Reports against the previous token, for lists that are only known to be
    /// malformed once fully consumed.
    fn error_before(&self, expected: &str) -> ParseError {
        let index = self.position.saturating_sub(1);
        self.error_at(&self.tokens[index], expected)
    }

    fn error_at(&self, token: &Token<'a>, expected: &str) -> ParseError {
        let Span { line, column, .. } = token.span;
        ParseError::Unexpected {
            expected: expected.to_string(),
            found: token.kind.to_string(),
            line,
            column,
        }
    }
}

fn comparison_operator(kind: &TokenKind<'_>) -> Option<ComparisonOperator> {
    let op = match kind {
        TokenKind::Greater => ComparisonOperator::Greater,
        TokenKind::Less => ComparisonOperator::Less,
        TokenKind::GreaterEqual => ComparisonOperator::GreaterEqual,
        TokenKind::LessEqual => ComparisonOperator::LessEqual,
        TokenKind::EqualEqual => ComparisonOperator::Equal,
        _ => return None,
    };
    Some(op)
}

fn check_branch_order(previous: Option<&Statement>, statement: &Statement) -> ParseResult<()> {
    let keyword = match statement.kind {
        StatementKind::Elif { .. } => "elif",
        StatementKind::Else { .. } => "else",
        _ => return Ok(()),
    };
    match previous.map(|previous| &previous.kind) {
        Some(StatementKind::If { .. } | StatementKind::Elif { .. }) => Ok(()),
        _ => Err(ParseError::DanglingBranch {
            keyword,
            line: statement.span.line,
            column: statement.span.column,
        }),
    }
}

/// Keeps whichever error got further into the input.
fn furthest(left: ParseError, right: ParseError) -> ParseError {
    if right.position() > left.position() {
        right
    } else {
        left
    }
}

pub fn parse_tokens(tokens: Vec<Token<'_>>) -> ParseResult<Program> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use indoc::indoc;

    fn parse(input: &str) -> ParseResult<Vec<StatementKind>> {
        let tokens = tokenize(input).expect("tokenize should succeed");
        let program = parse_tokens(tokens)?;
        Ok(program.statements.into_iter().map(|stmt| stmt.kind).collect())
    }

    fn parse_ok(input: &str) -> Vec<StatementKind> {
        parse(input).expect("parse failed")
    }

    fn var(name: &str) -> Expression {
        Expression::Variable(name.to_string())
    }

    fn int(value: i64) -> Expression {
        Expression::Integer(value)
    }

    fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Expression {
        Expression::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    fn compare(left: Expression, op: ComparisonOperator, right: Expression) -> Expression {
        Expression::Comparison {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    fn body_of(statement: &StatementKind) -> Vec<&StatementKind> {
        let body = match statement {
            StatementKind::If { body, .. }
            | StatementKind::Elif { body, .. }
            | StatementKind::Else { body }
            | StatementKind::While { body, .. }
            | StatementKind::For { body, .. }
            | StatementKind::FunctionDef { body, .. } => body,
            other => panic!("expected a block statement, got {other:?}"),
        };
        body.iter().map(|stmt| &stmt.kind).collect()
    }

    #[test]
    fn parses_simple_program() {
        let input = indoc! {"
            def f(n):
                r = n * 2
                return r
            f(4)
        "};
        let statements = parse_ok(input);
        assert_eq!(statements.len(), 2);
        match &statements[0] {
            StatementKind::FunctionDef { name, params, .. } => {
                assert_eq!(name, "f");
                assert_eq!(params, &vec![var("n")]);
            }
            other => panic!("expected FunctionDef, got {other:?}"),
        }
        assert_eq!(
            body_of(&statements[0]),
            vec![
                &StatementKind::Assign {
                    target: "r".to_string(),
                    value: binary(var("n"), BinaryOperator::Mul, int(2)),
                },
                &StatementKind::Return(Some(var("r"))),
            ]
        );
        assert_eq!(
            statements[1],
            StatementKind::Expr(Expression::Call {
                callee: "f".to_string(),
                args: vec![int(4)],
            })
        );
    }

    #[test]
    fn respects_operator_precedence() {
        let statements = parse_ok("x = a or b and not c == d + e * f\n");
        let expected = Expression::Logical {
            left: Box::new(var("a")),
            op: LogicalOperator::Or,
            right: Box::new(Expression::Logical {
                left: Box::new(var("b")),
                op: LogicalOperator::And,
                right: Box::new(Expression::Not(Box::new(compare(
                    var("c"),
                    ComparisonOperator::Equal,
                    binary(
                        var("d"),
                        BinaryOperator::Add,
                        binary(var("e"), BinaryOperator::Mul, var("f")),
                    ),
                )))),
            }),
        };
        assert_eq!(
            statements,
            vec![StatementKind::Assign {
                target: "x".to_string(),
                value: expected,
            }]
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        let statements = parse_ok("x = (a + b) % 3\n");
        assert_eq!(
            statements,
            vec![StatementKind::Assign {
                target: "x".to_string(),
                value: binary(
                    binary(var("a"), BinaryOperator::Add, var("b")),
                    BinaryOperator::Mod,
                    int(3),
                ),
            }]
        );
    }

    #[test]
    fn comparisons_associate_left_without_chaining() {
        let statements = parse_ok("a < b <= c\n");
        assert_eq!(
            statements,
            vec![StatementKind::Expr(compare(
                compare(var("a"), ComparisonOperator::Less, var("b")),
                ComparisonOperator::LessEqual,
                var("c"),
            ))]
        );
    }

    #[test]
    fn parses_if_elif_else_as_siblings() {
        let input = indoc! {"
            if a > 1:
                b = 1
            elif a < 0:
                b = 2
            else:
                b = 3
        "};
        let statements = parse_ok(input);
        assert!(matches!(statements[0], StatementKind::If { .. }));
        assert!(matches!(statements[1], StatementKind::Elif { .. }));
        assert!(matches!(statements[2], StatementKind::Else { .. }));
        assert_eq!(body_of(&statements[2]).len(), 1);
    }

    #[test]
    fn rejects_else_without_if() {
        let input = indoc! {"
            a = 1
            else:
                a = 2
        "};
        let err = parse(input).expect_err("expected dangling else");
        assert_eq!(
            err,
            ParseError::DanglingBranch {
                keyword: "else",
                line: 2,
                column: 1
            }
        );
    }

    #[test]
    fn parses_all_range_shapes() {
        let input = indoc! {"
            for i in range(5):
                break
            for i in range(1, n,):
                break
            for i in range(10, 1, -1):
                break
        "};
        let ranges: Vec<RangeCall> = parse_ok(input)
            .into_iter()
            .map(|stmt| match stmt {
                StatementKind::For { target, range, .. } => {
                    assert_eq!(target, "i");
                    range
                }
                other => panic!("expected For, got {other:?}"),
            })
            .collect();
        assert_eq!(
            ranges,
            vec![
                RangeCall::Stop(int(5)),
                RangeCall::StartStop(int(1), var("n")),
                RangeCall::StartStopStep(int(10), int(1), Expression::Negate(Box::new(int(1)))),
            ]
        );
    }

    #[test]
    fn rejects_bad_range_arity() {
        for input in [
            "for i in range():\n    break\n",
            "for i in range(1, 2, 3, 4):\n    break\n",
        ] {
            let err = parse(input).expect_err("expected range arity failure");
            assert!(err.to_string().contains("1 to 3 range arguments"), "{err}");
        }
        let err = parse("for i in items:\n    break\n").expect_err("expected range");
        assert!(err.to_string().contains("expected 'range'"), "{err}");
    }

    #[test]
    fn parses_both_print_forms() {
        let input = indoc! {r#"
            print("test print")
            print("j={} k={}".format(j, k + 1,))
        "#};
        assert_eq!(
            parse_ok(input),
            vec![
                StatementKind::Print(PrintCall::String("test print".to_string())),
                StatementKind::Print(PrintCall::Format {
                    template: "j={} k={}".to_string(),
                    args: vec![var("j"), binary(var("k"), BinaryOperator::Add, int(1))],
                }),
            ]
        );
    }

    #[test]
    fn print_of_non_literal_falls_back_to_a_call() {
        assert_eq!(
            parse_ok("print(x)\n"),
            vec![StatementKind::Expr(Expression::Call {
                callee: "print".to_string(),
                args: vec![var("x")],
            })]
        );
    }

    #[test]
    fn malformed_format_reports_the_furthest_failure() {
        let err = parse("print(\"{}\".format(1 2))\n").expect_err("expected syntax error");
        assert_eq!(
            err,
            ParseError::Unexpected {
                expected: "',' or ')'".to_string(),
                found: "integer 2".to_string(),
                line: 1,
                column: 21,
            }
        );
    }

    #[test]
    fn parses_zero_initialising_chain_as_declaration() {
        assert_eq!(
            parse_ok("a = b = c = 0\nd = 0\n"),
            vec![
                StatementKind::Declare {
                    names: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                },
                StatementKind::Assign {
                    target: "d".to_string(),
                    value: int(0),
                },
            ]
        );
        let err = parse("a = b = 1\n").expect_err("only zero chains are allowed");
        assert!(err.to_string().contains("found '='"), "{err}");
    }

    #[test]
    fn parses_module_entry_guard() {
        let input = indoc! {r#"
            if __name__ == "__main__":
                main()
        "#};
        match &parse_ok(input)[0] {
            StatementKind::If { condition, .. } => assert_eq!(
                condition,
                &compare(
                    var("__name__"),
                    ComparisonOperator::Equal,
                    Expression::String("__main__".to_string())
                )
            ),
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn accepts_missing_final_newline() {
        let statements = parse_ok("while x > 0:\n    x = x - 1");
        assert_eq!(body_of(&statements[0]).len(), 1);
    }

    #[test]
    fn reports_missing_block_with_position() {
        let err = parse("if a:\nb = 1\n").expect_err("expected missing block");
        assert_eq!(
            err.to_string(),
            "SyntaxError at line 2, column 1: expected indented block, found identifier 'b'"
        );
    }

    #[test]
    fn reports_missing_colon() {
        let err = parse("while x\n    x = 1\n").expect_err("expected missing colon");
        assert!(err.to_string().contains("line 1"), "{err}");
        assert!(err.to_string().contains("expected ':'"), "{err}");
    }
}

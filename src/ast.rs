//! Syntax tree produced by the parser and consumed by the C emitter.
//!
//! The tree is built once from a complete token stream and is only read
//! afterwards. Statements carry the span of their first token so the emitter
//! can point at the construct it rejects.

use crate::token::Span;

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Integer(i64),
    Variable(String),
    /// Raw contents of a double-quoted literal, quotes stripped.
    String(String),
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
    Comparison {
        left: Box<Expression>,
        op: ComparisonOperator,
        right: Box<Expression>,
    },
    Logical {
        left: Box<Expression>,
        op: LogicalOperator,
        right: Box<Expression>,
    },
    Not(Box<Expression>),
    Negate(Box<Expression>),
    Call {
        callee: String,
        args: Vec<Expression>,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ComparisonOperator {
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    Equal,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LogicalOperator {
    And,
    Or,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }
}

impl ComparisonOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::Less => "<",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::Equal => "==",
        }
    }
}

impl LogicalOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// Binding strength of an expression, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Or,
    And,
    Not,
    Comparison,
    Additive,
    Multiplicative,
    Unary,
    Atom,
}

impl Precedence {
    /// The next stronger level; right operands of left-associative operators
    /// must bind at least this tightly to go unparenthesized.
    pub fn tighter(self) -> Self {
        match self {
            Self::Or => Self::And,
            Self::And => Self::Not,
            Self::Not => Self::Comparison,
            Self::Comparison => Self::Additive,
            Self::Additive => Self::Multiplicative,
            Self::Multiplicative => Self::Unary,
            Self::Unary | Self::Atom => Self::Atom,
        }
    }
}

impl Expression {
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Logical {
                op: LogicalOperator::Or,
                ..
            } => Precedence::Or,
            Self::Logical {
                op: LogicalOperator::And,
                ..
            } => Precedence::And,
            Self::Not(_) => Precedence::Not,
            Self::Comparison { .. } => Precedence::Comparison,
            Self::BinaryOp {
                op: BinaryOperator::Add | BinaryOperator::Sub,
                ..
            } => Precedence::Additive,
            Self::BinaryOp { .. } => Precedence::Multiplicative,
            Self::Negate(_) => Precedence::Unary,
            Self::Integer(_) | Self::Variable(_) | Self::String(_) | Self::Call { .. } => {
                Precedence::Atom
            }
        }
    }
}

/// Iterator of a `for` header. Only the 1, 2 and 3 argument shapes exist.
#[derive(Debug, PartialEq, Clone)]
pub enum RangeCall {
    Stop(Expression),
    StartStop(Expression, Expression),
    StartStopStep(Expression, Expression, Expression),
}

#[derive(Debug, PartialEq, Clone)]
pub enum PrintCall {
    /// `print("text")`
    String(String),
    /// `print("text {}".format(a, b))`
    Format {
        template: String,
        args: Vec<Expression>,
    },
}

pub type StatementList = Vec<Statement>;

#[derive(Debug, PartialEq, Clone)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum StatementKind {
    Assign {
        target: String,
        value: Expression,
    },
    /// `a = b = 0`: every target is declared, none initialised.
    Declare {
        names: Vec<String>,
    },
    Return(Option<Expression>),
    Break,
    If {
        condition: Expression,
        body: StatementList,
    },
    Elif {
        condition: Expression,
        body: StatementList,
    },
    Else {
        body: StatementList,
    },
    While {
        condition: Expression,
        body: StatementList,
    },
    For {
        target: String,
        range: RangeCall,
        body: StatementList,
    },
    FunctionDef {
        name: String,
        params: Vec<Expression>,
        body: StatementList,
    },
    Print(PrintCall),
    Expr(Expression),
}

impl StatementKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "assignment",
            Self::Declare { .. } => "declaration",
            Self::Return(_) => "return",
            Self::Break => "break",
            Self::If { .. } => "if",
            Self::Elif { .. } => "elif",
            Self::Else { .. } => "else",
            Self::While { .. } => "while",
            Self::For { .. } => "for",
            Self::FunctionDef { .. } => "function definition",
            Self::Print(_) => "print",
            Self::Expr(_) => "expression statement",
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub statements: StatementList,
}

use std::fmt::{self, Display, Formatter};

/// Possible tokens to find in the input string
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A non-negative decimal literal
    Number(f64),
    /// A variable name, to be resolved against the environment
    Variable(String),
    /// A known unary function name
    Function(String),
    /// A binary operator
    Op(Op),
    /// A `-` written where an operand is expected, negating the operand that
    /// follows. Only produced when converting to postfix.
    Neg,
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
}

impl Display for Token {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Number(value) => write!(fmt, "{}", value),
            Self::Variable(ref name) | Self::Function(ref name) => write!(fmt, "{}", name),
            Self::Op(op) => write!(fmt, "{}", op),
            Self::Neg => write!(fmt, "neg"),
            Self::LParen => write!(fmt, "("),
            Self::RParen => write!(fmt, ")"),
        }
    }
}

/// Allowed operators in the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Exp,
}

impl Op {
    /// Get the operator for `symbol`, if there is one
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '^' => Some(Self::Exp),
            _ => None,
        }
    }

    /// The character used to write this operator
    pub fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Exp => '^',
        }
    }

    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first.
    ///
    /// All operators are treated as left associative when converting to
    /// postfix, `^` included: `2 ^ 3 ^ 2` is `(2 ^ 3) ^ 2`.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Mul | Self::Div => 2,
            Self::Exp => 3,
        }
    }
}

impl Display for Op {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}", self.symbol())
    }
}

#[must_use]
/// Get the precedence rank of an operator written as `symbol`.
///
/// Anything that is not a binary operator ranks 0.
///
/// # Examples
///
/// ```
/// # use smartcalc::precedence;
/// assert_eq!(precedence("+"), 1);
/// assert_eq!(precedence("/"), 2);
/// assert_eq!(precedence("^"), 3);
/// assert_eq!(precedence("sin"), 0);
/// ```
pub fn precedence(symbol: &str) -> u8 {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Op::from_symbol(c).map_or(0, Op::precedence),
        _ => 0,
    }
}

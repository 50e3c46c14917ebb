use std::error;
use std::fmt::{self, Display, Formatter};

/// Error type for the smartcalc crate
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A piece of input that is not a number, name, operator or parenthesis
    UnknownToken(String),
    /// A `(` without its `)`, or the other way around
    MismatchedParentheses,
    /// An operator or function found fewer operands than it needs
    InsufficientOperands(String),
    /// A variable was used before being defined
    UndefinedVariable(String),
    /// Division with a zero divisor
    DivisionByZero,
    /// A function argument outside of the function domain
    Domain {
        /// Name of the function
        function: String,
        /// What was wrong with the argument
        message: String,
    },
    /// The expression did not reduce to exactly one value
    InvalidExpression,
    /// A name that can not be assigned to
    InvalidName(String),
}

/// Broad classification of an [`Error`](enum.Error.html)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error while splitting the input into tokens
    Lexical,
    /// Error in the structure of the expression
    Syntax,
    /// Error in the meaning of a well-formed expression
    Semantic,
}

impl Error {
    /// Build a domain error for `function`
    pub(crate) fn domain(function: &str, message: impl Into<String>) -> Self {
        Self::Domain {
            function: function.into(),
            message: message.into(),
        }
    }

    /// Get the kind of this error
    ///
    /// # Examples
    ///
    /// ```
    /// # use smartcalc::{Error, ErrorKind};
    /// assert_eq!(Error::DivisionByZero.kind(), ErrorKind::Semantic);
    /// assert_eq!(Error::MismatchedParentheses.kind(), ErrorKind::Syntax);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::UnknownToken(_) => ErrorKind::Lexical,
            Self::MismatchedParentheses | Self::InsufficientOperands(_) => ErrorKind::Syntax,
            Self::UndefinedVariable(_)
            | Self::DivisionByZero
            | Self::Domain { .. }
            | Self::InvalidExpression
            | Self::InvalidName(_) => ErrorKind::Semantic,
        }
    }
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::UnknownToken(ref token) => write!(fmt, "unknown token {}", token),
            Self::MismatchedParentheses => write!(fmt, "mismatched parentheses"),
            Self::InsufficientOperands(ref symbol) => {
                write!(fmt, "insufficient operands for {}", symbol)
            }
            Self::UndefinedVariable(ref name) => write!(fmt, "undefined variable {}", name),
            Self::DivisionByZero => write!(fmt, "division by zero"),
            Self::Domain {
                ref function,
                ref message,
            } => write!(fmt, "math domain error in {}: {}", function, message),
            Self::InvalidExpression => write!(fmt, "invalid expression"),
            Self::InvalidName(ref name) => write!(fmt, "invalid variable name '{}'", name),
        }
    }
}

impl error::Error for Error {}

impl Display for ErrorKind {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Lexical => write!(fmt, "lexical"),
            Self::Syntax => write!(fmt, "syntax"),
            Self::Semantic => write!(fmt, "semantic"),
        }
    }
}

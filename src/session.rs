use crate::environment::Environment;
use crate::error::Error;
use crate::expr::Expr;
use std::error;
use std::fmt::{self, Display, Formatter};
use tracing::debug;

/// Successful result of processing one line
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `name = expression` bound `value` to `name`
    Defined {
        /// Name of the variable
        name: String,
        /// Value of the expression
        value: f64,
    },
    /// An expression evaluated to this value
    Value(f64),
}

impl Outcome {
    /// The numeric value of the outcome
    pub fn value(&self) -> f64 {
        match *self {
            Self::Defined { value, .. } | Self::Value(value) => value,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Defined { ref name, value } => {
                write!(fmt, "Variable {} defined with value {:?}", name, value)
            }
            Self::Value(value) => write!(fmt, "{:?}", value),
        }
    }
}

/// Error while processing one line, tagged with what the line was doing
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The line was a variable definition
    Definition(Error),
    /// The line was a plain expression
    Calculation(Error),
}

impl SessionError {
    /// The underlying error
    pub fn error(&self) -> &Error {
        match *self {
            Self::Definition(ref error) | Self::Calculation(ref error) => error,
        }
    }
}

impl Display for SessionError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Definition(ref error) => write!(fmt, "Variable definition error: {}", error),
            Self::Calculation(ref error) => write!(fmt, "Calculation error: {}", error),
        }
    }
}

impl error::Error for SessionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(self.error())
    }
}

/// An interactive session, processing one line at a time.
///
/// The session owns the environment, so variables defined by a line are
/// available to all the following lines. A line that fails leaves the
/// environment untouched.
///
/// # Examples
///
/// ```
/// # use smartcalc::{Outcome, Session};
/// let mut session = Session::new();
/// assert_eq!(
///     session.process("x = 2 * 3").unwrap().to_string(),
///     "Variable x defined with value 6.0"
/// );
/// assert_eq!(session.process("x + 1"), Ok(Outcome::Value(7.0)));
///
/// let error = session.process("x / 0").unwrap_err();
/// assert_eq!(error.to_string(), "Calculation error: division by zero");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    env: Environment,
    last_result: Option<f64>,
}

impl Session {
    /// Create a session with the default environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session using `env`
    pub fn with_environment(env: Environment) -> Self {
        Self {
            env,
            last_result: None,
        }
    }

    /// Process a single line of input.
    ///
    /// A line containing `=` is a variable definition: the part before the
    /// first `=` is the name, and the part after is the expression. Any other
    /// line is an expression.
    pub fn process(&mut self, line: &str) -> Result<Outcome, SessionError> {
        let line = line.trim();
        let outcome = match line.split_once('=') {
            Some((name, expression)) => self
                .define(name.trim(), expression.trim())
                .map_err(SessionError::Definition)?,
            None => {
                let value = self.calculate(line).map_err(SessionError::Calculation)?;
                Outcome::Value(value)
            }
        };
        self.last_result = Some(outcome.value());
        Ok(outcome)
    }

    fn define(&mut self, name: &str, expression: &str) -> Result<Outcome, Error> {
        if !crate::is_variable(name, &self.env) {
            return Err(Error::InvalidName(name.into()));
        }
        let value = self.calculate(expression)?;
        self.env.define(name, value)?;
        debug!(name, value, "defined variable");
        Ok(Outcome::Defined {
            name: name.into(),
            value,
        })
    }

    fn calculate(&self, expression: &str) -> Result<f64, Error> {
        Expr::parse(expression, &self.env)?.eval(&self.env)
    }

    /// The value of the last line processed successfully
    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// The environment of this session
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Mutable access to the environment of this session
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }
}

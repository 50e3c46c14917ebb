use crate::environment::Environment;
use crate::evaluator::evaluate;
use crate::lexer::Lexer;
use crate::postfix::{convert, DisplayPostfix};
use crate::token::Token;
use crate::Error;
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

/// Evaluate a single expression from `input` in `env`.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed.
///
/// # Example
///
/// ```
/// # use smartcalc::{eval, Environment};
/// let mut env = Environment::new();
/// assert_eq!(eval("45 - 2^3", &env), Ok(37.0));
///
/// env.define("a", 5.0).unwrap();
/// assert_eq!(eval("3 * a", &env), Ok(15.0));
/// ```
pub fn eval(input: &str, env: &Environment) -> Result<f64, Error> {
    Expr::parse(input, env).and_then(|expr| expr.eval(env))
}

/// A parsed mathematical expression, stored in postfix order.
///
/// Parsing needs an environment to tell functions from variables, but
/// variables are only resolved when evaluating, so the same expression can be
/// evaluated many times while the variables change.
///
/// # Examples
/// ```
/// # use smartcalc::{Environment, Expr};
/// let mut env = Environment::new();
/// let expr = Expr::parse("3 / c + b", &env).unwrap();
///
/// env.define("c", 1.0).unwrap();
/// env.define("b", 5.0).unwrap();
/// assert_eq!(expr.eval(&env), Ok(8.0));
///
/// env.define("b", 10.0).unwrap();
/// assert_eq!(expr.eval(&env), Ok(13.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    postfix: Vec<Token>,
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`, using the
    /// functions known in `env`.
    ///
    /// # Examples
    /// ```
    /// # use smartcalc::{Environment, Expr};
    /// let env = Environment::new();
    /// // A valid expression
    /// assert!(Expr::parse("3 + 5 * 2", &env).is_ok());
    /// // an invalid expression
    /// assert!(Expr::parse("(3 + 5 * 2", &env).is_err());
    /// ```
    pub fn parse(expression: &str, env: &Environment) -> Result<Self, Error> {
        let postfix = convert(Lexer::new(expression, env))?;
        Ok(Self { postfix })
    }

    /// Evaluate the expression with the variables and functions of `env`.
    pub fn eval(&self, env: &Environment) -> Result<f64, Error> {
        evaluate(&self.postfix, env)
    }

    /// Get the names of all the variables used in this expression.
    ///
    /// # Examples
    /// ```
    /// # use smartcalc::{Environment, Expr};
    /// # use std::collections::HashSet;
    /// let env = Environment::new();
    /// let expr = Expr::parse("3 + 5 * 2", &env).unwrap();
    /// assert_eq!(expr.variables(), HashSet::new());
    ///
    /// let expr = Expr::parse("sqrt(a) + pi", &env).unwrap();
    /// assert_eq!(expr.variables(), HashSet::from(["a", "pi"]));
    /// ```
    pub fn variables(&self) -> HashSet<&str> {
        self.postfix
            .iter()
            .filter_map(|token| match *token {
                Token::Variable(ref name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The tokens of the expression, in postfix order
    pub fn tokens(&self) -> &[Token] {
        &self.postfix
    }
}

impl Display for Expr {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}", DisplayPostfix(&self.postfix))
    }
}

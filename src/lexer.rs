use crate::environment::Environment;
use crate::error::Error;
use crate::token::{Op, Token};
use std::iter::Peekable;
use std::str::Chars;
use tracing::trace;

#[must_use]
/// Check if `ident` is a valid variable name in `env`: a lowercase identifier
/// which is not the name of a function.
///
/// # Examples
///
/// ```
/// # use smartcalc::{is_variable, Environment};
/// let env = Environment::new();
/// assert_eq!(is_variable("radius", &env), true);
/// assert_eq!(is_variable("sinx", &env), true);
/// assert_eq!(is_variable("sin", &env), false);
/// assert_eq!(is_variable("Abc", &env), false);
/// ```
pub fn is_variable(ident: &str, env: &Environment) -> bool {
    is_identifier(ident) && !env.is_function(ident)
}

#[must_use]
/// Check if `ident` is the name of a function known in `env`
///
/// # Examples
///
/// ```
/// # use smartcalc::{is_function, Environment};
/// let env = Environment::new();
/// assert_eq!(is_function("sqrt", &env), true);
/// assert_eq!(is_function("sqr", &env), false);
/// ```
pub fn is_function(ident: &str, env: &Environment) -> bool {
    is_identifier(ident) && env.is_function(ident)
}

/// Check if `ident` is a lowercase identifier
pub(crate) fn is_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    // Check first char
    if !chars.next().map_or(false, is_identifier_start) {
        return false;
    }
    // Check all others
    chars.all(is_identifier_part)
}

/// An helper struct for lexing the input.
///
/// The lexer is an iterator producing the tokens one at a time, from left to
/// right. Identifiers are classified as functions or variables using the
/// functions known in the environment.
///
/// # Examples
///
/// ```
/// # use smartcalc::{Environment, Lexer, Op, Token};
/// let env = Environment::new();
/// let tokens: Result<Vec<_>, _> = Lexer::new("sqrt(x)*2", &env).collect();
/// assert_eq!(tokens, Ok(vec![
///     Token::Function("sqrt".into()),
///     Token::LParen,
///     Token::Variable("x".into()),
///     Token::RParen,
///     Token::Op(Op::Mul),
///     Token::Number(2.0),
/// ]));
/// ```
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    env: &'a Environment,
}

impl<'a> Lexer<'a> {
    /// Create a lexer for `string`, knowing the functions of `env`
    pub fn new(string: &'a str, env: &'a Environment) -> Lexer<'a> {
        Lexer {
            input: string.chars().peekable(),
            env,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        while self.input.peek().map_or(false, |c| c.is_whitespace()) {
            self.input.next();
        }

        let c = match self.input.next() {
            Some(c) => c,
            None => return Ok(None),
        };

        let token = match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if is_number_part(c) => {
                let literal = self.take_run(c, is_number_part);
                Token::Number(parse_number(&literal)?)
            }
            c if is_identifier_start(c) => {
                let ident = self.take_run(c, is_identifier_part);
                if self.env.is_function(&ident) {
                    Token::Function(ident)
                } else {
                    Token::Variable(ident)
                }
            }
            c => match Op::from_symbol(c) {
                Some(op) => Token::Op(op),
                None => {
                    let unknown = self.take_run(c, |c| !is_boundary(c));
                    return Err(Error::UnknownToken(unknown));
                }
            },
        };
        Ok(Some(token))
    }

    /// Collect `first` and all following characters accepted by `accept`
    fn take_run(&mut self, first: char, accept: impl Fn(char) -> bool) -> String {
        let mut value = String::new();
        value.push(first);
        while let Some(&c) = self.input.peek() {
            if accept(c) {
                self.input.next();
                value.push(c);
            } else {
                break;
            }
        }
        value
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token().transpose();
        if let Some(ref token) = token {
            trace!(?token, "lexed");
        }
        token
    }
}

/// Parse a run of digits containing at most one `.`
fn parse_number(literal: &str) -> Result<f64, Error> {
    let dots = literal.chars().filter(|&c| c == '.').count();
    if dots > 1 || literal == "." {
        return Err(Error::UnknownToken(literal.into()));
    }
    literal
        .parse()
        .map_err(|_| Error::UnknownToken(literal.into()))
}

/// Check if `c` can appear inside a number
fn is_number_part(c: char) -> bool {
    c == '.' || c.is_ascii_digit()
}

/// Check if `c` can appear at the first character of an identifier
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_lowercase()
}

/// Check if `c` can appear inside an identifier
fn is_identifier_part(c: char) -> bool {
    c.is_ascii_lowercase()
}

/// Check if `c` ends an unknown token
fn is_boundary(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')' || Op::from_symbol(c).is_some()
}

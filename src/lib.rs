#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

//! SmartCalc, a crate for interactive evaluation of mathematical expressions.
//!
//! The easiest way to use this crate is with a [`Session`](struct.Session.html),
//! which processes one line at a time and keeps the variables defined by
//! previous lines:
//!
//! ```
//! use smartcalc::{Outcome, Session};
//!
//! let mut session = Session::new();
//! assert_eq!(session.process("3 + 5 * 2"), Ok(Outcome::Value(13.0)));
//!
//! session.process("r = 2").unwrap();
//! assert_eq!(session.process("r ^ 2 * 3"), Ok(Outcome::Value(12.0)));
//! ```
//!
//! The [`eval`](fn.eval.html) function evaluates a single expression in a
//! given [`Environment`](struct.Environment.html):
//!
//! ```
//! use smartcalc::Environment;
//!
//! let mut env = Environment::new();
//! env.define("a", 3.5).unwrap();
//! assert_eq!(smartcalc::eval("2 * a", &env), Ok(7.0));
//! ```
//!
//! It is also possible to separate the parsing from the evaluation of an
//! expression with the [`Expr`](struct.Expr.html) type, or to run each step
//! of the pipeline by hand with [`Lexer`](struct.Lexer.html),
//! [`convert`](fn.convert.html) and [`evaluate`](fn.evaluate.html).
//!
//! ```
//! use smartcalc::{convert, evaluate, Environment, Lexer};
//!
//! let env = Environment::new();
//! let postfix = convert(Lexer::new("(1 + 2) * 4", &env)).unwrap();
//! assert_eq!(evaluate(&postfix, &env), Ok(12.0));
//! ```
//!
//! # Language definition
//!
//! The language implemented by smartcalc can contain the following elements:
//!
//! - non-negative decimal literals: `12`, `0.5`, `.5`, `3.`;
//! - left and right parenthesis;
//! - binary operators: `+` for addition, `-` for subtraction, `*` for
//!   multiplication, `/` for division and `^` for exponentiation
//!   (`f64::powf`);
//! - a prefix `-`, negating the operand that follows it: `-3`, `2 * -x`,
//!   `log(-1)`;
//! - variables: runs of lowercase ASCII letters. A name stops at the first
//!   other character, so `sin2` is `sin 2` and `x2` is `x` followed by `2`.
//!   `pi` and `e` are defined by default;
//! - unary function calls, with or without parenthesis: `sqrt(a)`, `sin 30`.
//!   See [`FUNCTIONS`](struct.FUNCTIONS.html) for the list of functions.
//!
//! `+` and `-` have the lowest precedence, then `*` and `/`, then `^`.
//! Operators of the same precedence are grouped from the left, including
//! `^`: `2 ^ 3 ^ 2` is `(2 ^ 3) ^ 2 = 64`. A function applies to the single
//! operand following it: `sin 30 + 1` is `sin(30) + 1`. So does a prefix
//! `-`, which binds tighter than `^`: `-2 ^ 2` is `(-2) ^ 2 = 4`.
//!
//! A line of the form `name = expression` defines a variable in a session.
//!
//! # Technical details
//!
//! smartcalc uses a simple Shunting-Yard algorithm to convert expressions to
//! postfix order, and evaluates them with a stack machine. It works only with
//! `f64` data. Division by zero, function arguments outside of the function
//! domain, and powers of finite numbers without a finite real result (like
//! `(-8) ^ 0.5` or `0 ^ -1`) are errors.

#[macro_use]
extern crate lazy_static;

mod environment;
mod error;
mod evaluator;
mod expr;
mod functions;
mod lexer;
mod postfix;
mod session;
mod token;

pub use environment::Environment;
pub use error::{Error, ErrorKind};
pub use evaluator::evaluate;
pub use expr::{eval, Expr};
pub use functions::{Function, FUNCTIONS};
pub use lexer::{is_function, is_variable, Lexer};
pub use postfix::convert;
pub use session::{Outcome, Session, SessionError};
pub use token::{precedence, Op, Token};

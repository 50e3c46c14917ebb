use crate::environment::Environment;
use crate::error::Error;
use crate::token::{Op, Token};
use tracing::debug;

/// Evaluate a sequence of tokens in postfix order with the variables and
/// functions of `env`.
///
/// Evaluation runs a stack machine over `postfix`: numbers and variables push
/// their value, operators pop their right then left operand, and functions
/// and negations pop their single argument. Exactly one value must remain at
/// the end.
///
/// # Examples
///
/// ```
/// # use smartcalc::{evaluate, Environment, Op, Token};
/// let env = Environment::new();
/// let postfix = [Token::Number(6.0), Token::Number(4.0), Token::Op(Op::Minus)];
/// assert_eq!(evaluate(&postfix, &env), Ok(2.0));
///
/// let postfix = [Token::Number(6.0), Token::Op(Op::Minus)];
/// assert!(evaluate(&postfix, &env).is_err());
/// ```
pub fn evaluate(postfix: &[Token], env: &Environment) -> Result<f64, Error> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match *token {
            Token::Number(value) => stack.push(value),
            Token::Variable(ref name) => {
                let value = env
                    .get(name)
                    .ok_or_else(|| Error::UndefinedVariable(name.clone()))?;
                stack.push(value);
            }
            Token::Function(ref name) => {
                let function = env
                    .function(name)
                    .ok_or_else(|| Error::UnknownToken(name.clone()))?;
                let argument = stack
                    .pop()
                    .ok_or_else(|| Error::InsufficientOperands(name.clone()))?;
                stack.push(function(argument)?);
            }
            Token::Neg => {
                let operand = stack
                    .pop()
                    .ok_or_else(|| Error::InsufficientOperands("-".into()))?;
                stack.push(-operand);
            }
            Token::Op(op) => {
                let (left, right) = match (stack.pop(), stack.pop()) {
                    (Some(right), Some(left)) => (left, right),
                    _ => return Err(Error::InsufficientOperands(op.to_string())),
                };
                stack.push(apply(op, left, right)?);
            }
            Token::LParen | Token::RParen => return Err(Error::UnknownToken(token.to_string())),
        }
    }

    if stack.len() == 1 {
        let value = stack[0];
        debug!(value, "evaluated");
        Ok(value)
    } else {
        Err(Error::InvalidExpression)
    }
}

/// Compute `left <op> right`
fn apply(op: Op, left: f64, right: f64) -> Result<f64, Error> {
    match op {
        Op::Plus => Ok(left + right),
        Op::Minus => Ok(left - right),
        Op::Mul => Ok(left * right),
        Op::Div => {
            if right == 0.0 {
                return Err(Error::DivisionByZero);
            }
            Ok(left / right)
        }
        Op::Exp => power(left, right),
    }
}

/// `base ^ exponent`, failing when finite inputs have no finite real result
fn power(base: f64, exponent: f64) -> Result<f64, Error> {
    let value = base.powf(exponent);
    if value.is_finite() || !base.is_finite() || !exponent.is_finite() {
        return Ok(value);
    }
    if value.is_nan() {
        Err(Error::domain("^", "result is not a real number"))
    } else if base == 0.0 {
        Err(Error::domain("^", "zero can not be raised to a negative power"))
    } else {
        Err(Error::domain("^", "result is too large"))
    }
}

#[cfg(test)]
mod tests {
    use super::evaluate;
    use crate::environment::Environment;
    use crate::error::Error;
    use crate::lexer::Lexer;
    use crate::postfix::convert;
    use crate::token::{Op, Token};
    use test_case::test_case;

    fn run(input: &str, env: &Environment) -> Result<f64, Error> {
        let postfix = convert(Lexer::new(input, env))?;
        evaluate(&postfix, env)
    }

    #[test_case("3 + 5" => Ok(8.0) ; "addition")]
    #[test_case("2 - 5" => Ok(-3.0) ; "subtraction")]
    #[test_case("2 * 5" => Ok(10.0) ; "multiplication")]
    #[test_case("10 / 4" => Ok(2.5) ; "division")]
    #[test_case("2 ^ 10" => Ok(1024.0) ; "power")]
    #[test_case("4 ^ 0.5" => Ok(2.0) ; "fractional power")]
    #[test_case("2 ^ 3 ^ 2" => Ok(64.0) ; "power groups left to right")]
    #[test_case("2 + 3 * 4" => Ok(14.0) ; "precedence")]
    #[test_case("(2 + 3) * 4" => Ok(20.0) ; "parentheses")]
    #[test_case("10 - 4 - 3" => Ok(3.0) ; "subtraction groups left to right")]
    #[test_case("factorial(3)" => Ok(6.0) ; "factorial")]
    #[test_case("factorial 4 + 1" => Ok(25.0) ; "function applies to one operand")]
    #[test_case("sqrt(3 * 3 + 4 * 4)" => Ok(5.0) ; "function of an expression")]
    #[test_case("abs(0 - 2)" => Ok(2.0) ; "abs")]
    #[test_case("abs(-2)" => Ok(2.0) ; "abs of a negation")]
    #[test_case("-3 + 1" => Ok(-2.0) ; "leading negation")]
    #[test_case("2 * -3" => Ok(-6.0) ; "negation after an operator")]
    #[test_case("1 - -2" => Ok(3.0) ; "subtracting a negation")]
    #[test_case("-(1 + 2) * 2" => Ok(-6.0) ; "negated group")]
    #[test_case("-2 ^ 2" => Ok(4.0) ; "negation binds tighter than power")]
    #[test_case("2 ^ -1" => Ok(0.5) ; "negative exponent")]
    #[test_case("(-8) ^ 2" => Ok(64.0) ; "negative base with integer exponent")]
    fn values(input: &str) -> Result<f64, Error> {
        run(input, &Environment::new())
    }

    #[test_case("10 / 0" => Err(Error::DivisionByZero) ; "division by zero")]
    #[test_case("10 / (2 - 2)" => Err(Error::DivisionByZero) ; "division by computed zero")]
    #[test_case("y + 1" => Err(Error::UndefinedVariable("y".into())) ; "undefined variable")]
    #[test_case("1 +" => Err(Error::InsufficientOperands("+".into())) ; "missing operand")]
    #[test_case("* 2" => Err(Error::InsufficientOperands("*".into())) ; "missing left operand")]
    #[test_case("sqrt" => Err(Error::InsufficientOperands("sqrt".into())) ; "function without argument")]
    #[test_case("-" => Err(Error::InsufficientOperands("-".into())) ; "negation without operand")]
    #[test_case("3 -" => Err(Error::InsufficientOperands("-".into())) ; "trailing minus")]
    #[test_case("1 2" => Err(Error::InvalidExpression) ; "two values left")]
    #[test_case("" => Err(Error::InvalidExpression) ; "empty expression")]
    fn errors(input: &str) -> Result<f64, Error> {
        run(input, &Environment::new())
    }

    #[test]
    fn domain_errors() {
        let env = Environment::new();
        for input in &["log(-1)", "sqrt(-4)", "factorial(-1)", "factorial(1.5)"] {
            match run(input, &env) {
                Err(Error::Domain { .. }) => {}
                other => panic!("expected a domain error for {}, got {:?}", input, other),
            }
        }
    }

    #[test_case("(-8) ^ 0.5" ; "even root of a negative number")]
    #[test_case("(0 - 1) ^ (1 / 3)" ; "fractional power of a negative number")]
    #[test_case("0 ^ -1" ; "zero to a negative power")]
    #[test_case("10 ^ 400" ; "overflow")]
    fn power_domain_errors(input: &str) {
        match run(input, &Environment::new()) {
            Err(Error::Domain { function, .. }) => assert_eq!(function, "^"),
            other => panic!("expected a domain error for {}, got {:?}", input, other),
        }
    }

    #[test]
    fn literals() {
        let env = Environment::new();
        for &(input, expected) in &[("0", 0.0), ("42", 42.0), ("3.25", 3.25), (".5", 0.5)] {
            assert_eq!(run(input, &env), Ok(expected));
        }
    }

    #[test]
    fn variables() {
        let mut env = Environment::new();
        env.define("x", 5.0).unwrap();
        assert_eq!(run("x + 1", &env), Ok(6.0));
        assert_eq!(run("2 * pi", &env), Ok(2.0 * std::f64::consts::PI));
        let log_e = run("log(e)", &env).unwrap();
        assert!((log_e - 1.0).abs() < 1e-12);
    }

    #[test]
    fn repeatable() {
        let mut env = Environment::new();
        env.define("a", 1.5).unwrap();
        let postfix = convert(Lexer::new("sin(a * 20) / a ^ 2", &env)).unwrap();
        let first = evaluate(&postfix, &env);
        assert!(first.is_ok());
        assert_eq!(first, evaluate(&postfix, &env));
    }

    #[test]
    fn parentheses_are_rejected() {
        let env = Environment::new();
        let postfix = [Token::Number(1.0), Token::LParen];
        assert_eq!(
            evaluate(&postfix, &env),
            Err(Error::UnknownToken("(".into()))
        );
        let postfix = [Token::Number(1.0), Token::Number(1.0), Token::Op(Op::Div)];
        assert_eq!(evaluate(&postfix, &env), Ok(1.0));
    }

    #[test]
    fn unknown_function() {
        let env = Environment::new();
        let postfix = [Token::Number(1.0), Token::Function("gamma".into())];
        assert_eq!(
            evaluate(&postfix, &env),
            Err(Error::UnknownToken("gamma".into()))
        );
    }
}

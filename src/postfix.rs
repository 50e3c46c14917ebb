use crate::error::Error;
use crate::token::{Op, Token};
use tracing::trace;

/// Convert a stream of tokens in infix order to postfix (reverse polish)
/// order, using the Shunting-Yard algorithm.
///
/// The first error in `tokens` is returned as is. Operators with the same
/// precedence are grouped from left to right, and functions apply to the
/// single operand that follows them. A `-` found where an operand is
/// expected (at the start, after `(`, after an operator or after a function)
/// is a negation, and applies to the single operand that follows it too.
///
/// # Examples
///
/// ```
/// # use smartcalc::{convert, Environment, Lexer, Op, Token};
/// let env = Environment::new();
/// let postfix = convert(Lexer::new("(1 + 2) * 3", &env)).unwrap();
/// assert_eq!(postfix, vec![
///     Token::Number(1.0),
///     Token::Number(2.0),
///     Token::Op(Op::Plus),
///     Token::Number(3.0),
///     Token::Op(Op::Mul),
/// ]);
///
/// let postfix = convert(Lexer::new("2 * -3", &env)).unwrap();
/// assert_eq!(postfix, vec![
///     Token::Number(2.0),
///     Token::Number(3.0),
///     Token::Neg,
///     Token::Op(Op::Mul),
/// ]);
/// ```
pub fn convert<I>(tokens: I) -> Result<Vec<Token>, Error>
where
    I: IntoIterator<Item = Result<Token, Error>>,
{
    let mut output = Vec::new();
    let mut operators = Vec::new();
    let mut expect_operand = true;

    'tokens: for token in tokens {
        let token = token?;
        match token {
            Token::Number(_) | Token::Variable(_) => {
                output.push(token);
                expect_operand = false;
            }
            Token::Op(Op::Minus) if expect_operand => operators.push(Token::Neg),
            Token::Function(_) | Token::Neg | Token::LParen => {
                operators.push(token);
                expect_operand = true;
            }
            Token::Op(o1) => {
                'operators: while let Some(top) = operators.last() {
                    let pop_me = match *top {
                        Token::Op(o2) => o2.precedence() >= o1.precedence(),
                        Token::Function(_) | Token::Neg => true,
                        _ => false,
                    };
                    if pop_me {
                        output.extend(operators.pop());
                    } else {
                        break 'operators;
                    }
                }
                operators.push(token);
                expect_operand = true;
            }
            Token::RParen => {
                expect_operand = false;
                while let Some(top) = operators.pop() {
                    if top == Token::LParen {
                        while let Some(Token::Function(_) | Token::Neg) = operators.last() {
                            output.extend(operators.pop());
                        }
                        continue 'tokens;
                    }
                    output.push(top);
                }
                return Err(Error::MismatchedParentheses);
            }
        }
    }

    while let Some(token) = operators.pop() {
        if token == Token::LParen {
            return Err(Error::MismatchedParentheses);
        }
        output.push(token);
    }

    trace!(postfix = %DisplayPostfix(&output), "converted");
    Ok(output)
}

/// Space separated display of a postfix sequence
pub(crate) struct DisplayPostfix<'a>(pub &'a [Token]);

impl std::fmt::Display for DisplayPostfix<'_> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(fmt, " ")?;
            }
            write!(fmt, "{}", token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{convert, DisplayPostfix};
    use crate::environment::Environment;
    use crate::error::Error;
    use crate::lexer::Lexer;
    use crate::token::Token;
    use test_case::test_case;

    fn postfix(input: &str) -> Result<String, Error> {
        let env = Environment::new();
        let tokens = convert(Lexer::new(input, &env))?;
        Ok(DisplayPostfix(&tokens).to_string())
    }

    #[test_case("1" => Ok("1".into()) ; "single number")]
    #[test_case("2 + 3 * 4" => Ok("2 3 4 * +".into()) ; "precedence")]
    #[test_case("(2 + 3) * 4" => Ok("2 3 + 4 *".into()) ; "parentheses override precedence")]
    #[test_case("1 - 2 + 3" => Ok("1 2 - 3 +".into()) ; "left associative")]
    #[test_case("8 / 4 / 2" => Ok("8 4 / 2 /".into()) ; "division is left associative")]
    #[test_case("2 ^ 3 ^ 2" => Ok("2 3 ^ 2 ^".into()) ; "power ties pop too")]
    #[test_case("2 * 3 ^ 2" => Ok("2 3 2 ^ *".into()) ; "power binds tighter")]
    #[test_case("sqrt(16) + 1" => Ok("16 sqrt 1 +".into()) ; "function call")]
    #[test_case("sin 30 + 1" => Ok("30 sin 1 +".into()) ; "function without parentheses")]
    #[test_case("sqrt(a + b) * 2" => Ok("a b + sqrt 2 *".into()) ; "function owns its group")]
    #[test_case("abs(floor(x))" => Ok("x floor abs".into()) ; "nested functions")]
    #[test_case("((1))" => Ok("1".into()) ; "nested parentheses")]
    #[test_case("" => Ok("".into()) ; "empty input")]
    #[test_case("-3 + 1" => Ok("3 neg 1 +".into()) ; "leading minus is a negation")]
    #[test_case("2 * -3" => Ok("2 3 neg *".into()) ; "minus after an operator")]
    #[test_case("1 - -2" => Ok("1 2 neg -".into()) ; "binary then prefix minus")]
    #[test_case("log(-1)" => Ok("1 neg log".into()) ; "minus after a parenthesis")]
    #[test_case("sqrt -4" => Ok("4 neg sqrt".into()) ; "minus after a function")]
    #[test_case("-(1 + 2)" => Ok("1 2 + neg".into()) ; "negated group")]
    #[test_case("-2 ^ 2" => Ok("2 neg 2 ^".into()) ; "negation binds tighter than power")]
    #[test_case("- -x" => Ok("x neg neg".into()) ; "double negation")]
    #[test_case("(1 + 2" => Err(Error::MismatchedParentheses) ; "unclosed parenthesis")]
    #[test_case("1 + 2)" => Err(Error::MismatchedParentheses) ; "unopened parenthesis")]
    #[test_case(")(" => Err(Error::MismatchedParentheses) ; "reversed parentheses")]
    #[test_case("1 # 2" => Err(Error::UnknownToken("#".into())) ; "unknown token")]
    fn conversion(input: &str) -> Result<String, Error> {
        postfix(input)
    }

    #[test]
    fn no_parentheses_in_output() {
        let env = Environment::new();
        let inputs = ["((1 + 2) * (3 - 4)) / 5", "sqrt((2))", "(((x)))^(2)"];
        for input in &inputs {
            let tokens = convert(Lexer::new(input, &env)).unwrap();
            assert!(tokens
                .iter()
                .all(|token| *token != Token::LParen && *token != Token::RParen));
        }
    }
}

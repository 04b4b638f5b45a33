//! Orders a token stream into postfix notation by operator precedence.

use log::debug;

use super::tokenizer::{preprocess, Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unbalanced parentheses at position {position}")]
    UnbalancedParens { position: usize },
    #[error("unexpected token {token:?} at position {position}")]
    UnexpectedToken { token: char, position: usize },
}

/// Converts an infix token sequence with explicit concatenation into postfix
/// order using the shunting-yard algorithm.
///
/// # Example
///
/// ```
/// use thompson_compiler::parser::to_postfix;
/// use thompson_compiler::tokenizer::preprocess;
///
/// let tokens = preprocess("a|bc*").unwrap();
/// let postfix = to_postfix(&tokens)
///     .unwrap()
///     .iter()
///     .map(ToString::to_string)
///     .collect::<String>();
///
/// assert_eq!("abc*.|", postfix);
/// ```
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, ParseError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Token> = Vec::new();

    for &token in tokens {
        match token.kind() {
            TokenKind::Literal(_) | TokenKind::Epsilon => output.push(token),
            TokenKind::LeftParen => operators.push(token),
            TokenKind::RightParen => loop {
                match operators.pop() {
                    Some(open) if open.kind() == TokenKind::LeftParen => break,
                    Some(op) => output.push(op),
                    None => {
                        return Err(ParseError::UnbalancedParens {
                            position: token.position(),
                        })
                    }
                }
            },
            TokenKind::Operator(op) => {
                // pop anything binding at least as tightly, stopping at a group.
                while let Some(&top) = operators.last() {
                    match top.kind() {
                        TokenKind::Operator(top_op) if top_op.precedence() >= op.precedence() => {
                            output.push(top);
                            operators.pop();
                        }
                        _ => break,
                    }
                }

                operators.push(token);
            }
        }
    }

    while let Some(token) = operators.pop() {
        match token.kind() {
            TokenKind::Operator(_) => output.push(token),
            _ => {
                return Err(ParseError::UnbalancedParens {
                    position: token.position(),
                })
            }
        }
    }

    Ok(output)
}

/// Tokenizes a pattern and returns its tokens in postfix order.
pub fn parse(input: &str) -> Result<Vec<Token>, ParseError> {
    let tokens = preprocess(input)?;
    let postfix = to_postfix(&tokens)?;

    debug!(
        "parsed {:?} into postfix {}",
        input,
        postfix.iter().map(ToString::to_string).collect::<String>()
    );
    Ok(postfix)
}

// infix -> postfix conversion
// 1. make every implicit concatenation explicit
// 2. shunting-yard over the explicit form, using the precedences in Token::precedence

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::token::{render, tokenize, Token};
use crate::validate::ValidationError;

/// Inserts `Token::Concat` wherever two operands are juxtaposed, e.g.
/// `a(b|c)*d` becomes `a.(b|c)*.d`.
pub fn insert_concat(tokens: &[Token]) -> Vec<Token> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len() * 2);
    for (i, token) in tokens.iter().copied().enumerate() {
        output.push(token);
        if let Some(next) = tokens.get(i + 1) {
            if token.ends_operand() && next.starts_operand() {
                output.push(Token::Concat);
            }
        }
    }

    output
}

/// String-level form of [`insert_concat`].
pub fn expand(expression: &str) -> Result<String, ValidationError> {
    let tokens = tokenize(expression)?;
    Ok(render(&insert_concat(&tokens)))
}

/// A regular expression in reverse polish form. Contains no parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postfix {
    tokens: Vec<Token>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParsePostfixError {
    #[error("`{found}` at position {position} cannot appear in postfix form")]
    InvalidToken { found: char, position: usize },
}

impl Postfix {
    /// Shunting-yard over an already concatenation-expanded token sequence.
    /// Arity is not checked, a malformed sequence surfaces later as a
    /// builder error.
    pub fn from_infix(tokens: &[Token]) -> Postfix {
        let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
        let mut operators: Vec<Token> = Vec::new();

        for token in tokens.iter().copied() {
            match token {
                Token::Symbol(_) => output.push(token),
                Token::LeftParen => operators.push(token),
                Token::RightParen => {
                    while let Some(op) = operators.pop() {
                        if op == Token::LeftParen {
                            break;
                        }
                        output.push(op);
                    }
                }
                op => {
                    let precedence = op.precedence();
                    while let Some(top) = operators.last().copied() {
                        if top == Token::LeftParen || top.precedence() < precedence {
                            break;
                        }
                        output.push(top);
                        operators.pop();
                    }
                    operators.push(op);
                }
            }
        }

        // a `(` can only be left over when validation was skipped
        while let Some(op) = operators.pop() {
            if op != Token::LeftParen {
                output.push(op);
            }
        }

        Postfix { tokens: output }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(&self.tokens))
    }
}

impl FromStr for Postfix {
    type Err = ParsePostfixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s
            .chars()
            .enumerate()
            .map(|(position, found)| match Token::from_char(found) {
                Some(Token::LeftParen) | Some(Token::RightParen) | None => {
                    Err(ParsePostfixError::InvalidToken { found, position })
                }
                Some(token) => Ok(token),
            })
            .collect::<Result<Vec<Token>, _>>()?;

        Ok(Postfix { tokens })
    }
}

// purely syntactic checks run before any construction work
// operator arity is not checked here, the builder reports a stack
// underflow for expressions such as `a|` or `*a`

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenImbalance {
    TooManyClosing,
    Unclosed,
}

impl fmt::Display for ParenImbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParenImbalance::TooManyClosing => write!(f, "too many closing parentheses"),
            ParenImbalance::Unclosed => write!(f, "unclosed parentheses"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unbalanced parentheses: {0}")]
    UnbalancedParens(ParenImbalance),
    #[error("Invalid character `{found}` in regex at position {position}")]
    InvalidCharacter { found: char, position: usize },
    #[error("Regex cannot be empty")]
    EmptyInput,
}

pub(crate) fn is_operator_char(c: char) -> bool {
    matches!(c, '|' | '*' | '+' | '?' | '(' | ')' | '.')
}

/// Symbols are single ASCII letters or digits.
pub fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Checks parenthesis balance, then the alphabet, then emptiness, in that
/// order, returning the first failure found.
pub fn validate(expression: &str) -> Result<(), ValidationError> {
    let mut open_parens: Vec<usize> = Vec::new();
    for (position, c) in expression.chars().enumerate() {
        match c {
            '(' => open_parens.push(position),
            ')' => {
                if open_parens.pop().is_none() {
                    return Err(ValidationError::UnbalancedParens(
                        ParenImbalance::TooManyClosing,
                    ));
                }
            }
            _ => (),
        }
    }
    if !open_parens.is_empty() {
        return Err(ValidationError::UnbalancedParens(ParenImbalance::Unclosed));
    }

    let invalid = expression
        .chars()
        .enumerate()
        .find(|(_, c)| !is_symbol_char(*c) && !is_operator_char(*c));
    if let Some((position, found)) = invalid {
        return Err(ValidationError::InvalidCharacter { found, position });
    }

    if expression.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    Ok(())
}

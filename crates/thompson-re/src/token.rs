use std::fmt;

use crate::validate::{is_symbol_char, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Symbol(char),
    Concat,
    Alternation,
    Star,
    Plus,
    Optional,
    LeftParen,
    RightParen,
}

impl Token {
    pub fn from_char(c: char) -> Option<Token> {
        let token = match c {
            '.' => Token::Concat,
            '|' => Token::Alternation,
            '*' => Token::Star,
            '+' => Token::Plus,
            '?' => Token::Optional,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            c if is_symbol_char(c) => Token::Symbol(c),
            _ => return None,
        };
        Some(token)
    }

    pub fn as_char(self) -> char {
        match self {
            Token::Symbol(c) => c,
            Token::Concat => '.',
            Token::Alternation => '|',
            Token::Star => '*',
            Token::Plus => '+',
            Token::Optional => '?',
            Token::LeftParen => '(',
            Token::RightParen => ')',
        }
    }

    // parentheses are structural and have no precedence
    pub(crate) fn precedence(self) -> Option<u8> {
        match self {
            Token::Star | Token::Plus | Token::Optional => Some(3),
            Token::Concat => Some(2),
            Token::Alternation => Some(1),
            Token::Symbol(_) | Token::LeftParen | Token::RightParen => None,
        }
    }

    pub(crate) fn is_unary(self) -> bool {
        matches!(self, Token::Star | Token::Plus | Token::Optional)
    }

    // can this token close an operand, i.e. stand on the left of an implicit concatenation
    pub(crate) fn ends_operand(self) -> bool {
        matches!(self, Token::Symbol(_) | Token::RightParen) || self.is_unary()
    }

    pub(crate) fn starts_operand(self) -> bool {
        matches!(self, Token::Symbol(_) | Token::LeftParen)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

pub fn tokenize(expression: &str) -> Result<Vec<Token>, ValidationError> {
    expression
        .chars()
        .enumerate()
        .map(|(position, found)| {
            Token::from_char(found).ok_or(ValidationError::InvalidCharacter { found, position })
        })
        .collect()
}

pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.as_char()).collect()
}

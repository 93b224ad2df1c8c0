use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use thompson_util::make_idx_type;

use crate::postfix::Postfix;
use crate::token::Token;
use crate::validate::ValidationError;

// pointer-based graphs in safe rust are somewhat tricky, star and plus
// produce cycles, so states live in an arena and refer to each other by index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub(crate) transitions: BTreeMap<char, BTreeSet<StateId>>,
    pub(crate) epsilon: BTreeSet<StateId>,
}

make_idx_type!(pub StateId, State);

impl State {
    pub fn transitions(&self) -> &BTreeMap<char, BTreeSet<StateId>> {
        &self.transitions
    }

    pub fn epsilon(&self) -> &BTreeSet<StateId> {
        &self.epsilon
    }

    fn add_transition(&mut self, symbol: char, next: StateId) {
        self.transitions.entry(symbol).or_default().insert(next);
    }

    fn add_epsilon(&mut self, next: StateId) {
        self.epsilon.insert(next);
    }
}

/// A sub-automaton with exactly one entry and exactly one accepting exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub start: StateId,
    pub accept: StateId,
}

/// A complete NFA. Immutable once built, so it may be shared by any number
/// of concurrent simulations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    pub(crate) states: Vec<State>,
    pub(crate) start: StateId,
    pub(crate) accept: StateId,
}

impl Automaton {
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Compiles a postfix expression with Thompson's construction.
    pub fn from_postfix(postfix: &Postfix) -> Result<Automaton, CompileError> {
        Builder::new().build(postfix.tokens())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("invalid regex: {0}")]
    Validation(#[from] ValidationError),
    #[error("{}", underflow_message(.operator, .position))]
    StackUnderflow {
        operator: Option<Token>,
        position: usize,
    },
    #[error("{0} fragments left over after construction, expected exactly one")]
    UnconsumedFragments(usize),
    #[error("unexpected `{token}` at postfix position {position}")]
    UnexpectedToken { token: Token, position: usize },
}

fn underflow_message(operator: &Option<Token>, position: &usize) -> String {
    match operator {
        Some(op) => format!("operator `{}` at postfix position {} is missing an operand", op, position),
        None => "expression contains no operands".to_string(),
    }
}

// builds the automaton bottom-up with a stack of fragments
// invariant: every fragment on `stack` has one start and one accept state,
// and its accept state has no outgoing edges yet
#[derive(Debug, Default)]
pub struct Builder {
    states: Vec<State>,
    stack: Vec<Fragment>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    fn new_state(&mut self) -> StateId {
        StateId::from_push(&mut self.states, State::default())
    }

    fn pop(&mut self, operator: Token, position: usize) -> Result<Fragment, CompileError> {
        self.stack.pop().ok_or(CompileError::StackUnderflow {
            operator: Some(operator),
            position,
        })
    }

    // pops (left, right), the right operand is on top of the stack
    fn pop_pair(&mut self, operator: Token, position: usize) -> Result<(Fragment, Fragment), CompileError> {
        let right = self.pop(operator, position)?;
        let left = self.pop(operator, position)?;
        Ok((left, right))
    }

    fn literal(&mut self, symbol: char) -> Fragment {
        let start = self.new_state();
        let accept = self.new_state();
        self.states[start].add_transition(symbol, accept);

        Fragment { start, accept }
    }

    // zero or more
    fn star(&mut self, inner: Fragment) -> Fragment {
        let start = self.new_state();
        let accept = self.new_state();
        self.states[start].add_epsilon(inner.start);
        self.states[start].add_epsilon(accept);
        self.states[inner.accept].add_epsilon(inner.start);
        self.states[inner.accept].add_epsilon(accept);

        Fragment { start, accept }
    }

    // one or more, the new start has no bypass edge
    fn plus(&mut self, inner: Fragment) -> Fragment {
        let start = self.new_state();
        let accept = self.new_state();
        self.states[start].add_epsilon(inner.start);
        self.states[inner.accept].add_epsilon(inner.start);
        self.states[inner.accept].add_epsilon(accept);

        Fragment { start, accept }
    }

    // zero or one, no loop back
    fn optional(&mut self, inner: Fragment) -> Fragment {
        let start = self.new_state();
        let accept = self.new_state();
        self.states[start].add_epsilon(inner.start);
        self.states[start].add_epsilon(accept);
        self.states[inner.accept].add_epsilon(accept);

        Fragment { start, accept }
    }

    fn alternate(&mut self, left: Fragment, right: Fragment) -> Fragment {
        let start = self.new_state();
        let accept = self.new_state();
        self.states[start].add_epsilon(left.start);
        self.states[start].add_epsilon(right.start);
        self.states[left.accept].add_epsilon(accept);
        self.states[right.accept].add_epsilon(accept);

        Fragment { start, accept }
    }

    // no new states
    fn concat(&mut self, left: Fragment, right: Fragment) -> Fragment {
        self.states[left.accept].add_epsilon(right.start);

        Fragment {
            start: left.start,
            accept: right.accept,
        }
    }

    fn apply(&mut self, token: Token, position: usize) -> Result<Fragment, CompileError> {
        let fragment = match token {
            Token::Symbol(c) => self.literal(c),
            Token::Star => {
                let inner = self.pop(token, position)?;
                self.star(inner)
            }
            Token::Plus => {
                let inner = self.pop(token, position)?;
                self.plus(inner)
            }
            Token::Optional => {
                let inner = self.pop(token, position)?;
                self.optional(inner)
            }
            Token::Alternation => {
                let (left, right) = self.pop_pair(token, position)?;
                self.alternate(left, right)
            }
            Token::Concat => {
                let (left, right) = self.pop_pair(token, position)?;
                self.concat(left, right)
            }
            Token::LeftParen | Token::RightParen => {
                return Err(CompileError::UnexpectedToken { token, position });
            }
        };

        Ok(fragment)
    }

    pub fn build(mut self, postfix: &[Token]) -> Result<Automaton, CompileError> {
        for (position, token) in postfix.iter().copied().enumerate() {
            let fragment = self.apply(token, position)?;
            self.stack.push(fragment);
        }

        let whole = self.stack.pop().ok_or(CompileError::StackUnderflow {
            operator: None,
            position: postfix.len(),
        })?;
        if !self.stack.is_empty() {
            return Err(CompileError::UnconsumedFragments(self.stack.len() + 1));
        }

        Ok(Automaton {
            states: self.states,
            start: whole.start,
            accept: whole.accept,
        })
    }
}

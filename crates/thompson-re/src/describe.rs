use std::fmt;

use crate::nfa::{Automaton, StateId};

pub const EPSILON_LABEL: &str = "ε";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Symbol(char),
    Epsilon,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Symbol(c) => write!(f, "{}", c),
            Label::Epsilon => write!(f, "{}", EPSILON_LABEL),
        }
    }
}

/// Display identifiers for the states of one automaton. Assigned in
/// depth-first preorder from the start state, so the start state is always
/// `S0` and identical automatons always get identical ids.
#[derive(Debug, Clone)]
pub struct DisplayIds {
    // arena index -> display number, None for states unreachable from start
    ids: Vec<Option<usize>>,
    order: Vec<StateId>,
}

impl DisplayIds {
    pub fn new(automaton: &Automaton) -> DisplayIds {
        let mut ids: Vec<Option<usize>> = vec![None; automaton.len()];
        let mut order: Vec<StateId> = Vec::with_capacity(automaton.len());
        let mut stack: Vec<StateId> = vec![automaton.start()];

        while let Some(state) = stack.pop() {
            if ids[state.index()].is_some() {
                continue;
            }
            ids[state.index()] = Some(order.len());
            order.push(state);

            // pushed in reverse so that the first edge is explored first
            let successors: Vec<StateId> = edges(automaton, state).map(|(_, next)| next).collect();
            stack.extend(successors.into_iter().rev());
        }

        DisplayIds { ids, order }
    }

    pub fn get(&self, state: StateId) -> Option<usize> {
        self.ids.get(state.index()).copied().flatten()
    }

    pub fn name(&self, state: StateId) -> String {
        match self.get(state) {
            Some(id) => format!("S{}", id),
            None => format!("unreachable({})", state.index()),
        }
    }

    /// Reachable states in display order.
    pub fn order(&self) -> &[StateId] {
        &self.order
    }
}

/// Outgoing edges of `state`: symbol transitions ordered by symbol and then
/// target, followed by epsilon transitions ordered by target.
pub fn edges(automaton: &Automaton, state: StateId) -> impl Iterator<Item = (Label, StateId)> + '_ {
    let state = automaton.state(state);
    let labelled = state
        .transitions()
        .iter()
        .flat_map(|(c, targets)| targets.iter().map(move |next| (Label::Symbol(*c), *next)));
    let epsilon = state.epsilon().iter().map(|next| (Label::Epsilon, *next));

    labelled.chain(epsilon)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub transitions: Vec<String>,
    pub start: String,
    pub accept: String,
}

impl Description {
    pub fn transition_text(&self) -> String {
        self.transitions.join("\n")
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for transition in &self.transitions {
            writeln!(f, "{}", transition)?;
        }
        writeln!(f)?;
        writeln!(f, "Start: {}", self.start)?;
        write!(f, "Accept: {}", self.accept)
    }
}

impl Automaton {
    pub fn describe(&self) -> Description {
        let ids = DisplayIds::new(self);
        let mut transitions: Vec<String> = Vec::new();
        for state in ids.order().iter().copied() {
            for (label, next) in edges(self, state) {
                transitions.push(format!("{} -- {} --> {}", ids.name(state), label, ids.name(next)));
            }
        }

        Description {
            transitions,
            start: ids.name(self.start()),
            accept: ids.name(self.accept()),
        }
    }
}

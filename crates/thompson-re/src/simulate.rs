use std::collections::VecDeque;

use bit_set::BitSet;

use crate::nfa::{Automaton, State, StateId};

// basic BFS to compute epsilon closure, in place
// the visited set makes it terminate on the cycles produced by star and plus
fn epsilon_closure(states: &[State], set: &mut BitSet) {
    let mut queue: VecDeque<usize> = set.iter().collect();
    let mut visited: BitSet = BitSet::with_capacity(states.len());

    while let Some(i) = queue.pop_front() {
        if visited.contains(i) {
            continue;
        }

        for next in &states[i].epsilon {
            if !visited.contains(next.index()) {
                queue.push_back(next.index());
            }
        }

        set.insert(i);
        visited.insert(i);
    }
}

// states reachable from `set` by one transition labelled `c`
fn delta(states: &[State], set: &BitSet, c: char) -> BitSet {
    let mut result = BitSet::with_capacity(states.len());

    for i in set.iter() {
        if let Some(targets) = states[i].transitions.get(&c) {
            for next in targets {
                result.insert(next.index());
            }
        }
    }

    result
}

/// Step-wise simulation over one automaton. Each call to
/// [`Automaton::simulation`] gets its own state set, so simulations never
/// interfere with each other.
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    automaton: &'a Automaton,
    current: BitSet,
}

impl<'a> Simulation<'a> {
    fn new(automaton: &'a Automaton) -> Simulation<'a> {
        let mut current = BitSet::with_capacity(automaton.len());
        current.insert(automaton.start().index());
        epsilon_closure(automaton.states(), &mut current);

        Simulation { automaton, current }
    }

    /// Consumes one symbol. A symbol without a matching transition empties
    /// the set, which stays empty for the rest of the input.
    pub fn step(&mut self, c: char) {
        let mut next = delta(self.automaton.states(), &self.current, c);
        epsilon_closure(self.automaton.states(), &mut next);
        self.current = next;
    }

    pub fn is_accepting(&self) -> bool {
        self.current.contains(self.automaton.accept().index())
    }

    pub fn is_dead(&self) -> bool {
        self.current.is_empty()
    }

    /// Active states, in ascending arena order.
    pub fn current(&self) -> impl Iterator<Item = StateId> + '_ {
        self.current.iter().map(StateId::from_index)
    }
}

impl Automaton {
    pub fn simulation(&self) -> Simulation<'_> {
        Simulation::new(self)
    }

    pub fn simulate(&self, input: &str) -> bool {
        let mut simulation = self.simulation();
        for c in input.chars() {
            simulation.step(c);
        }

        simulation.is_accepting()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteResult {
    pub input: String,
    pub accepted: bool,
}

impl SuiteResult {
    pub fn verdict(&self) -> &'static str {
        if self.accepted {
            "Accepted"
        } else {
            "Rejected"
        }
    }
}

/// Runs every non-blank line of `test_strings` against `automaton`. Lines
/// are trimmed before simulating.
pub fn run_suite(automaton: &Automaton, test_strings: &str) -> Vec<SuiteResult> {
    test_strings
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| SuiteResult {
            input: line.to_string(),
            accepted: automaton.simulate(line),
        })
        .collect()
}

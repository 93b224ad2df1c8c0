// regex -> NFA via Thompson's construction, plus simulation of the result
// supported syntax: symbols [a-zA-Z0-9], grouping `(...)`, alternation `|`,
// explicit concatenation `.`, and the postfix operators `*`, `+`, `?`

mod describe;
mod graph;
mod nfa;
mod postfix;
mod saved;
mod simulate;
mod token;
mod validate;

#[cfg(test)]
mod fa_tests;

pub use describe::{edges, Description, DisplayIds, Label, EPSILON_LABEL};
pub use nfa::{Automaton, Builder, CompileError, State, StateId};
pub use postfix::{expand, insert_concat, ParsePostfixError, Postfix};
pub use saved::{PersistError, SavedAutomaton};
pub use simulate::{run_suite, Simulation, SuiteResult};
pub use token::{tokenize, Token};
pub use validate::{validate, ParenImbalance, ValidationError};

/// Validates `expression`, then expands, compiles to postfix and builds the
/// automaton. The postfix form is returned alongside for display.
pub fn build_automaton(expression: &str) -> Result<(Automaton, Postfix), CompileError> {
    validate(expression)?;

    let tokens = tokenize(expression)?;
    let postfix = Postfix::from_infix(&insert_concat(&tokens));
    let automaton = Automaton::from_postfix(&postfix)?;

    Ok((automaton, postfix))
}

pub fn simulate(automaton: &Automaton, input: &str) -> bool {
    automaton.simulate(input)
}

pub fn describe(automaton: &Automaton) -> Description {
    automaton.describe()
}

use crate::nfa::{Automaton, Builder, CompileError};
use crate::postfix::Postfix;
use crate::token::Token;
use crate::validate::{ParenImbalance, ValidationError};
use crate::{build_automaton, describe::DisplayIds, simulate};

fn compile_regex(re_str: &str, quiet: bool) -> Automaton {
    let (nfa, postfix) = build_automaton(re_str).expect("failed to build automaton");
    if !quiet {
        println!("postfix = {}", postfix);
        println!("nfa = {}", nfa.describe());
    }

    nfa
}

fn run_vectors(tests: &[(&str, bool)], nfa: &Automaton, re_str: &str) {
    for (test, expected_result) in tests {
        let result = simulate(nfa, test);
        assert_eq!(
            result, *expected_result,
            "'{}' failed on input '{}', expect match: {}, actual match: {}",
            re_str, test, expected_result, result
        );
    }
}

fn check(re_str: &str, tests: &[(&str, bool)]) {
    let nfa = compile_regex(re_str, true);
    run_vectors(tests, &nfa, re_str);
}

#[test]
fn alternation() {
    check("a|b", &[("a", true), ("b", true), ("ab", false), ("", false), ("c", false)]);
}

#[test]
fn star_after_concat() {
    check(
        "ab*",
        &[("a", true), ("ab", true), ("abbb", true), ("b", false), ("abc", false), ("", false)],
    );
}

#[test]
fn plus_group() {
    check(
        "(ab)+",
        &[("ab", true), ("abab", true), ("ababab", true), ("", false), ("a", false), ("aba", false)],
    );
}

#[test]
fn optional() {
    check("a?b", &[("b", true), ("ab", true), ("aab", false), ("a", false), ("", false)]);
}

#[test]
fn basic() {
    let re_str = "a(b|c)*";
    let nfa = compile_regex(re_str, false);

    let test_vectors = vec![
        ("a", true),
        ("b", false),
        ("x", false),
        ("ab", true),
        ("ac", true),
        ("abcbc", true),
        ("acbcb", true),
        ("bcbc", false),
        ("abbbbbbbbbb", true),
    ];

    run_vectors(&test_vectors, &nfa, re_str)
}

#[test]
fn ends_in_abb() {
    check(
        "(a|b)*abb",
        &[
            ("abb", true),
            ("aabb", true),
            ("babb", true),
            ("abababb", true),
            ("ab", false),
            ("abba", false),
            ("", false),
        ],
    );
}

#[test]
fn binary_numbers() {
    check(
        "0|1(0|1)*",
        &[("0", true), ("1", true), ("10", true), ("1101", true), ("01", false), ("2", false)],
    );
}

#[test]
fn explicit_concat() {
    check("a.b", &[("ab", true), ("a.b", false), ("a", false)]);
    check("(a|b).c*", &[("a", true), ("bccc", true), ("c", false)]);
}

#[test]
fn mixed_case_and_digits() {
    check("A1?z", &[("Az", true), ("A1z", true), ("a1z", false), ("A11z", false)]);
}

#[test]
fn nested_repetition_terminates() {
    // epsilon cycles inside epsilon cycles
    check("(a*)*", &[("", true), ("a", true), ("aaaa", true), ("b", false), ("ab", false)]);
    check("((a*)*)+", &[("", true), ("aaa", true), ("ba", false)]);
    check("(a?)+", &[("", true), ("a", true), ("aa", true), ("b", false)]);
    check("(a|b*)*", &[("", true), ("abba", true), ("c", false)]);
}

#[test]
fn empty_input_string() {
    check("a*", &[("", true)]);
    check("a+", &[("", false)]);
    check("a?", &[("", true), ("a", true), ("aa", false)]);
}

#[test]
fn unknown_input_symbols_reject() {
    check("ab", &[("a#", false), ("ä", false), (" ab", false)]);
}

#[test]
fn simulate_is_idempotent() {
    let nfa = compile_regex("(a|b)*abb", true);
    let first = simulate(&nfa, "babb");
    for _ in 0..10 {
        assert_eq!(simulate(&nfa, "babb"), first);
        assert!(!simulate(&nfa, "bab"));
    }
}

#[test]
fn simulation_steps() {
    let nfa = compile_regex("ab*", true);
    let mut simulation = nfa.simulation();
    assert!(!simulation.is_accepting());

    simulation.step('a');
    assert!(simulation.is_accepting());
    simulation.step('b');
    assert!(simulation.is_accepting());

    simulation.step('x');
    assert!(simulation.is_dead());
    assert_eq!(simulation.current().count(), 0);

    simulation.step('b');
    assert!(simulation.is_dead());
    assert!(!simulation.is_accepting());
}

#[test]
fn thompson_state_counts() {
    // literal: 2, star/plus/optional/alternation: +2, concatenation: +0
    let vectors = vec![("a", 2), ("ab", 4), ("a*", 4), ("a+", 4), ("a?", 4), ("a|b", 6), ("(ab)*c", 8)];
    for (re_str, expected) in vectors {
        let nfa = compile_regex(re_str, true);
        assert_eq!(nfa.len(), expected, "state count of '{}'", re_str);
    }
}

#[test]
fn single_start_and_accept() {
    for re_str in ["a", "a|b", "(ab)+", "a?b", "(a|b)*abb", "((a*)*)+"] {
        let nfa = compile_regex(re_str, true);
        let ids = DisplayIds::new(&nfa);

        assert!(ids.get(nfa.accept()).is_some(), "accept of '{}' unreachable", re_str);
        assert_eq!(ids.get(nfa.start()), Some(0));
        assert_ne!(nfa.start(), nfa.accept());
        // the accept state is never left
        let accept = nfa.state(nfa.accept());
        assert!(accept.transitions().is_empty() && accept.epsilon().is_empty());
    }
}

#[test]
fn plus_start_has_no_bypass() {
    let nfa = compile_regex("a+", true);
    let start = nfa.state(nfa.start());
    assert_eq!(start.epsilon().len(), 1);
    assert!(!start.epsilon().contains(&nfa.accept()));

    let nfa = compile_regex("a*", true);
    assert!(nfa.state(nfa.start()).epsilon().contains(&nfa.accept()));
}

#[test]
fn trailing_operator_underflows() {
    assert_eq!(
        build_automaton("a|").map(|_| ()),
        Err(CompileError::StackUnderflow {
            operator: Some(Token::Alternation),
            position: 1,
        })
    );
}

#[test]
fn missing_operands_underflow() {
    for re_str in ["*a", "|", "a||b", "+", "a.", ".a"] {
        let result = build_automaton(re_str);
        assert!(
            matches!(result, Err(CompileError::StackUnderflow { operator: Some(_), .. })),
            "'{}' should underflow, got {:?}",
            re_str,
            result
        );
    }

    assert_eq!(
        build_automaton("()").map(|_| ()),
        Err(CompileError::StackUnderflow {
            operator: None,
            position: 0,
        })
    );
}

#[test]
fn validation_errors_are_forwarded() {
    assert_eq!(
        build_automaton("(a").map(|_| ()),
        Err(CompileError::Validation(ValidationError::UnbalancedParens(
            ParenImbalance::Unclosed
        )))
    );
    assert_eq!(
        build_automaton("").map(|_| ()),
        Err(CompileError::Validation(ValidationError::EmptyInput))
    );
}

#[test]
fn leftover_fragments() {
    let postfix: Postfix = "ab".parse().expect("valid postfix");
    assert_eq!(
        Automaton::from_postfix(&postfix),
        Err(CompileError::UnconsumedFragments(2))
    );
}

#[test]
fn parens_in_postfix() {
    let tokens = [Token::Symbol('a'), Token::LeftParen];
    assert_eq!(
        Builder::new().build(&tokens),
        Err(CompileError::UnexpectedToken {
            token: Token::LeftParen,
            position: 1,
        })
    );
}

//! Integration tests for the shift-reduce parse driver and tree builder

use lr1_parser::driver::{self, StepAction, DEFAULT_MAX_STEPS};
use lr1_parser::grammar::build_grammar;
use lr1_parser::lr1::{build_automaton, build_table, DEFAULT_MAX_STATES};
use lr1_parser::GrammarError;

fn expr_pipeline() -> (lr1_parser::Grammar, lr1_parser::ParsingTable) {
    let grammar = build_grammar(
        "S -> E\nE -> E + T | T\nT -> T * F | F\nF -> ( E ) | id\n",
        "S",
    )
    .unwrap()
    .grammar;
    let automaton = build_automaton(&grammar, DEFAULT_MAX_STATES).unwrap();
    let (table, conflicts) = build_table(&grammar, &automaton).unwrap();
    assert!(conflicts.is_empty());
    (grammar, table)
}

#[test]
fn accepts_a_parenthesized_expression_and_builds_a_tree() {
    let (grammar, table) = expr_pipeline();
    let outcome = driver::parse(&grammar, &table, "( id + id ) * id", DEFAULT_MAX_STEPS).unwrap();
    assert!(outcome.accepted);
    let root_id = outcome.tree_root.expect("accepted parse has a root");
    let root = outcome.tree.node(root_id);
    assert_eq!(root.symbol_name, "S");
    assert!(!root.children.is_empty());
}

#[test]
fn rejects_without_erroring_on_a_dangling_operator() {
    let (grammar, table) = expr_pipeline();
    let outcome = driver::parse(&grammar, &table, "id +", DEFAULT_MAX_STEPS).unwrap();
    assert!(!outcome.accepted);
    assert!(outcome.tree_root.is_none());
    let last = outcome.steps.last().unwrap();
    assert!(matches!(last.action, StepAction::Reject));
}

#[test]
fn reject_step_explanation_names_the_lookahead_and_state() {
    let (grammar, table) = expr_pipeline();
    let outcome = driver::parse(&grammar, &table, "id +", DEFAULT_MAX_STEPS).unwrap();
    let last = outcome.steps.last().unwrap();
    assert!(last.explanation.contains('$'));
}

#[test]
fn unknown_token_is_rejected_before_any_step_runs() {
    let (grammar, table) = expr_pipeline();
    let result = driver::parse(&grammar, &table, "id @ id", DEFAULT_MAX_STEPS);
    assert!(matches!(result, Err(GrammarError::UnknownToken { token }) if token == "@"));
}

#[test]
fn classic_expression_takes_the_expected_number_of_steps() {
    let (grammar, table) = expr_pipeline();
    let outcome = driver::parse(&grammar, &table, "id + id * id", DEFAULT_MAX_STEPS).unwrap();
    assert!(outcome.accepted);
    // 1 initial + 5 shifts + 9 reduces + 1 accept.
    assert_eq!(outcome.steps.len(), 15);
}

#[test]
fn step_limit_aborts_with_an_error_not_a_reject() {
    let (grammar, table) = expr_pipeline();
    let result = driver::parse(&grammar, &table, "id + id * id", 3);
    assert!(matches!(
        result,
        Err(GrammarError::StepLimitExceeded { max_steps: 3 })
    ));
}

/// §8 "Round-trip / idempotence": running `parse` twice on the same inputs
/// must produce identical step sequences. Serializing both outcomes to JSON
/// and comparing the text is a byte-identity check strong enough to catch
/// field-ordering or nondeterministic-map-iteration regressions that a
/// structural `assert_eq!` alone could miss.
#[test]
fn repeated_parses_serialize_to_byte_identical_json() {
    let (grammar, table) = expr_pipeline();
    let first = driver::parse(&grammar, &table, "( id + id ) * id", DEFAULT_MAX_STEPS).unwrap();
    let second = driver::parse(&grammar, &table, "( id + id ) * id", DEFAULT_MAX_STEPS).unwrap();

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);

    let reparsed: serde_json::Value = serde_json::from_str(&first_json).unwrap();
    assert_eq!(reparsed["accepted"], true);
    assert_eq!(reparsed["steps"].as_array().unwrap().len(), first.steps.len());
}

//! End-to-end scenarios exercising the full grammar-text → table → parse
//! pipeline together, one test per lettered scenario.

use lr1_parser::driver::{self, StepAction, DEFAULT_MAX_STEPS};
use lr1_parser::grammar::build_grammar;
use lr1_parser::lr1::{build_automaton, build_table, ensure_no_conflicts, ConflictKind, DEFAULT_MAX_STATES};
use lr1_parser::GrammarError;

/// Scenario A: the classic expression grammar accepts `id + id * id` in
/// exactly 15 recorded steps (1 initial, 5 shifts, 9 reduces, 1 accept).
#[test]
fn scenario_a_classic_expression_grammar() {
    let grammar = build_grammar(
        "S -> E\nE -> E + T | T\nT -> T * F | F\nF -> ( E ) | id\n",
        "S",
    )
    .unwrap()
    .grammar;
    let automaton = build_automaton(&grammar, DEFAULT_MAX_STATES).unwrap();
    let (table, conflicts) = build_table(&grammar, &automaton).unwrap();
    assert!(ensure_no_conflicts(&conflicts).is_ok());

    let outcome = driver::parse(&grammar, &table, "id + id * id", DEFAULT_MAX_STEPS).unwrap();
    assert!(outcome.accepted);
    assert_eq!(outcome.steps.len(), 15);
    assert_eq!(outcome.steps.first().unwrap().ordinal, 1);
}

/// Scenario B: the dangling-else grammar reports a shift-reduce conflict,
/// resolved in favor of shift (the longer, nested-else-binds-inner reading).
#[test]
fn scenario_b_dangling_else_shift_reduce_conflict() {
    let grammar = build_grammar("S -> if S | if S else S | x\n", "S")
        .unwrap()
        .grammar;
    let automaton = build_automaton(&grammar, DEFAULT_MAX_STATES).unwrap();
    let (_, conflicts) = build_table(&grammar, &automaton).unwrap();

    assert!(conflicts
        .iter()
        .any(|c| c.kind == ConflictKind::ShiftReduce));
    assert!(ensure_no_conflicts(&conflicts).is_err());
}

/// Scenario C: two productions with identical RHS `x` force a
/// reduce-reduce conflict, resolved toward the lower production index.
#[test]
fn scenario_c_reduce_reduce_conflict() {
    let grammar = build_grammar("S -> A | B\nA -> x\nB -> x\n", "S")
        .unwrap()
        .grammar;
    let automaton = build_automaton(&grammar, DEFAULT_MAX_STATES).unwrap();
    let (_, conflicts) = build_table(&grammar, &automaton).unwrap();

    assert!(conflicts
        .iter()
        .any(|c| c.kind == ConflictKind::ReduceReduce));
}

/// Scenario D: a grammar whose start symbol is directly nullable accepts
/// the empty input in exactly three steps: initial, reduce `S -> ε`, accept.
#[test]
fn scenario_d_epsilon_acceptance_of_empty_input() {
    let grammar = build_grammar("S -> ε\n", "S").unwrap().grammar;
    let automaton = build_automaton(&grammar, DEFAULT_MAX_STATES).unwrap();
    let (table, conflicts) = build_table(&grammar, &automaton).unwrap();
    assert!(conflicts.is_empty());

    let outcome = driver::parse(&grammar, &table, "", DEFAULT_MAX_STEPS).unwrap();
    assert!(outcome.accepted);
    assert!(outcome.tree_root.is_some());
    assert_eq!(outcome.steps.len(), 3);
    assert!(matches!(outcome.steps[0].action, StepAction::Initial));
    assert!(matches!(outcome.steps[1].action, StepAction::Reduce { production: _ }));
    assert!(matches!(outcome.steps[2].action, StepAction::Accept));
}

/// Scenario E: a syntactically valid prefix that never completes a
/// production is a normal `ParseReject`, not an error.
#[test]
fn scenario_e_parse_reject_on_valid_prefix() {
    let grammar = build_grammar(
        "S -> E\nE -> E + T | T\nT -> T * F | F\nF -> ( E ) | id\n",
        "S",
    )
    .unwrap()
    .grammar;
    let automaton = build_automaton(&grammar, DEFAULT_MAX_STATES).unwrap();
    let (table, conflicts) = build_table(&grammar, &automaton).unwrap();
    assert!(conflicts.is_empty());

    let outcome = driver::parse(&grammar, &table, "id +", DEFAULT_MAX_STEPS).unwrap();
    assert!(!outcome.accepted);
    assert!(matches!(
        outcome.steps.last().unwrap().action,
        StepAction::Reject
    ));
}

/// Scenario F: a token that names no declared terminal is `UnknownToken`,
/// surfaced before the driver records a single step.
#[test]
fn scenario_f_unknown_token() {
    let grammar = build_grammar("S -> id\n", "S").unwrap().grammar;
    let automaton = build_automaton(&grammar, DEFAULT_MAX_STATES).unwrap();
    let (table, conflicts) = build_table(&grammar, &automaton).unwrap();
    assert!(conflicts.is_empty());

    let result = driver::parse(&grammar, &table, "bogus", DEFAULT_MAX_STEPS);
    assert!(matches!(
        result,
        Err(GrammarError::UnknownToken { token }) if token == "bogus"
    ));
}

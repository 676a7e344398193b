//! The shift-reduce parse driver and step recorder (C6).
//!
//! Two parallel stacks (`Vec<usize>` states + `Vec<Symbol>` symbols) drive
//! the Shift/Reduce/Accept/no-action match, plus a third parallel stack of
//! tree-node ids. The driver builds a `ParseTree` as it goes, records a
//! `ParseStep` per iteration, and returns a structured `ParseOutcome`.

use crate::error::{GrammarError, Result};
use crate::grammar::Grammar;
use crate::lr1::{Action, ParsingTable};
use crate::symbol::Symbol;
use crate::tokenize;
use serde::Serialize;
use std::fmt;

/// Default cap on parse steps; exceeding it aborts with
/// [`GrammarError::StepLimitExceeded`] rather than looping forever on a
/// malformed table (§9 "Resource exhaustion").
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Whether a parse-tree node is a grammar terminal or nonterminal leaf/
/// internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

/// One node of the parse tree. Terminal nodes are always leaves
/// (`children` empty, `production` `None`); nonterminal nodes always carry
/// the production that produced them and their children left-to-right.
#[derive(Debug, Clone, Serialize)]
pub struct ParseTreeNode {
    pub id: usize,
    pub symbol_name: String,
    pub symbol_kind: SymbolKind,
    pub children: Vec<usize>,
    pub production: Option<usize>,
}

/// An arena-style parse tree: nodes keyed by integer id, no parent
/// pointers, no cycles (§9). `root` is the `S'`-production's synthesized
/// node at Accept (equivalently the sole child of that node, the `S` node).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseTree {
    pub nodes: Vec<ParseTreeNode>,
    pub root: Option<usize>,
}

impl ParseTree {
    pub fn node(&self, id: usize) -> &ParseTreeNode {
        &self.nodes[id]
    }
}

/// What happened on one iteration of the driver loop. `Initial` is the
/// step-1 starting configuration recorded before any action is consulted
/// (§4.6).
#[derive(Debug, Clone, Serialize)]
pub enum StepAction {
    Initial,
    Shift { to_state: usize },
    Reduce { production: usize },
    Accept,
    Reject,
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::Initial => write!(f, "initial configuration"),
            StepAction::Shift { to_state } => write!(f, "shift to state {to_state}"),
            StepAction::Reduce { production } => write!(f, "reduce by production {production}"),
            StepAction::Accept => write!(f, "accept"),
            StepAction::Reject => write!(f, "reject"),
        }
    }
}

/// An immutable snapshot of the driver's configuration after one iteration
/// (§3 "Parse step"). `lookahead` is the token consulted to decide the
/// action (captured before any stack/position mutation); everything else
/// reflects state *after* the action was applied.
#[derive(Debug, Clone, Serialize)]
pub struct ParseStep {
    pub ordinal: usize,
    pub stack: Vec<(usize, Option<String>)>,
    pub remaining_input: Vec<String>,
    pub lookahead: String,
    pub action: StepAction,
    pub explanation: String,
    pub new_node_ids: Vec<usize>,
    pub sentential_form: String,
}

/// The result of a complete driver run: whether the input was accepted, the
/// full step trace, and the tree root on success.
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    pub accepted: bool,
    pub steps: Vec<ParseStep>,
    pub tree_root: Option<usize>,
    pub tree: ParseTree,
}

struct StackEntry {
    state: usize,
    symbol: Option<Symbol>,
    tree_id: Option<usize>,
}

fn sentential_form(stack: &[StackEntry], remaining: &[Symbol]) -> String {
    let mut parts: Vec<String> = stack
        .iter()
        .skip(1)
        .filter_map(|entry| entry.symbol.as_ref().map(|s| s.to_string()))
        .collect();
    parts.extend(remaining.iter().map(|s| s.to_string()));
    parts.join(" ")
}

fn remaining_names(tokens: &[Symbol], position: usize) -> Vec<String> {
    tokens[position..].iter().map(|s| s.to_string()).collect()
}

fn stack_snapshot(stack: &[StackEntry]) -> Vec<(usize, Option<String>)> {
    stack
        .iter()
        .map(|entry| (entry.state, entry.symbol.as_ref().map(|s| s.to_string())))
        .collect()
}

/// Drives the shift-reduce loop over an already-tokenized input (§4.6).
/// `tokens` must already include the trailing `$` ([`tokenize::tokenize`]
/// appends it). Returns `Err` only for resource exhaustion or an internal
/// invariant violation; a syntactically rejected input is a normal `Ok`
/// with `accepted: false`.
pub fn run(
    grammar: &Grammar,
    table: &ParsingTable,
    tokens: &[Symbol],
    max_steps: usize,
) -> Result<ParseOutcome> {
    if max_steps == 0 {
        return Err(GrammarError::StepLimitExceeded { max_steps });
    }

    let mut stack = vec![StackEntry {
        state: 0,
        symbol: None,
        tree_id: None,
    }];
    let mut tree = ParseTree::default();
    let mut steps = Vec::new();
    let mut position = 0usize;

    // Step 1: the initial configuration, recorded before any action is
    // consulted (§4.6, §8 boundary behavior).
    let initial_lookahead = tokens
        .first()
        .cloned()
        .ok_or_else(|| GrammarError::internal("empty token stream").with_state(0))?;
    steps.push(ParseStep {
        ordinal: 1,
        stack: stack_snapshot(&stack),
        remaining_input: remaining_names(tokens, position),
        lookahead: initial_lookahead.to_string(),
        action: StepAction::Initial,
        explanation: "initial configuration".to_string(),
        new_node_ids: Vec::new(),
        sentential_form: sentential_form(&stack, &tokens[position..]),
    });
    let mut ordinal = 1usize;

    loop {
        let state = stack.last().expect("stack never empties").state;
        let lookahead = tokens
            .get(position)
            .cloned()
            .ok_or_else(|| GrammarError::internal("ran past end of token stream").with_state(state))?;

        let action = table.action(state, &lookahead).cloned();

        ordinal += 1;
        if ordinal > max_steps {
            return Err(GrammarError::StepLimitExceeded { max_steps });
        }

        match action {
            None => {
                let expected: Vec<String> = table
                    .expected_terminals(state)
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                steps.push(ParseStep {
                    ordinal,
                    stack: stack_snapshot(&stack),
                    remaining_input: remaining_names(tokens, position),
                    lookahead: lookahead.to_string(),
                    action: StepAction::Reject,
                    explanation: format!(
                        "no action for lookahead '{}' in state {} (expected one of [{}])",
                        lookahead,
                        state,
                        expected.join(", ")
                    ),
                    new_node_ids: Vec::new(),
                    sentential_form: sentential_form(&stack, &tokens[position..]),
                });
                return Ok(ParseOutcome {
                    accepted: false,
                    steps,
                    tree_root: None,
                    tree,
                });
            }

            Some(Action::Shift(target)) => {
                let node_id = tree.nodes.len();
                tree.nodes.push(ParseTreeNode {
                    id: node_id,
                    symbol_name: lookahead.to_string(),
                    symbol_kind: SymbolKind::Terminal,
                    children: Vec::new(),
                    production: None,
                });
                stack.push(StackEntry {
                    state: target,
                    symbol: Some(lookahead.clone()),
                    tree_id: Some(node_id),
                });
                position += 1;

                steps.push(ParseStep {
                    ordinal,
                    stack: stack_snapshot(&stack),
                    remaining_input: remaining_names(tokens, position),
                    lookahead: lookahead.to_string(),
                    action: StepAction::Shift { to_state: target },
                    explanation: format!("shift '{lookahead}', goto state {target}"),
                    new_node_ids: vec![node_id],
                    sentential_form: sentential_form(&stack, &tokens[position..]),
                });
            }

            Some(Action::Reduce(production_index)) => {
                let production = grammar.production(production_index);
                let arity = production.rhs.len();

                if stack.len() <= arity {
                    return Err(GrammarError::internal("stack underflow during reduce")
                        .with_state(state)
                        .with_production(production_index));
                }

                let mut children = Vec::with_capacity(arity);
                for _ in 0..arity {
                    let popped = stack.pop().expect("checked length above");
                    if let Some(id) = popped.tree_id {
                        children.push(id);
                    }
                }
                children.reverse();

                let node_id = tree.nodes.len();
                tree.nodes.push(ParseTreeNode {
                    id: node_id,
                    symbol_name: production.lhs.to_string(),
                    symbol_kind: SymbolKind::NonTerminal,
                    children,
                    production: Some(production_index),
                });

                let state_after_pop = stack.last().expect("start entry never popped").state;
                let goto_state = table.goto(state_after_pop, &production.lhs).ok_or_else(|| {
                    GrammarError::internal("no GOTO entry after reduce")
                        .with_state(state_after_pop)
                        .with_symbol(production.lhs.to_string())
                        .with_production(production_index)
                })?;

                stack.push(StackEntry {
                    state: goto_state,
                    symbol: Some(production.lhs.clone()),
                    tree_id: Some(node_id),
                });

                steps.push(ParseStep {
                    ordinal,
                    stack: stack_snapshot(&stack),
                    remaining_input: remaining_names(tokens, position),
                    lookahead: lookahead.to_string(),
                    action: StepAction::Reduce {
                        production: production_index,
                    },
                    explanation: format!("reduce by {production}, goto state {goto_state}"),
                    new_node_ids: vec![node_id],
                    sentential_form: sentential_form(&stack, &tokens[position..]),
                });
            }

            Some(Action::Accept) => {
                let root = stack.last().and_then(|entry| entry.tree_id);
                steps.push(ParseStep {
                    ordinal,
                    stack: stack_snapshot(&stack),
                    remaining_input: remaining_names(tokens, position),
                    lookahead: lookahead.to_string(),
                    action: StepAction::Accept,
                    explanation: "accept".to_string(),
                    new_node_ids: Vec::new(),
                    sentential_form: sentential_form(&stack, &tokens[position..]),
                });
                return Ok(ParseOutcome {
                    accepted: true,
                    steps,
                    tree_root: root,
                    tree,
                });
            }
        }
    }
}

/// Top-level entry point: tokenizes `input` against `grammar`'s declared
/// terminals, then drives the parse (§6). `UnknownToken` surfaces before any
/// step is recorded (§8 Scenario F).
pub fn parse(
    grammar: &Grammar,
    table: &ParsingTable,
    input: &str,
    max_steps: usize,
) -> Result<ParseOutcome> {
    let tokens = tokenize::tokenize(grammar, input)?;
    run(grammar, table, &tokens, max_steps)
}

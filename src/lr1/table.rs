//! ACTION/GOTO table construction and conflict resolution (C5).
//!
//! Rather than aborting on the first conflict found, construction collects
//! every conflict across the whole table, resolves each deterministically
//! (prefer Shift; among competing Reduces, the smallest production index),
//! and still returns a usable table — conflicts are reported alongside it,
//! not instead of it (§4.5, §7 `TableConflict`).

use super::automaton::Automaton;
use crate::error::Result;
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::HashMap;
use std::fmt;

/// A single ACTION-table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(s) => write!(f, "shift {s}"),
            Action::Reduce(p) => write!(f, "reduce {p}"),
            Action::Accept => write!(f, "accept"),
        }
    }
}

/// The two ways two competing actions can disagree (§7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
}

/// A recorded conflict: more than one action was applicable for `state` on
/// `lookahead`. `chosen` is the one the tie-break rule selected; `rejected`
/// lists every other candidate, in the order they were discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictInfo {
    pub state: usize,
    pub lookahead: Symbol,
    pub kind: ConflictKind,
    pub chosen: Action,
    pub rejected: Vec<Action>,
}

/// ACTION and GOTO tables for a canonical LR(1) automaton.
#[derive(Debug, Clone, Default)]
pub struct ParsingTable {
    action: HashMap<(usize, Symbol), Action>,
    goto: HashMap<(usize, Symbol), usize>,
}

impl ParsingTable {
    pub fn action(&self, state: usize, lookahead: &Symbol) -> Option<&Action> {
        self.action.get(&(state, lookahead.clone()))
    }

    pub fn goto(&self, state: usize, symbol: &Symbol) -> Option<usize> {
        self.goto.get(&(state, symbol.clone())).copied()
    }

    /// Every terminal for which `state` has a defined ACTION entry, for
    /// building "expected one of [...]" diagnostics on reject (§7
    /// `ParseReject`).
    pub fn expected_terminals(&self, state: usize) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self
            .action
            .keys()
            .filter(|(s, _)| *s == state)
            .map(|(_, sym)| sym.clone())
            .collect();
        symbols.sort();
        symbols
    }

    pub fn action_entries(&self) -> impl Iterator<Item = (&(usize, Symbol), &Action)> {
        self.action.iter()
    }

    pub fn goto_entries(&self) -> impl Iterator<Item = (&(usize, Symbol), &usize)> {
        self.goto.iter()
    }
}

/// Picks between two actions already present at the same `(state,
/// lookahead)` cell: Shift always wins over Reduce; between two Reduces, the
/// lower production index wins. Returns `(winner, loser)`.
fn resolve(a: Action, b: Action) -> (Action, Action) {
    match (&a, &b) {
        (Action::Shift(_), Action::Reduce(_)) | (Action::Shift(_), Action::Accept) => (a, b),
        (Action::Reduce(_), Action::Shift(_)) | (Action::Accept, Action::Shift(_)) => (b, a),
        (Action::Reduce(x), Action::Reduce(y)) => {
            if x <= y {
                (a, b)
            } else {
                (b, a)
            }
        }
        _ => (a, b),
    }
}

fn conflict_kind(chosen: &Action, rejected: &Action) -> ConflictKind {
    match (chosen, rejected) {
        (Action::Reduce(_), Action::Reduce(_)) => ConflictKind::ReduceReduce,
        _ => ConflictKind::ShiftReduce,
    }
}

/// Inserts `candidate` into `action` at `(state, lookahead)`, recording a
/// conflict if a different action was already there.
fn insert_action(
    action: &mut HashMap<(usize, Symbol), Action>,
    conflicts: &mut Vec<ConflictInfo>,
    state: usize,
    lookahead: Symbol,
    candidate: Action,
) {
    match action.get(&(state, lookahead.clone())) {
        None => {
            action.insert((state, lookahead), candidate);
        }
        Some(existing) if *existing == candidate => {}
        Some(existing) => {
            let (winner, loser) = resolve(existing.clone(), candidate);
            let kind = conflict_kind(&winner, &loser);
            conflicts.push(ConflictInfo {
                state,
                lookahead: lookahead.clone(),
                kind,
                chosen: winner.clone(),
                rejected: vec![loser],
            });
            action.insert((state, lookahead), winner);
        }
    }
}

/// Builds the ACTION/GOTO tables from a canonical LR(1) automaton (§4.5):
/// for every state and every item in it, shift on a terminal after the dot,
/// reduce on the item's lookahead if the dot is at the end (unless the item
/// is the accept item, which emits Accept instead), and record a GOTO entry
/// for every nonterminal transition. Conflicts are collected, resolved, and
/// returned alongside the table rather than aborting construction.
pub fn build_table(grammar: &Grammar, automaton: &Automaton) -> Result<(ParsingTable, Vec<ConflictInfo>)> {
    let mut action: HashMap<(usize, Symbol), Action> = HashMap::new();
    let mut goto: HashMap<(usize, Symbol), usize> = HashMap::new();
    let mut conflicts = Vec::new();

    for (state_index, items) in automaton.states().iter().enumerate() {
        for item in items.iter() {
            if item.is_accept_item(grammar) {
                insert_action(
                    &mut action,
                    &mut conflicts,
                    state_index,
                    Symbol::EndOfInput,
                    Action::Accept,
                );
                continue;
            }

            if item.is_reduce_item(grammar) {
                insert_action(
                    &mut action,
                    &mut conflicts,
                    state_index,
                    item.lookahead.clone(),
                    Action::Reduce(item.production),
                );
                continue;
            }

            let Some(symbol) = item.symbol_after_dot(grammar) else {
                continue;
            };
            if symbol.is_terminal() {
                if let Some(target) = automaton.goto_state(state_index, symbol) {
                    insert_action(
                        &mut action,
                        &mut conflicts,
                        state_index,
                        symbol.clone(),
                        Action::Shift(target),
                    );
                }
            }
        }

        for nonterminal in grammar.nonterminals() {
            if let Some(target) = automaton.goto_state(state_index, nonterminal) {
                goto.insert((state_index, nonterminal.clone()), target);
            }
        }
    }

    Ok((ParsingTable { action, goto }, conflicts))
}

/// Returns `Err(GrammarError::TableConflict)` if `conflicts` is non-empty;
/// callers that require a conflict-free grammar call this after
/// [`build_table`], callers that merely want to inspect conflicts don't.
pub fn ensure_no_conflicts(conflicts: &[ConflictInfo]) -> Result<()> {
    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(crate::error::GrammarError::TableConflict(conflicts.len()))
    }
}

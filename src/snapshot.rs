//! Read-only serialization facade (C7): snapshot views over the grammar,
//! automaton, and parsing table for external consumers (an HTTP layer or
//! visualizer, out of scope for this crate but the narrow interface they'd
//! need is exposed here).
//!
//! Built on top of the `Display` impls already on `Grammar`/`Production`/
//! `Symbol`: plain structs with derived `Debug` plus `serde::Serialize` —
//! no templating engine, keeping the crate's otherwise dependency-light
//! style.

use crate::grammar::Grammar;
use crate::lr1::table::{ConflictInfo, ConflictKind, ParsingTable};
use crate::lr1::{Action, Automaton};
use serde::Serialize;

/// Printed form of an LR(1) item: `"A → α · β , a"` (§6).
pub fn format_item(grammar: &Grammar, item: &crate::lr1::Item) -> String {
    item.display(grammar)
}

/// A read-only view of one automaton state: its items (printed), the
/// symbols it can shift on, the productions it can reduce by, and its
/// outgoing transitions.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub index: usize,
    pub items: Vec<String>,
    pub shift_symbols: Vec<String>,
    pub reduce_productions: Vec<usize>,
    pub transitions: Vec<(String, usize)>,
}

/// Builds a [`StateSnapshot`] for automaton state `index`.
pub fn snapshot_state(grammar: &Grammar, automaton: &Automaton, index: usize) -> StateSnapshot {
    let state = automaton.state(index);

    let mut items: Vec<String> = state.iter().map(|item| format_item(grammar, item)).collect();
    items.sort();

    let mut shift_symbols: Vec<String> = state
        .iter()
        .filter_map(|item| item.symbol_after_dot(grammar))
        .filter(|s| s.is_terminal() || s.is_nonterminal())
        .map(|s| s.to_string())
        .collect();
    shift_symbols.sort();
    shift_symbols.dedup();

    let mut reduce_productions: Vec<usize> = state
        .iter()
        .filter(|item| item.is_reduce_item(grammar) && !item.is_accept_item(grammar))
        .map(|item| item.production)
        .collect();
    reduce_productions.sort_unstable();
    reduce_productions.dedup();

    let mut transitions: Vec<(String, usize)> = automaton
        .transitions()
        .iter()
        .filter(|t| t.from == index)
        .map(|t| (t.on.to_string(), t.to))
        .collect();
    transitions.sort();

    StateSnapshot {
        index,
        items,
        shift_symbols,
        reduce_productions,
        transitions,
    }
}

/// A single printable ACTION-table cell.
#[derive(Debug, Clone, Serialize)]
pub struct ActionCell {
    pub state: usize,
    pub symbol: String,
    pub action: String,
}

/// A single printable GOTO-table cell.
#[derive(Debug, Clone, Serialize)]
pub struct GotoCell {
    pub state: usize,
    pub symbol: String,
    pub target: usize,
}

/// A read-only, printable view of a conflict.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictSnapshot {
    pub state: usize,
    pub symbol: String,
    pub kind: String,
    pub chosen: String,
    pub rejected: Vec<String>,
}

fn conflict_kind_label(kind: ConflictKind) -> &'static str {
    match kind {
        ConflictKind::ShiftReduce => "shift-reduce",
        ConflictKind::ReduceReduce => "reduce-reduce",
    }
}

fn action_label(action: &Action) -> String {
    action.to_string()
}

fn snapshot_conflict(conflict: &ConflictInfo) -> ConflictSnapshot {
    ConflictSnapshot {
        state: conflict.state,
        symbol: conflict.lookahead.to_string(),
        kind: conflict_kind_label(conflict.kind).to_string(),
        chosen: action_label(&conflict.chosen),
        rejected: conflict.rejected.iter().map(action_label).collect(),
    }
}

/// A full printable view of a parsing table: every ACTION/GOTO cell plus
/// every recorded conflict.
#[derive(Debug, Clone, Serialize)]
pub struct TableSnapshot {
    pub actions: Vec<ActionCell>,
    pub gotos: Vec<GotoCell>,
    pub conflicts: Vec<ConflictSnapshot>,
}

/// Builds a [`TableSnapshot`] of `table`, attaching `conflicts` as recorded
/// by [`crate::lr1::build_table`].
pub fn snapshot_table(table: &ParsingTable, conflicts: &[ConflictInfo]) -> TableSnapshot {
    let mut actions: Vec<ActionCell> = table
        .action_entries()
        .map(|((state, symbol), action)| ActionCell {
            state: *state,
            symbol: symbol.to_string(),
            action: action.to_string(),
        })
        .collect();
    actions.sort_by(|a, b| (a.state, &a.symbol).cmp(&(b.state, &b.symbol)));

    let mut gotos: Vec<GotoCell> = table
        .goto_entries()
        .map(|((state, symbol), target)| GotoCell {
            state: *state,
            symbol: symbol.to_string(),
            target: *target,
        })
        .collect();
    gotos.sort_by(|a, b| (a.state, &a.symbol).cmp(&(b.state, &b.symbol)));

    let conflicts = conflicts.iter().map(snapshot_conflict).collect();

    TableSnapshot {
        actions,
        gotos,
        conflicts,
    }
}

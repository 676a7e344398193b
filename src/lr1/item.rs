//! LR(1) items and item sets: CLOSURE, GOTO, and canonical equality.
//!
//! This is the core the rest of the automaton builder (C4) rests on. Unlike
//! an LR(0) item, which carries only `(production, dot_position)` and
//! derives its reduce lookahead from a separately-computed FOLLOW set, a
//! canonical LR(1) item carries its lookahead directly (§4.3), so CLOSURE
//! can compute per-item lookaheads via FIRST(βa) instead.

use crate::first_follow::{self, FirstSets};
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::BTreeSet;

/// An LR(1) item `[A → α · β, a]`, represented as `(production, dot,
/// lookahead)`. `lookahead` is always a terminal or `$`, never ε or a
/// nonterminal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub production: usize,
    pub dot: usize,
    pub lookahead: Symbol,
}

impl Item {
    pub fn new(production: usize, dot: usize, lookahead: Symbol) -> Self {
        Self {
            production,
            dot,
            lookahead,
        }
    }

    /// The symbol immediately after the dot, if any.
    pub fn symbol_after_dot<'g>(&self, grammar: &'g Grammar) -> Option<&'g Symbol> {
        grammar.production(self.production).rhs.get(self.dot)
    }

    /// True when the dot is at the right end (a reduce item).
    pub fn is_reduce_item(&self, grammar: &Grammar) -> bool {
        self.dot >= grammar.production(self.production).rhs.len()
    }

    /// True for the unique accept item `[S' → S ·, $]`.
    pub fn is_accept_item(&self, grammar: &Grammar) -> bool {
        self.is_reduce_item(grammar)
            && grammar.production(self.production).lhs == *grammar.augmented_start()
            && self.lookahead.is_end_of_input()
    }

    /// Prints the item in the canonical `"A → α · β , a"` form used by the
    /// serialization facade (C7).
    pub fn display(&self, grammar: &Grammar) -> String {
        let production = grammar.production(self.production);
        let mut rhs: Vec<String> = production.rhs.iter().map(|s| s.to_string()).collect();
        rhs.insert(self.dot.min(rhs.len()), "·".to_string());
        let body = if production.rhs.is_empty() {
            "·".to_string()
        } else {
            rhs.join(" ")
        };
        format!("{} → {} , {}", production.lhs, body, self.lookahead)
    }
}

/// A state in the canonical LR(1) collection: a set of items. Identity for
/// deduplication is set equality, independent of insertion order — a
/// `BTreeSet` gives us that for free, since its `Eq`/`Hash` impls compare
/// and hash the sorted element sequence, which is the same sequence for any
/// two sets containing the same items (§4.3 "Equality").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ItemSet(BTreeSet<Item>);

impl ItemSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, item: Item) -> bool {
        self.0.insert(item)
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.0.contains(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<Item> for ItemSet {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// `FIRST(β a)` with `a` a single terminal/`$` lookahead, `ε` excluded from
/// the result: this is always non-empty and never contains ε, since `a`
/// itself is never ε (§4.3).
fn lookaheads_after(first_sets: &FirstSets, beta: &[Symbol], a: &Symbol) -> BTreeSet<Symbol> {
    let mut sequence: Vec<Symbol> = beta.to_vec();
    sequence.push(a.clone());
    first_follow::first_of_sequence(first_sets, &sequence)
        .into_iter()
        .filter(|s| !s.is_epsilon())
        .collect()
}

/// CLOSURE(I): the smallest superset of `I` such that for every item `[A →
/// α · B β, a]` with `B` a nonterminal, and every production `B → γ`, and
/// every `b ∈ FIRST(β a)`, `[B → · γ, b]` is also in the set. Computed by
/// worklist: seed with `I`, repeatedly add derived items, stop when a full
/// pass adds nothing (§4.3).
pub fn closure(grammar: &Grammar, first_sets: &FirstSets, items: ItemSet) -> ItemSet {
    let mut result = items;

    loop {
        let mut additions = Vec::new();

        for item in result.iter() {
            let Some(symbol) = item.symbol_after_dot(grammar) else {
                continue;
            };
            if !symbol.is_nonterminal() {
                continue;
            }

            let production = grammar.production(item.production);
            let beta = &production.rhs[item.dot + 1..];
            let lookaheads = lookaheads_after(first_sets, beta, &item.lookahead);

            for &target in grammar.production_indices_for(symbol) {
                for lookahead in &lookaheads {
                    let candidate = Item::new(target, 0, lookahead.clone());
                    if !result.contains(&candidate) {
                        additions.push(candidate);
                    }
                }
            }
        }

        if additions.is_empty() {
            break;
        }
        for item in additions {
            result.insert(item);
        }
    }

    result
}

/// GOTO(I, X): advance the dot past `X` in every item of `I` where `X`
/// follows the dot, then close the result. Undefined (empty) if no item in
/// `I` has `X` immediately after its dot.
pub fn goto(grammar: &Grammar, first_sets: &FirstSets, items: &ItemSet, symbol: &Symbol) -> ItemSet {
    let mut moved = ItemSet::new();

    for item in items.iter() {
        if item.symbol_after_dot(grammar) == Some(symbol) {
            moved.insert(Item::new(item.production, item.dot + 1, item.lookahead.clone()));
        }
    }

    closure(grammar, first_sets, moved)
}

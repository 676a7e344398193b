//! FIRST and FOLLOW set computation for context-free grammars.
//!
//! Implements the fixed-point algorithms from Aho et al., "Compilers:
//! Principles, Techniques, and Tools" (2nd Edition), §4.4, over arbitrary
//! named symbols rather than single characters.

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// FIRST sets, keyed by symbol (terminals and `$` map to singletons).
pub type FirstSets = HashMap<Symbol, HashSet<Symbol>>;

/// FOLLOW sets, keyed by nonterminal.
pub type FollowSets = HashMap<Symbol, HashSet<Symbol>>;

/// Computes FIRST(X) for every terminal, nonterminal, and the two
/// distinguished symbols, by pass-based fixed-point iteration over the
/// grammar's productions: `FIRST(ε) = {ε}`, `FIRST(a) = {a}` for terminal
/// `a`, and for nonterminal `A`, `FIRST(A) = ⋃ FIRST(rhs)` over `A`'s
/// productions.
pub fn compute_first_sets(grammar: &Grammar) -> FirstSets {
    let mut first_sets: FirstSets = HashMap::new();

    for terminal in grammar.terminals() {
        first_sets.insert(terminal.clone(), HashSet::from([terminal.clone()]));
    }
    first_sets.insert(Symbol::Epsilon, HashSet::from([Symbol::Epsilon]));
    first_sets.insert(Symbol::EndOfInput, HashSet::from([Symbol::EndOfInput]));

    for nonterminal in grammar.nonterminals() {
        first_sets.entry(nonterminal.clone()).or_default();
    }

    let mut changed = true;
    while changed {
        changed = false;

        for production in grammar.productions() {
            let lhs = &production.lhs;
            let current_first = first_sets.get(lhs).cloned().unwrap_or_default();

            let rhs_first = first_of_sequence(&first_sets, &production.rhs);

            let new_first: HashSet<Symbol> = current_first.union(&rhs_first).cloned().collect();

            if new_first.len() != current_first.len() {
                first_sets.insert(lhs.clone(), new_first);
                changed = true;
            }
        }
    }

    first_sets
}

/// FIRST of a sequence of symbols: `FIRST(X1 X2 ... Xn)`. An empty sequence
/// (the tail of an ε-production, or the synthesized lookahead-only sequence
/// used by CLOSURE) has FIRST = `{ε}`.
pub fn first_of_sequence(first_sets: &FirstSets, symbols: &[Symbol]) -> HashSet<Symbol> {
    let mut result = HashSet::new();
    let mut has_epsilon = true;

    for symbol in symbols {
        if !has_epsilon {
            break;
        }

        let first_sym = first_sets.get(symbol).cloned().unwrap_or_default();
        for s in &first_sym {
            if !s.is_epsilon() {
                result.insert(s.clone());
            }
        }
        has_epsilon = first_sym.contains(&Symbol::Epsilon);
    }

    if has_epsilon {
        result.insert(Symbol::Epsilon);
    }

    result
}

/// Computes FOLLOW(A) for every nonterminal: `$ ∈ FOLLOW(S)`; for `B →
/// αAβ`, `FIRST(β) \ {ε} ⊆ FOLLOW(A)`, and if `ε ∈ FIRST(β)` (or `β = ε`),
/// `FOLLOW(B) ⊆ FOLLOW(A)`. Exposed for consumers; the LR(1) CLOSURE/GOTO
/// construction never needs it (lookaheads are carried per-item instead).
pub fn compute_follow_sets(grammar: &Grammar, first_sets: &FirstSets) -> FollowSets {
    let mut follow_sets: FollowSets = HashMap::new();

    for nonterminal in grammar.nonterminals() {
        follow_sets.entry(nonterminal.clone()).or_default();
    }

    follow_sets
        .entry(grammar.start_symbol().clone())
        .or_default()
        .insert(Symbol::EndOfInput);

    let mut changed = true;
    while changed {
        changed = false;

        for production in grammar.productions() {
            let lhs = &production.lhs;
            let rhs = &production.rhs;

            for (i, symbol) in rhs.iter().enumerate() {
                if !symbol.is_nonterminal() {
                    continue;
                }

                let current_follow = follow_sets.get(symbol).cloned().unwrap_or_default();
                let mut new_follow = current_follow.clone();

                let beta = &rhs[i + 1..];
                let first_beta = first_of_sequence(first_sets, beta);

                for s in &first_beta {
                    if !s.is_epsilon() {
                        new_follow.insert(s.clone());
                    }
                }

                if beta.is_empty() || first_beta.contains(&Symbol::Epsilon) {
                    let follow_lhs = follow_sets.get(lhs).cloned().unwrap_or_default();
                    new_follow = new_follow.union(&follow_lhs).cloned().collect();
                }

                if new_follow.len() != current_follow.len() {
                    follow_sets.insert(symbol.clone(), new_follow);
                    changed = true;
                }
            }
        }
    }

    follow_sets
}

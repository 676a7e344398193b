//! Grammar model and text frontend for context-free grammars.
//!
//! This module owns the `Grammar` type (productions, the augmented start
//! production, terminal/nonterminal classification) and the line-oriented
//! text format described in the design's grammar-parser section: `LHS ->
//! RHS1 | RHS2 | ...`, blank lines and `#`-comments ignored, `ε`/`epsilon`/an
//! empty alternative denoting an ε-production.

use crate::error::{GrammarError, Result};
use crate::first_follow::{self, FirstSets};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// A production rule `lhs -> rhs`. `rhs` is empty for an ε-production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Self { lhs, rhs }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rhs.is_empty() {
            write!(f, "{} → ε", self.lhs)
        } else {
            let rhs: Vec<String> = self.rhs.iter().map(|s| s.to_string()).collect();
            write!(f, "{} → {}", self.lhs, rhs.join(" "))
        }
    }
}

/// A context-free grammar: productions, symbol classification, and (once
/// requested) memoized FIRST/FOLLOW sets. Built once, immutable thereafter.
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<Production>,
    nonterminals: HashSet<Symbol>,
    terminals: HashSet<Symbol>,
    start_symbol: Symbol,
    augmented_start: Symbol,
    production_indices: HashMap<Arc<str>, Vec<usize>>,
    first_sets: FirstSets,
}

/// The result of [`build_grammar`]: the grammar that was built, plus every
/// `GrammarSemantic` diagnostic noticed along the way. Diagnostics never
/// block construction — callers decide whether to treat them as fatal.
#[derive(Debug, Clone)]
pub struct GrammarBuildResult {
    pub grammar: Grammar,
    pub diagnostics: Vec<GrammarError>,
}

impl Grammar {
    /// Returns all productions, production 0 being the augmented `S' → S`.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, index: usize) -> &Production {
        &self.productions[index]
    }

    /// Indices of the productions whose LHS is `symbol`, in source order.
    /// Empty if `symbol` has no productions (e.g. an undefined nonterminal).
    pub fn production_indices_for(&self, symbol: &Symbol) -> &[usize] {
        match symbol.name() {
            Some(name) => self
                .production_indices
                .get(name)
                .map(|v| v.as_slice())
                .unwrap_or(&[]),
            None => &[],
        }
    }

    pub fn nonterminals(&self) -> &HashSet<Symbol> {
        &self.nonterminals
    }

    pub fn terminals(&self) -> &HashSet<Symbol> {
        &self.terminals
    }

    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    /// The synthesized `S'` used by production 0.
    pub fn augmented_start(&self) -> &Symbol {
        &self.augmented_start
    }

    /// FIRST sets, memoized at construction time (§4.1).
    pub fn first_sets(&self) -> &FirstSets {
        &self.first_sets
    }

    /// FOLLOW sets, computed on demand. Exposed for consumers; the core
    /// LR(1) construction (CLOSURE/GOTO) never calls this.
    pub fn follow_sets(&self) -> first_follow::FollowSets {
        first_follow::compute_follow_sets(self, &self.first_sets)
    }

    /// Builds a grammar from already-classified productions and a start
    /// symbol name. Synthesizes `S'`, prepends production 0, classifies
    /// every RHS name, and runs the semantic validation passes of §4.1.
    fn from_named_productions(
        raw: Vec<(String, Vec<String>)>,
        start: &str,
    ) -> Result<GrammarBuildResult> {
        if raw.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }
        if start == "$"
            || raw
                .iter()
                .any(|(lhs, rhs)| lhs == "$" || rhs.iter().any(|s| s == "$"))
        {
            return Err(GrammarError::ReservedSymbolName("$".to_string()));
        }

        let mut diagnostics = Vec::new();

        let lhs_names: HashSet<&str> = raw.iter().map(|(lhs, _)| lhs.as_str()).collect();

        if !lhs_names.contains(start) {
            diagnostics.push(GrammarError::UndefinedNonTerminal(start.to_string()));
        }

        let classify = |name: &str| -> Symbol {
            if lhs_names.contains(name) || name == start {
                Symbol::non_terminal(name)
            } else {
                Symbol::terminal(name)
            }
        };

        let augmented_start_name = Self::synthesize_augmented_name(start, &lhs_names);
        let start_symbol = classify(start);
        let augmented_start = Symbol::non_terminal(augmented_start_name.as_str());

        let mut productions = Vec::with_capacity(raw.len() + 1);
        productions.push(Production::new(
            augmented_start.clone(),
            vec![start_symbol.clone()],
        ));

        let mut seen: HashSet<(String, Vec<String>)> = HashSet::new();
        for (lhs, rhs) in &raw {
            let key = (lhs.clone(), rhs.clone());
            if !seen.insert(key) {
                diagnostics.push(GrammarError::DuplicateEmptyAlternatives {
                    production: format!(
                        "{} -> {}",
                        lhs,
                        if rhs.is_empty() {
                            "ε".to_string()
                        } else {
                            rhs.join(" ")
                        }
                    ),
                });
            }
            let rhs_symbols: Vec<Symbol> = rhs.iter().map(|s| classify(s)).collect();
            productions.push(Production::new(classify(lhs), rhs_symbols));
        }

        let mut nonterminals: HashSet<Symbol> = HashSet::new();
        let mut terminals: HashSet<Symbol> = HashSet::new();
        terminals.insert(Symbol::EndOfInput);
        nonterminals.insert(augmented_start.clone());
        if !lhs_names.contains(start) {
            nonterminals.insert(start_symbol.clone());
        }

        let mut used: HashSet<Symbol> = HashSet::new();
        for production in &productions {
            if production.lhs.is_nonterminal() {
                nonterminals.insert(production.lhs.clone());
            }
            for symbol in &production.rhs {
                used.insert(symbol.clone());
                match symbol {
                    Symbol::NonTerminal(_) => {
                        nonterminals.insert(symbol.clone());
                    }
                    Symbol::Terminal(_) => {
                        terminals.insert(symbol.clone());
                    }
                    Symbol::Epsilon | Symbol::EndOfInput => {}
                }
            }
        }

        let mut production_indices: HashMap<Arc<str>, Vec<usize>> = HashMap::new();
        for (index, production) in productions.iter().enumerate() {
            if let Some(name) = production.lhs.name() {
                production_indices
                    .entry(Arc::from(name))
                    .or_default()
                    .push(index);
            }
        }

        for nt in &nonterminals {
            if nt == &augmented_start || nt == &start_symbol {
                continue;
            }
            if production_indices
                .get(nt.name().unwrap_or_default())
                .is_none_or(Vec::is_empty)
            {
                diagnostics.push(GrammarError::UndefinedNonTerminal(
                    nt.name().unwrap_or_default().to_string(),
                ));
            }
        }

        for nt in &nonterminals {
            if nt == &augmented_start || nt == &start_symbol {
                continue;
            }
            if !used.contains(nt) {
                diagnostics.push(GrammarError::UnusedSymbol(
                    nt.name().unwrap_or_default().to_string(),
                ));
            }
        }
        for t in &terminals {
            if t.is_end_of_input() {
                continue;
            }
            if !used.contains(t) {
                diagnostics.push(GrammarError::UnusedSymbol(
                    t.name().unwrap_or_default().to_string(),
                ));
            }
        }

        let mut reachable: HashSet<Symbol> = HashSet::new();
        let mut stack = vec![start_symbol.clone()];
        while let Some(nt) = stack.pop() {
            if !reachable.insert(nt.clone()) {
                continue;
            }
            for &index in production_indices
                .get(nt.name().unwrap_or_default())
                .map(|v| v.as_slice())
                .unwrap_or(&[])
            {
                for symbol in &productions[index].rhs {
                    if symbol.is_nonterminal() && !reachable.contains(symbol) {
                        stack.push(symbol.clone());
                    }
                }
            }
        }
        for nt in &nonterminals {
            if nt == &augmented_start || nt == &start_symbol {
                continue;
            }
            if !reachable.contains(nt) {
                diagnostics.push(GrammarError::UnreachableFromStart(
                    nt.name().unwrap_or_default().to_string(),
                ));
            }
        }

        let mut grammar = Grammar {
            productions,
            nonterminals,
            terminals,
            start_symbol,
            augmented_start,
            production_indices,
            first_sets: FirstSets::default(),
        };
        grammar.first_sets = first_follow::compute_first_sets(&grammar);

        Ok(GrammarBuildResult {
            grammar,
            diagnostics,
        })
    }

    fn synthesize_augmented_name(start: &str, lhs_names: &HashSet<&str>) -> String {
        let mut candidate = format!("{start}'");
        while lhs_names.contains(candidate.as_str()) || candidate == start {
            candidate.push('\'');
        }
        candidate
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for production in self.productions.iter().skip(1) {
            writeln!(f, "{}", production)?;
        }
        Ok(())
    }
}

/// Parses grammar text into `(lhs, rhs)` pairs with RHS tokens as plain
/// strings; classification into terminals/nonterminals happens afterwards,
/// once the full set of LHS names is known (§9 "Dynamic classification").
fn parse_productions_text(text: &str) -> Result<Vec<(String, Vec<String>)>> {
    let mut productions = Vec::new();

    for (offset, raw_line) in text.lines().enumerate() {
        let line_no = offset + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (lhs_part, rhs_part) = split_arrow(line).ok_or_else(|| GrammarError::SyntaxError {
            line: line_no,
            fragment: raw_line.to_string(),
        })?;

        let lhs = lhs_part.trim();
        if lhs.is_empty() || lhs.split_whitespace().count() != 1 {
            return Err(GrammarError::SyntaxError {
                line: line_no,
                fragment: raw_line.to_string(),
            });
        }

        for alternative in rhs_part.split('|') {
            let rhs = tokenize_alternative(alternative);
            productions.push((lhs.to_string(), rhs));
        }
    }

    Ok(productions)
}

/// Splits a production line on the first `->` or `→`, whichever appears.
fn split_arrow(line: &str) -> Option<(&str, &str)> {
    if let Some(pos) = line.find("->") {
        Some((&line[..pos], &line[pos + 2..]))
    } else {
        line.find('→').map(|pos| {
            let split = pos + '→'.len_utf8();
            (&line[..pos], &line[split..])
        })
    }
}

/// Splits a single RHS alternative into symbol-name tokens. An empty or
/// `ε`/`epsilon` alternative yields an empty RHS (an ε-production). Quoted
/// substrings (`'+'`, `"while"`) are accepted as single-token terminal
/// literals, per the grammar-parser's optional quoted-literal extension.
fn tokenize_alternative(alternative: &str) -> Vec<String> {
    let trimmed = alternative.trim();
    if trimmed.is_empty() || trimmed == "ε" || trimmed.eq_ignore_ascii_case("epsilon") {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = trimmed.chars();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else if c == '\'' || c == '"' {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            let quote = c;
            let mut literal = String::new();
            for inner in chars.by_ref() {
                if inner == quote {
                    break;
                }
                literal.push(inner);
            }
            tokens.push(literal);
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Top-level entry point: grammar text + start-symbol name → a built
/// [`Grammar`] plus every semantic diagnostic noticed (§6). Syntax errors
/// abort immediately with a single [`GrammarError::SyntaxError`].
pub fn build_grammar(text: &str, start: &str) -> Result<GrammarBuildResult> {
    let raw = parse_productions_text(text)?;
    Grammar::from_named_productions(raw, start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_classic_expression_grammar() {
        let text = "S -> E\nE -> E + T | T\nT -> T * F | F\nF -> ( E ) | id\n";
        let result = build_grammar(text, "S").unwrap();
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        let grammar = result.grammar;
        // production 0 is the augmented start, then 8 user alternatives.
        assert_eq!(grammar.productions().len(), 9);
        assert_eq!(grammar.production(0).rhs, vec![Symbol::non_terminal("S")]);
        assert!(grammar.terminals().contains(&Symbol::terminal("id")));
        assert!(grammar.nonterminals().contains(&Symbol::non_terminal("E")));
    }

    #[test]
    fn epsilon_alternative_produces_empty_rhs() {
        let text = "S -> L\nL -> L x | ε\n";
        let result = build_grammar(text, "S").unwrap();
        let l_prod = result
            .grammar
            .production_indices_for(&Symbol::non_terminal("L"))
            .iter()
            .map(|&i| result.grammar.production(i))
            .find(|p| p.rhs.is_empty())
            .unwrap();
        assert!(l_prod.rhs.is_empty());
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let text = "# a comment\n\nS -> a\n\n# trailing\n";
        let result = build_grammar(text, "S").unwrap();
        assert_eq!(result.grammar.productions().len(), 2);
    }

    #[test]
    fn unicode_arrow_is_accepted() {
        let text = "S → a\n";
        let result = build_grammar(text, "S").unwrap();
        assert_eq!(result.grammar.productions().len(), 2);
    }

    #[test]
    fn quoted_literal_terminal_is_one_token() {
        let text = "S -> E '+' E | id\n";
        let result = build_grammar(text, "S").unwrap();
        let plus_prod = result
            .grammar
            .production_indices_for(&Symbol::non_terminal("S"))
            .iter()
            .map(|&i| result.grammar.production(i))
            .find(|p| p.rhs.len() == 3)
            .unwrap();
        assert_eq!(plus_prod.rhs[1], Symbol::terminal("+"));
    }

    #[test]
    fn undefined_start_symbol_is_reported() {
        let text = "A -> a\n";
        let result = build_grammar(text, "S").unwrap();
        assert!(
            result
                .diagnostics
                .iter()
                .any(|d| matches!(d, GrammarError::UndefinedNonTerminal(n) if n == "S"))
        );
    }

    #[test]
    fn unreachable_nonterminal_is_reported() {
        let text = "S -> a\nB -> b\n";
        let result = build_grammar(text, "S").unwrap();
        assert!(
            result
                .diagnostics
                .iter()
                .any(|d| matches!(d, GrammarError::UnreachableFromStart(n) if n == "B"))
        );
    }

    #[test]
    fn unused_terminal_is_not_falsely_reported() {
        let text = "S -> a\n";
        let result = build_grammar(text, "S").unwrap();
        assert!(
            !result
                .diagnostics
                .iter()
                .any(|d| matches!(d, GrammarError::UnusedSymbol(n) if n == "a"))
        );
    }

    #[test]
    fn duplicate_production_is_reported() {
        let text = "S -> a\nS -> a\n";
        let result = build_grammar(text, "S").unwrap();
        assert!(
            result
                .diagnostics
                .iter()
                .any(|d| matches!(d, GrammarError::DuplicateEmptyAlternatives { .. }))
        );
    }

    #[test]
    fn dollar_is_reserved() {
        let text = "S -> $\n";
        assert!(matches!(
            build_grammar(text, "S"),
            Err(GrammarError::ReservedSymbolName(_))
        ));
    }

    #[test]
    fn malformed_line_is_a_syntax_error() {
        let text = "S => a\n";
        assert!(matches!(
            build_grammar(text, "S"),
            Err(GrammarError::SyntaxError { .. })
        ));
    }
}

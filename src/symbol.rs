//! Symbol types and utilities for context-free grammars.
//!
//! This module defines the core `Symbol` type shared by every other module:
//! terminals and nonterminals carried by name, plus the two distinguished
//! symbols `Epsilon` and `EndOfInput` ($).

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A symbol in a context-free grammar.
///
/// # Grammar conventions
/// - Terminal and nonterminal names are arbitrary non-whitespace text.
/// - Nonterminal-ness is determined by appearing as the left-hand side of
///   some production (see [`crate::grammar::Grammar`]), never by spelling.
/// - `Epsilon` denotes the empty string; it never appears inside a
///   production's right-hand side (an empty RHS denotes an ε-production) and
///   never escapes into an item's lookahead slot.
/// - `EndOfInput` is the synthetic `$` marker appended to every token stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A terminal symbol, named by the text that appears in the grammar.
    Terminal(Arc<str>),
    /// A nonterminal symbol, named by the text that appears on some LHS.
    NonTerminal(Arc<str>),
    /// The empty string (ε).
    Epsilon,
    /// The end-of-input marker ($).
    EndOfInput,
}

impl Symbol {
    /// Builds a terminal symbol with the given name.
    pub fn terminal(name: impl Into<Arc<str>>) -> Self {
        Symbol::Terminal(name.into())
    }

    /// Builds a nonterminal symbol with the given name.
    pub fn non_terminal(name: impl Into<Arc<str>>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    #[inline]
    pub const fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    #[inline]
    pub const fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    #[inline]
    pub const fn is_end_of_input(&self) -> bool {
        matches!(self, Symbol::EndOfInput)
    }

    /// The textual name of this symbol, for terminals and nonterminals only.
    pub fn name(&self) -> Option<&str> {
        match self {
            Symbol::Terminal(n) | Symbol::NonTerminal(n) => Some(n),
            Symbol::Epsilon | Symbol::EndOfInput => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(n) | Symbol::NonTerminal(n) => write!(f, "{}", n),
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::EndOfInput => write!(f, "$"),
        }
    }
}

/// Total order used whenever iteration order can affect state numbering
/// (see §4.4 / §9 of the design notes): `Epsilon < Terminal < NonTerminal
/// < EndOfInput`, same-kind symbols compared by name.
impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Symbol::Epsilon, Symbol::Epsilon) => Ordering::Equal,
            (Symbol::Epsilon, _) => Ordering::Less,
            (_, Symbol::Epsilon) => Ordering::Greater,

            (Symbol::EndOfInput, Symbol::EndOfInput) => Ordering::Equal,
            (Symbol::EndOfInput, _) => Ordering::Greater,
            (_, Symbol::EndOfInput) => Ordering::Less,

            (Symbol::Terminal(a), Symbol::Terminal(b)) => a.cmp(b),
            (Symbol::Terminal(_), Symbol::NonTerminal(_)) => Ordering::Less,
            (Symbol::NonTerminal(_), Symbol::Terminal(_)) => Ordering::Greater,
            (Symbol::NonTerminal(a), Symbol::NonTerminal(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_predicates() {
        let t = Symbol::terminal("id");
        let nt = Symbol::non_terminal("Expr");
        assert!(t.is_terminal());
        assert!(!t.is_nonterminal());
        assert!(nt.is_nonterminal());
        assert!(Symbol::Epsilon.is_epsilon());
        assert!(Symbol::EndOfInput.is_end_of_input());
    }

    #[test]
    fn ordering_groups_terminals_before_nonterminals() {
        let mut symbols = vec![
            Symbol::non_terminal("B"),
            Symbol::EndOfInput,
            Symbol::terminal("b"),
            Symbol::Epsilon,
            Symbol::terminal("a"),
            Symbol::non_terminal("A"),
        ];
        symbols.sort();
        assert_eq!(
            symbols,
            vec![
                Symbol::Epsilon,
                Symbol::terminal("a"),
                Symbol::terminal("b"),
                Symbol::non_terminal("A"),
                Symbol::non_terminal("B"),
                Symbol::EndOfInput,
            ]
        );
    }

    #[test]
    fn display_uses_canonical_markers() {
        assert_eq!(Symbol::Epsilon.to_string(), "ε");
        assert_eq!(Symbol::EndOfInput.to_string(), "$");
        assert_eq!(Symbol::terminal("+").to_string(), "+");
    }
}

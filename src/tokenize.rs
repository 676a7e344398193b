//! Input-token tokenization (C2, the second half).
//!
//! Splits a whitespace-separated input string into the declared terminals
//! it names, appending `$`: whitespace-split multi-character tokens matched
//! against the grammar's declared terminal names.

use crate::error::{GrammarError, Result};
use crate::grammar::Grammar;
use crate::symbol::Symbol;

/// Splits `input` on whitespace, resolves each token against `grammar`'s
/// declared terminals, and appends `$`. The first token that doesn't name a
/// declared terminal fails the whole call with `UnknownToken` — no partial
/// token stream is returned.
pub fn tokenize(grammar: &Grammar, input: &str) -> Result<Vec<Symbol>> {
    let mut tokens = Vec::new();

    for raw in input.split_whitespace() {
        let candidate = Symbol::terminal(raw);
        if grammar.terminals().contains(&candidate) {
            tokens.push(candidate);
        } else {
            return Err(GrammarError::UnknownToken {
                token: raw.to_string(),
            });
        }
    }

    tokens.push(Symbol::EndOfInput);
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::build_grammar;

    fn expr_grammar() -> Grammar {
        build_grammar(
            "S -> E\nE -> E + T | T\nT -> T * F | F\nF -> ( E ) | id\n",
            "S",
        )
        .unwrap()
        .grammar
    }

    #[test]
    fn tokenizes_and_appends_end_of_input() {
        let grammar = expr_grammar();
        let tokens = tokenize(&grammar, "id + id * id").unwrap();
        assert_eq!(tokens.last(), Some(&Symbol::EndOfInput));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn unknown_token_is_rejected() {
        let grammar = expr_grammar();
        let result = tokenize(&grammar, "id ? id");
        assert!(matches!(
            result,
            Err(GrammarError::UnknownToken { token }) if token == "?"
        ));
    }

    #[test]
    fn empty_input_yields_only_end_of_input() {
        let grammar = expr_grammar();
        let tokens = tokenize(&grammar, "   ").unwrap();
        assert_eq!(tokens, vec![Symbol::EndOfInput]);
    }
}

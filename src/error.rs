//! Error types for the LR(1) parser-generator.
//!
//! Every failure kind named in the design ([GrammarSyntax],
//! [GrammarSemantic](GrammarError::UndefinedNonTerminal), [TableConflict],
//! [ParseReject], [ResourceExhaustion]) is a variant here rather than a panic
//! or a process abort — construction and parsing are always recoverable at
//! the boundary.

use thiserror::Error;

/// Errors that can occur while building a grammar, an automaton, a parsing
/// table, or while driving a parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    // --- GrammarSyntax -----------------------------------------------
    #[error("line {line}: malformed production: {fragment}")]
    SyntaxError { line: usize, fragment: String },

    #[error("'{0}' is reserved and cannot be used as a symbol name")]
    ReservedSymbolName(String),

    #[error("grammar text contained no productions")]
    EmptyGrammar,

    // --- GrammarSemantic (reported as a list, see grammar::GrammarBuildResult) ---
    #[error("nonterminal '{0}' is referenced but has no productions")]
    UndefinedNonTerminal(String),

    #[error("nonterminal '{0}' is unreachable from the start symbol")]
    UnreachableFromStart(String),

    #[error("symbol '{0}' is declared but never used")]
    UnusedSymbol(String),

    #[error("production '{production}' is a duplicate of an earlier alternative")]
    DuplicateEmptyAlternatives { production: String },

    // --- TableConflict -------------------------------------------------
    #[error("grammar has {0} unresolved ACTION-table conflict(s)")]
    TableConflict(usize),

    // --- ParseReject -----------------------------------------------------
    #[error(
        "parse rejected at step {step}: no action for lookahead '{lookahead}' in state {state} \
         (expected one of [{expected}])"
    )]
    ParseReject {
        step: usize,
        state: usize,
        lookahead: String,
        expected: String,
    },

    #[error("token '{token}' does not match any declared terminal")]
    UnknownToken { token: String },

    // --- ResourceExhaustion ----------------------------------------------
    #[error("automaton exceeded MAX_STATES ({max_states}); construction aborted")]
    StateExplosion { max_states: usize },

    #[error("parse exceeded MAX_STEPS ({max_steps}); aborted")]
    StepLimitExceeded { max_steps: usize },

    // --- InternalInvariantViolation ----------------------------------------
    #[error(
        "internal invariant violated: {detail} (state={state:?}, symbol={symbol:?}, \
         production={production:?})"
    )]
    InternalInvariantViolation {
        detail: String,
        state: Option<usize>,
        symbol: Option<String>,
        production: Option<usize>,
    },
}

impl GrammarError {
    /// Convenience constructor for the common "GOTO undefined during
    /// reduce" / "stack underflow" bug-class errors (§7).
    pub fn internal(detail: impl Into<String>) -> Self {
        GrammarError::InternalInvariantViolation {
            detail: detail.into(),
            state: None,
            symbol: None,
            production: None,
        }
    }

    pub fn with_state(mut self, state: usize) -> Self {
        if let GrammarError::InternalInvariantViolation { state: s, .. } = &mut self {
            *s = Some(state);
        }
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        if let GrammarError::InternalInvariantViolation { symbol: s, .. } = &mut self {
            *s = Some(symbol.into());
        }
        self
    }

    pub fn with_production(mut self, production: usize) -> Self {
        if let GrammarError::InternalInvariantViolation { production: p, .. } = &mut self {
            *p = Some(production);
        }
        self
    }
}

/// Type alias for `Result`s in this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;

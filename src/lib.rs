//! Canonical LR(1) parser-generator and step-recording parse driver.
//!
//! Grammar text → [`grammar::build_grammar`] → canonical LR(1) automaton
//! ([`lr1::build_automaton`]) → ACTION/GOTO table ([`lr1::build_table`]) →
//! shift-reduce driver ([`driver::parse`]), with read-only snapshot views
//! ([`snapshot`]) for external consumers.

pub mod cli;
pub mod driver;
pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod lr1;
pub mod snapshot;
pub mod symbol;
pub mod tokenize;

pub use driver::{parse, ParseOutcome, ParseStep, ParseTree, ParseTreeNode, StepAction};
pub use error::{GrammarError, Result};
pub use grammar::{build_grammar, Grammar, GrammarBuildResult, Production};
pub use lr1::{build_automaton, build_table, Action, Automaton, ConflictInfo, ParsingTable};
pub use snapshot::{snapshot_state, snapshot_table, StateSnapshot, TableSnapshot};
pub use symbol::Symbol;

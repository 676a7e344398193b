//! CLI module for the grammar parser application.
//!
//! A `clap`-derived front-end: a grammar file and an input-tokens string are
//! given as arguments, the LR(1) pipeline runs once, and either the
//! diagnostic/conflict report or the step trace is printed.

use crate::driver;
use crate::error::{GrammarError, Result};
use crate::grammar::build_grammar;
use crate::lr1::{self, DEFAULT_MAX_STATES};
use crate::snapshot;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{info, trace};

/// Canonical LR(1) parser generator: build a parsing table from a grammar
/// file and optionally drive a parse over a given input.
#[derive(Debug, Parser)]
#[command(name = "lr1_parser", author, version, about)]
struct Args {
    /// Path to a grammar file (line-oriented `LHS -> RHS1 | RHS2 | ...`).
    grammar: PathBuf,

    /// Start symbol name.
    #[arg(long, default_value = "S")]
    start: String,

    /// Whitespace-separated input tokens to parse. If omitted, only the
    /// table and any conflicts are printed.
    #[arg(long)]
    input: Option<String>,

    /// Cap on the number of automaton states before aborting (§4.4).
    #[arg(long, default_value_t = DEFAULT_MAX_STATES)]
    max_states: usize,

    /// Cap on the number of parse steps before aborting (§4.6).
    #[arg(long, default_value_t = driver::DEFAULT_MAX_STEPS)]
    max_steps: usize,
}

/// Main CLI runner for the grammar parser.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let text = fs::read_to_string(&args.grammar).map_err(|e| {
        GrammarError::internal(format!("could not read grammar file: {e}"))
    })?;

    let build_result = build_grammar(&text, &args.start)?;
    let grammar = build_result.grammar;

    for diagnostic in &build_result.diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    let automaton = lr1::build_automaton(&grammar, args.max_states)?;
    info!(states = automaton.states().len(), "built canonical LR(1) automaton");

    let (table, conflicts) = lr1::build_table(&grammar, &automaton)?;
    if !conflicts.is_empty() {
        info!(conflicts = conflicts.len(), "table has unresolved conflicts");
        let snapshot = snapshot::snapshot_table(&table, &conflicts);
        for conflict in &snapshot.conflicts {
            println!(
                "conflict: state {} on '{}' ({}): chose {}, rejected [{}]",
                conflict.state,
                conflict.symbol,
                conflict.kind,
                conflict.chosen,
                conflict.rejected.join(", ")
            );
        }
    }

    let Some(input) = args.input else {
        return Ok(());
    };

    let outcome = driver::parse(&grammar, &table, &input, args.max_steps)?;
    for step in &outcome.steps {
        trace!(ordinal = step.ordinal, action = %step.action, "parse step");
        println!(
            "{:>3}: {:<28} lookahead={:<8} action={}",
            step.ordinal, step.sentential_form, step.lookahead, step.action
        );
    }

    if outcome.accepted {
        println!("accepted");
    } else {
        println!("rejected");
    }

    Ok(())
}

//! Canonical LR(1) Parser Generator
//!
//! A Rust implementation of a deterministic canonical LR(1) parser
//! generator and step-recording parse driver.
//!
//! This implementation provides:
//! - Algorithms to compute FIRST and FOLLOW sets
//! - Canonical LR(1) item-set construction (CLOSURE/GOTO)
//! - ACTION/GOTO table assembly with conflict classification
//! - A shift-reduce driver that records every step and builds a parse tree
//! - A CLI for grammar analysis and string parsing
//!
//! # Author
//! Juan Manuel Young Hoyos
//!
//! # References
//! Aho, Alfred V. et al. "Compilers: Principles, Techniques, and Tools" (2nd Edition).
//! Addison-Wesley, 2006.

mod cli;
mod driver;
mod error;
mod first_follow;
mod grammar;
mod lr1;
mod snapshot;
mod symbol;
mod tokenize;

use std::process;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

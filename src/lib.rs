//! # kotlex
//!
//! A lexical analyser for a small subset of Kotlin, built following the text
//! "Engineering a Compiler 2e" by Keith Cooper and Linda Torczon.
//!
//! This library provides functionality to:
//! - Build NFAs with epsilon transitions and compute epsilon closures
//! - Convert NFAs to DFAs using Subset Construction
//! - Scan source text into tokens, reporting lexical errors in place
//! - Export the automata as structured data or Graphviz DOT

pub mod dfa;
pub mod export;
pub mod fa;
pub mod grammar;
pub mod nfa;
pub mod scanner;
pub mod token;

// Re-export commonly used items for convenience
pub use dfa::{construct_dfa, DFA};
pub use export::{summarize, to_dot, AutomatonSummary};
pub use fa::{StateSet, Symbol, FA};
pub use nfa::NFA;
pub use scanner::{construct_scanner, LexicalError, Scanner};
pub use token::{ErrorCategory, Token, TokenCategory};

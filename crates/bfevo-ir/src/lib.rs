//! Program representation for evolved tape programs.
//!
//! A program is a byte string over an eight-symbol alphabet. Any byte is
//! accepted; bytes outside the alphabet execute as no-ops. This keeps every
//! product of mutation and crossover runnable.

pub mod instruction;
pub mod program;
pub mod brackets;
pub mod mutation;

pub use instruction::{Opcode, ALPHABET};
pub use program::Program;
pub use brackets::BracketMap;
pub use mutation::{splice, MutationConfig, Mutator};

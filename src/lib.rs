//! # argdown
//!
//! Semantic analysis for the argdown argumentation markup.
//!
//! Parsing is done elsewhere: a grammar hands over a concrete parse tree and this
//! crate turns it into a linked document model (claim identity, argument
//! reconstructions, inference metadata, inline ranges and the support/attack
//! graph) in a single depth-first pass.
//!
//! Configuration lives in the `argdown-config` workspace crate. For the tree
//! factories used throughout the tests, see the [testing module](argdown::testing).

pub mod argdown;

pub use argdown::{analyze, analyze_json, Analysis, ArgdownModel, Error, ParseNode, Preprocessor};

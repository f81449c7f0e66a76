//! Semantic analysis for argdown documents
//!
//! The external parser produces a concrete [`ParseNode`] tree; [`Preprocessor`]
//! walks it once and builds the linked [`ArgdownModel`]:
//!
//! - claims that share a title are merged into one [`EquivalenceClass`]
//! - premise-conclusion reconstructions are attached to their [`Argument`]
//! - inline formatting and cross references become [`Range`]s on statements
//! - support/attack relations form a graph between classes and arguments
//!
//! Module map, in dependency order:
//!
//! - `tree`: input node shape and the depth-first walker
//! - `patterns`: literal title/link extraction
//! - `titles`: generated titles and identity resolution
//! - `ranges`: inline range tracking
//! - `statements`, `inlines`, `arguments`, `relations`: the node handlers
//! - `dispatcher`: routes each visit to its handler

pub mod arguments;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod inlines;
pub mod model;
pub mod patterns;
pub mod ranges;
pub mod relations;
pub mod statements;
pub mod testing;
pub mod titles;
pub mod tree;

pub use context::{Analysis, Annotations, NodeData};
pub use dispatcher::{Phase, Preprocessor};
pub use error::{Error, Result};
pub use model::{
    ArgdownModel, Argument, EquivalenceClass, Inference, MetaValue, Range, RangeKind, Relation,
    RelationId, RelationNode, RelationType, Role, Statement, StatementId,
};
pub use tree::{walk, NodeId, NodeKind, ParseNode, TreeListener, Visit};

/// Runs the preprocessor with the default configuration.
pub fn analyze(root: &ParseNode) -> Analysis {
    Preprocessor::new().run(root)
}

/// Reads a JSON parse tree and analyzes it.
pub fn analyze_json(json: &str) -> Result<Analysis> {
    Ok(analyze(&ParseNode::from_json(json)?))
}

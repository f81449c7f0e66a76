//! Traversal context and typed per-node results
//!
//! [`TraversalContext`] holds everything the handlers share during one run: the
//! model under construction, the title registry, the "current" pointers and the
//! nesting stacks. It is created fresh (or reset) for every document.
//!
//! Results meant for downstream consumers are recorded per visited node as a
//! [`NodeData`] in [`Annotations`], keyed by the node's pre-order id. Handlers
//! also read them back to inspect siblings and children they already visited.

use std::collections::HashMap;

use serde::Serialize;

use super::model::{ArgdownModel, Inference, RelationId, RelationNode, StatementId};
use super::ranges::RangeTracker;
use super::relations::RelationBuilder;
use super::titles::{Subject, TitleRegistry};
use super::tree::{NodeId, ParseNode};

/// Result recorded for one node kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeData {
    /// `statement`, `statementDefinition`, `statementReference`.
    Statement { statement: StatementId },
    /// `argument`, `argumentDefinition`, `argumentReference`.
    Argument { title: String },
    /// `freestyleText`: the concatenated raw images.
    Text { text: String },
    /// `statementMention`, `argumentMention`.
    Mention {
        title: String,
        trailing_whitespace: bool,
    },
    Link {
        text: String,
        url: String,
        trailing_whitespace: bool,
    },
    /// `bold`, `italic`.
    Formatting { trailing_whitespace: bool },
    ArgumentStatement {
        statement: StatementId,
        /// 1-based position in the reconstruction.
        number: usize,
    },
    Inference { inference: Inference },
    /// The four relation variants.
    Relation { relation: RelationId },
    Heading { level: usize, text: String },
}

/// Typed results keyed by node id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Annotations {
    nodes: HashMap<NodeId, NodeData>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(&id)
    }

    pub fn insert(&mut self, id: NodeId, data: NodeData) {
        self.nodes.insert(id, data);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &NodeData)> {
        self.nodes.iter()
    }

    pub fn statement(&self, id: NodeId) -> Option<StatementId> {
        match self.get(id)? {
            NodeData::Statement { statement } | NodeData::ArgumentStatement { statement, .. } => {
                Some(*statement)
            }
            _ => None,
        }
    }

    pub fn argument(&self, id: NodeId) -> Option<&str> {
        match self.get(id)? {
            NodeData::Argument { title } => Some(title),
            _ => None,
        }
    }

    pub fn inference(&self, id: NodeId) -> Option<&Inference> {
        match self.get(id)? {
            NodeData::Inference { inference } => Some(inference),
            _ => None,
        }
    }

    pub fn relation(&self, id: NodeId) -> Option<RelationId> {
        match self.get(id)? {
            NodeData::Relation { relation } => Some(*relation),
            _ => None,
        }
    }

    /// Derived text of a node, falling back to its raw image.
    pub fn text_of(&self, id: NodeId, node: &ParseNode) -> String {
        match self.get(id) {
            Some(NodeData::Text { text }) | Some(NodeData::Heading { text, .. }) => text.clone(),
            _ => node.image.clone(),
        }
    }
}

/// Frozen output of one run: the model plus per-node results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    pub model: ArgdownModel,
    pub annotations: Annotations,
}

/// Mutable state shared by the handlers during one traversal.
#[derive(Debug, Clone)]
pub struct TraversalContext {
    pub(crate) model: ArgdownModel,
    pub(crate) titles: TitleRegistry,
    pub(crate) annotations: Annotations,
    /// Statement receiving inline text.
    pub(crate) current_statement: Option<StatementId>,
    /// Statement or argument a relations block attaches to.
    pub(crate) current_subject: Option<Subject>,
    /// Reconstruction receiving premise/conclusion lines.
    pub(crate) current_reconstruction: Option<String>,
    pub(crate) current_inference: Option<Inference>,
    pub(crate) ranges: RangeTracker,
    /// Resolved targets of the open relations blocks.
    pub(crate) attachments: Vec<Option<RelationNode>>,
    /// Relations entered but not yet exited, innermost last.
    pub(crate) pending_relations: Vec<Option<RelationBuilder>>,
}

impl TraversalContext {
    pub fn new(titles: TitleRegistry) -> Self {
        Self {
            model: ArgdownModel::new(),
            titles,
            annotations: Annotations::new(),
            current_statement: None,
            current_subject: None,
            current_reconstruction: None,
            current_inference: None,
            ranges: RangeTracker::new(),
            attachments: Vec::new(),
            pending_relations: Vec::new(),
        }
    }

    /// Empties the registries, clears every pointer and stack and restarts title
    /// numbering.
    pub fn reset(&mut self) {
        self.model = ArgdownModel::new();
        self.titles.reset();
        self.annotations = Annotations::new();
        self.current_statement = None;
        self.current_subject = None;
        self.current_reconstruction = None;
        self.current_inference = None;
        self.ranges.clear();
        self.attachments.clear();
        self.pending_relations.clear();
    }

    /// Hands out the finished result and leaves the context empty.
    pub fn take_analysis(&mut self) -> Analysis {
        let analysis = Analysis {
            model: std::mem::take(&mut self.model),
            annotations: std::mem::take(&mut self.annotations),
        };
        self.reset();
        analysis
    }

    pub fn model(&self) -> &ArgdownModel {
        &self.model
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argdown::model::Statement;
    use crate::argdown::tree::NodeKind;

    #[test]
    fn test_text_of_prefers_derived_text() {
        let mut annotations = Annotations::new();
        annotations.insert(
            3,
            NodeData::Text {
                text: "derived".to_string(),
            },
        );
        let node = ParseNode::leaf(NodeKind::FreestyleText, "raw");
        assert_eq!(annotations.text_of(3, &node), "derived");
        assert_eq!(annotations.text_of(4, &node), "raw");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut context = TraversalContext::new(TitleRegistry::default());
        context.model.occurrences.push(Statement::new());
        context.titles.next_unique_title();
        context.current_statement = Some(0);
        context.attachments.push(None);
        context.annotations.insert(0, NodeData::Relation { relation: 0 });

        context.reset();

        assert_eq!(context.model, ArgdownModel::new());
        assert_eq!(context.titles.issued(), 0);
        assert!(context.current_statement.is_none());
        assert!(context.attachments.is_empty());
        assert!(context.annotations.is_empty());
    }
}

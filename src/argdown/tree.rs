//! Concrete parse tree consumed by the preprocessor
//!
//! The grammar and lexer live outside this crate. They hand over a tree of
//! [`ParseNode`]s in which rule nodes and lexer tokens share one shape: a kind,
//! the raw matched text (`image`) and ordered children. The preprocessor never
//! checks that the tree is well formed, it trusts the producing grammar.
//!
//! Shape conventions relied upon by the handlers:
//!
//! - `statement`: optional leading `statementDefinition`/`statementReference`,
//!   inline prose, optional trailing `relations`.
//! - `argumentDefinition`/`argumentReference`: own image is the head (`<A>:` /
//!   `<A>`), children are description prose and optional `relations`.
//! - `argumentStatement`: `[Token("(1)"), statement]`.
//! - relation nodes: `[Token(arrow), statement | argumentReference | argumentDefinition]`.
//! - `heading`: `[Token("##"), freestyleText]`.
//! - `bold`/`italic`: the last child is the closing delimiter; its image carries
//!   any trailing whitespace.
//!
//! [`walk`] drives a [`TreeListener`] in depth-first pre/post order, which is
//! how the external parser feeds the preprocessor.

use serde::{Deserialize, Serialize};

use super::error::Result;

/// Pre-order index of a node within one walk.
pub type NodeId = usize;

/// Node kinds understood by the preprocessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    DocumentRoot,
    Heading,
    Statement,
    StatementDefinition,
    StatementReference,
    StatementMention,
    Argument,
    ArgumentDefinition,
    ArgumentReference,
    ArgumentMention,
    ArgumentStatement,
    Inference,
    InferenceRules,
    MetadataStatement,
    IncomingSupport,
    IncomingAttack,
    OutgoingSupport,
    OutgoingAttack,
    Relations,
    FreestyleText,
    Bold,
    Italic,
    Link,
    EmptyLine,
    /// Lexer token without semantics of its own (delimiters, markers, raw text).
    Token,
}

impl NodeKind {
    /// Returns `true` for the four support/attack relation variants.
    pub fn is_relation(self) -> bool {
        matches!(
            self,
            NodeKind::IncomingSupport
                | NodeKind::IncomingAttack
                | NodeKind::OutgoingSupport
                | NodeKind::OutgoingAttack
        )
    }

    /// Returns `true` for nodes that name an argument (definition or reference).
    pub fn is_argument_head(self) -> bool {
        matches!(self, NodeKind::ArgumentDefinition | NodeKind::ArgumentReference)
    }
}

/// A node in the parse tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseNode {
    pub kind: NodeKind,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    /// Creates a new `ParseNode`.
    pub fn new(kind: NodeKind, image: impl Into<String>, children: Vec<ParseNode>) -> Self {
        Self {
            kind,
            image: image.into(),
            children,
        }
    }

    /// Creates a childless node.
    pub fn leaf(kind: NodeKind, image: impl Into<String>) -> Self {
        Self::new(kind, image, Vec::new())
    }

    /// Creates a rule node with no image of its own.
    pub fn rule(kind: NodeKind, children: Vec<ParseNode>) -> Self {
        Self::new(kind, String::new(), children)
    }

    /// Reads a tree handed over as JSON by an external parser.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(ParseNode::size).sum::<usize>()
    }
}

/// Everything a handler may look at for one visit.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub id: NodeId,
    pub node: &'a ParseNode,
    pub parent: Option<&'a ParseNode>,
    /// Position of `node` among `parent`'s children.
    pub index: usize,
    /// Ids of the siblings already visited, in order.
    pub preceding: &'a [NodeId],
    /// Ids of this node's children; empty on entry.
    pub children: &'a [NodeId],
}

impl<'a> Visit<'a> {
    /// The sibling `back` positions before this node (`1` is the immediate one).
    pub fn preceding_sibling(&self, back: usize) -> Option<(NodeId, &'a ParseNode)> {
        let parent = self.parent?;
        let index = self.index.checked_sub(back)?;
        let id = *self.preceding.get(index)?;
        Some((id, &parent.children[index]))
    }

    /// Child `index` of this node together with its id (exit visits only).
    pub fn child(&self, index: usize) -> Option<(NodeId, &'a ParseNode)> {
        let id = *self.children.get(index)?;
        Some((id, self.node.children.get(index)?))
    }

    /// Iterates over `(id, node)` for every child (exit visits only).
    pub fn child_nodes(&self) -> impl Iterator<Item = (NodeId, &'a ParseNode)> + 'a {
        let ids: &'a [NodeId] = self.children;
        let node: &'a ParseNode = self.node;
        ids.iter().copied().zip(node.children.iter())
    }
}

/// Receives the pre-order (`enter`) and post-order (`exit`) callbacks of a walk.
///
/// Default implementations are empty, so you only need to override the
/// callbacks you care about.
pub trait TreeListener {
    fn enter(&mut self, _visit: &Visit<'_>) {}
    fn exit(&mut self, _visit: &Visit<'_>) {}
}

/// Walks `root` depth first, calling `enter` before and `exit` after each node's
/// children. Every node is entered and exited exactly once.
pub fn walk<L: TreeListener + ?Sized>(root: &ParseNode, listener: &mut L) {
    let mut next_id = 0;
    walk_node(root, None, 0, &[], &mut next_id, listener);
}

fn walk_node<L: TreeListener + ?Sized>(
    node: &ParseNode,
    parent: Option<&ParseNode>,
    index: usize,
    preceding: &[NodeId],
    next_id: &mut NodeId,
    listener: &mut L,
) -> NodeId {
    let id = *next_id;
    *next_id += 1;

    listener.enter(&Visit {
        id,
        node,
        parent,
        index,
        preceding,
        children: &[],
    });

    let mut children = Vec::with_capacity(node.children.len());
    for (child_index, child) in node.children.iter().enumerate() {
        let child_id = walk_node(child, Some(node), child_index, &children, next_id, listener);
        children.push(child_id);
    }

    listener.exit(&Visit {
        id,
        node,
        parent,
        index,
        preceding,
        children: &children,
    });
    id
}

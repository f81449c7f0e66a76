//! Document model produced by the preprocessor
//!
//! Statements are stored once in an arena ([`ArgdownModel::occurrences`]) and
//! referred to by [`StatementId`] from equivalence classes and arguments.
//! Relations are stored once in [`ArgdownModel::relations`]; both endpoints list
//! the same [`RelationId`], so an edge is shared rather than copied and parallel
//! edges are kept.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Index of a [`Statement`] in [`ArgdownModel::occurrences`].
pub type StatementId = usize;

/// Index of a [`Relation`] in [`ArgdownModel::relations`].
pub type RelationId = usize;

/// Part a statement plays in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    None,
    Thesis,
    Premise,
    Conclusion,
}

/// One occurrence of a claim in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statement {
    pub title: Option<String>,
    pub text: String,
    pub ranges: Vec<Range>,
    pub role: Role,
    /// Present iff `role` is [`Role::Conclusion`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference: Option<Inference>,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    /// Returns `true` if no title has been assigned yet.
    pub fn is_untitled(&self) -> bool {
        self.title.as_deref().map_or(true, str::is_empty)
    }
}

/// All occurrences of one proposition, keyed by their shared title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalenceClass {
    pub title: String,
    pub members: Vec<StatementId>,
    pub is_used_as_thesis: bool,
    pub is_used_in_argument: bool,
    pub relations: Vec<RelationId>,
}

impl EquivalenceClass {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// A named argument: free prose descriptions plus an optional reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub title: String,
    pub descriptions: Vec<StatementId>,
    /// Premises and conclusions in document order.
    pub pcs: Vec<StatementId>,
    pub relations: Vec<RelationId>,
}

impl Argument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    Support,
    Attack,
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationType::Support => write!(f, "support"),
            RelationType::Attack => write!(f, "attack"),
        }
    }
}

/// A node of the relation graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "title", rename_all = "camelCase")]
pub enum RelationNode {
    EquivalenceClass(String),
    Argument(String),
}

impl RelationNode {
    pub fn title(&self) -> &str {
        match self {
            RelationNode::EquivalenceClass(title) | RelationNode::Argument(title) => title,
        }
    }
}

/// A directed support or attack edge between two relation graph nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    pub from: RelationNode,
    pub to: RelationNode,
}

/// Formatting or cross-reference payload of a [`Range`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RangeKind {
    Bold,
    Italic,
    Link { url: String },
    StatementMention { title: String },
    ArgumentMention { title: String },
}

/// Inclusive span `start..=stop` over a statement's flattened text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Range {
    #[serde(flatten)]
    pub kind: RangeKind,
    pub start: usize,
    pub stop: usize,
}

impl Range {
    pub fn new(kind: RangeKind, start: usize, stop: usize) -> Self {
        Self { kind, start, stop }
    }

    /// Length in bytes of the covered text.
    pub fn width(&self) -> usize {
        self.stop + 1 - self.start
    }
}

/// Value of an inference metadata entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Scalar(String),
    List(Vec<String>),
}

/// Inference rules and metadata attached to a conclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inference {
    pub inference_rules: Vec<String>,
    pub meta_data: IndexMap<String, MetaValue>,
}

/// Frozen result of one preprocessor run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArgdownModel {
    /// Equivalence classes keyed by title, in order of first reference.
    pub statements: IndexMap<String, EquivalenceClass>,
    /// Arguments keyed by title, in order of first reference.
    pub arguments: IndexMap<String, Argument>,
    pub occurrences: Vec<Statement>,
    pub relations: Vec<Relation>,
}

impl ArgdownModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equivalence_class(&self, title: &str) -> Option<&EquivalenceClass> {
        self.statements.get(title)
    }

    pub fn argument(&self, title: &str) -> Option<&Argument> {
        self.arguments.get(title)
    }

    pub fn statement(&self, id: StatementId) -> Option<&Statement> {
        self.occurrences.get(id)
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations.get(id)
    }

    /// Statements of an equivalence class, in document order.
    pub fn members(&self, title: &str) -> Vec<&Statement> {
        self.ids_to_statements(
            self.statements
                .get(title)
                .map(|ec| ec.members.as_slice())
                .unwrap_or_default(),
        )
    }

    /// Description statements of an argument.
    pub fn descriptions(&self, title: &str) -> Vec<&Statement> {
        self.ids_to_statements(
            self.arguments
                .get(title)
                .map(|argument| argument.descriptions.as_slice())
                .unwrap_or_default(),
        )
    }

    /// Premise-conclusion structure of an argument.
    pub fn pcs(&self, title: &str) -> Vec<&Statement> {
        self.ids_to_statements(
            self.arguments
                .get(title)
                .map(|argument| argument.pcs.as_slice())
                .unwrap_or_default(),
        )
    }

    fn ids_to_statements(&self, ids: &[StatementId]) -> Vec<&Statement> {
        ids.iter()
            .filter_map(|id| self.occurrences.get(*id))
            .collect()
    }

    fn relation_ids(&self, node: &RelationNode) -> &[RelationId] {
        let ids = match node {
            RelationNode::EquivalenceClass(title) => self
                .statements
                .get(title)
                .map(|ec| ec.relations.as_slice()),
            RelationNode::Argument(title) => self
                .arguments
                .get(title)
                .map(|argument| argument.relations.as_slice()),
        };
        ids.unwrap_or_default()
    }

    /// Every relation touching `node`, in the order it was attached.
    pub fn relations_of(&self, node: &RelationNode) -> Vec<&Relation> {
        self.relation_ids(node)
            .iter()
            .filter_map(|id| self.relations.get(*id))
            .collect()
    }

    /// Relations whose `from` endpoint is `node`.
    pub fn outgoing_relations(&self, node: &RelationNode) -> Vec<&Relation> {
        self.relations_of(node)
            .into_iter()
            .filter(|relation| &relation.from == node)
            .collect()
    }

    /// Relations whose `to` endpoint is `node`.
    pub fn incoming_relations(&self, node: &RelationNode) -> Vec<&Relation> {
        self.relations_of(node)
            .into_iter()
            .filter(|relation| &relation.to == node)
            .collect()
    }

    /// One line per relation, listed from its source: equivalence classes first,
    /// then arguments, each in registry order.
    pub fn relation_summary(&self) -> Vec<String> {
        let sources = self
            .statements
            .keys()
            .map(|title| RelationNode::EquivalenceClass(title.clone()))
            .chain(
                self.arguments
                    .keys()
                    .map(|title| RelationNode::Argument(title.clone())),
            );

        let mut lines = Vec::new();
        for source in sources {
            for relation in self.outgoing_relations(&source) {
                lines.push(format!(
                    "Relation from: {} to: {} type: {}",
                    relation.from.title(),
                    relation.to.title(),
                    relation.relation_type
                ));
            }
        }
        lines
    }
}

//! Relation graph builder
//!
//! A relations block is about whatever statement or argument is open when the
//! block starts. That target is resolved once, on entry, and pushed onto the
//! attachment stack, so relations nested further down still attach to it.
//!
//! Each relation is built across two callbacks: entering the relation node fixes
//! one endpoint to the top of the attachment stack (`from` for incoming
//! relations, `to` for outgoing ones), exiting it fills the other endpoint with
//! the statement or argument named inside. Only then is the [`Relation`] added to
//! the model and listed by both endpoints.

use tracing::{debug, warn};

use super::context::{NodeData, TraversalContext};
use super::model::{ArgdownModel, Relation, RelationId, RelationNode, RelationType};
use super::titles::{resolve_relation_target, Subject};
use super::tree::{NodeKind, Visit};

/// Which endpoint was fixed when the relation was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedEnd {
    From,
    To,
}

/// A relation with one endpoint fixed and the other still pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationBuilder {
    relation_type: RelationType,
    fixed: RelationNode,
    fixed_end: FixedEnd,
}

impl RelationBuilder {
    pub fn new(relation_type: RelationType, fixed: RelationNode, fixed_end: FixedEnd) -> Self {
        Self {
            relation_type,
            fixed,
            fixed_end,
        }
    }

    /// Seeds the builder for one of the four relation node kinds.
    ///
    /// "Incoming" relations fix `from` to the block's target, "outgoing" ones fix
    /// `to`.
    pub fn for_kind(kind: NodeKind, target: RelationNode) -> Option<Self> {
        let (relation_type, fixed_end) = match kind {
            NodeKind::IncomingSupport => (RelationType::Support, FixedEnd::From),
            NodeKind::IncomingAttack => (RelationType::Attack, FixedEnd::From),
            NodeKind::OutgoingSupport => (RelationType::Support, FixedEnd::To),
            NodeKind::OutgoingAttack => (RelationType::Attack, FixedEnd::To),
            _ => return None,
        };
        Some(Self::new(relation_type, target, fixed_end))
    }

    pub fn relation_type(&self) -> RelationType {
        self.relation_type
    }

    pub fn fixed_end(&self) -> FixedEnd {
        self.fixed_end
    }

    /// Fills the pending endpoint.
    pub fn complete(self, other: RelationNode) -> Relation {
        let (from, to) = match self.fixed_end {
            FixedEnd::From => (self.fixed, other),
            FixedEnd::To => (other, self.fixed),
        };
        Relation {
            relation_type: self.relation_type,
            from,
            to,
        }
    }
}

impl ArgdownModel {
    /// Adds a completed relation and lists it on both endpoints. Parallel edges
    /// are kept.
    pub fn add_relation(&mut self, relation: Relation) -> RelationId {
        let id = self.relations.len();
        for endpoint in [&relation.from, &relation.to] {
            let relations = match endpoint {
                RelationNode::EquivalenceClass(title) => self
                    .statements
                    .get_mut(title)
                    .map(|ec| &mut ec.relations),
                RelationNode::Argument(title) => self
                    .arguments
                    .get_mut(title)
                    .map(|argument| &mut argument.relations),
            };
            match relations {
                Some(relations) => relations.push(id),
                None => warn!(title = endpoint.title(), "relation endpoint is not registered"),
            }
        }
        self.relations.push(relation);
        id
    }
}

impl TraversalContext {
    pub(crate) fn resolve_subject(&mut self, subject: &Subject) -> Option<RelationNode> {
        resolve_relation_target(&mut self.model, &mut self.titles, subject)
    }

    pub(crate) fn enter_relations(&mut self) {
        let target = match self.current_subject.clone() {
            Some(subject) => self.resolve_subject(&subject),
            None => {
                debug!("relations block without an open statement or argument");
                None
            }
        };
        self.attachments.push(target);
    }

    pub(crate) fn exit_relations(&mut self) {
        self.attachments.pop();
    }

    pub(crate) fn enter_relation(&mut self, visit: &Visit<'_>) {
        let builder = self
            .attachments
            .last()
            .cloned()
            .flatten()
            .and_then(|target| RelationBuilder::for_kind(visit.node.kind, target));
        self.pending_relations.push(builder);
    }

    pub(crate) fn exit_relation(&mut self, visit: &Visit<'_>) {
        let Some(builder) = self.pending_relations.pop().flatten() else {
            return;
        };
        let Some(other) = self.relation_content(visit) else {
            debug!(kind = ?visit.node.kind, "relation without statement or argument content");
            return;
        };
        let relation = builder.complete(other);
        debug!(
            from = relation.from.title(),
            to = relation.to.title(),
            relation_type = %relation.relation_type,
            "relation"
        );
        let id = self.model.add_relation(relation);
        self.annotations
            .insert(visit.id, NodeData::Relation { relation: id });
    }

    /// Resolves the statement or argument named inside a relation node.
    fn relation_content(&mut self, visit: &Visit<'_>) -> Option<RelationNode> {
        let subject = visit.child_nodes().find_map(|(id, node)| match node.kind {
            NodeKind::Statement => self.annotations.statement(id).map(Subject::Statement),
            kind if kind.is_argument_head() => self
                .annotations
                .argument(id)
                .map(|title| Subject::Argument(title.to_string())),
            _ => None,
        })?;
        self.resolve_subject(&subject)
    }
}

//! Statement builder
//!
//! A `statement` node opens a new claim occurrence that collects the inline text
//! of its children. On exit the statement joins the equivalence class of its
//! title, receiving a generated title first if it was never given one.

use tracing::debug;

use super::context::{NodeData, TraversalContext};
use super::model::{Role, Statement, StatementId};
use super::patterns::{statement_definition_title, statement_reference_title};
use super::titles::Subject;
use super::tree::{NodeKind, Visit};

impl TraversalContext {
    /// Allocates a statement in the arena and returns its id.
    pub(crate) fn new_statement(&mut self, role: Role) -> StatementId {
        self.model.occurrences.push(Statement::with_role(role));
        self.model.occurrences.len() - 1
    }

    pub(crate) fn enter_statement(&mut self, visit: &Visit<'_>) {
        let role = match visit.parent.map(|parent| parent.kind) {
            Some(NodeKind::DocumentRoot) => Role::Thesis,
            _ => Role::None,
        };
        let id = self.new_statement(role);
        self.current_statement = Some(id);
        self.current_subject = Some(Subject::Statement(id));
        self.annotations
            .insert(visit.id, NodeData::Statement { statement: id });
    }

    pub(crate) fn exit_statement(&mut self, visit: &Visit<'_>) {
        let Some(id) = self.annotations.statement(visit.id) else {
            return;
        };
        let Some(statement) = self.model.occurrences.get_mut(id) else {
            return;
        };
        if statement.is_untitled() {
            statement.title = Some(self.titles.next_unique_title());
        }
        let title = statement.title.clone().unwrap_or_default();
        let is_thesis = statement.role == Role::Thesis;

        if let Some(ec) = self.model.resolve_equivalence_class(&title) {
            ec.members.push(id);
            if is_thesis {
                ec.is_used_as_thesis = true;
            }
        }
        self.current_statement = None;
    }

    /// `[Title]:` or `[Title]` at the start of a statement names it.
    pub(crate) fn enter_statement_title(&mut self, visit: &Visit<'_>) {
        let title = match visit.node.kind {
            NodeKind::StatementDefinition => statement_definition_title(&visit.node.image),
            _ => statement_reference_title(&visit.node.image),
        };
        let Some(title) = title else {
            debug!(image = %visit.node.image, "statement title did not match, leaving untitled");
            return;
        };
        let Some(id) = self.current_statement else {
            return;
        };
        if let Some(statement) = self.model.occurrences.get_mut(id) {
            statement.title = Some(title.to_string());
        }
        self.annotations
            .insert(visit.id, NodeData::Statement { statement: id });
    }
}

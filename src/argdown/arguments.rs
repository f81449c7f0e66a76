//! Argument builder
//!
//! Covers argument definitions and references, premise-conclusion
//! reconstructions and the inference blocks between their lines.
//!
//! A reconstruction block continues the argument named directly above it:
//!
//! ```text
//! <A>: description
//!
//! (1) premise
//! (2) premise
//! -- rule --
//! (3) conclusion
//! ```
//!
//! The block's preceding sibling is checked for an argument definition or
//! reference, looking past at most one blank line. Anything else starts a fresh
//! anonymous argument.

use tracing::{debug, warn};

use super::context::{NodeData, TraversalContext};
use super::model::{Argument, Inference, MetaValue, Role};
use super::patterns::{argument_definition_title, argument_reference_title};
use super::titles::Subject;
use super::tree::{NodeKind, Visit};

impl TraversalContext {
    /// Looks up `title`, registering a new argument if it is unknown, and opens a
    /// fresh description statement on it.
    pub(crate) fn resolve_or_create_argument(&mut self, title: &str) {
        if !self.model.arguments.contains_key(title) {
            debug!(title, "new argument");
            self.model
                .arguments
                .insert(title.to_string(), Argument::new(title));
        }
        let description = self.new_statement(Role::None);
        if let Some(argument) = self.model.arguments.get_mut(title) {
            argument.descriptions.push(description);
        }
        self.current_statement = Some(description);
        self.current_subject = Some(Subject::Argument(title.to_string()));
    }

    pub(crate) fn enter_argument_head(&mut self, visit: &Visit<'_>) {
        let image = visit.node.image.as_str();
        let title = match visit.node.kind {
            NodeKind::ArgumentDefinition => argument_definition_title(image),
            _ => argument_reference_title(image),
        };
        let Some(title) = title else {
            debug!(image, "argument title did not match");
            return;
        };
        self.resolve_or_create_argument(title);
        self.annotations.insert(
            visit.id,
            NodeData::Argument {
                title: title.to_string(),
            },
        );
    }

    /// Definitions and references scope their description to their own block.
    pub(crate) fn exit_argument_head(&mut self) {
        self.current_statement = None;
        self.current_subject = None;
    }

    pub(crate) fn enter_reconstruction(&mut self, visit: &Visit<'_>) {
        let title = match self.continued_argument(visit) {
            Some(title) => title,
            None => {
                let title = self.titles.next_unique_title();
                debug!(title = %title, "new anonymous argument");
                self.model
                    .arguments
                    .insert(title.clone(), Argument::new(title.as_str()));
                title
            }
        };
        self.current_reconstruction = Some(title.clone());
        self.annotations
            .insert(visit.id, NodeData::Argument { title });
    }

    pub(crate) fn exit_reconstruction(&mut self) {
        self.current_reconstruction = None;
    }

    /// Argument named by the preceding sibling, skipping one blank line.
    fn continued_argument(&self, visit: &Visit<'_>) -> Option<String> {
        let (mut id, mut sibling) = visit.preceding_sibling(1)?;
        if sibling.kind == NodeKind::EmptyLine {
            (id, sibling) = visit.preceding_sibling(2)?;
        }
        if !sibling.kind.is_argument_head() {
            return None;
        }
        self.annotations.argument(id).map(str::to_string)
    }

    pub(crate) fn exit_argument_statement(&mut self, visit: &Visit<'_>) {
        let Some(statement_id) = visit
            .child_nodes()
            .filter(|(_, node)| node.kind == NodeKind::Statement)
            .find_map(|(id, _)| self.annotations.statement(id))
        else {
            return;
        };
        let Some(reconstruction) = self.current_reconstruction.clone() else {
            warn!("premise or conclusion outside of a reconstruction");
            return;
        };

        let inference = visit
            .preceding_sibling(1)
            .filter(|(_, sibling)| sibling.kind == NodeKind::Inference)
            .and_then(|(id, _)| self.annotations.inference(id).cloned());

        let Some(statement) = self.model.occurrences.get_mut(statement_id) else {
            return;
        };
        match inference {
            Some(inference) => {
                statement.role = Role::Conclusion;
                statement.inference = Some(inference);
            }
            None => statement.role = Role::Premise,
        }
        let title = statement.title.clone().unwrap_or_default();

        if let Some(ec) = self.model.resolve_equivalence_class(&title) {
            ec.is_used_in_argument = true;
        }
        let Some(argument) = self.model.arguments.get_mut(&reconstruction) else {
            return;
        };
        argument.pcs.push(statement_id);
        let number = argument.pcs.len();
        self.annotations.insert(
            visit.id,
            NodeData::ArgumentStatement {
                statement: statement_id,
                number,
            },
        );
    }

    pub(crate) fn enter_inference(&mut self) {
        self.current_inference = Some(Inference::default());
    }

    pub(crate) fn exit_inference(&mut self, visit: &Visit<'_>) {
        if let Some(inference) = self.current_inference.take() {
            self.annotations
                .insert(visit.id, NodeData::Inference { inference });
        }
    }

    /// Each free text child is one rule label; labels are not validated.
    pub(crate) fn exit_inference_rules(&mut self, visit: &Visit<'_>) {
        let rules: Vec<String> = visit
            .child_nodes()
            .filter(|(_, node)| node.kind == NodeKind::FreestyleText)
            .map(|(id, node)| self.annotations.text_of(id, node).trim().to_string())
            .collect();
        if let Some(inference) = self.current_inference.as_mut() {
            inference.inference_rules.extend(rules);
        }
    }

    /// First child is the key; one further child is a scalar value, more are a
    /// list. A repeated key overwrites the earlier value.
    pub(crate) fn exit_metadata_statement(&mut self, visit: &Visit<'_>) {
        let mut texts = visit
            .child_nodes()
            .map(|(id, node)| self.annotations.text_of(id, node));
        let Some(key) = texts.next() else {
            return;
        };
        let mut values: Vec<String> = texts.collect();
        let value = if values.len() == 1 {
            MetaValue::Scalar(values.remove(0))
        } else {
            MetaValue::List(values)
        };
        match self.current_inference.as_mut() {
            Some(inference) => {
                inference.meta_data.insert(key, value);
            }
            None => debug!(key = %key, "metadata outside of an inference"),
        }
    }
}

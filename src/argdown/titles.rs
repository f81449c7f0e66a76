//! Title registry: anonymous titles and claim identity resolution
//!
//! Every statement ends up in exactly one equivalence class keyed by its title.
//! Statements without an explicit title receive a generated one, so identity
//! resolution never fails.

use tracing::debug;

use super::model::{ArgdownModel, EquivalenceClass, RelationNode, StatementId};

/// Hands out `"{prefix} {n}"` titles, `n` counting from 1 within one run.
#[derive(Debug, Clone)]
pub struct TitleRegistry {
    prefix: String,
    counter: usize,
}

impl TitleRegistry {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    pub fn next_unique_title(&mut self) -> String {
        self.counter += 1;
        format!("{} {}", self.prefix, self.counter)
    }

    /// Number of titles generated so far.
    pub fn issued(&self) -> usize {
        self.counter
    }

    /// Restart numbering for a new document.
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

impl Default for TitleRegistry {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// What a relations block can be about: the statement or argument currently open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Statement(StatementId),
    Argument(String),
}

impl ArgdownModel {
    /// Returns the equivalence class for `title`, creating it on first use.
    /// Empty titles have no class.
    pub fn resolve_equivalence_class(&mut self, title: &str) -> Option<&mut EquivalenceClass> {
        if title.is_empty() {
            return None;
        }
        if !self.statements.contains_key(title) {
            debug!(title, "new equivalence class");
        }
        Some(
            self.statements
                .entry(title.to_string())
                .or_insert_with(|| EquivalenceClass::new(title)),
        )
    }
}

/// Collapses a statement or argument into its relation graph node.
///
/// Arguments are their own node. A statement is first given a generated title if
/// it has none, then resolved to its equivalence class.
pub fn resolve_relation_target(
    model: &mut ArgdownModel,
    titles: &mut TitleRegistry,
    subject: &Subject,
) -> Option<RelationNode> {
    match subject {
        Subject::Argument(title) => Some(RelationNode::Argument(title.clone())),
        Subject::Statement(id) => {
            let statement = model.occurrences.get_mut(*id)?;
            if statement.is_untitled() {
                statement.title = Some(titles.next_unique_title());
            }
            let title = statement.title.clone()?;
            model.resolve_equivalence_class(&title)?;
            Some(RelationNode::EquivalenceClass(title))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argdown::model::Statement;

    #[test]
    fn test_titles_count_from_one() {
        let mut titles = TitleRegistry::default();
        assert_eq!(titles.next_unique_title(), "Untitled 1");
        assert_eq!(titles.next_unique_title(), "Untitled 2");
        assert_eq!(titles.issued(), 2);
        titles.reset();
        assert_eq!(titles.next_unique_title(), "Untitled 1");
    }

    #[test]
    fn test_custom_prefix() {
        let mut titles = TitleRegistry::new("Anonymous");
        assert_eq!(titles.next_unique_title(), "Anonymous 1");
    }

    #[test]
    fn test_equivalence_class_is_idempotent() {
        let mut model = ArgdownModel::new();
        model
            .resolve_equivalence_class("A")
            .expect("class")
            .members
            .push(0);
        model
            .resolve_equivalence_class("A")
            .expect("class")
            .members
            .push(1);
        assert_eq!(model.statements.len(), 1);
        assert_eq!(model.statements["A"].members, vec![0, 1]);
    }

    #[test]
    fn test_empty_title_has_no_class() {
        let mut model = ArgdownModel::new();
        assert!(model.resolve_equivalence_class("").is_none());
        assert!(model.statements.is_empty());
    }

    #[test]
    fn test_untitled_statement_gets_title_when_resolved() {
        let mut model = ArgdownModel::new();
        let mut titles = TitleRegistry::default();
        model.occurrences.push(Statement::new());

        let target = resolve_relation_target(&mut model, &mut titles, &Subject::Statement(0));
        assert_eq!(
            target,
            Some(RelationNode::EquivalenceClass("Untitled 1".to_string()))
        );
        assert_eq!(model.occurrences[0].title.as_deref(), Some("Untitled 1"));
        assert!(model.statements.contains_key("Untitled 1"));

        // Resolving again reuses the assigned title.
        resolve_relation_target(&mut model, &mut titles, &Subject::Statement(0));
        assert_eq!(titles.issued(), 1);
    }

    #[test]
    fn test_argument_is_its_own_target() {
        let mut model = ArgdownModel::new();
        let mut titles = TitleRegistry::default();
        let target = resolve_relation_target(
            &mut model,
            &mut titles,
            &Subject::Argument("A".to_string()),
        );
        assert_eq!(target, Some(RelationNode::Argument("A".to_string())));
        assert_eq!(titles.issued(), 0);
    }
}

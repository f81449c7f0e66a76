//! Traversal dispatcher
//!
//! [`Preprocessor`] is the [`TreeListener`] the parse tree is walked with. Every
//! `(node kind, phase)` pair is routed to exactly one handler on the
//! [`TraversalContext`]; pairs without semantics are listed explicitly as no-ops
//! so that adding a node kind forces a decision here.

use argdown_config::{ArgdownConfig, Loader};
use std::path::Path;
use tracing::{debug, trace};

use super::context::{Analysis, TraversalContext};
use super::error::Result;
use super::titles::TitleRegistry;
use super::tree::{walk, NodeKind, ParseNode, TreeListener, Visit};

/// Which callback of a visit is being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Enter,
    Exit,
}

/// Builds the document model from a parse tree in a single pass.
///
/// One preprocessor may process many documents one after another: each run
/// starts from an empty context with title numbering restarted.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    context: TraversalContext,
    log_summary: bool,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self::with_config(&ArgdownConfig::default())
    }

    pub fn with_config(config: &ArgdownConfig) -> Self {
        Self {
            context: TraversalContext::new(TitleRegistry::new(
                config.titles.untitled_prefix.as_str(),
            )),
            log_summary: config.relations.log_summary,
        }
    }

    /// Loads a TOML configuration file layered over the built-in defaults.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = Loader::new().with_file(path).build()?;
        Ok(Self::with_config(&config))
    }

    /// Walks `root` and returns the frozen model with per-node results.
    pub fn run(&mut self, root: &ParseNode) -> Analysis {
        self.context.reset();
        walk(root, self);
        self.context.take_analysis()
    }

    fn dispatch(&mut self, visit: &Visit<'_>, phase: Phase) {
        use NodeKind::*;

        trace!(id = visit.id, kind = ?visit.node.kind, ?phase, "visit");
        let context = &mut self.context;
        match (visit.node.kind, phase) {
            (DocumentRoot, Phase::Enter) => context.reset(),
            (DocumentRoot, Phase::Exit) => self.finish(),

            (Heading, Phase::Exit) => context.exit_heading(visit),

            (Statement, Phase::Enter) => context.enter_statement(visit),
            (Statement, Phase::Exit) => context.exit_statement(visit),
            (StatementDefinition | StatementReference, Phase::Enter) => {
                context.enter_statement_title(visit)
            }
            (StatementMention | ArgumentMention, Phase::Exit) => context.exit_mention(visit),

            (ArgumentDefinition | ArgumentReference, Phase::Enter) => {
                context.enter_argument_head(visit)
            }
            (ArgumentDefinition | ArgumentReference, Phase::Exit) => context.exit_argument_head(),
            (Argument, Phase::Enter) => context.enter_reconstruction(visit),
            (Argument, Phase::Exit) => context.exit_reconstruction(),
            (ArgumentStatement, Phase::Exit) => context.exit_argument_statement(visit),

            (Inference, Phase::Enter) => context.enter_inference(),
            (Inference, Phase::Exit) => context.exit_inference(visit),
            (InferenceRules, Phase::Exit) => context.exit_inference_rules(visit),
            (MetadataStatement, Phase::Exit) => context.exit_metadata_statement(visit),

            (Relations, Phase::Enter) => context.enter_relations(),
            (Relations, Phase::Exit) => context.exit_relations(),
            (
                IncomingSupport | IncomingAttack | OutgoingSupport | OutgoingAttack,
                Phase::Enter,
            ) => context.enter_relation(visit),
            (IncomingSupport | IncomingAttack | OutgoingSupport | OutgoingAttack, Phase::Exit) => {
                context.exit_relation(visit)
            }

            (FreestyleText, Phase::Enter) => context.enter_freestyle_text(visit),
            (Bold | Italic, Phase::Enter) => context.enter_formatting(visit),
            (Bold | Italic, Phase::Exit) => context.exit_formatting(visit),
            (Link, Phase::Enter) => context.enter_link(visit),

            (Heading, Phase::Enter)
            | (StatementDefinition | StatementReference, Phase::Exit)
            | (StatementMention | ArgumentMention, Phase::Enter)
            | (ArgumentStatement | InferenceRules | MetadataStatement, Phase::Enter)
            | (FreestyleText | Link, Phase::Exit)
            | (EmptyLine | Token, _) => {}
        }
    }

    fn finish(&self) {
        let model = self.context.model();
        debug!(
            statements = model.statements.len(),
            arguments = model.arguments.len(),
            relations = model.relations.len(),
            "document processed"
        );
        if self.log_summary {
            for line in model.relation_summary() {
                debug!("{}", line);
            }
        }
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeListener for Preprocessor {
    fn enter(&mut self, visit: &Visit<'_>) {
        self.dispatch(visit, Phase::Enter);
    }

    fn exit(&mut self, visit: &Visit<'_>) {
        self.dispatch(visit, Phase::Exit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argdown::model::ArgdownModel;
    use crate::argdown::testing::*;

    #[test]
    fn test_each_run_starts_fresh() {
        let tree = document(vec![statement(vec![text("untitled")])]);
        let mut preprocessor = Preprocessor::new();

        let first = preprocessor.run(&tree);
        let second = preprocessor.run(&tree);

        assert_eq!(first.model, second.model);
        assert!(second.model.statements.contains_key("Untitled 1"));
        assert_eq!(second.model.statements.len(), 1);
    }

    #[test]
    fn test_configured_title_prefix() {
        let config = Loader::new()
            .set_override("titles.untitled_prefix", "Anonymous")
            .expect("override")
            .build()
            .expect("config");
        let tree = document(vec![statement(vec![text("x")])]);

        let analysis = Preprocessor::with_config(&config).run(&tree);
        assert!(analysis.model.statements.contains_key("Anonymous 1"));
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let result = Preprocessor::from_config_file("/nonexistent/argdown.toml");
        assert!(matches!(result, Err(crate::argdown::Error::Config(_))));
    }

    #[test]
    fn test_tokens_and_empty_lines_are_ignored() {
        let tree = document(vec![token("noise"), empty_line()]);
        let analysis = Preprocessor::new().run(&tree);
        assert_eq!(analysis.model, ArgdownModel::new());
        assert!(analysis.annotations.is_empty());
    }
}

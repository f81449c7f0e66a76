//! Inline prose handlers
//!
//! Free text, formatting, links and mentions all append to the statement that is
//! currently open; formatting and cross references are additionally recorded as
//! ranges over the appended text. Headings only derive descriptive data.

use tracing::debug;

use super::context::{NodeData, TraversalContext};
use super::model::RangeKind;
use super::patterns::{self, MentionParts};
use super::ranges::{append_link, append_mention, append_text};
use super::tree::{NodeKind, ParseNode, Visit};

/// Derived text of a `freestyleText` node: its children's raw images, or its
/// own image when it has no children.
pub fn freestyle_text(node: &ParseNode) -> String {
    if node.children.is_empty() {
        node.image.clone()
    } else {
        node.children
            .iter()
            .map(|child| child.image.as_str())
            .collect()
    }
}

impl TraversalContext {
    pub(crate) fn enter_freestyle_text(&mut self, visit: &Visit<'_>) {
        let text = freestyle_text(visit.node);
        if let Some(statement) = self
            .current_statement
            .and_then(|id| self.model.occurrences.get_mut(id))
        {
            append_text(statement, &text);
        }
        self.annotations.insert(visit.id, NodeData::Text { text });
    }

    pub(crate) fn enter_formatting(&mut self, visit: &Visit<'_>) {
        let kind = match visit.node.kind {
            NodeKind::Bold => RangeKind::Bold,
            _ => RangeKind::Italic,
        };
        self.ranges
            .open(&mut self.model.occurrences, self.current_statement, kind);
    }

    /// The closing delimiter is the last child; its image carries any trailing
    /// whitespace.
    pub(crate) fn exit_formatting(&mut self, visit: &Visit<'_>) {
        let closing = visit
            .node
            .children
            .last()
            .map(|child| child.image.as_str())
            .unwrap_or_default();
        let trailing_whitespace = self.ranges.close(&mut self.model.occurrences, closing);
        self.annotations
            .insert(visit.id, NodeData::Formatting { trailing_whitespace });
    }

    pub(crate) fn enter_link(&mut self, visit: &Visit<'_>) {
        let Some(link) = patterns::link(&visit.node.image) else {
            debug!(image = %visit.node.image, "link did not match");
            return;
        };
        let trailing_whitespace = match self
            .current_statement
            .and_then(|id| self.model.occurrences.get_mut(id))
        {
            Some(statement) => append_link(statement, &link, &visit.node.image),
            None => patterns::ends_with_whitespace(&visit.node.image),
        };
        self.annotations.insert(
            visit.id,
            NodeData::Link {
                text: link.text.to_string(),
                url: link.url.to_string(),
                trailing_whitespace,
            },
        );
    }

    pub(crate) fn exit_mention(&mut self, visit: &Visit<'_>) {
        let image = visit.node.image.as_str();
        let parts = match visit.node.kind {
            NodeKind::StatementMention => patterns::statement_mention(image),
            _ => patterns::argument_mention(image),
        };
        let Some(MentionParts {
            title,
            trailing_whitespace,
        }) = parts
        else {
            debug!(image, "mention did not match");
            return;
        };

        if let Some(statement) = self
            .current_statement
            .and_then(|id| self.model.occurrences.get_mut(id))
        {
            let kind = match visit.node.kind {
                NodeKind::StatementMention => RangeKind::StatementMention {
                    title: title.to_string(),
                },
                _ => RangeKind::ArgumentMention {
                    title: title.to_string(),
                },
            };
            append_mention(statement, kind, image);
        }
        self.annotations.insert(
            visit.id,
            NodeData::Mention {
                title: title.to_string(),
                trailing_whitespace,
            },
        );
    }

    /// Level is the length of the raw leading marker (`##` is level 2), text is
    /// the derived text of the second child.
    pub(crate) fn exit_heading(&mut self, visit: &Visit<'_>) {
        let level = visit
            .node
            .children
            .first()
            .map(|marker| marker.image.chars().count())
            .unwrap_or_default();
        let text = visit
            .child(1)
            .map(|(id, node)| self.annotations.text_of(id, node))
            .unwrap_or_default();
        self.annotations
            .insert(visit.id, NodeData::Heading { level, text });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argdown::analyze;
    use crate::argdown::context::NodeData;
    use crate::argdown::model::{Range, RangeKind};
    use crate::argdown::testing::*;
    use rstest::rstest;

    #[test]
    fn test_freestyle_text_concatenates_children() {
        let node = freestyle(vec![token("a"), token(" "), token("b")]);
        assert_eq!(freestyle_text(&node), "a b");
        assert_eq!(freestyle_text(&text("own")), "own");
    }

    #[test]
    fn test_link_inside_statement() {
        let tree = document(vec![statement(vec![
            text("Go: "),
            link("[See here](http://x.io) "),
            text("now"),
        ])]);
        let model = analyze(&tree).model;
        let statement = &model.occurrences[0];

        assert_eq!(statement.text, "Go: See here now");
        assert_eq!(
            statement.ranges,
            vec![Range::new(
                RangeKind::Link {
                    url: "http://x.io".to_string()
                },
                4,
                11
            )]
        );
    }

    #[test]
    fn test_bold_and_italic_nest() {
        let tree = document(vec![statement(vec![
            text("x "),
            bold(vec![text("strong "), italic(vec![text("both")], "_ ")], "**"),
        ])]);
        let model = analyze(&tree).model;
        let statement = &model.occurrences[0];

        assert_eq!(statement.text, "x strong both ");
        assert_eq!(statement.ranges[0], Range::new(RangeKind::Bold, 2, 13));
        assert_eq!(statement.ranges[1], Range::new(RangeKind::Italic, 9, 12));
    }

    #[test]
    fn test_argument_mention_range() {
        let tree = document(vec![statement(vec![
            text("See "),
            argument_mention("@<Arg>"),
        ])]);
        let model = analyze(&tree).model;
        let statement = &model.occurrences[0];

        assert_eq!(statement.text, "See @<Arg>");
        assert_eq!(
            statement.ranges,
            vec![Range::new(
                RangeKind::ArgumentMention {
                    title: "Arg".to_string()
                },
                4,
                9
            )]
        );
    }

    #[rstest]
    #[case("#", 1)]
    #[case("##", 2)]
    #[case("## ", 3)]
    fn test_heading_level_and_text(#[case] marker: &str, #[case] level: usize) {
        let tree = document(vec![heading(marker, "Section title")]);
        let analysis = analyze(&tree);

        let heading = analysis
            .annotations
            .iter()
            .find_map(|(_, data)| match data {
                NodeData::Heading { level, text } => Some((*level, text.clone())),
                _ => None,
            });
        assert_eq!(heading, Some((level, "Section title".to_string())));
        assert!(analysis.model.statements.is_empty());
    }

    #[test]
    fn test_formatting_outside_statement_is_ignored() {
        let tree = document(vec![heading("#", "Title"), bold(vec![text("x")], "**")]);
        let analysis = analyze(&tree);
        assert!(analysis.model.occurrences.is_empty());
    }
}

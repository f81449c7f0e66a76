//! Inline range tracking over a statement's flattened text
//!
//! Bold and italic spans nest, so they are tracked on a stack: opening pushes a
//! range starting at the current end of the text, closing pops it and fixes its
//! inclusive `stop`. Links and mentions never nest and are recorded in one step.
//!
//! Offsets are byte offsets into [`Statement::text`]. A closed range always
//! satisfies `start <= stop < text.len()`; a formatting span that encloses no
//! text is dropped on close since no inclusive span can describe it.

use tracing::trace;

use super::model::{Range, RangeKind, Statement, StatementId};
use super::patterns::{ends_with_whitespace, LinkParts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenRange {
    statement: StatementId,
    /// Position of the range in the statement's `ranges`.
    index: usize,
}

/// Nesting stack of open bold/italic ranges.
#[derive(Debug, Clone, Default)]
pub struct RangeTracker {
    stack: Vec<Option<OpenRange>>,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ranges currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Opens a range at the end of `current`'s text and records it right away.
    ///
    /// Without an open statement a placeholder is pushed, so the matching
    /// [`close`](Self::close) stays balanced.
    pub fn open(
        &mut self,
        statements: &mut [Statement],
        current: Option<StatementId>,
        kind: RangeKind,
    ) {
        let open = current.and_then(|id| {
            let statement = statements.get_mut(id)?;
            let start = statement.text.len();
            statement.ranges.push(Range::new(kind, start, start));
            Some(OpenRange {
                statement: id,
                index: statement.ranges.len() - 1,
            })
        });
        trace!(depth = self.stack.len(), "open range");
        self.stack.push(open);
    }

    /// Closes the innermost open range. Returns whether `trailing_raw` ends in
    /// whitespace, in which case one space has been appended after the range.
    pub fn close(&mut self, statements: &mut [Statement], trailing_raw: &str) -> bool {
        let trailing = ends_with_whitespace(trailing_raw);
        let Some(Some(open)) = self.stack.pop() else {
            return trailing;
        };
        let Some(statement) = statements.get_mut(open.statement) else {
            return trailing;
        };

        let end = statement.text.len();
        let start = statement.ranges.get(open.index).map(|range| range.start);
        match start {
            Some(start) if end > start => statement.ranges[open.index].stop = end - 1,
            Some(_) => {
                statement.ranges.remove(open.index);
            }
            None => {}
        }

        if trailing {
            statement.text.push(' ');
        }
        trace!(depth = self.stack.len(), "close range");
        trailing
    }
}

/// Appends plain prose verbatim.
pub fn append_text(statement: &mut Statement, text: &str) {
    statement.text.push_str(text);
}

/// Appends a link's visible text and records a `link` range over it, followed by
/// one space if the raw markup ended in whitespace.
pub fn append_link(statement: &mut Statement, link: &LinkParts<'_>, raw: &str) -> bool {
    let start = statement.text.len();
    statement.text.push_str(link.text);
    if statement.text.len() > start {
        statement.ranges.push(Range::new(
            RangeKind::Link {
                url: link.url.to_string(),
            },
            start,
            statement.text.len() - 1,
        ));
    }
    let trailing = ends_with_whitespace(raw);
    if trailing {
        statement.text.push(' ');
    }
    trailing
}

/// Appends a mention's raw image verbatim and records a range spanning exactly
/// the appended text.
pub fn append_mention(statement: &mut Statement, kind: RangeKind, image: &str) {
    if image.is_empty() {
        return;
    }
    let start = statement.text.len();
    statement.text.push_str(image);
    statement
        .ranges
        .push(Range::new(kind, start, statement.text.len() - 1));
}

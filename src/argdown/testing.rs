//! Tree factories for tests
//!
//! The grammar lives outside this crate, so tests build parse trees by hand.
//! These helpers produce nodes in exactly the shape the grammar emits (see the
//! [`tree`](super::tree) module docs), which keeps the individual tests short and
//! keeps that shape defined in one place.
//!
//! ```rust,ignore
//! // <A>: desc
//! //
//! // (1) p
//! // -- inf --
//! // (2) q
//! let tree = document(vec![
//!     argument_definition("<A>:", vec![text(" desc")]),
//!     empty_line(),
//!     reconstruction(vec![
//!         premise(1, "p"),
//!         inference(vec!["inf"], vec![]),
//!         premise(2, "q"),
//!     ]),
//! ]);
//! ```

use super::tree::{NodeKind, ParseNode};

pub fn document(children: Vec<ParseNode>) -> ParseNode {
    ParseNode::rule(NodeKind::DocumentRoot, children)
}

pub fn statement(children: Vec<ParseNode>) -> ParseNode {
    ParseNode::rule(NodeKind::Statement, children)
}

/// `[Title]:` token opening a statement.
pub fn statement_definition(image: &str) -> ParseNode {
    ParseNode::leaf(NodeKind::StatementDefinition, image)
}

/// `[Title]` token opening a statement.
pub fn statement_reference(image: &str) -> ParseNode {
    ParseNode::leaf(NodeKind::StatementReference, image)
}

pub fn statement_mention(image: &str) -> ParseNode {
    ParseNode::leaf(NodeKind::StatementMention, image)
}

pub fn argument_mention(image: &str) -> ParseNode {
    ParseNode::leaf(NodeKind::ArgumentMention, image)
}

/// Free text given as one piece.
pub fn text(image: &str) -> ParseNode {
    ParseNode::leaf(NodeKind::FreestyleText, image)
}

/// Free text made of several raw tokens.
pub fn freestyle(children: Vec<ParseNode>) -> ParseNode {
    ParseNode::rule(NodeKind::FreestyleText, children)
}

pub fn token(image: &str) -> ParseNode {
    ParseNode::leaf(NodeKind::Token, image)
}

pub fn empty_line() -> ParseNode {
    ParseNode::leaf(NodeKind::EmptyLine, "\n\n")
}

fn delimited(kind: NodeKind, open: &str, children: Vec<ParseNode>, close: &str) -> ParseNode {
    let mut all = Vec::with_capacity(children.len() + 2);
    all.push(token(open));
    all.extend(children);
    all.push(token(close));
    ParseNode::rule(kind, all)
}

/// `**...**`; `close` is the closing delimiter including any trailing whitespace.
pub fn bold(children: Vec<ParseNode>, close: &str) -> ParseNode {
    delimited(NodeKind::Bold, "**", children, close)
}

/// `_..._`; `close` is the closing delimiter including any trailing whitespace.
pub fn italic(children: Vec<ParseNode>, close: &str) -> ParseNode {
    delimited(NodeKind::Italic, "_", children, close)
}

/// `[text](url)`, optionally followed by whitespace.
pub fn link(image: &str) -> ParseNode {
    ParseNode::leaf(NodeKind::Link, image)
}

pub fn heading(marker: &str, title: &str) -> ParseNode {
    ParseNode::rule(NodeKind::Heading, vec![token(marker), text(title)])
}

/// `<Title>:` followed by description prose.
pub fn argument_definition(head: &str, children: Vec<ParseNode>) -> ParseNode {
    ParseNode::new(NodeKind::ArgumentDefinition, head, children)
}

/// `<Title>`, possibly followed by relations.
pub fn argument_reference(head: &str, children: Vec<ParseNode>) -> ParseNode {
    ParseNode::new(NodeKind::ArgumentReference, head, children)
}

/// Premise-conclusion block.
pub fn reconstruction(children: Vec<ParseNode>) -> ParseNode {
    ParseNode::rule(NodeKind::Argument, children)
}

/// `(n)` line holding an arbitrary statement node.
pub fn argument_statement(number: usize, statement: ParseNode) -> ParseNode {
    ParseNode::rule(
        NodeKind::ArgumentStatement,
        vec![token(&format!("({})", number)), statement],
    )
}

/// `(n) text` line; becomes a conclusion if it follows an inference.
pub fn premise(number: usize, content: &str) -> ParseNode {
    argument_statement(number, statement(vec![text(content)]))
}

/// `-- rule, rule {key: value} --`
pub fn inference(rules: Vec<&str>, metadata: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![token("--")];
    if !rules.is_empty() {
        children.push(ParseNode::rule(
            NodeKind::InferenceRules,
            rules.into_iter().map(text).collect(),
        ));
    }
    children.extend(metadata);
    children.push(token("--"));
    ParseNode::rule(NodeKind::Inference, children)
}

/// Key followed by its values.
pub fn metadata(parts: &[&str]) -> ParseNode {
    ParseNode::rule(
        NodeKind::MetadataStatement,
        parts.iter().copied().map(text).collect(),
    )
}

pub fn relations(children: Vec<ParseNode>) -> ParseNode {
    ParseNode::rule(NodeKind::Relations, children)
}

fn relation(kind: NodeKind, arrow: &str, content: ParseNode) -> ParseNode {
    ParseNode::rule(kind, vec![token(arrow), content])
}

pub fn incoming_support(content: ParseNode) -> ParseNode {
    relation(NodeKind::IncomingSupport, "<+", content)
}

pub fn incoming_attack(content: ParseNode) -> ParseNode {
    relation(NodeKind::IncomingAttack, "<-", content)
}

pub fn outgoing_support(content: ParseNode) -> ParseNode {
    relation(NodeKind::OutgoingSupport, "+>", content)
}

pub fn outgoing_attack(content: ParseNode) -> ParseNode {
    relation(NodeKind::OutgoingAttack, "->", content)
}

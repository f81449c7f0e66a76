//! Literal extraction patterns
//!
//! The grammar has already delimited every construct; these functions re-derive
//! the substructure (titles, link text and url) from a token's raw image. They
//! mirror the grammar's own sub-lexing, so a failed match simply yields `None`
//! and the caller falls back to a generated title or a no-op.

use once_cell::sync::Lazy;
use regex::Regex;

static STATEMENT_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.+)\]").unwrap());
static STATEMENT_DEFINITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.+)\]:").unwrap());
static STATEMENT_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\[(.+)\](\s?)").unwrap());
static ARGUMENT_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(.+)>").unwrap());
static ARGUMENT_DEFINITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(.+)>:").unwrap());
static ARGUMENT_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@<(.+)>(\s?)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.+)\]\((.+)\)").unwrap());

/// Title and trailing whitespace of an inline `@[Title]` / `@<Title>` mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionParts<'a> {
    pub title: &'a str,
    pub trailing_whitespace: bool,
}

/// Visible text and target of a `[text](url)` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkParts<'a> {
    pub text: &'a str,
    pub url: &'a str,
}

fn first_group<'a>(pattern: &Regex, image: &'a str) -> Option<&'a str> {
    pattern
        .captures(image)
        .and_then(|captures| captures.get(1))
        .map(|title| title.as_str())
}

fn mention<'a>(pattern: &Regex, image: &'a str) -> Option<MentionParts<'a>> {
    let captures = pattern.captures(image)?;
    Some(MentionParts {
        title: captures.get(1)?.as_str(),
        trailing_whitespace: ends_with_whitespace(image),
    })
}

/// `[Title]`
pub fn statement_reference_title(image: &str) -> Option<&str> {
    first_group(&STATEMENT_REFERENCE, image)
}

/// `[Title]:`
pub fn statement_definition_title(image: &str) -> Option<&str> {
    first_group(&STATEMENT_DEFINITION, image)
}

/// `@[Title]`, optionally followed by one whitespace character.
pub fn statement_mention(image: &str) -> Option<MentionParts<'_>> {
    mention(&STATEMENT_MENTION, image)
}

/// `<Title>`
pub fn argument_reference_title(image: &str) -> Option<&str> {
    first_group(&ARGUMENT_REFERENCE, image)
}

/// `<Title>:`
pub fn argument_definition_title(image: &str) -> Option<&str> {
    first_group(&ARGUMENT_DEFINITION, image)
}

/// `@<Title>`, optionally followed by one whitespace character.
pub fn argument_mention(image: &str) -> Option<MentionParts<'_>> {
    mention(&ARGUMENT_MENTION, image)
}

/// `[text](url)`
pub fn link(image: &str) -> Option<LinkParts<'_>> {
    let captures = LINK.captures(image)?;
    Some(LinkParts {
        text: captures.get(1)?.as_str(),
        url: captures.get(2)?.as_str(),
    })
}

/// Whether a raw token image ends in whitespace.
pub fn ends_with_whitespace(raw: &str) -> bool {
    raw.chars().next_back().is_some_and(char::is_whitespace)
}

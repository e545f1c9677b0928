//! Front-matter metadata block

use crate::error::{Error, Result};
use serde_yaml::{Mapping, Value};
use std::ops::Range;

/// Line that opens and closes the front-matter block
pub const DELIMITER: &str = "---";

/// Front-matter keys used by the proposal template
pub mod keys {
    /// Identifier assigned by the registry
    pub const PROPOSAL_ID: &str = "Proposal ID";
    /// Title
    pub const TITLE: &str = "Proposal Title";
    /// One-line tagline
    pub const TAGLINE: &str = "Tagline";
    /// Requested funding amount
    pub const FUNDING_AMOUNT: &str = "Requested Funding Amount";
    /// Skills needed
    pub const SKILLS: &str = "Skills";
    /// Yes/No sponsor question
    pub const SPONSOR: &str = "Is your organization willing to sponsor this project?";
    /// Yes/No existing project question
    pub const EXISTING_PROJECT: &str = "Is this an existing OSS project?";
    /// Author handle
    pub const AUTHOR: &str = "Author";
}

/// Parsed front-matter key/value pairs, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Mapping,
}

impl Metadata {
    /// Value of `key` rendered as text
    ///
    /// Numbers and booleans are rendered the way YAML wrote them, lists are
    /// joined with `", "`. Empty values count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .and_then(render_value)
            .filter(|s| !s.is_empty())
    }

    /// Value of `key` as a list
    ///
    /// Accepts a YAML sequence or a comma separated string.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.entries.get(key) {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(render_value)
                .filter(|s| !s.is_empty())
                .collect(),
            Some(value) => render_value(value)
                .map(|s| {
                    s.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(ToString::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// All entries with their values rendered as text
    pub fn iter(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.entries.iter().filter_map(|(key, value)| {
            let key = render_value(key)?;
            Some((key, render_value(value).unwrap_or_default()))
        })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block had no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Sequence(items) => Some(
            items
                .iter()
                .filter_map(render_value)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Tagged(tagged) => render_value(&tagged.value),
        Value::Null | Value::Mapping(_) => None,
    }
}

/// Byte range of the YAML between the opening and closing delimiters
///
/// The opening delimiter must be the first non-blank line.
fn front_matter_span(text: &str) -> Option<Range<usize>> {
    let mut offset = 0;
    let mut body_start = None;
    for line in text.split_inclusive('\n') {
        let content = line.trim_end().trim_start_matches('\u{feff}');
        match body_start {
            None if content == DELIMITER => body_start = Some(offset + line.len()),
            None if !content.trim().is_empty() => return None,
            None => {}
            Some(start) if content == DELIMITER => return Some(start..offset),
            Some(_) => {}
        }
        offset += line.len();
    }
    None
}

/// Parse the delimiter-bounded front-matter block
pub fn parse_metadata(text: &str) -> Result<Metadata> {
    let span = front_matter_span(text).ok_or_else(|| {
        Error::MalformedMetadata("no delimiter-bounded front matter block".to_string())
    })?;

    let value: Value = serde_yaml::from_str(&text[span])
        .map_err(|e| Error::MalformedMetadata(e.to_string()))?;

    match value {
        Value::Mapping(entries) => Ok(Metadata { entries }),
        Value::Null => Ok(Metadata::default()),
        _ => Err(Error::MalformedMetadata(
            "front matter is not a key/value block".to_string(),
        )),
    }
}

fn is_proposal_id_line(line: &str) -> bool {
    line.trim_start()
        .strip_prefix(keys::PROPOSAL_ID)
        .is_some_and(|rest| rest.trim_start().starts_with(':'))
}

/// Return `text` with `Proposal ID: <id>` as the second line of its front matter
///
/// An existing identifier line is replaced. A document without a front-matter
/// block gets a new one.
pub fn insert_proposal_id(text: &str, proposal_id: &str) -> String {
    let id_line = format!("{}: {proposal_id}\n", keys::PROPOSAL_ID);

    let Some(span) = front_matter_span(text) else {
        return format!("{DELIMITER}\n{id_line}{DELIMITER}\n{text}");
    };

    let mut out = String::with_capacity(text.len() + id_line.len());
    out.push_str(&text[..span.start]);
    out.push_str(&id_line);
    for line in text[span.clone()].split_inclusive('\n') {
        if !is_proposal_id_line(line) {
            out.push_str(line);
        }
    }
    out.push_str(&text[span.end..]);
    out
}

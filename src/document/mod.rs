//! Proposal document parsing
//!
//! A proposal is a markdown file with a YAML front-matter block followed by
//! four fixed `##` sections. Parsing never fails: a broken front-matter block
//! yields empty metadata and missing sections yield empty text, so the
//! checklist rules report the problem instead.

mod metadata;
mod sections;

pub use metadata::{DELIMITER, Metadata, insert_proposal_id, keys, parse_metadata};
pub use sections::{SECTION_HEADERS, Sections, Stages, parse_sections, parse_stages};

use crate::types::ModeratedField;
use tracing::warn;

/// Number of whitespace-separated words in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Local handle for an author reference
///
/// Accepts `@handle`, profile URLs and e-mail addresses.
pub fn author_handle(author: &str) -> String {
    let author = author.trim().trim_start_matches('@');
    let author = author
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(author);
    author.split('@').next().unwrap_or(author).to_string()
}

/// A proposal document read for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProposalDocument {
    /// Raw document text
    pub text: String,
    /// Front-matter metadata
    pub metadata: Metadata,
    /// Prose sections
    pub sections: Sections,
}

impl ProposalDocument {
    /// Parse a document, recovering from a malformed front-matter block
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let metadata = parse_metadata(&text).unwrap_or_else(|e| {
            warn!(error = %e, "treating proposal metadata as empty");
            Metadata::default()
        });
        let sections = parse_sections(&text);
        Self {
            text,
            metadata,
            sections,
        }
    }

    /// Typed view of the fields the checklist looks at
    pub fn fields(&self) -> ProposalFields {
        let meta = &self.metadata;
        ProposalFields {
            proposal_id: meta.text(keys::PROPOSAL_ID),
            title: meta.text(keys::TITLE),
            tagline: meta.text(keys::TAGLINE),
            funding_amount: meta.text(keys::FUNDING_AMOUNT),
            skills: meta.list(keys::SKILLS),
            sponsor_answer: meta.text(keys::SPONSOR),
            existing_project_answer: meta.text(keys::EXISTING_PROJECT),
            author: meta.text(keys::AUTHOR),
            description: self.sections.description.clone(),
            details: self.sections.details.clone(),
            stages: self.sections.stages.clone(),
            supporting_info: self.sections.supporting_info.clone(),
        }
    }
}

/// Fields of a proposal, as the engine consumes them
///
/// Metadata values are `None` when missing or blank; section texts are empty
/// strings instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalFields {
    /// Identifier assigned by the registry, absent for new proposals
    pub proposal_id: Option<String>,
    /// Title
    pub title: Option<String>,
    /// Tagline
    pub tagline: Option<String>,
    /// Requested funding amount, as written
    pub funding_amount: Option<String>,
    /// Skills needed
    pub skills: Vec<String>,
    /// Answer to the sponsor question
    pub sponsor_answer: Option<String>,
    /// Answer to the existing project question
    pub existing_project_answer: Option<String>,
    /// Author reference
    pub author: Option<String>,
    /// Project description
    pub description: String,
    /// Project details & specifications
    pub details: String,
    /// Project stages
    pub stages: Stages,
    /// Supporting information
    pub supporting_info: String,
}

impl ProposalFields {
    /// Current text of a moderated field, `None` when absent or blank
    pub fn text_of(&self, field: &ModeratedField) -> Option<&str> {
        let text: &str = match field {
            ModeratedField::Title => self.title.as_deref()?,
            ModeratedField::Tagline => self.tagline.as_deref()?,
            ModeratedField::Description => &self.description,
            ModeratedField::Details => &self.details,
            ModeratedField::Phase(label) => self.stages.get(label)?,
            ModeratedField::SupportingInfo => &self.supporting_info,
        };
        let text = text.trim();
        (!text.is_empty()).then_some(text)
    }

    /// Every moderated field of this proposal, in document order
    pub fn moderated_fields(&self) -> Vec<ModeratedField> {
        let mut fields = vec![
            ModeratedField::Title,
            ModeratedField::Tagline,
            ModeratedField::Description,
            ModeratedField::Details,
        ];
        fields.extend(self.stages.labels().map(ModeratedField::phase));
        fields.push(ModeratedField::SupportingInfo);
        fields
    }

    /// Author handle with prefixes and domains stripped
    pub fn author_handle(&self) -> Option<String> {
        self.author
            .as_deref()
            .map(author_handle)
            .filter(|h| !h.is_empty())
    }
}

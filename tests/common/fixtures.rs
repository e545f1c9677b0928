//! Proposal document fixtures

#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::Path;

/// `n` space-separated words
pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

/// Builder for proposal documents
///
/// Defaults to the complete, well-formed "Add Widget" proposal.
#[derive(Debug, Clone)]
pub struct ProposalBuilder {
    pub proposal_id: Option<String>,
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub funding: Option<String>,
    pub author: Option<String>,
    pub description: String,
    pub details: String,
    pub phases: Vec<(String, String)>,
    pub supporting_info: Option<String>,
}

impl ProposalBuilder {
    pub fn add_widget() -> Self {
        Self {
            proposal_id: None,
            title: Some("Add Widget".to_string()),
            tagline: Some("Widgets for everyone".to_string()),
            funding: Some("5000".to_string()),
            author: Some("@alice".to_string()),
            description: format!("Widget description {}", words(60)),
            details: format!("Widget details {}", words(60)),
            phases: vec![
                ("Phase 1".to_string(), format!("Design {}", words(25))),
                ("Phase 2".to_string(), format!("Build {}", words(25))),
            ],
            supporting_info: Some("See the forum thread.".to_string()),
        }
    }

    pub fn proposal_id(mut self, id: &str) -> Self {
        self.proposal_id = Some(id.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn without_tagline(mut self) -> Self {
        self.tagline = None;
        self
    }

    pub fn without_supporting_info(mut self) -> Self {
        self.supporting_info = None;
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    pub fn phase(mut self, label: &str, text: &str) -> Self {
        match self.phases.iter_mut().find(|(l, _)| l == label) {
            Some(phase) => phase.1 = text.to_string(),
            None => self.phases.push((label.to_string(), text.to_string())),
        }
        self
    }

    pub fn build(&self) -> String {
        let mut doc = String::from("---\n");
        if let Some(id) = &self.proposal_id {
            writeln!(doc, "Proposal ID: {id}").unwrap();
        }
        if let Some(title) = &self.title {
            writeln!(doc, "Proposal Title: {title}").unwrap();
        }
        if let Some(tagline) = &self.tagline {
            writeln!(doc, "Tagline: {tagline}").unwrap();
        }
        if let Some(funding) = &self.funding {
            writeln!(doc, "Requested Funding Amount: {funding}").unwrap();
        }
        doc.push_str("Skills:\n  - Rust\n");
        doc.push_str("Is your organization willing to sponsor this project?: Yes\n");
        doc.push_str("Is this an existing OSS project?: No\n");
        if let Some(author) = &self.author {
            writeln!(doc, "Author: '{author}'").unwrap();
        }
        doc.push_str("---\n\n");

        writeln!(
            doc,
            "## Project Description\n<!-- At least 50 words -->\n{}\n",
            self.description
        )
        .unwrap();
        writeln!(doc, "## Project Details & Specifications\n{}\n", self.details).unwrap();
        doc.push_str("## Project Stages\n");
        for (label, text) in &self.phases {
            writeln!(doc, "### {label}\n{text}\n").unwrap();
        }
        if let Some(info) = &self.supporting_info {
            writeln!(doc, "## Supporting Information\n{info}").unwrap();
        }
        doc
    }

    /// Write the document to `<root>/proposals/<name>`
    pub fn write_to(&self, root: &Path, name: &str) {
        let dir = root.join("proposals");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(name), self.build()).unwrap();
    }
}

//! Section extraction from the markdown body

use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Section headers, in the order they must appear
pub const SECTION_HEADERS: [&str; 4] = [
    "Project Description",
    "Project Details & Specifications",
    "Project Stages",
    "Supporting Information",
];

/// HTML comments, possibly spanning lines
static RE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// `## <header>` lines for the four fixed sections
static RE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^##[ \t]+(Project Description|Project Details & Specifications|Project Stages|Supporting Information)[ \t]*\r?$",
    )
    .unwrap()
});

/// `### Phase N` sub-headers inside the stages section
static RE_PHASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^###[ \t]+(Phase[ \t]+\d+)[ \t]*\r?$").unwrap());

/// Ordered phase label → phase text mapping
///
/// Keeps document order. Inserting a label that already exists replaces its
/// text in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stages {
    phases: Vec<(String, String)>,
}

impl Stages {
    /// Empty mapping
    pub const fn new() -> Self {
        Self { phases: Vec::new() }
    }

    /// Insert or replace a phase
    pub fn insert(&mut self, label: impl Into<String>, text: impl Into<String>) {
        let label = label.into();
        let text = text.into();
        if let Some(existing) = self.phases.iter_mut().find(|(l, _)| *l == label) {
            existing.1 = text;
        } else {
            self.phases.push((label, text));
        }
    }

    /// Text of the phase with `label`
    pub fn get(&self, label: &str) -> Option<&str> {
        self.phases
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, text)| text.as_str())
    }

    /// Whether a phase with `label` exists
    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Phases in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.phases.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }

    /// Phase labels in document order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.phases.iter().map(|(l, _)| l.as_str())
    }

    /// Number of phases
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Whether there are no phases
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for Stages {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let mut stages = Self::new();
        for (label, text) in iter {
            stages.insert(label, text);
        }
        stages
    }
}

impl Serialize for Stages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.phases.len()))?;
        for (label, text) in &self.phases {
            map.serialize_entry(label, text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Stages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StagesVisitor;

        impl<'de> Visitor<'de> for StagesVisitor {
            type Value = Stages;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of phase label to phase text")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Stages, E> {
                Ok(Stages::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Stages, A::Error> {
                let mut stages = Stages::new();
                while let Some((label, text)) = access.next_entry::<String, String>()? {
                    stages.insert(label.trim(), text);
                }
                Ok(stages)
            }
        }

        deserializer.deserialize_any(StagesVisitor)
    }
}

/// Prose sections of a proposal
///
/// Every field is empty rather than missing when its header is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    /// Project description
    pub description: String,
    /// Project details & specifications
    pub details: String,
    /// Phases of the project stages section
    pub stages: Stages,
    /// Supporting information
    pub supporting_info: String,
}

/// Extract the four fixed sections from a document
///
/// Headers are matched in their fixed order: a header that appears before
/// one it should follow is treated as body text. Each section ends where the
/// next matched header starts, the last one at end of document.
pub fn parse_sections(content: &str) -> Sections {
    let content = RE_COMMENT.replace_all(content, "");

    // (section index, header start, body start)
    let mut found: Vec<(usize, usize, usize)> = Vec::with_capacity(SECTION_HEADERS.len());
    let mut next_index = 0;
    for caps in RE_SECTION.captures_iter(&content) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(index) = SECTION_HEADERS.iter().position(|h| *h == name.as_str()) else {
            continue;
        };
        if index < next_index {
            continue;
        }
        found.push((index, whole.start(), whole.end()));
        next_index = index + 1;
    }

    let mut bodies: [&str; 4] = [""; 4];
    for (i, &(index, _, body_start)) in found.iter().enumerate() {
        let body_end = found
            .get(i + 1)
            .map_or(content.len(), |&(_, header_start, _)| header_start);
        bodies[index] = content[body_start..body_end].trim();
    }

    Sections {
        description: bodies[0].to_string(),
        details: bodies[1].to_string(),
        stages: parse_stages(bodies[2]),
        supporting_info: bodies[3].to_string(),
    }
}

/// Split the stages section into phases
///
/// Text before the first `### Phase N` header is ignored.
pub fn parse_stages(stages: &str) -> Stages {
    let headers: Vec<(String, usize, usize)> = RE_PHASE
        .captures_iter(stages)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let label = caps.get(1)?;
            Some((label.as_str().trim().to_string(), whole.start(), whole.end()))
        })
        .collect();

    headers
        .iter()
        .enumerate()
        .map(|(i, (label, _, body_start))| {
            let body_end = headers.get(i + 1).map_or(stages.len(), |(_, start, _)| *start);
            (label.clone(), stages[*body_start..body_end].trim().to_string())
        })
        .collect()
}

//! Core domain types for guide collections.
//!
//! Every record keeps the fields it does not model in an `extra` map so that
//! the collection is persisted back with upstream annotations intact.

use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{GuideGenError, Result};

/// `file_dir` value meaning "write directly under the content root".
pub const ROOT_FILE_DIR: &str = "/";

/// Tab variant id marking content that is intentionally absent.
const TAB_ID_NONE: &str = "none";

/// Tab variant id marking content that does not apply to the language.
const TAB_ID_NOT_APPLICABLE: &str = "na";

// ---------------------------------------------------------------------------
// GuideCollection / GuideConfig
// ---------------------------------------------------------------------------

/// The persisted "matched guides" file: every guide plus upstream metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideCollection {
    /// Guides in processing order.
    pub cfgs: Vec<GuideConfig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One guide's metadata and content plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideConfig {
    pub id: String,
    pub title: String,
    pub sidebar_label: String,
    pub description: String,
    pub toc_max_heading_level: u32,
    /// Directory under the content root, or [`ROOT_FILE_DIR`].
    pub file_dir: String,
    pub file_name: String,
    /// Emit the `Tabs`/`TabItem` imports after the front matter.
    #[serde(default)]
    pub add_tabs_support: bool,
    /// Repeat the description as the first body paragraph.
    #[serde(default)]
    pub use_description: bool,
    /// Sections in reading order.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Rendered document, populated by the compiler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GuideConfig {
    /// Where this guide is written, relative to `content_root`.
    pub fn destination(&self, content_root: &Path) -> PathBuf {
        // A leading slash would make `join` discard the content root.
        let file_name = self.file_name.trim_start_matches('/');
        if self.file_dir == ROOT_FILE_DIR {
            content_root.join(file_name)
        } else {
            content_root
                .join(self.file_dir.trim_start_matches('/'))
                .join(file_name)
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Heading depth for heading sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// The ATX marker for this level (`##`, `###`, `####`).
    pub fn marker(self) -> &'static str {
        match self {
            Self::H2 => "##",
            Self::H3 => "###",
            Self::H4 => "####",
        }
    }
}

/// A content node attached by upstream graph matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Heading text; unused by paragraphs.
    #[serde(default)]
    pub label: String,
    /// Pre-rendered markdown body, emitted verbatim.
    pub markdown_content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of heading and paragraph sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSection {
    pub node: ContentNode,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of a language tab group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangTabsSection {
    #[serde(default)]
    pub langtabs: Vec<TabVariant>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One typed section of a guide.
///
/// Records whose `type` is not recognised are kept as [`Section::Unhandled`]
/// so they render to nothing but survive the round trip to disk.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Heading(HeadingLevel, NodeSection),
    Paragraph(NodeSection),
    LangTabs(LangTabsSection),
    Unhandled(Value),
}

impl Section {
    /// The `type` discriminant as it appears on disk.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Heading(HeadingLevel::H2, _) => "h2",
            Self::Heading(HeadingLevel::H3, _) => "h3",
            Self::Heading(HeadingLevel::H4, _) => "h4",
            Self::Paragraph(_) => "p",
            Self::LangTabs(_) => "langtabs",
            Self::Unhandled(raw) => raw.get("type").and_then(Value::as_str).unwrap_or("<none>"),
        }
    }
}

const KNOWN_SECTION_TYPES: [&str; 5] = ["h2", "h3", "h4", "p", "langtabs"];

#[derive(Deserialize)]
#[serde(tag = "type")]
enum TaggedSection {
    #[serde(rename = "h2")]
    H2(NodeSection),
    #[serde(rename = "h3")]
    H3(NodeSection),
    #[serde(rename = "h4")]
    H4(NodeSection),
    #[serde(rename = "p")]
    P(NodeSection),
    #[serde(rename = "langtabs")]
    LangTabs(LangTabsSection),
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum TaggedSectionRef<'a> {
    #[serde(rename = "h2")]
    H2(&'a NodeSection),
    #[serde(rename = "h3")]
    H3(&'a NodeSection),
    #[serde(rename = "h4")]
    H4(&'a NodeSection),
    #[serde(rename = "p")]
    P(&'a NodeSection),
    #[serde(rename = "langtabs")]
    LangTabs(&'a LangTabsSection),
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let known = raw
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|t| KNOWN_SECTION_TYPES.contains(&t));
        if !known {
            return Ok(Self::Unhandled(raw));
        }

        // Known types must be well-formed; a malformed h2 is a load error, not a skip.
        let tagged: TaggedSection = serde_json::from_value(raw).map_err(D::Error::custom)?;
        Ok(match tagged {
            TaggedSection::H2(s) => Self::Heading(HeadingLevel::H2, s),
            TaggedSection::H3(s) => Self::Heading(HeadingLevel::H3, s),
            TaggedSection::H4(s) => Self::Heading(HeadingLevel::H4, s),
            TaggedSection::P(s) => Self::Paragraph(s),
            TaggedSection::LangTabs(s) => Self::LangTabs(s),
        })
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let tagged = match self {
            Self::Heading(HeadingLevel::H2, s) => TaggedSectionRef::H2(s),
            Self::Heading(HeadingLevel::H3, s) => TaggedSectionRef::H3(s),
            Self::Heading(HeadingLevel::H4, s) => TaggedSectionRef::H4(s),
            Self::Paragraph(s) => TaggedSectionRef::P(s),
            Self::LangTabs(s) => TaggedSectionRef::LangTabs(s),
            Self::Unhandled(raw) => return raw.serialize(serializer),
        };
        tagged.serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Tab variants
// ---------------------------------------------------------------------------

/// One language's entry in a tab group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabVariant {
    /// Language tag, e.g. `go` or `typescript`.
    pub lang: String,
    /// `none`, `na`, or the id of the attached content node.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<ContentNode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What a tab variant renders as, selected by its id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabBody<'a> {
    Unavailable,
    NotApplicable,
    Content(&'a ContentNode),
}

impl TabVariant {
    /// Resolve the body for this variant.
    ///
    /// The id decides; `node` is only consulted when the id names real content,
    /// and its absence then is a [`GuideGenError::MissingVariantContent`].
    pub fn body(&self) -> Result<TabBody<'_>> {
        match self.id.as_str() {
            TAB_ID_NONE => Ok(TabBody::Unavailable),
            TAB_ID_NOT_APPLICABLE => Ok(TabBody::NotApplicable),
            _ => self
                .node
                .as_ref()
                .map(TabBody::Content)
                .ok_or_else(|| GuideGenError::MissingVariantContent {
                    lang: self.lang.clone(),
                    id: self.id.clone(),
                }),
        }
    }
}

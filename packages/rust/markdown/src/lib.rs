//! Markdown rendering for generated guides.
//!
//! Section bodies are pre-rendered markdown and are concatenated verbatim;
//! nothing here parses or rewrites them. Each renderer is a pure function
//! from a record to a fragment, and a guide is the concatenation of its
//! header and its section fragments in order.

mod frontmatter;
mod tabs;

use tracing::warn;

use guidegen_shared::{Result, Section};

pub use frontmatter::{GENERATED_BANNER, render_frontmatter};
pub use tabs::{NOT_APPLICABLE_NOTICE, UNAVAILABLE_NOTICE, render_tabgroup};

/// Render one section to the fragment appended to the guide.
///
/// Unhandled section types are logged and render to an empty fragment.
pub fn render_section(section: &Section) -> Result<String> {
    match section {
        Section::Heading(level, s) => Ok(format!(
            "{} {}\n\n{}\n\n",
            level.marker(),
            s.node.label,
            s.node.markdown_content
        )),
        Section::Paragraph(s) => Ok(format!("{}\n\n", s.node.markdown_content)),
        Section::LangTabs(s) => render_tabgroup(&s.langtabs),
        Section::Unhandled(raw) => {
            warn!(
                section_type = section.type_name(),
                section = %raw,
                "unhandled section type, skipping"
            );
            Ok(String::new())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

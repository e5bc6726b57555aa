//! Guide compiler.
//!
//! Builds one guide's document: the front matter, then every section
//! fragment in reading order. The buffer lives only for one call, so
//! guides never share state.

use tracing::{debug, instrument};

use guidegen_markdown::{render_frontmatter, render_section};
use guidegen_shared::{GuideConfig, GuideGenError, Result, Section};

/// Render the complete markdown document for `guide`.
///
/// Errors are wrapped with the guide id.
#[instrument(skip_all, fields(guide = %guide.id, sections = guide.sections.len()))]
pub fn render_guide(guide: &GuideConfig) -> Result<String> {
    let mut doc = render_frontmatter(guide);

    for section in &guide.sections {
        let fragment =
            render_section(section).map_err(|e| GuideGenError::in_guide(&guide.id, e))?;
        doc.push_str(&fragment);
    }

    debug!(bytes = doc.len(), "guide rendered");
    Ok(doc)
}

/// Compile `guide`, returning it with `markdown_content` populated.
///
/// Any previous `markdown_content` is replaced, never appended to.
pub fn compile(mut guide: GuideConfig) -> Result<GuideConfig> {
    let markdown = render_guide(&guide)?;
    guide.markdown_content = Some(markdown);
    Ok(guide)
}

/// Number of sections in `guide` that render to nothing.
pub fn unhandled_sections(guide: &GuideConfig) -> usize {
    guide
        .sections
        .iter()
        .filter(|s| matches!(s, Section::Unhandled(_)))
        .count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

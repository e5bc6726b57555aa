//! Batch generation: collection → compile each guide → write → persist.
//!
//! Guides are processed one at a time in collection order. A failure stops
//! the run; guides already written stay on disk and the collection file is
//! left as it was.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use guidegen_shared::{GuideCollection, GuideGenConfig, GuideGenError, Result};
use guidegen_storage::ContentStore;

use crate::compiler;

/// Input and output locations for one run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Matched guide collection, read at start and overwritten at the end.
    pub collection_path: PathBuf,
    /// Content tree guides are written under.
    pub content_root: PathBuf,
}

impl From<&GuideGenConfig> for GenerateConfig {
    fn from(config: &GuideGenConfig) -> Self {
        Self {
            collection_path: config.collection_path(),
            content_root: config.content_root(),
        }
    }
}

/// A guide written during a run.
#[derive(Debug, Clone)]
pub struct WrittenGuide {
    pub id: String,
    pub path: PathBuf,
    pub sha256: String,
    pub size_bytes: usize,
}

/// Result of [`generate_guides`].
#[derive(Debug)]
pub struct GenerateResult {
    /// One entry per guide, in collection order.
    pub guides: Vec<WrittenGuide>,
    /// Sections skipped across all guides because their type is unknown.
    pub unhandled_sections: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting run status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after a guide has been written.
    fn guide_written(&self, guide: &WrittenGuide, current: usize, total: usize);
    /// Called when the run completes.
    fn done(&self, result: &GenerateResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn guide_written(&self, _guide: &WrittenGuide, _current: usize, _total: usize) {}
    fn done(&self, _result: &GenerateResult) {}
}

/// Load and parse the guide collection at `path`.
///
/// A missing or malformed file is a [`GuideGenError::Load`].
pub async fn load_collection<S: ContentStore>(store: &S, path: &Path) -> Result<GuideCollection> {
    let content = store
        .read(path)
        .await
        .map_err(|e| GuideGenError::load(path, e.to_string()))?
        .ok_or_else(|| GuideGenError::load(path, "file not found"))?;

    serde_json::from_str(&content).map_err(|e| GuideGenError::load(path, e.to_string()))
}

/// Run the full generation pass.
///
/// 1. Load the guide collection
/// 2. For each guide: compile, then write its markdown
/// 3. Persist the updated collection over the original
#[instrument(skip_all, fields(collection = %config.collection_path.display()))]
pub async fn generate_guides<S: ContentStore>(
    store: &S,
    config: &GenerateConfig,
    progress: &dyn ProgressReporter,
) -> Result<GenerateResult> {
    let start = Instant::now();

    progress.phase("Loading guide collection");
    let collection = load_collection(store, &config.collection_path).await?;
    let total = collection.cfgs.len();

    info!(guides = total, "generating the full markdown for all guides");
    progress.phase("Generating guides");

    let mut compiled = Vec::with_capacity(total);
    let mut written = Vec::with_capacity(total);
    let mut unhandled_sections = 0;

    for (i, guide) in collection.cfgs.into_iter().enumerate() {
        info!(guide = %guide.id, title = %guide.title, "generating guide");

        unhandled_sections += compiler::unhandled_sections(&guide);
        let guide = compiler::compile(guide)?;
        let markdown = guide.markdown_content.as_deref().unwrap_or_default();

        let path = guide.destination(&config.content_root);
        store.write(&path, markdown).await?;

        let entry = WrittenGuide {
            id: guide.id.clone(),
            path,
            sha256: sha256_hex(markdown),
            size_bytes: markdown.len(),
        };
        debug!(
            guide = %entry.id,
            path = %entry.path.display(),
            size = entry.size_bytes,
            "wrote guide"
        );
        progress.guide_written(&entry, i + 1, total);

        written.push(entry);
        compiled.push(guide);
    }

    progress.phase("Saving guide collection");
    let updated = GuideCollection {
        cfgs: compiled,
        extra: collection.extra,
    };
    write_json(store, &config.collection_path, &updated).await?;

    let result = GenerateResult {
        guides: written,
        unhandled_sections,
        elapsed: start.elapsed(),
    };

    info!(
        guides = result.guides.len(),
        unhandled_sections,
        "guide generation complete"
    );
    progress.done(&result);

    Ok(result)
}

// ---------------------------------------------------------------------------
// Check mode
// ---------------------------------------------------------------------------

/// How a guide on disk compares with a fresh render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideStatus {
    UpToDate,
    Stale,
    Missing,
}

/// One guide's entry in a [`CheckReport`].
#[derive(Debug, Clone)]
pub struct CheckedGuide {
    pub id: String,
    pub path: PathBuf,
    pub status: GuideStatus,
}

/// Result of [`check_guides`].
#[derive(Debug, Default)]
pub struct CheckReport {
    pub guides: Vec<CheckedGuide>,
}

impl CheckReport {
    /// Guides whose file is missing or differs from a fresh render.
    pub fn outdated(&self) -> impl Iterator<Item = &CheckedGuide> {
        self.guides
            .iter()
            .filter(|g| g.status != GuideStatus::UpToDate)
    }

    pub fn is_clean(&self) -> bool {
        self.outdated().next().is_none()
    }
}

/// Render every guide in memory and compare with what is on disk.
///
/// Nothing is written, including the collection.
#[instrument(skip_all, fields(collection = %config.collection_path.display()))]
pub async fn check_guides<S: ContentStore>(
    store: &S,
    config: &GenerateConfig,
) -> Result<CheckReport> {
    let collection = load_collection(store, &config.collection_path).await?;
    let mut report = CheckReport::default();

    for guide in &collection.cfgs {
        let rendered = compiler::render_guide(guide)?;
        let path = guide.destination(&config.content_root);

        let status = match store.read(&path).await? {
            None => GuideStatus::Missing,
            Some(existing) if existing == rendered => GuideStatus::UpToDate,
            Some(_) => GuideStatus::Stale,
        };
        debug!(guide = %guide.id, ?status, "checked guide");

        report.guides.push(CheckedGuide {
            id: guide.id.clone(),
            path,
            status,
        });
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Replace a JSON file with compact JSON and a trailing newline.
async fn write_json<S: ContentStore, T: serde::Serialize>(
    store: &S,
    path: &Path,
    data: &T,
) -> Result<()> {
    let mut json = serde_json::to_string(data)
        .map_err(|e| GuideGenError::validation(format!("JSON serialization failed: {e}")))?;
    json.push('\n');
    store.replace(path, &json).await?;
    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

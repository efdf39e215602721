pub mod validate;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, SourceError};
use crate::generate::{GenerateOptions, generate};
use crate::ir::{self, NormalizedDocument};
use crate::normalize::{NormalizeOptions, normalize};
use crate::openapi;
use crate::snapshot::{self, RawSnapshot};

/// How a run resolves its offline/fallback defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineMode {
    /// Cache-friendly: offline and fallback-to-cache default to true.
    #[default]
    Ci,
    /// Demands a live snapshot: both default to false.
    Full,
}

/// The seam to the external scraping collaborator. The orchestrator performs
/// no scraping itself; implementations live at the binary boundary or in
/// tests.
pub trait SnapshotSource {
    fn fetch(&self, base_url: &str) -> Result<RawSnapshot, SourceError>;
}

/// Configuration surface of one pipeline run. Paths are explicit; the core
/// resolves nothing from the ambient environment.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub mode: PipelineMode,
    pub base_url: String,
    pub raw_snapshot_path: PathBuf,
    pub ir_output_path: PathBuf,
    pub openapi_output_dir: PathBuf,
    pub openapi_basename: String,
    /// When unset, defaults per mode.
    pub offline: Option<bool>,
    /// When unset, defaults per mode.
    pub fallback_to_cache: Option<bool>,
    pub summary_output_path: Option<PathBuf>,
}

/// Options with mode defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPipelineOptions {
    pub mode: PipelineMode,
    pub base_url: String,
    pub raw_snapshot_path: PathBuf,
    pub ir_output_path: PathBuf,
    pub openapi_output_dir: PathBuf,
    pub openapi_basename: String,
    pub offline: bool,
    pub fallback_to_cache: bool,
    pub summary_output_path: Option<PathBuf>,
}

/// Apply mode defaults to the unset flags.
pub fn resolve_options(options: &PipelineOptions) -> ResolvedPipelineOptions {
    let cache_friendly = options.mode == PipelineMode::Ci;

    ResolvedPipelineOptions {
        mode: options.mode,
        base_url: options.base_url.clone(),
        raw_snapshot_path: options.raw_snapshot_path.clone(),
        ir_output_path: options.ir_output_path.clone(),
        openapi_output_dir: options.openapi_output_dir.clone(),
        openapi_basename: options.openapi_basename.clone(),
        offline: options.offline.unwrap_or(cache_friendly),
        fallback_to_cache: options.fallback_to_cache.unwrap_or(cache_friendly),
        summary_output_path: options.summary_output_path.clone(),
    }
}

/// Machine-readable run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    #[serde(rename = "rawSnapshotPath")]
    pub raw_snapshot_path: PathBuf,

    #[serde(rename = "normalizedDocumentPath")]
    pub normalized_document_path: PathBuf,

    #[serde(rename = "openApiJsonPath")]
    pub open_api_json_path: PathBuf,

    #[serde(rename = "openApiYamlPath")]
    pub open_api_yaml_path: PathBuf,

    #[serde(rename = "usedCache")]
    pub used_cache: bool,
}

struct AcquiredSnapshot {
    snapshot: RawSnapshot,
    from_cache: bool,
}

/// Run the whole pipeline: acquire → normalize → generate → validate →
/// summarize. Phases are strictly sequential; a failed phase aborts the run
/// and leaves earlier artifacts in place.
pub fn run(
    options: &PipelineOptions,
    source: &dyn SnapshotSource,
) -> Result<PipelineResult, PipelineError> {
    let resolved = resolve_options(options);

    log::info!("starting automation pipeline ({:?} mode)", resolved.mode);

    let acquired = acquire_snapshot(&resolved, source)?;
    log::info!(
        "snapshot ready ({})",
        if acquired.from_cache {
            "cache"
        } else {
            "fresh fetch"
        }
    );

    let normalized = build_normalized_document(&acquired, &resolved)?;
    log::info!(
        "normalized IR written to {}",
        resolved.ir_output_path.display()
    );

    let document = generate(&normalized, &GenerateOptions::default());
    let json_path = resolved
        .openapi_output_dir
        .join(format!("{}.json", resolved.openapi_basename));
    let yaml_path = resolved
        .openapi_output_dir
        .join(format!("{}.yaml", resolved.openapi_basename));

    let json_payload =
        openapi::to_json_pretty(&document).map_err(|source| PipelineError::SerializeJson {
            artifact: "OpenAPI JSON document",
            source,
        })?;
    let yaml_payload =
        openapi::to_yaml(&document).map_err(|source| PipelineError::SerializeYaml {
            artifact: "OpenAPI YAML document",
            source,
        })?;
    write_text(&json_path, &json_payload)?;
    write_text(&yaml_path, &yaml_payload)?;
    log::info!(
        "OpenAPI artifacts updated: {} and {}",
        json_path.display(),
        yaml_path.display()
    );

    validate::validate_document(&document)?;
    log::info!("validated OpenAPI document {}", json_path.display());

    let result = PipelineResult {
        raw_snapshot_path: resolved.raw_snapshot_path.clone(),
        normalized_document_path: resolved.ir_output_path.clone(),
        open_api_json_path: json_path,
        open_api_yaml_path: yaml_path,
        used_cache: acquired.from_cache,
    };

    if let Some(summary_path) = &resolved.summary_output_path {
        let payload = serde_json::to_string_pretty(&result)
            .map_err(|source| PipelineError::SerializeJson {
                artifact: "pipeline summary",
                source,
            })?;
        write_text(summary_path, &format!("{payload}\n"))?;
        log::info!("pipeline summary written to {}", summary_path.display());
    }

    log::info!("pipeline complete");

    Ok(result)
}

/// Acquisition policy: offline reads the cache directly (failure is fatal);
/// a failed live fetch falls back to the cache only when enabled. The
/// fallback decision is a pure function of the fetch result and the flag.
fn acquire_snapshot(
    resolved: &ResolvedPipelineOptions,
    source: &dyn SnapshotSource,
) -> Result<AcquiredSnapshot, PipelineError> {
    if resolved.offline {
        let snapshot =
            snapshot::read_file(&resolved.raw_snapshot_path).map_err(PipelineError::CacheRead)?;
        return Ok(AcquiredSnapshot {
            snapshot,
            from_cache: true,
        });
    }

    log::info!("fetching live snapshot from {}", resolved.base_url);
    match source.fetch(&resolved.base_url) {
        Ok(snapshot) => {
            persist_snapshot(&snapshot, &resolved.raw_snapshot_path)?;
            Ok(AcquiredSnapshot {
                snapshot,
                from_cache: false,
            })
        }
        Err(error) if resolved.fallback_to_cache => {
            log::warn!("live fetch failed ({error}); falling back to cached snapshot");
            let snapshot = snapshot::read_file(&resolved.raw_snapshot_path)
                .map_err(PipelineError::CacheRead)?;
            Ok(AcquiredSnapshot {
                snapshot,
                from_cache: true,
            })
        }
        Err(error) => Err(PipelineError::Fetch(error)),
    }
}

fn persist_snapshot(snapshot: &RawSnapshot, path: &Path) -> Result<(), PipelineError> {
    let payload =
        serde_json::to_string_pretty(snapshot).map_err(|source| PipelineError::SerializeJson {
            artifact: "raw snapshot",
            source,
        })?;
    write_text(path, &format!("{payload}\n"))
}

/// Normalize the acquired snapshot. Replaying a cached snapshot reuses the
/// previous document's timestamp and checksum so repeated runs stay
/// byte-stable; a fresh fetch always stamps anew.
fn build_normalized_document(
    acquired: &AcquiredSnapshot,
    resolved: &ResolvedPipelineOptions,
) -> Result<NormalizedDocument, PipelineError> {
    let previous = if acquired.from_cache {
        read_previous_document(&resolved.ir_output_path)?
    } else {
        None
    };

    let options = NormalizeOptions {
        normalized_at: previous
            .as_ref()
            .map(|document| document.normalized_at.clone()),
        checksum: previous
            .as_ref()
            .map(|document| document.source.snapshot_checksum.clone()),
    };

    let normalized = normalize(&acquired.snapshot, &options);

    let payload = serde_json::to_string_pretty(&normalized).map_err(|source| {
        PipelineError::SerializeJson {
            artifact: "normalized document",
            source,
        }
    })?;
    write_text(&resolved.ir_output_path, &format!("{payload}\n"))?;

    Ok(normalized)
}

/// A missing previous document is not an error; any other read failure is.
fn read_previous_document(path: &Path) -> Result<Option<NormalizedDocument>, PipelineError> {
    match ir::read_file(path) {
        Ok(document) => Ok(Some(document)),
        Err(error) if error.is_not_found() => Ok(None),
        Err(error) => Err(PipelineError::PreviousDocument(error)),
    }
}

fn write_text(path: &Path, payload: &str) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PipelineError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, payload).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })
}

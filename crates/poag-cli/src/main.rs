mod fetch;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use fetch::HttpSnapshotSource;
use poag_core::generate::{self, GenerateOptions};
use poag_core::normalize::{self, NormalizeOptions};
use poag_core::pipeline::{self, PipelineMode, PipelineOptions, validate};
use poag_core::regression;
use poag_core::{ir, openapi, snapshot};

const DEFAULT_BASE_URL: &str = "https://pve.proxmox.com/pve-docs/api-viewer/apidoc.json";

#[derive(Parser)]
#[command(name = "poag", about = "Proxmox VE API documentation to OpenAPI 3.1 pipeline", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: acquire, normalize, generate, validate
    Pipeline {
        /// Run mode: ci is cache-friendly, full demands a live snapshot
        #[arg(long, value_enum, default_value = "ci")]
        mode: ModeArg,

        /// Snapshot endpoint queried on live runs
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Cached raw snapshot location (read and/or written)
        #[arg(long, default_value = "cache/raw-snapshot.json")]
        raw_snapshot: PathBuf,

        /// Normalized IR output location
        #[arg(long, default_value = "cache/normalized-ir.json")]
        ir_output: PathBuf,

        /// Directory receiving the OpenAPI JSON and YAML artifacts
        #[arg(long, default_value = "artifacts")]
        openapi_dir: PathBuf,

        /// Basename of the OpenAPI artifacts
        #[arg(long, default_value = "proxmox-ve")]
        basename: String,

        /// Read the cached snapshot instead of fetching (defaults per mode)
        #[arg(long, value_name = "BOOL")]
        offline: Option<bool>,

        /// Fall back to the cached snapshot when the live fetch fails
        /// (defaults per mode)
        #[arg(long, value_name = "BOOL")]
        fallback_to_cache: Option<bool>,

        /// Optional machine-readable run summary location
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Normalize a raw snapshot file into the intermediate representation
    Normalize {
        /// Path to the raw snapshot JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Path for the normalized document
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate OpenAPI artifacts from a normalized document
    Generate {
        /// Path to the normalized document JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Directory receiving the artifacts
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Basename of the artifacts
        #[arg(long, default_value = "proxmox-ve")]
        basename: String,

        /// Override the default templated server URL
        #[arg(long)]
        server_url: Option<String>,
    },

    /// Validate an OpenAPI JSON document against the meta-schema
    Validate {
        /// Path to the OpenAPI JSON document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Compare pipeline artifacts against recorded baselines
    Regression {
        /// Path to the baseline file
        #[arg(short, long)]
        baselines: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Ci,
    Full,
}

impl From<ModeArg> for PipelineMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Ci => PipelineMode::Ci,
            ModeArg::Full => PipelineMode::Full,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pipeline {
            mode,
            base_url,
            raw_snapshot,
            ir_output,
            openapi_dir,
            basename,
            offline,
            fallback_to_cache,
            summary,
        } => cmd_pipeline(PipelineOptions {
            mode: mode.into(),
            base_url,
            raw_snapshot_path: raw_snapshot,
            ir_output_path: ir_output,
            openapi_output_dir: openapi_dir,
            openapi_basename: basename,
            offline,
            fallback_to_cache,
            summary_output_path: summary,
        }),

        Commands::Normalize { input, output } => cmd_normalize(input, output),

        Commands::Generate {
            input,
            output_dir,
            basename,
            server_url,
        } => cmd_generate(input, output_dir, basename, server_url),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Regression { baselines } => cmd_regression(baselines),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "poag", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn cmd_pipeline(options: PipelineOptions) -> Result<()> {
    let source = HttpSnapshotSource::new();
    let result = pipeline::run(&options, &source)?;

    eprintln!("Pipeline complete:");
    eprintln!("  raw snapshot: {}", result.raw_snapshot_path.display());
    eprintln!(
        "  normalized IR: {}",
        result.normalized_document_path.display()
    );
    eprintln!("  OpenAPI JSON: {}", result.open_api_json_path.display());
    eprintln!("  OpenAPI YAML: {}", result.open_api_yaml_path.display());
    eprintln!("  used cache: {}", result.used_cache);
    Ok(())
}

fn cmd_normalize(input: PathBuf, output: PathBuf) -> Result<()> {
    let snapshot = snapshot::read_file(&input)?;
    let normalized = normalize::normalize(&snapshot, &NormalizeOptions::default());

    let payload = serde_json::to_string_pretty(&normalized)?;
    write_text(&output, &format!("{payload}\n"))?;

    eprintln!(
        "Normalized {} groups, {} methods -> {}",
        normalized.summary.group_count,
        normalized.summary.method_count,
        output.display()
    );
    Ok(())
}

fn cmd_generate(
    input: PathBuf,
    output_dir: PathBuf,
    basename: String,
    server_url: Option<String>,
) -> Result<()> {
    let normalized = ir::read_file(&input)?;
    let document = generate::generate(&normalized, &GenerateOptions { server_url });

    let json_path = output_dir.join(format!("{basename}.json"));
    let yaml_path = output_dir.join(format!("{basename}.yaml"));

    write_text(&json_path, &openapi::to_json_pretty(&document)?)?;
    write_text(&yaml_path, &openapi::to_yaml(&document)?)?;

    eprintln!("Generated {}", json_path.display());
    eprintln!("Generated {}", yaml_path.display());
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let payload = fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let value: serde_json::Value = serde_json::from_str(&payload)
        .with_context(|| format!("failed to parse {}", input.display()))?;

    validate::validate_value(&value)?;

    eprintln!("Validated {}", input.display());
    Ok(())
}

fn cmd_regression(baselines: PathBuf) -> Result<()> {
    let baselines = regression::load_baselines(&baselines)?;
    let summary = regression::compute_summary(&baselines)?;

    eprintln!("=== Regression summary ===");
    for artifact in &summary.artifacts {
        let status = if artifact.matches { "ok      " } else { "MISMATCH" };
        eprintln!(
            "[{status}] {} ({}): {}",
            artifact.baseline.label, artifact.id, artifact.actual_sha256
        );
        if !artifact.matches {
            eprintln!("           expected: {}", artifact.baseline.sha256);
        }
        eprintln!("           size: {} bytes", artifact.byte_length);
    }

    eprintln!("--- Coverage ---");
    eprintln!(
        "raw snapshot endpoints: {} (root groups: {})",
        summary.snapshot_stats.endpoint_count, summary.snapshot_stats.root_group_count
    );
    eprintln!(
        "normalized endpoints: {}, methods: {}",
        summary.normalized_summary.endpoint_count, summary.normalized_summary.method_count
    );
    eprintln!(
        "OpenAPI operations: {}, tags: {}",
        summary.operation_count, summary.tag_count
    );

    eprintln!("--- Parity ---");
    eprintln!(
        "[{}] JSON and YAML documents are structurally identical",
        if summary.parity.json_matches_yaml { "ok" } else { "FAIL" }
    );
    eprintln!(
        "[{}] operation counts match the normalized method count",
        if summary.parity.method_count_matches { "ok" } else { "FAIL" }
    );

    if summary.artifacts.iter().any(|artifact| !artifact.matches)
        || !summary.parity.json_matches_yaml
        || !summary.parity.method_count_matches
    {
        anyhow::bail!("regression checks failed");
    }
    Ok(())
}

fn write_text(path: &std::path::Path, payload: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    fs::write(path, payload).with_context(|| format!("failed to write {}", path.display()))
}

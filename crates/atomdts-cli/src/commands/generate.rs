//! Generate command implementation.
//!
//! Runs the full pipeline: load the metadata document, apply the patch plan,
//! emit the draft, format it, and write the result to stdout or a file.

use anyhow::{Context, Result};
use atomdts_codegen::{DeclarationGenerator, Metadata, PatchPlan};
use atomdts_core::GeneratorConfig;
use atomdts_core::cli::ExitCode;
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for a single `generate` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Metadata document; overrides `metadata_path` from the configuration
    pub metadata: Option<PathBuf>,
    /// Extra patch file applied after the built-in passes
    pub patches: Option<PathBuf>,
    /// Skip the built-in patch passes
    pub no_builtin_patches: bool,
    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
    /// Print the unformatted draft
    pub draft: bool,
}

/// Builds the patch plan for a run.
///
/// Built-in passes come first (unless disabled by the configuration or
/// `no_builtin`), followed by the passes from `patches`.
///
/// # Examples
///
/// ```
/// use atomdts_cli::commands::generate::build_plan;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let plan = build_plan(true, false, None).await.unwrap();
/// assert_eq!(plan.operation_count(), 4);
///
/// let plan = build_plan(true, true, None).await.unwrap();
/// assert!(plan.is_empty());
/// # }
/// ```
pub async fn build_plan(builtin: bool, no_builtin: bool, patches: Option<&Path>) -> Result<PatchPlan> {
    let mut plan = if builtin && !no_builtin {
        PatchPlan::builtin()
    } else {
        PatchPlan::empty()
    };

    if let Some(path) = patches {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read patch file {}", path.display()))?;
        let extra = PatchPlan::from_json(&content)
            .with_context(|| format!("failed to parse patch file {}", path.display()))?;
        info!(
            "Loaded {} patch operation(s) from {}",
            extra.operation_count(),
            path.display()
        );
        plan = plan.then(extra);
    }

    Ok(plan)
}

/// Renders the declaration text for `options`.
///
/// Returns the formatted declaration file, or the raw draft when
/// `options.draft` is set.
pub async fn render(config: &GeneratorConfig, options: &GenerateOptions) -> Result<String> {
    let generator = DeclarationGenerator::from_config(config).context("invalid configuration")?;

    let metadata_path = options.metadata.as_deref().unwrap_or(&config.metadata_path);
    let plan = build_plan(
        config.builtin_patches,
        options.no_builtin_patches,
        options.patches.as_deref(),
    )
    .await?;

    let metadata = Metadata::load(metadata_path, &plan)
        .with_context(|| format!("failed to load metadata from {}", metadata_path.display()))?;

    if options.draft {
        info!("Skipping formatter, emitting draft");
        return Ok(generator.render_draft(&metadata));
    }

    let generated = generator
        .generate(&metadata)
        .await
        .context("failed to format declarations")?;
    Ok(generated.content)
}

/// Runs the generate command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the metadata or patch
/// file cannot be loaded, a patch fails to apply, the formatter rejects the
/// draft, or the output file cannot be written.
pub async fn run(config: &GeneratorConfig, options: &GenerateOptions) -> Result<ExitCode> {
    let content = render(config, options).await?;

    match &options.output {
        Some(path) => {
            tokio::fs::write(path, &content)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {} bytes to {}", content.len(), path.display());
        }
        None => print!("{content}"),
    }

    Ok(ExitCode::SUCCESS)
}

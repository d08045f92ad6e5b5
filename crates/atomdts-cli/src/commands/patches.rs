//! Patches command implementation.
//!
//! Lists the built-in patch plan, so the positional paths can be checked
//! against a new metadata release before running `generate`.

use anyhow::{Context, Result};
use atomdts_codegen::PatchPlan;
use atomdts_codegen::patch::describe_operation;
use atomdts_core::cli::{ExitCode, OutputFormat};

/// Renders `plan` in the requested format.
///
/// # Examples
///
/// ```
/// use atomdts_cli::commands::patches::render_plan;
/// use atomdts_codegen::PatchPlan;
/// use atomdts_core::cli::OutputFormat;
///
/// let text = render_plan(&PatchPlan::builtin(), OutputFormat::Text).unwrap();
/// assert!(text.starts_with("optional-arguments (4 operations)\n"));
/// ```
pub fn render_plan(plan: &PatchPlan, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(plan).context("failed to serialize patch plan")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for pass in &plan.passes {
                out.push_str(&format!(
                    "{} ({} operations)\n",
                    pass.name,
                    pass.operations.len()
                ));
                for (index, operation) in pass.operations.iter().enumerate() {
                    out.push_str(&format!("  {index}: {}\n", describe_operation(operation)));
                }
            }
            Ok(out)
        }
    }
}

/// Runs the patches command.
pub fn run(format: OutputFormat) -> Result<ExitCode> {
    let rendered = render_plan(&PatchPlan::builtin(), format)?;
    print!("{rendered}");
    Ok(ExitCode::SUCCESS)
}

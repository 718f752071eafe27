//! Implementation of the `extkit create` command.
//!
//! Responsibility: turn arguments and config defaults into a
//! `ScaffoldRequest`, call the scaffold service, and display the result.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument};

use extkit_adapters::{LiquidRenderer, LocalFilesystem, default_registry};
use extkit_core::{
    application::{ScaffoldPlan, ScaffoldService},
    domain::{MAIN_ENTRY, ProjectDescriptor, ScaffoldRequest},
};

use crate::{
    cli::{CreateArgs, GlobalArgs},
    commands::open_store,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `extkit create` command.
///
/// 1. Build and validate the request (flags first, then config defaults)
/// 2. Resolve the template store
/// 3. `--dry-run`: print the plan and stop
/// 4. Confirm before writing into a non-empty directory, unless `--yes`
/// 5. Scaffold and print next steps
#[instrument(skip_all, fields(extension_type = %args.extension_type))]
pub fn execute(
    args: CreateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = build_request(&args, &config)?;
    let root = request.root_dir();

    if root.exists() && !root.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("'{}' exists and is not a directory", root.display()),
        });
    }

    let resolved = open_store(args.templates_dir.as_deref(), &config)?;
    let service = ScaffoldService::new(
        Box::new(resolved.store),
        Box::new(LiquidRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_formatters(default_registry());

    if args.dry_run {
        let plan = service.preview(&request)?;
        return show_plan(&plan, &output);
    }

    let interactive = !args.yes && !global.quiet && !output.is_json();
    if interactive && is_non_empty_dir(root) {
        show_configuration(&request, &output)?;
        let prompt = format!(
            "'{}' is not empty. Merge the scaffold into it?",
            root.display()
        );
        if !confirm(&prompt)? {
            return Err(CliError::Cancelled);
        }
    }

    output.header(&format!(
        "Creating {} extension in {}...",
        request.extension_type(),
        root.display()
    ))?;
    info!(root = %root.display(), templates = %resolved.source, "Scaffold started");

    let descriptor = service.scaffold(&request)?;

    if output.is_json() {
        return output.json(&descriptor);
    }
    show_next_steps(&descriptor, &output)
}

// ── Request construction ──────────────────────────────────────────────────────

pub(crate) fn build_request(args: &CreateArgs, config: &AppConfig) -> CliResult<ScaffoldRequest> {
    let request = ScaffoldRequest::builder()
        .extension_type(args.extension_type.as_str())
        .root_dir(&args.root_dir)
        .maybe_renderer_name(args.renderer.clone().or_else(|| config.defaults.renderer.clone()))
        .maybe_template_id(args.template.clone().or_else(|| config.defaults.template.clone()))
        .maybe_build_dir(args.build_dir.clone().or_else(|| config.defaults.build_dir.clone()))
        .maybe_uuid(args.uuid)
        .build()?;

    debug!(request = %request, "Request built");
    Ok(request)
}

// ── Dry run ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PlanView<'a> {
    extension_type: &'a str,
    root_dir: &'a Path,
    root_exists: bool,
    main_entry: Option<&'a str>,
    files: Vec<PlannedFileView<'a>>,
}

#[derive(Serialize)]
struct PlannedFileView<'a> {
    path: &'a Path,
    action: &'static str,
}

fn show_plan(plan: &ScaffoldPlan, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        return output.json(&PlanView {
            extension_type: plan.descriptor.extension_type(),
            root_dir: plan.descriptor.root_dir(),
            root_exists: plan.root_exists,
            main_entry: plan.descriptor.entry(MAIN_ENTRY),
            files: plan
                .files
                .iter()
                .map(|f| PlannedFileView {
                    path: &f.path,
                    action: f.action.as_str(),
                })
                .collect(),
        });
    }

    let root = plan.descriptor.root_dir();
    output.info(&format!(
        "Dry run: nothing will be written to {}",
        root.display()
    ))?;
    if !plan.root_exists {
        output.print(&format!("  {:<9} {}/", "mkdir", root.display()))?;
    }
    for file in &plan.files {
        output.print(&format!("  {:<9} {}", file.action.as_str(), file.path.display()))?;
    }
    Ok(())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn is_non_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

fn show_configuration(request: &ScaffoldRequest, out: &OutputManager) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Type:      {}", request.extension_type()))?;
    out.print(&format!("  Template:  {}", request.template_id()))?;
    out.print(&format!("  Renderer:  {}", request.renderer_name()))?;
    out.print(&format!("  Build dir: {}", request.build_dir()))?;
    out.print(&format!("  Location:  {}", request.root_dir().display()))?;
    out.print("")?;
    Ok(())
}

fn show_next_steps(descriptor: &ProjectDescriptor, out: &OutputManager) -> CliResult<()> {
    out.success(&format!(
        "{} extension scaffolded (uuid {})",
        descriptor.extension_type(),
        descriptor.uuid()
    ))?;

    if !out.is_quiet() {
        out.print("")?;
        out.print("Next steps:")?;
        out.print(&format!("  cd {}", descriptor.root_dir().display()))?;
        if let Some(entry) = descriptor.entry(MAIN_ENTRY) {
            out.print(&format!("  edit {entry}"))?;
        }
        out.print("  npm install && npm run develop")?;
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return confirm_from_stdin(prompt);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(prompt: &str) -> CliResult<bool> {
    confirm_from_stdin(prompt)
}

fn confirm_from_stdin(prompt: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    print!("{prompt} [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_ascii_lowercase();
    input.is_empty() || input == "y" || input == "yes"
}

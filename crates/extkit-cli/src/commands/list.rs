//! Implementation of the `extkit list` command.

use extkit_core::application::{ExtensionTypeInfo, TemplateService};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::open_store,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let resolved = open_store(args.templates_dir.as_deref(), &config)?;
    let source = resolved.source.to_string();
    let service = TemplateService::new(Box::new(resolved.store));

    let types = match &args.extension_type {
        Some(name) => vec![service.get(name)?],
        None => service.list(),
    };

    // --output-format json applies here too.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header(&format!("Extension types ({source}):"))?;
            if types.is_empty() {
                output.warning("No extension types found")?;
            }
            for info in &types {
                output.print(&row(info))?;
            }
            let shared = service.shared_templates();
            if !shared.is_empty() {
                output.print("")?;
                output.print(&format!("Shared templates: {}", shared.join(", ")))?;
            }
        }

        // Machine-readable output goes straight to stdout, even with --quiet.
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&types)?;
            println!("{json}");
        }

        ListFormat::List => {
            for info in &types {
                println!("{}", info.name);
            }
        }
    }

    Ok(())
}

fn row(info: &ExtensionTypeInfo) -> String {
    let or_none = |v: &[String]| {
        if v.is_empty() {
            "-".to_string()
        } else {
            v.join(", ")
        }
    };
    format!(
        "  {:<24} bodies: {:<20} manifests: {:<36} extra sources: {}",
        info.name,
        or_none(&info.main_bodies),
        or_none(&info.manifests),
        info.source_files
    )
}

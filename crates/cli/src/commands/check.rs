use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use sidelint_core::mixin;
use sidelint_core::{Diagnostic, ModuleAnalyzer, ModuleModel};

use crate::cli::OutputFormat;
use crate::display;
use crate::project;

#[derive(Serialize)]
struct CheckReport<'a> {
    module: String,
    platform: Option<String>,
    diagnostics: &'a [Diagnostic],
}

fn load(analyzer: &mut ModuleAnalyzer, path: &Path) -> Result<ModuleModel> {
    let files = project::collect_java_files(path);
    analyzer
        .load_module(path, &files)
        .with_context(|| format!("failed to load module at {}", path.display()))
}

pub fn run(path: &Path, format: OutputFormat, fix: bool) -> Result<i32> {
    let mut analyzer = ModuleAnalyzer::new()?;
    let module = load(&mut analyzer, path)?;
    let mut diagnostics = analyzer.inspect(&module);

    if fix {
        let fixes: Vec<_> = diagnostics
            .iter()
            .filter_map(|d| d.quick_fix.clone())
            .collect();
        for edit in &fixes {
            mixin::apply_edit(edit)
                .with_context(|| format!("failed to update {}", edit.config_path.display()))?;
            tracing::info!("Registered {} in {:?}", edit.entry, edit.config_path);
        }
        if !fixes.is_empty() {
            println!("Applied {} fix(es)", fixes.len());
            // Re-check against the updated configs
            let module = load(&mut analyzer, path)?;
            diagnostics = analyzer.inspect(&module);
        }
    }

    match format {
        OutputFormat::Text => {
            print!("{}", display::render_diagnostics(&diagnostics));
            println!("{}", display::render_summary(&diagnostics));
        }
        OutputFormat::Json => {
            let report = CheckReport {
                module: path.display().to_string(),
                platform: module.facet.as_ref().map(|f| f.platform.to_string()),
                diagnostics: &diagnostics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(if diagnostics.is_empty() { 0 } else { 1 })
}

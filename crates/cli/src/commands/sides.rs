use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use sidelint_core::sideonly::find_side_annotation;
use sidelint_core::{beginning_check, ModuleAnalyzer, Side, SideResolver};

use crate::cli::OutputFormat;
use crate::project;

#[derive(Serialize)]
pub struct MemberSide {
    pub kind: &'static str,
    pub name: String,
    pub side: Side,
}

#[derive(Serialize)]
pub struct SideRow {
    pub class: String,
    pub side: Side,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberSide>,
}

pub fn run(path: &Path, filter: Option<&str>, format: OutputFormat) -> Result<i32> {
    let filter = filter
        .map(Regex::new)
        .transpose()
        .context("invalid --filter regex")?;

    let files = project::collect_java_files(path);
    let mut analyzer = ModuleAnalyzer::new()?;
    let module = analyzer
        .load_module(path, &files)
        .with_context(|| format!("failed to load module at {}", path.display()))?;

    if !beginning_check(&module) {
        println!(
            "Module at {} is not eligible for side checks",
            path.display()
        );
        return Ok(0);
    }

    let mut resolver = SideResolver::new(&module);
    let mut rows = Vec::new();
    let mut classes: Vec<_> = module.classes().collect();
    classes.sort_by(|(_, a), (_, b)| a.qualified_name.cmp(&b.qualified_name));

    for (id, class) in classes {
        if let Some(filter) = &filter {
            if !filter.is_match(&class.qualified_name) {
                continue;
            }
        }
        let mut members = Vec::new();
        for &method in &class.methods {
            let data = module.method(method);
            if find_side_annotation(&data.annotations).is_some() {
                members.push(MemberSide {
                    kind: "method",
                    name: data.name.clone(),
                    side: resolver.check_method(method),
                });
            }
        }
        for &field in &class.fields {
            let data = module.field(field);
            if find_side_annotation(&data.annotations).is_some() {
                members.push(MemberSide {
                    kind: "field",
                    name: data.name.clone(),
                    side: resolver.check_field(field),
                });
            }
        }
        rows.push(SideRow {
            class: class.qualified_name.clone(),
            side: resolver.side_for_class(id),
            members,
        });
    }

    match format {
        OutputFormat::Text => {
            for row in &rows {
                println!("{:<8} {}", row.side.to_string(), row.class);
                for member in &row.members {
                    println!("    {:<8} {} {}", member.side.to_string(), member.kind, member.name);
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }

    Ok(0)
}

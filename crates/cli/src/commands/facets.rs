use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use sidelint_core::facet::{FacetDetector, MinecraftFacet};
use sidelint_core::Side;

use crate::cli::OutputFormat;

#[derive(Serialize)]
struct FacetReport<'a> {
    module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    facet: Option<&'a MinecraftFacet>,
    ambient_side: Side,
    eligible: bool,
}

pub fn run(path: &Path, format: OutputFormat) -> Result<i32> {
    let facet = FacetDetector::detect(path)?;

    match format {
        OutputFormat::Text => match &facet {
            None => println!("No modding platform detected at {}", path.display()),
            Some(facet) => {
                println!("Platform: {}", facet.platform);
                if let Some(descriptor_path) = &facet.fabric_json_path {
                    println!("Descriptor: {}", descriptor_path.display());
                }
                if let Some(mcmod_path) = &facet.mcmod_info_path {
                    println!("Descriptor: {}", mcmod_path.display());
                }
                if let Some(environment) = facet.environment() {
                    println!("Environment: {environment}");
                }
                println!("Ambient side: {}", facet.ambient_side());
                println!(
                    "Eligible for side checks: {}",
                    if facet.eligible_for_side_checks() { "yes" } else { "no" }
                );
            }
        },
        OutputFormat::Json => {
            let report = FacetReport {
                module: path.display().to_string(),
                ambient_side: facet.as_ref().map_or(Side::None, MinecraftFacet::ambient_side),
                eligible: facet
                    .as_ref()
                    .is_some_and(MinecraftFacet::eligible_for_side_checks),
                facet: facet.as_ref(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(0)
}

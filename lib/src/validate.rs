//! The bundled validation profiles and the validation stage run over converted
//! graphs.

use crate::errors::ShaclValidationError;
use crate::shacl::{self, Severity, ShapesGraph, ValidationReport};
use crate::usage_error;
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use log::{debug, error, info, warn};
use oxigraph::model::Graph;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

const VOCPUB_49: &str = include_str!("../profiles/vocpub-49.ttl");
const VOCPUB_51: &str = include_str!("../profiles/vocpub-51.ttl");

pub const PROFILES: [&str; 2] = ["vocpub-49", "vocpub-51"];
pub const LATEST_PROFILE: &str = "vocpub-51";

lazy_static! {
    static ref SHAPES: Mutex<HashMap<&'static str, Arc<ShapesGraph>>> =
        Mutex::new(HashMap::new());
}

/// The canonical name of a profile, accepting the dotted aliases and `vocpub`
/// for the latest.
pub fn resolve_profile(name: &str) -> Result<&'static str> {
    match name.trim().to_lowercase().as_str() {
        "vocpub-49" | "vocpub-4.9" => Ok("vocpub-49"),
        "vocpub-51" | "vocpub-5.1" | "vocpub" => Ok(LATEST_PROFILE),
        other => Err(usage_error!(
            "The validation profile '{}' is not known. Use one of {}",
            other,
            PROFILES.join(", ")
        )),
    }
}

/// Parsed shapes of a profile. Each profile is parsed once per process.
pub fn profile_shapes(name: &str) -> Result<Arc<ShapesGraph>> {
    let name = resolve_profile(name)?;
    let mut cache = SHAPES
        .lock()
        .map_err(|_| anyhow!("The validation profile cache is poisoned"))?;
    if let Some(shapes) = cache.get(name) {
        return Ok(shapes.clone());
    }
    let text = match name {
        "vocpub-49" => VOCPUB_49,
        _ => VOCPUB_51,
    };
    let shapes = Arc::new(
        ShapesGraph::from_turtle(text)
            .with_context(|| format!("Could not read the {name} validation profile"))?,
    );
    debug!("Loaded {} shapes for profile {}", shapes.len(), name);
    cache.insert(name, shapes.clone());
    Ok(shapes)
}

/// Validates `graph` against `profile`. Results ranked at or below `error_level`
/// (1 violation, 2 warning, 3 info) fail with a [`ShaclValidationError`] holding
/// the full report; results ranked at or below `message_level` are logged. When
/// `log_file` is given the report is written there whatever the outcome.
pub fn validate(
    graph: &Graph,
    profile: &str,
    error_level: u8,
    message_level: u8,
    log_file: Option<&Path>,
) -> Result<ValidationReport> {
    let name = resolve_profile(profile)?;
    let shapes = profile_shapes(name)?;
    info!("Validating {} triples against profile {}", graph.len(), name);
    let report = shacl::validate(graph, &shapes);

    for result in report.results_up_to(message_level) {
        let line = format!(
            "{} {}: {}",
            result.component, result.focus_node, result.message
        );
        match result.severity {
            Severity::Violation => error!("{line}"),
            Severity::Warning => warn!("{line}"),
            Severity::Info => info!("{line}"),
        }
    }
    if let Some(path) = log_file {
        std::fs::write(path, report.to_string()).with_context(|| {
            format!("Could not write the validation report to {}", path.display())
        })?;
        info!("Validation report written to {}", path.display());
    }

    if report.results_up_to(error_level).next().is_some() {
        return Err(anyhow::Error::new(ShaclValidationError {
            profile: name.to_string(),
            report: report.to_string(),
        }));
    }
    Ok(report)
}

use anyhow::Result;
use serde::Serialize;
use verbarg::Registry;

use crate::manifest::LoadedManifest;

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub manifest: String,
    pub program: String,
    pub verbs: Vec<VerbSummary>,
}

#[derive(Debug, Serialize)]
pub struct VerbSummary {
    pub name: String,
    pub mandatory: Vec<String>,
    pub optional: Vec<String>,
    pub aliases: usize,
}

/// Validate the manifest's verb table and summarize it.
pub fn check_manifest(loaded: &LoadedManifest) -> Result<CheckReport> {
    let registry = loaded.registry()?;
    Ok(summarize(&registry, &loaded.path.display().to_string()))
}

pub fn summarize(registry: &Registry, source: &str) -> CheckReport {
    let verbs = registry
        .verbs()
        .map(|verb| {
            let (mandatory, optional): (Vec<_>, Vec<_>) =
                verb.params.iter().partition(|p| !p.optional);
            VerbSummary {
                name: verb.name.clone(),
                mandatory: mandatory.iter().map(|p| p.key.clone()).collect(),
                optional: optional.iter().map(|p| p.key.clone()).collect(),
                aliases: verb.params.iter().map(|p| p.aliases.len()).sum(),
            }
        })
        .collect();

    CheckReport {
        manifest: source.to_string(),
        program: registry.program().to_string(),
        verbs,
    }
}

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use verbarg::{ParamDef, Registry, VerbDef};

pub const DEFAULT_MANIFEST_NAME: &str = "verbs.json";
pub const SCHEMA_VERSION: u32 = 1;

/// A verb table declared as data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    /// Program name shown in usage text. Defaults to the manifest file stem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    #[serde(default)]
    pub verbs: Vec<VerbDef>,
}

#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub path: PathBuf,
    pub manifest: Manifest,
}

impl LoadedManifest {
    pub fn program(&self) -> String {
        self.manifest
            .program
            .clone()
            .or_else(|| {
                self.path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| "program".to_string())
    }

    /// Validate the verb table and build a registry from it.
    pub fn registry(&self) -> Result<Registry> {
        Registry::builder(self.program())
            .verbs(self.manifest.verbs.iter().cloned())
            .build()
            .with_context(|| format!("invalid verb table in {}", self.path.display()))
    }
}

pub fn load_manifest(path: &Path) -> Result<LoadedManifest> {
    if !path.exists() {
        bail!("manifest not found: {}", path.display());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;
    let manifest: Manifest = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse manifest JSON: {}", path.display()))?;

    if let Some(version) = manifest.schema_version.filter(|v| *v != SCHEMA_VERSION) {
        bail!(
            "unsupported manifest schemaVersion {version} (expected {SCHEMA_VERSION}): {}",
            path.display()
        );
    }

    tracing::debug!(path = %path.display(), verbs = manifest.verbs.len(), "loaded manifest");
    Ok(LoadedManifest {
        path: path.to_path_buf(),
        manifest,
    })
}

fn starter_manifest(program: &str) -> Manifest {
    Manifest {
        schema_version: Some(SCHEMA_VERSION),
        program: Some(program.to_string()),
        verbs: vec![
            VerbDef::new("serve", "Runs the service.").params([
                ParamDef::new(
                    "unixsock",
                    ["unixsock", "sock"],
                    "Path of the unix socket to listen on.",
                )
                .takes_value(),
                ParamDef::new("verbose", ["verbose", "v"], "Verbose logging.").optional(),
            ]),
        ],
    }
}

pub fn write_default_manifest(project_dir: &Path, program: &str, overwrite: bool) -> Result<PathBuf> {
    let dest = project_dir.join(DEFAULT_MANIFEST_NAME);
    if dest.exists() && !overwrite {
        bail!(
            "{} already exists (use --force to overwrite)",
            dest.display()
        );
    }

    let bytes = serde_json::to_vec_pretty(&starter_manifest(program))
        .context("failed to serialize manifest")?;
    let mut out = String::from_utf8(bytes).context("manifest is not valid UTF-8")?;
    out.push('\n');

    let tmp = dest.with_extension("tmp");
    fs::write(&tmp, out.as_bytes())
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    if overwrite && dest.exists() {
        fs::remove_file(&dest).with_context(|| format!("failed to remove {}", dest.display()))?;
    }
    fs::rename(&tmp, &dest)
        .with_context(|| format!("failed to move {} into place", dest.display()))?;
    Ok(dest)
}

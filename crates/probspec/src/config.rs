use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use probspec_contracts::CONFIG_SCHEMA_VERSION;
use probspec_core::Problem;
use serde::Deserialize;
use tracing::info;

use crate::util;

pub const CONFIG_FILE_NAME: &str = "probspec.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Md,
    Json,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Md => "md",
            Format::Json => "json",
        }
    }
}

/// Site settings read from `probspec.json`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub schema_version: String,
    pub out_dir: PathBuf,
    /// Problem ids to publish; empty means the whole catalog.
    pub problems: Vec<String>,
    pub formats: Vec<Format>,
    /// When set, problems without a reference implementation link to `<base>/<id>`.
    pub reference_base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION.to_string(),
            out_dir: PathBuf::from("site/problems"),
            problems: Vec::new(),
            formats: vec![Format::Md, Format::Json],
            reference_base_url: String::new(),
        }
    }
}

impl SiteConfig {
    pub fn apply_reference_url(&self, problem: Problem) -> Problem {
        let base = self.reference_base_url.trim().trim_end_matches('/');
        if base.is_empty() || !problem.reference_implementation_url().is_empty() {
            return problem;
        }
        let url = format!("{base}/{}", problem.id());
        problem.with_reference_implementation(url)
    }
}

/// Loads the explicit config, or the nearest `probspec.json`, or defaults.
///
/// A relative `out_dir` from a file is taken relative to that file's directory.
pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<SiteConfig> {
    let path = match explicit {
        Some(p) => {
            let p = util::resolve_existing_path_upwards_from(cwd, p);
            if !p.is_file() {
                anyhow::bail!("config file not found: {}", p.display());
            }
            p
        }
        None => {
            let p = util::resolve_existing_path_upwards_from(cwd, Path::new(CONFIG_FILE_NAME));
            if !p.is_file() {
                return Ok(SiteConfig::default());
            }
            p
        }
    };
    let config = load_file(&path)?;
    info!(path = %path.display(), "loaded site config");
    Ok(config)
}

fn load_file(path: &Path) -> Result<SiteConfig> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read config: {}", path.display()))?;
    let mut config: SiteConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse JSON: {}", path.display()))?;
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        anyhow::bail!(
            "{}: schema_version must be {CONFIG_SCHEMA_VERSION:?}, got {:?}",
            path.display(),
            config.schema_version
        );
    }
    if config.out_dir.is_relative() {
        if let Some(dir) = path.parent() {
            config.out_dir = dir.join(&config.out_dir);
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use probspec_core::catalog;

    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: SiteConfig = serde_json::from_str(r#"{"out_dir": "public"}"#).expect("parse");
        assert_eq!(config.out_dir, PathBuf::from("public"));
        assert_eq!(config.formats, vec![Format::Md, Format::Json]);
        assert_eq!(config.schema_version, CONFIG_SCHEMA_VERSION);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_json::from_str::<SiteConfig>(r#"{"outdir": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("outdir"), "{err}");
    }

    #[test]
    fn reference_base_url_fills_empty_links_only() {
        let config = SiteConfig {
            reference_base_url: "https://example.org/ref/".to_string(),
            ..SiteConfig::default()
        };
        let problem = catalog::by_id("field-arithmetic")
            .expect("known")
            .expect("builds");
        let linked = config.apply_reference_url(problem);
        assert_eq!(
            linked.reference_implementation_url(),
            "https://example.org/ref/field-arithmetic"
        );

        let pinned = linked.with_reference_implementation("https://pinned.example");
        assert_eq!(
            config.apply_reference_url(pinned).reference_implementation_url(),
            "https://pinned.example"
        );
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load(None, dir.path()).expect("load");
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn out_dir_is_relative_to_the_discovered_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"schema_version": "probspec.config@0.1.0", "out_dir": "public"}"#,
        )
        .expect("write config");
        let nested = dir.path().join("drafts").join("notes");
        std::fs::create_dir_all(&nested).expect("mkdir");

        let config = load(None, &nested).expect("load");
        assert_eq!(config.out_dir, dir.path().join("public"));

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"schema_version": "probspec.config@0.1.0", "out_dir": "/srv/site"}"#,
        )
        .expect("write config");
        let config = load(None, &nested).expect("load");
        assert_eq!(config.out_dir, PathBuf::from("/srv/site"));
    }

    #[test]
    fn load_rejects_wrong_schema_version() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"schema_version": "probspec.config@9.9.9"}"#)
            .expect("write config");
        let err = load(Some(&path), dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("schema_version must be"));
    }
}

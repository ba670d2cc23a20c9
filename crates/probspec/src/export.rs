use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use probspec_contracts::EXPORT_INDEX_SCHEMA_VERSION;
use probspec_core::util::sha256_hex;
use probspec_core::Problem;
use serde::Serialize;
use tracing::info;

use crate::config::{Format, SiteConfig};
use crate::show;
use crate::util;

pub const INDEX_FILE_NAME: &str = "index.json";

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output directory (overrides `out_dir` from the config).
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Output format; may be passed multiple times (overrides `formats`).
    #[arg(long, value_enum)]
    pub format: Vec<Format>,

    /// Problem id to export; may be passed multiple times (overrides `problems`).
    #[arg(long, value_name = "ID")]
    pub problem: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ExportIndex {
    pub schema_version: &'static str,
    pub problems: Vec<IndexEntry>,
}

#[derive(Debug, Serialize)]
pub struct IndexEntry {
    pub id: String,
    pub title: String,
    pub interface_sha256: String,
    pub files: Vec<IndexFile>,
}

#[derive(Debug, Serialize)]
pub struct IndexFile {
    pub path: String,
    pub sha256: String,
}

pub fn cmd_export(site: &SiteConfig, args: ExportArgs) -> Result<std::process::ExitCode> {
    let out_dir = args.out_dir.unwrap_or_else(|| site.out_dir.clone());
    let formats = if args.format.is_empty() {
        site.formats.clone()
    } else {
        args.format
    };
    if formats.is_empty() {
        anyhow::bail!("no output formats selected");
    }
    let ids = if args.problem.is_empty() {
        site.problems.clone()
    } else {
        args.problem
    };

    let mut entries = Vec::new();
    for problem in show::load_problems(site, &ids)? {
        let stem = file_stem(&problem)?;
        let mut files = Vec::new();
        for &format in &formats {
            let bytes = show::render(&problem, format)?;
            let name = format!("{stem}.{}", format.extension());
            util::write_bytes(&out_dir.join(&name), &bytes)?;
            files.push(IndexFile {
                path: name,
                sha256: sha256_hex(&bytes),
            });
        }
        info!(problem = problem.id(), files = files.len(), "exported problem");
        entries.push(IndexEntry {
            id: problem.id().to_string(),
            title: problem.title().to_string(),
            interface_sha256: problem.interface().fingerprint()?,
            files,
        });
    }

    let index = ExportIndex {
        schema_version: EXPORT_INDEX_SCHEMA_VERSION,
        problems: entries,
    };
    let bytes = util::json_bytes(&index)?;
    util::write_bytes(&out_dir.join(INDEX_FILE_NAME), &bytes)?;
    util::print_bytes(&bytes)?;
    Ok(std::process::ExitCode::SUCCESS)
}

/// Output file stem for a problem; titles without any letters or digits have none.
fn file_stem(problem: &Problem) -> Result<&str> {
    let id = problem.id();
    if id.is_empty() {
        anyhow::bail!(
            "problem {:?} has an empty id; its title needs a letter or digit",
            problem.title()
        );
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use probspec_core::{make_problem, Document, InterfaceBuilder, Prize, Stage};

    use super::*;

    fn titled(title: &str) -> Problem {
        let iface = InterfaceBuilder::new().combine(|_| Ok(Document::new())).expect("combine");
        make_problem(
            title,
            Document::new(),
            Prize::new(1, Stage::Tutorial),
            |_| Document::new(),
            iface,
            |_| Document::new(),
        )
    }

    #[test]
    fn file_stem_refuses_empty_ids() {
        assert_eq!(file_stem(&titled("Field arithmetic")).expect("stem"), "field-arithmetic");
        let err = file_stem(&titled("???")).unwrap_err();
        assert!(err.to_string().contains("empty id"), "{err}");
    }
}

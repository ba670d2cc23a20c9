use anyhow::{Context, Result};
use probspec_contracts::{PROBLEM_SCHEMA_VERSION, PROBLEM_SCHEMA_VERSIONS_SUPPORTED};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::interface::{BindingKind, Interface};
use crate::problem::{Prize, Problem};

/// Machine-readable form of a [`Problem`] as consumed by the publishing site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecord {
    pub schema_version: String,
    pub id: String,
    pub title: String,
    pub short_description: Document,
    pub prize: Prize,
    pub background: Document,
    pub interface: Interface,
    #[serde(default)]
    pub reference_implementation_url: String,
    pub closing: Document,
}

impl ProblemRecord {
    pub fn from_problem(problem: &Problem) -> Self {
        Self {
            schema_version: PROBLEM_SCHEMA_VERSION.to_string(),
            id: problem.id().to_string(),
            title: problem.title().to_string(),
            short_description: problem.short_description().clone(),
            prize: problem.prize(),
            background: problem.background().clone(),
            interface: problem.interface().clone(),
            reference_implementation_url: problem.reference_implementation_url().to_string(),
            closing: problem.closing().clone(),
        }
    }

    pub fn into_problem(self) -> Problem {
        Problem::from_parts(
            self.id,
            self.title,
            self.short_description,
            self.prize,
            self.background,
            self.interface,
            self.reference_implementation_url,
            self.closing,
        )
    }

    /// `(kind, name, type-tag)` per binding, in declaration order.
    pub fn signature(&self) -> Vec<(BindingKind, String, &'static str)> {
        signature(&self.interface)
    }
}

pub fn signature(interface: &Interface) -> Vec<(BindingKind, String, &'static str)> {
    interface
        .bindings()
        .iter()
        .map(|b| (b.kind, b.name.clone(), b.ty.tag()))
        .collect()
}

/// Pretty JSON with a trailing newline.
pub fn to_json_pretty(problem: &Problem) -> Result<Vec<u8>> {
    let record = ProblemRecord::from_problem(problem);
    let mut out = serde_json::to_vec_pretty(&record)
        .with_context(|| format!("encode problem record: {}", problem.id()))?;
    out.push(b'\n');
    Ok(out)
}

pub fn parse_problem_json(bytes: &[u8]) -> Result<ProblemRecord> {
    let record: ProblemRecord = serde_json::from_slice(bytes).context("parse problem JSON")?;
    if !PROBLEM_SCHEMA_VERSIONS_SUPPORTED.contains(&record.schema_version.as_str()) {
        anyhow::bail!(
            "unsupported problem schema_version {:?} (expected {})",
            record.schema_version,
            PROBLEM_SCHEMA_VERSION
        );
    }
    Ok(record)
}

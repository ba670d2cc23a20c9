use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use probspec_core::wire;
use serde_json::json;

use crate::util;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Problem JSON record (as written by `probspec export --format json`).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    #[arg(long)]
    pub json: bool,
}

pub fn cmd_parse(args: ParseArgs) -> Result<std::process::ExitCode> {
    let bytes = std::fs::read(&args.path)
        .with_context(|| format!("read problem record: {}", args.path.display()))?;
    let record = wire::parse_problem_json(&bytes)
        .with_context(|| format!("parse problem record: {}", args.path.display()))?;

    let signature = record.signature();
    if args.json {
        let bindings: Vec<_> = signature
            .iter()
            .map(|(kind, name, tag)| json!({"kind": kind, "name": name, "tag": tag}))
            .collect();
        let v = json!({"id": record.id, "bindings": bindings});
        util::print_bytes(&util::json_bytes(&v)?)?;
    } else {
        println!("{}", record.id);
        for (kind, name, tag) in &signature {
            println!("  {} {name}: {tag}", kind.as_str());
        }
    }
    Ok(std::process::ExitCode::SUCCESS)
}

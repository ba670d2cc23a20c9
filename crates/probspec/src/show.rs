use anyhow::{Context, Result};
use clap::Args;
use probspec_contracts::LIST_REPORT_SCHEMA_VERSION;
use probspec_core::{catalog, wire, Problem, ProblemContext, Stage};
use probspec_curves::Curve;
use serde::Serialize;

use crate::config::{Format, SiteConfig};
use crate::util;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only list problems whose interface uses this curve (`mnt4`, `MNT6753`, ...).
    #[arg(long, value_name = "CURVE", value_parser = parse_curve)]
    pub curve: Option<Curve>,

    /// Only list problems offered at this prize stage.
    #[arg(long, value_name = "STAGE", value_parser = parse_stage)]
    pub stage: Option<Stage>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Problem id (see `probspec list`).
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(long, value_enum, default_value_t = Format::Md)]
    pub format: Format,
}

#[derive(Debug, Serialize)]
struct ListReport {
    schema_version: &'static str,
    problems: Vec<ListEntry>,
}

#[derive(Debug, Serialize)]
struct ListEntry {
    id: String,
    title: String,
    stage: &'static str,
    prize: u64,
    curves: Vec<Curve>,
}

fn parse_curve(s: &str) -> Result<Curve, String> {
    Curve::parse(s).ok_or_else(|| {
        let known: Vec<String> = Curve::ALL
            .iter()
            .map(|c| format!("{} ({})", c.as_str(), c.scope_label()))
            .collect();
        format!("unknown curve {s:?} (known: {})", known.join(", "))
    })
}

fn parse_stage(s: &str) -> Result<Stage, String> {
    Stage::parse(s)
        .ok_or_else(|| format!("unknown stage {s:?} (known: tutorial, stage-1, stage-2)"))
}

/// Builds one catalog problem with the site's link settings applied.
pub fn load_problem(site: &SiteConfig, id: &str) -> Result<Problem> {
    let Some(built) = catalog::by_id(id) else {
        let known: Vec<&str> = catalog::ids().collect();
        anyhow::bail!("unknown problem id: {id} (known: {})", known.join(", "));
    };
    let problem = built.with_context(|| format!("build problem: {id}"))?;
    Ok(site.apply_reference_url(problem))
}

/// Builds the problems named in `ids`, or the whole catalog when empty.
pub fn load_problems(site: &SiteConfig, ids: &[String]) -> Result<Vec<Problem>> {
    if ids.is_empty() {
        let problems = catalog::all().context("build catalog")?;
        return Ok(problems
            .into_iter()
            .map(|p| site.apply_reference_url(p))
            .collect());
    }
    ids.iter().map(|id| load_problem(site, id)).collect()
}

pub fn cmd_list(site: &SiteConfig, args: ListArgs) -> Result<std::process::ExitCode> {
    let mut entries = Vec::new();
    for problem in load_problems(site, &[])? {
        let ctx = ProblemContext::from_interface(problem.interface());
        if let Some(curve) = args.curve {
            if !ctx.curves.contains(&curve) {
                continue;
            }
        }
        if args.stage.is_some_and(|s| s != problem.prize().stage) {
            continue;
        }
        entries.push(ListEntry {
            id: problem.id().to_string(),
            title: problem.title().to_string(),
            stage: problem.prize().stage.as_str(),
            prize: problem.prize().amount,
            curves: ctx.curves.into_iter().collect(),
        });
    }

    if args.json {
        let report = ListReport {
            schema_version: LIST_REPORT_SCHEMA_VERSION,
            problems: entries,
        };
        util::print_bytes(&util::json_bytes(&report)?)?;
    } else {
        for e in &entries {
            println!("{}\t{}\t{}", e.id, e.stage, e.title);
        }
    }
    Ok(std::process::ExitCode::SUCCESS)
}

pub fn cmd_show(site: &SiteConfig, args: ShowArgs) -> Result<std::process::ExitCode> {
    let problem = load_problem(site, args.id.trim())?;
    let bytes = render(&problem, args.format)?;
    util::print_bytes(&bytes)?;
    Ok(std::process::ExitCode::SUCCESS)
}

pub fn render(problem: &Problem, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Md => {
            let md = problem
                .to_markdown()
                .with_context(|| format!("render page: {}", problem.id()))?;
            Ok(md.into_bytes())
        }
        Format::Json => wire::to_json_pretty(problem),
    }
}

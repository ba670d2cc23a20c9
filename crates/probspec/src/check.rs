use anyhow::Result;
use clap::Args;
use probspec_core::catalog;
use probspec_core::diagnostics::{Diagnostic, DiagnosticCode, Report, Severity};
use probspec_core::document::to_markdown;
use probspec_core::Problem;
use tracing::debug;

use crate::util;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Print the diagnostics report as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn cmd_check(args: CheckArgs) -> Result<std::process::ExitCode> {
    let report = check_catalog();

    if args.json {
        util::print_bytes(&util::json_bytes(&report)?)?;
    } else {
        for d in &report.diagnostics {
            let severity = match d.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            let at = match (d.problem.as_deref(), d.binding.as_deref()) {
                (Some(p), Some(b)) => format!("{p}/{b}"),
                (Some(p), None) => p.to_string(),
                (None, _) => "catalog".to_string(),
            };
            println!("{severity}[{}] {at}: {}", d.code, d.message);
        }
        println!(
            "checked {} problem(s): {} error(s), {} warning(s)",
            report.meta.get("problems").and_then(|v| v.as_u64()).unwrap_or(0),
            report.error_count(),
            report.warning_count()
        );
    }

    if report.ok {
        Ok(std::process::ExitCode::SUCCESS)
    } else {
        Ok(std::process::ExitCode::from(1))
    }
}

pub fn check_catalog() -> Report {
    let mut diagnostics = Vec::new();
    let mut checked = 0u64;
    for id in catalog::ids() {
        match catalog::by_id(id) {
            Some(Ok(problem)) => {
                checked += 1;
                diagnostics.extend(check_problem(&problem));
            }
            Some(Err(err)) => diagnostics.push(
                Diagnostic::new(err.code(), err.message.clone()).with_problem(id),
            ),
            None => {}
        }
    }
    Report::ok()
        .with_diagnostics(diagnostics)
        .with_meta("problems", serde_json::Value::from(checked))
}

pub fn check_problem(problem: &Problem) -> Vec<Diagnostic> {
    let mut out: Vec<Diagnostic> = problem
        .interface()
        .check_length_refs()
        .into_iter()
        .map(|d| d.with_problem(problem.id()))
        .collect();

    for (label, doc) in problem.documents() {
        if let Err(err) = to_markdown(doc) {
            out.push(
                Diagnostic::new(DiagnosticCode::PS0200DocumentRenderingFailure, err.to_string())
                    .with_problem(problem.id())
                    .with_data("document", serde_json::Value::String(label)),
            );
        }
    }
    debug!(problem = problem.id(), diagnostics = out.len(), "checked problem");
    out
}

#[cfg(test)]
mod tests {
    use probspec_core::{
        make_problem, Document, Inline, InterfaceBuilder, Name, Prize, Stage, Ty,
    };

    use super::*;

    #[test]
    fn catalog_is_clean() {
        let report = check_catalog();
        assert!(report.ok, "{:?}", report.diagnostics);
        assert!(report.diagnostics.is_empty());
        assert_eq!(
            report.meta.get("problems").and_then(|v| v.as_u64()),
            Some(catalog::ids().count() as u64)
        );
    }

    #[test]
    fn reports_rendering_failures_and_dangling_lengths() {
        let mut b = InterfaceBuilder::new();
        b.input("x", Ty::array(Ty::uint(8), Name::unscoped("m"))).expect("x");
        let iface = b.combine(|_| Ok(Document::new())).expect("combine");
        let problem = make_problem(
            "Broken",
            Document::new().heading(9, vec![Inline::text("too deep")]),
            Prize::new(1, Stage::Tutorial),
            |_| Document::new(),
            iface,
            |_| Document::new(),
        );

        let diags = check_problem(&problem);
        let codes: Vec<&str> = diags.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["PS0100", "PS0200"]);
        assert_eq!(diags[1].severity, Severity::Error);
        assert_eq!(
            diags[1].data.get("document"),
            Some(&serde_json::Value::String("short_description".to_string()))
        );
        assert!(diags.iter().all(|d| d.problem.as_deref() == Some("broken")));
    }
}

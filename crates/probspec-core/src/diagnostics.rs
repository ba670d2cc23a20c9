use std::collections::BTreeMap;

use probspec_contracts::DIAG_SCHEMA_VERSION;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DiagnosticCode {
    PS0001DuplicateBindingName,
    PS0002ForeignBindingHandle,
    PS0100DanglingLengthReference,
    PS0101LengthReferenceNotInteger,
    PS0200DocumentRenderingFailure,
}

impl DiagnosticCode {
    pub fn code_str(self) -> &'static str {
        match self {
            DiagnosticCode::PS0001DuplicateBindingName => "PS0001",
            DiagnosticCode::PS0002ForeignBindingHandle => "PS0002",
            DiagnosticCode::PS0100DanglingLengthReference => "PS0100",
            DiagnosticCode::PS0101LengthReferenceNotInteger => "PS0101",
            DiagnosticCode::PS0200DocumentRenderingFailure => "PS0200",
        }
    }

    pub fn default_severity(self) -> Severity {
        match self {
            DiagnosticCode::PS0001DuplicateBindingName
            | DiagnosticCode::PS0002ForeignBindingHandle
            | DiagnosticCode::PS0200DocumentRenderingFailure => Severity::Error,
            DiagnosticCode::PS0100DanglingLengthReference
            | DiagnosticCode::PS0101LengthReferenceNotInteger => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    /// Problem id the diagnostic belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    /// Binding the diagnostic points at, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Value>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code_str().to_string(),
            severity: code.default_severity(),
            message: message.into(),
            problem: None,
            binding: None,
            data: BTreeMap::new(),
        }
    }

    pub fn with_binding(mut self, binding: impl Into<String>) -> Self {
        self.binding = Some(binding.into());
        self
    }

    pub fn with_problem(mut self, problem: impl Into<String>) -> Self {
        self.problem = Some(problem.into());
        self
    }

    pub fn with_data(mut self, key: &str, value: Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub schema_version: String,
    pub ok: bool,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, Value>,
}

impl Report {
    pub fn ok() -> Self {
        Self {
            schema_version: DIAG_SCHEMA_VERSION.to_string(),
            ok: true,
            diagnostics: Vec::new(),
            meta: BTreeMap::new(),
        }
    }

    /// Sorts by (problem, binding, code) and recomputes `ok`.
    pub fn with_diagnostics(mut self, mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.sort_by(|a, b| {
            (a.problem.as_deref(), a.binding.as_deref(), a.code.as_str()).cmp(&(
                b.problem.as_deref(),
                b.binding.as_deref(),
                b.code.as_str(),
            ))
        });
        self.ok = !diagnostics.iter().any(|d| d.severity == Severity::Error);
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_meta(mut self, key: &str, value: Value) -> Self {
        self.meta.insert(key.to_string(), value);
        self
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}

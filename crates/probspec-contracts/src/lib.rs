//! Shared, version-pinned schema identifiers.
//!
//! These constants are the single source of truth for schema/version strings that
//! appear in machine-readable output. Consumers compare them verbatim.

pub const PROBLEM_SCHEMA_VERSION: &str = "probspec.problem@0.1.0";
pub const EXPORT_INDEX_SCHEMA_VERSION: &str = "probspec.export.index@0.1.0";
pub const DIAG_SCHEMA_VERSION: &str = "probspec.diag@0.1.0";
pub const CONFIG_SCHEMA_VERSION: &str = "probspec.config@0.1.0";
pub const LIST_REPORT_SCHEMA_VERSION: &str = "probspec.list.report@0.1.0";

pub const PROBLEM_SCHEMA_VERSIONS_SUPPORTED: &[&str] = &[PROBLEM_SCHEMA_VERSION];

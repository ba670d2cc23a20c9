use std::fmt;

use probspec_curves::Curve;
use serde::{Deserialize, Serialize};

use crate::document::Inline;

/// A base name qualified by an optional scope label.
///
/// Several curves reuse the same parameter names (`q`, `r`), so every name
/// carries the scope it lives in. An empty scope means the global scope.
///
/// The base never contains a `.`: constructors treat everything up to the
/// last `.` of the base as further scope, so `Name::unscoped("F.q")` is the
/// same name as `Name::scoped("q", "F")` and the display string parses back
/// to an equal value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Name {
    base: String,
    scope: String,
}

impl Name {
    pub fn scoped(base: impl Into<String>, scope: impl Into<String>) -> Self {
        let base = base.into();
        let scope = scope.into();
        match base.rsplit_once('.') {
            Some((prefix, last)) => Self {
                base: last.to_string(),
                scope: if scope.is_empty() {
                    prefix.to_string()
                } else {
                    format!("{scope}.{prefix}")
                },
            },
            None => Self { base, scope },
        }
    }

    pub fn unscoped(base: impl Into<String>) -> Self {
        Self::scoped(base, "")
    }

    pub fn in_curve(base: impl Into<String>, curve: Curve) -> Self {
        Self::scoped(base, curve.scope_label())
    }

    /// Inverse of the display form: everything before the last `.` is the scope.
    pub fn parse(s: &str) -> Self {
        Self::unscoped(s)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn curve(&self) -> Option<Curve> {
        Curve::from_scope_label(&self.scope)
    }

    pub fn display(&self) -> String {
        self.to_string()
    }

    pub fn to_inline(&self) -> Inline {
        Inline::code(self.display())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope.is_empty() {
            f.write_str(&self.base)
        } else {
            write!(f, "{}.{}", self.scope, self.base)
        }
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.to_string()
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name::parse(&s)
    }
}

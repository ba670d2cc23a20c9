use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::document::{Document, Inline};
use crate::name::Name;
use crate::types::{render_inlines, Ty};
use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingKind {
    Input,
    Output,
}

impl BindingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BindingKind::Input => "input",
            BindingKind::Output => "output",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub kind: BindingKind,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Ty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Document>,
}

impl Binding {
    /// Whether an array length reference points at this binding.
    fn answers_to(&self, name: &Name) -> bool {
        name.scope().is_empty() && name.base() == self.name
    }
}

/// Refers back to a binding declared on an [`InterfaceBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingHandle {
    index: usize,
    name: String,
}

impl BindingHandle {
    /// Unscoped name of the binding, usable as an array length.
    pub fn name(&self) -> Name {
        Name::unscoped(self.name.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildErrorKind {
    DuplicateBindingName,
    ForeignBindingHandle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    pub kind: BuildErrorKind,
    pub message: String,
}

impl BuildError {
    pub fn new(kind: BuildErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub fn code(&self) -> DiagnosticCode {
        match self.kind {
            BuildErrorKind::DuplicateBindingName => DiagnosticCode::PS0001DuplicateBindingName,
            BuildErrorKind::ForeignBindingHandle => DiagnosticCode::PS0002ForeignBindingHandle,
        }
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code().code_str(), self.message)
    }
}

impl std::error::Error for BuildError {}

/// Accumulates inputs and outputs in declaration order.
///
/// Declarations fail fast on a name that is already taken. The first failure
/// is remembered, and [`InterfaceBuilder::combine`] refuses to produce an
/// interface from a builder that saw one.
#[derive(Debug, Default)]
pub struct InterfaceBuilder {
    bindings: Vec<Binding>,
    failure: Option<BuildError>,
}

impl InterfaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&mut self, name: &str, ty: Ty) -> Result<BindingHandle, BuildError> {
        self.declare(BindingKind::Input, name, ty, None)
    }

    pub fn input_with(
        &mut self,
        name: &str,
        ty: Ty,
        note: Document,
    ) -> Result<BindingHandle, BuildError> {
        self.declare(BindingKind::Input, name, ty, Some(note))
    }

    pub fn output(&mut self, name: &str, ty: Ty) -> Result<BindingHandle, BuildError> {
        self.declare(BindingKind::Output, name, ty, None)
    }

    pub fn output_with(
        &mut self,
        name: &str,
        ty: Ty,
        note: Document,
    ) -> Result<BindingHandle, BuildError> {
        self.declare(BindingKind::Output, name, ty, Some(note))
    }

    pub fn declare(
        &mut self,
        kind: BindingKind,
        name: &str,
        ty: Ty,
        note: Option<Document>,
    ) -> Result<BindingHandle, BuildError> {
        if let Some(prev) = self.bindings.iter().find(|b| b.name == name) {
            let err = BuildError::new(
                BuildErrorKind::DuplicateBindingName,
                format!(
                    "binding name {name:?} is already declared as an {}",
                    prev.kind.as_str()
                ),
            );
            warn!(binding = name, kind = kind.as_str(), "duplicate binding name");
            if self.failure.is_none() {
                self.failure = Some(err.clone());
            }
            return Err(err);
        }

        debug!(binding = name, kind = kind.as_str(), tag = ty.tag(), "declared binding");
        let index = self.bindings.len();
        self.bindings.push(Binding {
            kind,
            name: name.to_string(),
            ty,
            note,
        });
        Ok(BindingHandle {
            index,
            name: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Freezes the declarations and attaches the interface description.
    ///
    /// `description` runs after every binding is in place and may render the
    /// types of earlier handles through [`Bindings`]. A handle that was not
    /// issued by this builder fails the whole combine.
    pub fn combine<F>(self, description: F) -> Result<Interface, BuildError>
    where
        F: FnOnce(&Bindings<'_>) -> Result<Document, BuildError>,
    {
        if let Some(err) = self.failure {
            return Err(err);
        }
        let description = description(&Bindings {
            bindings: &self.bindings,
        })?;
        debug!(bindings = self.bindings.len(), "combined interface");
        Ok(Interface {
            bindings: self.bindings,
            description,
        })
    }
}

/// Read-only view of frozen bindings handed to the description closure.
#[derive(Debug, Clone, Copy)]
pub struct Bindings<'a> {
    bindings: &'a [Binding],
}

impl<'a> Bindings<'a> {
    /// The binding `handle` was issued for. Both its position and its name
    /// must match, so handles from another builder are refused.
    pub fn get(&self, handle: &BindingHandle) -> Result<&'a Binding, BuildError> {
        self.bindings
            .get(handle.index)
            .filter(|b| b.name == handle.name)
            .ok_or_else(|| {
                BuildError::new(
                    BuildErrorKind::ForeignBindingHandle,
                    format!(
                        "handle for {:?} (position {}) was not issued by this builder",
                        handle.name, handle.index
                    ),
                )
            })
    }

    pub fn ty(&self, handle: &BindingHandle) -> Result<&'a Ty, BuildError> {
        Ok(&self.get(handle)?.ty)
    }

    /// Rendered type of a binding, ready to splice into a paragraph.
    pub fn render_ty(&self, handle: &BindingHandle) -> Result<Vec<Inline>, BuildError> {
        Ok(render_inlines(self.ty(handle)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InterfaceRecord")]
pub struct Interface {
    bindings: Vec<Binding>,
    description: Document,
}

/// Unchecked wire form of an [`Interface`]. Deserialized interfaces are
/// replayed through [`InterfaceBuilder`] so the same naming rules hold.
#[derive(Deserialize)]
struct InterfaceRecord {
    bindings: Vec<Binding>,
    description: Document,
}

impl TryFrom<InterfaceRecord> for Interface {
    type Error = BuildError;

    fn try_from(record: InterfaceRecord) -> Result<Self, BuildError> {
        let mut b = InterfaceBuilder::new();
        for binding in record.bindings {
            b.declare(binding.kind, &binding.name, binding.ty, binding.note)?;
        }
        b.combine(|_| Ok(record.description))
    }
}

impl Interface {
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn description(&self) -> &Document {
        &self.description
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.name == name)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Binding> {
        self.bindings
            .iter()
            .filter(|b| b.kind == BindingKind::Input)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Binding> {
        self.bindings
            .iter()
            .filter(|b| b.kind == BindingKind::Output)
    }

    /// Every field modulus referenced by any binding.
    pub fn moduli(&self) -> BTreeSet<Name> {
        self.bindings.iter().flat_map(|b| b.ty.moduli()).collect()
    }

    /// Checks that array lengths name a declared unsigned-integer binding.
    ///
    /// The builder does not enforce this; callers decide what to do with the
    /// resulting warnings.
    pub fn check_length_refs(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        for b in &self.bindings {
            for len in b.ty.length_refs() {
                match self.bindings.iter().find(|t| t.answers_to(&len)) {
                    None => out.push(
                        Diagnostic::new(
                            DiagnosticCode::PS0100DanglingLengthReference,
                            format!("array length `{len}` of `{}` names no binding", b.name),
                        )
                        .with_binding(b.name.clone())
                        .with_data("length", serde_json::Value::String(len.display())),
                    ),
                    Some(target) if !target.ty.is_uint() => out.push(
                        Diagnostic::new(
                            DiagnosticCode::PS0101LengthReferenceNotInteger,
                            format!(
                                "array length `{len}` of `{}` names a {} binding, not an unsigned integer",
                                b.name,
                                target.ty.tag()
                            ),
                        )
                        .with_binding(b.name.clone())
                        .with_data("length", serde_json::Value::String(len.display())),
                    ),
                    Some(_) => {}
                }
            }
        }
        out
    }

    /// sha256 over the canonical JSON of the bindings.
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        let bytes = serde_json::to_vec(&self.bindings)?;
        Ok(util::sha256_hex(&bytes))
    }
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::document::{Document, Inline};
use crate::name::Name;

/// Length of an array type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    /// Given at run time by another binding (usually an unsigned integer input).
    Ref(Name),
    Literal(u64),
}

/// Shape of a declared value. The serde form is the wire `TypeDescriptor`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "camelCase")]
pub enum Ty {
    #[serde(rename = "uint")]
    UInt { width: u32 },
    PrimeField { modulus: Name },
    Array {
        element: Box<Ty>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<Length>,
    },
}

impl Ty {
    pub fn uint(width: u32) -> Self {
        Ty::UInt { width }
    }

    pub fn prime_field(modulus: Name) -> Self {
        Ty::PrimeField { modulus }
    }

    pub fn array(element: Ty, length: impl Into<Length>) -> Self {
        Ty::Array {
            element: Box::new(element),
            length: Some(length.into()),
        }
    }

    pub fn unsized_array(element: Ty) -> Self {
        Ty::Array {
            element: Box::new(element),
            length: None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Ty::UInt { .. } => "uint",
            Ty::PrimeField { .. } => "primeField",
            Ty::Array { .. } => "array",
        }
    }

    pub fn is_uint(&self) -> bool {
        matches!(self, Ty::UInt { .. })
    }

    /// Every field modulus mentioned anywhere inside this type.
    pub fn moduli(&self) -> BTreeSet<Name> {
        let mut out = BTreeSet::new();
        self.walk(&mut |ty| {
            if let Ty::PrimeField { modulus } = ty {
                out.insert(modulus.clone());
            }
        });
        out
    }

    /// Every binding name used as an array length inside this type.
    pub fn length_refs(&self) -> Vec<Name> {
        let mut out = Vec::new();
        self.walk(&mut |ty| {
            if let Ty::Array {
                length: Some(Length::Ref(n)),
                ..
            } = ty
            {
                out.push(n.clone());
            }
        });
        out
    }

    fn walk(&self, f: &mut impl FnMut(&Ty)) {
        f(self);
        if let Ty::Array { element, .. } = self {
            element.walk(f);
        }
    }
}

impl From<Name> for Length {
    fn from(name: Name) -> Self {
        Length::Ref(name)
    }
}

impl From<u64> for Length {
    fn from(n: u64) -> Self {
        Length::Literal(n)
    }
}

/// Human-readable rendering of a type as a one-paragraph document.
pub fn render(ty: &Ty) -> Document {
    Document::new().paragraph(render_inlines(ty))
}

/// Same as [`render`] but without block framing, for splicing into prose.
pub fn render_inlines(ty: &Ty) -> Vec<Inline> {
    let mut out = Vec::new();
    push_inlines(&mut out, ty);
    out
}

fn push_inlines(out: &mut Vec<Inline>, ty: &Ty) {
    match ty {
        Ty::UInt { width } => {
            out.push(Inline::text(format!("{width}-bit unsigned integer")));
        }
        Ty::PrimeField { modulus } => {
            out.push(Inline::text("element of the prime field with modulus "));
            out.push(modulus.to_inline());
        }
        Ty::Array { element, length } => {
            match length {
                Some(Length::Ref(n)) => {
                    out.push(Inline::text("array of "));
                    out.push(n.to_inline());
                    out.push(Inline::text(" × "));
                }
                Some(Length::Literal(k)) => {
                    out.push(Inline::text(format!("array of {k} × ")));
                }
                None => out.push(Inline::text("variable-length array of ")),
            }
            push_inlines(out, element);
        }
    }
}

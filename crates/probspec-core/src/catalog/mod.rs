//! Problems published on the challenge site.
//!
//! Each problem declares its interface through [`InterfaceBuilder`] and hands
//! its prose builders a [`ProblemContext`], so every modulus mentioned in the
//! text comes from a declared binding type rather than a hand-written string.

mod curve_operations;
mod extension_arithmetic;
mod field_arithmetic;

use probspec_curves::{Curve, MODULUS_BITS};

use crate::document::{Document, Inline};
use crate::interface::BuildError;
use crate::name::Name;
use crate::problem::{Problem, ProblemContext};
use crate::types::Ty;

type Builder = fn() -> Result<Problem, BuildError>;

const BUILDERS: &[(&str, Builder)] = &[
    ("field-arithmetic", field_arithmetic::problem),
    (
        "quadratic-extension-arithmetic",
        extension_arithmetic::quadratic,
    ),
    ("cubic-extension-arithmetic", extension_arithmetic::cubic),
    ("curve-operations", curve_operations::problem),
];

pub fn ids() -> impl Iterator<Item = &'static str> {
    BUILDERS.iter().map(|(id, _)| *id)
}

pub fn all() -> Result<Vec<Problem>, BuildError> {
    BUILDERS.iter().map(|(_, build)| build()).collect()
}

pub fn by_id(id: &str) -> Option<Result<Problem, BuildError>> {
    BUILDERS
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, build)| build())
}

/// Base-field modulus `q` of `curve`.
pub(crate) fn modulus(curve: Curve) -> Name {
    Name::in_curve("q", curve)
}

pub(crate) fn fq(curve: Curve) -> Ty {
    Ty::prime_field(modulus(curve))
}

/// Element of the degree-`degree` extension of `q`, as its coefficients.
pub(crate) fn fq_ext(curve: Curve, degree: u64) -> Ty {
    Ty::array(fq(curve), degree)
}

/// Shared paragraph on how field elements travel over the wire.
pub(crate) fn element_encoding(ctx: &ProblemContext) -> Document {
    let limbs = MODULUS_BITS.div_ceil(64);
    let mut items = Vec::new();
    for m in &ctx.moduli {
        items.push(vec![
            m.to_inline(),
            Inline::text(format!(
                ": {MODULUS_BITS}-bit prime, {limbs} little-endian 64-bit limbs"
            )),
        ]);
    }
    let doc = Document::new().paragraph(vec![
        Inline::text("Field elements are passed in "),
        Inline::emph("Montgomery form"),
        Inline::text(" with "),
        Inline::math(format!("R = 2^{{{}}}", limbs * 64)),
        Inline::text(". The moduli used by this problem are:"),
    ]);
    if items.is_empty() {
        return doc;
    }
    doc.list(false, items)
}

pub(crate) fn submission_closing(_ctx: &ProblemContext) -> Document {
    Document::new().paragraph(vec![
        Inline::text("Submissions are judged on correctness first and then on running time. "),
        Inline::text("Outputs must use the same encoding as the inputs."),
    ])
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::document::to_markdown;

    #[test]
    fn every_problem_builds_and_matches_its_id() {
        let problems = all().expect("catalog builds");
        assert_eq!(problems.len(), BUILDERS.len());
        for (problem, id) in problems.iter().zip(ids()) {
            assert!(!id.is_empty());
            assert_eq!(problem.id(), id);
        }
        let unique: BTreeSet<&str> = ids().collect();
        assert_eq!(unique.len(), BUILDERS.len());
    }

    #[test]
    fn every_problem_has_clean_length_refs_and_renders() {
        for problem in all().expect("catalog builds") {
            let diags = problem.interface().check_length_refs();
            assert!(diags.is_empty(), "{}: {diags:?}", problem.id());
            problem
                .to_markdown()
                .unwrap_or_else(|e| panic!("{}: {e}", problem.id()));
        }
    }

    #[test]
    fn lookup_by_id() {
        let p = by_id("curve-operations")
            .expect("known id")
            .expect("builds");
        assert_eq!(p.title(), "Curve operations");
        assert!(by_id("nope").is_none());
    }

    #[test]
    fn encoding_lists_only_declared_moduli() {
        let mut ctx = ProblemContext::default();
        ctx.moduli.insert(modulus(Curve::Mnt6));
        let md = to_markdown(&element_encoding(&ctx)).expect("render");
        assert!(md.contains("`MNT6753.q`: 753-bit prime, 12 little-endian 64-bit limbs"));
        assert!(!md.contains("MNT4753"));
        assert!(md.contains("in *Montgomery form* with $R = 2^{768}$"), "{md}");
    }
}

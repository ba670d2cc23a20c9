use probspec_curves::Curve;

use super::{element_encoding, fq_ext, submission_closing};
use crate::document::{Document, Inline};
use crate::interface::{BuildError, InterfaceBuilder};
use crate::problem::{make_problem, Prize, Problem, ProblemContext, Stage};
use crate::types::Ty;

/// Affine point: `[x, y]` over the base field.
fn g1_point(curve: Curve) -> Ty {
    fq_ext(curve, 2)
}

pub(super) fn problem() -> Result<Problem, BuildError> {
    let mut b = InterfaceBuilder::new();
    let n = b.input("n", Ty::uint(64))?;
    let mut handles = Vec::new();
    for curve in Curve::ALL {
        let name = format!("g1_{}", curve.as_str());
        let h = b.input_with(
            &name,
            Ty::array(g1_point(curve), n.name()),
            Document::new().paragraph(vec![
                Inline::text("Points of "),
                Inline::text(curve.scope_label()),
                Inline::text(" G1 in affine coordinates "),
                Inline::math("(x, y)"),
                Inline::text("."),
            ]),
        )?;
        handles.push(h);
    }
    for curve in Curve::ALL {
        b.output(&format!("sum_{}", curve.as_str()), g1_point(curve))?;
    }

    let interface = b.combine(|bs| {
        let mut doc = Document::new();
        for h in &handles {
            let binding = bs.get(h)?;
            let mut inlines = vec![Inline::code(binding.name.clone()), Inline::text(": ")];
            inlines.extend(bs.render_ty(h)?);
            doc = doc.paragraph(inlines);
        }
        Ok(doc.text("Add up the points of each array and return the two sums in affine form."))
    })?;

    Ok(make_problem(
        "Curve operations",
        Document::new().text("Sum long runs of elliptic curve points on both curves of the cycle."),
        Prize::new(1_000, Stage::Stage1),
        background,
        interface,
        submission_closing,
    ))
}

fn background(ctx: &ProblemContext) -> Document {
    let mut doc = Document::new().paragraph(vec![
        Inline::text("Both curves have the short Weierstrass form "),
        Inline::math("y^2 = x^3 + a x + b"),
        Inline::text(". Adding many points is the core of the multi-exponentiation step."),
    ]);
    let curves: Vec<Vec<Inline>> = ctx
        .curves
        .iter()
        .map(|c| {
            vec![
                Inline::strong(c.scope_label()),
                Inline::text(format!(
                    ": scalar field is the base field of {}",
                    c.cycle_partner().scope_label()
                )),
            ]
        })
        .collect();
    if !curves.is_empty() {
        doc = doc.list(false, curves);
    }
    doc.append(element_encoding(ctx))
}

use probspec_curves::Curve;

use super::{element_encoding, fq_ext, modulus, submission_closing};
use crate::document::{Document, Inline};
use crate::interface::{BuildError, InterfaceBuilder};
use crate::problem::{make_problem, Prize, Problem, ProblemContext, Stage};
use crate::types::Ty;

pub(super) fn quadratic() -> Result<Problem, BuildError> {
    extension_problem(
        "Quadratic extension arithmetic",
        Curve::Mnt4,
        r"\alpha^2 = 13",
        Prize::new(750, Stage::Tutorial),
    )
}

pub(super) fn cubic() -> Result<Problem, BuildError> {
    extension_problem(
        "Cubic extension arithmetic",
        Curve::Mnt6,
        r"\alpha^3 = 11",
        Prize::new(750, Stage::Tutorial),
    )
}

fn extension_problem(
    title: &str,
    curve: Curve,
    relation: &'static str,
    prize: Prize,
) -> Result<Problem, BuildError> {
    let degree = u64::from(curve.twist_degree());

    let mut b = InterfaceBuilder::new();
    let n = b.input("n", Ty::uint(64))?;
    let x = b.input_with(
        "x",
        Ty::array(fq_ext(curve, degree), n.name()),
        Document::new().paragraph(vec![
            Inline::text("Each element is given by its "),
            Inline::text(degree.to_string()),
            Inline::text(" coefficients, constant term first."),
        ]),
    )?;
    b.output("out_x", fq_ext(curve, degree))?;

    let interface = b.combine(|bs| {
        let mut inlines = vec![Inline::text("Multiply the elements of "), Inline::code("x")];
        inlines.push(Inline::text(" (an "));
        inlines.extend(bs.render_ty(&x)?);
        inlines.push(Inline::text(") together and return the product."));
        Ok(Document::new().paragraph(inlines))
    })?;

    let background = move |ctx: &ProblemContext| {
        let q = ctx.modulus(curve).cloned().unwrap_or_else(|| modulus(curve));
        Document::new()
            .paragraph(vec![
                Inline::text("The G2 group of "),
                Inline::text(curve.scope_label()),
                Inline::text(" lives over a degree "),
                Inline::text(degree.to_string()),
                Inline::text(" extension of the prime field with modulus "),
                q.to_inline(),
                Inline::text(". Elements are polynomials in "),
                Inline::math(r"\alpha"),
                Inline::text(" of degree below "),
                Inline::text(degree.to_string()),
                Inline::text(", multiplied modulo "),
                Inline::math(relation),
                Inline::text("."),
            ])
            .append(element_encoding(ctx))
    };

    Ok(make_problem(
        title,
        Document::new().paragraph(vec![
            Inline::text("Multiply elements of a degree "),
            Inline::text(degree.to_string()),
            Inline::text(" extension field."),
        ]),
        prize,
        background,
        interface,
        submission_closing,
    ))
}

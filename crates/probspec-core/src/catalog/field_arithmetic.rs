use probspec_curves::Curve;

use super::{element_encoding, fq, submission_closing};
use crate::document::{Document, Inline};
use crate::interface::{BuildError, InterfaceBuilder};
use crate::problem::{make_problem, Prize, Problem, ProblemContext, Stage};
use crate::types::Ty;

pub(super) fn problem() -> Result<Problem, BuildError> {
    let mut b = InterfaceBuilder::new();
    let n = b.input_with(
        "n",
        Ty::uint(64),
        Document::new().text("Number of elements in each of the two input arrays."),
    )?;
    let x = b.input("x", Ty::array(fq(Curve::Mnt4), n.name()))?;
    let y = b.input("y", Ty::array(fq(Curve::Mnt6), n.name()))?;
    b.output_with(
        "out_x",
        fq(Curve::Mnt4),
        Document::new().paragraph(vec![
            Inline::text("The product "),
            Inline::math(r"x_0 \cdot x_1 \cdots x_{n-1}"),
            Inline::text("."),
        ]),
    )?;
    b.output_with(
        "out_y",
        fq(Curve::Mnt6),
        Document::new().paragraph(vec![
            Inline::text("The product "),
            Inline::math(r"y_0 \cdot y_1 \cdots y_{n-1}"),
            Inline::text("."),
        ]),
    )?;

    let interface = b.combine(|bs| {
        let mut first = vec![Inline::code("x"), Inline::text(" is an ")];
        first.extend(bs.render_ty(&x)?);
        first.push(Inline::text(" and "));
        first.push(Inline::code("y"));
        first.push(Inline::text(" is an "));
        first.extend(bs.render_ty(&y)?);
        first.push(Inline::text("."));
        Ok(Document::new().paragraph(first).text(
            "Multiply all the elements of each array together and return the two products.",
        ))
    })?;

    Ok(make_problem(
        "Field arithmetic",
        Document::new().text("Multiply long runs of 753-bit prime field elements on a GPU."),
        Prize::new(500, Stage::Tutorial),
        background,
        interface,
        submission_closing,
    ))
}

fn background(ctx: &ProblemContext) -> Document {
    Document::new()
        .paragraph(vec![
            Inline::text("Every operation of the SNARK prover eventually bottoms out in "),
            Inline::strong("prime field multiplication"),
            Inline::text(". Speeding up this one primitive speeds up everything built on it."),
        ])
        .paragraph(vec![
            Inline::text("A prime field with modulus "),
            Inline::math("q"),
            Inline::text(" is the set "),
            Inline::math(r"\{0, \dots, q - 1\}"),
            Inline::text(" with addition and multiplication taken modulo "),
            Inline::math("q"),
            Inline::text("."),
        ])
        .append(element_encoding(ctx))
}

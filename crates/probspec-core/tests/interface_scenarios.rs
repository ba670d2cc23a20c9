use probspec_core::document::to_markdown;
use probspec_core::{
    catalog, render, wire, BindingKind, BuildErrorKind, Document, InterfaceBuilder, Name, Ty,
};
use probspec_curves::Curve;
use serde_json::json;

fn fq(scope: &str) -> Ty {
    Ty::prime_field(Name::scoped("q", scope))
}

#[test]
fn mnt_cycle_interface_keeps_four_bindings_in_order() {
    let n = Name::unscoped("n");
    let mut b = InterfaceBuilder::new();
    b.input("x", Ty::array(fq("MNT4753"), n.clone())).expect("x");
    b.input("y", Ty::array(fq("MNT6753"), n.clone())).expect("y");
    b.output("out_x", fq("MNT4753")).expect("out_x");
    b.output("out_y", fq("MNT6753")).expect("out_y");
    let iface = b.combine(|_| Ok(Document::new())).expect("combine");

    let got: Vec<(BindingKind, &str)> = iface
        .bindings()
        .iter()
        .map(|b| (b.kind, b.name.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (BindingKind::Input, "x"),
            (BindingKind::Input, "y"),
            (BindingKind::Output, "out_x"),
            (BindingKind::Output, "out_y"),
        ]
    );

    // `n` is never declared: the builder stays permissive, the lint flags it.
    let diags = iface.check_length_refs();
    assert_eq!(diags.len(), 2);
    assert!(diags.iter().all(|d| d.code == "PS0100"));
}

#[test]
fn redeclaring_x_fails_and_keeps_first_binding() {
    let mut b = InterfaceBuilder::new();
    b.input("x", Ty::array(fq("MNT4753"), Name::unscoped("n"))).expect("first x");
    let err = b.input("x", Ty::uint(64)).unwrap_err();
    assert_eq!(err.kind, BuildErrorKind::DuplicateBindingName);
    assert_eq!(err.to_string(), format!("PS0001: {}", err.message));
    assert_eq!(b.len(), 1);
    assert!(b.combine(|_| Ok(Document::new())).is_err());
}

#[test]
fn duplicate_detection_ignores_kind_and_type() {
    let mut b = InterfaceBuilder::new();
    b.output("r", Ty::uint(8)).expect("first r");
    assert!(b.input("r", fq("MNT6753")).is_err());
    assert!(b.output("r", Ty::uint(8)).is_err());
    assert!(b.input("s", Ty::uint(8)).is_ok());
    assert_eq!(b.len(), 2);
}

#[test]
fn array_rendering_is_stable_across_calls() {
    let ty = Ty::array(
        Ty::prime_field(Name::in_curve("q", Curve::Mnt4)),
        Name::unscoped("n"),
    );
    let first = to_markdown(&render(&ty)).expect("render");
    for _ in 0..3 {
        assert_eq!(to_markdown(&render(&ty.clone())).expect("render"), first);
    }
}

#[test]
fn catalog_round_trips_through_wire_records() {
    for problem in catalog::all().expect("catalog") {
        let bytes = wire::to_json_pretty(&problem).expect("encode");
        let record = wire::parse_problem_json(&bytes).expect("parse");
        assert_eq!(record.signature(), wire::signature(problem.interface()));
        assert_eq!(record.id, problem.id());
    }
}

#[test]
fn field_arithmetic_record_shape() {
    let problem = catalog::by_id("field-arithmetic")
        .expect("known")
        .expect("builds");
    let v: serde_json::Value =
        serde_json::from_slice(&wire::to_json_pretty(&problem).expect("encode")).expect("json");
    let bindings = v["interface"]["bindings"].as_array().expect("bindings[]");
    let names: Vec<&str> = bindings
        .iter()
        .map(|b| b["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["n", "x", "y", "out_x", "out_y"]);
    assert_eq!(
        bindings[2]["type"],
        json!({
            "tag": "array",
            "element": {"tag": "primeField", "modulus": "MNT6753.q"},
            "length": {"ref": "n"}
        })
    );
    assert_eq!(bindings[0]["type"], json!({"tag": "uint", "width": 64}));
}

use test_log::test;

use wmcnf::{
    encodings::{
        program::{self, Options},
        Error,
    },
    instances::WeightedCnf,
    models::{BodyLit, GroundProgram},
};
use wmcnf_tools::{assert_prob, count};

fn alarm() -> GroundProgram {
    let mut prog = GroundProgram::new("alarm");
    prog.add_fact("burglary", 0.1);
    prog.add_fact("earthquake", 0.2);
    prog.add_fact("hears", 0.8);
    prog.add_rule("alarm", [BodyLit::pos("burglary")]);
    prog.add_rule("alarm", [BodyLit::pos("earthquake")]);
    prog.add_rule("calls", [BodyLit::pos("alarm"), BodyLit::pos("hears")]);
    prog.add_rule("quiet", [BodyLit::neg("alarm")]);
    prog
}

fn marginal(inst: &WeightedCnf, atom: &str) -> f64 {
    count::marginal(inst, inst.lookup(atom).unwrap()).unwrap()
}

#[test]
fn rules_and_facts() {
    let mut prog = alarm();
    prog.add_query("alarm");
    prog.add_query("calls");
    let inst = program::encode(&prog, &Options::default()).unwrap();
    assert_prob!(count::wmc(&inst), 1.);
    let marginals = count::query_marginals(&inst).unwrap();
    assert_eq!(marginals[0].0, "alarm");
    assert_prob!(marginals[0].1, 0.28);
    assert_prob!(marginals[1].1, 0.28 * 0.8);
    assert_prob!(marginal(&inst, "quiet"), 0.72);
}

#[test]
fn conditioning() {
    let mut prog = alarm();
    prog.observe("alarm", true);
    let inst = program::encode(&prog, &Options::default()).unwrap();
    assert_prob!(count::wmc(&inst), 0.28);
    assert_prob!(marginal(&inst, "burglary"), 0.1 / 0.28);
    assert_prob!(marginal(&inst, "quiet"), 0.);
}

#[test]
fn complete_disjunction() {
    let mut prog = GroundProgram::new("colors");
    prog.add_disjunction([("red", 0.2), ("green", 0.3), ("blue", 0.5)], [])
        .unwrap();
    let inst = program::encode(&prog, &Options::default()).unwrap();
    assert_eq!(inst.n_vars(), 3);
    assert_prob!(count::wmc(&inst), 1.);
    assert_prob!(marginal(&inst, "red"), 0.2);
    assert_prob!(marginal(&inst, "blue"), 0.5);
}

#[test]
fn residual_alternative() {
    let mut prog = GroundProgram::new("residual");
    prog.add_disjunction([("a", 0.2), ("b", 0.3)], []).unwrap();
    prog.add_rule("neither", [BodyLit::neg("a"), BodyLit::neg("b")]);
    let inst = program::encode(&prog, &Options::default()).unwrap();
    assert!(inst.lookup("residual#0").is_some());
    assert_prob!(count::wmc(&inst), 1.);
    assert_prob!(marginal(&inst, "a"), 0.2);
    assert_prob!(marginal(&inst, "neither"), 0.5);
}

#[test]
fn guarded_disjunction() {
    let mut prog = GroundProgram::new("guarded");
    prog.add_fact("toss", 0.5);
    prog.add_disjunction([("x", 0.3), ("y", 0.7)], [BodyLit::pos("toss")])
        .unwrap();
    let inst = program::encode(&prog, &Options::default()).unwrap();
    assert_prob!(count::wmc(&inst), 1.);
    assert_prob!(marginal(&inst, "x"), 0.15);
    assert_prob!(marginal(&inst, "y"), 0.35);
}

#[test]
fn guarded_disjunction_with_residual() {
    let mut prog = GroundProgram::new("guarded");
    prog.add_fact("toss", 0.5);
    prog.add_fact("lucky", 0.4);
    prog.add_disjunction(
        [("x", 0.25), ("y", 0.25)],
        [BodyLit::pos("toss"), BodyLit::neg("lucky")],
    )
    .unwrap();
    prog.add_rule("any", [BodyLit::pos("x")]);
    prog.add_rule("any", [BodyLit::pos("y")]);
    let inst = program::encode(&prog, &Options::default()).unwrap();
    assert_prob!(count::wmc(&inst), 1.);
    assert_prob!(marginal(&inst, "x"), 0.5 * 0.6 * 0.25);
    assert_prob!(marginal(&inst, "any"), 0.5 * 0.6 * 0.5);
}

#[test]
fn certain_facts() {
    let mut prog = GroundProgram::new("certain");
    prog.add_fact("sure", 1.);
    prog.add_rule("also_sure", []);
    prog.add_rule("both", [BodyLit::pos("sure"), BodyLit::pos("also_sure")]);
    let inst = program::encode(&prog, &Options::default()).unwrap();
    assert_prob!(count::wmc(&inst), 1.);
    assert_prob!(marginal(&inst, "both"), 1.);
}

#[test]
fn unresolved_reference() {
    let mut prog = alarm();
    prog.add_rule("panic", [BodyLit::pos("fire")]);
    assert_eq!(
        program::encode(&prog, &Options::default()),
        Err(Error::UnresolvedReference("fire".to_string()))
    );
}

#[test]
fn duplicate_alternative() {
    let mut prog = GroundProgram::new("dup");
    prog.add_disjunction([("a", 0.5)], []).unwrap();
    prog.add_disjunction([("a", 0.5)], []).unwrap();
    assert!(matches!(
        program::encode(&prog, &Options::default()),
        Err(Error::DuplicateVariable(_))
    ));
}

#[test]
fn tolerance() {
    let mut prog = GroundProgram::new("tolerance");
    prog.add_disjunction([("a", 0.5), ("b", 0.500_000_1)], [])
        .unwrap();
    let inst = program::encode(&prog, &Options::default()).unwrap();
    // the excess is within tolerance and no residual is added
    assert_eq!(inst.n_vars(), 2);
    let strict = Options { tolerance: 1e-9 };
    assert!(program::encode(&prog, &strict).is_err());
}

//! # Ground Logic Program Encoding
//!
//! Encodes a [`GroundProgram`] as a weighted CNF.
//!
//! - A probabilistic fact `p::a` is an unconstrained variable with weights
//!   `(p, 1 - p)`.
//! - An annotated disjunction `p1::a1; ...; pn::an :- body` gets pairwise
//!   exclusion over its alternatives. If the probabilities sum to less than
//!   one, a residual alternative carries the remaining mass. If the body is
//!   not empty, a guard variable equivalent to the body is introduced: a
//!   false guard makes all alternatives false, a true guard requires one.
//!   Alternatives have weights `(pi, 1)`.
//! - The rules for a head are collected and the head is made equivalent to
//!   the disjunction of their bodies (Clark's completion). Bodies with more
//!   than one literal get an auxiliary variable if the head has several
//!   rules.
//!
//! Variables for facts, alternatives, residuals and heads are allocated in
//! statement order; guard and auxiliary body variables follow after them.
//!
//! ## Example
//!
//! ```
//! use wmcnf::{
//!     encodings::program::{self, Options},
//!     models::{BodyLit, GroundProgram},
//! };
//!
//! let mut prog = GroundProgram::new("alarm");
//! prog.add_fact("burglary", 0.1);
//! prog.add_fact("earthquake", 0.2);
//! prog.add_rule("alarm", [BodyLit::pos("burglary")]);
//! prog.add_rule("alarm", [BodyLit::pos("earthquake")]);
//! prog.add_query("alarm");
//!
//! let inst = program::encode(&prog, &Options::default()).unwrap();
//! assert_eq!(inst.n_vars(), 3);
//! assert_eq!(inst.queries()[0].id(), 3);
//! ```

use std::fmt;

use crate::{
    encodings::{
        am1::{self, Encode as _},
        reduce, DistributionIssue, EncodeStats, Error,
    },
    instances::{Cnf, KeyedVarManager, ManageVars, WeightedCnf},
    models::{AnnotatedDisjunction, BodyLit, GroundProgram, Statement},
    types::{Formula, Lit, RsHashMap, Var, Weight, WeightTable},
};

/// Options for encoding ground programs
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// How far the probabilities of a disjunction may sum above one, and
    /// below which remaining mass no residual alternative is introduced
    pub tolerance: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self { tolerance: 1e-6 }
    }
}

/// The proposition a variable stands for
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Key {
    /// A ground atom
    Atom(String),
    /// The residual alternative of the disjunction at a statement index
    Residual(usize),
    /// The body of the guarded disjunction at a statement index
    Guard(usize),
    /// One of several bodies of the rules for a head
    Body {
        /// The head atom
        head: String,
        /// The position of the rule among the rules for the head
        idx: usize,
    },
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Atom(atom) => write!(f, "{atom}"),
            Key::Residual(stmt) => write!(f, "residual#{stmt}"),
            Key::Guard(stmt) => write!(f, "guard#{stmt}"),
            Key::Body { head, idx } => write!(f, "{head}#body{idx}"),
        }
    }
}

/// A disjunction group: alternatives that are mutually exclusive and, given
/// the guard, collectively exhaustive
struct Group<'prog> {
    stmt: usize,
    alternatives: Vec<Lit>,
    body: &'prog [BodyLit],
}

/// Clause accumulator for the rules of one head
struct Definition<'prog> {
    head: Var,
    head_name: &'prog str,
    bodies: Vec<&'prog [BodyLit]>,
}

/// Encodes a ground program including its evidence and queries
///
/// # Errors
///
/// - [`Error::DuplicateVariable`] if an atom is declared as a fact or
///   alternative more than once, or is both probabilistic and a rule head,
/// - [`Error::Distribution`] if a probability is outside of `[0, 1]` or the
///   probabilities of a disjunction sum to more than one,
/// - [`Error::UnresolvedReference`] if a body, evidence or a query
///   references an undeclared atom.
pub fn encode(prog: &GroundProgram, opts: &Options) -> Result<WeightedCnf, Error> {
    log::debug!(
        "encoding program `{}` with {} statements",
        prog.name(),
        prog.statements().len()
    );
    let mut var_manager = KeyedVarManager::<Key>::new();
    let mut weights = WeightTable::new();
    let mut groups = vec![];
    let mut definitions: Vec<Definition> = vec![];
    let mut definition_idx: RsHashMap<&str, usize> = RsHashMap::default();

    for (stmt, statement) in prog.statements().iter().enumerate() {
        match statement {
            Statement::Fact(fact) => {
                check_prob(&fact.atom, fact.prob)?;
                let var = var_manager.register(Key::Atom(fact.atom.clone()))?;
                weights.set(var, Weight::new(fact.prob, 1. - fact.prob));
            }
            Statement::Disjunction(ad) => {
                groups.push(allocate_group(
                    stmt,
                    ad,
                    opts.tolerance,
                    &mut var_manager,
                    &mut weights,
                )?);
            }
            Statement::Rule(rule) => match definition_idx.get(rule.head.as_str()) {
                Some(&idx) => definitions[idx].bodies.push(rule.body.as_slice()),
                None => {
                    let head = var_manager.register(Key::Atom(rule.head.clone()))?;
                    definition_idx.insert(&rule.head, definitions.len());
                    definitions.push(Definition {
                        head,
                        head_name: &rule.head,
                        bodies: vec![rule.body.as_slice()],
                    });
                }
            },
        }
    }

    let mut cnf = Cnf::new();
    for group in &groups {
        encode_group(group, &mut cnf, &mut var_manager)?;
    }
    for def in &definitions {
        encode_definition(def, &mut cnf, &mut var_manager)?;
    }

    let mut inst = WeightedCnf::new(cnf, weights, var_manager.n_used());
    inst.add_comment(format!("program {}", prog.name()));
    for (var, key) in var_manager.iter() {
        inst.set_label(var, key.to_string());
    }
    for (atom, value) in prog.evidence() {
        let var = resolve(&var_manager, atom)?;
        inst.add_evidence(var, *value);
    }
    for atom in prog.queries() {
        let var = resolve(&var_manager, atom)?;
        inst.add_query(atom.clone(), var);
    }
    log::debug!(
        "encoded `{}` into {} variables and {} clauses",
        prog.name(),
        EncodeStats::n_vars(&inst),
        inst.n_clauses()
    );
    Ok(inst)
}

fn check_prob(atom: &str, prob: f64) -> Result<(), Error> {
    if (0. ..=1.).contains(&prob) {
        return Ok(());
    }
    Err(Error::Distribution {
        node: atom.to_string(),
        assignment: String::new(),
        issue: DistributionIssue::OutOfRange(atom.to_string(), prob),
    })
}

/// Allocates and weighs the alternatives of a disjunction
fn allocate_group<'prog>(
    stmt: usize,
    ad: &'prog AnnotatedDisjunction,
    tolerance: f64,
    var_manager: &mut KeyedVarManager<Key>,
    weights: &mut WeightTable,
) -> Result<Group<'prog>, Error> {
    let mut alternatives = Vec::with_capacity(ad.alternatives.len() + 1);
    let mut sum = 0.;
    for (atom, prob) in &ad.alternatives {
        let prob = *prob;
        check_prob(atom, prob)?;
        let var = var_manager.register(Key::Atom(atom.clone()))?;
        weights.set(var, Weight::new(prob, 1.));
        alternatives.push(var.pos_lit());
        sum += prob;
    }
    if sum > 1. + tolerance {
        return Err(Error::Distribution {
            node: Key::Residual(stmt).to_string(),
            assignment: String::new(),
            issue: DistributionIssue::Exceeds(sum),
        });
    }
    let residual = 1. - sum;
    if residual > tolerance {
        let var = var_manager.register(Key::Residual(stmt))?;
        log::debug!("adding residual alternative {var} with probability {residual}");
        weights.set(var, Weight::new(residual, 1.));
        alternatives.push(var.pos_lit());
    }
    Ok(Group {
        stmt,
        alternatives,
        body: &ad.body,
    })
}

fn encode_group(
    group: &Group,
    cnf: &mut Cnf,
    var_manager: &mut KeyedVarManager<Key>,
) -> Result<(), Error> {
    let alternatives = &group.alternatives;
    am1::DefAm1::from(alternatives.clone()).encode(cnf, var_manager);
    if group.body.is_empty() {
        cnf.add_clause(alternatives.iter().copied().collect());
        return Ok(());
    }
    let body = resolve_body(var_manager, group.body)?;
    let guard = var_manager.register(Key::Guard(group.stmt))?.pos_lit();
    reduce::reduce(Formula::from(guard).equiv(Formula::cube(body)), cnf)?;
    reduce::reduce(
        Formula::from(guard)
            .negate()
            .implies(Formula::cube(alternatives.iter().map(|&l| !l))),
        cnf,
    )?;
    reduce::reduce(
        Formula::from(guard).implies(Formula::clause(alternatives.iter().copied())),
        cnf,
    )
}

fn encode_definition(
    def: &Definition,
    cnf: &mut Cnf,
    var_manager: &mut KeyedVarManager<Key>,
) -> Result<(), Error> {
    let head = Formula::from(def.head.pos_lit());
    if def.bodies.iter().any(|body| body.is_empty()) {
        for body in &def.bodies {
            resolve_body(var_manager, body)?;
        }
        log::trace!("`{}` has an empty body and is certain", def.head_name);
        return reduce::reduce(head.equiv(Formula::And(vec![])), cnf);
    }
    if let [body] = def.bodies.as_slice() {
        let body = resolve_body(var_manager, body)?;
        return reduce::reduce(head.equiv(Formula::cube(body)), cnf);
    }
    let mut disjuncts = Vec::with_capacity(def.bodies.len());
    for (idx, body) in def.bodies.iter().enumerate() {
        let body = resolve_body(var_manager, body)?;
        if let [lit] = body.as_slice() {
            disjuncts.push(*lit);
            continue;
        }
        let aux = var_manager
            .register(Key::Body {
                head: def.head_name.to_string(),
                idx,
            })?
            .pos_lit();
        reduce::reduce(Formula::from(aux).equiv(Formula::cube(body)), cnf)?;
        disjuncts.push(aux);
    }
    reduce::reduce(head.equiv(Formula::clause(disjuncts)), cnf)
}

fn resolve(var_manager: &KeyedVarManager<Key>, atom: &str) -> Result<Var, Error> {
    var_manager
        .get(&Key::Atom(atom.to_string()))
        .ok_or_else(|| Error::UnresolvedReference(atom.to_string()))
}

fn resolve_body(var_manager: &KeyedVarManager<Key>, body: &[BodyLit]) -> Result<Vec<Lit>, Error> {
    body.iter()
        .map(|lit| resolve(var_manager, &lit.atom).map(|var| var.lit(lit.positive)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{encode, Key, Options};
    use crate::{
        clause,
        encodings::{DistributionIssue, Error},
        instances::DuplicateVariable,
        models::{BodyLit, GroundProgram},
        types::Weight,
        var,
    };

    #[test]
    fn facts() {
        let mut prog = GroundProgram::new("facts");
        prog.add_fact("a", 0.25);
        prog.add_fact("b", 1.);
        let inst = encode(&prog, &Options::default()).unwrap();
        assert_eq!(inst.n_vars(), 2);
        assert!(inst.cnf().is_empty());
        assert_eq!(inst.weights().get(var![0]), Weight::new(0.25, 0.75));
        assert_eq!(inst.weights().get(var![1]), Weight::new(1., 0.));
    }

    #[test]
    fn single_rule() {
        let mut prog = GroundProgram::new("rule");
        prog.add_fact("a", 0.5);
        prog.add_fact("b", 0.5);
        prog.add_rule("c", [BodyLit::pos("a"), BodyLit::neg("b")]);
        let inst = encode(&prog, &Options::default()).unwrap();
        assert_eq!(inst.n_vars(), 3);
        let cnf = inst.cnf();
        assert_eq!(cnf.len(), 3);
        assert_eq!(cnf[0], clause![!var![2].pos_lit(), var![0].pos_lit()]);
        assert_eq!(cnf[1], clause![!var![2].pos_lit(), var![1].neg_lit()]);
        assert_eq!(
            cnf[2],
            clause![var![0].neg_lit(), var![1].pos_lit(), var![2].pos_lit()]
        );
        assert_eq!(inst.weights().get(var![2]), Weight::NEUTRAL);
    }

    #[test]
    fn several_rules() {
        let mut prog = GroundProgram::new("rules");
        prog.add_fact("a", 0.5);
        prog.add_fact("b", 0.5);
        prog.add_rule("c", [BodyLit::pos("a"), BodyLit::pos("b")]);
        prog.add_rule("c", [BodyLit::neg("a")]);
        let inst = encode(&prog, &Options::default()).unwrap();
        // a, b, c, auxiliary for the first body
        assert_eq!(inst.n_vars(), 4);
        assert_eq!(inst.lookup("c#body0"), Some(var![3]));
        // aux <-> (a & b): 3 clauses, c <-> (aux | ~a): 3 clauses
        assert_eq!(inst.cnf().len(), 6);
        assert_eq!(
            inst.cnf()[3],
            clause![var![2].neg_lit(), var![3].pos_lit(), var![0].neg_lit()]
        );
    }

    #[test]
    fn empty_body() {
        let mut prog = GroundProgram::new("certain");
        prog.add_fact("a", 0.5);
        prog.add_rule("b", [BodyLit::pos("a")]);
        prog.add_rule("b", []);
        let inst = encode(&prog, &Options::default()).unwrap();
        assert_eq!(inst.cnf().len(), 1);
        assert_eq!(inst.cnf()[0], clause![var![1].pos_lit()]);
    }

    #[test]
    fn unguarded_disjunction() {
        let mut prog = GroundProgram::new("ad");
        prog.add_disjunction([("x", 0.5), ("y", 0.25)], []).unwrap();
        let inst = encode(&prog, &Options::default()).unwrap();
        assert_eq!(inst.n_vars(), 3);
        assert_eq!(inst.lookup("residual#0"), Some(var![2]));
        assert_eq!(inst.weights().get(var![0]), Weight::new(0.5, 1.));
        assert_eq!(inst.weights().get(var![2]), Weight::new(0.25, 1.));
        // three exclusions and one at-least-one clause
        assert_eq!(inst.cnf().len(), 4);
        assert_eq!(
            inst.cnf()[3],
            clause![var![0].pos_lit(), var![1].pos_lit(), var![2].pos_lit()]
        );
    }

    #[test]
    fn complete_disjunction_has_no_residual() {
        let mut prog = GroundProgram::new("ad");
        prog.add_disjunction([("x", 0.5), ("y", 0.5)], []).unwrap();
        let inst = encode(&prog, &Options::default()).unwrap();
        assert_eq!(inst.n_vars(), 2);
    }

    #[test]
    fn guarded_disjunction() {
        let mut prog = GroundProgram::new("ad");
        prog.add_fact("g", 0.5);
        prog.add_disjunction([("x", 0.5), ("y", 0.5)], [BodyLit::pos("g")])
            .unwrap();
        let inst = encode(&prog, &Options::default()).unwrap();
        assert_eq!(inst.n_vars(), 4);
        assert_eq!(inst.lookup("guard#1"), Some(var![3]));
        // exclusion, guard equivalence (2), not guard -> none (2), guard -> some
        assert_eq!(inst.cnf().len(), 6);
        assert_eq!(
            inst.cnf()[3],
            clause![var![3].pos_lit(), var![1].neg_lit()]
        );
        assert_eq!(
            inst.cnf()[5],
            clause![var![3].neg_lit(), var![1].pos_lit(), var![2].pos_lit()]
        );
    }

    #[test]
    fn evidence_and_queries() {
        let mut prog = GroundProgram::new("q");
        prog.add_fact("a", 0.5);
        prog.observe("a", false);
        prog.add_query("a");
        let inst = encode(&prog, &Options::default()).unwrap();
        assert_eq!(inst.cnf()[0], clause![var![0].neg_lit()]);
        assert_eq!(inst.queries()[0].id(), 1);
        prog.add_query("b");
        assert_eq!(
            encode(&prog, &Options::default()),
            Err(Error::UnresolvedReference("b".to_string()))
        );
    }

    #[test]
    fn unresolved_body() {
        let mut prog = GroundProgram::new("unresolved");
        prog.add_rule("a", [BodyLit::pos("b")]);
        assert_eq!(
            encode(&prog, &Options::default()),
            Err(Error::UnresolvedReference("b".to_string()))
        );
    }

    #[test]
    fn unresolved_body_of_certain_head() {
        let mut prog = GroundProgram::new("unresolved");
        prog.add_rule("b", [BodyLit::pos("fire")]);
        prog.add_rule("b", []);
        assert_eq!(
            encode(&prog, &Options::default()),
            Err(Error::UnresolvedReference("fire".to_string()))
        );
    }

    #[test]
    fn fact_and_head() {
        let mut prog = GroundProgram::new("dup");
        prog.add_fact("a", 0.5);
        prog.add_rule("a", []);
        assert_eq!(
            encode(&prog, &Options::default()),
            Err(Error::DuplicateVariable(DuplicateVariable(
                Key::Atom("a".to_string()).to_string()
            )))
        );
    }

    #[test]
    fn invalid_probabilities() {
        let mut prog = GroundProgram::new("bad");
        prog.add_disjunction([("x", 0.75), ("y", 0.5)], []).unwrap();
        assert!(matches!(
            encode(&prog, &Options::default()),
            Err(Error::Distribution {
                issue: DistributionIssue::Exceeds(_),
                ..
            })
        ));
        let mut prog = GroundProgram::new("bad");
        prog.add_fact("a", 1.25);
        assert!(matches!(
            encode(&prog, &Options::default()),
            Err(Error::Distribution {
                issue: DistributionIssue::OutOfRange(..),
                ..
            })
        ));
    }
}

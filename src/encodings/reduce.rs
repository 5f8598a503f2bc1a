//! # Structural CNF Reduction
//!
//! Rewrites the formulas produced by the constraint generators into clauses.
//! Only the shapes the generators emit are supported:
//!
//! - `A <-> B` becomes `(A -> B) & (B -> A)`,
//! - `X -> (C1 & ... & Cm)` becomes `(X -> C1) & ... & (X -> Cm)`,
//! - `(A1 | ... | An) -> C` becomes `(A1 -> C) & ... & (An -> C)`,
//! - `(L1 & ... & Ln) -> (R1 | ... | Rm)` over literals becomes the single
//!   clause `(~L1 | ... | ~Ln | R1 | ... | Rm)`.
//!
//! Negations are pushed onto literals. No simplification or deduplication is
//! performed, so the clause order follows the formula structure exactly.

use crate::{
    encodings::{atomics, CollectClauses, Error},
    instances::Cnf,
    types::{Formula, Lit},
};

/// Reduces a formula to clauses and adds them to the collector
///
/// # Errors
///
/// [`Error::UnsupportedShape`] if the formula is not of a shape listed in the
/// module documentation. Nothing is added to the collector in that case.
pub fn reduce<Col>(formula: Formula, collector: &mut Col) -> Result<(), Error>
where
    Col: CollectClauses,
{
    let mut cnf = Cnf::new();
    reduce_into(formula, &mut cnf)?;
    collector.extend(cnf);
    Ok(())
}

/// Reduces a formula to a fresh [`Cnf`]
///
/// # Errors
///
/// [`Error::UnsupportedShape`], see [`reduce`].
pub fn to_cnf(formula: Formula) -> Result<Cnf, Error> {
    let mut cnf = Cnf::new();
    reduce_into(formula, &mut cnf)?;
    Ok(cnf)
}

fn reduce_into(formula: Formula, cnf: &mut Cnf) -> Result<(), Error> {
    match formula {
        Formula::Equiv(lhs, rhs) => {
            reduce_impl((*lhs).clone(), (*rhs).clone(), cnf)?;
            reduce_impl(*rhs, *lhs, cnf)
        }
        Formula::Implies(lhs, rhs) => reduce_impl(*lhs, *rhs, cnf),
        Formula::And(subs) => subs.into_iter().try_for_each(|sub| reduce_into(sub, cnf)),
        Formula::Not(sub) if is_literal_connective(&sub) => reduce_into(push_negation(*sub), cnf),
        clause => {
            cnf.add_clause(as_clause(clause)?.into_iter().collect());
            Ok(())
        }
    }
}

fn reduce_impl(lhs: Formula, rhs: Formula, cnf: &mut Cnf) -> Result<(), Error> {
    match (lhs, rhs) {
        (lhs, Formula::And(subs)) => subs
            .into_iter()
            .try_for_each(|sub| reduce_impl(lhs.clone(), sub, cnf)),
        (Formula::Or(subs), rhs) => subs
            .into_iter()
            .try_for_each(|sub| reduce_impl(sub, rhs.clone(), cnf)),
        (Formula::Not(sub), rhs) if is_literal_connective(&sub) => {
            reduce_impl(push_negation(*sub), rhs, cnf)
        }
        (lhs, Formula::Not(sub)) if is_literal_connective(&sub) => {
            reduce_impl(lhs, push_negation(*sub), cnf)
        }
        (lhs, rhs) => {
            let cube = as_cube(lhs)?;
            let clause = as_clause(rhs)?;
            cnf.add_clause(atomics::cube_impl_clause(&cube, &clause));
            Ok(())
        }
    }
}

/// Whether negations can be pushed through the top connective
fn is_literal_connective(formula: &Formula) -> bool {
    !matches!(formula, Formula::Implies(..) | Formula::Equiv(..))
}

/// Negates a formula, moving the negation one level inwards
fn push_negation(formula: Formula) -> Formula {
    match formula {
        Formula::Lit(l) => Formula::Lit(!l),
        Formula::Not(sub) => *sub,
        Formula::And(subs) => Formula::Or(subs.into_iter().map(push_negation).collect()),
        Formula::Or(subs) => Formula::And(subs.into_iter().map(push_negation).collect()),
        other => Formula::Not(Box::new(other)),
    }
}

/// Flattens a conjunction of literals
fn as_cube(formula: Formula) -> Result<Vec<Lit>, Error> {
    match formula {
        Formula::Lit(l) => Ok(vec![l]),
        Formula::And(subs) => {
            let mut lits = Vec::with_capacity(subs.len());
            for sub in subs {
                lits.extend(as_cube(sub)?);
            }
            Ok(lits)
        }
        Formula::Not(sub) if is_literal_connective(&sub) => as_cube(push_negation(*sub)),
        other => Err(Error::UnsupportedShape(format!(
            "expected a conjunction of literals, found {other}"
        ))),
    }
}

/// Flattens a disjunction of literals
fn as_clause(formula: Formula) -> Result<Vec<Lit>, Error> {
    match formula {
        Formula::Lit(l) => Ok(vec![l]),
        Formula::Or(subs) => {
            let mut lits = Vec::with_capacity(subs.len());
            for sub in subs {
                lits.extend(as_clause(sub)?);
            }
            Ok(lits)
        }
        Formula::Not(sub) if is_literal_connective(&sub) => as_clause(push_negation(*sub)),
        other => Err(Error::UnsupportedShape(format!(
            "expected a disjunction of literals, found {other}"
        ))),
    }
}

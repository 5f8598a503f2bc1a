//! # Exact Weighted Model Counting
//!
//! Enumerates assignments in variable order and prunes as soon as a clause
//! is falsified. Only suitable for instances with few unconstrained
//! variables.

use anyhow::{bail, Context};
use wmcnf::{
    instances::WeightedCnf,
    types::{Lit, Var},
};

/// Computes the weighted model count of an instance
#[must_use]
pub fn wmc(inst: &WeightedCnf) -> f64 {
    wmc_given(inst, &[])
}

/// Computes the weighted model count of an instance restricted to models
/// satisfying the given literals
#[must_use]
pub fn wmc_given(inst: &WeightedCnf, assumptions: &[Lit]) -> f64 {
    let mut assignment = vec![None; inst.n_vars() as usize];
    let mut counter = Counter {
        inst,
        assumptions,
        assignment: &mut assignment,
        nodes: 0,
    };
    let count = counter.count(0);
    log::trace!("counted {count} visiting {} nodes", counter.nodes);
    count
}

/// Computes the conditional probability of a variable being true given the
/// evidence encoded in the instance
///
/// # Errors
///
/// If the evidence has probability zero.
pub fn marginal(inst: &WeightedCnf, var: Var) -> anyhow::Result<f64> {
    let total = wmc(inst);
    if total <= 0. {
        bail!("evidence has probability zero");
    }
    Ok(wmc_given(inst, &[var.pos_lit()]) / total)
}

/// Computes the marginal of every declared query
///
/// # Errors
///
/// If the evidence has probability zero.
pub fn query_marginals(inst: &WeightedCnf) -> anyhow::Result<Vec<(String, f64)>> {
    inst.queries()
        .iter()
        .map(|q| {
            let prob = marginal(inst, q.var).with_context(|| format!("query `{}`", q.label))?;
            Ok((q.label.clone(), prob))
        })
        .collect()
}

struct Counter<'a> {
    inst: &'a WeightedCnf,
    assumptions: &'a [Lit],
    assignment: &'a mut [Option<bool>],
    nodes: usize,
}

impl Counter<'_> {
    fn count(&mut self, next: usize) -> f64 {
        self.nodes += 1;
        if self.falsified() {
            return 0.;
        }
        if next == self.assignment.len() {
            return 1.;
        }
        let var = Var::new(u32::try_from(next).expect("too many variables"));
        let weight = self.inst.weights().get(var);
        let mut total = 0.;
        for value in [true, false] {
            self.assignment[next] = Some(value);
            let sub = self.count(next + 1);
            total += weight.of(value) * sub;
        }
        self.assignment[next] = None;
        total
    }

    fn value(&self, lit: Lit) -> Option<bool> {
        self.assignment[lit.vidx()].map(|val| val == lit.is_pos())
    }

    /// Checks whether some clause or assumption is false under the current
    /// partial assignment
    fn falsified(&self) -> bool {
        self.assumptions
            .iter()
            .any(|&lit| self.value(lit) == Some(false))
            || self
                .inst
                .cnf()
                .iter()
                .any(|cl| cl.iter().all(|&lit| self.value(lit) == Some(false)))
    }
}

#[cfg(test)]
mod tests {
    use wmcnf::{
        clause,
        instances::{Cnf, WeightedCnf},
        lit,
        types::{Weight, WeightTable},
        var,
    };

    use crate::assert_prob;

    #[test]
    fn independent_coins() {
        let mut weights = WeightTable::new();
        weights.set(var![0], Weight::new(0.3, 0.7));
        weights.set(var![1], Weight::new(0.6, 0.4));
        let inst = WeightedCnf::new(Cnf::new(), weights, 2);
        assert_prob!(super::wmc(&inst), 1.);
        assert_prob!(super::marginal(&inst, var![1]).unwrap(), 0.6);
    }

    #[test]
    fn constrained() {
        let mut cnf = Cnf::new();
        cnf.add_clause(clause![lit![0], lit![1]]);
        let mut weights = WeightTable::new();
        weights.set(var![0], Weight::new(0.5, 0.5));
        weights.set(var![1], Weight::new(0.5, 0.5));
        let inst = WeightedCnf::new(cnf, weights, 2);
        assert_prob!(super::wmc(&inst), 0.75);
        assert_prob!(super::wmc_given(&inst, &[!lit![0]]), 0.25);
        assert_prob!(super::marginal(&inst, var![0]).unwrap(), 2. / 3.);
    }

    #[test]
    fn zero_evidence() {
        let mut cnf = Cnf::new();
        cnf.add_clause(clause![lit![0]]);
        cnf.add_clause(clause![!lit![0]]);
        let inst = WeightedCnf::new(cnf, WeightTable::new(), 1);
        assert!(super::marginal(&inst, var![0]).is_err());
    }
}

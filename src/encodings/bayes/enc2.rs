//! # Stick-Breaking Parameters
//!
//! For a node with states `s0, ..., s(k-1)` and a parent assignment `u`, the
//! parameter variables `p0, ..., p(k-2)` of the row select the state: the
//! node is in state `si` if `u` holds, `p0, ..., p(i-1)` are false and `pi`
//! is true. If all of them are false, the node is in the last state.
//!
//! `pi` has positive weight `P(si | u) / (1 - P(s0 | u) - ... - P(s(i-1) | u))`
//! and negative weight one minus that, so both weights of a parameter that
//! does not influence the state sum to one.

use crate::{
    encodings::{reduce, Error},
    instances::Cnf,
    models::{BayesNet, Node},
    types::{Formula, Weight, WeightTable},
    utils,
};

use super::NodeVars;

pub(super) fn constraints(
    node: &Node,
    node_vars: &NodeVars,
    vars: &[NodeVars],
    cnf: &mut Cnf,
) -> Result<(), Error> {
    let radices = node.cpd().parent_radices();
    let last = node.n_states() - 1;
    for (row, assignment) in utils::assignments(radices).enumerate() {
        let parents = super::parent_lits(node, vars, &assignment);
        for state in 0..=last {
            let mut cube = parents.clone();
            cube.extend((0..state).map(|earlier| node_vars.param(earlier, row).neg_lit()));
            if state < last {
                cube.push(node_vars.param(state, row).pos_lit());
            }
            let selected = Formula::from(node_vars.indicator(state));
            reduce::reduce(Formula::cube(cube).implies(selected), cnf)?;
        }
    }
    Ok(())
}

pub(super) fn weights(
    net: &BayesNet,
    node: &Node,
    node_vars: &NodeVars,
    tolerance: f64,
    weights: &mut WeightTable,
) -> Result<(), Error> {
    let radices = node.cpd().parent_radices();
    for (row, assignment) in utils::assignments(radices).enumerate() {
        let probs = super::checked_row(net, node, &assignment, tolerance)?;
        let mut used = 0.;
        for (state, &prob) in probs[..probs.len() - 1].iter().enumerate() {
            weights.set(node_vars.param(state, row), stick_weight(prob, 1. - used));
            if 1. - used <= 0. {
                log::warn!(
                    "no probability mass left for state `{}` of `{}`",
                    node.states()[state],
                    node.name()
                );
            }
            used += prob;
        }
    }
    Ok(())
}

/// The weight of a parameter given the remaining probability mass. Without
/// remaining mass the state is unreachable and the weight is `(0, 1)`.
fn stick_weight(prob: f64, remaining: f64) -> Weight {
    if remaining <= 0. {
        return Weight::new(0., 1.);
    }
    let ratio = (prob / remaining).min(1.);
    Weight::new(ratio, 1. - ratio)
}

#[cfg(test)]
mod tests {
    use super::stick_weight;
    use crate::types::Weight;

    #[test]
    fn stick_breaking() {
        assert_eq!(stick_weight(0.25, 1.), Weight::new(0.25, 0.75));
        assert_eq!(stick_weight(0.25, 0.5), Weight::new(0.5, 0.5));
        assert_eq!(stick_weight(0.3, 0.), Weight::new(0., 1.));
        assert_eq!(stick_weight(0.1, -1e-17), Weight::new(0., 1.));
        // rounding residue never pushes a weight above one
        assert_eq!(stick_weight(0.5, 0.499_999_999), Weight::new(1., 0.));
    }
}

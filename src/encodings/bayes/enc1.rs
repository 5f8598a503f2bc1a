//! # Parameter Equivalences
//!
//! Every table entry `P(x | u)` has a parameter variable that is equivalent
//! to the conjunction of the indicator of `x` and the indicators of the
//! parent assignment `u`. Its positive literal carries the probability.

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
    for state in 0..node.n_states() {
        for (row, assignment) in utils::assignments(radices).enumerate() {
            let mut cube = vec![node_vars.indicator(state)];
            cube.extend(super::parent_lits(node, vars, &assignment));
            let param = node_vars.param(state, row).pos_lit();
            reduce::reduce(Formula::cube(cube).equiv(param.into()), cnf)?;
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
        for (state, prob) in probs.into_iter().enumerate() {
            weights.set(node_vars.param(state, row), Weight::new(prob, 1.));
        }
    }
    Ok(())
}


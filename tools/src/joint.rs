//! # Inference by Enumeration
//!
//! Computes probabilities of a [`BayesNet`] directly from its joint
//! distribution, as a reference for the weighted model counts of encodings.

use anyhow::Context;
use wmcnf::models::BayesNet;

/// Computes the probability of the network's evidence together with the
/// given node states
///
/// # Errors
///
/// If a node or state is unknown or a table entry is missing.
pub fn probability(net: &BayesNet, fixed: &[(&str, &str)]) -> anyhow::Result<f64> {
    let mut constraints: Vec<Option<usize>> = vec![None; net.len()];
    let all = net
        .evidence()
        .iter()
        .map(|(n, s)| (n.as_str(), s.as_str()))
        .chain(fixed.iter().copied());
    for (node, state) in all {
        let id = net.find(node).with_context(|| format!("unknown node `{node}`"))?;
        let state_idx = net
            .node(id)
            .and_then(|n| n.state_idx(state))
            .with_context(|| format!("unknown state `{state}` of `{node}`"))?;
        if constraints[id.idx()].is_some_and(|other| other != state_idx) {
            return Ok(0.);
        }
        constraints[id.idx()] = Some(state_idx);
    }
    let mut assignment = Vec::with_capacity(net.len());
    sum_joint(net, &constraints, &mut assignment)
}

/// Computes `P(node = state | evidence)`
///
/// # Errors
///
/// If the evidence has probability zero, or see [`probability`].
pub fn marginal(net: &BayesNet, node: &str, state: &str) -> anyhow::Result<f64> {
    let evidence = probability(net, &[])?;
    if evidence <= 0. {
        anyhow::bail!("evidence has probability zero");
    }
    Ok(probability(net, &[(node, state)])? / evidence)
}

fn sum_joint(
    net: &BayesNet,
    constraints: &[Option<usize>],
    assignment: &mut Vec<usize>,
) -> anyhow::Result<f64> {
    let idx = assignment.len();
    let Some(node) = net.nodes().get(idx) else {
        return Ok(1.);
    };
    let parents: Vec<_> = node.parents().iter().map(|p| assignment[p.idx()]).collect();
    let mut total = 0.;
    for state in 0..node.n_states() {
        if constraints[idx].is_some_and(|fixed| fixed != state) {
            continue;
        }
        let prob = node
            .cpd()
            .prob(state, &parents)
            .with_context(|| format!("missing entry for `{}`", node.name()))?;
        assignment.push(state);
        total += prob * sum_joint(net, constraints, assignment)?;
        assignment.pop();
    }
    Ok(total)
}

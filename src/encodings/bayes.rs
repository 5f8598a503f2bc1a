//! # Bayesian Network Encodings
//!
//! Encodes a [`BayesNet`] as a weighted CNF whose weighted model count is the
//! probability of the evidence. Every node gets one indicator variable per
//! state, constrained so that exactly one holds, and parameter variables that
//! select rows of its conditional probability table and carry their weights.
//!
//! Two parameterizations are available, see [`Encoding`].
//!
//! Variables are allocated node by node: first the indicators in state order,
//! then the parameters with the node's own state varying slowest and the last
//! parent varying fastest.
//!
//! ## Example
//!
//! ```
//! use wmcnf::{
//!     encodings::bayes::{self, Encoding, Options},
//!     models::BayesNet,
//! };
//!
//! let mut net = BayesNet::new("ab");
//! let a = net.add_node("A", ["a0", "a1"], &[]).unwrap();
//! let b = net.add_node("B", ["b0", "b1"], &["A"]).unwrap();
//! net.set_table(a, &[0.3, 0.7]).unwrap();
//! net.set_table(b, &[0.9, 0.1, 0.2, 0.8]).unwrap();
//!
//! let enc1 = bayes::encode(&net, &Options::default()).unwrap();
//! assert_eq!(enc1.n_vars(), 10);
//! let enc2 = bayes::encode(&net, &Options::with_encoding(Encoding::Enc2)).unwrap();
//! assert_eq!(enc2.n_vars(), 7);
//! ```
//!
//! ## References
//!
//! - Mark Chavira and Adnan Darwiche: _On probabilistic inference by weighted
//!   model counting_, AIJ 2008.

use std::fmt;

use itertools::Itertools;

use crate::{
    encodings::{am1, DistributionIssue, EncodeStats, Error},
    instances::{Cnf, KeyedVarManager, ManageVars, WeightedCnf},
    models::{BayesNet, Node},
    types::{Lit, Var, WeightTable},
    utils,
};

mod enc1;
mod enc2;

/// The parameterization of the conditional probability tables
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// One parameter variable per table entry, equivalent to the conjunction
    /// of the indicators of its row
    #[default]
    Enc1,
    /// No parameter variable for the last state of a node. The state is
    /// selected by the first true parameter variable of a row (stick
    /// breaking), saving one variable per row.
    Enc2,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Enc1 => write!(f, "enc1"),
            Encoding::Enc2 => write!(f, "enc2"),
        }
    }
}

/// Options for encoding Bayesian networks
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// The parameterization to use
    pub encoding: Encoding,
    /// How far the probabilities of a table row may sum away from one
    pub tolerance: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            tolerance: 1e-6,
        }
    }
}

impl Options {
    /// Default options with a given parameterization
    #[must_use]
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            encoding,
            ..Default::default()
        }
    }
}

/// The proposition a variable stands for
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Key {
    /// Node `node` is in state `state`
    Indicator {
        /// Node name
        node: String,
        /// State name
        state: String,
    },
    /// Selector of the table entry `P(node = state | parents)`
    Parameter {
        /// Node name
        node: String,
        /// State name
        state: String,
        /// Parent names and their states
        parents: Vec<(String, String)>,
    },
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Indicator { node, state } => write!(f, "{node}={state}"),
            Key::Parameter {
                node,
                state,
                parents,
            } if parents.is_empty() => write!(f, "theta({node}={state})"),
            Key::Parameter {
                node,
                state,
                parents,
            } => write!(
                f,
                "theta({node}={state} | {})",
                parents
                    .iter()
                    .format_with(", ", |(p, s), f| f(&format_args!("{p}={s}")))
            ),
        }
    }
}

/// The variables allocated for one node
#[derive(Debug, Clone)]
struct NodeVars {
    indicators: Vec<Var>,
    /// Parameters of the states that have one, state-major
    params: Vec<Var>,
    n_rows: usize,
}

impl NodeVars {
    fn indicator(&self, state: usize) -> Lit {
        self.indicators[state].pos_lit()
    }

    fn param(&self, state: usize, row: usize) -> Var {
        self.params[state * self.n_rows + row]
    }
}

/// Encodes a Bayesian network including its evidence and queries
///
/// # Errors
///
/// - [`Error::DuplicateVariable`] if two nodes share a name,
/// - [`Error::Distribution`] if a table row is incomplete, has entries
///   outside of `[0, 1]` or does not sum to one,
/// - [`Error::UnknownState`] if evidence or a query names an unknown node
///   or state.
pub fn encode(net: &BayesNet, opts: &Options) -> Result<WeightedCnf, Error> {
    log::debug!(
        "encoding network `{}` with {} nodes using {}",
        net.name(),
        net.len(),
        opts.encoding
    );
    let mut var_manager = KeyedVarManager::<Key>::new();
    let vars = net
        .nodes()
        .iter()
        .map(|node| allocate(net, node, opts.encoding, &mut var_manager))
        .collect::<Result<Vec<_>, _>>()?;

    let mut cnf = Cnf::new();
    for (node, node_vars) in net.nodes().iter().zip(&vars) {
        let indicators: Vec<_> = node_vars.indicators.iter().map(|v| v.pos_lit()).collect();
        am1::exactly_one(&indicators, &mut cnf, &mut var_manager);
        match opts.encoding {
            Encoding::Enc1 => enc1::constraints(node, node_vars, &vars, &mut cnf)?,
            Encoding::Enc2 => enc2::constraints(node, node_vars, &vars, &mut cnf)?,
        }
    }

    let mut weights = WeightTable::with_vars(var_manager.n_used());
    for (node, node_vars) in net.nodes().iter().zip(&vars) {
        match opts.encoding {
            Encoding::Enc1 => enc1::weights(net, node, node_vars, opts.tolerance, &mut weights)?,
            Encoding::Enc2 => enc2::weights(net, node, node_vars, opts.tolerance, &mut weights)?,
        }
    }

    let mut inst = WeightedCnf::new(cnf, weights, var_manager.n_used());
    inst.add_comment(format!("network {}", net.name()));
    inst.add_comment(format!("encoding {}", opts.encoding));
    for (var, key) in var_manager.iter() {
        inst.set_label(var, key.to_string());
    }
    for (node, state) in net.evidence() {
        let (var, _) = resolve(net, &vars, node, state)?;
        inst.add_evidence(var, true);
    }
    for (node, state) in net.queries() {
        let (var, label) = resolve(net, &vars, node, state)?;
        inst.add_query(label, var);
    }
    log::debug!(
        "encoded `{}` into {} variables and {} clauses",
        net.name(),
        EncodeStats::n_vars(&inst),
        inst.n_clauses()
    );
    Ok(inst)
}

/// Allocates the indicator and parameter variables of a node
fn allocate(
    net: &BayesNet,
    node: &Node,
    encoding: Encoding,
    var_manager: &mut KeyedVarManager<Key>,
) -> Result<NodeVars, Error> {
    let indicators = node
        .states()
        .iter()
        .map(|state| {
            var_manager.register(Key::Indicator {
                node: node.name().to_string(),
                state: state.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let n_param_states = match encoding {
        Encoding::Enc1 => node.n_states(),
        Encoding::Enc2 => node.n_states() - 1,
    };
    let radices = node.cpd().parent_radices();
    let mut params = Vec::with_capacity(n_param_states * node.cpd().n_rows());
    for state in &node.states()[..n_param_states] {
        for assignment in utils::assignments(radices) {
            params.push(var_manager.register(Key::Parameter {
                node: node.name().to_string(),
                state: state.clone(),
                parents: parent_states(net, node, &assignment),
            })?);
        }
    }
    log::trace!(
        "allocated {} indicators and {} parameters for `{}`",
        indicators.len(),
        params.len(),
        node.name()
    );
    Ok(NodeVars {
        indicators,
        params,
        n_rows: node.cpd().n_rows(),
    })
}

/// Names the parents of a node and their states in an assignment
fn parent_states(net: &BayesNet, node: &Node, assignment: &[usize]) -> Vec<(String, String)> {
    node.parents()
        .iter()
        .zip(assignment)
        .filter_map(|(&parent, &state)| {
            let parent = net.node(parent)?;
            Some((parent.name().to_string(), parent.states()[state].clone()))
        })
        .collect()
}

/// The indicator literals of the parents of a node for an assignment
fn parent_lits(node: &Node, vars: &[NodeVars], assignment: &[usize]) -> Vec<Lit> {
    node.parents()
        .iter()
        .zip(assignment)
        .map(|(parent, &state)| vars[parent.idx()].indicator(state))
        .collect()
}

/// Gets a complete table row, checking that it is a distribution
fn checked_row(
    net: &BayesNet,
    node: &Node,
    assignment: &[usize],
    tolerance: f64,
) -> Result<Vec<f64>, Error> {
    let fail = |issue| Error::Distribution {
        node: node.name().to_string(),
        assignment: parent_states(net, node, assignment)
            .iter()
            .map(|(p, s)| format!("{p}={s}"))
            .join(", "),
        issue,
    };
    let row = node
        .cpd()
        .row(assignment)
        .iter()
        .zip(node.states())
        .map(|(prob, state)| match prob {
            None => Err(fail(DistributionIssue::Missing(state.clone()))),
            Some(p) if !(0. ..=1.).contains(p) => {
                Err(fail(DistributionIssue::OutOfRange(state.clone(), *p)))
            }
            Some(p) => Ok(*p),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let sum: f64 = row.iter().sum();
    if !utils::approx_eq(sum, 1., tolerance) {
        return Err(fail(DistributionIssue::Sum(sum)));
    }
    Ok(row)
}

/// Resolves a node state named in evidence or a query to its indicator
fn resolve(
    net: &BayesNet,
    vars: &[NodeVars],
    node: &str,
    state: &str,
) -> Result<(Var, String), Error> {
    let unknown = || Error::UnknownState {
        node: node.to_string(),
        state: state.to_string(),
    };
    let id = net.find(node).ok_or_else(unknown)?;
    let state_idx = net
        .node(id)
        .and_then(|n| n.state_idx(state))
        .ok_or_else(unknown)?;
    Ok((vars[id.idx()].indicators[state_idx], format!("{node}={state}")))
}

#[cfg(test)]
mod tests {
    use super::{encode, Encoding, Key, Options};
    use crate::{
        clause,
        encodings::{DistributionIssue, EncodeStats, Error},
        instances::DuplicateVariable,
        models::BayesNet,
        types::Weight,
        var,
    };

    fn ab() -> BayesNet {
        let mut net = BayesNet::new("ab");
        let a = net.add_node("A", ["a0", "a1"], &[]).unwrap();
        let b = net.add_node("B", ["b0", "b1"], &["A"]).unwrap();
        net.set_table(a, &[0.3, 0.7]).unwrap();
        net.set_table(b, &[0.9, 0.1, 0.2, 0.8]).unwrap();
        net
    }

    #[test]
    fn enc1_allocation_order() {
        let inst = encode(&ab(), &Options::default()).unwrap();
        let labels: Vec<_> = inst.legend().iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "A=a0",
                "A=a1",
                "theta(A=a0)",
                "theta(A=a1)",
                "B=b0",
                "B=b1",
                "theta(B=b0 | A=a0)",
                "theta(B=b0 | A=a1)",
                "theta(B=b1 | A=a0)",
                "theta(B=b1 | A=a1)",
            ]
        );
        assert_eq!(inst.n_vars(), 10);
    }

    #[test]
    fn enc1_weights() {
        let inst = encode(&ab(), &Options::default()).unwrap();
        let w = inst.weights();
        assert_eq!(w.get(var![0]), Weight::NEUTRAL);
        assert_eq!(w.get(var![2]), Weight::new(0.3, 1.));
        assert_eq!(w.get(var![6]), Weight::new(0.9, 1.));
        assert_eq!(w.get(var![7]), Weight::new(0.2, 1.));
        assert_eq!(w.get(var![9]), Weight::new(0.8, 1.));
    }

    #[test]
    fn enc1_clauses() {
        let inst = encode(&ab(), &Options::default()).unwrap();
        let cnf = inst.cnf();
        // A: at least one, exclusion, two parameter equivalences of 2 clauses
        // B: at least one, exclusion, four parameter equivalences of 3 clauses
        assert_eq!(cnf.len(), 2 + 2 * 2 + 2 + 4 * 3);
        assert_eq!(cnf[0], clause![var![0].pos_lit(), var![1].pos_lit()]);
        assert_eq!(cnf[1], clause![var![0].neg_lit(), var![1].neg_lit()]);
        assert_eq!(cnf[2], clause![var![0].neg_lit(), var![2].pos_lit()]);
        assert_eq!(cnf[3], clause![var![2].neg_lit(), var![0].pos_lit()]);
    }

    #[test]
    fn enc2_allocation_and_weights() {
        let inst = encode(&ab(), &Options::with_encoding(Encoding::Enc2)).unwrap();
        let labels: Vec<_> = inst.legend().iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "A=a0",
                "A=a1",
                "theta(A=a0)",
                "B=b0",
                "B=b1",
                "theta(B=b0 | A=a0)",
                "theta(B=b0 | A=a1)",
            ]
        );
        let w = inst.weights();
        assert_eq!(w.get(var![2]), Weight::new(0.3, 0.7));
        assert_eq!(w.get(var![5]), Weight::new(0.9, 1. - 0.9));
        assert_eq!(w.get(var![6]), Weight::new(0.2, 0.8));
    }

    #[test]
    fn enc2_stick_breaking() {
        let mut net = BayesNet::new("c");
        let c = net.add_node("C", ["c0", "c1", "c2"], &[]).unwrap();
        net.set_table(c, &[0.5, 0.25, 0.25]).unwrap();
        let inst = encode(&net, &Options::with_encoding(Encoding::Enc2)).unwrap();
        assert_eq!(inst.n_vars(), 5);
        assert_eq!(inst.weights().get(var![3]), Weight::new(0.5, 0.5));
        assert_eq!(inst.weights().get(var![4]), Weight::new(0.5, 0.5));
    }

    #[test]
    fn enc2_zero_divisor() {
        let mut net = BayesNet::new("c");
        let c = net.add_node("C", ["c0", "c1", "c2"], &[]).unwrap();
        net.set_table(c, &[1., 0., 0.]).unwrap();
        let inst = encode(&net, &Options::with_encoding(Encoding::Enc2)).unwrap();
        assert_eq!(inst.weights().get(var![3]), Weight::new(1., 0.));
        assert_eq!(inst.weights().get(var![4]), Weight::new(0., 1.));
    }

    #[test]
    fn single_state_node() {
        let mut net = BayesNet::new("s");
        let s = net.add_node("S", ["s0"], &[]).unwrap();
        net.set_table(s, &[1.]).unwrap();
        let inst = encode(&net, &Options::default()).unwrap();
        assert_eq!(inst.cnf()[0], clause![var![0].pos_lit()]);
        // parameter equivalence only, no exclusion clauses
        assert_eq!(inst.cnf().len(), 3);
        let inst = encode(&net, &Options::with_encoding(Encoding::Enc2)).unwrap();
        assert_eq!(inst.n_vars(), 1);
        assert_eq!(inst.cnf().len(), 2);
    }

    #[test]
    fn variable_counts() {
        let mut net = BayesNet::new("counts");
        let a = net.add_node("A", ["a0", "a1", "a2"], &[]).unwrap();
        let b = net.add_node("B", ["b0", "b1"], &[]).unwrap();
        let c = net.add_node("C", ["c0", "c1", "c2", "c3"], &["A", "B"]).unwrap();
        net.set_table(a, &[0.2, 0.3, 0.5]).unwrap();
        net.set_table(b, &[0.5, 0.5]).unwrap();
        net.set_table(c, &[0.25; 24]).unwrap();
        let inst = encode(&net, &Options::default()).unwrap();
        assert_eq!(EncodeStats::n_vars(&inst), (3 + 2 + 4) + (3 + 2 + 4 * 6));
        let inst = encode(&net, &Options::with_encoding(Encoding::Enc2)).unwrap();
        assert_eq!(EncodeStats::n_vars(&inst), (3 + 2 + 4) + (2 + 1 + 3 * 6));
    }

    #[test]
    fn evidence_and_queries() {
        let mut net = ab();
        net.observe("A", "a0");
        net.add_query("B", "b0");
        let inst = encode(&net, &Options::default()).unwrap();
        assert_eq!(inst.cnf()[inst.cnf().len() - 1], clause![var![0].pos_lit()]);
        assert_eq!(inst.queries()[0].label, "B=b0");
        assert_eq!(inst.queries()[0].id(), 5);

        net.add_query("B", "b7");
        assert_eq!(
            encode(&net, &Options::default()),
            Err(Error::UnknownState {
                node: "B".to_string(),
                state: "b7".to_string()
            })
        );
    }

    #[test]
    fn duplicate_node() {
        let mut net = ab();
        let a = net.add_node("A", ["a0", "a1"], &[]).unwrap();
        net.set_table(a, &[0.5, 0.5]).unwrap();
        assert_eq!(
            encode(&net, &Options::default()),
            Err(Error::DuplicateVariable(DuplicateVariable(
                Key::Indicator {
                    node: "A".to_string(),
                    state: "a0".to_string()
                }
                .to_string()
            )))
        );
    }

    #[test]
    fn malformed_distributions() {
        let mut net = BayesNet::new("bad");
        let a = net.add_node("A", ["a0", "a1"], &[]).unwrap();
        net.set_prob(a, "a0", &[], 0.4).unwrap();
        assert!(matches!(
            encode(&net, &Options::default()),
            Err(Error::Distribution {
                issue: DistributionIssue::Missing(_),
                ..
            })
        ));
        net.set_table(a, &[0.4, 0.4]).unwrap();
        assert!(matches!(
            encode(&net, &Options::with_encoding(Encoding::Enc2)),
            Err(Error::Distribution {
                issue: DistributionIssue::Sum(_),
                ..
            })
        ));
        net.set_table(a, &[1.5, -0.5]).unwrap();
        assert!(matches!(
            encode(&net, &Options::default()),
            Err(Error::Distribution {
                issue: DistributionIssue::OutOfRange(..),
                ..
            })
        ));
        // within tolerance
        net.set_table(a, &[0.4, 0.600_000_1]).unwrap();
        assert!(encode(&net, &Options::default()).is_ok());
    }

    #[test]
    fn deterministic() {
        let first = encode(&ab(), &Options::default()).unwrap();
        let second = encode(&ab(), &Options::default()).unwrap();
        assert_eq!(first, second);
    }
}

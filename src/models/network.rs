//! # Bayesian Networks
//!
//! Discrete Bayesian networks with one conditional probability table per
//! node. Nodes must be added in an order where parents precede children.
//!
//! ## Example
//!
//! ```
//! use wmcnf::models::BayesNet;
//!
//! let mut net = BayesNet::new("ab");
//! let a = net.add_node("A", ["a0", "a1"], &[]).unwrap();
//! let b = net.add_node("B", ["b0", "b1"], &["A"]).unwrap();
//! net.set_table(a, &[0.3, 0.7]).unwrap();
//! // rows are parent assignments, columns are states of the node
//! net.set_table(b, &[0.9, 0.1, 0.2, 0.8]).unwrap();
//! net.observe("A", "a0");
//! net.add_query("B", "b0");
//! assert_eq!(net.len(), 2);
//! ```

use crate::utils;

use super::ModelError;

/// Reference to a node of a [`BayesNet`]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    /// Gets the position of the node in the network
    #[must_use]
    pub fn idx(self) -> usize {
        self.0
    }
}

/// A conditional probability table. Entries are stored row by row, one row
/// per parent assignment with the last parent varying fastest, and one
/// column per state of the node.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cpd {
    n_states: usize,
    parent_radices: Vec<usize>,
    probs: Vec<Option<f64>>,
}

impl Cpd {
    fn new(n_states: usize, parent_radices: Vec<usize>) -> Self {
        let n_rows: usize = parent_radices.iter().product();
        Self {
            n_states,
            parent_radices,
            probs: vec![None; n_rows * n_states],
        }
    }

    /// Gets the number of parent assignments
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.parent_radices.iter().product()
    }

    /// Gets the number of states of each parent
    #[must_use]
    pub fn parent_radices(&self) -> &[usize] {
        &self.parent_radices
    }

    /// Gets the distribution over the node's states given a parent
    /// assignment. Missing entries are `None`.
    ///
    /// # Panics
    ///
    /// If the parent assignment is out of range.
    #[must_use]
    pub fn row(&self, parents: &[usize]) -> &[Option<f64>] {
        let start = utils::assignment_index(&self.parent_radices, parents) * self.n_states;
        &self.probs[start..start + self.n_states]
    }

    /// Gets the probability of a state given a parent assignment
    ///
    /// # Panics
    ///
    /// If the state or the parent assignment is out of range.
    #[must_use]
    pub fn prob(&self, state: usize, parents: &[usize]) -> Option<f64> {
        self.row(parents)[state]
    }

    fn set(&mut self, state: usize, parents: &[usize], prob: f64) {
        let idx = utils::assignment_index(&self.parent_radices, parents) * self.n_states + state;
        self.probs[idx] = Some(prob);
    }
}

/// A random variable of a Bayesian network
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    name: String,
    states: Vec<String>,
    parents: Vec<NodeId>,
    cpd: Cpd,
}

impl Node {
    /// Gets the name of the node
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the ordered state names
    #[must_use]
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Gets the number of states
    #[must_use]
    pub fn n_states(&self) -> usize {
        self.states.len()
    }

    /// Gets the position of a state
    #[must_use]
    pub fn state_idx(&self, state: &str) -> Option<usize> {
        self.states.iter().position(|s| s == state)
    }

    /// Gets the ordered parents
    #[must_use]
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// Gets the conditional probability table
    #[must_use]
    pub fn cpd(&self) -> &Cpd {
        &self.cpd
    }
}

/// A discrete Bayesian network together with evidence and queries
///
/// Deserialized networks are checked for the same structural invariants
/// the builder maintains.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawBayesNet")
)]
pub struct BayesNet {
    name: String,
    nodes: Vec<Node>,
    evidence: Vec<(String, String)>,
    queries: Vec<(String, String)>,
}

impl BayesNet {
    /// Creates an empty network
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Gets the name of the network
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a node with an empty table. Parents are referenced by name and
    /// must already be part of the network. Node names are not checked for
    /// uniqueness here; a duplicate is reported when the network is encoded.
    ///
    /// # Errors
    ///
    /// [`ModelError::NoStates`], [`ModelError::DuplicateState`] or
    /// [`ModelError::UnknownParent`].
    pub fn add_node<N, I, S>(
        &mut self,
        name: N,
        states: I,
        parents: &[&str],
    ) -> Result<NodeId, ModelError>
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let states: Vec<String> = states.into_iter().map(Into::into).collect();
        check_states(&name, &states)?;
        let parents = parents
            .iter()
            .map(|&parent| {
                self.find(parent).ok_or_else(|| ModelError::UnknownParent {
                    node: name.clone(),
                    parent: parent.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let radices = parents
            .iter()
            .map(|p| self.nodes[p.0].n_states())
            .collect();
        let cpd = Cpd::new(states.len(), radices);
        self.nodes.push(Node {
            name,
            states,
            parents,
            cpd,
        });
        Ok(NodeId(self.nodes.len() - 1))
    }

    /// Sets the full table of a node. The entries are given row by row, one
    /// row per parent assignment (last parent varying fastest) listing the
    /// probabilities of the node's states in order.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownNode`] or [`ModelError::WrongLength`].
    pub fn set_table(&mut self, node: NodeId, table: &[f64]) -> Result<(), ModelError> {
        let node = self
            .nodes
            .get_mut(node.0)
            .ok_or(ModelError::UnknownNode(node.0))?;
        if table.len() != node.cpd.probs.len() {
            return Err(ModelError::WrongLength {
                node: node.name.clone(),
                expected: node.cpd.probs.len(),
                found: table.len(),
            });
        }
        node.cpd.probs = table.iter().copied().map(Some).collect();
        Ok(())
    }

    /// Sets a single table entry `P(node = state | parents = parent_states)`
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownNode`], [`ModelError::WrongLength`] if the
    /// number of parent states does not match, or [`ModelError::UnknownState`].
    pub fn set_prob(
        &mut self,
        node: NodeId,
        state: &str,
        parent_states: &[&str],
        prob: f64,
    ) -> Result<(), ModelError> {
        let target = self.nodes.get(node.0).ok_or(ModelError::UnknownNode(node.0))?;
        if parent_states.len() != target.parents.len() {
            return Err(ModelError::WrongLength {
                node: target.name.clone(),
                expected: target.parents.len(),
                found: parent_states.len(),
            });
        }
        let state_idx = target
            .state_idx(state)
            .ok_or_else(|| ModelError::UnknownState {
                node: target.name.clone(),
                state: state.to_string(),
            })?;
        let assignment = target
            .parents
            .iter()
            .zip(parent_states)
            .map(|(&parent, &pstate)| {
                let parent = &self.nodes[parent.0];
                parent
                    .state_idx(pstate)
                    .ok_or_else(|| ModelError::UnknownState {
                        node: parent.name.clone(),
                        state: pstate.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.nodes[node.0].cpd.set(state_idx, &assignment, prob);
        Ok(())
    }

    /// Declares that a node was observed in a state. Names are resolved when
    /// the network is encoded.
    pub fn observe<N: Into<String>, S: Into<String>>(&mut self, node: N, state: S) {
        self.evidence.push((node.into(), state.into()));
    }

    /// Declares a query for the marginal of a node being in a state. Names
    /// are resolved when the network is encoded.
    pub fn add_query<N: Into<String>, S: Into<String>>(&mut self, node: N, state: S) {
        self.queries.push((node.into(), state.into()));
    }

    /// Gets the observed node states
    #[must_use]
    pub fn evidence(&self) -> &[(String, String)] {
        &self.evidence
    }

    /// Gets the queried node states
    #[must_use]
    pub fn queries(&self) -> &[(String, String)] {
        &self.queries
    }

    /// Gets the nodes in insertion order
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Gets a node
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Finds the first node with the given name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// Gets the number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Checks if the network has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn check_states(node: &str, states: &[String]) -> Result<(), ModelError> {
    if states.is_empty() {
        return Err(ModelError::NoStates(node.to_string()));
    }
    for (idx, state) in states.iter().enumerate() {
        if states[..idx].contains(state) {
            return Err(ModelError::DuplicateState {
                node: node.to_string(),
                state: state.clone(),
            });
        }
    }
    Ok(())
}

/// Checks that a node's table matches its states and parents. Parents must
/// precede the node.
#[cfg(feature = "serde")]
fn check_node(nodes: &[Node], idx: usize) -> Result<(), ModelError> {
    let node = &nodes[idx];
    check_states(&node.name, &node.states)?;
    let wrong_length = |expected, found| ModelError::WrongLength {
        node: node.name.clone(),
        expected,
        found,
    };
    let cpd = &node.cpd;
    if cpd.n_states != node.n_states() {
        return Err(wrong_length(node.n_states(), cpd.n_states));
    }
    if cpd.parent_radices.len() != node.parents.len() {
        return Err(wrong_length(node.parents.len(), cpd.parent_radices.len()));
    }
    for (parent, &radix) in node.parents.iter().zip(&cpd.parent_radices) {
        if parent.0 >= idx {
            return Err(ModelError::UnknownNode(parent.0));
        }
        let n_states = nodes[parent.0].n_states();
        if radix != n_states {
            return Err(wrong_length(n_states, radix));
        }
    }
    let expected = cpd.n_rows() * cpd.n_states;
    if cpd.probs.len() != expected {
        return Err(wrong_length(expected, cpd.probs.len()));
    }
    Ok(())
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBayesNet {
    name: String,
    nodes: Vec<Node>,
    evidence: Vec<(String, String)>,
    queries: Vec<(String, String)>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBayesNet> for BayesNet {
    type Error = ModelError;

    fn try_from(raw: RawBayesNet) -> Result<Self, Self::Error> {
        for idx in 0..raw.nodes.len() {
            check_node(&raw.nodes, idx)?;
        }
        Ok(BayesNet {
            name: raw.name,
            nodes: raw.nodes,
            evidence: raw.evidence,
            queries: raw.queries,
        })
    }
}

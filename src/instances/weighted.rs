//! # Weighted CNF Instances
//!
//! The output of all encoders: a CNF together with literal weights, the
//! number of allocated variables, query variables, and annotations.

use std::{io, path::Path};

use crate::{
    encodings::EncodeStats,
    types::{Lit, Var, WeightTable},
};

use super::{fio, Cnf};

/// A declared query, resolved to the variable whose marginal is asked for
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    /// Human readable name of the queried proposition
    pub label: String,
    /// The variable of the queried proposition
    pub var: Var,
}

impl Query {
    /// Gets the DIMACS id of the queried variable
    #[must_use]
    pub fn id(&self) -> u32 {
        self.var.to_dimacs()
    }
}

/// A weighted CNF instance for weighted model counting
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedCnf {
    cnf: Cnf,
    weights: WeightTable,
    n_vars: u32,
    queries: Vec<Query>,
    comments: Vec<String>,
    legend: Vec<(Var, String)>,
}

impl WeightedCnf {
    /// Creates a new instance over `n_vars` variables
    #[must_use]
    pub fn new(cnf: Cnf, weights: WeightTable, n_vars: u32) -> Self {
        Self {
            cnf,
            weights,
            n_vars,
            ..Default::default()
        }
    }

    /// Gets the clauses of the instance
    #[must_use]
    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    /// Gets the literal weights of the instance
    #[must_use]
    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Gets the number of variables. Weights are written for exactly this
    /// many variables.
    #[must_use]
    pub fn n_vars(&self) -> u32 {
        self.n_vars
    }

    /// Gets the declared queries in declaration order
    #[must_use]
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// Gets the header comments
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Gets the labelled variables in allocation order
    #[must_use]
    pub fn legend(&self) -> &[(Var, String)] {
        &self.legend
    }

    /// Adds a header comment line
    pub fn add_comment<S: Into<String>>(&mut self, comment: S) {
        self.comments.push(comment.into());
    }

    /// Labels a variable with the proposition it stands for
    pub fn set_label<S: Into<String>>(&mut self, var: Var, label: S) {
        self.legend.push((var, label.into()));
    }

    /// Declares a query for the marginal of a variable
    pub fn add_query<S: Into<String>>(&mut self, label: S, var: Var) {
        self.queries.push(Query {
            label: label.into(),
            var,
        });
    }

    /// Fixes the value of a variable with a unit clause
    pub fn add_evidence(&mut self, var: Var, value: bool) {
        self.cnf.add_unit(var.lit(value));
    }

    /// Adds a clause-level constraint, e.g., to condition on more complex
    /// evidence
    pub fn add_clause<I: IntoIterator<Item = Lit>>(&mut self, lits: I) {
        self.cnf.add_clause(lits.into_iter().collect());
    }

    /// Looks up the variable of a label
    #[must_use]
    pub fn lookup(&self, label: &str) -> Option<Var> {
        self.legend
            .iter()
            .find_map(|(var, l)| (l == label).then_some(*var))
    }

    /// Writes the instance to a DIMACS file
    ///
    /// # Errors
    ///
    /// If writing fails, returns [`io::Error`].
    pub fn write_dimacs<W: io::Write>(
        &self,
        writer: &mut W,
        opts: fio::dimacs::Options,
    ) -> Result<(), io::Error> {
        fio::dimacs::write_weighted_cnf(writer, self, opts)
    }

    /// Writes the instance to a DIMACS file at a path. With feature
    /// `compression`, `.bz2`, `.gz` and `.xz` paths are compressed.
    ///
    /// # Errors
    ///
    /// If the file cannot be created or writing fails, returns [`io::Error`].
    pub fn write_dimacs_path<P: AsRef<Path>>(
        &self,
        path: P,
        opts: fio::dimacs::Options,
    ) -> Result<(), io::Error> {
        let mut writer = fio::open_compressed_uncompressed_write(path)?;
        self.write_dimacs(&mut writer, opts)?;
        writer.finish()
    }
}

impl EncodeStats for WeightedCnf {
    fn n_clauses(&self) -> usize {
        self.cnf.len()
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}

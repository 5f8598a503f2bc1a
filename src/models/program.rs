//! # Ground Probabilistic Logic Programs
//!
//! A ground program is an ordered list of statements over propositional
//! atoms: probabilistic facts, annotated disjunctions (a probabilistic choice
//! between alternatives, optionally guarded by a rule body) and rules.
//!
//! ## Example
//!
//! ```
//! use wmcnf::models::{BodyLit, GroundProgram};
//!
//! let mut prog = GroundProgram::new("alarm");
//! prog.add_fact("burglary", 0.1);
//! prog.add_fact("earthquake", 0.2);
//! prog.add_rule("alarm", [BodyLit::pos("burglary")]);
//! prog.add_rule("alarm", [BodyLit::pos("earthquake")]);
//! prog.add_query("alarm");
//! assert_eq!(prog.statements().len(), 4);
//! ```

use std::fmt;

use super::ModelError;

/// A literal in a rule body
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyLit {
    /// The atom
    pub atom: String,
    /// Whether the atom occurs positively
    pub positive: bool,
}

impl BodyLit {
    /// A positive body literal
    pub fn pos<S: Into<String>>(atom: S) -> Self {
        Self {
            atom: atom.into(),
            positive: true,
        }
    }

    /// A negated body literal
    pub fn neg<S: Into<String>>(atom: S) -> Self {
        Self {
            atom: atom.into(),
            positive: false,
        }
    }
}

impl fmt::Display for BodyLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.atom)
        } else {
            write!(f, "\\+{}", self.atom)
        }
    }
}

/// An independent probabilistic fact `p::atom`
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbFact {
    /// The atom
    pub atom: String,
    /// The probability of the atom being true
    pub prob: f64,
}

/// An annotated disjunction `p1::a1; ...; pn::an :- body`. At most one
/// alternative holds; if the body holds, exactly one does, where the
/// remaining mass `1 - sum(pi)` is assigned to none of the alternatives.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnotatedDisjunction {
    /// Alternatives with their probabilities
    pub alternatives: Vec<(String, f64)>,
    /// The guarding rule body; an empty body means the choice is always made
    pub body: Vec<BodyLit>,
}

/// A ground rule `head :- body`
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    /// The head atom
    pub head: String,
    /// The body; an empty body makes the head a certain fact
    pub body: Vec<BodyLit>,
}

/// A statement of a ground program
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    /// A probabilistic fact
    Fact(ProbFact),
    /// An annotated disjunction
    Disjunction(AnnotatedDisjunction),
    /// A rule
    Rule(Rule),
}

/// A ground probabilistic logic program with evidence and queries
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundProgram {
    name: String,
    statements: Vec<Statement>,
    evidence: Vec<(String, bool)>,
    queries: Vec<String>,
}

impl GroundProgram {
    /// Creates an empty program
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Gets the name of the program
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a probabilistic fact. A probability of one makes the fact
    /// certain.
    pub fn add_fact<S: Into<String>>(&mut self, atom: S, prob: f64) {
        self.statements.push(Statement::Fact(ProbFact {
            atom: atom.into(),
            prob,
        }));
    }

    /// Adds an annotated disjunction
    ///
    /// # Errors
    ///
    /// [`ModelError::EmptyDisjunction`] if no alternatives are given.
    pub fn add_disjunction<I, S, B>(&mut self, alternatives: I, body: B) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
        B: IntoIterator<Item = BodyLit>,
    {
        let alternatives: Vec<_> = alternatives
            .into_iter()
            .map(|(atom, prob)| (atom.into(), prob))
            .collect();
        if alternatives.is_empty() {
            return Err(ModelError::EmptyDisjunction);
        }
        self.statements
            .push(Statement::Disjunction(AnnotatedDisjunction {
                alternatives,
                body: body.into_iter().collect(),
            }));
        Ok(())
    }

    /// Adds a rule. Several rules for the same head are disjoined.
    pub fn add_rule<S, B>(&mut self, head: S, body: B)
    where
        S: Into<String>,
        B: IntoIterator<Item = BodyLit>,
    {
        self.statements.push(Statement::Rule(Rule {
            head: head.into(),
            body: body.into_iter().collect(),
        }));
    }

    /// Declares that an atom was observed with a truth value
    pub fn observe<S: Into<String>>(&mut self, atom: S, value: bool) {
        self.evidence.push((atom.into(), value));
    }

    /// Declares a query for the marginal of an atom
    pub fn add_query<S: Into<String>>(&mut self, atom: S) {
        self.queries.push(atom.into());
    }

    /// Gets the statements in insertion order
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Gets the observed atoms
    #[must_use]
    pub fn evidence(&self) -> &[(String, bool)] {
        &self.evidence
    }

    /// Gets the queried atoms
    #[must_use]
    pub fn queries(&self) -> &[String] {
        &self.queries
    }
}

//! # DIMACS Weighted CNF Writing
//!
//! Writes weighted CNF instances in the DIMACS format understood by knowledge
//! compilers and weighted model counters. Literal weights are written in one
//! of two dialects, see [`WeightFormat`].
//!
//! The layout of a written file is
//!
//! ```text
//! c <comments>
//! c <id> <label>              (variable legend, if requested)
//! c query <label> <id>        (one line per query)
//! c weights w1+ w1- w2+ ...   (paired dialect)
//! p cnf <n_vars> <n_clauses>
//! w 1 <w1+>                   (cachet dialect)
//! w -1 <w1->
//! ...
//! <lit> <lit> ... 0
//! ```

use std::io::{self, Write};

use crate::{
    instances::WeightedCnf,
    types::{Clause, Var},
};

/// The dialect in which literal weights are written
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightFormat {
    /// One `w <lit> <weight>` line per literal after the `p cnf` header, as
    /// read by Cachet
    Cachet,
    /// A single `c weights` comment line listing the positive and negative
    /// weight of every variable in order, as read by miniC2D
    #[default]
    Paired,
}

/// Options for writing weighted DIMACS files
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// The weight dialect
    pub format: WeightFormat,
    /// Whether to write a comment line naming each labelled variable
    pub legend: bool,
}

impl Options {
    /// Default options with a given weight dialect
    #[must_use]
    pub fn with_format(format: WeightFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }
}

/// Writes a weighted CNF to a DIMACS file
///
/// # Errors
///
/// If writing fails, returns [`io::Error`].
pub fn write_weighted_cnf<W: Write>(
    mut writer: W,
    inst: &WeightedCnf,
    opts: Options,
) -> Result<(), io::Error> {
    inst.comments()
        .iter()
        .try_for_each(|c| writeln!(writer, "c {c}"))?;
    if opts.legend {
        inst.legend()
            .iter()
            .try_for_each(|(var, label)| writeln!(writer, "c {} {label}", var.to_dimacs()))?;
    }
    inst.queries()
        .iter()
        .try_for_each(|q| writeln!(writer, "c query {} {}", q.label, q.id()))?;
    if opts.format == WeightFormat::Paired {
        write_paired_weights(&mut writer, inst)?;
    }
    writeln!(writer, "p cnf {} {}", inst.n_vars(), inst.cnf().len())?;
    if opts.format == WeightFormat::Cachet {
        write_cachet_weights(&mut writer, inst)?;
    }
    inst.cnf()
        .iter()
        .try_for_each(|cl| write_clause(&mut writer, cl))?;
    writer.flush()
}

fn write_paired_weights<W: Write>(writer: &mut W, inst: &WeightedCnf) -> Result<(), io::Error> {
    write!(writer, "c weights")?;
    inst.weights()
        .iter(inst.n_vars())
        .try_for_each(|(_, w)| write!(writer, " {} {}", w.pos, w.neg))?;
    writeln!(writer)
}

fn write_cachet_weights<W: Write>(writer: &mut W, inst: &WeightedCnf) -> Result<(), io::Error> {
    inst.weights()
        .iter(inst.n_vars())
        .try_for_each(|(var, w)| write_cachet_weight(writer, var, w.pos, w.neg))
}

fn write_cachet_weight<W: Write>(
    writer: &mut W,
    var: Var,
    pos: f64,
    neg: f64,
) -> Result<(), io::Error> {
    writeln!(writer, "w {} {pos}", var.pos_lit().to_dimacs())?;
    writeln!(writer, "w {} {neg}", var.neg_lit().to_dimacs())
}

fn write_clause<W: Write>(writer: &mut W, clause: &Clause) -> Result<(), io::Error> {
    clause
        .iter()
        .try_for_each(|l| write!(writer, "{} ", l.to_dimacs()))?;
    writeln!(writer, "0")
}

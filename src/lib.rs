//! # wmcnf - Probabilistic Models to Weighted CNF
//!
//! `wmcnf` encodes discrete probabilistic models, Bayesian networks and
//! ground probabilistic logic programs, as weighted CNF formulas. The
//! weighted model count of an encoding is the probability of the evidence,
//! so exact inference can be delegated to a knowledge compiler or weighted
//! model counter reading DIMACS files.
//!
//! ## Example
//!
//! ```no_run
//! use wmcnf::{
//!     encodings::bayes::{self, Encoding, Options},
//!     instances::fio::dimacs::{self, WeightFormat},
//!     models::BayesNet,
//! };
//!
//! # fn main() -> Result<(), wmcnf::Error> {
//! let mut net = BayesNet::new("ab");
//! let a = net.add_node("A", ["a0", "a1"], &[])?;
//! let b = net.add_node("B", ["b0", "b1"], &["A"])?;
//! net.set_table(a, &[0.3, 0.7])?;
//! net.set_table(b, &[0.9, 0.1, 0.2, 0.8])?;
//! net.observe("A", "a0");
//! net.add_query("B", "b0");
//!
//! let inst = bayes::encode(&net, &Options::with_encoding(Encoding::Enc2))?;
//! inst.write_dimacs_path("ab.cnf", dimacs::Options::with_format(WeightFormat::Cachet))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Features
//!
//! - `fxhash`: Use the faster hash function from `rustc-hash` for the hash
//!   maps of variable managers. This feature is enabled by default.
//! - `compression`: Write files compressed with bzip2, gzip or xz, depending
//!   on the file extension.
//! - `serde`: Derive `Serialize` and `Deserialize` for models, options and
//!   encoded instances.
//! - `all`: All of the above.

use thiserror::Error;

pub mod encodings;
pub mod instances;
pub mod models;
pub mod types;

mod utils;

/// Combined error type of the library
#[derive(Error, Debug)]
pub enum Error {
    /// Building a model failed
    #[error(transparent)]
    Model(#[from] models::ModelError),
    /// Encoding a model failed
    #[error(transparent)]
    Encoding(#[from] encodings::Error),
    /// Writing an instance failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

use crate::utils::span::{peg_error_snippet, Spanned};

pub mod formula;
pub mod parsing;
pub mod proof;
pub mod rules;
pub mod search;
pub mod step;
pub mod utils;

pub use crate::formula::{Connective, Formula, NormalizationError};
pub use crate::parsing::{parser, ParseError, Problem};
pub use crate::proof::{Proof, ProofError, TERMINATOR};
pub use crate::rules::{combine, Derivation};
pub use crate::search::{ProofSearch, SearchConfig};
pub use crate::step::{ProofStep, Rule};

#[derive(Debug, Error)]
pub enum Error {
	#[error("{0}")]
	Parse(ParseError),
	#[error(transparent)]
	Proof(#[from] ProofError),
}

/// Numbered proof of `target`, ending with `Q.E.D`.
pub fn prove(premises: &[Formula], target: &Formula) -> Result<String, ProofError> {
	Ok(ProofSearch::default().prove(premises, target)?.to_string())
}

/// Same as `prove`, with every formula given as text.
pub fn prove_text(premises: &[&str], target: &str) -> Result<String, Error> {
	let premises = premises
		.iter()
		.map(|premise| parser::formula(premise))
		.collect::<Result<Vec<_>, _>>()
		.map_err(Error::Parse)?;
	let target = parser::formula(target).map_err(Error::Parse)?;
	Ok(prove(&premises, &target)?)
}

/// Reads a problem file and searches for its proof, printing any error as a snippet of `input`.
pub fn read_problem(input: &str) -> Result<Proof, ()> {
	let problem = parser::problem(input).map_err(|err| {
		eprintln!("{}", peg_error_snippet(&err, input));
	})?;

	ProofSearch::default()
		.prove(&problem.premise_formulas(), &problem.target.inner)
		.map_err(|err| {
			eprintln!("{}", Spanned::new(err, problem.target.span.clone()).error_snippet(input));
		})
}

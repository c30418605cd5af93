use itertools::Itertools;
use std::fmt;
use thiserror::Error;

use crate::formula::{Formula, NormalizationError};
use crate::step::{ProofStep, Rule};

/// Last line of every rendered proof.
pub const TERMINATOR: &str = "Q.E.D";

#[derive(Debug, Error)]
pub enum ProofError {
	#[error("cannot prove {target}")]
	Unprovable {
		target: Formula,
	},
	#[error(transparent)]
	Normalization(#[from] NormalizationError),
	#[error("step `{step}` cites `{cited}`, which is not part of the proof")]
	MissingCitation {
		step: Formula,
		cited: Formula,
	},
	#[error("line {line} cites line {cited}, which does not precede it")]
	ForwardCitation {
		line: usize,
		cited: usize,
	},
	#[error("step `{step}` names a rule but no operand")]
	MissingOperand {
		step: Formula,
	},
}

impl ProofError {
	/// Only this kind means "the branch found nothing"; the rest are engine bugs.
	pub fn is_branch_failure(&self) -> bool {
		matches!(self, ProofError::Unprovable { .. })
	}
}

/// Citation part of a rendered line, with 1-based line numbers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Justification {
	Given,
	Single {
		rule: Rule,
		operand: usize,
	},
	Double {
		rule: Rule,
		operand: usize,
		required: usize,
	},
}

impl fmt::Display for Justification {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Justification::Given => write!(f, "Given"),
			Justification::Single { rule, operand } => write!(f, "{} ({})", rule, operand),
			Justification::Double { rule, operand, required } => write!(f, "{} ({}, {})", rule, operand, required),
		}
	}
}

#[derive(Clone, Debug)]
pub struct Line {
	pub step: ProofStep,
	pub justification: Justification,
}

impl fmt::Display for Line {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} -- {}", self.step.value, self.justification)
	}
}

/// Ordered, numbered proof with every citation resolved to an earlier line.
#[derive(Clone, Debug)]
pub struct Proof {
	lines: Vec<Line>,
}

/// Number of the first step whose value is `formula`.
pub fn cite(formula: &Formula, steps: &[ProofStep]) -> Option<usize> {
	steps.iter().position(|step| step.value == *formula).map(|index| index + 1)
}

fn cite_before(line: usize, step: &ProofStep, cited: &Formula, steps: &[ProofStep]) -> Result<usize, ProofError> {
	let index = cite(cited, steps).ok_or_else(|| ProofError::MissingCitation {
		step: step.value.clone(),
		cited: cited.clone(),
	})?;
	if index >= line {
		return Err(ProofError::ForwardCitation { line, cited: index });
	}
	Ok(index)
}

fn justify(line: usize, step: &ProofStep, steps: &[ProofStep]) -> Result<Justification, ProofError> {
	let rule = match step.rule {
		Some(rule) => rule,
		None => return Ok(Justification::Given),
	};
	let operand = step.operand.as_ref().ok_or_else(|| ProofError::MissingOperand { step: step.value.clone() })?;
	let operand = cite_before(line, step, operand, steps)?;

	Ok(match &step.required {
		Some(required) => Justification::Double {
			rule,
			operand,
			required: cite_before(line, step, required, steps)?,
		},
		None => Justification::Single { rule, operand },
	})
}

impl Proof {
	pub fn new(steps: Vec<ProofStep>) -> Result<Proof, ProofError> {
		let justifications = steps
			.iter()
			.enumerate()
			.map(|(index, step)| justify(index + 1, step, &steps))
			.collect::<Result<Vec<_>, _>>()?;

		let lines = steps
			.into_iter()
			.zip(justifications)
			.map(|(step, justification)| Line { step, justification })
			.collect();

		Ok(Proof { lines })
	}

	/// Formula on the last line.
	pub fn conclusion(&self) -> Option<&Formula> {
		self.lines.last().map(|line| &line.step.value)
	}

	pub fn len(&self) -> usize {
		self.lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Cited line numbers of every line, `[]` for given ones.
	pub fn citations(&self) -> Vec<Vec<usize>> {
		self.lines
			.iter()
			.map(|line| match line.justification {
				Justification::Given => vec![],
				Justification::Single { operand, .. } => vec![operand],
				Justification::Double { operand, required, .. } => vec![operand, required],
			})
			.collect()
	}
}

impl fmt::Display for Proof {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let body = self.lines
			.iter()
			.enumerate()
			.map(|(index, line)| format!("{}) {}", index + 1, line))
			.join("\n");
		write!(f, "{}\n{}", body, TERMINATOR)
	}
}

use std::fmt;

use crate::formula::{Formula, NormalizationError};

/// Inference law justifying a derived step.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy)]
pub enum Rule {
	Contrapositive,
	ConditionalNormalization,
	DeMorgan,
	Detachment,
	DisjunctiveInference,
	ModusTollens,
	Simplification,
	DisjunctiveAddition,
	Conjunction,
	ChainRule,
}

impl Rule {
	pub fn name(self) -> &'static str {
		use Rule::*;

		match self {
			Contrapositive => "Contrapositive",
			ConditionalNormalization => "Conditional normalization",
			DeMorgan => "De Morgan's law",
			Detachment => "Detachment",
			DisjunctiveInference => "Disjunctive inference",
			ModusTollens => "Modus Tollens",
			Simplification => "Simplification",
			DisjunctiveAddition => "Disjunctive Addition",
			Conjunction => "Law of Conjunction",
			ChainRule => "Chain Rule",
		}
	}
}

impl fmt::Display for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// One line of a proof before numbering.
///
/// `rule == None` marks a given premise, then `operand` and `required` are `None` too.
/// `required` is only set for rules with two antecedents.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofStep {
	pub rule: Option<Rule>,
	pub value: Formula,
	pub operand: Option<Formula>,
	pub required: Option<Formula>,
}

impl ProofStep {
	pub fn given(value: Formula) -> ProofStep {
		ProofStep {
			rule: None,
			value,
			operand: None,
			required: None,
		}
	}

	pub fn derived(rule: Rule, value: Formula, operand: Formula) -> ProofStep {
		ProofStep {
			rule: Some(rule),
			value,
			operand: Some(operand),
			required: None,
		}
	}

	pub fn requiring(self, required: Formula) -> ProofStep {
		ProofStep {
			required: Some(required),
			..self
		}
	}

	pub fn is_given(&self) -> bool {
		self.rule.is_none()
	}

	/// `~(a ^ b)` becomes a step deriving `~a V ~b` from it. `None` for formulas already in normal form.
	pub fn normalization_of(formula: &Formula) -> Result<Option<ProofStep>, NormalizationError> {
		if !formula.is_negative_compound() {
			return Ok(None);
		}
		let rule = formula.normalization_rule()?;
		let value = formula.normalize()?;
		Ok(Some(ProofStep::derived(rule, value, formula.clone())))
	}
}

use crate::formula::Formula;
use crate::step::{ProofStep, Rule};

/// What a single rule application from a known formula gives toward a target.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Derivation {
	/// Step needs nothing but its operand.
	Derived(ProofStep),
	/// Step also needs `required` to be proven.
	RequiresFurtherProof(ProofStep),
	NoRule,
}

impl From<ProofStep> for Derivation {
	fn from(step: ProofStep) -> Derivation {
		if step.required.is_some() {
			Derivation::RequiresFurtherProof(step)
		} else {
			Derivation::Derived(step)
		}
	}
}

impl Derivation {
	pub fn step(&self) -> Option<&ProofStep> {
		match self {
			Derivation::Derived(step) | Derivation::RequiresFurtherProof(step) => Some(step),
			Derivation::NoRule => None,
		}
	}

	pub fn into_step(self) -> Option<ProofStep> {
		match self {
			Derivation::Derived(step) | Derivation::RequiresFurtherProof(step) => Some(step),
			Derivation::NoRule => None,
		}
	}
}

/// `target` occurs in `part`, or in relaxed mode its negation does.
fn occurs(part: &Formula, target: &Formula, relaxed: bool) -> bool {
	part.contains(target) || (relaxed && part.contains(&target.negate()))
}

impl Formula {
	/// Tries one rule whose antecedent is `self` to get closer to `target`.
	///
	/// A negative compound never derives anything, it has to be normalized first.
	pub fn try_derive(&self, target: &Formula, relaxed: bool) -> Derivation {
		use Formula::*;

		if self.is_negative_compound() {
			return Derivation::NoRule;
		}

		match self {
			Atom { .. } => {
				if self == target {
					Derivation::Derived(ProofStep::given(self.clone()))
				} else {
					combine(self, target)
				}
			},
			Or { left, right, .. } => {
				if occurs(left, target, relaxed) {
					ProofStep::derived(Rule::DisjunctiveInference, (**left).clone(), self.clone())
						.requiring(right.negate())
						.into()
				} else if occurs(right, target, relaxed) {
					ProofStep::derived(Rule::DisjunctiveInference, (**right).clone(), self.clone())
						.requiring(left.negate())
						.into()
				} else {
					combine(self, target)
				}
			},
			And { left, right, .. } => {
				if occurs(left, target, relaxed) {
					Derivation::Derived(ProofStep::derived(Rule::Simplification, (**left).clone(), self.clone()))
				} else if occurs(right, target, relaxed) {
					Derivation::Derived(ProofStep::derived(Rule::Simplification, (**right).clone(), self.clone()))
				} else {
					combine(self, target)
				}
			},
			Implies { hypothesis, conclusion, .. } => {
				let negated_hypothesis = hypothesis.negate();
				if occurs(conclusion, target, relaxed) {
					return ProofStep::derived(Rule::Detachment, (**conclusion).clone(), self.clone())
						.requiring((**hypothesis).clone())
						.into();
				}
				if occurs(&negated_hypothesis, target, relaxed) {
					return ProofStep::derived(Rule::ModusTollens, negated_hypothesis, self.clone())
						.requiring(conclusion.negate())
						.into();
				}
				if let Implies { hypothesis: wanted_hypothesis, conclusion: wanted_conclusion, positive: true } = target {
					if wanted_hypothesis == hypothesis {
						return ProofStep::derived(Rule::ChainRule, target.clone(), self.clone())
							.requiring(Formula::implies((**conclusion).clone(), (**wanted_conclusion).clone()))
							.into();
					}
					if wanted_conclusion == conclusion {
						return ProofStep::derived(Rule::ChainRule, target.clone(), self.clone())
							.requiring(Formula::implies((**wanted_hypothesis).clone(), (**hypothesis).clone()))
							.into();
					}
					if self.contrapositive().as_ref() == Some(target) {
						return Derivation::Derived(ProofStep::derived(Rule::Contrapositive, target.clone(), self.clone()));
					}
				}
				combine(self, target)
			},
		}
	}
}

/// `premise` shows up in `part` directly, or through one of its own operands when it is an `And` or `Or`.
fn shares_operand(premise: &Formula, part: &Formula) -> bool {
	use Formula::*;

	if part.contains(premise) {
		return true;
	}
	match premise {
		And { left, right, .. } | Or { left, right, .. } => part.contains(left) || part.contains(right),
		_ => false,
	}
}

/// Like `shares_operand`, but an implication also counts through its conclusion,
/// negated hypothesis or contrapositive.
fn supports_conjunct(premise: &Formula, part: &Formula) -> bool {
	if shares_operand(premise, part) {
		return true;
	}
	match premise {
		Formula::Implies { hypothesis, conclusion, .. } => {
			part.contains(conclusion)
				|| part.contains(&hypothesis.negate())
				|| premise.contrapositive().map_or(false, |contrapositive| part.contains(&contrapositive))
		},
		_ => false,
	}
}

/// Builds a wanted positive `Or`/`And` out of a known formula.
///
/// Disjunctive Addition needs nothing else; the Law of Conjunction additionally
/// requires the conjunct `premise` did not match.
pub fn combine(premise: &Formula, whole: &Formula) -> Derivation {
	use Formula::*;

	match whole {
		Or { left, right, positive: true } => {
			if shares_operand(premise, left) || shares_operand(premise, right) {
				Derivation::Derived(ProofStep::derived(Rule::DisjunctiveAddition, whole.clone(), premise.clone()))
			} else {
				Derivation::NoRule
			}
		},
		And { left, right, positive: true } => {
			let required = if supports_conjunct(premise, left) {
				right
			} else if supports_conjunct(premise, right) {
				left
			} else {
				return Derivation::NoRule;
			};
			ProofStep::derived(Rule::Conjunction, whole.clone(), premise.clone())
				.requiring((**required).clone())
				.into()
		},
		_ => Derivation::NoRule,
	}
}

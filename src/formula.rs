use std::fmt;
use thiserror::Error;

use crate::step::Rule;

/// Marker that turns an atom name into its negative atom: `~x`.
pub const NEGATION_MARKER: char = '~';

/// Propositional formula. A negation of the whole formula is kept as `positive: false` instead of a separate node.
#[derive(Clone, Debug)]
pub enum Formula {
	/// `a`, `~a`. The negation marker is not part of `name`.
	Atom {
		name: String,
		positive: bool,
	},

	/// `a ^ b`
	And {
		left: Box<Formula>,
		right: Box<Formula>,
		positive: bool,
	},

	/// `a V b`
	Or {
		left: Box<Formula>,
		right: Box<Formula>,
		positive: bool,
	},

	/// `a --> b`
	Implies {
		hypothesis: Box<Formula>,
		conclusion: Box<Formula>,
		positive: bool,
	},
}

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy)]
pub enum Connective {
	And,
	Or,
	Implies,
}

impl Connective {
	pub fn symbol(self) -> &'static str {
		match self {
			Connective::And => "^",
			Connective::Or => "V",
			Connective::Implies => "-->",
		}
	}

	pub fn build(self, left: Formula, right: Formula, positive: bool) -> Formula {
		let (left, right) = (Box::new(left), Box::new(right));
		match self {
			Connective::And => Formula::And { left, right, positive },
			Connective::Or => Formula::Or { left, right, positive },
			Connective::Implies => Formula::Implies { hypothesis: left, conclusion: right, positive },
		}
	}
}

/// `normalize` was called on something that has no positive normal form.
#[derive(Clone, Debug, Error)]
#[error("`{formula}` has no polarity normal form, only negative compound formulas do")]
pub struct NormalizationError {
	pub formula: Formula,
}

impl Formula {
	/// Reads a leading `~` as the negative atom for the rest of the name.
	pub fn atom(text: &str) -> Formula {
		match text.strip_prefix(NEGATION_MARKER) {
			Some(name) => Formula::Atom { name: name.to_string(), positive: false },
			None => Formula::Atom { name: text.to_string(), positive: true },
		}
	}

	pub fn and(left: Formula, right: Formula) -> Formula {
		Connective::And.build(left, right, true)
	}

	pub fn or(left: Formula, right: Formula) -> Formula {
		Connective::Or.build(left, right, true)
	}

	pub fn implies(hypothesis: Formula, conclusion: Formula) -> Formula {
		Connective::Implies.build(hypothesis, conclusion, true)
	}

	pub fn is_positive(&self) -> bool {
		use Formula::*;

		match self {
			Atom { positive, .. } |
			And { positive, .. } |
			Or { positive, .. } |
			Implies { positive, .. } => *positive,
		}
	}

	pub fn is_atom(&self) -> bool {
		matches!(self, Formula::Atom { .. })
	}

	/// Negative `And`, `Or` or `Implies`, the only shapes `normalize` accepts.
	pub fn is_negative_compound(&self) -> bool {
		!self.is_atom() && !self.is_positive()
	}

	pub fn connective(&self) -> Option<Connective> {
		use Formula::*;

		match self {
			Atom { .. } => None,
			And { .. } => Some(Connective::And),
			Or { .. } => Some(Connective::Or),
			Implies { .. } => Some(Connective::Implies),
		}
	}

	/// Left and right operands of a compound, in written order.
	pub fn operands(&self) -> Option<(&Formula, &Formula)> {
		use Formula::*;

		match self {
			Atom { .. } => None,
			And { left, right, .. } |
			Or { left, right, .. } => Some((left, right)),
			Implies { hypothesis, conclusion, .. } => Some((hypothesis, conclusion)),
		}
	}

	/// Flips polarity of the whole formula, children stay untouched.
	pub fn negate(&self) -> Formula {
		use Formula::*;

		match self.clone() {
			Atom { name, positive } => Atom { name, positive: !positive },
			And { left, right, positive } => And { left, right, positive: !positive },
			Or { left, right, positive } => Or { left, right, positive: !positive },
			Implies { hypothesis, conclusion, positive } => Implies { hypothesis, conclusion, positive: !positive },
		}
	}

	/// True if `other` is this formula or occurs anywhere below it.
	pub fn contains(&self, other: &Formula) -> bool {
		if self == other {
			return true;
		}
		match self.operands() {
			Some((left, right)) => left.contains(other) || right.contains(other),
			None => false,
		}
	}

	/// Pushes a top-level negation one level inward:
	/// `~(a ^ b)` is `~a V ~b`, `~(a V b)` is `~a ^ ~b`, `~(h --> c)` is `h ^ ~c`.
	pub fn normalize(&self) -> Result<Formula, NormalizationError> {
		use Formula::*;

		match self {
			And { left, right, positive: false } => Ok(Formula::or(left.negate(), right.negate())),
			Or { left, right, positive: false } => Ok(Formula::and(left.negate(), right.negate())),
			Implies { hypothesis, conclusion, positive: false } => Ok(Formula::and((**hypothesis).clone(), conclusion.negate())),
			_ => Err(NormalizationError { formula: self.clone() }),
		}
	}

	/// Rule tag justifying `normalize` of this shape.
	pub fn normalization_rule(&self) -> Result<Rule, NormalizationError> {
		match self.connective() {
			Some(Connective::And) | Some(Connective::Or) => Ok(Rule::DeMorgan),
			Some(Connective::Implies) => Ok(Rule::ConditionalNormalization),
			None => Err(NormalizationError { formula: self.clone() }),
		}
	}

	/// `~c --> ~h` for `h --> c`. Always positive.
	pub fn contrapositive(&self) -> Option<Formula> {
		match self {
			Formula::Implies { hypothesis, conclusion, .. } => Some(Formula::implies(conclusion.negate(), hypothesis.negate())),
			_ => None,
		}
	}
}

impl PartialEq for Formula {
	fn eq(&self, other: &Formula) -> bool {
		use Formula::*;

		match (self, other) {
			(Atom { name: a, positive: pa }, Atom { name: b, positive: pb }) => a == b && pa == pb,
			(And { left: la, right: ra, positive: pa }, And { left: lb, right: rb, positive: pb }) |
			(Or { left: la, right: ra, positive: pa }, Or { left: lb, right: rb, positive: pb }) => {
				pa == pb && ((la == lb && ra == rb) || (la == rb && ra == lb))
			},
			(
				Implies { hypothesis: ha, conclusion: ca, positive: pa },
				Implies { hypothesis: hb, conclusion: cb, positive: pb },
			) => pa == pb && ha == hb && ca == cb,
			_ => false,
		}
	}
}

impl Eq for Formula {}

/// Operand of a connective: a positive compound needs parentheses, a negative one carries its own.
struct Operand<'a>(&'a Formula);

impl fmt::Display for Operand<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if !self.0.is_atom() && self.0.is_positive() {
			write!(f, "({})", self.0)
		} else {
			write!(f, "{}", self.0)
		}
	}
}

impl fmt::Display for Formula {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Formula::Atom { name, positive: true } => write!(f, "{}", name),
			Formula::Atom { name, positive: false } => write!(f, "{}{}", NEGATION_MARKER, name),
			_ => {
				let (left, right) = self.operands().ok_or(fmt::Error)?;
				let symbol = self.connective().ok_or(fmt::Error)?.symbol();
				if self.is_positive() {
					write!(f, "{} {} {}", Operand(left), symbol, Operand(right))
				} else {
					write!(f, "{}({} {} {})", NEGATION_MARKER, Operand(left), symbol, Operand(right))
				}
			},
		}
	}
}

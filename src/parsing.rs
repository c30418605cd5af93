use crate::formula::{Connective, Formula};
use crate::utils::span::{GlobalSpan, Spanned};

/// Premises and target read from a problem file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Problem {
	pub premises: Vec<Spanned<Formula>>,
	pub target: Spanned<Formula>,
}

impl Problem {
	pub fn premise_formulas(&self) -> Vec<Formula> {
		self.premises.iter().map(|premise| premise.inner.clone()).collect()
	}
}

pub type ParseError = peg::error::ParseError<peg::str::LineCol>;

// Infix chains are grouped only by explicit parentheses: `a ^ b ^ c` is rejected.
peg::parser!(
	pub grammar parser() for str {
		pub rule formula() -> Formula
			= _ f:expr() _ { f }

		// a --> b;
		// a;
		// |- b
		pub rule problem() -> Problem
			= __ premises:(p:spanned_expr() _ ";" __ { p })* "|-" _ target:spanned_expr() _ (";" __)? __ {
				Problem { premises, target }
			}

		rule spanned_expr() -> Spanned<Formula>
			= start:position!() f:expr() end:position!() { Spanned::new(f, GlobalSpan(start..end)) }

		rule expr() -> Formula
			= l:operand() _ c:connective() _ r:operand() { c.build(l, r, true) }
			/ operand()

		rule operand() -> Formula
			= "~" _ "(" _ l:operand() _ c:connective() _ r:operand() _ ")" { c.build(l, r, false) }
			/ "(" _ e:expr() _ ")" { e }
			/ atom()

		rule connective() -> Connective
			= "^" { Connective::And }
			/ "-->" { Connective::Implies }
			/ "V" !ident_char() { Connective::Or }

		rule atom() -> Formula
			= negated:"~"? name:identifier() { Formula::Atom { name, positive: negated.is_none() } }

		rule identifier() -> String
			= !("V" !ident_char()) n:$(['a'..='z' | 'A'..='Z' | '_'] ident_char()*) { String::from(n) }

		rule ident_char()
			= ['a'..='z' | 'A'..='Z' | '_' | '0'..='9']

		rule _() = quiet!{[' ' | '\t']*}

		rule __() = quiet!{([' ' | '\t' | '\r' | '\n'] / "#" (!['\n'] [_])*)*}
	}
);

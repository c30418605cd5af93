use log::{debug, info, trace};

use crate::formula::Formula;
use crate::proof::{Proof, ProofError};
use crate::rules::Derivation;
use crate::step::ProofStep;

/// Knobs of the proof search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
	/// How many goals may be nested while resolving requirements.
	pub max_depth: usize,
	/// Retry an exhausted goal once, also matching the negation of the sought formula.
	/// This matching is not sound for some negated disjunction premises.
	pub relaxed_fallback: bool,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			max_depth: 16,
			relaxed_fallback: true,
		}
	}
}

/// Everything one branch of the search produced so far. Attempts work on a fork
/// and are merged back only when they succeed.
#[derive(Clone, Debug, Default)]
struct Trail {
	/// Givens plus the normal forms learned on the way.
	premises: Vec<Formula>,
	/// Derivations in discovery order: the sought formula first, its requirements after.
	steps: Vec<ProofStep>,
	/// Normalizations to splice in right after the line of their source.
	normalizations: Vec<ProofStep>,
	/// Goals being sought on the current path.
	goals: Vec<Formula>,
}

impl Trail {
	fn knows(&self, formula: &Formula) -> bool {
		self.premises.iter().any(|premise| premise == formula)
	}

	fn learn(&mut self, normalization: ProofStep) {
		if !self.knows(&normalization.value) {
			self.premises.push(normalization.value.clone());
			self.normalizations.push(normalization);
		}
	}

	fn fork(&self) -> Trail {
		Trail {
			premises: self.premises.clone(),
			steps: Vec::new(),
			normalizations: Vec::new(),
			goals: self.goals.clone(),
		}
	}

	fn commit(&mut self, attempt: Trail) {
		self.premises = attempt.premises;
		self.steps.extend(attempt.steps);
		self.normalizations.extend(attempt.normalizations);
	}
}

/// Backtracking search for a natural deduction proof.
#[derive(Debug, Clone, Default)]
pub struct ProofSearch {
	config: SearchConfig,
}

impl ProofSearch {
	pub fn new(config: SearchConfig) -> Self {
		Self { config }
	}

	pub fn prove(&self, premises: &[Formula], target: &Formula) -> Result<Proof, ProofError> {
		info!("proving `{}` from {} premises", target, premises.len());

		let mut trail = Trail {
			premises: premises.to_vec(),
			..Trail::default()
		};
		for premise in premises {
			if let Some(normalization) = ProofStep::normalization_of(premise)? {
				debug!("premise `{}` normalized to `{}`", premise, normalization.value);
				trail.learn(normalization);
			}
		}

		self.find(target, false, &mut trail)?;
		let proof = assemble(premises, trail)?;
		info!("proof of `{}` has {} lines", target, proof.len());
		Ok(proof)
	}

	fn find(&self, target: &Formula, relaxed: bool, trail: &mut Trail) -> Result<(), ProofError> {
		if trail.goals.contains(target) {
			trace!("`{}` is already sought on this path", target);
			return Err(ProofError::Unprovable { target: target.clone() });
		}
		if trail.goals.len() >= self.config.max_depth {
			debug!("depth limit {} reached at `{}`", self.config.max_depth, target);
			return Err(ProofError::Unprovable { target: target.clone() });
		}

		trail.goals.push(target.clone());
		let result = self.find_goal(target, relaxed, trail);
		trail.goals.pop();
		result
	}

	fn find_goal(&self, target: &Formula, relaxed: bool, trail: &mut Trail) -> Result<(), ProofError> {
		debug!("seeking `{}`{}", target, if relaxed { " in relaxed mode" } else { "" });

		if trail.knows(target) {
			trail.steps.push(ProofStep::given(target.clone()));
			return Ok(());
		}

		let mut immediate = Vec::new();
		let mut closable = Vec::new();
		let mut open = Vec::new();
		for premise in &trail.premises {
			match premise.try_derive(target, relaxed) {
				Derivation::NoRule => {},
				Derivation::Derived(step) => immediate.push(step),
				Derivation::RequiresFurtherProof(step) => {
					if step.required.as_ref().map_or(false, |required| trail.knows(required)) {
						closable.push(step);
					} else {
						open.push(step);
					}
				},
			}
		}
		trace!(
			"`{}`: {} immediate, {} closable, {} open candidates",
			target, immediate.len(), closable.len(), open.len(),
		);

		for step in immediate.into_iter().chain(closable) {
			match self.attempt(step, target, relaxed, trail) {
				Ok(attempt) => {
					trail.commit(attempt);
					return Ok(());
				},
				Err(err) if err.is_branch_failure() => trace!("candidate for `{}` failed: {}", target, err),
				Err(err) => return Err(err),
			}
		}

		let mut best: Option<Trail> = None;
		for step in open {
			if let Some(required) = &step.required {
				trace!("trying `{}` for `{}`, requires `{}`", step.value, target, required);
			}
			match self.attempt(step, target, relaxed, trail) {
				Ok(attempt) => {
					if best.as_ref().map_or(true, |best| attempt.steps.len() < best.steps.len()) {
						best = Some(attempt);
					}
				},
				Err(err) if err.is_branch_failure() => trace!("candidate for `{}` failed: {}", target, err),
				Err(err) => return Err(err),
			}
		}
		if let Some(best) = best {
			debug!("`{}` derived with {} steps", target, best.steps.len());
			trail.commit(best);
			return Ok(());
		}

		if !relaxed && self.config.relaxed_fallback {
			debug!("nothing derives `{}`, retrying in relaxed mode", target);
			return self.find_goal(target, true, trail);
		}
		Err(ProofError::Unprovable { target: target.clone() })
	}

	/// Runs `complete` on a fork of `trail`.
	fn attempt(&self, step: ProofStep, target: &Formula, relaxed: bool, trail: &Trail) -> Result<Trail, ProofError> {
		let mut attempt = trail.fork();
		self.complete(step, target, relaxed, &mut attempt)?;
		Ok(attempt)
	}

	/// Records `step`, keeps deriving from its value until `target` is reached,
	/// then proves whatever the step still requires.
	fn complete(&self, step: ProofStep, target: &Formula, relaxed: bool, trail: &mut Trail) -> Result<(), ProofError> {
		let mut current = step.value.clone();
		if current != *target {
			if let Some(normalization) = ProofStep::normalization_of(&current)? {
				debug!("derived `{}` normalized to `{}`", current, normalization.value);
				current = normalization.value.clone();
				trail.learn(normalization);
			}
		}

		if current != *target {
			let next = current
				.try_derive(target, relaxed)
				.into_step()
				.ok_or_else(|| ProofError::Unprovable { target: target.clone() })?;
			self.complete(next, target, relaxed, trail)?;
		}

		trail.steps.push(step.clone());
		if let Some(required) = &step.required {
			if !trail.knows(required) {
				self.find(required, false, trail)?;
			}
		}
		Ok(())
	}
}

/// Givens first, then derivations in reverse discovery order, each normalization
/// right after the line of its source.
///
/// A derivation waits until every formula it cites is placed; the first pending
/// one that can go is taken.
fn assemble(premises: &[Formula], trail: Trail) -> Result<Proof, ProofError> {
	let Trail { steps: discovered, normalizations, .. } = trail;
	let known = |formula: &Formula| {
		premises.contains(formula) || normalizations.iter().any(|normalization| normalization.value == *formula)
	};

	let mut pending: Vec<ProofStep> = discovered
		.into_iter()
		.rev()
		.filter(|step| !(step.is_given() && known(&step.value)))
		.collect();
	let mut layout = Layout {
		steps: Vec::new(),
		normalizations,
	};
	for premise in premises {
		layout.place(ProofStep::given(premise.clone()))?;
	}

	while !pending.is_empty() {
		let next = pending
			.iter()
			.position(|step| layout.cites_placed(step))
			.ok_or_else(|| layout.missing_citation(&pending[0]))?;
		if next > 0 {
			trace!("`{}` placed ahead of {} pending lines", pending[next].value, next);
		}
		let step = pending.remove(next);
		layout.place(step)?;
	}

	if let Some(normalization) = layout.normalizations.first() {
		return Err(layout.missing_citation(normalization));
	}
	Proof::new(layout.steps)
}

/// Proof lines placed so far and the normalizations still waiting for their source.
struct Layout {
	steps: Vec<ProofStep>,
	normalizations: Vec<ProofStep>,
}

impl Layout {
	fn is_placed(&self, formula: &Formula) -> bool {
		self.steps.iter().any(|step| step.value == *formula)
	}

	fn cites_placed(&self, step: &ProofStep) -> bool {
		step.operand.iter().chain(&step.required).all(|cited| self.is_placed(cited))
	}

	fn missing_citation(&self, step: &ProofStep) -> ProofError {
		let cited = step.operand.iter().chain(&step.required).find(|cited| !self.is_placed(cited));
		match cited {
			Some(cited) => ProofError::MissingCitation {
				step: step.value.clone(),
				cited: cited.clone(),
			},
			None => ProofError::MissingOperand { step: step.value.clone() },
		}
	}

	/// Appends `step`, then every normalization of its value.
	fn place(&mut self, step: ProofStep) -> Result<(), ProofError> {
		let value = step.value.clone();
		self.steps.push(step);

		let mut index = 0;
		while index < self.normalizations.len() {
			let normalization = &self.normalizations[index];
			let source = normalization.operand.as_ref().ok_or_else(|| ProofError::MissingOperand {
				step: normalization.value.clone(),
			})?;
			if *source == value {
				let normalization = self.normalizations.remove(index);
				self.place(normalization)?;
			} else {
				index += 1;
			}
		}
		Ok(())
	}
}

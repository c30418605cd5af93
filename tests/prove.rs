use natded::{parser, prove, prove_text, read_problem, Formula, Proof, ProofError, ProofSearch, ProofStep, Rule, SearchConfig};

fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn f(text: &str) -> Formula {
	parser::formula(text).unwrap()
}

fn formulas(texts: &[&str]) -> Vec<Formula> {
	texts.iter().map(|text| f(text)).collect()
}

macro_rules! proves {
	([$($premise:expr),* $(,)?], $target:expr, $expected:expr) => {{
		init_logger();
		let proof = prove_text(&[$($premise),*], $target).unwrap();
		assert_eq!(proof, $expected);
	}};
}

fn assert_citations_precede(proof: &Proof) {
	for (index, cited) in proof.citations().iter().enumerate() {
		for line in cited {
			assert!(*line >= 1 && *line < index + 1, "line {} cites {}:\n{}", index + 1, line, proof);
		}
	}
}

#[test]
fn detachment() {
	proves!(
		["a --> b", "a"],
		"b",
		"1) a --> b -- Given\n2) a -- Given\n3) b -- Detachment (1, 2)\nQ.E.D"
	);
}

#[test]
fn disjunctive_inference() {
	let premises = vec![Formula::or(Formula::atom("a"), Formula::atom("b")), Formula::atom("a").negate()];
	assert_eq!(
		prove(&premises, &Formula::atom("b")).unwrap(),
		"1) a V b -- Given\n2) ~a -- Given\n3) b -- Disjunctive inference (1, 2)\nQ.E.D",
	);
}

#[test]
fn simplification() {
	proves!(["a ^ b"], "a", "1) a ^ b -- Given\n2) a -- Simplification (1)\nQ.E.D");
}

#[test]
fn chain_rule() {
	proves!(
		["a --> b", "b --> c"],
		"a --> c",
		"1) a --> b -- Given\n2) b --> c -- Given\n3) a --> c -- Chain Rule (1, 2)\nQ.E.D"
	);
}

#[test]
fn contrapositive() {
	proves!(["a --> b"], "~b --> ~a", "1) a --> b -- Given\n2) ~b --> ~a -- Contrapositive (1)\nQ.E.D");
}

#[test]
fn conjunction_and_addition() {
	proves!(["a", "b"], "a ^ b", "1) a -- Given\n2) b -- Given\n3) a ^ b -- Law of Conjunction (1, 2)\nQ.E.D");
	proves!(["a"], "a V c", "1) a -- Given\n2) a V c -- Disjunctive Addition (1)\nQ.E.D");
}

#[test]
fn given_target_is_not_repeated() {
	proves!(["a", "b"], "a", "1) a -- Given\n2) b -- Given\nQ.E.D");
}

#[test]
fn unprovable_after_relaxed_mode() {
	init_logger();
	let premises = vec![Formula::implies(Formula::atom("a"), Formula::atom("b")).negate()];
	match prove(&premises, &Formula::atom("c")) {
		Err(ProofError::Unprovable { target }) => assert_eq!(target, Formula::atom("c")),
		other => panic!("expected a proof failure, got {:?}", other),
	}
}

#[test]
fn negated_premise_is_normalized_next_to_its_line() {
	let premises = vec![Formula::and(Formula::atom("~c"), Formula::atom("d")).negate(), Formula::atom("~c")];
	assert_eq!(
		prove(&premises, &Formula::atom("~d")).unwrap(),
		"1) ~(~c ^ d) -- Given\n2) c V ~d -- De Morgan's law (1)\n3) ~c -- Given\n4) ~d -- Disjunctive inference (2, 3)\nQ.E.D",
	);
}

#[test]
fn derivation_continues_from_derived_value() {
	proves!(
		["p --> (q V r)", "p", "~r"],
		"q",
		"1) p --> (q V r) -- Given\n2) p -- Given\n3) ~r -- Given\n4) q V r -- Detachment (1, 2)\n5) q -- Disjunctive inference (4, 3)\nQ.E.D"
	);
}

#[test]
fn derived_negative_compound_is_normalized() {
	proves!(
		["a --> ~(b V c)", "a"],
		"~b",
		"1) a --> ~(b V c) -- Given\n2) a -- Given\n3) ~(b V c) -- Detachment (1, 2)\n4) ~b ^ ~c -- De Morgan's law (3)\n5) ~b -- Simplification (4)\nQ.E.D"
	);

	let search = ProofSearch::new(SearchConfig { relaxed_fallback: false, ..SearchConfig::default() });
	let result = search.prove(&formulas(&["a --> ~(b V c)", "a"]), &f("~b"));
	assert!(matches!(result, Err(ProofError::Unprovable { .. })));
}

#[test]
fn shortest_requirement_is_chosen() {
	proves!(
		["p --> q", "r --> q", "s --> r", "s", "t --> p", "u --> t", "u"],
		"q",
		"1) p --> q -- Given\n2) r --> q -- Given\n3) s --> r -- Given\n4) s -- Given\n5) t --> p -- Given\n6) u --> t -- Given\n7) u -- Given\n8) r -- Detachment (3, 4)\n9) q -- Detachment (2, 8)\nQ.E.D"
	);
}

#[test]
fn equally_short_requirements_keep_the_first() {
	proves!(
		["a --> c", "b --> c", "d --> a", "d --> b", "d"],
		"c",
		"1) a --> c -- Given\n2) b --> c -- Given\n3) d --> a -- Given\n4) d --> b -- Given\n5) d -- Given\n6) a -- Detachment (3, 5)\n7) c -- Detachment (1, 6)\nQ.E.D"
	);
}

#[test]
fn failed_immediate_candidate_falls_through() {
	proves!(
		["(x V q) ^ z", "p --> q", "p"],
		"q",
		"1) (x V q) ^ z -- Given\n2) p --> q -- Given\n3) p -- Given\n4) q -- Detachment (2, 3)\nQ.E.D"
	);
}

#[test]
fn normal_form_from_sibling_requirement_is_placed_first() {
	proves!(
		["a --> (b V c)", "g --> ~(c V h)", "(~c ^ ~h) --> a", "g"],
		"b",
		"1) a --> (b V c) -- Given\n2) g --> ~(c V h) -- Given\n3) (~c ^ ~h) --> a -- Given\n4) g -- Given\n\
		 5) ~(c V h) -- Detachment (2, 4)\n6) ~c ^ ~h -- De Morgan's law (5)\n7) a -- Detachment (3, 6)\n\
		 8) b V c -- Detachment (1, 7)\n9) ~c -- Simplification (6)\n10) b -- Disjunctive inference (8, 9)\nQ.E.D"
	);
}

#[test]
fn normal_form_order_holds_for_any_premise_order() {
	init_logger();
	let premises = ["g", "(~c ^ ~h) --> a", "g --> ~(c V h)", "a --> (b V c)"];
	let proof = ProofSearch::default().prove(&formulas(&premises), &f("b")).unwrap();
	assert_citations_precede(&proof);
	assert_eq!(proof.conclusion(), Some(&f("b")));
}

#[test]
fn circular_premises_terminate() {
	init_logger();
	let result = ProofSearch::default().prove(&formulas(&["a --> b", "b --> a"]), &f("a"));
	match result {
		Err(ProofError::Unprovable { target }) => assert_eq!(target, f("a")),
		other => panic!("expected a proof failure, got {:?}", other),
	}
}

#[test]
fn worked_example() {
	init_logger();
	let proof = read_problem(include_str!("../problems/example.prf")).unwrap();
	assert_eq!(
		proof.to_string(),
		"1) ~d --> ~b -- Given\n\
		 2) ~x --> ~c -- Given\n\
		 3) (~b V h) --> (q V r) -- Given\n\
		 4) ~(~c ^ d) -- Given\n\
		 5) c V ~d -- De Morgan's law (4)\n\
		 6) d ^ ~b -- Given\n\
		 7) ~r -- Given\n\
		 8) ~q -- Given\n\
		 9) d -- Simplification (6)\n\
		 10) c -- Disjunctive inference (5, 9)\n\
		 11) x -- Modus Tollens (2, 10)\n\
		 Q.E.D"
	);
}

#[test]
fn problem_files() {
	assert!(read_problem(include_str!("../problems/chain.prf")).is_ok());
	assert!(read_problem(include_str!("../problems/unprovable.prf")).is_err());
	assert!(read_problem("a -->;\n|- a").is_err());
}

#[test]
fn citations_always_precede() {
	init_logger();
	let problems: &[(&[&str], &str)] = &[
		(&["a --> b", "a"], "b"),
		(&["p --> (q V r)", "p", "~r"], "q"),
		(&["a --> ~(b V c)", "a"], "~b"),
		(&["~(a V b)", "c --> a"], "~c"),
		(&["a", "b", "c"], "(a ^ b) ^ c"),
		(&["~d --> ~b", "~x --> ~c", "~(~c ^ d)", "d ^ ~b"], "x"),
		(&["p --> q", "r --> q", "s --> r", "s", "t --> p", "u --> t", "u"], "q"),
	];
	for (premises, target) in problems {
		let proof = ProofSearch::default().prove(&formulas(premises), &f(target)).unwrap();
		assert_citations_precede(&proof);
		assert_eq!(proof.conclusion(), Some(&f(target)));
	}
}

#[test]
fn citation_lookup_is_checked() {
	let missing = Proof::new(vec![ProofStep::derived(Rule::Simplification, f("a"), f("a ^ b"))]);
	assert!(matches!(missing, Err(ProofError::MissingCitation { .. })));

	let forward = Proof::new(vec![
		ProofStep::derived(Rule::Simplification, f("a"), f("a ^ b")),
		ProofStep::given(f("a ^ b")),
	]);
	assert!(matches!(forward, Err(ProofError::ForwardCitation { line: 1, cited: 2 })));

	let operandless = Proof::new(vec![ProofStep { rule: Some(Rule::Detachment), value: f("a"), operand: None, required: None }]);
	assert!(matches!(operandless, Err(ProofError::MissingOperand { .. })));
}

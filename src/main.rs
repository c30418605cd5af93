use colored::Colorize;
use natded::read_problem;

fn check_problem(path: &str) -> Result<String, String> {
	let input = std::fs::read_to_string(path).map_err(|err| format!("can't read `{}`: {}", path, err))?;
	let proof = read_problem(&input).map_err(|_| format!("`{}` has no proof", path))?;
	Ok(proof.to_string())
}

fn main() {
	env_logger::init();

	let path = std::env::args().nth(1).unwrap_or_else(|| String::from("problems/example.prf"));
	match check_problem(&path) {
		Ok(proof) => {
			println!("{}", proof);
			println!("{}", format!("`{}` is proven", path).green().bold());
		},
		Err(err) => {
			eprintln!("{}", err.red().bold());
			std::process::exit(1);
		},
	}
}

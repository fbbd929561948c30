use std::process::ExitCode;

use mython::{cli::Cli, Mython, MythonError};
use palc::Parser;

fn main() -> ExitCode {
	let cli = match Cli::try_parse_from(std::env::args_os()) {
		Ok(cli) => cli,
		Err(error) => {
			eprintln!("{error}");
			eprintln!("Usage: mython <input_file> <output_file>");
			return ExitCode::from(1);
		}
	};

	let mython = Mython;
	match mython.run_file(&cli.input, &cli.output) {
		Ok(()) => ExitCode::SUCCESS,
		// File open/flush failures, as opposed to program failures.
		Err(error @ MythonError::Internal(_)) => {
			eprintln!("{error}");
			ExitCode::from(2)
		}
		Err(error) => {
			eprintln!("{error}");
			ExitCode::from(3)
		}
	}
}

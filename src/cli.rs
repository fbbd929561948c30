use std::path::PathBuf;

use palc::Parser;

/// CLI arguments
#[derive(Parser)]
#[command(name = "mython", long_about = "Interpreter for the Mython scripting language")]
pub struct Cli {
	/// Source program to execute
	pub input:  PathBuf,
	/// File receiving program output
	pub output: PathBuf,
}

use std::{fs, io::BufWriter, path::Path};

use anyhow::Context as _;

use crate::{
	closure::Closure,
	error::MythonError,
	interpreter::{context::{Context, SimpleContext}, Interpreter},
	lexer::Lexer,
	parser::Parser,
};

/// The interpreter façade: compile and execute a complete program.
pub struct Mython;

impl Mython {
	/// Runs a source file, writing program output to `output`.
	pub fn run_file(&self, input: &Path, output: &Path) -> Result<(), MythonError> {
		let source = fs::read_to_string(input)
			.with_context(|| format!("failed to open input file {}", input.display()))?;
		let file = fs::File::create(output)
			.with_context(|| format!("failed to open output file {}", output.display()))?;
		let mut context = SimpleContext::new(BufWriter::new(file));
		self.run(&source, &mut context)?;
		context.output_stream().flush().context("failed to flush output file")?;
		Ok(())
	}

	/// Compiles `source` and executes it against `context` with an
	/// empty module closure.
	pub fn run(&self, source: &str, context: &mut dyn Context) -> Result<(), MythonError> {
		let lexer = Lexer::new(source)?;
		let program = Parser::new(lexer).parse_program()?;
		let mut closure = Closure::new();
		Interpreter::new(context, &program.classes).execute_program(&program.statements, &mut closure)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::interpreter::context::MemoryContext;

	#[test]
	fn run_collects_output() {
		let mython = Mython;
		let mut context = MemoryContext::new();
		mython.run("print 'ok'\n", &mut context).unwrap();
		assert_eq!(context.output_str(), "ok\n");
	}

	#[test]
	fn errors_keep_their_phase() {
		let mython = Mython;
		let result = mython.run("x = 'bad\n", &mut MemoryContext::new());
		assert!(matches!(result, Err(MythonError::Parsing(_))));
		let result = mython.run("print missing\n", &mut MemoryContext::new());
		assert!(matches!(result, Err(MythonError::Runtime(_))));
	}
}

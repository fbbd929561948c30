use std::io::Write;

/// Execution context handed to the interpreter. Its only concern is
/// the byte sink that `print` statements write to.
pub trait Context {
	fn output_stream(&mut self) -> &mut dyn Write;
}

/// Production context wrapping any writer, a buffered file in the CLI.
pub struct SimpleContext<W: Write> {
	output: W,
}

impl<W: Write> SimpleContext<W> {
	pub fn new(output: W) -> Self { Self { output } }
}

impl<W: Write> Context for SimpleContext<W> {
	fn output_stream(&mut self) -> &mut dyn Write { &mut self.output }
}

/// Context accumulating program output in memory. Tests run a program
/// against it and assert on the collected bytes.
#[derive(Default)]
pub struct MemoryContext {
	output: Vec<u8>,
}

impl MemoryContext {
	pub fn new() -> Self { Self::default() }

	pub fn output(&self) -> &[u8] { &self.output }

	/// Collected output as text. Mython source is UTF-8 and string
	/// literals are decoded from it, so program output is valid UTF-8.
	pub fn output_str(&self) -> std::borrow::Cow<'_, str> { String::from_utf8_lossy(&self.output) }
}

impl Context for MemoryContext {
	fn output_stream(&mut self) -> &mut dyn Write { &mut self.output }
}

pub mod parsing;
pub mod runtime;

/// MythonError is the top-level error type for the interpreter.
#[derive(thiserror::Error, Debug)]
pub enum MythonError {
	/// Internal error, should never happen during normal operation
	#[error("internal error: {0}")]
	Internal(#[from] anyhow::Error),
	#[error(transparent)]
	Parsing(#[from] parsing::ParsingError),
	#[error(transparent)]
	Runtime(#[from] runtime::RuntimeError),
}

/// Errors raised during evaluation. All are fatal to the running program.
#[derive(thiserror::Error, Debug)]
pub enum RuntimeError {
	#[error("name '{0}' is not defined")]
	UnknownName(String),
	#[error("'{0}' object has no field '{1}'")]
	UnknownField(String, String),
	#[error("field access on a value that is not a class instance")]
	NotAnInstance,
	#[error("'{0}' is not callable")]
	NotCallable(String),
	#[error("class '{class}' has no method '{method}' taking {arity} arguments")]
	NoSuchMethod { class: String, method: String, arity: usize },
	#[error("unsupported operand types for '{0}'")]
	UnsupportedOperands(&'static str),
	#[error("division by zero")]
	DivisionByZero,
	#[error("cannot compare these values")]
	IncomparableValues,
	#[error("failed to write program output: {0}")]
	Output(#[from] std::io::Error),
}

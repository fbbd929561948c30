/// A lexical or syntactic error with its source line.
///
/// Lexing and parsing share one error kind. Both stop at the first
/// error, there is no recovery.
#[derive(thiserror::Error, Debug)]
#[error("line {line}: {kind}")]
pub struct ParsingError {
	/// 1-based source line where the error was detected.
	line: usize,
	kind: ParsingErrorKind,
}

impl ParsingError {
	pub(crate) fn new(line: usize, kind: ParsingErrorKind) -> Self { Self { line, kind } }
}

#[derive(Debug)]
pub enum ParsingErrorKind {
	/// A byte the lexer has no rule for.
	UnexpectedCharacter(char),
	/// An escape sequence other than `\n \t \r \" \' \\`.
	UnknownEscape(char),
	/// A string literal interrupted by a raw newline or end of input.
	UnterminatedString,
	/// A decimal literal that does not fit a 64-bit integer.
	NumberOutOfRange(String),
	/// The parser found a token it has no production for.
	UnexpectedToken(String),
	/// A specific token was required.
	ExpectedToken { expected: String, found: String },
	/// An identifier was required.
	ExpectedIdentifier(String),
	/// A `:` introducing a block was not followed by an indented suite.
	ExpectedIndentedBlock,
	/// Class bodies may contain only `def` methods.
	ExpectedMethod(String),
	/// The parent in `class X(Y):` names no previously declared class.
	UnknownBaseClass(String),
	/// The left side of `=` is not a variable or field chain.
	InvalidAssignmentTarget,
}

impl std::fmt::Display for ParsingErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParsingErrorKind::*;
		match self {
			UnexpectedCharacter(c) => write!(f, "unexpected character '{c}'"),
			UnknownEscape(c) => write!(f, "unrecognized escape sequence \\{c}"),
			UnterminatedString => write!(f, "unterminated string literal"),
			NumberOutOfRange(s) => write!(f, "number literal '{s}' out of range"),
			UnexpectedToken(t) => write!(f, "unexpected token {t}"),
			ExpectedToken { expected, found } => write!(f, "expected {expected}, found {found}"),
			ExpectedIdentifier(t) => write!(f, "expected identifier, found {t}"),
			ExpectedIndentedBlock => write!(f, "expected an indented block"),
			ExpectedMethod(t) => write!(f, "expected 'def' inside class body, found {t}"),
			UnknownBaseClass(name) => write!(f, "unknown base class '{name}'"),
			InvalidAssignmentTarget => write!(f, "invalid assignment target"),
		}
	}
}

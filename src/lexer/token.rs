/// A token produced by the lexer.
///
/// Keywords get their own variant so the parser can match on them
/// directly instead of comparing identifier spellings. Block structure
/// is carried by the synthetic `Newline`/`Indent`/`Dedent` tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
	/// Non-negative decimal integer literal.
	Number(i64),
	/// Identifier, e.g. a variable, class or method name.
	Id(String),
	/// Decoded contents of a string literal.
	Str(String),
	/// Single punctuation character: `+ - * / ( ) . , : = < >` and friends.
	Char(char),
	/// `class` keyword.
	Class,
	/// `return` keyword.
	Return,
	/// `if` keyword.
	If,
	/// `else` keyword.
	Else,
	/// `def` keyword.
	Def,
	/// `print` keyword.
	Print,
	/// `and` keyword.
	And,
	/// `or` keyword.
	Or,
	/// `not` keyword.
	Not,
	/// `None` literal keyword.
	None,
	/// `True` literal keyword.
	True,
	/// `False` literal keyword.
	False,
	/// `==`
	Eq,
	/// `!=`
	NotEq,
	/// `<=`
	LessOrEq,
	/// `>=`
	GreaterOrEq,
	/// End of a logical line.
	Newline,
	/// Indentation increased by one level (two spaces).
	Indent,
	/// Indentation decreased by one level.
	Dedent,
	/// End of input.
	Eof,
}

impl Token {
	/// Maps a word to its keyword token, or wraps it as an identifier.
	pub fn keyword_or_id(word: String) -> Self {
		match word.as_str() {
			"class" => Token::Class,
			"return" => Token::Return,
			"if" => Token::If,
			"else" => Token::Else,
			"def" => Token::Def,
			"print" => Token::Print,
			"and" => Token::And,
			"or" => Token::Or,
			"not" => Token::Not,
			"None" => Token::None,
			"True" => Token::True,
			"False" => Token::False,
			_ => Token::Id(word),
		}
	}
}

impl std::fmt::Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Token::Number(n) => write!(f, "Number{{{n}}}"),
			Token::Id(id) => write!(f, "Id{{{id}}}"),
			Token::Str(s) => write!(f, "String{{{s}}}"),
			Token::Char(c) => write!(f, "Char{{{c}}}"),
			Token::Class => write!(f, "Class"),
			Token::Return => write!(f, "Return"),
			Token::If => write!(f, "If"),
			Token::Else => write!(f, "Else"),
			Token::Def => write!(f, "Def"),
			Token::Print => write!(f, "Print"),
			Token::And => write!(f, "And"),
			Token::Or => write!(f, "Or"),
			Token::Not => write!(f, "Not"),
			Token::None => write!(f, "None"),
			Token::True => write!(f, "True"),
			Token::False => write!(f, "False"),
			Token::Eq => write!(f, "Eq"),
			Token::NotEq => write!(f, "NotEq"),
			Token::LessOrEq => write!(f, "LessOrEq"),
			Token::GreaterOrEq => write!(f, "GreaterOrEq"),
			Token::Newline => write!(f, "Newline"),
			Token::Indent => write!(f, "Indent"),
			Token::Dedent => write!(f, "Dedent"),
			Token::Eof => write!(f, "Eof"),
		}
	}
}

//! Turns Mython source text into a token sequence.
//!
//! Unlike a brace-delimited language, block structure lives in the
//! layout: after every physical newline the lexer measures the leading
//! spaces (two per level) and emits synthetic `Indent`/`Dedent` tokens
//! for the difference against the previous level. Blank lines and
//! comment-only lines emit nothing at all, so a block may contain
//! vertical whitespace without closing itself.
//!
//! The whole input is scanned eagerly; the parser then walks the stored
//! sequence through [`Lexer::current`]/[`Lexer::advance`] and the
//! `expect` family.

mod token;

use std::{iter::Peekable, str::Chars};

pub use token::Token;

use crate::error::parsing::{ParsingError, ParsingErrorKind};

static EOF_TOKEN: Token = Token::Eof;

/// A lexer over a complete Mython source text.
#[derive(Debug)]
pub struct Lexer {
	/// Scanned tokens paired with their 1-based source line.
	tokens: Vec<(Token, usize)>,
	/// Index of the current token.
	cursor: usize,
}

impl Lexer {
	/// Scans `source` to completion.
	pub fn new(source: &str) -> Result<Self, ParsingError> {
		let tokens = Scanner::new(source).scan_all()?;
		Ok(Self { tokens, cursor: 0 })
	}

	/// The current token, or `Eof` once the sequence is exhausted.
	pub fn current(&self) -> &Token { self.tokens.get(self.cursor).map_or(&EOF_TOKEN, |(t, _)| t) }

	/// Moves to the next token and returns it.
	pub fn advance(&mut self) -> &Token {
		if self.cursor < self.tokens.len() {
			self.cursor += 1;
		}
		self.current()
	}

	/// Source line of the current token.
	pub fn line(&self) -> usize {
		match self.tokens.get(self.cursor) {
			Some((_, line)) => *line,
			None => self.tokens.last().map_or(1, |(_, line)| *line),
		}
	}

	/// Returns the current token if it equals `expected`, both in kind
	/// and payload.
	pub fn expect(&self, expected: &Token) -> Result<&Token, ParsingError> {
		let current = self.current();
		if current == expected {
			Ok(current)
		} else {
			Err(self.mismatch(expected, current))
		}
	}

	/// Advances, then behaves like [`Lexer::expect`].
	pub fn expect_next(&mut self, expected: &Token) -> Result<&Token, ParsingError> {
		self.advance();
		self.expect(expected)
	}

	/// Returns the spelling of the current token if it is an identifier.
	pub fn expect_id(&self) -> Result<&str, ParsingError> {
		match self.current() {
			Token::Id(id) => Ok(id),
			other => Err(ParsingError::new(
				self.line(),
				ParsingErrorKind::ExpectedIdentifier(other.to_string()),
			)),
		}
	}

	/// Advances, then behaves like [`Lexer::expect_id`].
	pub fn expect_next_id(&mut self) -> Result<&str, ParsingError> {
		self.advance();
		self.expect_id()
	}

	fn mismatch(&self, expected: &Token, found: &Token) -> ParsingError {
		ParsingError::new(
			self.line(),
			ParsingErrorKind::ExpectedToken { expected: expected.to_string(), found: found.to_string() },
		)
	}
}

/// One-shot scanner that eats the source and produces the token list.
struct Scanner<'a> {
	source: Peekable<Chars<'a>>,
	line:   usize,
	/// Active indentation level in units of two spaces.
	indent: usize,
	tokens: Vec<(Token, usize)>,
}

impl<'a> Scanner<'a> {
	fn new(source: &'a str) -> Self {
		Self { source: source.chars().peekable(), line: 1, indent: 0, tokens: Vec::new() }
	}

	fn scan_all(mut self) -> Result<Vec<(Token, usize)>, ParsingError> {
		loop {
			let spaces = self.count_leading_spaces();
			match self.peek() {
				None => break,
				Some('\n') => {
					// Blank line: no tokens, no indentation change.
					self.bump();
					continue;
				}
				Some('#') => {
					self.skip_comment();
					continue;
				}
				Some(_) => {}
			}
			self.set_indent(spaces / 2);
			if !self.scan_line()? {
				break;
			}
		}
		// A source that does not end in a newline still terminates its
		// last logical line.
		match self.tokens.last() {
			Some((Token::Newline | Token::Dedent, _)) => {}
			Some(_) => self.push(Token::Newline),
			None => {}
		}
		self.push(Token::Eof);
		Ok(self.tokens)
	}

	/// Scans tokens until the end of the physical line. The closing
	/// newline becomes a token only if the line produced at least one
	/// token of its own. Returns false once the input is exhausted.
	fn scan_line(&mut self) -> Result<bool, ParsingError> {
		let mut produced = false;
		loop {
			match self.peek() {
				None => return Ok(false),
				Some('\n') => {
					self.bump();
					if produced {
						self.push(Token::Newline);
					}
					return Ok(true);
				}
				Some(' ') | Some('\t') | Some('\r') => {
					self.bump();
					continue;
				}
				Some('#') => {
					self.skip_comment();
					continue;
				}
				Some(c) if c.is_ascii_digit() => self.scan_number()?,
				Some(c) if c.is_ascii_alphabetic() || c == '_' => self.scan_word(),
				Some('"') | Some('\'') => self.scan_string()?,
				Some(c) => self.scan_punctuation(c)?,
			}
			produced = true;
		}
	}

	fn count_leading_spaces(&mut self) -> usize {
		let mut count = 0;
		while self.peek() == Some(' ') {
			self.bump();
			count += 1;
		}
		count
	}

	fn set_indent(&mut self, new: usize) {
		if new > self.indent {
			for _ in 0..new - self.indent {
				self.push(Token::Indent);
			}
		} else {
			for _ in 0..self.indent - new {
				self.push(Token::Dedent);
			}
		}
		self.indent = new;
	}

	/// Consumes a `#` comment up to, but not including, the newline.
	fn skip_comment(&mut self) {
		while self.peek().is_some_and(|c| c != '\n') {
			self.bump();
		}
	}

	fn scan_number(&mut self) -> Result<(), ParsingError> {
		let mut digits = String::new();
		while let Some(c) = self.peek() {
			if !c.is_ascii_digit() {
				break;
			}
			digits.push(c);
			self.bump();
		}
		match digits.parse::<i64>() {
			Ok(value) => {
				self.push(Token::Number(value));
				Ok(())
			}
			Err(_) => Err(self.error(ParsingErrorKind::NumberOutOfRange(digits))),
		}
	}

	fn scan_word(&mut self) {
		let mut word = String::new();
		while let Some(c) = self.peek() {
			if !c.is_ascii_alphanumeric() && c != '_' {
				break;
			}
			word.push(c);
			self.bump();
		}
		self.push(Token::keyword_or_id(word));
	}

	/// Scans a quoted string. The delimiter has already been peeked; a
	/// raw newline or end of input before the closing quote is an error.
	fn scan_string(&mut self) -> Result<(), ParsingError> {
		let delimiter = self.bump().unwrap_or('"');
		let mut contents = String::new();
		loop {
			match self.peek() {
				None => return Err(self.error(ParsingErrorKind::UnterminatedString)),
				Some('\n') | Some('\r') => return Err(self.error(ParsingErrorKind::UnterminatedString)),
				Some(c) if c == delimiter => {
					self.bump();
					break;
				}
				Some('\\') => {
					self.bump();
					match self.bump() {
						Some('n') => contents.push('\n'),
						Some('t') => contents.push('\t'),
						Some('r') => contents.push('\r'),
						Some('"') => contents.push('"'),
						Some('\'') => contents.push('\''),
						Some('\\') => contents.push('\\'),
						Some(other) => return Err(self.error(ParsingErrorKind::UnknownEscape(other))),
						None => return Err(self.error(ParsingErrorKind::UnterminatedString)),
					}
				}
				Some(c) => {
					contents.push(c);
					self.bump();
				}
			}
		}
		self.push(Token::Str(contents));
		Ok(())
	}

	/// Scans a punctuation byte, folding `== != <= >=` into their
	/// two-character comparison tokens.
	fn scan_punctuation(&mut self, c: char) -> Result<(), ParsingError> {
		if !c.is_ascii_punctuation() {
			return Err(self.error(ParsingErrorKind::UnexpectedCharacter(c)));
		}
		self.bump();
		let token = match (c, self.peek()) {
			('=', Some('=')) => {
				self.bump();
				Token::Eq
			}
			('!', Some('=')) => {
				self.bump();
				Token::NotEq
			}
			('<', Some('=')) => {
				self.bump();
				Token::LessOrEq
			}
			('>', Some('=')) => {
				self.bump();
				Token::GreaterOrEq
			}
			_ => Token::Char(c),
		};
		self.push(token);
		Ok(())
	}

	fn peek(&mut self) -> Option<char> { self.source.peek().copied() }

	fn bump(&mut self) -> Option<char> {
		let c = self.source.next();
		if c == Some('\n') {
			self.line += 1;
		}
		c
	}

	fn push(&mut self, token: Token) { self.tokens.push((token, self.line)); }

	fn error(&self, kind: ParsingErrorKind) -> ParsingError { ParsingError::new(self.line, kind) }
}

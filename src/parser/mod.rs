//! Recursive-descent parser lowering the token stream into a syntax
//! tree.
//!
//! Grammar, one production per method:
//!
//! ``` BNF
//! program        -> statement* EOF ;
//! statement      -> class_def | if_stmt | simple_stmt NEWLINE ;
//! simple_stmt    -> assignment | return_stmt | print_stmt | expression ;
//! assignment     -> IDENTIFIER ( "." IDENTIFIER )* "=" expression ;
//! return_stmt    -> "return" expression ;
//! print_stmt     -> "print" ( expression ( "," expression )* )? ;
//! class_def      -> "class" IDENTIFIER ( "(" IDENTIFIER ")" )? ":" NEWLINE INDENT method+ DEDENT ;
//! method         -> "def" IDENTIFIER "(" params? ")" ":" suite ;
//! if_stmt        -> "if" expression ":" suite ( "else" ":" suite )? ;
//! suite          -> NEWLINE INDENT statement+ DEDENT ;
//! expression     -> or_expr ;
//! or_expr        -> and_expr ( "or" and_expr )* ;
//! and_expr       -> not_expr ( "and" not_expr )* ;
//! not_expr       -> "not" not_expr | comparison ;
//! comparison     -> add_expr ( ( "==" | "!=" | "<" | ">" | "<=" | ">=" ) add_expr )? ;
//! add_expr       -> mul_expr ( ( "+" | "-" ) mul_expr )* ;
//! mul_expr       -> unary ( ( "*" | "/" ) unary )* ;
//! unary          -> "-" unary | primary ;
//! primary        -> NUMBER | STRING | "True" | "False" | "None"
//!                 | IDENTIFIER ( "." IDENTIFIER )* ( "(" args? ")" )?
//!                 | "(" expression ")" ;
//! ```
//!
//! An assignment is recognized after the fact: a statement that parses
//! to a dotted variable chain and is followed by `=` becomes a store.
//! Comparisons do not chain; `a < b < c` fails to parse.
//!
//! The parser keeps a table of classes declared so far. `class X(Y):`
//! resolves `Y` against it immediately, and a call `X(...)` whose head
//! names a declared class is lowered to a construction node at parse
//! time.

pub(crate) mod expression;

use std::{collections::HashMap, rc::Rc};

use crate::{
	error::parsing::{ParsingError, ParsingErrorKind},
	interpreter::class::{Class, Method},
	lexer::{Lexer, Token},
	parser::expression::{BinaryOp, CompareOp, Expression, Literal, LogicalOp, UnaryOp},
	statement::Statement,
};

/// A parsed program: the top-level statements plus the table of every
/// declared class. The interpreter consults the table to resolve a
/// constructor call made from a method body, where the class name is
/// not among the frame's bindings.
pub struct Program {
	pub statements: Vec<Statement>,
	pub classes:    HashMap<String, Rc<Class>>,
}

pub struct Parser {
	lexer:   Lexer,
	/// Classes declared so far, for base-class and constructor lookup.
	classes: HashMap<String, Rc<Class>>,
}

impl Parser {
	pub fn new(lexer: Lexer) -> Self { Self { lexer, classes: HashMap::new() } }

	/// Parses a whole program: statements up to `Eof`.
	pub fn parse_program(mut self) -> Result<Program, ParsingError> {
		let mut statements = Vec::new();
		while *self.lexer.current() != Token::Eof {
			statements.push(self.statement()?);
		}
		Ok(Program { statements, classes: self.classes })
	}

	fn statement(&mut self) -> Result<Statement, ParsingError> {
		match self.lexer.current() {
			Token::Class => self.class_definition(),
			Token::If => self.if_statement(),
			_ => {
				let statement = self.simple_statement()?;
				self.consume(&Token::Newline)?;
				Ok(statement)
			}
		}
	}

	fn simple_statement(&mut self) -> Result<Statement, ParsingError> {
		match self.lexer.current() {
			Token::Return => {
				self.lexer.advance();
				Ok(Statement::Return(self.expression()?))
			}
			Token::Print => {
				self.lexer.advance();
				self.print_statement()
			}
			_ => {
				let expression = self.expression()?;
				if *self.lexer.current() == Token::Char('=') {
					self.assignment(expression)
				} else {
					Ok(Statement::Expression(expression))
				}
			}
		}
	}

	fn print_statement(&mut self) -> Result<Statement, ParsingError> {
		let mut args = Vec::new();
		if *self.lexer.current() != Token::Newline {
			args.push(self.expression()?);
			while self.eat(&Token::Char(',')) {
				args.push(self.expression()?);
			}
		}
		Ok(Statement::Print(args))
	}

	/// Turns an already parsed left-hand side into a store. Only a
	/// dotted variable chain may stand before `=`.
	fn assignment(&mut self, target: Expression) -> Result<Statement, ParsingError> {
		let Expression::Variable(mut chain) = target else {
			return Err(self.error(ParsingErrorKind::InvalidAssignmentTarget));
		};
		self.lexer.advance();
		let value = self.expression()?;
		// Chains are never empty by construction.
		let last = chain.pop().unwrap();
		if chain.is_empty() {
			Ok(Statement::Assignment { target: last, value })
		} else {
			Ok(Statement::FieldAssignment { object: Expression::Variable(chain), field: last, value })
		}
	}

	fn if_statement(&mut self) -> Result<Statement, ParsingError> {
		self.lexer.advance();
		let condition = self.expression()?;
		self.consume(&Token::Char(':'))?;
		let then_branch = self.suite()?;
		let else_branch = if self.eat(&Token::Else) {
			self.consume(&Token::Char(':'))?;
			Some(self.suite()?)
		} else {
			None
		};
		Ok(Statement::If { condition, then_branch, else_branch })
	}

	fn class_definition(&mut self) -> Result<Statement, ParsingError> {
		let name = self.lexer.expect_next_id()?.to_string();
		self.lexer.advance();
		let parent = if self.eat(&Token::Char('(')) {
			let parent_name = self.lexer.expect_id()?.to_string();
			self.lexer.advance();
			self.consume(&Token::Char(')'))?;
			let parent = self
				.classes
				.get(&parent_name)
				.cloned()
				.ok_or_else(|| self.error(ParsingErrorKind::UnknownBaseClass(parent_name)))?;
			Some(parent)
		} else {
			None
		};
		self.consume(&Token::Char(':'))?;
		self.consume(&Token::Newline)?;
		self.enter_block()?;

		let mut methods = Vec::new();
		loop {
			match self.lexer.current() {
				Token::Def => methods.push(self.method()?),
				Token::Dedent | Token::Eof => {
					if methods.is_empty() {
						return Err(self.error(ParsingErrorKind::ExpectedMethod(Token::Dedent.to_string())));
					}
					break;
				}
				other => return Err(self.error(ParsingErrorKind::ExpectedMethod(other.to_string()))),
			}
		}
		self.eat(&Token::Dedent);

		let class = Rc::new(Class::new(name.clone(), methods, parent));
		self.classes.insert(name, class.clone());
		Ok(Statement::ClassDecl(class))
	}

	fn method(&mut self) -> Result<Method, ParsingError> {
		let name = self.lexer.expect_next_id()?.to_string();
		self.lexer.expect_next(&Token::Char('('))?;
		self.lexer.advance();
		let mut formal_params = Vec::new();
		if *self.lexer.current() != Token::Char(')') {
			formal_params.push(self.lexer.expect_id()?.to_string());
			self.lexer.advance();
			while self.eat(&Token::Char(',')) {
				formal_params.push(self.lexer.expect_id()?.to_string());
				self.lexer.advance();
			}
		}
		self.consume(&Token::Char(')'))?;
		self.consume(&Token::Char(':'))?;
		let body = self.suite()?;
		Ok(Method { name, formal_params, body })
	}

	/// Parses an indented block. The closing `Dedent` may be missing at
	/// end of input, since the lexer does not auto-close indentation.
	fn suite(&mut self) -> Result<Vec<Statement>, ParsingError> {
		self.consume(&Token::Newline)?;
		self.enter_block()?;
		let mut statements = vec![self.statement()?];
		while !matches!(self.lexer.current(), Token::Dedent | Token::Eof) {
			statements.push(self.statement()?);
		}
		self.eat(&Token::Dedent);
		Ok(statements)
	}

	fn enter_block(&mut self) -> Result<(), ParsingError> {
		if *self.lexer.current() != Token::Indent {
			return Err(self.error(ParsingErrorKind::ExpectedIndentedBlock));
		}
		self.lexer.advance();
		Ok(())
	}

	fn expression(&mut self) -> Result<Expression, ParsingError> { self.or_expr() }

	fn or_expr(&mut self) -> Result<Expression, ParsingError> {
		let mut expression = self.and_expr()?;
		while self.eat(&Token::Or) {
			expression = Expression::Logical {
				left:  Box::new(expression),
				op:    LogicalOp::Or,
				right: Box::new(self.and_expr()?),
			};
		}
		Ok(expression)
	}

	fn and_expr(&mut self) -> Result<Expression, ParsingError> {
		let mut expression = self.not_expr()?;
		while self.eat(&Token::And) {
			expression = Expression::Logical {
				left:  Box::new(expression),
				op:    LogicalOp::And,
				right: Box::new(self.not_expr()?),
			};
		}
		Ok(expression)
	}

	fn not_expr(&mut self) -> Result<Expression, ParsingError> {
		if self.eat(&Token::Not) {
			Ok(Expression::Unary { op: UnaryOp::Not, operand: Box::new(self.not_expr()?) })
		} else {
			self.comparison()
		}
	}

	fn comparison(&mut self) -> Result<Expression, ParsingError> {
		let left = self.add_expr()?;
		let op = match self.lexer.current() {
			Token::Eq => CompareOp::Eq,
			Token::NotEq => CompareOp::NotEq,
			Token::LessOrEq => CompareOp::LessOrEq,
			Token::GreaterOrEq => CompareOp::GreaterOrEq,
			Token::Char('<') => CompareOp::Less,
			Token::Char('>') => CompareOp::Greater,
			_ => return Ok(left),
		};
		self.lexer.advance();
		Ok(Expression::Comparison { left: Box::new(left), op, right: Box::new(self.add_expr()?) })
	}

	fn add_expr(&mut self) -> Result<Expression, ParsingError> {
		let mut expression = self.mul_expr()?;
		loop {
			let op = match self.lexer.current() {
				Token::Char('+') => BinaryOp::Add,
				Token::Char('-') => BinaryOp::Sub,
				_ => return Ok(expression),
			};
			self.lexer.advance();
			expression =
				Expression::Binary { left: Box::new(expression), op, right: Box::new(self.mul_expr()?) };
		}
	}

	fn mul_expr(&mut self) -> Result<Expression, ParsingError> {
		let mut expression = self.unary()?;
		loop {
			let op = match self.lexer.current() {
				Token::Char('*') => BinaryOp::Mul,
				Token::Char('/') => BinaryOp::Div,
				_ => return Ok(expression),
			};
			self.lexer.advance();
			expression =
				Expression::Binary { left: Box::new(expression), op, right: Box::new(self.unary()?) };
		}
	}

	fn unary(&mut self) -> Result<Expression, ParsingError> {
		if self.eat(&Token::Char('-')) {
			Ok(Expression::Unary { op: UnaryOp::Neg, operand: Box::new(self.unary()?) })
		} else {
			self.primary()
		}
	}

	fn primary(&mut self) -> Result<Expression, ParsingError> {
		match self.lexer.current() {
			Token::Number(n) => {
				let literal = Literal::Number(*n);
				self.lexer.advance();
				Ok(Expression::Literal(literal))
			}
			Token::Str(s) => {
				let literal = Literal::Str(s.clone());
				self.lexer.advance();
				Ok(Expression::Literal(literal))
			}
			Token::True => {
				self.lexer.advance();
				Ok(Expression::Literal(Literal::True))
			}
			Token::False => {
				self.lexer.advance();
				Ok(Expression::Literal(Literal::False))
			}
			Token::None => {
				self.lexer.advance();
				Ok(Expression::Literal(Literal::None))
			}
			Token::Id(_) => self.chain(),
			Token::Char('(') => {
				self.lexer.advance();
				let expression = self.expression()?;
				self.consume(&Token::Char(')'))?;
				Ok(expression)
			}
			other => Err(self.error(ParsingErrorKind::UnexpectedToken(other.to_string()))),
		}
	}

	/// Parses `Id ('.' Id)*` and an optional trailing argument list.
	fn chain(&mut self) -> Result<Expression, ParsingError> {
		let mut chain = vec![self.lexer.expect_id()?.to_string()];
		self.lexer.advance();
		while self.eat(&Token::Char('.')) {
			chain.push(self.lexer.expect_id()?.to_string());
			self.lexer.advance();
		}
		if *self.lexer.current() != Token::Char('(') {
			return Ok(Expression::Variable(chain));
		}
		let args = self.arguments()?;
		if chain.len() == 1 {
			if let Some(class) = self.classes.get(&chain[0]) {
				return Ok(Expression::NewInstance { class: class.clone(), args });
			}
		}
		Ok(Expression::Call { chain, args })
	}

	fn arguments(&mut self) -> Result<Vec<Expression>, ParsingError> {
		self.consume(&Token::Char('('))?;
		let mut args = Vec::new();
		if *self.lexer.current() != Token::Char(')') {
			args.push(self.expression()?);
			while self.eat(&Token::Char(',')) {
				args.push(self.expression()?);
			}
		}
		self.consume(&Token::Char(')'))?;
		Ok(args)
	}

	/// Consumes the expected token or fails.
	fn consume(&mut self, expected: &Token) -> Result<(), ParsingError> {
		self.lexer.expect(expected)?;
		self.lexer.advance();
		Ok(())
	}

	/// Consumes the token if it is the expected one.
	fn eat(&mut self, expected: &Token) -> bool {
		if self.lexer.current() == expected {
			self.lexer.advance();
			true
		} else {
			false
		}
	}

	fn error(&self, kind: ParsingErrorKind) -> ParsingError { ParsingError::new(self.lexer.line(), kind) }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(input: &str) -> Result<Vec<Statement>, ParsingError> {
		Parser::new(Lexer::new(input).unwrap()).parse_program().map(|program| program.statements)
	}

	fn parse_err(input: &str) -> ParsingError { parse(input).unwrap_err() }

	#[test]
	fn statement_kinds() {
		let program = parse("x = 1\nprint x\nx.y = 2\nreturn None\n1 + 2\n").unwrap();
		assert_eq!(program.len(), 5);
		assert!(matches!(program[0], Statement::Assignment { .. }));
		assert!(matches!(program[1], Statement::Print(_)));
		assert!(matches!(program[2], Statement::FieldAssignment { .. }));
		assert!(matches!(program[3], Statement::Return(_)));
		assert!(matches!(program[4], Statement::Expression(_)));
	}

	#[test]
	fn empty_print() {
		let program = parse("print\n").unwrap();
		let Statement::Print(args) = &program[0] else { panic!("expected print") };
		assert!(args.is_empty());
	}

	#[test]
	fn precedence_add_before_mul() {
		// 1 + 2 * 3 parses as 1 + (2 * 3).
		let program = parse("x = 1 + 2 * 3\n").unwrap();
		let Statement::Assignment { value, .. } = &program[0] else { panic!("expected assignment") };
		let Expression::Binary { op: BinaryOp::Add, right, .. } = value else { panic!("expected add") };
		assert!(matches!(**right, Expression::Binary { op: BinaryOp::Mul, .. }));
	}

	#[test]
	fn parentheses_override_precedence() {
		let program = parse("x = (1 + 2) * 3\n").unwrap();
		let Statement::Assignment { value, .. } = &program[0] else { panic!("expected assignment") };
		let Expression::Binary { op: BinaryOp::Mul, left, .. } = value else { panic!("expected mul") };
		assert!(matches!(**left, Expression::Binary { op: BinaryOp::Add, .. }));
	}

	#[test]
	fn logical_operators_bind_loosest() {
		let program = parse("x = not 1 == 2 and 3 or 4\n").unwrap();
		let Statement::Assignment { value, .. } = &program[0] else { panic!("expected assignment") };
		let Expression::Logical { op: LogicalOp::Or, left, .. } = value else { panic!("expected or") };
		assert!(matches!(**left, Expression::Logical { op: LogicalOp::And, .. }));
	}

	#[test]
	fn comparisons_do_not_chain() {
		parse_err("x = 1 < 2 < 3\n");
	}

	#[test]
	fn dotted_chain_load_and_call() {
		let program = parse("a.b.c\na.b.c(1, 2)\n").unwrap();
		let Statement::Expression(Expression::Variable(chain)) = &program[0] else { panic!("load") };
		assert_eq!(chain, &["a", "b", "c"]);
		let Statement::Expression(Expression::Call { chain, args }) = &program[1] else { panic!("call") };
		assert_eq!(chain, &["a", "b", "c"]);
		assert_eq!(args.len(), 2);
	}

	#[test]
	fn declared_class_call_becomes_construction() {
		let program = parse("class A:\n  def f():\n    return 1\nx = A()\ny = B()\n").unwrap();
		let Statement::Assignment { value, .. } = &program[1] else { panic!("expected assignment") };
		assert!(matches!(value, Expression::NewInstance { .. }));
		// B is undeclared, so this stays a runtime-resolved call.
		let Statement::Assignment { value, .. } = &program[2] else { panic!("expected assignment") };
		assert!(matches!(value, Expression::Call { .. }));
	}

	#[test]
	fn class_with_parent() {
		let program = parse(concat!(
			"class A:\n",
			"  def f():\n",
			"    return 1\n",
			"class B(A):\n",
			"  def g(x, y):\n",
			"    return x\n",
		))
		.unwrap();
		let Statement::ClassDecl(b) = &program[1] else { panic!("expected class") };
		assert_eq!(b.name(), "B");
		// f is inherited, g declares two formals.
		assert_eq!(b.method("f").unwrap().formal_params.len(), 0);
		assert_eq!(b.method("g").unwrap().formal_params.len(), 2);
	}

	#[test]
	fn unknown_base_class_is_a_parse_error() {
		let err = parse_err("class B(Missing):\n  def f():\n    return 1\n");
		assert_eq!(err.to_string(), "line 1: unknown base class 'Missing'");
	}

	#[test]
	fn class_body_allows_only_methods() {
		parse_err("class A:\n  x = 1\n");
	}

	#[test]
	fn if_else_suites() {
		let program = parse("if x:\n  print 1\n  print 2\nelse:\n  print 3\n").unwrap();
		let Statement::If { then_branch, else_branch, .. } = &program[0] else { panic!("expected if") };
		assert_eq!(then_branch.len(), 2);
		assert_eq!(else_branch.as_ref().unwrap().len(), 1);
	}

	#[test]
	fn missing_indent_after_colon() {
		parse_err("if x:\nprint 1\n");
	}

	#[test]
	fn invalid_assignment_target() {
		parse_err("1 + 2 = 3\n");
		parse_err("f() = 3\n");
	}

	#[test]
	fn block_closed_by_end_of_input() {
		// No trailing newline or dedent after the last body statement.
		let program = parse("if x:\n  print 1").unwrap();
		assert_eq!(program.len(), 1);
	}
}

//! Tree-walking evaluator.
//!
//! The interpreter executes the syntax tree directly: statements run
//! against a [`Closure`] holding the scope's name bindings, expressions
//! reduce to a [`Value`]. A [`Context`] carries the output sink that
//! `print` writes to.
//!
//! `return` travels through the same `Result` channel as runtime
//! errors, as a distinct [`Unwind`] variant. It is converted back into
//! an ordinary value at every method-call boundary and never escapes
//! one; a `return` at module level simply stops the program.

pub(crate) mod class;
pub mod context;
pub(crate) mod instance;
pub(crate) mod value;

use std::{collections::HashMap, rc::Rc};

use crate::{
	closure::Closure,
	error::runtime::RuntimeError,
	interpreter::{
		class::{Class, ADD_METHOD, EQUAL_METHOD, INIT_METHOD, LESS_THAN_METHOD, STR_METHOD},
		context::Context,
		instance::Instance,
		value::Value,
	},
	parser::expression::{BinaryOp, CompareOp, Expression, Literal, LogicalOp, UnaryOp},
	statement::Statement,
	utils::RcCell,
};

/// Non-local exit from statement execution: a genuine runtime failure,
/// or the `return` signal on its way to the enclosing method call.
enum Unwind {
	Error(RuntimeError),
	Return(Value),
}

impl From<RuntimeError> for Unwind {
	fn from(error: RuntimeError) -> Self { Unwind::Error(error) }
}

pub struct Interpreter<'a> {
	context: &'a mut dyn Context,
	/// All classes the program declares, for constructor calls made
	/// from scopes that do not bind the class name.
	classes: &'a HashMap<String, Rc<Class>>,
}

impl<'a> Interpreter<'a> {
	pub fn new(context: &'a mut dyn Context, classes: &'a HashMap<String, Rc<Class>>) -> Self {
		Self { context, classes }
	}

	/// Runs a program top to bottom in the given module closure. A
	/// module-level `return` stops execution without error.
	pub fn execute_program(
		&mut self,
		program: &[Statement],
		closure: &mut Closure,
	) -> Result<(), RuntimeError> {
		match self.execute_block(program, closure) {
			Ok(()) | Err(Unwind::Return(_)) => Ok(()),
			Err(Unwind::Error(error)) => Err(error),
		}
	}

	fn execute_block(&mut self, statements: &[Statement], closure: &mut Closure) -> Result<(), Unwind> {
		for statement in statements {
			self.execute_statement(statement, closure)?;
		}
		Ok(())
	}

	fn execute_statement(&mut self, statement: &Statement, closure: &mut Closure) -> Result<(), Unwind> {
		match statement {
			Statement::Expression(expression) => {
				self.evaluate(expression, closure)?;
			}
			Statement::Assignment { target, value } => {
				let value = self.evaluate(value, closure)?;
				closure.set(target.clone(), value);
			}
			Statement::FieldAssignment { object, field, value } => {
				let object = self.evaluate(object, closure)?;
				let Value::Instance(instance) = object else {
					return Err(RuntimeError::NotAnInstance.into());
				};
				let value = self.evaluate(value, closure)?;
				instance.borrow_mut().set_field(field.clone(), value);
			}
			Statement::Print(args) => {
				let mut rendered = Vec::with_capacity(args.len());
				for arg in args {
					let value = self.evaluate(arg, closure)?;
					rendered.push(self.stringify(&value)?);
				}
				writeln!(self.context.output_stream(), "{}", rendered.join(" "))
					.map_err(RuntimeError::from)?;
			}
			Statement::Return(expression) => {
				let value = self.evaluate(expression, closure)?;
				return Err(Unwind::Return(value));
			}
			Statement::If { condition, then_branch, else_branch } => {
				if self.evaluate(condition, closure)?.is_true() {
					self.execute_block(then_branch, closure)?;
				} else if let Some(else_branch) = else_branch {
					self.execute_block(else_branch, closure)?;
				}
			}
			Statement::ClassDecl(class) => {
				closure.set(class.name().to_string(), Value::Class(class.clone()));
			}
		}
		Ok(())
	}

	fn evaluate(&mut self, expression: &Expression, closure: &mut Closure) -> Result<Value, Unwind> {
		match expression {
			Expression::Literal(literal) => Ok(match literal {
				Literal::None => Value::None,
				Literal::True => Value::Bool(true),
				Literal::False => Value::Bool(false),
				Literal::Number(n) => Value::Number(*n),
				Literal::Str(s) => Value::Str(s.clone()),
			}),
			Expression::Variable(chain) => self.resolve_chain(chain, closure),
			Expression::NewInstance { class, args } => {
				let args = self.evaluate_args(args, closure)?;
				self.instantiate(class.clone(), args)
			}
			Expression::Call { chain, args } => self.call(chain, args, closure),
			Expression::Unary { op, operand } => {
				let value = self.evaluate(operand, closure)?;
				match op {
					UnaryOp::Not => Ok(Value::Bool(!value.is_true())),
					UnaryOp::Neg => match value {
						Value::Number(n) => Ok(Value::Number(-n)),
						_ => Err(RuntimeError::UnsupportedOperands("-").into()),
					},
				}
			}
			Expression::Binary { left, op, right } => {
				let left = self.evaluate(left, closure)?;
				let right = self.evaluate(right, closure)?;
				self.binary(*op, left, right)
			}
			Expression::Logical { left, op, right } => {
				// Short-circuit; the result is one of the operands,
				// not a coerced Bool.
				let left = self.evaluate(left, closure)?;
				match op {
					LogicalOp::Or if left.is_true() => Ok(left),
					LogicalOp::And if !left.is_true() => Ok(left),
					_ => self.evaluate(right, closure),
				}
			}
			Expression::Comparison { left, op, right } => {
				let left = self.evaluate(left, closure)?;
				let right = self.evaluate(right, closure)?;
				Ok(Value::Bool(self.compare(*op, &left, &right)?))
			}
		}
	}

	/// Resolves a dotted chain: the head in the closure, every further
	/// name as a field of the preceding instance.
	fn resolve_chain(&mut self, chain: &[String], closure: &Closure) -> Result<Value, Unwind> {
		let head = &chain[0];
		let mut value =
			closure.get(head).cloned().ok_or_else(|| RuntimeError::UnknownName(head.clone()))?;
		for name in &chain[1..] {
			let Value::Instance(instance) = &value else {
				return Err(RuntimeError::NotAnInstance.into());
			};
			let field = instance.borrow().field(name).cloned().ok_or_else(|| {
				RuntimeError::UnknownField(instance.borrow().class().name().to_string(), name.clone())
			})?;
			value = field;
		}
		Ok(value)
	}

	fn evaluate_args(&mut self, args: &[Expression], closure: &mut Closure) -> Result<Vec<Value>, Unwind> {
		let mut values = Vec::with_capacity(args.len());
		for arg in args {
			values.push(self.evaluate(arg, closure)?);
		}
		Ok(values)
	}

	/// A call whose head did not name a class at parse time: either a
	/// method call on the instance the chain prefix resolves to, or a
	/// construction through a variable that holds a class.
	fn call(&mut self, chain: &[String], args: &[Expression], closure: &mut Closure) -> Result<Value, Unwind> {
		if chain.len() == 1 {
			let name = &chain[0];
			// A binding in scope wins; the class table covers method
			// bodies, which bind nothing beyond self and the formals.
			let callee = match closure.get(name) {
				Some(value) => value.clone(),
				None => match self.classes.get(name) {
					Some(class) => Value::Class(class.clone()),
					None => return Err(RuntimeError::UnknownName(name.clone()).into()),
				},
			};
			let Value::Class(class) = callee else {
				return Err(RuntimeError::NotCallable(name.clone()).into());
			};
			let args = self.evaluate_args(args, closure)?;
			return self.instantiate(class, args);
		}
		let receiver = self.resolve_chain(&chain[..chain.len() - 1], closure)?;
		let Value::Instance(instance) = receiver else {
			return Err(RuntimeError::NotAnInstance.into());
		};
		let args = self.evaluate_args(args, closure)?;
		let method = chain.last().unwrap();
		self.call_method(instance, method, args)
	}

	/// Creates an instance of `class`. `__init__` runs when declared
	/// with matching arity; without one, only a zero-argument
	/// construction is valid.
	fn instantiate(&mut self, class: Rc<Class>, args: Vec<Value>) -> Result<Value, Unwind> {
		let instance = RcCell::new(Instance::new(class.clone()));
		if instance.borrow().has_method(INIT_METHOD, args.len()) {
			self.call_method(instance.clone(), INIT_METHOD, args)?;
		} else if !args.is_empty() {
			return Err(RuntimeError::NoSuchMethod {
				class:  class.name().to_string(),
				method: INIT_METHOD.to_string(),
				arity:  args.len(),
			}
			.into());
		}
		Ok(Value::Instance(instance))
	}

	/// Dispatches `name` on the instance: fresh frame with `self` and
	/// the formals, body executed until it returns or falls off the end.
	fn call_method(
		&mut self,
		instance: RcCell<Instance>,
		name: &str,
		args: Vec<Value>,
	) -> Result<Value, Unwind> {
		let class = instance.borrow().class().clone();
		let method = class.method(name).filter(|m| m.formal_params.len() == args.len()).ok_or_else(|| {
			RuntimeError::NoSuchMethod {
				class:  class.name().to_string(),
				method: name.to_string(),
				arity:  args.len(),
			}
		})?;
		let mut frame = Closure::new();
		frame.set("self", Value::Instance(instance.clone()));
		for (param, value) in method.formal_params.iter().zip(args) {
			frame.set(param.clone(), value);
		}
		match self.execute_block(&method.body, &mut frame) {
			Ok(()) => Ok(Value::None),
			Err(Unwind::Return(value)) => Ok(value),
			Err(error) => Err(error),
		}
	}

	fn binary(&mut self, op: BinaryOp, left: Value, right: Value) -> Result<Value, Unwind> {
		// `+` on an instance dispatches to its __add__ method.
		if op == BinaryOp::Add {
			if let Value::Instance(instance) = &left {
				let instance = instance.clone();
				return self.call_method(instance, ADD_METHOD, vec![right]);
			}
		}
		match (op, &left, &right) {
			(BinaryOp::Add, Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
			(BinaryOp::Add, Value::Str(l), Value::Str(r)) => Ok(Value::Str(format!("{l}{r}"))),
			(BinaryOp::Sub, Value::Number(l), Value::Number(r)) => Ok(Value::Number(l - r)),
			(BinaryOp::Mul, Value::Number(l), Value::Number(r)) => Ok(Value::Number(l * r)),
			(BinaryOp::Div, Value::Number(_), Value::Number(0)) => Err(RuntimeError::DivisionByZero.into()),
			// Truncates toward zero.
			(BinaryOp::Div, Value::Number(l), Value::Number(r)) => Ok(Value::Number(l / r)),
			_ => Err(RuntimeError::UnsupportedOperands(op.symbol()).into()),
		}
	}

	fn compare(&mut self, op: CompareOp, left: &Value, right: &Value) -> Result<bool, Unwind> {
		match op {
			CompareOp::Eq => self.equal(left, right),
			CompareOp::NotEq => Ok(!self.equal(left, right)?),
			CompareOp::Less => self.less(left, right),
			CompareOp::Greater => Ok(!(self.less(left, right)? || self.equal(left, right)?)),
			CompareOp::LessOrEq => Ok(self.less(left, right)? || self.equal(left, right)?),
			CompareOp::GreaterOrEq => Ok(!self.less(left, right)?),
		}
	}

	/// Equality: both-None, `__eq__` on a left-hand instance, or
	/// same-kind plain values. Anything else cannot be compared.
	fn equal(&mut self, left: &Value, right: &Value) -> Result<bool, Unwind> {
		if let (Value::None, Value::None) = (left, right) {
			return Ok(true);
		}
		if let Value::Instance(instance) = left {
			if instance.borrow().has_method(EQUAL_METHOD, 1) {
				let result = self.call_method(instance.clone(), EQUAL_METHOD, vec![right.clone()])?;
				return Ok(result.is_true());
			}
			return Err(RuntimeError::IncomparableValues.into());
		}
		left.plain_equal(right).ok_or_else(|| RuntimeError::IncomparableValues.into())
	}

	/// Ordering: `__lt__` on a left-hand instance, or natural order of
	/// same-kind plain values.
	fn less(&mut self, left: &Value, right: &Value) -> Result<bool, Unwind> {
		if let Value::Instance(instance) = left {
			if instance.borrow().has_method(LESS_THAN_METHOD, 1) {
				let result = self.call_method(instance.clone(), LESS_THAN_METHOD, vec![right.clone()])?;
				return Ok(result.is_true());
			}
			return Err(RuntimeError::IncomparableValues.into());
		}
		left.plain_less(right).ok_or_else(|| RuntimeError::IncomparableValues.into())
	}

	/// Text a value prints as: `__str__` result for instances that
	/// declare one, the value's own rendering otherwise.
	fn stringify(&mut self, value: &Value) -> Result<String, Unwind> {
		if let Value::Instance(instance) = value {
			if instance.borrow().has_method(STR_METHOD, 0) {
				let rendered = self.call_method(instance.clone(), STR_METHOD, Vec::new())?;
				return self.stringify(&rendered);
			}
		}
		Ok(value.to_string())
	}
}

use std::rc::Rc;

use crate::{closure::Closure, interpreter::{class::Class, value::Value}};

/// A runtime object bound to a class, carrying its own mutable field
/// bindings. The field table is a [`Closure`], the same name-to-value
/// map used for scopes.
pub struct Instance {
	class:  Rc<Class>,
	fields: Closure,
}

impl Instance {
	pub fn new(class: Rc<Class>) -> Self { Self { class, fields: Closure::new() } }

	pub fn class(&self) -> &Rc<Class> { &self.class }

	pub fn field(&self, name: &str) -> Option<&Value> { self.fields.get(name) }

	pub fn set_field(&mut self, name: impl Into<String>, value: Value) { self.fields.set(name, value); }

	/// True iff a method with this name exists in the class chain and
	/// declares exactly `arity` formal parameters. Overloading by arity
	/// is not supported: a name match with the wrong arity is a miss.
	pub fn has_method(&self, name: &str, arity: usize) -> bool {
		self.class.method(name).is_some_and(|method| method.formal_params.len() == arity)
	}
}

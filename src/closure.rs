use std::collections::HashMap;

use crate::interpreter::value::Value;

/// Name table for a single scope: the module top level or one method
/// invocation frame. Methods do not capture enclosing scopes, so a
/// closure is never chained to an outer one.
#[derive(Debug, Default)]
pub struct Closure {
	bindings: HashMap<String, Value>,
}

impl Closure {
	pub fn new() -> Self { Self::default() }

	/// Binds or rebinds a name; rebinding shadows the old value.
	pub fn set(&mut self, name: impl Into<String>, value: Value) { self.bindings.insert(name.into(), value); }

	pub fn get(&self, name: &str) -> Option<&Value> { self.bindings.get(name) }
}

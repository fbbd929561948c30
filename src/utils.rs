use std::{cell::{Ref, RefCell, RefMut}, rc::Rc};

/// Shared mutable cell. Cloning shares the underlying value, so every
/// holder observes mutations made through any other holder.
#[derive(Default)]
pub struct RcCell<T> {
	inner: Rc<RefCell<T>>,
}

impl<T> Clone for RcCell<T> {
	fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<T> RcCell<T> {
	pub fn new(value: T) -> Self { Self { inner: Rc::new(RefCell::new(value)) } }

	pub fn borrow(&self) -> Ref<'_, T> { self.inner.borrow() }

	pub fn borrow_mut(&self) -> RefMut<'_, T> { self.inner.borrow_mut() }

	/// Address of the shared value, stable for the lifetime of the cell.
	pub fn as_ptr(&self) -> *const T { self.inner.as_ptr() }
}

impl<T> From<T> for RcCell<T> {
	fn from(value: T) -> Self { Self::new(value) }
}

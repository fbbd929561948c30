//! Interpreter for Mython, a small indentation-sensitive
//! object-oriented scripting language.
//!
//! The pipeline is the classic three stages. The lexer scans the whole
//! source into tokens, turning layout into synthetic
//! `Indent`/`Dedent`/`Newline` tokens. The parser lowers the token
//! stream into a syntax tree by recursive descent, resolving base
//! classes as it goes. The interpreter then walks the tree with a name
//! table per scope, writing `print` output through an injected
//! [`Context`].
//!
//! ```
//! use mython::{MemoryContext, Mython};
//!
//! let mut context = MemoryContext::new();
//! Mython.run("print 1 + 2 * 3\n", &mut context).unwrap();
//! assert_eq!(context.output_str(), "7\n");
//! ```

pub mod cli;

mod closure;
mod error;
mod interpreter;
mod lexer;
mod mython;
mod parser;
mod statement;
mod utils;

pub use error::{parsing::ParsingError, runtime::RuntimeError, MythonError};
pub use interpreter::context::{Context, MemoryContext, SimpleContext};
pub use mython::Mython;

//! # Barebones
//!
//! A teaching language with integer variables and six
//! instruction forms, separated by `;`:
//!
//! ```text
//! clear x;  incr x;  decr x;
//! while x; ... end;
//! if x; ... elif y; ... else; ... endif;
//! # comments run to the next semicolon;
//! ```
//!
//! Programs can be run directly with [`mach::Interpreter`] or compiled
//! with [`mach::compile`] into a flat bytecode wrapped in a
//! [`mach::Container`].
//!
//! ```
//! use barebones::mach::{compile, Interpreter, Program};
//!
//! let source = "incr x; incr x; while x; decr x; incr y; end";
//! let vars = Interpreter::from_source(source).run().unwrap();
//! assert_eq!(vars.get("y"), 2);
//!
//! let container = compile(&Program::new(source)).unwrap();
//! assert_eq!(container.var_count(), 2);
//! ```
//!
//! A `while` loop tests its variable only at `end`, so the body always
//! runs at least once.

pub mod lang;
pub mod mach;

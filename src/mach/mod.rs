/*!
## Rust Machine Module

This Rust module is an interpreter and bytecode compiler for Barebones.

*/

/// Position of a statement in a program.
pub type Address = usize;
/// Dense variable number assigned in order of first appearance.
pub type Slot = u16;

mod compile;
mod container;
mod interpreter;
mod op;
mod opcode;
mod program;
mod stack;
mod var;

pub use compile::compile;
pub use container::{Container, MAGIC};
pub use interpreter::{Event, Interpreter};
pub use op::Op;
pub use opcode::{Opcode, Record};
pub use program::Program;
pub use stack::{Frame, Stack};
pub use var::{Slots, Variables};

#[cfg(test)]
mod tests;

//! # Barebones
//!
//! Run or compile Barebones programs.
//!

mod term;

fn main() {
    term::main()
}

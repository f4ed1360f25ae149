//! Foundational types shared by every unihdl front-end crate.
//!
//! Currently this is the identifier interner: every dialect parser and
//! translator names ports, generics, modules and instances through [`Ident`].

#![warn(missing_docs)]

pub mod ident;

pub use ident::{Ident, Interner};

//! Dialect-neutral abstract syntax tree.
//!
//! Every dialect translator (SystemVerilog today) lowers its concrete syntax
//! tree into these types. The tree is strictly owned: each [`Expr`] has one
//! parent slot, and a value needed in two places is deep-copied with
//! `Clone`, never shared.

#![warn(missing_docs)]

pub mod display;
pub mod expr;
pub mod instance;

pub use display::DisplayExpr;
pub use expr::{BinaryOp, Expr, Literal, Radix, UnaryOp};
pub use instance::{association_style, AssociationStyle, CompInstance, ModuleDef};

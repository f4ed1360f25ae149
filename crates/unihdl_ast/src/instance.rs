//! Hierarchical instances and the module bodies that collect them.

use crate::expr::{BinaryOp, Expr};
use serde::{Deserialize, Serialize};
use unihdl_common::Ident;
use unihdl_source::Span;

/// One hierarchical instance of a module, interface or program.
///
/// `generic_map` and `port_map` hold either plain values (positional
/// association, order significant) or [`BinaryOp::MapAssociation`] nodes
/// (named association), never a mix of both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompInstance {
    /// Instance name, wrapped in one [`BinaryOp::Index`] per array dimension.
    pub name: Expr,
    /// Name of the instantiated module. Not resolved.
    pub module_id: Expr,
    /// Parameter (generic) associations.
    pub generic_map: Vec<Expr>,
    /// Port associations.
    pub port_map: Vec<Expr>,
    /// The hierarchical instance this node was translated from.
    pub span: Span,
}

impl CompInstance {
    /// Creates an instance with empty maps.
    pub fn new(name: Expr, module_id: Expr, span: Span) -> Self {
        Self {
            name,
            module_id,
            generic_map: Vec::new(),
            port_map: Vec::new(),
            span,
        }
    }

    /// The bare instance identifier, with array dimensions stripped.
    pub fn base_name(&self) -> Option<Ident> {
        let mut name = &self.name;
        while let Expr::Binary {
            op: BinaryOp::Index,
            left,
            ..
        } = name
        {
            name = &**left;
        }
        name.as_id()
    }

    /// Association style of the generic map.
    pub fn generic_style(&self) -> AssociationStyle {
        association_style(&self.generic_map)
    }

    /// Association style of the port map.
    pub fn port_style(&self) -> AssociationStyle {
        association_style(&self.port_map)
    }
}

/// How the entries of an association list are bound to their targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationStyle {
    /// No entries.
    Empty,
    /// Every entry is a plain value.
    Positional,
    /// Every entry is a [`BinaryOp::MapAssociation`].
    Named,
    /// Both kinds appear. Translation never produces this.
    Mixed,
}

/// Classifies an association list.
pub fn association_style(map: &[Expr]) -> AssociationStyle {
    let named = map.iter().filter(|e| e.is_map_association()).count();
    match (map.len(), named) {
        (0, _) => AssociationStyle::Empty,
        (_, 0) => AssociationStyle::Positional,
        (len, n) if len == n => AssociationStyle::Named,
        _ => AssociationStyle::Mixed,
    }
}

/// A module body: the instances translated from its statements, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDef {
    /// Module name.
    pub name: Expr,
    /// Instances appended by the instantiation translator.
    pub instances: Vec<CompInstance>,
    /// The whole module declaration.
    pub span: Span,
}

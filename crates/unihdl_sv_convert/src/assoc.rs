//! Association-list translation for parameter and port lists.
//!
//! Ordered lists yield plain values in source order. Named lists yield
//! `MapAssociation(key, value)` nodes. An omitted value becomes
//! [`Expr::Null`] and the `.*` wildcard uses [`Expr::All`] as its key, so
//! every entry of a named list has the same shape.

use crate::{ConvertError, SvConverter};
use unihdl_ast::Expr;
use unihdl_sv_parser::cst::{
    AttributeInstance, NamedPortTarget, ParameterAssignments, PortConnections,
};

impl SvConverter<'_> {
    /// Translates the list inside `#( ... )`.
    pub fn translate_parameter_assignments(
        &self,
        list: &ParameterAssignments,
    ) -> Result<Vec<Expr>, ConvertError> {
        match list {
            ParameterAssignments::Ordered(items) => items
                .iter()
                .map(|value| self.translate_param_expr(value))
                .collect(),
            ParameterAssignments::Named(items) => items
                .iter()
                .map(|item| {
                    let key = self.translate_identifier(&item.name);
                    let value = match &item.value {
                        Some(value) => self.translate_param_expr(value)?,
                        None => Expr::Null,
                    };
                    Ok(Expr::map_association(key, value))
                })
                .collect(),
        }
    }

    /// Translates the port connections of one hierarchical instance.
    ///
    /// Attribute instances on a connection are reported with a `W300`
    /// notice and otherwise ignored.
    pub fn translate_port_connections(
        &self,
        list: &PortConnections,
    ) -> Result<Vec<Expr>, ConvertError> {
        match list {
            PortConnections::Ordered(items) => items
                .iter()
                .map(|item| {
                    self.notice_attributes(&item.attributes, "ordered port connection");
                    match &item.expr {
                        Some(e) => self.translate_expr(e),
                        None => Ok(Expr::Null),
                    }
                })
                .collect(),
            PortConnections::Named(items) => items
                .iter()
                .map(|item| {
                    self.notice_attributes(&item.attributes, "named port connection");
                    Ok(match &item.target {
                        NamedPortTarget::Wildcard => Expr::map_association(Expr::All, Expr::Null),
                        NamedPortTarget::Port { name, actual } => {
                            let key = self.translate_identifier(name);
                            let value = match actual {
                                Some(e) => self.translate_expr(e)?,
                                None => Expr::Null,
                            };
                            Expr::map_association(key, value)
                        }
                    })
                })
                .collect(),
        }
    }

    fn notice_attributes(&self, attributes: &[AttributeInstance], production: &str) {
        for attr in attributes {
            self.notice_not_implemented(
                &format!("attribute instance on {production}"),
                attr.span,
            );
        }
    }
}

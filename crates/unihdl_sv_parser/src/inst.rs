//! Module instantiation productions.
//!
//! `foo #(8, .T(logic)) u1 [3:0] (.a(x), .*), u2 (y, , z);`
//!
//! Parameter and port lists are decided ordered or named by their first
//! item. Later items of the other kind are reported and dropped.

use crate::cst::*;
use crate::parser::SvParser;
use crate::token::SvToken;

/// A port connection before the list kind is known.
enum PortItem {
    Ordered(OrderedPortConnection),
    Named(NamedPortConnection),
}

/// A parameter assignment before the list kind is known.
enum ParamItem {
    Ordered(ParamExpression),
    Named(NamedParameterAssignment),
}

impl SvParser<'_> {
    /// Parses `module_identifier [#(...)] instance {, instance} ;`.
    ///
    /// On a syntax error the rest of the statement is skipped; callers
    /// detect the failure through [`SvParser::error_count`].
    pub fn parse_module_instantiation(&mut self) -> ModuleInstantiation {
        let start = self.current_span();
        let module = self.expect_identifier();

        let params = if self.at(SvToken::Hash) {
            Some(self.parse_parameter_value_assignment())
        } else {
            None
        };

        let mut instances = vec![self.parse_hierarchical_instance()];
        while self.eat(SvToken::Comma) {
            instances.push(self.parse_hierarchical_instance());
        }

        if !self.eat(SvToken::Semicolon) {
            self.expected("';'");
            self.recover_to_semicolon();
        }

        ModuleInstantiation {
            module,
            params,
            instances,
            span: start.merge(self.prev_span()),
        }
    }

    fn parse_parameter_value_assignment(&mut self) -> ParameterValueAssignment {
        let start = self.current_span();
        self.expect(SvToken::Hash);
        self.expect(SvToken::LeftParen);

        let assignments = if self.at(SvToken::RightParen) {
            None
        } else {
            let first = self.parse_param_item();
            let mut rest = Vec::new();
            while self.eat(SvToken::Comma) {
                let span = self.current_span();
                rest.push((self.parse_param_item(), span));
            }
            Some(match first {
                ParamItem::Ordered(first) => {
                    let mut items = vec![first];
                    for (item, span) in rest {
                        match item {
                            ParamItem::Ordered(p) => items.push(p),
                            ParamItem::Named(_) => self.error_at(
                                "cannot mix ordered and named parameter assignments",
                                span,
                            ),
                        }
                    }
                    ParameterAssignments::Ordered(items)
                }
                ParamItem::Named(first) => {
                    let mut items = vec![first];
                    for (item, span) in rest {
                        match item {
                            ParamItem::Named(p) => items.push(p),
                            ParamItem::Ordered(_) => self.error_at(
                                "cannot mix ordered and named parameter assignments",
                                span,
                            ),
                        }
                    }
                    ParameterAssignments::Named(items)
                }
            })
        };

        self.expect(SvToken::RightParen);
        ParameterValueAssignment {
            assignments,
            span: start.merge(self.prev_span()),
        }
    }

    fn parse_param_item(&mut self) -> ParamItem {
        if !self.at(SvToken::Dot) {
            return ParamItem::Ordered(self.parse_param_expression());
        }
        let start = self.current_span();
        self.advance();
        let name = self.expect_identifier();
        self.expect(SvToken::LeftParen);
        let value = if self.at(SvToken::RightParen) {
            None
        } else {
            Some(self.parse_param_expression())
        };
        self.expect(SvToken::RightParen);
        ParamItem::Named(NamedParameterAssignment {
            name,
            value,
            span: start.merge(self.prev_span()),
        })
    }

    /// Parses a value or, when it starts with a type keyword, a data type.
    pub(crate) fn parse_param_expression(&mut self) -> ParamExpression {
        if self.current().is_builtin_type() {
            ParamExpression::DataType(self.parse_data_type())
        } else {
            ParamExpression::Expr(self.parse_expr())
        }
    }

    fn parse_data_type(&mut self) -> DataType {
        let start = self.current_span();
        let kind = match self.current() {
            SvToken::Bit => BuiltinType::Bit,
            SvToken::Reg => BuiltinType::Reg,
            SvToken::Byte => BuiltinType::Byte,
            SvToken::Shortint => BuiltinType::Shortint,
            SvToken::Int => BuiltinType::Int,
            SvToken::Longint => BuiltinType::Longint,
            SvToken::Integer => BuiltinType::Integer,
            SvToken::Time => BuiltinType::Time,
            SvToken::Real => BuiltinType::Real,
            SvToken::Shortreal => BuiltinType::Shortreal,
            SvToken::Realtime => BuiltinType::Realtime,
            SvToken::String => BuiltinType::String,
            _ => BuiltinType::Logic,
        };
        self.advance();

        let signing = match self.current() {
            SvToken::Signed => Some(Signing::Signed),
            SvToken::Unsigned => Some(Signing::Unsigned),
            _ => None,
        }
        .map(|s| {
            let span = self.current_span();
            self.advance();
            (s, span)
        });

        let mut packed = Vec::new();
        while self.at(SvToken::LeftBracket) {
            let range_start = self.current_span();
            self.advance();
            let msb = self.parse_expr();
            self.expect(SvToken::Colon);
            let lsb = self.parse_expr();
            self.expect(SvToken::RightBracket);
            packed.push(Range {
                msb,
                lsb,
                span: range_start.merge(self.prev_span()),
            });
        }

        DataType {
            kind,
            signing,
            packed,
            span: start.merge(self.prev_span()),
        }
    }

    fn parse_hierarchical_instance(&mut self) -> HierarchicalInstance {
        let start = self.current_span();
        let name = self.parse_name_of_instance();

        let connections = if self.eat(SvToken::LeftParen) {
            let connections = self.parse_port_connections();
            self.expect(SvToken::RightParen);
            connections
        } else {
            self.expected("'(' after instance name");
            PortConnections::Ordered(Vec::new())
        };

        HierarchicalInstance {
            name,
            connections,
            span: start.merge(self.prev_span()),
        }
    }

    fn parse_name_of_instance(&mut self) -> NameOfInstance {
        let start = self.current_span();
        let start_pos = self.pos;
        let name = if self.at_identifier() {
            self.expect_identifier()
        } else {
            self.error("missing instance name");
            self.expect_identifier_placeholder()
        };

        let mut dimensions = Vec::new();
        while self.at(SvToken::LeftBracket) {
            let dim_start = self.current_span();
            self.advance();
            let first = self.parse_expr();
            let dim = if self.eat(SvToken::Colon) {
                let lsb = self.parse_expr();
                self.expect(SvToken::RightBracket);
                UnpackedDimension::Range(Range {
                    msb: first,
                    lsb,
                    span: dim_start.merge(self.prev_span()),
                })
            } else {
                self.expect(SvToken::RightBracket);
                UnpackedDimension::Size {
                    size: first,
                    span: dim_start.merge(self.prev_span()),
                }
            };
            dimensions.push(dim);
        }

        NameOfInstance {
            name,
            dimensions,
            span: self.span_since(start, start_pos),
        }
    }

    fn expect_identifier_placeholder(&mut self) -> Identifier {
        let span = self.current_span();
        Identifier {
            name: self.interner.get_or_intern("<missing>"),
            span: unihdl_source::Span::new(self.file, span.start, span.start),
        }
    }

    /// Parses the inside of `( ... )` after an instance name.
    fn parse_port_connections(&mut self) -> PortConnections {
        if self.at(SvToken::RightParen) {
            return PortConnections::Ordered(Vec::new());
        }

        let first = self.parse_port_item();
        let mut rest = Vec::new();
        while self.eat(SvToken::Comma) {
            rest.push(self.parse_port_item());
        }

        match first {
            PortItem::Ordered(first) => {
                let mut items = vec![first];
                for item in rest {
                    match item {
                        PortItem::Ordered(c) => items.push(c),
                        PortItem::Named(c) => self.error_at(
                            "cannot mix ordered and named port connections",
                            c.span,
                        ),
                    }
                }
                PortConnections::Ordered(items)
            }
            PortItem::Named(first) => {
                let mut items = vec![first];
                for item in rest {
                    match item {
                        PortItem::Named(c) => items.push(c),
                        PortItem::Ordered(c) => self.error_at(
                            "cannot mix ordered and named port connections",
                            c.span,
                        ),
                    }
                }
                PortConnections::Named(items)
            }
        }
    }

    fn parse_port_item(&mut self) -> PortItem {
        let start = self.current_span();
        let start_pos = self.pos;
        let attributes = self.parse_attribute_instances();

        if self.eat(SvToken::Dot) {
            let target = if self.eat(SvToken::Star) {
                NamedPortTarget::Wildcard
            } else {
                let name = self.expect_identifier();
                let actual = if self.eat(SvToken::LeftParen) {
                    let actual = if self.at(SvToken::RightParen) {
                        None
                    } else {
                        Some(self.parse_expr())
                    };
                    self.expect(SvToken::RightParen);
                    actual
                } else {
                    None
                };
                NamedPortTarget::Port { name, actual }
            };
            return PortItem::Named(NamedPortConnection {
                attributes,
                target,
                span: start.merge(self.prev_span()),
            });
        }

        let expr = if self.at(SvToken::Comma) || self.at(SvToken::RightParen) {
            None
        } else {
            Some(self.parse_expr())
        };
        PortItem::Ordered(OrderedPortConnection {
            attributes,
            expr,
            span: self.span_since(start, start_pos),
        })
    }

    /// Parses zero or more `(* name [= value], ... *)` groups.
    pub(crate) fn parse_attribute_instances(&mut self) -> Vec<AttributeInstance> {
        let mut attributes = Vec::new();
        while self.at(SvToken::AttrOpen) {
            let start = self.current_span();
            self.advance();
            let mut specs = Vec::new();
            loop {
                let spec_start = self.current_span();
                let name = self.expect_identifier();
                let value = if self.eat(SvToken::Equals) {
                    Some(self.parse_expr())
                } else {
                    None
                };
                specs.push(AttrSpec {
                    name,
                    value,
                    span: spec_start.merge(self.prev_span()),
                });
                if !self.eat(SvToken::Comma) {
                    break;
                }
            }
            self.expect(SvToken::AttrClose);
            attributes.push(AttributeInstance {
                specs,
                span: start.merge(self.prev_span()),
            });
        }
        attributes
    }
}

#[cfg(test)]
mod tests {
    use crate::cst::*;
    use crate::lexer;
    use crate::parser::SvParser;
    use unihdl_common::Interner;
    use unihdl_diagnostics::DiagnosticSink;
    use unihdl_source::FileId;

    fn parse_stmt(source: &str) -> (ModuleInstantiation, usize, Interner) {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let file = FileId::from_raw(0);
        let tokens = lexer::lex(source, file, &sink);
        let (stmt, errors) = {
            let mut parser = SvParser::new(tokens, source, file, &interner, &sink);
            let stmt = parser.parse_module_instantiation();
            (stmt, parser.error_count())
        };
        (stmt, errors, interner)
    }

    fn parse_ok(source: &str) -> (ModuleInstantiation, Interner) {
        let (stmt, errors, interner) = parse_stmt(source);
        assert_eq!(errors, 0, "unexpected errors in {source:?}");
        (stmt, interner)
    }

    #[test]
    fn named_ports() {
        let (stmt, interner) = parse_ok("foo f1(.a(x), .b(y));");
        assert_eq!(interner.resolve(stmt.module.name), "foo");
        assert!(stmt.params.is_none());
        assert_eq!(stmt.instances.len(), 1);
        match &stmt.instances[0].connections {
            PortConnections::Named(items) => {
                assert_eq!(items.len(), 2);
                match &items[1].target {
                    NamedPortTarget::Port { name, actual } => {
                        assert_eq!(interner.resolve(name.name), "b");
                        assert!(actual.is_some());
                    }
                    other => panic!("expected port, got {other:?}"),
                }
            }
            other => panic!("expected named list, got {other:?}"),
        }
    }

    #[test]
    fn ordered_params_and_multiple_instances() {
        let (stmt, _) = parse_ok("foo #(1, 2) f1(x, y), f2(x, z);");
        let params = stmt.params.as_ref().and_then(|p| p.assignments.as_ref());
        match params {
            Some(ParameterAssignments::Ordered(items)) => assert_eq!(items.len(), 2),
            other => panic!("expected ordered params, got {other:?}"),
        }
        assert_eq!(stmt.instances.len(), 2);
        for inst in &stmt.instances {
            assert!(matches!(&inst.connections, PortConnections::Ordered(c) if c.len() == 2));
        }
    }

    #[test]
    fn empty_lists() {
        let (stmt, _) = parse_ok("foo #() f1();");
        assert!(stmt.params.as_ref().is_some_and(|p| p.assignments.is_none()));
        assert!(matches!(
            &stmt.instances[0].connections,
            PortConnections::Ordered(c) if c.is_empty()
        ));
    }

    #[test]
    fn wildcard_and_open_ports() {
        let (stmt, _) = parse_ok("foo f1(.*, .a(), .b);");
        match &stmt.instances[0].connections {
            PortConnections::Named(items) => {
                assert_eq!(items[0].target, NamedPortTarget::Wildcard);
                assert!(matches!(
                    items[1].target,
                    NamedPortTarget::Port { actual: None, .. }
                ));
                assert!(matches!(
                    items[2].target,
                    NamedPortTarget::Port { actual: None, .. }
                ));
            }
            other => panic!("expected named list, got {other:?}"),
        }
    }

    #[test]
    fn blank_ordered_connections() {
        let (stmt, _) = parse_ok("foo f1(a, , c);");
        match &stmt.instances[0].connections {
            PortConnections::Ordered(items) => {
                assert_eq!(items.len(), 3);
                assert!(items[0].expr.is_some());
                assert!(items[1].expr.is_none());
                assert!(items[1].span.is_empty());
                assert!(items[2].expr.is_some());
            }
            other => panic!("expected ordered list, got {other:?}"),
        }
    }

    #[test]
    fn named_params_with_types_and_omitted_values() {
        let (stmt, _) = parse_ok("foo #(.W(8), .T(logic signed [7:0]), .D()) f1();");
        let Some(ParameterAssignments::Named(items)) =
            stmt.params.and_then(|p| p.assignments)
        else {
            panic!("expected named params");
        };
        assert_eq!(items.len(), 3);
        assert!(matches!(items[0].value, Some(ParamExpression::Expr(_))));
        match &items[1].value {
            Some(ParamExpression::DataType(t)) => {
                assert_eq!(t.kind, BuiltinType::Logic);
                assert!(matches!(t.signing, Some((Signing::Signed, _))));
                assert_eq!(t.packed.len(), 1);
            }
            other => panic!("expected data type, got {other:?}"),
        }
        assert!(items[2].value.is_none());
    }

    #[test]
    fn instance_array_dimensions() {
        let (stmt, _) = parse_ok("foo u[3:0][2] (.a(x));");
        let dims = &stmt.instances[0].name.dimensions;
        assert_eq!(dims.len(), 2);
        assert!(matches!(dims[0], UnpackedDimension::Range(_)));
        assert!(matches!(dims[1], UnpackedDimension::Size { .. }));
    }

    #[test]
    fn attributes_on_connections() {
        let (stmt, interner) = parse_ok("foo f1((* keep, mark = 1 *) .a(x), .*);");
        match &stmt.instances[0].connections {
            PortConnections::Named(items) => {
                assert_eq!(items[0].attributes.len(), 1);
                let specs = &items[0].attributes[0].specs;
                assert_eq!(specs.len(), 2);
                assert_eq!(interner.resolve(specs[1].name.name), "mark");
                assert!(specs[1].value.is_some());
                assert!(items[1].attributes.is_empty());
            }
            other => panic!("expected named list, got {other:?}"),
        }
    }

    #[test]
    fn mixed_port_list_is_an_error() {
        let (stmt, errors, _) = parse_stmt("foo f1(x, .b(y));");
        assert_eq!(errors, 1);
        assert!(matches!(
            &stmt.instances[0].connections,
            PortConnections::Ordered(c) if c.len() == 1
        ));
    }

    #[test]
    fn mixed_param_list_is_an_error() {
        let (_, errors, _) = parse_stmt("foo #(.W(1), 2) f1();");
        assert_eq!(errors, 1);
    }

    #[test]
    fn missing_instance_name() {
        let (_, errors, _) = parse_stmt("foo #(1) (a);");
        assert!(errors >= 1);
    }

    #[test]
    fn missing_semicolon() {
        let (_, errors, _) = parse_stmt("foo f1(a)");
        assert_eq!(errors, 1);
    }
}

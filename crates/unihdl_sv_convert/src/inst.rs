//! Structural instantiation: one statement to one `CompInstance` per
//! hierarchical instance.

use crate::{ConvertError, SvConverter};
use unihdl_ast::CompInstance;
use unihdl_sv_parser::cst::{ModuleInstantiation, ParameterValueAssignment};

impl SvConverter<'_> {
    /// Translates `stmt` and appends its instances to `out`.
    ///
    /// The `#(...)` clause is translated once. The first instance takes it;
    /// every later instance gets a deep copy of the first instance's
    /// generic map. `module_id` is rebuilt from the module identifier for
    /// each instance.
    ///
    /// On success exactly `stmt.instances.len()` instances are appended, in
    /// source order. On a fault `out` is left as it was.
    pub fn translate_instantiation(
        &self,
        stmt: &ModuleInstantiation,
        out: &mut Vec<CompInstance>,
    ) -> Result<(), ConvertError> {
        if stmt.instances.is_empty() {
            return Err(ConvertError::NoInstances { span: stmt.span });
        }

        let mut shared_generics = match &stmt.params {
            Some(ParameterValueAssignment {
                assignments: Some(list),
                ..
            }) => self.translate_parameter_assignments(list)?,
            _ => Vec::new(),
        };

        let mut translated: Vec<CompInstance> = Vec::with_capacity(stmt.instances.len());
        for hier in &stmt.instances {
            let generic_map = match translated.first() {
                None => std::mem::take(&mut shared_generics),
                Some(first) => first.generic_map.clone(),
            };
            let port_map = self.translate_port_connections(&hier.connections)?;
            let name = self.apply_unpacked_dimensions(
                self.translate_identifier(&hier.name.name),
                &hier.name.dimensions,
            )?;

            let mut inst =
                CompInstance::new(name, self.translate_identifier(&stmt.module), hier.span);
            inst.generic_map = generic_map;
            inst.port_map = port_map;
            translated.push(inst);
        }

        out.append(&mut translated);
        Ok(())
    }
}

//! Module-body driver.

use crate::{ConvertError, SvConverter};
use unihdl_ast::ModuleDef;
use unihdl_sv_parser::cst::{ModuleDecl, ModuleItem, SourceText};

impl SvConverter<'_> {
    /// Translates every module in a parsed file.
    pub fn convert_source(&self, text: &SourceText) -> Vec<ModuleDef> {
        text.modules.iter().map(|m| self.convert_module(m)).collect()
    }

    /// Translates the instantiation statements of one module body.
    ///
    /// A statement that faults is reported to the sink and skipped. Items
    /// the parser skipped as unsupported get a `W300` notice.
    pub fn convert_module(&self, decl: &ModuleDecl) -> ModuleDef {
        let mut instances = Vec::new();
        for item in &decl.items {
            let result = match item {
                ModuleItem::Instantiation(stmt) => {
                    self.translate_instantiation(stmt, &mut instances)
                }
                ModuleItem::Unsupported { leading, span } => {
                    let label = format!("module item `{}`", self.source_db.snippet(*leading));
                    self.notice_not_implemented(&label, *span);
                    Ok(())
                }
                ModuleItem::Error(span) => Err(ConvertError::Malformed {
                    what: "module item",
                    span: *span,
                }),
            };
            if let Err(err) = result {
                self.sink.emit(err.to_diagnostic());
            }
        }
        ModuleDef {
            name: self.translate_identifier(&decl.name),
            instances,
            span: decl.span,
        }
    }
}

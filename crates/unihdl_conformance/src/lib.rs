//! End-to-end helpers for the unihdl front end.
//!
//! Runs SystemVerilog source text through lexer, parser and translator and
//! returns the translated modules with every diagnostic emitted on the way,
//! ready for assertions in integration tests.

#![warn(missing_docs)]

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use unihdl_ast::{Expr, ModuleDef};
use unihdl_common::Interner;
use unihdl_config::{ConfigError, ConvertConfig};
use unihdl_diagnostics::{
    Diagnostic, DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer,
};
use unihdl_source::{FileId, SourceDb};
use unihdl_sv_convert::SvConverter;

/// Result of running source text through the whole front end.
pub struct PipelineResult {
    /// Translated modules, in file order then source order.
    pub modules: Vec<ModuleDef>,
    /// All diagnostics emitted during the run, in file order then source order.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
    /// Interner holding every identifier in `modules`.
    pub interner: Interner,
    /// The files the run read.
    pub source_db: SourceDb,
}

impl PipelineResult {
    /// Renders an expression with this run's interner.
    pub fn show(&self, expr: &Expr) -> String {
        expr.display(&self.interner).to_string()
    }

    /// Finds a translated module by name.
    pub fn module(&self, name: &str) -> Option<&ModuleDef> {
        self.modules.iter().find(|m| self.show(&m.name) == name)
    }

    /// Renders every diagnostic, rustc style, without color.
    pub fn render_diagnostics(&self) -> String {
        render_diagnostics(&self.diagnostics, &self.source_db, false)
    }
}

/// Failure to set up a project run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// `unihdl.toml` is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A listed source file could not be read.
    #[error("failed to read source `{}`: {source}", path.display())]
    Source {
        /// The path as resolved against the project directory.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Translates one SystemVerilog file with the default configuration.
pub fn translate_sv(source: &str) -> PipelineResult {
    translate_sv_with_config(source, &ConvertConfig::default())
}

/// Translates one SystemVerilog file with an explicit configuration.
pub fn translate_sv_with_config(source: &str, config: &ConvertConfig) -> PipelineResult {
    translate_sv_multifile(&[("test.sv", source)], config)
}

/// Translates several SystemVerilog files.
///
/// Each entry in `files` is `(filename, source_text)`. Files are parsed and
/// translated in parallel; modules come back in the order the files were
/// given, and diagnostics sorted by file, then source offset.
pub fn translate_sv_multifile(
    files: &[(&str, &str)],
    config: &ConvertConfig,
) -> PipelineResult {
    let mut source_db = SourceDb::new();
    let file_ids: Vec<FileId> = files
        .iter()
        .map(|(name, text)| source_db.add_source(*name, text.to_string()))
        .collect();
    finish_pipeline(source_db, &file_ids, config)
}

/// Loads `<dir>/unihdl.toml` and translates every source it lists.
///
/// Source paths are relative to `dir`.
pub fn run_project(dir: &Path) -> Result<PipelineResult, PipelineError> {
    let config = unihdl_config::load_config(dir)?;
    let mut source_db = SourceDb::new();
    let mut file_ids = Vec::with_capacity(config.project.sources.len());
    for rel in &config.project.sources {
        let path = dir.join(rel);
        match source_db.load_file(&path) {
            Ok(id) => file_ids.push(id),
            Err(source) => return Err(PipelineError::Source { path, source }),
        }
    }
    Ok(finish_pipeline(source_db, &file_ids, &config.convert))
}

/// Renders diagnostics with the terminal renderer, one after another.
pub fn render_diagnostics(
    diagnostics: &[Diagnostic],
    source_db: &SourceDb,
    color: bool,
) -> String {
    let renderer = TerminalRenderer::new(color);
    diagnostics
        .iter()
        .map(|d| renderer.render(d, source_db))
        .collect::<Vec<_>>()
        .join("\n")
}

fn finish_pipeline(
    source_db: SourceDb,
    file_ids: &[FileId],
    config: &ConvertConfig,
) -> PipelineResult {
    let interner = Interner::new();
    let sink = DiagnosticSink::new();

    let per_file: Vec<Vec<ModuleDef>> = file_ids
        .par_iter()
        .map(|&file_id| {
            let text = unihdl_sv_parser::parse_file(file_id, &source_db, &interner, &sink);
            SvConverter::new(&interner, &source_db, &sink)
                .with_config(config.clone())
                .convert_source(&text)
        })
        .collect();

    // Files are processed in parallel; report in file order, then by offset.
    let mut diagnostics = sink.take_all();
    diagnostics.sort_by_key(|d| {
        let rank = file_ids.iter().position(|&id| id == d.primary_span.file);
        (rank, d.primary_span.start)
    });
    let error_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();

    PipelineResult {
        modules: per_file.into_iter().flatten().collect(),
        diagnostics,
        has_errors: error_count > 0,
        error_count,
        warning_count,
        interner,
        source_db,
    }
}

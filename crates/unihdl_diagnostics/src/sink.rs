//! Thread-safe collector for diagnostics.

use crate::code::DiagnosticCode;
use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Accumulates diagnostics from any number of threads.
///
/// This is the only reporting channel of the front end: translation notices
/// and parse errors alike end up here. The error count is kept in an atomic
/// so [`has_errors`](Self::has_errors) never takes the lock.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
        }
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity == Severity::Error {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        self.lock().push(diag);
    }

    /// Returns `true` once any error has been recorded.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of errors recorded so far.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Number of recorded diagnostics carrying `code`.
    pub fn count_code(&self, code: DiagnosticCode) -> usize {
        self.lock().iter().filter(|d| d.code == code).count()
    }

    /// Drains every recorded diagnostic. The error count is not reset.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns a copy of the recorded diagnostics without draining them.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    // A panic while holding the lock cannot leave the vector half-written,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;
    use unihdl_source::Span;

    const E: DiagnosticCode = DiagnosticCode::new(Category::Error, 300);
    const W: DiagnosticCode = DiagnosticCode::new(Category::Warning, 300);

    #[test]
    fn empty_sink() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn warnings_do_not_count_as_errors() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::warning(W, "attribute ignored", Span::DUMMY));
        assert!(!sink.has_errors());
        assert_eq!(sink.count_code(W), 1);
        assert_eq!(sink.count_code(E), 0);
    }

    #[test]
    fn take_all_drains_but_keeps_error_count() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::error(E, "malformed", Span::DUMMY));
        sink.emit(Diagnostic::note(W, "ignored", Span::DUMMY));
        assert_eq!(sink.take_all().len(), 2);
        assert!(sink.diagnostics().is_empty());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn concurrent_emitters() {
        let sink = DiagnosticSink::new();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..50 {
                        sink.emit(Diagnostic::error(E, "x", Span::DUMMY));
                    }
                });
            }
        });
        assert_eq!(sink.error_count(), 400);
        assert_eq!(sink.diagnostics().len(), 400);
    }
}

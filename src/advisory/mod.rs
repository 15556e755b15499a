//! # Performance advisories
//!
//! The cofactor-based matrix routines are cubic or worse and only meant for
//! small matrices. Calling them raises a non-fatal [`PerformanceWarning`]:
//! it is logged through `log::warn!` and recorded by any enclosing
//! [`capture`] scope on the same thread. The advisory can be switched off
//! process-wide with [`set_performance_warnings`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(true);

thread_local! {
    static QUIET_DEPTH: Cell<usize> = const { Cell::new(0) };
    static CAPTURED: RefCell<Option<Vec<PerformanceWarning>>> = const { RefCell::new(None) };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceWarning {
    pub operation: &'static str,
    pub complexity: &'static str,
}

impl fmt::Display for PerformanceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}() is {} and intended for academic demonstration only",
            self.operation, self.complexity
        )
    }
}

pub fn set_performance_warnings(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn performance_warnings_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Runs `f` and returns every advisory it raised on this thread.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<PerformanceWarning>) {
    let previous = CAPTURED.with(|slot| slot.replace(Some(Vec::new())));
    let restore = CaptureGuard {
        previous: Some(previous),
    };
    let result = f();
    let captured = restore.finish();
    (result, captured)
}

/// Holds the enclosing scope's buffer until it is put back.
struct CaptureGuard {
    previous: Option<Option<Vec<PerformanceWarning>>>,
}

impl CaptureGuard {
    fn finish(mut self) -> Vec<PerformanceWarning> {
        let previous = self.previous.take().flatten();
        CAPTURED
            .with(|slot| slot.replace(previous))
            .unwrap_or_default()
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        // Only reached with a pending buffer when `f` panicked.
        if let Some(previous) = self.previous.take() {
            CAPTURED.with(|slot| slot.replace(previous));
        }
    }
}

pub(crate) fn emit(operation: &'static str, complexity: &'static str) {
    if !performance_warnings_enabled() || QUIET_DEPTH.with(Cell::get) > 0 {
        return;
    }
    let warning = PerformanceWarning {
        operation,
        complexity,
    };
    log::warn!("{warning}");
    CAPTURED.with(|slot| {
        if let Some(buffer) = slot.borrow_mut().as_mut() {
            buffer.push(warning);
        }
    });
}

/// Runs `f` with advisories silenced, used for nested calls.
pub(crate) fn quietly<R>(f: impl FnOnce() -> R) -> R {
    let _guard = QuietGuard::enter();
    f()
}

struct QuietGuard;

impl QuietGuard {
    fn enter() -> Self {
        QUIET_DEPTH.with(|depth| depth.set(depth.get() + 1));
        QuietGuard
    }
}

impl Drop for QuietGuard {
    fn drop(&mut self) {
        QUIET_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

//! Scoped control over graph construction.
//!
//! Gradient mode is a per-thread stack of scopes. Entering a scope pushes a mode, and
//! dropping the returned [`GradModeGuard`] pops it again, so nested scopes always restore
//! the mode that was active before them, including when the scope is left by `?` or by a
//! panic unwinding through it.
//!
//! ```
//! use ferrograd_core::autograd::grad_mode::{is_grad_enabled, no_grad};
//!
//! assert!(is_grad_enabled());
//! {
//!     let _guard = no_grad();
//!     assert!(!is_grad_enabled());
//! }
//! assert!(is_grad_enabled());
//! ```

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;

thread_local! {
    /// Active scopes as `(scope id, enabled)`, innermost last.
    static GRAD_MODE_STACK: RefCell<Vec<(u64, bool)>> = const { RefCell::new(Vec::new()) };
    static NEXT_SCOPE_ID: Cell<u64> = const { Cell::new(0) };
}

/// Returns whether operations executed on this thread currently record a graph.
///
/// Enabled when no scope has been entered.
pub fn is_grad_enabled() -> bool {
    GRAD_MODE_STACK.with(|stack| stack.borrow().last().map_or(true, |&(_, enabled)| enabled))
}

/// Restores the previous gradient mode when dropped.
///
/// Dropping guards out of order removes only this guard's own scope: the innermost scope
/// still alive keeps deciding the mode.
///
/// Not `Send`: the mode it restores belongs to the thread that created it.
#[must_use = "the gradient mode is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct GradModeGuard {
    id: u64,
    _not_send: PhantomData<*const ()>,
}

impl Drop for GradModeGuard {
    fn drop(&mut self) {
        GRAD_MODE_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            match stack.iter().rposition(|&(id, _)| id == self.id) {
                Some(pos) => {
                    if pos + 1 != stack.len() {
                        log::warn!(
                            "grad mode guard dropped out of order ({} inner scope(s) still active)",
                            stack.len() - pos - 1
                        );
                    }
                    stack.remove(pos);
                }
                None => log::warn!("grad mode guard {} has no active scope", self.id),
            }
            log::trace!(
                "grad mode restored to {}",
                stack.last().map_or(true, |&(_, enabled)| enabled)
            );
        });
    }
}

/// Enters a scope in which gradient recording is set to `enabled`.
pub fn set_grad_enabled(enabled: bool) -> GradModeGuard {
    let id = NEXT_SCOPE_ID.with(|next| {
        let id = next.get();
        next.set(id.wrapping_add(1));
        id
    });
    let depth = GRAD_MODE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.push((id, enabled));
        stack.len()
    });
    log::trace!("grad mode set to {} (depth {})", enabled, depth);
    GradModeGuard {
        id,
        _not_send: PhantomData,
    }
}

/// Enters a scope in which no graph is recorded: every tensor produced inside it has
/// `requires_grad = false` and keeps no reference to its inputs.
pub fn no_grad() -> GradModeGuard {
    set_grad_enabled(false)
}

/// Re-enables gradient recording inside an enclosing `no_grad` scope.
pub fn enable_grad() -> GradModeGuard {
    set_grad_enabled(true)
}

/// Runs `f` with gradient recording disabled.
pub fn with_no_grad<R, F: FnOnce() -> R>(f: F) -> R {
    let _guard = no_grad();
    f()
}

#[cfg(test)]
#[path = "grad_mode_test.rs"]
mod tests;

//! Stack safety utilities for deep recursion.
//!
//! Parsing, compiling and evaluating a lark program are all plain recursive
//! walks, so a deeply nested input (`((((...))))`, `not not not ...`) turns
//! directly into host call-stack depth. Two tools keep that bounded:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand so the
//!   recursion itself never overflows.
//! - [`DepthGuard`] enforces an explicit nesting limit and reports
//!   [`DepthExceeded`] instead of recursing forever.
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: No-op passthrough (WASM has its own stack management).
//!
//! # Usage
//!
//! ```text
//! fn eval(&mut self, node: &EvalNode) -> EvalResult {
//!     self.depth.enter()?;
//!     let result = ensure_sufficient_stack(|| self.eval_inner(node));
//!     self.depth.exit();
//!     result
//! }
//! ```

use std::fmt;

/// Minimum stack space to keep available (100KB red zone).
///
/// If less than this amount remains, we'll grow the stack.
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Nesting limit used when the caller does not configure one.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, this will
/// allocate additional stack space before calling `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// The nesting limit of a [`DepthGuard`] was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DepthExceeded {
    /// The limit that was in force.
    pub limit: usize,
}

impl fmt::Display for DepthExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nesting depth exceeds the limit of {}", self.limit)
    }
}

impl std::error::Error for DepthExceeded {}

/// Explicit recursion counter.
///
/// Each recursive step calls [`enter`](Self::enter) before descending and
/// [`exit`](Self::exit) after returning. `enter` fails once `limit` levels
/// are active; the failed call does not count as a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepthGuard {
    depth: usize,
    limit: usize,
}

impl DepthGuard {
    /// Create a guard that allows at most `limit` nested levels.
    pub const fn new(limit: usize) -> Self {
        DepthGuard { depth: 0, limit }
    }

    /// Enter one level of nesting.
    #[inline]
    pub fn enter(&mut self) -> Result<(), DepthExceeded> {
        if self.depth >= self.limit {
            return Err(DepthExceeded { limit: self.limit });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave one level of nesting.
    #[inline]
    pub fn exit(&mut self) {
        debug_assert!(self.depth > 0, "DepthGuard::exit() without matching enter()");
        self.depth = self.depth.saturating_sub(1);
    }

    /// Number of currently active levels.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Configured limit.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for DepthGuard {
    fn default() -> Self {
        DepthGuard::new(DEFAULT_MAX_DEPTH)
    }
}

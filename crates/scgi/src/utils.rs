//! Utility macros and functions for the SCGI crate.
//!
//! This module provides helper macros that are used internally
//! by the crate implementation.

/// Early-returns `Err($error)` when `$predicate` does not hold.
///
/// Like `assert!`, but for validation that should surface as an error instead of a panic.
///
/// ```ignore
/// ensure!(declared > 0, ScgiError::invalid_framing("zero length"));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

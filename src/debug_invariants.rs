//! Post-operation invariant hooks.
//!
//! Every successful `Mesh` mutator (`add_edge`, `remove_edge`, `add_face`,
//! `remove_face`, `remove_node`, `split_edge`, `split_face`) ends with
//! [`debug_invariants!`](crate::debug_invariants) over
//! [`DebugInvariants::validate_invariants`], which re-runs the half-edge
//! topology checks and panics on the first violation.

use crate::mesh_error::MeshError;

/// Structures that can re-check their own invariants.
pub trait DebugInvariants {
    /// Panic on the first violation when invariant checking is enabled; no-op
    /// otherwise.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;
}

/// Run a fallible check and panic on error when invariant checking is
/// enabled (debug builds, or the `strict-invariants` / `check-invariants`
/// features). With checking disabled the expression is type-checked but
/// never evaluated.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
        #[cfg(not(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants")))]
        let _ = || $expr;
    };
}

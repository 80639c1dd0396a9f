//! Error taxonomy for the generator core.
//!
//! Why this design
//! - A plain enum with hand-written `Display`/`std::error::Error` impls, no
//!   `thiserror`. This crate's core never depends on an error-derive macro —
//!   richer error crates like `anyhow` stay confined to the `cli` binary.
//!
//! Taxonomy (spec §7)
//! - `ConfigurationError`: inconsistent size bounds, hard, raised before any
//!   generation happens.
//! - `SizeWarning`: a min-size lower than the structural floor; soft, the
//!   caller clamps and continues. Modeled as a `Vec<SizeWarning>` returned
//!   alongside a successful generation rather than as an error variant,
//!   since a warning by definition does not abort the call.
//! - `ExhaustionSignal`: the draw oracle refused to satisfy a constraint
//!   within its budget; propagated to the host unchanged.
//!
//! `InvariantViolation` (a predicate inconsistency) is not a variant here:
//! spec §7 calls these "bugs in the injected predicates, expressed as
//! assertions", so they surface as `debug_assert!`/`panic!` at the point of
//! inconsistency instead.

use std::fmt;

#[derive(Debug)]
pub enum GenError {
    Configuration { reason: String },
    Exhaustion { reason: String },
}

impl GenError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    pub(crate) fn exhaustion(reason: impl Into<String>) -> Self {
        Self::Exhaustion {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { reason } => write!(f, "invalid size configuration: {reason}"),
            Self::Exhaustion { reason } => write!(f, "draw oracle exhausted: {reason}"),
        }
    }
}

impl std::error::Error for GenError {}

pub type GenResult<T> = Result<T, GenError>;

/// A soft diagnostic: `min_size` was below the structural floor for the
/// requested geometry and was clamped upward. Callers may log or ignore it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeWarning {
    pub requested_min: usize,
    pub structural_min: usize,
    pub message: String,
}

/// Validates `(min_size, max_size)` against a geometry's structural floor,
/// per spec §7 and §6. Grounded on `planar.py::_validate_sizes`.
///
/// Returns the effective (possibly clamped) `min_size` plus any warning
/// emitted, or a hard `ConfigurationError` for bound violations that cannot
/// be repaired by clamping.
pub fn validate_sizes(
    min_size: usize,
    max_size: Option<usize>,
    min_expected_size: usize,
) -> GenResult<(usize, Option<SizeWarning>)> {
    if let Some(max) = max_size {
        if max < min_expected_size {
            return Err(GenError::configuration(format!(
                "max_size ({max}) is below the structural minimum ({min_expected_size})"
            )));
        }
        if min_size > max {
            return Err(GenError::configuration(format!(
                "min_size ({min_size}) exceeds max_size ({max})"
            )));
        }
    }
    if min_size < min_expected_size {
        let warning = SizeWarning {
            requested_min: min_size,
            structural_min: min_expected_size,
            message: format!(
                "min_size ({min_size}) is below the structural minimum \
                 ({min_expected_size}); clamping up"
            ),
        };
        return Ok((min_expected_size, Some(warning)));
    }
    Ok((min_size, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_min_size_with_warning() {
        let (effective, warning) = validate_sizes(1, Some(10), 3).unwrap();
        assert_eq!(effective, 3);
        assert!(warning.is_some());
    }

    #[test]
    fn passes_through_when_within_bounds() {
        let (effective, warning) = validate_sizes(5, Some(10), 3).unwrap();
        assert_eq!(effective, 5);
        assert!(warning.is_none());
    }

    #[test]
    fn rejects_max_below_structural_floor() {
        assert!(validate_sizes(0, Some(2), 3).is_err());
    }

    #[test]
    fn rejects_min_above_max() {
        assert!(validate_sizes(8, Some(4), 3).is_err());
    }
}

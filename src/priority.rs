//! Validated floating-point priority

use crate::traits::TreeError;

/// An `f64` priority that is known not to be NaN
///
/// Comparisons between two `Priority` values therefore never hit the
/// unordered case, and strict `<` gives the heap a consistent order.
/// Infinities are accepted.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub(crate) struct Priority(f64);

impl Priority {
    pub(crate) fn new(value: f64) -> Result<Self, TreeError> {
        if value.is_nan() {
            return Err(TreeError::InvalidPriority);
        }
        Ok(Priority(value))
    }

    #[inline]
    pub(crate) fn get(self) -> f64 {
        self.0
    }
}

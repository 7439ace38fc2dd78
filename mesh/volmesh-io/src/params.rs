//! MEDIT writer parameters.

/// Parameters for writing MEDIT `.mesh` files.
///
/// The defaults produce the classic output byte for byte: every row ends in
/// reference `1` and element indices are written without bounds checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeditParams {
    /// Reference (marker) written at the end of every vertex and element row.
    pub reference: i64,

    /// Reject elements that reference a missing vertex before any I/O.
    ///
    /// Off by default: out-of-range and negative indices are written as-is
    /// (after the 1-based shift) and left to the consumer to validate.
    pub check_indices: bool,
}

impl Default for MeditParams {
    fn default() -> Self {
        Self {
            reference: 1,
            check_indices: false,
        }
    }
}

impl MeditParams {
    /// Parameters that validate indices against the vertex count.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            check_indices: true,
            ..Default::default()
        }
    }

    /// Set the reference written on every row.
    #[must_use]
    pub const fn with_reference(mut self, reference: i64) -> Self {
        self.reference = reference;
        self
    }

    /// Enable or disable index validation.
    #[must_use]
    pub const fn with_index_check(mut self, check: bool) -> Self {
        self.check_indices = check;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_classic_output() {
        let params = MeditParams::default();
        assert_eq!(params.reference, 1);
        assert!(!params.check_indices);
    }

    #[test]
    fn builders_chain() {
        let params = MeditParams::strict().with_reference(7);
        assert_eq!(params.reference, 7);
        assert!(params.check_indices);
        assert!(!params.with_index_check(false).check_indices);
    }
}

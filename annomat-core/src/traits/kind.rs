//! Storage kind tags
//!
//! Every concrete storage backend reports one of these tags. The tag is
//! what "of the same storage kind" means when a generic algorithm asks for a
//! new matrix shaped like an existing one, and it is written into the text
//! header so a reader can rebuild the same representation.

/// Concrete storage representation of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoreKind {
    /// Flat `f64` array, `NaN` marks absent cells
    DenseNumbers,
    /// Flat array of optional strings
    DenseText,
    /// Flat array of tagged cells mixing numbers, text and nulls
    #[default]
    DenseMixed,
    /// Hash map from linear index to number with a default for absent cells
    Sparse,
    /// Two-level row/column map that grows as cells are written
    Dynamic,
    /// One bit per cell
    Bits,
    /// Upper triangle of a square symmetric matrix
    Symmetric,
}

impl StoreKind {
    /// All kinds in declaration order
    pub const ALL: [StoreKind; 7] = [
        StoreKind::DenseNumbers,
        StoreKind::DenseText,
        StoreKind::DenseMixed,
        StoreKind::Sparse,
        StoreKind::Dynamic,
        StoreKind::Bits,
        StoreKind::Symmetric,
    ];

    /// Name used in the text header
    pub const fn name(self) -> &'static str {
        match self {
            StoreKind::DenseNumbers => "numbers",
            StoreKind::DenseText => "text",
            StoreKind::DenseMixed => "mixed",
            StoreKind::Sparse => "sparse",
            StoreKind::Dynamic => "dynamic",
            StoreKind::Bits => "bits",
            StoreKind::Symmetric => "symmetric",
        }
    }

    /// Parse a header name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Whether the kind can only hold numbers
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            StoreKind::DenseNumbers | StoreKind::Sparse | StoreKind::Bits | StoreKind::Symmetric
        )
    }

    /// Whether writes past the shape grow the matrix
    pub const fn is_growable(self) -> bool {
        matches!(self, StoreKind::Dynamic)
    }

    /// Whether the kind requires `rows == cols`
    pub const fn is_square_only(self) -> bool {
        matches!(self, StoreKind::Symmetric)
    }
}

impl core::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in StoreKind::ALL {
            assert_eq!(StoreKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(StoreKind::from_name(" Mixed "), Some(StoreKind::DenseMixed));
        assert_eq!(StoreKind::from_name("csr"), None);
    }
}

use std::fmt::Display;
use thiserror::Error;

/// Errors that can occur while building or traversing an annotated suffix index.
#[derive(Debug, Error)]
pub enum AstError {
    /// The input fragment collection is empty.
    #[error("Fragment collection cannot be empty")]
    EmptyCollection,

    /// The algorithm selector did not match any backend.
    #[error("There is no index construction algorithm with name `{name}`")]
    UnknownAlgorithm {
        /// The selector that failed to resolve
        name: String,
    },

    /// A fragment contains a code point from the reserved terminator region.
    #[error("Fragment {fragment} contains reserved code point U+{code_point:04X}")]
    ReservedCharacterInInput {
        /// Index of the offending fragment
        fragment: usize,
        /// The reserved code point that was found
        code_point: u32,
    },

    /// The requested traversal order is not supported by this backend.
    #[error("Traversal order `{order}` is not supported by the {backend} backend")]
    UnsupportedTraversal {
        /// The requested order
        order: String,
        /// The backend that rejected it
        backend: String,
    },
}

/// A specialized Result type for annotated suffix index operations.
pub type Result<T> = std::result::Result<T, AstError>;

impl AstError {
    /// Creates a new UnknownAlgorithm error.
    pub(crate) fn unknown_algorithm(name: impl Display) -> Self {
        Self::UnknownAlgorithm {
            name: name.to_string(),
        }
    }

    /// Creates a new ReservedCharacterInInput error.
    pub(crate) fn reserved_character(fragment: usize, code_point: char) -> Self {
        Self::ReservedCharacterInInput {
            fragment,
            code_point: code_point as u32,
        }
    }

    /// Creates a new UnsupportedTraversal error.
    pub(crate) fn unsupported_traversal(order: impl Display, backend: impl Display) -> Self {
        Self::UnsupportedTraversal {
            order: order.to_string(),
            backend: backend.to_string(),
        }
    }
}

//! Error types for conversion derivation and code generation.
//!
//! Every error here is a generation-time failure: the run either completes for a category or it aborts with one of
//! these values. Nothing is retried.

/// Result type for derivation and generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Error type for derivation and generation operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("category `{category}` has no conversion from `{from}` to `{to}`")]
    MissingConversion {
        category: String,
        from: String,
        to: String,
    },

    #[error("composite base references undefined category `{0}`")]
    UndefinedCategory(String),

    #[error("operations `{from}` and `{to}` do not share a shape")]
    ShapeMismatch { from: String, to: String },

    #[error("composite category `{category}` cannot be converted by scaling its leaves")]
    NonScalableComposite { category: String },

    #[error("expected a unit of category `{expected}`, found `{unit}` of category `{found}`")]
    CategoryMismatch {
        expected: String,
        found: String,
        unit: String,
    },

    #[error("a relation must cross categories, both ends are `{category}`")]
    SameCategoryRelation { category: String },

    #[error("category `{category}` needs a scale of 10^{exponent}, which does not fit a 64-bit literal")]
    ScaleOverflow { category: String, exponent: u32 },

    #[error("category `{category}` declares `{name}` more than once")]
    DuplicateUnit { category: String, name: String },

    #[error("category `{0}` is declared more than once")]
    DuplicateCategory(String),

    #[error("cannot bind sign class `{sign}` of `{category}` to `{numeric}`")]
    InvalidBinding {
        category: String,
        sign: String,
        numeric: String,
    },

    #[error("no value bound for unit `{0}`")]
    UnboundUnit(String),

    #[error("cannot parse `{input}` at {position}: {message}")]
    Parse {
        input: String,
        position: usize,
        message: String,
    },
}

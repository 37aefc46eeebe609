pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Per-axis fields of a transform must all have the same length.
    #[error(
        "length of all per-axis fields must match: len(axes) = {axes}, len(units) = {units}, \
         len(translate) = {translate}, len(scale) = {scale}"
    )]
    TransformLength {
        axes: usize,
        units: usize,
        translate: usize,
        scale: usize,
    },
    /// A spacing cannot be inferred from fewer than two samples.
    #[error("coordinate for dim {dim} has {len} element(s); at least 2 are needed to infer a spacing")]
    InsufficientSamples { dim: String, len: usize },
    /// Grid spacing must be strictly positive.
    #[error("inferred scale {scale} for dim {dim}; spacing must be strictly positive")]
    NonPositiveScale { dim: String, scale: f64 },
    /// An explicit path or chunk policy must supply one entry per array.
    #[error("policy lists {actual} entries but {expected} arrays were supplied")]
    PolicyLength { expected: usize, actual: usize },
    /// Group members must correspond 1:1 with the dataset paths in the group metadata.
    #[error("group members {members:?} do not match metadata dataset paths {paths:?}")]
    MemberMismatch {
        members: Vec<String>,
        paths: Vec<String>,
    },
    #[error("no recognized container suffix in url: {0}")]
    NoContainerSuffix(String),
    #[error("ambiguous: multiple container suffixes in url: {0}")]
    AmbiguousContainerSuffix(String),
    #[error("{0}")]
    General(String),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl Error {
    pub fn general(message: impl Into<String>) -> Self {
        Self::General(message.into())
    }
}

use thiserror::Error;

/// Errors raised while building browser trees or loading catalog data.
///
/// Missing catalog data (an absent home star, an empty query) is *not* an error:
/// builders report it with `Option`. The variants below are either configuration
/// defects in the static rule/label tables, which must be surfaced to the caller,
/// or failures of the reference catalog loader.
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("No display label configured for group key: {0}")]
    MissingGroupLabel(String),

    #[error("Two group keys share the display label: {0}")]
    DuplicateGroupLabel(String),

    #[error("Prefix rule declared twice: {0}")]
    DuplicatePrefixRule(String),

    #[error(
        "Prefix rule {prefix:?} can never match, it is shadowed by the earlier rule {shadowed_by:?}"
    )]
    ShadowedPrefixRule { prefix: String, shadowed_by: String },

    #[error("Invalid star browser kind: {0}")]
    InvalidStarBrowserKind(String),

    #[error("Error while reading a catalog csv file: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid catalog record: {0}")]
    InvalidCatalogRecord(String),
}

impl PartialEq for BrowserError {
    fn eq(&self, other: &Self) -> bool {
        use BrowserError::*;
        match (self, other) {
            (MissingGroupLabel(a), MissingGroupLabel(b)) => a == b,
            (DuplicateGroupLabel(a), DuplicateGroupLabel(b)) => a == b,
            (DuplicatePrefixRule(a), DuplicatePrefixRule(b)) => a == b,
            (
                ShadowedPrefixRule {
                    prefix: p1,
                    shadowed_by: s1,
                },
                ShadowedPrefixRule {
                    prefix: p2,
                    shadowed_by: s2,
                },
            ) => p1 == p2 && s1 == s2,
            (InvalidStarBrowserKind(a), InvalidStarBrowserKind(b)) => a == b,
            (InvalidCatalogRecord(a), InvalidCatalogRecord(b)) => a == b,

            // csv errors are not comparable: same variant is enough
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}

/// Errors raised while building or loading the dish catalog.
///
/// All of them are fatal at startup; the catalog is never rebuilt per request.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog is empty")]
    Empty,

    #[error("duplicate dish name: {0}")]
    DuplicateName(String),

    #[error("dish '{dish}' has invalid {field}: {value}")]
    InvalidMacro {
        dish: String,
        field: &'static str,
        value: f64,
    },

    #[error("dish '{dish}' lists {count} recommendations, at most 2 are allowed")]
    TooManyRecommendations { dish: String, count: usize },

    #[error("dish '{dish}' recommends unknown dish '{missing}'")]
    DanglingRecommendation { dish: String, missing: String },

    #[error("dish '{0}' recommends itself")]
    SelfRecommendation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),
}

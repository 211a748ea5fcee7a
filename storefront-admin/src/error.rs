//! Application error types

use storefront_api::ApiError;

/// Invalid environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("LOCALES must be a JSON array of language tags: {0}")]
    InvalidLocales(#[source] serde_json::Error),

    #[error("PAGE_SIZE must be an integer from 1 to {max}, got `{0}`", max = storefront_api::query::MAX_PAGE_SIZE)]
    InvalidPageSize(String),

    #[error("LOG_LEVEL `{0}` is not one of off, error, warn, info, debug, trace")]
    InvalidLogLevel(String),
}

/// Page routing and loading failures.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("no page at `/{0}`")]
    NotFound(String),

    #[error(transparent)]
    Widget(#[from] storefront_widgets::Error),
}

impl From<ApiError> for RouteError {
    fn from(err: ApiError) -> Self {
        Self::Widget(err.into())
    }
}

impl From<storefront_widgets::ConfigError> for RouteError {
    fn from(err: storefront_widgets::ConfigError) -> Self {
        Self::Widget(err.into())
    }
}

/// Top-level error for the binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] AppConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Route(#[from] RouteError),
}

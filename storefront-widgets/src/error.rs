//! Widget error types

use storefront_api::ApiError;

/// Invalid widget configuration, reported at construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("table has no columns")]
    NoColumns,

    #[error("duplicate column id `{0}`")]
    DuplicateColumn(String),

    #[error("no sortable column to sort by")]
    NoSortableColumn,

    #[error("cannot sort by `{0}`: not a sortable column")]
    UnsortableColumn(String),

    #[error("page size must be between 1 and {max}, got {0}", max = storefront_api::query::MAX_PAGE_SIZE)]
    PageSize(usize),

    #[error("empty slider range: min {min} is not below max {max}")]
    EmptyRange { min: i64, max: i64 },
}

/// Errors surfaced by widget operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

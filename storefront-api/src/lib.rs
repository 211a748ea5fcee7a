//! Storefront backend client library
//!
//! JSON fetching, the table query model (sort, pagination window, filters)
//! and response decoding for the storefront admin widgets.

pub mod error;
pub mod model;
pub mod query;

mod client;
mod fetch;

pub use client::*;
pub use error::ApiError;
pub use fetch::{JsonFetcher, StaticFetcher};
pub use model::Row;

//! Storefront admin: pages, routing and application setup.
//!
//! The binary wires these together: configuration from the environment,
//! a [`RestClient`](storefront_api::RestClient) against the backend, and
//! a [`Router`] hosting one page at a time.

pub mod config;
pub mod error;
pub mod pages;
pub mod paths;
pub mod router;

pub use config::AppConfig;
pub use error::{AppConfigError, AppError, RouteError};
pub use pages::{DashboardPage, Page, PageContext, ProductsPage};
pub use router::{Route, Router};

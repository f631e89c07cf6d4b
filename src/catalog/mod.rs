//! Remote song catalog - the iTunes Search API.
//!
//! # Architecture
//!
//! Same split as any external API integration in this crate:
//! - **DTOs** (`dto.rs`) - exact API response shapes
//! - **Adapter** (`adapter.rs`) - converts DTOs to [`crate::model::Track`]
//! - **Client** (`client.rs`) - HTTP client
//! - **Trait** (`traits.rs`) - [`CatalogApi`], the seam the search controller
//!   depends on
//!
//! # Usage
//!
//! ```ignore
//! use tunescout::catalog::ItunesClient;
//!
//! let client = ItunesClient::new(&config.search)?;
//! let tracks = client.search("paramore").await?;
//! ```

mod adapter;
mod client;
pub mod dto;
mod error;
pub mod traits;

pub use adapter::{to_track, to_tracks};
pub use client::{DEFAULT_BASE_URL, ItunesClient};
pub use error::CatalogError;
pub use traits::CatalogApi;

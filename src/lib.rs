//! Typed client for the GitHub REST API.
//!
//! A [`Client`] owns the HTTP plumbing and a cache of the rate limits GitHub
//! reported. API areas are reached through borrowed service handles:
//!
//! ```no_run
//! # async fn run() -> ghrest::Result<()> {
//! let client = ghrest::Client::builder().token("ghp_example").build()?;
//! let opts = ghrest::ListOptions::page(1, 50);
//! let (repos, resp) = client
//!     .repositories()
//!     .list_by_org("rust-lang", Some(&ghrest::services::repositories::RepositoryListByOrgOptions {
//!         list: opts,
//!         ..Default::default()
//!     }))
//!     .await?;
//! println!("{} repos, next page {:?}", repos.len(), resp.next_page);
//! # Ok(())
//! # }
//! ```
//!
//! Every call returns the decoded body together with a [`Response`] carrying
//! pagination links and the rate limit observed on that reply.

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod options;
pub mod rate_limit;
pub mod response;
pub mod services;

pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, ErrorResponse, Result};
pub use events::Event;
pub use options::{Direction, ListCursorOptions, ListOptions};
pub use rate_limit::{RateLimitCategory, RateLimits};
pub use response::{Rate, Response};

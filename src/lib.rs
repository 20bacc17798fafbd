//! Data core of the ORB recipe browser.
//!
//! Typed access to the external recipe catalog and the hosted document
//! store, plus the aggregation services built on them: randomized discovery
//! sampling, engagement ranking, merged search and home-feed assembly. The
//! UI shell and the identity provider are external collaborators; identity
//! is passed in as a plain value and rendering happens elsewhere.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};

//! Retrieval executor boundary.
//!
//! The queue scheduler drives a [`Fetcher`] trait object for each task, so
//! the external fetch-and-tag tool can be swapped out (notably with a
//! scripted implementation in tests).

mod cli;
mod traits;

pub use cli::CliFetcher;
pub use traits::Fetcher;

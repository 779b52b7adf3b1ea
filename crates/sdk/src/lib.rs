//! # Folo SDK
//!
//! Minimal client for the Folo feed-reader API. Every call goes through
//! [`FoloClient::forward`], which authenticates with the session cookie,
//! unwraps the `{code, message, data}` envelope and normalizes the result.
//!
//! ```rust,no_run
//! use folo_core::FoloTool;
//! use folo_sdk::{FoloClient, FoloResult};
//!
//! # async fn example() -> FoloResult<()> {
//! let client = FoloClient::from_env()?;
//! let outcome = client
//!     .forward(FoloTool::UnreadCount.route(), &Default::default())
//!     .await?;
//! println!("{}", outcome.into_text()?);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{FoloClient, FoloClientBuilder, QueryOutcome, MISSING_TOKEN_MESSAGE};
pub use config::ClientConfig;
pub use error::{FoloError, FoloResult};

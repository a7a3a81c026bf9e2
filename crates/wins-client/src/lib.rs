//! Client for the wins timeline backend.
//!
//! - [`WinsClient`]: HTTP calls (`/login`, `/register`, `/wins`)
//! - [`WinsApp`]: session + milestone state on top of the client
//! - [`SessionStore`]: where the access token lives between runs
//! - [`ClientConfig`]: base URL, add-win schema and spiral settings
//!
//! # Example
//!
//! ```no_run
//! use wins_client::{ClientConfig, FileSessionStore, WinsApp};
//!
//! # async fn run() -> wins_client::Result<()> {
//! let config = ClientConfig::default().with_env_overrides();
//! let mut app = WinsApp::new(&config, FileSessionStore::default_location()?)?;
//! app.start().await?;
//! if !app.is_authenticated() {
//!     app.login("me@example.com", "hunter2").await?;
//! }
//! app.add("05.10", "DJ at LIC").await?;
//! let scene = app.scene(&config.scene);
//! println!("{} points", scene.points.len());
//! # Ok(())
//! # }
//! ```

mod app;
mod client;
mod config;
mod error;
mod session;
mod types;

pub use app::{ImportReport, WinsApp};
pub use client::{DEFAULT_BASE_URL, WinsClient};
pub use config::*;
pub use error::{Result, WinsError};
pub use session::*;
pub use types::*;

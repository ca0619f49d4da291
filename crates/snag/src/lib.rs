//! Minimal asynchronous HTTP(S) downloading.
//!
//! Fetches a resource with a single GET and returns it as raw bytes, as
//! decoded text or as parsed JSON, or streams the body straight into a
//! file. One request, one result: no retries, no redirect following, no
//! timeouts (callers needing one race the call against a timer).
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - `data` - Immutable configuration and types
//! - `core` - Pure transformations
//! - `effects` - I/O operations with trait abstraction
//!
//! # Key Features
//!
//! - **Two output modes**: buffered (`download`) or streamed-to-file
//!   (`download_to_file`), with truncate or append write modes
//! - **Text and JSON layers**: `download_string` / `download_json` decode
//!   the buffered result with a recognized encoding (default utf8)
//! - **Mechanism-only**: status 200 is the only success; every failure is
//!   surfaced to the caller unchanged, nothing is retried

mod core;
mod data;
mod effects;
mod error;

pub use self::core::decode;
pub use self::data::{Encoding, FileOptions, Scheme, USER_AGENT, WriteMode};
pub use self::effects::{BoxStream, Downloader, HttpClient, HttpResponse};

#[cfg(feature = "reqwest")]
pub use self::effects::ReqwestClient;

pub use self::error::{Error, ParseEncodingError, Result};

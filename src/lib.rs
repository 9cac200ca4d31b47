//! fitcheck - Fashion analysis page controller
//!
//! Drives the photo upload, preview, analysis results and chat panel of the
//! fitcheck page. Runs in the browser as WebAssembly and natively for
//! headless use.

mod app;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod intake;
pub mod message;
pub mod model;
pub mod page;
pub mod render;

#[cfg(test)]
mod test_support;

pub use app::{FitcheckApp, perform};
pub use client::{AdvisorClient, HttpClient};
pub use config::AppConfig;
pub use error::{ClientError, CommandError, IntakeError};
pub use message::{Message, Task};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
mod wasm_file;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

//! Documents the behaviors can run against outside the browser.
//!
//! The browser implementation lives in the `reed-web` crate.

pub mod memory;
pub mod replay;

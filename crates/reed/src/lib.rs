//! Page behaviors for the REED site.
//!
//! Each behavior is a handler object bound at load time to the elements it
//! reacts to, and mutates them through the [`page::Page`] seam. See
//! [`behaviors::PageBehaviors`] for the set built from a [`config::PageConfig`].

pub mod behaviors;
pub mod config;
pub mod data_url;
pub mod error;
pub mod page;
pub mod platform;
pub mod selector;

pub use behaviors::{EventOutcome, PageBehaviors, PageEvent};
pub use config::PageConfig;
pub use error::{ConfigError, SelectorError};
pub use page::Page;
pub use selector::Selector;

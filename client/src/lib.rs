//! Async bindings for the OpenWhisk REST API.
//!
//! ```no_run
//! use openwhisk_client::{InvokeOptions, OpenWhisk};
//!
//! # async fn example() -> openwhisk_client::Result<()> {
//! let whisk = OpenWhisk::from_env()?;
//! let result = whisk
//!     .actions()
//!     .invoke(
//!         "hello",
//!         Some(&serde_json::json!({"name": "Wendel"})),
//!         &InvokeOptions::blocking_result(),
//!     )
//!     .await?;
//! println!("{}", result);
//! # Ok(())
//! # }
//! ```

pub mod web;

pub mod action;
pub mod activation;
pub mod client;
pub mod options;
pub mod package;
pub mod retry;
pub mod rule;
pub mod trigger;
pub mod url;

pub mod error;
pub use error::Error;

pub use openwhisk_client_model as model;

pub use crate::action::ActionApi;
pub use crate::activation::ActivationApi;
pub use crate::client::{OpenWhisk, OpenWhiskBuilder};
pub use crate::options::{
    ActivationListOptions, CreateOptions, InvokeOptions, ListOptions, PackageListOptions,
};
pub use crate::package::PackageApi;
pub use crate::retry::Retry;
pub use crate::rule::RuleApi;
pub use crate::trigger::TriggerApi;
pub use crate::url::{Scope, UrlGenerator};

pub type Result<T> = std::result::Result<T, Error>;

//! Data model of the OpenWhisk REST API.

pub mod action;
pub use self::action::{Action, Exec, NewAction};
pub mod activation;
pub use self::activation::{Activation, ActivationLogs, ActivationResponse};
pub mod common;
pub use self::common::{KeyValue, Limits};
pub mod error_message;
pub use self::error_message::ErrorMessage;
pub mod package;
pub use self::package::Package;
pub mod resource;
pub use self::resource::{ResourceKind, UnknownResource};
pub mod rule;
pub use self::rule::Rule;
pub mod trigger;
pub use self::trigger::Trigger;

pub const API_PATH: &str = "api/v1";

//! Per-operation options. Each struct enumerates exactly the query
//! parameters the operation recognizes.
use chrono::{DateTime, Utc};

/// Pagination for collection listings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListOptions {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

/// Options for action/sequence create operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateOptions {
    /// Replace an existing action of the same name.
    pub overwrite: Option<bool>,
}

impl CreateOptions {
    pub fn overwrite() -> Self {
        CreateOptions {
            overwrite: Some(true),
        }
    }
}

/// Invocation-mode flags. The default invokes without waiting and returns an
/// activation reference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvokeOptions {
    pub blocking: Option<bool>,
    pub result: Option<bool>,
}

impl InvokeOptions {
    /// Waits for completion; the call returns the full activation record.
    pub fn blocking() -> Self {
        InvokeOptions {
            blocking: Some(true),
            result: None,
        }
    }

    /// Waits for completion; the call returns just the action's result.
    pub fn blocking_result() -> Self {
        InvokeOptions {
            blocking: Some(true),
            result: Some(true),
        }
    }
}

/// Filters for activation listings. Instants are sent to the platform as
/// epoch milliseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivationListOptions {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    /// Only activations of the action with this name.
    pub name: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub upto: Option<DateTime<Utc>>,
}

/// Filters for package listings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackageListOptions {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    /// Only packages shared publicly.
    pub public: Option<bool>,
}

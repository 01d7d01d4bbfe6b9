//! Umbrella client: one accessor per resource kind, all sharing a session.
use std::time::Duration;

use crate::action::ActionApi;
use crate::activation::ActivationApi;
use crate::error::Error;
use crate::package::PackageApi;
use crate::retry::Retry;
use crate::rule::RuleApi;
use crate::trigger::TriggerApi;
use crate::url::{Scope, UrlGenerator, DEFAULT_NAMESPACE};
use crate::web::{WebClient, WebClientBuilder};
use crate::Result;

pub const API_HOST_ENV_VAR: &str = "OPENWHISK_APIHOST";
pub const AUTH_TOKEN_ENV_VAR: &str = "OPENWHISK_TOKEN";
pub const NAMESPACE_ENV_VAR: &str = "OPENWHISK_NAMESPACE";

pub const DEFAULT_API_HOST: &str = "openwhisk.ng.bluemix.net";

/// Client for the platform REST API.
///
/// Cheap to clone; clones share the underlying session.
#[derive(Clone)]
pub struct OpenWhisk {
    web: WebClient,
    urls: UrlGenerator,
    scope: Scope,
    actions: ActionApi,
    activations: ActivationApi,
    packages: PackageApi,
    rules: RuleApi,
    triggers: TriggerApi,
}

impl OpenWhisk {
    pub fn builder() -> OpenWhiskBuilder {
        OpenWhiskBuilder::default()
    }

    /// Builds a client from `OPENWHISK_APIHOST`, `OPENWHISK_TOKEN` and
    /// `OPENWHISK_NAMESPACE`. The token is required; host and namespace fall
    /// back to defaults.
    pub fn from_env() -> Result<Self> {
        OpenWhiskBuilder::from_env()?.build()
    }

    fn new(web: WebClient, urls: UrlGenerator, scope: Scope) -> Self {
        OpenWhisk {
            actions: ActionApi::new(web.clone(), urls.clone(), scope.clone()),
            activations: ActivationApi::new(web.clone(), urls.clone(), scope.clone()),
            packages: PackageApi::new(web.clone(), urls.clone(), scope.clone()),
            rules: RuleApi::new(web.clone(), urls.clone(), scope.clone()),
            triggers: TriggerApi::new(web.clone(), urls.clone(), scope.clone()),
            web,
            urls,
            scope,
        }
    }

    pub fn actions(&self) -> &ActionApi {
        &self.actions
    }

    pub fn activations(&self) -> &ActivationApi {
        &self.activations
    }

    pub fn packages(&self) -> &PackageApi {
        &self.packages
    }

    pub fn rules(&self) -> &RuleApi {
        &self.rules
    }

    pub fn triggers(&self) -> &TriggerApi {
        &self.triggers
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Same session re-scoped to another namespace/package. Scope changes
    /// build new values; nothing is mutated behind existing handles.
    pub fn scoped(&self, scope: Scope) -> Self {
        OpenWhisk::new(self.web.clone(), self.urls.clone(), scope)
    }

    /// `GET {base}/namespaces`: namespaces visible to these credentials.
    pub async fn namespaces(&self) -> Result<Vec<String>> {
        self.web.get_json(&self.urls.namespaces()).await
    }
}

#[derive(Clone, Debug)]
pub struct OpenWhiskBuilder {
    api_host: String,
    namespace: String,
    package: Option<String>,
    web: WebClientBuilder,
}

impl Default for OpenWhiskBuilder {
    fn default() -> Self {
        OpenWhiskBuilder {
            api_host: DEFAULT_API_HOST.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            package: None,
            web: WebClient::builder(),
        }
    }
}

impl OpenWhiskBuilder {
    /// Reads host, token and namespace from the environment. Fails when
    /// `OPENWHISK_TOKEN` is missing or malformed.
    pub fn from_env() -> Result<Self> {
        let mut builder = OpenWhiskBuilder::default();
        if let Ok(api_host) = std::env::var(API_HOST_ENV_VAR) {
            builder.api_host = api_host;
        }
        if let Ok(namespace) = std::env::var(NAMESPACE_ENV_VAR) {
            builder.namespace = namespace;
        }
        let token = std::env::var(AUTH_TOKEN_ENV_VAR)
            .map_err(|_| Error::credentials(format!("{} is not set", AUTH_TOKEN_ENV_VAR)))?;
        builder.auth_token(&token)
    }

    /// Bare host or explicit `http(s)://` origin.
    pub fn api_host(mut self, api_host: &str) -> Self {
        self.api_host = api_host.to_string();
        self
    }

    /// Parses and installs a `key:secret` token; fails before any network
    /// I/O when the token is malformed.
    pub fn auth_token(mut self, token: &str) -> Result<Self> {
        self.web = self.web.auth_token(token)?;
        Ok(self)
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    pub fn package(mut self, package: &str) -> Self {
        self.package = Some(package.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.web = self.web.timeout(timeout);
        self
    }

    /// Disables TLS peer verification, e.g. for self-signed local
    /// deployments.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.web = self.web.accept_invalid_certs(accept);
        self
    }

    /// Retry policy for idempotent GET requests; off unless configured.
    pub fn retry(mut self, retry: Retry) -> Self {
        self.web = self.web.retry(retry);
        self
    }

    pub fn build(self) -> Result<OpenWhisk> {
        let urls = UrlGenerator::new(&self.api_host)?;
        let scope = Scope::new(&self.namespace, self.package.as_deref());
        let web = self.web.build()?;
        Ok(OpenWhisk::new(web, urls, scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scope_is_the_current_user_namespace() {
        let client = OpenWhisk::builder().build().unwrap();
        assert_eq!(client.scope().namespace(), "_");
        assert_eq!(client.scope().package(), None);
    }

    #[test]
    fn rescoping_builds_a_new_client() {
        let client = OpenWhisk::builder().build().unwrap();
        let system = client.scoped(Scope::new("whisk.system", Some("utils")));
        assert_eq!(system.scope().package(), Some("utils"));
        // The original handle keeps its own scope.
        assert_eq!(client.scope().package(), None);
    }

    #[test]
    fn malformed_token_fails_before_any_network_io() {
        let err = OpenWhisk::builder().auth_token("colonless").unwrap_err();
        assert!(matches!(err, Error::CredentialFormatError { .. }));
    }

    #[test]
    fn builder_rejects_unparseable_hosts() {
        let result = OpenWhisk::builder().api_host("not a host").build();
        assert!(matches!(result, Err(Error::InvalidAddress(_))));
    }
}

//! Rules: associations firing an action when a trigger fires.
use crate::model::Rule;
use crate::options::ListOptions;
use crate::url::{Scope, UrlGenerator};
use crate::web::{QueryParamsBuilder, WebClient};
use crate::Result;

#[derive(Clone)]
pub struct RuleApi {
    client: WebClient,
    urls: UrlGenerator,
    scope: Scope,
}

impl RuleApi {
    pub(crate) fn new(client: WebClient, urls: UrlGenerator, scope: Scope) -> Self {
        Self {
            client,
            urls,
            scope,
        }
    }

    /// `GET .../rules[?skip&limit]`
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Rule>> {
        let query = QueryParamsBuilder::new()
            .put("skip", options.skip)
            .put("limit", options.limit)
            .build();
        let url = self.urls.rules(&self.scope, &[], &query);
        self.client.get_json(&url).await
    }

    /// Sorted names of all rules in scope.
    pub async fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .list(&ListOptions::default())
            .await?
            .into_iter()
            .map(|rule| rule.name)
            .collect();
        names.sort();
        Ok(names)
    }

    /// `GET .../rules/{name}`
    pub async fn get(&self, name: &str) -> Result<Rule> {
        let url = self.urls.rules(&self.scope, &[name], "");
        self.client.get_json(&url).await
    }
}

//! Triggers: named event channels rules subscribe to.
use crate::model::Trigger;
use crate::options::ListOptions;
use crate::url::{Scope, UrlGenerator};
use crate::web::{QueryParamsBuilder, WebClient};
use crate::Result;

#[derive(Clone)]
pub struct TriggerApi {
    client: WebClient,
    urls: UrlGenerator,
    scope: Scope,
}

impl TriggerApi {
    pub(crate) fn new(client: WebClient, urls: UrlGenerator, scope: Scope) -> Self {
        Self {
            client,
            urls,
            scope,
        }
    }

    /// `GET .../triggers[?skip&limit]`
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Trigger>> {
        let query = QueryParamsBuilder::new()
            .put("skip", options.skip)
            .put("limit", options.limit)
            .build();
        let url = self.urls.triggers(&self.scope, &[], &query);
        self.client.get_json(&url).await
    }

    /// Sorted names of all triggers in scope.
    pub async fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .list(&ListOptions::default())
            .await?
            .into_iter()
            .map(|trigger| trigger.name)
            .collect();
        names.sort();
        Ok(names)
    }

    /// `GET .../triggers/{name}`
    pub async fn get(&self, name: &str) -> Result<Trigger> {
        let url = self.urls.triggers(&self.scope, &[name], "");
        self.client.get_json(&url).await
    }
}

//! Activations: execution records produced by invoking actions.
use std::collections::BTreeMap;

use serde_json::Value;

use crate::model::{Activation, ActivationLogs};
use crate::options::ActivationListOptions;
use crate::url::{Scope, UrlGenerator};
use crate::web::{QueryParamsBuilder, WebClient};
use crate::Result;

#[derive(Clone)]
pub struct ActivationApi {
    client: WebClient,
    urls: UrlGenerator,
    scope: Scope,
}

impl ActivationApi {
    pub(crate) fn new(client: WebClient, urls: UrlGenerator, scope: Scope) -> Self {
        Self {
            client,
            urls,
            scope,
        }
    }

    /// `GET .../activations[?skip&limit&name&since&upto]`
    pub async fn list(&self, options: &ActivationListOptions) -> Result<Vec<Activation>> {
        let query = QueryParamsBuilder::new()
            .put("skip", options.skip)
            .put("limit", options.limit)
            .put("name", options.name.as_deref())
            .put("since", options.since.map(|t| t.timestamp_millis()))
            .put("upto", options.upto.map(|t| t.timestamp_millis()))
            .build();
        let url = self.urls.activations(&self.scope, &[], &query);
        self.client.get_json(&url).await
    }

    /// Sorted, deduplicated names of recently invoked actions.
    pub async fn names(&self) -> Result<Vec<String>> {
        let activations = self.list(&ActivationListOptions::default()).await?;
        Ok(unique_sorted_names(activations))
    }

    /// Activation ids in listing order, most recent first.
    pub async fn ids(&self) -> Result<Vec<String>> {
        let activations = self.list(&ActivationListOptions::default()).await?;
        Ok(activations
            .into_iter()
            .map(|activation| activation.activation_id)
            .collect())
    }

    /// How many times each action name shows up in the activation list.
    pub async fn counts(&self) -> Result<BTreeMap<String, u64>> {
        let activations = self.list(&ActivationListOptions::default()).await?;
        Ok(count_names(&activations))
    }

    /// `GET .../activations/{id}`
    pub async fn get(&self, activation_id: &str) -> Result<Activation> {
        let url = self.urls.activations(&self.scope, &[activation_id], "");
        self.client.get_json(&url).await
    }

    /// `GET .../activations/{id}/result`: just the invocation result.
    pub async fn result(&self, activation_id: &str) -> Result<Value> {
        let url = self.urls.activations(&self.scope, &[activation_id, "result"], "");
        self.client.get_json(&url).await
    }

    /// `GET .../activations/{id}/logs`
    pub async fn logs(&self, activation_id: &str) -> Result<ActivationLogs> {
        let url = self.urls.activations(&self.scope, &[activation_id, "logs"], "");
        self.client.get_json(&url).await
    }
}

fn unique_sorted_names(activations: Vec<Activation>) -> Vec<String> {
    let mut names: Vec<String> = activations
        .into_iter()
        .map(|activation| activation.name)
        .collect();
    names.sort();
    names.dedup();
    names
}

fn count_names(activations: &[Activation]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for activation in activations {
        *counts.entry(activation.name.clone()).or_insert(0) += 1;
    }
    counts
}

//! Packages: namespacing containers grouping related actions.
use crate::model::Package;
use crate::options::PackageListOptions;
use crate::url::{Scope, UrlGenerator};
use crate::web::{QueryParamsBuilder, WebClient};
use crate::Result;

#[derive(Clone)]
pub struct PackageApi {
    client: WebClient,
    urls: UrlGenerator,
    scope: Scope,
}

impl PackageApi {
    pub(crate) fn new(client: WebClient, urls: UrlGenerator, scope: Scope) -> Self {
        Self {
            client,
            urls,
            scope,
        }
    }

    /// `GET .../packages[?skip&limit&public]`
    pub async fn list(&self, options: &PackageListOptions) -> Result<Vec<Package>> {
        let query = QueryParamsBuilder::new()
            .put("skip", options.skip)
            .put("limit", options.limit)
            .put("public", options.public)
            .build();
        let url = self.urls.packages(&self.scope, &[], &query);
        self.client.get_json(&url).await
    }

    /// Sorted names of all packages in the namespace.
    pub async fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .list(&PackageListOptions::default())
            .await?
            .into_iter()
            .map(|package| package.name)
            .collect();
        names.sort();
        Ok(names)
    }

    /// `GET .../packages/{name}`
    pub async fn get(&self, name: &str) -> Result<Package> {
        let url = self.urls.packages(&self.scope, &[name], "");
        self.client.get_json(&url).await
    }
}

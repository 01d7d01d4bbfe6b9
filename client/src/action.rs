//! Actions: deployable units of serverless code.
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

use crate::error::Error;
use crate::model::{Action, Exec, NewAction};
use crate::options::{CreateOptions, InvokeOptions, ListOptions};
use crate::url::{Scope, UrlGenerator};
use crate::web::{QueryParamsBuilder, WebClient};
use crate::Result;

/// Stock image for archive-backed actions.
const DEFAULT_BLACKBOX_IMAGE: &str = "openwhisk/dockerskeleton";

#[derive(Clone)]
pub struct ActionApi {
    client: WebClient,
    urls: UrlGenerator,
    scope: Scope,
}

impl ActionApi {
    pub(crate) fn new(client: WebClient, urls: UrlGenerator, scope: Scope) -> Self {
        Self {
            client,
            urls,
            scope,
        }
    }

    /// `GET .../actions[?skip&limit]`
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Action>> {
        let query = QueryParamsBuilder::new()
            .put("skip", options.skip)
            .put("limit", options.limit)
            .build();
        let url = self.urls.actions(&self.scope, &[], &query);
        self.client.get_json(&url).await
    }

    /// Sorted names of all actions in scope.
    pub async fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .list(&ListOptions::default())
            .await?
            .into_iter()
            .map(|action| action.name)
            .collect();
        names.sort();
        Ok(names)
    }

    /// `GET .../actions/{name}`
    pub async fn get(&self, name: &str) -> Result<Action> {
        let url = self.urls.actions(&self.scope, &[name], "");
        self.client.get_json(&url).await
    }

    /// `PUT .../actions/{name}[?overwrite]`
    pub async fn create(
        &self,
        name: &str,
        action: &NewAction,
        options: &CreateOptions,
    ) -> Result<Action> {
        let query = QueryParamsBuilder::new()
            .put("overwrite", options.overwrite)
            .build();
        let url = self.urls.actions(&self.scope, &[name], &query);
        self.client.put(&url).send_json(action).json().await
    }

    /// Uploads a source file or a `.zip` archive as action `name`. The
    /// runtime kind is inferred from the extension; archives become
    /// container-backed actions.
    pub async fn create_from_file(
        &self,
        name: &str,
        path: impl AsRef<Path>,
        options: &CreateOptions,
    ) -> Result<Action> {
        let action = new_action_from_file(path.as_ref())?;
        self.create(name, &action, options).await
    }

    /// Creates a sequence over fully qualified action names; the platform
    /// executes the components in the given order.
    pub async fn create_sequence(
        &self,
        name: &str,
        components: &[String],
        options: &CreateOptions,
    ) -> Result<Action> {
        let action = NewAction::new(Exec::sequence(components.to_vec()));
        self.create(name, &action, options).await
    }

    /// `POST .../actions/{name}[?blocking&result]`: returns an activation
    /// reference, a full activation record (blocking), or the bare action
    /// result (blocking + result).
    pub async fn invoke(
        &self,
        name: &str,
        payload: Option<&Value>,
        options: &InvokeOptions,
    ) -> Result<Value> {
        let query = QueryParamsBuilder::new()
            .put("blocking", options.blocking)
            .put("result", options.result)
            .build();
        let url = self.urls.actions(&self.scope, &[name], &query);
        let request = self.client.post(&url);
        match payload {
            Some(payload) => request.send_json(payload).json().await,
            None => request.send().json().await,
        }
    }

    /// `DELETE .../actions/{name}`: returns the action's last-known metadata.
    pub async fn delete(&self, name: &str) -> Result<Action> {
        let url = self.urls.actions(&self.scope, &[name], "");
        self.client.delete(&url).send().json().await
    }
}

/// Builds the create payload for a source file. `.zip` archives are base64
/// encoded into a container-backed descriptor; anything else is inline code
/// with the runtime kind inferred from the extension (`py` runs on `python`,
/// everything else on `nodejs`).
fn new_action_from_file(path: &Path) -> Result<NewAction> {
    let bytes = std::fs::read(path).map_err(|e| Error::file_access(path, e))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let exec = match extension.as_deref() {
        Some("zip") => Exec::blackbox(
            DEFAULT_BLACKBOX_IMAGE.to_string(),
            Some(BASE64.encode(&bytes)),
        ),
        Some("py") => Exec::inline("python".to_string(), String::from_utf8(bytes)?),
        _ => Exec::inline("nodejs".to_string(), String::from_utf8(bytes)?),
    };
    Ok(NewAction::new(exec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempdir::TempDir;

    #[test]
    fn python_extension_selects_python_runtime() {
        let dir = TempDir::new("actions").unwrap();
        let path = dir.path().join("hello.py");
        fs::write(&path, "def main(args):\n    return args\n").unwrap();

        let action = new_action_from_file(&path).unwrap();
        assert_eq!(action.exec.kind, "python");
        assert_eq!(
            action.exec.code.as_deref(),
            Some("def main(args):\n    return args\n")
        );
    }

    #[test]
    fn extension_match_ignores_case() {
        let dir = TempDir::new("actions").unwrap();
        let path = dir.path().join("HELLO.PY");
        fs::write(&path, "def main(args):\n    return {}\n").unwrap();

        let action = new_action_from_file(&path).unwrap();
        assert_eq!(action.exec.kind, "python");
    }

    #[test]
    fn unknown_extension_falls_back_to_nodejs() {
        let dir = TempDir::new("actions").unwrap();
        for file in ["hello.js", "hello"] {
            let path = dir.path().join(file);
            fs::write(&path, "function main() { return {}; }").unwrap();
            let action = new_action_from_file(&path).unwrap();
            assert_eq!(action.exec.kind, "nodejs", "{}", file);
        }
    }

    #[test]
    fn zip_archives_round_trip_through_base64() {
        let dir = TempDir::new("actions").unwrap();
        let path = dir.path().join("action.zip");
        let bytes: Vec<u8> = [b"PK\x03\x04".to_vec(), (0u8..=255).collect()].concat();
        fs::write(&path, &bytes).unwrap();

        let action = new_action_from_file(&path).unwrap();
        assert_eq!(action.exec.kind, "blackbox");
        assert_eq!(action.exec.image.as_deref(), Some(DEFAULT_BLACKBOX_IMAGE));
        let decoded = BASE64.decode(action.exec.code.unwrap()).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = new_action_from_file(Path::new("/definitely/not/here.py")).unwrap_err();
        match err {
            Error::FileAccessError { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/here.py"))
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn non_utf8_source_is_an_encoding_error() {
        let dir = TempDir::new("actions").unwrap();
        let path = dir.path().join("broken.py");
        fs::write(&path, [0xf0, 0x28, 0x8c, 0x28]).unwrap();

        let err = new_action_from_file(&path).unwrap_err();
        assert!(matches!(err, Error::FromUtf8Error(_)));
    }
}

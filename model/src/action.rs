use serde::{Deserialize, Serialize};

use crate::common::{KeyValue, Limits};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec: Option<Exec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<KeyValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<KeyValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<Limits>,
}

/// Body of an action create/update request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAction {
    pub exec: Exec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<KeyValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<KeyValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<Limits>,
}

impl NewAction {
    pub fn new(exec: Exec) -> NewAction {
        NewAction {
            exec,
            annotations: None,
            parameters: None,
            limits: None,
        }
    }
}

/// Execution descriptor: what the platform runs when the action is invoked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exec {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<bool>,
}

impl Exec {
    /// Source code run by one of the stock runtimes, e.g. `nodejs` or `python`.
    pub fn inline(kind: String, code: String) -> Exec {
        Exec {
            kind,
            code: Some(code),
            image: None,
            components: None,
            binary: None,
        }
    }

    /// Container-backed execution; `code` carries a base64 encoded archive when present.
    pub fn blackbox(image: String, code: Option<String>) -> Exec {
        Exec {
            kind: "blackbox".to_string(),
            code,
            image: Some(image),
            components: None,
            binary: None,
        }
    }

    /// Chain of fully qualified action names, executed by the platform in order.
    pub fn sequence(components: Vec<String>) -> Exec {
        Exec {
            kind: "sequence".to_string(),
            code: None,
            image: None,
            components: Some(components),
            binary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_exec_skips_absent_fields() {
        let exec = Exec::inline("python".to_string(), "def main(args): return args".to_string());
        let json = serde_json::to_value(&exec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "python", "code": "def main(args): return args"})
        );
    }

    #[test]
    fn sequence_exec_keeps_component_order() {
        let exec = Exec::sequence(vec!["/_/split".to_string(), "/_/sort".to_string()]);
        let json = serde_json::to_value(&exec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "sequence", "components": ["/_/split", "/_/sort"]})
        );
    }

    #[test]
    fn action_record_parses() {
        let json = r#"{
            "name": "hello",
            "namespace": "user@host.dev",
            "version": "0.0.2",
            "publish": false,
            "exec": {"kind": "nodejs:default", "code": "function main() {}", "binary": false},
            "annotations": [{"key": "exec", "value": "nodejs:default"}],
            "limits": {"timeout": 60000, "memory": 256, "logs": 10}
        }"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(action.name, "hello");
        assert_eq!(action.limits.unwrap().memory, Some(256));
        assert_eq!(action.exec.unwrap().kind, "nodejs:default");
    }
}

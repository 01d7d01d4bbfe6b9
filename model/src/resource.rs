use std::fmt;
use std::str::FromStr;

/// Kinds of REST resources exposed under a namespace.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResourceKind {
    Action,
    Activation,
    Package,
    Rule,
    Trigger,
}

impl ResourceKind {
    /// Plural collection segment under `/namespaces/{namespace}/`.
    pub fn path_segment(self) -> &'static str {
        match self {
            ResourceKind::Action => "actions",
            ResourceKind::Activation => "activations",
            ResourceKind::Package => "packages",
            ResourceKind::Rule => "rules",
            ResourceKind::Trigger => "triggers",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Action => "action",
            ResourceKind::Activation => "activation",
            ResourceKind::Package => "package",
            ResourceKind::Rule => "rule",
            ResourceKind::Trigger => "trigger",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("unknown resource kind: {0}")]
pub struct UnknownResource(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.trim_end_matches('s') {
            "action" => Ok(ResourceKind::Action),
            "activation" => Ok(ResourceKind::Activation),
            "package" => Ok(ResourceKind::Package),
            "rule" => Ok(ResourceKind::Rule),
            "trigger" => Ok(ResourceKind::Trigger),
            _ => Err(UnknownResource(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_and_plural_tolerant() {
        assert_eq!(" AcTiOnS ".parse(), Ok(ResourceKind::Action));
        assert_eq!("rule".parse(), Ok(ResourceKind::Rule));
        assert_eq!("Triggers".parse(), Ok(ResourceKind::Trigger));
    }

    #[test]
    fn parse_rejects_unknown_kinds() {
        let err = "sequence".parse::<ResourceKind>().unwrap_err();
        assert_eq!(err, UnknownResource("sequence".to_string()));
    }

    #[test]
    fn path_segments_are_plural() {
        assert_eq!(ResourceKind::Activation.path_segment(), "activations");
        assert_eq!(ResourceKind::Package.path_segment(), "packages");
    }
}

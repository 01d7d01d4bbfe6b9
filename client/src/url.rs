//! REST URL construction for platform resources.
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use crate::model::{ResourceKind, API_PATH};
use crate::Result;

/// Sentinel for "the namespace of the authenticated user".
pub const DEFAULT_NAMESPACE: &str = "_";

/// WHATWG path-segment set: characters that cannot appear verbatim inside a
/// single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

fn encoded(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Which namespace, and optionally which package, a URL addresses.
///
/// Passed explicitly into every URL-building call; scope changes build new
/// values instead of mutating a generator.
#[derive(Clone, Debug, PartialEq)]
pub struct Scope {
    namespace: String,
    package: Option<String>,
}

impl Scope {
    /// Empty namespaces fall back to [`DEFAULT_NAMESPACE`]; empty and
    /// whitespace-only package names mean "no package".
    pub fn new(namespace: &str, package: Option<&str>) -> Scope {
        let namespace = match namespace.trim() {
            "" => DEFAULT_NAMESPACE.to_string(),
            ns => ns.to_string(),
        };
        let package = package
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        Scope { namespace, package }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Fully qualified action name, e.g. `/whisk.system/utils/echo`; the
    /// form sequence components are declared in.
    pub fn qualified_name(&self, name: &str) -> String {
        match &self.package {
            Some(package) => format!("/{}/{}/{}", self.namespace, package, name),
            None => format!("/{}/{}", self.namespace, name),
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::new(DEFAULT_NAMESPACE, None)
    }
}

/// Builds fully qualified REST URLs under one API host.
#[derive(Clone, Debug)]
pub struct UrlGenerator {
    base: String,
}

impl UrlGenerator {
    /// Accepts a bare host (`https://` is assumed) or an explicit
    /// `http(s)://` origin, e.g. a local deployment.
    pub fn new(api_host: &str) -> Result<UrlGenerator> {
        let origin = if api_host.contains("://") {
            api_host.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", api_host.trim_end_matches('/'))
        };
        let base = format!("{}/{}", origin, API_PATH);
        Url::parse(&base)?;
        Ok(UrlGenerator { base })
    }

    /// `{base}/namespaces`: the collection of namespaces visible to the
    /// authenticated subject.
    pub fn namespaces(&self) -> String {
        format!("{}/namespaces", self.base)
    }

    /// `{base}/namespaces/{ns}[/packages/{pkg}]/{kind}[/{segment}…][?query]`
    ///
    /// The package infix applies to every kind except packages themselves,
    /// which are never nested under a package. Every emitted path segment is
    /// percent-encoded.
    pub fn resource(
        &self,
        scope: &Scope,
        kind: ResourceKind,
        segments: &[&str],
        query: &str,
    ) -> String {
        let mut url = format!("{}/namespaces/{}", self.base, encoded(&scope.namespace));
        if kind != ResourceKind::Package {
            if let Some(package) = scope.package() {
                url.push_str("/packages/");
                url.push_str(&encoded(package));
            }
        }
        url.push('/');
        url.push_str(kind.path_segment());
        for segment in segments {
            url.push('/');
            url.push_str(&encoded(segment));
        }
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    pub fn actions(&self, scope: &Scope, segments: &[&str], query: &str) -> String {
        self.resource(scope, ResourceKind::Action, segments, query)
    }

    pub fn activations(&self, scope: &Scope, segments: &[&str], query: &str) -> String {
        self.resource(scope, ResourceKind::Activation, segments, query)
    }

    pub fn packages(&self, scope: &Scope, segments: &[&str], query: &str) -> String {
        self.resource(scope, ResourceKind::Package, segments, query)
    }

    pub fn rules(&self, scope: &Scope, segments: &[&str], query: &str) -> String {
        self.resource(scope, ResourceKind::Rule, segments, query)
    }

    pub fn triggers(&self, scope: &Scope, segments: &[&str], query: &str) -> String {
        self.resource(scope, ResourceKind::Trigger, segments, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> UrlGenerator {
        UrlGenerator::new("openwhisk.ng.bluemix.net").unwrap()
    }

    #[test]
    fn bare_host_gets_https_scheme() {
        let url = generator().actions(&Scope::default(), &[], "");
        assert_eq!(
            url,
            "https://openwhisk.ng.bluemix.net/api/v1/namespaces/_/actions"
        );
    }

    #[test]
    fn explicit_scheme_is_honored() {
        let urls = UrlGenerator::new("http://127.0.0.1:3233").unwrap();
        let url = urls.triggers(&Scope::default(), &["fire"], "");
        assert_eq!(url, "http://127.0.0.1:3233/api/v1/namespaces/_/triggers/fire");
    }

    #[test]
    fn invalid_host_fails_at_construction() {
        assert!(UrlGenerator::new("not a host").is_err());
    }

    #[test]
    fn package_infix_appears_exactly_once_between_namespace_and_kind() {
        let scope = Scope::new("whisk.system", Some("utils"));
        for kind in [
            ResourceKind::Action,
            ResourceKind::Activation,
            ResourceKind::Rule,
            ResourceKind::Trigger,
        ] {
            let url = generator().resource(&scope, kind, &["echo"], "");
            assert_eq!(url.matches("/packages/").count(), 1, "{}", url);
            assert!(
                url.contains(&format!(
                    "/namespaces/whisk.system/packages/utils/{}/echo",
                    kind.path_segment()
                )),
                "{}",
                url
            );
        }
    }

    #[test]
    fn packages_are_never_nested_under_a_package() {
        let scope = Scope::new("whisk.system", Some("utils"));
        let url = generator().packages(&scope, &["cloudant"], "");
        assert_eq!(
            url,
            "https://openwhisk.ng.bluemix.net/api/v1/namespaces/whisk.system/packages/cloudant"
        );
    }

    #[test]
    fn empty_package_means_no_infix() {
        for package in [None, Some(""), Some("  ")] {
            let scope = Scope::new("_", package);
            let url = generator().actions(&scope, &["hello"], "");
            assert_eq!(
                url,
                "https://openwhisk.ng.bluemix.net/api/v1/namespaces/_/actions/hello"
            );
        }
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let scope = Scope::new("user@host.dev", None);
        let url = generator().actions(&scope, &["my action/v2"], "");
        assert_eq!(
            url,
            "https://openwhisk.ng.bluemix.net/api/v1/namespaces/user@host.dev/actions/my%20action%2Fv2"
        );
    }

    #[test]
    fn unicode_segments_are_percent_encoded() {
        let url = generator().actions(&Scope::default(), &["héllo"], "");
        assert_eq!(
            url,
            "https://openwhisk.ng.bluemix.net/api/v1/namespaces/_/actions/h%C3%A9llo"
        );
    }

    #[test]
    fn segments_append_in_call_order() {
        let url = generator().activations(&Scope::default(), &["ad5bb39b", "logs"], "");
        assert!(url.ends_with("/namespaces/_/activations/ad5bb39b/logs"));
    }

    #[test]
    fn query_string_is_appended_after_question_mark() {
        let url = generator().actions(&Scope::default(), &["hello"], "blocking=true&result=true");
        assert!(url.ends_with("/actions/hello?blocking=true&result=true"));
    }

    #[test]
    fn namespaces_url_has_no_namespace_segment() {
        assert_eq!(
            generator().namespaces(),
            "https://openwhisk.ng.bluemix.net/api/v1/namespaces"
        );
    }

    #[test]
    fn qualified_names_include_the_package() {
        let scoped = Scope::new("whisk.system", Some("utils"));
        assert_eq!(scoped.qualified_name("echo"), "/whisk.system/utils/echo");
        assert_eq!(Scope::default().qualified_name("split"), "/_/split");
    }

    #[test]
    fn blank_namespace_falls_back_to_sentinel() {
        let scope = Scope::new("  ", None);
        assert_eq!(scope.namespace(), "_");
    }
}

use std::collections::HashMap;

pub const MIRROR_SUFFIX: &str = "MIRROR";
pub const API_SUFFIX: &str = "API";
pub const VERSION_SUFFIX: &str = "VERSION";

/// `XVM_<SDK>_<SUFFIX>` with the SDK name uppercased.
#[must_use]
pub fn sdk_var_name(sdk: &str, suffix: &str) -> String {
    format!("XVM_{}_{suffix}", sdk.to_uppercase())
}

/// Source of environment variables: the live process or a fixed table.
#[derive(Debug, Clone, Default)]
pub enum EnvVars {
    #[default]
    Process,
    Fixed(HashMap<String, String>),
}

impl EnvVars {
    #[must_use]
    pub fn fixed<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// The variable's value; unset and empty are both `None`.
    #[must_use]
    pub fn var(&self, key: &str) -> Option<String> {
        let value = match self {
            Self::Process => std::env::var(key).ok(),
            Self::Fixed(vars) => vars.get(key).cloned(),
        };
        value.filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn is_true(&self, key: &str) -> bool {
        self.var(key)
            .is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1")
    }

    #[must_use]
    pub fn sdk_var(&self, sdk: &str, suffix: &str) -> Option<String> {
        self.var(&sdk_var_name(sdk, suffix))
    }

    /// Overridable URL: `XVM_<SDK>_<SUFFIX>` if set, otherwise `default`,
    /// with trailing slashes trimmed either way.
    #[must_use]
    pub fn endpoint(&self, sdk: &str, suffix: &str, default: &str) -> String {
        let value = self.sdk_var(sdk, suffix);
        value
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{EnvVars, MIRROR_SUFFIX, VERSION_SUFFIX, sdk_var_name};

    #[test]
    fn sdk_var_name_uppercases_sdk() {
        assert_eq!(sdk_var_name("go", VERSION_SUFFIX), "XVM_GO_VERSION");
        assert_eq!(sdk_var_name("java", "DISTRIBUTION"), "XVM_JAVA_DISTRIBUTION");
    }

    #[test]
    fn empty_values_count_as_unset() {
        let vars = EnvVars::fixed([("XVM_GO_VERSION", ""), ("XVM_NODE_VERSION", "20.11.0")]);

        assert_eq!(vars.sdk_var("go", VERSION_SUFFIX), None);
        assert_eq!(vars.sdk_var("node", VERSION_SUFFIX).as_deref(), Some("20.11.0"));
    }

    #[test]
    fn endpoint_prefers_override_and_trims_slashes() {
        let vars = EnvVars::fixed([("XVM_GO_MIRROR", "https://mirror.example/go//")]);

        assert_eq!(
            vars.endpoint("go", MIRROR_SUFFIX, "https://go.dev/dl"),
            "https://mirror.example/go"
        );
        assert_eq!(
            vars.endpoint("node", MIRROR_SUFFIX, "https://nodejs.org/dist/"),
            "https://nodejs.org/dist"
        );
    }

    #[test]
    fn is_true_accepts_true_and_one() {
        let vars = EnvVars::fixed([("DEBUG", "TRUE"), ("SILENT", "1"), ("OTHER", "yes")]);

        assert!(vars.is_true("DEBUG"));
        assert!(vars.is_true("SILENT"));
        assert!(!vars.is_true("OTHER"));
        assert!(!vars.is_true("MISSING"));
    }
}

use std::path::{Path, PathBuf};

use xvm_sdk::{Sdk, Tool, XvmError};

/// The SDKs known to this process, in registration order.
pub struct SdkRegistry {
    sdks: Vec<Box<dyn Sdk>>,
}

impl SdkRegistry {
    #[must_use]
    pub fn new(sdks: Vec<Box<dyn Sdk>>) -> Self {
        Self { sdks }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Sdk> {
        self.sdks.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|sdk| sdk.name().to_string()).collect()
    }

    /// # Errors
    /// Returns [`XvmError::NotFound`] listing every SDK name when `name` is
    /// not registered.
    pub fn sdk(&self, name: &str) -> Result<&dyn Sdk, XvmError> {
        self.iter()
            .find(|sdk| sdk.name() == name)
            .ok_or_else(|| XvmError::unknown_sdk(name, self.names()))
    }

    /// Find the SDK providing `tool`. When several SDKs ship a tool with the
    /// same name, the first registered one wins.
    ///
    /// # Errors
    /// Returns [`XvmError::NotFound`] listing every tool name when no SDK
    /// provides `tool`.
    pub fn find_tool(&self, tool: &str) -> Result<(&dyn Sdk, &Tool), XvmError> {
        self.iter()
            .find_map(|sdk| sdk.info().tool(tool).map(|found| (sdk, found)))
            .ok_or_else(|| {
                let allowed = self.iter().flat_map(|sdk| sdk.info().tool_names()).collect();
                XvmError::unknown_tool(tool, allowed)
            })
    }

    /// `bin_dir` followed by the extra bin paths of each activated SDK.
    /// Unknown names are skipped.
    #[must_use]
    pub fn bin_paths(&self, bin_dir: &Path, activated: &[String]) -> Vec<PathBuf> {
        let mut paths = vec![bin_dir.to_path_buf()];
        for name in activated {
            if let Ok(sdk) = self.sdk(name) {
                paths.extend(sdk.info().bin_paths.iter().cloned());
            }
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use async_trait::async_trait;
    use xvm_sdk::{Mirror, Sdk, SdkInfo, Tool, VersionDescriptor, XvmError};

    use super::SdkRegistry;

    struct EmptyMirror(&'static str);

    #[async_trait]
    impl Mirror for EmptyMirror {
        fn sdk(&self) -> &str {
            self.0
        }

        fn platform(&self) -> String {
            "linux/amd64".to_string()
        }

        fn base_url(&self) -> &str {
            "https://example.invalid"
        }

        async fn versions(&self) -> Result<Vec<VersionDescriptor>, XvmError> {
            Ok(Vec::new())
        }
    }

    struct StubSdk {
        info: SdkInfo,
        mirror: EmptyMirror,
    }

    impl StubSdk {
        fn boxed(
            name: &'static str,
            tools: &[&str],
            bin_paths: &[&str],
        ) -> Box<dyn Sdk> {
            Box::new(Self {
                info: SdkInfo {
                    name: name.to_string(),
                    tools: tools
                        .iter()
                        .map(|tool| Tool::new(*tool, format!("bin/{tool}")))
                        .collect(),
                    bin_paths: bin_paths.iter().map(PathBuf::from).collect(),
                },
                mirror: EmptyMirror(name),
            })
        }
    }

    impl Sdk for StubSdk {
        fn info(&self) -> &SdkInfo {
            &self.info
        }

        fn mirror(&self) -> &dyn Mirror {
            &self.mirror
        }
    }

    fn registry() -> SdkRegistry {
        SdkRegistry::new(vec![
            StubSdk::boxed("go", &["go"], &["/home/dev/go/bin"]),
            StubSdk::boxed("node", &["node", "npm"], &["/home/dev/.xvm/data/node/npm-packages/bin"]),
            StubSdk::boxed("bun", &["bun", "npm"], &[]),
        ])
    }

    #[test]
    fn first_registered_sdk_wins_tool_collisions() {
        let registry = registry();

        let (sdk, tool) = registry.find_tool("npm").expect("npm should be found");

        assert_eq!(sdk.name(), "node");
        assert_eq!(tool.path, Path::new("bin/npm"));
    }

    #[test]
    fn unknown_tool_lists_every_tool() {
        let registry = registry();

        let error = registry
            .find_tool("rustc")
            .err()
            .expect("rustc should not be found");

        assert_eq!(
            error.to_string(),
            "unknown tool: rustc, allows go,node,npm,bun,npm"
        );
    }

    #[test]
    fn unknown_sdk_lists_sdk_names() {
        let registry = registry();

        let error = registry.sdk("ruby").err().expect("ruby should not be found");

        assert_eq!(error.to_string(), "unknown sdk: ruby, allows go,node,bun");
    }

    #[test]
    fn bin_paths_start_with_bin_dir_and_skip_unknown() {
        let registry = registry();
        let activated = vec!["node".to_string(), "ruby".to_string(), "go".to_string()];

        let paths = registry.bin_paths(Path::new("/home/dev/.xvm/bin"), &activated);

        assert_eq!(
            paths,
            vec![
                PathBuf::from("/home/dev/.xvm/bin"),
                PathBuf::from("/home/dev/.xvm/data/node/npm-packages/bin"),
                PathBuf::from("/home/dev/go/bin"),
            ]
        );
    }
}

use xvm_core::SdkRegistry;
use xvm_go::GoSdk;
use xvm_java::JavaSdk;
use xvm_node::NodeSdk;
use xvm_platform::{EnvVars, Platform, XvmPaths};
use xvm_sdk::HttpContext;

/// Every supported SDK, in tool-lookup order.
pub fn registry(
    paths: &XvmPaths,
    platform: Platform,
    http: &HttpContext,
    vars: &EnvVars,
) -> SdkRegistry {
    SdkRegistry::new(vec![
        Box::new(GoSdk::new(&paths.home, platform, http.clone(), vars)),
        Box::new(NodeSdk::new(&paths.data, platform, http.clone(), vars)),
        Box::new(JavaSdk::new(platform, http.clone(), vars)),
    ])
}

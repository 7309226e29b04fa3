mod mirror;
mod npm;
mod sdk;

pub use mirror::NodeMirror;
pub use sdk::NodeSdk;

mod gomod;
mod mirror;
mod sdk;

pub use gomod::{GoModManifest, parse_go_directive};
pub use mirror::GoMirror;
pub use sdk::GoSdk;

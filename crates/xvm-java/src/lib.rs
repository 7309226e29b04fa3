mod distribution;
mod sdk;
mod zulu;

pub use distribution::{Distribution, java_mirror};
pub use sdk::JavaSdk;
pub use zulu::ZuluMirror;

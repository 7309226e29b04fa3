use log::error;
use xvm_platform::{EnvVars, Platform};
use xvm_sdk::{HttpContext, Mirror};

use crate::zulu::ZuluMirror;

pub const DISTRIBUTION_VAR: &str = "XVM_JAVA_DISTRIBUTION";

/// JDK vendors xvm can install from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distribution {
    #[default]
    Zulu,
}

impl Distribution {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "zulu" => Some(Self::Zulu),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zulu => "zulu",
        }
    }

    /// `XVM_JAVA_DISTRIBUTION`, or the default when it is unset or unknown.
    #[must_use]
    pub fn from_vars(vars: &EnvVars) -> Self {
        let Some(name) = vars.var(DISTRIBUTION_VAR) else {
            return Self::default();
        };
        Self::parse(&name).unwrap_or_else(|| {
            let fallback = Self::default();
            error!("unknown distribution: {name}, uses {} instead.", fallback.as_str());
            fallback
        })
    }
}

#[must_use]
pub fn java_mirror(http: HttpContext, platform: Platform, vars: &EnvVars) -> Box<dyn Mirror> {
    match Distribution::from_vars(vars) {
        Distribution::Zulu => Box::new(ZuluMirror::new(http, platform, vars)),
    }
}

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Deserializer};

/// Per-route authentication policy.
///
/// A route without any declared policy resolves to `Default`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RouteAuth {
    /// Run the registry's default strategy, if one is set.
    #[default]
    Default,
    /// Skip authentication entirely.
    Disabled,
    /// Run the default strategy but let the request through if it fails.
    Try,
    /// Run this specific strategy. An unknown name is a routing defect (500).
    Strategy(String),
}

impl RouteAuth {
    pub fn strategy(name: impl Into<String>) -> Self {
        Self::Strategy(name.into())
    }

    pub fn tolerates_failure(&self) -> bool {
        matches!(self, Self::Try)
    }
}

impl FromStr for RouteAuth {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Only `"try"` is a keyword; every other string names a strategy.
        Ok(match s {
            "try" => Self::Try,
            name => Self::Strategy(name.to_string()),
        })
    }
}

impl fmt::Display for RouteAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Disabled => f.write_str("false"),
            Self::Try => f.write_str("try"),
            Self::Strategy(name) => f.write_str(name),
        }
    }
}

// Accepts the route config shapes `{ "auth": false }`, `{ "auth": "try" }`
// and `{ "auth": "<name>" }`. Only the boolean `false` disables auth;
// `true` means the default strategy.
impl<'de> Deserialize<'de> for RouteAuth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Name(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => Self::Disabled,
            Raw::Flag(true) => Self::Default,
            Raw::Name(name) => match name.parse::<RouteAuth>() {
                Ok(auth) => auth,
                Err(never) => match never {},
            },
        })
    }
}

//! Domain names for classification and extraction capabilities.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque domain name (e.g. a business vertical).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Domain {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Domain {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Domain {
    fn borrow(&self) -> &str {
        &self.0
    }
}

//! Identifiers of the downstream code generators that consume a filtered IR.
//!
//! This is static configuration data. Filtering never depends on which
//! generator is targeted; the name is only recorded alongside the result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A known downstream generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GeneratorName {
    Typescript,
    TypescriptSdk,
    Java,
    JavaSdk,
    Python,
    Openapi,
    Postman,
}

impl GeneratorName {
    pub const ALL: [GeneratorName; 7] = [
        GeneratorName::Typescript,
        GeneratorName::TypescriptSdk,
        GeneratorName::Java,
        GeneratorName::JavaSdk,
        GeneratorName::Python,
        GeneratorName::Openapi,
        GeneratorName::Postman,
    ];

    /// The published generator image name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorName::Typescript => "fernapi/fern-typescript",
            GeneratorName::TypescriptSdk => "fernapi/fern-typescript-sdk",
            GeneratorName::Java => "fernapi/fern-java",
            GeneratorName::JavaSdk => "fernapi/fern-java-sdk",
            GeneratorName::Python => "fernapi/fern-python",
            GeneratorName::Openapi => "fernapi/fern-openapi",
            GeneratorName::Postman => "fernapi/fern-postman",
        }
    }
}

impl fmt::Display for GeneratorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a string that names no known generator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown generator '{0}'")]
pub struct UnknownGeneratorName(pub String);

impl FromStr for GeneratorName {
    type Err = UnknownGeneratorName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorName::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownGeneratorName(s.to_string()))
    }
}

impl TryFrom<String> for GeneratorName {
    type Error = UnknownGeneratorName;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<GeneratorName> for String {
    fn from(g: GeneratorName) -> Self {
        g.as_str().to_string()
    }
}

//! Asset reference resolution.

use std::fmt;

/// Fixed path segment the deployed site keeps model files under.
const MODELS_SEGMENT: &str = "models";

/// Deployment environment the showcase was launched for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_flag(value: &str) -> Option<Self> {
        match value {
            "dev" | "development" => Some(Environment::Development),
            "prod" | "production" => Some(Environment::Production),
            _ => None,
        }
    }
}

/// A resolved locator for a model resource: a root-relative path in
/// development, a deployed URL in production.
///
/// Resolution is string concatenation only. A malformed base is not an
/// error here; it yields an unreachable locator that surfaces later as
/// `NetworkUnreachable`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetReference {
    url: String,
}

impl AssetReference {
    pub fn resolve(base_path: &str, environment: Environment, file_name: &str) -> Self {
        let url = match environment {
            Environment::Development => {
                format!("/{MODELS_SEGMENT}/{file_name}")
            }
            Environment::Production => {
                format!(
                    "{}/{MODELS_SEGMENT}/{file_name}",
                    base_path.trim_end_matches('/')
                )
            }
        };
        Self { url }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn is_http(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }

    /// Sibling reference with the extension swapped, e.g. `.obj` -> `.mtl`.
    pub fn with_extension(&self, ext: &str) -> Self {
        let url = match self.url.rsplit_once('.') {
            Some((stem, _)) => format!("{stem}.{ext}"),
            None => format!("{}.{ext}", self.url),
        };
        Self { url }
    }

    /// File name without directories or extension; used as the model name.
    pub fn file_stem(&self) -> &str {
        let file = self.url.rsplit('/').next().unwrap_or(&self.url);
        file.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file)
    }
}

impl fmt::Display for AssetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_resolves_root_relative() {
        let r = AssetReference::resolve("https://ignored", Environment::Development, "swirl.glb");
        assert_eq!(r.as_str(), "/models/swirl.glb");
        assert!(!r.is_http());
    }

    #[test]
    fn production_joins_base_and_segment() {
        let r = AssetReference::resolve(
            "https://vault.example/",
            Environment::Production,
            "swirl.glb",
        );
        assert_eq!(r.as_str(), "https://vault.example/models/swirl.glb");
        assert!(r.is_http());
    }

    #[test]
    fn malformed_base_passes_through_unvalidated() {
        let r = AssetReference::resolve("htp:/oops", Environment::Production, "swirl.glb");
        assert_eq!(r.as_str(), "htp:/oops/models/swirl.glb");
        assert!(!r.is_http());
    }

    #[test]
    fn sibling_extension_swap() {
        let r = AssetReference::from_url("/models/swirl.obj");
        assert_eq!(r.with_extension("mtl").as_str(), "/models/swirl.mtl");
        assert_eq!(r.file_stem(), "swirl");
    }
}

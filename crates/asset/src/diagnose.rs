//! Failure diagnostics: classify a terminal load failure by re-probing
//! the same reference. Logging only; no effect on control flow or state.

use std::fmt;

use corelib::error::LoadError;

use crate::fetch::{self, ProbeResult};
use crate::reference::AssetReference;

/// What the secondary probe concluded about the reference.
#[derive(Clone, Debug, PartialEq)]
pub enum FailureClass {
    /// The server answered, but with the wrong kind of body (typically an
    /// HTML fallback page from an environment mismatch).
    WrongContentType { content_type: String },
    /// The reference could not be fetched at all.
    Unreachable { reason: String },
    /// The body looks plausible; the failure is in the parse itself.
    ContentLooksValid,
}

/// Log-only report produced after a failure is already terminal.
#[derive(Clone, Debug)]
pub struct DiagnosticReport {
    pub reference: AssetReference,
    pub error_kind: &'static str,
    pub class: FailureClass,
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.class {
            FailureClass::WrongContentType { content_type } => write!(
                f,
                "{} for {}: server answered with '{}' instead of a model",
                self.error_kind, self.reference, content_type
            ),
            FailureClass::Unreachable { reason } => write!(
                f,
                "{} for {}: probe could not fetch it either ({})",
                self.error_kind, self.reference, reason
            ),
            FailureClass::ContentLooksValid => write!(
                f,
                "{} for {}: probe found a plausible body; failure is in the parse",
                self.error_kind, self.reference
            ),
        }
    }
}

/// Re-fetch the reference and classify the failure for the log.
pub fn diagnose(error: &LoadError, reference: &AssetReference) -> DiagnosticReport {
    let class = match fetch::probe(reference) {
        Ok(probe) => classify(&probe),
        Err(LoadError::NetworkUnreachable { reason, .. }) => FailureClass::Unreachable { reason },
        Err(other) => FailureClass::Unreachable {
            reason: other.to_string(),
        },
    };
    let report = DiagnosticReport {
        reference: reference.clone(),
        error_kind: error.kind(),
        class,
    };
    log::warn!("load diagnostics: {report}");
    report
}

fn classify(probe: &ProbeResult) -> FailureClass {
    if let Some(content_type) = &probe.content_type {
        if content_type.contains("text/html") {
            return FailureClass::WrongContentType {
                content_type: content_type.clone(),
            };
        }
    }
    if fetch::looks_like_html(&probe.head) {
        return FailureClass::WrongContentType {
            content_type: "text/html (sniffed)".into(),
        };
    }
    FailureClass::ContentLooksValid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_failure(url: &str) -> LoadError {
        LoadError::ParseFailure {
            url: url.into(),
            detail: "test".into(),
        }
    }

    #[test]
    fn unreachable_reference_classifies_as_unreachable() {
        let reference = AssetReference::from_url("/models/never-deployed.glb");
        let report = diagnose(&parse_failure(reference.as_str()), &reference);
        assert!(matches!(report.class, FailureClass::Unreachable { .. }));
        assert_eq!(report.error_kind, "parse-failure");
    }

    #[test]
    fn html_body_classifies_as_wrong_content_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("swirl.glb");
        std::fs::write(&path, "<html><body>Not Found</body></html>").expect("write");
        let reference = AssetReference::from_url(path.to_str().expect("utf8 path"));

        let report = diagnose(&parse_failure(reference.as_str()), &reference);
        assert!(matches!(report.class, FailureClass::WrongContentType { .. }));
    }

    #[test]
    fn binary_body_classifies_as_plausible() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("swirl.glb");
        std::fs::write(&path, b"glTF\x02\x00\x00\x00garbage").expect("write");
        let reference = AssetReference::from_url(path.to_str().expect("utf8 path"));

        let report = diagnose(&parse_failure(reference.as_str()), &reference);
        assert_eq!(report.class, FailureClass::ContentLooksValid);
    }
}

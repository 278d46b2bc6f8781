//! Blocking fetch over local paths and HTTP URLs.
//!
//! Every transport failure and non-success status collapses into
//! `LoadError::NetworkUnreachable`; format judgements belong to the
//! parsers and diagnostics, not here.

use std::io::Read;

use corelib::error::LoadError;

use crate::reference::AssetReference;

/// How much of a probed body is read for diagnostics.
const PROBE_BYTES: u64 = 512;

pub fn fetch_bytes(reference: &AssetReference) -> Result<Vec<u8>, LoadError> {
    if reference.is_http() {
        http_bytes(reference)
    } else {
        file_bytes(reference)
    }
}

pub fn fetch_text(reference: &AssetReference) -> Result<String, LoadError> {
    let bytes = fetch_bytes(reference)?;
    String::from_utf8(bytes).map_err(|_| LoadError::MalformedResponse {
        url: reference.to_string(),
        detail: "expected UTF-8 text".into(),
    })
}

fn file_bytes(reference: &AssetReference) -> Result<Vec<u8>, LoadError> {
    std::fs::read(reference.as_str()).map_err(|e| LoadError::NetworkUnreachable {
        url: reference.to_string(),
        reason: e.to_string(),
    })
}

fn http_bytes(reference: &AssetReference) -> Result<Vec<u8>, LoadError> {
    let response = ureq::get(reference.as_str())
        .call()
        .map_err(|e| unreachable_from(reference, e))?;
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|e| LoadError::NetworkUnreachable {
            url: reference.to_string(),
            reason: e.to_string(),
        })?;
    Ok(body)
}

fn unreachable_from(reference: &AssetReference, error: ureq::Error) -> LoadError {
    let reason = match error {
        ureq::Error::Status(code, _) => format!("status {code}"),
        ureq::Error::Transport(transport) => transport.to_string(),
    };
    LoadError::NetworkUnreachable {
        url: reference.to_string(),
        reason,
    }
}

/// Heuristic for the classic environment-mismatch failure: an HTML
/// fallback page served where a model was expected.
pub(crate) fn looks_like_html(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let text = String::from_utf8_lossy(head);
    let trimmed = text.trim_start();
    trimmed.starts_with('<') || trimmed.to_ascii_lowercase().contains("<html")
}

/// What a diagnostic probe observed about a reference.
#[derive(Clone, Debug)]
pub struct ProbeResult {
    /// HTTP status, when the reference is an HTTP URL and the server
    /// answered at all.
    pub status: Option<u16>,
    pub content_type: Option<String>,
    /// First bytes of the body, capped at `PROBE_BYTES`.
    pub head: Vec<u8>,
}

/// Secondary fetch for diagnostics: reports status, content type and a
/// body prefix instead of the full payload.
pub fn probe(reference: &AssetReference) -> Result<ProbeResult, LoadError> {
    if !reference.is_http() {
        let bytes = file_bytes(reference)?;
        let head = bytes.into_iter().take(PROBE_BYTES as usize).collect();
        return Ok(ProbeResult {
            status: None,
            content_type: None,
            head,
        });
    }

    let response = match ureq::get(reference.as_str()).call() {
        Ok(response) => response,
        // A non-success status still carries a classifiable body.
        Err(ureq::Error::Status(_, response)) => response,
        Err(error) => return Err(unreachable_from(reference, error)),
    };
    let status = Some(response.status());
    let content_type = Some(response.content_type().to_string());
    let mut head = Vec::new();
    response
        .into_reader()
        .take(PROBE_BYTES)
        .read_to_end(&mut head)
        .map_err(|e| LoadError::NetworkUnreachable {
            url: reference.to_string(),
            reason: e.to_string(),
        })?;
    Ok(ProbeResult {
        status,
        content_type,
        head,
    })
}

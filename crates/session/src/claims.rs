//! Tolerant decoding of the token's claims segment
//!
//! The token is an opaque three-part dot-separated string whose middle
//! segment is base64url-encoded JSON. Decoding never fails loudly: any
//! malformed input yields "no claims".

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

/// Legacy WS-* namespaced identity claim emitted by older backends
const LEGACY_NAMEID_CLAIM: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";

/// A claim value that may arrive as a JSON string or number
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
enum ClaimValue {
    Text(String),
    Number(i64),
}

impl ClaimValue {
    fn render(&self) -> String {
        match self {
            ClaimValue::Text(s) => s.clone(),
            ClaimValue::Number(n) => n.to_string(),
        }
    }
}

/// Claims decoded from a token's middle segment.
///
/// Read-only projection, decoded on demand and never cached. Unknown claim
/// names are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    #[serde(rename = "teacherId")]
    teacher_id: Option<ClaimValue>,
    tid: Option<ClaimValue>,
    nameid: Option<ClaimValue>,
    sub: Option<ClaimValue>,
    #[serde(rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier")]
    legacy_nameid: Option<ClaimValue>,

    /// Expiry instant, seconds since epoch
    pub exp: Option<u64>,
}

impl Claims {
    /// Decode the claims segment of a token.
    ///
    /// Returns `None` on any malformed input: wrong segment count, invalid
    /// base64url, or a payload that is not a JSON object.
    pub fn decode(token: &str) -> Option<Self> {
        let payload = token.split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(error = %e, "Token claims segment is not valid JSON");
                None
            }
        }
    }

    /// Resolve the subject (teacher) identifier.
    ///
    /// First present of `teacherId`, `tid`, `nameid`, `sub`, then the legacy
    /// namespaced claim. `None` when no candidate is present.
    pub fn subject(&self) -> Option<String> {
        [
            &self.teacher_id,
            &self.tid,
            &self.nameid,
            &self.sub,
            &self.legacy_nameid,
        ]
        .into_iter()
        .find_map(|claim| claim.as_ref().map(ClaimValue::render))
    }
}

//! Credential tri-state and per-call overrides
//!
//! The wire protocol distinguishes three states for the reserved `i` field:
//! the key can be absent, explicitly `null` ("anonymous on purpose"), or a
//! token string. Servers treat `i: null` differently from a missing key, so
//! the distinction is load-bearing and modelled explicitly rather than with
//! nested `Option`s.

use serde_json::{Map, Value};

/// The client's default credential.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Credential {
    /// No credential configured; the `i` key is left out of the envelope.
    #[default]
    Absent,

    /// Explicitly unauthenticated; the envelope carries `i: null`.
    Anonymous,

    /// An opaque bearer-like token; the envelope carries `i: "<token>"`.
    Token(String),
}

impl Credential {
    /// Convenience constructor for [`Credential::Token`].
    pub fn token(token: impl Into<String>) -> Self {
        Credential::Token(token.into())
    }

    /// Write this credential's `i` field into an envelope.
    pub(crate) fn stamp(&self, envelope: &mut Map<String, Value>) {
        match self {
            Credential::Absent => {}
            Credential::Anonymous => {
                envelope.insert("i".to_owned(), Value::Null);
            }
            Credential::Token(token) => {
                envelope.insert("i".to_owned(), Value::String(token.clone()));
            }
        }
    }
}

/// Per-call credential override.
///
/// `Inherit` (the default) uses the client's configured [`Credential`]; the
/// other variants replace it for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Auth {
    /// Use the client's default credential.
    #[default]
    Inherit,

    /// Send `i: null` regardless of the client default.
    Anonymous,

    /// Send this token regardless of the client default.
    Token(String),
}

impl Auth {
    /// Resolve the override against the client default.
    pub(crate) fn resolve(self, default: &Credential) -> Credential {
        match self {
            Auth::Inherit => default.clone(),
            Auth::Anonymous => Credential::Anonymous,
            Auth::Token(token) => Credential::Token(token),
        }
    }
}

impl From<String> for Auth {
    fn from(token: String) -> Self {
        Auth::Token(token)
    }
}

impl From<&str> for Auth {
    fn from(token: &str) -> Self {
        Auth::Token(token.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn stamped(credential: &Credential) -> Value {
        let mut map = Map::new();
        credential.stamp(&mut map);
        Value::Object(map)
    }

    #[rstest]
    #[case(Credential::Absent, json!({}))]
    #[case(Credential::Anonymous, json!({"i": null}))]
    #[case(Credential::token("K"), json!({"i": "K"}))]
    fn stamp_covers_the_tri_state(#[case] credential: Credential, #[case] expected: Value) {
        assert_eq!(stamped(&credential), expected);
    }

    #[rstest]
    #[case(Auth::Inherit, Credential::token("K"), Credential::token("K"))]
    #[case(Auth::Inherit, Credential::Absent, Credential::Absent)]
    #[case(Auth::Anonymous, Credential::token("K"), Credential::Anonymous)]
    #[case(Auth::Token("T".into()), Credential::token("K"), Credential::token("T"))]
    #[case(Auth::Token("T".into()), Credential::Absent, Credential::token("T"))]
    fn resolve_prefers_the_override(
        #[case] auth: Auth,
        #[case] default: Credential,
        #[case] expected: Credential,
    ) {
        assert_eq!(auth.resolve(&default), expected);
    }

    #[test]
    fn auth_converts_from_strings() {
        assert_eq!(Auth::from("K"), Auth::Token("K".into()));
        assert_eq!(Auth::from(String::from("K")), Auth::Token("K".into()));
    }
}

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use web_sys::window;

const TOKEN_KEY: &str = "access_token";

/// The signed-in user's bearer token, as handed over by the identity provider.
/// An empty session means requests go out unauthenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    pub given_name: Option<String>,
    pub preferred_username: Option<String>,
    pub exp: Option<i64>,
}

impl Session {
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: Some(token).filter(|t| !t.is_empty()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Decodes the JWT payload without verifying it; only used for display and
    /// to notice an obviously stale token.
    pub fn claims(&self) -> Option<TokenClaims> {
        let payload = self.token.as_deref()?.split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    pub fn display_name(&self) -> String {
        self.claims()
            .and_then(|c| c.given_name.or(c.preferred_username))
            .unwrap_or_else(|| "User".to_string())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.claims().and_then(|c| c.exp) {
            Some(exp) => exp <= now.timestamp(),
            None => false,
        }
    }
}

pub fn load_session() -> Session {
    window()
        .and_then(|w| w.session_storage().ok())
        .and_then(|s| s.and_then(|storage| storage.get_item(TOKEN_KEY).ok()))
        .flatten()
        .map(Session::with_token)
        .unwrap_or_default()
}

pub fn store_token(token: &str) -> Result<(), String> {
    if let Some(window) = window() {
        if let Ok(Some(storage)) = window.session_storage() {
            storage
                .set_item(TOKEN_KEY, token)
                .map_err(|_| "Failed to store token".to_string())?;
        }
    }
    Ok(())
}

pub fn clear_token() -> Result<(), String> {
    if let Some(window) = window() {
        if let Ok(Some(storage)) = window.session_storage() {
            storage
                .remove_item(TOKEN_KEY)
                .map_err(|_| "Failed to remove token".to_string())?;
        }
    }
    Ok(())
}

/// Pulls `access_token` out of a redirect fragment such as
/// `#access_token=abc&token_type=Bearer`.
pub fn token_from_fragment(fragment: &str) -> Option<String> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == TOKEN_KEY)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
        .filter(|value| !value.is_empty())
}

pub fn login_redirect_url(login_url: &str, origin: &str) -> String {
    let separator = if login_url.contains('?') { '&' } else { '?' };
    format!(
        "{login_url}{separator}redirect_uri={}",
        urlencoding::encode(&format!("{origin}/login/callback"))
    )
}

pub fn logout_redirect_url(logout_url: &str, origin: &str) -> String {
    let separator = if logout_url.contains('?') { '&' } else { '?' };
    format!(
        "{logout_url}{separator}post_logout_redirect_uri={}",
        urlencoding::encode(origin)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn token_with(payload: &str) -> String {
        format!(
            "eyJhbGciOiJSUzI1NiJ9.{}.signature",
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn empty_token_is_anonymous() {
        assert!(!Session::with_token("").is_authenticated());
        assert_eq!(Session::default().token(), None);
        assert_eq!(Session::with_token("abc").token(), Some("abc"));
    }

    #[test]
    fn display_name_prefers_given_name() {
        let session =
            Session::with_token(token_with(r#"{"given_name":"Ada","preferred_username":"ada"}"#));
        assert_eq!(session.display_name(), "Ada");

        let session = Session::with_token(token_with(r#"{"preferred_username":"ada"}"#));
        assert_eq!(session.display_name(), "ada");

        assert_eq!(Session::with_token("not-a-jwt").display_name(), "User");
    }

    #[test]
    fn expiry_uses_exp_claim() {
        let session = Session::with_token(token_with(r#"{"exp":1700000000}"#));
        let before = Utc.timestamp_opt(1_699_999_999, 0).unwrap();
        let after = Utc.timestamp_opt(1_700_000_001, 0).unwrap();
        assert!(!session.is_expired_at(before));
        assert!(session.is_expired_at(after));

        let no_exp = Session::with_token(token_with(r#"{"given_name":"Ada"}"#));
        assert!(!no_exp.is_expired_at(after));
    }

    #[test]
    fn fragment_token_is_decoded() {
        assert_eq!(
            token_from_fragment("#state=x&access_token=ab%2Ecd&token_type=Bearer"),
            Some("ab.cd".to_string())
        );
        assert_eq!(token_from_fragment("#access_token="), None);
        assert_eq!(token_from_fragment(""), None);
    }

    #[test]
    fn redirect_urls_carry_encoded_origin() {
        assert_eq!(
            login_redirect_url("https://id.example.com/auth", "https://clips.example.com"),
            "https://id.example.com/auth?redirect_uri=https%3A%2F%2Fclips.example.com%2Flogin%2Fcallback"
        );
        assert_eq!(
            logout_redirect_url("https://id.example.com/logout?client_id=web", "http://localhost"),
            "https://id.example.com/logout?client_id=web&post_logout_redirect_uri=http%3A%2F%2Flocalhost"
        );
    }
}

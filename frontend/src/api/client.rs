use crate::api::error::{ApiError, ApiResult};
use crate::config::ClientConfig;
use crate::session::Session;
use gloo_net::http::{Request, RequestBuilder, Response};
use std::rc::Rc;

/// Entry point for every call to the video API. Each builder it hands out
/// already carries the session's bearer token, if there is one.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    config: Rc<ClientConfig>,
    session: Session,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Session) -> Self {
        Self {
            config: Rc::new(config),
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.authorize(Request::get(url))
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.authorize(Request::post(url))
    }

    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.authorize(Request::patch(url))
    }

    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.authorize(Request::delete(url))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match authorization_header(&self.session) {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }
}

pub fn authorization_header(session: &Session) -> Option<String> {
    session.token().map(|token| format!("Bearer {token}"))
}

/// Turns a non-2xx response into an [`ApiError`], reading the body for the
/// message. A 2xx response is passed through.
pub async fn check_status(response: Response, validates_input: bool) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::warn!("{} returned HTTP {}: {}", response.url(), status, body);
    Err(ApiError::from_status(status, body, validates_input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_only_with_token() {
        assert_eq!(authorization_header(&Session::default()), None);
        assert_eq!(
            authorization_header(&Session::with_token("t0k3n")),
            Some("Bearer t0k3n".to_string())
        );
    }

    #[test]
    fn clients_compare_by_config_and_session() {
        let a = ApiClient::new(ClientConfig::new("http://a"), Session::with_token("x"));
        let b = ApiClient::new(ClientConfig::new("http://a/"), Session::with_token("x"));
        let c = ApiClient::new(ClientConfig::new("http://a"), Session::default());
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.config().endpoint("videos"), "http://a/videos");
    }
}

use crate::env_variable_utils::API_URL;
use crate::models::VideoId;

/// Where the video API lives. Built once from the environment and then passed
/// around explicitly so nothing below the router reads globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: String,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let mut api_base_url = api_base_url.into();
        while api_base_url.ends_with('/') {
            api_base_url.pop();
        }
        Self { api_base_url }
    }

    pub fn from_env() -> Self {
        Self::new(API_URL.as_str())
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Joins `path` (with or without a leading slash) onto the base address.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    pub fn video_endpoint(&self, id: &VideoId) -> String {
        self.endpoint(&format!("videos/{}", urlencoding::encode(id.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_ignored() {
        let config = ClientConfig::new("http://api.local:8080//");
        assert_eq!(config.api_base_url(), "http://api.local:8080");
        assert_eq!(
            config.endpoint("/videos/my-videos"),
            "http://api.local:8080/videos/my-videos"
        );
        assert_eq!(config.endpoint("videos"), "http://api.local:8080/videos");
    }

    #[test]
    fn video_endpoint_encodes_the_id() {
        let config = ClientConfig::new("https://clips.example.com/api");
        assert_eq!(
            config.video_endpoint(&VideoId::from("42")),
            "https://clips.example.com/api/videos/42"
        );
        assert_eq!(
            config.video_endpoint(&VideoId::from("a b/c")),
            "https://clips.example.com/api/videos/a%20b%2Fc"
        );
    }
}

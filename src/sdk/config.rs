use reqwest::Url;
use std::env;
use std::error::Error;

const DEFAULT_API_ENDPOINT: &str = "https://api.mapbox.com";

/// Access token and API endpoint associated with every request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_token: String,
    pub api_endpoint: Url,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, host: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let access_token = access_token.into();
        if access_token.is_empty() {
            return Err("an access token is required".into());
        }
        let api_endpoint = match host {
            Some(host) if !host.is_empty() => Url::parse(&format!("https://{}", host))?,
            _ => Url::parse(DEFAULT_API_ENDPOINT)?,
        };
        Ok(Self {
            access_token,
            api_endpoint,
        })
    }

    /// Reads `DIRECTIONS_ACCESS_TOKEN` and the optional `DIRECTIONS_API_URL` override.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let access_token = env::var("DIRECTIONS_ACCESS_TOKEN")?;
        if access_token.is_empty() {
            return Err("DIRECTIONS_ACCESS_TOKEN is set but empty".into());
        }
        let api_endpoint = match env::var("DIRECTIONS_API_URL") {
            Ok(url) => Url::parse(&url)?,
            Err(_) => Url::parse(DEFAULT_API_ENDPOINT)?,
        };
        Ok(Self {
            access_token,
            api_endpoint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_token() {
        assert!(Credentials::new("", None).is_err());
    }

    #[test]
    fn new_builds_https_endpoint_from_host() {
        let credentials = Credentials::new("token", Some("router.internal")).unwrap();
        assert_eq!(credentials.api_endpoint.as_str(), "https://router.internal/");
    }
}

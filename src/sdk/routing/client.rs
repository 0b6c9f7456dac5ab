use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use std::time::Duration;

use super::error::{classify, DirectionsError};
use super::options::DirectionsOptions;
use super::response::{decode_response, DecodeContext, RouteResponse};
use super::route::RequestContext;
use crate::sdk::config::Credentials;
use crate::sdk::util::rate_limit::{directions_limiter, wait_for_slot, Limiter};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Optional supplier of a per-request SKU token, appended to the query
/// string when present.
pub trait TokenProvider: Send + Sync {
    fn sku_token(&self) -> Option<String>;
}

/// Blocking client for the directions and map-matching services.
///
/// One client can serve multiple requests; every call returns exactly one
/// outcome: a response with routes, or a classified error.
pub struct Directions {
    client: Client,
    credentials: Credentials,
    limiter: Limiter,
    token_provider: Option<Box<dyn TokenProvider>>,
}

impl Directions {
    pub fn new(credentials: Credentials) -> Result<Self, DirectionsError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(DirectionsError::unknown)?;
        Ok(Self {
            client,
            credentials,
            limiter: directions_limiter(),
            token_provider: None,
        })
    }

    pub fn with_token_provider(mut self, provider: Box<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Requests routes between the options' waypoints.
    pub fn calculate_routes(
        &self,
        options: &DirectionsOptions,
    ) -> Result<RouteResponse, DirectionsError> {
        self.calculate(options, false)
    }

    /// Requests map matches for the options' waypoints, treated as a trace.
    pub fn calculate_matches(
        &self,
        options: &DirectionsOptions,
    ) -> Result<RouteResponse, DirectionsError> {
        self.calculate(options, true)
    }

    fn calculate(
        &self,
        options: &DirectionsOptions,
        from_match_service: bool,
    ) -> Result<RouteResponse, DirectionsError> {
        wait_for_slot(&self.limiter);

        let url = self.request_url(options, from_match_service)?;
        log::debug!(
            "requesting {} waypoints from {}",
            options.waypoints.len(),
            url.path()
        );

        let fetch_start = Utc::now();
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| classify(None, None, None, Some(Box::new(err)), None))?;
        let response_end = Utc::now();

        let status = response.status();
        let headers = response.headers().clone();

        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");
        // The route service occasionally serves failure pages as text/html;
        // the matching service always speaks JSON.
        let acceptable = if from_match_service {
            content_type.starts_with("application/json")
        } else {
            content_type.starts_with("application/json") || content_type.starts_with("text/html")
        };
        if !acceptable {
            log::error!("unexpected content type {:?} (status {})", content_type, status);
            return Err(DirectionsError::InvalidResponse);
        }

        let body = response
            .text()
            .map_err(|err| classify(Some(status), None, None, Some(Box::new(err)), Some(&headers)))?;
        if body.is_empty() {
            return Err(DirectionsError::NoData);
        }

        let ctx = DecodeContext {
            options: Some(options),
            from_match_service,
        };
        let mut decoded = match decode_response(body.as_bytes(), &ctx) {
            Ok(decoded) => decoded,
            Err(err) => {
                log::error!("failed to decode response (status {}): {}", status, err);
                return Err(classify(
                    Some(status),
                    None,
                    None,
                    Some(Box::new(err)),
                    Some(&headers),
                ));
            }
        };

        if !decoded.is_success() {
            return Err(classify(
                Some(status),
                decoded.code.as_deref(),
                decoded.message.as_deref(),
                None,
                Some(&headers),
            ));
        }

        if decoded.routes.is_none() {
            return Err(if from_match_service {
                DirectionsError::NoMatches
            } else {
                DirectionsError::UnableToRoute
            });
        }

        decoded.postprocess(&RequestContext {
            fetch_start,
            response_end,
            access_token: self.credentials.access_token.clone(),
            api_endpoint: self.credentials.api_endpoint.clone(),
        });
        Ok(decoded)
    }

    /// The full request URL for the given options, including credentials.
    pub fn request_url(
        &self,
        options: &DirectionsOptions,
        from_match_service: bool,
    ) -> Result<Url, DirectionsError> {
        let base = format!(
            "{}/{}",
            self.credentials.api_endpoint.as_str().trim_end_matches('/'),
            options.path(from_match_service)
        );
        let mut url = Url::parse(&base).map_err(|err| DirectionsError::Unknown {
            underlying: Some(Box::new(err)),
            code: None,
            message: Some("failed to build the request URL".to_string()),
        })?;

        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in options.query_items() {
                pairs.append_pair(name, &value);
            }
            pairs.append_pair("access_token", &self.credentials.access_token);
            if let Some(token) = self.token_provider.as_ref().and_then(|p| p.sku_token()) {
                pairs.append_pair("sku", &token);
            }
        }
        Ok(url)
    }
}

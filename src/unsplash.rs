//! HTTP adapter for the Unsplash search API.

use std::time::Instant;
use log::{debug, info, warn};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK};
use reqwest::Url;
use crate::config::{endpoint, AppConfigs};
use crate::error::{ConfigError, FetchError};
use crate::pagination::PaginationCursors;
use crate::photo::{ApiErrorBody, ApiPhoto, ApiSearchResponse, Photo};
use crate::repository::{CancellationToken, PhotoPage, PhotoQuery, PhotoRepository};

const ACCEPT_VERSION: &str = "Accept-Version";

/// Photo repository backed by `GET /search/photos` and `GET /photos/:id`.
pub struct UnsplashRepository {
    client: Client,
    base_url: Url,
    search_url: Url,
    access_key: String,
}

impl UnsplashRepository {
    /// Creates an adapter from the current configuration.
    ///
    /// Fails when no access key is configured or the API URL does not parse.
    pub fn new(configs: &AppConfigs) -> Result<Self, ConfigError> {
        let access_key = configs
            .access_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingAccessKey)?
            .to_string();

        let client = Client::builder()
            .user_agent(concat!("rgallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: configs.base_url()?,
            search_url: configs.search_url()?,
            access_key,
        })
    }

    /// Issues an authorized GET and turns non-success statuses into errors.
    fn get(
        &self,
        url: Url,
        params: &[(&str, String)],
        token: &CancellationToken,
    ) -> Result<Response, FetchError> {
        token.check()?;

        let started = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .query(params)
            .header(AUTHORIZATION, format!("Client-ID {}", self.access_key))
            .header(ACCEPT_VERSION, "v1")
            .header(ACCEPT, "application/json")
            .send()?;
        debug!("GET {} -> {} in {:?}", url, response.status(), started.elapsed());

        token.check()?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let messages = response
            .text()
            .ok()
            .and_then(|body| serde_json::from_str::<ApiErrorBody>(&body).ok())
            .map(|body| body.errors)
            .unwrap_or_default();
        warn!("GET {} failed with {}: {:?}", url, status, messages);

        Err(FetchError::Status {
            status: status.as_u16(),
            messages,
        })
    }
}

impl PhotoRepository for UnsplashRepository {
    fn fetch_photos(&self, query: &PhotoQuery, token: &CancellationToken) -> Result<PhotoPage, FetchError> {
        let params = [
            ("query", query.text.clone()),
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
            ("order_by", query.order_by.clone()),
        ];

        let response = self.get(self.search_url.clone(), &params, token)?;

        let cursors = PaginationCursors::from_link_header(
            response.headers().get(LINK).and_then(|value| value.to_str().ok()),
        );

        let body = response.text()?;
        token.check()?;
        let search: ApiSearchResponse = serde_json::from_str(&body)?;

        info!(
            "Fetched {} photos for '{}' page {} (next: {:?})",
            search.results.len(),
            query.text,
            query.page,
            cursors.next()
        );

        Ok(PhotoPage {
            photos: search.results.into_iter().map(Photo::from).collect(),
            cursors,
        })
    }

    fn fetch_photo_by_id(&self, id: &str, token: &CancellationToken) -> Result<Photo, FetchError> {
        let url = endpoint(&self.base_url, &["photos", id]);
        let response = self.get(url, &[], token)?;

        let body = response.text()?;
        token.check()?;
        let photo: ApiPhoto = serde_json::from_str(&body)?;
        Ok(photo.into())
    }

    fn name(&self) -> &str {
        "Unsplash"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_access_key() {
        let configs = AppConfigs::default();
        assert!(matches!(UnsplashRepository::new(&configs), Err(ConfigError::MissingAccessKey)));
    }

    #[test]
    fn test_cancelled_token_short_circuits() {
        let configs = AppConfigs {
            access_key: Some("key".into()),
            api_url: "http://127.0.0.1:9".into(),
            ..AppConfigs::default()
        };
        let repo = UnsplashRepository::new(&configs).unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let query = PhotoQuery::new("cats", 1, &configs.search);
        assert_eq!(repo.fetch_photos(&query, &token), Err(FetchError::Cancelled));
        assert_eq!(repo.fetch_photo_by_id("abc", &token), Err(FetchError::Cancelled));
    }

    #[test]
    fn test_unparsable_api_url_is_rejected() {
        let configs = AppConfigs {
            access_key: Some("key".into()),
            api_url: "api.unsplash.com".into(),
            ..AppConfigs::default()
        };
        assert!(matches!(
            UnsplashRepository::new(&configs),
            Err(ConfigError::InvalidValue { field: "api_url", .. })
        ));
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{JobSource, SourceError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct AdzunaCredentials {
    pub app_id: String,
    pub app_key: String,
}

/// Adzuna job search (`/v1/api/jobs/{country}/search/{page}`).
pub struct AdzunaSource {
    client: Client,
    base_url: String,
    country: String,
    credentials: AdzunaCredentials,
}

#[derive(Debug, Deserialize)]
struct AdzunaSearchResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

/// Records from one response body. A blank body or a missing/`null`
/// `results` field means the provider has nothing for this page.
fn parse_results(body: &str) -> Result<Vec<Value>, SourceError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let response: AdzunaSearchResponse = serde_json::from_str(body)?;
    Ok(response.results.unwrap_or_default())
}

impl AdzunaSource {
    pub fn new(
        client: Client,
        base_url: &str,
        country: &str,
        credentials: AdzunaCredentials,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            country: country.to_lowercase(),
            credentials,
        }
    }

    fn page_url(&self, page: usize) -> String {
        format!("{}/v1/api/jobs/{}/search/{page}", self.base_url, self.country)
    }
}

#[async_trait]
impl JobSource for AdzunaSource {
    fn name(&self) -> &str {
        "Adzuna"
    }

    async fn fetch_page(
        &self,
        keyword: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<Value>, SourceError> {
        let results_per_page = page_size.to_string();
        let response = self
            .client
            .get(self.page_url(page))
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("app_id", self.credentials.app_id.as_str()),
                ("app_key", self.credentials.app_key.as_str()),
                ("results_per_page", results_per_page.as_str()),
                ("what", keyword),
                ("content-type", "application/json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_results(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> AdzunaSource {
        AdzunaSource::new(
            Client::new(),
            "https://api.adzuna.com/",
            "US",
            AdzunaCredentials {
                app_id: "id".to_string(),
                app_key: "key".to_string(),
            },
        )
    }

    #[test]
    fn test_page_url_uses_country_and_page() {
        assert_eq!(
            source().page_url(3),
            "https://api.adzuna.com/v1/api/jobs/us/search/3"
        );
    }

    #[test]
    fn test_missing_results_key_is_empty() {
        assert!(parse_results(r#"{"count": 0}"#).unwrap().is_empty());
    }

    #[test]
    fn test_null_results_is_empty() {
        assert!(parse_results(r#"{"results": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_blank_body_is_empty() {
        assert!(parse_results("").unwrap().is_empty());
        assert!(parse_results("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_undecodable_body_is_an_error() {
        assert!(matches!(
            parse_results("<html>down</html>"),
            Err(SourceError::Decode(_))
        ));
    }

    #[test]
    fn test_results_kept_raw() {
        let results = parse_results(r#"{"results": [{"title": "PM"}, "garbage"]}"#).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[1].is_string());
    }
}

/// TMDB catalog provider
///
/// Talks to the TMDB v3 API with bearer-token auth:
/// - /movie/{id}                 → single movie record
/// - /movie/{id}/recommendations → { "results": [...] }
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Movie, RecommendationsPage},
    services::providers::CatalogProvider,
};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_url: String,
    access_token: String,
}

impl TmdbProvider {
    pub fn new(api_url: String, access_token: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            access_token,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.catalog_api_url.clone(),
            config.catalog_api_token.clone(),
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self
            .http_client
            .get(url)
            .header("accept", "application/json")
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn fetch_movie(&self, movie_id: u64) -> AppResult<Movie> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);
        let movie: Movie = self.get_json(&url).await?;

        tracing::info!(movie_id, title = %movie.title, "Movie detail fetched");
        Ok(movie)
    }

    async fn fetch_recommendations(&self, movie_id: u64) -> AppResult<Vec<Movie>> {
        let url = format!("{}/movie/{}/recommendations", self.api_url, movie_id);
        let page: RecommendationsPage = self.get_json(&url).await?;

        tracing::info!(
            movie_id,
            results = page.results.len(),
            "Recommendations fetched"
        );
        Ok(page.results)
    }
}

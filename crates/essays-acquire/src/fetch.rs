use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1252;
use essays_model::EssayError;

/// HTTP client shared by every request of a run.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch a page and decode it using the charset the server declares.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        response.text().await.context("Failed to read response body")
    }

    /// Fetch a page and decode it as windows-1252, whatever the headers say.
    ///
    /// Essay pages predate reliable charset headers; mislabelled UTF-8 pages
    /// are repaired later by the cleaner.
    pub async fn fetch_legacy(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        let bytes = response
            .bytes()
            .await
            .context("Failed to read response body")?;
        Ok(decode_windows_1252(&bytes))
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EssayError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }
        tracing::debug!(url = %url, status = status.as_u16(), "Fetched");
        Ok(response)
    }
}

pub fn decode_windows_1252(bytes: &[u8]) -> String {
    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::warn!("Undecodable bytes in windows-1252 page");
    }
    text.into_owned()
}

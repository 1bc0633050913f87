//! HTTP client for the remote translation backend.
//!
//! The rest of the pipeline only depends on the [`TranslationBackend`] trait,
//! so tests can substitute scripted backends and the HTTP details stay here.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// A non-success response from the translation backend.
///
/// The status code is forwarded as-is; nothing in this crate branches on
/// specific codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    pub status: u16,
    pub message: String,
}

/// What the backend reports for one unit.
///
/// This is the whole collaborator contract: either a translation or an
/// HTTP-level failure. Transport faults and malformed success bodies are
/// outside it and surface as `Err` from [`TranslationBackend::translate_unit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitReply {
    Translated(String),
    Failed(UnitFailure),
}

/// The seam between the pipeline and the remote backend.
///
/// `Err` means the collaborator broke its contract (e.g. the connection
/// dropped); callers treat that as fatal, not as a translation failure.
pub trait TranslationBackend: Send + Sync + 'static {
    fn translate_unit(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> impl Future<Output = Result<UnitReply>> + Send;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateApiRequest<'a> {
    source_language_code: &'a str,
    target_language_code: &'a str,
    texts: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateApiResponse {
    translations: Vec<ApiTranslation>,
}

#[derive(Debug, Deserialize)]
struct ApiTranslation {
    text: String,
}

#[derive(Debug, Deserialize)]
struct LanguagesApiResponse {
    languages: Vec<Language>,
}

/// One language the backend can translate.
#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
}

// Error bodies carry an optional message alongside the HTTP status.
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

/// Production [`TranslationBackend`] over a JSON translation API.
pub struct HttpTranslationClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpTranslationClient {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.endpoint.trim_end_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Api-Key {key}")),
            None => request,
        }
    }

    /// Lists the languages the backend can translate between.
    ///
    /// Plain passthrough for the `languages` command; translation requests
    /// never call this.
    pub async fn list_languages(&self) -> Result<Vec<Language>> {
        let response = self
            .authorize(self.client.post(self.url("languages")))
            .send()
            .await
            .context("Failed to reach translation backend")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!(
                "Translation backend returned {}: {}",
                status.as_u16(),
                read_error_message(response).await
            );
        }

        let body: LanguagesApiResponse = response
            .json()
            .await
            .context("Failed to parse languages response")?;

        Ok(body.languages)
    }
}

impl TranslationBackend for HttpTranslationClient {
    async fn translate_unit(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<UnitReply> {
        let request = TranslateApiRequest {
            source_language_code: source_language,
            target_language_code: target_language,
            texts: vec![text],
        };

        let response = self
            .authorize(self.client.post(self.url("translate")).json(&request))
            .send()
            .await
            .context("Failed to reach translation backend")?;

        let status = response.status();
        if !status.is_success() {
            return Ok(UnitReply::Failed(UnitFailure {
                status: status.as_u16(),
                message: read_error_message(response).await,
            }));
        }

        let body: TranslateApiResponse = response
            .json()
            .await
            .context("Failed to parse translation response")?;

        let translated = body
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .context("Backend reported success but returned no translations")?;

        Ok(UnitReply::Translated(translated))
    }
}

async fn read_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    response
        .json::<ApiError>()
        .await
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        })
}

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::JokeConfig;

/// Simplified joke shape served to clients. Upstream fields the external API
/// does not return come through as nulls.
#[derive(Debug, Clone, Serialize)]
pub struct Joke {
    pub joke_id: Option<String>,
    pub joke_text: Option<String>,
    pub source_url: Option<String>,
}

/// Wire shape of the upstream joke API.
#[derive(Debug, Deserialize)]
struct UpstreamJoke {
    id: Option<String>,
    value: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Error)]
pub enum JokeError {
    #[error("Usługa żartów chwilowo niedostępna. Spróbuj później.")]
    Unavailable,

    #[error("Zewnętrzny API żartów zwrócił status: {0}")]
    UpstreamStatus(u16),

    #[error("Zewnętrzne API zwróciło nieprawidłową odpowiedź (nie-JSON).")]
    InvalidBody,
}

/// Client for the external joke API. The request timeout bounds how long a
/// single slow upstream call can hold up its request.
#[derive(Clone)]
pub struct JokeClient {
    http: reqwest::Client,
    api_url: String,
}

impl JokeClient {
    pub fn new(config: &JokeConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
        })
    }

    /// Fetch one random joke, mapping transport and upstream failures onto
    /// the gateway error taxonomy.
    pub async fn fetch_random_joke(&self) -> Result<Joke, JokeError> {
        let response = self.http.get(&self.api_url).send().await.map_err(|err| {
            tracing::warn!("joke upstream unreachable: {err}");
            JokeError::Unavailable
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(JokeError::UpstreamStatus(status.as_u16()));
        }

        let upstream: UpstreamJoke = response.json().await.map_err(|err| {
            tracing::warn!("joke upstream returned an unparsable body: {err}");
            JokeError::InvalidBody
        })?;

        Ok(Joke {
            joke_id: upstream.id,
            joke_text: upstream.value,
            source_url: upstream.url,
        })
    }
}

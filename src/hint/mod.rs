//! Hint-request client
//!
//! Turns an extracted `(title, description, code)` triple into a single
//! mentoring-hint request against an Anthropic-style messages endpoint.
//! Stateless: one POST per hint, with an ordered model fallback list for
//! rejected requests.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::HintSettings;
use crate::parse::ProblemInfo;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Client for the hint endpoint
pub struct HintClient {
    client: Client,
    api_key: String,
    settings: HintSettings,
}

impl HintClient {
    pub fn new(api_key: impl Into<String>, settings: HintSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            settings,
        })
    }

    /// One tiny request to check the key is accepted
    pub fn validate_api_key(&self) -> Result<bool> {
        let request = MessagesRequest {
            model: &self.settings.model,
            max_tokens: 10,
            messages: vec![Message {
                role: "user",
                content: "Hi",
            }],
        };

        let response = self.post(&request)?;
        Ok(response.status().is_success())
    }

    /// Request a mentoring hint for the extracted problem and code.
    ///
    /// On a non-success response the same prompt is retried against each
    /// fallback model in order until one succeeds or the list is exhausted.
    pub fn generate_hint(&self, problem: &ProblemInfo, code: &str) -> Result<String> {
        let prompt = build_prompt(problem, code);
        debug!("hint prompt is {} chars", prompt.len());

        let mut response = self.post(&MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            messages: vec![Message {
                role: "user",
                content: &prompt,
            }],
        })?;

        if !response.status().is_success() {
            warn!(
                "hint request rejected with {} for model {}",
                response.status(),
                self.settings.model
            );
            for model in &self.settings.fallback_models {
                info!("retrying hint request with model {model}");
                let retry = self.post(&MessagesRequest {
                    model,
                    max_tokens: self.settings.max_tokens,
                    messages: vec![Message {
                        role: "user",
                        content: &prompt,
                    }],
                })?;
                if retry.status().is_success() {
                    response = retry;
                    break;
                }
            }
        }

        if !response.status().is_success() {
            return Err(anyhow!(
                "hint endpoint returned {} after exhausting fallback models",
                response.status()
            ));
        }

        let parsed: MessagesResponse = response.json().context("malformed hint response")?;
        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| anyhow!("hint response contained no content blocks"))
    }

    fn post(&self, body: &MessagesRequest) -> Result<Response> {
        self.client
            .post(&self.settings.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(body)
            .send()
            .context("hint request failed")
    }
}

/// Build the mentoring prompt.
///
/// When extraction failed (empty description or the no-problem sentinel),
/// a fallback prompt asks the model to reason from the code alone.
fn build_prompt(problem: &ProblemInfo, code: &str) -> String {
    if problem.is_extraction_failure() {
        format!(
            "You are a coding mentor. The user is working on a coding problem \
             but the problem description could not be extracted from their screen.\n\n\
             Current Code:\n{code}\n\n\
             Based on their code, please provide:\n\
             1. What type of problem this appears to be (array, string, tree, etc.)\n\
             2. Potential approaches they might consider\n\
             3. Common patterns that might apply\n\
             4. Ask them to share the problem details for more specific help\n\n\
             Keep the response helpful and encouraging (under 200 words)."
        )
    } else {
        format!(
            "You are a coding mentor helping with LeetCode problems. \
             The user is working on: {title}\n\n\
             Problem Description:\n{description}\n\n\
             Current Code:\n{code}\n\n\
             Please provide a helpful hint or example that guides them toward the \
             solution pattern without giving away the complete answer. Focus on:\n\
             1. A concrete example that illustrates the pattern\n\
             2. Key insights about the approach\n\
             3. Common pitfalls to avoid\n\n\
             Keep the response concise and actionable (under 200 words).",
            title = problem.title,
            description = problem.description,
        )
    }
}

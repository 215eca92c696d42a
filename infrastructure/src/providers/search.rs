//! Web search adapter
//!
//! Calls a search API that answers with a short synthesized `answer` plus a
//! list of `results` (`title`, `url`, `content`), and folds both into one
//! research context for the lead councillor.

use super::http::{provider_error, send_json};
use astris_application::{GatewayError, SearchGateway};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Gateway for a Tavily-style `/search` endpoint
pub struct WebSearchGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    max_results: usize,
    search_depth: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
    include_answer: bool,
}

impl WebSearchGateway {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: format!("{}/search", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            max_results: 5,
            search_depth: "basic".to_string(),
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SearchGateway for WebSearchGateway {
    fn name(&self) -> &str {
        "search"
    }

    async fn search(&self, query: &str) -> Result<String, GatewayError> {
        if self.api_key.is_empty() {
            return Err(GatewayError::MissingCredential("search".to_string()));
        }

        let body = SearchRequest {
            query,
            max_results: self.max_results,
            search_depth: &self.search_depth,
            include_answer: true,
        };

        debug!("POST {}", self.endpoint);
        let response = send_json(
            self.client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body),
        )
        .await?;

        format_search_results(&response, self.max_results)
    }
}

/// Format a search response into a plain-text research context.
///
/// The answer comes first, then up to `max_results` sources. A response with
/// neither an `answer` nor a `results` field is an unexpected shape; one with
/// both present but empty yields an empty context.
pub(crate) fn format_search_results(
    data: &Value,
    max_results: usize,
) -> Result<String, GatewayError> {
    if let Some(message) = provider_error(data) {
        return Err(GatewayError::Provider(message));
    }
    if data.get("answer").is_none() && data.get("results").is_none() {
        return Err(GatewayError::UnexpectedShape(
            "search response has neither answer nor results".to_string(),
        ));
    }

    let mut sections: Vec<String> = Vec::new();

    // Answer (synthesized summary)
    if let Some(answer) = data["answer"].as_str()
        && !answer.trim().is_empty()
    {
        sections.push(answer.trim().to_string());
    }

    // Sources
    if let Some(results) = data["results"].as_array() {
        let sources: Vec<String> = results
            .iter()
            .filter_map(|r| {
                let content = r["content"].as_str()?.trim();
                if content.is_empty() {
                    return None;
                }
                let title = r["title"].as_str().unwrap_or("Untitled");
                let url = r["url"].as_str().unwrap_or("");
                Some(format!("- {}: {} ({})", title, content, url))
            })
            .take(max_results)
            .collect();

        if !sources.is_empty() {
            sections.push(format!("Sources:\n{}", sources.join("\n")));
        }
    }

    Ok(sections.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_answer_and_sources() {
        let body = json!({
            "query": "UI/UX career switch",
            "answer": "Hybrid design-engineer roles are growing.",
            "results": [
                {"title": "Design Trends", "url": "https://example.com/a", "content": "AI tools reshape UX.", "score": 0.9},
                {"title": "Hiring Report", "url": "https://example.com/b", "content": "  ", "score": 0.5},
                {"title": "Portfolio Tips", "url": "https://example.com/c", "content": "Show case studies.", "score": 0.4}
            ]
        });

        let context = format_search_results(&body, 5).unwrap();
        assert_eq!(
            context,
            "Hybrid design-engineer roles are growing.\n\n\
             Sources:\n\
             - Design Trends: AI tools reshape UX. (https://example.com/a)\n\
             - Portfolio Tips: Show case studies. (https://example.com/c)"
        );
    }

    #[test]
    fn test_sources_are_capped() {
        let results: Vec<Value> = (0..8)
            .map(|i| json!({"title": format!("t{}", i), "url": "u", "content": "c"}))
            .collect();
        let body = json!({"answer": null, "results": results});

        let context = format_search_results(&body, 3).unwrap();
        assert_eq!(context.matches("\n- ").count(), 3);
    }

    #[test]
    fn test_empty_results_give_empty_context() {
        let body = json!({"answer": "", "results": []});
        assert_eq!(format_search_results(&body, 5).unwrap(), "");
    }

    #[test]
    fn test_unrecognized_shape() {
        assert!(matches!(
            format_search_results(&json!({"hits": []}), 5),
            Err(GatewayError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_error_body() {
        assert_eq!(
            format_search_results(&json!({"detail": {"error": "Unauthorized"}, "error": "Invalid API key"}), 5),
            Err(GatewayError::Provider("Invalid API key".to_string()))
        );
    }

    #[tokio::test]
    async fn test_blank_key_is_missing_credential() {
        let gateway = WebSearchGateway::new(reqwest::Client::new(), "https://api.tavily.com/", "");
        assert_eq!(gateway.endpoint(), "https://api.tavily.com/search");
        assert_eq!(
            gateway.search("anything").await,
            Err(GatewayError::MissingCredential("search".to_string()))
        );
    }
}

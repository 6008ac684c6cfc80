//! Web search tool backed by the Tavily search API.

use serde::{Deserialize, Serialize};

use cprovider::{SecretString, ToolDefinition};

use crate::args::{optional_count, parse_object, required_string};
use crate::{Tool, ToolContext, ToolError, ToolFuture};

pub const TAVILY_BASE_URL: &str = "https://api.tavily.com";

const DEFAULT_NUM_RESULTS: usize = 3;

pub struct WebSearchTool {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    max_results: usize,
}

impl WebSearchTool {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: TAVILY_BASE_URL.to_string(),
            max_results: 5,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    async fn search(&self, query: &str, num_results: usize) -> Result<String, ToolError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let request = SearchApiRequest {
            query,
            max_results: num_results,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|err| ToolError::provider(format!("web search failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = match status.as_u16() {
                401 | 403 => "invalid search API key".to_string(),
                429 => "search rate limit exceeded, please try again later".to_string(),
                code if code >= 500 => "search service unavailable".to_string(),
                code => format!("search request rejected with status {code}"),
            };

            return Err(ToolError::provider(message).with_tool_name("webSearch"));
        }

        let parsed: SearchApiResponse = response
            .json()
            .await
            .map_err(|err| ToolError::provider(format!("unreadable search response: {err}")))?;

        if parsed.results.is_empty() && parsed.answer.is_none() {
            return Ok("No search results found for the given query.".to_string());
        }

        Ok(format_search_results(&parsed))
    }
}

impl Tool for WebSearchTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "webSearch".to_string(),
            description: "Search the web for current information, recent events, news, or \
                          specific factual data. Use this when you need up-to-date information \
                          that might not be in your training data."
                .to_string(),
            parameters: r#"{"type":"object","properties":{"query":{"type":"string","description":"The search query. Be specific and use relevant keywords."},"num_results":{"type":"string","description":"Number of search results to return (default: 3, max: 10)","default":"3"}},"required":["query"]}"#.to_string(),
        }
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        _context: &'a ToolContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        Box::pin(async move {
            let args = parse_object(args_json)?;
            let query = required_string(&args, "query")?;
            if query.trim().is_empty() {
                return Err(ToolError::invalid_arguments("query must not be empty"));
            }

            let num_results = optional_count(&args, "num_results", DEFAULT_NUM_RESULTS)
                .clamp(1, self.max_results);

            tracing::info!(
                phase = "tooling",
                event = "web_search",
                query_len = query.len(),
                num_results,
            );

            self.search(&query, num_results).await
        })
    }
}

fn format_search_results(response: &SearchApiResponse) -> String {
    let mut formatted = String::new();

    if let Some(answer) = &response.answer {
        formatted.push_str(&format!("## Search Summary:\n{answer}\n\n"));
    }

    if !response.results.is_empty() {
        formatted.push_str("## Search Results:\n\n");

        for (index, result) in response.results.iter().enumerate() {
            formatted.push_str(&format!("### {}. {}\n", index + 1, result.title));
            formatted.push_str(&format!("**Source:** {}\n", result.url));

            if let Some(content) = &result.content {
                let content = if content.chars().count() > 500 {
                    let truncated: String = content.chars().take(500).collect();
                    format!("{truncated}...")
                } else {
                    content.clone()
                };
                formatted.push_str(&format!("**Content:** {content}\n"));
            }

            if let Some(published) = &result.published_date {
                formatted.push_str(&format!("**Published:** {published}\n"));
            }

            formatted.push('\n');
        }
    }

    formatted
}

#[derive(Debug, Serialize)]
struct SearchApiRequest<'a> {
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchApiResponse {
    answer: Option<String>,
    #[serde(default)]
    results: Vec<SearchApiResult>,
}

#[derive(Debug, Deserialize)]
struct SearchApiResult {
    title: String,
    url: String,
    content: Option<String>,
    published_date: Option<String>,
}

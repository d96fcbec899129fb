//! HTTP client for the book's question-answering backend.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::api::Endpoints;

/// Tri-state backend availability indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Checking,
    Online,
    Offline,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
    user_id: Option<String>,
    chapter_id: Option<String>,
}

/// A successful chat response, decoded with fallbacks: a missing or
/// malformed `response` field becomes a fixed placeholder, missing
/// `citations` become an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    #[serde(default = "placeholder_response")]
    pub response: String,
    #[serde(default)]
    pub citations: Vec<String>,
}

impl Default for ChatReply {
    fn default() -> Self {
        Self {
            response: placeholder_response(),
            citations: Vec::new(),
        }
    }
}

fn placeholder_response() -> String {
    "I received your question but could not generate a response.".to_string()
}

/// Classified failure of a chat request. Each variant carries fixed
/// user-visible wording; nothing here ever propagates past the request
/// controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatError {
    /// Could not reach the backend at the transport level.
    Connectivity,
    /// The backend answered with a 5xx status.
    Server,
    /// Any other non-ok HTTP status.
    Status(u16),
    /// The request task itself failed (panic/cancellation).
    Internal,
}

impl ChatError {
    /// The assistant-authored error text shown in the conversation log.
    pub fn user_message(&self) -> String {
        let mut text = String::from("❌ Sorry, I encountered an error. ");
        match self {
            ChatError::Connectivity => {
                text.push_str("Cannot connect to the backend server. Please make sure it's running.");
            }
            ChatError::Server => {
                text.push_str("The server encountered an error. Please try again.");
            }
            ChatError::Status(code) => {
                text.push_str(&format!("Error: backend responded with status {}.", code));
            }
            ChatError::Internal => {
                text.push_str("Please try again later.");
            }
        }
        text
    }
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    endpoints: Endpoints,
}

impl BackendClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            client: Client::new(),
            endpoints,
        }
    }

    /// One-shot liveness probe. Any HTTP-ok response means online; a non-ok
    /// status or a transport failure means offline. The body is ignored.
    pub async fn check_health(&self) -> Availability {
        match self.client.get(&self.endpoints.health).send().await {
            Ok(response) if response.status().is_success() => Availability::Online,
            _ => Availability::Offline,
        }
    }

    /// Submit one question to the chat endpoint and classify the outcome.
    pub async fn ask(&self, query: &str) -> Result<ChatReply, ChatError> {
        let request = ChatRequest {
            query,
            user_id: None,
            chapter_id: None,
        };

        let response = self
            .client
            .post(&self.endpoints.chat)
            .json(&request)
            .send()
            .await
            .map_err(|_| ChatError::Connectivity)?;

        let status = response.status();
        if status.is_server_error() {
            return Err(ChatError::Server);
        }
        if !status.is_success() {
            return Err(ChatError::Status(status.as_u16()));
        }

        // Decode with fallbacks: an unparseable body degrades to the
        // placeholder reply rather than an error.
        let body = response.bytes().await.map_err(|_| ChatError::Connectivity)?;
        Ok(serde_json::from_slice(&body).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(Endpoints::with_base(&server.base_url()))
    }

    // Points at a reserved port nothing listens on.
    fn unreachable_client() -> BackendClient {
        BackendClient::new(Endpoints::with_base("http://127.0.0.1:9"))
    }

    #[tokio::test]
    async fn health_ok_is_online() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/health");
                then.status(200);
            })
            .await;

        assert_eq!(client_for(&server).check_health().await, Availability::Online);
    }

    #[tokio::test]
    async fn health_error_status_is_offline() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/health");
                then.status(503);
            })
            .await;

        assert_eq!(client_for(&server).check_health().await, Availability::Offline);
    }

    #[tokio::test]
    async fn health_unreachable_is_offline() {
        assert_eq!(unreachable_client().check_health().await, Availability::Offline);
    }

    #[tokio::test]
    async fn ask_sends_query_body_and_decodes_reply() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat")
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "query": "What is ROS 2?",
                        "user_id": null,
                        "chapter_id": null
                    }));
                then.status(200).json_body(json!({
                    "response": "ROS 2 is a middleware.",
                    "citations": ["Ch.1"]
                }));
            })
            .await;

        let reply = client_for(&server).ask("What is ROS 2?").await.unwrap();
        mock.assert_async().await;
        assert_eq!(reply.response, "ROS 2 is a middleware.");
        assert_eq!(reply.citations, ["Ch.1"]);
    }

    #[tokio::test]
    async fn ask_defaults_missing_fields() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat");
                then.status(200).json_body(json!({}));
            })
            .await;

        let reply = client_for(&server).ask("test").await.unwrap();
        assert_eq!(
            reply.response,
            "I received your question but could not generate a response."
        );
        assert!(reply.citations.is_empty());
    }

    #[tokio::test]
    async fn ask_treats_unparseable_body_as_placeholder() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat");
                then.status(200).body("not json");
            })
            .await;

        let reply = client_for(&server).ask("test").await.unwrap();
        assert_eq!(
            reply.response,
            "I received your question but could not generate a response."
        );
    }

    #[tokio::test]
    async fn ask_classifies_server_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat");
                then.status(500);
            })
            .await;

        assert_eq!(client_for(&server).ask("test").await, Err(ChatError::Server));
    }

    #[tokio::test]
    async fn ask_embeds_other_error_statuses() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat");
                then.status(404);
            })
            .await;

        let err = client_for(&server).ask("test").await.unwrap_err();
        assert_eq!(err, ChatError::Status(404));
        assert!(err.user_message().contains("404"));
    }

    #[tokio::test]
    async fn ask_classifies_unreachable_host() {
        assert_eq!(
            unreachable_client().ask("test").await,
            Err(ChatError::Connectivity)
        );
    }
}

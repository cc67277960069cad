//! HTTP Todo Client
//!
//! Implements the TodoApi trait with reqwest against a json-server style backend.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::gateways::TodoApi;
use crate::domain::models::todo::{NewTodo, Todo, TodoId, TodoPatch, TodoQuery, TodoReplacement};
use crate::infrastructure::driven_adapters::config::ClientConfig;
use crate::shared::errors::ClientError;

/// Content type sent with every request body
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// reqwest implementation of TodoApi
#[derive(Debug, Clone)]
pub struct HttpTodoClient {
    base_url: String,
    client: Client,
}

impl HttpTodoClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `ClientError::BaseUrl` if the base URL does not parse.
    /// Returns `ClientError::Http` if the underlying client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ClientError::BaseUrl(format!("{}: {e}", config.base_url)))?;

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            base_url: base.as_str().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn item_url(&self, id: TodoId) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        tracing::debug!(method = method.as_str(), url, "Sending request");
        self.client.request(method, url)
    }

    fn json_request<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> Result<RequestBuilder, ClientError> {
        Ok(self
            .request(method, url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(serde_json::to_vec(body)?))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl TodoApi for HttpTodoClient {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        self.send(self.request(Method::GET, &self.collection_url())).await
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo, ClientError> {
        let request = self.json_request(Method::POST, &self.collection_url(), &todo)?;
        self.send(request).await
    }

    async fn get(&self, id: TodoId) -> Result<Todo, ClientError> {
        self.send(self.request(Method::GET, &self.item_url(id))).await
    }

    async fn query(&self, query: TodoQuery) -> Result<Vec<Todo>, ClientError> {
        let request = self.request(Method::GET, &self.collection_url()).query(&query);
        self.send(request).await
    }

    async fn replace(&self, id: TodoId, todo: TodoReplacement) -> Result<Todo, ClientError> {
        let request = self.json_request(Method::PUT, &self.item_url(id), &todo)?;
        self.send(request).await
    }

    async fn patch(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, ClientError> {
        let request = self.json_request(Method::PATCH, &self.item_url(id), &patch)?;
        self.send(request).await
    }

    async fn delete(&self, id: TodoId) -> Result<serde_json::Value, ClientError> {
        self.send(self.request(Method::DELETE, &self.item_url(id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpTodoClient {
        HttpTodoClient::new(&ClientConfig {
            base_url: format!("{}/", server.uri()),
            timeout_secs: 5,
            random_todo_count: 7,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn should_post_json_with_charset_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/todos"))
            .and(header("content-type", JSON_CONTENT_TYPE))
            .and(body_json(json!({ "todoText": "new todo", "completed": false })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "id": 1, "todoText": "new todo", "completed": false })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let todo = client_for(&server)
            .create(NewTodo::new("new todo", false))
            .await
            .unwrap();

        assert_eq!(todo.id, TodoId::new(1));
        assert_eq!(todo.todo_text, "new todo");
    }

    #[tokio::test]
    async fn should_send_only_present_query_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .and(query_param("todoText", "new todo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "todoText": "new todo", "completed": false }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let todos = client_for(&server)
            .query(TodoQuery::by_text("new todo"))
            .await
            .unwrap();

        assert_eq!(todos.len(), 1);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query_pairs().count(), 1);
    }

    #[tokio::test]
    async fn should_put_and_patch_item_routes() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/todos/2"))
            .and(body_json(json!({ "completed": true })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": 2, "completed": true })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/todos/3"))
            .and(header("content-type", JSON_CONTENT_TYPE))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": 3, "todoText": "third todo", "completed": true })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let replacement = TodoReplacement {
            completed: Some(true),
            ..Default::default()
        };
        let patch = TodoPatch {
            completed: Some(true),
            ..Default::default()
        };
        let replaced = client.replace(TodoId::new(2), replacement).await.unwrap();
        let patched = client.patch(TodoId::new(3), patch).await.unwrap();

        assert_eq!(replaced.todo_text, "");
        assert!(replaced.completed);
        assert_eq!(patched.todo_text, "third todo");
    }

    #[tokio::test]
    async fn should_pass_through_delete_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/todos/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server).delete(TodoId::new(5)).await.unwrap();

        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    async fn should_map_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos/1"))
            .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
            .mount(&server)
            .await;

        let result = client_for(&server).get(TodoId::new(1)).await;

        match result {
            Err(ClientError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "{}");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_map_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client_for(&server).list().await;

        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = HttpTodoClient::new(&ClientConfig {
            base_url: "not a url".to_string(),
            timeout_secs: 5,
            random_todo_count: 7,
        });

        assert!(matches!(result, Err(ClientError::BaseUrl(_))));
    }
}

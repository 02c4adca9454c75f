use reqwest::{header, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{
    ApiSettings, AppError, Message, PageIndex, PageWindow, Poll, PollCreate, PollUpdate,
    PollsPage, PAGE_SIZE,
};
use tracing::{debug, warn};

/// HTTP client for the polls backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PollsClient {
    base_url: String,
    http: Client,
}

impl PollsClient {
    /// Build a client from API settings.
    ///
    /// A configured access token is attached to every request as a bearer
    /// `Authorization` header.
    pub fn new(settings: &ApiSettings) -> Result<Self, AppError> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(token) = settings.access_token.as_deref().filter(|t| !t.is_empty()) {
            let value = header::HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                AppError::bad_request("Access token contains characters not allowed in a header")
            })?;
            default_headers.insert(header::AUTHORIZATION, value);
        }

        let builder = Client::builder().default_headers(default_headers);
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(settings.timeout_secs));

        let http = builder
            .build()
            .map_err(|e| AppError::internal(format!("build http client: {e}")))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "building request");
        self.http.request(method, url)
    }

    /// `GET /polls/?skip=&limit=`
    pub async fn list_polls(&self, window: PageWindow) -> Result<PollsPage, AppError> {
        let req = self
            .request(Method::GET, "/polls/")
            .query(&[("skip", window.skip)])
            .query(&[("limit", window.limit)]);
        send_json(req).await
    }

    /// Fetch one page using the dashboard page size.
    pub async fn list_polls_page(&self, page: PageIndex) -> Result<PollsPage, AppError> {
        self.list_polls(page.window(PAGE_SIZE)).await
    }

    pub async fn get_poll(&self, id: &str) -> Result<Poll, AppError> {
        send_json(self.request(Method::GET, &poll_path(id))).await
    }

    pub async fn create_poll(&self, body: &PollCreate) -> Result<Poll, AppError> {
        send_json_body(self.request(Method::POST, "/polls/"), body).await
    }

    pub async fn update_poll(&self, id: &str, body: &PollUpdate) -> Result<Poll, AppError> {
        send_json_body(self.request(Method::PUT, &poll_path(id)), body).await
    }

    pub async fn delete_poll(&self, id: &str) -> Result<Message, AppError> {
        send_json(self.request(Method::DELETE, &poll_path(id))).await
    }
}

fn poll_path(id: &str) -> String {
    format!("/polls/{}", urlencoding::encode(id))
}

async fn send_json_body<B, T>(req: RequestBuilder, body: &B) -> Result<T, AppError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    send_json(req.json(body)).await
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, AppError> {
    let response = req.send().await.map_err(|e| {
        warn!(error = %e, "request to polls backend failed");
        AppError::network(e.to_string())
    })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AppError::network(format!("read response body: {e}")))?;

    if !status.is_success() {
        let err = AppError::from_response(status.as_u16(), &body);
        warn!(status = status.as_u16(), error = %err, "polls backend returned an error");
        return Err(err);
    }

    serde_json::from_str(&body)
        .map_err(|e| AppError::decode(format!("unexpected response body: {e}")))
}

use crate::config::JiraConfig;
use crate::error::{JiraError, Result};
use crate::models::{Comment, CommentPage, CreatedIssue, Issue, SearchResults, User};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Clone)]
pub struct JiraClient {
    http: HttpClient,
    config: JiraConfig,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.send_with_body(Method::GET, path, Option::<&Value>::None).await
    }

    async fn get_with_query<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.http.get(self.url_for(path)).query(query).send().await?;
        Self::parse_json(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_with_body(Method::POST, path, Some(body)).await
    }

    async fn send_with_body<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url_for(path);
        let mut request = self.http.request(method, url);
        if let Some(payload) = body {
            request = request.json(payload);
        }
        let response = request.send().await?;
        Self::parse_json(response).await
    }

    async fn send_expect_empty<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path);
        let mut request = self.http.request(method, url);
        if let Some(payload) = body {
            request = request.json(payload);
        }
        let response = request.send().await?;
        Self::ensure_success(response).await
    }

    fn url_for(&self, path: &str) -> String {
        let mut base = self.config.api_root();
        base.push_str(path.trim_start_matches('/'));
        base
    }

    async fn parse_json<T>(response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            response.json::<T>().await.map_err(JiraError::from)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            Err(JiraError::Authentication(format!(
                "Access denied ({}) - {}",
                status, body
            )))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(build_http_error(status, &body))
        }
    }

    async fn ensure_success(response: Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            Err(JiraError::Authentication(format!(
                "Access denied ({}) - {}",
                status, body
            )))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(build_http_error(status, &body))
        }
    }

    pub async fn get_myself(&self) -> Result<User> {
        self.get("myself").await
    }

    pub async fn get_user(&self, identifier: &str) -> Result<User> {
        self.get_with_query("user", &[("username", identifier)]).await
    }

    /// Runs a JQL search and unwraps the issue list from the result envelope.
    /// The result cap defaults to 50 and is clamped to 1..=1000.
    pub async fn search_issues(
        &self,
        jql: &str,
        max_results: Option<u32>,
        expand_changelog: bool,
    ) -> Result<Vec<Issue>> {
        let max_results = max_results.unwrap_or(50).clamp(1, 1000);
        debug!("searching issues: {jql}");
        let payload = SearchRequest {
            jql,
            max_results,
            fields: &ACTIVITY_FIELDS,
            expand: expand_changelog.then(|| vec!["changelog"]),
        };
        let results: SearchResults = self.post("search", &payload).await?;
        Ok(results.issues)
    }

    pub async fn get_issue_comments(&self, issue_key: &str) -> Result<Vec<Comment>> {
        let path = format!("issue/{}/comment", issue_key);
        let page: CommentPage = self.get(&path).await?;
        Ok(page.comments)
    }

    pub async fn add_comment(&self, issue_key: &str, body: &str) -> Result<()> {
        let path = format!("issue/{}/comment", issue_key);
        let payload = CommentCreateRequest { body };
        self.send_expect_empty(Method::POST, &path, Some(&payload)).await
    }

    /// Creates an issue from a caller-built fields map. The map form keeps
    /// instance-specific custom field identifiers out of this crate.
    pub async fn create_issue(&self, fields: &Value) -> Result<CreatedIssue> {
        let payload = IssueCreateRequest { fields };
        self.post("issue", &payload).await
    }

    pub async fn assign_issue(&self, issue_key: &str, name: &str) -> Result<()> {
        let path = format!("issue/{}/assignee", issue_key);
        let payload = AssigneeRequest { name };
        self.send_expect_empty(Method::PUT, &path, Some(&payload)).await
    }
}

fn build_http_client(config: &JiraConfig) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();

    let credentials = BASE64_STANDARD.encode(format!("{}:{}", config.username, config.token));
    headers.insert(AUTHORIZATION, header_value(format!("Basic {}", credentials))?);
    headers.insert(USER_AGENT, header_value(config.user_agent.clone())?);

    HttpClient::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()
        .map_err(|err| JiraError::Other(err.to_string()))
}

fn header_value(value: String) -> Result<HeaderValue> {
    HeaderValue::from_str(&value).map_err(|err| JiraError::Other(err.to_string()))
}

fn build_http_error(status: StatusCode, body: &str) -> JiraError {
    let code = extract_error_message(body);
    JiraError::http(status, code, body.to_string())
}

fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body).ok().and_then(|value| {
        value
            .get("errorMessages")
            .and_then(|messages| messages.as_array())
            .and_then(|messages| messages.first())
            .and_then(|message| message.as_str())
            .map(|message| message.to_string())
    })
}

const ACTIVITY_FIELDS: [&str; 5] = [
    "summary",
    "timeoriginalestimate",
    "timespent",
    "created",
    "updated",
];

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    jql: &'a str,
    #[serde(rename = "maxResults")]
    max_results: u32,
    fields: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    expand: Option<Vec<&'a str>>,
}

#[derive(Debug, Serialize)]
struct CommentCreateRequest<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct IssueCreateRequest<'a> {
    fields: &'a Value,
}

#[derive(Debug, Serialize)]
struct AssigneeRequest<'a> {
    name: &'a str,
}

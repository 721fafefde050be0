// simplelogin-api/src/client.rs
use crate::error::Error;
use crate::http::{HttpClient, HttpRequest, HttpResponse, Method};
use crate::types::{
    Alias, AliasOptions, AliasesResponse, CreateCustomAliasRequest, CreateRandomAliasRequest,
    ErrorBody, Mailbox, MailboxesResponse, RandomMode, UserInfo,
};
use crate::Result;
use log::{debug, trace};
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://app.simplelogin.io";

/// Header carrying the raw API key
pub const AUTH_HEADER: &str = "Authentication";

/// Index of the first page of `/api/v2/aliases`
pub const FIRST_PAGE: u32 = 0;

/// Query parameters; blank values are dropped on insert
#[derive(Debug, Default)]
struct Query(Vec<(&'static str, String)>);

impl Query {
    fn new() -> Self {
        Self::default()
    }

    fn opt(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            self.0.push((key, v.to_string()));
        }
        self
    }

    fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Append encoded parameters, continuing an existing query string if present
fn append_query(mut url: String, query: &Query) -> String {
    if query.0.is_empty() {
        return url;
    }
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(&query.encode());
    url
}

fn api_error(response: &HttpResponse) -> Error {
    let message = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| String::from_utf8_lossy(&response.body).trim().to_string());

    Error::Api {
        status: response.status,
        message,
    }
}

/// Pick the owner mailbox: flagged default, else first verified, else first
pub fn select_default_mailbox(mailboxes: &[Mailbox]) -> Option<u64> {
    mailboxes
        .iter()
        .find(|m| m.default)
        .or_else(|| mailboxes.iter().find(|m| m.verified))
        .or_else(|| mailboxes.first())
        .map(|m| m.id)
}

pub struct SimpleLoginClient<C: HttpClient> {
    http: C,
    base_url: String,
    api_key: String,
}

impl<C: HttpClient> SimpleLoginClient<C> {
    /// An empty `api_key` sends requests unauthenticated
    pub fn new(http: C, base_url: &str, api_key: impl Into<String>) -> Self {
        let base_url = match base_url.trim_end_matches('/') {
            "" => DEFAULT_BASE_URL,
            url => url,
        };

        Self {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn request(&self, method: Method, path: &str, query: &Query) -> HttpRequest {
        let url = append_query(format!("{}{}", self.base_url, path), query);
        let request = HttpRequest::new(method, url);

        if self.api_key.is_empty() {
            request
        } else {
            request.header(AUTH_HEADER, self.api_key.as_str())
        }
    }

    /// Send and fail on any status >= 300
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!("{} {}", request.method, request.url);

        let response = self.http.execute(request).await?;
        trace!("status {} ({} bytes)", response.status, response.body.len());

        if response.status >= 300 {
            return Err(api_error(&response));
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let response = self.send(request).await?;
        serde_json::from_slice(&response.body).map_err(Error::Decode)
    }

    /// GET /api/user_info
    pub async fn user_info(&self) -> Result<UserInfo> {
        self.fetch(self.request(Method::Get, "/api/user_info", &Query::new()))
            .await
    }

    /// GET /api/v5/alias/options
    pub async fn alias_options(&self, hostname: Option<&str>) -> Result<AliasOptions> {
        let query = Query::new().opt("hostname", hostname);
        self.fetch(self.request(Method::Get, "/api/v5/alias/options", &query))
            .await
    }

    /// POST /api/alias/random/new
    ///
    /// The JSON body is only sent when `note` is non-empty.
    pub async fn create_random_alias(
        &self,
        hostname: Option<&str>,
        mode: Option<RandomMode>,
        note: Option<&str>,
    ) -> Result<Alias> {
        let query = Query::new()
            .opt("hostname", hostname)
            .opt("mode", mode.as_ref().map(RandomMode::as_str));

        let mut request = self.request(Method::Post, "/api/alias/random/new", &query);
        if let Some(note) = note.filter(|n| !n.is_empty()) {
            let body = CreateRandomAliasRequest {
                note: Some(note.to_string()),
            };
            request = request.json(&body).map_err(Error::Encode)?;
        }

        self.fetch(request).await
    }

    /// POST /api/v3/alias/custom/new
    pub async fn create_custom_alias(
        &self,
        hostname: Option<&str>,
        body: &CreateCustomAliasRequest,
    ) -> Result<Alias> {
        if body.mailbox_ids.is_empty() {
            return Err(Error::EmptyMailboxIds);
        }

        let query = Query::new().opt("hostname", hostname);
        let request = self
            .request(Method::Post, "/api/v3/alias/custom/new", &query)
            .json(body)
            .map_err(Error::Encode)?;

        self.fetch(request).await
    }

    /// GET /api/v2/mailboxes
    pub async fn mailboxes(&self) -> Result<Vec<Mailbox>> {
        let resp: MailboxesResponse = self
            .fetch(self.request(Method::Get, "/api/v2/mailboxes", &Query::new()))
            .await?;
        Ok(resp.mailboxes)
    }

    pub async fn default_mailbox_id(&self) -> Result<u64> {
        let mailboxes = self.mailboxes().await?;
        select_default_mailbox(&mailboxes).ok_or(Error::NoMailboxes)
    }

    /// GET /api/v2/aliases. An empty page means there are no more.
    pub async fn list_aliases(
        &self,
        page_id: u32,
        hostname: Option<&str>,
    ) -> Result<Vec<Alias>> {
        let page = page_id.to_string();
        let query = Query::new()
            .opt("page_id", Some(page.as_str()))
            .opt("hostname", hostname);

        let resp: AliasesResponse = self
            .fetch(self.request(Method::Get, "/api/v2/aliases", &query))
            .await?;
        Ok(resp.aliases)
    }

    /// DELETE /api/aliases/{id}
    pub async fn delete_alias(&self, alias_id: u64, hostname: Option<&str>) -> Result<()> {
        let query = Query::new().opt("hostname", hostname);
        let path = format!("/api/aliases/{}", alias_id);
        self.send(self.request(Method::Delete, &path, &query))
            .await?;
        Ok(())
    }

    /// Scan the alias list page by page and delete the alias with this exact
    /// email. Returns the deleted id, or `None` if no alias matched (not an error).
    pub async fn delete_alias_by_email(
        &self,
        email: &str,
        hostname: Option<&str>,
    ) -> Result<Option<u64>> {
        let mut page = FIRST_PAGE;

        loop {
            let aliases = self.list_aliases(page, hostname).await?;
            if aliases.is_empty() {
                debug!("no alias matching {} after {} page(s)", email, page);
                return Ok(None);
            }

            if let Some(alias) = aliases.iter().find(|a| a.email == email) {
                let id = alias.id;
                self.delete_alias(id, hostname).await?;
                return Ok(Some(id));
            }

            page += 1;
        }
    }
}

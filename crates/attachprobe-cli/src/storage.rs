//! Object-storage checks against a pre-signed URL

use reqwest::header::{
    ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
};
use reqwest::{redirect, Client, Method, Response};

/// Issues unauthenticated requests to a redirect target, the way a browser
/// extension would after the JIRA redirect.
pub struct ObjectStorageProbe {
    http: Client,
    preflight_http: Client,
    origin: String,
}

impl ObjectStorageProbe {
    pub fn new(origin: impl Into<String>) -> reqwest::Result<Self> {
        let preflight_http = Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            http: Client::new(),
            preflight_http,
            origin: origin.into(),
        })
    }

    /// CORS preflight asking whether a GET carrying `Authorization` is allowed.
    /// A redirected preflight fails in browsers, so a 3xx is returned as-is.
    pub async fn preflight(&self, url: &str) -> reqwest::Result<Response> {
        tracing::debug!("OPTIONS {} (origin {})", url, self.origin);
        self.preflight_http
            .request(Method::OPTIONS, url)
            .header(ORIGIN, &self.origin)
            .header(ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .header(ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
            .send()
            .await
    }

    /// Plain GET with no credentials. The body is not read.
    pub async fn fetch_unauthenticated(&self, url: &str) -> reqwest::Result<Response> {
        tracing::debug!("GET {} (no credentials)", url);
        self.http.get(url).send().await
    }
}

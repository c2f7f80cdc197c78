use async_trait::async_trait;
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, LOCATION};
use http::{Method, Request, Uri};
use http_body_util::{BodyExt, Full};
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use xvs_protocol::{decode_job_template, encode_patch, job_template_path, JobTemplate};
use xvs_types::VariableMap;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::redirect;
use crate::store::JobTemplateStore;

type HttpsClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Client for the job template API.
///
/// One client is built per run and reused for every job template, so
/// connections are pooled across requests.
pub struct TowerClient {
    config: ClientConfig,
    base: Uri,
    http: HttpsClient,
}

impl TowerClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base: Uri = config
            .base_url
            .parse()
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base.scheme().is_none() || base.authority().is_none() {
            return Err(ClientError::InvalidUrl(format!(
                "{}: expected an absolute URL such as https://tower.example.com/",
                config.base_url
            )));
        }

        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(config.insecure)
            .build()?;
        let mut connector = HttpConnector::new();
        connector.enforce_http(false);
        let https = HttpsConnector::from((connector, tls.into()));
        let http = Client::builder(TokioExecutor::new()).build(https);

        tracing::debug!(base = %base, insecure = config.insecure, "created API client");
        Ok(Self { config, base, http })
    }

    /// URL of a job template, built from the base URL on every call.
    pub fn job_template_url(&self, id: &str) -> ClientResult<Uri> {
        redirect::with_path(&self.base, &job_template_path(self.base.path(), id))
    }

    /// Send a request, following redirects with fresh credentials on every
    /// hop. Returns the body of the final, successful response.
    ///
    /// A redirect that would change the method (301/302/303 on a PATCH) is an
    /// error.
    async fn send(&self, method: Method, url: Uri, body: Option<Bytes>) -> ClientResult<Bytes> {
        let mut method = method;
        let mut url = url;
        let mut body = body;

        for _ in 0..=self.config.max_redirects {
            let request = self.build_request(&method, &url, body.clone())?;
            let response = self.http.request(request).await?;
            let status = response.status();
            tracing::debug!("{method} {url} -> {:?} {status}", response.version());

            if redirect::is_followed(status) {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| ClientError::MissingLocation {
                        url: url.clone(),
                        status,
                    })?;
                let next = redirect::resolve_location(&url, location)?;
                let (next_method, keep_body) = redirect::next_method(status, &method);
                if next_method != method {
                    return Err(ClientError::MethodChangingRedirect {
                        method,
                        url,
                        location: next,
                        status,
                    });
                }
                if redirect::exposes_credentials(&url, &next) {
                    tracing::warn!("following redirect from {url} to {next}, credentials are sent to the new location");
                }
                tracing::debug!("redirected to {next_method} {next}");
                if !keep_body {
                    body = None;
                }
                method = next_method;
                url = next;
                continue;
            }

            let bytes = response.into_body().collect().await?.to_bytes();
            if !status.is_success() {
                tracing::debug!(body = %String::from_utf8_lossy(&bytes), "error response");
                return Err(ClientError::Status { method, url, status });
            }
            return Ok(bytes);
        }

        Err(ClientError::TooManyRedirects {
            url,
            max: self.config.max_redirects,
        })
    }

    fn build_request(
        &self,
        method: &Method,
        url: &Uri,
        body: Option<Bytes>,
    ) -> ClientResult<Request<Full<Bytes>>> {
        let mut builder = Request::builder()
            .method(method.clone())
            .uri(url.clone())
            .header(AUTHORIZATION, self.config.credentials.authorization())
            .header(ACCEPT, "application/json");
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        Ok(builder.body(Full::new(body.unwrap_or_default()))?)
    }
}

#[async_trait]
impl JobTemplateStore for TowerClient {
    async fn fetch(&self, id: &str) -> ClientResult<JobTemplate> {
        let url = self.job_template_url(id)?;
        let body = self.send(Method::GET, url, None).await?;
        Ok(decode_job_template(&body)?)
    }

    async fn push(&self, id: &str, vars: &VariableMap) -> ClientResult<()> {
        let url = self.job_template_url(id)?;
        let body = encode_patch(vars)?;
        tracing::debug!(len = body.len(), "request body: {}", String::from_utf8_lossy(&body));
        self.send(Method::PATCH, url, Some(Bytes::from(body))).await?;
        Ok(())
    }
}

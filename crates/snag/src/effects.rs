//! Effects layer: HTTP I/O and the download operations.

use std::path::Path;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core;
use crate::data::{Encoding, FileOptions, Scheme, USER_AGENT, WriteMode};
use crate::error::{Error, Result};

/// A boxed stream of response-body chunks.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Status line and body of an in-flight response.
pub struct HttpResponse<E> {
    pub status: u16,
    pub body:   BoxStream<'static, std::result::Result<Bytes, E>>,
}

/// Asynchronous HTTP client abstraction.
///
/// The minimal seam [`Downloader`] needs from a transport: issue a GET with
/// the given headers and hand back the status line plus the body as a chunk
/// stream. Implementations handle connecting and TLS, surface the status
/// verbatim, and must not follow redirects.
///
/// # Implementations
///
/// - [`ReqwestClient`]: production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for transport-level failures.
    type Error: std::error::Error + Send + 'static;

    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> impl Future<Output = std::result::Result<HttpResponse<Self::Error>, Self::Error>> + Send;
}

/// Single-shot HTTP(S) downloader over an [`HttpClient`].
///
/// Every operation is one GET: no retries, no redirect following, no
/// timeout. Each call owns its own request, response stream and, in
/// streamed mode, file handle; concurrent calls are independent.
pub struct Downloader<C: HttpClient> {
    client: C,
}

#[cfg(feature = "reqwest")]
impl Downloader<ReqwestClient> {
    /// Create a downloader backed by the default [`ReqwestClient`].
    pub fn new() -> std::result::Result<Self, reqwest::Error> {
        Ok(Self::with_client(ReqwestClient::new()?))
    }
}

impl<C: HttpClient> Downloader<C> {
    pub fn with_client(client: C) -> Self { Self { client } }

    /// Fetch `url` and return the whole body as one buffer.
    ///
    /// Chunks are accumulated in arrival order; the result is their exact
    /// concatenation.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let mut body = self.open(url).await?;

        let mut buffer = Vec::new();
        while let Some(chunk) = Self::next_chunk(url, &mut body).await? {
            buffer.extend_from_slice(&chunk);
        }

        debug!(url, bytes = buffer.len(), "download complete");
        Ok(buffer)
    }

    /// Fetch `url` and stream the body into a file at `path`.
    ///
    /// The file is opened once for the duration of the transfer, truncated
    /// unless `options.append(true)` was given. Bytes written before a
    /// mid-transfer failure are not rolled back.
    pub async fn download_to_file(
        &self,
        url: &str,
        path: impl AsRef<Path>,
        options: FileOptions,
    ) -> Result<()> {
        let mut body = self.open(url).await?;

        let mut open = OpenOptions::new();
        open.create(true).write(true);
        match options.write_mode() {
            WriteMode::Truncate => open.truncate(true),
            WriteMode::Append => open.append(true),
        };
        let mut file = open.open(path.as_ref()).await?;

        let mut written = 0u64;
        while let Some(chunk) = Self::next_chunk(url, &mut body).await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(url, bytes = written, path = %path.as_ref().display(), "download complete");
        Ok(())
    }

    /// Fetch `url` and decode the body as utf8 text.
    pub async fn download_string(&self, url: &str) -> Result<String> {
        self.fetch_string(url, Encoding::default()).await
    }

    /// Fetch `url` and render the body as text in the named encoding.
    ///
    /// The encoding name is validated before any network activity.
    pub async fn download_string_as(&self, url: &str, encoding: &str) -> Result<String> {
        let encoding = encoding.parse::<Encoding>()?;
        self.fetch_string(url, encoding).await
    }

    /// Fetch `url`, decode the body as utf8 text and parse it as JSON.
    pub async fn download_json(&self, url: &str) -> Result<serde_json::Value> {
        self.fetch_json(url, Encoding::default()).await
    }

    /// Like [`download_json`](Self::download_json) with an explicit encoding.
    pub async fn download_json_as(&self, url: &str, encoding: &str) -> Result<serde_json::Value> {
        let encoding = encoding.parse::<Encoding>()?;
        self.fetch_json(url, encoding).await
    }

    async fn fetch_string(&self, url: &str, encoding: Encoding) -> Result<String> {
        let bytes = self.download(url).await?;
        Ok(core::decode(&bytes, encoding))
    }

    async fn fetch_json(&self, url: &str, encoding: Encoding) -> Result<serde_json::Value> {
        let text = self.fetch_string(url, encoding).await?;
        serde_json::from_str(&text).map_err(|source| Error::Json {
            url: url.to_string(),
            source,
        })
    }

    /// Issue the GET and validate the status line.
    ///
    /// On a non-200 status the remaining body is drained before the call
    /// fails, so the transport can reclaim the connection; none of the
    /// drained bytes are buffered or written.
    async fn open(
        &self,
        url: &str,
    ) -> Result<BoxStream<'static, std::result::Result<Bytes, C::Error>>> {
        Scheme::of(url)?;

        debug!(url, "GET");
        let headers = [("User-Agent".to_string(), USER_AGENT.to_string())];
        let response = self
            .client
            .get(url, &headers)
            .await
            .map_err(|e| Error::Transport {
                url:     url.to_string(),
                message: e.to_string(),
            })?;

        if response.status != 200 {
            let mut body = response.body;
            while let Ok(Some(_)) = body.try_next().await {}
            return Err(Error::BadStatus {
                url:    url.to_string(),
                status: response.status,
            });
        }

        Ok(response.body)
    }

    async fn next_chunk(
        url: &str,
        body: &mut BoxStream<'static, std::result::Result<Bytes, C::Error>>,
    ) -> Result<Option<Bytes>> {
        body.try_next().await.map_err(|e| Error::Transport {
            url:     url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_client {
    use super::*;
    use reqwest::redirect::Policy;

    /// Production client backed by `reqwest`, serving both schemes.
    ///
    /// Redirects are not followed; a 3xx status reaches the caller like any
    /// other non-200 response.
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new() -> std::result::Result<Self, reqwest::Error> {
            let client = reqwest::Client::builder().redirect(Policy::none()).build()?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> std::result::Result<HttpResponse<Self::Error>, Self::Error> {
            let mut request = self.client.get(url);
            for (key, value) in headers {
                request = request.header(key, value);
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            let body: BoxStream<'static, _> = Box::pin(response.bytes_stream());

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_client::ReqwestClient;

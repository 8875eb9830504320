//! Marketplace client for sending orchestrator webhooks

use crate::{
    BookEvent, BookGenerated, BookNotification, BrandCreated, BrandEvent, ClientConfig, Endpoint,
    HealthStatus, NotificationObserver, NotifyError, NotifyEvent, Result, SeoEvent, SeoGenerated,
    SeoNotification, TracingObserver, attachment, attachment::AttachmentKind,
};
use reqwest::{Client, RequestBuilder, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Path below the base URL where the orchestrator webhooks live
const WEBHOOK_PREFIX: &str = "webhooks/orchestrator/";

/// Client for notifying the marketplace about pipeline events.
///
/// Every call makes a single attempt. Failures come back as
/// [`NotifyError::Transport`] or [`NotifyError::Decode`]; nothing is retried
/// or deduplicated.
#[derive(Clone)]
pub struct MarketplaceClient {
    config: Arc<ClientConfig>,
    http_client: Client,
    base_url: String,
    webhook_base: Url,
    observer: Arc<dyn NotificationObserver>,
}

impl MarketplaceClient {
    /// Create a client that reports progress through `tracing`
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    /// Create a client that reports progress to `observer`
    pub fn with_observer(
        config: ClientConfig,
        observer: Arc<dyn NotificationObserver>,
    ) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let webhook_base = Url::parse(&format!("{}/{}", base_url, WEBHOOK_PREFIX))?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NotifyError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
            base_url,
            webhook_base,
            observer,
        })
    }

    /// Create a client for `base_url` with otherwise default settings
    pub fn for_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::builder().base_url(base_url).build())
    }

    /// Notify the marketplace that a brand was created.
    ///
    /// The brand is sent exactly as given.
    pub async fn notify_brand_created(&self, brand: &BrandEvent) -> Result<BrandCreated> {
        self.emit(NotifyEvent::Dispatching {
            endpoint: Endpoint::BrandCreated,
            subject: brand.name.clone(),
        });

        let result: BrandCreated = self.send_webhook(Endpoint::BrandCreated, brand).await?;

        self.emit(NotifyEvent::BrandDeployed {
            brand_id: result.brand_id.clone(),
            url: self.absolute_url(&result.url),
        });
        Ok(result)
    }

    /// Notify the marketplace that a book was generated.
    ///
    /// Cover and PDF paths that do not exist are skipped. Paths that exist but
    /// cannot be read, or exceed `max_attachment_bytes`, fail the call before
    /// anything is sent.
    pub async fn notify_book_generated(
        &self,
        brand_id: &str,
        book: &BookEvent,
        cover_path: Option<&Path>,
        pdf_path: Option<&Path>,
    ) -> Result<BookGenerated> {
        self.emit(NotifyEvent::Dispatching {
            endpoint: Endpoint::BookGenerated,
            subject: book.title.clone(),
        });

        let body = BookNotification {
            brand_id,
            book,
            cover_file: self.load_attachment(cover_path, AttachmentKind::Cover).await?,
            pdf_file: self.load_attachment(pdf_path, AttachmentKind::Pdf).await?,
        };

        let result: BookGenerated = self.send_webhook(Endpoint::BookGenerated, &body).await?;

        self.emit(NotifyEvent::BookCataloged {
            brand_id: brand_id.to_string(),
            catalog_size: result.catalog_size,
        });
        Ok(result)
    }

    /// Notify the marketplace that an SEO post was generated
    pub async fn notify_seo_generated(
        &self,
        brand_id: &str,
        post: &SeoEvent,
    ) -> Result<SeoGenerated> {
        self.emit(NotifyEvent::Dispatching {
            endpoint: Endpoint::SeoGenerated,
            subject: post.title.clone(),
        });

        let body = SeoNotification { brand_id, post };
        let result: SeoGenerated = self.send_webhook(Endpoint::SeoGenerated, &body).await?;

        self.emit(NotifyEvent::PostPublished {
            brand_id: brand_id.to_string(),
            url: self.absolute_url(&result.post_url),
        });
        Ok(result)
    }

    /// Probe the webhook health endpoint.
    ///
    /// `true` only for a success response whose JSON `status` is `"ok"`.
    /// Every failure is reported as `false`.
    pub async fn check_health(&self) -> bool {
        let (healthy, detail) = match self.health().await {
            Ok(health) if health.is_ok() => (true, "Marketplace webhooks are healthy".to_string()),
            Ok(health) => (
                false,
                format!(
                    "Marketplace webhooks returned unexpected status: {}",
                    health.status
                ),
            ),
            Err(e) => (false, format!("Marketplace webhooks are not available: {}", e)),
        };

        self.emit(NotifyEvent::HealthChecked { healthy, detail });
        healthy
    }

    /// Fetch the health document
    pub async fn health(&self) -> Result<HealthStatus> {
        let endpoint = Endpoint::Health;
        let request = self
            .http_client
            .get(self.endpoint_url(endpoint)?)
            .timeout(self.config.health_timeout);

        let text = self.exchange(endpoint, request).await?;
        decode(endpoint, &text)
    }

    /// Full URL of a webhook endpoint
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        Ok(self.webhook_base.join(endpoint.name())?)
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Webhook prefix, e.g. `http://localhost:3001/webhooks/orchestrator/`
    pub fn webhook_base(&self) -> &Url {
        &self.webhook_base
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST `body` to `endpoint` and decode the response
    async fn send_webhook<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .http_client
            .post(self.endpoint_url(endpoint)?)
            .header(CONTENT_TYPE, "application/json")
            .json(body);

        let outcome = match self.exchange(endpoint, request).await {
            Ok(text) => decode(endpoint, &text),
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            let message = match e {
                NotifyError::Transport { message, .. } | NotifyError::Decode { message, .. } => {
                    message.clone()
                }
                other => other.to_string(),
            };
            self.emit(NotifyEvent::DispatchFailed {
                endpoint,
                message,
                body: e.response_body().map(str::to_string),
            });
        }
        outcome
    }

    /// Send one request and return the body of a success response
    async fn exchange(&self, endpoint: Endpoint, request: RequestBuilder) -> Result<String> {
        debug!(endpoint = %endpoint, "Sending marketplace request");

        let response = request
            .send()
            .await
            .map_err(|e| NotifyError::transport(endpoint.name(), describe(&e), None))?;

        let status = response.status();
        let url = response.url().clone();
        let text = response
            .text()
            .await
            .map_err(|e| NotifyError::transport(endpoint.name(), describe(&e), None))?;

        if !status.is_success() {
            return Err(NotifyError::transport(
                endpoint.name(),
                format!("HTTP {} for url {}", status, url),
                Some(text),
            ));
        }

        debug!(endpoint = %endpoint, status = status.as_u16(), bytes = text.len(), "Marketplace responded");
        Ok(text)
    }

    async fn load_attachment(
        &self,
        path: Option<&Path>,
        kind: AttachmentKind,
    ) -> Result<Option<String>> {
        match path {
            Some(path) => {
                attachment::load(
                    path,
                    kind,
                    self.config.max_attachment_bytes,
                    self.observer.as_ref(),
                )
                .await
            }
            None => Ok(None),
        }
    }

    fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn emit(&self, event: NotifyEvent) {
        self.observer.on_event(&event);
    }
}

impl fmt::Debug for MarketplaceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketplaceClient")
            .field("config", &self.config)
            .field("webhook_base", &self.webhook_base.as_str())
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| NotifyError::decode(endpoint.name(), e.to_string()))
}

/// Error message including its source chain
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

//! Marketplace Orchestrator Webhooks
//!
//! Client side of the marketplace's orchestrator webhooks. The content
//! pipeline calls it when a brand is created, a book is generated or an SEO
//! post is written, and the marketplace deploys the result.
//!
//! # Features
//!
//! - **Typed events**: `BrandEvent`, `BookEvent` and `SeoEvent` with required
//!   fields in the type and optional fields omitted when unset
//! - **Inline attachments**: cover images and PDFs travel as base64 text
//!   inside the JSON body
//! - **Single attempt**: one timeout-bounded request per call, failures are
//!   returned to the caller untouched
//! - **Health probe**: `check_health` never fails, it only answers yes or no
//! - **Observable**: progress is reported as structured [`NotifyEvent`]s to a
//!   pluggable [`NotificationObserver`]
//!
//! # Example
//!
//! ```rust,no_run
//! use marketplace_webhooks::{BookEvent, BrandEvent, ClientConfig, MarketplaceClient};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MarketplaceClient::new(ClientConfig::default())?;
//!
//!     if !client.check_health().await {
//!         return Err("marketplace is not running".into());
//!     }
//!
//!     let brand = client
//!         .notify_brand_created(&BrandEvent::new("Quantum Youth Publishing"))
//!         .await?;
//!
//!     let book = BookEvent::new("Introduction to Quantum Computing").with_price(14.99);
//!     let result = client
//!         .notify_book_generated(
//!             &brand.brand_id,
//!             &book,
//!             Some(Path::new("./covers/quantum_intro.jpg")),
//!             None,
//!         )
//!         .await?;
//!
//!     println!("{} book(s) in catalog", result.catalog_size);
//!     Ok(())
//! }
//! ```

mod attachment;
mod client;
mod config;
mod error;
mod observer;
mod payload;
mod response;

pub use attachment::AttachmentKind;
pub use client::MarketplaceClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use error::NotifyError;
pub use observer::{
    NoopObserver, NotificationObserver, NotifyEvent, RecordingObserver, TracingObserver,
};
pub use payload::{
    BookEvent, BookNotification, BrandEvent, Chapter, Endpoint, Nullable, SeoEvent,
    SeoNotification,
};
pub use response::{BookGenerated, BrandCreated, HealthStatus, SeoGenerated};

/// Result type for marketplace webhook operations
pub type Result<T> = std::result::Result<T, NotifyError>;

//! Structured notification events and the observers that receive them.

use crate::{AttachmentKind, Endpoint};
use parking_lot::Mutex;
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Progress reported by [`MarketplaceClient`](crate::MarketplaceClient)
#[derive(Debug, Clone, PartialEq)]
pub enum NotifyEvent {
    /// A notification is about to be sent
    Dispatching {
        endpoint: Endpoint,
        /// Brand name, book title or post title
        subject: String,
    },

    /// An attachment was read and encoded
    AttachmentLoaded {
        kind: AttachmentKind,
        file_name: String,
        bytes: u64,
    },

    /// An attachment path does not exist; the field is left out
    AttachmentMissing { kind: AttachmentKind, path: PathBuf },

    /// The marketplace deployed a brand
    BrandDeployed {
        brand_id: String,
        /// Absolute storefront URL
        url: String,
    },

    /// A book was added to a brand's catalog
    BookCataloged { brand_id: String, catalog_size: u64 },

    /// A blog post was published
    PostPublished {
        brand_id: String,
        /// Absolute post URL
        url: String,
    },

    /// A notification failed
    DispatchFailed {
        endpoint: Endpoint,
        message: String,
        body: Option<String>,
    },

    /// Result of a health probe
    HealthChecked { healthy: bool, detail: String },
}

impl fmt::Display for NotifyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatching { endpoint, subject } => {
                write!(f, "Notifying marketplace: {} - {}", endpoint, subject)
            }
            Self::AttachmentLoaded {
                kind,
                file_name,
                bytes,
            } => write!(f, "{} attached: {} ({} bytes)", kind, file_name, bytes),
            Self::AttachmentMissing { kind, path } => {
                write!(f, "{} file not found: {}", kind, path.display())
            }
            Self::BrandDeployed { brand_id, url } => {
                write!(f, "Brand {} deployed to marketplace: {}", brand_id, url)
            }
            Self::BookCataloged {
                brand_id,
                catalog_size,
            } => write!(
                f,
                "Book added to marketplace catalog; total books in {}: {}",
                brand_id, catalog_size
            ),
            Self::PostPublished { url, .. } => {
                write!(f, "Blog post published to marketplace: {}", url)
            }
            Self::DispatchFailed {
                endpoint,
                message,
                body,
            } => {
                write!(f, "Webhook failed: {}: {}", endpoint, message)?;
                if let Some(body) = body {
                    write!(f, " (response: {})", body)?;
                }
                Ok(())
            }
            Self::HealthChecked { detail, .. } => f.write_str(detail),
        }
    }
}

/// Receives [`NotifyEvent`]s as a client works.
///
/// Implementations must be cheap; they run inline on the caller's task.
pub trait NotificationObserver: Send + Sync {
    fn on_event(&self, event: &NotifyEvent);
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl NotificationObserver for TracingObserver {
    fn on_event(&self, event: &NotifyEvent) {
        match event {
            NotifyEvent::Dispatching { endpoint, subject } => {
                info!(endpoint = %endpoint, subject = %subject, "{}", event);
            }
            NotifyEvent::AttachmentLoaded { kind, bytes, .. } => {
                info!(attachment = %kind, bytes = *bytes, "{}", event);
            }
            NotifyEvent::AttachmentMissing { kind, .. } => {
                warn!(attachment = %kind, "{}", event);
            }
            NotifyEvent::BrandDeployed { brand_id, .. }
            | NotifyEvent::PostPublished { brand_id, .. } => {
                info!(brand_id = %brand_id, "{}", event);
            }
            NotifyEvent::BookCataloged {
                brand_id,
                catalog_size,
            } => {
                info!(brand_id = %brand_id, catalog_size = *catalog_size, "{}", event);
            }
            NotifyEvent::DispatchFailed { endpoint, .. } => {
                error!(endpoint = %endpoint, "{}", event);
            }
            NotifyEvent::HealthChecked { healthy: true, .. } => info!("{}", event),
            NotifyEvent::HealthChecked { healthy: false, .. } => warn!("{}", event),
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl NotificationObserver for NoopObserver {
    fn on_event(&self, _event: &NotifyEvent) {}
}

/// Keeps every event in memory, in order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<NotifyEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far
    pub fn events(&self) -> Vec<NotifyEvent> {
        self.events.lock().clone()
    }

    /// Rendered text of the events seen so far
    pub fn messages(&self) -> Vec<String> {
        self.events.lock().iter().map(ToString::to_string).collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl NotificationObserver for RecordingObserver {
    fn on_event(&self, event: &NotifyEvent) {
        self.events.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatching_message_names_subject() {
        let event = NotifyEvent::Dispatching {
            endpoint: Endpoint::BrandCreated,
            subject: "Acme".to_string(),
        };
        assert_eq!(
            event.to_string(),
            "Notifying marketplace: brand-created - Acme"
        );
    }

    #[test]
    fn test_dispatch_failed_message_includes_body() {
        let event = NotifyEvent::DispatchFailed {
            endpoint: Endpoint::SeoGenerated,
            message: "HTTP 400 Bad Request".to_string(),
            body: Some("Missing required fields: brandId, post".to_string()),
        };
        let text = event.to_string();
        assert!(text.contains("seo-generated"));
        assert!(text.contains("Missing required fields"));
    }

    #[test]
    fn test_recording_observer() {
        let observer = RecordingObserver::new();
        observer.on_event(&NotifyEvent::HealthChecked {
            healthy: true,
            detail: "Marketplace webhooks are healthy".to_string(),
        });
        observer.on_event(&NotifyEvent::AttachmentMissing {
            kind: AttachmentKind::Cover,
            path: PathBuf::from("covers/missing.jpg"),
        });

        assert_eq!(observer.events().len(), 2);
        assert_eq!(
            observer.messages()[1],
            "Cover file not found: covers/missing.jpg"
        );

        observer.clear();
        assert!(observer.events().is_empty());
    }

    #[test]
    fn test_tracing_and_noop_observers_accept_all_events() {
        let events = [
            NotifyEvent::BookCataloged {
                brand_id: "acme".to_string(),
                catalog_size: 3,
            },
            NotifyEvent::HealthChecked {
                healthy: false,
                detail: "unreachable".to_string(),
            },
        ];
        for event in &events {
            TracingObserver.on_event(event);
            NoopObserver.on_event(event);
        }
    }
}

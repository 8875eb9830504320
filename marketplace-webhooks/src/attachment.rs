//! Inline file attachments

use crate::{NotificationObserver, NotifyError, NotifyEvent, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Files a book notification can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    /// Cover image (JPG/PNG), sent as `coverFile`
    Cover,
    /// Book PDF, sent as `pdfFile`
    Pdf,
}

impl AttachmentKind {
    /// JSON field carrying the encoded file
    pub fn field(&self) -> &'static str {
        match self {
            Self::Cover => "coverFile",
            Self::Pdf => "pdfFile",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cover => f.write_str("Cover"),
            Self::Pdf => f.write_str("PDF"),
        }
    }
}

/// Read `path` and return it base64 encoded.
///
/// A path that does not exist yields `Ok(None)`. Anything else that stops the
/// read, including a file above `limit`, is an error.
pub(crate) async fn load(
    path: &Path,
    kind: AttachmentKind,
    limit: Option<u64>,
    observer: &dyn NotificationObserver,
) -> Result<Option<String>> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            observer.on_event(&NotifyEvent::AttachmentMissing {
                kind,
                path: path.to_path_buf(),
            });
            return Ok(None);
        }
        Err(source) => {
            return Err(NotifyError::Attachment {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if let Some(limit) = limit
        && metadata.len() > limit
    {
        return Err(NotifyError::AttachmentTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| NotifyError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(attachment = %kind, path = %path.display(), bytes = bytes.len(), "Encoding attachment");

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    observer.on_event(&NotifyEvent::AttachmentLoaded {
        kind,
        file_name,
        bytes: bytes.len() as u64,
    });

    Ok(Some(STANDARD.encode(&bytes)))
}

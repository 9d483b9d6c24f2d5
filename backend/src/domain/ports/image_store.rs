//! Port for removing image files that no record references any more.

use async_trait::async_trait;

use crate::domain::ImageRef;

use super::define_port_error;

define_port_error! {
    /// Errors raised while discarding images.
    pub enum ImageStoreError {
        /// Filesystem operation failed.
        Io { message: String } => "image store operation failed: {message}",
    }
}

/// Best-effort image cleanup.
///
/// Callers log failures and carry on; a stale file is never worth failing a
/// catalog edit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Remove the file for `image`. A file that is already gone is not an
    /// error.
    async fn discard(&self, image: &ImageRef) -> Result<(), ImageStoreError>;
}

/// Image store that keeps every file, used when no image directory is
/// configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpImageStore;

#[async_trait]
impl ImageStore for NoOpImageStore {
    async fn discard(&self, _image: &ImageRef) -> Result<(), ImageStoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_discard_returns_ok() {
        let image = ImageRef::new("gulasch.jpg").expect("plain name");
        assert!(NoOpImageStore.discard(&image).await.is_ok());
    }
}

//! Filesystem image cleanup confined to the configured image directory.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::ImageRef;
use crate::domain::ports::{ImageStore, ImageStoreError};

/// [`ImageStore`] that deletes files from one directory.
///
/// The directory is opened once as a capability; `ImageRef` names are plain
/// file names, and `cap_std` refuses any path that would leave the directory.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    dir: Arc<Dir>,
}

impl FsImageStore {
    /// Open `path` as the image directory.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir: Arc::new(dir) })
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn discard(&self, image: &ImageRef) -> Result<(), ImageStoreError> {
        let dir = Arc::clone(&self.dir);
        let name = image.as_str().to_owned();
        tokio::task::spawn_blocking(move || match dir.remove_file(&name) {
            Ok(()) => {
                debug!(image = %name, "discarded image");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ImageStoreError::io(format!("{name}: {err}"))),
        })
        .await
        .map_err(|err| ImageStoreError::io(format!("discard task aborted: {err}")))?
    }
}

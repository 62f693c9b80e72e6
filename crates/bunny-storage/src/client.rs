//! S3 object store client.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

/// Entry point for addressing buckets.
#[derive(Clone)]
pub struct ObjectStore {
    client: Client,
}

impl ObjectStore {
    /// Create a client from a shared AWS SDK configuration.
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// Handle for one bucket.
    pub fn bucket(&self, name: &str) -> Bucket {
        Bucket {
            client: self.client.clone(),
            name: name.to_string(),
        }
    }
}

/// Handle to a single bucket.
#[derive(Clone)]
pub struct Bucket {
    client: Client,
    name: String,
}

impl Bucket {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write a small text object.
    pub async fn put_string(&self, key: &str, body: String) -> StorageResult<()> {
        debug!("Putting {} into {}", key, self.name);

        self.client
            .put_object()
            .bucket(&self.name)
            .key(key)
            .body(ByteStream::from(body.into_bytes()))
            .send()
            .await
            .map_err(|e| StorageError::put_failed(e.to_string()))?;

        Ok(())
    }

    /// Delete an object. Deleting a nonexistent key is not an error.
    pub async fn delete_object(&self, key: &str) -> StorageResult<()> {
        info!("Deleting key {} from bucket {}", key, self.name);

        self.client
            .delete_object()
            .bucket(&self.name)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::delete_failed(e.to_string()))?;

        Ok(())
    }

    /// Move an object within the bucket: copy to the new key, then delete
    /// the old one.
    pub async fn move_object(&self, old_key: &str, new_key: &str) -> StorageResult<()> {
        info!(
            "Moving key {} to key {} in bucket {}",
            old_key, new_key, self.name
        );

        self.client
            .copy_object()
            .copy_source(format!("{}/{}", self.name, old_key))
            .bucket(&self.name)
            .key(new_key)
            .send()
            .await
            .map_err(|e| {
                if e.to_string().contains("NoSuchKey") {
                    StorageError::not_found(old_key)
                } else {
                    StorageError::copy_failed(e.to_string())
                }
            })?;

        self.delete_object(old_key).await
    }
}

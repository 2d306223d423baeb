//! ObjectStore — S3 client wrapper for image payloads.
//!
//! One client is constructed at startup and shared across requests. Keys
//! are opaque random hex strings in a flat namespace; reads go through
//! time-limited presigned URLs rather than proxying bytes.

use crate::config::AppConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use futures::future::try_join_all;
use rand::RngCore;
use rand::rngs::OsRng;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error(transparent)]
    S3(#[from] aws_sdk_s3::Error),
    #[error("presigning failed: {0}")]
    Presign(String),
}

pub type ObjectStoreResult<T> = Result<T, ObjectStoreError>;

/// ObjectStore provides the binary half of the service:
/// - Put the resized payload under a generated key
/// - Delete a payload when its post goes away
/// - Hand out presigned read URLs for the feed
#[derive(Clone)]
pub struct ObjectStore {
    client: S3Client,
    bucket: String,
    url_ttl: Duration,
}

impl ObjectStore {
    /// Build from an already-configured client. `connect` is the production
    /// path; this constructor also lets tests inject static credentials.
    pub fn new(client: S3Client, bucket: impl Into<String>, url_ttl: Duration) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            url_ttl,
        }
    }

    /// Construct the shared client from the default AWS configuration chain.
    ///
    /// Credentials come from the environment (`AWS_ACCESS_KEY_ID` /
    /// `AWS_SECRET_ACCESS_KEY`), resolved once per client. A custom endpoint
    /// switches to path-style addressing for MinIO/LocalStack compatibility.
    pub async fn connect(cfg: &AppConfig) -> Self {
        let aws_cfg = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(cfg.region.clone()))
            .load()
            .await;

        let mut builder = S3ConfigBuilder::from(&aws_cfg);
        if let Some(endpoint) = &cfg.s3_endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = S3Client::from_conf(builder.build());

        info!(
            bucket = %cfg.bucket,
            region = %cfg.region,
            "object store client initialized"
        );

        Self::new(client, cfg.bucket.clone(), Duration::from_secs(cfg.url_ttl_secs))
    }

    /// Store `bytes` under `key`, keeping the uploader's declared MIME type.
    pub async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> ObjectStoreResult<()> {
        let size_bytes = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;

        debug!(key = %key, size_bytes, "object stored");
        Ok(())
    }

    /// Delete the payload stored under `key`.
    pub async fn delete(&self, key: &str) -> ObjectStoreResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;

        debug!(key = %key, "object deleted");
        Ok(())
    }

    /// Presigned read URLs for a batch of keys.
    ///
    /// One `PresigningConfig` is built per call, so every URL in a listing
    /// response shares the same expiry window. Results come back in input
    /// order.
    pub async fn read_urls<'a, I>(&self, keys: I) -> ObjectStoreResult<Vec<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let presigning = PresigningConfig::expires_in(self.url_ttl)
            .map_err(|err| ObjectStoreError::Presign(err.to_string()))?;

        try_join_all(keys.into_iter().map(|key| {
            let presigning = presigning.clone();
            async move {
                let request = self
                    .client
                    .get_object()
                    .bucket(&self.bucket)
                    .key(key)
                    .presigned(presigning)
                    .await
                    .map_err(aws_sdk_s3::Error::from)?;
                Ok(request.uri().to_string())
            }
        }))
        .await
    }

    /// HeadBucket, used by the readiness probe.
    pub async fn check(&self) -> ObjectStoreResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;
        Ok(())
    }
}

/// Generate a random object key: 32 bytes from the OS RNG, hex-encoded.
///
/// 64 lowercase hex characters, collision-resistant without coordination.
pub fn generate_image_key() -> String {
    let mut raw = [0u8; 32];
    OsRng.fill_bytes(&mut raw);
    hex::encode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::{Credentials, Region};

    fn test_store() -> ObjectStore {
        let credentials = Credentials::new("test-access-key", "test-secret-key", None, None, "static");
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .build();
        ObjectStore::new(S3Client::from_conf(conf), "unit-bucket", Duration::from_secs(3600))
    }

    #[test]
    fn generated_keys_are_64_hex_chars() {
        let key = generate_image_key();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_keys_do_not_repeat() {
        assert_ne!(generate_image_key(), generate_image_key());
    }

    #[tokio::test]
    async fn presigned_urls_carry_key_and_expiry() {
        let store = test_store();

        let urls = store.read_urls(["deadbeef"]).await.unwrap();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].contains("unit-bucket"));
        assert!(urls[0].contains("deadbeef"));
        assert!(urls[0].contains("X-Amz-Expires=3600"));
    }

    #[tokio::test]
    async fn presigned_urls_keep_input_order() {
        let store = test_store();

        let urls = store.read_urls(["first-key", "second-key"]).await.unwrap();
        assert_eq!(urls.len(), 2);
        assert!(urls[0].contains("first-key"));
        assert!(urls[1].contains("second-key"));
    }
}

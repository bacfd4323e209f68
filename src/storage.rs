use std::path::{Path, PathBuf};
use std::time::Instant;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use serde_json::Value;
use thiserror::Error;
use tracing::log;
use walkdir::WalkDir;

use crate::config_handler::StorageConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Error encoding document {0}: {1}")]
    Encode(String, serde_json::Error),

    #[error("Error decoding document {0}: {1}")]
    Decode(String, serde_json::Error),

    #[error("Error accessing {0}: {1}")]
    Io(String, std::io::Error),

    #[error("Error calling s3 for {0}: {1}")]
    S3(String, String),
}

/// `{prefix}/{team_name}/{season}/{match_id}.json`, with `/` in the season
/// replaced so "2024/2025" stays one path segment.
pub fn raw_match_key(prefix: &str, team_name: &str, season: &str, match_id: i64) -> String {
    let season_str = season.replace('/', "_");
    format!("{}/{team_name}/{season_str}/{match_id}.json", prefix.trim_end_matches('/'))
}

/// Match id from the file name of a raw match key.
pub fn match_id_from_key(key: &str) -> Option<i64> {
    Path::new(key).file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.parse().ok())
}

/// Where raw match documents are written to and read back from.
pub enum Storage {
    S3 {
        client: aws_sdk_s3::Client,
        bucket: String,
    },
    Fs {
        root: PathBuf,
    },
}

impl Storage {
    pub async fn from_config(config: &StorageConfig) -> Storage {
        match config {
            StorageConfig::S3 { bucket, region, endpoint } => {
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(region.clone()))
                    .load()
                    .await;
                let mut builder = aws_sdk_s3::config::Builder::from(&shared);
                if let Some(endpoint) = endpoint {
                    builder = builder.endpoint_url(endpoint).force_path_style(true);
                }
                log::info!("[STORAGE] Using s3://{bucket} in {region}");
                Storage::S3 { client: aws_sdk_s3::Client::from_conf(builder.build()), bucket: bucket.clone() }
            },
            StorageConfig::Fs { root } => {
                log::info!("[STORAGE] Using directory {root}");
                Storage::Fs { root: PathBuf::from(root) }
            },
        }
    }

    /// Writes `doc` verbatim under `key`; returns the written location.
    pub async fn put_raw(&self, key: &str, doc: &Value) -> Result<String, StorageError> {
        let before = Instant::now();
        let json = serde_json::to_vec(doc)
            .map_err(|e| StorageError::Encode(key.to_string(), e))?;

        let location = match self {
            Storage::S3 { client, bucket } => {
                client.put_object()
                    .bucket(bucket)
                    .key(key)
                    .body(ByteStream::from(json))
                    .content_type("application/json")
                    .send()
                    .await
                    .map_err(|e| StorageError::S3(key.to_string(), DisplayErrorContext(e).to_string()))?;
                format!("s3://{bucket}/{key}")
            },
            Storage::Fs { root } => {
                let path = root.join(key);
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await
                        .map_err(|e| StorageError::Io(key.to_string(), e))?;
                }
                tokio::fs::write(&path, json).await
                    .map_err(|e| StorageError::Io(key.to_string(), e))?;
                path.display().to_string()
            },
        };
        log::info!("[STORAGE] Uploaded to {location} {:.2?}", before.elapsed());
        Ok(location)
    }

    pub async fn get_raw(&self, key: &str) -> Result<Value, StorageError> {
        let data = match self {
            Storage::S3 { client, bucket } => {
                let rsp = client.get_object()
                    .bucket(bucket)
                    .key(key)
                    .send()
                    .await
                    .map_err(|e| StorageError::S3(key.to_string(), DisplayErrorContext(e).to_string()))?;
                rsp.body.collect().await
                    .map_err(|e| StorageError::S3(key.to_string(), e.to_string()))?
                    .into_bytes()
                    .to_vec()
            },
            Storage::Fs { root } => {
                tokio::fs::read(root.join(key)).await
                    .map_err(|e| StorageError::Io(key.to_string(), e))?
            },
        };
        serde_json::from_slice(&data)
            .map_err(|e| StorageError::Decode(key.to_string(), e))
    }

    /// Keys of every `.json` document under `prefix`, sorted.
    pub async fn list_raw(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = match self {
            Storage::S3 { client, bucket } => {
                let mut keys = vec![];
                let mut token = None;
                loop {
                    let rsp = client.list_objects_v2()
                        .bucket(bucket)
                        .prefix(prefix)
                        .set_continuation_token(token.take())
                        .send()
                        .await
                        .map_err(|e| StorageError::S3(prefix.to_string(), DisplayErrorContext(e).to_string()))?;
                    keys.extend(rsp.contents().iter().filter_map(|o| o.key().map(|k| k.to_string())));
                    match rsp.next_continuation_token() {
                        Some(t) => token = Some(t.to_string()),
                        None => break,
                    }
                }
                keys
            },
            Storage::Fs { root } => {
                let dir = root.join(prefix);
                if !dir.exists() {
                    return Ok(vec![]);
                }
                let mut keys = vec![];
                for entry in WalkDir::new(&dir) {
                    let entry = entry.map_err(|e| StorageError::Io(prefix.to_string(), e.into()))?;
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    if let Ok(relative) = entry.path().strip_prefix(root) {
                        let key: Vec<String> = relative.components()
                            .map(|c| c.as_os_str().to_string_lossy().to_string())
                            .collect();
                        keys.push(key.join("/"));
                    }
                }
                keys
            },
        };
        keys.retain(|k| k.ends_with(".json"));
        keys.sort();
        Ok(keys)
    }
}

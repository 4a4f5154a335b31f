use object_store::{aws::AmazonS3Builder, local::LocalFileSystem, memory::InMemory};
use std::sync::Arc;

use crate::{
    adapters::outbound::{
        notify::LogNotifier, persistence::InMemoryRecordStore, storage::ApacheObjectStoreAdapter,
    },
    ports::{notify::Notifier, repositories::RecordStore, storage::ObjectStore},
    services::RecordServiceImpl,
};

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    /// Base URL under which uploaded objects are reachable.
    pub public_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            public_base_url: "https://storage.local".to_string(),
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    LocalFileSystem {
        root: String,
    },
    S3 {
        bucket: String,
        region: String,
        endpoint: Option<String>,
        access_key: Option<String>,
        secret_key: Option<String>,
    },
}

/// Application dependencies container
pub struct AppDependencies {
    pub record_store: Arc<dyn RecordStore>,
    pub object_store: Arc<dyn ObjectStore>,
    pub notifier: Arc<dyn Notifier>,
}

/// Application services container
pub struct AppServices {
    pub record_service: RecordServiceImpl,
}

/// Application builder: explicit construction of store handles, passed into
/// the service at startup.
pub struct AppBuilder {
    config: AppConfig,
    notifier: Option<Arc<dyn Notifier>>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            notifier: None,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.public_base_url = url.into();
        self
    }

    /// Override the notifier (defaults to the log-based one).
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the application dependencies
    pub fn build_dependencies(self) -> Result<AppDependencies, AppError> {
        let object_store = self.create_object_store()?;
        let record_store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(LogNotifier));

        Ok(AppDependencies {
            record_store,
            object_store,
            notifier,
        })
    }

    /// Build the complete application with services
    pub fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies()?;

        let record_service = RecordServiceImpl::new(
            deps.record_store.clone(),
            deps.object_store.clone(),
            deps.notifier.clone(),
        );

        Ok(AppServices { record_service })
    }

    fn create_object_store(&self) -> Result<Arc<dyn ObjectStore>, AppError> {
        let inner: Arc<dyn object_store::ObjectStore> = match &self.config.storage_backend {
            StorageBackend::InMemory => Arc::new(InMemory::new()),
            StorageBackend::LocalFileSystem { root } => Arc::new(
                LocalFileSystem::new_with_prefix(root).map_err(|e| AppError::Configuration {
                    message: format!("Invalid local storage root '{}': {}", root, e),
                })?,
            ),
            StorageBackend::S3 {
                bucket,
                region,
                endpoint,
                access_key,
                secret_key,
            } => {
                let mut builder = AmazonS3Builder::from_env()
                    .with_bucket_name(bucket.clone())
                    .with_region(region.clone());

                if let Some(endpoint) = endpoint {
                    builder = builder.with_endpoint(endpoint.clone());
                }
                if let Some(access_key) = access_key {
                    builder = builder.with_access_key_id(access_key.clone());
                }
                if let Some(secret_key) = secret_key {
                    builder = builder.with_secret_access_key(secret_key.clone());
                }

                Arc::new(builder.build().map_err(|e| AppError::Configuration {
                    message: format!("Invalid S3 configuration: {}", e),
                })?)
            }
        };

        Ok(Arc::new(ApacheObjectStoreAdapter::new(
            inner,
            self.config.public_base_url.clone(),
        )))
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors raised while assembling the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Create an application wired entirely to in-memory backends.
pub fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .build()
}

/// Create an application storing objects on the local filesystem.
pub fn create_local_app(
    root: impl Into<String>,
    public_base_url: impl Into<String>,
) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::LocalFileSystem { root: root.into() })
        .with_public_base_url(public_base_url)
        .build()
}

/// Create an application storing objects in S3.
pub fn create_s3_app(
    bucket: impl Into<String>,
    region: impl Into<String>,
    public_base_url: impl Into<String>,
) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::S3 {
            bucket: bucket.into(),
            region: region.into(),
            endpoint: None,
            access_key: None,
            secret_key: None,
        })
        .with_public_base_url(public_base_url)
        .build()
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use futures::StreamExt;
use image_registry::{
    progress_channel, AppBuilder, AppServices, PendingFile, RecordFields, RecordId,
    RecordService, StorageBackend,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "image-registry")]
#[command(about = "Image record service over an object store and a document store", long_about = None)]
struct Cli {
    /// Storage backend type (memory, local, s3)
    #[arg(long, env = "STORAGE_BACKEND", default_value = "memory")]
    storage_backend: String,

    /// Root directory for the local storage backend
    #[arg(long, env = "STORAGE_ROOT")]
    storage_root: Option<String>,

    /// S3 bucket name
    #[arg(long, env = "S3_BUCKET")]
    s3_bucket: Option<String>,

    /// S3 region
    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// S3 endpoint URL (for MinIO and compatible stores)
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY")]
    s3_secret_key: Option<String>,

    /// Base URL under which uploaded objects are reachable
    #[arg(long, env = "PUBLIC_BASE_URL", default_value = "https://storage.local")]
    public_base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the current record set (follow changes with --follow)
    List {
        /// Keep the subscription open and print every new snapshot
        #[arg(short, long)]
        follow: bool,
    },

    /// Print the current value of one record
    Get {
        /// Record id
        id: String,
    },

    /// Upload an image and create its record
    Save {
        /// Path of the image file to upload
        file: String,
        /// Image name (also determines the storage key)
        #[arg(long)]
        nombre_imagen: String,
        /// Date of birth
        #[arg(long, default_value = "")]
        fecha_nacimiento: String,
        /// Emergency phone
        #[arg(long, default_value = "")]
        tlf_emergencia: String,
        /// Identity number
        #[arg(long, default_value = "")]
        cedula: String,
    },

    /// Delete a record and its stored object
    Delete {
        /// Record id
        id: String,
        /// Image name (locates the stored object)
        image_name: String,
    },

    /// Update the metadata fields of a record
    Update {
        /// Record id
        id: String,
        #[arg(long)]
        nombre_imagen: String,
        #[arg(long, default_value = "")]
        fecha_nacimiento: String,
        #[arg(long, default_value = "")]
        tlf_emergencia: String,
        #[arg(long, default_value = "")]
        cedula: String,
    },
}

impl Cli {
    fn storage_backend(&self) -> Result<StorageBackend> {
        match self.storage_backend.as_str() {
            "memory" => Ok(StorageBackend::InMemory),
            "local" => {
                let root = self
                    .storage_root
                    .clone()
                    .context("--storage-root is required for the local backend")?;
                Ok(StorageBackend::LocalFileSystem { root })
            }
            "s3" => Ok(StorageBackend::S3 {
                bucket: self
                    .s3_bucket
                    .clone()
                    .context("--s3-bucket is required for the s3 backend")?,
                region: self.s3_region.clone(),
                endpoint: self.s3_endpoint.clone(),
                access_key: self.s3_access_key.clone(),
                secret_key: self.s3_secret_key.clone(),
            }),
            other => anyhow::bail!("Unknown storage backend: {}", other),
        }
    }

    fn build_app(&self) -> Result<AppServices> {
        let services = AppBuilder::new()
            .with_storage_backend(self.storage_backend()?)
            .with_public_base_url(self.public_base_url.clone())
            .build()
            .context("Failed to build application")?;
        Ok(services)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let services = cli.build_app()?;
    let service = services.record_service;

    match cli.command {
        Commands::List { follow } => {
            let mut records = service.list();
            while let Some(snapshot) = records.next().await {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                if !follow {
                    break;
                }
            }
        }

        Commands::Get { id } => {
            let id = RecordId::new(id).context("Invalid record id")?;
            let mut record = service.get(&id);
            match record.next().await.flatten() {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => println!("null"),
            }
        }

        Commands::Save {
            file,
            nombre_imagen,
            fecha_nacimiento,
            tlf_emergencia,
            cedula,
        } => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read '{}'", file))?;

            let (progress_tx, mut progress_rx) = progress_channel();
            let reporter = tokio::spawn(async move {
                while progress_rx.changed().await.is_ok() {
                    let progress = *progress_rx.borrow();
                    info!(percent = progress.percent(), "upload progress");
                }
            });

            let record = service
                .save(
                    PendingFile::new(data),
                    RecordFields {
                        nombre_imagen,
                        fecha_nacimiento,
                        tlf_emergencia,
                        cedula,
                    },
                    Some(progress_tx),
                )
                .await?;

            reporter.await.ok();
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::Delete { id, image_name } => {
            let id = RecordId::new(id).context("Invalid record id")?;
            service.delete(&id, &image_name).await?;
            info!(%id, "record deleted");
        }

        Commands::Update {
            id,
            nombre_imagen,
            fecha_nacimiento,
            tlf_emergencia,
            cedula,
        } => {
            let id = RecordId::new(id).context("Invalid record id")?;
            service
                .update(
                    &id,
                    RecordFields {
                        nombre_imagen,
                        fecha_nacimiento,
                        tlf_emergencia,
                        cedula,
                    },
                )
                .await?;
            info!(%id, "record updated");
        }
    }

    Ok(())
}

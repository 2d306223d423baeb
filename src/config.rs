use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub bucket: String,
    pub region: String,
    pub s3_endpoint: Option<String>,
    pub url_ttl_secs: u64,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Minimal image-hosting service")]
pub struct Args {
    /// Host to bind to (overrides PICSTASH_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides PICSTASH_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides PICSTASH_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Bucket holding image payloads (overrides PICSTASH_BUCKET)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Bucket region (overrides PICSTASH_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Custom S3 endpoint for MinIO/LocalStack (overrides PICSTASH_S3_ENDPOINT)
    #[arg(long)]
    pub s3_endpoint: Option<String>,

    /// Signed read URL lifetime in seconds (overrides PICSTASH_URL_TTL_SECS)
    #[arg(long)]
    pub url_ttl_secs: Option<u64>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("PICSTASH_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("PICSTASH_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing PICSTASH_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 8000,
            Err(err) => return Err(err).context("reading PICSTASH_PORT"),
        };
        let env_db = env::var("PICSTASH_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/picstash.db".into());
        let env_bucket = env::var("PICSTASH_BUCKET").ok();
        let env_region = env::var("PICSTASH_REGION").unwrap_or_else(|_| "us-east-1".into());
        let env_endpoint = env::var("PICSTASH_S3_ENDPOINT").ok();
        let env_ttl = match env::var("PICSTASH_URL_TTL_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .with_context(|| format!("parsing PICSTASH_URL_TTL_SECS value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3600,
            Err(err) => return Err(err).context("reading PICSTASH_URL_TTL_SECS"),
        };

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            bucket: args
                .bucket
                .or(env_bucket)
                .context("PICSTASH_BUCKET (or --bucket) must be set")?,
            region: args.region.unwrap_or(env_region),
            s3_endpoint: args.s3_endpoint.or(env_endpoint),
            url_ttl_secs: args.url_ttl_secs.unwrap_or(env_ttl),
        };

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

use anyhow::Result;
use aws_config::SdkConfig;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::Client;

use crate::config::StorageConfig;

pub async fn create_client(config: &StorageConfig, verbose: bool) -> Result<Client> {
    if verbose {
        println!("🔧 Creating S3 client for bucket {}", config.bucket);
        println!("  Endpoint: {}", config.endpoint);
    }

    let credentials = Credentials::new(
        config.access_key.clone(),
        config.secret_key.clone(),
        None,
        None,
        "r2-purge",
    );

    let sdk_config: SdkConfig = aws_config::ConfigLoader::default()
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(&config.endpoint)
        .load()
        .await;

    // R2 does not serve virtual-hosted bucket subdomains on the account endpoint.
    let client_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .behavior_version_latest()
        .force_path_style(true)
        .build();

    Ok(Client::from_conf(client_config))
}

use anyhow::{bail, Context, Result};
use std::env;

pub const DEFAULT_KEEP: usize = 3;
const DEFAULT_REGION: &str = "auto";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub endpoint: String,
    pub prefix: Option<String>,
}

impl StorageConfig {
    pub fn load_from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        Self::load(cli, |name| env::var(name).ok())
    }

    pub fn load<F>(cli: &crate::cli::Cli, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_value = |cli_value: &Option<String>, env_var: &str| -> Option<String> {
            cli_value
                .clone()
                .or_else(|| lookup(env_var))
                .filter(|value| !value.is_empty())
        };

        let Some(bucket) = get_value(&cli.bucket, "STORAGE_BUCKET") else {
            bail!("Bucket name must be provided via --bucket or STORAGE_BUCKET");
        };
        let access_key = get_value(&cli.access_key, "STORAGE_ACCESS_KEY");
        let secret_key = get_value(&cli.secret_key, "STORAGE_SECRET_KEY");
        let (Some(access_key), Some(secret_key)) = (access_key, secret_key) else {
            bail!("Access key and secret key must be provided via parameters or environment variables");
        };

        let endpoint = match get_value(&cli.endpoint, "STORAGE_URL") {
            Some(endpoint) => endpoint,
            None => match get_value(&cli.account_id, "STORAGE_ACCOUNT_ID") {
                Some(account_id) => r2_endpoint(&account_id),
                None => bail!(
                    "Either an endpoint (--endpoint / STORAGE_URL) or an account id (--account-id / STORAGE_ACCOUNT_ID) is required"
                ),
            },
        };

        let region =
            get_value(&cli.region, "STORAGE_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let prefix = get_value(&cli.prefix, "STORAGE_PREFIX");

        Ok(StorageConfig {
            bucket,
            region,
            access_key,
            secret_key,
            endpoint,
            prefix,
        })
    }
}

pub fn r2_endpoint(account_id: &str) -> String {
    format!("https://{}.r2.cloudflarestorage.com", account_id)
}

/// Resolves the retain-count: the `--keep` flag, then `STORAGE_KEEP`, then [`DEFAULT_KEEP`].
pub fn resolve_keep<F>(cli_value: Option<usize>, lookup: F) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(keep) = cli_value {
        return Ok(keep);
    }
    match lookup("STORAGE_KEEP") {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("STORAGE_KEEP must be a non-negative integer, got {:?}", raw)),
        _ => Ok(DEFAULT_KEEP),
    }
}

pub fn env_keep(cli_value: Option<usize>) -> Result<usize> {
    resolve_keep(cli_value, |name| env::var(name).ok())
}

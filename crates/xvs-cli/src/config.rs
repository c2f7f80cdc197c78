use std::path::PathBuf;

use serde::Serialize;
use xvs_client::ClientConfig;
use xvs_protocol::Credentials;
use xvs_types::MergeStrategy;

use crate::cli::Cli;
use crate::error::{SyncError, SyncResult};

/// Settings for one run, built once from the command line and passed down.
#[derive(Clone, Debug, Serialize)]
pub struct SyncConfig {
    /// Job template IDs, in the order they are processed.
    pub ids: Vec<String>,
    pub client: ClientConfig,
    pub file: PathBuf,
    pub strategy: MergeStrategy,
    pub confirm: bool,
    pub verbosity: u8,
}

impl SyncConfig {
    /// Validate the command line. Nothing here touches the network.
    pub fn from_cli(cli: &Cli) -> SyncResult<Self> {
        let strategy: MergeStrategy = cli
            .strategy
            .parse()
            .map_err(|e: xvs_types::TypesError| SyncError::Usage(e.to_string()))?;

        let file = match &cli.file {
            Some(path) if !path.as_os_str().is_empty() => path.clone(),
            _ => return Err(SyncError::Usage("no input file given (-f/--file)".into())),
        };

        let ids = parse_ids(cli.ids.as_deref().unwrap_or_default())?;

        Ok(Self {
            ids,
            client: ClientConfig {
                base_url: cli.host.clone(),
                credentials: Credentials::new(&cli.username, &cli.password),
                insecure: cli.insecure,
                ..ClientConfig::default()
            },
            file,
            strategy,
            confirm: cli.confirm,
            verbosity: cli.verbosity,
        })
    }
}

/// Split a comma-separated list of job template IDs.
///
/// Whitespace around each ID is ignored. Empty entries are rejected, as are
/// IDs that would not form a single path segment.
pub fn parse_ids(list: &str) -> SyncResult<Vec<String>> {
    if list.trim().is_empty() {
        return Err(SyncError::Usage(
            "at least one job template id must be given (-i/--ids)".into(),
        ));
    }
    list.split(',')
        .map(str::trim)
        .map(|id| {
            if id.is_empty() {
                Err(SyncError::Usage(format!("empty job template id in '{list}'")))
            } else if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
                Err(SyncError::Usage(format!("invalid job template id '{id}'")))
            } else {
                Ok(id.to_string())
            }
        })
        .collect()
}

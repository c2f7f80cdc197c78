use std::path::PathBuf;

use clap::{ArgAction, Parser};
use xvs_client::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(
    name = "xvsync",
    about = "Sync job template extra_vars with a local YAML file",
    version,
)]
pub struct Cli {
    /// Job template IDs, separated by commas
    #[arg(short = 'i', long = "ids", value_name = "ID[,ID...]")]
    pub ids: Option<String>,

    /// Base URL of the server
    #[arg(short = 'H', long, default_value = DEFAULT_BASE_URL)]
    pub host: String,

    #[arg(short, long, default_value = "")]
    pub username: String,

    #[arg(short, long, default_value = "", hide_default_value = true)]
    pub password: String,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long)]
    pub insecure: bool,

    /// YAML file applied to each job template's extra_vars
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Merge strategy: append (add missing keys), update (overwrite keys
    /// present on both sides), replace (make extra_vars equal the file),
    /// delete (remove every key listed in the file)
    #[arg(short, long, default_value = "update")]
    pub strategy: String,

    /// 0 = error, 1 = warn, 2 = info, 3 = debug
    #[arg(short, long, default_value_t = 1)]
    pub verbosity: u8,

    /// Write the merged extra_vars back; pass `false` to only show changes
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub confirm: bool,
}

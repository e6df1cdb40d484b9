use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "evaltrack-service")]
#[command(about = "Client evaluation request tracking service", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Override HTTP listen address
    #[arg(short, long)]
    pub listen_addr: Option<String>,

    /// Log filters (e.g. "info", "debug", "evaltrack_core=trace")
    #[arg(long, default_value = "info")]
    pub log_filters: String,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Push CLI overrides into the environment so the figment layer picks
    /// them up above the TOML file.
    pub fn apply_to_env(&self) {
        if let Some(data_dir) = &self.data_dir {
            std::env::set_var("EVALTRACK_SERVICE__DATA_DIR", data_dir);
        }
        if let Some(listen_addr) = &self.listen_addr {
            std::env::set_var("EVALTRACK_SERVICE__LISTEN_ADDR", listen_addr);
        }
    }
}

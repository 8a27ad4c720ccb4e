use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug, Default)]
#[command(name = "pest-detection-api")]
#[command(about = "Pest detection platform HTTP API")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Address to bind (overrides SERVER_HOST)")]
    pub host: Option<String>,

    #[arg(long, short, help = "Port to listen on (overrides SERVER_PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Require a bearer token on detection, job and device routes")]
    pub require_auth: bool,
}

impl Cli {
    /// Command-line flags win over environment and preset values
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.require_auth {
            config.security.require_auth = true;
        }
    }
}

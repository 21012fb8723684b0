use clap::Parser;
use tracing_subscriber::EnvFilter;

use wprompt_core::{CacheStore, Options, Pipeline, WundergroundClient};

/// Current weather as a short emoji string, for status bars and prompts.
#[derive(Debug, Parser)]
#[command(name = "wprompt", version, about = "Weather emoji for your status bar")]
pub struct Cli {
    /// Minutes to wait before checking again (cached result is reused).
    #[arg(short = 'w', long = "wait", value_name = "MINUTES", default_value_t = 10)]
    pub wait: i64,

    /// Verbose diagnostics on stderr.
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// API key for api.wunderground.com.
    #[arg(short = 'k', long = "key", value_name = "KEY", required = true)]
    pub key: String,

    /// Force a zip code (skip the IP geolocation lookup).
    #[arg(short = 'z', long = "zip", value_name = "ZIP")]
    pub zip: Option<String>,

    /// Force a lookup even if the cached result is still fresh.
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Include the phase of the moon (shown only at night).
    #[arg(short = 'm', long = "moon")]
    pub moon: bool,

    /// Show the temperature in Fahrenheit.
    #[arg(short = 't', long = "temp")]
    pub temp: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        init_logging(self.debug);

        let options = Options {
            wait_minutes: self.wait,
            zip: self.zip,
            force: self.force,
            show_moon: self.moon,
            show_temp: self.temp,
        };
        tracing::debug!(?options, "parsed options");

        let store = CacheStore::default_path()?;
        let client = WundergroundClient::new(self.key)?;
        let line = Pipeline::new(store, client).run(&options).await?;

        // stdout carries only the emoji line; everything else goes to stderr.
        println!("{line}");
        Ok(())
    }
}

/// Logs go to stderr so stdout stays a clean single line. `-d` raises the
/// filter to debug; RUST_LOG still overrides either default.
fn init_logging(debug: bool) {
    let default_filter = if debug { "wprompt=debug,wprompt_core=debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_flags() {
        let cli = Cli::parse_from(["wprompt", "-k", "KEY"]);
        assert_eq!(cli.wait, 10);
        assert_eq!(cli.key, "KEY");
        assert!(cli.zip.is_none());
        assert!(!cli.debug);
        assert!(!cli.force);
        assert!(!cli.moon);
        assert!(!cli.temp);
    }

    #[test]
    fn short_flags_parse() {
        let cli =
            Cli::parse_from(["wprompt", "-w", "30", "-k", "KEY", "-z", "98101", "-f", "-m", "-t"]);
        assert_eq!(cli.wait, 30);
        assert_eq!(cli.zip.as_deref(), Some("98101"));
        assert!(cli.force);
        assert!(cli.moon);
        assert!(cli.temp);
    }

    #[test]
    fn api_key_is_required() {
        assert!(Cli::try_parse_from(["wprompt"]).is_err());
    }
}

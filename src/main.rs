use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use cick_playlister::{
    config, debug, error, logging, provider::Provider, server, spotify::SpotifyProvider, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
  args_conflicts_with_subcommands = true // serve flags make no sense with `completions`
)]
struct Cli {
    #[clap(flatten)]
    serve: ServeOptions,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Port the server listens on
    #[clap(long, default_value_t = config::DEFAULT_PORT)]
    pub server_port: u16,

    /// Log level (panic | fatal | error | warning | info | debug | trace)
    #[clap(long, default_value = config::DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Releases younger than this many days are flagged as new
    #[clap(long, default_value_t = config::DEFAULT_NEW_RELEASE_DAYS)]
    pub new_release_days: u32,

    /// Path to credentials.json (defaults to the file next to the executable)
    #[clap(long)]
    pub credentials: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Command::Completions(opt)) = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let opt = cli.serve;
    logging::init(&opt.log_level);
    debug!("Server port {}", opt.server_port);

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let credentials = match config::load_credentials(opt.credentials).await {
        Ok(credentials) => credentials,
        Err(e) => error!("Cannot load credentials. Err: {}", e),
    };

    let providers: Vec<Arc<dyn Provider>> = vec![Arc::new(SpotifyProvider::new(
        credentials.spotify,
        opt.new_release_days,
    ))];

    if let Err(e) = server::start_api_server(opt.server_port, providers).await {
        error!("Server failed. Err: {}", e);
    }
}

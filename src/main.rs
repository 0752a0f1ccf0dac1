use std::path::PathBuf;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use yandex2spotify::{
    config::{self, Category, RunMode, Settings},
    error,
    errors::ImportError,
    importer::Importer,
    spotify::{self, SpotifyClient},
    types::ClientCredentials,
    yandex::YandexClient,
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
  args_conflicts_with_subcommands = true,
  subcommand_negates_reqs = true,
)]
struct Cli {
    /// Username at spotify.com
    #[clap(short = 'u', short_alias = 's', long = "spotify", required = true)]
    spotify: Option<String>,

    /// Client ID of your Spotify app
    #[clap(long = "id", required = true)]
    client_id: Option<String>,

    /// Client Secret of your Spotify app
    #[clap(long = "secret", required = true)]
    client_secret: Option<String>,

    /// Token from music.yandex.com account
    #[clap(short = 't', long)]
    token: Option<String>,

    /// Don't import some items
    #[clap(
        short = 'i',
        long,
        value_enum,
        action = ArgAction::Append,
        num_args = 1..,
    )]
    ignore: Vec<Category>,

    /// Request timeout for spotify, in seconds
    #[clap(short = 'T', long, default_value_t = 10.0)]
    timeout: f64,

    /// Search for an exact match of all artists
    #[clap(short = 'S', long = "strict-artists-search")]
    strict_artists_search: bool,

    /// JSON file to import tracks from
    #[clap(short = 'j', long = "json-path")]
    json_path: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

async fn run(cli: Cli) -> Result<(), ImportError> {
    // validated before any request is made
    let mode = RunMode::from_options(cli.token, cli.json_path)?;
    let settings = Settings::new(cli.ignore, cli.strict_artists_search, cli.timeout)?;

    let (Some(user), Some(client_id), Some(client_secret)) =
        (cli.spotify, cli.client_id, cli.client_secret)
    else {
        return Err(ImportError::Config(
            "--spotify, --id and --secret are required".to_string(),
        ));
    };

    let credentials = ClientCredentials {
        client_id,
        client_secret,
    };
    let token_mgr = spotify::auth::authorize(&user, credentials).await?;
    let destination = SpotifyClient::new(token_mgr, settings.timeout)?;
    let timeout = settings.timeout;

    let mut importer = Importer::new(&destination, settings).await?;
    match mode {
        RunMode::Json { path } => importer.import_from_json(&path).await,
        RunMode::Library { token } => {
            let source = YandexClient::connect(&token, timeout).await?;
            importer.import_all(&source).await
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Some(Command::Completions(opt)) = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = run(cli).await {
        error!("An unexpected error occurred: {}", e);
    }
}

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tunefetch::{
    Res, cli, config, error,
    music::MusicService,
    types::Source,
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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve a Spotify, Deezer or Apple Music link to a search query
    Resolve(ResolveOptions),

    /// Search songs by text or platform link
    Search(SearchOptions),

    /// Fetch a catalog song by id
    Song(SongOptions),

    /// Search YouTube directly
    Youtube(SearchOptions),

    /// Search SoundCloud directly
    Soundcloud(SearchOptions),

    /// Extract a fresh stream URL from a YouTube or SoundCloud page URL
    Refresh(RefreshOptions),

    /// Print the download URL of a catalog song for a quality tier
    Quality(QualityOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveOptions {
    /// Platform track link
    pub url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search text or platform link
    pub query: String,

    /// Maximum number of results
    #[clap(long, default_value_t = 7)]
    pub limit: u32,

    /// Print results as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SongOptions {
    /// Catalog song id
    pub id: String,

    /// Print the song as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RefreshOptions {
    /// Permanent page URL
    pub webpage_url: String,

    /// Print the refreshed song as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct QualityOptions {
    /// Catalog song id
    pub id: String,

    /// Quality tier (96kbps, 160kbps, 320kbps)
    #[clap(default_value = "320kbps")]
    pub quality: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = run(cli.command).await {
        error!("{}", e);
    }
}

async fn run(command: Command) -> Res<()> {
    let service = MusicService::from_config(config::MusicConfig::from_env())
        .map_err(|e| format!("Cannot build HTTP client. Err: {}", e))?;

    match command {
        Command::Resolve(opt) => cli::resolve(&service, &opt.url).await,
        Command::Search(opt) => cli::search(&service, &opt.query, opt.limit, opt.json).await,
        Command::Song(opt) => cli::song(&service, &opt.id, opt.json).await,
        Command::Youtube(opt) => {
            cli::media_search(&service, Source::Youtube, &opt.query, opt.limit, opt.json).await
        }
        Command::Soundcloud(opt) => {
            cli::media_search(&service, Source::Soundcloud, &opt.query, opt.limit, opt.json).await
        }
        Command::Refresh(opt) => cli::refresh(&service, &opt.webpage_url, opt.json).await,
        Command::Quality(opt) => cli::quality(&service, &opt.id, &opt.quality).await,
        Command::Completions(_) => Ok(()),
    }
}

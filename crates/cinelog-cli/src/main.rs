use cinelog_config::{Config, PathManager};
use cinelog_models::{EntryId, Rating};
use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::Context;
use commands::{browse, config, delete, edit, list, record, show, Session};

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "cinelog")]
#[command(about = "Cinelog - keep a personal log of the movies and dramas you've watched")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Backend base URL (overrides CINELOG_BACKEND_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every recorded movie
    List,
    /// Show one movie in full
    Show {
        /// Entry identifier
        id: EntryId,
    },
    /// Record a newly watched movie
    #[command(long_about = "Record a newly watched movie. Pass fields as flags, or use --interactive to be prompted for each one. Only the title is required; the rating defaults to three stars unless --rating or --no-rating is given.")]
    Record(RecordArgs),
    /// Edit a recorded movie
    #[command(long_about = "Edit a recorded movie. The whole entry is sent back to the backend on save; the poster cannot be changed here.")]
    Edit {
        /// Entry identifier
        id: EntryId,

        /// Set a field, e.g. --set country=Canada (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// New rating (0-5 in half steps)
        #[arg(long, conflicts_with = "no_rating")]
        rating: Option<Rating>,

        /// Clear the rating
        #[arg(long, action = ArgAction::SetTrue)]
        no_rating: bool,

        /// Prompt for every field, starting from the current values
        #[arg(short, long, action = ArgAction::SetTrue)]
        interactive: bool,
    },
    /// Delete a recorded movie
    Delete {
        /// Entry identifier
        id: EntryId,

        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Browse the log interactively
    Browse,
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Args)]
struct RecordArgs {
    #[arg(long)]
    title: Option<String>,

    /// Comma separated, e.g. "SF, Drama"
    #[arg(long)]
    genres: Option<String>,

    #[arg(long)]
    director: Option<String>,

    /// Comma separated
    #[arg(long)]
    actors: Option<String>,

    #[arg(long, value_name = "YEAR")]
    release_year: Option<String>,

    #[arg(long)]
    country: Option<String>,

    /// YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    watched_date: Option<String>,

    /// Where or how you watched it (theater, streaming, ...)
    #[arg(long)]
    watch_method: Option<String>,

    #[arg(long)]
    impressions: Option<String>,

    /// Rating (0-5 in half steps)
    #[arg(long, conflicts_with = "no_rating")]
    rating: Option<Rating>,

    /// Record without a rating
    #[arg(long, action = ArgAction::SetTrue)]
    no_rating: bool,

    /// Poster image (JPEG or PNG)
    #[arg(long, value_name = "PATH")]
    poster: Option<std::path::PathBuf>,

    /// Prompt for every field
    #[arg(short, long, action = ArgAction::SetTrue)]
    interactive: bool,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Store the backend base URL in the config file
    SetBackend {
        /// e.g. http://localhost:8000
        url: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let mut config = Config::load_or_default(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))
        .wrap_err_with(|| format!("Failed to load config from {}", paths.config_file().display()))?;

    logging::init_logging_with_file(cli.verbose, cli.quiet, config.logging.file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    config.apply_env();
    config.override_backend_url(cli.backend_url);

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::List => list::run_list(&Session::connect(config)?, &output).await,
        Commands::Show { id } => show::run_show(&Session::connect(config)?, id, &output).await,
        Commands::Record(args) => record::run_record(&Session::connect(config)?, args, &output).await,
        Commands::Edit { id, set, rating, no_rating, interactive } => {
            let rating = edit::rating_change(rating, no_rating);
            edit::run_edit(&Session::connect(config)?, id, set, rating, interactive, &output).await
        }
        Commands::Delete { id, yes } => delete::run_delete(&Session::connect(config)?, id, yes, &output).await,
        Commands::Browse => browse::run_browse(&Session::connect(config)?, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &paths, &config, &output),
    }
}

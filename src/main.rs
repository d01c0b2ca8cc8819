use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use moodmix::generator::DEFAULT_PLAYLIST_SIZE;
use moodmix::{AppError, Config, HistoryStore, MoodTags, PlaylistGenerator, QueryRecord, Track};

#[derive(Parser)]
#[command(name = "moodmix")]
#[command(about = "Turn a free-text mood into a Jamendo playlist")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a playlist from a mood description
    Generate {
        /// How you feel, what you're doing, what the weather is like
        text: String,

        /// Maximum number of tracks (or set MOODMIX_PLAYLIST_SIZE env var)
        #[arg(short, long, env = "MOODMIX_PLAYLIST_SIZE", default_value_t = DEFAULT_PLAYLIST_SIZE)]
        limit: usize,

        /// Don't record the query in the history file
        #[arg(long)]
        no_save: bool,
    },

    /// Show the tags extracted from a mood description
    Tags {
        text: String,
    },

    /// Search the catalog directly with tags
    Search {
        #[arg(long = "genre")]
        genres: Vec<String>,

        #[arg(long = "mood")]
        moods: Vec<String>,

        #[arg(long = "keyword")]
        keywords: Vec<String>,

        /// Maximum number of tracks
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// List saved queries
    History,

    /// Show a saved query with its tracks
    Show {
        id: u64,
    },

    /// Delete a saved query
    Delete {
        id: u64,
    },

    /// Show setup guide
    Setup,
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Generate {
            text,
            limit,
            no_save,
        } => {
            generate(&config, &text, limit, !no_save).await?;
        }
        Commands::Tags { text } => {
            show_tags(&config, &text).await?;
        }
        Commands::Search {
            genres,
            moods,
            keywords,
            limit,
        } => {
            search(&config, MoodTags { genres, moods, keywords }, limit).await?;
        }
        Commands::History => {
            list_history(&config)?;
        }
        Commands::Show { id } => {
            show_query(&config, id)?;
        }
        Commands::Delete { id } => {
            HistoryStore::new(&config.history_file)
                .delete(id)
                .with_context(|| format!("Failed to delete query {}", id))?;
            println!("{}", format!("Query {} deleted", id).green());
        }
        Commands::Setup => {
            show_setup_guide();
        }
    }

    Ok(())
}

fn require_config(missing: Vec<String>) {
    if missing.is_empty() {
        return;
    }
    println!("{}", "Missing configuration:".red());
    for item in &missing {
        println!("   - {}", item);
    }
    println!(
        "\n{}",
        "Run `moodmix setup` to see how to get the credentials.".yellow()
    );
    std::process::exit(1);
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn generate(config: &Config, text: &str, limit: usize, save: bool) -> Result<()> {
    println!("{}", "Mood Playlist Generator".cyan().bold());
    println!("{}", "=".repeat(50));

    require_config(config.get_missing_config());

    let generator =
        PlaylistGenerator::from_config(config).context("Failed to initialize generator")?;

    let pb = spinner("Reading the mood...");
    let result = generator.generate(text, limit).await;
    pb.finish_and_clear();

    let playlist = match result {
        Ok(playlist) => playlist,
        Err(AppError::EmptyResult) => {
            println!("{}", "No tracks found for the given mood".yellow());
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Failed to generate playlist"),
    };

    print_tags(&playlist.tags);
    print_tracks(&playlist.tracks);

    if save {
        let record = HistoryStore::new(&config.history_file)
            .record(&playlist.user_input, &playlist.tags, &playlist.tracks)
            .context("Failed to save query history")?;
        println!("\n{}", format!("Saved as query #{}", record.id).green());
    }

    Ok(())
}

async fn show_tags(config: &Config, text: &str) -> Result<()> {
    let mut missing = Vec::new();
    if !config.validate_gemini_config() {
        missing.push("GEMINI_API_KEY".to_string());
    }
    require_config(missing);

    let generator =
        PlaylistGenerator::from_config(config).context("Failed to initialize generator")?;

    let pb = spinner("Reading the mood...");
    let tags = generator.extract_tags(text).await;
    pb.finish_and_clear();

    print_tags(&tags.context("Failed to extract tags")?);
    Ok(())
}

async fn search(config: &Config, tags: MoodTags, limit: usize) -> Result<()> {
    let mut missing = Vec::new();
    if !config.validate_jamendo_config() {
        missing.push("JAMENDO_CLIENT_ID".to_string());
    }
    require_config(missing);

    let generator =
        PlaylistGenerator::from_config(config).context("Failed to initialize generator")?;

    let pb = spinner("Searching Jamendo...");
    let tracks = generator.resolver().resolve_tags(&tags, limit).await;
    pb.finish_and_clear();

    if tracks.is_empty() {
        println!("{}", "No tracks found".yellow());
        return Ok(());
    }

    print_tracks(&tracks);
    Ok(())
}

fn list_history(config: &Config) -> Result<()> {
    println!("{}", "Saved Queries".cyan().bold());
    println!("{}", "=".repeat(50));

    let queries = HistoryStore::new(&config.history_file)
        .list()
        .context("Failed to read query history")?;

    if queries.is_empty() {
        println!("{}", "No saved queries".yellow());
        return Ok(());
    }

    for query in &queries {
        print_query_header(query);
    }

    println!("\n{}", format!("Total: {} queries", queries.len()).cyan());
    Ok(())
}

fn show_query(config: &Config, id: u64) -> Result<()> {
    let (query, tracks) = HistoryStore::new(&config.history_file)
        .get(id)
        .with_context(|| format!("Failed to load query {}", id))?;

    print_query_header(&query);
    print_tags(&query.generated_tags);
    print_tracks(&tracks);
    Ok(())
}

fn print_query_header(query: &QueryRecord) {
    println!(
        "#{:<4} {} {} ({} tracks)",
        query.id,
        query.created_at.format("%Y-%m-%d %H:%M").to_string().cyan(),
        query.user_input.green(),
        query.track_ids.len()
    );
}

fn print_tags(tags: &MoodTags) {
    println!("{} {}", "Genres:  ".bold(), tags.genres.join(", "));
    println!("{} {}", "Moods:   ".bold(), tags.moods.join(", "));
    println!("{} {}", "Keywords:".bold(), tags.keywords.join(", "));
}

fn print_tracks(tracks: &[Track]) {
    println!();
    for (i, track) in tracks.iter().enumerate() {
        println!(
            "{:2}. {} by {}",
            i + 1,
            track.title.green(),
            track.artist
        );
        println!("    Preview: {}", track.preview_url.cyan());
    }
    println!("\n{}", format!("Total: {} tracks", tracks.len()).cyan());
}

fn show_setup_guide() {
    println!("{}", "Mood Playlist Generator Setup Guide".cyan().bold());
    println!("{}", "=".repeat(50));

    println!("\n{}", "1. Gemini API Setup".yellow());
    println!("   - Go to https://aistudio.google.com/apikey");
    println!("   - Create an API key");

    println!("\n{}", "2. Jamendo API Setup".yellow());
    println!("   - Go to https://devportal.jamendo.com/");
    println!("   - Create a free account and register an application");
    println!("   - Copy your Client ID");

    println!("\n{}", "3. Configuration".yellow());
    println!("   - Create a .env file with:");
    println!("     GEMINI_API_KEY=your_gemini_api_key");
    println!("     JAMENDO_CLIENT_ID=your_jamendo_client_id");
    println!("   - Optional:");
    println!("     GEMINI_MODEL=gemini-3-flash-preview");
    println!("     MOODMIX_TIMEOUT_SECS=10");
    println!("     MOODMIX_HISTORY_FILE=moodmix_history.json");
    println!("     MOODMIX_PLAYLIST_SIZE=24");

    println!("\n{}", "4. Usage".yellow());
    println!("   - moodmix tags \"rainy sunday morning\"             (see extracted tags)");
    println!("   - moodmix search --genre jazz --mood chill        (query Jamendo directly)");
    println!("   - moodmix generate \"rainy sunday morning\"         (build a playlist)");
    println!("   - moodmix history                                 (list saved queries)");

    println!("\n{}", "Ready to mix!".green());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_limit_flag_overrides_default() {
        let cli = Cli::try_parse_from(["moodmix", "generate", "rainy day", "--limit", "5", "--no-save"])
            .unwrap();
        match cli.command {
            Commands::Generate {
                text,
                limit,
                no_save,
            } => {
                assert_eq!(text, "rainy day");
                assert_eq!(limit, 5);
                assert!(no_save);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_limit_reads_from_environment() {
        let limit = Cli::command()
            .find_subcommand("generate")
            .and_then(|cmd| cmd.get_arguments().find(|arg| arg.get_id() == "limit"))
            .and_then(|arg| arg.get_env())
            .map(|env| env.to_os_string());
        assert_eq!(limit, Some("MOODMIX_PLAYLIST_SIZE".into()));
    }

    #[test]
    fn test_search_collects_repeated_tags() {
        let cli = Cli::try_parse_from([
            "moodmix", "search", "--genre", "jazz", "--mood", "chill", "--mood", "calm",
        ])
        .unwrap();
        match cli.command {
            Commands::Search {
                genres,
                moods,
                keywords,
                limit,
            } => {
                assert_eq!(genres, vec!["jazz"]);
                assert_eq!(moods, vec!["chill", "calm"]);
                assert!(keywords.is_empty());
                assert_eq!(limit, 10);
            }
            _ => panic!("expected search"),
        }
    }
}

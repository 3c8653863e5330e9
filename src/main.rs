//! Moviestore CLI - Command-line interface for the local movie catalog

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use moviestore::config::{self, MovieStoreConfig};
use moviestore::storage::{ImportPolicy, MovieStore, SchemaStatus};
use moviestore::ui::{self, Icons};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "moviestore")]
#[command(version)]
#[command(about = "Local SQLite-backed movie catalog")]
#[command(long_about = r#"
Moviestore keeps a catalog of movies in a single SQLite file.

Example usage:
  moviestore init
  moviestore import --file movies.tsv
  moviestore list
  moviestore update --id 3 --watched true --likes 5
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the storage file and schema if missing
    Init,

    /// Import tab-delimited seed data
    Import {
        /// Seed file (defaults to `seed` from the config file)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Behaviour when an insert fails (defaults to `import_policy` from the config file)
        #[arg(short, long, value_enum)]
        policy: Option<ImportPolicy>,
    },

    /// List all movies ordered by year
    List {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a single movie
    Show {
        /// Movie id
        #[arg(short, long)]
        id: i64,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Set the watch state and like count of a movie
    Update {
        /// Movie id
        #[arg(short, long)]
        id: i64,

        #[arg(short, long, action = ArgAction::Set)]
        watched: bool,

        #[arg(short, long)]
        likes: i64,
    },

    /// Delete a movie
    Delete {
        /// Movie id
        #[arg(short, long)]
        id: i64,
    },

    /// Show statistics about the catalog
    Stats {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a config file with the resolved defaults
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let loaded = config::load_config(Some(&config_path))?;
    let base = std::env::current_dir()?;
    let database = config::resolve_database_path(cli.database.as_deref(), loaded.as_ref(), &base);

    match cli.command {
        Commands::Init => {
            let store = MovieStore::new(&database);
            match store.initialize_schema()? {
                SchemaStatus::Created => {
                    ui::success(&format!("Created movie store at {}", database.display()))
                }
                SchemaStatus::AlreadyPresent => {
                    ui::info("Movie store already exists", &database.display().to_string())
                }
            }
        }

        Commands::Import { file, policy } => {
            let policy = policy
                .or_else(|| loaded.as_ref().and_then(|c| c.import_policy))
                .unwrap_or_default();
            let seed_path = match file {
                Some(path) => path,
                None => match loaded.as_ref().and_then(|c| c.seed.as_deref()) {
                    Some(seed) => PathBuf::from(seed),
                    None => anyhow::bail!("no seed file given (use --file or set `seed` in the config)"),
                },
            };

            let store = MovieStore::open(&database)?.with_policy(policy);
            ui::header(&format!("Importing {}", seed_path.display()));
            ui::info(Icons::DATABASE, &database.display().to_string());
            ui::info("Import policy", store.policy().as_str());

            let spinner = ui::Spinner::new("Inserting movies");
            let result = store.import_seed_file(&seed_path);
            spinner.finish_and_clear();
            let report = result?;

            ui::success(&format!("Imported {} movies", report.inserted));
            if report.skipped > 0 {
                ui::warn(&format!("Skipped {} malformed rows", report.skipped));
            }
        }

        Commands::List { format } => {
            let store = MovieStore::open(&database)?;
            let movies = store.load_all()?;

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&movies)?);
            } else if movies.is_empty() {
                println!("{} No movies in the catalog.", Icons::EMPTY);
            } else {
                println!("{}", ui::movies_table(&movies));
            }
        }

        Commands::Show { id, format } => {
            let store = MovieStore::open(&database)?;
            let mut shown = Ok(());
            store.load_movie_with(id, |movie| {
                shown = match (format, movie) {
                    (OutputFormat::Json, movie) => serde_json::to_string_pretty(&movie)
                        .map(|json| println!("{}", json)),
                    (OutputFormat::Text, Some(movie)) => {
                        ui::movie_line(&movie);
                        Ok(())
                    }
                    (OutputFormat::Text, None) => {
                        println!("{} No movie with id {}.", Icons::EMPTY, id);
                        Ok(())
                    }
                };
            })?;
            shown?;
        }

        Commands::Update { id, watched, likes } => {
            let store = MovieStore::open(&database)?;
            let changed = store.update_movie(id, watched, likes)?;
            if changed == 0 {
                ui::warn(&format!("No movie with id {}, nothing updated", id));
            } else {
                ui::success(&format!("Updated movie {} (watched: {}, likes: {})", id, watched, likes));
            }
        }

        Commands::Delete { id } => {
            let store = MovieStore::open(&database)?;
            let removed = store.delete_movie(id)?;
            if removed == 0 {
                ui::warn(&format!("No movie with id {}, nothing deleted", id));
            } else {
                ui::success(&format!("{} Deleted movie {}", Icons::DEL, id));
            }
        }

        Commands::Stats { format } => {
            let store = MovieStore::open(&database)?;
            let stats = store.stats()?;

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                ui::section(&format!("{} Catalog ({})", Icons::STATS, database.display()));
                println!(
                    "{}",
                    ui::stats_table(&[
                        ("Movies", stats.movies.to_string()),
                        ("Watched", stats.watched.to_string()),
                        ("Likes", stats.total_likes.to_string()),
                    ])
                );
            }
        }

        Commands::Config { command } => match command {
            ConfigCommand::Init { force } => {
                let config = MovieStoreConfig {
                    database: Some(database.display().to_string()),
                    import_policy: Some(ImportPolicy::default()),
                    seed: loaded.and_then(|c| c.seed),
                };
                write_config_file(&config_path, &config, force)?;
            }
        },
    }

    Ok(())
}

fn write_config_file(path: &Path, config: &MovieStoreConfig, force: bool) -> anyhow::Result<()> {
    config::write_config(path, config, force)?;
    ui::success(&format!("{} Wrote config to {}", Icons::PACKAGE, path.display()));
    Ok(())
}

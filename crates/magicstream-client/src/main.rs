// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

use magicstream_client::navigator::Navigator;
use magicstream_client::{config, MagicStreamClient};
use magicstream_core::{LoginRequest, Movie, RegisterRequest, ROLE_USER};

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "magicstream")]
#[command(about = "MagicStream API client", version)]
struct Args {
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// One line typed at the `shell` prompt.
#[derive(Parser, Debug)]
#[command(name = "magicstream", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all movies
    Movies,
    /// List genres
    Genres,
    /// Show one movie
    Movie { imdb_id: String },
    /// Movies recommended for the logged-in user
    Recommended,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Favorite genre id, repeatable
        #[arg(long = "genre")]
        genres: Vec<i64>,
    },
    Logout,
    /// Show the locally remembered user
    Whoami,
    /// Add a movie from a JSON file (admin)
    AddMovie { file: PathBuf },
    /// Replace the admin review of a movie (admin)
    UpdateReview { imdb_id: String, review: String },
    /// Run several commands in one session, one per line
    Shell,
}

struct CliNavigator;

impl Navigator for CliNavigator {
    fn redirect_to(&self, path: &str) {
        tracing::warn!("Session ended, redirecting to {}", path);
        eprintln!("Your session has expired. Run `login` to sign in again.");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "magicstream_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = config::Config::load(args.config)?;

    tracing::debug!("API: {}", config.api.base_url);
    tracing::debug!("Session file: {}", config.session.path.display());

    let client = MagicStreamClient::new(&config, Arc::new(CliNavigator))?;

    match args.command {
        Command::Shell => run_shell(&client).await,
        command => run_command(&client, command).await,
    }
}

async fn run_shell(client: &MagicStreamClient) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("magicstream> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let words = split_words(&line);
        match words.first().map(String::as_str) {
            None => continue,
            Some("exit") | Some("quit") => break,
            Some(_) => {}
        }

        match ShellLine::try_parse_from(words) {
            Ok(ShellLine {
                command: Command::Shell,
            }) => eprintln!("already in a shell"),
            Ok(parsed) => {
                if let Err(e) = run_command(client, parsed.command).await {
                    eprintln!("error: {}", e);
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}

async fn run_command(client: &MagicStreamClient, command: Command) -> anyhow::Result<()> {
    let movies = client.movies();
    let auth = client.auth();

    match command {
        Command::Movies => print_result(movies.all_movies().await),
        Command::Genres => print_result(movies.genres().await),
        Command::Movie { imdb_id } => print_result(movies.movie(&imdb_id).await),
        Command::Recommended => print_result(movies.recommended_movies().await),
        Command::Login { email, password } => {
            print_result(auth.login(&LoginRequest { email, password }).await)
        }
        Command::Register {
            email,
            password,
            first_name,
            last_name,
            genres,
        } => {
            let favorite_genres = if genres.is_empty() {
                Vec::new()
            } else {
                movies
                    .genres()
                    .await?
                    .into_iter()
                    .filter(|genre| genres.contains(&genre.genre_id))
                    .collect()
            };
            let request = RegisterRequest {
                first_name,
                last_name,
                email,
                password,
                role: ROLE_USER.to_string(),
                favorite_genres,
            };
            print_result(auth.register(&request).await)
        }
        Command::Logout => {
            auth.logout().await;
            Ok(())
        }
        Command::Whoami => match auth.current_user() {
            Some(user) => print_json(&user),
            None => {
                println!("not logged in");
                Ok(())
            }
        },
        Command::AddMovie { file } => {
            let content = std::fs::read_to_string(&file)?;
            let movie: Movie = serde_json::from_str(&content)?;
            print_result(movies.add_movie(&movie).await)
        }
        Command::UpdateReview { imdb_id, review } => {
            print_result(movies.update_review(&imdb_id, &review).await)
        }
        Command::Shell => anyhow::bail!("shell cannot be nested"),
    }
}

/// Canceled calls were superseded by a newer one and print nothing.
fn print_result<T: Serialize>(result: magicstream_core::Result<T>) -> anyhow::Result<()> {
    match result {
        Ok(value) => print_json(&value),
        Err(e) if e.is_canceled() => Ok(()),
        Err(e) => match e.message() {
            Some(message) => Err(anyhow::anyhow!("{} ({})", message, e)),
            None => Err(e.into()),
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Whitespace split that keeps double-quoted runs together.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        words.push(current);
    }
    words
}

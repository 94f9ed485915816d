use std::fs::{self, OpenOptions};
use std::io::{self, Read};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use flashdeck::api::{ApiClient, TokenStore, validate_email};
use flashdeck::deck::{Card, DEFAULT_TOPIC, validate_source_text, validate_topic};
use flashdeck::study::{HandoffStore, StudyHandoff};
use flashdeck::{App, Config};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flashdeck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Flashcard service URL (overrides the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and remember the access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored access token
    Logout,
    /// Generate flashcards from a text file
    Generate {
        /// Path to the source text, or `-` for stdin
        input: String,
        /// Title to save the set under
        #[arg(short, long)]
        topic: Option<String>,
        /// Save the generated set to your account
        #[arg(short, long)]
        save: bool,
    },
    /// List your saved sets
    List,
    /// Print every card of a saved set
    Show {
        /// Saved set id
        id: i64,
    },
    /// Study a saved set
    Study {
        /// Saved set id
        id: i64,
    },
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "flashdeck=info".into())
}

/// Log to a file while the TUI owns the terminal, to stderr otherwise
fn init_logging(tui: bool) -> Result<()> {
    if tui {
        let path = Config::log_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file at {:?}", path))?;

        tracing_subscriber::registry()
            .with(default_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(default_filter())
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
            .init();
    }
    Ok(())
}

fn read_source(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("Failed to read stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

/// Wrap width for printed cards, capped for readability
fn card_width() -> usize {
    crossterm::terminal::size().map(|(w, _)| w as usize).unwrap_or(80).clamp(20, 100)
}

fn print_cards(cards: &[Card]) {
    let width = card_width();
    for (i, card) in cards.iter().enumerate() {
        let question = format!("{}. {}", i + 1, card.question);
        for line in textwrap::wrap(&question, width) {
            println!("{}", line);
        }
        let options = textwrap::Options::new(width)
            .initial_indent("   \u{2192} ")
            .subsequent_indent("     ");
        for line in textwrap::wrap(&card.answer, options) {
            println!("{}", line);
        }
        println!();
    }
}

fn authorized_client(config: &Config) -> Result<ApiClient> {
    let token = TokenStore::get().context("Not logged in. Run `flashdeck login` first")?;
    Ok(ApiClient::from_config(config)?.with_token(token))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.is_none() || matches!(cli.command, Some(Commands::Study { .. })))?;

    let config = Config::load()?.with_api_base_url(cli.api_url);

    match cli.command {
        Some(Commands::Signup { email, username, password }) => {
            let email = validate_email(&email)?;
            let user = ApiClient::from_config(&config)?.signup(email, &username, &password).await?;
            println!("Account created for {} ({})", user.username, user.email);
            println!("Run `flashdeck login` to sign in");
        }
        Some(Commands::Login { email, password }) => {
            let email = validate_email(&email)?;
            let token = ApiClient::from_config(&config)?.login(email, &password).await?;
            TokenStore::set(&token.access_token)?;
            println!("Logged in ({})", TokenStore::mask(&token.access_token));
        }
        Some(Commands::Logout) => {
            let was_logged_in = TokenStore::is_authenticated();
            TokenStore::clear()?;
            HandoffStore::default_location()?.clear()?;
            if was_logged_in {
                println!("Logged out");
            } else {
                println!("Not logged in");
            }
        }
        Some(Commands::Generate { input, topic, save }) => {
            let source = read_source(&input)?;
            let text = validate_source_text(&source)?;
            let topic = topic.as_deref().map(validate_topic).transpose()?;

            let client = authorized_client(&config)?;
            let cards = client.generate(text).await?;
            if cards.is_empty() {
                bail!("The service returned no flashcards");
            }
            print_cards(&cards);

            if save {
                let topic = topic.unwrap_or(DEFAULT_TOPIC);
                let saved = client.save_set(topic, &cards).await?;
                println!("{} (id {})", saved.message, saved.id);
            }
        }
        Some(Commands::List) => {
            let sets = authorized_client(&config)?.list_sets().await?;
            if sets.is_empty() {
                println!("No saved sets yet");
            }
            for set in sets {
                println!("{:>5}  {}  ({})", set.id, set.topic, set.summary());
            }
        }
        Some(Commands::Show { id }) => {
            let set = authorized_client(&config)?
                .get_set(id)
                .await?
                .with_context(|| format!("No saved set with id {}", id))?;
            println!("{}\n{}\n", set.topic, set.summary());
            print_cards(&set.cards);
        }
        Some(Commands::Study { id }) => {
            let set = authorized_client(&config)?
                .get_set(id)
                .await?
                .with_context(|| format!("No saved set with id {}", id))?;
            HandoffStore::default_location()?.put(&StudyHandoff::new(set.cards, set.topic))?;

            let mut app = App::new(config)?;
            app.start_in_study();
            app.run().await?;
        }
        None => {
            // Launch TUI
            let mut app = App::new(config)?;
            app.run().await?;
        }
    }

    Ok(())
}

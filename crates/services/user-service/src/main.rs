//! User Service - account management CLI.

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain::User;
use user_service_lib::config::UserServiceConfig;
use user_service_lib::service::{UserManager, UserService};
use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User account management")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// User account commands
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a user (an empty password creates it without a credential)
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "USER_PASSWORD", hide_env_values = true, default_value = "")]
        password: String,
    },
    /// Show a user by id
    Get { id: i64 },
    /// List all users, newest first
    List,
    /// Check a password against a user's stored credential
    Verify {
        id: i64,
        #[arg(long, env = "USER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = UserServiceConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            user_service_lib::run_migrations(&config, migrate_action).await
        }
        Commands::Users { action } => run_user_command(&config, action).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

async fn run_user_command(
    config: &UserServiceConfig,
    action: UserCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    let (db, users) = user_service_lib::connect(config).await?;
    let outcome = execute_user_command(&users, action).await;
    drop(users);

    db.close().await?;
    outcome
}

async fn execute_user_command(
    users: &UserManager,
    action: UserCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        UserCommands::Create {
            name,
            email,
            password,
        } => {
            let mut user = User::new(name, email);
            users.insert(&mut user, &password).await?;
            print_json(&user)
        }
        UserCommands::Get { id } => {
            let mut user = User::default();
            users.get_by_id(&mut user, id).await?;
            print_json(&user)
        }
        UserCommands::List => print_json(&users.list_all().await?),
        UserCommands::Verify { id, password } => {
            let user = users.find_by_id(id).await?;
            let verified = user.check_password(&password);
            println!("{}", json!({ "id": id, "verified": verified.is_ok() }));
            verified.map_err(Into::into)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize tracing subscriber (verbose mode sets debug level)
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

use clap::{Args, Parser, Subcommand};
use littlelemon_app::database::{self, Db};

mod db;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "littlelemon-app", about = "Little Lemon operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Schema management
    #[command(subcommand)]
    Db(db::DbCommand),

    /// Create users and place them in staff groups
    #[command(subcommand)]
    User(user::UserCommand),

    /// Issue, list and revoke API tokens
    #[command(subcommand)]
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => command.run().await,
            Commands::User(command) => command.run().await,
            Commands::Token(command) => command.run().await,
        }
    }
}

/// Connection flag shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        database::connect(&self.database_url)
            .await
            .map(Db::new)
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}

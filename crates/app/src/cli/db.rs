use clap::Subcommand;
use littlelemon_app::database;

use crate::cli::DatabaseArgs;

#[derive(Debug, Subcommand)]
pub(crate) enum DbCommand {
    /// Apply pending schema migrations
    Migrate {
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

impl DbCommand {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self {
            Self::Migrate { database } => {
                let db = database.connect().await?;

                database::migrate(db.pool())
                    .await
                    .map_err(|error| format!("failed to apply migrations: {error}"))?;

                println!("migrations applied");

                Ok(())
            }
        }
    }
}

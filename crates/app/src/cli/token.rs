use clap::Subcommand;
use jiff::Timestamp;
use littlelemon::ids::UserId;
use littlelemon_app::auth::{ApiTokenMetadata, PgAuthService};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Subcommand)]
pub(crate) enum TokenCommand {
    /// Issue a token; the plaintext is printed once and never stored
    Create {
        #[command(flatten)]
        database: DatabaseArgs,

        #[arg(long)]
        user_id: UserId,
    },

    /// Show every token a user has been issued
    List {
        #[command(flatten)]
        database: DatabaseArgs,

        #[arg(long)]
        user_id: UserId,
    },

    /// Stop a token from authenticating
    Revoke {
        #[command(flatten)]
        database: DatabaseArgs,

        #[arg(long)]
        token_uuid: Uuid,
    },
}

impl TokenCommand {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self {
            Self::Create { database, user_id } => {
                let issued = service(&database)
                    .await?
                    .issue_api_token(user_id)
                    .await
                    .map_err(|error| format!("failed to create token: {error}"))?;

                print_metadata(&issued.metadata);
                println!("{}", issued.token);

                Ok(())
            }
            Self::List { database, user_id } => {
                let tokens = service(&database)
                    .await?
                    .list_api_tokens(user_id)
                    .await
                    .map_err(|error| format!("failed to list tokens: {error}"))?;

                if tokens.is_empty() {
                    println!("user {user_id} has no tokens");
                }

                tokens.iter().for_each(print_metadata);

                Ok(())
            }
            Self::Revoke {
                database,
                token_uuid,
            } => {
                let revoked = service(&database)
                    .await?
                    .revoke_api_token(token_uuid)
                    .await
                    .map_err(|error| format!("failed to revoke token: {error}"))?;

                let outcome = if revoked { "revoked" } else { "already inactive" };

                println!("{token_uuid}: {outcome}");

                Ok(())
            }
        }
    }
}

async fn service(database: &DatabaseArgs) -> Result<PgAuthService, String> {
    Ok(PgAuthService::new(database.connect().await?.pool().clone()))
}

fn print_metadata(token: &ApiTokenMetadata) {
    let stamp = |value: Option<Timestamp>| value.map_or_else(|| "-".to_string(), |t| t.to_string());

    println!(
        "{}  user={}  v{}  created={}  last_used={}  revoked={}",
        token.uuid,
        token.user,
        token.version.as_i16(),
        token.created_at,
        stamp(token.last_used_at),
        stamp(token.revoked_at),
    );
}

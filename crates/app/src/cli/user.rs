use clap::Subcommand;
use littlelemon::{ids::UserId, roles::StaffGroup};
use littlelemon_app::domain::users::{PgStaffService, models::NewUser};

use crate::cli::DatabaseArgs;

#[derive(Debug, Subcommand)]
pub(crate) enum UserCommand {
    /// Register a user account
    Create {
        #[command(flatten)]
        database: DatabaseArgs,

        /// Unique login name
        #[arg(long)]
        username: String,

        #[arg(long, default_value = "")]
        email: String,

        /// Grant the admin role
        #[arg(long)]
        superuser: bool,
    },

    /// Add a user to a staff group
    Grant {
        #[command(flatten)]
        database: DatabaseArgs,

        #[arg(long)]
        user_id: UserId,

        /// `manager` or `delivery-crew`
        #[arg(long)]
        group: StaffGroup,
    },
}

impl UserCommand {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self {
            Self::Create {
                database,
                username,
                email,
                superuser,
            } => {
                let username = username.trim().to_string();

                if username.is_empty() {
                    return Err("username cannot be empty".to_string());
                }

                let user = PgStaffService::new(database.connect().await?)
                    .create_user(NewUser {
                        username,
                        email,
                        is_superuser: superuser,
                    })
                    .await
                    .map_err(|error| format!("failed to create user: {error}"))?;

                println!("user {} ({}) created", user.id, user.username);

                if user.is_superuser {
                    println!("user {} is a superuser", user.id);
                }

                Ok(())
            }
            Self::Grant {
                database,
                user_id,
                group,
            } => {
                let user = PgStaffService::new(database.connect().await?)
                    .add_to_group(user_id, group)
                    .await
                    .map_err(|error| format!("failed to grant group: {error}"))?;

                println!("user {} ({}) is in group {group}", user.id, user.username);

                Ok(())
            }
        }
    }
}

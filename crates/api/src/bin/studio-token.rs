//! Mint an access token signed with the server's `JWT_SECRET`.
//!
//! ```text
//! studio-token instructor 3
//! curl -H "Authorization: Bearer $(studio-token client 12)" localhost:3000/api/v1/me
//! ```

use std::process::ExitCode;

use clap::Parser;
use studio_api::auth::jwt::JwtConfig;
use studio_core::roles::Actor;
use studio_core::types::DbId;

#[derive(Debug, Parser)]
#[command(name = "studio-token", about = "Mint a studio API access token", version)]
struct Cli {
    /// `client`, `instructor` or `admin`.
    role: String,
    /// Token subject: the client, instructor or admin id.
    subject: DbId,
    /// Lifetime in minutes. Defaults to `JWT_ACCESS_EXPIRY_MINS`.
    #[arg(long)]
    ttl_mins: Option<i64>,
}

impl Cli {
    fn actor(&self) -> Result<Actor, String> {
        Actor::from_role(&self.role, self.subject).map_err(|e| e.to_string())
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let actor = match cli.actor() {
        Ok(actor) => actor,
        Err(e) => {
            eprintln!("studio-token: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut jwt = match JwtConfig::from_lookup(|key| std::env::var(key).ok()) {
        Ok(jwt) => jwt,
        Err(e) => {
            eprintln!("studio-token: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(ttl) = cli.ttl_mins.filter(|t| *t > 0) {
        jwt.access_token_expiry_mins = ttl;
    }

    match jwt.issue(actor) {
        Ok(token) => {
            println!("{token}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("studio-token: signing failed: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_role_then_subject() {
        let cli = Cli::try_parse_from(["studio-token", "instructor", "3"]).unwrap();
        assert_eq!(cli.actor().unwrap(), Actor::Instructor(3));
        assert_eq!(cli.ttl_mins, None);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let cli = Cli::try_parse_from(["studio-token", "reviewer", "3"]).unwrap();
        assert!(cli.actor().is_err());
    }

    #[test]
    fn non_numeric_subject_fails_to_parse() {
        assert!(Cli::try_parse_from(["studio-token", "client", "maria"]).is_err());
    }
}

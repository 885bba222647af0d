use clap::{Parser, Subcommand};

use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::server;

#[derive(Parser)]
#[command(name = "student-management-api")]
#[command(about = "Student Management API - students, enrollments and subjects over HTTP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Address to bind, overrides SERVER_HOSTNAME")]
        host: Option<String>,

        #[arg(long, help = "Port to bind, overrides SERVER_PORT")]
        port: Option<u16>,
    },

    #[command(about = "Print a bearer token signed with the configured JWT_SECRET")]
    Token {
        #[arg(help = "Username placed in the token subject")]
        subject: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env()?;

    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.hostname = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.require_storage()?;
            server::serve(config).await
        }
        Commands::Token { subject } => {
            println!("{}", issue_token(&config, &subject)?);
            Ok(())
        }
    }
}

/// Sign a bearer token for `subject`. Needs only the JWT settings, never storage.
pub fn issue_token(config: &AppConfig, subject: &str) -> anyhow::Result<String> {
    let keys = JwtKeys::new(&config.security.jwt_secret, config.security.jwt_expiry_hours);
    Ok(keys.issue(subject)?.token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["student-management-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["student-management-api", "serve", "--host", "127.0.0.1", "--port", "8080"])
            .unwrap();
        match cli.command {
            Some(Commands::Serve { host, port }) => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8080));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn token_signs_without_database_url() {
        let config = AppConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some("cli-secret".to_string()),
            _ => None,
        })
        .unwrap();
        assert!(config.database.url.is_none());

        let token = issue_token(&config, "alice").unwrap();
        let claims = JwtKeys::new("cli-secret", 1).verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[test]
    fn token_requires_subject() {
        assert!(Cli::try_parse_from(["student-management-api", "token"]).is_err());
    }
}

use std::path::Path;

use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DatabaseSettings, LoggingSettings, ServerSettings};

/// Looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "reserva.toml";
/// Environment overrides look like `RESERVA__DATABASE__PASSWORD`.
pub const ENV_PREFIX: &str = "RESERVA";

/// Loads the application configuration.
///
/// Sources, lowest priority first: built-in defaults, the TOML file (`path`,
/// or an optional `reserva.toml`), then `RESERVA__*` environment variables.
/// A plain `DATABASE_URL` is honored when no database URL was configured.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    build_config(path, env_source(), std::env::var("DATABASE_URL").ok())
}

/// The `RESERVA__SECTION__KEY` environment source.
fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn build_config(
    path: Option<&Path>,
    env: config::Environment,
    database_url: Option<String>,
) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .set_default("audit_server.port", 3400_i64)?
        .set_default("reservations_server.port", 3100_i64)?
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let mut config = builder.try_deserialize::<Config>()?;

    if config.database.url.is_none() {
        config.database.url = database_url;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_toml("");
        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.audit_server.port, 3400);
        assert_eq!(config.reservations_server.port, 3100);
        assert_eq!(config.audit_server.host, "0.0.0.0");
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.name, "rest");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_toml(
            r#"
            [database]
            host = "db.internal"
            password = "adm"
            max_connections = 4

            [audit_server]
            host = "127.0.0.1"

            [reservations_server]
            port = 8100

            [logging]
            level = "debug"
            json = true
            "#,
        );
        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.password, "adm");
        assert_eq!(config.database.max_connections, 4);
        // A partially specified section keeps its seeded port.
        assert_eq!(config.audit_server.port, 3400);
        assert_eq!(
            config.audit_server.socket_addr().unwrap().to_string(),
            "127.0.0.1:3400"
        );
        assert_eq!(config.reservations_server.port, 8100);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let file = write_toml("[database]\nmax_connections = 0\n");
        assert!(matches!(
            load_config(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));

        let file = write_toml("[audit_server]\nhost = \"not an ip\"\n");
        assert!(matches!(
            load_config(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        env_source().source(Some(vars))
    }

    #[test]
    fn environment_outranks_the_file() {
        let file = write_toml(
            r#"
            [database]
            password = "from-file"
            host = "db.internal"

            [audit_server]
            port = 8400
            "#,
        );
        let config = build_config(
            Some(file.path()),
            env(&[
                ("RESERVA__DATABASE__PASSWORD", "12345"),
                ("RESERVA__AUDIT_SERVER__PORT", "9400"),
                ("OTHER__DATABASE__HOST", "ignored"),
            ]),
            None,
        )
        .unwrap();

        assert_eq!(config.database.password, "12345");
        assert_eq!(config.audit_server.port, 9400);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.reservations_server.port, 3100);
    }

    #[test]
    fn database_url_fills_in_when_unset() {
        let file = write_toml("");
        let config = build_config(
            Some(file.path()),
            env(&[]),
            Some("postgres://x@h/db".to_string()),
        )
        .unwrap();
        assert_eq!(config.database.url.as_deref(), Some("postgres://x@h/db"));

        let file = write_toml("[database]\nurl = \"postgres://configured/rest\"\n");
        let config = build_config(
            Some(file.path()),
            env(&[]),
            Some("postgres://x@h/db".to_string()),
        )
        .unwrap();
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://configured/rest")
        );

        let file = write_toml("");
        let config = build_config(Some(file.path()), env(&[]), None).unwrap();
        assert_eq!(config.database.url, None);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = Path::new("/definitely/not/here/reserva.toml");
        assert!(matches!(
            load_config(Some(missing)),
            Err(ConfigError::LoadError(_))
        ));
    }
}

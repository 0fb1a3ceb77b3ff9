use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub run_migrations: bool,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub otel_endpoint: Option<String>,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url =
            lookup("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let port = lookup("PORT")
            .context("Missing environment variable: PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let run_migrations_str =
            lookup("RUN_MIGRATIONS").context("Missing environment variable: RUN_MIGRATIONS")?;
        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let db_min_conn = match lookup("DB_MIN_CONN") {
            Some(v) => v.parse::<u32>().context("DB_MIN_CONN must be a valid u32")?,
            None => 1,
        };
        let db_max_conn = match lookup("DB_MAX_CONN") {
            Some(v) => v.parse::<u32>().context("DB_MAX_CONN must be a valid u32")?,
            None => 5,
        };
        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONN ({db_min_conn}) cannot exceed DB_MAX_CONN ({db_max_conn})"
            ));
        }

        let otel_endpoint = lookup("OTEL_ENDPOINT").filter(|v| !v.trim().is_empty());

        let is_dev = lookup("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let enable_file_log = lookup("ENABLE_FILE_LOG")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Self {
            database_url,
            port,
            run_migrations,
            db_min_conn,
            db_max_conn,
            otel_endpoint,
            is_dev,
            enable_file_log,
        })
    }
}

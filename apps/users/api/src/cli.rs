use clap::Parser;

/// Command-line overrides. Anything omitted falls back to the environment.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "users-api")]
#[command(about = "REST service for managing users")]
pub struct Cli {
    /// HTTP port to listen on [env: PORT]
    #[arg(long)]
    pub port: Option<u16>,

    /// Database user [env: DB_USER]
    #[arg(long, alias = "db_user")]
    pub db_user: Option<String>,

    /// Database password [env: DB_PASS]
    #[arg(long, alias = "db_pass")]
    pub db_pass: Option<String>,

    /// Database host [env: DB_HOST]
    #[arg(long, alias = "db_host")]
    pub db_host: Option<String>,

    /// Database port [env: DB_PORT]
    #[arg(long, alias = "db_port")]
    pub db_port: Option<u16>,

    /// Database name [env: DB_NAME]
    #[arg(long, alias = "db_name")]
    pub db_name: Option<String>,
}

impl Cli {
    /// True when any discrete database flag was passed.
    pub fn has_db_overrides(&self) -> bool {
        self.db_user.is_some()
            || self.db_pass.is_some()
            || self.db_host.is_some()
            || self.db_port.is_some()
            || self.db_name.is_some()
    }
}

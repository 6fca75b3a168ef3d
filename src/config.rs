#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:recommendations.db?mode=rwc".to_string());
        let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());

        Config {
            database_url,
            port: port.parse::<u16>().unwrap_or(8000),
        }
    }
}

use std::env;

/// Runtime configuration, read once at startup. `JWT_SECRET` is read
/// directly by the token layer.
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        }
    }

    /// The address pair handed to `HttpServer::bind`.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.server_host.clone(), self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("DATABASE_URL", "postgres://test");
        env::remove_var("SERVER_PORT");
        env::remove_var("SERVER_HOST");

        let config = Config::from_env();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.bind_addr(), ("127.0.0.1".to_string(), 8080));

        env::set_var("SERVER_PORT", "3000");
        env::set_var("SERVER_HOST", "0.0.0.0");

        let config = Config::from_env();

        assert_eq!(config.bind_addr(), ("0.0.0.0".to_string(), 3000));
    }
}

use secrecy::{ExposeSecret, SecretString};
use std::env;

const DEV_AUTH_SECRET: &str = "dev_auth_secret_change_in_production";
const DEV_CONTEST_SECRET: &str = "dev_contest_secret_change_in_production";
const DEV_QUIZ_SECRET: &str = "dev_quiz_secret_change_in_production";
const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
    /// Verifies bearer tokens minted by the upstream identity provider.
    pub auth_jwt_secret: SecretString,
    pub contest_token_secret: SecretString,
    pub quiz_token_secret: SecretString,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "arena-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            auth_jwt_secret: SecretString::from(
                env::var("AUTH_JWT_SECRET").unwrap_or_else(|_| DEV_AUTH_SECRET.to_string()),
            ),
            contest_token_secret: SecretString::from(
                env::var("CONTEST_TOKEN_SECRET").unwrap_or_else(|_| DEV_CONTEST_SECRET.to_string()),
            ),
            quiz_token_secret: SecretString::from(
                env::var("QUIZ_TOKEN_SECRET").unwrap_or_else(|_| DEV_QUIZ_SECRET.to_string()),
            ),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Checks that every signing secret was set explicitly and is long enough.
    pub fn validate_for_production(&self) -> Result<(), String> {
        let secrets = [
            ("AUTH_JWT_SECRET", &self.auth_jwt_secret, DEV_AUTH_SECRET),
            ("CONTEST_TOKEN_SECRET", &self.contest_token_secret, DEV_CONTEST_SECRET),
            ("QUIZ_TOKEN_SECRET", &self.quiz_token_secret, DEV_QUIZ_SECRET),
        ];

        for (name, secret, default) in secrets {
            let value = secret.expose_secret();
            if value == default {
                return Err(format!(
                    "{} is using its default value. Set it to a secure random string.",
                    name
                ));
            }
            if value.len() < MIN_SECRET_LEN {
                return Err(format!(
                    "{} is too short ({}). Must be at least {} characters.",
                    name,
                    value.len(),
                    MIN_SECRET_LEN
                ));
            }
        }

        if self.contest_token_secret.expose_secret() == self.quiz_token_secret.expose_secret() {
            return Err(
                "CONTEST_TOKEN_SECRET and QUIZ_TOKEN_SECRET must differ".to_string(),
            );
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "arena-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: "http://localhost:5173".to_string(),
            auth_jwt_secret: SecretString::from("test_auth_secret".to_string()),
            contest_token_secret: SecretString::from("test_contest_secret".to_string()),
            quiz_token_secret: SecretString::from("test_quiz_secret".to_string()),
            app_env: "test".to_string(),
        }
    }
}

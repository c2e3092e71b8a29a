use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub access_secret: String,
    pub refresh_secret: String,
}

/// Outbound SMTP account. Absent when EMAIL is not set, in which case mail
/// is logged instead of sent.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub account: String,
    pub password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub app_url: String,
    pub auth: AuthConfig,
    pub email: Option<EmailConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let auth = AuthConfig {
            access_secret: std::env::var("SECRET_KEY").context("SECRET_KEY must be set")?,
            refresh_secret: std::env::var("REFRESH_TOKEN_SECRET")
                .context("REFRESH_TOKEN_SECRET must be set")?,
        };
        let email = match (std::env::var("EMAIL"), std::env::var("EMAIL_PASSWORD")) {
            (Ok(account), Ok(password)) => Some(EmailConfig {
                account,
                password,
                smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".into()),
                smtp_port: std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|v| v.parse::<u16>().ok())
                    .unwrap_or(587),
            }),
            _ => None,
        };
        let app_url =
            std::env::var("APP_URL").unwrap_or_else(|_| format!("http://localhost:{}", port));
        Ok(Self {
            port,
            database_url,
            app_url,
            auth,
            email,
        })
    }
}

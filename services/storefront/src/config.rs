/// Storefront service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for session tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3110). Env var: `STOREFRONT_PORT`.
    pub storefront_port: u16,
    /// SMTP relay host. When unset, outbound mail is logged instead of sent.
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// From address for all outbound mail.
    pub email_from: String,
}

impl StorefrontConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            storefront_port: std::env::var("STOREFRONT_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3110),
            smtp_host: std::env::var("SMTP_HOST").ok(),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            smtp_username: std::env::var("SMTP_USERNAME").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            email_from: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "Bakehouse <no-reply@bakehouse.example>".to_owned()),
        }
    }
}

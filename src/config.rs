use clap::Parser;
use once_cell::sync::Lazy;

/// Identity tokens stay valid for 7 days, matching the cookie max-age.
pub const JWT_EXPIRY_TIME: i64 = 604_800i64;

pub const AUTH_COOKIE_NAME: &str = "auth-token";

pub const MAX_UPLOAD_FILES: usize = 5;
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env, default_value = "./uploads")]
    pub upload_dir: String,

    #[clap(long, env)]
    pub admin_email: String,

    #[clap(long, env)]
    pub admin_password: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}

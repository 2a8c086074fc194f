use sea_orm::Database;
use tracing::info;

use bakehouse_storefront::config::StorefrontConfig;
use bakehouse_storefront::infra::email::SmtpMailer;
use bakehouse_storefront::router::build_router;
use bakehouse_storefront::state::AppState;

#[tokio::main]
async fn main() {
    bakehouse_core::tracing::init_tracing();

    let config = StorefrontConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = SmtpMailer::from_config(&config).expect("failed to build mailer");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
        mailer,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.storefront_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("storefront service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}

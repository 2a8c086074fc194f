use sea_orm_migration::prelude::*;

use bakehouse_storefront_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}

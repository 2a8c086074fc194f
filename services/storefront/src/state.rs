use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbAccountRepository, DbCatalog, DbOrderRepository, DbOrderSequence, DbReviewRepository,
};
use crate::infra::email::SmtpMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub mailer: SmtpMailer,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_sequence(&self) -> DbOrderSequence {
        DbOrderSequence {
            db: self.db.clone(),
        }
    }

    pub fn review_repo(&self) -> DbReviewRepository {
        DbReviewRepository {
            db: self.db.clone(),
        }
    }

    pub fn catalog(&self) -> DbCatalog {
        DbCatalog {
            db: self.db.clone(),
        }
    }

    pub fn mailer(&self) -> SmtpMailer {
        self.mailer.clone()
    }
}

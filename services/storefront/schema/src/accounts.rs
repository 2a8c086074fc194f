use sea_orm::entity::prelude::*;

/// Customer account. Created pending (`is_active = false`) at
/// registration-initiation; activated exactly once by registration-OTP
/// verification. Each OTP slot holds at most one outstanding 6-digit code.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Absent for federated-identity-only accounts.
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub role: i16,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub is_phone_verified: bool,
    pub registration_otp: Option<String>,
    pub registration_otp_expires: Option<chrono::DateTime<chrono::Utc>>,
    pub email_otp: Option<String>,
    pub email_otp_expires: Option<chrono::DateTime<chrono::Utc>>,
    pub phone_otp: Option<String>,
    pub phone_otp_expires: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

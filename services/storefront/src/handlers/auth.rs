use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::types::Account;
use crate::error::StorefrontError;
use crate::session::Session;
use crate::state::AppState;
use crate::usecase::account::{
    GetAccountUseCase, LoginInput, LoginUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use crate::usecase::registration::{
    CompleteRegistrationInput, CompleteRegistrationUseCase, InitiateRegistrationInput,
    InitiateRegistrationUseCase, ResendRegistrationOtpUseCase,
};
use crate::usecase::verification::{
    SendEmailOtpUseCase, SendPhoneOtpUseCase, VerifyEmailUseCase, VerifyPhoneUseCase,
};

/// Account view returned to the client. Password hash and OTP slots
/// never leave the service.
#[derive(Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub role: u8,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub is_phone_verified: bool,
    #[serde(serialize_with = "bakehouse_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "bakehouse_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name,
            email: account.email,
            phone: account.phone,
            address: account.address,
            postal_code: account.postal_code,
            role: account.role.as_u8(),
            is_active: account.is_active,
            is_email_verified: account.is_email_verified,
            is_phone_verified: account.is_phone_verified,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub account: AccountResponse,
}

// ── POST /auth/initiate-register ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
}

pub async fn initiate_register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<StatusCode, StorefrontError> {
    let usecase = InitiateRegistrationUseCase {
        accounts: state.account_repo(),
        mailer: state.mailer(),
    };
    usecase
        .execute(InitiateRegistrationInput {
            name: body.name,
            email: body.email,
            password: body.password,
            phone: body.phone,
            address: body.address,
            postal_code: body.postal_code,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /auth/complete-register ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRegistrationRequest {
    pub email: String,
    pub code: String,
}

pub async fn complete_register(
    State(state): State<AppState>,
    Json(body): Json<VerifyRegistrationRequest>,
) -> Result<Json<SessionResponse>, StorefrontError> {
    let usecase = CompleteRegistrationUseCase {
        accounts: state.account_repo(),
        mailer: state.mailer(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = usecase
        .execute(CompleteRegistrationInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok(Json(SessionResponse {
        token: output.token,
        account: output.account.into(),
    }))
}

// ── POST /auth/resend-register-otp ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResendOtpRequest {
    pub email: String,
}

pub async fn resend_register_otp(
    State(state): State<AppState>,
    Json(body): Json<ResendOtpRequest>,
) -> Result<StatusCode, StorefrontError> {
    let usecase = ResendRegistrationOtpUseCase {
        accounts: state.account_repo(),
        mailer: state.mailer(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, StorefrontError> {
    let usecase = LoginUseCase {
        accounts: state.account_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(SessionResponse {
        token: output.token,
        account: output.account.into(),
    }))
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn get_me(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<AccountResponse>, StorefrontError> {
    let usecase = GetAccountUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase.execute(session.account_id).await?;
    Ok(Json(account.into()))
}

// ── PUT /auth/profile ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
}

pub async fn update_profile(
    session: Session,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<AccountResponse>, StorefrontError> {
    let usecase = UpdateProfileUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase
        .execute(
            session.account_id,
            UpdateProfileInput {
                name: body.name,
                phone: body.phone,
                address: body.address,
                postal_code: body.postal_code,
            },
        )
        .await?;
    Ok(Json(account.into()))
}

// ── POST /auth/send-email-otp ────────────────────────────────────────────────

pub async fn send_email_otp(
    session: Session,
    State(state): State<AppState>,
) -> Result<StatusCode, StorefrontError> {
    let usecase = SendEmailOtpUseCase {
        accounts: state.account_repo(),
        mailer: state.mailer(),
    };
    usecase.execute(session.account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /auth/verify-email ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub code: String,
}

pub async fn verify_email(
    session: Session,
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<StatusCode, StorefrontError> {
    let usecase = VerifyEmailUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(session.account_id, &body.code).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /auth/send-phone-otp ────────────────────────────────────────────────

pub async fn send_phone_otp(
    session: Session,
    State(state): State<AppState>,
) -> Result<StatusCode, StorefrontError> {
    let usecase = SendPhoneOtpUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(session.account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /auth/verify-phone ──────────────────────────────────────────────────

pub async fn verify_phone(
    session: Session,
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<StatusCode, StorefrontError> {
    let usecase = VerifyPhoneUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(session.account_id, &body.code).await?;
    Ok(StatusCode::NO_CONTENT)
}

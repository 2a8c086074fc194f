use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use bakehouse_domain::role::Role;
use bakehouse_domain::validate::{is_valid_email, is_valid_phone, is_valid_postal_code};

use crate::domain::repository::{AccountRepository, NotificationGateway, OtpChannel};
use crate::domain::types::{Account, OTP_TTL_MINS, OtpSlot};
use crate::error::StorefrontError;
use crate::usecase::password::hash_password;
use crate::usecase::token::issue_token;

pub const PASSWORD_MIN_LEN: usize = 6;

/// Generate a 6-digit one-time code with a non-zero leading digit.
pub fn generate_otp() -> String {
    let mut rng = rand::rng();
    rng.random_range(100_000..1_000_000).to_string()
}

pub fn fresh_otp_slot() -> OtpSlot {
    OtpSlot {
        code: generate_otp(),
        expires_at: Utc::now() + Duration::minutes(OTP_TTL_MINS),
    }
}

// ── InitiateRegistration ─────────────────────────────────────────────────────

pub struct InitiateRegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
}

pub struct InitiateRegistrationUseCase<A, N>
where
    A: AccountRepository,
    N: NotificationGateway,
{
    pub accounts: A,
    pub mailer: N,
}

impl<A, N> InitiateRegistrationUseCase<A, N>
where
    A: AccountRepository,
    N: NotificationGateway,
{
    pub async fn execute(&self, input: InitiateRegistrationInput) -> Result<(), StorefrontError> {
        if input.name.trim().is_empty() {
            return Err(StorefrontError::Validation("name must not be empty"));
        }
        let email = input.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(StorefrontError::Validation("invalid email address"));
        }
        if input.password.len() < PASSWORD_MIN_LEN {
            return Err(StorefrontError::Validation(
                "password must be at least 6 characters",
            ));
        }
        if let Some(ref phone) = input.phone {
            if !is_valid_phone(phone) {
                return Err(StorefrontError::Validation("invalid phone number"));
            }
        }
        if let Some(ref postal_code) = input.postal_code {
            if !is_valid_postal_code(postal_code) {
                return Err(StorefrontError::Validation("invalid postal code"));
            }
        }

        let existing = self.accounts.find_by_email(&email).await?;
        if matches!(existing, Some(ref a) if a.is_active) {
            return Err(StorefrontError::Conflict(
                "an account with this email already exists",
            ));
        }

        let slot = fresh_otp_slot();
        let now = Utc::now();
        let account = Account {
            // A pending account keeps its id across re-registrations.
            id: existing.as_ref().map(|a| a.id).unwrap_or_else(Uuid::new_v4),
            name: input.name.trim().to_owned(),
            email: email.clone(),
            password_hash: Some(hash_password(&input.password)?),
            phone: input.phone,
            address: input.address,
            postal_code: input.postal_code,
            role: Role::User,
            is_active: false,
            is_email_verified: false,
            is_phone_verified: false,
            registration_otp: Some(slot.clone()),
            email_otp: None,
            phone_otp: None,
            created_at: existing.as_ref().map(|a| a.created_at).unwrap_or(now),
            updated_at: now,
        };

        if existing.is_some() {
            self.accounts.replace_pending(&account).await?;
        } else {
            self.accounts.create(&account).await?;
        }

        // Mail dispatch is best-effort; a lost code is recovered via resend.
        if let Err(e) = self
            .mailer
            .send_registration_otp(&email, &account.name, &slot.code)
            .await
        {
            tracing::warn!(error = %e, "failed to send registration otp email");
        }
        Ok(())
    }
}

// ── CompleteRegistration ─────────────────────────────────────────────────────

pub struct CompleteRegistrationInput {
    pub email: String,
    pub code: String,
}

#[derive(Debug)]
pub struct CompleteRegistrationOutput {
    pub account: Account,
    pub token: String,
}

pub struct CompleteRegistrationUseCase<A, N>
where
    A: AccountRepository,
    N: NotificationGateway,
{
    pub accounts: A,
    pub mailer: N,
    pub jwt_secret: String,
}

impl<A, N> CompleteRegistrationUseCase<A, N>
where
    A: AccountRepository,
    N: NotificationGateway,
{
    pub async fn execute(
        &self,
        input: CompleteRegistrationInput,
    ) -> Result<CompleteRegistrationOutput, StorefrontError> {
        let email = input.email.trim().to_lowercase();
        let mut account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(StorefrontError::NotFound(
                "no pending registration for this email",
            ))?;

        if account.is_active {
            return Err(StorefrontError::Conflict("account is already active"));
        }

        crate::domain::types::verify_otp(
            account.registration_otp.as_ref(),
            input.code.trim(),
            Utc::now(),
        )?;

        self.accounts.activate(account.id).await?;
        account.is_active = true;
        account.is_email_verified = true;
        account.registration_otp = None;

        // Welcome mail is best-effort.
        if let Err(e) = self.mailer.send_welcome(&account.email, &account.name).await {
            tracing::warn!(error = %e, "failed to send welcome email");
        }

        let token = issue_token(&account, &self.jwt_secret)?;
        Ok(CompleteRegistrationOutput { account, token })
    }
}

// ── ResendRegistrationOtp ────────────────────────────────────────────────────

pub struct ResendRegistrationOtpUseCase<A, N>
where
    A: AccountRepository,
    N: NotificationGateway,
{
    pub accounts: A,
    pub mailer: N,
}

impl<A, N> ResendRegistrationOtpUseCase<A, N>
where
    A: AccountRepository,
    N: NotificationGateway,
{
    pub async fn execute(&self, email: &str) -> Result<(), StorefrontError> {
        let email = email.trim().to_lowercase();
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(StorefrontError::NotFound(
                "no pending registration for this email",
            ))?;

        if account.is_active {
            return Err(StorefrontError::Conflict("account is already active"));
        }

        // The new code replaces whatever was outstanding.
        let slot = fresh_otp_slot();
        self.accounts
            .set_otp(account.id, OtpChannel::Registration, Some(&slot))
            .await?;
        if let Err(e) = self
            .mailer
            .send_registration_otp(&email, &account.name, &slot.code)
            .await
        {
            tracing::warn!(error = %e, "failed to send registration otp email");
        }
        Ok(())
    }
}


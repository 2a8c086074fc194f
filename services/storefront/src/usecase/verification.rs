use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{AccountRepository, NotificationGateway, OtpChannel};
use crate::domain::types::verify_otp;
use crate::error::StorefrontError;
use crate::usecase::registration::fresh_otp_slot;

// ── SendEmailOtp ─────────────────────────────────────────────────────────────

pub struct SendEmailOtpUseCase<A, N>
where
    A: AccountRepository,
    N: NotificationGateway,
{
    pub accounts: A,
    pub mailer: N,
}

impl<A, N> SendEmailOtpUseCase<A, N>
where
    A: AccountRepository,
    N: NotificationGateway,
{
    pub async fn execute(&self, account_id: Uuid) -> Result<(), StorefrontError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(StorefrontError::NotFound("account not found"))?;

        if account.is_email_verified {
            return Err(StorefrontError::Conflict("email is already verified"));
        }

        let slot = fresh_otp_slot();
        self.accounts
            .set_otp(account.id, OtpChannel::Email, Some(&slot))
            .await?;
        // Mail dispatch is best-effort; the caller can request a new code.
        if let Err(e) = self
            .mailer
            .send_email_otp(&account.email, &account.name, &slot.code)
            .await
        {
            tracing::warn!(error = %e, "failed to send email verification otp");
        }
        Ok(())
    }
}

// ── VerifyEmail ──────────────────────────────────────────────────────────────

pub struct VerifyEmailUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> VerifyEmailUseCase<A> {
    pub async fn execute(&self, account_id: Uuid, code: &str) -> Result<(), StorefrontError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(StorefrontError::NotFound("account not found"))?;

        verify_otp(account.email_otp.as_ref(), code.trim(), Utc::now())?;
        self.accounts
            .mark_verified(account.id, OtpChannel::Email)
            .await
    }
}

// ── SendPhoneOtp ─────────────────────────────────────────────────────────────

pub struct SendPhoneOtpUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> SendPhoneOtpUseCase<A> {
    pub async fn execute(&self, account_id: Uuid) -> Result<(), StorefrontError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(StorefrontError::NotFound("account not found"))?;

        if account.phone.is_none() {
            return Err(StorefrontError::Precondition("no phone number on file"));
        }
        if account.is_phone_verified {
            return Err(StorefrontError::Conflict("phone is already verified"));
        }

        let slot = fresh_otp_slot();
        self.accounts
            .set_otp(account.id, OtpChannel::Phone, Some(&slot))
            .await?;
        // No SMS gateway is wired up yet; surface the code in dev logs.
        tracing::debug!(account_id = %account.id, code = %slot.code, "phone otp issued");
        Ok(())
    }
}

// ── VerifyPhone ──────────────────────────────────────────────────────────────

pub struct VerifyPhoneUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> VerifyPhoneUseCase<A> {
    pub async fn execute(&self, account_id: Uuid, code: &str) -> Result<(), StorefrontError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(StorefrontError::NotFound("account not found"))?;

        verify_otp(account.phone_otp.as_ref(), code.trim(), Utc::now())?;
        self.accounts
            .mark_verified(account.id, OtpChannel::Phone)
            .await
    }
}

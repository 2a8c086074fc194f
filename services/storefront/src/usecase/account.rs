use uuid::Uuid;

use bakehouse_domain::validate::{is_valid_phone, is_valid_postal_code};

use crate::domain::repository::AccountRepository;
use crate::domain::types::Account;
use crate::error::StorefrontError;
use crate::usecase::password::verify_password;
use crate::usecase::token::issue_token;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub account: Account,
    pub token: String,
}

pub struct LoginUseCase<A: AccountRepository> {
    pub accounts: A,
    pub jwt_secret: String,
}

impl<A: AccountRepository> LoginUseCase<A> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, StorefrontError> {
        let email = input.email.trim().to_lowercase();
        // Wrong email and wrong password answer identically.
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(StorefrontError::Unauthorized("invalid credentials"))?;

        let hash = account
            .password_hash
            .as_deref()
            .ok_or(StorefrontError::Unauthorized("invalid credentials"))?;
        if !verify_password(&input.password, hash) {
            return Err(StorefrontError::Unauthorized("invalid credentials"));
        }

        if !account.is_active {
            return Err(StorefrontError::Precondition(
                "account has not been activated",
            ));
        }

        let token = issue_token(&account, &self.jwt_secret)?;
        Ok(LoginOutput { account, token })
    }
}

// ── GetAccount ───────────────────────────────────────────────────────────────

pub struct GetAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> GetAccountUseCase<A> {
    pub async fn execute(&self, account_id: Uuid) -> Result<Account, StorefrontError> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or(StorefrontError::NotFound("account not found"))
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
}

pub struct UpdateProfileUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> UpdateProfileUseCase<A> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<Account, StorefrontError> {
        if input.name.is_none()
            && input.phone.is_none()
            && input.address.is_none()
            && input.postal_code.is_none()
        {
            return Err(StorefrontError::Validation("nothing to update"));
        }
        if let Some(ref name) = input.name {
            if name.trim().is_empty() {
                return Err(StorefrontError::Validation("name must not be empty"));
            }
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

        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or(StorefrontError::NotFound("account not found"))?;

        self.accounts
            .update_profile(
                account_id,
                input.name.as_deref().map(str::trim),
                input.phone.as_deref(),
                input.address.as_deref(),
                input.postal_code.as_deref(),
            )
            .await?;

        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or(StorefrontError::NotFound("account not found"))
    }
}

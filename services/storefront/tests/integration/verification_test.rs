use chrono::{Duration, Utc};
use uuid::Uuid;

use bakehouse_storefront::domain::types::OtpSlot;
use bakehouse_storefront::error::StorefrontError;
use bakehouse_storefront::usecase::verification::{
    SendEmailOtpUseCase, SendPhoneOtpUseCase, VerifyEmailUseCase, VerifyPhoneUseCase,
};

use crate::helpers::{MockAccountRepo, MockMailer, active_account};

fn slot(code: &str) -> OtpSlot {
    OtpSlot {
        code: code.to_owned(),
        expires_at: Utc::now() + Duration::minutes(10),
    }
}

// ── Email channel ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_and_mail_email_code() {
    let mut account = active_account("priya@example.com");
    account.is_email_verified = false;
    let id = account.id;
    let usecase = SendEmailOtpUseCase {
        accounts: MockAccountRepo::with(account),
        mailer: MockMailer::default(),
    };
    usecase.execute(id).await.unwrap();

    let stored = usecase.accounts.snapshot().unwrap();
    let slot = stored.email_otp.unwrap();
    let sent = usecase.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, "email_otp");
    assert_eq!(sent[0].detail, slot.code);
}

#[tokio::test]
async fn should_store_email_code_even_when_mail_fails() {
    let mut account = active_account("priya@example.com");
    account.is_email_verified = false;
    let id = account.id;
    let usecase = SendEmailOtpUseCase {
        accounts: MockAccountRepo::with(account),
        mailer: MockMailer::failing(),
    };
    usecase.execute(id).await.unwrap();

    let stored = usecase.accounts.snapshot().unwrap();
    assert!(stored.email_otp.is_some());
    assert!(usecase.mailer.sent().is_empty());
}

#[tokio::test]
async fn should_conflict_when_email_already_verified() {
    let account = active_account("priya@example.com");
    let id = account.id;
    let usecase = SendEmailOtpUseCase {
        accounts: MockAccountRepo::with(account),
        mailer: MockMailer::default(),
    };
    let result = usecase.execute(id).await;
    assert!(matches!(result, Err(StorefrontError::Conflict(_))));
}

#[tokio::test]
async fn should_replace_outstanding_email_code_on_reissue() {
    let mut account = active_account("priya@example.com");
    account.is_email_verified = false;
    account.email_otp = Some(slot("111111"));
    let id = account.id;
    let usecase = SendEmailOtpUseCase {
        accounts: MockAccountRepo::with(account),
        mailer: MockMailer::default(),
    };
    usecase.execute(id).await.unwrap();

    // Only the latest slot is stored, and the mail carries that code.
    let stored = usecase.accounts.snapshot().unwrap();
    let slot = stored.email_otp.unwrap();
    assert!(slot.expires_at > Utc::now() + Duration::minutes(9));
    let sent = usecase.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].detail, slot.code);
}

#[tokio::test]
async fn should_mark_email_verified_and_clear_slot() {
    let mut account = active_account("priya@example.com");
    account.is_email_verified = false;
    account.email_otp = Some(slot("222333"));
    let id = account.id;
    let usecase = VerifyEmailUseCase {
        accounts: MockAccountRepo::with(account),
    };
    usecase.execute(id, "222333").await.unwrap();

    let stored = usecase.accounts.snapshot().unwrap();
    assert!(stored.is_email_verified);
    assert!(stored.email_otp.is_none());
}

#[tokio::test]
async fn should_reject_email_code_when_no_slot_outstanding() {
    let mut account = active_account("priya@example.com");
    account.is_email_verified = false;
    let id = account.id;
    let usecase = VerifyEmailUseCase {
        accounts: MockAccountRepo::with(account),
    };
    let result = usecase.execute(id, "123456").await;
    assert!(matches!(result, Err(StorefrontError::InvalidCode)));
}

// ── Phone channel ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_phone_number_before_issuing_code() {
    let account = active_account("priya@example.com");
    let id = account.id;
    let usecase = SendPhoneOtpUseCase {
        accounts: MockAccountRepo::with(account),
    };
    let result = usecase.execute(id).await;
    assert!(matches!(result, Err(StorefrontError::Precondition(_))));
}

#[tokio::test]
async fn should_issue_phone_code_when_phone_on_file() {
    let mut account = active_account("priya@example.com");
    account.phone = Some("9876543210".into());
    let id = account.id;
    let usecase = SendPhoneOtpUseCase {
        accounts: MockAccountRepo::with(account),
    };
    usecase.execute(id).await.unwrap();

    let stored = usecase.accounts.snapshot().unwrap();
    assert!(stored.phone_otp.is_some());
}

#[tokio::test]
async fn should_mark_phone_verified_on_matching_code() {
    let mut account = active_account("priya@example.com");
    account.phone = Some("9876543210".into());
    account.phone_otp = Some(slot("654321"));
    let id = account.id;
    let usecase = VerifyPhoneUseCase {
        accounts: MockAccountRepo::with(account),
    };
    usecase.execute(id, "654321").await.unwrap();

    let stored = usecase.accounts.snapshot().unwrap();
    assert!(stored.is_phone_verified);
    assert!(stored.phone_otp.is_none());
    // Email state is untouched by the phone channel.
    assert!(stored.is_email_verified);
}

#[tokio::test]
async fn should_reject_expired_phone_code() {
    let mut account = active_account("priya@example.com");
    account.phone = Some("9876543210".into());
    account.phone_otp = Some(OtpSlot {
        code: "654321".into(),
        expires_at: Utc::now() - Duration::minutes(1),
    });
    let id = account.id;
    let usecase = VerifyPhoneUseCase {
        accounts: MockAccountRepo::with(account),
    };
    let result = usecase.execute(id, "654321").await;
    assert!(matches!(result, Err(StorefrontError::Expired)));
}

#[tokio::test]
async fn should_404_for_unknown_account() {
    let usecase = VerifyPhoneUseCase {
        accounts: MockAccountRepo::empty(),
    };
    let result = usecase.execute(Uuid::new_v4(), "123456").await;
    assert!(matches!(result, Err(StorefrontError::NotFound(_))));
}

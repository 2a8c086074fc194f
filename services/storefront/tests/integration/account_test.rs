use uuid::Uuid;

use bakehouse_storefront::error::StorefrontError;
use bakehouse_storefront::usecase::account::{
    GetAccountUseCase, LoginInput, LoginUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use bakehouse_storefront::usecase::token::validate_token;

use crate::helpers::{MockAccountRepo, TEST_JWT_SECRET, active_account, pending_account};

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_with_correct_credentials() {
    let account = active_account("priya@example.com");
    let usecase = LoginUseCase {
        accounts: MockAccountRepo::with(account.clone()),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let output = usecase
        .execute(LoginInput {
            email: "Priya@Example.com ".into(),
            password: "sourdough".into(),
        })
        .await
        .unwrap();

    assert_eq!(output.account.id, account.id);
    let claims = validate_token(&output.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.sub, account.id.to_string());
}

#[tokio::test]
async fn should_answer_identically_for_unknown_email_and_wrong_password() {
    let usecase = LoginUseCase {
        accounts: MockAccountRepo::with(active_account("priya@example.com")),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let unknown = usecase
        .execute(LoginInput {
            email: "nobody@example.com".into(),
            password: "sourdough".into(),
        })
        .await;
    let wrong = usecase
        .execute(LoginInput {
            email: "priya@example.com".into(),
            password: "wrong-password".into(),
        })
        .await;

    for result in [unknown, wrong] {
        match result {
            Err(StorefrontError::Unauthorized(msg)) => assert_eq!(msg, "invalid credentials"),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn should_block_login_for_unactivated_account() {
    let usecase = LoginUseCase {
        accounts: MockAccountRepo::with(pending_account("priya@example.com")),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = usecase
        .execute(LoginInput {
            email: "priya@example.com".into(),
            password: "sourdough".into(),
        })
        .await;
    assert!(matches!(result, Err(StorefrontError::Precondition(_))));
}

// ── GetAccount ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_account_by_id() {
    let account = active_account("priya@example.com");
    let id = account.id;
    let usecase = GetAccountUseCase {
        accounts: MockAccountRepo::with(account),
    };
    let found = usecase.execute(id).await.unwrap();
    assert_eq!(found.email, "priya@example.com");

    let result = usecase.execute(Uuid::new_v4()).await;
    assert!(matches!(result, Err(StorefrontError::NotFound(_))));
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_update_profile_fields_and_reset_phone_verification() {
    let mut account = active_account("priya@example.com");
    account.is_phone_verified = true;
    let id = account.id;
    let usecase = UpdateProfileUseCase {
        accounts: MockAccountRepo::with(account),
    };
    let updated = usecase
        .execute(
            id,
            UpdateProfileInput {
                name: Some("Priya S".into()),
                phone: Some("9123456780".into()),
                address: Some("12 Baker Street".into()),
                postal_code: Some("560001".into()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Priya S");
    assert_eq!(updated.phone.as_deref(), Some("9123456780"));
    assert_eq!(updated.postal_code.as_deref(), Some("560001"));
    assert!(!updated.is_phone_verified);
}

#[tokio::test]
async fn should_reject_empty_update() {
    let account = active_account("priya@example.com");
    let id = account.id;
    let usecase = UpdateProfileUseCase {
        accounts: MockAccountRepo::with(account),
    };
    let result = usecase
        .execute(
            id,
            UpdateProfileInput {
                name: None,
                phone: None,
                address: None,
                postal_code: None,
            },
        )
        .await;
    assert!(matches!(result, Err(StorefrontError::Validation(_))));
}

#[tokio::test]
async fn should_reject_bad_phone_and_postal_code() {
    let account = active_account("priya@example.com");
    let id = account.id;
    let usecase = UpdateProfileUseCase {
        accounts: MockAccountRepo::with(account),
    };

    let result = usecase
        .execute(
            id,
            UpdateProfileInput {
                name: None,
                phone: Some("12345".into()),
                address: None,
                postal_code: None,
            },
        )
        .await;
    assert!(matches!(result, Err(StorefrontError::Validation(_))));

    let result = usecase
        .execute(
            id,
            UpdateProfileInput {
                name: None,
                phone: None,
                address: None,
                postal_code: Some("012345".into()),
            },
        )
        .await;
    assert!(matches!(result, Err(StorefrontError::Validation(_))));
}

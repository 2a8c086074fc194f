//! SMTP delivery for transactional mail.

use lettre::message::header::ContentType;
use lettre::message::{MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use rust_decimal::Decimal;

use crate::config::StorefrontConfig;
use crate::domain::repository::NotificationGateway;
use crate::error::StorefrontError;
use crate::infra::templates::{self, EmailContent};

/// Outbound mailer. Without `SMTP_HOST` configured it runs in log-only
/// mode, which is what local development wants.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: String,
}

impl SmtpMailer {
    /// Log-only mailer, for tests and environments without a relay.
    pub fn disabled(from_address: impl Into<String>) -> Self {
        Self {
            transport: None,
            from_address: from_address.into(),
        }
    }

    pub fn from_config(config: &StorefrontConfig) -> anyhow::Result<Self> {
        let transport = match config.smtp_host.as_deref() {
            Some(host) => {
                let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
                    .port(config.smtp_port);
                if let (Some(user), Some(pass)) =
                    (&config.smtp_username, &config.smtp_password)
                {
                    builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
                }
                Some(builder.build())
            }
            None => None,
        };
        Ok(Self {
            transport,
            from_address: config.email_from.clone(),
        })
    }

    async fn deliver(&self, to: &str, content: EmailContent) -> Result<(), StorefrontError> {
        let Some(ref transport) = self.transport else {
            tracing::info!(to = %to, subject = %content.subject, "smtp not configured, logging email instead");
            return Ok(());
        };

        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e| anyhow::anyhow!("invalid from address: {e}"))?,
            )
            .to(to
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid recipient address: {e}"))?)
            .subject(&content.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(content.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(content.html),
                    ),
            )
            .map_err(|e| anyhow::anyhow!("build email message: {e}"))?;

        transport
            .send(message)
            .await
            .map_err(|e| anyhow::anyhow!("send email: {e}"))?;
        tracing::info!(to = %to, subject = %content.subject, "email sent");
        Ok(())
    }
}

impl NotificationGateway for SmtpMailer {
    async fn send_registration_otp(
        &self,
        to: &str,
        name: &str,
        code: &str,
    ) -> Result<(), StorefrontError> {
        self.deliver(to, templates::registration_otp(name, code)).await
    }

    async fn send_email_otp(
        &self,
        to: &str,
        name: &str,
        code: &str,
    ) -> Result<(), StorefrontError> {
        self.deliver(to, templates::email_otp(name, code)).await
    }

    async fn send_welcome(&self, to: &str, name: &str) -> Result<(), StorefrontError> {
        self.deliver(to, templates::welcome(name)).await
    }

    async fn send_order_confirmation(
        &self,
        to: &str,
        name: &str,
        order_number: &str,
        total: Decimal,
    ) -> Result<(), StorefrontError> {
        self.deliver(to, templates::order_confirmation(name, order_number, total))
            .await
    }
}

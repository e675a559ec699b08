//! SMTP delivery via lettre.

use async_trait::async_trait;
use grocerbot_protocols::{EmailMessage, Notifier, NotifyError};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

/// Port on which the relay expects implicit TLS instead of STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP relay and account.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Sends [`EmailMessage`]s through an authenticated SMTP relay.
pub struct EmailNotifier {
    settings: SmtpSettings,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailNotifier {
    /// Build the transport. No connection is made until the first send.
    pub fn new(settings: SmtpSettings) -> Result<Self, NotifyError> {
        let creds = Credentials::new(settings.username.clone(), settings.password.clone());

        let builder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .map_err(|e| NotifyError::Transport(format!("SMTP relay {}: {}", settings.host, e)))?;

        let mailer = builder.credentials(creds).port(settings.port).build();
        Ok(Self { settings, mailer })
    }

    pub fn settings(&self) -> &SmtpSettings {
        &self.settings
    }

    /// The `From` mailbox.
    ///
    /// `sender_display` may be a full `Name <addr>` mailbox; a bare name is
    /// paired with the account address.
    pub fn sender(&self, sender_display: &str) -> Result<Mailbox, NotifyError> {
        if let Ok(mailbox) = sender_display.parse::<Mailbox>() {
            return Ok(mailbox);
        }
        let address: Address = self.settings.username.parse().map_err(|e| {
            NotifyError::InvalidAddress {
                address: self.settings.username.clone(),
                message: format!("{}", e),
            }
        })?;
        let name = sender_display.trim();
        Ok(Mailbox::new((!name.is_empty()).then(|| name.to_string()), address))
    }

    /// Assemble the HTML message.
    pub fn build_message(&self, message: &EmailMessage) -> Result<Message, NotifyError> {
        let to: Mailbox = message
            .recipient
            .parse()
            .map_err(|e| NotifyError::InvalidAddress {
                address: message.recipient.clone(),
                message: format!("{}", e),
            })?;

        Message::builder()
            .from(self.sender(&message.sender_display)?)
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(message.html_body.clone())
            .map_err(|e| NotifyError::Build(e.to_string()))
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        let email = self.build_message(message)?;
        debug!(
            "Sending '{}' to {} via {}:{}",
            message.subject, message.recipient, self.settings.host, self.settings.port
        );
        self.mailer
            .send(email)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "smtp_tests.rs"]
mod tests;

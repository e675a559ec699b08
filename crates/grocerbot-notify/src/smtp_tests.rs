use super::*;

fn settings(port: u16) -> SmtpSettings {
    SmtpSettings {
        host: "smtp.example.com".into(),
        port,
        username: "bot@example.com".into(),
        password: "app-password".into(),
    }
}

fn summary(recipient: &str) -> EmailMessage {
    EmailMessage {
        sender_display: "Grocerbot".into(),
        recipient: recipient.into(),
        subject: "Shopping Trip on October 16th 2026 @ 9:05 am".into(),
        html_body: "<b>Cart:</b> https://shop.lowesfoods.com/checkout/cart".into(),
    }
}

#[test]
fn test_new_starttls_and_implicit_tls() {
    assert!(EmailNotifier::new(settings(587)).is_ok());
    let notifier = EmailNotifier::new(settings(465)).unwrap();
    assert_eq!(notifier.settings().port, 465);
}

#[test]
fn test_sender_from_bare_name() {
    let notifier = EmailNotifier::new(settings(587)).unwrap();
    let sender = notifier.sender("Grocerbot").unwrap();
    assert_eq!(sender.name.as_deref(), Some("Grocerbot"));
    assert_eq!(sender.email.to_string(), "bot@example.com");
}

#[test]
fn test_sender_from_full_mailbox() {
    let notifier = EmailNotifier::new(settings(587)).unwrap();
    let sender = notifier.sender("Pantry <pantry@example.com>").unwrap();
    assert_eq!(sender.name.as_deref(), Some("Pantry"));
    assert_eq!(sender.email.to_string(), "pantry@example.com");
}

#[test]
fn test_sender_with_invalid_account() {
    let notifier = EmailNotifier::new(SmtpSettings {
        username: "not-an-address".into(),
        ..settings(587)
    })
    .unwrap();
    let err = notifier.sender("Grocerbot").unwrap_err();
    assert!(matches!(err, NotifyError::InvalidAddress { ref address, .. } if address == "not-an-address"));
}

#[test]
fn test_build_message_is_html() {
    let notifier = EmailNotifier::new(settings(587)).unwrap();
    let message = notifier.build_message(&summary("family@example.com")).unwrap();
    let raw = String::from_utf8(message.formatted()).unwrap();

    assert!(raw.contains("To: family@example.com"));
    assert!(raw.contains("Subject: Shopping Trip on October 16th 2026 @ 9:05 am"));
    assert!(raw.contains("Content-Type: text/html"));
    assert!(raw.contains("https://shop.lowesfoods.com/checkout/cart"));
}

#[test]
fn test_build_message_invalid_recipient() {
    let notifier = EmailNotifier::new(settings(587)).unwrap();
    let err = notifier.build_message(&summary("family at example")).unwrap_err();
    assert!(matches!(err, NotifyError::InvalidAddress { .. }));
}

#[tokio::test]
async fn test_send_invalid_recipient_fails_before_connecting() {
    let notifier = EmailNotifier::new(settings(587)).unwrap();
    let err = notifier.send(&summary("")).await.unwrap_err();
    assert!(matches!(err, NotifyError::InvalidAddress { .. }));
}

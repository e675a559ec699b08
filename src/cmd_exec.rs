//! `exec` subcommand: replay shopper commands against one session.

use std::path::Path;

use anyhow::Context;
use tracing::{error, info};

use grocerbot_protocols::PageDriver;
use grocerbot_shopper::{Command, CommandOutcome, Shopper};

/// Read a JSON array of commands.
pub(crate) fn load_commands(path: &Path) -> anyhow::Result<Vec<Command>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read command file {}", path.display()))?;
    let commands: Vec<Command> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid command file {}", path.display()))?;
    Ok(commands)
}

/// Open the session, run every command in order, and close the session.
///
/// Stops at the first failing command.
pub(crate) async fn run_commands<D: PageDriver>(
    shopper: &mut Shopper<D>,
    commands: Vec<Command>,
) -> anyhow::Result<()> {
    shopper.init().await?;

    let outcome = execute(shopper, commands).await;

    if let Err(e) = shopper.shutdown().await {
        error!("Failed to close browser session: {}", e);
    }
    outcome
}

async fn execute<D: PageDriver>(
    shopper: &Shopper<D>,
    commands: Vec<Command>,
) -> anyhow::Result<()> {
    let total = commands.len();
    for (index, command) in commands.into_iter().enumerate() {
        info!("Command {}/{}: {:?}", index + 1, total, redact(&command));
        let outcome = shopper
            .process_command(command)
            .await
            .with_context(|| format!("Command {} of {} failed", index + 1, total))?;
        println!("{}", describe(&outcome));
    }
    Ok(())
}

/// Hide the password when logging a command.
fn redact(command: &Command) -> Command {
    match command {
        Command::Login { email, .. } => Command::Login {
            email: email.clone(),
            password: "***".to_string(),
        },
        other => other.clone(),
    }
}

fn describe(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Done => "ok".to_string(),
        CommandOutcome::Added(Some(item)) => format!(
            "added: {} @ {}{}",
            item.title,
            item.price,
            if item.on_sale { " (sale)" } else { "" }
        ),
        CommandOutcome::Added(None) => "not found".to_string(),
        CommandOutcome::CartUrl(url) => format!("cart: {}", url),
        CommandOutcome::Screenshot(path) => format!("screenshot: {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::num::NonZeroU32;
    use tempfile::NamedTempFile;

    use grocerbot_protocols::{CatalogItem, Price};

    #[test]
    fn test_load_commands() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"command": "login", "email": "me@example.com", "password": "pw"}},
                {{"command": "clear_cart"}},
                {{"command": "add_to_cart", "name": "milk", "quantity": 2}},
                {{"command": "add_to_cart", "name": "bread"}},
                {{"command": "show_cart"}},
                {{"command": "screenshot"}}
            ]"#
        )
        .unwrap();

        let commands = load_commands(file.path()).unwrap();
        assert_eq!(commands.len(), 6);
        assert_eq!(commands[1], Command::ClearCart);
        assert_eq!(
            commands[2],
            Command::AddToCart {
                name: "milk".to_string(),
                quantity: NonZeroU32::new(2).unwrap(),
            }
        );
        assert_eq!(
            commands[3],
            Command::AddToCart {
                name: "bread".to_string(),
                quantity: NonZeroU32::MIN,
            }
        );
    }

    #[test]
    fn test_load_commands_rejects_zero_quantity() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"command": "add_to_cart", "name": "milk", "quantity": 0}}]"#).unwrap();
        assert!(load_commands(file.path()).is_err());
    }

    #[test]
    fn test_load_commands_missing_file() {
        let err = load_commands(Path::new("/nonexistent/commands.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read command file"));
    }

    #[test]
    fn test_redact_hides_password() {
        let command = Command::Login {
            email: "me@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let shown = format!("{:?}", redact(&command));
        assert!(shown.contains("me@example.com"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_describe_added_item() {
        let item = CatalogItem {
            title: "Whole Milk".to_string(),
            price: Price::from_cents(349),
            price_text: "$3.49".to_string(),
            on_sale: true,
            image_url: None,
            was_previously_purchased: false,
        };
        let line = describe(&CommandOutcome::Added(Some(item)));
        assert!(line.starts_with("added: Whole Milk @ "));
        assert!(line.ends_with("(sale)"));
        assert_eq!(describe(&CommandOutcome::Added(None)), "not found");
    }
}

//! Operator interaction: credential prompts and blocking pause points.
//!
//! These are deliberate human-in-the-loop interrupts (MFA completion, error
//! inspection); they block until the operator presses Enter.

use std::io::{self, Write};

use tokio::task;

use crate::error::ScraperError;

/// Resolve credentials from the CLI values, prompting for whatever is
/// missing. The password prompt does not echo.
pub fn resolve_credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<(String, String), ScraperError> {
    let username = match username {
        Some(u) if !u.trim().is_empty() => u.trim().to_string(),
        _ => {
            print!("Vanguard username: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            line.trim().to_string()
        }
    };

    let password = match password {
        Some(p) if !p.is_empty() => p,
        _ => rpassword::prompt_password("Vanguard password: ")?,
    };

    if username.is_empty() || password.is_empty() {
        return Err(ScraperError::Credentials(
            "username and password are required".to_string(),
        ));
    }
    Ok((username, password))
}

/// Print `message` and block until the operator presses Enter. Runs on the
/// blocking pool so the browser event handler keeps draining.
pub async fn wait_for_operator(message: &str) -> Result<(), ScraperError> {
    let message = message.to_string();
    task::spawn_blocking(move || -> io::Result<()> {
        println!("{message}");
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(())
    })
    .await
    .map_err(io::Error::other)??;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credentials_passes_provided_values_through() {
        let (user, pass) =
            resolve_credentials(Some("user".into()), Some("secret".into())).unwrap();
        assert_eq!(user, "user");
        assert_eq!(pass, "secret");
    }

    #[test]
    fn test_resolve_credentials_trims_username() {
        let (user, _) =
            resolve_credentials(Some("  user \n".into()), Some("secret".into())).unwrap();
        assert_eq!(user, "user");
    }
}

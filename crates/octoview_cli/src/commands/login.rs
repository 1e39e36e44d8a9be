//! Interactive login via the OAuth authorization-code flow.
//!
//! Opens the browser on GitHub's authorize page, receives the code on a
//! local callback server, then runs the exchange-fetch-persist chain.

use std::time::Duration;

use console::{style, Term};
use octoview::oauth::{self, CallbackServer, OAuthConfig, DEFAULT_SCOPES};
use octoview::{usecase, CredentialStore};

use crate::config::Config;

use super::Context;

/// How long to wait for the user to finish authorizing in the browser.
const AUTHORIZE_TIMEOUT: Duration = Duration::from_secs(300);

pub async fn handle_login(
    context: &Context,
    config: &Config,
    manual_code: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let is_tty = Term::stdout().is_term();

    if let Some(credentials) = context.store.load().await? {
        println!(
            "Already signed in as {}. Run 'octoview logout' first to switch accounts.",
            style(&credentials.user_name).cyan()
        );
        return Ok(());
    }

    let Some((client_id, client_secret)) = config.oauth_app() else {
        return Err("no OAuth app configured. Set OCTOVIEW_CLIENT_ID and \
                    OCTOVIEW_CLIENT_SECRET, or add a [github] section with \
                    client_id and client_secret to the config file."
            .into());
    };

    let port = config.oauth.callback_port;
    let redirect = oauth::redirect_uri(port);
    let url = oauth::authorize_url(&client_id, DEFAULT_SCOPES, &redirect);

    if is_tty {
        println!("Please visit: {url}");
        println!();
        if !manual_code {
            println!(
                "Waiting for authorization (expires in {} seconds)...",
                AUTHORIZE_TIMEOUT.as_secs()
            );
        }
    } else {
        tracing::info!(authorize_url = %url, "Please authorize the application");
    }

    let _ = open::that(&url);

    let code = if manual_code {
        let term = Term::stdout();
        term.write_str("Paste the authorization code from the redirect URL: ")?;
        let code = term.read_line()?;
        let code = code.trim().to_string();
        if code.is_empty() {
            return Err("no authorization code entered".into());
        }
        code
    } else {
        CallbackServer::new(port)
            .wait_for_code(AUTHORIZE_TIMEOUT)
            .await?
    };

    let oauth_config = OAuthConfig {
        client_id,
        client_secret,
        redirect_uri: redirect,
    };

    let ok = usecase::login(
        &context.client,
        &context.store,
        context.transport.as_ref(),
        &oauth_config,
        &code,
    )
    .await;

    if !ok {
        return Err("login failed; nothing was saved. Try again.".into());
    }

    let user_name = context
        .store
        .load()
        .await?
        .map(|credentials| credentials.user_name)
        .unwrap_or_default();

    if is_tty {
        println!();
        println!(
            "{} Signed in as {}. Credentials saved to: {}",
            style("✓").green().bold(),
            style(&user_name).cyan(),
            context.store.path().display()
        );
        println!();
        println!("You can now use commands like:");
        println!("  octoview profile");
        println!("  octoview repos");
        println!("  octoview issue <owner>/<repo> --title \"...\"");
    } else {
        tracing::info!(user = %user_name, "authentication successful");
    }

    Ok(())
}

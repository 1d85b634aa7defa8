//! Generate secrets command implementation
//!
//! This module implements the `generate-secrets` command, which prints a
//! complete set of fresh production secrets in `.env` syntax, ready to be
//! pasted into a deployment platform's variable store.

use crate::config::schema::APP_KEY_COUNT;
use crate::config::secret::{generate_secret, SecretString};
use crate::core::secrets::{
    ADMIN_JWT_SECRET, API_TOKEN_SALT, ENCRYPTION_KEY, JWT_SECRET, TRANSFER_TOKEN_SALT,
};
use crate::core::server::APP_KEYS_VAR;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the generate-secrets command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Print only the variable lines, without banner or notes
    #[arg(short, long)]
    pub quiet: bool,
}

impl GenerateArgs {
    /// Execute the generate-secrets command
    ///
    /// Always succeeds; nothing is validated.
    pub fn execute(&self) -> i32 {
        print!("{}", self.render());
        0
    }

    /// Renders the output
    ///
    /// Every line that is not a variable assignment starts with `#`, so the
    /// full output is itself a valid env file.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if !self.quiet {
            out.push_str("# 🔐 Generated secrets for production environment variables\n");
            out.push_str("# Copy and paste these into your platform's variable store:\n");
            out.push('\n');
        }

        for (var, value) in generate_assignments() {
            out.push_str(&format!("{var}={value}\n"));
        }

        if !self.quiet {
            out.push('\n');
            out.push_str("# 📝 Important notes:\n");
            out.push_str(
                "# 1. DATABASE_URL - provision a PostgreSQL service; most platforms inject it\n",
            );
            out.push_str("# 2. PORT - set by the platform; it takes precedence over .env files\n");
            out.push_str(
                "# 3. Keep these values stable; changing them invalidates sessions and tokens\n",
            );
            out.push_str("# 4. Run `cms-bootstrap check` after deploying to verify the setup\n");
        }

        out
    }
}

/// Fresh `VAR=value` pairs in the order they are printed
fn generate_assignments() -> Vec<(&'static str, String)> {
    let app_keys = (0..APP_KEY_COUNT)
        .map(|_| expose(generate_secret()))
        .collect::<Vec<_>>()
        .join(",");

    let mut assignments = vec![("NODE_ENV", "production".to_string()), (APP_KEYS_VAR, app_keys)];
    assignments.extend(
        [
            ADMIN_JWT_SECRET,
            JWT_SECRET,
            API_TOKEN_SALT,
            TRANSFER_TOKEN_SALT,
            ENCRYPTION_KEY,
        ]
        .into_iter()
        .map(|request| (request.var, expose(generate_secret()))),
    );
    assignments
}

fn expose(secret: SecretString) -> String {
    secret.expose_secret().as_str().to_string()
}

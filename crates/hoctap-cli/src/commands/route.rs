//! The `hoctap route` command.

use std::path::PathBuf;

use anyhow::Result;

use hoctap_core::model::Role;
use hoctap_core::routing::{guard, resolve, GuardOutcome};
use hoctap_core::session::Viewer;

use super::{connect, Friendly};

pub async fn execute(config: Option<PathBuf>, path: String, as_role: Option<String>) -> Result<()> {
    let viewer = match as_role {
        Some(role) => Viewer {
            authenticated: true,
            role: role.parse::<Role>().map_err(anyhow::Error::msg)?,
            verified: true,
        },
        None => {
            let ctx = connect(config)?;
            let session = ctx.api.session();
            // Role and verification come from the profile, which is not persisted.
            if session.is_authenticated() && session.user().is_none() {
                ctx.api.me().await.friendly()?;
            }
            session.viewer()
        }
    };

    match guard(&path, &viewer) {
        GuardOutcome::Allow => {
            println!("allow {path}");
            if let Some(m) = resolve(&path) {
                let mut params: Vec<_> = m.params.iter().collect();
                params.sort();
                for (name, value) in params {
                    println!("  {name} = {value}");
                }
            }
        }
        GuardOutcome::Redirect(to) => println!("redirect {to}"),
        GuardOutcome::NotFound => println!("not found"),
    }
    Ok(())
}

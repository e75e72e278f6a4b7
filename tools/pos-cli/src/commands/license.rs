//! License activation commands.

use anyhow::Result;
use chrono::Utc;
use pos_auth::License;
use serde_json::json;

use super::{LicenseArgs, LicenseCommand};
use crate::context::Context;

/// Run the license command.
pub async fn run(args: LicenseArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let cache = session.cache();

    match args.command.unwrap_or(LicenseCommand::Status) {
        LicenseCommand::Activate { name, key } => {
            let license = License::activate(cache, &name, &key, Utc::now())?;
            if ctx.output.is_json() {
                ctx.output.json(&license);
            } else {
                ctx.output.success("Licencia activada");
                ctx.output.kv("Expira", &license.expires_at.format("%Y-%m-%d").to_string());
            }
        }
        LicenseCommand::Deactivate => {
            License::deactivate(cache)?;
            ctx.output.success("Licencia desactivada");
        }
        LicenseCommand::Status => status(License::load(cache)?, ctx),
    }
    Ok(())
}

fn status(license: Option<License>, ctx: &Context) {
    let now = Utc::now();

    if ctx.output.is_json() {
        let remaining = license.as_ref().map(|l| l.time_remaining(now).to_string());
        ctx.output.json(&json!({
            "license": license,
            "active": license.as_ref().is_some_and(|l| l.is_active(now)),
            "remaining": remaining,
        }));
        return;
    }

    let Some(license) = license else {
        ctx.output.info("Sin licencia activa. Usa `pos license activate`.");
        return;
    };

    ctx.output.header("Licencia");
    ctx.output.kv("Nombre", &license.name);
    ctx.output.kv("Clave", &license.key);
    ctx.output.kv("Expira", &license.expires_at.format("%Y-%m-%d").to_string());
    ctx.output.kv("Restante", &license.time_remaining(now).to_string());
    if !license.is_active(now) {
        ctx.output.warn("La licencia ha expirado");
    }
}

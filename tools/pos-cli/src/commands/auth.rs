//! Sign-in commands.

use anyhow::Result;
use dialoguer::{Input, Password};
use serde_json::json;

use super::LoginArgs;
use crate::context::Context;

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;

    let email = match args.email {
        Some(email) => email,
        None => Input::<String>::new()
            .with_prompt("Email")
            .allow_empty(true)
            .interact_text()?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Contraseña")
            .allow_empty_password(true)
            .interact()?,
    };

    let spinner = ctx.output.spinner("Iniciando sesión...");
    let result = session.login(&email, &password).await;
    spinner.finish_and_clear();
    let user = result?.clone();

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "user": user, "company": session.company() }));
        return Ok(());
    }

    ctx.output.success(&format!("Bienvenido, {}", user.name));
    if let Some(company) = session.company() {
        ctx.output.kv("Empresa", &company.name);
    }
    Ok(())
}

/// Run the logout command.
pub async fn logout(ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let was_signed_in = session.is_authenticated();
    session.logout()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "signed_out": was_signed_in }));
    } else if was_signed_in {
        ctx.output.success("Sesión cerrada");
    } else {
        ctx.output.info("No había una sesión activa");
    }
    Ok(())
}

/// Run the whoami command.
pub async fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "user": session.user(), "company": session.company() }));
        return Ok(());
    }

    let Some(user) = session.user() else {
        ctx.output.info("No hay sesión activa. Usa `pos login` para entrar.");
        return Ok(());
    };

    ctx.output.header("Sesión");
    ctx.output.kv("Nombre", &user.name);
    ctx.output.kv("Email", &user.email);
    ctx.output.kv("Rol", user.role.label());
    ctx.output.kv("Permisos", &user.permissions.join(", "));
    if let Some(company) = session.company() {
        ctx.output.kv("Empresa", &company.name);
        ctx.output.kv("RFC", &company.rfc);
        ctx.output.kv("Régimen", &company.tax_regime);
    }
    Ok(())
}

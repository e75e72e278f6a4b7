//! Dashboard figures for customers, suppliers, staff, invoicing and takings.

use anyhow::Result;
use pos_auth::user_counts;
use pos_commerce::prelude::InvoiceStatus;
use pos_commerce::reports;
use serde_json::json;

use crate::context::Context;

/// Run the summary command.
pub async fn run(ctx: &Context) -> Result<()> {
    let data = ctx.datasets()?;
    let currency = ctx.currency()?;
    let session = ctx.open_session()?;
    let sales = ctx.sales(&session)?;

    let customers = reports::customer_counts(&data.customers, currency);
    let suppliers = reports::supplier_summary(&data.suppliers, currency);
    let users = user_counts(&data.users);
    let invoices = reports::invoice_status_counts(&data.invoices);
    let payments = reports::payment_breakdown(&sales, currency);
    let alerts = reports::restock_alerts(&data.products).len();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "customers": customers,
            "suppliers": suppliers,
            "users": users,
            "invoices": invoices,
            "payments": payments,
            "restock_alerts": alerts,
        }));
        return Ok(());
    }

    ctx.output.header("Clientes");
    ctx.output.kv("Total", &customers.total.to_string());
    ctx.output.kv("Frecuentes", &customers.frequent.to_string());
    ctx.output.kv("Nuevos", &customers.new.to_string());
    ctx.output.kv("Morosos", &customers.delinquent.to_string());
    ctx.output.kv("Ventas totales", &customers.total_purchases.display());

    ctx.output.header("Proveedores");
    ctx.output.kv("Activos", &format!("{} de {}", suppliers.active, suppliers.total));
    ctx.output.kv("Compras totales", &suppliers.total_purchases.display());
    ctx.output.kv("Saldo pendiente", &suppliers.total_balance.display());
    ctx.output.kv(
        "Plazo promedio",
        &format!("{} días", suppliers.average_payment_days),
    );

    ctx.output.header("Usuarios");
    ctx.output.kv("Total", &users.total.to_string());
    ctx.output.kv("Activos", &users.active.to_string());
    ctx.output.kv("Inactivos", &users.inactive.to_string());
    ctx.output.kv("Administradores", &users.admins.to_string());

    ctx.output.header("Facturación");
    ctx.output.kv("Total", &data.invoices.len().to_string());
    ctx.output.kv("Timbradas", &invoices[&InvoiceStatus::Stamped].to_string());
    ctx.output.kv("Borradores", &invoices[&InvoiceStatus::Draft].to_string());
    ctx.output.kv("Canceladas", &invoices[&InvoiceStatus::Cancelled].to_string());

    ctx.output.header("Ventas por forma de pago");
    if sales.is_empty() {
        ctx.output.info("Sin ventas registradas");
    } else {
        for share in &payments {
            ctx.output.kv(
                share.method.display_name(),
                &format!("{} ({} del total, {} ventas)", share.total.display(), share.percent(), share.sales),
            );
        }
    }

    ctx.output.header("Inventario");
    ctx.output.kv("Productos por reabastecer", &alerts.to_string());
    Ok(())
}

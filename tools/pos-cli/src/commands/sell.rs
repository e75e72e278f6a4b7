//! Ring up a sale.

use anyhow::{bail, Result};
use pos_commerce::prelude::*;
use serde_json::json;

use super::SellArgs;
use crate::context::Context;

/// Run the sell command.
pub async fn run(args: SellArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let cashier = session.require_user()?.id.clone();
    let payment: PaymentMethod = args.payment.parse()?;
    let data = ctx.datasets()?;

    let mut cart = Cart::new(ctx.currency()?);
    for item in &args.items {
        let (code, quantity) = parse_item(item)?;
        let product = data
            .find_product(code)
            .ok_or_else(|| CommerceError::ProductNotFound(code.to_string()))?;

        if !product.is_active {
            ctx.output.warn(&format!("{} está inactivo", product.name));
        }
        cart.add_item(product, quantity);

        if let Some(line) = cart.get_line(&product.id) {
            if line.quantity > product.stock {
                ctx.output.warn(&format!(
                    "{}: {} en carrito, {} en existencia",
                    product.code, line.quantity, product.stock
                ));
            }
        }
    }

    let totals = cart.compute_totals();
    if args.dry_run {
        if ctx.output.is_json() {
            ctx.output.json(&json!({ "lines": cart.lines(), "totals": totals }));
        } else {
            print_cart(&cart, &totals, ctx);
        }
        return Ok(());
    }

    let sale = match complete_sale(&mut cart, payment, &cashier) {
        Ok(sale) => sale,
        Err(e) if e.is_advisory() => {
            ctx.output.warn(&e.to_string());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    ctx.record_sale(&session, &sale)?;

    if ctx.output.is_json() {
        ctx.output.json(&sale);
        return Ok(());
    }

    print_lines(&sale.items, ctx);
    print_totals(&sale.subtotal, &sale.tax, &sale.total, ctx);
    ctx.output.success(&format!(
        "Venta {} completada ({})",
        sale.id,
        sale.payment_method.display_name()
    ));
    Ok(())
}

fn print_cart(cart: &Cart, totals: &CartTotals, ctx: &Context) {
    if cart.is_empty() {
        ctx.output.info("El carrito está vacío");
        return;
    }
    print_lines(cart.lines(), ctx);
    print_totals(&totals.subtotal, &totals.tax, &totals.total, ctx);
}

fn print_lines(lines: &[CartLine], ctx: &Context) {
    let widths = [8, 24, 6, 10, 10];
    ctx.output.header("Carrito");
    ctx.output
        .table_row(&["Código", "Producto", "Cant.", "Precio", "Importe"], &widths);
    for line in lines {
        ctx.output.table_row(
            &[
                line.product_code.as_str(),
                line.product_name.as_str(),
                line.quantity.to_string().as_str(),
                line.unit_price.display().as_str(),
                line.line_total.display().as_str(),
            ],
            &widths,
        );
    }
}

fn print_totals(subtotal: &Money, tax: &Money, total: &Money, ctx: &Context) {
    ctx.output.info("");
    ctx.output.kv("Subtotal", &subtotal.display());
    ctx.output.kv(&format!("IVA ({})", TAX_RATE), &tax.display());
    ctx.output.kv("Total", &total.display());
}

/// Split `CODE` or `CODExQTY` into a code and a quantity (default 1).
fn parse_item(item: &str) -> Result<(&str, i64)> {
    let item = item.trim();
    if item.is_empty() {
        bail!("Empty item");
    }
    if let Some(pos) = item.rfind(['x', 'X']) {
        let (code, qty) = (&item[..pos], &item[pos + 1..]);
        if let Ok(quantity) = qty.parse::<i64>() {
            if code.is_empty() {
                bail!("Missing product code in '{}'", item);
            }
            return Ok((code, quantity));
        }
    }
    Ok((item, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("COC001").unwrap(), ("COC001", 1));
        assert_eq!(parse_item("COC001x3").unwrap(), ("COC001", 3));
        assert_eq!(parse_item("pan001X12").unwrap(), ("pan001", 12));
        assert_eq!(parse_item("BOX").unwrap(), ("BOX", 1));
        assert!(parse_item("x3").is_err());
        assert!(parse_item("  ").is_err());
    }
}

//! Inventory overview.

use anyhow::Result;
use pos_commerce::prelude::*;
use pos_commerce::reports;
use serde::Serialize;

use super::StockArgs;
use crate::context::Context;
use crate::output::stock_badge;

#[derive(Serialize)]
struct StockRow<'a> {
    code: &'a str,
    name: &'a str,
    category: &'a str,
    stock: i64,
    min_stock: i64,
    status: StockStatus,
    value: Money,
}

/// Run the stock command.
pub async fn run(args: StockArgs, ctx: &Context) -> Result<()> {
    let data = ctx.datasets()?;
    let currency = ctx.currency()?;

    let mut criteria = FilterCriteria::for_record::<Product>();
    if let Some(category) = &args.category {
        criteria = criteria.with_equality("category", Accept::parse(category.as_str()));
    }
    let products: Vec<Product> = filter(&data.products, &criteria).cloned().collect();
    let listed: Vec<&Product> = if args.alerts {
        reports::restock_alerts(&products)
    } else {
        products.iter().collect()
    };

    let rows: Vec<StockRow> = listed
        .iter()
        .map(|p| StockRow {
            code: &p.code,
            name: &p.name,
            category: &p.category,
            stock: p.stock,
            min_stock: p.min_stock,
            status: p.stock_status(),
            value: p.inventory_value(),
        })
        .collect();
    let counts = reports::count_by_stock_status(&products);
    let total_value = reports::inventory_value(&products, currency);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "products": rows,
            "counts": counts,
            "inventory_value": total_value,
        }));
        return Ok(());
    }

    ctx.output.header("Inventario");
    let widths = [8, 22, 12, 6, 6, 10, 12];
    ctx.output.table_row(
        &["Código", "Producto", "Categoría", "Stock", "Mín.", "Estado", "Valor"],
        &widths,
    );
    for row in &rows {
        ctx.output.table_row(
            &[
                row.code,
                row.name,
                row.category,
                row.stock.to_string().as_str(),
                row.min_stock.to_string().as_str(),
                stock_badge(row.status).as_str(),
                row.value.display().as_str(),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    for (status, count) in &counts {
        ctx.output.kv(status.display_name(), &count.to_string());
    }
    ctx.output.kv("Valor del inventario", &total_value.display());
    Ok(())
}

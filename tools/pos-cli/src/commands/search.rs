//! Search and filter a record collection.

use anyhow::{anyhow, Result};
use pos_commerce::prelude::*;
use serde::Serialize;

use super::{Collection, SearchArgs};
use crate::context::Context;
use crate::output::status_badge;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let data = ctx.datasets()?;

    match args.collection {
        Collection::Products => show(
            &data.products,
            &args,
            &[("code", 8), ("name", 24), ("category", 12), ("price", 10), ("stock", 6), ("status", 12)],
            ctx,
        ),
        Collection::Customers => show(
            &data.customers,
            &args,
            &[("code", 8), ("name", 26), ("email", 28), ("type", 10), ("status", 8)],
            ctx,
        ),
        Collection::Suppliers => show(
            &data.suppliers,
            &args,
            &[("code", 8), ("name", 34), ("contact_name", 22), ("payment_terms", 8), ("status", 8)],
            ctx,
        ),
        Collection::Invoices => show(
            &data.invoices,
            &args,
            &[("id", 8), ("customer", 16), ("customer_rfc", 14), ("total", 10), ("status", 10), ("date", 10)],
            ctx,
        ),
        Collection::Audit => {
            show(
                &data.audit,
                &args,
                &[("timestamp", 19), ("user", 16), ("action", 18), ("severity", 8), ("ip_address", 15)],
                ctx,
            )?;
            if !ctx.output.is_json() && args.values_of.is_none() {
                let today = chrono::Local::now().date_naive();
                let stats = AuditStats::collect(&data.audit, today);
                ctx.output.info("");
                ctx.output.kv("Total", &stats.total.to_string());
                ctx.output.kv("Hoy", &stats.today.to_string());
                ctx.output.kv("Advertencias", &stats.warnings.to_string());
                ctx.output.kv("Errores", &stats.errors.to_string());
            }
            Ok(())
        }
        Collection::Users => show(
            &data.users,
            &args,
            &[("name", 24), ("email", 22), ("role", 10), ("active", 6)],
            ctx,
        ),
    }
}

/// Build criteria from the collection defaults plus command-line overrides.
fn criteria_for<R: Record>(args: &SearchArgs) -> Result<FilterCriteria> {
    let mut criteria = FilterCriteria::for_record::<R>().with_search(args.query.as_str());
    if !args.fields.is_empty() {
        criteria = criteria.with_fields(args.fields.iter().map(String::as_str));
    }
    for filter in &args.filters {
        let (field, value) = filter
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid filter '{}': expected field=value", filter))?;
        criteria = criteria.with_equality(field.trim(), Accept::parse(value.trim()));
    }
    Ok(criteria)
}

fn show<R: Record + Serialize>(
    records: &[R],
    args: &SearchArgs,
    columns: &[(&str, usize)],
    ctx: &Context,
) -> Result<()> {
    if let Some(field) = &args.values_of {
        let values = distinct_values(records, field);
        if ctx.output.is_json() {
            ctx.output.json(&values);
        } else {
            ctx.output.header(&format!("Valores de {}", field));
            for value in &values {
                ctx.output.kv("-", value);
            }
        }
        return Ok(());
    }

    let criteria = criteria_for::<R>(args)?;
    let visible = filter_to_vec(records, &criteria);

    if ctx.output.is_json() {
        ctx.output.json(&visible);
        return Ok(());
    }

    if visible.is_empty() {
        ctx.output.info("Sin resultados");
        return Ok(());
    }

    let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let widths: Vec<usize> = columns.iter().map(|(_, width)| *width).collect();
    ctx.output.table_row(&names, &widths);
    for record in &visible {
        let cells: Vec<String> = names
            .iter()
            .map(|name| {
                let value = record.field(name).map(|v| v.to_string()).unwrap_or_default();
                if *name == "status" || *name == "severity" {
                    status_badge(&value)
                } else {
                    value
                }
            })
            .collect();
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        ctx.output.table_row(&cells, &widths);
    }

    ctx.output.info("");
    ctx.output
        .info(&format!("{} de {} registros", visible.len(), records.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: SearchArgs,
    }

    fn parse(argv: &[&str]) -> SearchArgs {
        Harness::parse_from(std::iter::once("search").chain(argv.iter().copied())).args
    }

    #[test]
    fn test_criteria_from_flags() {
        let args = parse(&["customers", "-q", "maria", "-f", "type=frequent", "-f", "status=ALL"]);
        let criteria = criteria_for::<Customer>(&args).unwrap();

        assert_eq!(criteria.search_text, "maria");
        assert_eq!(criteria.field_selectors, vec!["name", "code", "email"]);
        assert_eq!(criteria.equality_filters["type"], Accept::Value("frequent".into()));
        assert!(criteria.equality_filters["status"].is_all());
    }

    #[test]
    fn test_field_override_and_bad_filter() {
        let args = parse(&["products", "--fields", "category,unit"]);
        let criteria = criteria_for::<Product>(&args).unwrap();
        assert_eq!(criteria.field_selectors, vec!["category", "unit"]);

        let args = parse(&["products", "-f", "status"]);
        assert!(criteria_for::<Product>(&args).is_err());
    }
}

//! Built-in datasets and loading of replacement JSON files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use pos_auth::{Role, User};
use pos_commerce::prelude::*;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Every collection the CLI can list.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub suppliers: Vec<Supplier>,
    pub invoices: Vec<Invoice>,
    pub audit: Vec<AuditEntry>,
    pub users: Vec<User>,
}

impl Datasets {
    /// Built-in data, optionally replaced collection by collection from `dir`.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let mut data = Self::seed();
        if let Some(dir) = dir {
            replace_from(dir, "products.json", &mut data.products)?;
            replace_from(dir, "customers.json", &mut data.customers)?;
            replace_from(dir, "suppliers.json", &mut data.suppliers)?;
            replace_from(dir, "invoices.json", &mut data.invoices)?;
            replace_from(dir, "audit.json", &mut data.audit)?;
            replace_from(dir, "users.json", &mut data.users)?;
        }
        Ok(data)
    }

    pub fn seed() -> Self {
        Self {
            products: seed_products(),
            customers: seed_customers(),
            suppliers: seed_suppliers(),
            invoices: seed_invoices(),
            audit: seed_audit(),
            users: seed_users(),
        }
    }

    /// Look a product up by shelf code or barcode, ignoring case.
    pub fn find_product(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| {
            p.code.eq_ignore_ascii_case(code)
                || p.barcode.as_deref().is_some_and(|b| b == code)
        })
    }
}

fn replace_from<T: DeserializeOwned>(dir: &Path, file: &str, target: &mut Vec<T>) -> Result<()> {
    let path = dir.join(file);
    if !path.exists() {
        return Ok(());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    *target = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse dataset: {}", path.display()))?;
    debug!(path = %path.display(), records = target.len(), "loaded dataset");
    Ok(())
}

fn mxn(cents: i64) -> Money {
    Money::new(cents, Currency::MXN)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn seed_products() -> Vec<Product> {
    let rows = [
        ("1", "COC001", "Coca Cola 600ml", "Bebidas", 2500, 1800, 50, 20),
        ("2", "PAN001", "Pan Blanco", "Panadería", 1000, 600, 8, 15),
        ("3", "LEC001", "Leche Entera 1L", "Lácteos", 2100, 1550, 20, 10),
        ("4", "ARR001", "Arroz Premium 1kg", "Abarrotes", 1850, 1200, 2, 5),
        ("5", "ACE001", "Aceite Vegetal 1L", "Abarrotes", 3200, 2400, 25, 10),
        ("6", "AZU001", "Azúcar Refinada 1kg", "Abarrotes", 2200, 1650, 40, 15),
    ];
    rows.into_iter()
        .map(|(id, code, name, category, price, cost, stock, min)| {
            Product::new(id, code, name, category, mxn(price))
                .with_cost(mxn(cost))
                .with_stock(stock, min)
        })
        .collect()
}

fn fiscal(rfc: &str, business_name: &str, address: &str, zip: &str, regime: &str) -> FiscalData {
    FiscalData {
        rfc: rfc.to_string(),
        business_name: business_name.to_string(),
        fiscal_address: address.to_string(),
        zip_code: zip.to_string(),
        tax_regime: regime.to_string(),
        cfdi_use: None,
    }
}

const PERSONAS_MORALES: &str = "Régimen General de Ley Personas Morales";

fn customer(id: &str, code: &str, name: &str, email: &str, kind: CustomerType, purchases: i64) -> Customer {
    Customer {
        id: CustomerId::new(id),
        code: code.to_string(),
        name: name.to_string(),
        email: Some(email.to_string()),
        phone: None,
        address: None,
        fiscal_data: None,
        customer_type: kind,
        total_purchases: mxn(purchases),
        last_purchase: None,
        discount_percent: None,
        credit_limit: None,
        current_credit: None,
        status: CustomerStatus::Active,
        notes: None,
    }
}

fn seed_customers() -> Vec<Customer> {
    let mut maria = customer("1", "CLI001", "María González", "maria.gonzalez@email.com", CustomerType::Frequent, 1542050);
    maria.phone = Some("555-0123".into());
    maria.fiscal_data = Some(FiscalData {
        cfdi_use: Some("G01".into()),
        ..fiscal(
            "GOMA850101ABC",
            "María González",
            "Av. Principal 123, Col. Centro",
            "12345",
            "Régimen de Incorporación Fiscal",
        )
    });
    maria.last_purchase = Some(date(2024, 1, 15));
    maria.discount_percent = Some(5);
    maria.credit_limit = Some(mxn(500000));
    maria.current_credit = Some(mxn(120000));

    let mut abc = customer("2", "CLI002", "Empresa ABC S.A. de C.V.", "facturacion@empresaabc.com", CustomerType::Frequent, 4589075);
    abc.fiscal_data = Some(FiscalData {
        cfdi_use: Some("G03".into()),
        ..fiscal(
            "EAB950315XYZ",
            "Empresa ABC S.A. de C.V.",
            "Blvd. Industrial 456, Zona Norte",
            "54321",
            PERSONAS_MORALES,
        )
    });
    abc.last_purchase = Some(date(2024, 1, 20));
    abc.discount_percent = Some(10);
    abc.credit_limit = Some(mxn(2000000));
    abc.current_credit = Some(mxn(0));

    let mut carlos = customer("3", "CLI003", "Carlos Pérez", "carlos.perez@email.com", CustomerType::New, 85000);
    carlos.last_purchase = Some(date(2024, 1, 22));

    let mut ana = customer("4", "CLI004", "Ana Martínez", "ana.martinez@email.com", CustomerType::Delinquent, 234000);
    ana.last_purchase = Some(date(2023, 12, 10));
    ana.credit_limit = Some(mxn(300000));
    ana.current_credit = Some(mxn(280000));
    ana.status = CustomerStatus::Blocked;
    ana.notes = Some("Pagos atrasados, requiere seguimiento".into());

    vec![maria, abc, carlos, ana]
}

fn seed_suppliers() -> Vec<Supplier> {
    let rows = [
        ("1", "PROV001", "Distribuidora El Sol S.A. de C.V.", "Juan Carlos López", "compras@elsol.com.mx", Some("DES850315ABC"), "30 días", 12545075, 1500000, SupplierStatus::Active, date(2024, 1, 20)),
        ("2", "PROV002", "Productos Frescos del Valle", "María Elena Ramírez", "ventas@frescosvallle.com", Some("PFV920408XYZ"), "15 días", 8932050, 850000, SupplierStatus::Active, date(2024, 1, 18)),
        ("3", "PROV003", "Abarrotes Mayoristas Unidos", "Roberto Hernández", "pedidos@abarrotes-unidos.com", Some("AMU780620DEF"), "45 días", 6789025, 1230000, SupplierStatus::Active, date(2024, 1, 15)),
        ("4", "PROV004", "Lácteos y Derivados del Norte", "Ana Patricia Vega", "facturacion@lacteosnorte.mx", None, "21 días", 4560000, 0, SupplierStatus::Inactive, date(2024, 1, 10)),
    ];
    rows.into_iter()
        .map(
            |(id, code, name, contact, email, rfc, terms, purchases, balance, status, last)| Supplier {
                id: SupplierId::new(id),
                code: code.to_string(),
                name: name.to_string(),
                contact_name: Some(contact.to_string()),
                email: Some(email.to_string()),
                phone: None,
                address: None,
                fiscal_data: rfc.map(|rfc| fiscal(rfc, name, "", "", PERSONAS_MORALES)),
                payment_terms: terms.to_string(),
                total_purchases: mxn(purchases),
                last_purchase: Some(last),
                status,
                balance: Some(mxn(balance)),
            },
        )
        .collect()
}

fn seed_invoices() -> Vec<Invoice> {
    let mut stamped = Invoice::draft("A", "001", "María García", "GARM850101ABC", mxn(23450), date(2024, 1, 15), "Efectivo");
    stamped.status = InvoiceStatus::Stamped;
    stamped.uuid = Some("12345678-1234-1234-1234-123456789012".into());

    let draft = Invoice::draft("A", "002", "Juan Pérez", "PEJJ800505XYZ", mxn(15675), date(2024, 1, 15), "Tarjeta");

    let mut cancelled = Invoice::draft("A", "003", "Ana López", "LOPA900815DEF", mxn(29850), date(2024, 1, 14), "Transferencia");
    cancelled.status = InvoiceStatus::Cancelled;

    vec![stamped, draft, cancelled]
}

fn seed_audit() -> Vec<AuditEntry> {
    let rows = [
        ("1", "2025-10-02 10:30:45", "Juan Pérez", "admin", "login", "Inicio de sesión exitoso", "192.168.1.100", Severity::Info),
        ("2", "2025-10-02 10:35:12", "María García", "cashier", "sale_created", "Venta registrada - Total: $1,234.00", "192.168.1.101", Severity::Info),
        ("3", "2025-10-02 11:15:30", "Juan Pérez", "admin", "user_created", "Usuario creado: Carlos López", "192.168.1.100", Severity::Warning),
        ("4", "2025-10-02 11:45:00", "Pedro Ramírez", "warehouse", "inventory_updated", "Actualización de inventario - Producto: ABC123", "192.168.1.102", Severity::Info),
        ("5", "2025-10-02 12:20:18", "María García", "cashier", "refund_processed", "Devolución procesada - Ticket: #12345", "192.168.1.101", Severity::Warning),
        ("6", "2025-10-02 13:00:00", "Sistema", "system", "backup_completed", "Respaldo automático completado", "localhost", Severity::Info),
        ("7", "2025-10-02 14:30:45", "Juan Pérez", "admin", "settings_changed", "Configuración modificada - Reportes automáticos", "192.168.1.100", Severity::Warning),
        ("8", "2025-10-02 15:10:22", "Desconocido", "unknown", "failed_login", "Intento de inicio de sesión fallido", "203.0.113.45", Severity::Error),
    ];
    rows.into_iter()
        .map(|(id, ts, user, role, action, description, ip, severity)| AuditEntry {
            id: AuditEntryId::new(id),
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap_or_default(),
            user: user.to_string(),
            role: role.to_string(),
            action: action.to_string(),
            description: description.to_string(),
            ip_address: ip.to_string(),
            severity,
        })
        .collect()
}

fn seed_users() -> Vec<User> {
    let mut users = vec![
        User::new("1", "admin@empresa.com", "Administrador Principal", Role::Admin, "company-1"),
        User::new("2", "maria@empresa.com", "María González", Role::Cashier, "company-1"),
        User::new("3", "carlos@empresa.com", "Carlos Hernández", Role::Warehouse, "company-1"),
        User::new("4", "ana@empresa.com", "Ana López", Role::Accountant, "company-1"),
    ];
    users[3].is_active = false;
    users
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_matches_catalog() {
        let data = Datasets::seed();
        assert_eq!(data.products.len(), 6);
        assert_eq!(data.find_product("coc001").map(|p| p.price), Some(mxn(2500)));
        assert!(data.find_product("XYZ999").is_none());
        assert_eq!(data.invoices[0].total, mxn(27202));
        assert_eq!(data.audit.len(), 8);
    }

    #[test]
    fn test_seed_stock_levels() {
        let data = Datasets::seed();
        let statuses: Vec<StockStatus> = data.products.iter().map(Product::stock_status).collect();
        assert_eq!(
            statuses,
            vec![
                StockStatus::Normal,
                StockStatus::Low,
                StockStatus::Normal,
                StockStatus::Critical,
                StockStatus::Normal,
                StockStatus::Normal,
            ]
        );
    }

    #[test]
    fn test_directory_replaces_only_present_files() {
        let dir = tempfile::tempdir().unwrap();
        let products = vec![Product::new("9", "TOR001", "Tortillas 1kg", "Panadería", mxn(2300))];
        fs::write(
            dir.path().join("products.json"),
            serde_json::to_string(&products).unwrap(),
        )
        .unwrap();

        let data = Datasets::load(Some(dir.path())).unwrap();
        assert_eq!(data.products, products);
        assert_eq!(data.customers.len(), 4);
    }

    #[test]
    fn test_bad_dataset_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("users.json"), "[{").unwrap();
        let err = Datasets::load(Some(dir.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("users.json"));
    }
}

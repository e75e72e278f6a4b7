//! Cart totals and line bookkeeping across operation sequences.

use pos_commerce::prelude::*;

fn mxn(cents: i64) -> Money {
    Money::new(cents, Currency::MXN)
}

fn catalog() -> Vec<Product> {
    vec![
        Product::new("1", "COC001", "Coca Cola 600ml", "Bebidas", mxn(2500)).with_stock(50, 20),
        Product::new("2", "PAN001", "Pan Blanco", "Panadería", mxn(1000)).with_stock(30, 15),
        Product::new("3", "LEC001", "Leche Entera 1L", "Lácteos", mxn(2100)).with_stock(20, 10),
        Product::new("4", "ARR001", "Arroz Premium 1kg", "Abarrotes", mxn(1850)).with_stock(15, 10),
    ]
}

fn expected_subtotal(cart: &Cart) -> i64 {
    cart.lines()
        .iter()
        .map(|l| l.unit_price.amount_cents * l.quantity)
        .sum()
}

#[test]
fn test_subtotal_tracks_lines_through_mixed_operations() {
    let products = catalog();
    let mut cart = Cart::new(Currency::MXN);

    cart.add_item(&products[0], 3);
    cart.add_item(&products[1], 1);
    cart.add_item(&products[2], 2);
    assert_eq!(cart.compute_totals().subtotal.amount_cents, expected_subtotal(&cart));

    cart.set_quantity(&products[1].id, 7);
    cart.add_item(&products[3], 4);
    cart.remove_item(&products[0].id);
    assert_eq!(cart.compute_totals().subtotal.amount_cents, expected_subtotal(&cart));

    cart.add_item(&products[2], -1);
    cart.set_quantity(&products[3].id, 0);
    assert_eq!(cart.compute_totals().subtotal.amount_cents, expected_subtotal(&cart));

    for line in cart.lines() {
        assert!(line.quantity > 0);
        assert_eq!(line.line_total, line.unit_price.multiply(line.quantity));
    }
}

#[test]
fn test_tax_is_sixteen_percent() {
    let products = catalog();
    let mut cart = Cart::new(Currency::MXN);
    cart.add_item(&products[0], 4);

    let totals = cart.compute_totals();
    assert_eq!(totals.subtotal, mxn(10000));
    assert_eq!(totals.tax, mxn(1600));
    assert_eq!(totals.total, mxn(11600));
}

#[test]
fn test_empty_cart_totals_are_zero() {
    let totals = Cart::new(Currency::MXN).compute_totals();
    assert!(totals.subtotal.is_zero());
    assert!(totals.tax.is_zero());
    assert!(totals.total.is_zero());
}

#[test]
fn test_set_quantity_zero_equals_remove() {
    let products = catalog();
    let mut a = Cart::new(Currency::MXN);
    a.add_item(&products[0], 2);
    a.add_item(&products[1], 5);
    let mut b = a.clone();

    a.set_quantity(&products[0].id, 0);
    b.remove_item(&products[0].id);
    assert_eq!(a, b);
    assert_eq!(a.compute_totals(), b.compute_totals());
}

#[test]
fn test_repeated_adds_merge_into_one_line() {
    let products = catalog();
    let mut cart = Cart::new(Currency::MXN);
    cart.add_item(&products[0], 2);
    cart.add_item(&products[0], 3);

    assert_eq!(cart.unique_item_count(), 1);
    let line = cart.get_line(&products[0].id).unwrap();
    assert_eq!(line.quantity, 5);
    assert_eq!(line.line_total, mxn(12500));
}

#[test]
fn test_lines_keep_insertion_order() {
    let products = catalog();
    let mut cart = Cart::new(Currency::MXN);
    cart.add_item(&products[2], 1);
    cart.add_item(&products[0], 1);
    cart.add_item(&products[2], 1);
    cart.add_item(&products[1], 1);

    let codes: Vec<&str> = cart.lines().iter().map(|l| l.product_code.as_str()).collect();
    assert_eq!(codes, vec!["LEC001", "COC001", "PAN001"]);
}

#[test]
fn test_unknown_product_operations_are_noops() {
    let products = catalog();
    let mut cart = Cart::new(Currency::MXN);
    cart.add_item(&products[0], 1);
    let before = cart.clone();

    cart.set_quantity(&ProductId::new("missing"), 9);
    assert!(!cart.remove_item(&ProductId::new("missing")));
    assert_eq!(cart, before);
}

#[test]
fn test_checkout_after_edits() {
    let products = catalog();
    let mut cart = Cart::new(Currency::MXN);
    cart.add_item(&products[0], 2);
    cart.add_item(&products[1], 3);
    cart.set_quantity(&products[1].id, 1);

    let sale = complete_sale(&mut cart, PaymentMethod::Cash, &UserId::new("2")).unwrap();
    // 2 * 25.00 + 1 * 10.00 = 60.00, tax 9.60
    assert_eq!(sale.subtotal, mxn(6000));
    assert_eq!(sale.tax, mxn(960));
    assert_eq!(sale.total, mxn(6960));
    assert!(cart.is_empty());
    assert!(matches!(
        complete_sale(&mut cart, PaymentMethod::Cash, &UserId::new("2")),
        Err(CommerceError::EmptyCart)
    ));
}

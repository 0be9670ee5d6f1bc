use chrono::NaiveDate;
use quickbill::core::*;
use rust_decimal_macros::dec;

fn main() {
    let items = vec![
        LineItem::new("Website redesign", dec!(1), dec!(2400)),
        LineItem::new("Hosting (monthly)", dec!(12), dec!(19.99)),
    ];

    if let Err(e) = validate_items(&items) {
        eprintln!("cannot export: {e}");
        return;
    }

    let invoice_date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let (id, sequence) = next_invoice_id(invoice_date, Some(41));
    let due = compute_due_date(invoice_date, 30);

    let config = TaxConfig::split_gst(dec!(18), "KA", "MH").with_discount(dec!(5));
    let totals = compute_totals(&items, &config);
    let symbol = symbol_for("INR").unwrap_or("$");

    println!("Invoice: {id} (sequence {sequence})");
    println!("Date:    {}", format_display_date(invoice_date));
    println!("Due:     {}", format_display_date(due));
    println!("---");
    for item in &items {
        println!(
            "  {} x {} @ {} = {}",
            item.quantity,
            item.name,
            format_currency(symbol, item.unit_price),
            format_currency(symbol, item.line_total())
        );
    }
    println!("---");
    println!("Subtotal: {}", format_currency(symbol, totals.subtotal));
    println!("CGST:     {}", format_currency(symbol, totals.cgst));
    println!("SGST:     {}", format_currency(symbol, totals.sgst));
    println!("IGST:     {}", format_currency(symbol, totals.igst));
    println!("Discount: -{}", format_currency(symbol, totals.discount_amount));
    println!("Total:    {}", format_currency(symbol, totals.grand_total));
}

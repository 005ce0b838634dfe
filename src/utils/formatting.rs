use console::style;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::models::cart::LineItem;

#[derive(Tabled)]
struct LineItemRow {
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Line Total")]
    line_total: String,
}

pub fn format_cart_table(items: &[LineItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows: Vec<LineItemRow> = items
        .iter()
        .map(|item| LineItemRow {
            name: item.name.clone(),
            unit_price: format_amount(item.unit_price),
            quantity: item.quantity,
            line_total: format_amount(item.line_total()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left())
        .modify(Columns::new(1..), Alignment::right());

    table.to_string()
}

pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn format_summary(subtotal: f64, total: f64) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("Subtotal").bold(), format_amount(subtotal)));
    if (subtotal - total).abs() > f64::EPSILON {
        output.push_str(&format!(
            "{}: -{}\n",
            style("Discount").bold(),
            style(format_amount(subtotal - total)).yellow()
        ));
    }
    output.push_str(&format!(
        "{}: {}\n",
        style("Total").bold(),
        style(format_amount(total)).green()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(6.3), "6.30");
        assert_eq!(format_amount(0.0), "0.00");
    }

    #[test]
    fn test_cart_table() {
        assert!(format_cart_table(&[]).is_empty());

        let table = format_cart_table(&[LineItem::new("Apple", 1.0, 3)]);
        assert!(table.contains("Apple"));
        assert!(table.contains("Line Total"));
        assert!(table.contains("3.00"));
    }

    #[test]
    fn test_summary_mentions_discount_only_when_applied() {
        console::set_colors_enabled(false);

        assert!(!format_summary(7.0, 7.0).contains("Discount"));

        let summary = format_summary(7.0, 6.3);
        assert!(summary.contains("Discount: -0.70"));
        assert!(summary.contains("Total: 6.30"));
    }
}

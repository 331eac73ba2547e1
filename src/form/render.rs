use std::fmt::Write;

use crate::types::{Field, LoanOffer};

use super::controller::FormController;

const OFFER_HEADERS: [&str; 4] = ["Lender", "Monthly Repayment", "Interest Rate", "Fees"];

/// the form as text: each field with its value and any visible error
pub fn render_form(form: &FormController) -> String {
    let mut out = String::from("LOAN OFFER\nCOMPARISON TOOL\n\n");
    for field in Field::ALL {
        let _ = writeln!(out, "{:<18}{}", field.label(), form.data().get(field));
        if let Some(message) = form.visible_error(field) {
            let _ = writeln!(out, "{:<18}! {}", "", message);
        }
    }
    let button = if form.can_submit() { "[ Submit ]" } else { "[ Submit ] (disabled)" };
    let _ = writeln!(out, "\n{button}");
    out
}

/// offers as an aligned table, empty when there is nothing to show
pub fn render_offers(offers: &[LoanOffer]) -> String {
    if offers.is_empty() {
        return String::new();
    }

    let rows: Vec<[String; 4]> = offers
        .iter()
        .map(|offer| {
            [
                offer.lender_name.clone(),
                offer.monthly_repayment.to_currency_string(),
                format!("{}%", offer.interest_rate.normalize()),
                offer.fees.clone(),
            ]
        })
        .collect();

    let mut widths = OFFER_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::from("LOAN OFFERS\n");
    push_row(&mut out, &OFFER_HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join(" | ").trim_end());
}

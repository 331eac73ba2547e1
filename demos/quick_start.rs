/// quick start - price an application without running the http service
use loan_offers::form::render_offers;
use loan_offers::{validate_all, Decimal, FormData, OfferRequest, OfferService};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let form = FormData {
        first_name: "Jane".to_string(),
        email_address: "j@x.com".to_string(),
        loan_amount: "5000".to_string(),
        loan_term: "3".to_string(),
    };

    // same rules the form applies before submitting
    let errors = validate_all(&form);
    if !errors.is_empty() {
        println!("{errors:?}");
        return Ok(());
    }

    let request = OfferRequest {
        first_name: Some(form.first_name),
        email_address: Some(form.email_address),
        loan_amount: Some(form.loan_amount.parse::<Decimal>()?),
        loan_term: Some(form.loan_term.parse::<Decimal>()?),
    };

    let offers = OfferService::default().quote(&request)?;
    print!("{}", render_offers(&offers));

    Ok(())
}

use std::net::SocketAddr;

use chrono::Utc;
use clap::{Parser, Subcommand};
use loan_offers::config::{OfferConfig, ServerConfig};
use loan_offers::form::{render_form, render_offers};
use loan_offers::{
    AmortizationSchedule, Field, FormController, HttpOfferClient, LoanOffer, Money, OfferRequest,
    Rate, SubmitOutcome,
};

#[derive(Debug, Parser)]
#[command(name = "loan-offers", version, about = "Loan offer comparison service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the offer service
    Serve {
        /// Socket address to bind, e.g. 127.0.0.1:5000
        #[arg(long, default_value = "127.0.0.1:5000", env = "LOAN_OFFERS_LISTEN")]
        listen: SocketAddr,
        /// Apply the form's amount and term ranges server side as well.
        #[arg(long, default_value_t = false)]
        enforce_ranges: bool,
    },
    /// Fill in the application form and compare offers from a running service
    Apply {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        email_address: String,
        /// Loan amount in dollars, at least 2000
        #[arg(long, default_value = "")]
        loan_amount: String,
        /// Loan term in years, 1 to 7
        #[arg(long, default_value = "")]
        loan_term: String,
        /// Base url of the offer service
        #[arg(long, default_value = "http://127.0.0.1:5000", env = "LOAN_OFFERS_SERVER")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "loan_offers=info,tower_http=info".to_string()),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Serve {
            listen,
            enforce_ranges,
        } => {
            let config = ServerConfig {
                listen,
                offers: OfferConfig::default().with_enforced_ranges(enforce_ranges),
            };
            loan_offers::server::serve(config).await
        }
        Command::Apply {
            first_name,
            email_address,
            loan_amount,
            loan_term,
            server,
        } => {
            let mut form = FormController::new();
            form.change(Field::FirstName, first_name);
            form.change(Field::EmailAddress, email_address);
            form.change(Field::LoanAmount, loan_amount);
            form.change(Field::LoanTerm, loan_term);

            let request = form.request();
            let client = HttpOfferClient::new(server);

            match form.submit(&client).await {
                SubmitOutcome::Blocked(_) => {
                    print!("{}", render_form(&form));
                    anyhow::bail!("application has invalid fields");
                }
                SubmitOutcome::Failed { alert } => anyhow::bail!(alert),
                SubmitOutcome::Offers(offers) => {
                    print!("{}", render_offers(&offers));
                    print_cheapest_cost(&request, &offers)?;
                    Ok(())
                }
            }
        }
    }
}

/// total cost of the lowest repayment over the full term
fn print_cheapest_cost(request: &OfferRequest, offers: &[LoanOffer]) -> anyhow::Result<()> {
    let (Some(amount), Some(term)) = (request.loan_amount, request.loan_term) else {
        return Ok(());
    };
    let Some(cheapest) = offers.iter().min_by_key(|offer| offer.monthly_repayment) else {
        return Ok(());
    };

    let schedule = AmortizationSchedule::generate(
        Money::from_decimal(amount),
        Rate::from_percentage(cheapest.interest_rate),
        term,
        Utc::now().date_naive(),
    )?;

    println!(
        "\nCheapest: {} at {} per month over {} payments, {} total ({} interest)",
        cheapest.lender_name,
        cheapest.monthly_repayment.to_currency_string(),
        schedule.term_months(),
        schedule.total_payment.to_currency_string(),
        schedule.total_interest.to_currency_string(),
    );
    Ok(())
}

use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use produce_checkout::application::dispatcher::CheckoutDispatcher;
use produce_checkout::config::CheckoutConfig;
use produce_checkout::domain::cart::CartSnapshot;
use produce_checkout::domain::money::Price;
use produce_checkout::domain::payment::{CheckoutOutcome, PaymentMethod};
use produce_checkout::infrastructure::html_form::HtmlFormNavigator;
use produce_checkout::infrastructure::in_memory::ScriptedWalletProvider;
use produce_checkout::interfaces::csv::cart_reader::CartReader;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Clone, Copy, ValueEnum)]
enum WalletOutcome {
    Success,
    Failure,
    Cancel,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payment method: cod, wallet or hosted
    #[arg(long)]
    method: PaymentMethod,

    /// Cart CSV file (product_id, name, unit_price, quantity)
    #[arg(long, conflicts_with_all = ["items", "total"])]
    cart: Option<PathBuf>,

    /// Number of items in the cart
    #[arg(long, requires = "total")]
    items: Option<u32>,

    /// Cart total price
    #[arg(long, requires = "items")]
    total: Option<Decimal>,

    /// Simulates a wallet widget that ends with this outcome. Without it the
    /// widget is absent.
    #[arg(long, value_enum)]
    wallet_outcome: Option<WalletOutcome>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = CheckoutConfig::load().into_diagnostic()?;

    let cart = match (cli.cart, cli.items, cli.total) {
        (Some(path), _, _) => {
            let file = File::open(path).into_diagnostic()?;
            Some(CartReader::new(file).snapshot().into_diagnostic()?)
        }
        (None, Some(items), Some(total)) => {
            Some(CartSnapshot::new(items, Price::new(total).into_diagnostic()?))
        }
        _ => None,
    };

    let navigator = Box::new(HtmlFormNavigator::new(io::stdout()));
    let mut dispatcher = CheckoutDispatcher::new(config, navigator);
    if let Some(outcome) = cli.wallet_outcome {
        let provider = match outcome {
            WalletOutcome::Success => ScriptedWalletProvider::succeeding("demo-idx", "demo-token"),
            WalletOutcome::Failure => ScriptedWalletProvider::failing("Payment declined"),
            WalletOutcome::Cancel => ScriptedWalletProvider::cancelling(),
        };
        dispatcher = dispatcher.with_wallet_provider(Box::new(provider));
    }

    match dispatcher
        .complete_checkout(cart.as_ref(), cli.method)
        .await
        .into_diagnostic()?
    {
        CheckoutOutcome::Completed(result) => {
            println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
        }
        // The form has already been written to stdout by the navigator.
        CheckoutOutcome::Redirected(_) => {}
        CheckoutOutcome::Cancelled => {
            eprintln!("Payment was cancelled");
        }
        CheckoutOutcome::Skipped(reason) => {
            eprintln!("Checkout skipped: {reason:?}");
        }
    }

    Ok(())
}

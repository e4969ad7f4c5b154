use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use paygate::application::engine::AuthorizationEngine;
use paygate::domain::account::Amount;
use paygate::domain::payment::PaymentRequest;
use paygate::domain::scheme::PaymentScheme;
use paygate::infrastructure::in_memory::InMemoryAccountRepository;
use paygate::infrastructure::notifier::TracingNotifier;
use paygate::interfaces::csv::account_reader::AccountReader;
use paygate::interfaces::csv::account_writer::AccountWriter;
use paygate::interfaces::csv::request_reader::PaymentRequestReader;
use paygate::interfaces::csv::result_writer::PaymentResultWriter;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Accounts CSV to load before authorizing. Without it, only the demo account "1" exists.
    #[arg(long, global = true)]
    accounts: Option<PathBuf>,

    /// Write the final account state to this CSV file.
    #[arg(long, global = true)]
    accounts_out: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Authorize a single payment
    Authorize {
        /// Debtor account number
        #[arg(long, default_value = "1")]
        account: String,

        #[arg(long, default_value = "100.00")]
        amount: Decimal,

        /// AutomatedClearing, ExpeditedTransfer or BankToBankTransfer
        #[arg(long, default_value = "BankToBankTransfer")]
        scheme: PaymentScheme,

        /// Requested payment date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Authorize every payment in a CSV file (account,amount,scheme,date)
    Batch {
        /// Input payment requests CSV file
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let repository = match &cli.accounts {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            let accounts = AccountReader::new(file).accounts().into_diagnostic()?;
            tracing::info!("Loaded {} accounts from {}", accounts.len(), path.display());
            InMemoryAccountRepository::with_accounts(accounts)
        }
        None => InMemoryAccountRepository::seeded(),
    };
    let engine = AuthorizationEngine::new(Box::new(repository), Box::new(TracingNotifier));

    let stdout = io::stdout();
    let mut results = PaymentResultWriter::new(stdout.lock());

    match cli.command {
        Command::Authorize {
            account,
            amount,
            scheme,
            date,
        } => {
            let request = PaymentRequest::new(
                account,
                Amount::new(amount).into_diagnostic()?,
                scheme,
                date.unwrap_or_else(|| chrono::Local::now().date_naive()),
            );
            submit(&engine, &request, &mut results).await?;
        }
        Command::Batch { input } => {
            let file = File::open(input).into_diagnostic()?;
            for request in PaymentRequestReader::new(file).requests() {
                match request {
                    Ok(request) => submit(&engine, &request, &mut results).await?,
                    Err(e) => eprintln!("Error reading payment request: {}", e),
                }
            }
        }
    }

    if let Some(path) = cli.accounts_out {
        let accounts = engine.into_accounts().await.into_diagnostic()?;
        let file = File::create(path).into_diagnostic()?;
        AccountWriter::new(file)
            .write_accounts(accounts)
            .into_diagnostic()?;
    }

    Ok(())
}

/// Authorizes one request, logs the outcome and writes it to the results stream.
///
/// Repository faults stop the run; rejections do not.
async fn submit<W: Write>(
    engine: &AuthorizationEngine,
    request: &PaymentRequest,
    results: &mut PaymentResultWriter<W>,
) -> Result<()> {
    let result = engine.authorize(request).await.into_diagnostic()?;
    tracing::info!(
        "Payment was {} for account : {}",
        if result.success {
            "Successful"
        } else {
            "Unsuccessful"
        },
        request.debtor_account_number
    );
    results.write_result(request, result).into_diagnostic()
}

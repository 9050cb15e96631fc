use anyhow::Error;
use clap::Parser;
use dagpenger::{
    base_amount::{self, BaseAmount},
    calculator::Calculator,
    caseworker::{Caseworker, Specialization},
    income::AnnualIncome,
    init_logging, load_env,
};
use std::io::{self, Write};

/// Calculate the daily rate of dagpenger a person is entitled to.
#[derive(Parser)]
enum Command {
    /// Calculate the daily rate from a person's annual incomes.
    Calculate {
        /// An annual income, as YEAR=AMOUNT. May be given several times.
        #[clap(
            short,
            long = "income",
            value_name = "YEAR=AMOUNT",
            value_delimiter = ',',
            required = true
        )]
        incomes: Vec<AnnualIncome>,

        /// Have a caseworker with SPECIALIZATION review the outcome.
        ///
        /// One of AVSLAG_FOR_LAV_INNTEKT, INNVILGET or INNVILGET_MED_MAKSSATS.
        #[clap(short, long, value_name = "SPECIALIZATION")]
        review: Option<Specialization>,

        /// Print the outcome as JSON.
        #[clap(long)]
        json: bool,

        #[clap(flatten)]
        g: base_amount::Options,
    },
    /// Show the current base amount and the thresholds derived from it.
    BaseAmount {
        #[clap(flatten)]
        g: base_amount::Options,
    },
}

#[async_std::main]
async fn main() -> Result<(), Error> {
    // Load `.env` before anything reads the environment, so it can set `RUST_LOG` as well as the
    // fallbacks for command line options.
    let env = load_env();
    init_logging();
    match env? {
        Some(path) => tracing::debug!("loaded environment from {}", path.display()),
        None => tracing::debug!("no .env file found"),
    }

    let mut out = io::stdout().lock();
    match Command::parse() {
        Command::Calculate {
            incomes,
            review,
            json,
            g,
        } => calculate(g.load().await?, incomes, review, json, &mut out),
        Command::BaseAmount { g } => show_base_amount(g.load().await?, &mut out),
    }
}

/// Calculate the daily rate for `incomes` and write a report to `out`.
fn calculate(
    g: BaseAmount,
    incomes: Vec<AnnualIncome>,
    review: Option<Specialization>,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    let mut calc = Calculator::new(g);
    for income in incomes {
        calc.add_income(income);
    }

    let mut outcome = calc.outcome();
    if let Some(specialization) = review {
        Caseworker::new(specialization).process(&mut outcome);
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &outcome)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "---🤖 Kalkulerer dagsats... 🤖---")?;
    if let Some(method) = outcome.method() {
        writeln!(out, "Beregningsmetode: {method}")?;
    }
    writeln!(
        out,
        "Personen har rett på følgende dagsats: {}",
        outcome.daily_rate()
    )?;
    if review.is_some() {
        writeln!(
            out,
            "Resultat {}: {}",
            outcome.category(),
            if outcome.is_approved() {
                "godkjent"
            } else {
                "ikke godkjent"
            }
        )?;
    }
    writeln!(out, "---🤖 Dagsats ferdig kalkulert 🤖---")?;
    Ok(())
}

fn show_base_amount(g: BaseAmount, out: &mut impl Write) -> Result<(), Error> {
    writeln!(out, "Grunnbeløp (1G): {}", g.value())?;
    writeln!(
        out,
        "Minste årslønn for rett på dagpenger (1.5G): {}",
        g.minimum_income_for_entitlement()
    )?;
    writeln!(out, "Minste inntekt siste tre år (3G): {}", g.total_for_years(3))?;
    writeln!(out, "Maks årlig dagpengegrunnlag (6G): {}", g.max_annual_basis())?;
    Ok(())
}

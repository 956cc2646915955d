//! Price a consolidation scenario from a ledger file
//!
//! Loads a debt ledger (CSV or JSON), runs one pricing pass, and prints
//! the quote with ranked benefit modules, or the proposal payload as JSON.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use consolidation_engine::{
    ledger::{load_ledger_csv, load_ledger_json},
    LoanProgram, LoanTerm, PricingSession,
};

#[derive(Parser, Debug)]
#[command(name = "price_scenario", about = "Price a debt-consolidation refinance scenario")]
struct Args {
    /// Ledger file (.csv or .json)
    #[arg(long)]
    ledger: PathBuf,

    /// Property value (AVM estimate)
    #[arg(long)]
    property_value: f64,

    /// Loan program: conventional, fha, va, fha-streamline, va-irrrl
    #[arg(long, default_value = "conventional")]
    program: String,

    /// Term in years (snapped to 10/15/20/30)
    #[arg(long, default_value_t = 30)]
    term: u32,

    /// Interest rate override, percent; defaults to the ledger's primary
    /// mortgage rate or the par offer
    #[arg(long)]
    rate: Option<f64>,

    /// Base closing costs for break-even
    #[arg(long, default_value_t = 8_000.0)]
    closing_costs: f64,

    /// Manual cashout in dollars
    #[arg(long)]
    cashout: Option<f64>,

    /// Emit the proposal payload as JSON instead of the console report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let ledger = match args.ledger.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_ledger_csv(&args.ledger),
        Some("json") => load_ledger_json(&args.ledger),
        _ => bail!("ledger file must be .csv or .json: {}", args.ledger.display()),
    }
    .with_context(|| format!("loading ledger {}", args.ledger.display()))?;

    if ledger.is_empty() {
        bail!("ledger {} contains no accounts", args.ledger.display());
    }

    let Some(program) = LoanProgram::from_label(&args.program) else {
        bail!("unknown loan program {:?}", args.program);
    };

    let mut session = PricingSession::new(ledger, args.property_value);
    session.set_program(program);
    session.set_term(LoanTerm::from_years(args.term));
    session.set_base_closing_costs(args.closing_costs);
    if let Some(rate) = args.rate {
        session.set_interest_rate(rate);
    }
    if let Some(cashout) = args.cashout {
        session.set_cashout_override(Some(cashout));
    }

    session.run_pricing();
    let quote = session
        .quote()
        .context("pricing produced no quote")?;

    if args.json {
        let payload = session
            .proposal()
            .context("no proposal payload: no modules selected")?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Scenario: {} over {} years at {:.3}%", program.as_str(), session.config().term.years(), session.config().interest_rate);
    println!("  Accounts included:  {}", session.ledger().included().count());
    println!("  Payoff total:       ${:.2}", quote.payoff_total);
    println!("  Cashout:            ${:.2}", quote.cashout);
    println!("  Gross loan:         ${:.2}", quote.gross_loan_amount);
    println!("  LTV:                {}%", quote.ltv_display());
    println!("  Proposed payment:   ${:.2}/mo (P&I {:.2} + MI {:.2} + escrow {:.2})",
        quote.total_payment, quote.monthly_pi, quote.monthly_mi, quote.monthly_escrow);
    println!("  Current payment:    ${:.2}/mo", quote.current_total_payment);
    println!("  Monthly savings:    ${:.2}/mo", quote.payment_delta);
    match quote.break_even_months(session.closing_cost_basis()) {
        Some(months) => println!("  Break-even:         {} months on ${:.2} closing costs",
            months, session.closing_cost_basis()),
        None => println!("  Break-even:         n/a (no monthly savings)"),
    }

    println!("\nBenefit modules:");
    for module in session.modules() {
        let flags = match (module.top_benefit, module.recommended) {
            (true, _) => " [top]",
            (false, true) => " [recommended]",
            _ => "",
        };
        println!(
            "  {:<20} {:>12.2}  {}{}",
            module.id.as_str(),
            module.value,
            module.sublabel,
            flags,
        );
    }

    Ok(())
}

//! Consolidation Engine demo
//!
//! Walks a sample session through pricing, a ledger edit, and re-pricing

use consolidation_engine::{
    AccountType, BenefitId, DebtAccount, DebtLedger, PricingSession,
};

fn main() {
    env_logger::init();

    println!("Consolidation Engine v0.1.0");
    println!("===========================\n");

    // Sample ledger: primary mortgage plus two consumer debts
    let ledger = DebtLedger::new(vec![
        DebtAccount::new(1, "First National", AccountType::Mortgage, 410_000.0, 3_435.0, Some(7.5)),
        DebtAccount::new(2, "Visa", AccountType::Revolving, 18_500.0, 525.0, Some(22.99)),
        DebtAccount::new(3, "Auto Loan", AccountType::Installment, 31_200.0, 612.0, Some(7.4)),
    ]);

    let mut session = PricingSession::new(ledger, 800_000.0);

    println!("Ledger:");
    println!("{:>4} {:<16} {:<12} {:>12} {:>10} {:>7}", "Id", "Creditor", "Type", "Balance", "Payment", "Rate");
    println!("{}", "-".repeat(68));
    for account in session.ledger().accounts() {
        println!(
            "{:>4} {:<16} {:<12} {:>12.2} {:>10.2} {:>6.2}%",
            account.id,
            account.creditor,
            account.account_type.as_str(),
            account.balance,
            account.payment,
            account.rate.unwrap_or(0.0),
        );
    }
    println!();

    session.run_pricing();
    let quote = session.quote().expect("quote exists after pricing");

    println!("Quote ({:?}, stale: {}):", session.state(), session.is_stale());
    println!("  Payoff total:     ${:.2}", quote.payoff_total);
    println!("  Cashout:          ${:.2}", quote.cashout);
    println!("  Gross loan:       ${:.2}", quote.gross_loan_amount);
    println!("  LTV:              {}%", quote.ltv_display());
    println!("  P&I:              ${:.2}/mo", quote.monthly_pi);
    println!("  MI:               ${:.2}/mo", quote.monthly_mi);
    println!("  Escrow:           ${:.2}/mo", quote.monthly_escrow);
    println!("  Proposed total:   ${:.2}/mo", quote.total_payment);
    println!("  Current total:    ${:.2}/mo", quote.current_total_payment);
    println!("  Monthly savings:  ${:.2}/mo", quote.payment_delta);
    if let Some(months) = quote.break_even_months(session.closing_cost_basis()) {
        println!("  Break-even:       {} months", months);
    }
    println!();

    println!("Benefit modules (impact-ranked):");
    println!("{:<20} {:>14} {:>6} {:>12} {:>9} {:>9}", "Module", "Value", "Value?", "Recommended", "Top", "Selected");
    println!("{}", "-".repeat(76));
    for module in session.modules() {
        println!(
            "{:<20} {:>14.2} {:>6} {:>12} {:>9} {:>9}",
            module.id.as_str(),
            module.value,
            if module.provides_value { "yes" } else { "no" },
            if module.recommended { "yes" } else { "-" },
            if module.top_benefit { "yes" } else { "-" },
            if module.selected { "yes" } else { "-" },
        );
    }
    println!();

    // Swap the payment-savings slot for cash-back after adding a cashout
    session.set_cashout_override(Some(25_000.0));
    println!("After $25,000 cashout override: stale = {}", session.is_stale());

    session.run_pricing();
    session.toggle_module(BenefitId::PaymentSavings);
    session.toggle_module(BenefitId::CashBack);

    // Ledger drift after pricing shows up in the diff
    session.set_account_balance(2, 19_250.0);
    if let Some(diff) = session.diff() {
        println!(
            "Diff: {} new, {} removed, {} changed (balance delta ${:.2})",
            diff.new_accounts.len(),
            diff.removed_accounts.len(),
            diff.changed_accounts.len(),
            diff.total_balance_delta,
        );
    }
    session.run_pricing();

    let payload = session.proposal().expect("proposal ready");
    println!("\nProposal payload:");
    println!("{}", serde_json::to_string_pretty(&payload).expect("payload serializes"));
}

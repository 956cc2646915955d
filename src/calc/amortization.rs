//! Fixed-rate amortization math
//!
//! Pure functions over primitives. Failure policy throughout the
//! calculator: clamp negative or absurd inputs to safe defaults rather
//! than raising; this is an estimator, not an eligibility validator.

/// Standard fixed-rate monthly payment, rounded to the nearest dollar.
///
/// `payment = P * r / (1 - (1+r)^-n)` with `r = rate/100/12`,
/// `n = term_years * 12`; the zero-rate limit is `P / n`.
pub fn amortized_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    let principal = principal.max(0.0);
    let rate = sanitize_rate(annual_rate_percent);
    let n = term_months(term_years) as f64;

    if principal <= 0.0 {
        return 0.0;
    }

    let payment = if rate == 0.0 {
        principal / n
    } else {
        let r = rate / 100.0 / 12.0;
        principal * r / (1.0 - (1.0 + r).powi(-(n as i32)))
    };

    payment.round()
}

/// Algebraic inverse of [`amortized_payment`]: the balance a given monthly
/// payment implies. Lets an operator enter a payment and back out the
/// balance behind it.
pub fn implied_balance(payment: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    let payment = payment.max(0.0);
    let rate = sanitize_rate(annual_rate_percent);
    let n = term_months(term_years) as f64;

    if payment <= 0.0 {
        return 0.0;
    }

    let balance = if rate == 0.0 {
        payment * n
    } else {
        let r = rate / 100.0 / 12.0;
        payment * (1.0 - (1.0 + r).powi(-(n as i32))) / r
    };

    balance.round()
}

/// Months required to amortize `principal` at a fixed `monthly_payment`.
///
/// `n = -ln(1 - r*P/pay) / ln(1+r)`; zero-rate limit is `P / pay`.
/// Returns None when the payment does not cover the monthly interest
/// (the balance would never amortize).
pub fn accelerated_term_months(
    principal: f64,
    annual_rate_percent: f64,
    monthly_payment: f64,
) -> Option<f64> {
    let principal = principal.max(0.0);
    let rate = sanitize_rate(annual_rate_percent);

    if monthly_payment <= 0.0 {
        return None;
    }
    if principal <= 0.0 {
        return Some(0.0);
    }

    if rate == 0.0 {
        return Some(principal / monthly_payment);
    }

    let r = rate / 100.0 / 12.0;
    let interest_share = r * principal / monthly_payment;
    if interest_share >= 1.0 {
        return None;
    }

    Some(-(1.0 - interest_share).ln() / (1.0 + r).ln())
}

/// Future value of a level monthly contribution compounded at an annual
/// rate, used by the reinvestment benefit module.
pub fn future_value_of_contributions(
    monthly_contribution: f64,
    annual_rate_percent: f64,
    months: u32,
) -> f64 {
    let contribution = monthly_contribution.max(0.0);
    let rate = sanitize_rate(annual_rate_percent);
    let n = months as f64;

    if rate == 0.0 {
        return contribution * n;
    }

    let r = rate / 100.0 / 12.0;
    contribution * ((1.0 + r).powf(n) - 1.0) / r
}

/// Negative or non-finite rates clamp to zero
fn sanitize_rate(annual_rate_percent: f64) -> f64 {
    if annual_rate_percent.is_finite() && annual_rate_percent > 0.0 {
        annual_rate_percent
    } else {
        0.0
    }
}

/// Zero terms clamp to one year
fn term_months(term_years: u32) -> u32 {
    term_years.max(1) * 12
}

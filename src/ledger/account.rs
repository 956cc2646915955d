//! Debt account records as supplied by the ledger collaborator

use serde::{Deserialize, Deserializer, Serialize};

use super::parse::{clamp_amount, parse_currency, parse_percent};

/// Category of a debt account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Mortgage or home-equity lien
    Mortgage,
    /// Fixed-term installment loan (auto, personal, student)
    Installment,
    /// Revolving credit (credit cards, lines of credit)
    Revolving,
    /// Anything else (collections, medical, tax)
    Other,
}

impl AccountType {
    /// Parse the ledger's loose type labels; unknown labels land in Other
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "mortgage" | "heloc" | "home equity" => AccountType::Mortgage,
            "installment" | "auto" | "personal" | "student" => AccountType::Installment,
            "revolving" | "credit card" | "credit_card" | "loc" => AccountType::Revolving,
            _ => AccountType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Mortgage => "Mortgage",
            AccountType::Installment => "Installment",
            AccountType::Revolving => "Revolving",
            AccountType::Other => "Other",
        }
    }
}

/// A single debt account record
///
/// Balance and payment accept either JSON numbers or formatted currency
/// strings; both normalize to non-negative f64 at deserialization so the
/// engine never sees a malformed amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAccount {
    /// Stable unique identifier; the diff engine keys on this, never on
    /// creditor name or position
    pub id: u32,

    /// Creditor display name
    pub creditor: String,

    /// Account category
    pub account_type: AccountType,

    /// Outstanding balance (non-negative)
    #[serde(deserialize_with = "de_amount")]
    pub balance: f64,

    /// Current monthly payment (non-negative)
    #[serde(deserialize_with = "de_amount")]
    pub payment: f64,

    /// Nominal annual rate in percent, when known
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub rate: Option<f64>,

    /// Whether this account is rolled into the new loan's payoff
    pub include_in_payoff: bool,
}

impl DebtAccount {
    /// Create an account, normalizing amounts through the same clamps the
    /// serde boundary applies
    pub fn new(
        id: u32,
        creditor: impl Into<String>,
        account_type: AccountType,
        balance: f64,
        payment: f64,
        rate: Option<f64>,
    ) -> Self {
        Self {
            id,
            creditor: creditor.into(),
            account_type,
            balance: clamp_amount(balance),
            payment: clamp_amount(payment),
            rate: rate.map(clamp_amount),
            include_in_payoff: true,
        }
    }

    /// Set balance through the normalization clamp
    pub fn set_balance(&mut self, balance: f64) {
        self.balance = clamp_amount(balance);
    }

    /// Set payment through the normalization clamp
    pub fn set_payment(&mut self, payment: f64) {
        self.payment = clamp_amount(payment);
    }

    pub fn is_mortgage(&self) -> bool {
        self.account_type == AccountType::Mortgage
    }
}

/// Accept a currency amount as either a number or a formatted string
fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => clamp_amount(n),
        Raw::Text(s) => parse_currency(&s),
    })
}

/// Accept an optional rate as a number or a "6.75%" style string
fn de_opt_rate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) => Some(clamp_amount(n)),
        Some(Raw::Text(s)) => {
            let t = s.trim();
            if t.is_empty() {
                None
            } else {
                Some(parse_percent(t))
            }
        }
        None => None,
    })
}

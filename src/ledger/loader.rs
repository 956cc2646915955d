//! File-based ledger loading for the CLI surfaces
//!
//! CSV columns: `id,creditor,account_type,balance,payment,rate,include`.
//! Currency columns may be formatted ("$12,345.67"); the rate column may
//! be empty. JSON loading accepts a serialized [`DebtLedger`] or a bare
//! account array.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use thiserror::Error;

use super::account::{AccountType, DebtAccount};
use super::parse::{parse_currency, parse_percent};
use super::DebtLedger;

#[derive(Debug, Error)]
pub enum LedgerLoadError {
    #[error("failed to open ledger file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read ledger CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse ledger JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ledger row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

/// Load a debt ledger from a CSV file
pub fn load_ledger_csv(path: &Path) -> Result<DebtLedger, LedgerLoadError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut accounts = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = idx + 2; // header is row 1

        if record.len() < 7 {
            return Err(LedgerLoadError::MalformedRow {
                row,
                reason: format!("expected 7 columns, found {}", record.len()),
            });
        }

        let id: u32 = record[0]
            .trim()
            .parse()
            .map_err(|_| LedgerLoadError::MalformedRow {
                row,
                reason: format!("account id {:?} is not an integer", &record[0]),
            })?;

        let rate_field = record[5].trim();
        let rate = if rate_field.is_empty() {
            None
        } else {
            Some(parse_percent(rate_field))
        };

        let mut account = DebtAccount::new(
            id,
            record[1].trim(),
            AccountType::from_label(&record[2]),
            parse_currency(&record[3]),
            parse_currency(&record[4]),
            rate,
        );
        account.include_in_payoff = matches!(
            record[6].trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        );

        accounts.push(account);
    }

    Ok(DebtLedger::new(accounts))
}

/// Load a debt ledger from a JSON file
pub fn load_ledger_json(path: &Path) -> Result<DebtLedger, LedgerLoadError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let value: serde_json::Value = serde_json::from_reader(reader)?;

    // Accept either {"accounts": [...]} or a bare array
    let ledger = if value.is_array() {
        let accounts: Vec<DebtAccount> = serde_json::from_value(value)?;
        DebtLedger::new(accounts)
    } else {
        serde_json::from_value(value)?
    };

    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_csv_with_formatted_amounts() {
        let path = write_temp(
            "consolidation_engine_ledger_test.csv",
            "id,creditor,account_type,balance,payment,rate,include\n\
             1,First National,Mortgage,\"$410,000\",\"$2,710\",6.875%,true\n\
             2,Visa,Revolving,\"$18,500.50\",$525,,yes\n\
             3,Closed Card,Revolving,junk,--,,no\n",
        );

        let ledger = load_ledger_csv(&path).unwrap();
        assert_eq!(ledger.len(), 3);

        let mortgage = ledger.get(1).unwrap();
        assert_eq!(mortgage.balance, 410_000.0);
        assert_eq!(mortgage.rate, Some(6.875));
        assert!(mortgage.include_in_payoff);

        let visa = ledger.get(2).unwrap();
        assert_eq!(visa.balance, 18_500.50);
        assert_eq!(visa.rate, None);

        // Malformed amounts normalize to zero rather than failing the load
        let closed = ledger.get(3).unwrap();
        assert_eq!(closed.balance, 0.0);
        assert_eq!(closed.payment, 0.0);
        assert!(!closed.include_in_payoff);
    }

    #[test]
    fn test_load_csv_rejects_bad_id() {
        let path = write_temp(
            "consolidation_engine_ledger_bad_id.csv",
            "id,creditor,account_type,balance,payment,rate,include\n\
             abc,First National,Mortgage,100,10,,true\n",
        );

        let err = load_ledger_csv(&path).unwrap_err();
        assert!(matches!(err, LedgerLoadError::MalformedRow { row: 2, .. }));
    }

    #[test]
    fn test_load_json_bare_array() {
        let path = write_temp(
            "consolidation_engine_ledger_test.json",
            r#"[{
                "id": 1,
                "creditor": "First National",
                "account_type": "Mortgage",
                "balance": "410,000",
                "payment": 2710,
                "include_in_payoff": true
            }]"#,
        );

        let ledger = load_ledger_json(&path).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(1).unwrap().balance, 410_000.0);
    }
}

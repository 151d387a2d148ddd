//! Account DTOs

use chrono::{DateTime, Utc};
use core_kernel::{AccountId, Money};
use domain_account::Account;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Body of `POST /accounts` and `PUT /accounts/:id/name`
#[derive(Debug, Deserialize)]
pub struct FullNameRequest {
    pub full_name: String,
}

/// Body of the deposit and withdraw endpoints
///
/// `amount` uses the money text grammar: `"12.34"`, `"$1,234.00"`.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: String,
}

impl AmountRequest {
    /// Parses the amount, rejecting zero and negative values
    pub fn positive_amount(&self) -> Result<Money, ApiError> {
        let amount: Money = self
            .amount
            .parse()
            .map_err(|e: core_kernel::MoneyError| ApiError::Validation(e.to_string()))?;
        if !amount.is_positive() {
            return Err(ApiError::Validation(format!(
                "amount must be greater than $0.00, got {}",
                amount
            )));
        }
        Ok(amount)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AccountResponse {
    pub id: AccountId,
    pub full_name: String,
    /// Canonical text, e.g. `"$1,234.56"`
    pub balance: String,
    pub balance_cents: i32,
    pub is_open: bool,
    pub closed_at: Option<DateTime<Utc>>,
}

impl TryFrom<Account> for AccountResponse {
    type Error = ApiError;

    fn try_from(account: Account) -> Result<Self, Self::Error> {
        let id = account
            .id()
            .ok_or_else(|| ApiError::Internal("ledger returned an unsaved account".to_string()))?;
        Ok(Self {
            id,
            full_name: account.full_name().to_string(),
            balance: account.balance().to_string(),
            balance_cents: account.balance().total_cents(),
            is_open: account.is_open(),
            closed_at: account.closed_at(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(text: &str) -> AmountRequest {
        AmountRequest {
            amount: text.to_string(),
        }
    }

    #[test]
    fn test_positive_amounts() {
        assert_eq!(amount("$1,234.56").positive_amount().unwrap(), Money::from_cents(123_456));
        assert_eq!(amount("0.01").positive_amount().unwrap(), Money::from_cents(1));
    }

    #[test]
    fn test_rejected_amounts() {
        for text in ["0.00", "-5.00", "$-0.01", "12", "1.5", "abc"] {
            assert!(
                matches!(amount(text).positive_amount(), Err(ApiError::Validation(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_response_from_account() {
        let account =
            Account::rehydrate(Some(AccountId::new(3)), "Frank", Money::from_cents(1_234_567_890), None)
                .unwrap();
        let response = AccountResponse::try_from(account).unwrap();

        assert_eq!(response.balance, "$12,345,678.90");
        assert_eq!(response.balance_cents, 1_234_567_890);
        assert!(response.is_open);
    }
}

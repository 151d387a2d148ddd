//! Tests for account snapshots and name/timestamp validation

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use core_kernel::{AccountId, Money};
use domain_account::{parse_closed_at, validate_full_name, Account, AccountError};
use test_utils::{blank_name_strategy, valid_name_strategy, AccountBuilder, NameFixtures};

mod construction {
    use super::*;

    #[test]
    fn test_new_account_defaults() {
        let account = Account::new(NameFixtures::FRANK).unwrap();

        assert_eq!(account.id(), None);
        assert_eq!(account.full_name(), "Frank the Cat");
        assert_eq!(account.balance(), Money::ZERO);
        assert_eq!(account.closed_at(), None);
        assert!(account.is_open());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(Account::new(NameFixtures::BLANK), Err(AccountError::InvalidName));
        assert_eq!(Account::new(""), Err(AccountError::InvalidName));
    }

    #[test]
    fn test_name_is_kept_verbatim() {
        let account = Account::new("  Frank  ").unwrap();
        assert_eq!(account.full_name(), "  Frank  ");
    }

    #[test]
    fn test_rehydrate_keeps_all_fields() {
        let closed = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let account = Account::rehydrate(
            Some(AccountId::new(12)),
            "Frank",
            Money::from_cents(-5),
            Some(closed),
        )
        .unwrap();

        assert_eq!(account.id(), Some(AccountId::new(12)));
        assert_eq!(account.balance(), Money::from_cents(-5));
        assert_eq!(account.closed_at(), Some(closed));
        assert!(!account.is_open());
        assert!(account.is_persisted());
    }

    #[test]
    fn test_rehydrate_validates_name() {
        let result = Account::rehydrate(Some(AccountId::new(1)), "\t", Money::ZERO, None);
        assert_eq!(result, Err(AccountError::InvalidName));
    }

    #[test]
    fn test_builder_defaults_match_new() {
        assert_eq!(AccountBuilder::new().build(), Account::new(NameFixtures::FRANK).unwrap());
    }
}

mod timestamps {
    use super::*;

    #[test]
    fn test_offset_timestamp_is_normalized_to_utc() {
        let at = parse_closed_at("2024-01-01T14:00:00+02:00").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_zulu_timestamp() {
        assert!(parse_closed_at("2024-01-01T12:00:00Z").is_ok());
    }

    #[test]
    fn test_naive_timestamp_rejected() {
        let result = parse_closed_at("2024-01-01T12:00:00");
        assert!(matches!(result, Err(AccountError::InvalidTimestamp(_))));
    }

    #[test]
    fn test_garbage_timestamp_rejected() {
        assert!(matches!(parse_closed_at("yesterday"), Err(AccountError::InvalidTimestamp(_))));
    }
}

proptest! {
    #[test]
    fn visible_names_are_valid(name in valid_name_strategy()) {
        prop_assert!(validate_full_name(&name).is_ok());
    }

    #[test]
    fn blank_names_are_invalid(name in blank_name_strategy()) {
        prop_assert_eq!(Account::new(name), Err(AccountError::InvalidName));
    }
}

//! Comprehensive unit tests for the Money module
//!
//! Tests cover construction bounds, arithmetic overflow, ordering,
//! canonical formatting, and the text parser.

use core_kernel::{Money, MoneyError};

mod creation {
    use super::*;

    #[test]
    fn test_new_keeps_exact_cents() {
        let m = Money::new(1234).unwrap();
        assert_eq!(m.total_cents(), 1234);
        assert_eq!(m.dollars(), 12);
        assert_eq!(m.cents(), 34);
    }

    #[test]
    fn test_zero_constant() {
        assert_eq!(Money::ZERO.total_cents(), 0);
        assert!(Money::ZERO.is_zero());
        assert_eq!(Money::default(), Money::ZERO);
    }

    #[test]
    fn test_max_is_accepted() {
        let m = Money::new(Money::MAX_CENTS).unwrap();
        assert_eq!(i64::from(m.total_cents()), Money::MAX_CENTS);
    }

    #[test]
    fn test_min_is_accepted() {
        let m = Money::new(Money::MIN_CENTS).unwrap();
        assert_eq!(i64::from(m.total_cents()), Money::MIN_CENTS);
    }

    #[test]
    fn test_above_max_is_out_of_range() {
        let result = Money::new(Money::MAX_CENTS + 1);
        assert!(matches!(result, Err(MoneyError::OutOfRange { .. })));
    }

    #[test]
    fn test_below_min_is_out_of_range() {
        let result = Money::new(Money::MIN_CENTS - 1);
        assert!(matches!(result, Err(MoneyError::OutOfRange { .. })));
    }

    #[test]
    fn test_try_from_i64() {
        assert_eq!(Money::try_from(500i64).unwrap(), Money::from_cents(500));
        assert!(Money::try_from(i64::MAX).is_err());
    }

    #[test]
    fn test_out_of_range_message_names_bounds() {
        let err = Money::new(Money::MAX_CENTS + 1).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("2147483648"));
        assert!(message.contains("-2147483648"));
        assert!(message.contains("2147483647"));
    }
}

mod predicates {
    use super::*;

    #[test]
    fn test_sign_predicates() {
        assert!(Money::from_cents(1).is_positive());
        assert!(!Money::from_cents(1).is_negative());
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add() {
        let a = Money::from_cents(100_00);
        let b = Money::from_cents(50_25);
        assert_eq!(a.checked_add(&b).unwrap(), Money::from_cents(150_25));
    }

    #[test]
    fn test_checked_sub_can_go_negative() {
        let a = Money::from_cents(30_00);
        let b = Money::from_cents(100_00);
        assert_eq!(a.checked_sub(&b).unwrap(), Money::from_cents(-70_00));
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Money::new(Money::MAX_CENTS).unwrap();
        let result = max.checked_add(&Money::from_cents(1));
        assert_eq!(result, Err(MoneyError::OutOfRange { cents: Money::MAX_CENTS + 1 }));
    }

    #[test]
    fn test_checked_sub_underflow() {
        let min = Money::new(Money::MIN_CENTS).unwrap();
        let result = min.checked_sub(&Money::from_cents(1));
        assert!(matches!(result, Err(MoneyError::OutOfRange { .. })));
    }

    #[test]
    fn test_operands_are_unchanged() {
        let a = Money::from_cents(10);
        let b = Money::from_cents(5);
        let _ = a.checked_add(&b).unwrap();
        assert_eq!(a.total_cents(), 10);
        assert_eq!(b.total_cents(), 5);
    }
}

mod ordering {
    use super::*;

    #[test]
    fn test_equality() {
        assert_eq!(Money::from_cents(-1), Money::from_cents(-1));
        assert_eq!(Money::from_cents(0), Money::from_cents(0));
        assert_ne!(Money::from_cents(0), Money::from_cents(1));
    }

    #[test]
    fn test_total_order() {
        let mut amounts = vec![
            Money::from_cents(5),
            Money::from_cents(-5),
            Money::ZERO,
            Money::from_cents(1_00),
        ];
        amounts.sort();
        assert_eq!(
            amounts,
            vec![
                Money::from_cents(-5),
                Money::ZERO,
                Money::from_cents(5),
                Money::from_cents(1_00),
            ]
        );
        assert!(Money::from_cents(1_00) >= Money::from_cents(99));
    }
}

mod formatting {
    use super::*;

    #[test]
    fn test_basic_amounts() {
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::from_cents(1_00).to_string(), "$1.00");
        assert_eq!(Money::from_cents(1_01).to_string(), "$1.01");
        assert_eq!(Money::from_cents(123_45).to_string(), "$123.45");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(Money::from_cents(-5).to_string(), "$-0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "$-12.34");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(Money::from_cents(1234567890).to_string(), "$12,345,678.90");
        assert_eq!(Money::from_cents(100_000).to_string(), "$1,000.00");
    }
}

mod parsing {
    use super::*;

    fn parse(text: &str) -> Result<Money, MoneyError> {
        text.parse()
    }

    #[test]
    fn test_accepts_canonical_text() {
        assert_eq!(parse("$12,345,678.90").unwrap(), Money::from_cents(1234567890));
        assert_eq!(parse("$-12.34").unwrap(), Money::from_cents(-1234));
    }

    #[test]
    fn test_accepts_without_dollar_sign_or_commas() {
        assert_eq!(parse("1234.56").unwrap(), Money::from_cents(123456));
        assert_eq!(parse("0.99").unwrap(), Money::from_cents(99));
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(parse("  $1.00\t\n").unwrap(), Money::from_cents(1_00));
    }

    #[test]
    fn test_rejects_missing_fraction() {
        assert!(matches!(parse("$12"), Err(MoneyError::Parse { .. })));
        assert!(matches!(parse("$12."), Err(MoneyError::Parse { .. })));
        assert!(matches!(parse("$12.3"), Err(MoneyError::Parse { .. })));
        assert!(matches!(parse("$12.345"), Err(MoneyError::Parse { .. })));
    }

    #[test]
    fn test_rejects_misplaced_commas() {
        assert!(matches!(parse("1,23.00"), Err(MoneyError::Parse { .. })));
        assert!(matches!(parse(",123.00"), Err(MoneyError::Parse { .. })));
        assert!(matches!(parse("1234,567.00"), Err(MoneyError::Parse { .. })));
    }

    #[test]
    fn test_rejects_garbage() {
        for text in ["", "$", "abc", "$.50", "$ 1.00", "1.0a", "--1.00", "$1.00$"] {
            assert!(
                matches!(parse(text), Err(MoneyError::Parse { .. })),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn test_out_of_range_text() {
        assert!(matches!(parse("$21,474,836.48"), Err(MoneyError::OutOfRange { .. })));
        assert_eq!(parse("$21,474,836.47").unwrap(), Money::new(Money::MAX_CENTS).unwrap());
        assert!(matches!(
            parse("99999999999999999999999.00"),
            Err(MoneyError::OutOfRange { .. })
        ));
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_serializes_as_integer_cents() {
        let json = serde_json::to_string(&Money::from_cents(1234)).unwrap();
        assert_eq!(json, "1234");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_cents(1234));
    }
}

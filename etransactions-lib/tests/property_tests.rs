//! Property-based tests for etransactions-lib
//!
//! These tests use proptest to verify invariants across a wide range of inputs.

#[cfg(test)]
mod value_properties {
    use etransactions_lib::{RangValue, TotalValue, WireValue};
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    proptest! {
        /// Every accepted rank renders as exactly three digits
        #[test]
        fn rang_is_three_digits(rang in 0u16..=999) {
            let value = RangValue::new(rang).unwrap();
            prop_assert_eq!(value.value().len(), 3);
            prop_assert_eq!(value.value().parse::<u16>().unwrap(), rang);
        }

        /// Integer and zero-padded string forms normalize identically
        #[test]
        fn rang_string_and_integer_agree(rang in 0u16..=999, pad in 0usize..3) {
            let padded = format!("{:0width$}", rang, width = pad + 1);
            let from_string = RangValue::from_raw(&json!(padded)).unwrap();
            let from_integer = RangValue::from_raw(&json!(rang)).unwrap();
            prop_assert_eq!(from_string, from_integer);
        }

        /// Ranks that need four digits are rejected, never truncated
        #[test]
        fn rang_overflow_rejected(rang in 1000i64..1_000_000) {
            prop_assert!(RangValue::from_raw(&json!(rang)).is_err());
        }

        /// Amounts always render with two decimals and keep their value
        #[test]
        fn total_renders_two_decimals(cents in 0u32..100_000_000) {
            let total = TotalValue::from_cents(cents);
            let rendered = total.wire_value();
            let (_, fraction) = rendered.split_once('.').unwrap();
            prop_assert_eq!(fraction.len(), 2);
            prop_assert_eq!(rendered.parse::<Decimal>().unwrap(), Decimal::new(i64::from(cents), 2));
            prop_assert_eq!(total.as_cents(), Some(i64::from(cents)));
        }

        /// Three fractional digits are rejected unless the last one is zero
        #[test]
        fn total_precision(units in 0i64..1_000_000, mills in 0i64..1000) {
            let raw = format!("{}.{:03}", units, mills);
            let result = TotalValue::from_str_checked(&raw);
            prop_assert_eq!(result.is_ok(), mills % 10 == 0);
        }

        /// Negative amounts are always rejected
        #[test]
        fn total_negative_rejected(cents in 1i64..100_000_000) {
            prop_assert!(TotalValue::new(Decimal::new(-cents, 2)).is_err());
        }
    }
}

#[cfg(test)]
mod transaction_properties {
    use etransactions_lib::prelude::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    struct Fields {
        site: u64,
        rang: u16,
        id: u64,
        devise: Devise,
        command: String,
        feedback: String,
        holder: String,
        cents: u32,
        hash: HashAlgorithm,
    }

    fn fields() -> impl Strategy<Value = Fields> {
        (
            1u64..10_000_000,
            0u16..=999,
            1u64..1_000_000_000,
            prop::sample::select(Devise::ALL.to_vec()),
            "[a-z0-9-]{1,20}",
            "(Mt:M(;Ref:R)?)?",
            "[a-z]{1,10}@[a-z]{1,10}\\.tld",
            0u32..10_000_000,
            prop::sample::select(HashAlgorithm::ALL.to_vec()),
        )
            .prop_map(
                |(site, rang, id, devise, command, feedback, holder, cents, hash)| Fields {
                    site,
                    rang,
                    id,
                    devise,
                    command,
                    feedback,
                    holder,
                    cents,
                    hash,
                },
            )
    }

    const SETTER_COUNT: usize = 11;

    fn apply(setter: usize, t: &mut TransactionData, f: &Fields) {
        match setter {
            0 => t.set_site(SiteValue::new(f.site).unwrap()),
            1 => t.set_rang(RangValue::new(f.rang).unwrap()),
            2 => t.set_id(IdValue::new(f.id).unwrap()),
            3 => t.set_devise(DeviseValue::new(f.devise)),
            4 => t.set_command(CommandValue::new(f.command.as_str()).unwrap()),
            5 => t.set_feedback(FeedbackValue::new(f.feedback.as_str())),
            6 => t.set_holder(HolderValue::new(f.holder.as_str()).unwrap()),
            7 => t.set_total(TotalValue::from_cents(f.cents)),
            8 => t.set_hash(HashValue::new(f.hash)),
            9 => t.set_time(TimeValue::from_timestamp(1600424772).unwrap()),
            _ => t.set_secret(SecretValue::new("123456789aef").unwrap()),
        };
    }

    fn build(f: &Fields, order: &[usize]) -> TransactionData {
        let mut transaction = TransactionData::new();
        for &i in order {
            apply(i, &mut transaction, f);
        }
        transaction
    }

    fn in_order() -> Vec<usize> {
        (0..SETTER_COUNT).collect()
    }

    proptest! {
        /// Setter order never changes the serialized string or the signature
        #[test]
        fn order_independent(f in fields(), order in Just(in_order()).prop_shuffle()) {
            let a = build(&f, &in_order());
            let b = build(&f, &order);
            prop_assert_eq!(a.to_serialized_string(), b.to_serialized_string());
            prop_assert_eq!(a.to_signed_fields().unwrap(), b.to_signed_fields().unwrap());
        }

        /// The serialized string always lists keys in the canonical order
        #[test]
        fn canonical_key_order(f in fields()) {
            let transaction = build(&f, &in_order());
            let keys: Vec<String> = transaction
                .to_serialized_string()
                .split('&')
                .map(|p| p.split('=').next().unwrap_or_default().to_string())
                .collect();
            prop_assert_eq!(keys, ParameterConstructor::CANONICAL_ORDER.to_vec());
        }

        /// Signing is deterministic and repeatable
        #[test]
        fn signing_idempotent(f in fields()) {
            let transaction = build(&f, &in_order());
            prop_assert_eq!(transaction.sign().unwrap(), transaction.sign().unwrap());
            prop_assert_eq!(transaction.to_form().unwrap(), transaction.to_form().unwrap());
            prop_assert!(transaction.is_valid());
        }

        /// Signature length follows the algorithm
        #[test]
        fn signature_length(f in fields()) {
            let transaction = build(&f, &in_order());
            let signature = transaction.sign().unwrap();
            prop_assert_eq!(signature.value().len(), f.hash.output_len() * 2);
            prop_assert!(signature.value().chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }

        /// Changing a single signed field changes the signature
        #[test]
        fn single_field_change_changes_signature(f in fields(), which in 0usize..4) {
            let original = build(&f, &in_order());
            let mut changed = f.clone();
            match which {
                0 => changed.site = f.site + 1,
                1 => changed.rang = (f.rang + 1) % 1000,
                2 => changed.cents = f.cents + 1,
                _ => changed.command = format!("{}x", f.command),
            }
            let changed = build(&changed, &in_order());
            prop_assert_ne!(original.sign().unwrap(), changed.sign().unwrap());
        }
    }
}

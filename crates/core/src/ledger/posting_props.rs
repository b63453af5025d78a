//! Property tests for the polarity rule and the posting planner.

use proptest::prelude::*;
use rust_decimal::Decimal;

use custodia_shared::types::{Amount, OwnerId, TransactionId};

use crate::registry::{OwnerInfo, OwnerStatus, OwnerType};

use super::polarity::{AccountClass, Movement, balance_change, polarity};
use super::posting::{PostingRequest, PriorBalances, plan_entries};
use super::types::TransactionMethod;

/// Strategy for posting amounts: cents in [0.01, 100,000.00].
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn movement_strategy() -> impl Strategy<Value = Movement> {
    prop_oneof![Just(Movement::Deposit), Just(Movement::Withdrawal)]
}

fn class_strategy() -> impl Strategy<Value = AccountClass> {
    prop_oneof![Just(AccountClass::Asset), Just(AccountClass::Liability)]
}

fn method_strategy() -> impl Strategy<Value = TransactionMethod> {
    prop_oneof![
        Just(TransactionMethod::Deposit),
        Just(TransactionMethod::Withdrawal),
    ]
}

fn owner(owner_type: OwnerType) -> OwnerInfo {
    OwnerInfo {
        id: OwnerId::new(),
        owner_type,
        status: OwnerStatus::Active,
        name: format!("{owner_type} owner"),
        is_system: matches!(owner_type, OwnerType::System),
    }
}

fn request(method: TransactionMethod, amount: Decimal) -> PostingRequest {
    PostingRequest {
        transaction_id: TransactionId::new(),
        method,
        amount: Amount::new(amount).unwrap(),
        voucher_no: None,
        voucher_date: None,
        instrument_no: None,
        particulars: "property test".to_string(),
        unit_ledger: false,
        transfer_group_id: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Replaying a stream's movements in order reproduces the stored final
    /// balance: `balance[n] = balance[n-1] + signed_change[n]`.
    #[test]
    fn prop_running_balance_chain_replays(
        class in class_strategy(),
        movements in prop::collection::vec((movement_strategy(), amount_strategy()), 1..20),
    ) {
        let mut balance = Decimal::ZERO;
        let mut ledger = Vec::with_capacity(movements.len());

        for (movement, amount) in &movements {
            let p = polarity(class, *movement);
            balance = p.apply(balance, *amount);
            let (debit, credit) = p.columns(*amount);
            ledger.push((debit, credit, balance));
        }

        // Replay from the stored (debit, credit) columns alone.
        let mut replayed = Decimal::ZERO;
        for (debit, credit, stored_balance) in &ledger {
            replayed += balance_change(class, *debit, *credit);
            prop_assert_eq!(replayed, *stored_balance);
        }
    }

    /// Exactly one of (debit, credit) is nonzero for any polarity.
    #[test]
    fn prop_one_column_nonzero(
        class in class_strategy(),
        movement in movement_strategy(),
        amount in amount_strategy(),
    ) {
        let (debit, credit) = polarity(class, movement).columns(amount);
        prop_assert!(debit.is_zero() != credit.is_zero());
        prop_assert_eq!(debit + credit, amount);
    }

    /// Deposits increase and withdrawals decrease the balance, for both
    /// account classes (trust model symmetry).
    #[test]
    fn prop_movement_direction_is_class_independent(
        class in class_strategy(),
        amount in amount_strategy(),
        prior in (-10_000_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    ) {
        let deposited = polarity(class, Movement::Deposit).apply(prior, amount);
        let withdrawn = polarity(class, Movement::Withdrawal).apply(prior, amount);
        prop_assert_eq!(deposited, prior + amount);
        prop_assert_eq!(withdrawn, prior - amount);
    }

    /// `balance_change` is the exact inverse of the posting columns.
    #[test]
    fn prop_balance_change_inverts_posting(
        class in class_strategy(),
        movement in movement_strategy(),
        amount in amount_strategy(),
    ) {
        let p = polarity(class, movement);
        let (debit, credit) = p.columns(amount);
        prop_assert_eq!(balance_change(class, debit, credit), p.signed_change(amount));
    }

    /// The planner moves both legs in the same direction and by the same
    /// amount, whatever the owner types involved.
    #[test]
    fn prop_planner_moves_both_legs_together(
        method in method_strategy(),
        amount in amount_strategy(),
        from_balance in (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
        to_balance in (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    ) {
        let client = owner(OwnerType::Client);
        let main = owner(OwnerType::Main);
        let req = request(method, amount);

        let (from_entry, to_entry) = plan_entries(
            &req,
            &client,
            &main,
            None,
            PriorBalances {
                from_balance,
                to_balance,
                to_stream_has_entries: true,
            },
        )
        .unwrap();

        let expected_sign = match method.movement() {
            Movement::Deposit => amount,
            Movement::Withdrawal => -amount,
        };
        prop_assert_eq!(from_entry.running_balance - from_balance, expected_sign);
        prop_assert_eq!(to_entry.running_balance - to_balance, expected_sign);
    }

    /// The from-side entry never lands in a unit stream.
    #[test]
    fn prop_from_side_is_always_general(
        method in method_strategy(),
        amount in amount_strategy(),
        unit_ledger in any::<bool>(),
    ) {
        let client = owner(OwnerType::Client);
        let main = owner(OwnerType::Main);
        let mut req = request(method, amount);
        req.unit_ledger = unit_ledger;

        let (from_entry, _) = plan_entries(
            &req,
            &main,
            &client,
            None,
            PriorBalances {
                from_balance: Decimal::ZERO,
                to_balance: Decimal::ZERO,
                to_stream_has_entries: true,
            },
        )
        .unwrap();

        prop_assert_eq!(from_entry.unit_id, None);
    }
}

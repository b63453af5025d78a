//! The ledger posting planner.
//!
//! This is the pure half of the posting engine: given a posting request,
//! the participant accounts, and the prior balances read under lock by the
//! repository, it validates every precondition fail-fast and computes the
//! two entry plans the repository then writes atomically. It performs no
//! I/O; the repository owns transactions, locking, and retries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use custodia_shared::types::{Amount, OwnerId, TransactionId, TransferGroupId, UnitId};

use crate::registry::{OwnerInfo, UnitInfo};

use super::error::LedgerError;
use super::polarity::polarity;
use super::types::{TransactionMethod, VOUCHER_PLACEHOLDER};
use super::validation;

/// A posting request: the transaction fields the planner needs.
#[derive(Debug, Clone)]
pub struct PostingRequest {
    /// The transaction being posted.
    pub transaction_id: TransactionId,
    /// Business method; drives the movement direction of both legs.
    pub method: TransactionMethod,
    /// Validated amount.
    pub amount: Amount,
    /// Raw voucher number as entered; normalized by the planner.
    pub voucher_no: Option<String>,
    /// Voucher date; required when a voucher number is present.
    pub voucher_date: Option<NaiveDate>,
    /// Comma-joined instrument numbers, already collected by the caller.
    pub instrument_no: Option<String>,
    /// Required description of the movement.
    pub particulars: String,
    /// When true and a unit is attached, the to-side entry lands in the
    /// unit's ledger stream instead of the owner's general stream.
    pub unit_ledger: bool,
    /// Grouping key linking the legs of a multi-leg transfer.
    pub transfer_group_id: Option<TransferGroupId>,
}

/// The balances the repository read under lock, plus the opening
/// precondition fact.
#[derive(Debug, Clone, Copy)]
pub struct PriorBalances {
    /// Latest running balance of the from owner's general stream.
    pub from_balance: Decimal,
    /// Latest running balance of the target to-side stream.
    pub to_balance: Decimal,
    /// True if the target to-side stream already has entries.
    pub to_stream_has_entries: bool,
}

/// A computed ledger entry, ready for the repository to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPlan {
    /// The account this entry belongs to.
    pub owner_id: OwnerId,
    /// The transaction being posted.
    pub transaction_id: TransactionId,
    /// Normalized voucher number or the placeholder.
    pub voucher_no: String,
    /// Voucher date inherited from the transaction.
    pub voucher_date: Option<NaiveDate>,
    /// Instrument numbers inherited from the transaction.
    pub instrument_no: Option<String>,
    /// Debit column; zero when the entry is a credit.
    pub debit: Decimal,
    /// Credit column; zero when the entry is a debit.
    pub credit: Decimal,
    /// The stream balance immediately after this entry.
    pub running_balance: Decimal,
    /// Stream key: None is the owner's general ledger.
    pub unit_id: Option<UnitId>,
    /// Description, unit-prefixed when the transaction carries a unit.
    pub particulars: String,
    /// Grouping key linking the legs of a multi-leg transfer.
    pub transfer_group_id: Option<TransferGroupId>,
}

/// Validates a posting request and computes both entry plans.
///
/// The from-side entry is always written to the owner's general stream;
/// unit scoping is a recipient concept. Both legs move in the same
/// direction (trust model): deposits and openings increase both balances,
/// withdrawals decrease both.
///
/// # Errors
///
/// Returns the first violated precondition; nothing is partially computed.
pub fn plan_entries(
    request: &PostingRequest,
    from: &OwnerInfo,
    to: &OwnerInfo,
    unit: Option<&UnitInfo>,
    priors: PriorBalances,
) -> Result<(EntryPlan, EntryPlan), LedgerError> {
    validation::validate_participants(from, to, request.method)?;
    let particulars = validation::validate_particulars(&request.particulars)?;
    let voucher_no = validation::normalize_voucher(
        request.voucher_no.as_deref(),
        request.voucher_date,
    )?;
    if let Some(unit) = unit {
        validation::validate_unit(unit, to)?;
    }
    if matches!(request.method, TransactionMethod::Transfer) {
        validation::validate_opening(to, unit, priors.to_stream_has_entries)?;
    }

    let amount = request.amount.into_inner();
    let movement = request.method.movement();
    let voucher_no = voucher_no.unwrap_or_else(|| VOUCHER_PLACEHOLDER.to_string());
    let particulars = match unit {
        Some(unit) => format!("{} - {}", unit.unit_name, particulars),
        None => particulars.to_string(),
    };

    let from_polarity = polarity(from.owner_type.account_class(), movement);
    let (from_debit, from_credit) = from_polarity.columns(amount);
    let from_entry = EntryPlan {
        owner_id: from.id,
        transaction_id: request.transaction_id,
        voucher_no: voucher_no.clone(),
        voucher_date: request.voucher_date,
        instrument_no: request.instrument_no.clone(),
        debit: from_debit,
        credit: from_credit,
        running_balance: from_polarity.apply(priors.from_balance, amount),
        // The from side never tracks by unit; unit is a recipient concept.
        unit_id: None,
        particulars: particulars.clone(),
        transfer_group_id: request.transfer_group_id,
    };

    let to_polarity = polarity(to.owner_type.account_class(), movement);
    let (to_debit, to_credit) = to_polarity.columns(amount);
    let to_entry = EntryPlan {
        owner_id: to.id,
        transaction_id: request.transaction_id,
        voucher_no,
        voucher_date: request.voucher_date,
        instrument_no: request.instrument_no.clone(),
        debit: to_debit,
        credit: to_credit,
        running_balance: to_polarity.apply(priors.to_balance, amount),
        unit_id: if request.unit_ledger {
            unit.map(|u| u.id)
        } else {
            None
        },
        particulars,
        transfer_group_id: request.transfer_group_id,
    };

    Ok((from_entry, to_entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use custodia_shared::types::Amount;

    use crate::registry::{OwnerStatus, OwnerType, UnitStatus};

    fn owner(owner_type: OwnerType) -> OwnerInfo {
        OwnerInfo {
            id: OwnerId::new(),
            owner_type,
            status: OwnerStatus::Active,
            name: format!("{owner_type} owner"),
            is_system: matches!(owner_type, OwnerType::System),
        }
    }

    fn unit_of(owner: &OwnerInfo, name: &str) -> UnitInfo {
        UnitInfo {
            id: UnitId::new(),
            owner_id: owner.id,
            unit_name: name.to_string(),
            status: UnitStatus::Active,
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
            particulars: "Monthly collection".to_string(),
            unit_ledger: false,
            transfer_group_id: None,
        }
    }

    fn priors(from_balance: Decimal, to_balance: Decimal) -> PriorBalances {
        PriorBalances {
            from_balance,
            to_balance,
            to_stream_has_entries: false,
        }
    }

    #[test]
    fn test_deposit_client_to_main() {
        // MAIN at 1000.00 receives a 250.00 deposit from CLIENT at 500.00:
        // MAIN gets debit 250 -> 1250; CLIENT gets credit 250 -> 750.
        let client = owner(OwnerType::Client);
        let main = owner(OwnerType::Main);
        let req = request(TransactionMethod::Deposit, dec!(250.00));

        let (from_entry, to_entry) =
            plan_entries(&req, &client, &main, None, priors(dec!(500.00), dec!(1000.00)))
                .unwrap();

        assert_eq!(from_entry.owner_id, client.id);
        assert_eq!(from_entry.debit, dec!(0));
        assert_eq!(from_entry.credit, dec!(250.00));
        assert_eq!(from_entry.running_balance, dec!(750.00));

        assert_eq!(to_entry.owner_id, main.id);
        assert_eq!(to_entry.debit, dec!(250.00));
        assert_eq!(to_entry.credit, dec!(0));
        assert_eq!(to_entry.running_balance, dec!(1250.00));
    }

    #[test]
    fn test_withdrawal_decreases_both_sides() {
        // Withdrawal of 100.00 to MAIN: MAIN leg credit 100 (decrease),
        // CLIENT leg debit 100 (decrease).
        let client = owner(OwnerType::Client);
        let main = owner(OwnerType::Main);
        let req = request(TransactionMethod::Withdrawal, dec!(100.00));

        let (from_entry, to_entry) =
            plan_entries(&req, &client, &main, None, priors(dec!(500.00), dec!(1000.00)))
                .unwrap();

        assert_eq!(from_entry.debit, dec!(100.00));
        assert_eq!(from_entry.credit, dec!(0));
        assert_eq!(from_entry.running_balance, dec!(400.00));

        assert_eq!(to_entry.debit, dec!(0));
        assert_eq!(to_entry.credit, dec!(100.00));
        assert_eq!(to_entry.running_balance, dec!(900.00));
    }

    #[test]
    fn test_opening_increases_both_sides() {
        // Opening balance of 5000.00 for a new CLIENT: SYSTEM leg debit
        // 5000, CLIENT leg credit 5000 with running balance 5000.
        let system = owner(OwnerType::System);
        let client = owner(OwnerType::Client);
        let mut req = request(TransactionMethod::Transfer, dec!(5000.00));
        req.particulars = "Opening Balance".to_string();

        let (from_entry, to_entry) =
            plan_entries(&req, &system, &client, None, priors(dec!(12000.00), dec!(0)))
                .unwrap();

        assert_eq!(from_entry.debit, dec!(5000.00));
        assert_eq!(from_entry.running_balance, dec!(17000.00));
        assert_eq!(to_entry.credit, dec!(5000.00));
        assert_eq!(to_entry.running_balance, dec!(5000.00));
    }

    #[test]
    fn test_exactly_one_column_nonzero() {
        let client = owner(OwnerType::Client);
        let main = owner(OwnerType::Main);
        for method in [TransactionMethod::Deposit, TransactionMethod::Withdrawal] {
            let req = request(method, dec!(75.25));
            let (from_entry, to_entry) =
                plan_entries(&req, &client, &main, None, priors(dec!(1000), dec!(1000)))
                    .unwrap();
            for entry in [&from_entry, &to_entry] {
                let nonzero = [entry.debit, entry.credit]
                    .iter()
                    .filter(|v| !v.is_zero())
                    .count();
                assert_eq!(nonzero, 1);
            }
        }
    }

    #[test]
    fn test_unit_scoping_applies_to_recipient_only() {
        let client = owner(OwnerType::Client);
        let main = owner(OwnerType::Main);
        let unit = unit_of(&client, "Unit 7C");

        let mut req = request(TransactionMethod::Deposit, dec!(300.00));
        req.unit_ledger = true;

        let (from_entry, to_entry) = plan_entries(
            &req,
            &main,
            &client,
            Some(&unit),
            priors(dec!(0), dec!(0)),
        )
        .unwrap();

        assert_eq!(from_entry.unit_id, None);
        assert_eq!(to_entry.unit_id, Some(unit.id));
        // Both particulars carry the unit display name.
        assert_eq!(from_entry.particulars, "Unit 7C - Monthly collection");
        assert_eq!(to_entry.particulars, "Unit 7C - Monthly collection");
    }

    #[test]
    fn test_unit_without_unit_ledger_stays_general() {
        let client = owner(OwnerType::Client);
        let main = owner(OwnerType::Main);
        let unit = unit_of(&client, "Unit 7C");

        let req = request(TransactionMethod::Deposit, dec!(300.00));
        let (_, to_entry) = plan_entries(
            &req,
            &main,
            &client,
            Some(&unit),
            priors(dec!(0), dec!(0)),
        )
        .unwrap();

        // Entry lands in the general stream but the particulars still name
        // the unit.
        assert_eq!(to_entry.unit_id, None);
        assert_eq!(to_entry.particulars, "Unit 7C - Monthly collection");
    }

    #[test]
    fn test_voucher_placeholder_and_normalization() {
        let client = owner(OwnerType::Client);
        let main = owner(OwnerType::Main);

        let req = request(TransactionMethod::Deposit, dec!(10.00));
        let (from_entry, _) =
            plan_entries(&req, &main, &client, None, priors(dec!(0), dec!(0))).unwrap();
        assert_eq!(from_entry.voucher_no, VOUCHER_PLACEHOLDER);

        let mut req = request(TransactionMethod::Deposit, dec!(10.00));
        req.voucher_no = Some("vch-77".to_string());
        req.voucher_date = NaiveDate::from_ymd_opt(2026, 4, 2);
        let (from_entry, to_entry) =
            plan_entries(&req, &main, &client, None, priors(dec!(0), dec!(0))).unwrap();
        assert_eq!(from_entry.voucher_no, "VCH-77");
        assert_eq!(to_entry.voucher_no, "VCH-77");
    }

    #[test]
    fn test_rejections_produce_no_plans() {
        let client = owner(OwnerType::Client);
        let main = owner(OwnerType::Main);

        // Same owner
        let req = request(TransactionMethod::Deposit, dec!(10.00));
        assert!(plan_entries(&req, &main, &main, None, priors(dec!(0), dec!(0))).is_err());

        // Inactive participant
        let mut inactive = client.clone();
        inactive.status = OwnerStatus::Inactive;
        assert!(
            plan_entries(&req, &inactive, &main, None, priors(dec!(0), dec!(0))).is_err()
        );

        // Unit owned by a different owner
        let stranger = owner(OwnerType::Client);
        let foreign_unit = unit_of(&stranger, "Unit 9Z");
        assert!(matches!(
            plan_entries(
                &req,
                &main,
                &client,
                Some(&foreign_unit),
                priors(dec!(0), dec!(0))
            ),
            Err(LedgerError::UnitOwnershipMismatch { .. })
        ));
    }

    #[test]
    fn test_opening_rejected_when_stream_seeded() {
        let system = owner(OwnerType::System);
        let client = owner(OwnerType::Client);
        let req = request(TransactionMethod::Transfer, dec!(1000.00));

        let result = plan_entries(
            &req,
            &system,
            &client,
            None,
            PriorBalances {
                from_balance: dec!(0),
                to_balance: dec!(250.00),
                to_stream_has_entries: true,
            },
        );
        assert!(matches!(
            result,
            Err(LedgerError::OpeningBalanceExists { .. })
        ));
    }
}

//! Business rule validation for journal entries.

use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::{EntryLine, Side};

/// Validates the structural rules of an entry's lines.
///
/// Checks line count, per-line amounts, that both sides are present, and
/// that debits equal credits. The entry is never adjusted to balance; an
/// out-of-balance entry is always an error.
///
/// # Errors
///
/// Returns an error if the lines violate any posting rule.
pub fn validate_lines(lines: &[EntryLine]) -> Result<(), JournalError> {
    if lines.len() < 2 {
        return Err(JournalError::InsufficientLines { count: lines.len() });
    }

    let mut total_debits = Decimal::ZERO;
    let mut total_credits = Decimal::ZERO;
    let mut has_debit = false;
    let mut has_credit = false;

    for (index, line) in lines.iter().enumerate() {
        if line.amount.is_zero() {
            return Err(JournalError::ZeroAmount { line: index });
        }
        if line.amount < Decimal::ZERO {
            return Err(JournalError::NegativeAmount {
                line: index,
                amount: line.amount,
            });
        }

        match line.side {
            Side::Debit => {
                total_debits += line.amount;
                has_debit = true;
            }
            Side::Credit => {
                total_credits += line.amount;
                has_credit = true;
            }
        }
    }

    if !has_debit || !has_credit {
        return Err(JournalError::SingleSided);
    }

    if total_debits != total_credits {
        return Err(JournalError::Unbalanced {
            debits: total_debits,
            credits: total_credits,
        });
    }

    Ok(())
}

//! Signed-fund settlement
//!
//! Uniform collection and payout of bounty funds over native and issued
//! currencies. Collection always lands in the escrow account and is verified
//! by realized balance delta, so fee-on-transfer tokens can never leave the
//! escrow under-funded: a shortfall refunds whatever actually arrived and
//! fails the whole operation.

use custody_core::{
    types::{AccountId, Currency},
    FundsService,
};
use rust_decimal::Decimal;

use crate::{types::CallContext, Error, Result};

/// Collect exactly `amount` of `currency` from the caller into escrow.
///
/// Native collection requires the attached value to match `amount` exactly.
/// Issued-token collection requires zero attached value and asserts the
/// escrow balance grew by exactly `amount`; a realized shortfall is refunded
/// to the caller before the operation fails.
pub fn collect<F: FundsService>(
    funds: &mut F,
    escrow: &AccountId,
    ctx: &CallContext,
    currency: &Currency,
    amount: Decimal,
) -> Result<()> {
    match currency {
        Currency::Native => {
            if ctx.attached_value != amount {
                return Err(Error::AmountMismatch {
                    expected: amount,
                    realized: ctx.attached_value,
                });
            }
            funds
                .transfer_from(currency, &ctx.caller, escrow, amount)
                .map_err(|e| Error::TransferRejected(e.to_string()))
        }
        Currency::Token(_) => {
            if ctx.attached_value != Decimal::ZERO {
                return Err(Error::AmountMismatch {
                    expected: Decimal::ZERO,
                    realized: ctx.attached_value,
                });
            }
            let before = funds.balance_of(currency, escrow);
            funds
                .transfer_from(currency, &ctx.caller, escrow, amount)
                .map_err(|e| Error::TransferRejected(e.to_string()))?;
            let realized = funds.balance_of(currency, escrow) - before;
            if realized != amount {
                if realized > Decimal::ZERO {
                    if let Err(e) = funds.transfer(currency, &ctx.caller, realized) {
                        tracing::error!(
                            %currency,
                            caller = %ctx.caller,
                            %realized,
                            error = %e,
                            "failed to refund short-collected funds"
                        );
                    }
                }
                return Err(Error::AmountMismatch {
                    expected: amount,
                    realized,
                });
            }
            Ok(())
        }
    }
}

/// Pay `amount` of `currency` out of escrow to `to`. A zero amount is a
/// no-op.
pub fn pay<F: FundsService>(
    funds: &mut F,
    currency: &Currency,
    to: &AccountId,
    amount: Decimal,
) -> Result<()> {
    if amount == Decimal::ZERO {
        return Ok(());
    }
    funds
        .transfer(currency, to, amount)
        .map_err(|e| Error::PayoutFailed(format!("payout to {} failed: {}", to, e)))
}

/// Pull a completed payout back into escrow while unwinding a failed
/// operation. Best-effort: a failure is logged, never propagated, because
/// the original error is already on its way out.
pub(crate) fn claw_back<F: FundsService>(
    funds: &mut F,
    escrow: &AccountId,
    currency: &Currency,
    from: &AccountId,
    amount: Decimal,
) {
    if amount == Decimal::ZERO {
        return;
    }
    if let Err(e) = funds.transfer_from(currency, from, escrow, amount) {
        tracing::error!(%currency, %from, %amount, error = %e, "failed to claw back payout");
    }
}

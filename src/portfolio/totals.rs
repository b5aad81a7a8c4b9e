use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Fund;

/// Aggregates over a fetched fund collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PortfolioTotals {
    pub total_aum: Decimal,
    pub current_value: Decimal,
    pub total_funds: usize,
    pub total_holdings: u64,
}

impl PortfolioTotals {
    /// Sum AUM, current value (falling back to AUM per fund), fund count and
    /// holdings count. An empty slice gives all-zero totals.
    pub fn from_funds(funds: &[Fund]) -> Self {
        funds.iter().fold(Self::default(), |acc, fund| {
            let aum = fund.total_aum_value().unwrap_or_else(|| {
                tracing::warn!(
                    fund_id = fund.id,
                    total_aum = %fund.total_aum,
                    "unparseable total_aum; counting as zero"
                );
                Decimal::ZERO
            });
            let current = fund.current_value_value().unwrap_or(aum);

            Self {
                total_aum: saturating_sum(acc.total_aum, aum, "total_aum"),
                current_value: saturating_sum(acc.current_value, current, "current_value"),
                total_funds: acc.total_funds + 1,
                total_holdings: acc.total_holdings.saturating_add(fund.holdings_count),
            }
        })
    }

    /// `(current - aum) / aum * 100`, or zero when there is no AUM.
    pub fn return_percent(&self) -> Decimal {
        return_percent(self.total_aum, self.current_value)
    }

    /// [`Self::return_percent`] as a float for formatting.
    pub fn return_percent_f64(&self) -> f64 {
        self.return_percent().to_f64().unwrap_or(0.0)
    }

    pub fn gain_loss(&self) -> Decimal {
        self.current_value.saturating_sub(self.total_aum)
    }
}

/// Sum that clamps to the decimal range instead of panicking.
fn saturating_sum(acc: Decimal, value: Decimal, field: &'static str) -> Decimal {
    acc.checked_add(value).unwrap_or_else(|| {
        tracing::warn!(field, "portfolio total overflowed; clamping");
        acc.saturating_add(value)
    })
}

/// Percentage change from `base` to `current`; zero when `base` is not
/// positive.
pub fn return_percent(base: Decimal, current: Decimal) -> Decimal {
    if base <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    current
        .checked_sub(base)
        .and_then(|change| change.checked_div(base))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| {
            tracing::warn!(%base, %current, "return percent out of range; clamping");
            if current >= base {
                Decimal::MAX
            } else {
                Decimal::MIN
            }
        })
}

use anchor_lang::prelude::*;

use crate::constants::{BASIS_POINTS, YEAR};
use crate::error::CreditEngineError;

/// Compact record of a funded loan, enough to value it without loading the
/// Loan account.
#[derive(InitSpace, AnchorSerialize, AnchorDeserialize, Clone, Copy)]
pub struct FundedLoan {
    pub loan: Pubkey,
    pub principal: u64,
    pub apy: u64,
    pub term: i64,
    pub start: i64,
}

impl FundedLoan {
    /// Currency-equivalent value at `now`: principal plus the committed yield
    /// prorated by elapsed time, capped at the full debt.
    pub fn value_at(&self, now: i64) -> u64 {
        let interest = (self.principal as u128)
            .saturating_mul(self.apy as u128)
            .saturating_mul(self.term as u128)
            / (YEAR as u128 * BASIS_POINTS as u128);
        let elapsed = now.saturating_sub(self.start).clamp(0, self.term);
        let accrued = if self.term > 0 {
            interest * elapsed as u128 / self.term as u128
        } else {
            interest
        };
        (self.principal as u128).saturating_add(accrued) as u64
    }
}

/// Append-only list of the loans funded from one pool. Removal is
/// swap-and-pop; order is not preserved.
#[account]
#[derive(InitSpace)]
pub struct Portfolio {
    pub pool: Pubkey,
    #[max_len(64)]
    pub loans: Vec<FundedLoan>,
    pub bump: u8,
}

impl Portfolio {
    pub const MAX_LOANS: usize = 64;

    pub fn push(&mut self, record: FundedLoan) -> Result<()> {
        require!(
            self.loans.len() < Self::MAX_LOANS,
            CreditEngineError::PortfolioFull
        );
        self.loans.push(record);
        Ok(())
    }

    pub fn remove(&mut self, loan: Pubkey) -> Result<FundedLoan> {
        let index = self
            .loans
            .iter()
            .position(|record| record.loan == loan)
            .ok_or(CreditEngineError::LoanNotInPortfolio)?;
        Ok(self.loans.swap_remove(index))
    }

    pub fn contains(&self, loan: Pubkey) -> bool {
        self.loans.iter().any(|record| record.loan == loan)
    }

    /// Sum of all held loans' currency-equivalent value at `now`.
    pub fn value(&self, now: i64) -> u64 {
        self.loans
            .iter()
            .fold(0u64, |acc, record| acc.saturating_add(record.value_at(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(principal: u64, apy: u64, term: i64, start: i64) -> FundedLoan {
        FundedLoan {
            loan: Pubkey::new_unique(),
            principal,
            apy,
            term,
            start,
        }
    }

    fn empty_portfolio() -> Portfolio {
        Portfolio {
            pool: Pubkey::new_unique(),
            loans: Vec::new(),
            bump: 255,
        }
    }

    #[test]
    fn running_loans_are_prorated() {
        let rec = record(1_000, 1_000, YEAR, 0);
        assert_eq!(rec.value_at(0), 1_000);
        assert_eq!(rec.value_at(YEAR / 2), 1_050);
        assert_eq!(rec.value_at(YEAR), 1_100);
        // past the term the committed yield stops growing
        assert_eq!(rec.value_at(2 * YEAR), 1_100);
    }

    #[test]
    fn portfolio_value_sums_holdings() {
        let mut portfolio = empty_portfolio();
        portfolio.push(record(1_000, 1_000, YEAR, 0)).unwrap();
        portfolio.push(record(2_000, 500, YEAR, 0)).unwrap();
        assert_eq!(portfolio.value(YEAR), 1_100 + 2_100);
    }

    #[test]
    fn swap_and_pop_removal() {
        let mut portfolio = empty_portfolio();
        let first = record(1, 0, YEAR, 0);
        let second = record(2, 0, YEAR, 0);
        let third = record(3, 0, YEAR, 0);
        portfolio.push(first).unwrap();
        portfolio.push(second).unwrap();
        portfolio.push(third).unwrap();

        let removed = portfolio.remove(first.loan).unwrap();
        assert_eq!(removed.principal, 1);
        assert_eq!(portfolio.loans.len(), 2);
        assert!(!portfolio.contains(first.loan));
        assert!(portfolio.contains(second.loan));
        assert!(portfolio.contains(third.loan));

        assert!(portfolio.remove(first.loan).is_err());
    }
}

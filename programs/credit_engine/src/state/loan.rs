use anchor_lang::prelude::*;

use crate::constants::{BASIS_POINTS, YEAR};
use crate::error::CreditEngineError;

#[derive(InitSpace, AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoanStatus {
    /// Created, collecting ratings, not yet funded.
    Awaiting,
    /// Principal pulled into escrow, debt shares minted to the funder.
    Funded,
    /// Borrower has taken the principal out.
    Withdrawn,
    /// Closed with the full debt recovered.
    Settled,
    /// Closed short of the debt.
    Defaulted,
}

/// A single fixed-term loan. Principal, APY and term are fixed at creation;
/// status only moves forward.
#[account]
#[derive(InitSpace)]
pub struct Loan {
    pub borrower: Pubkey,
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub escrow: Pubkey,
    pub principal: u64,
    pub apy: u64, // basis points
    pub term: i64, // seconds
    pub status: LoanStatus,
    pub start: i64,
    /// Currency paid into escrow by the borrower so far.
    pub repaid: u64,
    /// Currency actually recovered, recorded at close.
    pub returned: u64,
    /// Outstanding debt shares; minted 1:1 with debt at funding, burned on
    /// redemption.
    pub shares_outstanding: u64,
    pub loan_id: u64,
    pub created_at: i64,
    pub bump: u8,
}

impl Loan {
    /// Principal plus the full-term interest commitment.
    pub fn debt(&self) -> u64 {
        let interest = (self.principal as u128)
            .saturating_mul(self.apy as u128)
            .saturating_mul(self.term as u128)
            / (YEAR as u128 * BASIS_POINTS as u128);
        (self.principal as u128).saturating_add(interest) as u64
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.status, LoanStatus::Settled | LoanStatus::Defaulted)
    }

    /// Awaiting -> Funded. Returns the debt shares to mint to the funder.
    pub fn fund(&mut self, now: i64) -> Result<u64> {
        require!(
            self.status == LoanStatus::Awaiting,
            CreditEngineError::LoanNotAwaiting
        );
        self.status = LoanStatus::Funded;
        self.start = now;
        self.shares_outstanding = self.debt();
        Ok(self.shares_outstanding)
    }

    /// Funded -> Withdrawn, borrower only. Returns the principal to transfer.
    pub fn withdraw(&mut self, caller: Pubkey) -> Result<u64> {
        require!(
            self.status == LoanStatus::Funded,
            CreditEngineError::LoanNotFunded
        );
        require!(caller == self.borrower, CreditEngineError::CallerNotBorrower);
        self.status = LoanStatus::Withdrawn;
        Ok(self.principal)
    }

    pub fn repay(&mut self, amount: u64) -> Result<()> {
        require!(!self.is_closed(), CreditEngineError::LoanAlreadyClosed);
        require!(
            matches!(self.status, LoanStatus::Funded | LoanStatus::Withdrawn),
            CreditEngineError::LoanNotFunded
        );
        require!(amount > 0, CreditEngineError::ZeroAmount);
        self.repaid = self
            .repaid
            .checked_add(amount)
            .ok_or(CreditEngineError::MathOverflow)?;
        Ok(())
    }

    /// Funded | Withdrawn -> Settled / Defaulted, only after the term elapsed.
    /// `escrow_balance` is what the loan actually holds at close.
    pub fn close(&mut self, now: i64, escrow_balance: u64) -> Result<()> {
        require!(
            matches!(self.status, LoanStatus::Funded | LoanStatus::Withdrawn),
            CreditEngineError::LoanAlreadyClosed
        );
        require!(
            now >= self.start.saturating_add(self.term),
            CreditEngineError::TermNotElapsed
        );
        self.returned = escrow_balance;
        self.status = if escrow_balance >= self.debt() {
            LoanStatus::Settled
        } else {
            LoanStatus::Defaulted
        };
        Ok(())
    }

    /// Burns `shares` against the escrow, pro rata to what was recovered.
    /// Returns the currency payout.
    pub fn redeem(&mut self, shares: u64, escrow_balance: u64) -> Result<u64> {
        require!(self.is_closed(), CreditEngineError::LoanNotClosed);
        require!(shares > 0, CreditEngineError::ZeroAmount);
        require!(
            shares <= self.shares_outstanding,
            CreditEngineError::InsufficientShares
        );
        let payout = (shares as u128)
            .checked_mul(escrow_balance as u128)
            .ok_or(CreditEngineError::MathOverflow)?
            / (self.shares_outstanding as u128);
        self.shares_outstanding -= shares;
        Ok(payout as u64)
    }
}

/// Debt-share ledger entry for one holder of one loan.
#[account]
#[derive(InitSpace)]
pub struct ShareBalance {
    pub loan: Pubkey,
    pub holder: Pubkey,
    pub amount: u64,
    pub bump: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn awaiting_loan(principal: u64, apy: u64, term: i64) -> Loan {
        Loan {
            borrower: Pubkey::new_unique(),
            pool: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            escrow: Pubkey::new_unique(),
            principal,
            apy,
            term,
            status: LoanStatus::Awaiting,
            start: 0,
            repaid: 0,
            returned: 0,
            shares_outstanding: 0,
            loan_id: 0,
            created_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn twelve_month_loan_lifecycle() {
        // 1000 principal over a year at 10% APY owes 1100.
        let mut loan = awaiting_loan(1_000, 1_000, YEAR);
        assert_eq!(loan.debt(), 1_100);

        let shares = loan.fund(100).unwrap();
        assert_eq!(shares, 1_100);
        assert_eq!(loan.status, LoanStatus::Funded);

        let principal = loan.withdraw(loan.borrower).unwrap();
        assert_eq!(principal, 1_000);
        assert_eq!(loan.status, LoanStatus::Withdrawn);

        loan.repay(1_100).unwrap();
        loan.close(100 + YEAR, 1_100).unwrap();
        assert_eq!(loan.status, LoanStatus::Settled);
        assert_eq!(loan.returned, 1_100);
    }

    #[test]
    fn withdraw_requires_funded_and_borrower() {
        let mut loan = awaiting_loan(1_000, 1_000, YEAR);
        assert!(loan.withdraw(loan.borrower).is_err());

        loan.fund(0).unwrap();
        let stranger = Pubkey::new_unique();
        assert_eq!(
            loan.withdraw(stranger).unwrap_err(),
            Error::from(CreditEngineError::CallerNotBorrower)
        );
        loan.withdraw(loan.borrower).unwrap();
    }

    #[test]
    fn fund_twice_fails() {
        let mut loan = awaiting_loan(1_000, 1_000, YEAR);
        loan.fund(0).unwrap();
        assert!(loan.fund(1).is_err());
    }

    #[test]
    fn close_before_term_fails_and_double_close_fails() {
        let mut loan = awaiting_loan(1_000, 1_000, YEAR);
        loan.fund(100).unwrap();
        loan.withdraw(loan.borrower).unwrap();

        assert_eq!(
            loan.close(100 + YEAR - 1, 0).unwrap_err(),
            Error::from(CreditEngineError::TermNotElapsed)
        );
        loan.close(100 + YEAR, 500).unwrap();
        assert_eq!(loan.status, LoanStatus::Defaulted);
        assert!(loan.close(100 + YEAR + 1, 500).is_err());
    }

    #[test]
    fn default_redeems_pro_rata() {
        let mut loan = awaiting_loan(1_000, 1_000, YEAR);
        loan.fund(0).unwrap();
        loan.withdraw(loan.borrower).unwrap();
        loan.repay(550).unwrap();
        loan.close(YEAR, 550).unwrap();
        assert_eq!(loan.status, LoanStatus::Defaulted);

        // Half the shares recover half of what came back.
        let payout = loan.redeem(550, 550).unwrap();
        assert_eq!(payout, 275);
        assert_eq!(loan.shares_outstanding, 550);

        // The rest takes the remainder.
        let payout = loan.redeem(550, 275).unwrap();
        assert_eq!(payout, 275);
        assert_eq!(loan.shares_outstanding, 0);
    }

    #[test]
    fn redeem_requires_closed() {
        let mut loan = awaiting_loan(1_000, 1_000, YEAR);
        loan.fund(0).unwrap();
        assert_eq!(
            loan.redeem(100, 1_000).unwrap_err(),
            Error::from(CreditEngineError::LoanNotClosed)
        );
    }
}

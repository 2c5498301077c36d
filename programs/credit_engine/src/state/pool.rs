use anchor_lang::prelude::*;

use crate::constants::BASIS_POINTS;
use crate::error::CreditEngineError;

/// A lending pool: the capital source both loan products draw from.
/// Share accounting and yield strategy live outside this program; the pool
/// surface here is only what the credit engine needs — liquidity in, principal
/// out, principal plus interest back.
#[account]
#[derive(InitSpace)]
pub struct LendingPool {
    pub authority: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub decimals: u8,
    pub total_deposited: u64,
    pub available_liquidity: u64,
    /// Principal out through fixed-term loans.
    pub borrowed_fixed_term: u64,
    /// Principal out through revolving credit lines.
    pub borrowed_credit_lines: u64,
    pub total_interest_earned: u64,
    /// Allow-listed for revolving credit lines.
    pub is_allowed: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub bump: u8,
}

impl LendingPool {
    pub fn pool_value(&self) -> u64 {
        self.available_liquidity
            .saturating_add(self.borrowed_fixed_term)
            .saturating_add(self.borrowed_credit_lines)
    }

    pub fn liquid_value(&self) -> u64 {
        self.available_liquidity
    }

    /// Fraction of pool value currently lent out, in basis points.
    pub fn utilization_bps(&self) -> u64 {
        let value = self.pool_value();
        if value == 0 {
            return 0;
        }
        let lent = value - self.available_liquidity;
        ((lent as u128) * (BASIS_POINTS as u128) / (value as u128)) as u64
    }

    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        self.total_deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(CreditEngineError::MathOverflow)?;
        self.available_liquidity = self
            .available_liquidity
            .checked_add(amount)
            .ok_or(CreditEngineError::MathOverflow)?;
        Ok(())
    }

    pub fn borrow_fixed_term(&mut self, amount: u64) -> Result<()> {
        self.available_liquidity = self
            .available_liquidity
            .checked_sub(amount)
            .ok_or(CreditEngineError::InsufficientLiquidity)?;
        self.borrowed_fixed_term = self
            .borrowed_fixed_term
            .checked_add(amount)
            .ok_or(CreditEngineError::MathOverflow)?;
        Ok(())
    }

    /// Retires `principal` of fixed-term exposure against whatever was
    /// actually `recovered` — more than principal on settlement, less on
    /// default.
    pub fn settle_fixed_term(&mut self, principal: u64, recovered: u64) -> Result<()> {
        self.borrowed_fixed_term = self
            .borrowed_fixed_term
            .checked_sub(principal)
            .ok_or(CreditEngineError::MathOverflow)?;
        self.available_liquidity = self
            .available_liquidity
            .checked_add(recovered)
            .ok_or(CreditEngineError::MathOverflow)?;
        self.total_interest_earned = self
            .total_interest_earned
            .checked_add(recovered.saturating_sub(principal))
            .ok_or(CreditEngineError::MathOverflow)?;
        Ok(())
    }

    pub fn borrow_credit_line(&mut self, amount: u64) -> Result<()> {
        self.available_liquidity = self
            .available_liquidity
            .checked_sub(amount)
            .ok_or(CreditEngineError::InsufficientLiquidity)?;
        self.borrowed_credit_lines = self
            .borrowed_credit_lines
            .checked_add(amount)
            .ok_or(CreditEngineError::MathOverflow)?;
        Ok(())
    }

    pub fn repay_credit_line(&mut self, principal: u64, interest: u64) -> Result<()> {
        self.borrowed_credit_lines = self
            .borrowed_credit_lines
            .checked_sub(principal)
            .ok_or(CreditEngineError::MathOverflow)?;
        self.book_repayment(principal, interest)
    }

    fn book_repayment(&mut self, principal: u64, interest: u64) -> Result<()> {
        self.available_liquidity = self
            .available_liquidity
            .checked_add(principal)
            .ok_or(CreditEngineError::MathOverflow)?
            .checked_add(interest)
            .ok_or(CreditEngineError::MathOverflow)?;
        self.total_interest_earned = self
            .total_interest_earned
            .checked_add(interest)
            .ok_or(CreditEngineError::MathOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with_liquidity(amount: u64) -> LendingPool {
        let mut pool = LendingPool {
            authority: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            decimals: 6,
            total_deposited: 0,
            available_liquidity: 0,
            borrowed_fixed_term: 0,
            borrowed_credit_lines: 0,
            total_interest_earned: 0,
            is_allowed: true,
            is_active: true,
            created_at: 0,
            bump: 255,
        };
        pool.deposit(amount).unwrap();
        pool
    }

    #[test]
    fn utilization_tracks_lent_fraction() {
        let mut pool = pool_with_liquidity(10_000);
        assert_eq!(pool.utilization_bps(), 0);

        pool.borrow_fixed_term(2_500).unwrap();
        assert_eq!(pool.pool_value(), 10_000);
        assert_eq!(pool.utilization_bps(), 2_500);

        pool.borrow_credit_line(2_500).unwrap();
        assert_eq!(pool.utilization_bps(), 5_000);
    }

    #[test]
    fn settlement_books_interest_into_value() {
        let mut pool = pool_with_liquidity(10_000);
        pool.borrow_fixed_term(4_000).unwrap();
        pool.settle_fixed_term(4_000, 4_400).unwrap();

        assert_eq!(pool.borrowed_fixed_term, 0);
        assert_eq!(pool.available_liquidity, 10_400);
        assert_eq!(pool.total_interest_earned, 400);
        assert_eq!(pool.utilization_bps(), 0);
    }

    #[test]
    fn default_settlement_absorbs_the_shortfall() {
        let mut pool = pool_with_liquidity(10_000);
        pool.borrow_fixed_term(4_000).unwrap();
        pool.settle_fixed_term(4_000, 3_000).unwrap();

        assert_eq!(pool.borrowed_fixed_term, 0);
        assert_eq!(pool.available_liquidity, 9_000);
        assert_eq!(pool.total_interest_earned, 0);
    }

    #[test]
    fn borrow_beyond_liquidity_fails() {
        let mut pool = pool_with_liquidity(1_000);
        assert!(pool.borrow_credit_line(1_001).is_err());
    }
}

use anchor_lang::prelude::*;

use crate::error::CreditEngineError;

/// Global per-borrower debt-position lock. A borrower may owe at most one
/// product at a time, system-wide: a fixed-term loan locks with its Loan PDA,
/// a credit line locks with its CreditPosition PDA. Only in-program paths can
/// lock or unlock, which is the locker allow-list.
#[account]
#[derive(InitSpace)]
pub struct BorrowingMutex {
    pub borrower: Pubkey,
    /// The account currently holding this borrower's debt slot;
    /// `Pubkey::default()` when unlocked.
    pub locker: Pubkey,
    pub locked_at: i64,
    pub bump: u8,
}

impl BorrowingMutex {
    pub fn is_unlocked(&self) -> bool {
        self.locker == Pubkey::default()
    }

    pub fn is_locked_by(&self, locker: Pubkey) -> bool {
        self.locker == locker
    }

    pub fn lock(&mut self, locker: Pubkey, now: i64) -> Result<()> {
        require!(self.is_unlocked(), CreditEngineError::BorrowerAlreadyLocked);
        self.locker = locker;
        self.locked_at = now;
        Ok(())
    }

    pub fn unlock(&mut self, caller: Pubkey) -> Result<()> {
        require!(self.is_locked_by(caller), CreditEngineError::CallerNotLocker);
        self.locker = Pubkey::default();
        self.locked_at = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlocked_mutex() -> BorrowingMutex {
        BorrowingMutex {
            borrower: Pubkey::new_unique(),
            locker: Pubkey::default(),
            locked_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn lock_then_unlock_round_trip() {
        let mut mutex = unlocked_mutex();
        let loan = Pubkey::new_unique();

        assert!(mutex.is_unlocked());
        mutex.lock(loan, 1_000).unwrap();
        assert!(mutex.is_locked_by(loan));
        assert_eq!(mutex.locked_at, 1_000);

        mutex.unlock(loan).unwrap();
        assert!(mutex.is_unlocked());
    }

    #[test]
    fn second_locker_is_rejected() {
        let mut mutex = unlocked_mutex();
        let pool_a_position = Pubkey::new_unique();
        let pool_b_position = Pubkey::new_unique();

        mutex.lock(pool_a_position, 1_000).unwrap();
        let err = mutex.lock(pool_b_position, 1_001).unwrap_err();
        assert_eq!(
            err,
            Error::from(CreditEngineError::BorrowerAlreadyLocked)
        );
    }

    #[test]
    fn only_current_locker_may_unlock() {
        let mut mutex = unlocked_mutex();
        let locker = Pubkey::new_unique();
        mutex.lock(locker, 1_000).unwrap();

        assert!(mutex.unlock(Pubkey::new_unique()).is_err());
        assert!(mutex.is_locked_by(locker));
        mutex.unlock(locker).unwrap();
    }
}

use anchor_lang::prelude::*;

use crate::constants::{BASIS_POINTS, PER_SHARE_PRECISION, YEAR};
use crate::error::CreditEngineError;

#[derive(InitSpace, AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum BorrowerStatus {
    Ineligible,
    OnHold,
    Eligible,
}

/// Oracle-maintained creditworthiness record for one borrower.
#[account]
#[derive(InitSpace)]
pub struct CreditScore {
    pub borrower: Pubkey,
    /// 0-255, 255 is best.
    pub score: u8,
    /// Nominal ceiling before score and concentration adjustments.
    pub max_borrower_limit: u64,
    pub status: BorrowerStatus,
    pub updated_at: i64,
    pub bump: u8,
}

impl CreditScore {
    pub fn is_eligible(&self) -> bool {
        self.status == BorrowerStatus::Eligible
    }

    pub fn is_fresh(&self, now: i64, credit_update_period: i64) -> bool {
        now.saturating_sub(self.updated_at) <= credit_update_period
    }
}

/// All borrowers of one pool sharing one discretized score, accounted with a
/// single lazily-updated interest accumulator. Cost per interaction is O(1)
/// regardless of bucket population.
#[account]
#[derive(InitSpace)]
pub struct Bucket {
    pub pool: Pubkey,
    pub score: u8,
    pub borrowers_count: u16,
    pub total_borrowed: u64,
    /// Rate snapshot applied since `updated_at`, basis points.
    pub rate: u64,
    /// Interest per borrowed unit since inception, at 1e27 precision.
    /// Non-decreasing in time.
    pub cumulative_interest_per_share: u128,
    pub updated_at: i64,
    pub bump: u8,
}

impl Bucket {
    /// Brings the accumulator current at the rate in force since the last
    /// touch. Must run before any rate change or principal mutation.
    pub fn accrue(&mut self, now: i64) -> Result<()> {
        if self.updated_at == 0 {
            self.updated_at = now;
            return Ok(());
        }
        let elapsed = now.saturating_sub(self.updated_at);
        if elapsed > 0 {
            // 1e27 / 1e4 divides exactly, keeping the product inside u128
            let delta = (self.rate as u128)
                .checked_mul(elapsed as u128)
                .ok_or(CreditEngineError::MathOverflow)?
                .checked_mul(PER_SHARE_PRECISION / BASIS_POINTS as u128)
                .ok_or(CreditEngineError::MathOverflow)?
                / (YEAR as u128);
            self.cumulative_interest_per_share = self
                .cumulative_interest_per_share
                .checked_add(delta)
                .ok_or(CreditEngineError::MathOverflow)?;
            self.updated_at = now;
        }
        Ok(())
    }

    pub fn set_rate(&mut self, rate: u64) {
        self.rate = rate;
    }

    pub fn join(&mut self, principal: u64) -> Result<()> {
        self.borrowers_count = self
            .borrowers_count
            .checked_add(1)
            .ok_or(CreditEngineError::MathOverflow)?;
        self.increase(principal)
    }

    pub fn leave(&mut self, principal: u64) -> Result<()> {
        self.borrowers_count = self
            .borrowers_count
            .checked_sub(1)
            .ok_or(CreditEngineError::MathOverflow)?;
        self.decrease(principal)
    }

    pub fn increase(&mut self, principal: u64) -> Result<()> {
        self.total_borrowed = self
            .total_borrowed
            .checked_add(principal)
            .ok_or(CreditEngineError::MathOverflow)?;
        Ok(())
    }

    pub fn decrease(&mut self, principal: u64) -> Result<()> {
        self.total_borrowed = self
            .total_borrowed
            .checked_sub(principal)
            .ok_or(CreditEngineError::MathOverflow)?;
        Ok(())
    }
}

/// One borrower's revolving position in one pool. Zeroed, not deleted, on
/// full repayment.
#[account]
#[derive(InitSpace)]
pub struct CreditPosition {
    pub pool: Pubkey,
    pub borrower: Pubkey,
    /// Discretized score of the bucket currently occupied.
    pub score: u8,
    pub principal: u64,
    /// Bucket accumulator value at the last interaction.
    pub per_share_snapshot: u128,
    /// Interest banked at snapshot updates, not yet paid.
    pub accrued_interest: u64,
    pub next_interest_repay_time: i64,
    pub total_interest_paid: u64,
    pub bump: u8,
}

impl CreditPosition {
    pub fn owed_since_snapshot(&self, bucket: &Bucket) -> Result<u64> {
        let delta = bucket
            .cumulative_interest_per_share
            .checked_sub(self.per_share_snapshot)
            .ok_or(CreditEngineError::MathOverflow)?;
        let owed = delta
            .checked_mul(self.principal as u128)
            .ok_or(CreditEngineError::MathOverflow)?
            / PER_SHARE_PRECISION;
        Ok(owed as u64)
    }

    /// Banks interest accrued since the last snapshot. The bucket must be
    /// accrued to `now` first.
    pub fn sync(&mut self, bucket: &Bucket) -> Result<()> {
        let owed = self.owed_since_snapshot(bucket)?;
        self.accrued_interest = self
            .accrued_interest
            .checked_add(owed)
            .ok_or(CreditEngineError::MathOverflow)?;
        self.per_share_snapshot = bucket.cumulative_interest_per_share;
        Ok(())
    }

    pub fn total_owed(&self) -> u64 {
        self.principal.saturating_add(self.accrued_interest)
    }

    pub fn is_overdue(&self, now: i64) -> bool {
        self.principal > 0 && now > self.next_interest_repay_time
    }

    pub fn zero(&mut self) {
        self.principal = 0;
        self.accrued_interest = 0;
        self.per_share_snapshot = 0;
        self.next_interest_repay_time = 0;
    }
}

pub struct RepaymentSplit {
    pub interest: u64,
    pub principal: u64,
    /// True when the position reached zero and left its bucket; the caller
    /// must release the borrowing mutex.
    pub closed: bool,
}

/// Applies an interest-first repayment to a synced position. The caller must
/// have accrued the bucket and synced the position to `now` already.
/// The repayment deadline resets only when interest is cleared in full.
pub fn settle_repayment(
    position: &mut CreditPosition,
    bucket: &mut Bucket,
    state: &mut CreditState,
    amount: u64,
    now: i64,
    interest_repayment_period: i64,
) -> Result<RepaymentSplit> {
    require!(amount > 0, CreditEngineError::ZeroAmount);
    let total_owed = position.total_owed();
    require!(total_owed > 0, CreditEngineError::NothingBorrowed);
    require!(amount <= total_owed, CreditEngineError::RepaymentTooLarge);

    let interest = amount.min(position.accrued_interest);
    let principal = amount - interest;

    position.accrued_interest -= interest;
    position.total_interest_paid = position
        .total_interest_paid
        .checked_add(interest)
        .ok_or(CreditEngineError::MathOverflow)?;
    state.total_interest_paid = state
        .total_interest_paid
        .checked_add(interest)
        .ok_or(CreditEngineError::MathOverflow)?;
    if position.accrued_interest == 0 {
        position.next_interest_repay_time = now.saturating_add(interest_repayment_period);
    }

    position.principal = position
        .principal
        .checked_sub(principal)
        .ok_or(CreditEngineError::MathOverflow)?;
    bucket.decrease(principal)?;
    state.total_borrowed = state
        .total_borrowed
        .checked_sub(principal)
        .ok_or(CreditEngineError::MathOverflow)?;

    let closed = position.principal == 0 && position.accrued_interest == 0;
    if closed {
        bucket.leave(0)?;
        if bucket.borrowers_count == 0 {
            state.clear_bucket_used(bucket.score);
        }
        position.zero();
    }

    Ok(RepaymentSplit {
        interest,
        principal,
        closed,
    })
}

/// Per-pool credit-line aggregates and the 256-bit occupancy bitmap letting
/// iteration skip empty buckets.
#[account]
#[derive(InitSpace)]
pub struct CreditState {
    pub pool: Pubkey,
    pub used_buckets: [u64; 4],
    pub total_borrowed: u64,
    pub total_interest_paid: u64,
    pub bump: u8,
}

impl CreditState {
    pub fn is_bucket_used(&self, score: u8) -> bool {
        self.used_buckets[(score / 64) as usize] & (1u64 << (score % 64)) != 0
    }

    pub fn mark_bucket_used(&mut self, score: u8) {
        self.used_buckets[(score / 64) as usize] |= 1u64 << (score % 64);
    }

    pub fn clear_bucket_used(&mut self, score: u8) {
        self.used_buckets[(score / 64) as usize] &= !(1u64 << (score % 64));
    }

    /// Occupied bucket scores, ascending, in O(occupied).
    pub fn occupied_buckets(&self) -> Vec<u8> {
        let mut scores = Vec::new();
        for (limb_index, limb) in self.used_buckets.iter().enumerate() {
            let mut bits = *limb;
            while bits != 0 {
                let bit = bits.trailing_zeros() as u8;
                scores.push(limb_index as u8 * 64 + bit);
                bits &= bits - 1;
            }
        }
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_bucket(pool: Pubkey, score: u8, rate: u64) -> Bucket {
        Bucket {
            pool,
            score,
            borrowers_count: 0,
            total_borrowed: 0,
            rate,
            cumulative_interest_per_share: 0,
            updated_at: 0,
            bump: 255,
        }
    }

    fn fresh_position(pool: Pubkey, borrower: Pubkey, score: u8) -> CreditPosition {
        CreditPosition {
            pool,
            borrower,
            score,
            principal: 0,
            per_share_snapshot: 0,
            accrued_interest: 0,
            next_interest_repay_time: 0,
            total_interest_paid: 0,
            bump: 255,
        }
    }

    #[test]
    fn one_year_at_ten_percent_accrues_ten_percent() {
        let pool = Pubkey::new_unique();
        let mut bucket = fresh_bucket(pool, 255, 1_000);
        bucket.accrue(100).unwrap();

        let mut position = fresh_position(pool, Pubkey::new_unique(), 255);
        position.principal = 10_000;
        position.per_share_snapshot = bucket.cumulative_interest_per_share;
        bucket.join(10_000).unwrap();

        bucket.accrue(100 + YEAR).unwrap();
        assert_eq!(position.owed_since_snapshot(&bucket).unwrap(), 1_000);
    }

    #[test]
    fn accumulator_is_non_decreasing() {
        let mut bucket = fresh_bucket(Pubkey::new_unique(), 200, 500);
        bucket.accrue(1_000).unwrap();
        let mut last = bucket.cumulative_interest_per_share;
        for step in 1..10 {
            bucket.accrue(1_000 + step * 3_600).unwrap();
            assert!(bucket.cumulative_interest_per_share >= last);
            last = bucket.cumulative_interest_per_share;
        }
    }

    #[test]
    fn one_borrower_leaving_does_not_touch_the_other() {
        let pool = Pubkey::new_unique();
        let mut bucket = fresh_bucket(pool, 220, 1_000);
        bucket.accrue(1_000).unwrap();

        let mut alice = fresh_position(pool, Pubkey::new_unique(), 220);
        let mut bob = fresh_position(pool, Pubkey::new_unique(), 220);
        alice.principal = 6_000;
        bob.principal = 4_000;
        bucket.join(6_000).unwrap();
        bucket.join(4_000).unwrap();
        assert_eq!(bucket.total_borrowed, alice.principal + bob.principal);

        bucket.accrue(1_000 + YEAR / 2).unwrap();
        alice.sync(&bucket).unwrap();
        let alice_interest_before = alice.accrued_interest;
        assert_eq!(alice_interest_before, 300);

        // bob repays in full
        bob.sync(&bucket).unwrap();
        bucket.leave(bob.principal).unwrap();
        bob.zero();

        assert_eq!(bucket.borrowers_count, 1);
        assert_eq!(bucket.total_borrowed, alice.principal);

        alice.sync(&bucket).unwrap();
        assert_eq!(alice.accrued_interest, alice_interest_before);
    }

    #[test]
    fn bucket_total_matches_member_principal_sum() {
        let pool = Pubkey::new_unique();
        let mut bucket = fresh_bucket(pool, 100, 800);
        bucket.accrue(0).unwrap();

        let mut principals = [2_500u64, 1_500, 9_000];
        for p in principals {
            bucket.join(p).unwrap();
        }
        assert_eq!(
            bucket.total_borrowed,
            principals.iter().sum::<u64>()
        );

        principals[1] = 0;
        bucket.leave(1_500).unwrap();
        assert_eq!(
            bucket.total_borrowed,
            principals.iter().sum::<u64>()
        );
        assert_eq!(bucket.borrowers_count, 2);
    }

    #[test]
    fn bitmap_tracks_occupied_buckets() {
        let mut state = CreditState {
            pool: Pubkey::new_unique(),
            used_buckets: [0; 4],
            total_borrowed: 0,
            total_interest_paid: 0,
            bump: 255,
        };
        for score in [0u8, 63, 64, 127, 128, 255] {
            state.mark_bucket_used(score);
            assert!(state.is_bucket_used(score));
        }
        assert_eq!(state.occupied_buckets(), vec![0, 63, 64, 127, 128, 255]);

        state.clear_bucket_used(64);
        assert!(!state.is_bucket_used(64));
        assert_eq!(state.occupied_buckets(), vec![0, 63, 127, 128, 255]);
    }

    fn fresh_state(pool: Pubkey) -> CreditState {
        CreditState {
            pool,
            used_buckets: [0; 4],
            total_borrowed: 0,
            total_interest_paid: 0,
            bump: 255,
        }
    }

    // join a bucket the way borrow_credit does
    fn open_position(
        position: &mut CreditPosition,
        bucket: &mut Bucket,
        state: &mut CreditState,
        amount: u64,
        now: i64,
        period: i64,
    ) {
        bucket.accrue(now).unwrap();
        position.sync(bucket).unwrap();
        position.principal = amount;
        position.next_interest_repay_time = now + period;
        bucket.join(amount).unwrap();
        state.mark_bucket_used(bucket.score);
        state.total_borrowed += amount;
    }

    #[test]
    fn immediate_repay_in_full_round_trip() {
        let pool = Pubkey::new_unique();
        let mut bucket = fresh_bucket(pool, 255, 1_000);
        let mut state = fresh_state(pool);
        let mut position = fresh_position(pool, Pubkey::new_unique(), 255);

        let now = 500;
        open_position(&mut position, &mut bucket, &mut state, 5_000, now, 86_400);

        // no time elapsed: the full close costs exactly the amount drawn
        bucket.accrue(now).unwrap();
        position.sync(&bucket).unwrap();
        assert_eq!(position.total_owed(), 5_000);

        let split =
            settle_repayment(&mut position, &mut bucket, &mut state, 5_000, now, 86_400).unwrap();
        assert_eq!(split.interest, 0);
        assert_eq!(split.principal, 5_000);
        assert!(split.closed);
        assert_eq!(position.principal, 0);
        assert_eq!(bucket.total_borrowed, 0);
        assert_eq!(bucket.borrowers_count, 0);
        assert!(!state.is_bucket_used(255));
    }

    #[test]
    fn repayment_is_interest_first() {
        let pool = Pubkey::new_unique();
        let mut bucket = fresh_bucket(pool, 255, 1_000);
        let mut state = fresh_state(pool);
        let mut position = fresh_position(pool, Pubkey::new_unique(), 255);

        let start = 1_000;
        open_position(&mut position, &mut bucket, &mut state, 10_000, start, 86_400);

        let later = start + YEAR;
        bucket.accrue(later).unwrap();
        position.sync(&bucket).unwrap();
        assert_eq!(position.accrued_interest, 1_000);

        let split =
            settle_repayment(&mut position, &mut bucket, &mut state, 1_500, later, 86_400)
                .unwrap();
        assert_eq!(split.interest, 1_000);
        assert_eq!(split.principal, 500);
        assert_eq!(position.principal, 9_500);
        assert_eq!(bucket.total_borrowed, 9_500);
        assert!(!split.closed);
    }

    #[test]
    fn partial_interest_repay_keeps_the_deadline() {
        let pool = Pubkey::new_unique();
        let mut bucket = fresh_bucket(pool, 255, 1_000);
        let mut state = fresh_state(pool);
        let mut position = fresh_position(pool, Pubkey::new_unique(), 255);

        let start = 1_000;
        open_position(&mut position, &mut bucket, &mut state, 10_000, start, 86_400);
        let deadline = position.next_interest_repay_time;

        let later = start + YEAR;
        bucket.accrue(later).unwrap();
        position.sync(&bucket).unwrap();

        // covers only part of the 1_000 interest owed: deadline untouched
        settle_repayment(&mut position, &mut bucket, &mut state, 400, later, 86_400).unwrap();
        assert_eq!(position.next_interest_repay_time, deadline);

        // clearing the rest of the interest resets it
        settle_repayment(&mut position, &mut bucket, &mut state, 600, later, 86_400).unwrap();
        assert_eq!(position.next_interest_repay_time, later + 86_400);
    }

    #[test]
    fn overpayment_is_rejected() {
        let pool = Pubkey::new_unique();
        let mut bucket = fresh_bucket(pool, 255, 1_000);
        let mut state = fresh_state(pool);
        let mut position = fresh_position(pool, Pubkey::new_unique(), 255);

        open_position(&mut position, &mut bucket, &mut state, 1_000, 1_000, 86_400);
        bucket.accrue(1_000).unwrap();
        position.sync(&bucket).unwrap();
        assert!(
            settle_repayment(&mut position, &mut bucket, &mut state, 1_001, 1_000, 86_400)
                .is_err()
        );
    }

    #[test]
    fn overdue_needs_outstanding_principal() {
        let mut position =
            fresh_position(Pubkey::new_unique(), Pubkey::new_unique(), 255);
        position.next_interest_repay_time = 1_000;
        assert!(!position.is_overdue(2_000));
        position.principal = 1;
        assert!(position.is_overdue(2_000));
        assert!(!position.is_overdue(999));
    }
}

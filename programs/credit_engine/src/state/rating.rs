use anchor_lang::prelude::*;

use crate::error::CreditEngineError;

/// Staking-weighted yes/no prediction ledger for one pending loan, plus the
/// reward bookkeeping once the loan funds.
#[account]
#[derive(InitSpace)]
pub struct Rating {
    pub loan: Pubkey,
    /// The submitting borrower; zeroed on retract.
    pub creator: Pubkey,
    pub submitted_at: i64,
    pub yes_total: u64,
    pub no_total: u64,
    /// Raters' share of the distributor budget, set once at the first claim.
    pub reward_reserved: u64,
    pub reward_claimed: u64,
    pub reward_pulled: bool,
    /// Vote-weight denominator frozen when the budget is pulled.
    pub total_weight_at_claim: u64,
    pub bump: u8,
}

/// One rater's recorded stake weight on one loan. Preserved across retract so
/// historical rate queries keep answering.
#[account]
#[derive(InitSpace)]
pub struct VoterRecord {
    pub loan: Pubkey,
    pub rater: Pubkey,
    pub yes_weight: u64,
    pub no_weight: u64,
    pub claimed: u64,
    pub bump: u8,
}

impl VoterRecord {
    pub fn weight(&self) -> u64 {
        self.yes_weight.saturating_add(self.no_weight)
    }
}

impl Rating {
    pub fn is_retracted(&self) -> bool {
        self.creator == Pubkey::default()
    }

    pub fn total_weight(&self) -> u64 {
        self.yes_total.saturating_add(self.no_total)
    }

    /// Records `weight` (the rater's live staked balance) on one side.
    /// Casting the opposite side replaces the previous side atomically;
    /// casting the same side is an idempotent refresh.
    pub fn cast(&mut self, record: &mut VoterRecord, yes: bool, weight: u64) -> Result<()> {
        require!(weight > 0, CreditEngineError::ZeroStake);

        self.yes_total = self
            .yes_total
            .checked_sub(record.yes_weight)
            .ok_or(CreditEngineError::MathOverflow)?;
        self.no_total = self
            .no_total
            .checked_sub(record.no_weight)
            .ok_or(CreditEngineError::MathOverflow)?;
        record.yes_weight = 0;
        record.no_weight = 0;

        if yes {
            record.yes_weight = weight;
            self.yes_total = self
                .yes_total
                .checked_add(weight)
                .ok_or(CreditEngineError::MathOverflow)?;
        } else {
            record.no_weight = weight;
            self.no_total = self
                .no_total
                .checked_add(weight)
                .ok_or(CreditEngineError::MathOverflow)?;
        }
        Ok(())
    }

    /// Creator walks away: aggregates reset, individual records stay.
    pub fn retract(&mut self, caller: Pubkey) -> Result<()> {
        require!(!self.is_retracted(), CreditEngineError::RatingRetracted);
        require!(caller == self.creator, CreditEngineError::CallerNotCreator);
        self.creator = Pubkey::default();
        self.yes_total = 0;
        self.no_total = 0;
        Ok(())
    }

    /// Neutralizes prior votes: aggregates and the caller's own record.
    pub fn reset_cast(&mut self, record: &mut VoterRecord) {
        self.yes_total = 0;
        self.no_total = 0;
        record.yes_weight = 0;
        record.no_weight = 0;
    }

    /// Books the raters' pot pulled from the distributor and freezes the
    /// pro-rata denominator.
    pub fn reserve_reward(&mut self, raters_pot: u64) {
        self.reward_reserved = raters_pot;
        self.total_weight_at_claim = self.total_weight();
        self.reward_pulled = true;
    }

    /// What this rater could still claim right now.
    pub fn claimable(&self, record: &VoterRecord) -> u64 {
        if !self.reward_pulled || self.total_weight_at_claim == 0 {
            return 0;
        }
        let entitled = (self.reward_reserved as u128)
            .saturating_mul(record.weight() as u128)
            / (self.total_weight_at_claim as u128);
        let entitled = (entitled as u64).saturating_sub(record.claimed);
        // never pay out past what was reserved
        entitled.min(self.reward_reserved.saturating_sub(self.reward_claimed))
    }

    /// Settles the claim; returns the amount to transfer (zero on re-claim).
    pub fn claim(&mut self, record: &mut VoterRecord) -> Result<u64> {
        let amount = self.claimable(record);
        record.claimed = record
            .claimed
            .checked_add(amount)
            .ok_or(CreditEngineError::MathOverflow)?;
        self.reward_claimed = self
            .reward_claimed
            .checked_add(amount)
            .ok_or(CreditEngineError::MathOverflow)?;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating_for(loan: Pubkey, creator: Pubkey) -> Rating {
        Rating {
            loan,
            creator,
            submitted_at: 0,
            yes_total: 0,
            no_total: 0,
            reward_reserved: 0,
            reward_claimed: 0,
            reward_pulled: false,
            total_weight_at_claim: 0,
            bump: 255,
        }
    }

    fn record_for(loan: Pubkey, rater: Pubkey) -> VoterRecord {
        VoterRecord {
            loan,
            rater,
            yes_weight: 0,
            no_weight: 0,
            claimed: 0,
            bump: 255,
        }
    }

    #[test]
    fn switching_sides_replaces_previous_weight() {
        let loan = Pubkey::new_unique();
        let mut rating = rating_for(loan, Pubkey::new_unique());
        let mut record = record_for(loan, Pubkey::new_unique());

        rating.cast(&mut record, true, 500).unwrap();
        assert_eq!(rating.yes_total, 500);
        assert_eq!(rating.no_total, 0);

        rating.cast(&mut record, false, 700).unwrap();
        assert_eq!(rating.yes_total, 0);
        assert_eq!(rating.no_total, 700);
        assert_eq!(record.yes_weight, 0);
        assert_eq!(record.no_weight, 700);
    }

    #[test]
    fn same_side_recast_is_idempotent() {
        let loan = Pubkey::new_unique();
        let mut rating = rating_for(loan, Pubkey::new_unique());
        let mut record = record_for(loan, Pubkey::new_unique());

        rating.cast(&mut record, true, 500).unwrap();
        rating.cast(&mut record, true, 500).unwrap();
        assert_eq!(rating.yes_total, 500);
        assert_eq!(record.yes_weight, 500);
    }

    #[test]
    fn retract_preserves_records_but_clears_aggregates() {
        let loan = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let mut rating = rating_for(loan, creator);
        let mut record = record_for(loan, Pubkey::new_unique());

        rating.cast(&mut record, true, 500).unwrap();
        assert!(rating.retract(Pubkey::new_unique()).is_err());
        rating.retract(creator).unwrap();

        assert!(rating.is_retracted());
        assert_eq!(rating.yes_total, 0);
        assert_eq!(record.yes_weight, 500);
        assert!(rating.retract(creator).is_err());
    }

    #[test]
    fn claims_are_pro_rata_monotone_and_idempotent() {
        let loan = Pubkey::new_unique();
        let mut rating = rating_for(loan, Pubkey::new_unique());
        let mut alice = record_for(loan, Pubkey::new_unique());
        let mut bob = record_for(loan, Pubkey::new_unique());

        rating.cast(&mut alice, true, 750).unwrap();
        rating.cast(&mut bob, false, 250).unwrap();
        rating.reserve_reward(1_000);

        assert_eq!(rating.claim(&mut alice).unwrap(), 750);
        // claiming again with nothing new yields a zero transfer
        assert_eq!(rating.claim(&mut alice).unwrap(), 0);
        assert_eq!(rating.claim(&mut bob).unwrap(), 250);
        assert_eq!(rating.reward_claimed, rating.reward_reserved);
        assert_eq!(rating.claim(&mut bob).unwrap(), 0);
    }

    #[test]
    fn claims_never_exceed_reserved() {
        let loan = Pubkey::new_unique();
        let mut rating = rating_for(loan, Pubkey::new_unique());
        let mut record = record_for(loan, Pubkey::new_unique());

        rating.cast(&mut record, true, 300).unwrap();
        rating.reserve_reward(999);
        let paid = rating.claim(&mut record).unwrap();
        assert!(paid <= 999);
        assert_eq!(rating.claim(&mut record).unwrap(), 0);
        assert!(rating.reward_claimed <= rating.reward_reserved);
    }
}

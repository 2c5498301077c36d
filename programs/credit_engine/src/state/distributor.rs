use anchor_lang::prelude::*;

/// One-shot, drainable reward source for rating claims. Funded once; each
/// first-claim-per-loan drains a budget until nothing remains.
#[account]
#[derive(InitSpace)]
pub struct RewardDistributor {
    pub authority: Pubkey,
    pub reward_mint: Pubkey,
    pub treasury: Pubkey,
    /// Staking pool's reward account receiving the non-rater share.
    pub stake_pool_account: Pubkey,
    pub remaining: u64,
    pub bump: u8,
}

impl RewardDistributor {
    /// Takes up to `want` from the remaining budget.
    pub fn drain(&mut self, want: u64) -> u64 {
        let take = want.min(self.remaining);
        self.remaining -= take;
        take
    }

    /// Returns everything left and zeroes the budget.
    pub fn empty(&mut self) -> u64 {
        let rest = self.remaining;
        self.remaining = 0;
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_caps_at_remaining() {
        let mut distributor = RewardDistributor {
            authority: Pubkey::new_unique(),
            reward_mint: Pubkey::new_unique(),
            treasury: Pubkey::new_unique(),
            stake_pool_account: Pubkey::new_unique(),
            remaining: 100,
            bump: 255,
        };
        assert_eq!(distributor.drain(60), 60);
        assert_eq!(distributor.drain(60), 40);
        assert_eq!(distributor.drain(60), 0);
        assert_eq!(distributor.empty(), 0);
    }
}

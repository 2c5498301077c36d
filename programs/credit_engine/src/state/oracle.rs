use anchor_lang::prelude::*;

/// Time-averaged external borrow-rate feed for one pool, written by the
/// oracle authority. The averaging window lives off-chain; this account holds
/// the already-averaged figure.
#[account]
#[derive(InitSpace)]
pub struct BaseRateOracle {
    pub pool: Pubkey,
    pub rate_bps: u64,
    pub updated_at: i64,
    pub bump: u8,
}

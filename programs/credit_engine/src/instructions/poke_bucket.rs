use crate::constants::{SEEDS_BASE_RATE, SEEDS_BUCKET, SEEDS_CONFIG};
use crate::error::*;
use crate::instructions::utils::credit_line_rate;
use crate::state::*;
use anchor_lang::prelude::*;

/// Permissionless heartbeat: accrues a bucket at the rate in force, then
/// snaps it to the current rate inputs. Needed after a base-rate or
/// utilization change so stale buckets don't undercharge.
pub fn poke_bucket(ctx: Context<PokeBucket>) -> Result<()> {
    let config = &ctx.accounts.config;
    let pool = &ctx.accounts.pool;
    let bucket = &mut ctx.accounts.bucket;
    let now = Clock::get()?.unix_timestamp;

    bucket.accrue(now)?;
    let bucket_score = bucket.score;
    bucket.set_rate(credit_line_rate(
        ctx.accounts.base_rate_oracle.rate_bps,
        config.risk_premium,
        bucket_score,
        config.utilization_adjustment_coefficient,
        pool.utilization_bps(),
    ));

    msg!(
        "Bucket {} of pool {} poked to {} bps",
        bucket.score,
        pool.key(),
        bucket.rate
    );
    Ok(())
}

#[derive(Accounts)]
pub struct PokeBucket<'info> {
    #[account(
        seeds = [SEEDS_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(constraint = pool.is_active @ CreditEngineError::PoolNotActive)]
    pub pool: Account<'info, LendingPool>,

    #[account(
        mut,
        seeds = [SEEDS_BUCKET, pool.key().as_ref(), &[bucket.score]],
        bump = bucket.bump
    )]
    pub bucket: Account<'info, Bucket>,

    #[account(
        seeds = [SEEDS_BASE_RATE, pool.key().as_ref()],
        bump = base_rate_oracle.bump
    )]
    pub base_rate_oracle: Account<'info, BaseRateOracle>,
}

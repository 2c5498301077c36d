use crate::constants::{
    SEEDS_BASE_RATE, SEEDS_BUCKET, SEEDS_CONFIG, SEEDS_CREDIT_STATE, SEEDS_POSITION,
    SEEDS_SCORE,
};
use crate::error::*;
use crate::instructions::utils::credit_line_rate;
use crate::state::*;
use anchor_lang::prelude::*;

/// Moves a position into the bucket matching its latest oracle score, banking
/// accrued interest at the old rate first. Permissionless — anyone may bring
/// a borrower's bucket placement current.
pub fn rebucket_borrower(ctx: Context<RebucketBorrower>) -> Result<()> {
    let config = &ctx.accounts.config;
    let pool = &ctx.accounts.pool;
    let credit_state = &mut ctx.accounts.credit_state;
    let old_bucket = &mut ctx.accounts.old_bucket;
    let new_bucket = &mut ctx.accounts.new_bucket;
    let position = &mut ctx.accounts.position;
    let score = ctx.accounts.credit_score.score;
    let now = Clock::get()?.unix_timestamp;

    require!(position.principal > 0, CreditEngineError::NothingBorrowed);
    require!(position.score != score, CreditEngineError::ScoreUnchanged);

    // leave the old bucket at its accrued state
    old_bucket.accrue(now)?;
    position.sync(old_bucket)?;
    old_bucket.leave(position.principal)?;
    if old_bucket.borrowers_count == 0 {
        credit_state.clear_bucket_used(old_bucket.score);
    }

    // enter the new one at the rate its score commands
    if new_bucket.updated_at == 0 {
        new_bucket.pool = pool.key();
        new_bucket.score = score;
        new_bucket.bump = ctx.bumps.new_bucket;
    }
    new_bucket.accrue(now)?;
    new_bucket.set_rate(credit_line_rate(
        ctx.accounts.base_rate_oracle.rate_bps,
        config.risk_premium,
        score,
        config.utilization_adjustment_coefficient,
        pool.utilization_bps(),
    ));
    new_bucket.join(position.principal)?;
    credit_state.mark_bucket_used(score);
    position.per_share_snapshot = new_bucket.cumulative_interest_per_share;
    position.score = score;

    msg!(
        "Borrower {} moved from bucket {} to {}",
        position.borrower,
        old_bucket.score,
        score
    );
    Ok(())
}

#[derive(Accounts)]
pub struct RebucketBorrower<'info> {
    #[account(
        seeds = [SEEDS_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(constraint = pool.is_active @ CreditEngineError::PoolNotActive)]
    pub pool: Account<'info, LendingPool>,

    #[account(
        mut,
        seeds = [SEEDS_CREDIT_STATE, pool.key().as_ref()],
        bump = credit_state.bump
    )]
    pub credit_state: Account<'info, CreditState>,

    #[account(
        mut,
        seeds = [SEEDS_BUCKET, pool.key().as_ref(), &[position.score]],
        bump = old_bucket.bump
    )]
    pub old_bucket: Account<'info, Bucket>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Bucket::INIT_SPACE,
        seeds = [SEEDS_BUCKET, pool.key().as_ref(), &[credit_score.score]],
        bump
    )]
    pub new_bucket: Account<'info, Bucket>,

    #[account(
        mut,
        seeds = [SEEDS_POSITION, pool.key().as_ref(), position.borrower.as_ref()],
        bump = position.bump
    )]
    pub position: Account<'info, CreditPosition>,

    #[account(
        seeds = [SEEDS_SCORE, position.borrower.as_ref()],
        bump = credit_score.bump
    )]
    pub credit_score: Account<'info, CreditScore>,

    #[account(
        seeds = [SEEDS_BASE_RATE, pool.key().as_ref()],
        bump = base_rate_oracle.bump
    )]
    pub base_rate_oracle: Account<'info, BaseRateOracle>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

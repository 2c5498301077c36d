use crate::constants::{SEEDS_BASE_RATE, SEEDS_CONFIG};
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn set_base_rate(ctx: Context<SetBaseRate>, rate_bps: u64) -> Result<()> {
    let oracle = &mut ctx.accounts.base_rate_oracle;
    let clock = Clock::get()?;

    oracle.pool = ctx.accounts.pool.key();
    oracle.rate_bps = rate_bps;
    oracle.updated_at = clock.unix_timestamp;
    oracle.bump = ctx.bumps.base_rate_oracle;

    msg!(
        "Base rate for pool {} set to {} bps",
        oracle.pool,
        rate_bps
    );
    Ok(())
}

#[derive(Accounts)]
pub struct SetBaseRate<'info> {
    #[account(
        seeds = [SEEDS_CONFIG],
        bump = config.bump,
        constraint = config.oracle_authority == oracle_authority.key()
            @ CreditEngineError::InvalidConfiguration
    )]
    pub config: Account<'info, ProtocolConfig>,

    pub pool: Account<'info, LendingPool>,

    #[account(
        init_if_needed,
        payer = oracle_authority,
        space = 8 + BaseRateOracle::INIT_SPACE,
        seeds = [SEEDS_BASE_RATE, pool.key().as_ref()],
        bump
    )]
    pub base_rate_oracle: Account<'info, BaseRateOracle>,

    #[account(mut)]
    pub oracle_authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

use crate::constants::SEEDS_CONFIG;
use crate::error::*;
use crate::events::PoolAllowed;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn allow_pool(ctx: Context<AllowPool>, allowed: bool) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.is_allowed = allowed;

    emit!(PoolAllowed {
        pool: pool.key(),
        allowed,
    });
    msg!("Pool {} allowed: {}", pool.key(), allowed);
    Ok(())
}

#[derive(Accounts)]
pub struct AllowPool<'info> {
    #[account(
        seeds = [SEEDS_CONFIG],
        bump = config.bump,
        has_one = authority @ CreditEngineError::InvalidConfiguration
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(mut)]
    pub pool: Account<'info, LendingPool>,

    pub authority: Signer<'info>,
}

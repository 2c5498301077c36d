use crate::constants::{
    SEEDS_CONFIG, SEEDS_CREDIT_STATE, SEEDS_POOL, SEEDS_POOL_VAULT, SEEDS_PORTFOLIO,
};
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

pub fn create_pool(ctx: Context<CreatePool>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let clock = Clock::get()?;

    pool.authority = ctx.accounts.authority.key();
    pool.mint = ctx.accounts.mint.key();
    pool.vault = ctx.accounts.vault.key();
    pool.decimals = ctx.accounts.mint.decimals;
    pool.total_deposited = 0;
    pool.available_liquidity = 0;
    pool.borrowed_fixed_term = 0;
    pool.borrowed_credit_lines = 0;
    pool.total_interest_earned = 0;
    pool.is_allowed = false;
    pool.is_active = true;
    pool.created_at = clock.unix_timestamp;
    pool.bump = ctx.bumps.pool;

    let portfolio = &mut ctx.accounts.portfolio;
    portfolio.pool = pool.key();
    portfolio.loans = Vec::new();
    portfolio.bump = ctx.bumps.portfolio;

    let credit_state = &mut ctx.accounts.credit_state;
    credit_state.pool = pool.key();
    credit_state.used_buckets = [0; 4];
    credit_state.total_borrowed = 0;
    credit_state.total_interest_paid = 0;
    credit_state.bump = ctx.bumps.credit_state;

    msg!("Pool created for mint: {}", pool.mint);
    Ok(())
}

#[derive(Accounts)]
pub struct CreatePool<'info> {
    #[account(
        seeds = [SEEDS_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(
        init,
        payer = authority,
        space = 8 + LendingPool::INIT_SPACE,
        seeds = [SEEDS_POOL, authority.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, LendingPool>,

    #[account(
        init,
        payer = authority,
        token::mint = mint,
        token::authority = vault,
        seeds = [SEEDS_POOL_VAULT, pool.key().as_ref()],
        bump
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init,
        payer = authority,
        space = 8 + Portfolio::INIT_SPACE,
        seeds = [SEEDS_PORTFOLIO, pool.key().as_ref()],
        bump
    )]
    pub portfolio: Account<'info, Portfolio>,

    #[account(
        init,
        payer = authority,
        space = 8 + CreditState::INIT_SPACE,
        seeds = [SEEDS_CREDIT_STATE, pool.key().as_ref()],
        bump
    )]
    pub credit_state: Account<'info, CreditState>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

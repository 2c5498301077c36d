use crate::constants::{SEEDS_CONFIG, SEEDS_POOL_VAULT};
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

pub fn deposit_to_pool(ctx: Context<DepositToPool>, amount: u64) -> Result<()> {
    require!(amount > 0, CreditEngineError::ZeroAmount);

    let pool = &mut ctx.accounts.pool;
    let config = &mut ctx.accounts.config;

    let transfer_to_vault = TransferChecked {
        from: ctx.accounts.depositor_token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: ctx.accounts.depositor.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new(cpi_program, transfer_to_vault);
    transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;

    pool.deposit(amount)?;
    config.total_value_locked = config
        .total_value_locked
        .checked_add(amount)
        .ok_or(CreditEngineError::MathOverflow)?;

    msg!("Deposited {} into pool {}", amount, pool.key());
    Ok(())
}

#[derive(Accounts)]
pub struct DepositToPool<'info> {
    #[account(
        mut,
        seeds = [SEEDS_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(
        mut,
        constraint = pool.is_active @ CreditEngineError::PoolNotActive,
        has_one = mint
    )]
    pub pool: Account<'info, LendingPool>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [SEEDS_POOL_VAULT, pool.key().as_ref()],
        bump,
        constraint = vault.key() == pool.vault
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = depositor_token_account.owner == depositor.key(),
        constraint = depositor_token_account.mint == mint.key()
    )]
    pub depositor_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

use crate::constants::{SEEDS_CONFIG, SEEDS_DISTRIBUTOR, SEEDS_DISTRIBUTOR_TREASURY};
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

pub fn initialize_distributor(ctx: Context<InitializeDistributor>, amount: u64) -> Result<()> {
    require!(amount > 0, CreditEngineError::ZeroAmount);

    let distributor = &mut ctx.accounts.distributor;
    distributor.authority = ctx.accounts.authority.key();
    distributor.reward_mint = ctx.accounts.reward_mint.key();
    distributor.treasury = ctx.accounts.treasury.key();
    distributor.stake_pool_account = ctx.accounts.stake_pool_account.key();
    distributor.remaining = amount;
    distributor.bump = ctx.bumps.distributor;

    let transfer_to_treasury = TransferChecked {
        from: ctx.accounts.funder_token_account.to_account_info(),
        to: ctx.accounts.treasury.to_account_info(),
        mint: ctx.accounts.reward_mint.to_account_info(),
        authority: ctx.accounts.authority.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new(cpi_program, transfer_to_treasury);
    transfer_checked(cpi_ctx, amount, ctx.accounts.reward_mint.decimals)?;

    msg!("Distributor funded with {}", amount);
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeDistributor<'info> {
    #[account(
        seeds = [SEEDS_CONFIG],
        bump = config.bump,
        has_one = authority @ CreditEngineError::InvalidConfiguration,
        constraint = config.staked_token_mint == reward_mint.key()
            @ CreditEngineError::InvalidConfiguration
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(
        init,
        payer = authority,
        space = 8 + RewardDistributor::INIT_SPACE,
        seeds = [SEEDS_DISTRIBUTOR],
        bump
    )]
    pub distributor: Account<'info, RewardDistributor>,

    #[account(
        init,
        payer = authority,
        token::mint = reward_mint,
        token::authority = treasury,
        seeds = [SEEDS_DISTRIBUTOR_TREASURY],
        bump
    )]
    pub treasury: InterfaceAccount<'info, TokenAccount>,

    /// Staking pool's reward account; receives the non-rater share of each
    /// loan's budget.
    #[account(constraint = stake_pool_account.mint == reward_mint.key())]
    pub stake_pool_account: InterfaceAccount<'info, TokenAccount>,

    pub reward_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = funder_token_account.owner == authority.key(),
        constraint = funder_token_account.mint == reward_mint.key()
    )]
    pub funder_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

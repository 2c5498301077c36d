use crate::constants::{SEEDS_DISTRIBUTOR, SEEDS_DISTRIBUTOR_TREASURY};
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

pub fn empty_distributor(ctx: Context<EmptyDistributor>) -> Result<()> {
    let distributor = &mut ctx.accounts.distributor;
    let rest = distributor.empty();
    require!(rest > 0, CreditEngineError::ZeroAmount);

    let signer_seeds: &[&[&[u8]]] = &[&[
        SEEDS_DISTRIBUTOR_TREASURY,
        &[ctx.bumps.treasury],
    ]];
    let transfer_back = TransferChecked {
        from: ctx.accounts.treasury.to_account_info(),
        to: ctx.accounts.authority_token_account.to_account_info(),
        mint: ctx.accounts.reward_mint.to_account_info(),
        authority: ctx.accounts.treasury.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, transfer_back, signer_seeds);
    transfer_checked(cpi_ctx, rest, ctx.accounts.reward_mint.decimals)?;

    msg!("Distributor emptied, {} returned", rest);
    Ok(())
}

#[derive(Accounts)]
pub struct EmptyDistributor<'info> {
    #[account(
        mut,
        seeds = [SEEDS_DISTRIBUTOR],
        bump = distributor.bump,
        has_one = authority @ CreditEngineError::InvalidConfiguration,
        has_one = reward_mint
    )]
    pub distributor: Account<'info, RewardDistributor>,

    #[account(
        mut,
        seeds = [SEEDS_DISTRIBUTOR_TREASURY],
        bump,
        constraint = treasury.key() == distributor.treasury
    )]
    pub treasury: InterfaceAccount<'info, TokenAccount>,

    pub reward_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = authority_token_account.owner == authority.key(),
        constraint = authority_token_account.mint == reward_mint.key()
    )]
    pub authority_token_account: InterfaceAccount<'info, TokenAccount>,

    pub authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

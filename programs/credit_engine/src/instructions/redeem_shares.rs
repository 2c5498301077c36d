use crate::constants::{SEEDS_LOAN_ESCROW, SEEDS_SHARES};
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

/// Burns a holder's debt shares in a closed loan for their pro-rata slice of
/// whatever the escrow recovered.
pub fn redeem_shares(ctx: Context<RedeemShares>, amount: u64) -> Result<()> {
    let loan = &mut ctx.accounts.loan;
    let share_balance = &mut ctx.accounts.share_balance;

    require!(
        amount > 0 && amount <= share_balance.amount,
        CreditEngineError::InsufficientShares
    );

    let payout = loan.redeem(amount, ctx.accounts.escrow.amount)?;
    share_balance.amount -= amount;

    if payout > 0 {
        let loan_key = loan.key();
        let signer_seeds: &[&[&[u8]]] = &[&[
            SEEDS_LOAN_ESCROW,
            loan_key.as_ref(),
            &[ctx.bumps.escrow],
        ]];
        let transfer_to_holder = TransferChecked {
            from: ctx.accounts.escrow.to_account_info(),
            to: ctx.accounts.holder_token_account.to_account_info(),
            mint: ctx.accounts.mint.to_account_info(),
            authority: ctx.accounts.escrow.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            transfer_to_holder,
            signer_seeds,
        );
        transfer_checked(cpi_ctx, payout, ctx.accounts.mint.decimals)?;
    }

    msg!(
        "Redeemed {} shares of loan {} for {}",
        amount,
        loan.key(),
        payout
    );
    Ok(())
}

#[derive(Accounts)]
pub struct RedeemShares<'info> {
    #[account(mut, has_one = mint)]
    pub loan: Account<'info, Loan>,

    #[account(
        mut,
        seeds = [SEEDS_LOAN_ESCROW, loan.key().as_ref()],
        bump,
        constraint = escrow.key() == loan.escrow
    )]
    pub escrow: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [SEEDS_SHARES, loan.key().as_ref(), holder.key().as_ref()],
        bump = share_balance.bump,
        constraint = share_balance.holder == holder.key()
    )]
    pub share_balance: Account<'info, ShareBalance>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = holder_token_account.owner == holder.key(),
        constraint = holder_token_account.mint == mint.key()
    )]
    pub holder_token_account: InterfaceAccount<'info, TokenAccount>,

    pub holder: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

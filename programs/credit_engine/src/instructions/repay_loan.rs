use crate::constants::SEEDS_LOAN_ESCROW;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

/// Pays currency into the loan escrow ahead of close. Anyone may repay on the
/// borrower's behalf.
pub fn repay_loan(ctx: Context<RepayLoan>, amount: u64) -> Result<()> {
    let loan = &mut ctx.accounts.loan;

    loan.repay(amount)?;

    let transfer_to_escrow = TransferChecked {
        from: ctx.accounts.payer_token_account.to_account_info(),
        to: ctx.accounts.escrow.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: ctx.accounts.payer.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        transfer_to_escrow,
    );
    transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;

    msg!("Repaid {} into loan {}", amount, loan.key());
    Ok(())
}

#[derive(Accounts)]
pub struct RepayLoan<'info> {
    #[account(mut, has_one = mint)]
    pub loan: Account<'info, Loan>,

    #[account(
        mut,
        seeds = [SEEDS_LOAN_ESCROW, loan.key().as_ref()],
        bump,
        constraint = escrow.key() == loan.escrow
    )]
    pub escrow: InterfaceAccount<'info, TokenAccount>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = payer_token_account.owner == payer.key(),
        constraint = payer_token_account.mint == mint.key()
    )]
    pub payer_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

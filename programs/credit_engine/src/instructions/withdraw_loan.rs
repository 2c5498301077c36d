use crate::constants::SEEDS_LOAN_ESCROW;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

pub fn withdraw_loan(ctx: Context<WithdrawLoan>) -> Result<()> {
    let loan = &mut ctx.accounts.loan;

    let principal = loan.withdraw(ctx.accounts.borrower.key())?;

    let loan_key = loan.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        SEEDS_LOAN_ESCROW,
        loan_key.as_ref(),
        &[ctx.bumps.escrow],
    ]];
    let transfer_to_borrower = TransferChecked {
        from: ctx.accounts.escrow.to_account_info(),
        to: ctx.accounts.beneficiary_token_account.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: ctx.accounts.escrow.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        transfer_to_borrower,
        signer_seeds,
    );
    transfer_checked(cpi_ctx, principal, ctx.accounts.mint.decimals)?;

    msg!(
        "Borrower {} withdrew {} from loan {}",
        loan.borrower,
        principal,
        loan.key()
    );
    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawLoan<'info> {
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

    /// The borrower signs; the principal may land on any beneficiary account.
    #[account(
        init_if_needed,
        payer = borrower,
        associated_token::mint = mint,
        associated_token::authority = beneficiary,
        associated_token::token_program = token_program
    )]
    pub beneficiary_token_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: payout destination chosen by the borrower.
    pub beneficiary: AccountInfo<'info>,

    #[account(mut)]
    pub borrower: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

use crate::constants::{SEEDS_LOAN_ESCROW, SEEDS_MUTEX};
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

/// Resolves a matured loan from whatever its escrow actually holds and frees
/// the borrower's debt slot. Permissionless once the term has elapsed.
pub fn close_loan(ctx: Context<CloseLoan>) -> Result<()> {
    let loan = &mut ctx.accounts.loan;
    let mutex = &mut ctx.accounts.mutex;
    let now = Clock::get()?.unix_timestamp;

    Loan::close(&mut **loan, now, ctx.accounts.escrow.amount)?;
    mutex.unlock(loan.key())?;

    msg!(
        "Loan {} closed as {:?} with {} recovered",
        loan.key(),
        loan.status,
        loan.returned
    );
    Ok(())
}

#[derive(Accounts)]
pub struct CloseLoan<'info> {
    #[account(mut)]
    pub loan: Account<'info, Loan>,

    #[account(
        seeds = [SEEDS_LOAN_ESCROW, loan.key().as_ref()],
        bump,
        constraint = escrow.key() == loan.escrow
    )]
    pub escrow: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [SEEDS_MUTEX, loan.borrower.as_ref()],
        bump = mutex.bump
    )]
    pub mutex: Account<'info, BorrowingMutex>,

    pub caller: Signer<'info>,
}

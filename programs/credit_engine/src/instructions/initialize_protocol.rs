use crate::constants::SEEDS_CONFIG;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

pub fn initialize_protocol(
    ctx: Context<InitializeProtocol>,
    oracle_authority: Pubkey,
    params: ProtocolParams,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let clock = Clock::get()?;

    config.authority = ctx.accounts.authority.key();
    config.oracle_authority = oracle_authority;
    config.staked_token_mint = ctx.accounts.staked_token_mint.key();
    config.staked_token_decimals = ctx.accounts.staked_token_mint.decimals;
    config.is_active = true;
    config.apply(&params)?;
    config.loans_created = 0;
    config.total_funded_volume = 0;
    config.total_value_locked = 0;
    config.created_at = clock.unix_timestamp;
    config.bump = ctx.bumps.config;

    msg!(
        "Protocol initialized with authority: {}",
        config.authority
    );
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeProtocol<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + ProtocolConfig::INIT_SPACE,
        seeds = [SEEDS_CONFIG],
        bump
    )]
    pub config: Account<'info, ProtocolConfig>,

    pub staked_token_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

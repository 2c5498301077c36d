use crate::constants::SEEDS_CONFIG;
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn update_protocol_config(
    ctx: Context<UpdateProtocolConfig>,
    params: ProtocolParams,
    is_active: bool,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.apply(&params)?;
    config.is_active = is_active;

    msg!("Protocol configuration updated");
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateProtocolConfig<'info> {
    #[account(
        mut,
        seeds = [SEEDS_CONFIG],
        bump = config.bump,
        has_one = authority @ CreditEngineError::InvalidConfiguration
    )]
    pub config: Account<'info, ProtocolConfig>,

    pub authority: Signer<'info>,
}

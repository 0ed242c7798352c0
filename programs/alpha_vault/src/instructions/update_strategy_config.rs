use anchor_lang::prelude::*;
use crate::error::*;
use crate::state::*;

#[derive(Accounts)]
pub struct UpdateStrategyConfig<'info> {
    pub storage: Account<'info, Storage>,

    #[account(
        mut,
        constraint = strategy.storage == storage.key() @ VaultError::Unauthorized
    )]
    pub strategy: Account<'info, Strategy>,

    pub governance: Signer<'info>,
}

pub fn update_strategy_config(ctx: Context<UpdateStrategyConfig>, params: UpdateStrategyConfigParams) -> Result<()> {
    let access = ctx.accounts.storage.access(ctx.accounts.governance.key());
    let strategy = &mut ctx.accounts.strategy;

    strategy.update_config(&access, params)?;

    msg!("Strategy configuration updated");

    Ok(())
}

use anchor_lang::prelude::*;
use crate::error::*;
use crate::state::*;

#[derive(Accounts)]
pub struct RepointStrategy<'info> {
    pub storage: Account<'info, Storage>,

    #[account(mut, constraint = controller.storage == storage.key() @ VaultError::Unauthorized)]
    pub controller: Account<'info, Controller>,

    pub vault: Account<'info, Vault>,

    #[account(constraint = strategy.vault == vault.key() @ VaultError::StrategyMismatch)]
    pub strategy: Account<'info, Strategy>,

    pub governance: Signer<'info>,
}

pub fn repoint_strategy(ctx: Context<RepointStrategy>) -> Result<()> {
    let access = ctx.accounts.storage.access(ctx.accounts.governance.key());

    ctx.accounts
        .controller
        .repoint_strategy(&access, ctx.accounts.vault.key(), ctx.accounts.strategy.key())?;

    msg!(
        "Vault {} re-pointed to strategy {}",
        ctx.accounts.vault.key(),
        ctx.accounts.strategy.key()
    );

    Ok(())
}

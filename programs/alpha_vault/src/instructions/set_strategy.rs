use anchor_lang::prelude::*;
use crate::error::*;
use crate::state::*;

#[derive(Accounts)]
pub struct SetStrategy<'info> {
    pub storage: Account<'info, Storage>,

    #[account(
        mut,
        constraint = vault.storage == storage.key() @ VaultError::Unauthorized
    )]
    pub vault: Account<'info, Vault>,

    pub strategy: Account<'info, Strategy>,

    pub governance: Signer<'info>,
}

pub fn set_strategy(ctx: Context<SetStrategy>) -> Result<()> {
    let access = ctx.accounts.storage.access(ctx.accounts.governance.key());
    let vault = &mut ctx.accounts.vault;

    vault.set_strategy(&access, &ctx.accounts.strategy)?;

    msg!("Vault {} strategy set to {}", vault.key(), vault.strategy);

    Ok(())
}

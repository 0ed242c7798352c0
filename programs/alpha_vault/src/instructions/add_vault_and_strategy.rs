use anchor_lang::prelude::*;
use crate::error::*;
use crate::events::VaultRegisteredEvent;
use crate::state::*;

#[derive(Accounts)]
pub struct AddVaultAndStrategy<'info> {
    pub storage: Account<'info, Storage>,

    #[account(mut, constraint = controller.storage == storage.key() @ VaultError::Unauthorized)]
    pub controller: Account<'info, Controller>,

    #[account(constraint = vault.storage == storage.key() @ VaultError::Unauthorized)]
    pub vault: Account<'info, Vault>,

    #[account(constraint = strategy.vault == vault.key() @ VaultError::StrategyMismatch)]
    pub strategy: Account<'info, Strategy>,

    pub governance: Signer<'info>,
}

pub fn add_vault_and_strategy(ctx: Context<AddVaultAndStrategy>) -> Result<()> {
    let access = ctx.accounts.storage.access(ctx.accounts.governance.key());
    let controller = &mut ctx.accounts.controller;

    controller.add_vault_and_strategy(&access, ctx.accounts.vault.key(), ctx.accounts.strategy.key())?;

    emit!(VaultRegisteredEvent {
        controller: controller.key(),
        vault: ctx.accounts.vault.key(),
        strategy: ctx.accounts.strategy.key(),
    });

    msg!(
        "Registered vault {} with strategy {} ({} vaults)",
        ctx.accounts.vault.key(),
        ctx.accounts.strategy.key(),
        controller.entries.len()
    );

    Ok(())
}

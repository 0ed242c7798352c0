use anchor_lang::prelude::*;
use crate::adapter::stage_descriptor;
use crate::error::*;
use crate::events::StageStakeEvent;
use crate::instructions::stage_pools::*;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
pub struct ControllerStake<'info> {
    pub storage: Account<'info, Storage>,

    #[account(constraint = controller.storage == storage.key() @ VaultError::Unauthorized)]
    pub controller: Account<'info, Controller>,

    #[account(mut, constraint = vault.storage == storage.key() @ VaultError::Unauthorized)]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub strategy: Account<'info, Strategy>,

    pub stage_pools: StagePools<'info>,

    pub governance: Signer<'info>,
}

/// Shared body of the four controller stake entry points
pub fn controller_stake(ctx: Context<ControllerStake>, stage: u8) -> Result<()> {
    let descriptor = stage_descriptor(stage)?;
    ctx.accounts.stage_pools.verify(&ctx.accounts.strategy.key())?;
    let slot = get_current_slot()?;
    let access = ctx.accounts.storage.access(ctx.accounts.governance.key());

    let mut cascade = ctx.accounts.stage_pools.cascade()?;
    cascade.sync(slot)?;
    let amount = ctx.accounts.controller.stake(
        &access,
        stage,
        &mut ctx.accounts.vault,
        &mut ctx.accounts.strategy,
        &mut cascade,
    )?;

    emit!(StageStakeEvent {
        vault: ctx.accounts.vault.key(),
        strategy: ctx.accounts.strategy.key(),
        stage,
        amount,
        stage_balances: cascade.stage_balances(),
    });

    msg!("Controller staked {} into stage {} ({})", amount, stage, descriptor.name);

    Ok(())
}

use anchor_lang::prelude::*;
use crate::adapter::stage_descriptor;
use crate::error::*;
use crate::events::StageStakeEvent;
use crate::instructions::stage_pools::*;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
pub struct StakeStage<'info> {
    pub storage: Account<'info, Storage>,

    #[account(mut, constraint = vault.storage == storage.key() @ VaultError::Unauthorized)]
    pub vault: Account<'info, Vault>,

    #[account(mut, constraint = strategy.key() == vault.strategy @ VaultError::StrategyNotSet)]
    pub strategy: Account<'info, Strategy>,

    pub stage_pools: StagePools<'info>,

    pub authority: Signer<'info>,
}

pub fn stake_stage(ctx: Context<StakeStage>, stage: u8) -> Result<()> {
    let descriptor = stage_descriptor(stage)?;
    ctx.accounts.stage_pools.verify(&ctx.accounts.strategy.key())?;
    let slot = get_current_slot()?;
    let access = ctx.accounts.storage.access(ctx.accounts.authority.key());

    let mut cascade = ctx.accounts.stage_pools.cascade()?;
    cascade.sync(slot)?;
    let amount = ctx.accounts.strategy.stake_stage(&access, stage, &mut ctx.accounts.vault, &mut cascade)?;

    emit!(StageStakeEvent {
        vault: ctx.accounts.vault.key(),
        strategy: ctx.accounts.strategy.key(),
        stage,
        amount,
        stage_balances: cascade.stage_balances(),
    });

    msg!("Staked {} into stage {} ({})", amount, stage, descriptor.name);

    Ok(())
}

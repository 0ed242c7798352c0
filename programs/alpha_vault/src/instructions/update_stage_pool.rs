use anchor_lang::prelude::*;
use crate::error::*;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
pub struct UpdateStagePool<'info> {
    pub storage: Account<'info, Storage>,

    #[account(constraint = strategy.storage == storage.key() @ VaultError::Unauthorized)]
    pub strategy: Account<'info, Strategy>,

    #[account(
        mut,
        constraint = stage_pool.strategy == strategy.key() @ VaultError::StrategyMismatch
    )]
    pub stage_pool: Account<'info, StagePool>,

    pub governance: Signer<'info>,
}

pub fn update_stage_pool(ctx: Context<UpdateStagePool>, params: UpdateStagePoolParams) -> Result<()> {
    let slot = get_current_slot()?;
    let access = ctx.accounts.storage.access(ctx.accounts.governance.key());
    let stage_pool = &mut ctx.accounts.stage_pool;

    // Settle accrual at the old rate before it changes
    stage_pool.accrue(slot)?;
    stage_pool.update_config(&access, params)?;

    msg!(
        "Stage {} pool updated: paused={}, reward rate {} ppb/slot",
        stage_pool.stage,
        stage_pool.paused,
        stage_pool.reward_rate_ppb
    );

    Ok(())
}

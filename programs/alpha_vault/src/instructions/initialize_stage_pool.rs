use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
#[instruction(stage: u8)]
pub struct InitializeStagePool<'info> {
    #[account(
        init_if_needed,
        payer = governance,
        space = StagePool::LEN,
        seeds = [STAGE_POOL_SEED, strategy.key().as_ref(), &[stage]],
        bump
    )]
    pub stage_pool: Account<'info, StagePool>,

    #[account(constraint = storage.governance == governance.key() @ VaultError::Unauthorized)]
    pub storage: Account<'info, Storage>,

    #[account(constraint = strategy.storage == storage.key() @ VaultError::Unauthorized)]
    pub strategy: Account<'info, Strategy>,

    #[account(mut)]
    pub governance: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_stage_pool(
    ctx: Context<InitializeStagePool>,
    stage: u8,
    params: InitializeStagePoolParams,
) -> Result<()> {
    let slot = get_current_slot()?;
    let stage_pool = &mut ctx.accounts.stage_pool;

    stage_pool.initialize(
        ctx.accounts.strategy.key(),
        stage,
        params,
        slot,
        ctx.bumps.stage_pool,
    )?;

    msg!(
        "Stage {} pool initialized: {} ({:?}), reward rate {} ppb/slot",
        stage,
        stage_pool.key(),
        stage_pool.kind,
        stage_pool.reward_rate_ppb
    );

    Ok(())
}

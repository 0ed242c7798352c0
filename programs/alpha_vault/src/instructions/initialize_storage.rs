use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeStorage<'info> {
    #[account(
        init_if_needed,
        payer = governance,
        space = Storage::LEN,
        seeds = [STORAGE_SEED, governance.key().as_ref()],
        bump
    )]
    pub storage: Account<'info, Storage>,

    #[account(mut)]
    pub governance: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_storage(ctx: Context<InitializeStorage>) -> Result<()> {
    let storage = &mut ctx.accounts.storage;

    storage.initialize(ctx.accounts.governance.key(), ctx.bumps.storage)?;

    msg!("Storage initialized: {}, governance: {}", storage.key(), storage.governance);

    Ok(())
}

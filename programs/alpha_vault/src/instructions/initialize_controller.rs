use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeController<'info> {
    #[account(
        init_if_needed,
        payer = governance,
        space = Controller::LEN,
        seeds = [CONTROLLER_SEED, storage.key().as_ref()],
        bump
    )]
    pub controller: Account<'info, Controller>,

    #[account(constraint = storage.governance == governance.key() @ VaultError::Unauthorized)]
    pub storage: Account<'info, Storage>,

    #[account(mut)]
    pub governance: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_controller(ctx: Context<InitializeController>) -> Result<()> {
    let controller = &mut ctx.accounts.controller;
    let controller_key = controller.key();

    controller.initialize(controller_key, ctx.accounts.storage.key(), ctx.bumps.controller)?;

    msg!("Controller initialized: {}", controller_key);

    Ok(())
}

use anchor_lang::prelude::*;
use crate::error::*;
use crate::state::*;

#[derive(Accounts)]
pub struct SetController<'info> {
    #[account(mut)]
    pub storage: Account<'info, Storage>,

    #[account(constraint = controller.storage == storage.key() @ VaultError::Unauthorized)]
    pub controller: Account<'info, Controller>,

    pub governance: Signer<'info>,
}

pub fn set_controller(ctx: Context<SetController>) -> Result<()> {
    let storage = &mut ctx.accounts.storage;
    let access = storage.access(ctx.accounts.governance.key());

    storage.set_controller(&access, ctx.accounts.controller.key())?;

    msg!("Controller set: {}", storage.controller);

    Ok(())
}

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::error::*;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeVault<'info> {
    #[account(
        init_if_needed,
        payer = governance,
        space = Vault::LEN,
        seeds = [VAULT_SEED, storage.key().as_ref(), underlying_mint.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(constraint = storage.governance == governance.key() @ VaultError::Unauthorized)]
    pub storage: Account<'info, Storage>,

    pub underlying_mint: Account<'info, Mint>,

    #[account(
        init_if_needed,
        payer = governance,
        token::mint = underlying_mint,
        token::authority = vault,
        seeds = [VAULT_TOKEN_ACCOUNT_SEED, vault.key().as_ref()],
        bump
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub governance: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn initialize_vault(ctx: Context<InitializeVault>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    let vault_key = vault.key();

    vault.initialize(
        vault_key,
        ctx.accounts.storage.key(),
        ctx.accounts.underlying_mint.key(),
        ctx.accounts.vault_token_account.key(),
        ctx.bumps.vault,
    )?;

    msg!("Vault initialized: {}, underlying: {}", vault_key, vault.underlying_mint);

    Ok(())
}

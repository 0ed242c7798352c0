use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

pub fn get_current_slot() -> Result<u64> {
    Ok(Clock::get()?.slot)
}

/// Vault signer seeds - returns seeds that can be used with CpiContext
pub fn get_vault_signer_seeds<'a>(
    storage: &'a Pubkey,
    underlying_mint: &'a Pubkey,
    bump: &'a [u8],
) -> [&'a [u8]; 4] {
    [crate::constants::VAULT_SEED, storage.as_ref(), underlying_mint.as_ref(), bump]
}

/// Move tokens out of the vault's custody account, signed by the vault PDA
pub fn transfer_from_custody<'info>(
    token_program: AccountInfo<'info>,
    custody: AccountInfo<'info>,
    destination: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    signer_seeds: &[&[u8]],
    amount: u64,
) -> Result<()> {
    let cpi_accounts = Transfer {
        from: custody,
        to: destination,
        authority: vault,
    };
    let signer = &[signer_seeds];
    let cpi_ctx = CpiContext::new_with_signer(token_program, cpi_accounts, signer);

    token::transfer(cpi_ctx, amount)
}

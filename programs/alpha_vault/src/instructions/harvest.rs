use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::error::*;
use crate::events::HarvestEvent;
use crate::instructions::stage_pools::*;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
pub struct Harvest<'info> {
    #[account(mut, has_one = vault_token_account @ VaultError::InvalidTokenAccount)]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        constraint = strategy.key() == vault.strategy @ VaultError::StrategyNotSet,
        has_one = reward_token_account @ VaultError::InvalidTokenAccount,
    )]
    pub strategy: Account<'info, Strategy>,

    pub stage_pools: StagePools<'info>,

    #[account(mut)]
    pub vault_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub reward_token_account: Account<'info, TokenAccount>,

    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn harvest(ctx: Context<Harvest>) -> Result<()> {
    ctx.accounts.stage_pools.verify(&ctx.accounts.strategy.key())?;
    let slot = get_current_slot()?;

    let mut cascade = ctx.accounts.stage_pools.cascade()?;
    cascade.sync(slot)?;
    let split = ctx.accounts.vault.harvest(&mut ctx.accounts.strategy, &mut cascade, slot)?;

    if split.reward == 0 {
        msg!("Nothing to harvest");
        return Ok(());
    }

    let compound_rewards = ctx.accounts.strategy.compound_rewards;
    // Compounded reward joins the principal in custody
    if compound_rewards && split.compounded > 0 {
        let vault = &ctx.accounts.vault;
        let bump = [vault.bump];
        let signer_seeds = get_vault_signer_seeds(&vault.storage, &vault.underlying_mint, &bump);
        transfer_from_custody(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.reward_token_account.to_account_info(),
            ctx.accounts.vault_token_account.to_account_info(),
            vault.to_account_info(),
            &signer_seeds,
            split.compounded,
        )?;
    }

    emit!(HarvestEvent {
        vault: ctx.accounts.vault.key(),
        strategy: ctx.accounts.strategy.key(),
        reward: split.reward,
        team_fund: split.team_fund,
        treasury_fund: split.treasury_fund,
        strategic_wallet: split.strategic_wallet,
        compounded: split.compounded,
        compound_rewards,
        reward_per_share: ctx.accounts.vault.reward_per_share,
    });

    msg!(
        "Harvested {}: team {}, treasury {}, strategic {}, depositors {} ({})",
        split.reward,
        split.team_fund,
        split.treasury_fund,
        split.strategic_wallet,
        split.compounded,
        if compound_rewards { "compounded" } else { "distributed" }
    );

    Ok(())
}

use anchor_lang::prelude::*;
use crate::adapter::{Cascade, StakingAdapter};
use crate::error::*;
use crate::state::*;

/// The four cascade adapters of one strategy, in stake order
#[derive(Accounts)]
pub struct StagePools<'info> {
    #[account(mut, constraint = onsen_farm.stage == 1 @ VaultError::InvalidStage)]
    pub onsen_farm: Account<'info, StagePool>,

    #[account(mut, constraint = sushi_bar.stage == 2 @ VaultError::InvalidStage)]
    pub sushi_bar: Account<'info, StagePool>,

    #[account(mut, constraint = onx_farm.stage == 3 @ VaultError::InvalidStage)]
    pub onx_farm: Account<'info, StagePool>,

    #[account(mut, constraint = onx_staking_pool.stage == 4 @ VaultError::InvalidStage)]
    pub onx_staking_pool: Account<'info, StagePool>,
}

impl<'info> StagePools<'info> {
    pub fn verify(&self, strategy: &Pubkey) -> Result<()> {
        let pools = [&self.onsen_farm, &self.sushi_bar, &self.onx_farm, &self.onx_staking_pool];
        if pools.iter().any(|pool| pool.strategy != *strategy) {
            return Err(VaultError::StrategyMismatch.into());
        }
        Ok(())
    }

    /// Cascade view over the pools, refusing a pool wired at the wrong stage
    pub fn cascade(&mut self) -> Result<Cascade<'_>> {
        let cascade = Cascade::new([
            &mut *self.onsen_farm as &mut dyn StakingAdapter,
            &mut *self.sushi_bar,
            &mut *self.onx_farm,
            &mut *self.onx_staking_pool,
        ]);
        cascade.verify_layout()?;
        Ok(cascade)
    }
}

// Shared fixtures: an in-memory staking adapter and a fully wired
// storage/controller/vault/strategy set that drives the state layer
// without a validator.
#![allow(dead_code)]

use alpha_vault::adapter::{Cascade, StageKind, StakingAdapter, STAGES};
use alpha_vault::constants::*;
use alpha_vault::error::*;
use alpha_vault::math::{RewardSplit, SafeMath};
use alpha_vault::state::*;
use anchor_lang::prelude::Pubkey;

/// Scriptable stand-in for an external staking destination
#[derive(Clone, Debug, Default)]
pub struct MockAdapter {
    pub kind: StageKind,
    pub staked: u64,
    pub earned: u64,
    pub paused: bool,
    /// Units withheld from every withdrawal
    pub withdraw_shortfall: u64,
}

impl MockAdapter {
    pub fn new(kind: StageKind) -> Self {
        Self { kind, ..Self::default() }
    }
}

impl StakingAdapter for MockAdapter {
    fn kind(&self) -> StageKind {
        self.kind
    }

    fn balance_of(&self) -> u64 {
        self.staked
    }

    fn earned(&self) -> u64 {
        self.earned
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn stake(&mut self, amount: u64) -> VaultResult<()> {
        if self.paused {
            return Err(VaultError::AdapterFailure);
        }
        self.staked = self.staked.safe_add(amount)?;
        Ok(())
    }

    fn releasable(&self, amount: u64) -> u64 {
        if self.paused || amount > self.staked {
            return 0;
        }
        amount.saturating_sub(self.withdraw_shortfall)
    }

    fn withdraw(&mut self, amount: u64) -> VaultResult<u64> {
        if self.paused || amount > self.staked {
            return Err(VaultError::AdapterFailure);
        }
        self.staked -= amount;
        Ok(amount.saturating_sub(self.withdraw_shortfall))
    }

    fn claim_rewards(&mut self, amount: u64) -> VaultResult<()> {
        if self.paused || amount > self.earned {
            return Err(VaultError::AdapterFailure);
        }
        self.earned -= amount;
        Ok(())
    }
}

pub fn cascade_of<A: StakingAdapter>(adapters: &mut [A; STAGE_COUNT]) -> Cascade<'_> {
    let [onsen_farm, sushi_bar, onx_farm, onx_staking_pool] = adapters;
    Cascade::new([
        onsen_farm as &mut dyn StakingAdapter,
        sushi_bar,
        onx_farm,
        onx_staking_pool,
    ])
}

pub struct Harness<A: StakingAdapter = MockAdapter> {
    pub governance: Pubkey,
    pub controller_key: Pubkey,
    pub storage: Storage,
    pub controller: Controller,
    pub vault: Vault,
    pub strategy: Strategy,
    pub adapters: [A; STAGE_COUNT],
}

impl Harness<MockAdapter> {
    /// Default 10% / 10% / 5% split
    pub fn new() -> Self {
        Self::build(STAGES.map(|stage| MockAdapter::new(stage.kind)), None, None)
    }

    pub fn with_split(team_fund_bps: u64, treasury_fund_bps: u64, strategic_wallet_bps: u64) -> Self {
        Self::build(
            STAGES.map(|stage| MockAdapter::new(stage.kind)),
            Some((team_fund_bps, treasury_fund_bps, strategic_wallet_bps)),
            None,
        )
    }

    /// Rewards realized in a mint other than the underlying, so they are
    /// distributed per share instead of compounded
    pub fn with_distinct_reward_mint() -> Self {
        Self::build(
            STAGES.map(|stage| MockAdapter::new(stage.kind)),
            None,
            Some(Pubkey::new_unique()),
        )
    }

    /// Give the final stage a claimable reward
    pub fn accrue_final_stage_reward(&mut self, amount: u64) {
        self.adapters[STAGE_COUNT - 1].earned += amount;
    }

    pub fn pause_stage(&mut self, stage: u8) {
        self.adapters[(stage - 1) as usize].paused = true;
    }
}

impl Harness<StagePool> {
    /// Cascade of on-chain stage pools; only the final stage pays reward
    pub fn with_stage_pools(final_reward_rate_ppb: u64) -> Self {
        let strategy_key = Pubkey::new_unique();
        let pools = STAGES.map(|descriptor| {
            let mut pool = StagePool::default();
            let reward_rate_ppb = if descriptor.stage == FINAL_STAGE { final_reward_rate_ppb } else { 0 };
            pool.initialize(
                strategy_key,
                descriptor.stage,
                InitializeStagePoolParams { reward_rate_ppb: Some(reward_rate_ppb) },
                0,
                255,
            )
            .unwrap();
            pool
        });
        let mut harness = Self::build_with_strategy_key(pools, None, None, strategy_key);
        let access = harness.governance();
        harness.vault.set_strategy(&access, &harness.strategy).unwrap();
        harness
    }

    pub fn final_pool(&mut self) -> &mut StagePool {
        &mut self.adapters[STAGE_COUNT - 1]
    }
}

impl<A: StakingAdapter> Harness<A> {
    fn build(adapters: [A; STAGE_COUNT], split: Option<(u64, u64, u64)>, reward_mint: Option<Pubkey>) -> Self {
        let mut harness = Self::build_with_strategy_key(adapters, split, reward_mint, Pubkey::new_unique());
        let access = harness.governance();
        harness.vault.set_strategy(&access, &harness.strategy).unwrap();
        harness
    }

    fn build_with_strategy_key(
        adapters: [A; STAGE_COUNT],
        split: Option<(u64, u64, u64)>,
        reward_mint: Option<Pubkey>,
        strategy_key: Pubkey,
    ) -> Self {
        let governance = Pubkey::new_unique();
        let controller_key = Pubkey::new_unique();
        let storage_key = Pubkey::new_unique();
        let underlying_mint = Pubkey::new_unique();

        let mut storage = Storage::default();
        storage.initialize(governance, 255).unwrap();
        let access = storage.access(governance);
        storage.set_controller(&access, controller_key).unwrap();
        let access = storage.access(governance);

        let mut controller = Controller::default();
        controller.initialize(controller_key, storage_key, 255).unwrap();

        let mut vault = Vault::default();
        vault
            .initialize(Pubkey::new_unique(), storage_key, underlying_mint, Pubkey::new_unique(), 255)
            .unwrap();

        let mut strategy = Strategy::default();
        strategy
            .initialize(
                strategy_key,
                &vault,
                reward_mint.unwrap_or(underlying_mint),
                Pubkey::new_unique(),
                InitializeStrategyParams {
                    team_fund_wallet: Pubkey::new_unique(),
                    treasury_wallet: Pubkey::new_unique(),
                    strategic_wallet: Pubkey::new_unique(),
                    team_fund_bps: split.map(|s| s.0),
                    treasury_fund_bps: split.map(|s| s.1),
                    strategic_wallet_bps: split.map(|s| s.2),
                },
                255,
            )
            .unwrap();

        controller
            .add_vault_and_strategy(&access, vault.pubkey, strategy.pubkey)
            .unwrap();

        Self {
            governance,
            controller_key,
            storage,
            controller,
            vault,
            strategy,
            adapters,
        }
    }

    pub fn governance(&self) -> AccessContext {
        self.storage.access(self.governance)
    }

    pub fn controller_access(&self) -> AccessContext {
        self.storage.access(self.controller_key)
    }

    pub fn stranger(&self) -> AccessContext {
        self.storage.access(Pubkey::new_unique())
    }

    pub fn new_depositor(&self) -> VaultDepositor {
        let mut depositor = VaultDepositor::default();
        depositor
            .initialize(self.vault.pubkey, Pubkey::new_unique(), 0, 255)
            .unwrap();
        depositor
    }

    pub fn sync(&mut self, slot: u64) -> VaultResult<()> {
        cascade_of(&mut self.adapters).sync(slot)
    }

    pub fn deposit(&mut self, depositor: &mut VaultDepositor, amount: u64) -> VaultResult<u64> {
        let cascade = cascade_of(&mut self.adapters);
        self.vault.deposit(depositor, amount, &self.strategy, &cascade)
    }

    /// Underlying paid out
    pub fn withdraw(&mut self, depositor: &mut VaultDepositor, shares: u64) -> VaultResult<u64> {
        self.withdraw_all(depositor, shares).map(|withdrawal| withdrawal.amount)
    }

    /// Underlying and distributed reward paid out
    pub fn withdraw_all(&mut self, depositor: &mut VaultDepositor, shares: u64) -> VaultResult<Withdrawal> {
        let mut cascade = cascade_of(&mut self.adapters);
        self.vault.withdraw(depositor, shares, &mut self.strategy, &mut cascade)
    }

    pub fn stake_stage(&mut self, access: &AccessContext, stage: u8) -> VaultResult<u64> {
        let mut cascade = cascade_of(&mut self.adapters);
        self.strategy.stake_stage(access, stage, &mut self.vault, &mut cascade)
    }

    pub fn controller_stake(&mut self, access: &AccessContext, stage: u8) -> VaultResult<u64> {
        let mut cascade = cascade_of(&mut self.adapters);
        self.controller
            .stake(access, stage, &mut self.vault, &mut self.strategy, &mut cascade)
    }

    /// Push everything through the whole waterfall as governance
    pub fn stake_all(&mut self) {
        let access = self.governance();
        for stage in FIRST_STAGE..=FINAL_STAGE {
            self.stake_stage(&access, stage).unwrap();
        }
    }

    pub fn harvest(&mut self, slot: u64) -> VaultResult<RewardSplit> {
        let mut cascade = cascade_of(&mut self.adapters);
        self.vault.harvest(&mut self.strategy, &mut cascade, slot)
    }

    pub fn total_managed(&mut self) -> u64 {
        let cascade = cascade_of(&mut self.adapters);
        self.vault.total_underlying_managed(&self.strategy, &cascade).unwrap()
    }

    pub fn share_price(&mut self) -> u128 {
        let cascade = cascade_of(&mut self.adapters);
        self.vault.share_price(&self.strategy, &cascade).unwrap()
    }

    pub fn stage_balances(&mut self) -> [u64; STAGE_COUNT] {
        cascade_of(&mut self.adapters).stage_balances()
    }

    pub fn verify_invariants(&mut self) -> VaultResult<()> {
        let cascade = cascade_of(&mut self.adapters);
        self.vault.verify_invariants(&self.strategy, &cascade)
    }
}

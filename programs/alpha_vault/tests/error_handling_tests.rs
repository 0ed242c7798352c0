// Failure paths: every rejected call must leave accounting untouched.

mod common;

#[cfg(test)]
mod error_handling_tests {
    use super::common::*;
    use alpha_vault::adapter::{stage_descriptor, stage_index, StakingAdapter};
    use alpha_vault::constants::*;
    use alpha_vault::error::*;
    use alpha_vault::state::*;
    use anchor_lang::prelude::Pubkey;

    #[test]
    fn test_zero_amounts_rejected() {
        let mut h = Harness::new();
        let mut alice = h.new_depositor();

        assert_eq!(h.deposit(&mut alice, 0), Err(VaultError::InvalidAmount));
        h.deposit(&mut alice, 100).unwrap();
        assert_eq!(h.withdraw(&mut alice, 0), Err(VaultError::InvalidAmount));

        assert_eq!(h.vault.total_shares, 100);
        assert_eq!(alice.shares, 100);
    }

    #[test]
    fn test_withdraw_more_than_held() {
        let mut h = Harness::new();
        let mut alice = h.new_depositor();
        let mut bob = h.new_depositor();
        h.deposit(&mut alice, 1000).unwrap();
        h.deposit(&mut bob, 1000).unwrap();
        h.stake_all();

        assert_eq!(h.withdraw(&mut alice, 1001), Err(VaultError::InsufficientBalance));
        assert_eq!(alice.shares, 1000);
        assert_eq!(h.vault.total_shares, 2000);
        assert_eq!(h.stage_balances(), [0, 0, 0, 2000]);
    }

    #[test]
    fn test_paused_stage_blocks_withdrawal_without_side_effects() {
        let mut h = Harness::new();
        let mut alice = h.new_depositor();
        h.deposit(&mut alice, 1000).unwrap();
        h.stake_all();
        h.pause_stage(4);

        assert_eq!(h.withdraw(&mut alice, 500), Err(VaultError::InsufficientLiquidity));
        assert_eq!(alice.shares, 1000);
        assert_eq!(alice.total_withdrawn, 0);
        assert_eq!(h.vault.total_shares, 1000);
        assert_eq!(h.vault.total_withdrawn, 0);
        assert_eq!(h.stage_balances(), [0, 0, 0, 1000]);
    }

    #[test]
    fn test_idle_covers_withdrawal_while_stage_paused() {
        let mut h = Harness::new();
        let mut alice = h.new_depositor();
        let mut bob = h.new_depositor();
        h.deposit(&mut alice, 1000).unwrap();
        h.stake_all();
        h.deposit(&mut bob, 500).unwrap();
        h.pause_stage(4);

        assert_eq!(h.withdraw(&mut alice, 400).unwrap(), 400);
        assert_eq!(h.vault.idle_balance, 100);
        assert_eq!(h.stage_balances(), [0, 0, 0, 1000]);

        // The rest is locked behind the paused stage
        assert_eq!(h.withdraw(&mut alice, 600), Err(VaultError::InsufficientLiquidity));
    }

    #[test]
    fn test_unwind_skips_paused_stage() {
        let mut h = Harness::new();
        let access = h.governance();
        let mut alice = h.new_depositor();
        let mut bob = h.new_depositor();
        h.deposit(&mut alice, 1000).unwrap();
        h.stake_all();
        h.deposit(&mut bob, 1000).unwrap();
        h.stake_stage(&access, 1).unwrap();
        h.pause_stage(4);

        // Stage 1 still holds enough for Bob
        assert_eq!(h.withdraw(&mut bob, 1000).unwrap(), 1000);
        assert_eq!(h.stage_balances(), [0, 0, 0, 1000]);
    }

    #[test]
    fn test_short_release_reverts_withdrawal() {
        let mut h = Harness::new();
        let mut alice = h.new_depositor();
        h.deposit(&mut alice, 1000).unwrap();
        h.stake_all();
        h.adapters[3].withdraw_shortfall = 1;

        assert_eq!(h.withdraw(&mut alice, 1000), Err(VaultError::InsufficientLiquidity));
        assert_eq!(alice.shares, 1000);
        assert_eq!(alice.total_withdrawn, 0);
        assert_eq!(h.vault.total_shares, 1000);
        assert_eq!(h.stage_balances(), [0, 0, 0, 1000]);
        assert_eq!(h.total_managed(), 1000);
        assert!(h.verify_invariants().is_ok());

        // Once the stage releases in full the same withdrawal goes through
        h.adapters[3].withdraw_shortfall = 0;
        assert_eq!(h.withdraw(&mut alice, 1000).unwrap(), 1000);
    }

    #[test]
    fn test_short_release_leaves_idle_buffer_and_stages() {
        let mut h = Harness::new();
        let mut alice = h.new_depositor();
        h.deposit(&mut alice, 1000).unwrap();
        h.stake_all();
        h.strategy.idle_balance = 100;
        h.adapters[3].withdraw_shortfall = 5;

        let mut cascade = cascade_of(&mut h.adapters);
        assert_eq!(h.strategy.unwind(600, &mut cascade), Err(VaultError::InsufficientLiquidity));
        assert_eq!(h.strategy.idle_balance, 100);
        assert_eq!(h.stage_balances(), [0, 0, 0, 1000]);
    }

    #[test]
    fn test_harvest_overflowing_first_stage_claims_nothing() {
        let mut h = Harness::new();
        let mut alice = h.new_depositor();
        h.deposit(&mut alice, 1000).unwrap();
        h.stake_all();
        h.adapters[0].staked = u64::MAX;
        h.accrue_final_stage_reward(500);

        let mut cascade = cascade_of(&mut h.adapters);
        assert_eq!(h.strategy.harvest(&mut cascade, 1), Err(VaultError::MathOverflow));
        assert_eq!(h.adapters[3].earned, 500);
        assert_eq!(h.strategy.total_pending().unwrap(), 0);
        assert_eq!(h.strategy.total_rewards_realized, 0);
        assert_eq!(h.strategy.last_harvest_slot, 0);
    }

    #[test]
    fn test_stake_into_paused_stage_fails() {
        let mut h = Harness::new();
        let access = h.governance();
        let mut alice = h.new_depositor();
        h.deposit(&mut alice, 1000).unwrap();
        h.stake_stage(&access, 1).unwrap();
        h.pause_stage(2);

        assert_eq!(h.stake_stage(&access, 2), Err(VaultError::AdapterFailure));
        assert_eq!(h.stage_balances(), [1000, 0, 0, 0]);
    }

    #[test]
    fn test_stake_from_paused_source_fails() {
        let mut h = Harness::new();
        let access = h.governance();
        let mut alice = h.new_depositor();
        h.deposit(&mut alice, 1000).unwrap();
        h.stake_stage(&access, 1).unwrap();
        h.pause_stage(1);

        assert_eq!(h.stake_stage(&access, 2), Err(VaultError::AdapterFailure));
        assert_eq!(h.stage_balances(), [1000, 0, 0, 0]);
    }

    #[test]
    fn test_harvest_with_paused_final_stage_fails() {
        let mut h = Harness::new();
        let mut alice = h.new_depositor();
        h.deposit(&mut alice, 1000).unwrap();
        h.stake_all();
        h.accrue_final_stage_reward(500);
        h.pause_stage(4);

        assert_eq!(h.harvest(1), Err(VaultError::AdapterFailure));
        assert_eq!(h.strategy.total_pending().unwrap(), 0);
        assert_eq!(h.strategy.total_rewards_realized, 0);
        assert_eq!(h.strategy.last_harvest_slot, 0);
        assert_eq!(h.adapters[3].earned, 500);
    }

    #[test]
    fn test_invalid_stage_numbers() {
        let mut h = Harness::new();
        let access = h.governance();

        assert_eq!(stage_index(0), Err(VaultError::InvalidStage));
        assert_eq!(stage_index(5), Err(VaultError::InvalidStage));
        assert_eq!(stage_descriptor(4).unwrap().name, "onx_staking_pool");
        assert_eq!(h.stake_stage(&access, 0), Err(VaultError::InvalidStage));
        assert_eq!(h.stake_stage(&access, 5), Err(VaultError::InvalidStage));
        assert_eq!(h.controller_stake(&access, 9), Err(VaultError::InvalidStage));
    }

    #[test]
    fn test_strategy_rejects_foreign_vault() {
        let mut h = Harness::new();
        let access = h.governance();
        let mut other = Vault::default();
        other
            .initialize(
                Pubkey::new_unique(),
                h.vault.storage,
                h.vault.underlying_mint,
                Pubkey::new_unique(),
                255,
            )
            .unwrap();
        other.idle_balance = 10;

        let mut cascade = cascade_of(&mut h.adapters);
        assert_eq!(
            h.strategy.stake_stage(&access, 1, &mut other, &mut cascade),
            Err(VaultError::StrategyMismatch)
        );
        assert_eq!(other.idle_balance, 10);
    }

    #[test]
    fn test_depositor_of_other_vault_rejected() {
        let mut h = Harness::new();
        let mut stranger = VaultDepositor::default();
        stranger
            .initialize(Pubkey::new_unique(), Pubkey::new_unique(), 0, 255)
            .unwrap();

        assert_eq!(h.deposit(&mut stranger, 100), Err(VaultError::Unauthorized));
        assert_eq!(h.vault.total_shares, 0);
    }

    #[test]
    fn test_vault_without_strategy() {
        let mut h = Harness::new();
        let mut bare = Vault::default();
        bare.initialize(Pubkey::new_unique(), h.vault.storage, h.vault.underlying_mint, Pubkey::new_unique(), 255)
            .unwrap();
        let mut depositor = VaultDepositor::default();
        depositor.initialize(bare.pubkey, Pubkey::new_unique(), 0, 255).unwrap();

        let cascade = cascade_of(&mut h.adapters);
        assert_eq!(
            bare.deposit(&mut depositor, 100, &h.strategy, &cascade),
            Err(VaultError::StrategyNotSet)
        );
    }

    #[test]
    fn test_uninitialized_accounts_rejected() {
        let mut h = Harness::new();
        let mut vault = Vault::default();
        let mut depositor = h.new_depositor();
        let cascade = cascade_of(&mut h.adapters);

        assert_eq!(
            vault.deposit(&mut depositor, 100, &h.strategy, &cascade),
            Err(VaultError::NotInitialized)
        );

        let mut strategy = Strategy::default();
        let mut cascade = cascade_of(&mut h.adapters);
        assert_eq!(strategy.harvest(&mut cascade, 1), Err(VaultError::NotInitialized));
        assert_eq!(strategy.unwind(1, &mut cascade), Err(VaultError::NotInitialized));
    }

    #[test]
    fn test_invalid_reward_split_update_rejected() {
        let mut h = Harness::new();
        let access = h.governance();

        let result = h.strategy.update_config(
            &access,
            UpdateStrategyConfigParams {
                team_fund_bps: Some(9000),
                treasury_fund_bps: Some(1001),
                ..Default::default()
            },
        );
        assert_eq!(result, Err(VaultError::InvalidRewardSplit));
        assert_eq!(h.strategy.team_fund_bps, DEFAULT_TEAM_FUND_BPS);
        assert_eq!(h.strategy.treasury_fund_bps, DEFAULT_TREASURY_FUND_BPS);
        assert!(h.strategy.verify_invariants().is_ok());
    }

    #[test]
    fn test_stage_pool_configuration_errors() {
        let mut pool = StagePool::default();
        assert_eq!(
            pool.initialize(
                Pubkey::new_unique(),
                5,
                InitializeStagePoolParams::default(),
                0,
                255
            ),
            Err(VaultError::InvalidStage)
        );
        assert_eq!(
            pool.initialize(
                Pubkey::new_unique(),
                4,
                InitializeStagePoolParams { reward_rate_ppb: Some(MAX_REWARD_RATE_PPB + 1) },
                0,
                255
            ),
            Err(VaultError::InvalidStagePoolConfig)
        );

        pool.initialize(Pubkey::new_unique(), 4, InitializeStagePoolParams::default(), 0, 255)
            .unwrap();
        assert_eq!(
            pool.initialize(Pubkey::new_unique(), 4, InitializeStagePoolParams::default(), 0, 255),
            Err(VaultError::AlreadyInitialized)
        );
        assert_eq!(pool.fund_rewards(0), Err(VaultError::InvalidAmount));
    }

    #[test]
    fn test_only_final_stage_pays_reward() {
        let h = Harness::new();
        let access = h.governance();

        for stage in FIRST_STAGE..FINAL_STAGE {
            let mut pool = StagePool::default();
            assert_eq!(
                pool.initialize(
                    h.strategy.pubkey,
                    stage,
                    InitializeStagePoolParams { reward_rate_ppb: Some(1) },
                    0,
                    255
                ),
                Err(VaultError::InvalidStagePoolConfig)
            );

            pool.initialize(h.strategy.pubkey, stage, InitializeStagePoolParams::default(), 0, 255)
                .unwrap();
            assert_eq!(
                pool.update_config(
                    &access,
                    UpdateStagePoolParams { reward_rate_ppb: Some(1), ..Default::default() }
                ),
                Err(VaultError::InvalidStagePoolConfig)
            );
            assert_eq!(pool.fund_rewards(100), Err(VaultError::InvalidStagePoolConfig));
            assert_eq!(pool.reward_rate_ppb, 0);
            assert_eq!(pool.reward_reserve, 0);

            // Staked principal earns nothing on an intermediate stage
            pool.stake(1_000_000).unwrap();
            pool.accrue(1_000).unwrap();
            assert_eq!(pool.earned(), 0);
        }

        let mut pool = StagePool::default();
        pool.initialize(
            h.strategy.pubkey,
            FINAL_STAGE,
            InitializeStagePoolParams { reward_rate_ppb: Some(1) },
            0,
            255,
        )
        .unwrap();
        pool.fund_rewards(100).unwrap();
        assert_eq!(pool.reward_reserve, 100);
    }

    #[test]
    fn test_stage_pool_claim_is_bounded_by_accrual() {
        let mut pool = StagePool::default();
        pool.initialize(
            Pubkey::new_unique(),
            FINAL_STAGE,
            InitializeStagePoolParams { reward_rate_ppb: Some(1_000_000) },
            0,
            255,
        )
        .unwrap();
        pool.fund_rewards(1_000).unwrap();
        pool.stake(100_000).unwrap();
        pool.accrue(5).unwrap();
        assert_eq!(pool.earned(), 500);

        assert_eq!(pool.claim_rewards(501), Err(VaultError::AdapterFailure));
        assert_eq!(pool.earned(), 500);
        assert_eq!(pool.total_rewards_paid, 0);

        pool.claim_rewards(200).unwrap();
        assert_eq!(pool.earned(), 300);
        assert_eq!(pool.total_rewards_paid, 200);
    }

    #[test]
    fn test_stage_pool_refuses_overdraw_and_pause() {
        let h = Harness::new();
        let access = h.governance();
        let mut pool = StagePool::default();
        pool.initialize(h.strategy.pubkey, 2, InitializeStagePoolParams::default(), 0, 255)
            .unwrap();

        pool.stake(100).unwrap();
        assert_eq!(pool.withdraw(101), Err(VaultError::AdapterFailure));
        assert_eq!(pool.balance_of(), 100);

        pool.update_config(&access, UpdateStagePoolParams { paused: Some(true), ..Default::default() })
            .unwrap();
        assert_eq!(pool.stake(1), Err(VaultError::AdapterFailure));
        assert_eq!(pool.withdraw(1), Err(VaultError::AdapterFailure));
        assert_eq!(pool.claim_rewards(1), Err(VaultError::AdapterFailure));
        assert_eq!(pool.releasable(1), 0);
        assert_eq!(pool.balance_of(), 100);

        assert_eq!(
            pool.update_config(
                &access,
                UpdateStagePoolParams { reward_rate_ppb: Some(MAX_REWARD_RATE_PPB + 1), ..Default::default() }
            ),
            Err(VaultError::InvalidStagePoolConfig)
        );
        assert!(pool.paused);
    }

    #[test]
    fn test_controller_registry_errors() {
        let mut h = Harness::new();
        let access = h.governance();

        assert_eq!(
            h.controller.add_vault_and_strategy(&access, h.vault.pubkey, Pubkey::new_unique()),
            Err(VaultError::DuplicateVault)
        );
        assert_eq!(
            h.controller.repoint_strategy(&access, Pubkey::new_unique(), Pubkey::new_unique()),
            Err(VaultError::UnknownVault)
        );
        assert_eq!(
            h.controller.strategy_of(&Pubkey::new_unique()),
            Err(VaultError::UnknownVault)
        );

        for _ in 1..MAX_REGISTERED_VAULTS {
            h.controller
                .add_vault_and_strategy(&access, Pubkey::new_unique(), Pubkey::new_unique())
                .unwrap();
        }
        assert_eq!(
            h.controller.add_vault_and_strategy(&access, Pubkey::new_unique(), Pubkey::new_unique()),
            Err(VaultError::RegistryFull)
        );
        assert_eq!(h.controller.entries.len(), MAX_REGISTERED_VAULTS);
    }

    #[test]
    fn test_controller_stake_for_unregistered_vault() {
        let mut h = Harness::new();
        let access = h.governance();
        h.controller.entries.clear();

        assert_eq!(h.controller_stake(&access, 1), Err(VaultError::UnknownVault));
        let mut cascade = cascade_of(&mut h.adapters);
        assert_eq!(
            h.controller
                .stake_x_sushi_farm(&access, &mut h.vault, &mut h.strategy, &mut cascade),
            Err(VaultError::UnknownVault)
        );
    }

    #[test]
    fn test_repointed_controller_rejects_stale_strategy() {
        let mut h = Harness::new();
        let access = h.governance();
        let mut alice = h.new_depositor();
        h.deposit(&mut alice, 100).unwrap();

        let vault_key = h.vault.pubkey;
        h.controller
            .repoint_strategy(&access, vault_key, Pubkey::new_unique())
            .unwrap();

        assert_eq!(h.controller_stake(&access, 1), Err(VaultError::StrategyMismatch));
        assert_eq!(h.vault.idle_balance, 100);
    }
}

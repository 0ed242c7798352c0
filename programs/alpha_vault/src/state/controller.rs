use anchor_lang::prelude::*;
use crate::adapter::{stage_descriptor, Cascade};
use crate::constants::*;
use crate::error::*;
use crate::state::{AccessContext, Lifecycle, Strategy, Vault};

/// vault => strategy, unique per vault
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryEntry {
    pub vault: Pubkey,
    pub strategy: Pubkey,
}

impl RegistryEntry {
    pub const LEN: usize = 32 + 32;
}

/// Append-only registry of vault/strategy pairs and the driver of their cascades
#[account]
#[derive(Default)]
pub struct Controller {
    /// The controller's pubkey
    pub pubkey: Pubkey,
    /// Access registry
    pub storage: Pubkey,
    pub entries: Vec<RegistryEntry>,
    pub lifecycle: Lifecycle,
    /// Bump seed for PDA
    pub bump: u8,
}

impl Controller {
    pub const LEN: usize = 8 + // discriminator
        32 + // pubkey
        32 + // storage
        4 + MAX_REGISTERED_VAULTS * RegistryEntry::LEN + // entries
        Lifecycle::LEN + // lifecycle
        1; // bump

    pub fn initialize(&mut self, pubkey: Pubkey, storage: Pubkey, bump: u8) -> VaultResult<()> {
        self.lifecycle.require_uninitialized()?;

        self.pubkey = pubkey;
        self.storage = storage;
        self.entries = Vec::new();
        self.lifecycle = Lifecycle::Initialized;
        self.bump = bump;

        Ok(())
    }

    pub fn add_vault_and_strategy(
        &mut self,
        access: &AccessContext,
        vault: Pubkey,
        strategy: Pubkey,
    ) -> VaultResult<()> {
        self.lifecycle.require_initialized()?;
        access.require_governance()?;

        if self.entry(&vault).is_some() {
            return Err(VaultError::DuplicateVault);
        }
        if self.entries.len() >= MAX_REGISTERED_VAULTS {
            return Err(VaultError::RegistryFull);
        }

        self.entries.push(RegistryEntry { vault, strategy });

        Ok(())
    }

    /// Governance re-pointing of an existing entry
    pub fn repoint_strategy(&mut self, access: &AccessContext, vault: Pubkey, strategy: Pubkey) -> VaultResult<()> {
        self.lifecycle.require_initialized()?;
        access.require_governance()?;

        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.vault == vault)
            .ok_or(VaultError::UnknownVault)?;
        entry.strategy = strategy;

        Ok(())
    }

    pub fn entry(&self, vault: &Pubkey) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| entry.vault == *vault)
    }

    pub fn strategy_of(&self, vault: &Pubkey) -> VaultResult<Pubkey> {
        self.entry(vault)
            .map(|entry| entry.strategy)
            .ok_or(VaultError::UnknownVault)
    }

    /// Governance-only pass-through to the registered strategy's stage call
    pub fn stake(
        &self,
        access: &AccessContext,
        stage: u8,
        vault: &mut Vault,
        strategy: &mut Strategy,
        cascade: &mut Cascade,
    ) -> VaultResult<u64> {
        self.lifecycle.require_initialized()?;
        access.require_governance()?;
        stage_descriptor(stage)?;

        let registered = self.strategy_of(&vault.pubkey)?;
        if registered != strategy.pubkey {
            return Err(VaultError::StrategyMismatch);
        }

        let delegated = access.delegate_to_controller(self.pubkey)?;
        strategy.stake_stage(&delegated, stage, vault, cascade)
    }

    pub fn stake_onsen_farm(
        &self,
        access: &AccessContext,
        vault: &mut Vault,
        strategy: &mut Strategy,
        cascade: &mut Cascade,
    ) -> VaultResult<u64> {
        self.stake(access, 1, vault, strategy, cascade)
    }

    pub fn stake_sushi_bar(
        &self,
        access: &AccessContext,
        vault: &mut Vault,
        strategy: &mut Strategy,
        cascade: &mut Cascade,
    ) -> VaultResult<u64> {
        self.stake(access, 2, vault, strategy, cascade)
    }

    pub fn stake_onx_farm(
        &self,
        access: &AccessContext,
        vault: &mut Vault,
        strategy: &mut Strategy,
        cascade: &mut Cascade,
    ) -> VaultResult<u64> {
        self.stake(access, 3, vault, strategy, cascade)
    }

    pub fn stake_x_sushi_farm(
        &self,
        access: &AccessContext,
        vault: &mut Vault,
        strategy: &mut Strategy,
        cascade: &mut Cascade,
    ) -> VaultResult<u64> {
        self.stake_onx_farm(access, vault, strategy, cascade)
    }

    pub fn stake_onx(
        &self,
        access: &AccessContext,
        vault: &mut Vault,
        strategy: &mut Strategy,
        cascade: &mut Cascade,
    ) -> VaultResult<u64> {
        self.stake(access, 4, vault, strategy, cascade)
    }
}

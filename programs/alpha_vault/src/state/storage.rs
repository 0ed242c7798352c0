use anchor_lang::prelude::*;
use crate::error::*;

/// Two-phase account lifecycle, checked at the top of every mutating entry point
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Initialized,
}

impl Lifecycle {
    pub const LEN: usize = 1;

    pub fn is_initialized(&self) -> bool {
        *self == Lifecycle::Initialized
    }

    pub fn require_initialized(&self) -> VaultResult<()> {
        if !self.is_initialized() {
            return Err(VaultError::NotInitialized);
        }
        Ok(())
    }

    pub fn require_uninitialized(&self) -> VaultResult<()> {
        if self.is_initialized() {
            return Err(VaultError::AlreadyInitialized);
        }
        Ok(())
    }
}

/// Access registry: the governance root authority and the controller slot
#[account]
#[derive(Default)]
pub struct Storage {
    /// Root authority for every privileged call
    pub governance: Pubkey,
    /// Controller allowed to drive strategies; unset until `set_controller`
    pub controller: Pubkey,
    pub lifecycle: Lifecycle,
    /// Bump seed for PDA
    pub bump: u8,
    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl Storage {
    pub const LEN: usize = 8 + // discriminator
        32 + // governance
        32 + // controller
        Lifecycle::LEN + // lifecycle
        1 + // bump
        32; // _reserved

    pub fn initialize(&mut self, governance: Pubkey, bump: u8) -> VaultResult<()> {
        self.lifecycle.require_uninitialized()?;

        self.governance = governance;
        self.controller = Pubkey::default();
        self.bump = bump;
        self.lifecycle = Lifecycle::Initialized;

        Ok(())
    }

    /// Settable once. A second call fails so the slot cannot be silently taken over.
    pub fn set_controller(&mut self, access: &AccessContext, controller: Pubkey) -> VaultResult<()> {
        self.lifecycle.require_initialized()?;
        access.require_governance()?;

        if self.has_controller() {
            return Err(VaultError::AlreadySet);
        }
        if controller == Pubkey::default() {
            return Err(VaultError::InvalidAmount);
        }

        self.controller = controller;

        Ok(())
    }

    pub fn has_controller(&self) -> bool {
        self.controller != Pubkey::default()
    }

    pub fn is_governance(&self, key: &Pubkey) -> bool {
        self.lifecycle.is_initialized() && self.governance == *key
    }

    pub fn is_controller(&self, key: &Pubkey) -> bool {
        self.has_controller() && self.controller == *key
    }

    /// Authority context for a call signed by `caller`
    pub fn access(&self, caller: Pubkey) -> AccessContext {
        AccessContext {
            caller,
            is_governance: self.is_governance(&caller),
            is_controller: self.is_controller(&caller),
            controller: self.controller,
        }
    }
}

/// Who is calling, resolved against the access registry once at the call boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessContext {
    pub caller: Pubkey,
    is_governance: bool,
    is_controller: bool,
    controller: Pubkey,
}

impl AccessContext {
    pub fn is_governance(&self) -> bool {
        self.is_governance
    }

    pub fn is_controller(&self) -> bool {
        self.is_controller
    }

    pub fn require_governance(&self) -> VaultResult<()> {
        if !self.is_governance {
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }

    pub fn require_governance_or_controller(&self) -> VaultResult<()> {
        if !self.is_governance && !self.is_controller {
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }

    /// Re-issue the call as `controller_key`. Only a governance caller may delegate,
    /// and the result carries controller rights only if the registry names that key.
    pub fn delegate_to_controller(&self, controller_key: Pubkey) -> VaultResult<AccessContext> {
        self.require_governance()?;

        let is_controller = self.controller != Pubkey::default() && self.controller == controller_key;
        if !is_controller {
            return Err(VaultError::Unauthorized);
        }

        Ok(AccessContext {
            caller: controller_key,
            is_governance: false,
            is_controller,
            controller: self.controller,
        })
    }
}

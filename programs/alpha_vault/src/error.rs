use anchor_lang::prelude::*;

#[error_code]
#[derive(PartialEq, Eq)]
pub enum VaultError {
    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Already initialized")]
    AlreadyInitialized,

    #[msg("Not initialized")]
    NotInitialized,

    #[msg("Value already set")]
    AlreadySet,

    #[msg("Vault already has a registered strategy")]
    DuplicateVault,

    #[msg("No strategy registered for vault")]
    UnknownVault,

    #[msg("Controller registry is full")]
    RegistryFull,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Insufficient liquidity in the staking cascade for withdrawal")]
    InsufficientLiquidity,

    #[msg("External adapter call failed")]
    AdapterFailure,

    #[msg("Vault strategy is not set")]
    StrategyNotSet,

    #[msg("Strategy is not bound to this vault")]
    StrategyMismatch,

    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Invalid cascade stage")]
    InvalidStage,

    #[msg("Reward split exceeds 100%")]
    InvalidRewardSplit,

    #[msg("Invalid stage pool configuration")]
    InvalidStagePoolConfig,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Vault state invariant violation - critical accounting error")]
    InvariantViolation,
}

pub type VaultResult<T> = std::result::Result<T, VaultError>;

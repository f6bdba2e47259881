pub type Balance = u128;

/// Number of decimals of the common scale every reserve is normalized to.
pub const TARGET_DECIMALS: u8 = 18;

/// One unit in the common scale.
pub const ONE: Balance = 1_000_000_000_000_000_000;

/// Largest decimals value an asset may declare.
pub const MAX_DECIMALS: u8 = 36;

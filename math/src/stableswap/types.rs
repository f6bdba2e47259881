use crate::stableswap::math::{denormalize_value, normalize_value};
use crate::types::Balance;
use crate::MathError;
use num_traits::Zero;

/// Reserve amount of one pool asset in its native decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetReserve {
	pub amount: Balance,
	pub decimals: u8,
}

impl AssetReserve {
	pub fn new(amount: Balance, decimals: u8) -> Self {
		Self { amount, decimals }
	}

	pub fn is_zero(&self) -> bool {
		self.amount == Balance::zero()
	}

	/// Amount in the common 18-decimal scale.
	pub fn normalized(&self) -> Result<Balance, MathError> {
		normalize_value(self.amount, self.decimals)
	}

	/// Reserve of the same asset holding `amount` common units, truncated to native precision.
	pub fn from_normalized(amount: Balance, decimals: u8) -> Result<Self, MathError> {
		Ok(Self::new(denormalize_value(amount, decimals)?, decimals))
	}
}

impl From<AssetReserve> for u128 {
	fn from(value: AssetReserve) -> Self {
		value.amount
	}
}
impl From<&AssetReserve> for u128 {
	fn from(value: &AssetReserve) -> Self {
		value.amount
	}
}

/// Normalized amounts of a reserve pair.
pub fn normalize_reserves(reserves: &[AssetReserve; 2]) -> Result<[Balance; 2], MathError> {
	Ok([reserves[0].normalized()?, reserves[1].normalized()?])
}

/// Balances of several fungible assets, addressed by asset id.
///
/// The pool holds both of its assets in one account of this ledger.
pub trait FungibleAssets<AccountId, Balance> {
	type AssetId;
	type Error: core::fmt::Debug;

	fn balance_of(&self, asset: Self::AssetId, who: &AccountId) -> Balance;

	/// Move `amount` of `asset` from `from` to `to`. Must either move the full amount or fail without effect.
	fn transfer(&self, asset: Self::AssetId, from: &AccountId, to: &AccountId, amount: Balance) -> Result<(), Self::Error>;
}

/// Fungible token representing pool ownership.
pub trait ShareToken<AccountId, Balance> {
	type Error: core::fmt::Debug;

	fn mint(&self, who: &AccountId, amount: Balance) -> Result<(), Self::Error>;

	/// Burn `amount` from `who`. Fails when `who` holds less.
	fn burn(&self, who: &AccountId, amount: Balance) -> Result<(), Self::Error>;

	fn balance_of(&self, who: &AccountId) -> Balance;

	fn total_supply(&self) -> Balance;
}

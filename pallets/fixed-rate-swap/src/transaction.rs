// Copyright (C) 2020-2022  Intergalactic, Limited (GIB).
// SPDX-License-Identifier: Apache-2.0

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// 	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::Balance;
use crate::{Config, Error, LOG_TARGET};
use fixed_rate_swap_traits::{FungibleAssets, ShareToken};
use num_traits::Zero;

enum Operation<AccountId, AssetId> {
	Transfer {
		asset: AssetId,
		from: AccountId,
		to: AccountId,
		amount: Balance,
	},
	Mint {
		who: AccountId,
		amount: Balance,
	},
	Burn {
		who: AccountId,
		amount: Balance,
	},
}

/// Journal of collaborator calls made by one pool operation.
///
/// Calls are applied immediately. If a later call fails, the applied ones are undone in reverse order.
pub(crate) struct Transaction<'a, T: Config> {
	currency: &'a T::Currency,
	shares: &'a T::Shares,
	applied: Vec<Operation<T::AccountId, T::AssetId>>,
}

impl<'a, T: Config> Transaction<'a, T> {
	pub(crate) fn new(currency: &'a T::Currency, shares: &'a T::Shares) -> Self {
		Self {
			currency,
			shares,
			applied: Vec::new(),
		}
	}

	pub(crate) fn transfer(
		&mut self,
		asset: T::AssetId,
		from: &T::AccountId,
		to: &T::AccountId,
		amount: Balance,
	) -> Result<(), Error> {
		if amount.is_zero() {
			return Ok(());
		}
		self.currency.transfer(asset, from, to, amount).map_err(|e| {
			log::warn!(target: LOG_TARGET, "transfer of {:?} {:?} from {:?} to {:?} failed: {:?}", amount, asset, from, to, e);
			Error::TransferFailed
		})?;
		self.applied.push(Operation::Transfer {
			asset,
			from: from.clone(),
			to: to.clone(),
			amount,
		});
		Ok(())
	}

	pub(crate) fn mint(&mut self, who: &T::AccountId, amount: Balance) -> Result<(), Error> {
		self.shares.mint(who, amount).map_err(|e| {
			log::warn!(target: LOG_TARGET, "mint of {:?} shares to {:?} failed: {:?}", amount, who, e);
			Error::TransferFailed
		})?;
		self.applied.push(Operation::Mint {
			who: who.clone(),
			amount,
		});
		Ok(())
	}

	pub(crate) fn burn(&mut self, who: &T::AccountId, amount: Balance) -> Result<(), Error> {
		self.shares.burn(who, amount).map_err(|e| {
			log::warn!(target: LOG_TARGET, "burn of {:?} shares from {:?} failed: {:?}", amount, who, e);
			Error::TransferFailed
		})?;
		self.applied.push(Operation::Burn {
			who: who.clone(),
			amount,
		});
		Ok(())
	}

	fn rollback(self) {
		for operation in self.applied.into_iter().rev() {
			let result = match &operation {
				Operation::Transfer { asset, from, to, amount } => {
					self.currency.transfer(*asset, to, from, *amount).map_err(|e| format!("{:?}", e))
				}
				Operation::Mint { who, amount } => self.shares.burn(who, *amount).map_err(|e| format!("{:?}", e)),
				Operation::Burn { who, amount } => self.shares.mint(who, *amount).map_err(|e| format!("{:?}", e)),
			};
			if let Err(e) = result {
				log::error!(target: LOG_TARGET, "failed to revert {}: {}", operation.describe(), e);
			}
		}
	}
}

impl<AccountId, AssetId> Operation<AccountId, AssetId> {
	fn describe(&self) -> &'static str {
		match self {
			Operation::Transfer { .. } => "transfer",
			Operation::Mint { .. } => "mint",
			Operation::Burn { .. } => "burn",
		}
	}
}

/// Run `f` against a fresh journal. Everything `f` applied is reverted when it returns an error.
pub(crate) fn with_transaction<T: Config, R>(
	currency: &T::Currency,
	shares: &T::Shares,
	f: impl FnOnce(&mut Transaction<T>) -> Result<R, Error>,
) -> Result<R, Error> {
	let mut transaction = Transaction::<T>::new(currency, shares);
	match f(&mut transaction) {
		Ok(result) => Ok(result),
		Err(e) => {
			transaction.rollback();
			Err(e)
		}
	}
}

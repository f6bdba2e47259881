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

use crate::{Error, DEFAULT_AMPLIFICATION};
use fixed_rate_swap_math::ensure;
use fixed_rate_swap_math::stableswap::types::AssetReserve;
use fixed_rate_swap_math::types::MAX_DECIMALS;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

pub type Balance = fixed_rate_swap_math::types::Balance;

/// Static pool properties.
///
/// `pool_account`: account holding both pool assets
/// `assets`: the two pooled assets, in pool order
/// `decimals`: native decimals of `assets`
/// `amplification`: curve amplification, fixed for the lifetime of the pool
/// `share_name`, `share_symbol`, `share_decimals`: metadata of the share token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo<AccountId, AssetId> {
	pub pool_account: AccountId,
	pub assets: (AssetId, AssetId),
	pub decimals: (u8, u8),
	#[serde(default = "default_amplification")]
	pub amplification: Balance,
	pub share_name: String,
	pub share_symbol: String,
	#[serde(default = "default_share_decimals")]
	pub share_decimals: u8,
}

fn default_amplification() -> Balance {
	DEFAULT_AMPLIFICATION
}

fn default_share_decimals() -> u8 {
	18
}

impl<AccountId, AssetId> PoolInfo<AccountId, AssetId>
where
	AssetId: PartialEq + Copy,
{
	pub(crate) fn validate(&self) -> Result<(), Error> {
		ensure!(self.assets.0 != self.assets.1, Error::InvalidConfig);
		ensure!(!self.amplification.is_zero(), Error::InvalidConfig);
		ensure!(
			self.decimals.0 <= MAX_DECIMALS && self.decimals.1 <= MAX_DECIMALS,
			Error::InvalidConfig
		);
		ensure!(self.share_decimals <= MAX_DECIMALS, Error::InvalidConfig);
		Ok(())
	}

	pub fn asset(&self, index: usize) -> AssetId {
		if index == 0 {
			self.assets.0
		} else {
			self.assets.1
		}
	}

	pub(crate) fn reserves_with_decimals(&self, state: &PoolState) -> [AssetReserve; 2] {
		[
			AssetReserve::new(state.reserve0, self.decimals.0),
			AssetReserve::new(state.reserve1, self.decimals.1),
		]
	}
}

/// Mutable pool aggregate. Reserves are in native decimals, shares in common units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
	pub reserve0: Balance,
	pub reserve1: Balance,
	pub total_shares: Balance,
}

impl PoolState {
	pub fn is_empty(&self) -> bool {
		self.total_shares.is_zero()
	}

	pub fn reserves(&self) -> [Balance; 2] {
		[self.reserve0, self.reserve1]
	}

	pub(crate) fn set_reserves(&mut self, reserves: [Balance; 2]) {
		self.reserve0 = reserves[0];
		self.reserve1 = reserves[1];
	}
}

/// Swap direction, named by the asset sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
	ZeroToOne,
	OneToZero,
}

impl Direction {
	/// Indices of the input and output asset.
	pub(crate) fn indices(self) -> (usize, usize) {
		match self {
			Direction::ZeroToOne => (0, 1),
			Direction::OneToZero => (1, 0),
		}
	}
}

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
use crate::{Config, Error, D_ITERATIONS, Y_ITERATIONS};
use fixed_rate_swap_math::ensure;
use fixed_rate_swap_math::stableswap::types::{normalize_reserves, AssetReserve};
use fixed_rate_swap_math::stableswap::{
	calculate_proportional_withdraw, calculate_shares, calculate_withdraw_with_ratio,
};
use fixed_rate_swap_traits::ShareToken;
use num_traits::Zero;
use sp_arithmetic::FixedU128;

/// Share mint and burn rules on top of the share token.
pub(crate) struct ShareLedger<'a, T: Config> {
	token: &'a T::Shares,
}

impl<'a, T: Config> ShareLedger<'a, T> {
	pub(crate) fn new(token: &'a T::Shares) -> Self {
		Self { token }
	}

	pub(crate) fn balance_of(&self, who: &T::AccountId) -> Balance {
		self.token.balance_of(who)
	}

	/// Shares minted for moving the pool from `initial` to `updated` reserves.
	pub(crate) fn mint_for_deposit(
		initial: &[AssetReserve; 2],
		updated: &[AssetReserve; 2],
		amplification: Balance,
		total_shares: Balance,
	) -> Result<Balance, Error> {
		let initial = normalize_reserves(initial)?;
		let updated = normalize_reserves(updated)?;

		let shares = calculate_shares::<D_ITERATIONS>(&initial, &updated, amplification, total_shares)?;
		ensure!(!shares.is_zero(), Error::DepositTooSmall);
		Ok(shares)
	}

	/// Proportional amounts paid to `holder` for burning `shares`.
	pub(crate) fn burn_for_withdraw(
		&self,
		holder: &T::AccountId,
		shares: Balance,
		reserves: &[Balance; 2],
		total_shares: Balance,
	) -> Result<(Balance, Balance), Error> {
		self.ensure_can_burn(holder, shares)?;
		Self::proportional_amounts(shares, reserves, total_shares)
	}

	pub(crate) fn proportional_amounts(
		shares: Balance,
		reserves: &[Balance; 2],
		total_shares: Balance,
	) -> Result<(Balance, Balance), Error> {
		ensure!(!shares.is_zero(), Error::ZeroAmount);
		ensure!(shares <= total_shares, Error::InsufficientShares);
		Ok(calculate_proportional_withdraw(reserves, shares, total_shares)?)
	}

	/// Amounts paid to `holder` for burning `shares` when `ratio` of the value is asked in asset 0.
	pub(crate) fn burn_for_ratio_withdraw(
		&self,
		holder: &T::AccountId,
		shares: Balance,
		ratio: FixedU128,
		reserves: &[AssetReserve; 2],
		total_shares: Balance,
		amplification: Balance,
	) -> Result<(Balance, Balance), Error> {
		self.ensure_can_burn(holder, shares)?;
		Self::ratio_amounts(shares, ratio, reserves, total_shares, amplification)
	}

	pub(crate) fn ratio_amounts(
		shares: Balance,
		ratio: FixedU128,
		reserves: &[AssetReserve; 2],
		total_shares: Balance,
		amplification: Balance,
	) -> Result<(Balance, Balance), Error> {
		ensure!(!shares.is_zero(), Error::ZeroAmount);
		ensure!(shares <= total_shares, Error::InsufficientShares);

		let normalized = normalize_reserves(reserves)?;
		let (amount_0, amount_1) = calculate_withdraw_with_ratio::<D_ITERATIONS, Y_ITERATIONS>(
			&normalized,
			shares,
			total_shares,
			ratio,
			amplification,
		)?;

		let amount_0 = AssetReserve::from_normalized(amount_0, reserves[0].decimals)?.amount;
		let amount_1 = AssetReserve::from_normalized(amount_1, reserves[1].decimals)?.amount;
		ensure!(
			amount_0 <= reserves[0].amount && amount_1 <= reserves[1].amount,
			Error::ExcessWithdrawal
		);
		Ok((amount_0, amount_1))
	}

	fn ensure_can_burn(&self, holder: &T::AccountId, shares: Balance) -> Result<(), Error> {
		ensure!(!shares.is_zero(), Error::ZeroAmount);
		ensure!(self.balance_of(holder) >= shares, Error::InsufficientShares);
		Ok(())
	}
}

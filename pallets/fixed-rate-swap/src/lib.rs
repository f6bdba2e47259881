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

//! # Fixed rate swap
//!
//! Two-asset liquidity pool for assets pegged to each other at a fixed rate.
//!
//! ## Overview
//!
//! Trades are priced on a stableswap curve: close to 1:1 while the pool is balanced, with slippage
//! growing as the reserves diverge. There is no trade fee.
//!
//! Only the pool owner provides liquidity. Any share holder can withdraw, either proportionally or in a
//! chosen asset mix. Any account can swap.
//!
//! ### Terminology
//!
//! * **Share** - claim on the pool reserves, minted on deposit and burned on withdrawal.
//! * **Amplification** - curve parameter, the higher it is the longer prices stay near the peg.
//! * **Ratio** - fraction of a withdrawal's value requested in asset 0.
//!
//! ## Assumptions
//!
//! Reserves are the pool account's balances. Assets sent to the pool account directly are not backed by
//! shares and increase the value of existing shares. The first deposit is valued by the deposited
//! amounts only.
//!
//! Every operation prices and validates before moving any funds. Asset and share movements of a failed
//! operation are reverted and the pool state is left untouched.

mod error;
mod ledger;
mod transaction;
pub mod types;


pub use error::Error;

use crate::ledger::ShareLedger;
use crate::transaction::with_transaction;
use crate::types::{Balance, Direction, PoolInfo, PoolState};
use core::fmt::Debug;
use fixed_rate_swap_math::ensure;
use fixed_rate_swap_math::stableswap::types::AssetReserve;
use fixed_rate_swap_math::stableswap::{calculate_out_given_in, MAX_D_ITERATIONS, MAX_Y_ITERATIONS};
use fixed_rate_swap_traits::{EnsureOwner, FungibleAssets, ShareToken};
use num_traits::Zero;
use parking_lot::RwLock;
use sp_arithmetic::FixedU128;

pub const LOG_TARGET: &str = "fixed-rate-swap";

pub const D_ITERATIONS: u8 = MAX_D_ITERATIONS;
pub const Y_ITERATIONS: u8 = MAX_Y_ITERATIONS;

pub const DEFAULT_AMPLIFICATION: Balance = 5_400_000;

pub trait Config {
	type AccountId: Clone + PartialEq + Debug;

	type AssetId: Copy + PartialEq + Debug;

	/// Ledger of the two pooled assets.
	type Currency: FungibleAssets<Self::AccountId, Balance, AssetId = Self::AssetId>;

	/// Pool share token.
	type Shares: ShareToken<Self::AccountId, Balance>;

	/// Who may deposit.
	type Authority: EnsureOwner<Self::AccountId>;
}

pub struct FixedRateSwap<T: Config> {
	info: PoolInfo<T::AccountId, T::AssetId>,
	currency: T::Currency,
	shares: T::Shares,
	authority: T::Authority,
	state: RwLock<PoolState>,
}

impl<T: Config> FixedRateSwap<T> {
	/// Create a pool over the current balances of `info.pool_account` and the current share supply.
	pub fn new(
		info: PoolInfo<T::AccountId, T::AssetId>,
		currency: T::Currency,
		shares: T::Shares,
		authority: T::Authority,
	) -> Result<Self, Error> {
		info.validate()?;

		let state = PoolState {
			reserve0: currency.balance_of(info.assets.0, &info.pool_account),
			reserve1: currency.balance_of(info.assets.1, &info.pool_account),
			total_shares: shares.total_supply(),
		};

		log::info!(target: LOG_TARGET, "pool {:?}/{:?} created, state: {:?}", info.assets.0, info.assets.1, state);

		Ok(Self {
			info,
			currency,
			shares,
			authority,
			state: RwLock::new(state),
		})
	}

	pub fn pool_info(&self) -> &PoolInfo<T::AccountId, T::AssetId> {
		&self.info
	}

	pub fn pool_account(&self) -> &T::AccountId {
		&self.info.pool_account
	}

	/// Consistent snapshot of reserves and share supply.
	pub fn pool_state(&self) -> PoolState {
		let state = self.state.read();
		self.current_state(&state)
	}

	pub fn deposit(&self, who: &T::AccountId, amount0: Balance, amount1: Balance) -> Result<Balance, Error> {
		self.deposit_for(who, who, amount0, amount1, Balance::zero())
	}

	/// Owner deposits `amount0` and `amount1`, shares are minted to `to`.
	pub fn deposit_for(
		&self,
		who: &T::AccountId,
		to: &T::AccountId,
		amount0: Balance,
		amount1: Balance,
		min_shares: Balance,
	) -> Result<Balance, Error> {
		self.do_deposit(who, to, amount0, amount1, min_shares)
			.map_err(|e| Self::log_failure("deposit", who, e))
	}

	pub fn withdraw(&self, who: &T::AccountId, shares: Balance) -> Result<(Balance, Balance), Error> {
		self.withdraw_for(who, who, shares, Balance::zero(), Balance::zero())
	}

	/// Burn `shares` of `who` and pay the proportional part of both reserves to `to`.
	pub fn withdraw_for(
		&self,
		who: &T::AccountId,
		to: &T::AccountId,
		shares: Balance,
		min_amount0: Balance,
		min_amount1: Balance,
	) -> Result<(Balance, Balance), Error> {
		self.do_withdraw(who, to, shares, None, (min_amount0, min_amount1))
			.map_err(|e| Self::log_failure("withdraw", who, e))
	}

	pub fn withdraw_with_ratio(
		&self,
		who: &T::AccountId,
		shares: Balance,
		ratio: FixedU128,
	) -> Result<(Balance, Balance), Error> {
		self.withdraw_with_ratio_for(who, who, shares, ratio, Balance::zero(), Balance::zero())
	}

	/// Burn `shares` of `who` and pay their value to `to`, `ratio` of it in asset 0.
	pub fn withdraw_with_ratio_for(
		&self,
		who: &T::AccountId,
		to: &T::AccountId,
		shares: Balance,
		ratio: FixedU128,
		min_amount0: Balance,
		min_amount1: Balance,
	) -> Result<(Balance, Balance), Error> {
		self.do_withdraw(who, to, shares, Some(ratio), (min_amount0, min_amount1))
			.map_err(|e| Self::log_failure("withdraw_with_ratio", who, e))
	}

	pub fn swap_0_to_1(&self, who: &T::AccountId, amount_in: Balance) -> Result<Balance, Error> {
		self.swap_for(who, who, Direction::ZeroToOne, amount_in, Balance::zero())
	}

	pub fn swap_1_to_0(&self, who: &T::AccountId, amount_in: Balance) -> Result<Balance, Error> {
		self.swap_for(who, who, Direction::OneToZero, amount_in, Balance::zero())
	}

	/// Sell `amount_in` of the `direction` input asset, the output is paid to `to`.
	pub fn swap_for(
		&self,
		who: &T::AccountId,
		to: &T::AccountId,
		direction: Direction,
		amount_in: Balance,
		min_amount_out: Balance,
	) -> Result<Balance, Error> {
		self.do_swap(who, to, direction, amount_in, min_amount_out)
			.map_err(|e| Self::log_failure("swap", who, e))
	}

	pub fn quote_swap(&self, direction: Direction, amount_in: Balance) -> Result<Balance, Error> {
		let state = self.current_state(&self.state.read());
		self.calculate_swap(&state, direction, amount_in)
	}

	/// Shares a deposit of `amount0` and `amount1` would mint now.
	pub fn quote_deposit(&self, amount0: Balance, amount1: Balance) -> Result<Balance, Error> {
		let state = self.current_state(&self.state.read());
		self.calculate_deposit(&state, amount0, amount1)
	}

	pub fn quote_withdraw(&self, shares: Balance) -> Result<(Balance, Balance), Error> {
		let state = self.current_state(&self.state.read());
		ShareLedger::<T>::proportional_amounts(shares, &state.reserves(), state.total_shares)
	}

	pub fn quote_withdraw_with_ratio(&self, shares: Balance, ratio: FixedU128) -> Result<(Balance, Balance), Error> {
		let state = self.current_state(&self.state.read());
		ShareLedger::<T>::ratio_amounts(
			shares,
			ratio,
			&self.info.reserves_with_decimals(&state),
			state.total_shares,
			self.info.amplification,
		)
	}
}

impl<T: Config> FixedRateSwap<T> {
	fn do_deposit(
		&self,
		who: &T::AccountId,
		to: &T::AccountId,
		amount0: Balance,
		amount1: Balance,
		min_shares: Balance,
	) -> Result<Balance, Error> {
		ensure!(self.authority.is_owner(who), Error::NotOwner);
		ensure!(!(amount0.is_zero() && amount1.is_zero()), Error::EmptyDeposit);

		let mut state = self.state.write();
		*state = self.current_state(&state);

		let shares = self.calculate_deposit(&state, amount0, amount1)?;
		ensure!(shares >= min_shares, Error::SlippageLimit);
		let total_shares = state.total_shares.checked_add(shares).ok_or(Error::Overflow)?;

		let pool_account = self.pool_account();
		with_transaction::<T, _>(&self.currency, &self.shares, |tx| {
			tx.transfer(self.info.assets.0, who, pool_account, amount0)?;
			tx.transfer(self.info.assets.1, who, pool_account, amount1)?;
			tx.mint(to, shares)
		})?;

		state.reserve0 += amount0;
		state.reserve1 += amount1;
		state.total_shares = total_shares;

		log::debug!(
			target: LOG_TARGET,
			"deposit: {:?} added ({:?}, {:?}), {:?} shares minted to {:?}",
			who,
			amount0,
			amount1,
			shares,
			to
		);

		Ok(shares)
	}

	fn do_withdraw(
		&self,
		who: &T::AccountId,
		to: &T::AccountId,
		shares: Balance,
		ratio: Option<FixedU128>,
		min_amounts: (Balance, Balance),
	) -> Result<(Balance, Balance), Error> {
		let mut state = self.state.write();
		*state = self.current_state(&state);

		let ledger = ShareLedger::<T>::new(&self.shares);
		let (amount0, amount1) = match ratio {
			None => ledger.burn_for_withdraw(who, shares, &state.reserves(), state.total_shares)?,
			Some(ratio) => ledger.burn_for_ratio_withdraw(
				who,
				shares,
				ratio,
				&self.info.reserves_with_decimals(&state),
				state.total_shares,
				self.info.amplification,
			)?,
		};
		ensure!(
			amount0 >= min_amounts.0 && amount1 >= min_amounts.1,
			Error::SlippageLimit
		);

		let pool_account = self.pool_account();
		with_transaction::<T, _>(&self.currency, &self.shares, |tx| {
			tx.burn(who, shares)?;
			tx.transfer(self.info.assets.0, pool_account, to, amount0)?;
			tx.transfer(self.info.assets.1, pool_account, to, amount1)
		})?;

		state.reserve0 -= amount0;
		state.reserve1 -= amount1;
		state.total_shares -= shares;

		log::debug!(
			target: LOG_TARGET,
			"withdraw: {:?} burned {:?} shares (ratio {:?}), ({:?}, {:?}) paid to {:?}",
			who,
			shares,
			ratio,
			amount0,
			amount1,
			to
		);

		Ok((amount0, amount1))
	}

	fn do_swap(
		&self,
		who: &T::AccountId,
		to: &T::AccountId,
		direction: Direction,
		amount_in: Balance,
		min_amount_out: Balance,
	) -> Result<Balance, Error> {
		let mut state = self.state.write();
		*state = self.current_state(&state);

		let amount_out = self.calculate_swap(&state, direction, amount_in)?;
		ensure!(amount_out >= min_amount_out, Error::SlippageLimit);

		let (idx_in, idx_out) = direction.indices();
		let mut reserves = state.reserves();
		reserves[idx_in] = reserves[idx_in].checked_add(amount_in).ok_or(Error::Overflow)?;
		reserves[idx_out] -= amount_out;

		let pool_account = self.pool_account();
		with_transaction::<T, _>(&self.currency, &self.shares, |tx| {
			tx.transfer(self.info.asset(idx_in), who, pool_account, amount_in)?;
			tx.transfer(self.info.asset(idx_out), pool_account, to, amount_out)
		})?;

		state.set_reserves(reserves);

		log::debug!(
			target: LOG_TARGET,
			"swap: {:?} sold {:?} of {:?} for {:?} of {:?}, paid to {:?}",
			who,
			amount_in,
			self.info.asset(idx_in),
			amount_out,
			self.info.asset(idx_out),
			to
		);

		Ok(amount_out)
	}

	fn calculate_deposit(&self, state: &PoolState, amount0: Balance, amount1: Balance) -> Result<Balance, Error> {
		ensure!(!(amount0.is_zero() && amount1.is_zero()), Error::EmptyDeposit);

		let initial = self.info.reserves_with_decimals(state);
		let updated = [
			AssetReserve::new(
				state.reserve0.checked_add(amount0).ok_or(Error::Overflow)?,
				self.info.decimals.0,
			),
			AssetReserve::new(
				state.reserve1.checked_add(amount1).ok_or(Error::Overflow)?,
				self.info.decimals.1,
			),
		];

		ShareLedger::<T>::mint_for_deposit(&initial, &updated, self.info.amplification, state.total_shares)
	}

	fn calculate_swap(&self, state: &PoolState, direction: Direction, amount_in: Balance) -> Result<Balance, Error> {
		ensure!(!amount_in.is_zero(), Error::ZeroAmount);

		let (idx_in, idx_out) = direction.indices();
		let reserves = self.info.reserves_with_decimals(state);
		let reserve_in = reserves[idx_in];
		let reserve_out = reserves[idx_out];

		let amount_out = calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(
			reserve_in.normalized()?,
			reserve_out.normalized()?,
			AssetReserve::new(amount_in, reserve_in.decimals).normalized()?,
			self.info.amplification,
		)?;
		let amount_out = AssetReserve::from_normalized(amount_out, reserve_out.decimals)?.amount;

		ensure!(!amount_out.is_zero(), Error::ZeroAmount);
		ensure!(amount_out < reserve_out.amount, Error::InsufficientLiquidity);
		Ok(amount_out)
	}

	/// Reserves as currently held by the pool account, shares as issued by the pool.
	fn current_state(&self, state: &PoolState) -> PoolState {
		PoolState {
			reserve0: self.currency.balance_of(self.info.assets.0, &self.info.pool_account),
			reserve1: self.currency.balance_of(self.info.assets.1, &self.info.pool_account),
			total_shares: state.total_shares,
		}
	}

	fn log_failure(operation: &str, who: &T::AccountId, error: Error) -> Error {
		if error.is_internal() {
			log::error!(target: LOG_TARGET, "{} by {:?} failed: {:?}", operation, who, error);
		} else {
			log::warn!(target: LOG_TARGET, "{} by {:?} rejected: {:?}", operation, who, error);
		}
		error
	}
}

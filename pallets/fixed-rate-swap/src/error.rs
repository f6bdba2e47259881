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

use fixed_rate_swap_math::MathError;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	/// Caller is not allowed to deposit.
	#[error("caller is not the pool owner")]
	NotOwner,
	/// Both deposit amounts are zero.
	#[error("deposit of two zero amounts")]
	EmptyDeposit,
	/// Holder owns fewer shares than requested.
	#[error("insufficient share balance")]
	InsufficientShares,
	/// Requested asset mix cannot be paid from current reserves.
	#[error("withdrawal exceeds pool reserves")]
	ExcessWithdrawal,
	/// Trade cannot be priced against current reserves.
	#[error("insufficient liquidity")]
	InsufficientLiquidity,
	/// Invariant solver did not converge.
	#[error("invariant solver did not converge")]
	Convergence,
	#[error("arithmetic overflow")]
	Overflow,
	/// Asset or share token collaborator rejected an operation.
	#[error("asset transfer failed")]
	TransferFailed,
	/// Zero swap amount, zero shares, or a trade that pays nothing out.
	#[error("zero amount")]
	ZeroAmount,
	/// Asset-mix ratio outside of `[0, 1]`.
	#[error("ratio must be within [0, 1]")]
	InvalidRatio,
	/// Result is below the caller's minimum.
	#[error("slippage limit exceeded")]
	SlippageLimit,
	/// Deposit is too small to mint a single share.
	#[error("deposit too small to mint shares")]
	DepositTooSmall,
	#[error("invalid pool configuration")]
	InvalidConfig,
}

impl Error {
	/// Solver and arithmetic failures point at a misconfigured pool or pathological input,
	/// not at a caller mistake.
	pub fn is_internal(&self) -> bool {
		matches!(self, Error::Convergence | Error::Overflow)
	}
}

impl From<MathError> for Error {
	fn from(value: MathError) -> Self {
		match value {
			MathError::Overflow | MathError::DivisionByZero => Error::Overflow,
			MathError::NotConverged => Error::Convergence,
			MathError::InsufficientOutReserve | MathError::ZeroReserve => Error::InsufficientLiquidity,
			MathError::ExcessWithdrawal => Error::ExcessWithdrawal,
			MathError::InvalidRatio => Error::InvalidRatio,
		}
	}
}

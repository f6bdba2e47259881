//! # Fixed Rate Swap Math
//!
//! Integer arithmetic behind a two-asset, rate-pegged liquidity pool:
//! decimal normalization, the stableswap invariant solver, swap and
//! ratio-withdrawal pricing, and share mint/burn amounts.
//!
//! All functions are pure. Balances are `u128` in a common 18-decimal scale;
//! products that can exceed 128 bits are evaluated in `U256`/`U512`.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(not(feature = "std"), test))]
extern crate std;

pub mod stableswap;
#[cfg(test)]
pub mod test_utils;
pub mod types;

#[macro_export]
macro_rules! ensure {
	($e:expr, $f:expr) => {
		match $e {
			true => (),
			false => {
				return Err($f);
			}
		}
	};
}

#[macro_export]
macro_rules! to_u256 {
    ($($x:expr),+) => (
        {($(U256::from($x)),+)}
    );
}

#[macro_export]
macro_rules! to_u512 {
    ($($x:expr),+) => (
        {($(U512::from($x)),+)}
    );
}

#[macro_export]
macro_rules! to_balance {
	($x:expr) => {
		Balance::try_from($x).map_err(|_| Overflow)
	};
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum MathError {
	/// Intermediate or final value does not fit its integer width.
	Overflow,
	/// Newton iteration hit its cap without converging.
	NotConverged,
	/// Trade would drain the output reserve.
	InsufficientOutReserve,
	/// Reserve required by the calculation is zero.
	ZeroReserve,
	DivisionByZero,
	/// Requested withdrawal cannot be paid from current reserves.
	ExcessWithdrawal,
	/// Asset-mix ratio outside of `[0, 1]`.
	InvalidRatio,
}

use crate::types::{Balance, MAX_DECIMALS, TARGET_DECIMALS};
use crate::MathError::{self, DivisionByZero, ExcessWithdrawal, InsufficientOutReserve, InvalidRatio, NotConverged, Overflow, ZeroReserve};
use crate::{ensure, to_balance, to_u256, to_u512};
use num_traits::Zero;
use primitive_types::{U256, U512};
use sp_arithmetic::{FixedPointNumber, FixedU128};

pub const MAX_D_ITERATIONS: u8 = 255;
pub const MAX_Y_ITERATIONS: u8 = 255;

const PRECISION: u8 = 1;
const MAX_D_ROUNDING_STEPS: u8 = 2;

/// Scale `amount` expressed with `decimals` into the common 18-decimal scale.
///
/// Exact for `decimals <= 18`. Assets with more decimals lose the digits below the common scale.
pub fn normalize_value(amount: Balance, decimals: u8) -> Result<Balance, MathError> {
	ensure!(decimals <= MAX_DECIMALS, Overflow);
	if decimals <= TARGET_DECIMALS {
		amount
			.checked_mul(10u128.pow((TARGET_DECIMALS - decimals) as u32))
			.ok_or(Overflow)
	} else {
		Ok(amount / 10u128.pow((decimals - TARGET_DECIMALS) as u32))
	}
}

/// Inverse of [`normalize_value`]. Truncates, so a payout is never rounded up.
pub fn denormalize_value(amount: Balance, decimals: u8) -> Result<Balance, MathError> {
	ensure!(decimals <= MAX_DECIMALS, Overflow);
	if decimals <= TARGET_DECIMALS {
		Ok(amount / 10u128.pow((TARGET_DECIMALS - decimals) as u32))
	} else {
		amount
			.checked_mul(10u128.pow((decimals - TARGET_DECIMALS) as u32))
			.ok_or(Overflow)
	}
}

/// Calculating amount to be received from the pool given the amount to be sent to the pool and both reserves.
/// N - number of iterations to use for Newton's formula to calculate parameter D
/// N_Y - number of iterations to use for Newton's formula to calculate the output reserve
pub fn calculate_out_given_in<const N: u8, const N_Y: u8>(
	reserve_in: Balance,
	reserve_out: Balance,
	amount_in: Balance,
	amplification: Balance,
) -> Result<Balance, MathError> {
	if amount_in.is_zero() {
		return Ok(Balance::zero());
	}
	ensure!(!reserve_in.is_zero() && !reserve_out.is_zero(), ZeroReserve);

	let d = calculate_d::<N>(&[reserve_in, reserve_out], amplification)?;
	let new_reserve_in = reserve_in.checked_add(amount_in).ok_or(Overflow)?;
	let new_reserve_out = calculate_y::<N_Y>(new_reserve_in, d, amplification)?;

	let amount_out = reserve_out.saturating_sub(new_reserve_out);
	ensure!(amount_out < reserve_out, InsufficientOutReserve);
	Ok(amount_out)
}

/// Value of a reserve pair in common units.
///
/// This is the invariant `D`, floored at the larger reserve. A pool holding a single asset is worth that
/// reserve, and the first units of the other asset must not make it worth less.
pub fn calculate_pool_value<const N: u8>(reserves: &[Balance; 2], amplification: Balance) -> Result<Balance, MathError> {
	let d = calculate_d::<N>(reserves, amplification)?;
	Ok(d.max(reserves[0]).max(reserves[1]))
}

/// [`calculate_pool_value`] with `D` rounded down to the largest value not above the exact root.
pub fn calculate_pool_value_rounded_down<const N: u8>(
	reserves: &[Balance; 2],
	amplification: Balance,
) -> Result<Balance, MathError> {
	let d = calculate_d_rounded_down::<N>(reserves, amplification)?;
	Ok(d.max(reserves[0]).max(reserves[1]))
}

/// Split `value` (common units) worth of reserves into two asset amounts, `ratio` of the value in asset 0.
///
/// The proportional part of the withdrawal is taken as is. Whatever the requested mix deviates from it
/// is priced as a swap against the reserves left after the proportional part, so skewed mixes pay the same
/// slippage a trade of that size would.
pub fn calculate_ratio_split<const N: u8, const N_Y: u8>(
	value: Balance,
	ratio: FixedU128,
	reserves: &[Balance; 2],
	amplification: Balance,
) -> Result<(Balance, Balance), MathError> {
	ensure!(ratio.into_inner() <= FixedU128::DIV, InvalidRatio);
	if value.is_zero() {
		return Ok((Balance::zero(), Balance::zero()));
	}

	let d = calculate_pool_value::<N>(reserves, amplification)?;
	ensure!(!d.is_zero() && value <= d, ExcessWithdrawal);

	let (value_hp, d_hp) = to_u256!(value, d);
	let proportional = [
		to_balance!(to_u256!(reserves[0]) * value_hp / d_hp)?,
		to_balance!(to_u256!(reserves[1]) * value_hp / d_hp)?,
	];

	let nominal_0 = to_balance!(value_hp * to_u256!(ratio.into_inner()) / to_u256!(FixedU128::DIV))?;
	let nominal_1 = value - nominal_0;

	let remaining = [reserves[0] - proportional[0], reserves[1] - proportional[1]];

	let amounts = if nominal_0 >= proportional[0] {
		// asset 1 given up in exchange for more asset 0
		let sold = proportional[1].saturating_sub(nominal_1);
		if sold.is_zero() {
			(proportional[0], proportional[1])
		} else {
			let bought = implicit_swap::<N, N_Y>(remaining[1], remaining[0], sold, amplification)?;
			(
				proportional[0].checked_add(bought).ok_or(Overflow)?,
				proportional[1] - sold,
			)
		}
	} else {
		let sold = proportional[0].saturating_sub(nominal_0);
		if sold.is_zero() {
			(proportional[0], proportional[1])
		} else {
			let bought = implicit_swap::<N, N_Y>(remaining[0], remaining[1], sold, amplification)?;
			(
				proportional[0] - sold,
				proportional[1].checked_add(bought).ok_or(Overflow)?,
			)
		}
	};

	ensure!(amounts.0 <= reserves[0] && amounts.1 <= reserves[1], ExcessWithdrawal);
	Ok(amounts)
}

fn implicit_swap<const N: u8, const N_Y: u8>(
	reserve_in: Balance,
	reserve_out: Balance,
	amount_in: Balance,
	amplification: Balance,
) -> Result<Balance, MathError> {
	calculate_out_given_in::<N, N_Y>(reserve_in, reserve_out, amount_in, amplification).map_err(|e| match e {
		ZeroReserve | InsufficientOutReserve => ExcessWithdrawal,
		other => other,
	})
}

/// amplification * n^n where n is number of assets in pool.
pub(crate) fn calculate_ann(len: usize, amplification: Balance) -> Result<Balance, MathError> {
	(0..len).try_fold(amplification, |acc, _| acc.checked_mul(len as u128).ok_or(Overflow))
}

/// Solve `A·n^n·S + D = A·n^n·D + D^(n+1) / (n^n·∏x)` for `D`.
///
/// Zero reserves do not take part, so a single funded asset yields `D == reserve`.
pub fn calculate_d<const N: u8>(reserves: &[Balance; 2], amplification: Balance) -> Result<Balance, MathError> {
	let mut xp_hp = [U512::zero(); 2];
	let mut n_coins = 0usize;
	for reserve in reserves.iter().filter(|v| !(*v).is_zero()) {
		xp_hp[n_coins] = to_u512!(*reserve);
		n_coins += 1;
	}
	let xp_hp = &xp_hp[..n_coins];

	if xp_hp.is_empty() {
		return Ok(Balance::zero());
	}

	let ann = calculate_ann(n_coins, amplification)?;
	let (ann_hp, n_coins_hp, precision_hp) = to_u512!(ann, n_coins, PRECISION);

	let s_hp = xp_hp
		.iter()
		.try_fold(U512::zero(), |acc, x| acc.checked_add(*x))
		.ok_or(Overflow)?;
	let prod_hp = xp_hp
		.iter()
		.try_fold(U512::one(), |acc, x| acc.checked_mul(x.checked_mul(n_coins_hp)?))
		.ok_or(Overflow)?;

	let mut d = s_hp;

	for _ in 0..N {
		// D^(n+1) / (n^n·∏x), evaluated without intermediate truncation
		let d_p = (0..=n_coins)
			.try_fold(U512::one(), |acc, _| acc.checked_mul(d))
			.ok_or(Overflow)?
			.checked_div(prod_hp)
			.ok_or(DivisionByZero)?;
		let d_prev = d;

		let numerator = ann_hp
			.checked_mul(s_hp)
			.and_then(|v| v.checked_add(d_p.checked_mul(n_coins_hp)?))
			.and_then(|v| v.checked_mul(d))
			.ok_or(Overflow)?;
		let denominator = ann_hp
			.checked_sub(U512::one())
			.and_then(|v| v.checked_mul(d))
			.and_then(|v| v.checked_add(n_coins_hp.checked_add(U512::one())?.checked_mul(d_p)?))
			.ok_or(Overflow)?;
		d = numerator.checked_div(denominator).ok_or(DivisionByZero)?;

		if has_converged(d_prev, d, precision_hp) {
			return to_balance!(d);
		}
	}

	Err(NotConverged)
}

/// Like [`calculate_d`], but never above the exact root of the invariant.
///
/// The solver stops within one unit of the root, from either side. An estimate that overshoots is
/// stepped down until the invariant is no longer exceeded.
pub fn calculate_d_rounded_down<const N: u8>(reserves: &[Balance; 2], amplification: Balance) -> Result<Balance, MathError> {
	let mut d = calculate_d::<N>(reserves, amplification)?;
	// a single funded asset gives the exact root
	if reserves.iter().any(|r| r.is_zero()) {
		return Ok(d);
	}

	for _ in 0..MAX_D_ROUNDING_STEPS {
		if d.is_zero() || !exceeds_invariant(d, reserves, amplification)? {
			break;
		}
		d -= 1;
	}
	Ok(d)
}

/// `true` when `d` lies strictly above the root, i.e. `Ann·D + D^3 / (4·x0·x1) > Ann·S + D`.
/// Both sides are multiplied by `4·x0·x1` so the comparison is exact.
fn exceeds_invariant(d: Balance, reserves: &[Balance; 2], amplification: Balance) -> Result<bool, MathError> {
	let ann = calculate_ann(2, amplification)?;
	let (d_hp, x0_hp, x1_hp, ann_hp, four_hp) = to_u512!(d, reserves[0], reserves[1], ann, 4u128);

	let prod = four_hp
		.checked_mul(x0_hp)
		.and_then(|v| v.checked_mul(x1_hp))
		.ok_or(Overflow)?;
	let lhs = prod
		.checked_mul(ann_hp)
		.and_then(|v| v.checked_mul(d_hp))
		.and_then(|v| v.checked_add(d_hp.checked_mul(d_hp)?.checked_mul(d_hp)?))
		.ok_or(Overflow)?;
	let rhs = x0_hp
		.checked_add(x1_hp)
		.and_then(|s| s.checked_mul(ann_hp))
		.and_then(|v| v.checked_add(d_hp))
		.and_then(|v| v.checked_mul(prod))
		.ok_or(Overflow)?;

	Ok(lhs > rhs)
}

/// Solve the two-asset invariant for the reserve paired with `reserve`, keeping `d` fixed.
///
/// The converged root is returned plus one unit so that the reserve staying in the pool is never
/// under-estimated.
pub fn calculate_y<const N: u8>(reserve: Balance, d: Balance, amplification: Balance) -> Result<Balance, MathError> {
	if d.is_zero() {
		return Ok(Balance::zero());
	}
	ensure!(!reserve.is_zero(), ZeroReserve);

	let ann = calculate_ann(2, amplification)?;
	let (x_hp, d_hp, ann_hp, two_hp, four_hp, precision_hp) = to_u512!(reserve, d, ann, 2u128, 4u128, PRECISION);

	// c = D^3 / (n^n·x·Ann), b = x + D / Ann
	let c = d_hp
		.checked_mul(d_hp)
		.and_then(|v| v.checked_mul(d_hp))
		.ok_or(Overflow)?
		.checked_div(four_hp.checked_mul(x_hp).and_then(|v| v.checked_mul(ann_hp)).ok_or(Overflow)?)
		.ok_or(DivisionByZero)?;
	let b = x_hp
		.checked_add(d_hp.checked_div(ann_hp).ok_or(DivisionByZero)?)
		.ok_or(Overflow)?;

	let mut y = d_hp;

	for _ in 0..N {
		let y_prev = y;
		let denominator = two_hp
			.checked_mul(y)
			.and_then(|v| v.checked_add(b))
			.and_then(|v| v.checked_sub(d_hp))
			.ok_or(Overflow)?;
		y = y
			.checked_mul(y)
			.and_then(|v| v.checked_add(c))
			.ok_or(Overflow)?
			.checked_div(denominator)
			.ok_or(DivisionByZero)?;

		if has_converged(y_prev, y, precision_hp) {
			return to_balance!(y)?.checked_add(1).ok_or(Overflow);
		}
	}

	Err(NotConverged)
}

#[inline]
fn has_converged(v0: U512, v1: U512, precision: U512) -> bool {
	abs_diff(v0, v1) <= precision
}

#[inline]
fn abs_diff(d0: U512, d1: U512) -> U512 {
	if d1 >= d0 {
		// This is safe due the previous condition
		d1 - d0
	} else {
		d0 - d1
	}
}

use crate::stableswap::math::{calculate_pool_value, calculate_pool_value_rounded_down, calculate_ratio_split};
use crate::types::Balance;
use crate::MathError::{self, DivisionByZero, ExcessWithdrawal, Overflow, ZeroReserve};
use crate::{ensure, to_balance, to_u256};
use num_traits::Zero;
use primitive_types::U256;
use sp_arithmetic::FixedU128;

/// Calculate amount of shares to be given to LP after LP provided liquidity of some assets to the pool.
///
/// With no shares issued yet, the added amounts (`updated - initial`) are minted at their value; whatever the
/// pool already held unbacked is ignored. Pool values come from [`calculate_pool_value`], so a pool that held a
/// single asset is not undervalued once the other side receives its first units.
pub fn calculate_shares<const N: u8>(
	initial_reserves: &[Balance; 2],
	updated_reserves: &[Balance; 2],
	amplification: Balance,
	share_issuance: Balance,
) -> Result<Balance, MathError> {
	ensure!(
		updated_reserves[0] >= initial_reserves[0] && updated_reserves[1] >= initial_reserves[1],
		Overflow
	);

	if share_issuance.is_zero() {
		let added = [
			updated_reserves[0] - initial_reserves[0],
			updated_reserves[1] - initial_reserves[1],
		];
		return calculate_pool_value_rounded_down::<N>(&added, amplification);
	}

	let initial_d = calculate_pool_value::<N>(initial_reserves, amplification)?;

	// We must make sure the updated_d is rounded *down* so that we are not giving the new position too many shares.
	let updated_d = calculate_pool_value_rounded_down::<N>(updated_reserves, amplification)?;

	if updated_d <= initial_d {
		return Ok(Balance::zero());
	}
	ensure!(!initial_d.is_zero(), ZeroReserve);

	let (issuance_hp, d_diff, d0) = to_u256!(share_issuance, updated_d - initial_d, initial_d);
	let share_amount = issuance_hp
		.checked_mul(d_diff)
		.ok_or(Overflow)?
		.checked_div(d0)
		.ok_or(DivisionByZero)?;
	to_balance!(share_amount)
}

/// Proportional amounts of both reserves backing `shares` out of `share_issuance`. Rounded down.
pub fn calculate_proportional_withdraw(
	reserves: &[Balance; 2],
	shares: Balance,
	share_issuance: Balance,
) -> Result<(Balance, Balance), MathError> {
	ensure!(!share_issuance.is_zero(), DivisionByZero);
	ensure!(shares <= share_issuance, ExcessWithdrawal);

	let (shares_hp, issuance_hp) = to_u256!(shares, share_issuance);
	let amount_0 = to_balance!(to_u256!(reserves[0]) * shares_hp / issuance_hp)?;
	let amount_1 = to_balance!(to_u256!(reserves[1]) * shares_hp / issuance_hp)?;

	Ok((amount_0, amount_1))
}

/// Amounts of both assets paid for `shares` when the LP asks for `ratio` of the value in asset 0.
///
/// The value of the shares is their slice of the pool value; the mix is priced by [`calculate_ratio_split`].
pub fn calculate_withdraw_with_ratio<const N: u8, const N_Y: u8>(
	reserves: &[Balance; 2],
	shares: Balance,
	share_issuance: Balance,
	ratio: FixedU128,
	amplification: Balance,
) -> Result<(Balance, Balance), MathError> {
	ensure!(!share_issuance.is_zero(), DivisionByZero);
	ensure!(shares <= share_issuance, ExcessWithdrawal);

	let d = calculate_pool_value::<N>(reserves, amplification)?;
	let (d_hp, shares_hp, issuance_hp) = to_u256!(d, shares, share_issuance);
	let value = to_balance!(d_hp * shares_hp / issuance_hp)?;

	calculate_ratio_split::<N, N_Y>(value, ratio, reserves, amplification)
}

use super::*;
use crate::stableswap::*;
use crate::types::Balance;
use primitive_types::U256;
use proptest::prelude::*;
use proptest::proptest;
use sp_arithmetic::FixedU128;

const RESERVE_RANGE: (Balance, Balance) = (1000 * ONE, 100_000_000 * ONE);

fn trade_amount() -> impl Strategy<Value = Balance> {
	1000..10000 * ONE
}

fn asset_reserve() -> impl Strategy<Value = Balance> {
	RESERVE_RANGE.0..RESERVE_RANGE.1
}

fn amplification() -> impl Strategy<Value = Balance> {
	2..10_000_000u128
}

fn ratio() -> impl Strategy<Value = FixedU128> {
	(0..=ONE).prop_map(FixedU128::from_inner)
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(500))]
	#[test]
	fn d_should_satisfy_invariant_equation(reserve_0 in asset_reserve(),
		reserve_1 in asset_reserve(),
		amp in amplification(),
	) {
		let d = calculate_d::<D_ITERATIONS>(&[reserve_0, reserve_1], amp).unwrap();

		prop_assert!(stable_swap_equation(d, amp, &[reserve_0, reserve_1], 2));
	}
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(500))]
	#[test]
	fn swap_should_not_decrease_invariant(amount_in in trade_amount(),
		reserve_in in asset_reserve(),
		reserve_out in asset_reserve(),
		amp in amplification(),
	) {
		let d1 = calculate_d::<D_ITERATIONS>(&[reserve_in, reserve_out], amp).unwrap();

		let amount_out = calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(reserve_in, reserve_out, amount_in, amp).unwrap();

		let d2 = calculate_d::<D_ITERATIONS>(&[reserve_in + amount_in, reserve_out - amount_out], amp).unwrap();

		prop_assert!(d2 >= d1);
	}
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(500))]
	#[test]
	fn swap_into_heavier_side_should_not_pay_more_than_sent(amount_in in trade_amount(),
		reserve_a in asset_reserve(),
		reserve_b in asset_reserve(),
		amp in amplification(),
	) {
		let reserve_in = reserve_a.max(reserve_b);
		let reserve_out = reserve_a.min(reserve_b);

		let amount_out = calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(reserve_in, reserve_out, amount_in, amp).unwrap();

		prop_assert!(amount_out <= amount_in);
	}
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(500))]
	#[test]
	fn swap_output_should_grow_with_input(amount_in in trade_amount(),
		extra in 1..ONE,
		reserve_in in asset_reserve(),
		reserve_out in asset_reserve(),
		amp in amplification(),
	) {
		let smaller = calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(reserve_in, reserve_out, amount_in, amp).unwrap();
		let larger = calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(reserve_in, reserve_out, amount_in + extra, amp).unwrap();

		prop_assert!(larger >= smaller);
	}
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(500))]
	#[test]
	fn deposit_then_withdraw_should_not_return_more_than_deposited(amount_0 in trade_amount(),
		reserve_0 in asset_reserve(),
		reserve_1 in asset_reserve(),
		amp in amplification(),
	) {
		let issuance = calculate_d::<D_ITERATIONS>(&[reserve_0, reserve_1], amp).unwrap() - 2;
		let amount_1 = (U256::from(amount_0) * U256::from(reserve_1) / U256::from(reserve_0)).as_u128();
		let updated = [reserve_0 + amount_0, reserve_1 + amount_1];

		let shares = calculate_shares::<D_ITERATIONS>(&[reserve_0, reserve_1], &updated, amp, issuance).unwrap();
		let (out_0, out_1) = calculate_proportional_withdraw(&updated, shares, issuance + shares).unwrap();

		prop_assert!(out_0 <= amount_0);
		prop_assert!(out_1 <= amount_1);
	}
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(300))]
	#[test]
	fn withdraw_with_ratio_should_not_take_more_value_than_shares_are_worth(reserve_0 in asset_reserve(),
		reserve_1 in asset_reserve(),
		amp in amplification(),
		share_fraction in 1..500u128,
		ratio in ratio(),
	) {
		let d = calculate_d::<D_ITERATIONS>(&[reserve_0, reserve_1], amp).unwrap();
		let issuance = d - 2;
		let shares = issuance * share_fraction / 1000;

		let (amount_0, amount_1) = calculate_withdraw_with_ratio::<D_ITERATIONS, Y_ITERATIONS>(
			&[reserve_0, reserve_1],
			shares,
			issuance,
			ratio,
			amp,
		).unwrap();

		let value = (U256::from(d) * U256::from(shares) / U256::from(issuance)).as_u128();
		let d_after = calculate_d::<D_ITERATIONS>(&[reserve_0 - amount_0, reserve_1 - amount_1], amp).unwrap();

		prop_assert!(d_after + value >= d);
	}
}

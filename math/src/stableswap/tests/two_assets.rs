use super::*;
use crate::stableswap::*;
use crate::test_utils::assert_approx_eq;
use crate::MathError;

#[test]
fn test_d() {
	let reserves = [1000u128, 1000u128];
	assert_eq!(calculate_d::<D_ITERATIONS>(&reserves, 1), Ok(2000u128));

	let reserves = [1_000_000_000_000_000_000_000u128, 1_000_000_000_000_000_000_000u128];
	assert_eq!(
		calculate_d::<D_ITERATIONS>(&reserves, 1),
		Ok(2_000_000_000_000_000_000_000u128)
	);
}

#[test]
fn test_d_with_zero_reserves() {
	let reserves = [0u128, 0u128];
	assert_eq!(calculate_d::<D_ITERATIONS>(&reserves, 1), Ok(0u128));
}

#[test]
fn test_d_with_one_zero_reserve_should_value_the_funded_asset_only() {
	assert_eq!(calculate_d::<D_ITERATIONS>(&[1000u128, 0u128], 1), Ok(1000u128));
	assert_eq!(calculate_d::<D_ITERATIONS>(&[0u128, ONE], AMPLIFICATION), Ok(ONE));
}

#[test]
fn test_d_imbalanced() {
	let reserves = [1000u128, 2000u128];
	assert_eq!(calculate_d::<D_ITERATIONS>(&reserves, 1), Ok(2940u128));
	assert_eq!(calculate_d::<D_ITERATIONS>(&reserves, 100), Ok(2999u128));
}

#[test]
fn test_d_should_not_depend_on_reserve_order() {
	let amp = 310u128;
	let a = 95329220803912837655u128;
	let b = 57374284583541134907u128;

	assert_eq!(
		calculate_d::<D_ITERATIONS>(&[a, b], amp),
		calculate_d::<D_ITERATIONS>(&[b, a], amp)
	);
}

#[test]
fn test_d_should_converge_when_pool_is_extremely_imbalanced() {
	assert_eq!(
		calculate_d::<D_ITERATIONS>(&[ONE, 1u128], AMPLIFICATION),
		Ok(442018633817535u128)
	);

	let result = calculate_d::<D_ITERATIONS>(&[1u128, 1_000_000_000_000 * ONE], AMPLIFICATION);
	assert!(result.is_ok());
}

#[test]
fn test_d_should_fail_when_iteration_cap_is_reached() {
	assert_eq!(
		calculate_d::<1>(&[ONE, 1_000_000_000_000u128], AMPLIFICATION),
		Err(MathError::NotConverged)
	);
}

#[test]
fn test_d_should_fail_when_amplification_overflows() {
	assert_eq!(
		calculate_d::<D_ITERATIONS>(&[ONE, ONE], u128::MAX),
		Err(MathError::Overflow)
	);
}

#[test]
fn test_d_should_satisfy_invariant_equation() {
	let reserves = [5 * ONE, 3 * ONE];
	let d = calculate_d::<D_ITERATIONS>(&reserves, AMPLIFICATION).unwrap();

	assert!(stable_swap_equation(d, AMPLIFICATION, &reserves, 2));
	assert!(!stable_swap_equation(d + ONE / 1000, AMPLIFICATION, &reserves, 2));
}

#[test]
fn test_y() {
	let d = calculate_d::<D_ITERATIONS>(&[1000u128, 2000u128], 1).unwrap();

	assert_eq!(calculate_y::<Y_ITERATIONS>(1100u128, d, 1), Ok(1876u128));
}

#[test]
fn test_y_should_round_up() {
	let reserves = [ONE, 2 * ONE];
	let d = calculate_d::<D_ITERATIONS>(&reserves, AMPLIFICATION).unwrap();

	let y = calculate_y::<Y_ITERATIONS>(reserves[0], d, AMPLIFICATION).unwrap();

	assert!(y >= reserves[1]);
	assert_approx_eq!(y, reserves[1], 4u128);
}

#[test]
fn test_y_with_zero_reserve() {
	assert_eq!(calculate_y::<Y_ITERATIONS>(0u128, 2000u128, 1), Err(MathError::ZeroReserve));
	assert_eq!(calculate_y::<Y_ITERATIONS>(1000u128, 0u128, 1), Ok(0u128));
}

#[test]
fn test_out_given_in() {
	assert_eq!(
		calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(1000u128, 2000u128, 100u128, 1),
		Ok(124u128)
	);
}

#[test]
fn out_given_in_should_match_reference_trade_on_balanced_pool() {
	let amount_out = calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(ONE, ONE, ONE, AMPLIFICATION).unwrap();

	assert_eq!(amount_out, 999784880549859639u128);
	assert_approx_eq!(amount_out, 999_785_325_996_316_875u128, ONE / 1_000_000);
}

#[test]
fn out_given_in_should_be_symmetric_on_balanced_pool() {
	let reserves = [100 * ONE, 100 * ONE];
	let a = calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(reserves[0], reserves[1], 7 * ONE, AMPLIFICATION);
	let b = calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(reserves[1], reserves[0], 7 * ONE, AMPLIFICATION);

	assert_eq!(a, b);
}

#[test]
fn out_given_in_should_return_zero_when_amount_is_zero() {
	assert_eq!(
		calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(ONE, ONE, 0u128, AMPLIFICATION),
		Ok(0u128)
	);
}

#[test]
fn out_given_in_should_fail_when_a_reserve_is_empty() {
	assert_eq!(
		calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(0u128, ONE, ONE, AMPLIFICATION),
		Err(MathError::ZeroReserve)
	);
	assert_eq!(
		calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(ONE, 0u128, ONE, AMPLIFICATION),
		Err(MathError::ZeroReserve)
	);
}

#[test]
fn out_given_in_should_never_drain_output_reserve() {
	let reserve_out = 10 * ONE;
	let amount_out =
		calculate_out_given_in::<D_ITERATIONS, Y_ITERATIONS>(10 * ONE, reserve_out, 1_000_000 * ONE, AMPLIFICATION)
			.unwrap();

	assert!(amount_out < reserve_out);
}

#[test]
fn pool_value_should_equal_d() {
	let reserves = [3 * ONE, 2 * ONE];
	assert_eq!(
		calculate_pool_value::<D_ITERATIONS>(&reserves, AMPLIFICATION),
		calculate_d::<D_ITERATIONS>(&reserves, AMPLIFICATION)
	);
}

#[test]
fn pool_value_should_not_drop_when_empty_side_receives_first_unit() {
	assert_eq!(calculate_pool_value::<D_ITERATIONS>(&[ONE, 0u128], AMPLIFICATION), Ok(ONE));
	assert_eq!(calculate_pool_value::<D_ITERATIONS>(&[ONE, 1u128], AMPLIFICATION), Ok(ONE));
	assert_eq!(calculate_pool_value::<D_ITERATIONS>(&[1u128, ONE], AMPLIFICATION), Ok(ONE));
}

#[test]
fn d_rounded_down_should_keep_exact_root() {
	assert_eq!(
		calculate_d_rounded_down::<D_ITERATIONS>(&[ONE, ONE], AMPLIFICATION),
		Ok(2 * ONE)
	);
	assert_eq!(
		calculate_d_rounded_down::<D_ITERATIONS>(&[2 * ONE, 2 * ONE], AMPLIFICATION),
		Ok(4 * ONE)
	);
	assert_eq!(calculate_d_rounded_down::<D_ITERATIONS>(&[ONE, 0u128], AMPLIFICATION), Ok(ONE));
}

#[test]
fn d_rounded_down_should_step_below_overshooting_estimate() {
	let reserves = [142_857_142_857_142_857u128, 1_666_666_666_666_666_666u128];

	assert_eq!(calculate_d::<D_ITERATIONS>(&reserves, 10), Ok(1_719_132_388_264_109_105u128));
	assert_eq!(
		calculate_d_rounded_down::<D_ITERATIONS>(&reserves, 10),
		Ok(1_719_132_388_264_109_104u128)
	);
}

#[test]
fn ratio_split_should_fail_when_value_exceeds_pool() {
	let reserves = [ONE, ONE];
	let d = calculate_d::<D_ITERATIONS>(&reserves, AMPLIFICATION).unwrap();

	assert_eq!(
		calculate_ratio_split::<D_ITERATIONS, Y_ITERATIONS>(
			d + 1,
			sp_arithmetic::FixedU128::from_rational(1, 2),
			&reserves,
			AMPLIFICATION
		),
		Err(MathError::ExcessWithdrawal)
	);
}

#[test]
fn ratio_split_should_return_zero_amounts_when_value_is_zero() {
	assert_eq!(
		calculate_ratio_split::<D_ITERATIONS, Y_ITERATIONS>(
			0u128,
			sp_arithmetic::FixedU128::from_rational(1, 3),
			&[ONE, ONE],
			AMPLIFICATION
		),
		Ok((0u128, 0u128))
	);
}

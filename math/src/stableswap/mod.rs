mod math;
mod shares;

#[cfg(test)]
pub mod tests;

pub mod types;

use crate::types::Balance;
pub use math::*;
use primitive_types::U512;
pub use shares::*;

/// Checks that `d` satisfies the two-asset invariant for `reserves` (common units), allowing `d` to be
/// off by `tolerance` units.
pub fn stable_swap_equation(d: Balance, amplification: Balance, reserves: &[Balance; 2], tolerance: Balance) -> bool {
	let nn = U512::from(4u128);
	let amp = U512::from(amplification);
	let d = U512::from(d);
	let sum = U512::from(reserves[0]) + U512::from(reserves[1]);

	// A·n^n·S + D == A·n^n·D + D^3 / (n^n·x0·x1)
	let side1 = amp * nn * sum + d;
	let denom = nn * U512::from(reserves[0]) * U512::from(reserves[1]);
	if denom.is_zero() {
		return false;
	}
	let side2 = amp * nn * d + d * d * d / denom;

	// an error of one unit in D moves the two sides apart by the derivative of side2 - side1
	let slope = amp * nn + U512::from(3u128) * d * d / denom + U512::one();
	let diff = if side1 >= side2 { side1 - side2 } else { side2 - side1 };
	diff <= U512::from(tolerance) * slope
}

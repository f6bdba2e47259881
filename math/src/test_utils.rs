// ----- Macros

/// Asserts that two expressions `$x` and `$y` are approximately equal to each other up to a delta `$z`.
#[macro_export]
macro_rules! assert_approx_eq {
	($x:expr, $y:expr, $z:expr) => {{
		assert_approx_eq!($x, $y, $z, "values are not approximately equal");
	}};
	($x:expr, $y:expr, $z:expr, $r:expr) => {{
		let diff = if $x >= $y {
			$x.clone() - $y.clone()
		} else {
			$y.clone() - $x.clone()
		};
		assert!(
			diff <= $z,
			"\n{}\n    left: {:?}\n   right: {:?}\n    diff: {:?}\nmax_diff: {:?}\n",
			$r,
			$x,
			$y,
			diff,
			$z
		);
	}};
}
pub(crate) use assert_approx_eq;

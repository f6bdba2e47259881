mod invariants;
mod two_assets;

use crate::types::Balance;

pub(crate) const ONE: Balance = crate::types::ONE;
pub(crate) const AMPLIFICATION: Balance = 5_400_000;
const D_ITERATIONS: u8 = 255;
const Y_ITERATIONS: u8 = 255;

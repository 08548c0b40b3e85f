//! Arbitrary-precision factorial used as the expensive function

use std::fmt;
use std::sync::Arc;

/// Each limb holds nine decimal digits
const LIMB_BASE: u64 = 1_000_000_000;

/// `n!` stored as little-endian base-10^9 limbs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factorial {
    n: u64,
    limbs: Vec<u32>,
}

impl Factorial {
    /// Compute `n!`
    pub fn compute(n: u64) -> Self {
        let mut limbs = vec![1u32];

        for factor in 2..=n {
            let mut carry = 0u64;
            for limb in limbs.iter_mut() {
                let product = u64::from(*limb) * factor + carry;
                *limb = (product % LIMB_BASE) as u32;
                carry = product / LIMB_BASE;
            }
            while carry > 0 {
                limbs.push((carry % LIMB_BASE) as u32);
                carry /= LIMB_BASE;
            }
        }

        Self { n, limbs }
    }

    /// Argument the factorial was computed for
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Number of decimal digits
    pub fn digits(&self) -> usize {
        let top = self.limbs.last().copied().unwrap_or(0);
        let top_digits = top.checked_ilog10().map_or(1, |d| d as usize + 1);
        (self.limbs.len() - 1) * 9 + top_digits
    }
}

impl fmt::Display for Factorial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut limbs = self.limbs.iter().rev();
        if let Some(top) = limbs.next() {
            write!(f, "{}", top)?;
        }
        for limb in limbs {
            write!(f, "{:09}", limb)?;
        }
        Ok(())
    }
}

/// Compute function handed to the cache; the result is shared, not copied
pub fn factorial(n: &u64) -> Arc<Factorial> {
    Arc::new(Factorial::compute(*n))
}

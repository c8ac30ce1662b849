//! Office id assignment. Synthetic, so it is injected rather than global.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lowest office id (inclusive)
pub const OFFICE_ID_MIN: u16 = 100;
/// Highest office id (exclusive)
pub const OFFICE_ID_MAX: u16 = 999;

pub trait OfficeIdSource {
    fn next_office_id(&mut self) -> u16;
}

/// Uniform draws from `[OFFICE_ID_MIN, OFFICE_ID_MAX)`.
pub struct RandomOffices {
    rng: StdRng,
}

impl RandomOffices {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, fresh entropy otherwise
    pub fn from_config(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self {
                rng: StdRng::from_entropy(),
            },
        }
    }
}

impl OfficeIdSource for RandomOffices {
    fn next_office_id(&mut self) -> u16 {
        self.rng.gen_range(OFFICE_ID_MIN..OFFICE_ID_MAX)
    }
}

/// Always the same office; for tests and fixed exports.
pub struct FixedOffice(pub u16);

impl OfficeIdSource for FixedOffice {
    fn next_office_id(&mut self) -> u16 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomOffices::seeded(7);
        let mut b = RandomOffices::seeded(7);
        let xs: Vec<u16> = (0..50).map(|_| a.next_office_id()).collect();
        let ys: Vec<u16> = (0..50).map(|_| b.next_office_id()).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| (OFFICE_ID_MIN..OFFICE_ID_MAX).contains(&x)));
    }
}

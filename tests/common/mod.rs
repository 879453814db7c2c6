use ark_ff::{Field, One, Zero};
use plonk_backend::{Assignment, CircuitDefinition, ConstraintSystem, Result, ScalarField};
use tracing_subscriber::EnvFilter;

// Install a test-friendly subscriber once; `RUST_LOG=debug` shows the rounds
#[allow(dead_code)]
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// x³ + x + 5 = y with y public and x secret
pub(crate) struct Cubic;

impl CircuitDefinition for Cubic {
    fn define<F: ScalarField>(&self) -> Result<ConstraintSystem<F>> {
        let mut cs = ConstraintSystem::new();
        let y = cs.public_input("y");
        let x = cs.secret_input("x");
        let x2 = cs.internal();
        let x3 = cs.internal();
        cs.mul(x, x, x2);
        cs.mul(x2, x, x3);
        cs.add_gate(
            x3,
            x,
            y,
            F::zero(),
            F::one(),
            F::one(),
            -F::one(),
            F::from_u64(5),
        );
        Ok(cs)
    }
}

#[allow(dead_code)]
pub(crate) fn cubic_public(y: u64) -> Assignment {
    Assignment::new().public("y", y)
}

#[allow(dead_code)]
pub(crate) fn cubic_full(y: u64, x: u64) -> Assignment {
    Assignment::new().public("y", y).secret("x", x)
}

// Public x decomposed into `bits` secret booleans:
// b_i ∈ {0, 1} and Σ 2^i b_i = x
#[allow(dead_code)]
pub(crate) struct BitDecomposition {
    pub bits: usize,
}

impl CircuitDefinition for BitDecomposition {
    fn define<F: ScalarField>(&self) -> Result<ConstraintSystem<F>> {
        let mut cs = ConstraintSystem::new();
        let x = cs.public_input("x");
        let bits: Vec<_> = (0..self.bits)
            .map(|i| cs.secret_input(&format!("b{}", i)))
            .collect();

        for &b in &bits {
            cs.boolean(b);
        }

        let mut acc = bits[0];
        let mut power = F::one();
        for &b in &bits[1..] {
            power.double_in_place();
            let next = cs.internal();
            cs.add_scaled(acc, b, power, next);
            acc = next;
        }
        cs.assert_equal(acc, x);
        Ok(cs)
    }
}

#[allow(dead_code)]
impl BitDecomposition {
    // Honest assignment for x < 2^bits
    pub(crate) fn assignment(&self, x: u64) -> Assignment {
        self.assignment_with_bits(x, (0..self.bits).map(|i| (x >> i) & 1).collect())
    }

    pub(crate) fn assignment_with_bits(&self, x: u64, bits: Vec<u64>) -> Assignment {
        bits.into_iter()
            .enumerate()
            .fold(Assignment::new().public("x", x), |a, (i, b)| {
                a.secret(&format!("b{}", i), b)
            })
    }

    pub(crate) fn public(&self, x: u64) -> Assignment {
        Assignment::new().public("x", x)
    }
}

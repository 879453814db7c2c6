//! Constraint System Definition
//!
//! Defines the structure of PLONK circuits: variables, gates and their wiring.
//!
//! Variables are numbered as wire indices in three consecutive ranges:
//! public inputs `[0, nb_public)`, secret inputs `[nb_public, nb_public + nb_secret)`
//! and internal wires after that. Gate `i < nb_public` is always the
//! public-input gate for public variable `i`.

use ark_ff::Field;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Wire positions within a gate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
    /// Left input wire
    A,
    /// Right input wire
    B,
    /// Output wire
    C,
}

/// A wire slot in the circuit: one of the three positions of a gate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire {
    /// Gate index
    pub gate: usize,
    /// Wire type (A, B, or C)
    pub wire_type: WireType,
}

impl Wire {
    pub fn new(gate: usize, wire_type: WireType) -> Self {
        Wire { gate, wire_type }
    }

    /// Convert to linear index in the wire vector
    /// For n gates: a wires are [0, n-1], b wires are [n, 2n-1], c wires are [2n, 3n-1]
    pub fn to_index(&self, n: usize) -> usize {
        match self.wire_type {
            WireType::A => self.gate,
            WireType::B => n + self.gate,
            WireType::C => 2 * n + self.gate,
        }
    }

    /// Convert from linear index
    pub fn from_index(index: usize, n: usize) -> Self {
        if index < n {
            Wire::new(index, WireType::A)
        } else if index < 2 * n {
            Wire::new(index - n, WireType::B)
        } else {
            Wire::new(index - 2 * n, WireType::C)
        }
    }
}

/// A circuit variable, resolved to a wire index by the constraint system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    Public(usize),
    Secret(usize),
    Internal(usize),
}

/// A gate in the PLONK circuit
///
/// Constraint: q_M * a * b + q_L * a + q_R * b + q_O * c + q_C = 0
///
/// `a`, `b` and `c` are wire indices into the variable space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Gate<F: Field> {
    /// Multiplication selector
    #[serde(with = "field_hex")]
    pub q_m: F,
    /// Left wire selector
    #[serde(with = "field_hex")]
    pub q_l: F,
    /// Right wire selector
    #[serde(with = "field_hex")]
    pub q_r: F,
    /// Output wire selector
    #[serde(with = "field_hex")]
    pub q_o: F,
    /// Constant selector (qK)
    #[serde(with = "field_hex")]
    pub q_c: F,

    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl<F: Field> Gate<F> {
    /// Evaluate the gate expression on concrete wire values
    pub fn evaluate(&self, a: F, b: F, c: F) -> F {
        self.q_m * a * b + self.q_l * a + self.q_r * b + self.q_o * c + self.q_c
    }

    /// Check if the gate constraint is satisfied by `values` (indexed by wire)
    pub fn is_satisfied(&self, values: &[F]) -> bool {
        match (values.get(self.a), values.get(self.b), values.get(self.c)) {
            (Some(a), Some(b), Some(c)) => self.evaluate(*a, *b, *c).is_zero(),
            _ => false,
        }
    }

    /// Get the constraint as a string
    pub fn constraint_string(&self) -> String {
        let mut terms = Vec::new();

        if !self.q_m.is_zero() {
            terms.push(format!("{}·w{}·w{}", format_coeff(&self.q_m), self.a, self.b));
        }
        if !self.q_l.is_zero() {
            terms.push(format!("{}·w{}", format_coeff(&self.q_l), self.a));
        }
        if !self.q_r.is_zero() {
            terms.push(format!("{}·w{}", format_coeff(&self.q_r), self.b));
        }
        if !self.q_o.is_zero() {
            terms.push(format!("{}·w{}", format_coeff(&self.q_o), self.c));
        }
        if !self.q_c.is_zero() {
            terms.push(format_coeff(&self.q_c));
        }

        if terms.is_empty() {
            "0 = 0".to_string()
        } else {
            format!("{} = 0", terms.join(" + "))
        }
    }
}

fn format_coeff<F: Field>(f: &F) -> String {
    if f.is_one() {
        "1".to_string()
    } else if (-*f).is_one() {
        "-1".to_string()
    } else {
        f.to_string()
    }
}

/// Gate description before variables are resolved to wire indices
#[derive(Clone, Debug, PartialEq, Eq)]
struct GateSpec<F: Field> {
    selectors: [F; 5],
    wires: [Variable; 3],
}

/// The complete constraint system
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintSystem<F: Field> {
    /// Public input names, in wire order
    pub public_names: Vec<String>,
    /// Secret input names, in wire order
    pub secret_names: Vec<String>,
    /// Number of internal (solver-computed) wires
    pub nb_internal: usize,
    gates: Vec<GateSpec<F>>,
}

impl<F: Field> ConstraintSystem<F> {
    /// Create a new empty constraint system
    pub fn new() -> Self {
        ConstraintSystem {
            public_names: Vec::new(),
            secret_names: Vec::new(),
            nb_internal: 0,
            gates: Vec::new(),
        }
    }

    /// Declare a public input. Its public-input gate is created automatically.
    pub fn public_input(&mut self, name: &str) -> Variable {
        self.public_names.push(name.to_string());
        Variable::Public(self.public_names.len() - 1)
    }

    /// Declare a secret input
    pub fn secret_input(&mut self, name: &str) -> Variable {
        self.secret_names.push(name.to_string());
        Variable::Secret(self.secret_names.len() - 1)
    }

    /// Allocate an internal wire, solved from the gates
    pub fn internal(&mut self) -> Variable {
        self.nb_internal += 1;
        Variable::Internal(self.nb_internal - 1)
    }

    pub fn nb_public(&self) -> usize {
        self.public_names.len()
    }

    pub fn nb_secret(&self) -> usize {
        self.secret_names.len()
    }

    /// Total number of wires (variables)
    pub fn nb_wires(&self) -> usize {
        self.nb_public() + self.nb_secret() + self.nb_internal
    }

    /// Number of gates including the public-input gates
    pub fn nb_gates(&self) -> usize {
        self.nb_public() + self.gates.len()
    }

    /// Resolve a variable to its wire index
    pub fn wire_index(&self, var: Variable) -> usize {
        match var {
            Variable::Public(i) => i,
            Variable::Secret(i) => self.nb_public() + i,
            Variable::Internal(i) => self.nb_public() + self.nb_secret() + i,
        }
    }

    /// Add a gate q_M·a·b + q_L·a + q_R·b + q_O·c + q_C = 0
    #[allow(clippy::too_many_arguments)]
    pub fn add_gate(
        &mut self,
        a: Variable,
        b: Variable,
        c: Variable,
        q_m: F,
        q_l: F,
        q_r: F,
        q_o: F,
        q_c: F,
    ) -> usize {
        self.gates.push(GateSpec {
            selectors: [q_m, q_l, q_r, q_o, q_c],
            wires: [a, b, c],
        });
        self.nb_gates() - 1
    }

    /// Multiplication gate: a * b = c
    pub fn mul(&mut self, a: Variable, b: Variable, c: Variable) -> usize {
        self.add_gate(a, b, c, F::one(), F::zero(), F::zero(), -F::one(), F::zero())
    }

    /// Addition gate: a + b = c
    pub fn add(&mut self, a: Variable, b: Variable, c: Variable) -> usize {
        self.add_gate(a, b, c, F::zero(), F::one(), F::one(), -F::one(), F::zero())
    }

    /// Scaled addition gate: a + k*b = c
    pub fn add_scaled(&mut self, a: Variable, b: Variable, k: F, c: Variable) -> usize {
        self.add_gate(a, b, c, F::zero(), F::one(), k, -F::one(), F::zero())
    }

    /// Booleanity gate: a * a - a = 0
    pub fn boolean(&mut self, a: Variable) -> usize {
        self.add_gate(a, a, a, F::one(), -F::one(), F::zero(), F::zero(), F::zero())
    }

    /// Equality gate: a - b = 0
    pub fn assert_equal(&mut self, a: Variable, b: Variable) -> usize {
        self.add_gate(a, b, a, F::zero(), F::one(), -F::one(), F::zero(), F::zero())
    }

    /// Constant gate: c = value
    pub fn constant(&mut self, c: Variable, value: F) -> usize {
        self.add_gate(c, c, c, F::zero(), F::zero(), F::zero(), -F::one(), value)
    }

    /// All gates with resolved wire indices: the public-input gates
    /// (q_L = 1, a = public wire i) followed by the declared gates.
    pub fn gates(&self) -> Vec<Gate<F>> {
        let public = (0..self.nb_public()).map(|i| Gate {
            q_m: F::zero(),
            q_l: F::one(),
            q_r: F::zero(),
            q_o: F::zero(),
            q_c: F::zero(),
            a: i,
            b: i,
            c: i,
        });
        let declared = self.gates.iter().map(|g| {
            let [q_m, q_l, q_r, q_o, q_c] = g.selectors;
            Gate {
                q_m,
                q_l,
                q_r,
                q_o,
                q_c,
                a: self.wire_index(g.wires[0]),
                b: self.wire_index(g.wires[1]),
                c: self.wire_index(g.wires[2]),
            }
        });
        public.chain(declared).collect()
    }

    /// Check that every gate references declared variables
    pub fn check(&self) -> Result<()> {
        for (i, g) in self.gates.iter().enumerate() {
            for var in g.wires {
                let in_range = match var {
                    Variable::Public(j) => j < self.nb_public(),
                    Variable::Secret(j) => j < self.nb_secret(),
                    Variable::Internal(j) => j < self.nb_internal,
                };
                if !in_range {
                    return Err(Error::AssignmentMismatch(format!(
                        "gate {} references undeclared variable {:?}",
                        self.nb_public() + i,
                        var
                    )));
                }
            }
        }
        Ok(())
    }

    /// Compute every wire value from the public and secret inputs.
    ///
    /// Internal wires are solved gate by gate: a gate with exactly one unknown
    /// wire, appearing linearly, determines it. The result is not checked
    /// against the gates; that is the prover's job.
    pub fn solve(&self, inputs: &[F]) -> Result<Vec<F>> {
        self.check()?;
        let nb_inputs = self.nb_public() + self.nb_secret();
        if inputs.len() != nb_inputs {
            return Err(Error::AssignmentMismatch(format!(
                "expected {} input values, got {}",
                nb_inputs,
                inputs.len()
            )));
        }

        let mut values: Vec<Option<F>> = inputs.iter().copied().map(Some).collect();
        values.resize(self.nb_wires(), None);
        let gates = self.gates();

        let mut progress = true;
        while progress {
            progress = false;
            for gate in &gates {
                if let Some((wire, value)) = solve_gate(gate, &values) {
                    values[wire] = Some(value);
                    progress = true;
                }
            }
        }

        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| v.ok_or(Error::UnsolvedWire(i)))
            .collect()
    }

    /// Check if all gate constraints are satisfied.
    ///
    /// Public-input gate `i` carries the extra term `-values[i]`, matching the
    /// public-input polynomial the prover adds.
    pub fn is_satisfied(&self, values: &[F]) -> bool {
        if values.len() < self.nb_wires() {
            return false;
        }
        let nb_public = self.nb_public();
        self.gates().iter().enumerate().all(|(i, g)| {
            if i < nb_public {
                (g.evaluate(values[g.a], values[g.b], values[g.c]) - values[i]).is_zero()
            } else {
                g.is_satisfied(values)
            }
        })
    }
}

impl<F: Field> Default for ConstraintSystem<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// If exactly one wire of the gate is unknown and the gate is linear in it,
/// return that wire and its value.
fn solve_gate<F: Field>(gate: &Gate<F>, values: &[Option<F>]) -> Option<(usize, F)> {
    let mut unknown = None;
    for w in [gate.a, gate.b, gate.c] {
        if values[w].is_none() {
            match unknown {
                None => unknown = Some(w),
                Some(u) if u == w => {}
                Some(_) => return None,
            }
        }
    }
    let w = unknown?;

    let at = |x: F| {
        let get = |i: usize| if i == w { x } else { values[i].unwrap_or_else(F::zero) };
        gate.evaluate(get(gate.a), get(gate.b), get(gate.c))
    };

    if gate.a == w && gate.b == w && !gate.q_m.is_zero() {
        return None;
    }

    // g(x) = g(0) + slope * x
    let g0 = at(F::zero());
    let slope = at(F::one()) - g0;
    let slope_inv = slope.inverse()?;
    Some((w, -g0 * slope_inv))
}

/// Serde helpers for field elements as big-endian hex strings
mod field_hex {
    use ark_ff::Field;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<F: Field, S: Serializer>(f: &F, serializer: S) -> Result<S::Ok, S::Error> {
        let mut bytes = Vec::new();
        f.serialize_compressed(&mut bytes)
            .map_err(serde::ser::Error::custom)?;
        bytes.reverse();
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, F: Field, D: Deserializer<'de>>(deserializer: D) -> Result<F, D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut bytes = hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(D::Error::custom)?;
        bytes.reverse();
        F::deserialize_compressed(&bytes[..]).map_err(D::Error::custom)
    }
}

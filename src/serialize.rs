//! Raw encodings of [`PublicData`] and [`Proof`].
//!
//! Both artifacts are written with `ark-serialize` in compressed form behind a
//! fixed header:
//!
//! ```text
//! magic "PLNK" | version u8 | kind u8 | curve tag u8 | scheme tag u8 | body
//! ```
//!
//! PublicData body: `n`, `nb_public` (u64 LE), k1, k2, the transcript label
//! (u64 length + bytes), the eight preprocessed polynomials in verifying-key
//! order (u64 length + coefficients), the eight commitments in the same order,
//! and the commitment scheme instance.
//!
//! Proof body: L, R, O, Z, H_lo, H_mid, H_hi commitments, the sixteen
//! evaluations and the sixteen openings. The shape is fixed, so nothing is
//! length-prefixed.
//!
//! Readers never allocate ahead of the data actually present, and reject
//! trailing bytes.

use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};

use crate::commitment::CommitmentScheme;
use crate::curve::CurveId;
use crate::error::{Error, Result};
use crate::fft::Domain;
use crate::field::ScalarField;
use crate::plonk::{coset_shifts, setup::MIN_DOMAIN_SIZE};
use crate::plonk::{Proof, ProofEvaluations, PublicData, VerifyingKey, NB_OPENINGS};
use crate::polynomial::Polynomial;

/// First four bytes of every encoded artifact
pub const MAGIC: [u8; 4] = *b"PLNK";

/// Current encoding version
pub const FORMAT_VERSION: u8 = 1;

/// Size of the fixed header
pub const HEADER_LEN: usize = 8;

/// Longest accepted transcript label
pub const MAX_LABEL_LEN: usize = 1024;

/// Which artifact an encoding holds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ArtifactKind {
    PublicData = 1,
    Proof = 2,
}

impl TryFrom<u8> for ArtifactKind {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(ArtifactKind::PublicData),
            2 => Ok(ArtifactKind::Proof),
            _ => Err(Error::MalformedData(format!("unknown artifact kind {}", tag))),
        }
    }
}

/// Decoded header of an encoded artifact
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub kind: ArtifactKind,
    pub curve: CurveId,
    pub scheme: u8,
}

impl Header {
    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.push(FORMAT_VERSION);
        out.push(self.kind as u8);
        out.push(self.curve.tag());
        out.push(self.scheme);
    }
}

/// Parse the header of an encoded artifact.
///
/// Used to route an encoding to the right instantiation before decoding it.
pub fn read_header(bytes: &[u8]) -> Result<Header> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::MalformedData(format!(
            "{} bytes is too short for a header",
            bytes.len()
        )));
    }
    if bytes[..4] != MAGIC {
        return Err(Error::MalformedData("bad magic".to_string()));
    }
    if bytes[4] != FORMAT_VERSION {
        return Err(Error::MalformedData(format!(
            "unsupported format version {}",
            bytes[4]
        )));
    }
    Ok(Header {
        kind: ArtifactKind::try_from(bytes[5])?,
        curve: CurveId::try_from(bytes[6])?,
        scheme: bytes[7],
    })
}

fn encode<T: CanonicalSerialize>(header: Header, body: &T) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_LEN + body.compressed_size());
    header.write(&mut out);
    body.serialize_compressed(&mut out)?;
    Ok(out)
}

fn decode<F, S, T>(bytes: &[u8], kind: ArtifactKind) -> Result<T>
where
    F: ScalarField,
    S: CommitmentScheme<F>,
    T: CanonicalDeserialize,
{
    let header = read_header(bytes)?;
    if header.kind != kind {
        return Err(Error::MalformedData(format!(
            "expected {:?}, found {:?}",
            kind, header.kind
        )));
    }
    if header.curve != F::CURVE {
        return Err(Error::UnsupportedInstantiation(format!(
            "encoded for {}, decoding as {}",
            header.curve,
            F::CURVE
        )));
    }
    if header.scheme != S::SCHEME_ID {
        return Err(Error::UnsupportedInstantiation(format!(
            "encoded with scheme tag {}, decoding as {}",
            header.scheme,
            S::NAME
        )));
    }

    let mut body = &bytes[HEADER_LEN..];
    let value = T::deserialize_compressed(&mut body)?;
    if !body.is_empty() {
        return Err(Error::MalformedData(format!(
            "{} trailing bytes",
            body.len()
        )));
    }
    Ok(value)
}

impl<F: ScalarField, S: CommitmentScheme<F>> PublicData<F, S> {
    /// Encode with header
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode(
            Header {
                kind: ArtifactKind::PublicData,
                curve: F::CURVE,
                scheme: S::SCHEME_ID,
            },
            self,
        )
    }

    /// Decode an encoding produced by [`PublicData::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode::<F, S, _>(bytes, ArtifactKind::PublicData)
    }
}

impl<F: ScalarField, S: CommitmentScheme<F>> Proof<F, S> {
    /// Encode with header
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode(
            Header {
                kind: ArtifactKind::Proof,
                curve: F::CURVE,
                scheme: S::SCHEME_ID,
            },
            self,
        )
    }

    /// Decode an encoding produced by [`Proof::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode::<F, S, _>(bytes, ArtifactKind::Proof)
    }
}

type SerResult<T> = std::result::Result<T, SerializationError>;

fn write_poly<F: ScalarField, W: Write>(
    poly: &Polynomial<F>,
    mut writer: W,
    compress: Compress,
) -> SerResult<()> {
    (poly.coeffs.len() as u64).serialize_with_mode(&mut writer, compress)?;
    for c in &poly.coeffs {
        c.serialize_with_mode(&mut writer, compress)?;
    }
    Ok(())
}

fn poly_size<F: ScalarField>(poly: &Polynomial<F>, compress: Compress) -> usize {
    8 + poly
        .coeffs
        .iter()
        .map(|c| c.serialized_size(compress))
        .sum::<usize>()
}

fn read_poly<F: ScalarField, R: Read>(
    mut reader: R,
    compress: Compress,
    validate: Validate,
    max_len: usize,
) -> SerResult<Polynomial<F>> {
    let len = u64::deserialize_with_mode(&mut reader, compress, validate)?;
    if len > max_len as u64 {
        return Err(SerializationError::InvalidData);
    }
    let mut coeffs = Vec::new();
    for _ in 0..len {
        coeffs.push(F::deserialize_with_mode(&mut reader, compress, validate)?);
    }
    Ok(Polynomial::from_coeffs(coeffs))
}

fn read_array<T: CanonicalDeserialize, R: Read, const N: usize>(
    mut reader: R,
    compress: Compress,
    validate: Validate,
) -> SerResult<[T; N]> {
    let mut items = Vec::with_capacity(N);
    for _ in 0..N {
        items.push(T::deserialize_with_mode(&mut reader, compress, validate)?);
    }
    items.try_into().map_err(|_| SerializationError::InvalidData)
}

impl<F: ScalarField, S: CommitmentScheme<F>> CanonicalSerialize for PublicData<F, S> {
    fn serialize_with_mode<W: Write>(&self, mut writer: W, compress: Compress) -> SerResult<()> {
        (self.n() as u64).serialize_with_mode(&mut writer, compress)?;
        (self.nb_public as u64).serialize_with_mode(&mut writer, compress)?;
        self.k1.serialize_with_mode(&mut writer, compress)?;
        self.k2.serialize_with_mode(&mut writer, compress)?;
        self.transcript_label
            .serialize_with_mode(&mut writer, compress)?;
        for poly in self.polynomials() {
            write_poly(poly, &mut writer, compress)?;
        }
        for c in self.vk.commitments() {
            c.serialize_with_mode(&mut writer, compress)?;
        }
        self.scheme.serialize_with_mode(&mut writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        16 + self.k1.serialized_size(compress)
            + self.k2.serialized_size(compress)
            + self.transcript_label.serialized_size(compress)
            + self
                .polynomials()
                .iter()
                .map(|p| poly_size(p, compress))
                .sum::<usize>()
            + self
                .vk
                .commitments()
                .iter()
                .map(|c| c.serialized_size(compress))
                .sum::<usize>()
            + self.scheme.serialized_size(compress)
    }
}

impl<F: ScalarField, S: CommitmentScheme<F>> Valid for PublicData<F, S> {
    fn check(&self) -> SerResult<()> {
        let n = self.n();
        if self.nb_public > n || (self.k1, self.k2) != coset_shifts::<F>() {
            return Err(SerializationError::InvalidData);
        }
        if self.polynomials().iter().any(|p| p.coeffs.len() > n) {
            return Err(SerializationError::InvalidData);
        }
        Ok(())
    }
}

impl<F: ScalarField, S: CommitmentScheme<F>> CanonicalDeserialize for PublicData<F, S> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> SerResult<Self> {
        let n = u64::deserialize_with_mode(&mut reader, compress, validate)?;
        let nb_public = u64::deserialize_with_mode(&mut reader, compress, validate)?;
        if !n.is_power_of_two() || n < MIN_DOMAIN_SIZE as u64 || nb_public > n {
            return Err(SerializationError::InvalidData);
        }
        let domain =
            Domain::<F>::new(n as usize).map_err(|_| SerializationError::InvalidData)?;
        let n = domain.size();

        let k1 = F::deserialize_with_mode(&mut reader, compress, validate)?;
        let k2 = F::deserialize_with_mode(&mut reader, compress, validate)?;

        let label_len = u64::deserialize_with_mode(&mut reader, compress, validate)?;
        if label_len > MAX_LABEL_LEN as u64 {
            return Err(SerializationError::InvalidData);
        }
        let mut transcript_label = vec![0u8; label_len as usize];
        reader.read_exact(&mut transcript_label)?;

        let mut polys = Vec::with_capacity(8);
        for _ in 0..8 {
            polys.push(read_poly::<F, _>(&mut reader, compress, validate, n)?);
        }
        let [q_l, q_r, q_m, q_o, q_k, s1, s2, s3]: [Polynomial<F>; 8] =
            polys.try_into().map_err(|_| SerializationError::InvalidData)?;
        let commitments = read_array::<S::Commitment, _, 8>(&mut reader, compress, validate)?;
        let scheme = S::deserialize_with_mode(&mut reader, compress, validate)?;

        let public_data = PublicData {
            domain,
            nb_public: nb_public as usize,
            k1,
            k2,
            transcript_label,
            q_l,
            q_r,
            q_m,
            q_o,
            q_k,
            s1,
            s2,
            s3,
            vk: VerifyingKey::from_commitments(commitments),
            scheme,
        };
        if validate == Validate::Yes {
            public_data.check()?;
        }
        Ok(public_data)
    }
}

impl<F: ScalarField, S: CommitmentScheme<F>> CanonicalSerialize for Proof<F, S> {
    fn serialize_with_mode<W: Write>(&self, mut writer: W, compress: Compress) -> SerResult<()> {
        for c in [&self.l, &self.r, &self.o, &self.z, &self.h[0], &self.h[1], &self.h[2]] {
            c.serialize_with_mode(&mut writer, compress)?;
        }
        for e in self.evaluations.to_array() {
            e.serialize_with_mode(&mut writer, compress)?;
        }
        for opening in &self.openings {
            opening.serialize_with_mode(&mut writer, compress)?;
        }
        Ok(())
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        [&self.l, &self.r, &self.o, &self.z, &self.h[0], &self.h[1], &self.h[2]]
            .iter()
            .map(|c| c.serialized_size(compress))
            .sum::<usize>()
            + NB_OPENINGS * F::zero().serialized_size(compress)
            + self
                .openings
                .iter()
                .map(|o| o.serialized_size(compress))
                .sum::<usize>()
    }
}

impl<F: ScalarField, S: CommitmentScheme<F>> Valid for Proof<F, S> {
    fn check(&self) -> SerResult<()> {
        Ok(())
    }
}

impl<F: ScalarField, S: CommitmentScheme<F>> CanonicalDeserialize for Proof<F, S> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> SerResult<Self> {
        let [l, r, o, z, h_lo, h_mid, h_hi] =
            read_array::<S::Commitment, _, 7>(&mut reader, compress, validate)?;
        let evaluations = read_array::<F, _, NB_OPENINGS>(&mut reader, compress, validate)?;
        let openings = read_array::<S::OpeningProof, _, NB_OPENINGS>(&mut reader, compress, validate)?;

        Ok(Proof {
            l,
            r,
            o,
            z,
            h: [h_lo, h_mid, h_hi],
            evaluations: ProofEvaluations::from_array(evaluations),
            openings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Assignment, ConstraintSystem, Witness};
    use crate::commitment::{InsecureMockScheme, Kzg};
    use crate::plonk::{prove_with_rng, setup};
    use ark_bn254::{Bn254, Fr};
    use ark_ff::{One, Zero};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn square() -> ConstraintSystem<Fr> {
        // x * x = y
        let mut cs = ConstraintSystem::new();
        let y = cs.public_input("y");
        let x = cs.secret_input("x");
        cs.mul(x, x, y);
        cs
    }

    fn artifacts() -> (PublicData<Fr, Kzg<Bn254>>, Proof<Fr, Kzg<Bn254>>) {
        let cs = square();
        let assignment = Assignment::new().public("y", 49u64).secret("x", 7u64);
        let public = Witness::from_public_assignment(&cs, &assignment).unwrap();
        let full = Witness::from_full_assignment(&cs, &assignment).unwrap();

        let pd = setup(&cs, Kzg::setup_from_seed(3, 16), &public).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let proof = prove_with_rng(&cs, &pd, &full, &mut rng).unwrap();
        (pd, proof)
    }

    #[test]
    fn test_round_trip() {
        let (pd, proof) = artifacts();

        let bytes = pd.to_bytes().unwrap();
        assert_eq!(PublicData::from_bytes(&bytes).unwrap(), pd);

        let bytes = proof.to_bytes().unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + proof.compressed_size());
        assert_eq!(Proof::from_bytes(&bytes).unwrap(), proof);
    }

    #[test]
    fn test_header() {
        let (pd, proof) = artifacts();
        let bytes = proof.to_bytes().unwrap();

        assert_eq!(
            read_header(&bytes).unwrap(),
            Header {
                kind: ArtifactKind::Proof,
                curve: CurveId::Bn254,
                scheme: 1,
            }
        );

        // A proof is not public data
        assert!(matches!(
            PublicData::<Fr, Kzg<Bn254>>::from_bytes(&bytes),
            Err(Error::MalformedData(_))
        ));

        let mut bad_magic = pd.to_bytes().unwrap();
        bad_magic[0] ^= 1;
        assert!(matches!(
            PublicData::<Fr, Kzg<Bn254>>::from_bytes(&bad_magic),
            Err(Error::MalformedData(_))
        ));

        let mut bad_version = bytes.clone();
        bad_version[4] = FORMAT_VERSION + 1;
        assert!(matches!(
            Proof::<Fr, Kzg<Bn254>>::from_bytes(&bad_version),
            Err(Error::MalformedData(_))
        ));
    }

    #[test]
    fn test_wrong_instantiation() {
        let (_, proof) = artifacts();
        let bytes = proof.to_bytes().unwrap();

        // Decoding as another curve
        assert!(matches!(
            Proof::<ark_bls12_381::Fr, Kzg<ark_bls12_381::Bls12_381>>::from_bytes(&bytes),
            Err(Error::UnsupportedInstantiation(_))
        ));
        // Decoding as another scheme
        assert!(matches!(
            Proof::<Fr, InsecureMockScheme<Fr>>::from_bytes(&bytes),
            Err(Error::UnsupportedInstantiation(_))
        ));
        // Unknown curve tag
        let mut unknown = bytes.clone();
        unknown[6] = 0x7f;
        assert!(matches!(
            read_header(&unknown),
            Err(Error::UnsupportedInstantiation(_))
        ));
    }

    #[test]
    fn test_truncation_and_trailing_bytes() {
        let (pd, proof) = artifacts();

        for bytes in [pd.to_bytes().unwrap(), proof.to_bytes().unwrap()] {
            for cut in [0, 3, HEADER_LEN, HEADER_LEN + 5, bytes.len() - 1] {
                let truncated = &bytes[..cut];
                assert!(
                    PublicData::<Fr, Kzg<Bn254>>::from_bytes(truncated).is_err()
                        && Proof::<Fr, Kzg<Bn254>>::from_bytes(truncated).is_err()
                );
            }
        }

        let mut extended = proof.to_bytes().unwrap();
        extended.push(0);
        assert!(matches!(
            Proof::<Fr, Kzg<Bn254>>::from_bytes(&extended),
            Err(Error::MalformedData(_))
        ));
    }

    #[test]
    fn test_mock_proof_round_trip() {
        let cs = square();
        let assignment = Assignment::new().public("y", 49u64).secret("x", 7u64);
        let public = Witness::from_public_assignment(&cs, &assignment).unwrap();
        let full = Witness::from_full_assignment(&cs, &assignment).unwrap();

        let pd = setup(&cs, InsecureMockScheme::new(), &public).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let proof = prove_with_rng(&cs, &pd, &full, &mut rng).unwrap();

        // Only the evaluations carry data
        let bytes = proof.to_bytes().unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + NB_OPENINGS * 32);
        assert_eq!(Proof::from_bytes(&bytes).unwrap(), proof);

        let bytes = pd.to_bytes().unwrap();
        assert_eq!(PublicData::from_bytes(&bytes).unwrap(), pd);
    }

    #[test]
    fn test_forged_coset_shift_rejected() {
        let (mut pd, _) = artifacts();
        pd.k1 += Fr::one();
        let bytes = pd.to_bytes().unwrap();
        assert!(matches!(
            PublicData::<Fr, Kzg<Bn254>>::from_bytes(&bytes),
            Err(Error::MalformedData(_))
        ));

        pd.k1 = Fr::zero();
        assert!(pd.check().is_err());
    }
}

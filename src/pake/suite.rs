//! Cipher-suite descriptors and the public step vocabulary.

/// PAKE protocol families.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum PakeAlgorithm {
    /// Password-authenticated key exchange by juggling.
    Jpake,
}

/// The kind of group a PAKE primitive is instantiated over.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrimitiveType {
    /// Elliptic-curve group.
    Ecc,
    /// Finite-field Diffie-Hellman group.
    Dh,
}

/// Families of elliptic curves a primitive can name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum EcFamily {
    /// NIST/SECG prime-order curves (secp*r1).
    SecpR1,
    /// SECG Koblitz curves (secp*k1).
    SecpK1,
    /// Brainpool prime-order curves.
    BrainpoolPR1,
    /// Curve25519/Curve448 family.
    Montgomery,
}

/// Hash algorithms a suite can bind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum HashAlg {
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

/// The group a PAKE runs over, described by kind, family and size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PakePrimitive {
    /// Group kind.
    pub primitive_type: PrimitiveType,
    /// Curve family, meaningful when `primitive_type` is ECC.
    pub family: EcFamily,
    /// Key size in bits.
    pub bits: u16,
}

/// A fully specified PAKE cipher suite.
///
/// The only suite the built-in JPAKE path accepts is
/// ECC / secp256r1 / SHA-256; everything else fails setup with
/// `NotSupported` before any resource is acquired.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CipherSuite {
    /// Protocol family.
    pub algorithm: PakeAlgorithm,
    /// Group to run over.
    pub primitive: PakePrimitive,
    /// Hash bound into the protocol transcript.
    pub hash: HashAlg,
}

impl CipherSuite {
    /// The JPAKE suite over secp256r1 with SHA-256.
    pub const JPAKE_P256_SHA256: Self = Self {
        algorithm: PakeAlgorithm::Jpake,
        primitive: PakePrimitive {
            primitive_type: PrimitiveType::Ecc,
            family: EcFamily::SecpR1,
            bits: 256,
        },
        hash: HashAlg::Sha256,
    };
}

/// The side of the exchange an endpoint plays.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PakeRole {
    /// No role bound yet.
    #[default]
    None,
    /// First party of a symmetric protocol.
    First,
    /// Second party of a symmetric protocol.
    Second,
    /// TLS-style client. One of the two roles JPAKE accepts.
    Client,
    /// TLS-style server. One of the two roles JPAKE accepts.
    Server,
}

/// The protocol payload a single [`output`]/[`input`] call moves.
///
/// [`output`]: crate::pake::PakeOperation::output
/// [`input`]: crate::pake::PakeOperation::input
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PakeStep {
    /// A key-share curve point.
    KeyShare,
    /// The public point of a Schnorr zero-knowledge proof.
    ZkPublic,
    /// The scalar of a Schnorr zero-knowledge proof.
    ZkProof,
}

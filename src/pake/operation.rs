//! The streaming PAKE operation handle and its state machine.

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::pake::engine::{CurveId, EngineRole, JpakeEngine};
use crate::pake::store::{DerivationSink, KeyId, KeyType, PasswordStore, UsageFlags};
use crate::pake::suite::{
    CipherSuite, EcFamily, HashAlg, PakeAlgorithm, PakeRole, PakeStep, PrimitiveType,
};
use crate::{Error, Result};

/// Capacity of the round staging buffer.
///
/// Sized for the largest secp256r1 round payload: two key-share halves of
/// `ECPoint X (1+65) + ECPoint V (1+65) + opaque r (1+32)` in round one,
/// and the server's `3`-byte group header variant in round two.
pub const PAKE_BUFFER_SIZE: usize = (3 + 1 + 65 + 1 + 65 + 1 + 32) * 2;

/// Coarse position within the protocol, tracked independently for each
/// direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RoundStep {
    Invalid,
    X1X2,
    X2S,
    Derive,
}

impl RoundStep {
    /// Successor when a round completes.
    fn next(self) -> Self {
        match self {
            Self::X1X2 => Self::X2S,
            Self::X2S => Self::Derive,
            other => other,
        }
    }
}

/// The handle's gross state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Invalid,
    Setup,
    Ready,
    OutputX1X2,
    OutputX2S,
    InputX1X2,
    InputX4S,
}

/// Fine-grained position inside a round.
///
/// Rounds staging a single key share use only the `X1*` positions; the
/// six-part first round continues through the `X2*` positions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Sequence {
    Invalid,
    X1KeyShare,
    X1ZkPublic,
    X1ZkProof,
    X2KeyShare,
    X2ZkPublic,
    X2ZkProof,
}

impl Sequence {
    /// Successor within a round.
    fn next(self) -> Self {
        match self {
            Self::X1KeyShare => Self::X1ZkPublic,
            Self::X1ZkPublic => Self::X1ZkProof,
            Self::X1ZkProof => Self::X2KeyShare,
            Self::X2KeyShare => Self::X2ZkPublic,
            Self::X2ZkPublic => Self::X2ZkProof,
            other => other,
        }
    }

    /// The public step this position accepts.
    fn expected_step(self) -> Option<PakeStep> {
        match self {
            Self::X1KeyShare | Self::X2KeyShare => Some(PakeStep::KeyShare),
            Self::X1ZkPublic | Self::X2ZkPublic => Some(PakeStep::ZkPublic),
            Self::X1ZkProof | Self::X2ZkProof => Some(PakeStep::ZkProof),
            Self::Invalid => None,
        }
    }
}

/// A PAKE operation handle.
///
/// `E` is the EC-JPAKE engine, `S` the key store holding the password.
/// The handle is driven through setup, field bindings, streaming
/// input/output, implicit-key export and abort; it is synchronous and not
/// meant to be shared between threads without external serialization.
#[derive(Debug)]
pub struct PakeOperation<E, S> {
    alg: Option<PakeAlgorithm>,
    state: State,
    sequence: Sequence,
    input_step: RoundStep,
    output_step: RoundStep,
    role: PakeRole,
    password: KeyId,
    store: S,
    engine: Option<E>,
    buffer: [u8; PAKE_BUFFER_SIZE],
    buffer_length: usize,
    buffer_offset: usize,
}

impl<E, S> PakeOperation<E, S>
where
    E: JpakeEngine,
    S: PasswordStore,
{
    /// Creates a fresh, un-set-up handle over `store`.
    pub fn new(store: S) -> Self {
        Self {
            alg: None,
            state: State::Invalid,
            sequence: Sequence::Invalid,
            input_step: RoundStep::Invalid,
            output_step: RoundStep::Invalid,
            role: PakeRole::None,
            password: KeyId::NULL,
            store,
            engine: None,
            buffer: [0u8; PAKE_BUFFER_SIZE],
            buffer_length: 0,
            buffer_offset: 0,
        }
    }

    /// Sets the operation up for `cipher_suite`.
    ///
    /// Only allowed on a freshly created (or aborted) handle
    /// ([`Error::BadState`] otherwise). The single supported suite is
    /// JPAKE over ECC / secp256r1 / SHA-256; anything else is
    /// [`Error::NotSupported`] and acquires nothing.
    pub fn setup(&mut self, cipher_suite: &CipherSuite) -> Result<()> {
        if self.alg.is_some() {
            return Err(Error::BadState);
        }

        match cipher_suite.algorithm {
            PakeAlgorithm::Jpake => {
                if cipher_suite.primitive.primitive_type != PrimitiveType::Ecc
                    || cipher_suite.primitive.family != EcFamily::SecpR1
                    || cipher_suite.primitive.bits != 256
                    || cipher_suite.hash != HashAlg::Sha256
                {
                    return Err(Error::NotSupported);
                }

                self.alg = Some(PakeAlgorithm::Jpake);
                self.engine = Some(E::default());
                self.state = State::Setup;
                self.sequence = Sequence::Invalid;
                self.input_step = RoundStep::X1X2;
                self.output_step = RoundStep::X1X2;
                self.buffer.zeroize();
                self.buffer_length = 0;
                self.buffer_offset = 0;
                Ok(())
            }
        }
    }

    /// Binds the password key by identifier; the material stays in the
    /// store until implicit engine setup reads it once.
    ///
    /// The key must be of type [`KeyType::Password`] or
    /// [`KeyType::PasswordHash`] ([`Error::InvalidArgument`]) and carry
    /// the [`UsageFlags::DERIVE`] policy ([`Error::NotPermitted`]).
    pub fn set_password_key(&mut self, password: KeyId) -> Result<()> {
        if self.alg.is_none() || self.state != State::Setup {
            return Err(Error::BadState);
        }

        let attributes = self.store.attributes(password)?;

        match attributes.key_type {
            KeyType::Password | KeyType::PasswordHash => (),
            _ => return Err(Error::InvalidArgument),
        }
        if !attributes.usage.contains(UsageFlags::DERIVE) {
            return Err(Error::NotPermitted);
        }

        self.password = password;
        Ok(())
    }

    /// Binds the local identity.
    ///
    /// Identity binding is not honored: an empty identifier is rejected
    /// with [`Error::InvalidArgument`], any other input with
    /// [`Error::NotSupported`].
    pub fn set_user(&mut self, user_id: &[u8]) -> Result<()> {
        if self.alg.is_none() || self.state != State::Setup {
            return Err(Error::BadState);
        }
        if user_id.is_empty() {
            return Err(Error::InvalidArgument);
        }
        Err(Error::NotSupported)
    }

    /// Binds the peer identity. Same contract as [`Self::set_user`].
    pub fn set_peer(&mut self, peer_id: &[u8]) -> Result<()> {
        if self.alg.is_none() || self.state != State::Setup {
            return Err(Error::BadState);
        }
        if peer_id.is_empty() {
            return Err(Error::InvalidArgument);
        }
        Err(Error::NotSupported)
    }

    /// Binds the protocol role. JPAKE accepts only [`PakeRole::Client`]
    /// and [`PakeRole::Server`] ([`Error::NotSupported`] otherwise).
    pub fn set_role(&mut self, role: PakeRole) -> Result<()> {
        if self.alg.is_none() || self.state != State::Setup {
            return Err(Error::BadState);
        }

        if role != PakeRole::Client && role != PakeRole::Server {
            return Err(Error::NotSupported);
        }
        self.role = role;
        Ok(())
    }

    /// Finalizes the engine on the first `output`/`input` call: derives
    /// the engine role, reads the password material under the store's
    /// scoped access, and hands both to the engine.
    fn ecjpake_setup(&mut self) -> Result<()> {
        let role = match self.role {
            PakeRole::Client => EngineRole::Client,
            PakeRole::Server => EngineRole::Server,
            _ => return Err(Error::BadState),
        };

        if !self.password.is_valid() {
            return Err(Error::BadState);
        }

        let engine = self.engine.as_mut().ok_or(Error::CorruptionDetected)?;
        self.store.with_key(self.password, |material| {
            engine.setup(role, HashAlg::Sha256, CurveId::Secp256R1, material)
        })??;

        self.state = State::Ready;
        Ok(())
    }

    /// Produces the next protocol payload for `step` into `output`,
    /// returning the written length.
    ///
    /// At the first key-share call of a round the engine writes the whole
    /// round into the staging buffer; subsequent calls slice it out. A
    /// step out of order is [`Error::BadState`] and leaves the handle
    /// usable; an undersized `output` aborts the handle
    /// ([`Error::BufferTooSmall`]), as does any engine failure (mapped
    /// per [`EngineError`](crate::pake::EngineError)).
    pub fn output(
        &mut self,
        step: PakeStep,
        rng: &mut impl CryptoRngCore,
        output: &mut [u8],
    ) -> Result<usize> {
        if self.alg.is_none() || self.state == State::Invalid {
            return Err(Error::BadState);
        }
        if output.is_empty() {
            return Err(Error::InvalidArgument);
        }

        if self.state == State::Setup {
            if let Err(status) = self.ecjpake_setup() {
                self.abort();
                return Err(status);
            }
        }

        if !matches!(
            self.state,
            State::Ready | State::OutputX1X2 | State::OutputX2S
        ) {
            return Err(Error::BadState);
        }

        if self.state == State::Ready {
            if step != PakeStep::KeyShare {
                return Err(Error::BadState);
            }
            self.state = match self.output_step {
                RoundStep::X1X2 => State::OutputX1X2,
                RoundStep::X2S => State::OutputX2S,
                _ => return Err(Error::BadState),
            };
            self.sequence = Sequence::X1KeyShare;
        }

        self.check_sequence(step)?;

        // The engine writes the whole round at the round's first slice.
        if self.sequence == Sequence::X1KeyShare {
            let engine = self.engine.as_mut().ok_or(Error::CorruptionDetected)?;
            let written = match self.state {
                State::OutputX1X2 => Some(engine.write_round_one(&mut self.buffer, rng)),
                State::OutputX2S => Some(engine.write_round_two(&mut self.buffer, rng)),
                _ => None,
            };
            if let Some(written) = written {
                match written {
                    Ok(length) => {
                        self.buffer_length = length;
                        self.buffer_offset = 0;
                    }
                    Err(err) => {
                        self.abort();
                        return Err(err.into());
                    }
                }
            }
        }

        // Each slice is a length-prefixed ECPoint; the server's round-two
        // key share instead leads with a 3-byte group header, so its
        // point length lives at byte 3.
        let length = if self.state == State::OutputX2S && self.sequence == Sequence::X1KeyShare {
            if self.role == PakeRole::Server {
                3 + self.buffer[3] as usize + 1
            } else {
                self.buffer[0] as usize + 1
            }
        } else {
            self.buffer[self.buffer_offset] as usize + 1
        };

        if length > self.buffer_length - self.buffer_offset {
            return Err(Error::DataCorrupt);
        }
        if output.len() < length {
            self.abort();
            return Err(Error::BufferTooSmall);
        }

        output[..length].copy_from_slice(&self.buffer[self.buffer_offset..self.buffer_offset + length]);
        self.buffer_offset += length;

        if (self.state == State::OutputX1X2 && self.sequence == Sequence::X2ZkProof)
            || (self.state == State::OutputX2S && self.sequence == Sequence::X1ZkProof)
        {
            self.buffer.zeroize();
            self.buffer_length = 0;
            self.buffer_offset = 0;
            self.state = State::Ready;
            self.output_step = self.output_step.next();
            self.sequence = Sequence::Invalid;
        } else {
            self.sequence = self.sequence.next();
        }

        Ok(length)
    }

    /// Absorbs the peer's payload for `step`.
    ///
    /// Parts accumulate in the staging buffer; the engine sees them only
    /// at the round's final ZK proof, so malformed data surfaces there
    /// (as [`Error::DataInvalid`] after an abort). A step out of order is
    /// [`Error::BadState`] and leaves the handle usable; input exceeding
    /// the remaining staging capacity aborts with
    /// [`Error::InsufficientMemory`].
    pub fn input(&mut self, step: PakeStep, input: &[u8]) -> Result<()> {
        if self.alg.is_none() || self.state == State::Invalid {
            return Err(Error::BadState);
        }
        if input.is_empty() {
            return Err(Error::InvalidArgument);
        }

        if self.state == State::Setup {
            if let Err(status) = self.ecjpake_setup() {
                self.abort();
                return Err(status);
            }
        }

        if !matches!(self.state, State::Ready | State::InputX1X2 | State::InputX4S) {
            return Err(Error::BadState);
        }

        if self.state == State::Ready {
            if step != PakeStep::KeyShare {
                return Err(Error::BadState);
            }
            self.state = match self.input_step {
                RoundStep::X1X2 => State::InputX1X2,
                RoundStep::X2S => State::InputX4S,
                _ => return Err(Error::BadState),
            };
            self.sequence = Sequence::X1KeyShare;
        }

        if input.len() > PAKE_BUFFER_SIZE - self.buffer_length {
            self.abort();
            return Err(Error::InsufficientMemory);
        }

        self.check_sequence(step)?;

        self.buffer[self.buffer_length..self.buffer_length + input.len()].copy_from_slice(input);
        self.buffer_length += input.len();

        let round_complete = (self.state == State::InputX1X2
            && self.sequence == Sequence::X2ZkProof)
            || (self.state == State::InputX4S && self.sequence == Sequence::X1ZkProof);

        if round_complete {
            let engine = self.engine.as_mut().ok_or(Error::CorruptionDetected)?;
            let outcome = match self.state {
                State::InputX1X2 => engine.read_round_one(&self.buffer[..self.buffer_length]),
                _ => engine.read_round_two(&self.buffer[..self.buffer_length]),
            };

            // The accumulated blob is cleared whatever the engine said.
            self.buffer.zeroize();
            self.buffer_length = 0;

            if let Err(err) = outcome {
                self.abort();
                return Err(err.into());
            }

            self.state = State::Ready;
            self.input_step = self.input_step.next();
            self.sequence = Sequence::Invalid;
        } else {
            self.sequence = self.sequence.next();
        }

        Ok(())
    }

    /// Exports the implicit shared key into `sink` as secret input.
    ///
    /// Requires both directions to have completed round two
    /// ([`Error::BadState`] otherwise). The handle is aborted whether the
    /// export succeeds or fails; the secret bytes are zeroized after the
    /// sink has seen them.
    pub fn get_implicit_key(
        &mut self,
        rng: &mut impl CryptoRngCore,
        sink: &mut impl DerivationSink,
    ) -> Result<()> {
        if self.alg.is_none()
            || self.state != State::Ready
            || self.input_step != RoundStep::Derive
            || self.output_step != RoundStep::Derive
        {
            return Err(Error::BadState);
        }

        let engine = self.engine.as_mut().ok_or(Error::CorruptionDetected)?;
        match engine.write_shared_key(&mut self.buffer, rng) {
            Ok(length) => self.buffer_length = length,
            Err(err) => {
                self.abort();
                return Err(err.into());
            }
        }

        let status = sink.input_secret(&self.buffer[..self.buffer_length]);

        self.buffer.zeroize();
        self.abort();

        status
    }

    /// Resets the handle to its initial state, zeroizing the staging
    /// buffer and dropping the engine context. Idempotent; safe on a
    /// handle that was never set up.
    pub fn abort(&mut self) {
        if self.alg.is_none() {
            return;
        }

        self.input_step = RoundStep::Invalid;
        self.output_step = RoundStep::Invalid;
        self.password = KeyId::NULL;
        self.role = PakeRole::None;
        self.buffer.zeroize();
        self.buffer_length = 0;
        self.buffer_offset = 0;
        self.engine = None;

        self.alg = None;
        self.state = State::Invalid;
        self.sequence = Sequence::Invalid;
    }

    /// Maps the current sequence position onto the step it accepts.
    fn check_sequence(&self, step: PakeStep) -> Result<()> {
        match self.sequence.expected_step() {
            Some(expected) if expected == step => Ok(()),
            _ => Err(Error::BadState),
        }
    }
}

impl<E, S> Drop for PakeOperation<E, S> {
    fn drop(&mut self) {
        self.buffer.zeroize();
    }
}

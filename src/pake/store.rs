//! Seams to the external key store and the key-derivation sink.

use crate::Result;

/// Identifier of a key held by the external store.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct KeyId(pub u32);

impl KeyId {
    /// The null identifier; never names a stored key.
    pub const NULL: Self = Self(0);

    /// Whether this identifier can name a stored key at all.
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// The kind of material a stored key holds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum KeyType {
    /// Uninterpreted bytes.
    RawData,
    /// A low-entropy password. Accepted as PAKE input.
    Password,
    /// A pre-hashed password. Accepted as PAKE input.
    PasswordHash,
}

/// Usage policy bits attached to a stored key.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UsageFlags(u32);

impl UsageFlags {
    /// No usage permitted.
    pub const EMPTY: Self = Self(0);

    /// Key may feed key derivation (and thus a PAKE).
    pub const DERIVE: Self = Self(1 << 0);

    /// Key may be exported.
    pub const EXPORT: Self = Self(1 << 1);

    /// Whether every flag in `other` is present in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two flag sets.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl core::ops::BitOr for UsageFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// The attributes of a stored key a PAKE cares about.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyAttributes {
    /// Kind of stored material.
    pub key_type: KeyType,
    /// Usage policy.
    pub usage: UsageFlags,
}

/// External key store holding the PAKE password.
///
/// The operation reads attributes when the password key is bound and
/// touches the material exactly once, inside [`with_key`], during
/// implicit engine setup. Implementations should scope any locking to
/// that call so the critical section stays minimal.
///
/// [`with_key`]: PasswordStore::with_key
pub trait PasswordStore {
    /// Looks up the attributes of `key`.
    fn attributes(&self, key: KeyId) -> Result<KeyAttributes>;

    /// Runs `reader` over the raw material of `key`.
    fn with_key<T, F>(&self, key: KeyId, reader: F) -> Result<T>
    where
        F: FnOnce(&[u8]) -> T;
}

/// Key-derivation sink the implicit key is absorbed into.
///
/// The PAKE never returns the shared secret; it hands the bytes to the
/// sink as secret input and zeroizes its own copy.
pub trait DerivationSink {
    /// Absorbs `secret` as key-derivation input.
    fn input_secret(&mut self, secret: &[u8]) -> Result<()>;
}

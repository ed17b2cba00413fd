//! # Binary codec for LogLogBeta
//!
//! Encoded layout (version 1), all multi-byte fields little-endian:
//! - byte 0        - format version
//! - byte 1        - precision `P`
//! - bytes 2..10   - `alpha` as `f64` bits
//! - bytes 10..    - `2^P` registers, one byte per register
//!
//! Decoding is all-or-nothing: the header and every register are validated
//! before a sketch is constructed.
use std::io::{self, Read, Write};

use thiserror::Error;

use crate::estimator::LogLogBeta;
use crate::registers::Registers;

/// Current binary format version
pub const FORMAT_VERSION: u8 = 1;
/// Length of the header preceding register bytes
pub const HEADER_LEN: usize = 10;

/// Error returned when a sketch cannot be encoded
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to write sketch: {0}")]
    Io(#[from] io::Error),
}

/// Error returned when bytes do not hold a valid sketch
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("truncated input: expected {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },
    #[error("{0} trailing bytes after encoded sketch")]
    TrailingBytes(usize),
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),
    #[error("precision mismatch: expected {expected}, found {found}")]
    PrecisionMismatch { expected: usize, found: u8 },
    #[error("invalid alpha {0}")]
    InvalidAlpha(f64),
    #[error("register {index} has rank {rank} above maximum {max}")]
    InvalidRegister { index: usize, rank: u8, max: u8 },
    #[error("failed to read sketch: {0}")]
    Io(#[from] io::Error),
}

impl<const P: usize> LogLogBeta<P> {
    /// Length of encoded sketch in bytes
    pub const ENCODED_LEN: usize = HEADER_LEN + Self::M;

    /// Serialize sketch into a byte vector
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::with_capacity(Self::ENCODED_LEN);
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Serialize sketch into `writer`
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), EncodeError> {
        let mut header = [0u8; HEADER_LEN];
        header[0] = FORMAT_VERSION;
        header[1] = P as u8;
        header[2..].copy_from_slice(&self.alpha.to_le_bytes());
        writer.write_all(&header)?;
        writer.write_all(self.registers())?;
        tracing::trace!(precision = P, len = Self::ENCODED_LEN, "encoded loglog-beta sketch");
        Ok(())
    }

    /// Deserialize sketch from bytes produced by [`LogLogBeta::to_bytes`]
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        Self::decode(data).map_err(|err| {
            tracing::debug!(%err, precision = P, "rejected encoded loglog-beta sketch");
            err
        })
    }

    /// Deserialize sketch from `reader`, consuming exactly one encoded sketch
    pub fn read_from<R: Read>(reader: R) -> Result<Self, DecodeError> {
        let mut buf = Vec::with_capacity(Self::ENCODED_LEN);
        reader
            .take(Self::ENCODED_LEN as u64)
            .read_to_end(&mut buf)?;
        Self::from_bytes(&buf)
    }

    fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < HEADER_LEN {
            return Err(DecodeError::Truncated {
                expected: Self::ENCODED_LEN,
                got: data.len(),
            });
        }
        let (header, registers) = data.split_at(HEADER_LEN);

        let version = header[0];
        if version != FORMAT_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        let precision = header[1];
        if usize::from(precision) != P {
            return Err(DecodeError::PrecisionMismatch {
                expected: P,
                found: precision,
            });
        }

        let mut alpha = [0u8; 8];
        alpha.copy_from_slice(&header[2..HEADER_LEN]);
        Self::from_parts(version, f64::from_le_bytes(alpha), registers)
    }

    /// Validate decoded fields and assemble sketch from them
    pub(crate) fn from_parts(version: u8, alpha: f64, registers: &[u8]) -> Result<Self, DecodeError> {
        if version != FORMAT_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        if registers.len() < Self::M {
            return Err(DecodeError::Truncated {
                expected: Self::ENCODED_LEN,
                got: HEADER_LEN + registers.len(),
            });
        }
        if registers.len() > Self::M {
            return Err(DecodeError::TrailingBytes(registers.len() - Self::M));
        }
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(DecodeError::InvalidAlpha(alpha));
        }
        let max = Registers::<P>::MAX_RANK;
        if let Some((index, &rank)) = registers.iter().enumerate().find(|&(_, &r)| r > max) {
            return Err(DecodeError::InvalidRegister { index, rank, max });
        }

        Ok(Self {
            registers: Registers::from_boxed(registers.into()),
            alpha,
        })
    }
}

// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion between byte strings and modulus-bounded integer blocks.
//!
//! A message is cut into big-endian chunks of `block_size` bytes, where
//! `block_size` is the largest byte count whose every value stays below the
//! modulus. The final chunk may be short, so a framed message carries one
//! extra *size block* holding the length of that chunk. Leading and trailing
//! zero bytes survive the round trip because every chunk is rendered back at
//! its recorded width.
//!
//! ```text
//! data:   | block_size | block_size | r |
//! framed: [   m_0    ][    m_1    ][ m_2 ][ r ]
//! ```
//!
//! When the length is an exact multiple of `block_size` the size block holds
//! `block_size`; an empty message frames to a single size block holding `0`.

use num_bigint_dig::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::error::{Error, Result};

/// Largest `k` such that every `k`-byte value is smaller than `modulus`.
///
/// This is `(bits(modulus) - 1) / 8`. Fails for moduli that cannot hold a
/// single byte (`modulus <= 255`).
pub fn compute_block_size(modulus: &BigUint) -> Result<usize> {
    if modulus.bits() <= 1 {
        return Err(Error::invalid("modulus must be greater than 1"));
    }

    let block_size = (modulus.bits() - 1) / 8;
    if block_size == 0 {
        return Err(Error::invalid(format!(
            "modulus {modulus} is too small to carry a byte per block"
        )));
    }

    Ok(block_size)
}

fn check_block_size(block_size: usize) -> Result<()> {
    if block_size == 0 {
        return Err(Error::invalid("block size must be positive"));
    }
    Ok(())
}

/// Split `data` into consecutive big-endian blocks of `block_size` bytes.
///
/// The last block may be shorter. A zero `block_size` is
/// [`Error::InvalidParameter`].
pub fn blocks_from_bytes(data: &[u8], block_size: usize) -> Result<Vec<BigUint>> {
    check_block_size(block_size)?;
    Ok(data.chunks(block_size).map(BigUint::from_bytes_be).collect())
}

/// Render `value` as exactly `length` big-endian bytes, left-padded with zeros.
pub fn bytes_from_block(value: &BigUint, length: usize) -> Result<Vec<u8>> {
    if value.is_zero() {
        return Ok(vec![0u8; length]);
    }

    let bytes = value.to_bytes_be();
    if bytes.len() > length {
        return Err(Error::malformed(format!(
            "block needs {} bytes but only {length} are available",
            bytes.len()
        )));
    }

    let mut out = vec![0u8; length - bytes.len()];
    out.extend_from_slice(&bytes);
    Ok(out)
}

/// Message blocks followed by the size block.
pub fn frame(data: &[u8], block_size: usize) -> Result<Vec<BigUint>> {
    let mut blocks = blocks_from_bytes(data, block_size)?;

    let last_len = match data.len() % block_size {
        0 if data.is_empty() => 0,
        0 => block_size,
        rem => rem,
    };
    blocks.push(BigUint::from(last_len));

    Ok(blocks)
}

/// Inverse of [`frame`].
pub fn unframe(values: &[BigUint], block_size: usize) -> Result<Vec<u8>> {
    check_block_size(block_size)?;

    let (size_block, blocks) = values
        .split_last()
        .ok_or_else(|| Error::malformed("missing size block"))?;

    let last_len = size_block
        .to_usize()
        .ok_or_else(|| Error::malformed("size block out of range"))?;

    let Some((last, full)) = blocks.split_last() else {
        if last_len == 0 {
            return Ok(Vec::new());
        }
        return Err(Error::malformed("size block without message blocks"));
    };

    if last_len == 0 || last_len > block_size {
        return Err(Error::malformed(format!(
            "final block length {last_len} outside [1, {block_size}]"
        )));
    }

    let mut out = Vec::with_capacity(full.len() * block_size + last_len);
    for value in full {
        out.extend(bytes_from_block(value, block_size)?);
    }
    out.extend(bytes_from_block(last, last_len)?);

    Ok(out)
}

/// Split a concatenation of fixed-width big-endian integers.
pub fn split_fixed(bytes: &[u8], width: usize) -> Result<Vec<BigUint>> {
    check_block_size(width)?;
    if bytes.len() % width != 0 {
        return Err(Error::malformed(format!(
            "length {} is not a multiple of the {width}-byte block width",
            bytes.len()
        )));
    }

    Ok(bytes.chunks(width).map(BigUint::from_bytes_be).collect())
}

// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;

use crate::error::{Error, Result};

const VERSION: u8 = 1;
const HEADER_LEN: usize = 5;

/// One encrypted ElGamal block: `(g^k mod p, m·y^k mod p)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalBlock {
    c1: BigUint,
    c2: BigUint,
}

impl ElGamalBlock {
    pub fn new(c1: BigUint, c2: BigUint) -> Self {
        Self { c1, c2 }
    }

    /// The ephemeral part `g^k mod p`.
    pub fn c1(&self) -> &BigUint {
        &self.c1
    }

    /// The masked message `m·y^k mod p`.
    pub fn c2(&self) -> &BigUint {
        &self.c2
    }
}

/// ElGamal ciphertext: the framed message blocks followed by the size block,
/// each encrypted under its own ephemeral exponent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElGamalCiphertext {
    blocks: Vec<ElGamalBlock>,
}

impl ElGamalCiphertext {
    pub fn new(blocks: Vec<ElGamalBlock>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[ElGamalBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn into_blocks(self) -> Vec<ElGamalBlock> {
        self.blocks
    }

    /// Serialize into the packed wire format.
    ///
    /// Format:
    /// `[version:u8][block_count:u32][len:u32][c1][len:u32][c2]...`
    ///
    /// All integers are big-endian.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let count = u32::try_from(self.blocks.len())
            .map_err(|_| Error::invalid("too many blocks for the packed format"))?;

        let mut packed = Vec::new();
        packed.push(VERSION);
        packed.extend_from_slice(&count.to_be_bytes());

        for block in &self.blocks {
            for value in [&block.c1, &block.c2] {
                let bytes = value.to_bytes_be();
                let len = u32::try_from(bytes.len())
                    .map_err(|_| Error::invalid("block too large for the packed format"))?;
                packed.extend_from_slice(&len.to_be_bytes());
                packed.extend_from_slice(&bytes);
            }
        }

        Ok(packed)
    }

    /// Parse the packed wire format produced by [`ElGamalCiphertext::to_bytes`].
    ///
    /// Truncated input, trailing bytes and unknown versions are rejected.
    pub fn from_bytes(packed: &[u8]) -> Result<Self> {
        if packed.len() < HEADER_LEN {
            return Err(Error::malformed("packed ciphertext shorter than its header"));
        }

        let version = packed[0];
        if version != VERSION {
            return Err(Error::malformed(format!("unsupported version: {version}")));
        }

        let mut reader = Reader { buf: &packed[1..] };
        let count = reader.read_u32()? as usize;

        // Each block takes at least two length prefixes.
        if count > reader.buf.len() / 8 {
            return Err(Error::malformed(format!(
                "{count} blocks cannot fit in {} bytes",
                reader.buf.len()
            )));
        }

        let mut blocks = Vec::with_capacity(count);
        for _ in 0..count {
            let c1 = reader.read_value()?;
            let c2 = reader.read_value()?;
            blocks.push(ElGamalBlock::new(c1, c2));
        }

        if !reader.buf.is_empty() {
            return Err(Error::malformed(format!(
                "{} trailing bytes after the last block",
                reader.buf.len()
            )));
        }

        Ok(Self { blocks })
    }
}

impl FromIterator<ElGamalBlock> for ElGamalCiphertext {
    fn from_iter<I: IntoIterator<Item = ElGamalBlock>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ElGamalCiphertext {
    type Item = &'a ElGamalBlock;
    type IntoIter = std::slice::Iter<'a, ElGamalBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.buf.len() < len {
            return Err(Error::malformed("packed ciphertext truncated"));
        }
        let (head, rest) = self.buf.split_at(len);
        self.buf = rest;
        Ok(head)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut word = [0u8; 4];
        word.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(word))
    }

    fn read_value(&mut self) -> Result<BigUint> {
        let len = self.read_u32()? as usize;
        Ok(BigUint::from_bytes_be(self.take(len)?))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn sample() -> ElGamalCiphertext {
        [(6101u32, 11351u32), (12630, 23465), (1070, 0)]
            .into_iter()
            .map(|(c1, c2)| ElGamalBlock::new(BigUint::from(c1), BigUint::from(c2)))
            .collect()
    }

    #[test]
    fn packed_round_trip() {
        let ciphertext = sample();
        let packed = ciphertext.to_bytes().unwrap();
        assert_eq!(ElGamalCiphertext::from_bytes(&packed).unwrap(), ciphertext);
    }

    #[test]
    fn packed_layout() {
        let single: ElGamalCiphertext =
            [ElGamalBlock::new(BigUint::from(0x17d5u32), BigUint::from(0x2c57u32))]
                .into_iter()
                .collect();

        let packed = single.to_bytes().unwrap();
        assert_eq!(
            packed,
            vec![1, 0, 0, 0, 1, 0, 0, 0, 2, 0x17, 0xd5, 0, 0, 0, 2, 0x2c, 0x57]
        );
    }

    #[test]
    fn empty_ciphertext_packs_to_header() {
        let packed = ElGamalCiphertext::default().to_bytes().unwrap();
        assert_eq!(packed, vec![1, 0, 0, 0, 0]);
        assert!(ElGamalCiphertext::from_bytes(&packed).unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_version() {
        let mut packed = sample().to_bytes().unwrap();
        packed[0] = 99;
        assert!(matches!(
            ElGamalCiphertext::from_bytes(&packed),
            Err(Error::MalformedCiphertext(_))
        ));
    }

    #[test]
    fn rejects_truncation_at_every_length() {
        let packed = sample().to_bytes().unwrap();
        for len in 0..packed.len() {
            assert!(ElGamalCiphertext::from_bytes(&packed[..len]).is_err(), "len {len}");
        }
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut packed = sample().to_bytes().unwrap();
        packed.push(0);
        assert!(ElGamalCiphertext::from_bytes(&packed).is_err());
    }

    #[test]
    fn rejects_inflated_block_count() {
        let packed = [1u8, 0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0];
        assert!(ElGamalCiphertext::from_bytes(&packed).is_err());
    }
}

//! Keystream unmasking for ARC1 archives.
//!
//! Every region of an archive is XORed with the high byte of a 32-bit linear
//! congruential generator. The generator is seeded from the region's
//! absolute position in the file, so the same routine serves the header
//! (seeded at offset 0) and the directory (seeded at its own offset).
//! Masking and unmasking are the same operation.

use tracing::trace;

/// Seed origin; the absolute file offset is added to it.
pub const SEED_BASE: u32 = 0x1900_0000;

/// LCG multiplier.
pub const MULTIPLIER: u32 = 0x41C6_4E6D;

/// LCG increment.
pub const INCREMENT: u32 = 12345;

/// Regions at least this large are unmasked in parallel chunks when the
/// `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 1 << 20;

#[cfg(feature = "parallel")]
const PARALLEL_CHUNK: usize = 1 << 16;

/// The mask generator for one archive region.
///
/// Each call to [`Keystream::next_mask`] advances the generator once and
/// yields the top byte of the new state.
///
/// # Example
///
/// ```
/// use resbin_archive::Keystream;
///
/// // Jumping ahead lands on the same state as stepping.
/// let mut jumped = Keystream::at(0, 1);
/// let mut stepped = Keystream::new(0);
/// stepped.next_mask();
/// assert_eq!(jumped.next_mask(), stepped.next_mask());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystream {
    seed: u32,
}

impl Keystream {
    /// Create a generator for a region starting at `base_offset` in the file.
    #[inline]
    pub const fn new(base_offset: u32) -> Self {
        Self {
            seed: SEED_BASE.wrapping_add(base_offset),
        }
    }

    /// Create a generator positioned at byte `index` of the region starting
    /// at `base_offset`.
    pub fn at(base_offset: u32, index: u64) -> Self {
        let mut stream = Self::new(base_offset);
        stream.skip_bytes(index);
        stream
    }

    /// Current generator state.
    #[inline]
    pub const fn state(&self) -> u32 {
        self.seed
    }

    /// Advance the generator and return the next mask byte.
    #[inline]
    pub fn next_mask(&mut self) -> u8 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        (self.seed >> 24) as u8
    }

    /// Advance the generator by `count` steps in O(log count).
    ///
    /// Repeated squaring of the affine step `x -> MULTIPLIER * x + INCREMENT`
    /// (mod 2^32).
    pub fn skip_bytes(&mut self, mut count: u64) {
        let (mut acc_mul, mut acc_add) = (1u32, 0u32);
        let (mut cur_mul, mut cur_add) = (MULTIPLIER, INCREMENT);

        while count > 0 {
            if count & 1 == 1 {
                acc_mul = acc_mul.wrapping_mul(cur_mul);
                acc_add = acc_add.wrapping_mul(cur_mul).wrapping_add(cur_add);
            }
            cur_add = cur_mul.wrapping_add(1).wrapping_mul(cur_add);
            cur_mul = cur_mul.wrapping_mul(cur_mul);
            count >>= 1;
        }

        self.seed = acc_mul.wrapping_mul(self.seed).wrapping_add(acc_add);
    }

    /// XOR `data` with the next `data.len()` mask bytes.
    #[inline]
    pub fn apply(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            *byte ^= self.next_mask();
        }
    }
}

impl Iterator for Keystream {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        Some(self.next_mask())
    }
}

/// Unmask a region in place.
///
/// `base_offset` must be the region's absolute offset in the archive file,
/// not its position within some sub-slice.
#[inline]
pub fn unmask_in_place(data: &mut [u8], base_offset: u32) {
    Keystream::new(base_offset).apply(data);
}

/// Unmask a region into a new buffer of the same length.
pub fn unmask(data: &[u8], base_offset: u32) -> Vec<u8> {
    let mut out = data.to_vec();
    unmask_in_place(&mut out, base_offset);
    out
}

/// Unmask a region by splitting it into chunks that are processed on the
/// rayon pool. Each chunk's generator is positioned by jump-ahead, so the
/// result is identical to [`unmask`].
#[cfg(feature = "parallel")]
pub fn unmask_parallel(data: &[u8], base_offset: u32) -> Vec<u8> {
    use rayon::prelude::*;

    let mut out = data.to_vec();
    out.par_chunks_mut(PARALLEL_CHUNK)
        .enumerate()
        .for_each(|(chunk_index, chunk)| {
            let start = (chunk_index * PARALLEL_CHUNK) as u64;
            Keystream::at(base_offset, start).apply(chunk);
        });
    out
}

/// Unmask an archive region, picking the parallel path for large regions
/// when it is compiled in.
pub(crate) fn unmask_region(data: &[u8], base_offset: u32) -> Vec<u8> {
    #[cfg(feature = "parallel")]
    if data.len() >= PARALLEL_THRESHOLD {
        trace!(len = data.len(), base_offset, "unmasking region in parallel");
        return unmask_parallel(data, base_offset);
    }

    trace!(len = data.len(), base_offset, "unmasking region");
    unmask(data, base_offset)
}

//! MurmurHash3, x64 128-bit variant.
//!
//! Used to turn a component type name into a fixed-size content identifier.
//! The output matches the reference implementation with `h1` in the low and
//! `h2` in the high 64 bits.

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;

pub fn murmur3_x64_128(data: &[u8], seed: u32) -> u128 {
  let mut h1 = seed as u64;
  let mut h2 = seed as u64;

  let mut blocks = data.chunks_exact(16);
  for block in &mut blocks {
    let (lo, hi) = block.split_at(8);

    h1 ^= mix_k1(read_u64(lo));
    h1 = h1
      .rotate_left(27)
      .wrapping_add(h2)
      .wrapping_mul(5)
      .wrapping_add(0x52dc_e729);

    h2 ^= mix_k2(read_u64(hi));
    h2 = h2
      .rotate_left(31)
      .wrapping_add(h1)
      .wrapping_mul(5)
      .wrapping_add(0x3849_5ab5);
  }

  let tail = blocks.remainder();
  if tail.len() > 8 {
    h2 ^= mix_k2(read_u64(&tail[8..]));
  }
  if !tail.is_empty() {
    h1 ^= mix_k1(read_u64(&tail[..tail.len().min(8)]));
  }

  let len = data.len() as u64;
  h1 ^= len;
  h2 ^= len;

  h1 = h1.wrapping_add(h2);
  h2 = h2.wrapping_add(h1);

  h1 = fmix64(h1);
  h2 = fmix64(h2);

  h1 = h1.wrapping_add(h2);
  h2 = h2.wrapping_add(h1);

  ((h2 as u128) << 64) | h1 as u128
}

#[inline]
fn mix_k1(k1: u64) -> u64 {
  k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2)
}

#[inline]
fn mix_k2(k2: u64) -> u64 {
  k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1)
}

#[inline]
fn fmix64(mut k: u64) -> u64 {
  k ^= k >> 33;
  k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
  k ^= k >> 33;
  k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
  k ^= k >> 33;
  k
}

// little endian, zero padded for the tail
#[inline]
fn read_u64(bytes: &[u8]) -> u64 {
  let mut buf = [0u8; 8];
  buf[..bytes.len()].copy_from_slice(bytes);
  u64::from_le_bytes(buf)
}

#[cfg(test)]
mod test {
  use super::murmur3_x64_128;

  #[test]
  fn empty() {
    assert_eq!(murmur3_x64_128(b"", 0), 0);
    assert_eq!(
      murmur3_x64_128(b"", 1),
      0x51622daa78f835834610abe56eff5cb5
    );
  }

  #[test]
  fn reference_vectors() {
    assert_eq!(
      murmur3_x64_128(b"hello", 0),
      0x5b1e906a48ae1d19cbd8a7b341bd9b02
    );
    assert_eq!(
      murmur3_x64_128(b"The quick brown fox jumps over the lazy dog", 0),
      0x7a433ca9c49a9347e34bbc7bbc071b6c
    );
  }

  #[test]
  fn seed_changes_output() {
    let a = murmur3_x64_128(b"hello", 0);
    let b = murmur3_x64_128(b"hello", 1);
    assert_ne!(a, b);
    assert_eq!(b, 0x128900ef20900135a78ddff5adae8d10);
  }
}

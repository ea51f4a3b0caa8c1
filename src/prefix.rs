//! Bit-level key representation of IP prefixes.

use ipnet::{Ipv4Net, Ipv6Net};
use num_traits::{PrimInt, Unsigned, Zero};

/// A prefix is a key of fixed bit width together with a prefix length. The tree descends one bit
/// of the key per level, starting at the most significant bit.
pub trait Prefix: Sized {
    /// Integer type holding the address bits. This must be one of `u8`, `u16`, `u32`, `u64`, or
    /// `u128`, and its width bounds the depth of the tree.
    type R: Unsigned + PrimInt + Zero;

    /// Raw address bits, possibly containing host bits beyond the prefix length.
    fn repr(&self) -> Self::R;

    /// Prefix length
    fn prefix_len(&self) -> u8;

    /// Create a new prefix from the address bits and the prefix length. `len` never exceeds
    /// [`Prefix::width`].
    fn from_repr_len(repr: Self::R, len: u8) -> Self;

    /// Number of bits in the key, i.e., the maximal prefix length.
    fn width() -> u8 {
        Self::R::zero().count_zeros() as u8
    }

    /// The canonical key: `self.repr()` with all bits beyond the prefix length forced to zero.
    fn mask(&self) -> Self::R {
        self.repr() & mask_from_prefix_len(self.prefix_len())
    }

    /// The default route, which matches every address.
    fn zero() -> Self {
        Self::from_repr_len(Self::R::zero(), 0)
    }

    /// Check if `self` contains `other` in its prefix range. This function also returns `true` if
    /// `self` is identical to `other`.
    fn contains(&self, other: &Self) -> bool {
        if self.prefix_len() > other.prefix_len() {
            return false;
        }
        other.repr() & mask_from_prefix_len(self.prefix_len()) == self.mask()
    }

    /// Check if a specific bit of the canonical key is set (counted from the left, where 0 is the
    /// first bit from the left).
    fn is_bit_set(&self, bit: u8) -> bool {
        bit < self.prefix_len() && bit_at(self.mask(), bit)
    }

    /// Two prefixes denote the same route iff their canonical keys and lengths are equal.
    fn eq(&self, other: &Self) -> bool {
        self.mask() == other.mask() && self.prefix_len() == other.prefix_len()
    }
}

/// Netmask with the `len` most significant bits set.
pub fn mask_from_prefix_len<R>(len: u8) -> R
where
    R: PrimInt + Zero,
{
    if len as u32 >= R::zero().count_zeros() {
        !R::zero()
    } else if len == 0 {
        R::zero()
    } else {
        !((!R::zero()) >> len as usize)
    }
}

/// Value of bit `bit` of `repr`, where bit 0 is the most significant one. Bits at or beyond the
/// width of `R` read as unset.
#[inline(always)]
pub fn bit_at<R>(repr: R, bit: u8) -> bool
where
    R: PrimInt + Zero,
{
    let width = R::zero().count_zeros();
    if bit as u32 >= width {
        return false;
    }
    (repr >> (width - 1 - bit as u32) as usize) & R::one() == R::one()
}

/// The key with bit `bit` (counted from the left) set.
#[inline(always)]
pub(crate) fn with_bit<R>(repr: R, bit: u8) -> R
where
    R: PrimInt + Zero,
{
    let width = R::zero().count_zeros();
    repr | (R::one() << (width - 1 - bit as u32) as usize)
}

impl Prefix for Ipv4Net {
    type R = u32;

    fn repr(&self) -> u32 {
        self.addr().into()
    }

    fn prefix_len(&self) -> u8 {
        self.prefix_len()
    }

    fn from_repr_len(repr: u32, len: u8) -> Self {
        Ipv4Net::new(repr.into(), len).unwrap()
    }

    fn width() -> u8 {
        32
    }

    fn mask(&self) -> u32 {
        self.network().into()
    }

    fn zero() -> Self {
        Default::default()
    }

    fn contains(&self, other: &Self) -> bool {
        self.contains(other)
    }
}

impl Prefix for Ipv6Net {
    type R = u128;

    fn repr(&self) -> u128 {
        self.addr().into()
    }

    fn prefix_len(&self) -> u8 {
        self.prefix_len()
    }

    fn from_repr_len(repr: u128, len: u8) -> Self {
        Ipv6Net::new(repr.into(), len).unwrap()
    }

    fn width() -> u8 {
        128
    }

    fn mask(&self) -> u128 {
        self.network().into()
    }

    fn zero() -> Self {
        Default::default()
    }

    fn contains(&self, other: &Self) -> bool {
        self.contains(other)
    }
}

impl<R> Prefix for (R, u8)
where
    R: Unsigned + PrimInt + Zero,
{
    type R = R;

    fn repr(&self) -> R {
        self.0
    }

    fn prefix_len(&self) -> u8 {
        self.1
    }

    fn from_repr_len(repr: R, len: u8) -> Self {
        (repr, len)
    }
}

//! Small free functions shared by the magic-bitboard generator and the
//! move tables. Kept separate from `square` since these operate on raw
//! rank/file pairs during table construction, before a `Square` exists.

#[inline(always)]
pub fn square_index(rank: usize, file: usize) -> usize {
    rank * 8 + file
}

/// Clears and returns the least significant set bit's index. Free-function
/// form used by the move generator's hot loops (`crate::bitboard::BitboardExt`
/// provides the same operation as a method for call sites that prefer it).
#[inline(always)]
pub fn pop_lsb(bb: &mut u64) -> u8 {
    let idx = bb.trailing_zeros() as u8;
    *bb &= *bb - 1;
    idx
}

//! Packing for the 8-byte slots `wap.js` and the module exchange through linear memory.
//!
//! A string occupies one slot: pointer in the low 32 bits, byte length in the high 32.
//! Slots are only ever read and written as memory, never passed as wasm `f64` params, so
//! the NaN patterns this produces survive the trip.

pub(crate) fn pack_str(ptr: u32, len: u32) -> f64 {
    f64::from_bits(u64::from(len) << 32 | u64::from(ptr))
}

pub(crate) fn unpack_str(slot: f64) -> (u32, u32) {
    let bits = slot.to_bits();
    (bits as u32, (bits >> 32) as u32)
}

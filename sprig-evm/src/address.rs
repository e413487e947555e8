//! Ethereum address derivation with EIP-55 checksum encoding.

use alloy_primitives::Address;

/// Derive the address of an uncompressed SEC1 public key (`0x04 || x || y`).
///
/// The address is the last 20 bytes of keccak256 over `x || y`.
#[must_use]
pub fn public_key_to_address(uncompressed: &[u8; 65]) -> Address {
    Address::from_raw_public_key(&uncompressed[1..])
}

/// Render an address as an EIP-55 checksummed string with `0x` prefix.
#[must_use]
pub fn to_checksum_address(address: &Address) -> String {
    address.to_checksum(None)
}

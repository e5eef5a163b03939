//! EIP-712 digest construction for ZigZagZog commitments
//!
//! A commitment is the typed struct
//!
//! ```text
//! ChoicesMessage(uint256 nonce,uint256 gameNumber,uint256 roundNumber,uint256 numCircles,uint256 numSquares,uint256 numTriangles)
//! ```
//!
//! hashed under the domain `EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)`
//! with `name = "ZigZagZog"` and `version = "0.1.0"`. The resulting digest is
//! `keccak256(0x19 0x01 || domainSeparator || hashStruct(message))`, which is
//! what the game contract reconstructs on chain before calling `ecrecover`.
//!
//! Field order is part of the type hash. Changing the order of the `sol!`
//! declaration below changes every digest.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{Eip712Domain, SolStruct};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::EncodingError;

/// EIP-712 domain name expected by the game contract
pub const PROTOCOL_NAME: &str = "ZigZagZog";

/// EIP-712 domain version expected by the game contract
pub const PROTOCOL_VERSION: &str = "0.1.0";

/// Default chain (Ethereum mainnet)
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Default verifying contract used when none is configured
pub const DEFAULT_VERIFYING_CONTRACT: &str = "0x0000000000000000000000000000000000000000";

/// Encoded domain type
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Encoded commitment type
pub const CHOICES_MESSAGE_TYPE: &str = "ChoicesMessage(uint256 nonce,uint256 gameNumber,uint256 roundNumber,uint256 numCircles,uint256 numSquares,uint256 numTriangles)";

mod schema {
    alloy_sol_types::sol! {
        struct ChoicesMessage {
            uint256 nonce;
            uint256 gameNumber;
            uint256 roundNumber;
            uint256 numCircles;
            uint256 numSquares;
            uint256 numTriangles;
        }
    }
}

/// Network and contract binding for the digest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainParameters {
    /// EIP-155 chain id
    pub chain_id: u64,
    /// Address of the ZigZagZog contract
    pub verifying_contract: Address,
}

impl DomainParameters {
    /// Parse domain parameters from a chain id and a hex contract address.
    ///
    /// The address may carry a `0x` prefix and may use any letter case.
    pub fn new(chain_id: u64, verifying_contract: &str) -> Result<Self, EncodingError> {
        Ok(Self {
            chain_id,
            verifying_contract: parse_address(verifying_contract)?,
        })
    }

    /// Build from an already parsed address
    pub fn from_address(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            chain_id,
            verifying_contract,
        }
    }

    /// The alloy domain used for hashing
    pub fn eip712_domain(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(PROTOCOL_NAME.into()),
            Some(PROTOCOL_VERSION.into()),
            Some(U256::from(self.chain_id)),
            Some(self.verifying_contract),
            None,
        )
    }

    /// `hashStruct(domain)`
    pub fn separator(&self) -> B256 {
        self.eip712_domain().separator()
    }
}

impl Default for DomainParameters {
    fn default() -> Self {
        Self::from_address(DEFAULT_CHAIN_ID, Address::ZERO)
    }
}

/// A player's committed choices for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentMessage {
    #[serde(with = "decimal_u256")]
    pub nonce: U256,
    #[serde(with = "decimal_u256")]
    pub game_number: U256,
    #[serde(with = "decimal_u256")]
    pub round_number: U256,
    #[serde(with = "decimal_u256")]
    pub num_circles: U256,
    #[serde(with = "decimal_u256")]
    pub num_squares: U256,
    #[serde(with = "decimal_u256")]
    pub num_triangles: U256,
}

impl CommitmentMessage {
    /// Parse every field from its base-10 string form.
    ///
    /// Each value must consist of ASCII digits only and fit in 256 bits.
    pub fn from_decimal(
        nonce: &str,
        game_number: &str,
        round_number: &str,
        num_circles: &str,
        num_squares: &str,
        num_triangles: &str,
    ) -> Result<Self, EncodingError> {
        Ok(Self {
            nonce: parse_uint("nonce", nonce)?,
            game_number: parse_uint("gameNumber", game_number)?,
            round_number: parse_uint("roundNumber", round_number)?,
            num_circles: parse_uint("numCircles", num_circles)?,
            num_squares: parse_uint("numSquares", num_squares)?,
            num_triangles: parse_uint("numTriangles", num_triangles)?,
        })
    }

    /// `hashStruct(message)`
    pub fn struct_hash(&self) -> B256 {
        self.to_sol().eip712_hash_struct()
    }

    fn to_sol(self) -> schema::ChoicesMessage {
        schema::ChoicesMessage {
            nonce: self.nonce,
            gameNumber: self.game_number,
            roundNumber: self.round_number,
            numCircles: self.num_circles,
            numSquares: self.num_squares,
            numTriangles: self.num_triangles,
        }
    }
}

/// A 32-byte EIP-712 signing digest
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex without a `0x` prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<B256> for Digest {
    fn from(value: B256) -> Self {
        Self(value.0)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = strip_hex_prefix(s);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(trimmed, &mut bytes)
            .map_err(|_| EncodingError::InvalidDigest(s.to_string()))?;
        Ok(Self(bytes))
    }
}

/// Compute the EIP-712 signing digest of `message` under `domain`.
pub fn build_digest(domain: &DomainParameters, message: &CommitmentMessage) -> Digest {
    let digest = message.to_sol().eip712_signing_hash(&domain.eip712_domain());
    trace!(
        chain_id = domain.chain_id,
        verifying_contract = %domain.verifying_contract,
        digest = %digest,
        "built commitment digest"
    );
    digest.into()
}

fn parse_uint(field: &'static str, value: &str) -> Result<U256, EncodingError> {
    let invalid = || EncodingError::InvalidInteger {
        field,
        value: value.to_string(),
    };

    // Plain ASCII digits only: no sign, whitespace, separators or radix prefix.
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    U256::from_str_radix(value, 10).map_err(|_| invalid())
}

pub(crate) fn parse_address(value: &str) -> Result<Address, EncodingError> {
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(strip_hex_prefix(value), &mut bytes)
        .map_err(|_| EncodingError::InvalidAddress(value.to_string()))?;
    Ok(Address::from(bytes))
}

pub(crate) fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Serde adapter writing `U256` as a base-10 string
mod decimal_u256 {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_uint("value", &s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    const ZERO_MESSAGE_DIGEST: &str =
        "a7f4700b4185134dc04b616831674a681f22fc24059ef5972f58f5012b650888";

    fn message(values: [u64; 6]) -> CommitmentMessage {
        CommitmentMessage {
            nonce: U256::from(values[0]),
            game_number: U256::from(values[1]),
            round_number: U256::from(values[2]),
            num_circles: U256::from(values[3]),
            num_squares: U256::from(values[4]),
            num_triangles: U256::from(values[5]),
        }
    }

    /// Word-by-word encoding of the scheme, independent of `sol!`.
    fn manual_digest(domain: &DomainParameters, msg: &CommitmentMessage) -> [u8; 32] {
        let mut encoded_domain = Vec::with_capacity(5 * 32);
        encoded_domain.extend_from_slice(keccak256(DOMAIN_TYPE).as_slice());
        encoded_domain.extend_from_slice(keccak256(PROTOCOL_NAME).as_slice());
        encoded_domain.extend_from_slice(keccak256(PROTOCOL_VERSION).as_slice());
        encoded_domain.extend_from_slice(&U256::from(domain.chain_id).to_be_bytes::<32>());
        encoded_domain.extend_from_slice(&[0u8; 12]);
        encoded_domain.extend_from_slice(domain.verifying_contract.as_slice());
        let separator = keccak256(&encoded_domain);

        let mut encoded_message = Vec::with_capacity(7 * 32);
        encoded_message.extend_from_slice(keccak256(CHOICES_MESSAGE_TYPE).as_slice());
        for field in [
            msg.nonce,
            msg.game_number,
            msg.round_number,
            msg.num_circles,
            msg.num_squares,
            msg.num_triangles,
        ] {
            encoded_message.extend_from_slice(&field.to_be_bytes::<32>());
        }
        let struct_hash = keccak256(&encoded_message);

        let mut payload = vec![0x19, 0x01];
        payload.extend_from_slice(separator.as_slice());
        payload.extend_from_slice(struct_hash.as_slice());
        keccak256(&payload).0
    }

    #[test]
    fn test_zero_message_golden_vector() {
        let digest = build_digest(&DomainParameters::default(), &CommitmentMessage::default());
        assert_eq!(digest.to_hex(), ZERO_MESSAGE_DIGEST);
    }

    #[test]
    fn test_domain_separator_golden_vector() {
        assert_eq!(
            hex::encode(DomainParameters::default().separator()),
            "a20087b9c4fd38440ff6e57dfdbdb4d6d9d8c87cab552c94fcbd284dacf09ba8"
        );
    }

    #[test]
    fn test_type_strings_match_schema() {
        assert_eq!(schema::ChoicesMessage::eip712_encode_type(), CHOICES_MESSAGE_TYPE);
        assert_eq!(
            DomainParameters::default().eip712_domain().encode_type(),
            DOMAIN_TYPE
        );
    }

    #[test]
    fn test_matches_manual_encoding() {
        let domain = DomainParameters::new(42161, "0x5FbDB2315678afecb367f032d93F642f64180aa3")
            .unwrap();
        let msg = message([987654321, 3, 7, 10, 0, 25]);
        assert_eq!(
            build_digest(&domain, &msg).as_bytes(),
            &manual_digest(&domain, &msg)
        );
    }

    #[test]
    fn test_nonzero_message_vector() {
        let digest = build_digest(&DomainParameters::default(), &message([1, 2, 3, 4, 5, 6]));
        assert_eq!(
            digest.to_hex(),
            "3f290039d53bc11f9e65c6adfc49e5451675ba2d98132dad7d20c9a893e6d563"
        );
    }

    #[test]
    fn test_chain_id_separates_domains() {
        let msg = message([1, 1, 1, 1, 1, 1]);
        let mainnet = build_digest(&DomainParameters::from_address(1, Address::ZERO), &msg);
        let sepolia = build_digest(&DomainParameters::from_address(11155111, Address::ZERO), &msg);
        assert_ne!(mainnet, sepolia);
    }

    #[test]
    fn test_contract_separates_domains() {
        let msg = message([1, 1, 1, 1, 1, 1]);
        let a = DomainParameters::new(1, "0x0000000000000000000000000000000000000001").unwrap();
        let b = DomainParameters::new(1, "0x0000000000000000000000000000000000000002").unwrap();
        assert_ne!(build_digest(&a, &msg), build_digest(&b, &msg));
    }

    #[test]
    fn test_swapped_counts_change_digest() {
        let domain = DomainParameters::default();
        let circles_first = build_digest(&domain, &message([0, 0, 0, 5, 3, 0]));
        let squares_first = build_digest(&domain, &message([0, 0, 0, 3, 5, 0]));
        assert_ne!(circles_first, squares_first);
    }

    #[test]
    fn test_from_decimal_parses_large_values() {
        let max = U256::MAX.to_string();
        let msg = CommitmentMessage::from_decimal(&max, "0", "007", "1", "2", "3").unwrap();
        assert_eq!(msg.nonce, U256::MAX);
        assert_eq!(msg.round_number, U256::from(7));
    }

    #[test]
    fn test_from_decimal_rejects_malformed_integers() {
        let overflow = format!("{}0", U256::MAX);
        for bad in ["", "-1", "+1", " 1", "1 ", "0x10", "1_000", "12a", overflow.as_str()] {
            let err = CommitmentMessage::from_decimal("0", "0", "0", bad, "0", "0").unwrap_err();
            assert_eq!(
                err,
                EncodingError::InvalidInteger {
                    field: "numCircles",
                    value: bad.to_string(),
                },
                "input {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_address_parsing() {
        let lower = DomainParameters::new(1, "0x5fbdb2315678afecb367f032d93f642f64180aa3").unwrap();
        let mixed = DomainParameters::new(1, "0x5FbDB2315678afecb367f032d93F642f64180aa3").unwrap();
        let bare = DomainParameters::new(1, "5FBDB2315678AFECB367F032D93F642F64180AA3").unwrap();
        assert_eq!(lower, mixed);
        assert_eq!(lower, bare);

        for bad in ["", "0x", "0x1234", "0xzz00000000000000000000000000000000000000", "0x000000000000000000000000000000000000000000"] {
            assert!(matches!(
                DomainParameters::new(1, bad),
                Err(EncodingError::InvalidAddress(_))
            ));
        }
    }

    #[test]
    fn test_digest_hex_roundtrip() {
        let digest: Digest = format!("0x{ZERO_MESSAGE_DIGEST}").parse().unwrap();
        assert_eq!(digest.to_string(), ZERO_MESSAGE_DIGEST);
        assert!("abcd".parse::<Digest>().is_err());
    }

    #[test]
    fn test_message_json_uses_decimal_strings() {
        let msg = message([12, 1, 2, 3, 4, 5]);
        let json = serde_json::to_value(msg).unwrap();
        assert_eq!(json["nonce"], "12");
        assert_eq!(json["numTriangles"], "5");

        let parsed: CommitmentMessage = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, msg);

        let bad = serde_json::json!({
            "nonce": "0x1", "gameNumber": "0", "roundNumber": "0",
            "numCircles": "0", "numSquares": "0", "numTriangles": "0"
        });
        assert!(serde_json::from_value::<CommitmentMessage>(bad).is_err());
    }
}

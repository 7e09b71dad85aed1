// Minimal ABI encoding for the argument types the sale registry uses.

use alloy_primitives::Address;
use primitive_types::U256;
use std::str::FromStr;

use crate::crypto::hashing::method_selector;
use crate::infra::ethereum::artifact::AbiParam;
use crate::infra::ethereum::ContractError;

const WORD: usize = 32;

/// Left-pads a hex address to 20 bytes. Short forms like `0x1` are accepted.
pub fn encode_address(raw: &str) -> Result<[u8; WORD], ContractError> {
    let invalid = |reason: &str| ContractError::InvalidArgument {
        ty: "address",
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(invalid("empty"));
    }
    if digits.len() > 40 {
        return Err(invalid("longer than 20 bytes"));
    }

    let address = parse_address(digits).ok_or_else(|| invalid("not hex"))?;

    let mut word = [0u8; WORD];
    word[WORD - 20..].copy_from_slice(address.as_slice());
    Ok(word)
}

/// Parses unprefixed hex digits, left-padding short forms to 20 bytes the way web3 does.
fn parse_address(digits: &str) -> Option<Address> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Address::from_str(&format!("{:0>40}", digits)).ok()
}

/// Encodes a decimal or `0x`-prefixed hex integer as a big-endian word.
pub fn encode_uint256(raw: &str) -> Result<[u8; WORD], ContractError> {
    let invalid = |reason: String| ContractError::InvalidArgument {
        ty: "uint256",
        value: raw.to_string(),
        reason,
    };

    let trimmed = raw.trim();
    let value = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some("") => return Err(invalid("empty".to_string())),
        Some(hex_digits) if !hex_digits.chars().all(|c| c.is_ascii_hexdigit()) => {
            return Err(invalid("not hex".to_string()))
        }
        Some(hex_digits) => U256::from_str_radix(hex_digits, 16).map_err(|e| invalid(format!("{:?}", e)))?,
        None if trimmed.is_empty() => return Err(invalid("empty".to_string())),
        None => U256::from_dec_str(trimmed).map_err(|e| invalid(format!("{:?}", e)))?,
    };

    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    Ok(word)
}

/// Canonical `name(type,...)` signature used for the selector.
pub fn signature(name: &str, inputs: &[AbiParam]) -> String {
    let types: Vec<&str> = inputs.iter().map(|p| canonical_type(&p.ty)).collect();
    format!("{}({})", name, types.join(","))
}

fn canonical_type(ty: &str) -> &str {
    match ty {
        "uint" => "uint256",
        other => other,
    }
}

/// Selector followed by one word per argument.
pub fn encode_call(name: &str, inputs: &[AbiParam], args: &[&str]) -> Result<Vec<u8>, ContractError> {
    if inputs.len() != args.len() {
        return Err(ContractError::Arity {
            method: name.to_string(),
            expected: inputs.len(),
            got: args.len(),
        });
    }

    let mut data = Vec::with_capacity(4 + WORD * args.len());
    data.extend_from_slice(&method_selector(&signature(name, inputs)));

    for (param, arg) in inputs.iter().zip(args) {
        let word = match canonical_type(&param.ty) {
            "address" => encode_address(arg)?,
            "uint256" => encode_uint256(arg)?,
            other => {
                return Err(ContractError::UnsupportedType {
                    ty: other.to_string(),
                })
            }
        };
        data.extend_from_slice(&word);
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(ty: &str) -> AbiParam {
        AbiParam {
            name: String::new(),
            ty: ty.to_string(),
        }
    }

    #[test]
    fn short_address_is_left_padded() {
        let word = encode_address("0x1").unwrap();
        assert!(word[..31].iter().all(|b| *b == 0));
        assert_eq!(word[31], 1);
    }

    #[test]
    fn full_address_keeps_its_bytes() {
        let word = encode_address("0x627306090abaB3A6e1400e9345bC60c78a8BEf57").unwrap();
        assert_eq!(hex::encode(&word[12..]), "627306090abab3a6e1400e9345bc60c78a8bef57");
    }

    #[test]
    fn bad_addresses_are_rejected() {
        assert!(encode_address("").is_err());
        assert!(encode_address("0x").is_err());
        assert!(encode_address("0xzz").is_err());
        assert!(encode_address("0x0x1").is_err());
        assert!(encode_address("0x+1").is_err());
        assert!(encode_address(&format!("0x{}", "1".repeat(41))).is_err());
    }

    #[test]
    fn uint_accepts_decimal_and_hex() {
        assert_eq!(encode_uint256("255").unwrap(), encode_uint256("0xff").unwrap());
        assert_eq!(encode_uint256("255").unwrap()[31], 0xff);
        assert!(encode_uint256("-1").is_err());
        assert!(encode_uint256("").is_err());
        assert!(encode_uint256("0x").is_err());
        assert!(encode_uint256("0x0x1").is_err());
        assert!(encode_uint256("0X0x1").is_err());
        assert!(encode_uint256("0x+1").is_err());
    }

    #[test]
    fn call_layout_is_selector_then_words() {
        let data = encode_call("setCrowdsaleToken", &[param("uint256"), param("address")], &["3", "0x2"]).unwrap();
        assert_eq!(data.len(), 4 + 64);
        assert_eq!(&data[..4], &method_selector("setCrowdsaleToken(uint256,address)"));
        assert_eq!(data[4 + 31], 3);
        assert_eq!(data[4 + 63], 2);
    }

    #[test]
    fn uint_alias_normalizes_in_signature() {
        assert_eq!(signature("setCrowdsaleEnded", &[param("uint")]), "setCrowdsaleEnded(uint256)");
    }

    #[test]
    fn arity_and_type_mismatches_fail() {
        assert!(matches!(
            encode_call("setCrowdsaleEnded", &[param("uint256")], &[]),
            Err(ContractError::Arity { expected: 1, got: 0, .. })
        ));
        assert!(matches!(
            encode_call("f", &[param("bytes32")], &["0x00"]),
            Err(ContractError::UnsupportedType { .. })
        ));
    }
}

//! Reversible rotation share codes.
//! Code format: BC1-<PAYLOAD>-<CHECK>, e.g., BC1-LFGGO-4C21

use thiserror::Error;

use crate::actions::ActionId;

const VERSION_TAG: &str = "BC1";
// Base32 alphabet; one symbol per catalog entry.
const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash = (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

fn checksum(payload: &str) -> String {
    format!("{:04X}", fnv1a64(payload.as_bytes()) & 0xFFFF)
}

/// Errors raised while decoding a rotation share code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShareCodeError {
    #[error("share code is not of the form {VERSION_TAG}-<payload>-<check>")]
    BadFormat,
    #[error("unsupported share code version `{version}`")]
    UnsupportedVersion { version: String },
    #[error("share code checksum mismatch")]
    ChecksumMismatch,
    #[error("share code symbol `{symbol}` names no catalog action")]
    UnknownSymbol { symbol: char },
}

/// Encode a rotation into a shareable text code.
#[must_use]
pub fn encode_rotation(rotation: &[ActionId]) -> String {
    let payload: String = rotation
        .iter()
        .map(|id| char::from(ALPHABET[usize::from(id.code())]))
        .collect();
    let check = checksum(&payload);
    format!("{VERSION_TAG}-{payload}-{check}")
}

/// Decode a share code back into the rotation it was built from.
///
/// # Errors
///
/// Returns a `ShareCodeError` for malformed codes, version or checksum
/// mismatches, and symbols naming no catalog action.
pub fn decode_rotation(code: &str) -> Result<Vec<ActionId>, ShareCodeError> {
    let trimmed = code.trim().to_ascii_uppercase();
    let mut parts = trimmed.splitn(3, '-');
    let version = parts.next().ok_or(ShareCodeError::BadFormat)?;
    let payload = parts.next().ok_or(ShareCodeError::BadFormat)?;
    let check = parts.next().ok_or(ShareCodeError::BadFormat)?;

    if version != VERSION_TAG {
        return Err(ShareCodeError::UnsupportedVersion {
            version: version.to_string(),
        });
    }
    if check != checksum(payload) {
        return Err(ShareCodeError::ChecksumMismatch);
    }

    payload
        .chars()
        .map(|symbol| {
            ALPHABET
                .iter()
                .position(|candidate| char::from(*candidate) == symbol)
                .and_then(|index| ActionId::from_code(index as u8))
                .ok_or(ShareCodeError::UnknownSymbol { symbol })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip_the_rotation() {
        let rotation = vec![
            ActionId::MuscleMemory,
            ActionId::InnerQuiet,
            ActionId::BasicTouch,
            ActionId::StandardTouch,
            ActionId::ByregotsBlessing,
            ActionId::CarefulSynthesis,
        ];
        let code = encode_rotation(&rotation);
        assert!(code.starts_with("BC1-"));
        assert_eq!(decode_rotation(&code).unwrap(), rotation);
    }

    #[test]
    fn decoding_is_case_insensitive() {
        let rotation = vec![ActionId::BasicSynthesis, ActionId::MastersMend];
        let code = encode_rotation(&rotation).to_ascii_lowercase();
        assert_eq!(decode_rotation(&code).unwrap(), rotation);
    }

    #[test]
    fn corrupted_payloads_are_rejected() {
        let code = encode_rotation(&[ActionId::BasicTouch, ActionId::BasicTouch]);
        let mut tampered = code.clone();
        tampered.replace_range(4..5, "Z");
        assert_eq!(
            decode_rotation(&tampered),
            Err(ShareCodeError::ChecksumMismatch)
        );
    }

    #[test]
    fn version_and_format_are_validated() {
        assert_eq!(
            decode_rotation("XY9-AAA-0000"),
            Err(ShareCodeError::UnsupportedVersion {
                version: "XY9".to_string()
            })
        );
        assert_eq!(decode_rotation("BC1"), Err(ShareCodeError::BadFormat));
        assert_eq!(decode_rotation("garbage"), Err(ShareCodeError::BadFormat));
    }

    #[test]
    fn out_of_catalog_symbols_are_rejected() {
        // Symbol 25 ("Z") is in the alphabet but past the catalog end.
        let payload = "Z";
        let code = format!("BC1-{payload}-{:04X}", fnv1a64(payload.as_bytes()) & 0xFFFF);
        assert_eq!(
            decode_rotation(&code),
            Err(ShareCodeError::UnknownSymbol { symbol: 'Z' })
        );
    }
}

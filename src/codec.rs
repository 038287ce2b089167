//! Compact, URL-safe tokens for results and configs.
//!
//! A token is the payload's JSON, raw-deflated when compression is enabled,
//! then base64 encoded with the URL-safe alphabet and no padding. Decoding
//! always tries inflate first and falls back to reading the bytes as plain
//! JSON, so tokens produced either way decode the same.
//!
//! This is obfuscation, not integrity: anyone can mint a token.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};
use thiserror::Error;

/// Largest JSON payload a token may carry, enforced on both encode and
/// inflate. Real tokens are a few hundred bytes.
pub const MAX_PAYLOAD_BYTES: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("deflate stream error: {0}")]
    Deflate(#[from] std::io::Error),
    #[error("payload exceeds {} bytes", MAX_PAYLOAD_BYTES)]
    TooLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    Deflate,
    None,
}

pub fn encode<T: Serialize>(payload: &T) -> Result<String, CodecError> {
    encode_with(payload, Compression::Deflate)
}

pub fn encode_with<T: Serialize>(
    payload: &T,
    compression: Compression,
) -> Result<String, CodecError> {
    let json = serde_json::to_vec(payload)?;
    if json.len() > MAX_PAYLOAD_BYTES {
        return Err(CodecError::TooLarge);
    }
    let bytes = match compression {
        Compression::Deflate => match deflate(&json) {
            Ok(compressed) => compressed,
            Err(e) => {
                debug!(target: "codec", "Compression failed, encoding plain JSON: {}", e);
                json
            }
        },
        Compression::None => json,
    };
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Decodes a token, returning `None` for anything malformed.
pub fn decode<T: DeserializeOwned>(token: &str) -> Option<T> {
    match try_decode(token) {
        Ok(payload) => Some(payload),
        Err(e) => {
            debug!(target: "codec", "Could not decode token {:?}: {}", token, e);
            None
        }
    }
}

pub fn try_decode<T: DeserializeOwned>(token: &str) -> Result<T, CodecError> {
    let bytes = token_bytes(token)?;
    let inflate_error = match inflate(&bytes) {
        Ok(inflated) => match serde_json::from_slice(&inflated) {
            Ok(payload) => return Ok(payload),
            Err(e) => {
                trace!(target: "codec", "Inflated bytes are not the payload: {}", e);
                None
            }
        },
        Err(e) => {
            trace!(target: "codec", "Token is not deflated: {}", e);
            Some(e)
        }
    };
    if bytes.len() > MAX_PAYLOAD_BYTES {
        return Err(CodecError::TooLarge);
    }
    match serde_json::from_slice(&bytes) {
        Ok(payload) => Ok(payload),
        // a stream that inflated past the limit is the more useful failure
        Err(_) if matches!(inflate_error, Some(CodecError::TooLarge)) => Err(CodecError::TooLarge),
        Err(e) => Err(e.into()),
    }
}

/// Maps the URL-safe alphabet back to the standard one and restores padding.
fn token_bytes(token: &str) -> Result<Vec<u8>, CodecError> {
    let standard: String = token
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    let padded_len = standard.len() + (4 - standard.len() % 4) % 4;
    let padded = format!("{:=<width$}", standard, width = padded_len);
    Ok(STANDARD.decode(padded)?)
}

fn deflate(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), flate2::Compression::best());
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Reads one byte past the limit so an oversized stream is reported rather
/// than cut short.
fn inflate(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut inflated = Vec::new();
    DeflateDecoder::new(bytes)
        .take(MAX_PAYLOAD_BYTES as u64 + 1)
        .read_to_end(&mut inflated)?;
    if inflated.len() > MAX_PAYLOAD_BYTES {
        return Err(CodecError::TooLarge);
    }
    Ok(inflated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::settings::MiniGameConfig;
    use crate::model::{GameId, GameResult};
    use chrono::DateTime;
    use std::time::Duration;

    fn result_for(player: &str) -> GameResult {
        GameResult {
            game: GameId::QuickMath,
            won: true,
            score: 90,
            elapsed: Duration::from_millis(1_042),
            code: "ABC234".to_string(),
            player: player.to_string(),
            created_at: DateTime::from_timestamp_millis(1_760_900_000_000).unwrap(),
        }
    }

    #[test]
    fn test_result_survives_both_encodings() {
        for player in ["Unknown", "Zoë \"the\" +/= ace", "名前 & <b>", ""] {
            let result = result_for(player);
            for compression in [Compression::Deflate, Compression::None] {
                let token = encode_with(&result, compression).unwrap();
                assert_eq!(decode::<GameResult>(&token), Some(result.clone()));
            }
        }
    }

    #[test]
    fn test_tokens_are_url_safe() {
        // enough varied bytes that the standard alphabet would need + and /
        let mut result = result_for("~~~???>>>~~~???>>>");
        for score in 0..64 {
            result.score = score * 997;
            for compression in [Compression::Deflate, Compression::None] {
                let token = encode_with(&result, compression).unwrap();
                assert!(
                    !token.contains(['+', '/', '=']),
                    "token not URL safe: {}",
                    token
                );
            }
        }
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = MiniGameConfig::default();
        config.enabled = true;
        config.show_after_minutes = 2.5;
        let token = encode(&config).unwrap();
        assert_eq!(decode::<MiniGameConfig>(&token), Some(config));
    }

    #[test]
    fn test_invalid_tokens_decode_to_none() {
        assert_eq!(decode::<serde_json::Value>("not-valid-base64!!!"), None);
        assert_eq!(decode::<serde_json::Value>(""), None);
        // length % 4 == 1 can never be valid base64
        assert_eq!(decode::<serde_json::Value>("abcde"), None);
        // valid base64, but neither deflate nor JSON
        let garbage = URL_SAFE_NO_PAD.encode([0xffu8, 0x00, 0x13, 0x37]);
        assert_eq!(decode::<serde_json::Value>(&garbage), None);
    }

    #[test]
    fn test_padded_standard_base64_of_json_decodes() {
        let json = serde_json::to_vec(&result_for("Sam")).unwrap();
        let token = STANDARD.encode(json);
        assert_eq!(decode::<GameResult>(&token), Some(result_for("Sam")));
    }

    #[test]
    fn test_corrupt_deflate_stream_is_rejected() {
        let token = encode(&result_for("Sam")).unwrap();
        let mut bytes = URL_SAFE_NO_PAD.decode(&token).unwrap();
        let len = bytes.len();
        bytes.truncate(len / 2);
        let broken = URL_SAFE_NO_PAD.encode(bytes);
        assert_eq!(decode::<GameResult>(&broken), None);
    }

    #[test]
    fn test_compressed_token_is_shorter_for_repetitive_payloads() {
        let result = result_for(&"abc".repeat(40));
        let compressed = encode_with(&result, Compression::Deflate).unwrap();
        let plain = encode_with(&result, Compression::None).unwrap();
        assert!(compressed.len() < plain.len());
    }

    #[test]
    fn test_oversized_payload_is_refused_at_encode() {
        let result = result_for(&"x".repeat(70_000));
        for compression in [Compression::Deflate, Compression::None] {
            assert!(matches!(
                encode_with(&result, compression),
                Err(CodecError::TooLarge)
            ));
        }
    }

    #[test]
    fn test_large_player_still_round_trips() {
        let result = result_for(&"x".repeat(60_000));
        let token = encode(&result).unwrap();
        assert_eq!(decode::<GameResult>(&token), Some(result));
    }

    #[test]
    fn test_oversized_deflate_stream_is_reported() {
        let json = serde_json::to_vec(&result_for(&"x".repeat(70_000))).unwrap();
        let token = URL_SAFE_NO_PAD.encode(deflate(&json).unwrap());
        assert!(matches!(
            try_decode::<GameResult>(&token),
            Err(CodecError::TooLarge)
        ));
        assert_eq!(decode::<GameResult>(&token), None);
    }
}

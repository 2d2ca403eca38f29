// src/node/encoder.rs
// Call payload encoding for precompile/contract calls.

use sha3::{Digest, Keccak256};

const WORD: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("malformed function signature '{0}'")]
    Signature(String),
    #[error("unsupported parameter type '{0}' (only string is supported)")]
    UnsupportedType(String),
    #[error("expected {expected} arguments, got {got}")]
    ArgCount { expected: usize, got: usize },
    #[error("selector mismatch for '{0}'")]
    Selector(String),
    #[error("payload truncated at offset {0}")]
    Truncated(usize),
    #[error("argument is not valid utf-8")]
    Utf8,
}

/// Turns a function signature plus arguments into an opaque call payload.
pub trait CallEncoder: Send + Sync {
    fn encode(&self, signature: &str, args: &[&str]) -> anyhow::Result<Vec<u8>>;
}

/// Solidity ABI encoding restricted to `string` parameters, which is all the
/// console's precompile calls need.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbiEncoder;

impl AbiEncoder {
    /// First four bytes of keccak256(signature).
    pub fn selector(signature: &str) -> [u8; 4] {
        let digest = Keccak256::digest(signature.as_bytes());
        [digest[0], digest[1], digest[2], digest[3]]
    }

    fn string_params(signature: &str) -> Result<usize, AbiError> {
        let open = signature
            .find('(')
            .ok_or_else(|| AbiError::Signature(signature.to_string()))?;
        if open == 0 || !signature.ends_with(')') {
            return Err(AbiError::Signature(signature.to_string()));
        }
        let params = &signature[open + 1..signature.len() - 1];
        if params.is_empty() {
            return Ok(0);
        }
        let mut count = 0;
        for ty in params.split(',') {
            if ty != "string" {
                return Err(AbiError::UnsupportedType(ty.to_string()));
            }
            count += 1;
        }
        Ok(count)
    }

    pub fn encode_strings(signature: &str, args: &[&str]) -> Result<Vec<u8>, AbiError> {
        let expected = Self::string_params(signature)?;
        if expected != args.len() {
            return Err(AbiError::ArgCount {
                expected,
                got: args.len(),
            });
        }
        let mut head = Vec::with_capacity(args.len() * WORD);
        let mut tail = Vec::new();
        for arg in args {
            head.extend_from_slice(&u256_word((args.len() * WORD + tail.len()) as u64));
            tail.extend_from_slice(&u256_word(arg.len() as u64));
            tail.extend_from_slice(arg.as_bytes());
            tail.resize(tail.len() + padding(arg.len()), 0);
        }
        let mut out = Vec::with_capacity(4 + head.len() + tail.len());
        out.extend_from_slice(&Self::selector(signature));
        out.extend_from_slice(&head);
        out.extend_from_slice(&tail);
        Ok(out)
    }

    /// Inverse of [`AbiEncoder::encode_strings`]; checks the selector first.
    pub fn decode_strings(signature: &str, data: &[u8]) -> Result<Vec<String>, AbiError> {
        let count = Self::string_params(signature)?;
        if data.len() < 4 {
            return Err(AbiError::Truncated(0));
        }
        if data[..4] != Self::selector(signature) {
            return Err(AbiError::Selector(signature.to_string()));
        }
        let body = &data[4..];
        let mut out = Vec::with_capacity(count);
        for i in 0..count {
            let offset = read_word(body, i * WORD)?;
            let len = read_word(body, offset)?;
            let start = offset.checked_add(WORD).ok_or(AbiError::Truncated(offset))?;
            let end = start.checked_add(len).ok_or(AbiError::Truncated(start))?;
            let bytes = body.get(start..end).ok_or(AbiError::Truncated(start))?;
            out.push(String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::Utf8)?);
        }
        Ok(out)
    }
}

impl CallEncoder for AbiEncoder {
    fn encode(&self, signature: &str, args: &[&str]) -> anyhow::Result<Vec<u8>> {
        Ok(Self::encode_strings(signature, args)?)
    }
}

fn padding(len: usize) -> usize {
    (WORD - len % WORD) % WORD
}

fn u256_word(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

fn read_word(body: &[u8], at: usize) -> Result<usize, AbiError> {
    let end = at.checked_add(WORD).ok_or(AbiError::Truncated(at))?;
    let word = body.get(at..end).ok_or(AbiError::Truncated(at))?;
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(AbiError::Truncated(at));
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(low)).map_err(|_| AbiError::Truncated(at))
}

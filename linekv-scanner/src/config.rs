/// What the source does with bytes that are not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Policy {
    /// End the token stream with [`ScanError::InvalidUtf8`](linekv_common::ScanError::InvalidUtf8).
    #[default]
    Fail,
    /// Decode each maximal invalid byte run to U+FFFD and keep scanning.
    Replace,
}

/// Scanner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanConfig {
    pub invalid_utf8: Utf8Policy,
}

impl ScanConfig {
    /// Settings that never fail on undecodable bytes.
    pub fn lossy() -> Self {
        Self {
            invalid_utf8: Utf8Policy::Replace,
        }
    }
}

// wallet-core/src/crypto/mnemonic.rs
//
// Mnemonic Module - BIP-39 phrase generation and seed derivation
// Standards: BIP-39 (Mnemonic), PBKDF2-HMAC-SHA512 (Seed Derivation)

use crate::error::{MnemonicError, WalletError, WalletResult};
use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Supported word counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    #[default]
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    /// Entropy size in bytes for this word count
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::Fifteen => 20,
            WordCount::Eighteen => 24,
            WordCount::TwentyOne => 28,
            WordCount::TwentyFour => 32,
        }
    }
}

// =============================================================================
// ENTROPY SOURCE
// =============================================================================

/// Source of the random bytes a new mnemonic is built from.
///
/// Production code uses [`OsEntropy`]; tests plug in a fixed value to get a
/// known BIP-39 test vector out of the generator.
pub trait EntropySource {
    fn fill_entropy(&mut self, buf: &mut [u8]) -> Result<(), MnemonicError>;
}

/// OS-level CSPRNG (`OsRng`)
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_entropy(&mut self, buf: &mut [u8]) -> Result<(), MnemonicError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| MnemonicError::Entropy(e.to_string()))
    }
}

// =============================================================================
// WALLET MNEMONIC
// =============================================================================

/// BIP-39 mnemonic holder
///
/// # Security
/// - **ZeroizeOnDrop**: the phrase is overwritten with zeros when dropped
/// - **No Debug Leak**: the `Debug` impl never prints the phrase
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// New 12-word mnemonic (128-bit entropy) from the OS RNG
    pub fn new() -> WalletResult<Self> {
        Self::generate(WordCount::Twelve, &mut OsEntropy)
    }

    /// New mnemonic with the given word count, entropy drawn from `source`
    pub fn generate<E: EntropySource + ?Sized>(
        word_count: WordCount,
        source: &mut E,
    ) -> WalletResult<Self> {
        let entropy_size = word_count.entropy_bytes();

        // Stack buffer, max 32 bytes
        let mut entropy = [0u8; 32];
        let filled = source.fill_entropy(&mut entropy[..entropy_size]);
        let result = filled.map_err(WalletError::from).and_then(|()| {
            Self::from_entropy(&entropy[..entropy_size])
        });
        entropy.zeroize();

        result
    }

    /// Build the mnemonic that encodes `entropy` (16, 20, 24, 28 or 32 bytes)
    pub fn from_entropy(entropy: &[u8]) -> WalletResult<Self> {
        let mnemonic = Mnemonic::from_entropy(entropy)
            .map_err(|e| WalletError::Mnemonic(MnemonicError::Bip39Error(e.to_string())))?;

        Ok(Self {
            word_count: mnemonic.word_count(),
            phrase: mnemonic.to_string(),
        })
    }

    /// Restore a mnemonic from an existing phrase
    ///
    /// # Validation
    /// - word count (12, 15, 18, 21, 24)
    /// - every word is in the English wordlist
    /// - checksum
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        let normalized = phrase.split_whitespace().collect::<Vec<_>>();
        let count = normalized.len();

        if !matches!(count, 12 | 15 | 18 | 21 | 24) {
            return Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(
                count,
            )));
        }

        let normalized_phrase = normalized.join(" ");
        Mnemonic::parse(&normalized_phrase).map_err(|e| {
            WalletError::Mnemonic(match e {
                bip39::Error::BadWordCount(n) => MnemonicError::InvalidWordCount(n),
                bip39::Error::UnknownWord(idx) => MnemonicError::UnknownWord(
                    normalized.get(idx).copied().unwrap_or_default().to_string(),
                ),
                bip39::Error::InvalidChecksum => MnemonicError::ChecksumFailed,
                other => MnemonicError::Bip39Error(other.to_string()),
            })
        })?;

        Ok(Self {
            phrase: normalized_phrase,
            word_count: count,
        })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// The phrase itself
    ///
    /// # Warning
    /// This is the only backup of the wallet. Never log it.
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn words(&self) -> Vec<&str> {
        self.phrase.split_whitespace().collect()
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// 64-byte BIP-39 seed (PBKDF2-HMAC-SHA512, 2048 rounds)
    ///
    /// `passphrase` is the optional BIP-39 "25th word"; the wallet always
    /// uses `None`.
    pub fn to_seed(&self, passphrase: Option<&str>) -> WalletResult<Zeroizing<[u8; 64]>> {
        let mnemonic = Mnemonic::parse(&self.phrase)
            .map_err(|e| WalletError::Mnemonic(MnemonicError::Bip39Error(e.to_string())))?;
        Ok(Zeroizing::new(mnemonic.to_seed(passphrase.unwrap_or(""))))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Full validation: word count, wordlist, checksum
    #[inline]
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // BIP-39 test vectors (entropy 0x00 * 16 / 0x00 * 32)
    const TEST_MNEMONIC_12: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const TEST_MNEMONIC_24: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";
    const TEST_SEED_12: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    struct FixedEntropy(u8);

    impl EntropySource for FixedEntropy {
        fn fill_entropy(&mut self, buf: &mut [u8]) -> Result<(), MnemonicError> {
            buf.fill(self.0);
            Ok(())
        }
    }

    struct BrokenEntropy;

    impl EntropySource for BrokenEntropy {
        fn fill_entropy(&mut self, _buf: &mut [u8]) -> Result<(), MnemonicError> {
            Err(MnemonicError::Entropy("device unavailable".into()))
        }
    }

    #[test]
    fn test_new_12_words() {
        let mnemonic = WalletMnemonic::new().unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        assert!(WalletMnemonic::validate(mnemonic.phrase()));
    }

    #[test]
    fn test_generate_24_words() {
        let mnemonic = WalletMnemonic::generate(WordCount::TwentyFour, &mut OsEntropy).unwrap();
        assert_eq!(mnemonic.word_count(), 24);
        assert!(WalletMnemonic::validate(mnemonic.phrase()));
    }

    #[test]
    fn test_generate_from_fixed_entropy() {
        let mnemonic = WalletMnemonic::generate(WordCount::Twelve, &mut FixedEntropy(0)).unwrap();
        assert_eq!(mnemonic.phrase(), TEST_MNEMONIC_12);

        let mnemonic =
            WalletMnemonic::generate(WordCount::TwentyFour, &mut FixedEntropy(0)).unwrap();
        assert_eq!(mnemonic.phrase(), TEST_MNEMONIC_24);
    }

    #[test]
    fn test_entropy_failure_is_reported() {
        let result = WalletMnemonic::generate(WordCount::Twelve, &mut BrokenEntropy);
        assert!(matches!(
            result,
            Err(WalletError::Mnemonic(MnemonicError::Entropy(_)))
        ));
    }

    #[test]
    fn test_from_entropy_bad_length() {
        assert!(WalletMnemonic::from_entropy(&[0u8; 15]).is_err());
    }

    #[test]
    fn test_from_phrase_normalizes_whitespace() {
        let messy_phrase =
            "  abandon  abandon   abandon abandon abandon abandon abandon abandon abandon abandon abandon about  ";
        let mnemonic = WalletMnemonic::from_phrase(messy_phrase).unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        assert_eq!(mnemonic.phrase(), TEST_MNEMONIC_12);
    }

    #[test]
    fn test_from_phrase_invalid_word_count() {
        let result = WalletMnemonic::from_phrase("abandon abandon abandon");
        assert!(matches!(
            result,
            Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(3)))
        ));
    }

    #[test]
    fn test_from_phrase_invalid_word() {
        let invalid = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon invalid";
        let result = WalletMnemonic::from_phrase(invalid);
        assert_eq!(
            result.unwrap_err(),
            WalletError::Mnemonic(MnemonicError::UnknownWord("invalid".to_string()))
        );
    }

    #[test]
    fn test_from_phrase_bad_checksum() {
        // All valid words, wrong checksum word
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        let result = WalletMnemonic::from_phrase(bad);
        assert_eq!(
            result.unwrap_err(),
            WalletError::Mnemonic(MnemonicError::ChecksumFailed)
        );
    }

    #[test]
    fn test_to_seed_vector() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let seed = mnemonic.to_seed(None).unwrap();
        assert_eq!(hex::encode(&*seed), TEST_SEED_12);
    }

    #[test]
    fn test_to_seed_with_passphrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let seed_no_pass = mnemonic.to_seed(None).unwrap();
        let seed_with_pass = mnemonic.to_seed(Some("TREZOR")).unwrap();
        assert_ne!(&*seed_no_pass, &*seed_with_pass);
    }

    #[test]
    fn test_words() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let words = mnemonic.words();
        assert_eq!(words.len(), 12);
        assert_eq!(words[0], "abandon");
        assert_eq!(words[11], "about");
    }

    #[test]
    fn test_debug_does_not_leak_phrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let debug_output = format!("{:?}", mnemonic);

        assert!(!debug_output.contains("abandon"));
        assert!(debug_output.contains("REDACTED"));
        assert!(debug_output.contains("word_count: 12"));
    }

    #[test]
    fn test_unique_generation() {
        let m1 = WalletMnemonic::new().unwrap();
        let m2 = WalletMnemonic::new().unwrap();
        assert_ne!(m1.phrase(), m2.phrase());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_any_128_bit_entropy_round_trips(entropy in any::<[u8; 16]>()) {
            let generated = WalletMnemonic::from_entropy(&entropy).unwrap();
            prop_assert_eq!(generated.word_count(), 12);

            let restored = WalletMnemonic::from_phrase(generated.phrase()).unwrap();
            let seed_a = generated.to_seed(None).unwrap();
            let seed_b = restored.to_seed(None).unwrap();
            prop_assert_eq!(&*seed_a, &*seed_b);
        }
    }
}

// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// Cleans user utterances and corpus texts before vectorisation.
//
// Cleaning steps (applied in order):
//   1. Lowercase
//   2. Fold Spanish accents (á → a, ü → u); ñ is a letter of its own
//   3. Every non-alphanumeric character (¿ ¡ , . ! ...) becomes a space
//   4. Drop stop words
//   5. Join the surviving tokens with single spaces
//
// Interrogatives ("que", "cuanto") and order verbs ("quiero") are
// not stop words.

/// Spanish stop words, in accent-folded form.
const STOP_WORDS: &[&str] = &[
    "a", "al", "algo", "algun", "alguna", "algunas", "alguno", "algunos", "ante",
    "asi", "aun", "bajo", "cada", "con", "contra", "de", "del", "desde", "el",
    "ella", "ellas", "ellos", "en", "entre", "era", "eres", "es", "esa", "esas",
    "ese", "eso", "esos", "esta", "estas", "este", "esto", "estos", "fue", "ha",
    "han", "hay", "hasta", "la", "las", "le", "les", "lo", "los", "mas", "me",
    "mi", "mis", "muy", "nos", "nosotros", "o", "os", "para", "pero", "por",
    "se", "si", "sin", "sobre", "su", "sus", "tambien", "te", "ti", "tu", "tus",
    "u", "un", "una", "unas", "uno", "unos", "usted", "vosotros", "y", "ya", "yo",
];

#[derive(Debug, Clone, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Lowercased, accent-folded, stop-word-free tokens.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let folded: String = text
            .chars()
            .flat_map(char::to_lowercase)
            .map(fold_accent)
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();

        folded
            .split_whitespace()
            .filter(|t| !is_stop_word(t))
            .map(str::to_string)
            .collect()
    }

    /// The normalised text: tokens joined by single spaces.
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Fold a lowercase accented vowel to its plain form.
pub fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        c => c,
    }
}

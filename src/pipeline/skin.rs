use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;

/// Term used whenever classification cannot produce a mapped label.
pub const DEFAULT_TERM: &str = "medium";

// Coarse attribute labels -> cosmetic skin-tone descriptors. The key set
// is exactly the six labels the attribute model can emit.
static SKIN_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("white", "fair"),
        ("black", "deep"),
        ("asian", "light-medium"),
        ("indian", "medium"),
        ("latino hispanic", "medium-tan"),
        ("middle eastern", "olive"),
    ])
});

/// Map a lower-cased attribute label to its display term. Labels outside
/// the vocabulary resolve to [`DEFAULT_TERM`].
pub fn term_for_label(label: &str) -> &'static str {
    SKIN_MAP.get(label).copied().unwrap_or(DEFAULT_TERM)
}

/// Narrow seam over the face-attribute capability. Implementations never
/// fail: anything that prevents classification resolves to the default
/// term internally.
pub trait SkinToneClassifier: Send + Sync {
    fn classify(&self, image_path: &Path) -> String;
}

/// Classifier used when no attribute model is available. Always answers
/// with the default term.
pub struct DefaultClassifier;

impl SkinToneClassifier for DefaultClassifier {
    fn classify(&self, _image_path: &Path) -> String {
        DEFAULT_TERM.to_string()
    }
}

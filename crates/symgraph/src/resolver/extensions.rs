//! Extension and index-file probing for module resolution.

use rustc_hash::FxHashSet;

/// Extensions tried, in order, when a specifier names a file without one.
pub const EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Strip a trailing `.ts`, `.tsx`, `.js` or `.jsx` from a specifier.
pub fn strip_source_extension(specifier: &str) -> &str {
    EXTENSIONS
        .iter()
        .find_map(|ext| {
            let stem = specifier.strip_suffix(ext)?.strip_suffix('.')?;
            (!stem.is_empty() && !stem.ends_with('/')).then_some(stem)
        })
        .unwrap_or(specifier)
}

/// Candidate file paths for `base`, in probing order.
///
/// `base`, `base.ts` .. `base.jsx`, then `base/index` and its extension variants.
pub fn candidates(base: &str) -> Vec<String> {
    let index = if base.is_empty() {
        "index".to_string()
    } else {
        format!("{base}/index")
    };

    let mut out = Vec::with_capacity(2 * (EXTENSIONS.len() + 1));
    for stem in [base, index.as_str()] {
        if !stem.is_empty() {
            out.push(stem.to_string());
        }
        out.extend(EXTENSIONS.iter().map(|ext| format!("{stem}.{ext}")));
    }
    out
}

/// Return the first candidate for `base` that exists in `known`.
pub fn probe(base: &str, known: &FxHashSet<String>) -> Option<String> {
    candidates(base)
        .into_iter()
        .find(|candidate| known.contains(candidate))
}

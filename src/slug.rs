/// Convert text to a URL-friendly slug.
///
/// Lowercases, drops everything but ASCII word characters, whitespace and hyphens,
/// then collapses separator runs into single hyphens.
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
        } else if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        }
    }

    slug
}

/// Slugify `text`, appending `-1`, `-2`, ... until the slug is not in `existing`.
pub fn unique_slug<S: AsRef<str>>(text: &str, existing: &[S]) -> String {
    let taken = |candidate: &str| existing.iter().any(|s| s.as_ref() == candidate);
    let base = slugify(text);
    if !taken(&base) {
        return base;
    }

    let mut counter = 1;
    loop {
        let candidate = format!("{base}-{counter}");
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

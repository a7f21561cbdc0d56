//! Segment-to-identifier normalization

/// Join segments into a single PascalCase identifier
///
/// Every hyphen-separated piece gets its first character uppercased and the
/// hyphens are dropped: `["user-profile", "edit"]` becomes `UserProfileEdit`.
/// The rest of each piece is left untouched.
pub fn normalize<S: AsRef<str>>(segments: &[S]) -> String {
    let mut identifier = String::new();
    for segment in segments {
        for piece in segment.as_ref().split('-') {
            let mut chars = piece.chars();
            if let Some(first) = chars.next() {
                identifier.extend(first.to_uppercase());
                identifier.push_str(chars.as_str());
            }
        }
    }
    identifier
}

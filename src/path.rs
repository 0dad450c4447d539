//! Path normalization for display and copy.
//!
//! Catalog paths carry a file extension (`textures/blocks/stone.png`), while
//! the identifier users paste elsewhere omits it (`textures/blocks/stone`).

/// Strip the extension from the final segment of `path`, keeping its directory.
///
/// Trailing slashes are ignored. The extension starts at the last `.` of the
/// base name; a dot at the very start of the base name (`.hidden`) and the
/// `..` segment are not extension boundaries. The result is `dir/stem` when a
/// directory exists (a root directory stays `/`), else just the stem.
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        // "" or nothing but slashes
        return path.to_string();
    }

    let (dir, base) = match trimmed.rfind('/') {
        Some(0) => ("/", &trimmed[1..]),
        Some(idx) => (&trimmed[..idx], &trimmed[idx + 1..]),
        None => ("", trimmed),
    };

    let stem = match base.rfind('.') {
        Some(idx) if idx > 0 && base != ".." => &base[..idx],
        _ => base,
    };

    if dir.is_empty() {
        stem.to_string()
    } else {
        format!("{}/{}", dir, stem)
    }
}

/// Final `/`-delimited segment of `path`, extension included.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

//! Object key decomposition.
//!
//! Storage keys are treated as opaque strings: only the last `/` and the last
//! `.` of the filename are significant, and no `.`/`..` normalization happens.

use crate::error::{Error, Result};

/// An input object key split into the parts the job builder reuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputReference {
    /// Everything up to and including the last `/`, or empty.
    pub prefix_path: String,
    /// Filename without its extension. Never empty.
    pub base_name: String,
    /// Extension without the leading dot, or empty.
    pub extension: String,
}

impl InputReference {
    /// Prefix under which all transcoder outputs for this input are written.
    pub fn output_key_prefix(&self) -> String {
        format!("{}transcoded/", self.prefix_path)
    }
}

/// Split `input` into prefix path, basename and extension.
///
/// Fails with [`Error::InvalidInput`] when the basename would be empty, e.g.
/// for `uploads/` or `uploads/.mp4`.
pub fn decompose(input: &str) -> Result<InputReference> {
    let (prefix_path, file_name) = match input.rfind('/') {
        Some(idx) => input.split_at(idx + 1),
        None => ("", input),
    };

    let (base_name, extension) = match file_name.rfind('.') {
        Some(idx) => (&file_name[..idx], &file_name[idx + 1..]),
        None => (file_name, ""),
    };

    if base_name.is_empty() {
        return Err(Error::invalid_input(format!(
            "Input basename is empty: {input:?}"
        )));
    }

    Ok(InputReference {
        prefix_path: prefix_path.to_string(),
        base_name: base_name.to_string(),
        extension: extension.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parts(r: &InputReference) -> (&str, &str, &str) {
        (&r.prefix_path, &r.base_name, &r.extension)
    }

    fn rejoin(r: &InputReference) -> String {
        if r.extension.is_empty() {
            format!("{}{}", r.prefix_path, r.base_name)
        } else {
            format!("{}{}.{}", r.prefix_path, r.base_name, r.extension)
        }
    }

    #[test]
    fn prefix_basename_extension() {
        let r = decompose("uploads/clip.mov").unwrap();
        assert_eq!(parts(&r), ("uploads/", "clip", "mov"));
    }

    #[test]
    fn bare_basename() {
        let r = decompose("clip").unwrap();
        assert_eq!(parts(&r), ("", "clip", ""));
    }

    #[test]
    fn nested_prefix_is_kept_verbatim() {
        let r = decompose("a/b/../c//movie.mp4").unwrap();
        assert_eq!(parts(&r), ("a/b/../c//", "movie", "mp4"));
    }

    #[test]
    fn embedded_dots_stay_in_basename() {
        let r = decompose("upload/my.holiday.video.mkv").unwrap();
        assert_eq!(parts(&r), ("upload/", "my.holiday.video", "mkv"));
    }

    #[test]
    fn leading_dot_with_stem_is_accepted() {
        let r = decompose("x/.hidden.mp4").unwrap();
        assert_eq!(parts(&r), ("x/", ".hidden", "mp4"));
    }

    #[test]
    fn empty_filename_is_rejected() {
        assert_matches!(decompose("uploads/"), Err(Error::InvalidInput(_)));
        assert_matches!(decompose(""), Err(Error::InvalidInput(_)));
    }

    #[test]
    fn bare_extension_is_rejected() {
        assert_matches!(decompose("a/.mp4"), Err(Error::InvalidInput(_)));
        assert_matches!(decompose(".mp4"), Err(Error::InvalidInput(_)));
    }

    #[test]
    fn rejoin_reconstructs_key() {
        let keys = [
            "clip",
            "clip.mov",
            "uploads/clip.mov",
            "upload/3f1c0a9e-uuid.webm",
            "deep/er/path/name.with.dots.mp4",
        ];

        for key in keys {
            let r = decompose(key).unwrap();
            assert_eq!(rejoin(&r), key);
        }
    }

    #[test]
    fn trailing_dot_yields_empty_extension() {
        let r = decompose("a/b.").unwrap();
        assert_eq!(parts(&r), ("a/", "b", ""));
        // The dot is not recoverable from the parts.
        assert_eq!(rejoin(&r), "a/b");
    }

    #[test]
    fn dot_dot_filename_is_taken_literally() {
        let r = decompose("a/..").unwrap();
        assert_eq!(parts(&r), ("a/", ".", ""));
        assert_eq!(r.output_key_prefix(), "a/transcoded/");

        assert_matches!(decompose("a/."), Err(Error::InvalidInput(_)));
    }

    #[test]
    fn output_prefix_follows_input_prefix() {
        assert_eq!(
            decompose("uploads/clip.mov").unwrap().output_key_prefix(),
            "uploads/transcoded/"
        );
        assert_eq!(decompose("clip.mov").unwrap().output_key_prefix(), "transcoded/");
    }
}

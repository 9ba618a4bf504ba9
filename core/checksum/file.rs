use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;

// `MD5 (lib-1.0.jar) = <hex>`, as written by BSD tools.
static BSD_STYLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.+= [0-9A-Fa-f]+$").unwrap());

/// Read the digest out of a checksum side-file.
///
/// Three formats are understood: a bare digest, `<digest>  <file name>` as written by
/// `sha1sum` and friends, and `ALGO (<file name>) = <digest>`. Only the first non-blank line
/// is looked at, and a file without one yields an empty digest.
///
pub fn read_checksum_file(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);

    let line = match text.lines().map(str::trim).find(|line| !line.is_empty()) {
        Some(line) => line,
        None => return Ok(String::new()),
    };

    let digest = if BSD_STYLE.is_match(line) {
        line.rsplit(' ').next().unwrap_or(line)
    } else {
        line.split(' ').next().unwrap_or(line)
    };

    Ok(digest.to_string())
}

pub fn write_checksum_file(path: &Path, digest: &str) -> io::Result<()> {
    fs::write(path, digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    const DIGEST: &str = "6b3fbbc3b9a7c3d9ae8ac8e9b4a4d09c1f6e0f5e";

    fn read(contents: &str) -> String {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("a.jar.sha1");
        file.write_str(contents).unwrap();
        read_checksum_file(file.path()).unwrap()
    }

    #[test]
    fn reads_a_bare_digest() {
        assert_eq!(read(DIGEST), DIGEST);
        assert_eq!(read(&format!("  {}  \n", DIGEST)), DIGEST);
    }

    #[test]
    fn reads_a_digest_followed_by_a_file_name() {
        assert_eq!(read(&format!("{}  a.jar\n", DIGEST)), DIGEST);
    }

    #[test]
    fn reads_bsd_style_digests() {
        assert_eq!(read(&format!("SHA1 (a.jar) = {}\n", DIGEST)), DIGEST);
        assert_eq!(read(&format!("MD5 (some file.jar) = {}", DIGEST)), DIGEST);
    }

    #[test]
    fn skips_leading_blank_lines() {
        assert_eq!(read(&format!("\n   \n{}\nignored\n", DIGEST)), DIGEST);
    }

    #[test]
    fn empty_files_have_an_empty_digest() {
        assert_eq!(read(""), "");
        assert_eq!(read("\n \n"), "");
    }

    #[test]
    fn missing_files_are_errors() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let err = read_checksum_file(&tmp.path().join("nope.sha1")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn written_digests_read_back() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let path = tmp.path().join("a.jar.md5");
        write_checksum_file(&path, DIGEST).unwrap();
        assert_eq!(read_checksum_file(&path).unwrap(), DIGEST);
    }
}

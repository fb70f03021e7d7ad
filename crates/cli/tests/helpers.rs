use dgslice::sha256_file;
use tempfile::tempdir;

#[test]
fn sha256_file_matches_known_hash() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("abc.txt");
    std::fs::write(&path, b"abc").unwrap();
    assert_eq!(
        sha256_file(&path).unwrap(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn sha256_file_errors_on_missing_file() {
    let dir = tempdir().unwrap();
    let err = sha256_file(&dir.path().join("missing")).unwrap_err();
    assert!(err.to_string().contains("Failed to open file for hashing"));
}

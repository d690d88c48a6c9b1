use portable_report::site::index_patcher::{
    BACKUP_INDEX_FILE, INDEX_FILE, PORTABLE_INDEX_FILE, PatchOutcome, patch_index,
};
use tempfile::TempDir;

const ALLURE_INDEX: &str = "<html><body>allure single page app</body></html>";

#[test]
fn first_patch_backs_up_original_index() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(INDEX_FILE), ALLURE_INDEX).unwrap();
    std::fs::write(dir.path().join(PORTABLE_INDEX_FILE), "<html>portable</html>").unwrap();

    let outcome = patch_index(dir.path()).unwrap();
    assert_eq!(
        outcome,
        PatchOutcome {
            backed_up: true,
            placeholder_written: false
        }
    );

    let backup = std::fs::read_to_string(dir.path().join(BACKUP_INDEX_FILE)).unwrap();
    assert_eq!(backup, ALLURE_INDEX);

    let shim = std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
    assert!(shim.contains("href=\"portable-index.html\""));
    assert!(shim.contains("href=\"index.allure.html\""));
    assert!(shim.contains("location.protocol === 'file:'"));

    // Existing portable report is left alone
    let portable = std::fs::read_to_string(dir.path().join(PORTABLE_INDEX_FILE)).unwrap();
    assert_eq!(portable, "<html>portable</html>");
}

#[test]
fn second_patch_keeps_backup_intact() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(INDEX_FILE), ALLURE_INDEX).unwrap();

    patch_index(dir.path()).unwrap();
    let after_first = std::fs::read(dir.path().join(BACKUP_INDEX_FILE)).unwrap();

    let outcome = patch_index(dir.path()).unwrap();
    assert!(!outcome.backed_up);

    let after_second = std::fs::read(dir.path().join(BACKUP_INDEX_FILE)).unwrap();
    assert_eq!(after_first, after_second);
    assert_eq!(after_second, ALLURE_INDEX.as_bytes());
}

#[test]
fn placeholder_written_when_portable_missing() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(INDEX_FILE), ALLURE_INDEX).unwrap();

    let outcome = patch_index(dir.path()).unwrap();
    assert!(outcome.placeholder_written);

    let placeholder = std::fs::read_to_string(dir.path().join(PORTABLE_INDEX_FILE)).unwrap();
    assert!(placeholder.contains("not generated yet"));
}

#[test]
fn patch_without_original_index_still_writes_shim() {
    let dir = TempDir::new().unwrap();

    let outcome = patch_index(dir.path()).unwrap();
    assert!(!outcome.backed_up);
    assert!(!dir.path().join(BACKUP_INDEX_FILE).exists());
    assert!(dir.path().join(INDEX_FILE).exists());
    assert!(dir.path().join(PORTABLE_INDEX_FILE).exists());
}

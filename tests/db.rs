mod common;

#[test]
fn test_db_applies_migrations_and_cleans_up() {
    let base = "test_db_applies_migrations_and_cleans_up.db";

    {
        let test_db = common::TestDb::new(base);
        assert!(test_db.pool().get().is_ok());
        // Applying again is a no-op.
        assert!(pushkind_inventory::run_migrations(&test_db.pool()).is_ok());
    }

    let db_path = std::path::Path::new(base);
    assert!(!db_path.exists());
    assert!(!std::path::Path::new(&format!("{base}-shm")).exists());
    assert!(!std::path::Path::new(&format!("{base}-wal")).exists());
}

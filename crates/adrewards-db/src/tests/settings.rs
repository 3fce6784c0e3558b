use super::test_db;

#[test]
fn test_open_and_migrate() {
    let db = test_db();
    let settings = db.get_all_settings().unwrap();
    assert!(settings.is_empty());
}

#[test]
fn test_settings_crud() {
    let db = test_db();
    db.set_setting("PROFILE_NAME", "Alex", "normal").unwrap();
    assert_eq!(db.get_setting("PROFILE_NAME").unwrap(), Some("Alex".into()));

    db.set_setting("PROFILE_NAME", "Sam", "normal").unwrap();
    assert_eq!(db.get_setting("PROFILE_NAME").unwrap(), Some("Sam".into()));
    assert_eq!(db.get_all_settings().unwrap().len(), 1);

    db.delete_setting("PROFILE_NAME").unwrap();
    assert_eq!(db.get_setting("PROFILE_NAME").unwrap(), None);
}

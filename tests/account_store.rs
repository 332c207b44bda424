use chocolate_accounts::{AccountError, AccountStore, NewAccount, Session, UserSummary};
use chrono::NaiveDate;
use tempfile::TempDir;

fn create_test_store() -> (TempDir, AccountStore) {
    let tmp = tempfile::tempdir().unwrap();
    let store = AccountStore::new(tmp.path().join("users.db"));
    store.initialize().unwrap();
    (tmp, store)
}

fn account(name: &str, email: &str, password: &str) -> NewAccount {
    NewAccount {
        name: name.into(),
        email: email.into(),
        address: "Addr".into(),
        city: "City".into(),
        tel: "555".into(),
        location_preference: "near".into(),
        chocolate_preference: "dark".into(),
        first_visit: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        password: password.into(),
    }
}

fn login(store: &AccountStore, email: &str, password: &str) -> Session {
    store.login(email, password).unwrap().expect("login should succeed")
}

#[test]
fn test_create_login_and_list() {
    let (_tmp, store) = create_test_store();

    let id = store.create_account(&account("Ana", "ana@x.com", "pw1")).unwrap();
    assert_eq!(id, 1);

    let session = login(&store, "ana@x.com", "pw1");
    assert_eq!(session.user().name, "Ana");
    assert_eq!(session.user().first_visit, "2024-01-01");

    let users = store.list_users().unwrap();
    assert_eq!(
        users,
        vec![UserSummary {
            id: 1,
            name: "Ana".into(),
            email: "ana@x.com".into(),
        }]
    );
}

#[test]
fn test_initialize_is_idempotent() {
    let (_tmp, store) = create_test_store();
    store.create_account(&account("Ana", "ana@x.com", "pw1")).unwrap();

    store.initialize().unwrap();
    assert_eq!(store.list_users().unwrap().len(), 1);
}

#[test]
fn test_list_users_empty() {
    let (_tmp, store) = create_test_store();
    assert!(store.list_users().unwrap().is_empty());
}

#[test]
fn test_duplicate_email_rejected() {
    let (_tmp, store) = create_test_store();
    store.create_account(&account("Ana", "ana@x.com", "pw1")).unwrap();

    let err = store
        .create_account(&account("Other", "ana@x.com", "pw2"))
        .unwrap_err();
    assert!(matches!(err, AccountError::DuplicateEmail(ref e) if e == "ana@x.com"));

    let users = store.list_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Ana");
}

#[test]
fn test_login_requires_exact_pair() {
    let (_tmp, store) = create_test_store();
    store.create_account(&account("Ana", "ana@x.com", "pw1")).unwrap();

    assert!(store.login("ana@x.com", "wrong").unwrap().is_none());
    assert!(store.login("nobody@x.com", "pw1").unwrap().is_none());
    // Comparison is case-sensitive on both fields.
    assert!(store.login("ANA@x.com", "pw1").unwrap().is_none());
    assert!(store.login("ana@x.com", "PW1").unwrap().is_none());
    assert!(store.login("ana@x.com", "pw1").unwrap().is_some());
}

#[test]
fn test_view_personal_info_requires_login() {
    let (_tmp, store) = create_test_store();
    let err = store.view_personal_info(None).unwrap_err();
    assert!(matches!(err, AccountError::NotAuthenticated));
}

#[test]
fn test_view_personal_info_returns_snapshot() {
    let (_tmp, store) = create_test_store();
    store.create_account(&account("Ana", "ana@x.com", "pw1")).unwrap();
    let session = login(&store, "ana@x.com", "pw1");

    let user = store.view_personal_info(Some(&session)).unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.email, "ana@x.com");
    assert_eq!(user.address, "Addr");
    assert_eq!(user.city, "City");
    assert_eq!(user.tel, "555");
    assert_eq!(user.location_preference, "near");
    assert_eq!(user.chocolate_preference, "dark");
}

#[test]
fn test_delete_account_confirmed() {
    let (_tmp, store) = create_test_store();
    store.create_account(&account("Ana", "ana@x.com", "pw1")).unwrap();
    store.create_account(&account("Bo", "bo@x.com", "pw2")).unwrap();
    let mut session = Some(login(&store, "ana@x.com", "pw1"));

    let deleted = store
        .delete_account(&mut session, "ana@x.com", "pw1", " YES ")
        .unwrap();
    assert!(deleted);
    assert!(session.is_none());

    let users = store.list_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "bo@x.com");
    assert!(store.login("ana@x.com", "pw1").unwrap().is_none());
}

#[test]
fn test_delete_account_cancelled() {
    let (_tmp, store) = create_test_store();
    store.create_account(&account("Ana", "ana@x.com", "pw1")).unwrap();
    let mut session = Some(login(&store, "ana@x.com", "pw1"));
    let before = session.clone();

    let deleted = store
        .delete_account(&mut session, "ana@x.com", "pw1", "no")
        .unwrap();
    assert!(!deleted);
    assert_eq!(session, before);
    assert_eq!(store.list_users().unwrap().len(), 1);
}

#[test]
fn test_delete_account_requires_login() {
    let (_tmp, store) = create_test_store();
    let mut session = None;
    let err = store
        .delete_account(&mut session, "ana@x.com", "pw1", "yes")
        .unwrap_err();
    assert!(matches!(err, AccountError::NotAuthenticated));
}

#[test]
fn test_delete_account_credential_mismatch() {
    let (_tmp, store) = create_test_store();
    store.create_account(&account("Ana", "ana@x.com", "pw1")).unwrap();
    let mut session = Some(login(&store, "ana@x.com", "pw1"));

    let err = store
        .delete_account(&mut session, "ana@x.com", "nope", "yes")
        .unwrap_err();
    assert!(matches!(err, AccountError::CredentialMismatch));

    let err = store
        .delete_account(&mut session, "other@x.com", "pw1", "yes")
        .unwrap_err();
    assert!(matches!(err, AccountError::CredentialMismatch));

    assert!(session.is_some());
    assert_eq!(store.list_users().unwrap().len(), 1);
}

#[test]
fn test_ids_not_reused_after_delete() {
    let (_tmp, store) = create_test_store();
    store.create_account(&account("Ana", "ana@x.com", "pw1")).unwrap();
    let mut session = Some(login(&store, "ana@x.com", "pw1"));
    store
        .delete_account(&mut session, "ana@x.com", "pw1", "yes")
        .unwrap();

    let id = store.create_account(&account("Ana", "ana@x.com", "pw1")).unwrap();
    assert_eq!(id, 2);
}

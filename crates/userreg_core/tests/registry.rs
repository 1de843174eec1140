use std::io::Cursor;
use userreg_core::{
    Field, JsonUserStore, LinePrompt, RegisterRequest, RegistryError, RegistryService,
};

fn open_service(dir: &tempfile::TempDir) -> RegistryService<JsonUserStore> {
    let store = JsonUserStore::open(dir.path().join("data").join("users.json")).unwrap();
    RegistryService::new(store)
}

#[test]
fn register_then_duplicate_email_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&dir);

    let alice = service
        .register(&RegisterRequest::new("Alice", "alice@example.com", "Password1@"))
        .unwrap();
    let err = service
        .register(&RegisterRequest::new("Bob", "alice@example.com", "Password2@"))
        .unwrap_err();

    assert!(matches!(err, RegistryError::DuplicateEmail(email) if email == "alice@example.com"));
    let users = service.list_users().unwrap();
    assert_eq!(users, vec![alice]);
    assert_eq!(users[0].name, "Alice");
}

#[test]
fn register_rejects_invalid_fields_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&dir);

    let cases = [
        (RegisterRequest::new("Bo", "bo@example.com", "Password1@"), Field::Name),
        (RegisterRequest::new("Bob", "bo@example", "Password1@"), Field::Email),
        (RegisterRequest::new("Bob", "bo@example.com", "password"), Field::Password),
    ];
    for (request, field) in cases {
        let err = service.register(&request).unwrap_err();
        assert!(
            matches!(err, RegistryError::InvalidField(ref e) if e.field == field),
            "unexpected error for {request:?}: {err}"
        );
    }
    assert!(service.list_users().unwrap().is_empty());
}

#[test]
fn interactive_registration_persists_valid_answers() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&dir);
    let mut io = LinePrompt::new(
        Cursor::new("Alice\nalice@example.com\nPassword1@\n"),
        Vec::new(),
    );

    let user = service.register_interactive(&mut io).unwrap();

    let users = service.list_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Alice");
    assert_eq!(users[0].email, "alice@example.com");
    assert_eq!(users[0].id, user.id);
}

#[test]
fn exhausted_password_prompt_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&dir);
    let mut io = LinePrompt::new(
        Cursor::new("Alice\nalice@example.com\nweak\nweak\nweak\nweak\nPassword1@\n"),
        Vec::new(),
    );

    let err = service.register_interactive(&mut io).unwrap_err();

    assert!(matches!(
        err,
        RegistryError::RetryExhausted { field: Field::Password, .. }
    ));
    assert!(service.list_users().unwrap().is_empty());
}

#[test]
fn search_and_delete_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&dir);
    let carol = service
        .register(&RegisterRequest::new("Carol", "carol@example.com", "Password1@"))
        .unwrap();
    service
        .register(&RegisterRequest::new("Caroline", "caroline@example.com", "Password1@"))
        .unwrap();

    assert_eq!(service.search_by_name("carol").unwrap().len(), 2);
    assert_eq!(
        service.find_by_id(carol.id.as_str()).unwrap(),
        Some(carol.clone())
    );
    assert_eq!(
        service.find_by_email("carol@example.com").unwrap(),
        Some(carol.clone())
    );

    let removed = service.delete_user(carol.id.as_str()).unwrap();
    assert_eq!(removed, carol);
    assert!(service.find_by_id(carol.id.as_str()).unwrap().is_none());
    assert!(matches!(
        service.delete_user(carol.id.as_str()).unwrap_err(),
        RegistryError::UserNotFound(_)
    ));
    assert_eq!(service.list_users().unwrap().len(), 1);
}

use rollbook::db::{DbActorArgs, StudentFields, StudentStore};

async fn spawn_memory_store() -> rollbook::db::DbActorHandle {
    rollbook::db::spawn(DbActorArgs {
        database_url: "sqlite::memory:".to_string(),
        bootstrap_schema: true,
    })
    .await
    .expect("failed to spawn DbActor on in-memory sqlite")
}

fn fields(name: &str, email: &str) -> StudentFields {
    StudentFields {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn test_student_db_actor_baseline() {
    let db = spawn_memory_store().await;

    // 1. Fresh store is empty
    let students = db.list_students().await.unwrap();
    assert!(students.is_empty(), "Expected no students initially");

    // 2. Insert reports the generated id and one affected row
    let outcome = db
        .insert_student(fields("Ada", "ada@x.com"))
        .await
        .unwrap();
    assert_eq!(outcome.affected_rows, 1);
    let id = outcome.insert_id;
    assert!(id > 0, "Expected a valid ID after creation");

    // 3. Lookup by email finds exactly that row
    let found = db.find_by_email("ada@x.com").await.unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.name, "Ada");
    assert!(db.find_by_email("nobody@x.com").await.unwrap().is_none());

    // 4. Update by id
    let affected = db
        .update_student(id, fields("Ada L.", "ada@x.com"))
        .await
        .unwrap();
    assert_eq!(affected, 1);
    let students = db.list_students().await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].name, "Ada L.");

    // 5. Writes against a missing id touch nothing
    assert_eq!(
        db.update_student(id + 100, fields("X", "x@x.com"))
            .await
            .unwrap(),
        0
    );
    assert_eq!(db.delete_student(id + 100).await.unwrap(), 0);

    // 6. Delete by id
    assert_eq!(db.delete_student(id).await.unwrap(), 1);
    assert!(db.list_students().await.unwrap().is_empty());

    db.stop();
}

#[tokio::test]
async fn list_returns_rows_in_id_order() {
    let db = spawn_memory_store().await;

    let a = db.insert_student(fields("A", "a@x.com")).await.unwrap();
    let b = db.insert_student(fields("B", "b@x.com")).await.unwrap();
    let c = db.insert_student(fields("C", "c@x.com")).await.unwrap();

    let ids: Vec<_> = db
        .list_students()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![a.insert_id, b.insert_id, c.insert_id]);
}

#[tokio::test]
async fn duplicate_email_insert_is_a_unique_violation() {
    let db = spawn_memory_store().await;

    db.insert_student(fields("Ada", "ada@x.com")).await.unwrap();
    let err = db
        .insert_student(fields("Other Ada", "ada@x.com"))
        .await
        .expect_err("email column is UNIQUE");
    assert!(err.is_unique_violation(), "unexpected error: {err}");

    assert_eq!(db.list_students().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_onto_a_taken_email_is_rejected_by_the_store() {
    let db = spawn_memory_store().await;

    let ada = db.insert_student(fields("Ada", "ada@x.com")).await.unwrap();
    let bob = db.insert_student(fields("Bob", "bob@x.com")).await.unwrap();
    assert_ne!(ada.insert_id, bob.insert_id);

    let err = db
        .update_student(bob.insert_id, fields("Bob", "ada@x.com"))
        .await
        .expect_err("email column is UNIQUE");
    assert!(err.is_unique_violation(), "unexpected error: {err}");

    let emails: Vec<_> = db
        .list_students()
        .await
        .unwrap()
        .into_iter()
        .map(|s| (s.id, s.email))
        .collect();
    assert_eq!(
        emails,
        vec![
            (ada.insert_id, "ada@x.com".to_string()),
            (bob.insert_id, "bob@x.com".to_string()),
        ]
    );
}

#[tokio::test]
async fn spawn_fails_when_store_is_unreachable() {
    let res = rollbook::db::spawn(DbActorArgs {
        database_url: "sqlite:///nonexistent-dir/for/sure/students.db?mode=ro".to_string(),
        bootstrap_schema: true,
    })
    .await;
    assert!(res.is_err(), "connect failure must surface at spawn");
}

#[tokio::test]
async fn stopped_actor_reports_ractor_error() {
    let db = spawn_memory_store().await;
    db.stop();
    // Give the actor a moment to process the stop signal.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let err = db.list_students().await.expect_err("actor is stopped");
    assert!(matches!(err, rollbook::StoreError::RactorError(_)));
}

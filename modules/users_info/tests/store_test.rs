mod common;

use common::{count_rows, service_for, test_db};
use users_info::contract::model::{DeleteStatus, NewUser, User, UserReply, UserUpdate};

fn alice() -> NewUser {
    NewUser::new("A", "a@x.com", "1", "addr", "US")
}

#[tokio::test]
async fn insert_get_update_delete_scenario() {
    let t = test_db().await;
    let svc = service_for(&t.db);

    let created = svc.add_user(alice()).await;
    let expected = User {
        user_id: 1,
        name: "A".into(),
        email: "a@x.com".into(),
        phone: "1".into(),
        address: "addr".into(),
        country: "US".into(),
    };
    assert_eq!(created, UserReply::Found(expected.clone()));
    assert_eq!(svc.get_user(1).await, UserReply::Found(expected.clone()));

    let updated = svc
        .update_user(UserUpdate {
            user_id: 1,
            fields: NewUser::new("B", "a@x.com", "1", "addr", "US"),
        })
        .await;
    let renamed = User {
        name: "B".into(),
        ..expected
    };
    assert_eq!(updated, UserReply::Found(renamed.clone()));
    assert_eq!(svc.get_user(1).await, UserReply::Found(renamed));

    assert_eq!(svc.delete_user(1).await, DeleteStatus::Deleted);
    assert_eq!(svc.get_user(1).await, UserReply::NotFound);
    assert_eq!(svc.get_user(999).await, UserReply::NotFound);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let t = test_db().await;
    let svc = service_for(&t.db);

    let id = svc.add_user(alice()).await.user().unwrap().user_id;
    assert_eq!(svc.delete_user(id).await, DeleteStatus::Deleted);
    assert_eq!(svc.delete_user(id).await, DeleteStatus::Deleted);
    assert_eq!(svc.delete_user(12345).await, DeleteStatus::Deleted);
    assert_eq!(svc.get_user(id).await, UserReply::NotFound);
}

#[tokio::test]
async fn list_tracks_inserts_and_deletes_in_order() {
    let t = test_db().await;
    let svc = service_for(&t.db);
    assert!(svc.list_users().await.is_empty());

    let mut ids = Vec::new();
    for i in 0..5 {
        let reply = svc
            .add_user(NewUser::new(format!("u{i}"), "e", "p", "a", "c"))
            .await;
        ids.push(reply.user().unwrap().user_id);
    }
    svc.delete_user(ids[1]).await;
    svc.delete_user(ids[3]).await;

    let listed: Vec<i64> = svc.list_users().await.iter().map(|u| u.user_id).collect();
    assert_eq!(listed, vec![ids[0], ids[2], ids[4]]);

    let names: Vec<String> = svc.list_users().await.into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["u0", "u2", "u4"]);
}

#[tokio::test]
async fn ids_are_never_reused() {
    let t = test_db().await;
    let svc = service_for(&t.db);

    let first = svc.add_user(alice()).await.user().unwrap().user_id;
    let second = svc.add_user(alice()).await.user().unwrap().user_id;
    svc.delete_user(second).await;

    let third = svc.add_user(alice()).await.user().unwrap().user_id;
    assert!(third > second && second > first);
}

#[tokio::test]
async fn empty_strings_are_accepted() {
    let t = test_db().await;
    let svc = service_for(&t.db);

    let reply = svc.add_user(NewUser::new("", "", "", "", "")).await;
    let user = reply.user().expect("stored");
    assert_eq!(user.name, "");
    assert_eq!(count_rows(&t.db).await, 1);
}

#[tokio::test]
async fn null_field_rolls_back_insert() {
    let t = test_db().await;
    let svc = service_for(&t.db);

    let mut input = alice();
    input.country = None;

    assert_eq!(svc.add_user(input).await, UserReply::Empty);
    assert_eq!(count_rows(&t.db).await, 0);
    assert!(svc.list_users().await.is_empty());
}

#[tokio::test]
async fn null_field_rolls_back_update() {
    let t = test_db().await;
    let svc = service_for(&t.db);
    let before = svc.add_user(alice()).await;

    let mut fields = NewUser::new("B", "b", "2", "x", "DE");
    fields.email = None;
    let reply = svc.update_user(UserUpdate { user_id: 1, fields }).await;

    assert_eq!(reply, UserReply::Empty);
    assert_eq!(svc.get_user(1).await, before);
}

#[tokio::test]
async fn update_of_missing_id_changes_nothing() {
    let t = test_db().await;
    let svc = service_for(&t.db);
    svc.add_user(alice()).await;

    let reply = svc
        .update_user(UserUpdate {
            user_id: 42,
            fields: NewUser::new("Z", "z", "z", "z", "z"),
        })
        .await;

    assert_eq!(reply, UserReply::NotFound);
    assert_eq!(svc.get_user(42).await, UserReply::NotFound);
    let all = svc.list_users().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "A");
}

#[tokio::test]
async fn store_survives_schema_bootstrap_twice() {
    let t = test_db().await;
    let svc = service_for(&t.db);
    svc.add_user(alice()).await;

    users_info::infra::storage::ensure_users_table(&t.db)
        .await
        .unwrap();

    assert_eq!(svc.list_users().await.len(), 1);
}

#[tokio::test]
async fn missing_table_collapses_to_sentinels() {
    let t = test_db().await;
    {
        let mut conn = t.db.acquire().await.unwrap();
        sqlx::query("DROP TABLE users")
            .execute(&mut *conn)
            .await
            .unwrap();
        conn.release().await.unwrap();
    }
    let svc = service_for(&t.db);

    assert!(svc.list_users().await.is_empty());
    assert_eq!(svc.get_user(1).await, UserReply::LookupFailed);
    assert_eq!(svc.add_user(alice()).await, UserReply::Empty);
    assert_eq!(
        svc.update_user(UserUpdate {
            user_id: 1,
            fields: alice()
        })
        .await,
        UserReply::Empty
    );
    assert_eq!(svc.delete_user(1).await, DeleteStatus::CannotDelete);
}

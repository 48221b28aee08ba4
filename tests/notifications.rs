use stockbook::domain::notification::{NewNotification, NotificationKind, NotificationStatus};
use stockbook::repository::errors::RepositoryError;
use stockbook::repository::{DieselRepository, NotificationReader, NotificationWriter};

mod common;

#[test]
fn test_notifications_start_unread_and_read_is_terminal() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (_, business_id) = common::seed_business(&repo, "owner-1", "Corner Shop");

    let created = repo
        .create_notification(&NewNotification::new(
            business_id,
            "Mug is running low: 2 left (threshold 3)",
            NotificationKind::LowStock,
        ))
        .unwrap();
    assert_eq!(created.status, NotificationStatus::Unread);
    assert_eq!(created.kind, NotificationKind::LowStock);
    assert!(created.read_at.is_none());

    let read = repo.mark_read(created.id, business_id).unwrap();
    assert_eq!(read.status, NotificationStatus::Read);
    let first_read_at = read.read_at.expect("read_at should be set on transition");

    // Re-marking keeps the original read timestamp.
    let again = repo.mark_read(created.id, business_id).unwrap();
    assert_eq!(again.status, NotificationStatus::Read);
    assert_eq!(again.read_at, Some(first_read_at));
}

#[test]
fn test_list_unread_excludes_read_and_other_businesses() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (_, mine) = common::seed_business(&repo, "owner-1", "Mine");
    let (_, theirs) = common::seed_business(&repo, "owner-2", "Theirs");

    let first = repo
        .create_notification(&NewNotification::new(
            mine,
            "first",
            NotificationKind::Milestone,
        ))
        .unwrap();
    repo.create_notification(&NewNotification::new(
        mine,
        "second",
        NotificationKind::SalesAlert,
    ))
    .unwrap();
    repo.create_notification(&NewNotification::new(
        theirs,
        "not yours",
        NotificationKind::Milestone,
    ))
    .unwrap();

    repo.mark_read(first.id, mine).unwrap();

    let unread = repo.list_unread(mine).unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].message, "second");

    // Cross-business reads are indistinguishable from missing rows.
    let other = repo.list_unread(theirs).unwrap();
    let err = repo
        .mark_read(other[0].id, mine)
        .expect_err("expected business-scoped mark to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

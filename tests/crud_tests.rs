//! Create / get / update / delete tests
mod common;

use chrono::{Duration, TimeZone, Utc};
use common::*;
use todo_service::{DeadlineStatus, TodoError, TodoInput, TodoStatus, TodoStore};

// 作成と取得のラウンドトリップテスト
// 作成した項目をIDで取得すると、タイムスタンプ以外のフィールドが一致することを確認
#[tokio::test]
async fn test_create_then_get_round_trip() {
    let service = get_test_service();
    let input = TodoInput {
        title: Some("Write report".to_string()),
        description: Some("Quarterly numbers".to_string()),
        status: Some("in-progress".to_string()),
        deadline: Some("2025-06-17T12:00:00Z".to_string()),
    };

    let created = service.handle_create(input).await.unwrap();
    let fetched = service.handle_get(&created.todo.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.todo.title, "Write report");
    assert_eq!(fetched.todo.description.as_deref(), Some("Quarterly numbers"));
    assert_eq!(fetched.todo.status, TodoStatus::InProgress);
    assert_eq!(
        fetched.todo.deadline,
        Some(Utc.with_ymd_and_hms(2025, 6, 17, 12, 0, 0).unwrap())
    );
    assert_eq!(fetched.deadline_status, DeadlineStatus::DueSoon);
}

// 作成時のデフォルト値テスト
// ステータス未指定時は pending、作成日時と更新日時が現在時刻になることを確認
#[tokio::test]
async fn test_create_defaults() {
    let service = get_test_service();

    let created = service.handle_create(titled("  Buy milk  ")).await.unwrap();

    assert_eq!(created.todo.title, "Buy milk");
    assert_eq!(created.todo.status, TodoStatus::Pending);
    assert_eq!(created.todo.created_at, fixed_now());
    assert_eq!(created.todo.updated_at, fixed_now());
    assert!(created.todo.description.is_none());
    assert!(created.todo.deadline.is_none());
    assert_eq!(created.deadline_status, DeadlineStatus::None);
    assert!(!created.todo.id.is_empty());
}

// IDの一意性テスト
#[tokio::test]
async fn test_create_assigns_unique_ids() {
    let service = get_test_service();

    let a = service.handle_create(titled("A")).await.unwrap();
    let b = service.handle_create(titled("A")).await.unwrap();
    assert_ne!(a.todo.id, b.todo.id);
}

// 作成時のバリデーションテスト
// 全ての違反がまとめて報告されることを確認
#[tokio::test]
async fn test_create_reports_every_violation() {
    let service = get_test_service();
    let input = TodoInput {
        title: Some("   ".to_string()),
        description: None,
        status: Some("done".to_string()),
        deadline: Some("someday".to_string()),
    };

    let err = service.handle_create(input).await.unwrap_err();
    match err {
        TodoError::Validation(violations) => {
            assert_eq!(violations.len(), 3);
            assert!(violations[0].contains("Title"));
            assert!(violations[1].contains("'done'"));
            assert!(violations[2].contains("'someday'"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    // Nothing was stored
    assert_eq!(service.store().scan_all().unwrap().len(), 0);
}

// タイトル欠落のテスト
#[tokio::test]
async fn test_create_requires_title() {
    let service = get_test_service();

    let err = service.handle_create(TodoInput::default()).await.unwrap_err();
    assert!(matches!(err, TodoError::Validation(ref v) if v.len() == 1));
    assert_eq!(err.status_code(), 400);
}

// 存在しないIDの取得テスト
#[tokio::test]
async fn test_get_nonexistent() {
    let service = get_test_service();

    let err = service.handle_get("missing").await.unwrap_err();
    assert!(matches!(err, TodoError::NotFound(ref id) if id == "missing"));
    assert_eq!(err.status_code(), 404);
}

// 部分更新のテスト
// 指定したフィールドだけが変わり、作成日時は変わらず更新日時が更新されることを確認
#[tokio::test]
async fn test_partial_update() {
    let service = service_with(vec![create_test_todo("a", TodoStatus::Pending, -60)]);

    let input = TodoInput {
        status: Some("completed".to_string()),
        ..Default::default()
    };
    let updated = service.handle_update("a", input).await.unwrap();

    assert_eq!(updated.todo.status, TodoStatus::Completed);
    assert_eq!(updated.todo.title, "Todo a");
    assert_eq!(updated.todo.created_at, fixed_now() - Duration::minutes(60));
    assert_eq!(updated.todo.updated_at, fixed_now());
    assert!(updated.todo.created_at <= updated.todo.updated_at);

    let fetched = service.handle_get("a").await.unwrap();
    assert_eq!(fetched.todo.status, TodoStatus::Completed);
}

// 更新時のフィールドクリアテスト
// 空文字列を指定すると説明と期限がクリアされることを確認
#[tokio::test]
async fn test_update_clears_optional_fields() {
    let mut todo = create_test_todo_with_deadline("a", TodoStatus::Pending, fixed_now());
    todo.description = Some("details".to_string());
    let service = service_with(vec![todo]);

    let input = TodoInput {
        description: Some(String::new()),
        deadline: Some(String::new()),
        ..Default::default()
    };
    let updated = service.handle_update("a", input).await.unwrap();

    assert!(updated.todo.description.is_none());
    assert!(updated.todo.deadline.is_none());
    assert_eq!(updated.deadline_status, DeadlineStatus::None);
}

// 更新時のバリデーションテスト
// 不正な値は拒否され、レコードは変更されないことを確認
#[tokio::test]
async fn test_update_rejects_invalid_fields() {
    let service = service_with(vec![create_test_todo("a", TodoStatus::Pending, 0)]);

    let input = TodoInput {
        title: Some(String::new()),
        status: Some("archived".to_string()),
        ..Default::default()
    };
    let err = service.handle_update("a", input).await.unwrap_err();
    assert!(matches!(err, TodoError::Validation(ref v) if v.len() == 2));

    let fetched = service.handle_get("a").await.unwrap();
    assert_eq!(fetched.todo.title, "Todo a");
    assert_eq!(fetched.todo.status, TodoStatus::Pending);
}

// 存在しないIDの更新テスト
#[tokio::test]
async fn test_update_nonexistent() {
    let service = get_test_service();

    let err = service.handle_update("missing", titled("x")).await.unwrap_err();
    assert!(matches!(err, TodoError::NotFound(_)));
}

// 削除テスト
// 削除後はIDが解決できなくなることを確認
#[tokio::test]
async fn test_delete() {
    let service = get_test_service();
    let created = service.handle_create(titled("Temp")).await.unwrap();

    service.handle_delete(&created.todo.id).await.unwrap();

    let err = service.handle_get(&created.todo.id).await.unwrap_err();
    assert!(matches!(err, TodoError::NotFound(_)));
}

// 存在しないIDの削除テスト
// 黙って成功せず NotFound を返すことを確認
#[tokio::test]
async fn test_delete_nonexistent() {
    let service = get_test_service();

    let err = service.handle_delete("missing").await.unwrap_err();
    assert!(matches!(err, TodoError::NotFound(_)));

    let created = service.handle_create(titled("Once")).await.unwrap();
    service.handle_delete(&created.todo.id).await.unwrap();
    let err = service.handle_delete(&created.todo.id).await.unwrap_err();
    assert!(matches!(err, TodoError::NotFound(_)));
}

// IDの前後空白のテスト
#[tokio::test]
async fn test_ids_are_trimmed() {
    let service = service_with(vec![create_test_todo("abc", TodoStatus::Pending, 0)]);

    let fetched = service.handle_get("  abc ").await.unwrap();
    assert_eq!(fetched.todo.id, "abc");
}

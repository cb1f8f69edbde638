//! TOML file store tests
mod common;

use std::fs;
use tempfile::{NamedTempFile, TempDir};
use todo_service::todo::{SortSpec, TodoFilter};
use todo_service::{TodoError, TodoInput, TodoService, TodoStatus, TodoStore, TomlFileStore};

fn get_test_service() -> (TodoService<TomlFileStore>, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let store = TomlFileStore::open(temp_file.path()).unwrap();
    (
        TodoService::new(store).with_clock(common::fixed_now),
        temp_file,
    )
}

// 存在しないファイルのテスト
// ファイルがない場合は空のストアとして開けることを確認
#[test]
fn test_open_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("todos.toml");

    let store = TomlFileStore::open(&path).unwrap();
    assert_eq!(store.count(&TodoFilter::default()).unwrap(), 0);
    assert_eq!(store.file_path(), path.as_path());
    assert!(!path.exists());
}

// 保存と再読み込みのテスト
// 作成した項目がファイルに書き込まれ、開き直しても残っていることを確認
#[tokio::test]
async fn test_records_survive_reopen() {
    let (service, temp_file) = get_test_service();

    let input = TodoInput {
        title: Some("Persist me".to_string()),
        description: Some("multi\nline".to_string()),
        status: Some("in-progress".to_string()),
        deadline: Some("2025-07-01".to_string()),
    };
    let created = service.handle_create(input).await.unwrap();

    let content = fs::read_to_string(temp_file.path()).unwrap();
    assert!(content.contains("format_version = 1"));
    assert!(content.contains("[[todos]]"));
    assert!(content.contains("in-progress"));

    let reopened = TomlFileStore::open(temp_file.path()).unwrap();
    let loaded = reopened.get(&created.todo.id).unwrap().unwrap();
    assert_eq!(loaded, created.todo);
}

// 更新と削除の永続化テスト
#[tokio::test]
async fn test_update_and_delete_are_persisted() {
    let (service, temp_file) = get_test_service();
    let keep = service
        .handle_create(common::titled("Keep"))
        .await
        .unwrap();
    let drop_me = service
        .handle_create(common::titled("Drop"))
        .await
        .unwrap();

    let input = TodoInput {
        status: Some("completed".to_string()),
        ..Default::default()
    };
    service.handle_update(&keep.todo.id, input).await.unwrap();
    service.handle_delete(&drop_me.todo.id).await.unwrap();

    let reopened = TomlFileStore::open(temp_file.path()).unwrap();
    let all = reopened.scan_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, keep.todo.id);
    assert_eq!(all[0].status, TodoStatus::Completed);
}

// 存在しないIDの削除テスト
#[tokio::test]
async fn test_delete_nonexistent_in_file_store() {
    let (service, _temp_file) = get_test_service();

    let err = service.handle_delete("nope").await.unwrap_err();
    assert!(matches!(err, TodoError::NotFound(_)));
}

// クエリのテスト
#[tokio::test]
async fn test_query_through_file_store() {
    let (service, _temp_file) = get_test_service();
    for i in 0..5 {
        service
            .handle_create(common::titled(&format!("t{}", i)))
            .await
            .unwrap();
    }

    let store = service.store();
    let first = store
        .query(&TodoFilter::default(), &SortSpec::default(), 2, None)
        .unwrap();
    assert_eq!(first.len(), 2);

    let cursor = SortSpec::default().cursor_for(&first[1]);
    let rest = store
        .query(&TodoFilter::default(), &SortSpec::default(), 10, Some(&cursor))
        .unwrap();
    assert_eq!(rest.len(), 3);
    assert!(rest.iter().all(|t| first.iter().all(|f| f.id != t.id)));
}

// 不正なファイルのテスト
#[test]
fn test_open_corrupt_file_fails() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(temp_file.path(), "this is = = not toml").unwrap();

    assert!(TomlFileStore::open(temp_file.path()).is_err());
}

// 保存失敗時のロールバックテスト
// ファイルに書き込めない場合は作成・更新・削除のいずれも反映されないことを確認
#[tokio::test]
async fn test_failed_save_leaves_store_unchanged() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    fs::create_dir(&data_dir).unwrap();
    let store = TomlFileStore::open(data_dir.join("todos.toml")).unwrap();
    let service = TodoService::new(store).with_clock(common::fixed_now);

    let kept = service
        .handle_create(common::titled("Kept"))
        .await
        .unwrap();
    fs::remove_dir_all(&data_dir).unwrap();

    let err = service
        .handle_create(common::titled("ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Store(_)));

    let input = TodoInput {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    let err = service
        .handle_update(&kept.todo.id, input)
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Store(_)));

    let err = service.handle_delete(&kept.todo.id).await.unwrap_err();
    assert!(matches!(err, TodoError::Store(_)));

    let store = service.store();
    assert_eq!(store.count(&TodoFilter::default()).unwrap(), 1);
    let all = store.scan_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], kept.todo);
}

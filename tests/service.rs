use std::sync::Arc;

use fileshare::service::{Operation, ServiceCall, ServiceResponse};
use fileshare::{ErrorKind, FileShare, FileShareError, Permissions, ShareConfig};

fn storage_kind(err: &FileShareError) -> Option<ErrorKind> {
    err.as_storage().map(|e| e.kind())
}

async fn setup_share(permissions: Permissions) -> (tempfile::TempDir, FileShare) {
    let dir = tempfile::tempdir().unwrap();
    let config = ShareConfig::new(dir.path().join("share").to_string_lossy(), permissions);
    let share = FileShare::from_config(config).await.unwrap();
    (dir, share)
}

#[tokio::test]
async fn test_dispatch_by_call() {
    let (_dir, share) = setup_share(Permissions::all()).await;

    let response = share
        .call(ServiceCall::new(Operation::CreateDirectory, "docs"))
        .await
        .unwrap();
    assert_eq!(response, ServiceResponse::Done);

    share
        .call(ServiceCall::upload("docs/a.txt", "hello"))
        .await
        .unwrap();

    match share.call(ServiceCall::new(Operation::List, "docs")).await {
        Ok(ServiceResponse::Files(entries)) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].name, "a.txt");
            assert_eq!(entries[0].size_bytes, 5);
        }
        other => panic!("unexpected response: {other:?}"),
    }

    let response = share
        .call(ServiceCall::new(Operation::Download, "docs/a.txt"))
        .await
        .unwrap();
    assert_eq!(response, ServiceResponse::Content(b"hello".to_vec()));

    share
        .call(ServiceCall::new(Operation::Delete, "docs/a.txt"))
        .await
        .unwrap();
    let err = share
        .call(ServiceCall::new(Operation::Download, "docs/a.txt"))
        .await
        .unwrap_err();
    assert_eq!(storage_kind(&err), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_errors_surface_unmodified() {
    let (_dir, share) = setup_share(Permissions::read_only()).await;

    let err = share.upload_file("x.txt", b"data".to_vec()).await.unwrap_err();
    assert_eq!(storage_kind(&err), Some(ErrorKind::PermissionDenied));

    let err = share.download_file("../../etc/passwd").await.unwrap_err();
    assert_eq!(storage_kind(&err), Some(ErrorKind::AccessDenied));

    let err = share.delete_file("").await.unwrap_err();
    assert_eq!(storage_kind(&err), Some(ErrorKind::AccessDenied));

    assert!(share.list_files("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reconfigure_swaps_store() {
    let (dir, share) = setup_share(Permissions::all()).await;
    share.upload_file("a.txt", b"first".to_vec()).await.unwrap();

    let before: Arc<_> = share.store().await;

    let other_root = dir.path().join("other");
    share
        .reconfigure(ShareConfig::new(
            other_root.to_string_lossy(),
            Permissions::read_only(),
        ))
        .await
        .unwrap();

    let after = share.store().await;
    assert_eq!(after.root(), other_root.canonicalize().unwrap());
    assert_eq!(after.permissions(), Permissions::read_only());

    // A store handed out earlier keeps its own root and permissions.
    assert_eq!(before.download("a.txt").unwrap(), b"first");
    assert!(before.permissions().write);

    let err = share.download_file("a.txt").await.unwrap_err();
    assert_eq!(storage_kind(&err), Some(ErrorKind::NotFound));
    let err = share.upload_file("b.txt", b"x".to_vec()).await.unwrap_err();
    assert_eq!(storage_kind(&err), Some(ErrorKind::PermissionDenied));
}

#[tokio::test]
async fn test_failed_reconfigure_keeps_current_store() {
    let (dir, share) = setup_share(Permissions::all()).await;
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let result = share
        .reconfigure(ShareConfig::new(
            blocker.to_string_lossy(),
            Permissions::all(),
        ))
        .await;
    assert!(result.is_err());

    share.upload_file("still.txt", b"ok".to_vec()).await.unwrap();
    assert_eq!(share.download_file("still.txt").await.unwrap(), b"ok");
}

#[tokio::test]
async fn test_concurrent_calls() {
    let (_dir, share) = setup_share(Permissions::all()).await;
    let share = Arc::new(share);

    let mut handles = Vec::new();
    for i in 0..16 {
        let share = Arc::clone(&share);
        handles.push(tokio::spawn(async move {
            let path = format!("batch/file-{i}.txt");
            share.upload_file(&path, i.to_string().into_bytes()).await?;
            share.download_file(&path).await
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let content = handle.await.unwrap().unwrap();
        assert_eq!(content, i.to_string().into_bytes());
    }
    assert_eq!(share.list_files("batch").await.unwrap().len(), 16);
}

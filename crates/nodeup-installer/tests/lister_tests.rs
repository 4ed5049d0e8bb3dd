//! Tests for the remote version lister against a mock mirror

mod common;

use common::*;
use nodeup_core::{Error, NodeVersion, VersionConstraint};
use nodeup_installer::{find_best_matching_version, VersionLister, VersionSource};
use wiremock::MockServer;

#[tokio::test]
async fn test_list_in_index_order() {
    let server = MockServer::start().await;
    mock_index(&server, &["8.9.0", "8.10.0", "10.0.0"]).await;

    let lister = VersionLister::new(dist_url(&server)).unwrap();
    let versions = lister.list().await.unwrap();

    assert_eq!(
        versions,
        vec![
            NodeVersion::new(8, 9, 0),
            NodeVersion::new(8, 10, 0),
            NodeVersion::new(10, 0, 0),
        ]
    );
}

#[tokio::test]
async fn test_list_then_pick_best() {
    let server = MockServer::start().await;
    mock_index(&server, &["8.9.0", "8.10.0", "10.0.0"]).await;

    let lister = VersionLister::new(dist_url(&server)).unwrap();
    let source: &dyn VersionSource = &lister;
    let versions = source.list().await.unwrap();

    let constraint = VersionConstraint::parse(">=8.0.0 <10.0.0").unwrap();
    assert_eq!(
        find_best_matching_version(&versions, &constraint),
        Some(NodeVersion::new(8, 10, 0))
    );
}

#[tokio::test]
async fn test_empty_index_is_an_error() {
    let server = MockServer::start().await;
    mock_index_response(&server, 200, "<html><body>maintenance</body></html>").await;

    let lister = VersionLister::new(dist_url(&server)).unwrap();
    let err = lister.list().await.unwrap_err();

    assert!(matches!(err, Error::Listing { .. }));
    assert!(err.to_string().contains("Error while querying"));
}

#[tokio::test]
async fn test_server_error_is_an_error() {
    let server = MockServer::start().await;
    mock_index_response(&server, 503, &index_page(&["8.9.0"])).await;

    let lister = VersionLister::new(dist_url(&server)).unwrap();
    assert!(matches!(lister.list().await, Err(Error::Listing { .. })));
}

#[tokio::test]
async fn test_unreachable_mirror_is_an_error() {
    let lister = VersionLister::new("http://127.0.0.1:9/").unwrap();
    assert!(matches!(lister.list().await, Err(Error::Listing { .. })));
}

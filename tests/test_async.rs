#![cfg(feature = "async")]

mod common;

use common::FakeSource;
use deck2trice::{AsyncDeck2Trice, Deck2Trice, Provider};
use tempfile::TempDir;

async fn converter(dir: &TempDir) -> AsyncDeck2Trice {
    let source = FakeSource::new(Provider::Moxfield).with_deck("atraxa", common::moxfield_deck());
    let builder = Deck2Trice::builder().deck_dir(dir.path()).source(source);
    AsyncDeck2Trice::build(builder).await.unwrap()
}

#[tokio::test]
async fn sync_runs_on_the_blocking_pool() {
    let dir = TempDir::new().unwrap();
    let sdk = converter(&dir).await;

    let report = sdk.sync().await.unwrap();
    assert_eq!(report.written, vec![dir.path().join("Atraxa Superfriends.cod")]);
}

#[tokio::test]
async fn clones_share_one_converter() {
    let dir = TempDir::new().unwrap();
    let sdk = converter(&dir).await;
    let other = sdk.clone();

    let path = other
        .convert(serde_json::json!({ "name": "Burn" }))
        .await
        .unwrap();
    assert_eq!(path, dir.path().join("Burn.cod"));
    let provider = sdk.run(|c| Ok(c.provider())).await.unwrap();
    assert_eq!(provider, Provider::Moxfield);
}

#[tokio::test]
async fn convert_all_reports_failures() {
    let dir = TempDir::new().unwrap();
    let sdk = converter(&dir).await;
    let report = sdk
        .convert_all(vec![common::moxfield_deck(), serde_json::json!([])])
        .await
        .unwrap();
    assert_eq!(report.parsed, 1);
    assert_eq!(report.failed.len(), 1);
}

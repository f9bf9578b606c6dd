//! Several link services sharing one Redis, as separate gateway processes
//! would. Needs a local Docker daemon: `cargo test -p slink-shortener -- --ignored`.

use std::collections::HashSet;
use std::sync::Arc;

use slink_core::{LinkStore, NewLink, TargetUrl};
use slink_generator::SeqGenerator;
use slink_shortener::LinkService;
use slink_storage::{ReadRepository, RedisRepository};
use slink_test_infra::redis::{RedisConfig, RedisServer};

fn new_link(url: &str) -> NewLink {
    NewLink::new(TargetUrl::parse(url).unwrap())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires docker"]
async fn services_sharing_redis_agree_on_one_id_per_url() {
    let redis = RedisServer::new(RedisConfig::default())
        .await
        .expect("start redis");
    let url = redis.redis_url().await.expect("redis url");
    let repo = RedisRepository::connect(&url).await.expect("connect redis");

    // Distinct prefixes so the two services never draw the same id.
    let services = [
        Arc::new(LinkService::new(repo.clone(), SeqGenerator::with_prefix("a"))),
        Arc::new(LinkService::new(repo.clone(), SeqGenerator::with_prefix("b"))),
    ];

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let service = Arc::clone(&services[i % 2]);
            tokio::spawn(async move { service.create(new_link("https://example.com")).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap().id);
    }
    assert_eq!(ids.len(), 1);

    let id = ids.into_iter().next().unwrap();
    let indexed = repo
        .find_by_url(&TargetUrl::parse("https://example.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(indexed.id, id);

    for service in &services {
        assert_eq!(
            service.fetch_by_id(&id).await.unwrap().url.as_str(),
            "https://example.com"
        );
    }
}

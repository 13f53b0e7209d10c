use std::sync::Mutex;

use async_trait::async_trait;
use damage_core::{
    EngineConfig, EngineError, MetadataPatch, ResolutionSession, ScalingTier, TokenId,
};
use damage_runtime::{
    CommitError, FileTokenStore, InMemoryTokenStore, PersistedToken, RepositoryError,
    ResolutionService, RuntimeError, SceneFile, TokenStore, commit, eligible_snapshots,
};
use serde_json::{Map, Value, json};

const NAMESPACE: &str = "com.damage-tool/metadata";

fn metadata(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("metadata must be an object"),
    }
}

fn token(id: &str, name: &str, health: i64, max_health: i64, temp_health: i64) -> PersistedToken {
    PersistedToken::new(id, name).with_metadata(metadata(json!({
        NAMESPACE: {
            "health": health,
            "max health": max_health,
            "temporary health": temp_health,
            "armor class": 13,
        },
        "other.plugin/notes": { "note": "keep me" },
    })))
}

fn health_of(token: &PersistedToken) -> (Value, Value) {
    let fields = &token.metadata[NAMESPACE];
    (fields["health"].clone(), fields["temporary health"].clone())
}

fn service(tokens: Vec<PersistedToken>) -> ResolutionService {
    ResolutionService::new(
        Box::new(InMemoryTokenStore::new(tokens)),
        EngineConfig::default(),
    )
}

async fn read_one(service: &ResolutionService, id: &str) -> PersistedToken {
    service
        .store()
        .read(&[TokenId::from(id)])
        .await
        .expect("store read")
        .pop()
        .expect("token present")
}

async fn open_on(store: &dyn TokenStore) -> ResolutionSession {
    let selected = store.selection().await.expect("selection");
    let config = EngineConfig::default();
    ResolutionSession::open(eligible_snapshots(&selected, &config), &config).expect("session opens")
}

#[tokio::test]
async fn commit_applies_per_token_tiers_in_one_batch() {
    let service = service(vec![
        token("a", "Goblin", 10, 20, 5),
        token("b", "Hobgoblin", 10, 20, 5),
        token("c", "Cleric", 10, 20, 0),
    ]);

    let mut session = service.open_session().await.expect("session opens");
    session.set_delta_input("-8");
    session.set_tier(1, ScalingTier::Half);
    session.set_tier(2, ScalingTier::None);

    let report = service.commit(session).await.expect("commit succeeds");
    assert_eq!(report.tokens.len(), 3);
    assert_eq!(report.changed(), 2);

    // Full: 5 absorbed, 3 through
    assert_eq!(health_of(&read_one(&service, "a").await), (json!(7), json!(0)));
    // Half: 4 absorbed by temp
    assert_eq!(health_of(&read_one(&service, "b").await), (json!(10), json!(1)));
    // None: untouched values rewritten as-is
    assert_eq!(health_of(&read_one(&service, "c").await), (json!(10), json!(0)));
}

#[tokio::test]
async fn double_heal_clamps_to_max() {
    let service = service(vec![token("a", "Fighter", 10, 20, 0)]);

    let mut session = service.open_session().await.unwrap();
    session.set_delta_input("15");
    session.set_tier(0, ScalingTier::Double);
    service.commit(session).await.unwrap();

    assert_eq!(health_of(&read_one(&service, "a").await), (json!(20), json!(0)));
}

#[tokio::test]
async fn commit_preserves_unrelated_metadata() {
    let service = service(vec![token("a", "Goblin", 10, 20, 5)]);

    let mut session = service.open_session().await.unwrap();
    session.set_raw_delta(-3);
    service.commit(session).await.unwrap();

    let stored = read_one(&service, "a").await;
    assert_eq!(stored.metadata[NAMESPACE]["max health"], json!(20));
    assert_eq!(stored.metadata[NAMESPACE]["armor class"], json!(13));
    assert_eq!(stored.metadata["other.plugin/notes"], json!({ "note": "keep me" }));
}

#[tokio::test]
async fn tokens_without_max_health_are_left_out() {
    let no_max = PersistedToken::new("x", "Torch")
        .with_metadata(metadata(json!({ NAMESPACE: { "health": 3 } })));
    let service = service(vec![token("a", "Goblin", 10, 20, 0), no_max.clone()]);

    let mut session = service.open_session().await.unwrap();
    assert_eq!(session.len(), 1);
    session.set_raw_delta(-4);
    service.commit(session).await.unwrap();

    assert_eq!(read_one(&service, "x").await, no_max);
}

#[tokio::test]
async fn custom_namespace_is_read_and_written_in_place() {
    let stats = PersistedToken::new("a", "Goblin")
        .with_metadata(metadata(json!({ "stats": { "health": 10, "max health": 20 } })));
    let service = ResolutionService::new(
        Box::new(InMemoryTokenStore::new(vec![stats])),
        EngineConfig::default().with_namespace("stats"),
    );

    let mut session = service.open_session().await.unwrap();
    session.set_raw_delta(-4);
    service.commit(session).await.unwrap();

    let stored = read_one(&service, "a").await;
    assert_eq!(stored.metadata["stats"]["health"], json!(6));
    assert_eq!(stored.metadata["stats"]["max health"], json!(20));
    assert!(!stored.metadata.contains_key(NAMESPACE));
}

#[tokio::test]
async fn empty_eligible_selection_cannot_open() {
    let service = service(vec![PersistedToken::new("x", "Torch")]);
    let err = service.open_session().await.unwrap_err();
    assert!(matches!(err, RuntimeError::Session(_)));
    assert_eq!(err.error_code(), "session_no_eligible_tokens");
}

#[tokio::test]
async fn removed_token_aborts_whole_batch() {
    let store = InMemoryTokenStore::new(vec![
        token("a", "Goblin", 10, 20, 0),
        token("b", "Orc", 10, 20, 0),
    ]);
    let mut session = open_on(&store).await;
    session.set_raw_delta(-5);

    // "b" is deleted between open and commit.
    store.remove(&TokenId::from("b")).unwrap();

    let err = commit(session, &store, &EngineConfig::default()).await.unwrap_err();
    assert!(matches!(
        err,
        CommitError::IdentityMismatch {
            position: 1,
            found: None,
            ..
        }
    ));
    let untouched = store.token(&TokenId::from("a")).unwrap().unwrap();
    assert_eq!(health_of(&untouched), (json!(10), json!(0)));
}

/// Store whose re-read returns a fixed entity list, recording any writes.
struct ScriptedStore {
    selection: Vec<PersistedToken>,
    reread: Vec<PersistedToken>,
    writes: Mutex<Vec<Vec<MetadataPatch>>>,
}

#[async_trait]
impl TokenStore for ScriptedStore {
    async fn selection(&self) -> Result<Vec<PersistedToken>, RepositoryError> {
        Ok(self.selection.clone())
    }

    async fn read(&self, _ids: &[TokenId]) -> Result<Vec<PersistedToken>, RepositoryError> {
        Ok(self.reread.clone())
    }

    async fn write_batch(
        &self,
        patches: &[MetadataPatch],
        _config: &EngineConfig,
    ) -> Result<(), RepositoryError> {
        self.writes
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .push(patches.to_vec());
        Ok(())
    }
}

#[tokio::test]
async fn swapped_entity_aborts_with_identity_mismatch() {
    let a = token("a", "A", 10, 20, 0);
    let b = token("b", "B", 10, 20, 0);
    let c = token("c", "C", 10, 20, 0);
    let store = ScriptedStore {
        selection: vec![a.clone(), b],
        reread: vec![a, c],
        writes: Mutex::new(Vec::new()),
    };
    let mut session = open_on(&store).await;
    session.set_raw_delta(-6);
    let err = commit(session, &store, &EngineConfig::default()).await.unwrap_err();

    match &err {
        CommitError::IdentityMismatch {
            position,
            expected,
            found,
        } => {
            assert_eq!(*position, 1);
            assert_eq!(expected.as_ref().map(TokenId::as_str), Some("b"));
            assert_eq!(found.as_ref().map(TokenId::as_str), Some("c"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.severity().ends_session());
    assert!(store.writes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn scripted_store_records_exactly_one_write() {
    let a = token("a", "A", 10, 20, 5);
    let b = token("b", "B", 4, 20, 0);
    let store = ScriptedStore {
        selection: vec![a.clone(), b.clone()],
        reread: vec![a, b],
        writes: Mutex::new(Vec::new()),
    };

    let mut session = open_on(&store).await;
    session.set_raw_delta(-8);
    commit(session, &store, &EngineConfig::default()).await.unwrap();

    let writes = store.writes.lock().unwrap();
    assert_eq!(writes.len(), 1);
    assert_eq!(
        writes[0],
        vec![
            MetadataPatch {
                id: TokenId::from("a"),
                health: 7.0,
                temp_health: 0.0,
            },
            MetadataPatch {
                id: TokenId::from("b"),
                health: 0.0,
                temp_health: 0.0,
            },
        ]
    );
}

#[tokio::test]
async fn file_store_commit_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    let scene = SceneFile {
        selection: vec![TokenId::from("b"), TokenId::from("a")],
        tokens: vec![
            token("a", "Goblin", 10, 20, 5),
            token("b", "Ancient Red Dragon Wyrmling", 30, 40, 0),
            token("c", "Bystander", 5, 5, 0),
        ],
    };
    let store = FileTokenStore::create(&path, &scene).await.unwrap();
    let service = ResolutionService::new(Box::new(store), EngineConfig::default());

    let mut session = service.open_session().await.unwrap();
    let ids: Vec<_> = session.ids().map(TokenId::as_str).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(
        session.entries()[0].snapshot.display_name(EngineConfig::DISPLAY_NAME_CHARS),
        "Ancient Red Dragon W\u{2026}"
    );

    session.set_delta_input("-12.7");
    session.set_tier(1, ScalingTier::Half);
    service.commit(session).await.unwrap();

    let reloaded = FileTokenStore::new(&path).load().await.unwrap();
    assert_eq!(reloaded.selection, scene.selection);
    assert_eq!(health_of(&reloaded.tokens[0]), (json!(9), json!(0)));
    assert_eq!(health_of(&reloaded.tokens[1]), (json!(18), json!(0)));
    assert_eq!(reloaded.tokens[2], scene.tokens[2]);
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn explicit_ids_override_selection() {
    let store = InMemoryTokenStore::new(vec![
        token("a", "Goblin", 10, 20, 0),
        token("b", "Orc", 10, 20, 0),
    ]);
    store.select([TokenId::from("a")]).unwrap();
    let service = ResolutionService::new(Box::new(store), EngineConfig::default());

    let session = service
        .open_session_for(&[TokenId::from("b"), TokenId::from("missing")])
        .await
        .unwrap();
    let ids: Vec<_> = session.ids().map(TokenId::as_str).collect();
    assert_eq!(ids, ["b"]);
    session.cancel();

    // Cancelling wrote nothing.
    assert_eq!(health_of(&read_one(&service, "b").await), (json!(10), json!(0)));
}

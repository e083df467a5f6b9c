//! Integration tests run against every store backend

use std::sync::Arc;
use std::thread;

use platebook_core::store::*;
use platebook_core::test_utils::{sample_draft, sample_identity};
use platebook_core::*;
use platebook_engine::*;

fn backends() -> Vec<(&'static str, Stores, Option<tempfile::TempDir>)> {
    let (engine, temp) = StorageEngine::temp().unwrap();
    vec![
        ("memory", Stores::in_memory(), None),
        ("fjall", engine.open_stores().unwrap(), Some(temp)),
    ]
}

#[test]
fn registration_is_unique_on_every_backend() {
    for (name, stores, _temp) in backends() {
        let ids = &stores.identities;

        ids.insert_new(sample_identity("alice", "a@x.com", "pw1")).unwrap();

        let dup_user = ids.insert_new(sample_identity("alice", "b@x.com", "pw2"));
        assert!(matches!(dup_user, Err(PlatebookError::UsernameTaken)), "{}", name);

        let dup_email = ids.insert_new(sample_identity("bob", "a@x.com", "pw2"));
        assert!(matches!(dup_email, Err(PlatebookError::EmailTaken)), "{}", name);

        let found = ids.find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(found.username, "alice", "{}", name);
        assert!(found.password_digest.matches("pw1"), "{}", name);
    }
}

#[test]
fn concurrent_registration_has_one_winner() {
    for (name, stores, _temp) in backends() {
        let identities: Arc<dyn IdentityStore> = stores.identities.clone();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let identities = identities.clone();
                thread::spawn(move || {
                    identities.insert_new(sample_identity("alice", &format!("a{}@x.com", i), "pw"))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(PlatebookError::UsernameTaken)))
            .count();

        assert_eq!(winners, 1, "{}", name);
        assert_eq!(conflicts, 7, "{}", name);
    }
}

#[test]
fn catalog_behaves_the_same_on_every_backend() {
    for (name, stores, _temp) in backends() {
        let recipes = &stores.recipes;

        assert_eq!(recipes.list().unwrap().len(), 6, "{}", name);
        assert_eq!(recipes.search("cookies").unwrap().len(), 1, "{}", name);
        assert_eq!(recipes.search("").unwrap().len(), 6, "{}", name);

        let added = recipes.add(sample_draft("Winter Soup")).unwrap();
        assert_eq!(added.id, RecipeId::new(7), "{}", name);
        assert_eq!(recipes.search("soup").unwrap(), vec![added], "{}", name);
    }
}

#[test]
fn collection_recipes_follow_catalog_order() {
    for (name, stores, _temp) in backends() {
        let collections = &stores.collections;

        collections.add("alice", Collection::Saved, RecipeId::new(5)).unwrap();
        collections.add("alice", Collection::Saved, RecipeId::new(2)).unwrap();
        collections.add("alice", Collection::Saved, RecipeId::new(99)).unwrap();
        collections.add("alice", Collection::Liked, RecipeId::new(1)).unwrap();

        let saved: Vec<u64> = stores
            .collection_recipes("alice", Collection::Saved)
            .unwrap()
            .iter()
            .map(|r| r.id.get())
            .collect();
        assert_eq!(saved, vec![2, 5], "{}", name);

        let liked = stores.collection_recipes("alice", Collection::Liked).unwrap();
        assert_eq!(liked.len(), 1, "{}", name);

        assert!(
            stores.collection_recipes("bob", Collection::Saved).unwrap().is_empty(),
            "{}",
            name
        );
    }
}

#[test]
fn fjall_data_survives_reopen() {
    let temp = tempfile::tempdir().unwrap();

    {
        let engine = StorageEngine::new(temp.path()).unwrap();
        let stores = engine.open_stores().unwrap();
        stores.identities.insert_new(sample_identity("alice", "a@x.com", "pw1")).unwrap();
        stores.recipes.add(sample_draft("Winter Soup")).unwrap();
        stores.collections.add("alice", Collection::Liked, RecipeId::new(7)).unwrap();
    }

    let engine = StorageEngine::new(temp.path()).unwrap();
    let stores = engine.open_stores().unwrap();

    assert!(stores.identities.get("alice").unwrap().is_some());
    assert_eq!(stores.recipes.list().unwrap().len(), 7);
    assert_eq!(stores.recipes.add(sample_draft("Spring Soup")).unwrap().id, RecipeId::new(8));
    assert_eq!(
        stores.collections.members("alice", Collection::Liked).unwrap(),
        vec![RecipeId::new(7)]
    );
}

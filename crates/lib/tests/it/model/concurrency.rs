//! Shared use of one model from several threads.

use std::{sync::Arc, thread};

use scoped_model::{ContentModel, Locality};

const THREADS: usize = 4;
const ROUNDS: usize = 200;

#[test]
fn test_concurrent_scopes_and_views_stay_consistent() {
    let model = Arc::new(ContentModel::new());
    model.set("base", "root").unwrap();

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let model = Arc::clone(&model);
            thread::spawn(move || {
                for i in 0..ROUNDS {
                    model.extend_scope().unwrap();
                    model.set_isolated("local", i as i64).unwrap();
                    model
                        .set_with(&format!("threads.t{t}.r{i}"), true, Locality::Root)
                        .unwrap();

                    // Every view sees the full chain down to the root
                    let view = model.to_view();
                    assert_eq!(view.get("base").and_then(|v| v.as_text()), Some("root"));
                    model.to_json_text().unwrap();

                    assert!(model.retract_scope());
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(model.depth(), 0);
    assert!(!model.has("local"));
    for t in 0..THREADS {
        let rounds = model
            .get(&format!("threads.t{t}"))
            .and_then(|v| v.as_map().map(|m| m.len()));
        assert_eq!(rounds, Some(ROUNDS));
    }
}

#[test]
fn test_model_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ContentModel>();
}

use super::*;
use crate::config::{DirectoryRule, SizeSpec, test_parse_config};
use crate::pipeline::fakes::{MemoryStore, ScriptedResizer};
use std::fs;
use tempfile::TempDir;

/// Photo tree under a temp dir with a config governing `<tmp>/pics`.
struct Fixture {
    dir: TempDir,
    config: PhotoConfig,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config("sizes = [[100, 100], [400, 300]]");
        config.dirs = vec![DirectoryRule {
            base_path: dir.path().join("pics"),
            base_key: "photos".into(),
            ..Default::default()
        }];
        Self { dir, config }
    }

    fn pics(&self) -> PathBuf {
        self.dir.path().join("pics")
    }

    fn touch(&self, rel: &str) -> PathBuf {
        let path = self.pics().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"jpeg").unwrap();
        path
    }
}

#[tokio::test]
async fn test_directory_filters_extension_and_keeps_listing_order() {
    let fx = Fixture::new();
    for name in ["Trip/b.jpg", "Trip/a.JPG", "Trip/c.png", "Trip/sub/d.jpg"] {
        fx.touch(name);
    }
    let store = MemoryStore::new();
    let resizer = ScriptedResizer::new();

    let report = run_batch(&fx.config, &store, &resizer, &[fx.pics().join("Trip")]).await;

    assert_eq!(report.succeeded(), 2);
    assert_eq!(
        store.keys(),
        [
            "photos/trip/a.JPG",
            "photos/trip/sizes/100x100/a.JPG",
            "photos/trip/sizes/400x300/a.JPG",
            "photos/trip/b.jpg",
            "photos/trip/sizes/100x100/b.jpg",
            "photos/trip/sizes/400x300/b.jpg",
        ]
    );
}

#[tokio::test]
async fn test_unrouted_and_missing_paths_do_not_stop_batch() {
    let fx = Fixture::new();
    let good = fx.touch("a.jpg");
    let store = MemoryStore::new();
    let resizer = ScriptedResizer::new();

    let paths = [
        fx.dir.path().join("outside.jpg"),
        fx.pics().join("missing.jpg"),
        good,
    ];
    let report = run_batch(&fx.config, &store, &resizer, &paths).await;

    assert!(matches!(report.inputs[0].outcome, Err(RouteError::NoRule(_))));
    assert!(matches!(report.inputs[1].outcome, Err(RouteError::NotFound(_))));
    assert_eq!(report.skipped(), 2);
    assert_eq!(
        report.skipped_inputs().collect::<Vec<_>>(),
        [paths[0].as_path(), paths[1].as_path()]
    );
    assert_eq!(report.succeeded(), 1);
    assert_eq!(store.keys()[0], "photos/a.jpg");
}

#[tokio::test]
async fn test_single_file_skips_extension_filter() {
    let fx = Fixture::new();
    let png = fx.touch("logo.png");
    let store = MemoryStore::new();
    let resizer = ScriptedResizer::new();

    let report = run_batch(&fx.config, &store, &resizer, &[png]).await;
    assert_eq!(report.succeeded(), 1);
    assert_eq!(store.keys()[0], "photos/logo.png");
}

#[tokio::test]
async fn test_failed_file_does_not_affect_siblings() {
    let fx = Fixture::new();
    fx.touch("a.jpg");
    fx.touch("b.jpg");
    let store = MemoryStore::new();
    let resizer = ScriptedResizer::failing_on("a.jpg", SizeSpec::new(100, 100));

    let report = run_batch(&fx.config, &store, &resizer, &[fx.pics()]).await;

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(
        store.keys(),
        [
            "photos/a.jpg",
            "photos/b.jpg",
            "photos/sizes/100x100/b.jpg",
            "photos/sizes/400x300/b.jpg",
        ]
    );
    assert_eq!(report.summary(), "1 file uploaded, 1 failed");

    // The failed file still reports where it was headed
    let failed = report.files().find(|f| !f.is_ok()).unwrap();
    assert_eq!(failed.file, fx.pics().join("a.jpg"));
    assert_eq!(failed.base_key, "photos/");
}

#[tokio::test]
async fn test_last_matching_rule_wins() {
    let mut fx = Fixture::new();
    fx.config.dirs.push(DirectoryRule {
        base_path: fx.pics().join("private"),
        base_key: "hidden".into(),
        secret: true,
        salt: Some("pepper".into()),
    });
    let file = fx.touch("private/a.jpg");
    let store = MemoryStore::new();
    let resizer = ScriptedResizer::new();

    let report = run_batch(&fx.config, &store, &resizer, &[file.clone()]).await;

    let secret = crate::key::secret::hash(&file.to_string_lossy(), Some("pepper"));
    let files: Vec<_> = report.files().collect();
    assert_eq!(files[0].base_key, format!("hidden/{secret}/"));
    assert!(store.keys().iter().all(|k| k.starts_with("hidden/")));
}

#[tokio::test]
async fn test_directory_files_share_secret() {
    let mut fx = Fixture::new();
    fx.config.dirs[0].secret = true;
    fx.touch("album/a.jpg");
    fx.touch("album/b.jpg");
    let store = MemoryStore::new();
    let resizer = ScriptedResizer::new();

    let album = fx.pics().join("album");
    let report = run_batch(&fx.config, &store, &resizer, &[album.clone()]).await;

    let secret = crate::key::secret::hash(&album.to_string_lossy(), None);
    let keys: Vec<_> = report.files().map(|f| f.base_key.clone()).collect();
    assert_eq!(keys, vec![format!("photos/album/{secret}/"); 2]);
}

#[tokio::test]
async fn test_summary_counts() {
    let report = BatchReport::default();
    assert_eq!(report.summary(), "0 files uploaded");
}

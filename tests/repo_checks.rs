//! End-to-end checks over an on-disk repository fixture
//!
//! Exercises the real DiskStore wiring; the build collaborator is stubbed so
//! the tests do not depend on a kustomize binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kustodian::{
    BuildFailure, BuildRunner, CheckError, Checker, DiskStore, RecordingLogger,
    UnreferencedPolicy, VirtualTree,
};

/// Build runner that records requested paths and always succeeds
#[derive(Default)]
struct RecordingRunner {
    built: Mutex<Vec<PathBuf>>,
}

impl RecordingRunner {
    fn built(&self) -> Vec<PathBuf> {
        self.built.lock().unwrap().clone()
    }
}

impl BuildRunner for RecordingRunner {
    fn build(&self, _tree: &VirtualTree, path: &Path) -> Result<(), BuildFailure> {
        self.built.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn valid_repo(root: &Path) {
    write(
        root,
        "apps/kustomization.yaml",
        "kind: Kustomization\napiVersion: kustomize.config.k8s.io/v1beta1\nresources:\n- app-cookie.yaml\n",
    );
    write(
        root,
        "apps/app-cookie.yaml",
        "apiVersion: argoproj.io/v1alpha1\nkind: Application\nmetadata:\n  name: app-cookie\nspec:\n  project: default\n  source:\n    path: components/cookie\n",
    );
    write(
        root,
        "components/cookie/kustomization.yaml",
        "kind: Kustomization\napiVersion: kustomize.config.k8s.io/v1beta1\nresources:\n- deployment.yaml\n",
    );
    write(root, "components/cookie/deployment.yaml", "kind: Deployment");
    write(
        root,
        "components/base/kustomization.yaml",
        "kind: Kustomization\napiVersion: kustomize.config.k8s.io/v1beta1\nresources:\n- config.yaml\n",
    );
    write(root, "components/base/config.yaml", "kind: ConfigMap");
}

#[test]
fn test_consistent_repository_passes_both_passes() {
    let repo = tempfile::tempdir().unwrap();
    valid_repo(repo.path());

    let store = DiskStore::new();
    let runner = RecordingRunner::default();
    let logger = RecordingLogger::new();
    let checker = Checker::new(&store, &runner, &logger);

    checker
        .check_applications(repo.path(), &["apps".to_string()])
        .unwrap();
    checker
        .check_components(repo.path(), &["components".to_string()])
        .unwrap();

    assert!(logger.warnings().is_empty());
    let built = runner.built();
    assert!(built.contains(&repo.path().join("apps")));
    assert!(built.contains(&repo.path().join("components/cookie")));
    // base layers never build standalone
    assert!(!built.contains(&repo.path().join("components/base")));
}

#[test]
fn test_application_pointing_nowhere_fails() {
    let repo = tempfile::tempdir().unwrap();
    write(
        repo.path(),
        "apps/app-cookie.yaml",
        "apiVersion: argoproj.io/v1alpha1\nkind: Application\nspec:\n  source:\n    path: components/missing\n",
    );

    let store = DiskStore::new();
    let runner = RecordingRunner::default();
    let logger = RecordingLogger::new();
    let checker = Checker::new(&store, &runner, &logger);

    let err = checker
        .check_applications(repo.path(), &["apps".to_string()])
        .unwrap_err();
    assert_eq!(err.to_string(), "components/missing is not valid");
}

#[test]
fn test_component_without_kustomization_file_fails_resolution() {
    let repo = tempfile::tempdir().unwrap();
    write(
        repo.path(),
        "apps/app-cookie.yaml",
        "apiVersion: argoproj.io/v1alpha1\nkind: Application\nspec:\n  source:\n    path: components/cookie\n",
    );
    fs::create_dir_all(repo.path().join("components/cookie")).unwrap();

    let store = DiskStore::new();
    let runner = RecordingRunner::default();
    let logger = RecordingLogger::new();
    let checker = Checker::new(&store, &runner, &logger);

    let err = checker
        .check_applications(repo.path(), &["apps".to_string()])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "components/cookie does not contain a 'kustomization.yaml' file"
    );
}

#[test]
fn test_dangling_resource_warns_by_default_and_fails_strict() {
    let repo = tempfile::tempdir().unwrap();
    write(
        repo.path(),
        "components/kustomization.yaml",
        "kind: Kustomization\napiVersion: kustomize.config.k8s.io/v1beta1\n",
    );
    write(repo.path(), "components/configmap.yaml", "kind: ConfigMap");

    let store = DiskStore::new();
    let runner = RecordingRunner::default();

    let lenient = RecordingLogger::new();
    Checker::new(&store, &runner, &lenient)
        .check_components(repo.path(), &["components".to_string()])
        .unwrap();
    let warnings = lenient.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].fields[0].1, "components/kustomization.yaml");
    assert_eq!(warnings[0].fields[1].1, "configmap.yaml");

    let strict = RecordingLogger::new();
    let err = Checker::new(&store, &runner, &strict)
        .with_policy(UnreferencedPolicy::Fail)
        .check_components(repo.path(), &["components".to_string()])
        .unwrap_err();
    assert!(matches!(err, CheckError::DanglingResource { .. }));
}

#[test]
fn test_two_runs_over_unchanged_tree_are_identical() {
    let repo = tempfile::tempdir().unwrap();
    valid_repo(repo.path());

    let store = DiskStore::new();
    let runner = RecordingRunner::default();

    let first = RecordingLogger::new();
    Checker::new(&store, &runner, &first)
        .check_applications(repo.path(), &["apps".to_string()])
        .unwrap();

    let second = RecordingLogger::new();
    Checker::new(&store, &runner, &second)
        .check_applications(repo.path(), &["apps".to_string()])
        .unwrap();

    assert_eq!(first.records(), second.records());
}

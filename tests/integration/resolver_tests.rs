//! Integration tests for root discovery and the GUID dependency closure

use std::fs;
use std::path::Path;
use unusedassets::config::RootConfig;
use unusedassets::graph::{AssetGraphBuilder, AssetIndex};
use unusedassets::resolver::{
    parse_build_settings, ClosureProvider, ResolveError, RootDependencyResolver, RootSource,
};
use unusedassets::{AssetPath, Config, GuidClosureProvider};

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn asset(root: &Path, rel: &str, guid: &str, contents: &str) {
    write(root, rel, contents);
    write(root, &format!("{}.meta", rel), &format!("fileFormatVersion: 2\nguid: {}\n", guid));
}

fn refs(guids: &[&str]) -> String {
    guids
        .iter()
        .map(|g| format!("  - {{fileID: 11400000, guid: {}, type: 2}}\n", g))
        .collect()
}

const SCENES: &str = "%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!1045 &1
EditorBuildSettings:
  m_ObjectHideFlags: 0
  serializedVersion: 2
  m_Scenes:
  - enabled: 1
    path: Assets/Scenes/Main.unity
    guid: 11111111111111111111111111111111
  - enabled: 0
    path: Assets/Scenes/Debug.unity
    guid: 22222222222222222222222222222222
  m_configObjects: {}
";

/// Main.unity -> Level.asset -> {Music.ogg, Level.asset (self)}
/// Debug.unity -> Cheats.prefab
fn project(root: &Path) {
    write(root, "ProjectSettings/EditorBuildSettings.asset", SCENES);
    asset(root, "Assets/Scenes/Main.unity", "11111111111111111111111111111111", &refs(&["33333333333333333333333333333333"]));
    asset(root, "Assets/Scenes/Debug.unity", "22222222222222222222222222222222", &refs(&["44444444444444444444444444444444"]));
    asset(root, "Assets/Data/Level.asset", "33333333333333333333333333333333", &refs(&["55555555555555555555555555555555", "33333333333333333333333333333333"]));
    asset(root, "Assets/Prefabs/Cheats.prefab", "44444444444444444444444444444444", "");
    asset(root, "Assets/Audio/Music.ogg", "55555555555555555555555555555555", "OggS");
}

fn sorted(paths: impl IntoIterator<Item = AssetPath>) -> Vec<String> {
    let mut out: Vec<String> = paths.into_iter().map(|p| p.to_string()).collect();
    out.sort();
    out
}

#[test]
fn test_build_settings_roots() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    project(temp.path());

    let roots = RootSource::new(&Config::default(), temp.path()).load().unwrap();

    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0].path.as_str(), "Assets/Scenes/Main.unity");
    assert!(roots[0].enabled);
    assert_eq!(roots[1].path.as_str(), "Assets/Scenes/Debug.unity");
    assert!(!roots[1].enabled);
}

#[test]
fn test_disabled_scene_dependencies_are_unused() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    project(temp.path());

    let config = Config::default();
    let provider = GuidClosureProvider::new(&config, temp.path());
    let roots = RootSource::new(&config, temp.path()).load().unwrap();
    let used = RootDependencyResolver::new(&provider).closure(&roots).unwrap();

    assert_eq!(
        sorted(used),
        vec![
            "Assets/Audio/Music.ogg",
            "Assets/Data/Level.asset",
            "Assets/Scenes/Main.unity",
        ]
    );
}

#[test]
fn test_config_root_extends_build_settings() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    project(temp.path());

    let config = Config {
        roots: vec![RootConfig {
            path: "Assets/Prefabs/Cheats.prefab".to_string(),
            enabled: true,
        }],
        ..Config::default()
    };
    let provider = GuidClosureProvider::new(&config, temp.path());
    let roots = RootSource::new(&config, temp.path()).load().unwrap();
    let used = RootDependencyResolver::new(&provider).closure(&roots).unwrap();

    assert!(used.contains(&AssetPath::new("Assets/Prefabs/Cheats.prefab")));
    assert!(!used.contains(&AssetPath::new("Assets/Scenes/Debug.unity")));
}

#[test]
fn test_enabled_config_root_turns_disabled_scene_on() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    project(temp.path());

    let config = Config {
        roots: vec![RootConfig {
            path: "Assets/Scenes/Debug.unity".to_string(),
            enabled: true,
        }],
        ..Config::default()
    };
    let provider = GuidClosureProvider::new(&config, temp.path());
    let roots = RootSource::new(&config, temp.path()).load().unwrap();
    let used = RootDependencyResolver::new(&provider).closure(&roots).unwrap();

    assert_eq!(roots.len(), 2);
    assert!(used.contains(&AssetPath::new("Assets/Scenes/Debug.unity")));
    assert!(used.contains(&AssetPath::new("Assets/Prefabs/Cheats.prefab")));
}

#[test]
fn test_deleted_scene_in_build_settings_is_skipped() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    project(temp.path());
    fs::remove_file(temp.path().join("Assets/Scenes/Main.unity")).unwrap();

    let config = Config::default();
    let provider = GuidClosureProvider::new(&config, temp.path());
    let roots = RootSource::new(&config, temp.path()).load().unwrap();
    let used = RootDependencyResolver::new(&provider).closure(&roots).unwrap();

    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].path.as_str(), "Assets/Scenes/Debug.unity");
    assert!(used.is_empty());
}

#[test]
fn test_missing_root_is_an_error() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    project(temp.path());

    let config = Config::default();
    let provider = GuidClosureProvider::new(&config, temp.path());
    let result = provider.closure(&[AssetPath::new("Assets/Scenes/Removed.unity")]);

    assert!(matches!(result, Err(ResolveError::MissingRoot(p)) if p.as_str() == "Assets/Scenes/Removed.unity"));
}

#[test]
fn test_malformed_build_settings_is_an_error() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    write(temp.path(), "ProjectSettings/EditorBuildSettings.asset", "EditorBuildSettings:\n  m_Scenes: [unclosed\n");

    let result = RootSource::new(&Config::default(), temp.path()).load();

    assert!(matches!(result, Err(ResolveError::BuildSettingsParse { .. })));
}

#[test]
fn test_unknown_guids_are_ignored() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    asset(temp.path(), "Assets/Main.unity", "66666666666666666666666666666666", &refs(&["0000000000000000000000000000beef"]));

    let config = Config::default();
    let index = AssetIndex::scan(&config, temp.path());
    let graph = AssetGraphBuilder::new(temp.path()).build(&index).unwrap();

    assert_eq!(graph.asset_count(), 1);
    assert_eq!(graph.dependency_count(), 0);
}

#[test]
fn test_parse_empty_scene_list() {
    let roots = parse_build_settings("EditorBuildSettings:\n  m_Scenes: []\n").unwrap();
    assert!(roots.is_empty());
}

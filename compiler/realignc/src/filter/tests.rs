use pretty_assertions::assert_eq;

use super::*;

fn filter_in<'c>(config: &'c Config, cwd: &str) -> FileFilter<'c> {
    FileFilter::with_cwd(config, Ok(PathBuf::from(cwd)))
}

#[test]
fn test_files_need_opt_in() {
    let mut config = Config::default();
    let mut filter = filter_in(&config, "/work");
    assert_eq!(filter.check(Path::new("a_test.go")).unwrap(), Some(Skip::Test));
    assert_eq!(filter.check(Path::new("a.go")).unwrap(), None);

    config.test_files = true;
    let mut filter = filter_in(&config, "/work");
    assert_eq!(filter.check(Path::new("a_test.go")).unwrap(), None);
}

#[test]
fn generated_suffixes() {
    let config = Config::default();
    let mut filter = filter_in(&config, "/work");
    for name in ["x_generated.go", "x_gen.go", "x.gen.go", "api.pb.go", "api.pb.gw.go"] {
        assert_eq!(filter.check(Path::new(name)).unwrap(), Some(Skip::Generated), "{name}");
    }
    assert_eq!(filter.check(Path::new("generator.go")).unwrap(), None);
}

#[test]
fn generated_header_comment() {
    let header = |c: &str| vec!["// Copyright".to_string(), c.to_string()];
    assert!(has_generated_comment(&header("// Code generated by protoc-gen-go. DO NOT EDIT.")));
    assert!(has_generated_comment(&header("// Code generated  DO NOT EDIT.\r")));
    assert!(!has_generated_comment(&header("// Code generated DO NOT EDIT.")));
    assert!(!has_generated_comment(&header("// Code generated by hand.")));
    assert!(!has_generated_comment(&header("/* Code generated by x DO NOT EDIT. */")));
    assert!(!has_generated_comment(&[]));
}

#[test]
fn excluded_dirs_cover_subdirectories() {
    let config = Config {
        exclude_dirs: vec![PathBuf::from("./third_party"), PathBuf::from("/work/gen")],
        ..Config::default()
    };
    let mut filter = filter_in(&config, "/work");
    assert_eq!(
        filter.check(Path::new("third_party/lib/a.go")).unwrap(),
        Some(Skip::ExcludedDir)
    );
    assert_eq!(filter.check(Path::new("/work/gen/b.go")).unwrap(), Some(Skip::ExcludedDir));
    assert_eq!(filter.check(Path::new("gen/../c.go")).unwrap(), None);
    assert_eq!(filter.check(Path::new("third_party_x/a.go")).unwrap(), None);
}

#[test]
fn excluded_files_match_relative_paths() {
    let mut config = Config::default();
    config.add_exclude_file("api/*.go").unwrap();
    config.add_exclude_file("*_mock.go").unwrap();
    let mut filter = filter_in(&config, "/work");

    assert_eq!(filter.check(Path::new("./api/a.go")).unwrap(), Some(Skip::ExcludedFile));
    assert_eq!(filter.check(Path::new("/work/api/b.go")).unwrap(), Some(Skip::ExcludedFile));
    assert_eq!(filter.check(Path::new("db_mock.go")).unwrap(), Some(Skip::ExcludedFile));
    // `*` does not cross a path separator.
    assert_eq!(filter.check(Path::new("api/v2/c.go")).unwrap(), None);
    assert_eq!(filter.check(Path::new("pkg/db_mock.go")).unwrap(), None);
}

#[test]
fn verdicts_are_cached() {
    let mut config = Config::default();
    config.add_exclude_file("a.go").unwrap();
    let mut filter = filter_in(&config, "/work");
    assert_eq!(filter.check(Path::new("a.go")).unwrap(), Some(Skip::ExcludedFile));
    assert_eq!(filter.verdicts.len(), 1);
    assert_eq!(filter.check(Path::new("a.go")).unwrap(), Some(Skip::ExcludedFile));
    assert_eq!(filter.verdicts.len(), 1);
}

#[test]
fn missing_working_directory_fails_exclusions_only() {
    let mut config = Config::default();
    let mut filter = FileFilter::with_cwd(&config, Err("gone".to_string()));
    assert_eq!(filter.check(Path::new("a.go")).unwrap(), None);

    config.add_exclude_file("x.go").unwrap();
    let mut filter = FileFilter::with_cwd(&config, Err("gone".to_string()));
    let err = filter.check(Path::new("a.go")).unwrap_err();
    assert_eq!(err.to_string(), "failed to pre-filter files a.go: gone");
}

#[test]
fn relative_paths() {
    let base = Path::new("/work/repo");
    assert_eq!(relative_to(Path::new("/work/repo/a/b.go"), base), PathBuf::from("a/b.go"));
    assert_eq!(relative_to(Path::new("/work/other/c.go"), base), PathBuf::from("../other/c.go"));
    assert_eq!(relative_to(Path::new("/work/repo/./x/../d.go"), base), PathBuf::from("d.go"));
}

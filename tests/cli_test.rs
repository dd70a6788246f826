use blade::cli::{Args, Command};
use blade::generator::ProjectRequest;
use blade::template::{BuildFlavor, TemplateKind};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("blade")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_create_args() {
    let args = make_args(&["create", "./out", "-t", "portlet", "-n", "my-app"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(!parsed.verbose);
    assert_eq!(parsed.config, None);
    match parsed.command {
        Command::Create(create) => {
            assert_eq!(create.work_dir, PathBuf::from("./out"));
            assert_eq!(create.template, TemplateKind::Portlet);
            assert_eq!(create.build, None);
            assert_eq!(create.name, "my-app");
            assert_eq!(create.classname, None);
            assert!(!create.no_overwrite);
        }
        other => panic!("Expected create command, got {:?}", other),
    }
}

#[test]
fn test_all_create_flags() {
    let args = make_args(&[
        "--verbose",
        "create",
        "./out",
        "--template",
        "servicebuilder",
        "--build",
        "maven",
        "--name",
        "guestbook",
        "--classname",
        "Guestbook",
        "--package",
        "com.example",
        "--templates",
        "/opt/templates.tar.gz",
        "--no-overwrite",
        "--config",
        "blade.yml",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    assert_eq!(parsed.config, Some(PathBuf::from("blade.yml")));
    let Command::Create(create) = parsed.command else {
        panic!("Expected create command");
    };
    assert_eq!(create.build, Some(BuildFlavor::Maven));
    assert_eq!(create.templates, Some(PathBuf::from("/opt/templates.tar.gz")));
    assert!(create.no_overwrite);

    let request = ProjectRequest::from(&create);
    assert_eq!(request.template, TemplateKind::ServiceBuilder);
    assert_eq!(request.class_name.as_deref(), Some("Guestbook"));
    assert_eq!(request.package_name.as_deref(), Some("com.example"));
    assert_eq!(request.service, None);
}

#[test]
fn test_short_flags() {
    let args = make_args(&[
        "-v", "create", "out", "-t", "servicewrapper", "-b", "gradle", "-n", "w", "-s",
        "com.example.FooService",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    let Command::Create(create) = parsed.command else {
        panic!("Expected create command");
    };
    assert_eq!(create.template, TemplateKind::ServiceWrapper);
    assert_eq!(create.service.as_deref(), Some("com.example.FooService"));
}

#[test]
fn test_template_kind_names() {
    for name in ["activator", "jspportlet", "mvcportlet", "service", "servicewrapper"] {
        let args = make_args(&["create", "out", "-t", name, "-n", "x"]);
        assert!(Args::try_parse_from(args).is_ok(), "{} should parse", name);
    }

    let args = make_args(&["create", "out", "-t", "theme", "-n", "x"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_migrate_args() {
    let args = make_args(&["migrate", "src", "web/view.jsp", "--json"]);
    let parsed = Args::try_parse_from(args).unwrap();

    let Command::Migrate(migrate) = parsed.command else {
        panic!("Expected migrate command");
    };
    assert_eq!(migrate.paths, vec![PathBuf::from("src"), PathBuf::from("web/view.jsp")]);
    assert!(migrate.json);
}

#[test]
fn test_missing_args() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
    assert!(Args::try_parse_from(make_args(&["create", "./out", "-t", "portlet"])).is_err());
    assert!(Args::try_parse_from(make_args(&["migrate"])).is_err());
}

#[test]
fn test_too_many_args() {
    let args = make_args(&["create", "./out", "extra", "-t", "portlet", "-n", "x"]);
    assert!(Args::try_parse_from(args).is_err());
}

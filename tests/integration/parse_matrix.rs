use clap::{CommandFactory, Parser};
use gondola::items::SortKey;
use gondola::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["gondola"],
        vec!["gondola", "menu"],
        vec!["gondola", "verify", "--format", "json"],
        vec!["gondola", "tree"],
        vec!["gondola", "navigate", "--choices", "1,2,0"],
        vec![
            "gondola", "add", "--category", "a/b/c", "--name", "Leche", "--price", "1.20",
            "--stock", "3",
        ],
        vec!["gondola", "show", "--filter", "leche"],
        vec!["gondola", "modify", "--id", "2", "--price", "3,40"],
        vec!["gondola", "delete", "--id", "1", "--force"],
        vec!["gondola", "sort", "--by", "price-then-stock", "--descending", "--save"],
        vec!["gondola", "average", "--all"],
        vec!["gondola", "config"],
        vec![
            "gondola",
            "--workspace",
            "/tmp",
            "--log-level",
            "debug",
            "--log-output",
            "stderr",
            "tree",
        ],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_invalid_combinations() {
    assert!(Cli::try_parse_from(["gondola", "average", "--all", "--category", "a/b"]).is_err());
    assert!(Cli::try_parse_from(["gondola", "sort", "--by", "name"]).is_err());
    assert!(Cli::try_parse_from(["gondola", "frobnicate"]).is_err());
}

#[test]
fn sort_defaults_to_ascending_price_display_only() {
    let cli = Cli::try_parse_from(["gondola", "sort", "--category", "a/b"]).unwrap();
    match cli.command_or_menu() {
        Commands::Sort {
            by,
            descending,
            save,
            ..
        } => {
            assert_eq!(by, SortKey::Price);
            assert!(!descending);
            assert!(!save);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn sql_defaults_to_every_phase() {
    let cli = Cli::try_parse_from(["dwh", "sql"]).unwrap();
    let Commands::Sql(args) = cli.command else {
        panic!("expected sql command");
    };
    assert_eq!(args.phase, PhaseArg::All);
    assert_eq!(args.dialect, None);
    assert_eq!(args.phase.phases(), Phase::ALL.to_vec());
}

#[test]
fn global_flags_follow_the_subcommand() {
    let cli = Cli::try_parse_from([
        "dwh", "sql", "--phase", "create", "--dialect", "duckdb", "-t", "prod", "-v",
    ])
    .unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.target.as_deref(), Some("prod"));
    let Commands::Sql(args) = cli.command else {
        panic!("expected sql command");
    };
    assert_eq!(args.phase.phases(), vec![Phase::Create]);
    assert_eq!(args.dialect.map(DialectKind::from), Some(DialectKind::DuckDb));
}

#[test]
fn unknown_phase_is_rejected() {
    assert!(Cli::try_parse_from(["dwh", "sql", "--phase", "vacuum"]).is_err());
}

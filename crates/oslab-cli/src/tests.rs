use super::*;

#[test]
fn parses_run_command() {
    let cli = Cli::try_parse_from(["oslab", "run"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Run)));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["oslab"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_schedule_command() {
    let cli = Cli::try_parse_from(["oslab", "schedule"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Schedule)));
}

#[test]
fn report_defaults_to_all_platforms_and_ten_words() {
    let cli = Cli::try_parse_from(["oslab", "report"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Report {
            platform: None,
            top: 10
        })
    ));
}

#[test]
fn report_with_platform_and_top() {
    let cli =
        Cli::try_parse_from(["oslab", "report", "--platform", "reddit", "--top", "25"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Report {
            platform: Some(ref p),
            top: 25
        }) if p == "reddit"
    ));
}

#[test]
fn parses_db_init_command() {
    let cli = Cli::try_parse_from(["oslab", "db", "init"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Init
        })
    ));
}

#[test]
fn parses_db_stats_command() {
    let cli = Cli::try_parse_from(["oslab", "db", "stats"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Stats
        })
    ));
}

#[test]
fn db_requires_subcommand() {
    assert!(Cli::try_parse_from(["oslab", "db"]).is_err());
}

#[test]
fn describe_lists_every_drop_reason() {
    let summary = oslab_pipeline::RunSummary {
        collected: 10,
        accepted: 4,
        inserted: 3,
        filter: oslab_pipeline::FilterStats {
            empty: 1,
            too_short: 2,
            not_english: 2,
            duplicate: 1,
        },
    };
    let line = run::describe(&summary);
    assert!(line.contains("collected 10"));
    assert!(line.contains("dropped 6"));
    assert!(line.contains("duplicate 1"));
    assert!(line.contains("inserted 3"));
}

#[test]
fn ansi_logs_only_in_development() {
    assert!(use_ansi(&Environment::Development));
    assert!(!use_ansi(&Environment::Test));
    assert!(!use_ansi(&Environment::Production));
}

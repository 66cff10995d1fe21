use super::*;

#[test]
fn parses_run_command() {
    let cli = Cli::try_parse_from(["pricewatch-cli", "run"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Run)));
}

#[test]
fn parses_preview_without_output() {
    let cli =
        Cli::try_parse_from(["pricewatch-cli", "preview"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Preview { output: None })));
}

#[test]
fn parses_preview_with_output_file() {
    let cli = Cli::try_parse_from(["pricewatch-cli", "preview", "--output", "out.csv"])
        .expect("expected valid cli args");
    let Some(Commands::Preview { output: Some(path) }) = cli.command else {
        panic!("expected preview with output, got {:?}", cli.command);
    };
    assert_eq!(path, PathBuf::from("out.csv"));
}

#[test]
fn parses_preview_short_output_flag() {
    let cli = Cli::try_parse_from(["pricewatch-cli", "preview", "-o", "x.csv"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Preview { output: Some(_) })));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pricewatch-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["pricewatch-cli", "collect"]).is_err());
}

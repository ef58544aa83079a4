use std::fs;

use blockfall::core::Game;
use blockfall::Settings;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("blockfall-{}-{}.json", name, std::process::id()))
}

#[test]
fn settings_load_from_file_and_drive_a_game() {
    let path = temp_path("load");
    fs::write(
        &path,
        r#"{ "board": { "width": 8, "height": 20, "lookahead": 5 }, "seed": 11 }"#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(settings.board.width, 8);
    assert_eq!(settings.seed, Some(11));

    let game = Game::new(settings.board, settings.seed.unwrap()).unwrap();
    let view = game.view();
    assert_eq!(view.x, 3);
    assert_eq!(view.next.len(), 5);
    assert_eq!(game.grid().width(), 8);
    assert_eq!(game.grid().height(), 20);
}

#[test]
fn missing_file_reports_the_path() {
    let path = temp_path("missing");
    let err = Settings::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("blockfall-missing"));
}

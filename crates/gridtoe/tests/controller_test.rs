//! Tests for the screen controller driving a live match runner.

use std::time::Duration;

use gridtoe::tui::{ActiveScreen, ScreenController, ScreenTransition, Theme};
use gridtoe::GameConfig;
use gridtoe_engine::{CellState, Command, Player, SessionSnapshot};

fn game_snapshot(controller: &ScreenController) -> Option<SessionSnapshot> {
    match controller.screen() {
        ActiveScreen::Game(screen) => screen.snapshot().clone(),
        ActiveScreen::SizeSelect(_) => None,
    }
}

async fn settle(controller: &mut ScreenController) {
    tokio::time::sleep(Duration::from_millis(1)).await;
    controller.drain_events();
}

#[tokio::test(start_paused = true)]
async fn test_play_starts_runner() {
    let mut controller = ScreenController::new(GameConfig::default());
    assert!(matches!(controller.screen(), ActiveScreen::SizeSelect(_)));
    assert!(!controller.has_match());

    assert!(controller.apply(ScreenTransition::Play { size: 3 }).unwrap());
    settle(&mut controller).await;

    assert!(controller.has_match());
    let snapshot = game_snapshot(&controller).unwrap();
    assert_eq!(*snapshot.size(), 3);
    assert_eq!(*snapshot.current_player(), Player::Cross);
}

#[tokio::test(start_paused = true)]
async fn test_moves_reach_the_runner() {
    let mut controller = ScreenController::new(GameConfig::default());
    controller.apply(ScreenTransition::Play { size: 3 }).unwrap();
    controller
        .apply(ScreenTransition::Send(Command::Move(4)))
        .unwrap();
    settle(&mut controller).await;

    let snapshot = game_snapshot(&controller).unwrap();
    assert_eq!(snapshot.cells()[4], CellState::Cross);
    assert_eq!(*snapshot.current_player(), Player::Nought);
}

#[tokio::test(start_paused = true)]
async fn test_second_play_changes_size_and_resets_scores() {
    let mut controller = ScreenController::new(GameConfig::default());
    controller.apply(ScreenTransition::Play { size: 3 }).unwrap();
    controller.apply(ScreenTransition::Send(Command::Timeout)).unwrap();
    settle(&mut controller).await;
    assert_eq!(game_snapshot(&controller).unwrap().wins(Player::Nought), 1);

    controller.apply(ScreenTransition::GoToSizeSelect).unwrap();
    controller.apply(ScreenTransition::Play { size: 5 }).unwrap();
    settle(&mut controller).await;

    let snapshot = game_snapshot(&controller).unwrap();
    assert_eq!(*snapshot.size(), 5);
    assert_eq!(snapshot.wins(Player::Nought), 0);
    assert_eq!(snapshot.cells().len(), 25);
}

#[tokio::test(start_paused = true)]
async fn test_theme_toggle_and_quit() {
    let mut controller = ScreenController::new(GameConfig::default());
    assert_eq!(*controller.theme(), Theme::Light);
    assert!(controller.apply(ScreenTransition::ToggleTheme).unwrap());
    assert_eq!(*controller.theme(), Theme::Dark);
    assert!(!controller.apply(ScreenTransition::Quit).unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_command_without_match_is_dropped() {
    let mut controller = ScreenController::new(GameConfig::default());
    assert!(controller.apply(ScreenTransition::Send(Command::NewRound)).unwrap());
    assert!(!controller.has_match());
}

#[tokio::test(start_paused = true)]
async fn test_back_to_picker_abandons_match() {
    let mut controller = ScreenController::new(GameConfig::default());
    controller.apply(ScreenTransition::Play { size: 3 }).unwrap();
    controller
        .apply(ScreenTransition::Send(Command::Move(0)))
        .unwrap();
    settle(&mut controller).await;

    controller.apply(ScreenTransition::GoToSizeSelect).unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;
    controller.drain_events();

    controller.apply(ScreenTransition::Play { size: 3 }).unwrap();
    settle(&mut controller).await;

    let snapshot = game_snapshot(&controller).unwrap();
    assert_eq!(snapshot.wins(Player::Cross), 0);
    assert_eq!(snapshot.wins(Player::Nought), 0);
    assert!(snapshot.cells().iter().all(|c| *c == CellState::Empty));
    assert!(*snapshot.timer_running());
}

#![cfg(unix)]

use std::time::Duration;

use battleships::{
    AgentPlayer, GameConfig, GameEngine, Outcome, Phase, PlayerError, ProtocolError,
};

const SETUP_LINE: &str = r#"{"name":"sh","ships":[{"size":1,"x":"J","y":9,"dir":"r"}]}"#;
const TIMEOUT: Duration = Duration::from_secs(10);

fn script_agent(body: &str) -> AgentPlayer {
    let script = format!("echo '{}'; {}", SETUP_LINE, body);
    AgentPlayer::spawn("sh", &["-c".to_string(), script], Some(TIMEOUT)).unwrap()
}

fn first_empty(seed: u64) -> AgentPlayer {
    let args = vec!["--seed".to_string(), seed.to_string()];
    AgentPlayer::spawn(env!("CARGO_BIN_EXE_first-empty-agent"), &args, Some(TIMEOUT)).unwrap()
}

fn config(seed: u64) -> GameConfig {
    GameConfig {
        read_timeout: Some(TIMEOUT),
        seed: Some(seed),
        ..GameConfig::default()
    }
}

#[tokio::test]
async fn test_two_reference_agents_finish_a_game() {
    let report = GameEngine::new(Box::new(first_empty(1)), Box::new(first_empty(2)), &config(3))
        .run()
        .await
        .unwrap();
    assert!(matches!(report.outcome, Outcome::Victory));
    assert_eq!(report.winner_name, "first-empty");
    assert!(report.shots >= 17);
}

#[tokio::test]
async fn test_malformed_reply_from_process_forfeits() {
    let bad = script_agent("while read line; do echo 'A x'; done");
    let report = GameEngine::new(Box::new(bad), Box::new(first_empty(5)), &config(8))
        .run()
        .await
        .unwrap();
    assert_eq!(report.winner, 1);
    assert_eq!(report.loser_name, "sh");
    assert!(matches!(
        report.outcome,
        Outcome::Forfeit {
            phase: Phase::Shoot,
            error: PlayerError::Protocol(ProtocolError::MalformedShot { .. }),
        }
    ));
}

#[tokio::test]
async fn test_process_exiting_after_setup_forfeits() {
    let quitter = script_agent("exit 0");
    let report = GameEngine::new(Box::new(first_empty(5)), Box::new(quitter), &config(8))
        .run()
        .await
        .unwrap();
    assert_eq!(report.winner, 0);
    assert!(matches!(
        report.outcome,
        Outcome::Forfeit {
            phase: Phase::Shoot,
            error: PlayerError::Protocol(ProtocolError::Closed { .. }),
        }
    ));
}

#[tokio::test]
async fn test_slow_process_times_out() {
    let script = format!("echo '{}'; sleep 5", SETUP_LINE);
    let slow = AgentPlayer::spawn(
        "sh",
        &["-c".to_string(), script],
        Some(Duration::from_millis(200)),
    )
    .unwrap();
    let report = GameEngine::new(Box::new(slow), Box::new(first_empty(5)), &config(8))
        .run()
        .await
        .unwrap();
    assert_eq!(report.winner, 1);
    assert!(matches!(
        report.outcome,
        Outcome::Forfeit {
            error: PlayerError::Protocol(ProtocolError::Timeout { .. }),
            ..
        }
    ));
}

#[tokio::test]
async fn test_missing_program_fails_to_spawn() {
    let result = AgentPlayer::spawn("/nonexistent/battleships-agent", &[], None);
    assert!(matches!(result, Err(ProtocolError::Spawn { .. })));
}

//! Render commands
//!
//! The simulation never reads anything back from the presentation layer. It
//! queues commands; the host drains and applies them (DOM in the browser,
//! nothing or a log in headless runs).

use serde::{Deserialize, Serialize};

/// End-of-round banner contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub won: bool,
    pub title: String,
    pub message: String,
}

impl Banner {
    pub fn win(score: i32) -> Self {
        Self {
            won: true,
            title: "You Win!".to_string(),
            message: format!("You scored {} points and reached the goal!", score),
        }
    }

    pub fn lose(score: i32, goal: u32) -> Self {
        Self {
            won: false,
            title: "Time's Up!".to_string(),
            message: format!(
                "You scored {} points. Goal was {}. Try again!",
                score, goal
            ),
        }
    }
}

/// One presentation update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum RenderCommand {
    SpawnDrop { id: u32, x: f32, y: f32, clean: bool },
    MoveDrop { id: u32, y: f32 },
    RemoveDrop { id: u32 },
    MoveBucket { x: f32 },
    SetScore { score: i32 },
    SetTimer { secs: u32 },
    SetGoal { goal: u32 },
    /// Start control enabled/disabled
    SetRunning { running: bool },
    ShowBanner(Banner),
    HideBanners,
    SpawnConfetti { id: u32, x: f32, y: f32, size: f32, color: String },
    MoveConfetti { id: u32, y: f32 },
    RemoveConfetti { id: u32 },
}

/// Consumer of render commands
pub trait RenderSink {
    fn apply(&mut self, cmd: RenderCommand);
}

impl RenderSink for Vec<RenderCommand> {
    fn apply(&mut self, cmd: RenderCommand) {
        self.push(cmd);
    }
}

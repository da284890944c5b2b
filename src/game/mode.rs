//! The top-level game-mode state machine.
//!
//! [`GameModeController`] owns the running [`Simulation`], the local profile
//! and the leaderboard snapshot. Input arrives as [`ModeInput`] in screen
//! space; the Bevy shell mirrors [`GameMode`] into its own state so menus
//! can spawn and despawn with it.

use bevy::prelude::*;

use super::{
    collision::contains_point,
    highscore::{JsonProfileStore, PROFILE_KEY, Profile, ProfileStore},
    leaderboard::{
        LeaderboardClient, LeaderboardError, LeaderboardReply, LeaderboardRequest,
        LeaderboardTable, RequestKind,
    },
    simulation::Simulation,
    sound::SoundEvent,
};
use crate::config::GliderConfig;

#[derive(States, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum GameMode {
    #[default]
    TitleScreen,
    Playing,
    HowTo,
    HighScores,
    ContactInfo,
    MyScores,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ModeInput {
    /// A completed tap, in screen space.
    Tap(Vec2),
    Back,
    NameChar(char),
    NameBackspace,
    NameSubmit,
}

const fn region(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect {
        min: Vec2::new(x, y),
        max: Vec2::new(x + w, y + h),
    }
}

pub const START_REGION: Rect = region(40.0, 240.0, 250.0, 55.0);
pub const HOW_TO_REGION: Rect = region(40.0, 325.0, 275.0, 55.0);
pub const MY_SCORES_REGION: Rect = region(40.0, 416.0, 235.0, 55.0);
pub const HIGH_SCORES_REGION: Rect = region(488.0, 240.0, 270.0, 55.0);
pub const CONTACT_REGION: Rect = region(465.0, 325.0, 305.0, 55.0);
pub const SOUND_REGION: Rect = region(488.0, 416.0, 270.0, 55.0);
pub const SUBMIT_YES_REGION: Rect = region(257.0, 282.0, 121.0, 51.0);
pub const SUBMIT_NO_REGION: Rect = region(439.0, 282.0, 121.0, 51.0);
pub const EXIT_YES_REGION: Rect = region(257.0, 307.0, 121.0, 51.0);
pub const EXIT_NO_REGION: Rect = region(439.0, 307.0, 121.0, 51.0);

pub const NAME_MAX_LEN: usize = 16;

const FETCH_FAILED_NOTICE: &str = "High scores are unavailable. Please try again later.";
const SUBMIT_FAILED_NOTICE: &str = "Your score could not be sent. Please try again later.";

/// What the HUD shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudView {
    pub fuel_fraction: f32,
    pub score: u32,
    pub mode: GameMode,
}

#[derive(Resource)]
pub struct GameModeController {
    mode: GameMode,
    simulation: Simulation,
    profile: Profile,
    store: Box<dyn ProfileStore + Send + Sync>,
    leaderboard: LeaderboardClient,
    table: LeaderboardTable,
    pending: Vec<LeaderboardRequest>,
    notice: Option<String>,
    /// Name typed so far while the submit dialog is open.
    name_entry: Option<String>,
    /// The last game's score is already in the profile.
    score_recorded: bool,
    exit_requested: bool,
}

impl GameModeController {
    pub fn new(
        config: &GliderConfig,
        store: Box<dyn ProfileStore + Send + Sync>,
        leaderboard: LeaderboardClient,
    ) -> Self {
        let profile = store.load(PROFILE_KEY);
        Self {
            mode: GameMode::TitleScreen,
            simulation: Simulation::new(config),
            profile,
            store,
            leaderboard,
            table: LeaderboardTable::default(),
            pending: Vec::new(),
            notice: None,
            name_entry: None,
            score_recorded: true,
            exit_requested: false,
        }
    }

    /// Profile on disk, leaderboard over HTTP.
    pub fn from_config(config: &GliderConfig) -> Self {
        Self::new(
            config,
            Box::new(JsonProfileStore::new()),
            LeaderboardClient::from_config(&config.leaderboard),
        )
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn sound_enabled(&self) -> bool {
        self.profile.sound_enabled
    }

    pub fn table(&self) -> &LeaderboardTable {
        &self.table
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.iter().any(|r| r.kind() == RequestKind::Fetch)
    }

    /// Last leaderboard failure, for display.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn name_entry(&self) -> Option<&str> {
        self.name_entry.as_deref()
    }

    /// Back was pressed on the title screen.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn hud(&self) -> HudView {
        let player = self.simulation.player();
        HudView {
            fuel_fraction: player.fuel_fraction(),
            score: player.score(),
            mode: self.mode,
        }
    }

    pub fn handle(&mut self, input: ModeInput) {
        if self.name_entry.is_some() {
            self.handle_name_entry(input);
            return;
        }

        match (self.mode, input) {
            (GameMode::TitleScreen, ModeInput::Tap(point)) => self.title_tap(point),
            (GameMode::TitleScreen, ModeInput::Back) => {
                info!("Exit requested from the title screen");
                self.exit_requested = true;
            }
            (
                GameMode::HowTo | GameMode::HighScores | GameMode::ContactInfo | GameMode::MyScores,
                ModeInput::Back,
            ) => self.set_mode(GameMode::TitleScreen),
            (GameMode::Playing, ModeInput::Back) => self.set_mode(GameMode::Paused),
            (GameMode::Paused, ModeInput::Back) => self.set_mode(GameMode::Playing),
            (GameMode::Paused, ModeInput::Tap(point)) => {
                if contains_point(EXIT_YES_REGION, point) {
                    self.set_mode(GameMode::TitleScreen);
                } else if contains_point(EXIT_NO_REGION, point) {
                    self.set_mode(GameMode::Playing);
                }
            }
            (GameMode::GameOver, ModeInput::Back) => {
                self.record_score();
                self.set_mode(GameMode::TitleScreen);
            }
            (GameMode::GameOver, ModeInput::Tap(point)) => {
                if contains_point(SUBMIT_YES_REGION, point) {
                    self.record_score();
                    self.name_entry = Some(String::new());
                } else if contains_point(SUBMIT_NO_REGION, point) {
                    self.record_score();
                    self.set_mode(GameMode::TitleScreen);
                }
            }
            _ => {}
        }
    }

    /// Apply finished leaderboard requests, then tick the game if playing.
    /// Returns the sound cues raised this frame.
    pub fn update(&mut self, dt: f32, touch: Option<Vec2>) -> Vec<SoundEvent> {
        self.poll_requests(dt);

        if self.mode != GameMode::Playing {
            return Vec::new();
        }

        let report = self.simulation.tick(dt, touch);
        if report.player_dead {
            info!("Glider lost. Final score: {}", self.simulation.player().score());
            self.set_mode(GameMode::GameOver);
        }
        report.sounds
    }

    fn title_tap(&mut self, point: Vec2) {
        if contains_point(START_REGION, point) {
            self.simulation.reset();
            self.score_recorded = false;
            self.notice = None;
            self.set_mode(GameMode::Playing);
        } else if contains_point(HOW_TO_REGION, point) {
            self.set_mode(GameMode::HowTo);
        } else if contains_point(HIGH_SCORES_REGION, point) {
            self.set_mode(GameMode::HighScores);
            self.fetch_if_needed();
        } else if contains_point(CONTACT_REGION, point) {
            self.set_mode(GameMode::ContactInfo);
        } else if contains_point(MY_SCORES_REGION, point) {
            self.set_mode(GameMode::MyScores);
        } else if contains_point(SOUND_REGION, point) {
            self.profile.sound_enabled = !self.profile.sound_enabled;
            info!("Sound {}", if self.profile.sound_enabled { "on" } else { "off" });
            self.save_profile();
        }
    }

    fn handle_name_entry(&mut self, input: ModeInput) {
        let Some(name) = self.name_entry.as_mut() else {
            return;
        };
        match input {
            ModeInput::NameChar(c) => {
                if !c.is_control() && name.chars().count() < NAME_MAX_LEN {
                    name.push(c);
                }
            }
            ModeInput::NameBackspace => {
                name.pop();
            }
            ModeInput::NameSubmit => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return;
                }
                self.name_entry = None;
                let score = self.simulation.player().score();
                self.pending.push(self.leaderboard.submit(&name, score));
                self.set_mode(GameMode::TitleScreen);
            }
            ModeInput::Back => self.name_entry = None,
            ModeInput::Tap(_) => {}
        }
    }

    fn fetch_if_needed(&mut self) {
        if !self.table.is_loaded() && !self.is_fetching() {
            self.notice = None;
            self.pending.push(self.leaderboard.fetch());
        }
    }

    fn poll_requests(&mut self, dt: f32) {
        let mut finished = Vec::new();
        self.pending.retain_mut(|request| match request.poll(dt) {
            Some(result) => {
                finished.push((request.kind(), result));
                false
            }
            None => true,
        });
        for (kind, result) in finished {
            self.apply_reply(kind, result);
        }
    }

    fn apply_reply(&mut self, kind: RequestKind, result: Result<LeaderboardReply, LeaderboardError>) {
        match result {
            Ok(LeaderboardReply::Table(table)) => {
                info!("Leaderboard updated");
                self.table = table;
                self.notice = None;
            }
            Ok(LeaderboardReply::Submitted) => info!("Score submitted"),
            Err(e) => {
                warn!("Leaderboard {:?} failed: {}", kind, e);
                self.notice = Some(
                    match kind {
                        RequestKind::Fetch => FETCH_FAILED_NOTICE,
                        RequestKind::Submit => SUBMIT_FAILED_NOTICE,
                    }
                    .to_string(),
                );
            }
        }
    }

    fn record_score(&mut self) {
        if self.score_recorded {
            return;
        }
        self.score_recorded = true;
        let score = self.simulation.player().score();
        if self.profile.add_score(score) {
            info!("Score {} added to the local history", score);
        }
        self.save_profile();
    }

    fn save_profile(&self) {
        if let Err(e) = self.store.save(PROFILE_KEY, &self.profile) {
            warn!("Failed to save profile: {}", e);
        }
    }

    fn set_mode(&mut self, mode: GameMode) {
        if mode != self.mode {
            info!("Game mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }
}

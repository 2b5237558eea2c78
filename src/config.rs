/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub sim: SimConfig,
    pub gamepad: GamepadConfig,
    pub levels_dir: PathBuf,
    pub log_file: Option<PathBuf>,
}

/// Everything the simulation reads. Cloned into the session.
#[derive(Clone, Debug, Default)]
pub struct SimConfig {
    pub physics: PhysicsConfig,
    pub hazards: HazardConfig,
    pub timing: TimingConfig,
    pub progress: ProgressConfig,
}

/// Body motion, in pixels per frame.
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub move_speed: f32,
    pub max_fall: f32,
}

#[derive(Clone, Debug)]
pub struct HazardConfig {
    pub stalactite_len_tiles: i32,
    pub stalagmite_len_tiles: i32,
    pub stalactite_fall_accel: f32,
    pub stalactite_max_fall: f32,
    pub trigger_pad: i32,       // px shaved off each side of the trigger span
    pub safe_zone_tiles: i32,   // total inflation of each door rect, in tiles
}

#[derive(Clone, Debug)]
pub struct TimingConfig {
    pub tick_rate_ms: u64,
    pub death_cooldown_s: f32,
    pub lava_stun_s: f32,
    pub cancel_window_ms: u64,
}

#[derive(Clone, Debug)]
pub struct ProgressConfig {
    pub required_collectibles: usize,
    pub hard_level: u8,
    pub ramp_start_col: usize,
    pub ramp_step: usize,       // lava tiles added per death in the hard level
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub jump: Vec<String>,
    pub interact: Vec<String>,
    pub cancel: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    physics: TomlPhysics,
    #[serde(default)]
    hazards: TomlHazards,
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    progress: TomlProgress,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlPhysics {
    #[serde(default = "default_gravity")]
    gravity: f32,
    #[serde(default = "default_jump_velocity")]
    jump_velocity: f32,
    #[serde(default = "default_move_speed")]
    move_speed: f32,
    #[serde(default = "default_max_fall")]
    max_fall: f32,
}

#[derive(Deserialize, Debug)]
struct TomlHazards {
    #[serde(default = "default_hazard_len")]
    stalactite_len_tiles: i32,
    #[serde(default = "default_hazard_len")]
    stalagmite_len_tiles: i32,
    #[serde(default = "default_stalactite_accel")]
    stalactite_fall_accel: f32,
    #[serde(default = "default_stalactite_max_fall")]
    stalactite_max_fall: f32,
    #[serde(default = "default_trigger_pad")]
    trigger_pad: i32,
    #[serde(default = "default_safe_zone")]
    safe_zone_tiles: i32,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_death_cooldown")]
    death_cooldown_s: f32,
    #[serde(default = "default_lava_stun")]
    lava_stun_s: f32,
    #[serde(default = "default_cancel_window")]
    cancel_window_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlProgress {
    #[serde(default = "default_required")]
    required_collectibles: usize,
    #[serde(default = "default_hard_level")]
    hard_level: u8,
    #[serde(default = "default_ramp_start")]
    ramp_start_col: usize,
    #[serde(default = "default_ramp_step")]
    ramp_step: usize,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_jump_btn")]
    jump: Vec<String>,
    #[serde(default = "default_interact_btn")]
    interact: Vec<String>,
    #[serde(default = "default_cancel_btn")]
    cancel: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_levels_dir")]
    levels_dir: String,
    #[serde(default)]
    log_file: Option<String>,
}

// ── Defaults ──

fn default_gravity() -> f32 { 0.75 }
fn default_jump_velocity() -> f32 { 11.0 }
fn default_move_speed() -> f32 { 3.5 }
fn default_max_fall() -> f32 { 16.0 }

fn default_hazard_len() -> i32 { 3 }
fn default_stalactite_accel() -> f32 { 0.9 }
fn default_stalactite_max_fall() -> f32 { 20.0 }
fn default_trigger_pad() -> i32 { 2 }
fn default_safe_zone() -> i32 { 2 }

fn default_tick_rate() -> u64 { 16 }     // ~60 fps
fn default_death_cooldown() -> f32 { 0.5 }
fn default_lava_stun() -> f32 { 1.0 }
fn default_cancel_window() -> u64 { 400 }

fn default_required() -> usize { 6 }
fn default_hard_level() -> u8 { 2 }
fn default_ramp_start() -> usize { 4 }
fn default_ramp_step() -> usize { 2 }

fn default_jump_btn() -> Vec<String> { vec!["A".into()] }
fn default_interact_btn() -> Vec<String> { vec!["X".into(), "B".into()] }
fn default_cancel_btn() -> Vec<String> { vec!["Select".into()] }
fn default_levels_dir() -> String { "levels".into() }

impl Default for TomlPhysics {
    fn default() -> Self {
        TomlPhysics {
            gravity: default_gravity(),
            jump_velocity: default_jump_velocity(),
            move_speed: default_move_speed(),
            max_fall: default_max_fall(),
        }
    }
}

impl Default for TomlHazards {
    fn default() -> Self {
        TomlHazards {
            stalactite_len_tiles: default_hazard_len(),
            stalagmite_len_tiles: default_hazard_len(),
            stalactite_fall_accel: default_stalactite_accel(),
            stalactite_max_fall: default_stalactite_max_fall(),
            trigger_pad: default_trigger_pad(),
            safe_zone_tiles: default_safe_zone(),
        }
    }
}

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            tick_rate_ms: default_tick_rate(),
            death_cooldown_s: default_death_cooldown(),
            lava_stun_s: default_lava_stun(),
            cancel_window_ms: default_cancel_window(),
        }
    }
}

impl Default for TomlProgress {
    fn default() -> Self {
        TomlProgress {
            required_collectibles: default_required(),
            hard_level: default_hard_level(),
            ramp_start_col: default_ramp_start(),
            ramp_step: default_ramp_step(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            jump: default_jump_btn(),
            interact: default_interact_btn(),
            cancel: default_cancel_btn(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            levels_dir: default_levels_dir(),
            log_file: None,
        }
    }
}

// ── Schema → public structs ──

impl From<TomlPhysics> for PhysicsConfig {
    fn from(t: TomlPhysics) -> Self {
        PhysicsConfig {
            gravity: t.gravity,
            jump_velocity: t.jump_velocity,
            move_speed: t.move_speed,
            max_fall: t.max_fall,
        }
    }
}

impl From<TomlHazards> for HazardConfig {
    fn from(t: TomlHazards) -> Self {
        HazardConfig {
            stalactite_len_tiles: t.stalactite_len_tiles.max(1),
            stalagmite_len_tiles: t.stalagmite_len_tiles.max(1),
            stalactite_fall_accel: t.stalactite_fall_accel,
            stalactite_max_fall: t.stalactite_max_fall,
            trigger_pad: t.trigger_pad,
            safe_zone_tiles: t.safe_zone_tiles,
        }
    }
}

impl From<TomlTiming> for TimingConfig {
    fn from(t: TomlTiming) -> Self {
        TimingConfig {
            tick_rate_ms: t.tick_rate_ms.max(1),
            death_cooldown_s: t.death_cooldown_s,
            lava_stun_s: t.lava_stun_s,
            cancel_window_ms: t.cancel_window_ms,
        }
    }
}

impl From<TomlProgress> for ProgressConfig {
    fn from(t: TomlProgress) -> Self {
        ProgressConfig {
            required_collectibles: t.required_collectibles,
            hard_level: t.hard_level,
            ramp_start_col: t.ramp_start_col,
            ramp_step: t.ramp_step,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self { TomlPhysics::default().into() }
}

impl Default for HazardConfig {
    fn default() -> Self { TomlHazards::default().into() }
}

impl Default for TimingConfig {
    fn default() -> Self { TomlTiming::default().into() }
}

impl Default for ProgressConfig {
    fn default() -> Self { TomlProgress::default().into() }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: exe directory, CWD, `~/.local/share/finding-dodo`,
    /// `/usr/share/finding-dodo`. Missing file or keys fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        Self::from_toml(toml_cfg, &search_dirs)
    }

    fn from_toml(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        let levels_dir_str = &toml_cfg.general.levels_dir;
        let levels_dir = if PathBuf::from(levels_dir_str).is_absolute() {
            PathBuf::from(levels_dir_str)
        } else {
            search_dirs.iter()
                .map(|d| d.join(levels_dir_str))
                .find(|p| p.is_dir())
                .unwrap_or_else(|| PathBuf::from(levels_dir_str))
        };

        GameConfig {
            sim: SimConfig {
                physics: toml_cfg.physics.into(),
                hazards: toml_cfg.hazards.into(),
                timing: toml_cfg.timing.into(),
                progress: toml_cfg.progress.into(),
            },
            gamepad: GamepadConfig {
                jump: toml_cfg.gamepad.jump,
                interact: toml_cfg.gamepad.interact,
                cancel: toml_cfg.gamepad.cancel,
            },
            levels_dir,
            log_file: toml_cfg.general.log_file.map(PathBuf::from),
        }
    }
}

/// Candidate directories to search: exe dir + CWD + system paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/finding-dodo");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    let sys = PathBuf::from("/usr/share/finding-dodo");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => return parse_toml(&text),
                Err(e) => {
                    tracing::warn!("could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

fn parse_toml(text: &str) -> TomlConfig {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("config.toml parse error, using default settings: {e}");
            TomlConfig::default()
        }
    }
}

//! Shared types - constants and plain data used by every crate
//!
//! Everything here is a pure data definition with no dependencies, so the
//! simulation core, the terminal front-end and the input layer agree on the
//! same vocabulary.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! Rows above the board (negative y) exist only transiently while a piece is
//! spawning; they are never stored.
//!
//! # Timing Constants
//!
//! All durations are in milliseconds of session time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame tick used by the terminal loop (~60 FPS) |
//! | `LOCK_DELAY_MS` | 1000 | Grace period before a grounded piece locks |
//! | `MAX_LOCK_RESETS` | 15 | Lock timer re-arms allowed per grounding |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 0 |
//! | `DROP_STEP_MS` | 50 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity interval floor |
//! | `CLOCK_TICK_MS` | 100 | Elapsed-time clock period |
//! | `GARBAGE_INTERVAL_MS` | 10000 | Garbage injection period (rising mode) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, ModeKind, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(ModeKind::from_str("lines40"), Some(ModeKind::Lines40));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame tick used by the terminal loop (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Lock delay once a piece is grounded
pub const LOCK_DELAY_MS: u32 = 1000;

/// Maximum number of lock timer re-arms while a piece stays grounded
pub const MAX_LOCK_RESETS: u8 = 15;

/// Gravity interval at level 0 (1 row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level
pub const DROP_STEP_MS: u32 = 50;

/// Gravity interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Period of the coarse elapsed-time clock
pub const CLOCK_TICK_MS: u32 = 100;

/// Period between garbage rows in rising mode
pub const GARBAGE_INTERVAL_MS: u32 = 10_000;

/// Line clear points indexed by lines cleared in a single lock.
///
/// Clears beyond four lines score the four-line value.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// Contents of a filled board cell
///
/// Locked pieces keep their identity so renderers can color them; rows pushed
/// up from the bottom in rising mode use the garbage marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    Piece(PieceKind),
    Garbage,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Block)`: Filled cell
pub type Cell = Option<Block>;

/// Logical player actions
///
/// The six gameplay actions come from key bindings; `Pause` and `Restart` are
/// session controls handled by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop to the lowest valid position and lock immediately
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Swap with the held piece (once per piece)
    Hold,
    /// Toggle pause state
    Pause,
    /// Start a fresh session in the same mode
    Restart,
}

impl GameAction {
    /// Actions that can be rebound by the player
    pub const BINDABLE: [GameAction; 6] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Rotate,
        GameAction::Hold,
    ];

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Discrete notifications emitted by a session.
///
/// These carry no state the core depends on; sinks may play a sound, flash a
/// banner or ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Move,
    Rotate,
    Lock,
    LineClear(u32),
    HardDrop,
    Hold,
    LevelUp(u32),
    GameOver { completed: bool },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Move => "move",
            GameEvent::Rotate => "rotate",
            GameEvent::Lock => "lock",
            GameEvent::LineClear(_) => "lineClear",
            GameEvent::HardDrop => "hardDrop",
            GameEvent::Hold => "hold",
            GameEvent::LevelUp(_) => "levelUp",
            GameEvent::GameOver { .. } => "gameOver",
        }
    }
}

/// Game mode identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    /// No completion condition; runs until top-out
    Endless,
    /// Clear 40 lines
    Lines40,
    /// Clear 20 lines
    Lines20,
    /// Garbage rows rise from below on a timer
    Rising,
    /// Play until the clock runs out
    TimeAttack,
}

impl ModeKind {
    pub const ALL: [ModeKind; 5] = [
        ModeKind::Endless,
        ModeKind::Lines40,
        ModeKind::Lines20,
        ModeKind::Rising,
        ModeKind::TimeAttack,
    ];

    /// Parse a mode identifier (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ModeKind;
    ///
    /// assert_eq!(ModeKind::from_str("timeattack"), Some(ModeKind::TimeAttack));
    /// assert_eq!(ModeKind::from_str("Rising"), Some(ModeKind::Rising));
    /// assert_eq!(ModeKind::from_str("marathon"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "endless" => Some(ModeKind::Endless),
            "lines40" => Some(ModeKind::Lines40),
            "lines20" => Some(ModeKind::Lines20),
            "rising" => Some(ModeKind::Rising),
            "timeattack" => Some(ModeKind::TimeAttack),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeKind::Endless => "endless",
            ModeKind::Lines40 => "lines40",
            ModeKind::Lines20 => "lines20",
            ModeKind::Rising => "rising",
            ModeKind::TimeAttack => "timeattack",
        }
    }
}

//! tsumo-engine - placement rules, chain resolution and the live session.
//!
//! Provides collision, rotation nudges, gravity, flood-fill chains, move
//! enumeration, the color bag and the driver-facing session state machine.

pub mod apply;
pub mod bag;
pub mod chain;
pub mod collision;
pub mod config;
pub mod gravity;
pub mod kicks;
pub mod movegen;
pub mod movement;
pub mod session;

pub use apply::{drop_pair, lock_piece, simulate_placement, spawn_row};
pub use bag::TsumoBag;
pub use chain::{
    find_clearable, find_connected_group, resolve_step, resolve_to_fixpoint, ChainResult, Group,
    CLEAR_THRESHOLD,
};
pub use collision::{check_collision, is_position_valid, landing_row, piece_fits};
pub use config::{ConfigError, OpeningRule, SessionConfig};
pub use gravity::apply_gravity;
pub use kicks::nudges;
pub use movegen::{enumerate_moves, MoveList};
pub use movement::{can_advance, try_fall, try_move, try_rotate, RotationResult};
pub use session::{
    LockOutcome, Phase, Session, SessionError, SessionSnapshot, SpawnOutcome, StepOutcome,
    TurnReport,
};

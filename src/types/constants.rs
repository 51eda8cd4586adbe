pub const OPEN: u8 = 0;
pub const WALL: u8 = 1;

/// Stand-in for an infinite `deltaDist` when a ray never crosses an axis.
pub const DELTA_DIST_SENTINEL: f64 = 1e30;

pub const SIMPLE_MAX_STEPS: usize = 50;
pub const DEFAULT_MAX_STEPS: usize = 256;

pub const DEFAULT_PLANE_LEN: f64 = 0.66;
pub const DEFAULT_SCREEN_WIDTH: u32 = 320;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 200;

pub const VOID: char = ' ';
pub const PLAYER_MARKERS: [char; 4] = ['N', 'S', 'E', 'W'];
pub const ALLOWED_MAP_CHARS: [char; 7] = ['0', '1', VOID, 'N', 'S', 'E', 'W'];

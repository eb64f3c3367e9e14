pub const STANDARD_SIZE: usize = 10;
pub const STANDARD_FLEET: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Solutions the classifier asks for: enough to tell unique from ambiguous.
pub const CLASSIFY_LIMIT: usize = 2;

/// Search depth below which parallel search forks both branches.
pub const PARALLEL_DEPTH: usize = 6;

/// Random tries for one ship before the layout is restarted.
pub const PLACEMENT_ATTEMPTS: usize = 100;
pub const LAYOUT_RESTARTS: usize = 50;

/// Environment variable read by `init_logging`.
pub const LOG_ENV: &str = "BATTLESHIPS_LOG";

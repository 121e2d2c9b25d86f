// Constants for the Pascal interpreter

/// Default byte budget for recorded history (64 MiB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;

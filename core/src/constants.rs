// Creation limits
pub const MIN_RECIPIENTS: usize = 2;
pub const MAX_RECIPIENTS: usize = 10;

// Shares are whole percentage points
pub const TOTAL_SHARES: u64 = 100;
pub const MAX_SHARE: u64 = 100;

// Upper bound on recipients read back from an arbitrary splitter address;
// anything above is treated as corrupt rather than fanned out.
pub const MAX_READ_RECIPIENTS: usize = 256;

//! Defaults for the remote catalog, the response cache, and catch rules.

// ═══════════════════════════════════════════════════════════════════════════════
// REMOTE CATALOG
// ═══════════════════════════════════════════════════════════════════════════════

/// Base URL of the public PokeAPI v2.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Number of location areas shown per `map`/`mapb` step.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// RESPONSE CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// How long a cached response lives, and how often the sweep runs.
pub const DEFAULT_CACHE_TTL_SECONDS: i64 = 60;

// ═══════════════════════════════════════════════════════════════════════════════
// CATCH RULES
// ═══════════════════════════════════════════════════════════════════════════════

/// Base experience is capped here before comparing with the throw roll.
pub const MAX_CATCH_EXPERIENCE: u32 = 400;

/// Each face of the throw die is worth this many points.
pub const CATCH_ROLL_STEP: u32 = 30;

/// Number of faces on the throw die (rolls are `1..=CATCH_ROLL_FACES`).
pub const CATCH_ROLL_FACES: u32 = 9;

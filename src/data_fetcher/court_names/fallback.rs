//! Static court names used when live resource listings are unavailable.
//!
//! Keys are the first 8 characters of the tenant id and of the resource id.
//! `GET /discover-courts` reports drift between this table and the live API.

/// `(tenant prefix, resource prefix, court name)`
pub const FALLBACK_COURT_NAMES: &[(&str, &str, &str)] = &[
    // Bam Bam Padel, Ubud
    ("9a18884f", "a7c47627", "Bandeja Court"),
    ("9a18884f", "78c071c3", "Golden Point Court"),
    ("9a18884f", "c07c691d", "Drop Shot Court"),
    ("9a18884f", "190bc9d2", "Chiquita Court"),
    ("9a18884f", "2cf59005", "Vibora Court"),
    // Gods Social Club / Padel of Gods
    ("e8eb5e6f", "5c766963", "Karma"),
    ("e8eb5e6f", "1a3cb35d", "Dharma"),
    ("e8eb5e6f", "5b754cd1", "Purgatory (Outdoor)"),
    // Simply Padel Sanur
    ("48c00d13", "62532960", "Court 1 (Satu)"),
    ("48c00d13", "8a0bff4d", "Court 2 (Dua)"),
    ("48c00d13", "156a30d0", "Court 3 (Tiga)"),
    // Fine Ground
    ("8e6debc5", "da0a3656", "South Court"),
    ("8e6debc5", "5dc61d47", "North Court"),
    // Bisma Padel
    ("6407c760", "91d38986", "Bisma 1"),
    ("6407c760", "2400f56e", "Bisma 2"),
    // Monkey Padel Bali Sayan Ubud
    ("5ad933a3", "350bcb71", "Center Court"),
    ("5ad933a3", "b12a8cb9", "Court 2"),
    ("5ad933a3", "3b5e99ff", "Court 3"),
    // TAO Padel Academy
    ("bc8e4a3c", "b8002086", "Court 1"),
    ("bc8e4a3c", "4ea93257", "Court 2"),
    ("bc8e4a3c", "05e7214d", "Court 3"),
    ("bc8e4a3c", "02245c98", "Court 4"),
    // Mahima Tennis, Padel & Gym
    ("325afbbf", "ccfdce4e", "Padel 1"),
    ("325afbbf", "6dade228", "Padel 2"),
    ("325afbbf", "a0756f12", "Padel 3"),
    // Prime Padel & Pickle
    ("c32d1739", "11ef4c74", "Padel 1"),
    ("c32d1739", "dba606ad", "Padel 2"),
    // Padel Dise Bali
    ("6ca040f6", "2f28606b", "Padel 1"),
    ("6ca040f6", "11e070ec", "Padel 2"),
    ("6ca040f6", "17133465", "Padel 3"),
    ("6ca040f6", "0666822e", "Padel 4"),
];

/// Looks up a court by already-truncated keys.
pub fn lookup(tenant_key: &str, resource_key: &str) -> Option<&'static str> {
    FALLBACK_COURT_NAMES
        .iter()
        .find(|(tenant, resource, _)| *tenant == tenant_key && *resource == resource_key)
        .map(|(_, _, name)| *name)
}

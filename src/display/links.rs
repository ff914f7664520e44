//! Booking links for slots.

use crate::data_fetcher::models::TimeSlot;

/// Official websites of clubs that take bookings directly, keyed by club name.
const CLUB_WEBSITES: &[(&str, &str)] = &[
    ("Bam Bam Padel Ubud", "https://www.bambampadel.com"),
    ("BamBam Padel", "https://www.bambampadel.com"),
    ("Monkey Padel Bali", "https://monkeypadelbali.com"),
    ("Monkey Padel Bali Sayan Ubud", "https://monkeypadelbali.com"),
    ("Simply Padel", "https://simply-padel.com"),
    ("Simply Padel Sanur", "https://simply-padel.com"),
    ("Padel of Gods", "https://padelofgodsbali.com"),
    ("Padel of Gods Bali", "https://padelofgodsbali.com"),
];

pub fn club_website(club: &str) -> Option<&'static str> {
    CLUB_WEBSITES
        .iter()
        .find(|(name, _)| *name == club)
        .map(|(_, url)| *url)
}

/// Playtomic page for a club, by slug when known, otherwise by tenant id.
pub fn playtomic_tenant_url(tenant_id: &str, slug: Option<&str>, date: Option<&str>) -> String {
    let query = date.map(|d| format!("?date={d}")).unwrap_or_default();
    match slug.filter(|s| !s.is_empty()) {
        Some(slug) => format!("https://playtomic.com/clubs/{slug}{query}"),
        None => format!("https://playtomic.io/tenant/{tenant_id}{query}"),
    }
}

/// Where to book a slot: the club's own website if listed, else Playtomic.
pub fn booking_url(slot: &TimeSlot) -> String {
    match club_website(&slot.club) {
        Some(url) => url.to_string(),
        None => playtomic_tenant_url(
            &slot.tenant_id,
            slot.tenant_slug.as_deref(),
            Some(&slot.date),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::Region;

    fn slot(club: &str, slug: Option<&str>) -> TimeSlot {
        TimeSlot {
            id: TimeSlot::make_id("tenant-1", "r1", "2026-03-01", "18:00:00", 60),
            tenant_id: "tenant-1".to_string(),
            tenant_slug: slug.map(str::to_string),
            club: club.to_string(),
            location: Region::Sanur,
            date: "2026-03-01".to_string(),
            time: "18:00:00".to_string(),
            court: "Court 1".to_string(),
            price: 200000,
            available: true,
            duration: 60,
        }
    }

    #[test]
    fn test_booking_url_prefers_club_website() {
        assert_eq!(
            booking_url(&slot("Simply Padel Sanur", Some("simply-padel"))),
            "https://simply-padel.com"
        );
    }

    #[test]
    fn test_booking_url_falls_back_to_playtomic() {
        assert_eq!(
            booking_url(&slot("Other Club", Some("other-club"))),
            "https://playtomic.com/clubs/other-club?date=2026-03-01"
        );
        assert_eq!(
            booking_url(&slot("Other Club", None)),
            "https://playtomic.io/tenant/tenant-1?date=2026-03-01"
        );
    }

    #[test]
    fn test_playtomic_tenant_url_without_date() {
        assert_eq!(
            playtomic_tenant_url("abc", None, None),
            "https://playtomic.io/tenant/abc"
        );
    }
}

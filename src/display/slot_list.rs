// src/display/slot_list.rs - Plain-text slot listing for one-shot mode

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use super::formatting::{format_court_name, format_price};
use super::links::booking_url;
use crate::data_fetcher::models::TimeSlot;
use crate::preferences::SkipReason;

const SEPARATOR: &str = "────────────────────────────────────────────────────────────────";

/// Options for [`render_slot_list`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Print the booking link under each slot.
    pub show_links: bool,
}

/// Writes a header, one line per slot and a count footer.
pub fn render_slot_list<W: Write>(
    out: &mut W,
    date: &str,
    slots: &[TimeSlot],
    options: ListOptions,
) -> io::Result<()> {
    write_header(out, date)?;

    if slots.is_empty() {
        writeln!(out, "No available slots match your filters.")?;
        return Ok(());
    }

    let club_width = slots
        .iter()
        .map(|slot| slot.club.width())
        .max()
        .unwrap_or(0);
    let court_names: Vec<String> = slots
        .iter()
        .map(|slot| format_court_name(&slot.court))
        .collect();
    let court_width = court_names
        .iter()
        .map(|name| name.width())
        .max()
        .unwrap_or(0);

    for (slot, court) in slots.iter().zip(&court_names) {
        writeln!(
            out,
            "{}  {}  {}  {:>3} min  {:>12}  {}",
            short_time(&slot.time),
            pad(&slot.club, club_width),
            pad(court, court_width),
            slot.duration,
            format_price(slot.price),
            slot.location,
        )?;
        if options.show_links {
            writeln!(out, "       {}", booking_url(slot))?;
        }
    }

    writeln!(out, "{SEPARATOR}")?;
    let noun = if slots.len() == 1 { "slot" } else { "slots" };
    writeln!(out, "{} {noun}", slots.len())?;
    Ok(())
}

/// Writes the header and the reason a date was not fetched.
pub fn render_skip_notice<W: Write>(out: &mut W, date: &str, reason: SkipReason) -> io::Result<()> {
    write_header(out, date)?;
    writeln!(out, "{reason}.")?;
    writeln!(out, "Use --show-all to ignore your preferences.")
}

fn write_header<W: Write>(out: &mut W, date: &str) -> io::Result<()> {
    writeln!(out, "PADEL SLOTS  {date}  (Bali time)")?;
    writeln!(out, "{SEPARATOR}")
}

/// Left-aligns `text` to `width` terminal columns. Wide glyphs count as two.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn short_time(time: &str) -> &str {
    time.get(..5).unwrap_or(time)
}

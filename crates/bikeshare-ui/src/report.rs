//! Plain-text rendering of an [`AnalysisResult`].
//!
//! Each pass gets its own section: a heading, its figures (or its error),
//! and the time it took. Lines inside a section carry the `**>` prefix.

use std::io::{self, Write};

use bikeshare_core::error::BikeshareError;
use bikeshare_core::formatting::{format_duration, format_elapsed, rule};
use bikeshare_core::models::{month_name, weekday_name};
use bikeshare_data::aggregator::Breakdown;
use bikeshare_data::analysis::{AnalysisResult, PassOutcome};
use bikeshare_data::analyzer::{
    BirthYearStats, DurationStats, StationStats, TravelTimeStats, UserStats,
};

/// Write every section of the report.
pub fn render_report<W: Write>(out: &mut W, analysis: &AnalysisResult) -> io::Result<()> {
    writeln!(out, "*> {} trips match the selected filters", analysis.trips_analyzed)?;
    writeln!(out, "{}", rule())?;
    render_section(
        out,
        "Calculating The Most Frequent Times of Travel...",
        &analysis.travel_times,
        render_travel_times,
    )?;
    render_section(
        out,
        "Calculating The Most Popular Stations and Trip...",
        &analysis.stations,
        render_stations,
    )?;
    render_section(
        out,
        "Calculating Trip Duration...",
        &analysis.durations,
        render_durations,
    )?;
    render_section(out, "Calculating User Stats...", &analysis.users, render_users)
}

// ── Sections ──────────────────────────────────────────────────────────────────

fn render_section<W: Write, T>(
    out: &mut W,
    heading: &str,
    outcome: &PassOutcome<T>,
    body: fn(&mut W, &T) -> io::Result<()>,
) -> io::Result<()> {
    writeln!(out, "*> {}", heading)?;
    match &outcome.result {
        Ok(stats) => body(out, stats)?,
        Err(e) => error_line(out, e)?,
    }
    writeln!(out, "*> This took {} seconds.", format_elapsed(outcome.elapsed))?;
    writeln!(out, "{}", rule())
}

fn render_travel_times<W: Write>(out: &mut W, stats: &TravelTimeStats) -> io::Result<()> {
    writeln!(
        out,
        "**> Most common month is \"{}\" with {} travels",
        month_name(stats.month.value).unwrap_or("unknown"),
        stats.month.count
    )?;
    writeln!(
        out,
        "**> Most common day is \"{}\" with {} travels",
        weekday_name(stats.weekday.value).unwrap_or("unknown"),
        stats.weekday.count
    )?;
    writeln!(
        out,
        "**> Most busy hour is \"{}\" with {} travels",
        stats.hour.value, stats.hour.count
    )
}

fn render_stations<W: Write>(out: &mut W, stats: &StationStats) -> io::Result<()> {
    writeln!(
        out,
        "**> Most commonly used start station is \"{}\" with {} travels",
        stats.start_station.value, stats.start_station.count
    )?;
    writeln!(
        out,
        "**> Most commonly used end station is \"{}\" with {} travels",
        stats.end_station.value, stats.end_station.count
    )?;
    writeln!(
        out,
        "**> Most frequent combination of start and end station is \"{}\" with {} trips",
        stats.route.value, stats.route.count
    )
}

fn render_durations<W: Write>(out: &mut W, stats: &DurationStats) -> io::Result<()> {
    if stats.missing > 0 {
        info_line(out, &empty_entries(stats.missing, "Trip Duration"))?;
    }
    writeln!(out, "**> Total travel time is {}", format_duration(stats.total))?;
    writeln!(out, "**> Mean travel time is {}", format_duration(stats.mean))
}

fn render_users<W: Write>(out: &mut W, stats: &UserStats) -> io::Result<()> {
    match &stats.user_types {
        Ok(types) => render_breakdown(out, types, "User Type", "user type")?,
        Err(e) => error_line(out, e)?,
    }
    match &stats.genders {
        Ok(genders) => render_breakdown(out, genders, "Gender", "gender")?,
        Err(e) => error_line(out, e)?,
    }
    match &stats.birth_years {
        Ok(years) => render_birth_years(out, years),
        Err(e) => error_line(out, e),
    }
}

fn render_breakdown<W: Write>(
    out: &mut W,
    breakdown: &Breakdown<String>,
    field: &str,
    label: &str,
) -> io::Result<()> {
    if breakdown.missing > 0 {
        info_line(out, &empty_entries(breakdown.missing, field))?;
    }
    for entry in &breakdown.counts {
        writeln!(
            out,
            "**> Total travels of {} \"{}\" is {}",
            label, entry.value, entry.count
        )?;
    }
    Ok(())
}

fn render_birth_years<W: Write>(out: &mut W, years: &BirthYearStats) -> io::Result<()> {
    if years.missing > 0 {
        info_line(out, &empty_entries(years.missing, "Birth Year"))?;
        info_line(out, "They are ignored")?;
    }
    match &years.summary {
        Some(summary) => {
            writeln!(out, "**> The earliest user is born in {}", summary.earliest)?;
            writeln!(out, "**> The youngest user is born in {}", summary.most_recent)?;
            writeln!(
                out,
                "**> The common birth year is {} ({} travels)",
                summary.most_common.value, summary.most_common.count
            )
        }
        None => info_line(out, "No birth year data available"),
    }
}

// ── Line helpers ──────────────────────────────────────────────────────────────

fn empty_entries(count: usize, field: &str) -> String {
    format!("There are {} entry(ies) with empty value in {} field", count, field)
}

fn info_line<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "**> INFO : {}", message)
}

fn error_line<W: Write>(out: &mut W, err: &BikeshareError) -> io::Result<()> {
    writeln!(out, "**> ERROR : {}", err)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

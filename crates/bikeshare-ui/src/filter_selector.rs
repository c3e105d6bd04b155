//! Interactive city / month / day selection.

use std::io::{self, BufRead, Write};

use bikeshare_core::formatting::rule;
use bikeshare_core::models::{City, DayFilter, MonthFilter, TripFilter};

use crate::console::Console;

/// Entering this code at any of the three prompts cancels the selection.
pub const CANCEL_CODE: u32 = 0;

const CITY_LEGEND: &str = "*> Valid values are 1: Chicago, 2: New York City, 3: Washington, 0: Exit";
const MONTH_LEGEND: &str = "*> Valid values are 1: January, 2: February, 3: March, 4: April, 5: May, 6: June, 7: All, 0: Exit";
const DAY_LEGEND: &str = "*> Valid values are 1: Monday, 2: Tuesday, 3: Wednesday, 4: Thursday, 5: Friday, 6: Saturday, 7: Sunday, 8: All, 0: Exit";

pub const CITY_PROMPT: &str = "*> City code? :";
pub const MONTH_PROMPT: &str = "*> Month code? :";
pub const DAY_PROMPT: &str = "*> Day of week code? :";

/// Ask for a city, a month and a day of week.
///
/// Returns `None` when the user cancels (code 0) or input ends; prompts
/// after the cancelling one are never shown.
pub fn select_filters<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Option<TripFilter>> {
    console.say(&rule())?;
    console.say("Hello! Let's explore some US bikeshare data!")?;
    console.say(&rule())?;

    console.say("*>")?;
    console.say("*> Please enter the city code to analyze.")?;
    console.say(CITY_LEGEND)?;
    let Some(city) = ask(console, CITY_PROMPT, City::ALL.len() as u32, City::from_code)? else {
        return Ok(None);
    };

    console.say("*>")?;
    console.say("*> Please enter the month code to filter by")?;
    console.say(MONTH_LEGEND)?;
    let Some(month) = ask(console, MONTH_PROMPT, MonthFilter::ALL_CODE, MonthFilter::from_code)?
    else {
        return Ok(None);
    };

    console.say("*>")?;
    console.say("*> Please enter the day of week code to filter by")?;
    console.say(DAY_LEGEND)?;
    let Some(day) = ask(console, DAY_PROMPT, DayFilter::ALL_CODE, DayFilter::from_code)? else {
        return Ok(None);
    };

    let filter = TripFilter { city, month, day };
    print_parameters(console, &filter)?;
    tracing::debug!(city = %filter.city, month = %filter.month, day = %filter.day, "filters selected");
    Ok(Some(filter))
}

/// Read a code in `0..=max` and map it; 0 and end of input give `None`.
fn ask<R: BufRead, W: Write, T>(
    console: &mut Console<R, W>,
    prompt: &str,
    max: u32,
    map: impl Fn(u32) -> Option<T>,
) -> io::Result<Option<T>> {
    match console.read_code(prompt, CANCEL_CODE, max)? {
        Some(CANCEL_CODE) | None => Ok(None),
        Some(code) => Ok(map(code)),
    }
}

fn print_parameters<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    filter: &TripFilter,
) -> io::Result<()> {
    console.say("*>")?;
    console.say(&rule())?;
    console.say("*> PARAMETERS")?;
    console.say(&format!("*> CITY    :{}", filter.city))?;
    console.say(&format!("*> MONTH   :{}", filter.month))?;
    console.say(&format!("*> DAY     :{}", filter.day))?;
    console.say(&rule())
}

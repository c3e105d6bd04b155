//! Paged display of the filtered rows.

use std::io::{self, BufRead, Write};

use bikeshare_core::models::{TripRecord, TripTable};

use crate::console::Console;
use crate::table_view::render_rows;

/// Consecutive windows of `page_size` records, starting at row 0.
///
/// The last window may be shorter; an empty table yields no windows.
#[derive(Debug, Clone)]
pub struct RawDataPager<'a> {
    records: &'a [TripRecord],
    page_size: usize,
    offset: usize,
}

impl<'a> RawDataPager<'a> {
    /// A `page_size` of 0 is treated as 1.
    pub fn new(records: &'a [TripRecord], page_size: usize) -> Self {
        Self {
            records,
            page_size: page_size.max(1),
            offset: 0,
        }
    }

    /// Index of the first record of the next window.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.records.len()
    }
}

impl<'a> Iterator for RawDataPager<'a> {
    type Item = &'a [TripRecord];

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }
        let end = (self.offset + self.page_size).min(self.records.len());
        let window = &self.records[self.offset..end];
        self.offset = end;
        Some(window)
    }
}

/// Offer the rows of `table` window by window while the user answers "yes".
///
/// Returns the number of windows shown.
pub fn browse_raw_data<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    table: &TripTable,
    page_size: usize,
) -> io::Result<usize> {
    if table.is_empty() {
        console.say("*> There is no raw data to show for these filters.")?;
        return Ok(0);
    }

    let mut pager = RawDataPager::new(&table.records, page_size);
    let mut shown = 0;
    loop {
        let prompt = if shown == 0 {
            format!("*> Do you want to see the {} lines of raw data? (yes/no) : ", page_size)
        } else {
            format!("*> Do you want to see next {} lines? (yes/no) : ", page_size)
        };
        if !console.read_yes_no(&prompt)? {
            break;
        }
        let Some(window) = pager.next() else {
            break;
        };
        render_rows(console.output(), table, window)?;
        shown += 1;

        if pager.is_exhausted() {
            console.say("*> All raw data has been shown.")?;
            break;
        }
    }

    tracing::debug!(windows = shown, rows = pager.offset(), "raw data browsing finished");
    Ok(shown)
}

//! Column-aligned text report.
//!
//! Every cell is right-aligned within its column and followed by a `|`
//! separator. A column is as wide as its widest cell plus [`PADDING`]
//! spaces, so the narrowest cell still gets three leading spaces:
//!
//! ```text
//!    File Name|            File Path|   File Size|
//!    copy1.txt|        tmp/copy1.txt|          28|
//!    copy1.txt|      tmp/A/copy1.txt|          28|
//! ```

use std::io::{self, Write};

use tabled::builder::Builder;
use tabled::settings::{Alignment, Padding, Style};
use tabled::Table;

use crate::duplicates::FileGroups;

/// Minimum number of spaces in front of every cell.
pub const PADDING: usize = 3;

/// Column separator.
pub const SEPARATOR: char = '|';

/// Report header.
pub const HEADER: [&str; 3] = ["File Name", "File Path", "File Size"];

/// Lay out `rows` as a borderless table, each cell right-aligned and
/// followed by [`SEPARATOR`].
#[must_use]
pub fn build_table<I, R, S>(rows: I) -> Table
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut builder = Builder::default();
    for row in rows {
        builder.push_record(row.into_iter().map(Into::into));
    }

    let mut table = builder.build();
    table
        .with(Style::empty().vertical(SEPARATOR).right(SEPARATOR))
        .with(Alignment::right())
        .with(Padding::new(PADDING, 0, 0, 0));
    table
}

/// Write the duplicate report. Nothing is written when there are no groups.
pub fn write_report<W: Write>(groups: &FileGroups, out: &mut W) -> io::Result<()> {
    if groups.is_empty() {
        return Ok(());
    }

    let header = HEADER.map(String::from);
    let rows = groups.sorted().flat_map(|(_, files)| {
        files.iter().map(|file| {
            [
                file.name.clone(),
                file.path.display().to_string(),
                file.size.to_string(),
            ]
        })
    });

    let table = build_table(std::iter::once(header).chain(rows));
    writeln!(out, "{}", table)?;
    out.flush()
}

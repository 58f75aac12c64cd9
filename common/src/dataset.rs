use csv::{ReaderBuilder, StringRecord};

use crate::error::Result;
use crate::point::{coerce_number, Point};

const NAME_COLUMN: &str = "name";
const X_COLUMN: &str = "mpg";
const Y_COLUMN: &str = "hp";

/// Parses comma-separated text with a header row into points, in source order.
///
/// `mpg` becomes `x` and `hp` becomes `y`; every other column is ignored.
/// Missing or malformed numbers turn into NaN rather than failing the load.
/// A blank line is a row with only an empty name, so it still occupies an
/// index; the single newline ending the text does not.
pub fn parse_csv(text: &str) -> Result<Vec<Point>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let name = column(&headers, NAME_COLUMN);
    let x = column(&headers, X_COLUMN);
    let y = column(&headers, Y_COLUMN);

    let mut points = Vec::new();
    let mut record = StringRecord::new();
    loop {
        // The reader skips empty lines; each one still counts as a row.
        let blank = empty_lines_from(text, reader.position().byte() as usize);
        if !reader.read_record(&mut record)? {
            // The newline ending the text is not a row of its own.
            points.extend((1..blank).map(|_| blank_row()));
            break;
        }
        points.extend((0..blank).map(|_| blank_row()));

        let field = |index: Option<usize>| index.and_then(|i| record.get(i));
        points.push(Point {
            name: field(name).unwrap_or_default().to_owned(),
            x: coerce_number(field(x)),
            y: coerce_number(field(y)),
        });
    }
    Ok(points)
}

fn blank_row() -> Point {
    Point::new("", f64::NAN, f64::NAN)
}

/// Counts the empty lines starting at `offset`, which sits either at the start
/// of a line or inside the terminator of the record read last.
fn empty_lines_from(text: &str, offset: usize) -> usize {
    let bytes = text.as_bytes();
    let mut at = offset.min(bytes.len());
    match at.checked_sub(1).map(|previous| bytes[previous]) {
        None | Some(b'\n') => {}
        Some(b'\r') => {
            if bytes.get(at) == Some(&b'\n') {
                at += 1;
            }
        }
        Some(_) => at += terminator_len(&bytes[at..]),
    }

    let mut count = 0;
    loop {
        match terminator_len(&bytes[at..]) {
            0 => return count,
            len => {
                at += len;
                count += 1;
            }
        }
    }
}

fn terminator_len(bytes: &[u8]) -> usize {
    match bytes {
        [b'\r', b'\n', ..] => 2,
        [b'\r' | b'\n', ..] => 1,
        _ => 0,
    }
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

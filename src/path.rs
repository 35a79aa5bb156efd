use std::path::PathBuf;

use chrono::Datelike;

use crate::model::Address;

/// Where an address lives below the output root: `{YYYY}/{MM}/{YYYY}_{MM}_{DD}.{ext}`.
///
/// Years are padded to four digits, months and days to two, in both the directory and the
/// file name.
pub fn local_path(address: &Address) -> PathBuf {
    let (year, month, day) = (address.date.year(), address.date.month(), address.date.day());
    let mut path = PathBuf::from(format!("{year:04}"));
    path.push(format!("{month:02}"));
    path.push(format!("{year:04}_{month:02}_{day:02}.{}", address.variant.extension()));
    path
}

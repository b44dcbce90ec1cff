use std::io::{prelude::*, BufWriter};
use std::fs::File;
use std::path::Path;
use anyhow::{anyhow, Result};

use gifdoc::ColorTable;

const MAGIC_NUMBER: &[u8] = b"P3";

pub fn write_ppm(filename: &Path, width: u16, height: u16, indexes: &[u8], color_table: &ColorTable) -> Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(&file);

    writer.write_all(MAGIC_NUMBER)?;
    writer.write_all(b"\n")?;
    writer.write_all(format!("{} {}", width, height).as_bytes())?;
    writer.write_all(b" 255")?;
    writer.write_all(b"\n")?;

    for index_row in indexes.chunks(width.into()) {
        index_row.iter().enumerate().try_for_each(|(i, idx)| -> Result<()> {
            let color = color_table
                .get(*idx)
                .ok_or_else(|| anyhow!("color index {} is outside the {} entry color table", idx, color_table.len()))?;

            writer.write_all(format!("{: >3} {: >3} {: >3}", color.red, color.green, color.blue).as_bytes())?;
            if i + 1 != usize::from(width) {
                writer.write_all(b" ")?;
            }
            Ok(())
        })?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

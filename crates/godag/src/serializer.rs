//! Flat-file writers for the adjacency mapping and the name lookup.
//!
//! Two formats:
//! - JSON: indented object, keys sorted, ASCII-only (non-ASCII characters are
//!   written as `\uXXXX` escapes).
//! - DSV: one `key<TAB>value...` line per key. Embedded tabs and newlines are
//!   written as-is, so keys or values containing them produce ambiguous rows.

use crate::error::Result;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    /// Tab-delimited
    #[default]
    Dsv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Dsv => write!(f, "dsv"),
        }
    }
}

/// Value side of a DSV row.
///
/// Sets produce multi-valued rows (`key<TAB>a<TAB>b`), strings single-valued
/// rows (`key<TAB>value`).
pub trait DsvValue {
    fn write_value<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()>;
}

impl DsvValue for BTreeSet<String> {
    fn write_value<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                out.write_all(b"\t")?;
            }
            out.write_all(value.as_bytes())?;
        }
        Ok(())
    }
}

impl DsvValue for String {
    fn write_value<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.as_bytes())
    }
}

/// Write `data` to `path` in the requested format
pub fn write_output<V>(data: &BTreeMap<String, V>, path: &Path, format: OutputFormat) -> Result<()>
where
    V: Serialize + DsvValue,
{
    match format {
        OutputFormat::Json => write_json(data, path),
        OutputFormat::Dsv => write_dsv(data, path),
    }
}

pub fn write_json<V: Serialize>(data: &BTreeMap<String, V>, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json_to(data, &mut writer)?;
    writer.flush()?;

    info!(path = %path.display(), keys = data.len(), "Wrote JSON output");
    Ok(())
}

pub fn write_json_to<V, W>(data: &BTreeMap<String, V>, writer: &mut W) -> Result<()>
where
    V: Serialize,
    W: Write,
{
    let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, AsciiFormatter::new());
    data.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    Ok(())
}

pub fn write_dsv<V: DsvValue>(data: &BTreeMap<String, V>, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_dsv_to(data, &mut writer)?;
    writer.flush()?;

    info!(path = %path.display(), rows = data.len(), "Wrote DSV output");
    Ok(())
}

pub fn write_dsv_to<V, W>(data: &BTreeMap<String, V>, writer: &mut W) -> Result<()>
where
    V: DsvValue,
    W: Write,
{
    for (key, value) in data {
        writer.write_all(key.as_bytes())?;
        writer.write_all(b"\t")?;
        value.write_value(writer)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

// ============================================================================
// ASCII-only pretty formatter
// ============================================================================

/// [`PrettyFormatter`] that escapes every non-ASCII character as `\uXXXX`
/// (UTF-16 surrogate pairs beyond the BMP).
struct AsciiFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl<'a> AsciiFormatter<'a> {
    fn new() -> Self {
        AsciiFormatter {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for AsciiFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            if start < i {
                writer.write_all(fragment[start..i].as_bytes())?;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        if start < fragment.len() {
            writer.write_all(fragment[start..].as_bytes())?;
        }
        Ok(())
    }
}

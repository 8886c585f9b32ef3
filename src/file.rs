//! Streaming file codec.
//!
//! The compressed file has the same layout as a framed buffer (count header,
//! key region, data region) but is never held in memory as a whole. Two
//! independent cursors are opened on the same path: one walks the header and
//! key region from offset 0, the other starts at the data region, whose
//! offset is known up front from the element count alone.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, warn};

use crate::constants::HEADER_SIZE;
use crate::decoder::{alloc_values, read_partial_le, unpack, Source};
use crate::encoder::{pack, Sink};
use crate::error::{Error, Result, Stream};
use crate::layout::Layout;

/// Map an early end of file on `stream` to a corrupt-input error
fn eof_as(stream: Stream) -> impl Fn(io::Error) -> Error {
    move |e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::Truncated { stream }
        } else {
            Error::Io(e)
        }
    }
}

/// Sink writing through the key cursor and the data cursor of one file
struct FileSink {
    keys: BufWriter<File>,
    data: BufWriter<File>,
}

impl FileSink {
    /// Flush both cursors so write errors surface here rather than on drop
    fn finish(mut self) -> Result<()> {
        self.data.flush()?;
        self.keys.flush()?;
        Ok(())
    }
}

impl Sink for FileSink {
    #[inline]
    fn put_value(&mut self, value: u64, width: u8) -> Result<()> {
        if width > 0 {
            self.data.write_all(&value.to_le_bytes()[..usize::from(width)])?;
        }
        Ok(())
    }

    #[inline]
    fn put_key(&mut self, key: u8) -> Result<()> {
        self.keys.write_all(&[key])?;
        Ok(())
    }
}

/// Source reading through the key cursor and the data cursor of one file
struct FileSource {
    keys: BufReader<File>,
    data: BufReader<File>,
}

impl Source for FileSource {
    #[inline]
    fn next_key(&mut self) -> Result<u8> {
        let mut key = [0u8; 1];
        self.keys.read_exact(&mut key).map_err(eof_as(Stream::Key))?;
        Ok(key[0])
    }

    #[inline]
    fn take_value(&mut self, width: u8) -> Result<u64> {
        if width == 0 {
            return Ok(0);
        }
        let mut bytes = [0u8; 8];
        let bytes = &mut bytes[..usize::from(width)];
        self.data.read_exact(bytes).map_err(eof_as(Stream::Data))?;
        Ok(read_partial_le(bytes))
    }
}

fn write_file(path: &Path, values: &[u64], delta: bool, layout: &Layout) -> Result<u64> {
    // Key cursor first: it creates (and truncates) the file the data cursor reopens.
    let mut keys = BufWriter::new(File::create(path)?);
    let mut data = OpenOptions::new().write(true).open(path)?;
    data.seek(SeekFrom::Start(layout.data_offset() as u64))?;

    keys.write_all(&(values.len() as u64).to_le_bytes())?;

    let mut sink = FileSink {
        keys,
        data: BufWriter::new(data),
    };
    let written = pack(values, delta, &mut sink)?;
    sink.finish()?;

    Ok((layout.data_offset() + written) as u64)
}

/// Compress `values` straight into the file at `path`.
///
/// The file is created or truncated. Returns the total number of bytes
/// written: header, key region and data region.
///
/// There is no rollback: if a write fails partway, whatever was already
/// flushed stays on disk and the error is returned.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be opened, seeked or written.
pub fn compress_to_file<P: AsRef<Path>>(values: &[u64], delta: bool, path: P) -> Result<u64> {
    let path = path.as_ref();
    let layout = Layout::for_values(values, delta, true);
    debug!(
        "compressing {} values to {}: key region {} bytes, data region at offset {} ({} bytes)",
        layout.count,
        path.display(),
        layout.key_len(),
        layout.data_offset(),
        layout.data_len
    );

    write_file(path, values, delta, &layout).inspect_err(|e| {
        warn!("compressing {} values to {} failed: {e}", values.len(), path.display());
    })
}

/// Open `path` and read its element count, checking it against the file length.
fn open_with_count(path: &Path) -> Result<(BufReader<File>, usize, u64)> {
    let file = File::open(path)?;
    let file_len = file.metadata()?.len();
    let mut keys = BufReader::new(file);

    let mut header = [0u8; HEADER_SIZE];
    keys.read_exact(&mut header).map_err(eof_as(Stream::Key))?;
    let raw = u64::from_le_bytes(header);
    let count = usize::try_from(raw).map_err(|_| Error::LengthOverflow(raw))?;

    let max = Layout::max_count(usize::try_from(file_len).unwrap_or(usize::MAX), true);
    if count > max {
        return Err(Error::Truncated { stream: Stream::Key });
    }

    Ok((keys, count, file_len))
}

/// Read the header of a compressed file and return its layout.
///
/// `data_len` is the number of bytes after the data offset, i.e. the data
/// region of a well-formed file.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read and a corrupt-input error
/// if the header is missing or claims more values than the file can hold.
pub fn read_file_header<P: AsRef<Path>>(path: P) -> Result<Layout> {
    let (_, count, file_len) = open_with_count(path.as_ref())?;
    let mut layout = Layout::for_count(count, true);
    layout.data_len = usize::try_from(file_len)
        .unwrap_or(usize::MAX)
        .saturating_sub(layout.data_offset());
    Ok(layout)
}

fn read_file(path: &Path, delta: bool) -> Result<Vec<u64>> {
    let (keys, count, _) = open_with_count(path)?;
    let layout = Layout::for_count(count, true);

    let mut data = File::open(path)?;
    data.seek(SeekFrom::Start(layout.data_offset() as u64))?;

    let mut source = FileSource {
        keys,
        data: BufReader::new(data),
    };
    let mut out = alloc_values(count)?;
    unpack(&mut source, delta, &mut out)?;
    Ok(out)
}

/// Decompress a file written by [`compress_to_file`].
///
/// The element count comes from the file header and equals the returned
/// vector's length. `delta` must match the flag used when compressing.
///
/// # Errors
/// Returns [`Error::Io`] on read failures, [`Error::Truncated`] or
/// [`Error::InvalidWidth`] for corrupt files, and [`Error::Alloc`] if the
/// output cannot be allocated.
pub fn decompress_from_file<P: AsRef<Path>>(path: P, delta: bool) -> Result<Vec<u64>> {
    let path = path.as_ref();
    read_file(path, delta).inspect_err(|e| {
        warn!("decompressing {} failed: {e}", path.display());
    })
}
